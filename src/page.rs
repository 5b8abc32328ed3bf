use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::page::Page as CrPage;
use serde::Serialize;

use crate::control::{ControlHandle, FormControl, Tag};
use crate::error::{Error, Result};
use crate::surface::{FormSurface, InteractionEvent, ValueWrite};

/// DOM id of the on-page notice.
pub const NOTICE_ID: &str = "formfiller-notification";

/// Selector for the controls a scan covers. Handles index into this list.
const CONTROL_SELECTOR: &str = "input, textarea, select";

/// Wrapper around a chromiumoxide Page that exposes its form controls.
pub struct Page {
    inner: CrPage,
    default_timeout: Duration,
    /// What each handle pointed at in the last snapshot.
    snapshot: Mutex<Vec<Fingerprint>>,
}

/// Enough of a control to tell whether its index still points at it.
#[derive(Debug, Clone, Serialize)]
struct Fingerprint {
    tag: Tag,
    name: String,
    id: String,
}

impl From<&FormControl> for Fingerprint {
    fn from(control: &FormControl) -> Self {
        Self {
            tag: control.tag,
            name: control.name.clone(),
            id: control.id.clone(),
        }
    }
}

/// A write as the in-page script consumes it.
#[derive(Serialize)]
struct ScriptWrite<'a> {
    index: usize,
    expect: Option<Fingerprint>,
    value: &'a str,
    events: &'a [InteractionEvent],
    background: &'a str,
    border: Option<&'a str>,
}

/// In-page predicate: does `el` still match fingerprint `f`, if one is known.
const MATCHES_JS: &str = "(el, f) => !f || (el.tagName.toLowerCase() === f.tag && (el.name || '') === f.name && (el.id || '') === f.id)";

impl Page {
    pub(crate) fn new(inner: CrPage, default_timeout: Duration) -> Self {
        Self { inner, default_timeout, snapshot: Mutex::new(Vec::new()) }
    }

    /// Returns a reference to the underlying chromiumoxide Page.
    pub fn inner(&self) -> &CrPage {
        &self.inner
    }

    /// Get the current page URL.
    pub async fn url(&self) -> Result<String> {
        self.inner
            .url()
            .await
            .map_err(|e| Error::NavigationError(e.to_string()))?
            .ok_or_else(|| Error::NavigationError("No URL found".into()))
    }

    /// Get the current page title.
    pub async fn title(&self) -> Result<String> {
        let result = self
            .inner
            .evaluate("document.title")
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        Ok(result.into_value::<String>().unwrap_or_default())
    }

    /// Wait for an element matching the given CSS selector to appear in the DOM.
    /// Polls every 100ms up to the configured default timeout.
    pub async fn wait_for_selector(&self, selector: &str) -> Result<()> {
        let selector_js = to_js(selector)?;
        let js = format!("!!document.querySelector({selector_js})");
        let interval = Duration::from_millis(100);
        let start = std::time::Instant::now();

        loop {
            let present = self
                .inner
                .evaluate(js.as_str())
                .await
                .map_err(|e| Error::JsError(e.to_string()))?
                .into_value::<bool>()
                .unwrap_or(false);
            if present {
                return Ok(());
            }
            if start.elapsed() >= self.default_timeout {
                return Err(Error::Timeout(format!(
                    "Timed out waiting for selector: {}",
                    selector
                )));
            }
            tokio::time::sleep(interval).await;
        }
    }

    /// Close this tab.
    pub async fn close(self) -> Result<()> {
        self.inner.close().await?;
        Ok(())
    }

    fn fingerprint(&self, handle: ControlHandle) -> Option<Fingerprint> {
        let snapshot = self.snapshot.lock().unwrap_or_else(|e| e.into_inner());
        snapshot.get(handle.0).cloned()
    }

    /// Evaluate a JavaScript expression without caring about the return value.
    pub async fn evaluate_void(&self, expression: &str) -> Result<()> {
        self.inner
            .evaluate(expression)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        Ok(())
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| Error::JsError(e.to_string()))
}

#[async_trait]
impl FormSurface for Page {
    async fn controls(&self) -> Result<Vec<FormControl>> {
        let js = format!(
            r#"
            JSON.stringify(
                Array.from(document.querySelectorAll({selector})).map((el, index) => ({{
                    handle: index,
                    tag: el.tagName.toLowerCase(),
                    type: (el.type || 'text').toLowerCase(),
                    name: el.name || '',
                    id: el.id || '',
                    placeholder: el.placeholder || '',
                    ariaLabel: el.getAttribute('aria-label') || '',
                    className: typeof el.className === 'string' ? el.className : '',
                    disabled: !!el.disabled,
                    readOnly: !!el.readOnly,
                    value: el.value || ''
                }}))
            )
            "#,
            selector = to_js(CONTROL_SELECTOR)?,
        );
        let result = self
            .inner
            .evaluate(js)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        let json_str: String = result
            .into_value()
            .map_err(|e| Error::JsError(e.to_string()))?;
        let controls: Vec<FormControl> =
            serde_json::from_str(&json_str).map_err(|e| Error::JsError(e.to_string()))?;
        *self.snapshot.lock().unwrap_or_else(|e| e.into_inner()) =
            controls.iter().map(Fingerprint::from).collect();
        Ok(controls)
    }

    async fn apply(&self, writes: &[ValueWrite]) -> Result<usize> {
        if writes.is_empty() {
            return Ok(0);
        }
        let payload: Vec<ScriptWrite<'_>> = writes
            .iter()
            .map(|w| ScriptWrite {
                index: w.handle.0,
                expect: self.fingerprint(w.handle),
                value: &w.value,
                events: w.events,
                background: w.highlight.background(),
                border: w.highlight.border(),
            })
            .collect();
        let js = format!(
            r#"
            (() => {{
                const nodes = document.querySelectorAll({selector});
                const matches = {matches};
                let applied = 0;
                for (const w of {writes}) {{
                    const el = nodes[w.index];
                    if (!el || !matches(el, w.expect)) continue;
                    applied++;
                    el.value = w.value;
                    for (const type of w.events) {{
                        el.dispatchEvent(new Event(type, {{ bubbles: true }}));
                    }}
                    el.style.transition = 'all 0.3s ease';
                    el.style.backgroundColor = w.background;
                    if (w.border) el.style.border = w.border;
                }}
                return applied;
            }})()
            "#,
            selector = to_js(CONTROL_SELECTOR)?,
            matches = MATCHES_JS,
            writes = to_js(&payload)?,
        );
        let result = self
            .inner
            .evaluate(js)
            .await
            .map_err(|e| Error::JsError(e.to_string()))?;
        result.into_value::<usize>().map_err(|e| Error::JsError(e.to_string()))
    }

    async fn unhighlight(&self, handles: &[ControlHandle]) -> Result<()> {
        let targets: Vec<(usize, Option<Fingerprint>)> =
            handles.iter().map(|h| (h.0, self.fingerprint(*h))).collect();
        let js = format!(
            r#"
            (() => {{
                const nodes = document.querySelectorAll({selector});
                const matches = {matches};
                for (const [i, expect] of {targets}) {{
                    const el = nodes[i];
                    if (!el || !matches(el, expect)) continue;
                    el.style.backgroundColor = '';
                    el.style.border = '';
                }}
            }})()
            "#,
            selector = to_js(CONTROL_SELECTOR)?,
            matches = MATCHES_JS,
            targets = to_js(&targets)?,
        );
        self.evaluate_void(&js).await
    }

    async fn show_notice(&self, text: &str) -> Result<()> {
        let js = format!(
            r#"
            (() => {{
                const existing = document.getElementById({id});
                if (existing) existing.remove();

                if (!document.getElementById({style_id})) {{
                    const style = document.createElement('style');
                    style.id = {style_id};
                    style.textContent = `
                        @keyframes slideInRight {{
                            from {{ transform: translateX(400px); opacity: 0; }}
                            to {{ transform: translateX(0); opacity: 1; }}
                        }}
                    `;
                    (document.head || document.documentElement).appendChild(style);
                }}

                const notice = document.createElement('div');
                notice.id = {id};
                notice.textContent = {text};
                notice.style.cssText = `
                    position: fixed;
                    top: 20px;
                    right: 20px;
                    background: linear-gradient(135deg, #667eea 0%, #764ba2 100%);
                    color: white;
                    padding: 15px 25px;
                    border-radius: 8px;
                    box-shadow: 0 4px 20px rgba(0,0,0,0.3);
                    z-index: 999999;
                    font-family: Arial, sans-serif;
                    font-size: 14px;
                    font-weight: 600;
                    animation: slideInRight 0.3s ease;
                `;
                (document.body || document.documentElement).appendChild(notice);
            }})()
            "#,
            id = to_js(NOTICE_ID)?,
            style_id = to_js(&format!("{NOTICE_ID}-style"))?,
            text = to_js(text)?,
        );
        self.evaluate_void(&js).await
    }

    async fn fade_notice(&self) -> Result<()> {
        let js = format!(
            r#"
            (() => {{
                const notice = document.getElementById({id});
                if (!notice) return;
                notice.style.transition = 'all 0.3s ease';
                notice.style.opacity = '0';
                notice.style.transform = 'translateX(400px)';
            }})()
            "#,
            id = to_js(NOTICE_ID)?,
        );
        self.evaluate_void(&js).await
    }

    async fn remove_notice(&self) -> Result<()> {
        let js = format!(
            "(() => {{ const n = document.getElementById({id}); if (n) n.remove(); }})()",
            id = to_js(NOTICE_ID)?,
        );
        self.evaluate_void(&js).await
    }
}
