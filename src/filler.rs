use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::classifier::{self, FillContext};
use crate::config::FillerConfig;
use crate::control::FormControl;
use crate::error::Result;
use crate::profile::Profile;
use crate::scheduler::{Scheduler, TaskKey};
use crate::surface::{FormSurface, Highlight, ValueWrite, CLEAR_EVENTS, FILL_EVENTS};

/// Counts reported for one fill.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillResult {
    pub found: usize,
    pub filled: usize,
}

/// The writes a fill would perform over a snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FillPlan {
    /// Controls that passed the exclusion filter.
    pub found: usize,
    pub writes: Vec<ValueWrite>,
}

impl FillPlan {
    /// Counts for the plan as if every write lands.
    pub fn result(&self) -> FillResult {
        FillResult { found: self.found, filled: self.writes.len() }
    }
}

/// Classify every fillable control in `controls` against `profile`.
///
/// Pure and synchronous: nothing is written until the plan is applied.
pub fn plan_fill(controls: &[FormControl], profile: &Profile, ctx: &FillContext) -> FillPlan {
    let mut plan = FillPlan::default();

    for control in controls.iter().filter(|c| c.is_fillable()) {
        plan.found += 1;

        let Some(classification) = classifier::classify(control, profile, ctx) else {
            debug!(handle = control.handle.0, "no rule matched");
            continue;
        };
        let Some(value) = classification.fill_value() else {
            debug!(
                handle = control.handle.0,
                rule = classification.rule.label,
                "profile has no value for matched rule"
            );
            continue;
        };

        debug!(
            handle = control.handle.0,
            rule = classification.rule.label,
            confidence = ?classification.rule.confidence,
            "filling control"
        );
        plan.writes.push(ValueWrite {
            handle: control.handle,
            value: value.to_string(),
            events: FILL_EVENTS,
            highlight: Highlight::Filled,
        });
    }

    plan
}

/// Empty every clearable control in `controls`.
pub fn plan_clear(controls: &[FormControl]) -> Vec<ValueWrite> {
    controls
        .iter()
        .filter(|c| c.is_clearable())
        .map(|c| ValueWrite {
            handle: c.handle,
            value: String::new(),
            events: CLEAR_EVENTS,
            highlight: Highlight::Cleared,
        })
        .collect()
}

/// Fills and clears the controls of one document.
///
/// Highlight reversions and notice dismissals run as spawned tasks that
/// outlive the filler; dropping it does not leave effects on the page.
pub struct FormFiller<S> {
    surface: Arc<S>,
    config: FillerConfig,
    effects: Scheduler,
}

impl<S: FormSurface + 'static> FormFiller<S> {
    pub fn new(surface: S) -> Self {
        Self::with_config(surface, FillerConfig::default())
    }

    pub fn with_config(surface: S, config: FillerConfig) -> Self {
        Self {
            surface: Arc::new(surface),
            config,
            effects: Scheduler::new(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn config(&self) -> &FillerConfig {
        &self.config
    }

    /// Pending highlight reversions and notice dismissals.
    pub fn pending_effects(&self) -> usize {
        self.effects.pending()
    }

    /// Fill the document from `profile`, dating `date` inputs today.
    pub async fn fill(&self, profile: &Profile, auto_detect: bool) -> Result<FillResult> {
        let ctx = FillContext::new(auto_detect).message_fallback(self.config.message_fallback.clone());
        self.fill_with(profile, &ctx).await
    }

    pub async fn fill_with(&self, profile: &Profile, ctx: &FillContext) -> Result<FillResult> {
        let controls = self.surface.controls().await?;
        let plan = plan_fill(&controls, profile, ctx);

        let applied = self.surface.apply(&plan.writes).await?;
        if applied < plan.writes.len() {
            debug!(planned = plan.writes.len(), applied, "controls changed since snapshot");
        }
        let result = FillResult { found: plan.found, filled: applied };
        self.schedule_unhighlight(&plan.writes, self.config.fill_highlight);

        if result.filled > 0 {
            self.notify(&format!("✅ Filled {} out of {} fields", result.filled, result.found))
                .await?;
        }

        info!(found = result.found, filled = result.filled, "form filled");
        Ok(result)
    }

    /// Empty every clearable control. Returns whether anything was cleared.
    pub async fn clear(&self) -> Result<bool> {
        let controls = self.surface.controls().await?;
        let writes = plan_clear(&controls);

        let cleared = self.surface.apply(&writes).await?;
        self.schedule_unhighlight(&writes, self.config.clear_highlight);

        if cleared > 0 {
            self.notify(&format!("🗑️ Cleared {cleared} fields")).await?;
        }

        info!(cleared, "form cleared");
        Ok(cleared > 0)
    }

    fn schedule_unhighlight(&self, writes: &[ValueWrite], delay: Duration) {
        for write in writes {
            let surface = Arc::clone(&self.surface);
            let handle = write.handle;
            self.effects.schedule(TaskKey::Highlight(handle), delay, async move {
                if let Err(e) = surface.unhighlight(&[handle]).await {
                    warn!(handle = handle.0, "failed to revert highlight: {e}");
                }
            });
        }
    }

    /// Show a notice and schedule its fade and removal, superseding any
    /// dismissal still pending from an earlier notice.
    async fn notify(&self, text: &str) -> Result<()> {
        self.effects.cancel(TaskKey::Notice);
        self.surface.show_notice(text).await?;

        let surface = Arc::clone(&self.surface);
        let fade = self.config.notice_fade;
        self.effects.schedule(TaskKey::Notice, self.config.notice_duration, async move {
            if let Err(e) = surface.fade_notice().await {
                warn!("failed to fade notice: {e}");
            }
            tokio::time::sleep(fade).await;
            if let Err(e) = surface.remove_notice().await {
                warn!("failed to remove notice: {e}");
            }
        });
        Ok(())
    }
}
