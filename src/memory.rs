use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::control::{ControlHandle, FormControl};
use crate::error::Result;
use crate::surface::{FormSurface, Highlight, InteractionEvent, ValueWrite};

/// A control held by a [`MemoryDocument`], with what has happened to it.
#[derive(Debug, Clone)]
pub struct MemoryControl {
    pub control: FormControl,
    pub highlight: Option<Highlight>,
    /// Every event dispatched on this control, oldest first.
    pub events: Vec<InteractionEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub text: String,
    pub fading: bool,
}

#[derive(Debug, Default)]
struct DocumentState {
    controls: Vec<MemoryControl>,
    notice: Option<Notice>,
    notices_shown: Vec<String>,
}

impl DocumentState {
    fn find(&self, handle: ControlHandle) -> Option<&MemoryControl> {
        self.controls.iter().find(|c| c.control.handle == handle)
    }

    fn find_mut(&mut self, handle: ControlHandle) -> Option<&mut MemoryControl> {
        self.controls.iter_mut().find(|c| c.control.handle == handle)
    }
}

/// An in-process document snapshot implementing [`FormSurface`].
///
/// Clones share the same state, so a clone handed to a filler can be
/// inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    state: Arc<Mutex<DocumentState>>,
}

impl MemoryDocument {
    /// Build a document from controls in document order. Handles are
    /// reassigned to match each control's position.
    pub fn new(controls: impl IntoIterator<Item = FormControl>) -> Self {
        let controls = controls
            .into_iter()
            .enumerate()
            .map(|(i, mut control)| {
                control.handle = ControlHandle(i);
                MemoryControl { control, highlight: None, events: Vec::new() }
            })
            .collect();
        Self {
            state: Arc::new(Mutex::new(DocumentState { controls, ..Default::default() })),
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.lock().controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn value(&self, handle: ControlHandle) -> Option<String> {
        self.lock().find(handle).map(|c| c.control.value.clone())
    }

    pub fn values(&self) -> Vec<String> {
        self.lock().controls.iter().map(|c| c.control.value.clone()).collect()
    }

    pub fn control(&self, handle: ControlHandle) -> Option<MemoryControl> {
        self.lock().find(handle).cloned()
    }

    pub fn highlight(&self, handle: ControlHandle) -> Option<Highlight> {
        self.lock().find(handle).and_then(|c| c.highlight)
    }

    pub fn events(&self, handle: ControlHandle) -> Vec<InteractionEvent> {
        self.lock().find(handle).map(|c| c.events.clone()).unwrap_or_default()
    }

    /// The notice currently on the page.
    pub fn notice(&self) -> Option<Notice> {
        self.lock().notice.clone()
    }

    /// Every notice text ever shown, oldest first.
    pub fn notices_shown(&self) -> Vec<String> {
        self.lock().notices_shown.clone()
    }

    /// Remove a control, as a page script detaching its node would. The
    /// remaining controls keep their handles.
    pub fn remove(&self, handle: ControlHandle) {
        self.lock().controls.retain(|c| c.control.handle != handle);
    }

    /// Simulate the user typing into a control, without events.
    pub fn set_value(&self, handle: ControlHandle, value: impl Into<String>) {
        if let Some(c) = self.lock().find_mut(handle) {
            c.control.value = value.into();
        }
    }

    fn lock(&self) -> MutexGuard<'_, DocumentState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl FormSurface for MemoryDocument {
    async fn controls(&self) -> Result<Vec<FormControl>> {
        Ok(self.lock().controls.iter().map(|c| c.control.clone()).collect())
    }

    async fn apply(&self, writes: &[ValueWrite]) -> Result<usize> {
        let mut state = self.lock();
        let mut applied = 0;
        for write in writes {
            // Writes to controls removed since the snapshot are dropped.
            if let Some(c) = state.find_mut(write.handle) {
                c.control.value = write.value.clone();
                c.events.extend_from_slice(write.events);
                c.highlight = Some(write.highlight);
                applied += 1;
            }
        }
        Ok(applied)
    }

    async fn unhighlight(&self, handles: &[ControlHandle]) -> Result<()> {
        let mut state = self.lock();
        for handle in handles {
            if let Some(c) = state.find_mut(*handle) {
                c.highlight = None;
            }
        }
        Ok(())
    }

    async fn show_notice(&self, text: &str) -> Result<()> {
        let mut state = self.lock();
        state.notice = Some(Notice { text: text.to_string(), fading: false });
        state.notices_shown.push(text.to_string());
        Ok(())
    }

    async fn fade_notice(&self) -> Result<()> {
        if let Some(notice) = self.lock().notice.as_mut() {
            notice.fading = true;
        }
        Ok(())
    }

    async fn remove_notice(&self) -> Result<()> {
        self.lock().notice = None;
        Ok(())
    }
}
