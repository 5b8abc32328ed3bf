use async_trait::async_trait;
use serde::Serialize;

use crate::control::{ControlHandle, FormControl};
use crate::error::Result;

/// Synthetic events dispatched on a control after its value changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionEvent {
    Input,
    Change,
    Blur,
    Keyup,
}

impl InteractionEvent {
    pub fn as_str(self) -> &'static str {
        match self {
            InteractionEvent::Input => "input",
            InteractionEvent::Change => "change",
            InteractionEvent::Blur => "blur",
            InteractionEvent::Keyup => "keyup",
        }
    }
}

/// Events sent after a fill, in dispatch order.
pub const FILL_EVENTS: &[InteractionEvent] = &[
    InteractionEvent::Input,
    InteractionEvent::Change,
    InteractionEvent::Blur,
    InteractionEvent::Keyup,
];

/// Events sent after a clear, in dispatch order.
pub const CLEAR_EVENTS: &[InteractionEvent] = &[InteractionEvent::Input, InteractionEvent::Change];

/// Temporary styling applied to a control the filler touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Filled,
    Cleared,
}

impl Highlight {
    pub fn background(self) -> &'static str {
        match self {
            Highlight::Filled => "#90EE90",
            Highlight::Cleared => "#ffebee",
        }
    }

    pub fn border(self) -> Option<&'static str> {
        match self {
            Highlight::Filled => Some("2px solid #4CAF50"),
            Highlight::Cleared => None,
        }
    }
}

/// One value assignment, with the events announcing it and its highlight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueWrite {
    pub handle: ControlHandle,
    pub value: String,
    pub events: &'static [InteractionEvent],
    pub highlight: Highlight,
}

/// A document whose form controls can be read and written.
///
/// Implementations must address controls by the handles they reported from
/// [`FormSurface::controls`] and must dispatch events with bubbling enabled.
///
/// A handle is only meaningful against the snapshot that produced it. When
/// the document changes in between, a write whose control is gone or no
/// longer matches the snapshot is skipped rather than redirected.
#[async_trait]
pub trait FormSurface: Send + Sync {
    /// All `input`, `textarea` and `select` controls, in document order.
    async fn controls(&self) -> Result<Vec<FormControl>>;

    /// Apply writes in order: set the value, dispatch the events, highlight.
    /// Returns how many writes reached their control.
    async fn apply(&self, writes: &[ValueWrite]) -> Result<usize>;

    /// Drop the highlight from the given controls.
    async fn unhighlight(&self, handles: &[ControlHandle]) -> Result<()>;

    /// Show a notice, replacing any notice already on the page.
    async fn show_notice(&self, text: &str) -> Result<()>;

    /// Start the notice's fade-out.
    async fn fade_notice(&self) -> Result<()>;

    async fn remove_notice(&self) -> Result<()>;
}
