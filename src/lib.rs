pub mod browser;
pub mod classifier;
pub mod config;
pub mod control;
pub mod controller;
pub mod error;
pub mod filler;
pub mod keywords;
pub mod memory;
pub mod message;
pub mod page;
pub mod profile;
pub mod scheduler;
pub mod settings;
pub mod surface;

pub use browser::FormBrowser;
pub use config::{BrowserConfig, FillerConfig};
pub use control::{ControlHandle, FormControl};
pub use controller::{Controller, Status};
pub use error::{Error, Result};
pub use filler::{FillResult, FormFiller};
pub use memory::MemoryDocument;
pub use message::{MessageTarget, Request, Response};
pub use page::Page;
pub use profile::{Category, Profile, ProfileBook};
pub use settings::{JsonFileStore, Settings, SettingsStore};
pub use surface::FormSurface;
