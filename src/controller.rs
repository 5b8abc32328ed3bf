//! The controlling side: picks a profile, sends requests to a form
//! endpoint, and keeps settings and stats across runs.

use std::fmt;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::message::{MessageTarget, Request, Response};
use crate::profile::{Category, Profile, ProfileBook};
use crate::settings::{Settings, SettingsStore, Stats};

/// URL prefixes of browser-internal pages that cannot be scripted.
const INTERNAL_PAGE_PREFIXES: &[&str] = &["chrome://", "chrome-extension://"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Success,
    Error,
    Info,
}

/// A user-facing status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Status {
    pub kind: StatusKind,
    pub message: String,
}

impl Status {
    fn new(kind: StatusKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Success, message)
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Error, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(StatusKind::Info, message)
    }

    pub fn is_success(&self) -> bool {
        self.kind == StatusKind::Success
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Name, email and phone of a profile, with `-` for missing values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileSummary {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl ProfileSummary {
    pub fn of(profile: &Profile) -> Self {
        let show = |c| profile.get(c).unwrap_or("-").to_string();
        Self {
            name: show(Category::Name),
            email: show(Category::Email),
            phone: show(Category::Phone),
        }
    }
}

pub fn is_internal_page(url: &str) -> bool {
    INTERNAL_PAGE_PREFIXES.iter().any(|p| url.starts_with(p))
}

pub struct Controller<St> {
    store: St,
    profiles: ProfileBook,
    settings: Settings,
    current: Profile,
}

impl<St: SettingsStore> Controller<St> {
    /// Load settings from `store`. A stored profile key that no longer
    /// exists falls back to the default profile.
    pub fn load(store: St, profiles: ProfileBook) -> Result<Self> {
        let mut settings = store.load()?;
        if !profiles.contains(&settings.current_profile) {
            let fallback = Settings::default().current_profile;
            warn!(
                stored = %settings.current_profile,
                fallback = %fallback,
                "stored profile not found"
            );
            settings.current_profile = fallback;
        }
        let current = profiles.get(&settings.current_profile).cloned().unwrap_or_default();
        Ok(Self { store, profiles, settings, current })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn stats(&self) -> &Stats {
        &self.settings.stats
    }

    pub fn profiles(&self) -> &ProfileBook {
        &self.profiles
    }

    pub fn store(&self) -> &St {
        &self.store
    }

    pub fn current_profile(&self) -> &Profile {
        &self.current
    }

    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary::of(self.current_profile())
    }

    pub fn select_profile(&mut self, key: &str) -> Result<()> {
        let profile = self
            .profiles
            .get(key)
            .cloned()
            .ok_or_else(|| Error::UnknownProfile(key.to_string()))?;
        self.current = profile;
        self.settings.current_profile = key.to_string();
        self.store.save(&self.settings)
    }

    pub fn set_auto_detect(&mut self, enabled: bool) -> Result<Status> {
        self.settings.auto_detect = enabled;
        self.store.save(&self.settings)?;
        Ok(if enabled {
            Status::info("✅ Auto-detect enabled")
        } else {
            Status::info("⚠️ Auto-detect disabled")
        })
    }

    /// Ask `target` to fill its form with the current profile.
    ///
    /// Transport failures become an error status; only saving settings
    /// can make this return `Err`.
    pub async fn fill(&mut self, target: &dyn MessageTarget, page_url: &str) -> Result<Status> {
        if is_internal_page(page_url) {
            return Ok(Status::error("❌ Cannot fill forms on Chrome internal pages"));
        }

        let request = Request::FillForm {
            profile: self.current_profile().clone(),
            auto_detect: self.settings.auto_detect,
        };

        match Self::exchange(target, &request).await {
            Err(e) => {
                warn!("fill request failed: {e}");
                Ok(Status::error("⚠️ Please refresh the page and try again"))
            }
            Ok(Some(Response::Fill { success: true, filled, found })) => {
                self.settings.stats = Stats {
                    fields_found: found,
                    fields_filled: filled,
                    last_used: Some(Utc::now()),
                };
                self.store.save(&self.settings)?;
                info!(profile = %self.settings.current_profile, filled, found, "fill succeeded");
                Ok(Status::success(format!("✅ Success! Filled {filled} of {found} fields")))
            }
            Ok(_) => Ok(Status::error("⚠️ No form fields found on this page")),
        }
    }

    /// Ask `target` to clear its form.
    pub async fn clear(&self, target: &dyn MessageTarget) -> Result<Status> {
        match Self::exchange(target, &Request::ClearForm).await {
            Err(e) => {
                warn!("clear request failed: {e}");
                Ok(Status::error("⚠️ Please refresh the page and try again"))
            }
            Ok(Some(response)) if response.success() => Ok(Status::success("✅ Form cleared successfully")),
            Ok(_) => Ok(Status::error("⚠️ No form fields found")),
        }
    }

    async fn exchange(target: &dyn MessageTarget, request: &Request) -> Result<Option<Response>> {
        let reply = target.send(request.to_value()).await?;
        reply
            .map(|v| serde_json::from_value(v).map_err(|e| Error::InvalidMessage(e.to_string())))
            .transpose()
    }
}
