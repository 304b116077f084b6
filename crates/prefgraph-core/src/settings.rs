//! Full notification settings payload: profiles, the hierarchy and the
//! subscriptions already persisted for it.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Category, Channel, EngineConfig, PreferenceSession, Profile, Result, Subscription};

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NotificationSettings {
    #[serde(default)]
    pub profiles: Vec<Profile>,
    #[serde(default)]
    pub channels: Vec<Channel>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub subscriptions: Vec<Subscription>,
}

impl NotificationSettings {
    pub fn from_json(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The profile flagged `current`, if any.
    pub fn current_profile(&self) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.current)
    }

    /// Hydrated session for the current profile.
    pub fn session(&self, config: EngineConfig) -> Result<PreferenceSession> {
        let session = PreferenceSession::with_config(
            &self.categories,
            &self.channels,
            &self.subscriptions,
            config,
        )?;
        Ok(match self.current_profile() {
            Some(profile) => session.with_profile(profile.clone()),
            None => session,
        })
    }
}
