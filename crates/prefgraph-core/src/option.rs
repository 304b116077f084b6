use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    CategoryId, ChannelId, CheckState, Channel, EntityRef, Event, EventId, PrefGraphError, Result,
};

pub const DEFAULT_KEY_SEPARATOR: &str = "__";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionKind {
    Channel,
    Category,
    Event,
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OptionKind::Channel => "channel",
            OptionKind::Category => "category",
            OptionKind::Event => "event",
        };
        write!(f, "{}", s)
    }
}

/// Store key of an option.
///
/// Tagged by kind, so a category id can never collide with a channel or
/// event id the way a concatenated string key could.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum OptionKey {
    Channel {
        channel: ChannelId,
    },
    Category {
        channel: ChannelId,
        category: CategoryId,
    },
    Event {
        channel: ChannelId,
        event: EventId,
    },
}

impl OptionKey {
    pub fn channel(channel: impl Into<String>) -> Self {
        OptionKey::Channel {
            channel: channel.into(),
        }
    }

    pub fn category(channel: impl Into<String>, category: impl Into<String>) -> Self {
        OptionKey::Category {
            channel: channel.into(),
            category: category.into(),
        }
    }

    pub fn event(channel: impl Into<String>, event: impl Into<String>) -> Self {
        OptionKey::Event {
            channel: channel.into(),
            event: event.into(),
        }
    }

    pub fn kind(&self) -> OptionKind {
        match self {
            OptionKey::Channel { .. } => OptionKind::Channel,
            OptionKey::Category { .. } => OptionKind::Category,
            OptionKey::Event { .. } => OptionKind::Event,
        }
    }

    pub fn channel_id(&self) -> &str {
        match self {
            OptionKey::Channel { channel }
            | OptionKey::Category { channel, .. }
            | OptionKey::Event { channel, .. } => channel,
        }
    }

    /// Human-readable form, e.g. `web__trades`. Not an identity: use the key itself for lookups.
    pub fn render(&self, separator: &str) -> String {
        match self {
            OptionKey::Channel { channel } => channel.clone(),
            OptionKey::Category { channel, category } => {
                format!("{}{}{}", channel, separator, category)
            }
            OptionKey::Event { channel, event } => format!("{}{}{}", channel, separator, event),
        }
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(DEFAULT_KEY_SEPARATOR))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOption {
    pub channel: Channel,
}

impl ChannelOption {
    pub fn key(&self) -> OptionKey {
        OptionKey::channel(self.channel.id.clone())
    }
}

/// A category as rendered under one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryOption {
    pub category: EntityRef,
    pub channel: Channel,
}

impl CategoryOption {
    pub fn key(&self) -> OptionKey {
        OptionKey::category(self.channel.id.clone(), self.category.id.clone())
    }
}

/// An event as rendered under one (channel, category).
///
/// `category` and `channel` are optional only because click payloads may
/// arrive from outside; options built by [`crate::OptionIndex`] always carry both.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOption {
    pub event: Event,
    pub category: Option<EntityRef>,
    pub channel: Option<Channel>,
    /// Initial state from hydration; the live state is in the store.
    #[serde(default)]
    pub checked: CheckState,
}

impl EventOption {
    pub fn new(event: Event, category: EntityRef, channel: Channel) -> Self {
        Self {
            event,
            category: Some(category),
            channel: Some(channel),
            checked: CheckState::Unchecked,
        }
    }

    pub fn with_checked(mut self, checked: CheckState) -> Self {
        self.checked = checked;
        self
    }

    /// Category and channel references, or `MalformedOption` if either is missing.
    pub fn parents(&self) -> Result<(&EntityRef, &Channel)> {
        match (&self.category, &self.channel) {
            (Some(category), Some(channel)) => Ok((category, channel)),
            (None, _) => Err(PrefGraphError::MalformedOption(format!(
                "event option '{}' has no category",
                self.event.id
            ))),
            (_, None) => Err(PrefGraphError::MalformedOption(format!(
                "event option '{}' has no channel",
                self.event.id
            ))),
        }
    }

    pub fn key(&self) -> Result<OptionKey> {
        let (_, channel) = self.parents()?;
        Ok(OptionKey::event(channel.id.clone(), self.event.id.clone()))
    }
}

/// Any clickable option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SubscriptionOption {
    Channel(ChannelOption),
    Category(CategoryOption),
    Event(EventOption),
}

impl SubscriptionOption {
    pub fn kind(&self) -> OptionKind {
        match self {
            SubscriptionOption::Channel(_) => OptionKind::Channel,
            SubscriptionOption::Category(_) => OptionKind::Category,
            SubscriptionOption::Event(_) => OptionKind::Event,
        }
    }

    pub fn key(&self) -> Result<OptionKey> {
        match self {
            SubscriptionOption::Channel(o) => Ok(o.key()),
            SubscriptionOption::Category(o) => Ok(o.key()),
            SubscriptionOption::Event(o) => o.key(),
        }
    }
}

impl From<ChannelOption> for SubscriptionOption {
    fn from(o: ChannelOption) -> Self {
        SubscriptionOption::Channel(o)
    }
}

impl From<CategoryOption> for SubscriptionOption {
    fn from(o: CategoryOption) -> Self {
        SubscriptionOption::Category(o)
    }
}

impl From<EventOption> for SubscriptionOption {
    fn from(o: EventOption) -> Self {
        SubscriptionOption::Event(o)
    }
}
