use serde::{Deserialize, Serialize};

pub type ChannelId = String;
pub type CategoryId = String;
pub type EventId = String;

/// A notifiable occurrence, the leaf of the hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub permission_action: String,
}

impl Event {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tag: String::new(),
            permission_action: String::new(),
        }
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_permission(mut self, permission_action: impl Into<String>) -> Self {
        self.permission_action = permission_action.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub events: Vec<Event>,
}

impl Category {
    pub fn new(id: impl Into<String>, name: impl Into<String>, events: Vec<Event>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            events,
        }
    }

    pub fn to_ref(&self) -> EntityRef {
        EntityRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// A delivery mechanism (push, platform feed, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Channel {
    pub id: ChannelId,
    pub name: String,
}

impl Channel {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    pub fn to_ref(&self) -> EntityRef {
        EntityRef {
            id: self.id.clone(),
            name: self.name.clone(),
        }
    }
}

/// Id + display name, as embedded in subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl EntityRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// A persisted "this event is enabled on this channel" fact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    #[serde(default)]
    pub profile_id: Option<String>,
    pub event: EntityRef,
    pub channel: EntityRef,
}

impl Subscription {
    pub fn new(id: impl Into<String>, event: EntityRef, channel: EntityRef) -> Self {
        Self {
            id: id.into(),
            profile_id: None,
            event,
            channel,
        }
    }

    pub fn pair(&self) -> SubscriptionPair {
        SubscriptionPair::new(self.event.id.clone(), self.channel.id.clone())
    }
}

/// Minimal (event, channel) subscription fact handed to persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPair {
    pub event_id: EventId,
    pub channel_id: ChannelId,
}

impl SubscriptionPair {
    pub fn new(event_id: impl Into<String>, channel_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            channel_id: channel_id.into(),
        }
    }
}

/// Subscription ready to be persisted. `id` is carried over from a matching
/// pre-existing subscription, `None` for new ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionDraft {
    pub id: Option<String>,
    pub event: EntityRef,
    pub channel: EntityRef,
}

/// Notification profile the preferences belong to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub current: bool,
}

impl Profile {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            read_only: false,
            current: false,
        }
    }

    pub fn into_read_only(mut self) -> Self {
        self.read_only = true;
        self
    }
}
