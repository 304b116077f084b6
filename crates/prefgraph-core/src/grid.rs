use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::{
    Category, Channel, EntityRef, OptionIndex, OptionKey, Profile, StateStore, Subscription,
    SubscriptionDraft, SubscriptionPair,
};

/// Flat event × channel matrix of a profile's subscriptions.
///
/// Unlike the store it has no group states: every cell is a plain
/// enabled flag. Categories, events and channels keep hierarchy order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionGrid {
    pub profile_name: String,
    pub is_read_only: bool,
    pub categories: Vec<GridCategory>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridCategory {
    pub id: String,
    pub name: String,
    pub events: Vec<GridEvent>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridEvent {
    pub id: String,
    pub name: String,
    pub channels: Vec<GridChannel>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridChannel {
    pub id: String,
    pub name: String,
    pub enabled: bool,
}

impl SubscriptionGrid {
    /// Grid straight from persisted subscriptions. Subscriptions on channels
    /// outside `channels` are ignored.
    pub fn from_subscriptions(
        profile: &Profile,
        subscriptions: &[Subscription],
        categories: &[Category],
        channels: &[Channel],
    ) -> Self {
        let enabled: HashSet<SubscriptionPair> =
            subscriptions.iter().map(Subscription::pair).collect();
        Self::assemble(profile, categories, channels, |event, channel| {
            enabled.contains(&SubscriptionPair::new(event, channel))
        })
    }

    /// Grid from the live store: a cell is enabled iff its event option is checked.
    pub fn from_store(profile: &Profile, index: &OptionIndex, store: &StateStore) -> Self {
        Self::assemble(profile, index.categories(), index.channels(), |event, channel| {
            store.get(&OptionKey::event(channel, event)).is_checked()
        })
    }

    fn assemble<F>(
        profile: &Profile,
        categories: &[Category],
        channels: &[Channel],
        enabled: F,
    ) -> Self
    where
        F: Fn(&str, &str) -> bool,
    {
        let categories = categories
            .iter()
            .map(|category| GridCategory {
                id: category.id.clone(),
                name: category.name.clone(),
                events: category
                    .events
                    .iter()
                    .map(|event| GridEvent {
                        id: event.id.clone(),
                        name: event.name.clone(),
                        channels: channels
                            .iter()
                            .map(|channel| GridChannel {
                                id: channel.id.clone(),
                                name: channel.name.clone(),
                                enabled: enabled(&event.id, &channel.id),
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            profile_name: profile.name.clone(),
            is_read_only: profile.read_only,
            categories,
        }
    }

    pub fn enabled(&self, event: &str, channel: &str) -> Option<bool> {
        self.categories
            .iter()
            .flat_map(|c| c.events.iter())
            .find(|e| e.id == event)?
            .channels
            .iter()
            .find(|c| c.id == channel)
            .map(|c| c.enabled)
    }

    /// Enabled cells as (event, channel) pairs, category by category.
    pub fn pairs(&self) -> Vec<SubscriptionPair> {
        self.cells()
            .map(|(event, channel)| SubscriptionPair::new(event.id.clone(), channel.id.clone()))
            .collect()
    }

    /// Enabled cells as persistable subscriptions, reusing ids from `existing`.
    pub fn to_subscriptions(&self, existing: &[Subscription]) -> Vec<SubscriptionDraft> {
        let known: HashMap<SubscriptionPair, &str> = existing
            .iter()
            .map(|s| (s.pair(), s.id.as_str()))
            .collect();

        self.cells()
            .map(|(event, channel)| {
                let pair = SubscriptionPair::new(event.id.clone(), channel.id.clone());
                SubscriptionDraft {
                    id: known.get(&pair).map(|id| id.to_string()),
                    event: EntityRef::new(event.id.clone(), event.name.clone()),
                    channel: EntityRef::new(channel.id.clone(), channel.name.clone()),
                }
            })
            .collect()
    }

    fn cells(&self) -> impl Iterator<Item = (&GridEvent, &GridChannel)> {
        self.categories.iter().flat_map(|category| {
            category.events.iter().flat_map(|event| {
                event
                    .channels
                    .iter()
                    .filter(|channel| channel.enabled)
                    .map(move |channel| (event, channel))
            })
        })
    }
}
