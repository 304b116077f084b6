use serde::{Deserialize, Serialize};

use crate::{CheckState, EntityRef, Event, OptionIndex, OptionKey, StateStore};

/// Read-only render view: channels, their categories, their events, each
/// with its current state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckboxTree {
    pub channels: Vec<ChannelNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelNode {
    pub key: OptionKey,
    pub channel: EntityRef,
    pub state: CheckState,
    pub categories: Vec<CategoryNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub key: OptionKey,
    pub category: EntityRef,
    pub state: CheckState,
    pub events: Vec<EventNode>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventNode {
    pub key: OptionKey,
    pub event: Event,
    pub state: CheckState,
}

impl CheckboxTree {
    pub fn build(index: &OptionIndex, store: &StateStore) -> Self {
        let channels = index
            .channels()
            .iter()
            .map(|channel| {
                let categories = index
                    .categories()
                    .iter()
                    .map(|category| {
                        let events = category
                            .events
                            .iter()
                            .map(|event| {
                                let key = OptionKey::event(channel.id.clone(), event.id.clone());
                                EventNode {
                                    state: store.get(&key),
                                    key,
                                    event: event.clone(),
                                }
                            })
                            .collect();
                        let key = OptionKey::category(channel.id.clone(), category.id.clone());
                        CategoryNode {
                            state: store.get(&key),
                            key,
                            category: category.to_ref(),
                            events,
                        }
                    })
                    .collect();
                let key = OptionKey::channel(channel.id.clone());
                ChannelNode {
                    state: store.get(&key),
                    key,
                    channel: channel.to_ref(),
                    categories,
                }
            })
            .collect();

        Self { channels }
    }

    /// Depth-first (key, state) pairs.
    pub fn states(&self) -> Vec<(&OptionKey, CheckState)> {
        let mut out = Vec::new();
        for channel in &self.channels {
            out.push((&channel.key, channel.state));
            for category in &channel.categories {
                out.push((&category.key, category.state));
                for event in &category.events {
                    out.push((&event.key, event.state));
                }
            }
        }
        out
    }
}
