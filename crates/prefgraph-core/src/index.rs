use std::collections::HashSet;
use tracing::{debug, warn};

use crate::{
    Category, CategoryOption, Channel, ChannelOption, CheckState, CompactHashMap, EngineConfig,
    Event, EventOption, OptionKey, OptionKind, PrefGraphError, Result, Subscription,
    SubscriptionPair,
};

/// Flat, addressable view of a Channel / Category / Event hierarchy.
///
/// Holds one [`EventOption`] per (channel, event) pair, ordered category
/// first, then event, then channel. Alongside it keeps lookup tables
/// (channel, category, event → owning category) so a propagation only
/// touches the children of the group it updates.
#[derive(Debug, Clone)]
pub struct OptionIndex {
    channels: Vec<Channel>,
    categories: Vec<Category>,
    event_options: Vec<EventOption>,
    channel_pos: CompactHashMap<String, usize>,
    category_pos: CompactHashMap<String, usize>,
    /// event id -> index into `categories`
    event_category: CompactHashMap<String, usize>,
    /// (channel, event) key -> index into `event_options`
    event_option_pos: CompactHashMap<OptionKey, usize>,
}

impl OptionIndex {
    pub fn build(
        categories: &[Category],
        channels: &[Channel],
        subscriptions: &[Subscription],
    ) -> Result<Self> {
        Self::build_with(categories, channels, subscriptions, &EngineConfig::default())
    }

    pub fn build_with(
        categories: &[Category],
        channels: &[Channel],
        subscriptions: &[Subscription],
        config: &EngineConfig,
    ) -> Result<Self> {
        let mut index = Self {
            channels: Vec::with_capacity(channels.len()),
            categories: Vec::with_capacity(categories.len()),
            event_options: Vec::new(),
            channel_pos: CompactHashMap::with_capacity(channels.len()),
            category_pos: CompactHashMap::with_capacity(categories.len()),
            event_category: CompactHashMap::default(),
            event_option_pos: CompactHashMap::default(),
        };

        for channel in channels {
            if index.channel_pos.contains_key(channel.id.as_str()) {
                duplicate(config, OptionKind::Channel, &channel.id)?;
                continue;
            }
            index.channel_pos.insert(channel.id.clone(), index.channels.len());
            index.channels.push(channel.clone());
        }

        for category in categories {
            if index.category_pos.contains_key(category.id.as_str()) {
                duplicate(config, OptionKind::Category, &category.id)?;
                continue;
            }
            let pos = index.categories.len();
            let mut events = Vec::with_capacity(category.events.len());
            for event in &category.events {
                // an event id must map to exactly one category, or its keys collide
                if index.event_category.contains_key(event.id.as_str()) {
                    duplicate(config, OptionKind::Event, &event.id)?;
                    continue;
                }
                index.event_category.insert(event.id.clone(), pos);
                events.push(event.clone());
            }
            if events.is_empty() {
                warn!(category = %category.id, "category has no events");
            }
            index.category_pos.insert(category.id.clone(), pos);
            index.categories.push(Category {
                id: category.id.clone(),
                name: category.name.clone(),
                events,
            });
        }

        let subscribed: HashSet<SubscriptionPair> = subscriptions
            .iter()
            .map(Subscription::pair)
            .filter(|pair| {
                let known = index.channel_pos.contains_key(pair.channel_id.as_str())
                    && index.event_category.contains_key(pair.event_id.as_str());
                if !known {
                    debug!(
                        event = %pair.event_id,
                        channel = %pair.channel_id,
                        "ignoring subscription outside the hierarchy"
                    );
                }
                known
            })
            .collect();

        for category in &index.categories {
            let category_ref = category.to_ref();
            for event in &category.events {
                for channel in &index.channels {
                    let pair = SubscriptionPair::new(event.id.clone(), channel.id.clone());
                    let checked = if subscribed.contains(&pair) {
                        CheckState::Checked
                    } else {
                        CheckState::Unchecked
                    };
                    index.event_option_pos.insert(
                        OptionKey::event(channel.id.clone(), event.id.clone()),
                        index.event_options.len(),
                    );
                    index.event_options.push(
                        EventOption::new(event.clone(), category_ref.clone(), channel.clone())
                            .with_checked(checked),
                    );
                }
            }
        }

        debug!(
            channels = index.channels.len(),
            categories = index.categories.len(),
            event_options = index.event_options.len(),
            "option index built"
        );
        Ok(index)
    }

    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn channel(&self, id: &str) -> Option<&Channel> {
        self.channel_pos.get(id).map(|&pos| &self.channels[pos])
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.category_pos.get(id).map(|&pos| &self.categories[pos])
    }

    /// Events of a category, in declaration order.
    pub fn events_of(&self, category: &str) -> Option<&[Event]> {
        self.category(category).map(|c| c.events.as_slice())
    }

    /// Category owning an event.
    pub fn category_of(&self, event: &str) -> Option<&Category> {
        self.event_category
            .get(event)
            .map(|&pos| &self.categories[pos])
    }

    pub fn event_options(&self) -> &[EventOption] {
        &self.event_options
    }

    pub fn event_option(&self, channel: &str, event: &str) -> Option<&EventOption> {
        self.event_option_pos
            .get(&OptionKey::event(channel, event))
            .map(|&pos| &self.event_options[pos])
    }

    pub fn channel_option(&self, channel: &str) -> Option<ChannelOption> {
        self.channel(channel).map(|channel| ChannelOption {
            channel: channel.clone(),
        })
    }

    pub fn category_option(&self, channel: &str, category: &str) -> Option<CategoryOption> {
        let channel = self.channel(channel)?;
        let category = self.category(category)?;
        Some(CategoryOption {
            category: category.to_ref(),
            channel: channel.clone(),
        })
    }

    /// Event options that start out checked because a subscription exists.
    pub fn initially_checked(&self) -> impl Iterator<Item = &EventOption> {
        self.event_options.iter().filter(|o| o.checked.is_checked())
    }

    pub fn contains(&self, key: &OptionKey) -> bool {
        match key {
            OptionKey::Channel { channel } => self.channel_pos.contains_key(channel.as_str()),
            OptionKey::Category { channel, category } => {
                self.channel_pos.contains_key(channel.as_str())
                    && self.category_pos.contains_key(category.as_str())
            }
            OptionKey::Event { .. } => self.event_option_pos.contains_key(key),
        }
    }

    /// Every channel, category and event key, channel by channel in hierarchy order.
    pub fn keys(&self) -> Vec<OptionKey> {
        let mut keys = Vec::with_capacity(self.len());
        for channel in &self.channels {
            keys.push(OptionKey::channel(channel.id.clone()));
            for category in &self.categories {
                keys.push(OptionKey::category(channel.id.clone(), category.id.clone()));
                for event in &category.events {
                    keys.push(OptionKey::event(channel.id.clone(), event.id.clone()));
                }
            }
        }
        keys
    }

    /// Number of addressable options of all kinds.
    pub fn len(&self) -> usize {
        self.channels.len() * (1 + self.categories.len()) + self.event_options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

fn duplicate(config: &EngineConfig, kind: OptionKind, id: &str) -> Result<()> {
    if config.strict_hierarchy {
        return Err(PrefGraphError::DuplicateId {
            kind,
            id: id.to_string(),
        });
    }
    warn!(%kind, id, "skipping duplicate id");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntityRef;

    fn hierarchy() -> (Vec<Category>, Vec<Channel>) {
        let categories = vec![
            Category::new("c1", "Trades", vec![Event::new("a", "A"), Event::new("b", "B")]),
            Category::new("c2", "Logistics", vec![Event::new("c", "C")]),
        ];
        let channels = vec![Channel::new("x", "Push"), Channel::new("y", "Feed")];
        (categories, channels)
    }

    fn sub(event: &str, channel: &str) -> Subscription {
        Subscription::new(
            format!("s-{}-{}", event, channel),
            EntityRef::new(event, ""),
            EntityRef::new(channel, ""),
        )
    }

    #[test]
    fn order_is_category_event_channel() {
        let (categories, channels) = hierarchy();
        let index = OptionIndex::build(&categories, &channels, &[]).unwrap();
        let order: Vec<String> = index
            .event_options()
            .iter()
            .map(|o| o.key().unwrap().to_string())
            .collect();
        assert_eq!(order, vec!["x__a", "y__a", "x__b", "y__b", "x__c", "y__c"]);
        assert_eq!(index.len(), 2 * 3 + 6);
        assert_eq!(index.keys().len(), index.len());
    }

    #[test]
    fn subscriptions_mark_options_checked() {
        let (categories, channels) = hierarchy();
        let subs = vec![sub("a", "y"), sub("c", "x"), sub("zzz", "x"), sub("a", "nope")];
        let index = OptionIndex::build(&categories, &channels, &subs).unwrap();

        let checked: Vec<String> = index
            .initially_checked()
            .map(|o| o.key().unwrap().to_string())
            .collect();
        assert_eq!(checked, vec!["y__a", "x__c"]);
        assert_eq!(
            index.event_option("y", "a").unwrap().checked,
            CheckState::Checked
        );
    }

    #[test]
    fn secondary_lookups() {
        let (categories, channels) = hierarchy();
        let index = OptionIndex::build(&categories, &channels, &[]).unwrap();

        assert_eq!(index.category_of("b").unwrap().id, "c1");
        assert_eq!(index.events_of("c2").unwrap().len(), 1);
        assert!(index.events_of("missing").is_none());
        assert!(index.contains(&OptionKey::category("x", "c2")));
        assert!(!index.contains(&OptionKey::category("z", "c2")));
        assert!(index.contains(&OptionKey::event("y", "c")));
        assert!(!index.contains(&OptionKey::event("y", "c1")));
        assert_eq!(index.category_option("y", "c1").unwrap().key().to_string(), "y__c1");
    }

    #[test]
    fn duplicate_events_are_skipped_unless_strict() {
        let categories = vec![
            Category::new("c1", "One", vec![Event::new("a", "A")]),
            Category::new("c2", "Two", vec![Event::new("a", "A again"), Event::new("b", "B")]),
        ];
        let channels = vec![Channel::new("x", "X"), Channel::new("x", "X again")];

        let index = OptionIndex::build(&categories, &channels, &[]).unwrap();
        assert_eq!(index.channels().len(), 1);
        assert_eq!(index.category_of("a").unwrap().id, "c1");
        assert_eq!(index.events_of("c2").unwrap().len(), 1);

        let strict = EngineConfig {
            strict_hierarchy: true,
            ..EngineConfig::default()
        };
        let err = OptionIndex::build_with(&categories, &channels, &[], &strict).unwrap_err();
        assert!(matches!(
            err,
            PrefGraphError::DuplicateId { kind: OptionKind::Channel, .. }
        ));
    }
}
