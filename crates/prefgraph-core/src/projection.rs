use std::collections::HashMap;

use crate::{
    CheckState, EntityRef, OptionIndex, OptionKey, StateStore, Subscription, SubscriptionDraft,
    SubscriptionPair,
};

/// Checked event options as (event, channel) pairs, in index order.
///
/// Category and channel states are derived and never projected.
pub fn project(index: &OptionIndex, store: &StateStore) -> Vec<SubscriptionPair> {
    index
        .event_options()
        .iter()
        .filter_map(|option| {
            let channel = option.channel.as_ref()?;
            let key = OptionKey::event(channel.id.clone(), option.event.id.clone());
            (store.get(&key) == CheckState::Checked)
                .then(|| SubscriptionPair::new(option.event.id.clone(), channel.id.clone()))
        })
        .collect()
}

/// Checked event options as persistable subscriptions.
///
/// A draft keeps the id of the pre-existing subscription for the same
/// (event, channel) pair, so persistence can tell updates from inserts.
pub fn to_subscriptions(
    index: &OptionIndex,
    store: &StateStore,
    existing: &[Subscription],
) -> Vec<SubscriptionDraft> {
    let known: HashMap<SubscriptionPair, &str> = existing
        .iter()
        .map(|s| (s.pair(), s.id.as_str()))
        .collect();

    project(index, store)
        .into_iter()
        .filter_map(|pair| {
            let option = index.event_option(&pair.channel_id, &pair.event_id)?;
            let channel = option.channel.as_ref()?;
            Some(SubscriptionDraft {
                id: known.get(&pair).map(|id| id.to_string()),
                event: EntityRef::new(option.event.id.clone(), option.event.name.clone()),
                channel: channel.to_ref(),
            })
        })
        .collect()
}
