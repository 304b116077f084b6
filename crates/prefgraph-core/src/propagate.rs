//! Bubble-up and bubble-down state propagation.
//!
//! A click on an event bubbles up: the event toggles, then its category and
//! channel are re-aggregated. A click on a category or channel bubbles down:
//! the group toggles and every descendant receives the same state, then (for
//! a category) the parent channel is re-aggregated.
//!
//! Every propagation stages its writes and commits them in one step. A
//! failing propagation leaves the store as it was, and a target unknown to
//! the index is a no-op that returns an empty [`ChangeSet`].

use tracing::debug;

use crate::store::StoreTxn;
use crate::{
    aggregate, ChangeSet, CheckState, EventOption, OptionIndex, OptionKey, Result, StateStore,
};

/// Applies propagation rules over one [`OptionIndex`] to a caller-owned store.
#[derive(Debug, Clone, Copy)]
pub struct Propagator<'a> {
    index: &'a OptionIndex,
}

impl<'a> Propagator<'a> {
    pub fn new(index: &'a OptionIndex) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &'a OptionIndex {
        self.index
    }

    /// Direct click on an event: toggle it, then re-aggregate its category and channel.
    pub fn bubble_up(&self, store: &mut StateStore, option: &EventOption) -> Result<ChangeSet> {
        self.write_event(store, option, false)
    }

    /// Hydration step: check an event without toggling and re-aggregate its
    /// ancestors. Repeating it for an already checked event writes the same
    /// states again.
    pub(crate) fn settle_event(
        &self,
        store: &mut StateStore,
        option: &EventOption,
    ) -> Result<ChangeSet> {
        self.write_event(store, option, true)
    }

    /// Direct click on a channel: toggle it and push the new state to every
    /// category and event under it.
    pub fn bubble_down_channel(&self, store: &mut StateStore, channel: &str) -> Result<ChangeSet> {
        if self.index.channel(channel).is_none() {
            debug!(channel, "bubble-down on unknown channel ignored");
            return Ok(ChangeSet::default());
        }

        let mut txn = store.begin();
        let channel_key = OptionKey::channel(channel);
        let next = txn.get(&channel_key).toggled();
        txn.set(channel_key, next);

        for category in self.index.categories() {
            txn.set(OptionKey::category(channel, category.id.clone()), next);
            for event in &category.events {
                txn.set(OptionKey::event(channel, event.id.clone()), next);
            }
        }

        let changes = store.commit(txn);
        debug!(channel, state = %next, writes = changes.len(), "bubble-down channel");
        Ok(changes)
    }

    /// Direct click on a category under one channel: toggle it, push the new
    /// state to its events, then re-aggregate the channel.
    pub fn bubble_down_category(
        &self,
        store: &mut StateStore,
        channel: &str,
        category: &str,
    ) -> Result<ChangeSet> {
        let Some(events) = self
            .index
            .channel(channel)
            .and(self.index.events_of(category))
        else {
            debug!(channel, category, "bubble-down on unknown category ignored");
            return Ok(ChangeSet::default());
        };

        let mut txn = store.begin();
        let category_key = OptionKey::category(channel, category);
        let next = txn.get(&category_key).toggled();
        txn.set(category_key, next);

        for event in events {
            txn.set(OptionKey::event(channel, event.id.clone()), next);
        }
        self.recompute_channel(&mut txn, channel)?;

        let changes = store.commit(txn);
        debug!(channel, category, state = %next, writes = changes.len(), "bubble-down category");
        Ok(changes)
    }

    fn write_event(
        &self,
        store: &mut StateStore,
        option: &EventOption,
        settle: bool,
    ) -> Result<ChangeSet> {
        // reject before any write
        let (category, channel) = option.parents()?;
        let event = option.event.id.as_str();

        let owned_by_category = self
            .index
            .category_of(event)
            .is_some_and(|owner| owner.id == category.id);
        if !owned_by_category || self.index.channel(&channel.id).is_none() {
            debug!(
                channel = %channel.id,
                category = %category.id,
                event,
                "bubble-up on unknown event ignored"
            );
            return Ok(ChangeSet::default());
        }

        let mut txn = store.begin();
        let event_key = OptionKey::event(channel.id.clone(), event);
        let next = if settle {
            CheckState::Checked
        } else {
            txn.get(&event_key).toggled()
        };
        txn.set(event_key, next);

        let category_state = self.recompute_category(&mut txn, &channel.id, &category.id)?;
        let channel_state = self.recompute_channel(&mut txn, &channel.id)?;

        let changes = store.commit(txn);
        debug!(
            channel = %channel.id,
            category = %category.id,
            event,
            state = %next,
            category_state = %category_state,
            channel_state = %channel_state,
            "bubble-up event"
        );
        Ok(changes)
    }

    fn recompute_category(
        &self,
        txn: &mut StoreTxn,
        channel: &str,
        category: &str,
    ) -> Result<CheckState> {
        let events = self.index.events_of(category).unwrap_or_default();
        let state = aggregate(
            events
                .iter()
                .map(|event| txn.get(&OptionKey::event(channel, event.id.clone()))),
        )?;
        txn.set(OptionKey::category(channel, category), state);
        Ok(state)
    }

    fn recompute_channel(&self, txn: &mut StoreTxn, channel: &str) -> Result<CheckState> {
        let state = aggregate(
            self.index
                .categories()
                .iter()
                .map(|category| txn.get(&OptionKey::category(channel, category.id.clone()))),
        )?;
        txn.set(OptionKey::channel(channel), state);
        Ok(state)
    }
}
