use tracing::debug;

use crate::{
    hydrate, projection, Category, ChangeSet, Channel, CheckState, CheckboxTree, ConfigManager,
    EngineConfig, OptionIndex, OptionKey, PrefGraphError, Profile, Propagator, Result, StateStore,
    Subscription, SubscriptionDraft, SubscriptionGrid, SubscriptionOption, SubscriptionPair,
};

/// One user's editing session over a fixed hierarchy.
///
/// Owns the index and the store. The store is hydrated during construction,
/// so no click can reach a half-initialized session.
#[derive(Debug, Clone)]
pub struct PreferenceSession {
    index: OptionIndex,
    store: StateStore,
    profile: Option<Profile>,
    config: EngineConfig,
}

impl PreferenceSession {
    pub fn new(
        categories: &[Category],
        channels: &[Channel],
        subscriptions: &[Subscription],
    ) -> Result<Self> {
        Self::with_config(categories, channels, subscriptions, EngineConfig::default())
    }

    pub fn with_config(
        categories: &[Category],
        channels: &[Channel],
        subscriptions: &[Subscription],
        config: EngineConfig,
    ) -> Result<Self> {
        let index = OptionIndex::build_with(categories, channels, subscriptions, &config)?;
        Self::from_index(index, config)
    }

    /// Like [`PreferenceSession::new`], with the engine section of the
    /// configuration found by [`ConfigManager::load`].
    pub fn configured(
        categories: &[Category],
        channels: &[Channel],
        subscriptions: &[Subscription],
    ) -> Result<Self> {
        let config = ConfigManager::load()?.into_config();
        Self::with_config(categories, channels, subscriptions, config.engine)
    }

    pub fn from_index(index: OptionIndex, config: EngineConfig) -> Result<Self> {
        let store = hydrate(&index)?;
        Ok(Self {
            index,
            store,
            profile: None,
            config,
        })
    }

    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = Some(profile);
        self
    }

    pub fn index(&self) -> &OptionIndex {
        &self.index
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn is_read_only(&self) -> bool {
        self.profile.as_ref().is_some_and(|p| p.read_only)
    }

    /// Handle a click on any option: bubble-down for channels and
    /// categories, bubble-up for events.
    pub fn click(&mut self, option: &SubscriptionOption) -> Result<ChangeSet> {
        self.ensure_writable()?;
        let propagator = Propagator::new(&self.index);
        match option {
            SubscriptionOption::Channel(o) => {
                propagator.bubble_down_channel(&mut self.store, &o.channel.id)
            }
            SubscriptionOption::Category(o) => {
                propagator.bubble_down_category(&mut self.store, &o.channel.id, &o.category.id)
            }
            SubscriptionOption::Event(o) => propagator.bubble_up(&mut self.store, o),
        }
    }

    /// Click addressed by key, as handed back from a [`CheckboxTree`] node.
    pub fn click_key(&mut self, key: &OptionKey) -> Result<ChangeSet> {
        let option: Option<SubscriptionOption> = match key {
            OptionKey::Channel { channel } => self.index.channel_option(channel).map(Into::into),
            OptionKey::Category { channel, category } => self
                .index
                .category_option(channel, category)
                .map(Into::into),
            OptionKey::Event { channel, event } => self
                .index
                .event_option(channel, event)
                .cloned()
                .map(Into::into),
        };
        match option {
            Some(option) => self.click(&option),
            None => {
                self.ensure_writable()?;
                debug!(key = %self.render_key(key), "click on unknown key ignored");
                Ok(ChangeSet::default())
            }
        }
    }

    pub fn state(&self, key: &OptionKey) -> CheckState {
        self.store.get(key)
    }

    /// Point-in-time copy of the store; stays valid across later clicks.
    pub fn snapshot(&self) -> StateStore {
        self.store.snapshot()
    }

    pub fn tree(&self) -> CheckboxTree {
        CheckboxTree::build(&self.index, &self.store)
    }

    /// Currently subscribed (event, channel) pairs.
    pub fn selected(&self) -> Vec<SubscriptionPair> {
        projection::project(&self.index, &self.store)
    }

    pub fn to_subscriptions(&self, existing: &[Subscription]) -> Vec<SubscriptionDraft> {
        projection::to_subscriptions(&self.index, &self.store, existing)
    }

    pub fn grid(&self) -> SubscriptionGrid {
        let fallback = Profile::new("", "");
        let profile = self.profile.as_ref().unwrap_or(&fallback);
        SubscriptionGrid::from_store(profile, &self.index, &self.store)
    }

    pub fn render_key(&self, key: &OptionKey) -> String {
        key.render(&self.config.key_separator)
    }

    fn ensure_writable(&self) -> Result<()> {
        match &self.profile {
            Some(profile) if profile.read_only => {
                Err(PrefGraphError::ReadOnlyProfile(profile.name.clone()))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EntityRef, Event};

    fn session(subscriptions: &[Subscription]) -> PreferenceSession {
        let events = vec![Event::new("a", "A"), Event::new("b", "B")];
        let categories = vec![Category::new("c", "C", events)];
        let channels = vec![Channel::new("x", "X")];
        PreferenceSession::new(&categories, &channels, subscriptions).unwrap()
    }

    #[test]
    fn click_dispatches_by_kind() {
        let mut s = session(&[]);
        s.click_key(&OptionKey::category("x", "c")).unwrap();
        assert_eq!(s.state(&OptionKey::channel("x")), CheckState::Checked);

        s.click_key(&OptionKey::event("x", "b")).unwrap();
        assert_eq!(s.state(&OptionKey::channel("x")), CheckState::Indeterminate);

        s.click_key(&OptionKey::channel("x")).unwrap();
        assert_eq!(s.selected().len(), 2);
    }

    #[test]
    fn unknown_key_click_is_noop() {
        let mut s = session(&[]);
        assert!(s.click_key(&OptionKey::event("x", "zzz")).unwrap().is_empty());
        assert!(s.store().is_empty());
    }

    #[test]
    fn read_only_profile_rejects_clicks() {
        let sub = Subscription::new("s", EntityRef::new("a", "A"), EntityRef::new("x", "X"));
        let mut s = session(&[sub]);
        assert!(!s.is_read_only());
        s = s.with_profile(Profile::new("p", "Away").into_read_only());
        assert!(s.is_read_only());
        let before = s.snapshot();

        let err = s.click_key(&OptionKey::channel("x")).unwrap_err();
        assert!(matches!(err, PrefGraphError::ReadOnlyProfile(_)));
        assert_eq!(s.snapshot(), before);
        assert!(s.grid().is_read_only);
    }

    #[test]
    fn render_key_uses_configured_separator() {
        let categories = vec![Category::new("c", "C", vec![Event::new("a", "A")])];
        let channels = vec![Channel::new("x", "X")];
        let config = EngineConfig {
            key_separator: "::".to_string(),
            ..EngineConfig::default()
        };
        let s = PreferenceSession::with_config(&categories, &channels, &[], config).unwrap();
        assert_eq!(s.render_key(&OptionKey::event("x", "a")), "x::a");
    }
}
