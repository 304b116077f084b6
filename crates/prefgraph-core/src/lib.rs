//! Tri-state notification preferences over a Channel → Category → Event
//! hierarchy.
//!
//! [`OptionIndex`] expands the hierarchy into addressable options,
//! [`hydrate`] turns existing subscriptions into an initial [`StateStore`],
//! [`Propagator`] applies clicks (bubble-up for events, bubble-down for
//! groups) and [`project`] hands the subscribed (event, channel) pairs back
//! for persistence. [`PreferenceSession`] ties these together.

pub mod aggregate;
pub mod compact_map;
pub mod config;
pub mod error;
pub mod grid;
pub mod hydrate;
pub mod index;
pub mod logging;
pub mod option;
pub mod projection;
pub mod propagate;
pub mod session;
pub mod settings;
pub mod store;
pub mod tree;
pub mod tristate;
pub mod types;

pub use aggregate::*;
pub use compact_map::*;
pub use config::*;
pub use error::*;
pub use grid::*;
pub use hydrate::*;
pub use index::*;
pub use logging::*;
pub use option::*;
pub use projection::{project, to_subscriptions};
pub use propagate::*;
pub use session::*;
pub use settings::*;
pub use store::{ChangeSet, StateChange, StateStore};
pub use tree::*;
pub use tristate::*;
pub use types::*;
