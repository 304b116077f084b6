use tracing::info;

use crate::{OptionIndex, Propagator, Result, StateStore};

/// Build the initial store from the index's pre-subscribed event options.
///
/// Each checked option is settled to `Checked` against an initially empty
/// store, which is what toggling each distinct option once would produce.
/// Unchecked options are not written; absence already reads as `Unchecked`.
pub fn hydrate(index: &OptionIndex) -> Result<StateStore> {
    let propagator = Propagator::new(index);
    let mut store = StateStore::new();
    let mut settled = 0usize;

    for option in index.initially_checked() {
        propagator.settle_event(&mut store, option)?;
        settled += 1;
    }

    info!(
        subscribed = settled,
        event_options = index.event_options().len(),
        stored = store.len(),
        "preference store hydrated"
    );
    Ok(store)
}
