use crate::{CheckState, PrefGraphError, Result};

/// Aggregate state of a group from the states of its direct children.
///
/// All `Checked` gives `Checked`, all `Unchecked` gives `Unchecked`, anything
/// else (a mix, or any `Indeterminate` child) gives `Indeterminate`. The same
/// rule applies to events under a category and to categories under a channel.
pub fn aggregate<I>(children: I) -> Result<CheckState>
where
    I: IntoIterator<Item = CheckState>,
{
    let mut seen_checked = false;
    let mut seen_unchecked = false;
    let mut any = false;

    for state in children {
        any = true;
        match state {
            CheckState::Indeterminate => return Ok(CheckState::Indeterminate),
            CheckState::Checked => seen_checked = true,
            CheckState::Unchecked => seen_unchecked = true,
        }
        if seen_checked && seen_unchecked {
            return Ok(CheckState::Indeterminate);
        }
    }

    if !any {
        return Err(PrefGraphError::EmptyGroup(
            "cannot aggregate a group with no children".to_string(),
        ));
    }

    Ok(if seen_checked {
        CheckState::Checked
    } else {
        CheckState::Unchecked
    })
}
