//! core/merge.rs
//! The one conflict rule every field sync goes through, in both directions.
//!
//! - `force`: the incoming value always wins.
//! - otherwise: the incoming value only fills an unset (zero) field.

/// Outcome of [`merge`]: the value to keep and whether it differs from before.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Merged<T> {
    pub value: T,
    pub changed: bool,
}

pub fn merge<T>(current: T, incoming: T, force: bool) -> Merged<T>
where
    T: Copy + PartialEq + Default,
{
    let unset = T::default();

    let overwrite = if force {
        incoming != current
    } else {
        current == unset && incoming != unset
    };

    Merged {
        value: if overwrite { incoming } else { current },
        changed: overwrite,
    }
}
