//! Random selector
//!
//! Uniform selection over a non-empty row snapshot, with the randomness
//! source injected so tests can seed it. Two variants:
//! - [`pick`]: index into a locally held snapshot;
//! - [`pick_offset`]: choose a row offset for the remote-offset variant,
//!   where the store fetches exactly one row at that offset.

use moldpick_common::model::Mold;
use rand::Rng;

/// Pick one row uniformly at random from a non-empty snapshot
///
/// The caller must special-case the empty set before invoking this (the
/// screen controller surfaces a no-data message instead). Calling it on
/// an empty slice is a programming error and panics.
pub fn pick<'a, R: Rng + ?Sized>(rows: &'a [Mold], rng: &mut R) -> &'a Mold {
    assert!(!rows.is_empty(), "random selector invoked on an empty row set");
    let index = rng.gen_range(0..rows.len());
    &rows[index]
}

/// Pick a uniform random offset in `[0, count)` for remote selection
///
/// Equivalent uniform guarantee over the table's declared order, provided
/// the store ordering is stable between the count query and the offset
/// query. A mutation in between can push the offset out of range or shift
/// which logical row it addresses; callers surface the out-of-range case
/// as an empty dataset.
pub fn pick_offset<R: Rng + ?Sized>(count: u64, rng: &mut R) -> u64 {
    assert!(count > 0, "random offset requested for an empty table");
    rng.gen_range(0..count)
}
