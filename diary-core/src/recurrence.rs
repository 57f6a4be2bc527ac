//! Day-interval repeat expansion.
//!
//! A repeating event occurs at `base + k * interval_days` for every `k >= 0`.

use chrono::{Duration, NaiveDateTime};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

/// The first occurrence at or after `not_before`.
///
/// Returns `None` when `interval_days` is zero or the occurrence is outside the
/// representable date range.
pub fn next_occurrence(
    base: NaiveDateTime,
    interval_days: u32,
    not_before: NaiveDateTime,
) -> Option<NaiveDateTime> {
    if interval_days == 0 {
        return None;
    }
    if base >= not_before {
        return Some(base);
    }

    let step = i64::from(interval_days) * SECONDS_PER_DAY;
    let behind = (not_before - base).num_seconds();
    let behind_nanos = (not_before - base).subsec_nanos();

    // Round up to the next whole step, counting any sub-second remainder.
    let mut k = behind / step;
    if behind % step != 0 || behind_nanos != 0 {
        k += 1;
    }

    let offset = Duration::try_seconds(k.checked_mul(step)?)?;
    base.checked_add_signed(offset)
}
