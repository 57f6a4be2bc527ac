//! Day-offset windows for selecting events.

use chrono::{Duration, NaiveDateTime};

use crate::error::{DiaryError, DiaryResult};
use crate::event::Event;
use crate::recurrence::next_occurrence;

/// How repeating events are matched against a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowPolicy {
    /// Report the first occurrence inside the window (listing)
    ExpandRepeats,
    /// Match only the stored timestamp (deletion removes the whole series)
    MatchBase,
}

/// Inclusive date-time range `[start, end]`, always with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl DateWindow {
    /// Window from `now` spanning `days` days.
    /// Positive offsets look forward, negative offsets look back.
    pub fn from_offset(now: NaiveDateTime, days: i64) -> DiaryResult<Self> {
        let too_large =
            || DiaryError::InvalidInput(format!("Number of days ({}) is too large", days));

        let offset = Duration::try_days(days).ok_or_else(too_large)?;
        let other = now.checked_add_signed(offset).ok_or_else(too_large)?;

        Ok(if days >= 0 {
            DateWindow { start: now, end: other }
        } else {
            DateWindow { start: other, end: now }
        })
    }

    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }

    /// Effective timestamp of `event` in this window, if it falls inside.
    pub fn effective_timestamp(&self, event: &Event, policy: WindowPolicy) -> Option<NaiveDateTime> {
        match (policy, event.repeat_interval) {
            (WindowPolicy::ExpandRepeats, Some(interval)) => {
                next_occurrence(event.timestamp, interval, self.start)
                    .filter(|occurrence| *occurrence <= self.end)
            }
            _ => Some(event.timestamp).filter(|t| self.contains(*t)),
        }
    }

    pub fn matches(&self, event: &Event, policy: WindowPolicy) -> bool {
        self.effective_timestamp(event, policy).is_some()
    }

    /// Events in the window sorted by effective timestamp.
    ///
    /// With `ExpandRepeats`, repeating events are returned as copies carrying the
    /// occurrence time. Equal timestamps keep their collection order.
    pub fn select<'a, I>(&self, events: I, policy: WindowPolicy) -> Vec<Event>
    where
        I: IntoIterator<Item = &'a Event>,
    {
        let mut selected: Vec<Event> = events
            .into_iter()
            .filter_map(|event| {
                self.effective_timestamp(event, policy)
                    .map(|timestamp| event.occurring_at(timestamp))
            })
            .collect();

        // sort_by_key is stable
        selected.sort_by_key(|event| event.timestamp);

        tracing::debug!(
            start = %self.start,
            end = %self.end,
            ?policy,
            count = selected.len(),
            "selected events in window"
        );

        selected
    }
}
