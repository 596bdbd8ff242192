//! Lazy calendar-day iteration.

use chrono::NaiveDate;
use std::iter::FusedIterator;

/// An inclusive range of calendar days, walked one day at a time.
///
/// Each step moves to the calendar successor of the previous date, so month
/// and year boundaries roll over the same way a wall calendar does. A range
/// whose end precedes its start yields nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    front: NaiveDate,
    back: NaiveDate,
    exhausted: bool,
}

impl DateRange {
    /// Creates a range covering `start` through `end`, both included.
    pub fn inclusive(start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            front: start,
            back: end,
            exhausted: end < start,
        }
    }

    /// Returns `true` if the range yields no more dates.
    pub fn is_empty(&self) -> bool {
        self.exhausted
    }

    fn remaining(&self) -> usize {
        if self.exhausted {
            0
        } else {
            (self.back - self.front).num_days() as usize + 1
        }
    }
}

impl Iterator for DateRange {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let current = self.front;
        match current.succ_opt() {
            Some(next) if current < self.back => self.front = next,
            _ => self.exhausted = true,
        }
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for DateRange {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let current = self.back;
        match current.pred_opt() {
            Some(previous) if current > self.front => self.back = previous,
            _ => self.exhausted = true,
        }
        Some(current)
    }
}

impl ExactSizeIterator for DateRange {}

impl FusedIterator for DateRange {}
