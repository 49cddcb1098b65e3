// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::Thread;
use time::{Date, Duration};

/// Inclusive calendar-day range covering every loaded thread. One day maps
/// to one grid column; the span only ever widens as pages are absorbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimelineSpan {
    start: Date,
    end: Date,
}

impl TimelineSpan {
    pub fn new(start: Date, end: Date) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub const fn start(self) -> Date {
        self.start
    }

    pub const fn end(self) -> Date {
        self.end
    }

    /// Global min/max day across the precomputed thread bounds. `None` when
    /// no threads are loaded.
    pub fn from_threads(threads: &[Thread]) -> Option<Self> {
        let mut span: Option<Self> = None;
        for thread in threads {
            let first = thread.first_message.date();
            let last = thread.last_message.date();
            // Normalize inverted bounds rather than trusting the server.
            let bounds = Self {
                start: first.min(last),
                end: first.max(last),
            };
            span = Some(match span {
                Some(current) => current.widen(bounds),
                None => bounds,
            });
        }
        span
    }

    pub fn widen(self, other: Self) -> Self {
        Self {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    pub fn day_count(self) -> usize {
        let days = (self.end - self.start).whole_days();
        usize::try_from(days).unwrap_or(0) + 1
    }

    pub fn contains(self, date: Date) -> bool {
        date >= self.start && date <= self.end
    }

    /// Day for a column index, counting from the span start.
    pub fn date_at(self, index: usize) -> Option<Date> {
        if index >= self.day_count() {
            return None;
        }
        let offset = i64::try_from(index).ok()?;
        self.start.checked_add(Duration::days(offset))
    }

    /// Column index for a day inside the span.
    pub fn index_of(self, date: Date) -> Option<usize> {
        if !self.contains(date) {
            return None;
        }
        usize::try_from((date - self.start).whole_days()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::TimelineSpan;
    use crate::Thread;
    use time::macros::{date, datetime};

    fn thread(first: time::PrimitiveDateTime, last: time::PrimitiveDateTime) -> Thread {
        Thread {
            address: "+15550001111".to_owned(),
            messages: Vec::new(),
            first_message: first,
            last_message: last,
        }
    }

    #[test]
    fn empty_thread_list_has_no_span() {
        assert_eq!(TimelineSpan::from_threads(&[]), None);
    }

    #[test]
    fn span_covers_min_and_max_across_threads() {
        let threads = vec![
            thread(datetime!(2024-11-02 09:15:00), datetime!(2025-01-10 18:00:00)),
            thread(datetime!(2024-12-25 08:00:00), datetime!(2025-02-22 11:28:16)),
        ];
        let span = TimelineSpan::from_threads(&threads).expect("span for two threads");
        assert_eq!(span.start(), date!(2024 - 11 - 02));
        assert_eq!(span.end(), date!(2025 - 02 - 22));
    }

    #[test]
    fn single_day_span_has_one_column() {
        let threads = vec![thread(
            datetime!(2025-02-22 08:00:00),
            datetime!(2025-02-22 23:00:00),
        )];
        let span = TimelineSpan::from_threads(&threads).expect("span for one thread");
        assert_eq!(span.day_count(), 1);
        assert_eq!(span.date_at(0), Some(date!(2025 - 02 - 22)));
        assert_eq!(span.date_at(1), None);
    }

    #[test]
    fn inverted_server_bounds_are_normalized() {
        let threads = vec![thread(
            datetime!(2025-02-22 08:00:00),
            datetime!(2025-02-20 08:00:00),
        )];
        let span = TimelineSpan::from_threads(&threads).expect("span despite inverted bounds");
        assert_eq!(span.start(), date!(2025 - 02 - 20));
        assert_eq!(span.end(), date!(2025 - 02 - 22));
        assert_eq!(span.day_count(), 3);
    }

    #[test]
    fn widen_is_a_monotone_union() {
        let base = TimelineSpan::new(date!(2025 - 01 - 10), date!(2025 - 01 - 20))
            .expect("valid base span");
        let other = TimelineSpan::new(date!(2025 - 01 - 05), date!(2025 - 01 - 15))
            .expect("valid other span");

        let widened = base.widen(other);
        assert_eq!(widened.start(), date!(2025 - 01 - 05));
        assert_eq!(widened.end(), date!(2025 - 01 - 20));

        // Widening by a contained span changes nothing.
        assert_eq!(widened.widen(base), widened);
    }

    #[test]
    fn date_and_index_round_trip_inside_span() {
        let span = TimelineSpan::new(date!(2025 - 01 - 01), date!(2025 - 03 - 01))
            .expect("valid span");
        assert_eq!(span.day_count(), 60);
        for index in [0usize, 1, 30, 59] {
            let date = span.date_at(index).expect("index inside span");
            assert_eq!(span.index_of(date), Some(index));
        }
        assert_eq!(span.index_of(date!(2024 - 12 - 31)), None);
        assert_eq!(span.index_of(date!(2025 - 03 - 02)), None);
    }

    #[test]
    fn new_rejects_inverted_range() {
        assert_eq!(
            TimelineSpan::new(date!(2025 - 02 - 02), date!(2025 - 02 - 01)),
            None
        );
    }
}
