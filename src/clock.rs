//! Single source of truth for the journal's wall-clock convention.
//!
//! Entries are timestamped in a fixed +05:30 offset regardless of where the
//! server runs, and "today" on the dashboard means the calendar date under
//! that same offset. Every component that buckets by day goes through here.

use time::{Date, OffsetDateTime, UtcOffset};

pub const JOURNAL_OFFSET: UtcOffset = time::macros::offset!(+5:30);

/// Current wall-clock time in the journal's fixed offset.
pub fn local_now() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(JOURNAL_OFFSET)
}

/// Current calendar date in the journal's fixed offset.
pub fn local_today() -> Date {
    local_now().date()
}

/// Normalize an arbitrary timestamp into the journal offset.
pub fn to_local(ts: OffsetDateTime) -> OffsetDateTime {
    ts.to_offset(JOURNAL_OFFSET)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn offset_is_five_thirty() {
        assert_eq!(JOURNAL_OFFSET.whole_hours(), 5);
        assert_eq!(JOURNAL_OFFSET.minutes_past_hour(), 30);
    }

    #[test]
    fn to_local_shifts_the_day_boundary() {
        // 23:00 UTC is already the next day at +05:30.
        let late_utc = datetime!(2025-03-01 23:00 UTC);
        assert_eq!(
            to_local(late_utc).date(),
            datetime!(2025-03-02 0:00 UTC).date()
        );
    }

    #[test]
    fn to_local_preserves_the_instant() {
        let ts = datetime!(2025-03-01 12:00 UTC);
        assert_eq!(to_local(ts), ts);
        assert_eq!(to_local(ts).offset(), JOURNAL_OFFSET);
    }

    #[test]
    fn local_now_carries_the_journal_offset() {
        assert_eq!(local_now().offset(), JOURNAL_OFFSET);
    }
}
