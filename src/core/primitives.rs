use chrono::{DateTime, Datelike, FixedOffset, TimeDelta, Weekday};

/// Resolves epoch milliseconds into wall-clock time at a fixed offset.
#[must_use]
pub fn millis_to_local(millis: i64, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    DateTime::from_timestamp_millis(millis).map(|utc| utc.with_timezone(&offset))
}

/// Local midnight of the most recent `first_day` at or before `time`.
#[must_use]
pub fn start_of_week(
    time: DateTime<FixedOffset>,
    first_day: Weekday,
) -> Option<DateTime<FixedOffset>> {
    let days_back = (time.weekday().num_days_from_monday() + 7
        - first_day.num_days_from_monday())
        % 7;
    let date = time
        .date_naive()
        .checked_sub_signed(TimeDelta::days(i64::from(days_back)))?;
    date.and_hms_opt(0, 0, 0)?
        .and_local_timezone(*time.offset())
        .single()
}

/// Clamps `value` into `[min, max]`, pinning to `min` when the range is empty.
#[must_use]
pub fn clamp_pinned(value: i64, min: i64, max: i64) -> i64 {
    if min > max {
        return min;
    }
    value.clamp(min, max)
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone, Weekday};

    use super::{clamp_pinned, start_of_week};

    #[test]
    fn start_of_week_steps_back_to_configured_first_day() {
        let utc = FixedOffset::east_opt(0).expect("offset");
        // Thursday 2024-03-07 15:30.
        let time = utc.with_ymd_and_hms(2024, 3, 7, 15, 30, 0).unwrap();

        let sunday = start_of_week(time, Weekday::Sun).expect("sunday start");
        assert_eq!(sunday, utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).unwrap());

        let monday = start_of_week(time, Weekday::Mon).expect("monday start");
        assert_eq!(monday, utc.with_ymd_and_hms(2024, 3, 4, 0, 0, 0).unwrap());

        let thursday = start_of_week(time, Weekday::Thu).expect("same-day start");
        assert_eq!(thursday, utc.with_ymd_and_hms(2024, 3, 7, 0, 0, 0).unwrap());
    }

    #[test]
    fn clamp_pinned_uses_min_for_inverted_range() {
        assert_eq!(clamp_pinned(5, 10, 3), 10);
        assert_eq!(clamp_pinned(5, 0, 3), 3);
        assert_eq!(clamp_pinned(-5, 0, 3), 0);
    }
}
