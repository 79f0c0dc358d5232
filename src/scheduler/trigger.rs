// Daily wall-clock trigger.

use chrono::{DateTime, Days, NaiveTime, TimeZone};

/// Next instant strictly after `now` whose local time is `at`.
/// Days where `at` falls into a DST gap are skipped; on a repeated hour the
/// earlier instant is used.
pub fn next_daily_fire<Tz: TimeZone>(now: &DateTime<Tz>, at: NaiveTime) -> DateTime<Tz> {
    let tz = now.timezone();
    let today = now.date_naive();
    for offset in 0..=7u64 {
        let Some(day) = today.checked_add_days(Days::new(offset)) else {
            break;
        };
        if let Some(candidate) = tz.from_local_datetime(&day.and_time(at)).earliest() {
            if candidate > *now {
                return candidate;
            }
        }
    }
    now.clone() + chrono::Duration::days(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};

    fn nine() -> NaiveTime {
        NaiveTime::from_hms_opt(9, 0, 0).unwrap()
    }

    #[test]
    fn before_nine_fires_today() {
        let now = Utc.with_ymd_and_hms(2026, 10, 19, 8, 59, 59).unwrap();
        assert_eq!(
            next_daily_fire(&now, nine()),
            Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn at_or_after_nine_fires_tomorrow() {
        let at_nine = Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap();
        assert_eq!(
            next_daily_fire(&at_nine, nine()),
            Utc.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap()
        );
        let evening = Utc.with_ymd_and_hms(2026, 12, 31, 22, 0, 0).unwrap();
        assert_eq!(
            next_daily_fire(&evening, nine()),
            Utc.with_ymd_and_hms(2027, 1, 1, 9, 0, 0).unwrap()
        );
    }

    #[test]
    fn respects_the_local_offset() {
        let cest = FixedOffset::east_opt(2 * 3600).unwrap();
        let now = cest.with_ymd_and_hms(2026, 10, 19, 10, 0, 0).unwrap();
        let next = next_daily_fire(&now, nine());
        assert_eq!(next, cest.with_ymd_and_hms(2026, 10, 20, 9, 0, 0).unwrap());
        assert_eq!(next.with_timezone(&Utc).format("%H:%M").to_string(), "07:00");
    }
}
