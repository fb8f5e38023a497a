// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! JST day-boundary arithmetic for the daily ranking window.
//!
//! The daily badge pass runs shortly after midnight and scores the
//! previous day. Days are bounded at JST midnight, expressed in UTC for
//! the underlying period queries.

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Asia::Tokyo;

/// Half-open UTC interval `[start, end)` covering one JST calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JstDayWindow {
    /// JST midnight opening the day, in UTC.
    pub start: DateTime<Utc>,
    /// JST midnight closing the day (exclusive), in UTC.
    pub end: DateTime<Utc>,
}

/// Returns the window for the JST day preceding `now`.
///
/// # Arguments
///
/// * `now` - The reference instant
#[must_use]
pub fn previous_jst_day(now: DateTime<Utc>) -> JstDayWindow {
    let today_jst = now.with_timezone(&Tokyo).date_naive();
    let yesterday_jst = today_jst.pred_opt().unwrap_or(today_jst);

    // JST has no DST, so local midnight always resolves uniquely.
    let start = Tokyo
        .from_local_datetime(&yesterday_jst.and_time(NaiveTime::MIN))
        .single()
        .map_or(now, |dt| dt.with_timezone(&Utc));
    let end = Tokyo
        .from_local_datetime(&today_jst.and_time(NaiveTime::MIN))
        .single()
        .map_or(now, |dt| dt.with_timezone(&Utc));

    JstDayWindow { start, end }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_previous_day_boundaries() {
        // 2026-06-15 01:30 JST == 2026-06-14 16:30 UTC.
        let now: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 6, 14, 16, 30, 0).unwrap();
        let window: JstDayWindow = previous_jst_day(now);

        // Previous JST day is 2026-06-14: midnight JST == 15:00 UTC the day before.
        assert_eq!(
            window.start,
            Utc.with_ymd_and_hms(2026, 6, 13, 15, 0, 0).unwrap()
        );
        assert_eq!(
            window.end,
            Utc.with_ymd_and_hms(2026, 6, 14, 15, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_window_is_24_hours() {
        let now: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 1, 10, 3, 0, 0).unwrap();
        let window: JstDayWindow = previous_jst_day(now);
        assert_eq!((window.end - window.start).num_hours(), 24);
    }

    #[test]
    fn test_utc_morning_maps_to_same_jst_day() {
        // 2026-06-14 20:00 UTC is already 2026-06-15 05:00 JST, so the
        // previous JST day is still 2026-06-14.
        let late: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 6, 14, 20, 0, 0).unwrap();
        let early: DateTime<Utc> = Utc.with_ymd_and_hms(2026, 6, 14, 16, 0, 0).unwrap();
        assert_eq!(previous_jst_day(late), previous_jst_day(early));
    }
}
