use std::collections::HashMap;

use time::{macros::format_description, Date, Duration};

use portfolio_api_structs::{DailyViews, PageViewStats};

/// Number of days covered by the page view statistics, ending today.
pub const DAYS: i64 = 7;

/// First and last day of the week ending on `today`.
pub fn week_ending(today: Date) -> (Date, Date) {
    (today - Duration::days(DAYS - 1), today)
}

/// Formats a date as `M/D/YY`.
pub fn short_date(date: Date) -> String {
    let format = format_description!("[month padding:none]/[day padding:none]/[year repr:last_two]");
    date.format(&format)
        .unwrap_or_else(|_| date.to_string())
}

/// Fills in the days without stored counts with zero, oldest day first.
pub fn page_view_stats(today: Date, counts: &[(Date, i64)]) -> PageViewStats {
    let counts: HashMap<Date, i64> = counts.iter().copied().collect();
    let (first, _) = week_ending(today);

    (0..DAYS)
        .map(|offset| {
            let day = first + Duration::days(offset);
            DailyViews {
                date: short_date(day),
                views: counts.get(&day).copied().unwrap_or(0).max(0) as u64,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    #[test]
    fn short_dates_are_unpadded() {
        assert_eq!(short_date(date!(2020 - 06 - 05)), "6/5/20");
        assert_eq!(short_date(date!(2021 - 12 - 31)), "12/31/21");
    }

    #[test]
    fn week_covers_seven_days_ending_today() {
        let (first, last) = week_ending(date!(2020 - 03 - 02));
        assert_eq!(first, date!(2020 - 02 - 25));
        assert_eq!(last, date!(2020 - 03 - 02));
    }

    #[test]
    fn missing_days_count_zero() {
        let today = date!(2020 - 06 - 10);
        let stats = page_view_stats(
            today,
            &[(date!(2020 - 06 - 04), 3), (date!(2020 - 06 - 10), 12)],
        );

        assert_eq!(stats.len(), DAYS as usize);
        assert_eq!(stats[0].date, "6/4/20");
        assert_eq!(stats[0].views, 3);
        assert_eq!(stats[1].views, 0);
        assert_eq!(stats[6].date, "6/10/20");
        assert_eq!(stats[6].views, 12);
    }
}
