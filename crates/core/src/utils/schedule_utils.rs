use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Returns the next Friday strictly after `date`.
///
/// Cashback payouts are batched on Fridays; a transaction made on a Friday
/// pays out the following week.
pub fn next_friday(date: NaiveDate) -> NaiveDate {
    let days_ahead = (Weekday::Fri.num_days_from_monday() as i64
        - date.weekday().num_days_from_monday() as i64)
        .rem_euclid(7);
    let days_ahead = if days_ahead == 0 { 7 } else { days_ahead };
    date + Duration::days(days_ahead)
}
