// services/payout_schedule.rs
//
// Pure calendar arithmetic for payout scheduling. No I/O; `today` is always
// passed in by the caller.

use chrono::{Datelike, Duration, NaiveDate};

use crate::models::vendor::PayoutFrequency;

/// Next payout date for a vendor on the given frequency.
///
/// Weekly payouts land on the next Monday strictly after `today`; a Monday
/// input schedules the following Monday, seven days out. Biweekly payouts
/// land on the 15th while the month is young and roll to the 1st otherwise.
/// Monthly payouts always land on the 1st of the next month.
pub fn next_payout_date(frequency: PayoutFrequency, today: NaiveDate) -> NaiveDate {
    match frequency {
        PayoutFrequency::Weekly => {
            let days_ahead = 7 - today.weekday().num_days_from_monday() as i64;
            today + Duration::days(days_ahead)
        }
        PayoutFrequency::Biweekly => {
            if today.day() < 15 {
                today.with_day(15).expect("every month has a 15th")
            } else {
                first_of_next_month(today)
            }
        }
        PayoutFrequency::Monthly => first_of_next_month(today),
    }
}

fn first_of_next_month(date: NaiveDate) -> NaiveDate {
    let (year, month) = if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of month is always valid")
}
