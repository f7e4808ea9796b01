//! Gregorian calendar arithmetic on block timestamps (seconds since the Unix
//! epoch, UTC). Pure functions, no storage.

pub const SECONDS_PER_DAY: u64 = 86_400;

const FIRST_YEAR: u32 = 1970;

/// Days between 0000-03-01 and 1970-01-01 in the proleptic calendar
const EPOCH_SHIFT_DAYS: u64 = 719_468;

const DAYS_PER_ERA: u64 = 146_097;

pub fn is_leap_year(year: u32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub fn days_in_month(month: u8, year: u32) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

pub fn is_valid_date(day: u8, month: u8, year: u32) -> bool {
    year >= FIRST_YEAR && (1..=12).contains(&month) && day >= 1 && day <= days_in_month(month, year)
}

/// First instant of the given day, or `None` if the date does not exist.
pub fn due_timestamp(day: u8, month: u8, year: u32) -> Option<u64> {
    if !is_valid_date(day, month, year) {
        return None;
    }
    Some(days_from_civil(day as u64, month as u64, year as u64) * SECONDS_PER_DAY)
}

/// (month, year) containing the timestamp.
pub fn decompose(timestamp: u64) -> (u8, u32) {
    let (_, month, year) = civil_from_days(timestamp / SECONDS_PER_DAY);
    (month, year)
}

pub fn day_of_month(timestamp: u64) -> u8 {
    civil_from_days(timestamp / SECONDS_PER_DAY).0
}

/// True for every instant of the final day of the timestamp's month.
pub fn is_last_day_of_month(timestamp: u64) -> bool {
    let (day, month, year) = civil_from_days(timestamp / SECONDS_PER_DAY);
    day == days_in_month(month, year)
}

pub fn next_month(month: u8, year: u32) -> (u8, u32) {
    if month >= 12 {
        (1, year + 1)
    } else {
        (month + 1, year)
    }
}

/// First instant of the month. `month` must be in 1..=12.
pub fn month_start(month: u8, year: u32) -> u64 {
    days_from_civil(1, month as u64, year as u64) * SECONDS_PER_DAY
}

/// First instant of the month after (month, year), i.e. the exclusive end of it.
pub fn next_month_start(month: u8, year: u32) -> u64 {
    let (month, year) = next_month(month, year);
    month_start(month, year)
}

// Howard Hinnant's days_from_civil / civil_from_days, restricted to
// non-negative day counts since timestamps never precede the epoch.

fn days_from_civil(day: u64, month: u64, year: u64) -> u64 {
    let year = if month <= 2 { year - 1 } else { year };
    let era = year / 400;
    let year_of_era = year - era * 400;
    let shifted_month = (month + 9) % 12;
    let day_of_year = (153 * shifted_month + 2) / 5 + day - 1;
    let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;
    era * DAYS_PER_ERA + day_of_era - EPOCH_SHIFT_DAYS
}

fn civil_from_days(days: u64) -> (u8, u8, u32) {
    let days = days + EPOCH_SHIFT_DAYS;
    let era = days / DAYS_PER_ERA;
    let day_of_era = days - era * DAYS_PER_ERA;
    let year_of_era =
        (day_of_era - day_of_era / 1_460 + day_of_era / 36_524 - day_of_era / 146_096) / 365;
    let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
    let shifted_month = (5 * day_of_year + 2) / 153;
    let day = day_of_year - (153 * shifted_month + 2) / 5 + 1;
    let month = if shifted_month < 10 {
        shifted_month + 3
    } else {
        shifted_month - 9
    };
    let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };
    (day as u8, month as u8, year as u32)
}
