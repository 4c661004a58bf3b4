//! Month name abbreviation.
//!
//! Rewrites a full month name inside an already formatted date string to its
//! three-letter abbreviation. Two calendars are applied in sequence so that
//! either an English or a German month name is shortened.
//!
//! Matching is a plain upper-case substring search, not a whole-word match.

/// Full and abbreviated month names of one calendar, upper-case.
#[derive(Debug, Clone, Copy)]
pub struct MonthCalendar {
    pub name: &'static str,
    pub full: [&'static str; 12],
    pub abbreviated: [&'static str; 12],
}

pub const INTERNATIONAL: MonthCalendar = MonthCalendar {
    name: "international",
    full: [
        "JANUARY",
        "FEBRUARY",
        "MARCH",
        "APRIL",
        "MAY",
        "JUNE",
        "JULY",
        "AUGUST",
        "SEPTEMBER",
        "OCTOBER",
        "NOVEMBER",
        "DECEMBER",
    ],
    abbreviated: [
        "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
    ],
};

pub const GERMAN: MonthCalendar = MonthCalendar {
    name: "german",
    full: [
        "JANUAR",
        "FEBRUAR",
        "MÄRZ",
        "APRIL",
        "MAI",
        "JUNI",
        "JULI",
        "AUGUST",
        "SEPTEMBER",
        "OKTOBER",
        "NOVEMBER",
        "DEZEMBER",
    ],
    abbreviated: [
        "JAN", "FEB", "MRZ", "APR", "MAI", "JUN", "JUL", "AUG", "SEP", "OKT", "NOV", "DEZ",
    ],
};

/// Calendars applied by [`abbreviate_months`], in order.
pub const CALENDARS: [&MonthCalendar; 2] = [&INTERNATIONAL, &GERMAN];

/// Abbreviate month names of every known calendar.
///
/// ```
/// use gedcom_core::months::abbreviate_months;
///
/// assert_eq!(abbreviate_months("15 JANUARY 1980"), "15 JAN 1980");
/// assert_eq!(abbreviate_months("MÄRZ 1850"), "MRZ 1850");
/// ```
pub fn abbreviate_months(value: &str) -> String {
    CALENDARS
        .iter()
        .fold(value.to_string(), |acc, calendar| {
            abbreviate_months_for(&acc, calendar)
        })
}

/// Replace the first full month name of `calendar` found in `value`.
///
/// Months are checked in calendar order; names of three letters or fewer
/// (`MAY`, `MAI`) are never rewritten. Every occurrence of the matched name is
/// replaced and the result is upper-cased. When nothing matches the value is
/// returned unchanged.
pub fn abbreviate_months_for(value: &str, calendar: &MonthCalendar) -> String {
    let upper = value.to_uppercase();
    for (full, abbreviated) in calendar.full.iter().zip(calendar.abbreviated.iter()) {
        if full.chars().count() > 3 && upper.contains(full) {
            return upper.replace(full, abbreviated);
        }
    }
    value.to_string()
}
