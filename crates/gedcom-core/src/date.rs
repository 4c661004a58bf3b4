//! GEDCOM date normalization.
//!
//! Free-text dates are rewritten to the canonical `[PREFIX ]<body>` form where
//! the body is empty, a bare year, `MMM YYYY` or `DD MMM YYYY`.
//!
//! # Grammar selection
//!
//! The grammar used for a body is picked by its shape alone (counts of `.`,
//! `/` and space characters), through the ordered [`DATE_RULES`] table:
//!
//! | Shape                          | Locale  | Output        |
//! |--------------------------------|---------|---------------|
//! | one `.`, one space             | neutral | `MMM YYYY`    |
//! | one `.`, two spaces            | German  | `DD MMM YYYY` |
//! | one `.`, any other spacing     | neutral | `MMM YYYY`    |
//! | two `.`                        | German  | `DD MMM YYYY` |
//! | two `/`                        | US      | `DD MMM YYYY` |
//! | two spaces                     | US      | `DD MMM YYYY` |
//!
//! A body matching no rule is passed through. A body matching a rule that
//! fails to parse is also passed through but flagged as failed.

use chrono::NaiveDate;
use gedcom_model::{DateQualifier, split_qualifier};

use crate::months::abbreviate_months;

/// Locale whose conventions drive token interpretation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLocale {
    /// English month names, month-first numeric order.
    Neutral,
    /// German and English month names, day-first numeric order.
    German,
    /// English month names, month-first numeric order.
    UnitedStates,
}

/// Output layout of a parsed date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateLayout {
    MonthYear,
    DayMonthYear,
}

impl DateLayout {
    fn pattern(self) -> &'static str {
        match self {
            Self::MonthYear => "%b %Y",
            Self::DayMonthYear => "%d %b %Y",
        }
    }
}

/// Separator counts that select a grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateShape {
    pub dots: usize,
    pub slashes: usize,
    pub spaces: usize,
}

impl DateShape {
    pub fn of(body: &str) -> Self {
        Self {
            dots: body.matches('.').count(),
            slashes: body.matches('/').count(),
            spaces: body.matches(' ').count(),
        }
    }
}

/// One entry of the grammar table.
pub struct DateRule {
    pub applies: fn(&DateShape) -> bool,
    pub locale: DateLocale,
    pub layout: DateLayout,
}

/// Grammar table, first match wins.
pub const DATE_RULES: &[DateRule] = &[
    DateRule {
        applies: one_dot_one_space,
        locale: DateLocale::Neutral,
        layout: DateLayout::MonthYear,
    },
    DateRule {
        applies: one_dot_two_spaces,
        locale: DateLocale::German,
        layout: DateLayout::DayMonthYear,
    },
    DateRule {
        applies: one_dot,
        locale: DateLocale::Neutral,
        layout: DateLayout::MonthYear,
    },
    DateRule {
        applies: two_dots,
        locale: DateLocale::German,
        layout: DateLayout::DayMonthYear,
    },
    DateRule {
        applies: two_slashes,
        locale: DateLocale::UnitedStates,
        layout: DateLayout::DayMonthYear,
    },
    DateRule {
        applies: two_spaces,
        locale: DateLocale::UnitedStates,
        layout: DateLayout::DayMonthYear,
    },
];

fn one_dot_one_space(shape: &DateShape) -> bool {
    shape.dots == 1 && shape.spaces == 1
}

fn one_dot_two_spaces(shape: &DateShape) -> bool {
    shape.dots == 1 && shape.spaces == 2
}

fn one_dot(shape: &DateShape) -> bool {
    shape.dots == 1
}

fn two_dots(shape: &DateShape) -> bool {
    shape.dots == 2
}

fn two_slashes(shape: &DateShape) -> bool {
    shape.slashes == 2
}

fn two_spaces(shape: &DateShape) -> bool {
    shape.spaces == 2
}

/// Normalized date body, before the qualifier is re-attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedBody {
    pub text: String,
    pub failed: bool,
}

/// Fully normalized `DATE` value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedDate {
    pub qualifier: Option<DateQualifier>,
    /// Body with the qualifier stripped, as found in the input.
    pub body: String,
    /// Canonical output text.
    pub output: String,
    pub failed: bool,
}

/// Normalize a complete `DATE` value including an optional qualifier.
///
/// ```
/// use gedcom_core::date::normalize_date;
///
/// assert_eq!(normalize_date("15. Januar 1980").output, "15 JAN 1980");
/// assert_eq!(normalize_date("ca. 12.03.1850").output, "EST 12 MAR 1850");
/// assert_eq!(normalize_date("ABT 1980").output, "ABT 1980");
/// ```
pub fn normalize_date(value: &str) -> NormalizedDate {
    let (qualifier, body) = split_qualifier(value);
    let normalized = normalize_date_body(body);

    let combined = match qualifier {
        Some(q) if normalized.text.is_empty() => q.as_str().to_string(),
        Some(q) => format!("{} {}", q.as_str(), normalized.text),
        None => normalized.text,
    };
    let output = collapse_spaces(&abbreviate_months(&combined).to_uppercase());

    NormalizedDate {
        qualifier,
        body: body.to_string(),
        output,
        failed: normalized.failed,
    }
}

/// Normalize a date body whose qualifier has already been removed.
pub fn normalize_date_body(body: &str) -> NormalizedBody {
    if body.is_empty() {
        return NormalizedBody {
            text: String::new(),
            failed: false,
        };
    }

    let trimmed = body.trim();
    if trimmed.chars().count() == 4 {
        return NormalizedBody {
            text: trimmed.to_string(),
            failed: false,
        };
    }

    let shape = DateShape::of(body);
    let Some(rule) = DATE_RULES.iter().find(|rule| (rule.applies)(&shape)) else {
        return NormalizedBody {
            text: body.to_string(),
            failed: false,
        };
    };

    match parse_with_locale(body, rule.locale) {
        Some(date) => NormalizedBody {
            text: date.format(rule.layout.pattern()).to_string().to_uppercase(),
            failed: false,
        },
        None => NormalizedBody {
            text: body.to_string(),
            failed: true,
        },
    }
}

/// Parse a date body under a locale's conventions.
///
/// Month-year inputs resolve to the first of the month. Inputs without a year
/// are rejected.
pub fn parse_with_locale(body: &str, locale: DateLocale) -> Option<NaiveDate> {
    let tokens = tokenize(body, locale)?;
    let (year, month, day) = match tokens.as_slice() {
        [a, b, c] => assemble_three(*a, *b, *c, locale)?,
        [a, b] => assemble_two(*a, *b)?,
        _ => return None,
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DateToken {
    Number { value: u32, digits: usize },
    Month(u32),
}

impl DateToken {
    fn is_long_number(self) -> bool {
        matches!(self, Self::Number { digits: 3.., .. })
    }
}

fn tokenize(body: &str, locale: DateLocale) -> Option<Vec<DateToken>> {
    body.split(|c: char| c.is_whitespace() || matches!(c, '.' | '/' | '-'))
        .filter(|part| !part.is_empty())
        .map(|part| classify_token(part, locale))
        .collect()
}

fn classify_token(part: &str, locale: DateLocale) -> Option<DateToken> {
    if part.chars().all(|c| c.is_ascii_digit()) {
        if part.len() > 4 {
            return None;
        }
        let value = part.parse().ok()?;
        return Some(DateToken::Number {
            value,
            digits: part.len(),
        });
    }
    month_number(&part.to_uppercase(), locale).map(DateToken::Month)
}

const ENGLISH_MONTHS: [&[&str]; 12] = [
    &["JANUARY", "JAN"],
    &["FEBRUARY", "FEB"],
    &["MARCH", "MAR"],
    &["APRIL", "APR"],
    &["MAY"],
    &["JUNE", "JUN"],
    &["JULY", "JUL"],
    &["AUGUST", "AUG"],
    &["SEPTEMBER", "SEPT", "SEP"],
    &["OCTOBER", "OCT"],
    &["NOVEMBER", "NOV"],
    &["DECEMBER", "DEC"],
];

const GERMAN_MONTHS: [&[&str]; 12] = [
    &["JANUAR", "JÄNNER", "JAN"],
    &["FEBRUAR", "FEB"],
    &["MÄRZ", "MAERZ", "MÄR", "MRZ"],
    &["APRIL", "APR"],
    &["MAI"],
    &["JUNI", "JUN"],
    &["JULI", "JUL"],
    &["AUGUST", "AUG"],
    &["SEPTEMBER", "SEP"],
    &["OKTOBER", "OKT"],
    &["NOVEMBER", "NOV"],
    &["DEZEMBER", "DEZ"],
];

fn month_number(name: &str, locale: DateLocale) -> Option<u32> {
    let lookup = |table: &[&[&str]; 12]| {
        table
            .iter()
            .position(|names| names.iter().any(|candidate| *candidate == name))
            .map(|index| index as u32 + 1)
    };
    match locale {
        DateLocale::German => lookup(&GERMAN_MONTHS).or_else(|| lookup(&ENGLISH_MONTHS)),
        DateLocale::Neutral | DateLocale::UnitedStates => lookup(&ENGLISH_MONTHS),
    }
}

fn assemble_three(
    a: DateToken,
    b: DateToken,
    c: DateToken,
    locale: DateLocale,
) -> Option<(i32, u32, u32)> {
    use DateToken::{Month, Number};

    match (a, b, c) {
        // A month name fixes the month; of the two numbers a leading long one is the year.
        (Month(month), Number { value: x, .. }, Number { value: y, digits })
        | (Number { value: x, .. }, Month(month), Number { value: y, digits })
        | (Number { value: x, .. }, Number { value: y, digits }, Month(month)) => {
            if a.is_long_number() {
                Some((expand_year(x, 4)?, month, y))
            } else {
                Some((expand_year(y, digits)?, month, x))
            }
        }
        (Number { value: x, digits }, Number { value: y, .. }, Number { value: z, digits: zd }) => {
            if digits >= 3 {
                Some((expand_year(x, digits)?, y, z))
            } else {
                match locale {
                    DateLocale::German => Some((expand_year(z, zd)?, y, x)),
                    DateLocale::Neutral | DateLocale::UnitedStates => {
                        Some((expand_year(z, zd)?, x, y))
                    }
                }
            }
        }
        _ => None,
    }
}

fn assemble_two(a: DateToken, b: DateToken) -> Option<(i32, u32, u32)> {
    use DateToken::{Month, Number};

    match (a, b) {
        (Month(month), Number { value, digits }) => Some((expand_year(value, digits)?, month, 1)),
        (Number { value, digits }, Month(month)) if digits >= 3 => {
            Some((expand_year(value, digits)?, month, 1))
        }
        (Number { value: x, digits: xd }, Number { value: y, digits: yd }) => {
            if yd >= 3 {
                Some((expand_year(y, yd)?, x, 1))
            } else if xd >= 3 {
                Some((expand_year(x, xd)?, y, 1))
            } else {
                None
            }
        }
        _ => None,
    }
}

/// Two-digit years fall in 1930..=2029.
fn expand_year(value: u32, digits: usize) -> Option<i32> {
    let year = if digits <= 2 {
        if value <= 29 { 2000 + value } else { 1900 + value }
    } else {
        value
    };
    if year == 0 {
        return None;
    }
    i32::try_from(year).ok()
}

fn collapse_spaces(value: &str) -> String {
    let mut result = value.to_string();
    while result.contains("  ") {
        result = result.replace("  ", " ");
    }
    result
}
