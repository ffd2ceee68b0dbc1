use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static ISO_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<year>\d{4})-(?P<month>\d{1,2})-(?P<day>\d{1,2})$")
        .expect("ISO date pattern is valid")
});

static DOTTED_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<day>\d{1,2})\.(?P<month>\d{1,2})\.(?P<year>\d{4})$")
        .expect("dotted date pattern is valid")
});

/// Brings a birth date into the `DD.MM.YYYY` form users type.
///
/// - `1991-02-05T00:00:00` and `1991-02-05` become `05.02.1991`
/// - `5.2.1991` is padded to `05.02.1991`
/// - anything else without dashes passes through trimmed
/// - dashed input that is not year-month-day yields an empty string
pub fn translate(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    // Keep only the date part of a timestamp.
    let date_part = trimmed
        .split(|c: char| c == 'T' || c.is_whitespace())
        .next()
        .unwrap_or_default();

    if !date_part.contains('-') {
        return match DOTTED_DATE.captures(date_part) {
            Some(caps) => day_month_year(&caps),
            None => date_part.to_string(),
        };
    }

    match ISO_DATE.captures(date_part) {
        Some(caps) => day_month_year(&caps),
        None => String::new(),
    }
}

fn day_month_year(caps: &Captures<'_>) -> String {
    format!(
        "{:0>2}.{:0>2}.{}",
        &caps["day"], &caps["month"], &caps["year"]
    )
}

/// Absent dates translate like the empty string.
pub fn translate_opt(raw: Option<&str>) -> String {
    translate(raw.unwrap_or_default())
}
