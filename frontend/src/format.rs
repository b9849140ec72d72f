use std::sync::OnceLock;

use regex_lite::Regex;
use time::macros::format_description;
use time::Date;

static EMAIL_RE: OnceLock<Option<Regex>> = OnceLock::new();
static PHONE_RE: OnceLock<Option<Regex>> = OnceLock::new();

fn pattern(cell: &'static OnceLock<Option<Regex>>, source: &str) -> Option<&'static Regex> {
    cell.get_or_init(|| match Regex::new(source) {
        Ok(re) => Some(re),
        Err(err) => {
            log::error!("bad pattern {}: {}", source, err);
            None
        }
    })
    .as_ref()
}

/// Indian digit grouping: the last three digits, then pairs.
fn format_with_commas(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::new();
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

/// Rupees, no decimals: `₹1,23,456`, `-₹500`.
pub fn format_inr(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0".to_string();
    }
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}₹{}", sign, format_with_commas(rounded.abs() as u64))
}

/// `2024-05-01` (optionally followed by a time) as `01 May 2024`. Anything
/// unparseable is shown as it came.
pub fn format_date(value: &str) -> String {
    let input = format_description!("[year]-[month]-[day]");
    let output = format_description!("[day] [month repr:short] [year]");

    value
        .get(..10)
        .and_then(|day| Date::parse(day, &input).ok())
        .and_then(|date| date.format(&output).ok())
        .unwrap_or_else(|| value.to_string())
}

/// 12-hour clock with a two-digit hour: `09:05 AM`.
pub fn format_clock(hour: u32, minute: u32) -> String {
    let suffix = if hour < 12 { "AM" } else { "PM" };
    let hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{:02}:{:02} {}", hour, minute, suffix)
}

pub fn greeting(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 17 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}

pub fn is_valid_email(email: &str) -> bool {
    pattern(&EMAIL_RE, r"^[^\s@]+@[^\s@]+\.[^\s@]+$").is_some_and(|re| re.is_match(email))
}

pub fn is_valid_phone(phone: &str) -> bool {
    pattern(&PHONE_RE, r"^[0-9]{10}$").is_some_and(|re| re.is_match(phone))
}

/// Local wall-clock time, formatted for the transaction time field.
pub fn current_time_string() -> String {
    let now = js_sys::Date::new_0();
    format_clock(now.get_hours(), now.get_minutes())
}

pub fn current_hour() -> u32 {
    js_sys::Date::new_0().get_hours()
}

/// E.g. `Wednesday, 1 May 2024`.
pub fn today_long() -> String {
    const WEEKDAYS: [&str; 7] = [
        "Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday",
    ];
    const MONTHS: [&str; 12] = [
        "January", "February", "March", "April", "May", "June", "July", "August", "September",
        "October", "November", "December",
    ];
    let now = js_sys::Date::new_0();
    format!(
        "{}, {} {} {}",
        WEEKDAYS[(now.get_day() % 7) as usize],
        now.get_date(),
        MONTHS[(now.get_month() % 12) as usize],
        now.get_full_year()
    )
}
