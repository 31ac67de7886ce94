use chrono::{DateTime, NaiveDate};
use js_sys::Date;
use wasm_bindgen::JsValue;

const LONG_DATE: &str = "%B %-d, %Y";

/// Unlock dates arrive as YYYY-MM-DD or RFC 3339; shown as "February 20, 2025".
/// Anything else is shown unchanged.
pub fn format_unlock_date(value: &str) -> String {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|d| d.date_naive()));

    match date {
        Some(date) => date.format(LONG_DATE).to_string(),
        None => value.to_string(),
    }
}

/// The next birthday in the browser's local time, e.g. "February 20, 2025"
pub fn format_birthday_heading(next_birthday: &str) -> String {
    let date = Date::new(&JsValue::from_str(next_birthday));
    if date.get_time().is_nan() {
        return next_birthday.to_string();
    }
    NaiveDate::from_ymd_opt(date.get_full_year() as i32, date.get_month() + 1, date.get_date())
        .map(|local| local.format(LONG_DATE).to_string())
        .unwrap_or_else(|| next_birthday.to_string())
}

/// Milliseconds since the epoch, from the browser clock
pub fn now_ms() -> i64 {
    Date::now() as i64
}
