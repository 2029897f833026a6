// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Display formatting for money, timestamps and trust status.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use hares_common_dom::Element;

/// Shown in place of a timestamp that cannot be parsed.
pub const INVALID_DATE: &str = "Invalid Date";
pub const DEFAULT_TRUST_STATUS: &str = "Unverified";

/// Formats `amount` as US dollars, e.g. `$1,234.56` or `-$12.00`.
pub fn format_currency(amount: f64) -> String {
	if amount.is_nan() {
		return "$NaN".to_string();
	}
	let sign = if amount.is_sign_negative() && amount != 0.0 { "-" } else { "" };
	if amount.is_infinite() {
		return format!("{sign}$∞");
	}

	let fixed = format!("{:.2}", amount.abs());
	let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
	format!("{sign}${}.{cents}", group_thousands(whole))
}

fn group_thousands(digits: &str) -> String {
	let mut out = String::with_capacity(digits.len() + digits.len() / 3);
	for (i, c) in digits.chars().enumerate() {
		if i > 0 && (digits.len() - i) % 3 == 0 {
			out.push(',');
		}
		out.push(c);
	}
	out
}

/// Accepts RFC 3339, a naive `YYYY-MM-DDTHH:MM:SS` (taken as UTC) or a bare
/// `YYYY-MM-DD` date (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
	let value = value.trim();
	if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
		return Some(ts.with_timezone(&Utc));
	}
	if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
		return Some(naive.and_utc());
	}
	NaiveDate::parse_from_str(value, "%Y-%m-%d")
		.ok()
		.and_then(|date| date.and_hms_opt(0, 0, 0))
		.map(|naive| naive.and_utc())
}

/// `Jan 5, 2024`
pub fn format_date(ts: &DateTime<Utc>) -> String {
	ts.format("%b %-d, %Y").to_string()
}

/// `Jan 5, 2024, 02:30 PM`
pub fn format_date_time(ts: &DateTime<Utc>) -> String {
	ts.format("%b %-d, %Y, %I:%M %p").to_string()
}

pub fn format_date_str(value: &str) -> String {
	parse_timestamp(value)
		.map(|ts| format_date(&ts))
		.unwrap_or_else(|| INVALID_DATE.to_string())
}

pub fn format_date_time_str(value: &str) -> String {
	parse_timestamp(value)
		.map(|ts| format_date_time(&ts))
		.unwrap_or_else(|| INVALID_DATE.to_string())
}

/// Describes how long before `now` the moment `then` was. Anything a week or
/// older falls back to [`format_date`].
pub fn format_relative_time(then: &DateTime<Utc>, now: &DateTime<Utc>) -> String {
	let elapsed = now.signed_duration_since(*then);
	if elapsed < TimeDelta::minutes(1) {
		return "just now".to_string();
	}
	if elapsed < TimeDelta::hours(1) {
		return ago(elapsed.num_minutes(), "minute");
	}
	if elapsed < TimeDelta::days(1) {
		return ago(elapsed.num_hours(), "hour");
	}
	if elapsed < TimeDelta::days(7) {
		return ago(elapsed.num_days(), "day");
	}
	format_date(then)
}

fn ago(n: i64, unit: &str) -> String {
	let plural = if n > 1 { "s" } else { "" };
	format!("{n} {unit}{plural} ago")
}

/// A `trust-status-badge` span, `Unverified` when no status is known.
pub fn trust_status_badge(status: Option<&str>) -> Element {
	let status = status
		.filter(|s| !s.is_empty())
		.unwrap_or(DEFAULT_TRUST_STATUS);
	Element::new("span")
		.class("trust-status-badge")
		.class(&format!("trust-status-{}", status.to_lowercase()))
		.text(status)
}
