//! Lenient conversion of raw bronze text into typed values.
//!
//! Every parser returns `None` for blank or malformed input instead of failing, so a bad cell nulls
//! out a single value and the row still flows through the batch.

use time::{
	Date, PrimitiveDateTime, Time,
	format_description::BorrowedFormatItem,
	macros::format_description,
};

const DASHED_DATE: &[BorrowedFormatItem<'_>] =
	format_description!("[year]-[month padding:none]-[day padding:none]");
const SLASHED_DATE: &[BorrowedFormatItem<'_>] =
	format_description!("[year]/[month padding:none]/[day padding:none]");
const CLOCK_SECONDS: &[BorrowedFormatItem<'_>] =
	format_description!("[hour padding:none]:[minute]:[second]");
const CLOCK_MINUTES: &[BorrowedFormatItem<'_>] = format_description!("[hour padding:none]:[minute]");
const TIMESTAMP_DISPLAY: &[BorrowedFormatItem<'_>] =
	format_description!("[year]-[month]-[day] [hour]:[minute]:[second]");

/// Parses `YYYY-MM-DD` or `YYYY/MM/DD`, ignoring any trailing time component.
pub fn parse_date(raw: Option<&str>) -> Option<Date> {
	let (date, _) = split_timestamp(raw?)?;

	parse_date_part(date)
}

/// Parses a date with an optional `HH:MM[:SS]` time separated by a space or `T`. Fractional
/// seconds and zone suffixes are dropped; a date alone maps to midnight.
pub fn parse_timestamp(raw: Option<&str>) -> Option<PrimitiveDateTime> {
	let (date, clock) = split_timestamp(raw?)?;
	let date = parse_date_part(date)?;
	let time = match clock {
		Some(clock) => parse_clock(clock)?,
		None => Time::MIDNIGHT,
	};

	Some(PrimitiveDateTime::new(date, time))
}

/// Parses a finite decimal number.
pub fn parse_number(raw: Option<&str>) -> Option<f64> {
	let trimmed = raw?.trim();

	if trimmed.is_empty() {
		return None;
	}

	trimmed.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Parses an integer, also accepting integral decimals such as `3.0`.
pub fn parse_integer(raw: Option<&str>) -> Option<i64> {
	let trimmed = raw?.trim();

	if let Ok(value) = trimmed.parse::<i64>() {
		return Some(value);
	}

	let value = parse_number(Some(trimmed))?;

	if value.fract() != 0.0 || value < i64::MIN as f64 || value >= i64::MAX as f64 {
		return None;
	}

	Some(value as i64)
}

/// Maps `true`/`false` in any letter case; everything else is unknown.
pub fn parse_bool(raw: Option<&str>) -> Option<bool> {
	match raw?.trim().to_ascii_lowercase().as_str() {
		"true" => Some(true),
		"false" => Some(false),
		_ => None,
	}
}

/// Trims a text cell, treating blank cells as missing.
pub fn clean_text(raw: Option<String>) -> Option<String> {
	let value = raw?;
	let trimmed = value.trim();

	if trimmed.is_empty() {
		return None;
	}
	if trimmed.len() == value.len() {
		return Some(value);
	}

	Some(trimmed.to_string())
}

/// Renders a timestamp as `YYYY-MM-DD HH:MM:SS`.
pub fn format_timestamp(value: PrimitiveDateTime) -> String {
	value.format(TIMESTAMP_DISPLAY).unwrap_or_else(|_| value.to_string())
}

fn split_timestamp(raw: &str) -> Option<(&str, Option<&str>)> {
	let trimmed = raw.trim();

	if trimmed.is_empty() {
		return None;
	}

	match trimmed.find([' ', 'T']) {
		Some(idx) => {
			let clock = trimmed[idx + 1..].trim();

			Some((&trimmed[..idx], (!clock.is_empty()).then_some(clock)))
		},
		None => Some((trimmed, None)),
	}
}

fn parse_date_part(date: &str) -> Option<Date> {
	Date::parse(date, DASHED_DATE).or_else(|_| Date::parse(date, SLASHED_DATE)).ok()
}

fn parse_clock(clock: &str) -> Option<Time> {
	let end = clock.find(|ch: char| !(ch.is_ascii_digit() || ch == ':')).unwrap_or(clock.len());
	let clock = &clock[..end];

	Time::parse(clock, CLOCK_SECONDS).or_else(|_| Time::parse(clock, CLOCK_MINUTES)).ok()
}
