//! Calendar-month arithmetic over first-of-month dates.

use time::{Date, Duration, Month};

/// Truncates a date to the first day of its month.
pub fn first_of_month(date: Date) -> Date {
	date - Duration::days(i64::from(date.day()) - 1)
}

/// First day of the month following `month`. `None` past the representable range.
pub fn next_month(month: Date) -> Option<Date> {
	let (year, next) = match month.month() {
		Month::December => (month.year().checked_add(1)?, Month::January),
		current => (month.year(), current.next()),
	};

	Date::from_calendar_date(year, next, 1).ok()
}

/// Signed number of calendar months from `start`'s month to `end`'s month.
pub fn months_between(start: Date, end: Date) -> i64 {
	let years = i64::from(end.year()) - i64::from(start.year());
	let months = i64::from(u8::from(end.month())) - i64::from(u8::from(start.month()));

	years * 12 + months
}

/// Inclusive, ascending run of first-of-month dates.
#[derive(Clone, Debug)]
pub struct MonthRange {
	next: Option<Date>,
	last: Date,
}
impl MonthRange {
	/// Both bounds are truncated to their month. Empty when `last` precedes `first`.
	pub fn new(first: Date, last: Date) -> Self {
		let first = first_of_month(first);
		let last = first_of_month(last);

		Self { next: (first <= last).then_some(first), last }
	}
}
impl Iterator for MonthRange {
	type Item = Date;

	fn next(&mut self) -> Option<Self::Item> {
		let current = self.next?;

		self.next = next_month(current).filter(|month| *month <= self.last);

		Some(current)
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		match self.next {
			Some(next) => {
				let remaining = usize::try_from(months_between(next, self.last) + 1).unwrap_or(0);

				(remaining, Some(remaining))
			},
			None => (0, Some(0)),
		}
	}
}
