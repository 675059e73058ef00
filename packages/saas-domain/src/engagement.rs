use std::collections::{BTreeMap, HashSet};

use time::Date;

use crate::{month::first_of_month, ratio::ratio};

/// A usage event that already passed the `event_count > 0` filter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageActivity {
	pub user_id: Option<String>,
	pub event_date: Option<Date>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DauMauMonthly {
	pub month: Date,
	/// Mean distinct users per day, over the days of the month that have events.
	pub dau: f64,
	pub mau: i64,
	pub dau_mau_ratio: Option<f64>,
}

#[derive(Default)]
struct MonthUsers<'a> {
	daily_counts: Vec<usize>,
	users: HashSet<&'a str>,
}

/// Builds DAU, MAU and their ratio for every month with at least one dated event.
///
/// Events without a date are ignored. An event without a user still marks its day as active, so a
/// day whose events all lack a user counts zero users and a month made only of such days has
/// `mau = 0` and no ratio.
pub fn build_dau_mau_monthly<I>(events: I) -> Vec<DauMauMonthly>
where
	I: IntoIterator<Item = UsageActivity>,
{
	let mut daily: BTreeMap<Date, HashSet<String>> = BTreeMap::new();

	for event in events {
		let Some(day) = event.event_date else {
			continue;
		};
		let users = daily.entry(day).or_default();

		if let Some(user_id) = event.user_id {
			users.insert(user_id);
		}
	}

	let mut monthly: BTreeMap<Date, MonthUsers<'_>> = BTreeMap::new();

	for (day, users) in &daily {
		let month = monthly.entry(first_of_month(*day)).or_default();

		month.daily_counts.push(users.len());
		month.users.extend(users.iter().map(String::as_str));
	}

	monthly
		.into_iter()
		.map(|(month, users)| {
			let active_days = users.daily_counts.len() as f64;
			let dau = users.daily_counts.iter().sum::<usize>() as f64 / active_days;
			let mau = users.users.len() as i64;

			DauMauMonthly { month, dau, mau, dau_mau_ratio: ratio(dau, mau as f64) }
		})
		.collect()
}
