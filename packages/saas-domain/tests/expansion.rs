use time::{Date, macros::date};

use saas_domain::{
	ActivityInterval, MonthlyActivity, expand_monthly,
	month::{months_between, next_month},
};

fn interval(entity_id: &str, start: Option<Date>, end: Option<Date>) -> ActivityInterval {
	ActivityInterval { entity_id: entity_id.to_string(), start, end, value: () }
}

fn months_of(records: &[MonthlyActivity]) -> Vec<Date> {
	records.iter().map(|record| record.month).collect()
}

#[test]
fn closed_interval_covers_every_month_inclusive() {
	let records = expand_monthly([interval(
		"c1",
		Some(date!(2024 - 01 - 15)),
		Some(date!(2024 - 03 - 02)),
	)])
	.collect::<Vec<_>>();

	assert_eq!(
		months_of(&records),
		vec![date!(2024 - 01 - 01), date!(2024 - 02 - 01), date!(2024 - 03 - 01)]
	);
	assert!(records.iter().all(|record| record.entity_id == "c1"));
}

#[test]
fn month_count_matches_calendar_distance() {
	let cases = [
		(date!(2023 - 01 - 31), date!(2023 - 01 - 31)),
		(date!(2023 - 01 - 31), date!(2023 - 02 - 01)),
		(date!(2022 - 11 - 15), date!(2024 - 02 - 29)),
		(date!(2020 - 02 - 29), date!(2021 - 02 - 28)),
	];

	for (start, end) in cases {
		let records = expand_monthly([interval("s", Some(start), Some(end))]).collect::<Vec<_>>();
		let months = months_of(&records);

		assert_eq!(records.len() as i64, months_between(start, end) + 1, "{start} to {end}");

		for pair in months.windows(2) {
			assert_eq!(next_month(pair[0]), Some(pair[1]), "Months must be consecutive.");
		}
	}
}

#[test]
fn open_interval_expands_to_start_month_only() {
	let records =
		expand_monthly([interval("c1", Some(date!(2024 - 05 - 20)), None)]).collect::<Vec<_>>();

	assert_eq!(months_of(&records), vec![date!(2024 - 05 - 01)]);
}

#[test]
fn missing_start_is_dropped() {
	let records = expand_monthly([
		interval("c1", None, Some(date!(2024 - 05 - 20))),
		interval("c2", None, None),
	])
	.count();

	assert_eq!(records, 0);
}

#[test]
fn end_before_start_month_expands_to_nothing() {
	let records = expand_monthly([interval(
		"c1",
		Some(date!(2024 - 05 - 20)),
		Some(date!(2024 - 04 - 30)),
	)])
	.count();

	assert_eq!(records, 0);
}

#[test]
fn end_earlier_in_same_month_still_counts_that_month() {
	let records = expand_monthly([interval(
		"c1",
		Some(date!(2024 - 05 - 20)),
		Some(date!(2024 - 05 - 02)),
	)])
	.collect::<Vec<_>>();

	assert_eq!(months_of(&records), vec![date!(2024 - 05 - 01)]);
}

#[test]
fn value_is_carried_to_every_month() {
	let records = expand_monthly([ActivityInterval {
		entity_id: "s1".to_string(),
		start: Some(date!(2023 - 12 - 01)),
		end: Some(date!(2024 - 01 - 31)),
		value: Some(49.5),
	}])
	.collect::<Vec<_>>();

	assert_eq!(
		records,
		vec![
			MonthlyActivity {
				entity_id: "s1".to_string(),
				month: date!(2023 - 12 - 01),
				value: Some(49.5),
			},
			MonthlyActivity {
				entity_id: "s1".to_string(),
				month: date!(2024 - 01 - 01),
				value: Some(49.5),
			},
		]
	);
}

#[test]
fn expansion_is_lazy_over_many_intervals() {
	let intervals = (0..1_000).map(|idx| interval(&format!("c{idx}"), Some(date!(2024 - 01 - 01)), None));
	let mut records = expand_monthly(intervals);

	assert_eq!(records.next().map(|record| record.entity_id), Some("c0".to_string()));
	assert_eq!(records.count(), 999);
}
