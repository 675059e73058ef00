use std::{
	env, fs,
	path::PathBuf,
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

use toml::Value;

use saas_config::{BRONZE_TABLES, Config, Error};

const SAMPLE_CONFIG_TEMPLATE_TOML: &str = include_str!("fixtures/sample_config.template.toml");

fn sample_value() -> Value {
	toml::from_str(SAMPLE_CONFIG_TEMPLATE_TOML).expect("Failed to parse template config.")
}

fn render(value: &Value) -> String {
	toml::to_string(value).expect("Failed to render template config.")
}

fn with_postgres(key: &str, replacement: Value) -> String {
	let mut value = sample_value();
	let postgres = value
		.get_mut("storage")
		.and_then(Value::as_table_mut)
		.and_then(|storage| storage.get_mut("postgres"))
		.and_then(Value::as_table_mut)
		.expect("Template config must include [storage.postgres].");

	postgres.insert(key.to_string(), replacement);

	render(&value)
}

fn without_section(section: &str) -> String {
	let mut value = sample_value();
	let root = value.as_table_mut().expect("Template config must be a table.");

	root.remove(section);

	render(&value)
}

fn write_temp_config(payload: String) -> PathBuf {
	static COUNTER: AtomicU64 = AtomicU64::new(0);

	let nanos = SystemTime::now()
		.duration_since(UNIX_EPOCH)
		.expect("System time must be valid.")
		.as_nanos();
	let ordinal = COUNTER.fetch_add(1, Ordering::SeqCst);
	let pid = std::process::id();
	let mut path = env::temp_dir();

	path.push(format!("saas_config_test_{nanos}_{pid}_{ordinal}.toml"));

	fs::write(&path, payload).expect("Failed to write test config.");

	path
}

fn load_payload(payload: String) -> saas_config::Result<Config> {
	let path = write_temp_config(payload);
	let result = saas_config::load(&path);

	fs::remove_file(&path).expect("Failed to remove test config.");

	result
}

fn expect_validation_message(payload: String, expected: &str) {
	let err = load_payload(payload).expect_err("Expected validation error.");
	let message = err.to_string();

	assert!(matches!(err, Error::Validation { .. }), "Unexpected error kind: {err:?}");
	assert!(message.contains(expected), "Unexpected error message: {message}");
}

#[test]
fn sample_config_loads() {
	let cfg = load_payload(render(&sample_value())).expect("Sample config must load.");

	assert_eq!(cfg.service.log_level, "info");
	assert_eq!(cfg.storage.postgres.pool_max_conns, 4);
	assert_eq!(cfg.bronze.sources.len(), 5);
	assert_eq!(cfg.report.churn_window_months, 3);
}

#[test]
fn optional_sections_fall_back_to_defaults() {
	let mut value: Value = toml::from_str(&without_section("bronze")).expect("Valid TOML.");
	let root = value.as_table_mut().expect("Template config must be a table.");

	root.remove("report");

	let cfg = load_payload(render(&value)).expect("Config without optional sections must load.");
	let tables = cfg.bronze.sources.iter().map(|source| source.table.as_str()).collect::<Vec<_>>();

	assert_eq!(tables, BRONZE_TABLES.to_vec());
	assert_eq!(cfg.bronze.sources[0].file, "saas_bronze_raw_data-customers.csv");
	assert_eq!(cfg.bronze.inputs_dir, PathBuf::from("bronze_inputs"));
	assert_eq!(cfg.report.churn_window_months, 3);
	assert_eq!(cfg.storage.postgres.insert_batch_rows, 1_000);
}

#[test]
fn missing_service_section_is_a_parse_error() {
	let err = load_payload(without_section("service")).expect_err("Expected parse error.");

	assert!(matches!(err, Error::ParseConfig { .. }), "Unexpected error kind: {err:?}");
}

#[test]
fn missing_file_is_a_read_error() {
	let path = env::temp_dir().join("saas_config_test_missing_file.toml");
	let err = saas_config::load(&path).expect_err("Expected read error.");

	assert!(matches!(err, Error::ReadConfig { .. }), "Unexpected error kind: {err:?}");
}

#[test]
fn dsn_must_be_non_empty() {
	expect_validation_message(
		with_postgres("dsn", Value::String("  ".to_string())),
		"storage.postgres.dsn must be non-empty.",
	);
}

#[test]
fn pool_max_conns_must_be_positive() {
	expect_validation_message(
		with_postgres("pool_max_conns", Value::Integer(0)),
		"storage.postgres.pool_max_conns must be greater than zero.",
	);
}

#[test]
fn insert_batch_rows_is_bounded() {
	expect_validation_message(
		with_postgres("insert_batch_rows", Value::Integer(0)),
		"storage.postgres.insert_batch_rows must be greater than zero.",
	);
	expect_validation_message(
		with_postgres("insert_batch_rows", Value::Integer(100_000)),
		"storage.postgres.insert_batch_rows must be 7000 or less.",
	);
}

#[test]
fn log_level_is_trimmed_and_required() {
	let mut value = sample_value();
	let service = value
		.get_mut("service")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [service].");

	service.insert("log_level".to_string(), Value::String("   ".to_string()));

	expect_validation_message(render(&value), "service.log_level must be non-empty.");
}

#[test]
fn bronze_source_table_must_be_known() {
	let mut value = sample_value();
	let sources = value
		.get_mut("bronze")
		.and_then(Value::as_table_mut)
		.and_then(|bronze| bronze.get_mut("sources"))
		.and_then(Value::as_array_mut)
		.expect("Template config must include [[bronze.sources]].");
	let first = sources[0].as_table_mut().expect("Source must be a table.");

	first.insert("table".to_string(), Value::String("invoices".to_string()));

	expect_validation_message(render(&value), "bronze.sources.table must be one of");
}

#[test]
fn bronze_source_table_prefix_is_normalized() {
	let mut value = sample_value();
	let sources = value
		.get_mut("bronze")
		.and_then(Value::as_table_mut)
		.and_then(|bronze| bronze.get_mut("sources"))
		.and_then(Value::as_array_mut)
		.expect("Template config must include [[bronze.sources]].");
	let first = sources[0].as_table_mut().expect("Source must be a table.");

	first.insert("table".to_string(), Value::String(" Bronze.Customers ".to_string()));

	let cfg = load_payload(render(&value)).expect("Prefixed table name must load.");

	assert_eq!(cfg.bronze.sources[0].table, "customers");
}

#[test]
fn bronze_source_tables_must_be_unique() {
	let mut value = sample_value();
	let sources = value
		.get_mut("bronze")
		.and_then(Value::as_table_mut)
		.and_then(|bronze| bronze.get_mut("sources"))
		.and_then(Value::as_array_mut)
		.expect("Template config must include [[bronze.sources]].");
	let duplicate = sources[0].clone();

	sources.push(duplicate);

	expect_validation_message(render(&value), "is listed more than once.");
}

#[test]
fn churn_window_must_be_positive() {
	let mut value = sample_value();
	let report = value
		.get_mut("report")
		.and_then(Value::as_table_mut)
		.expect("Template config must include [report].");

	report.insert("churn_window_months".to_string(), Value::Integer(0));

	expect_validation_message(render(&value), "report.churn_window_months must be greater than zero.");
}
