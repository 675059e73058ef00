use std::path::PathBuf;

use clap::{CommandFactory, Parser, error::ErrorKind};

use saas_etl::{Args, Mode};

#[test]
fn cli_definition_is_consistent() {
	Args::command().debug_assert();
}

#[test]
fn parses_every_mode() {
	for (raw, mode) in [
		("bronze", Mode::Bronze),
		("silver", Mode::Silver),
		("gold", Mode::Gold),
		("all", Mode::All),
		("report", Mode::Report),
	] {
		let args = Args::try_parse_from(["saas-etl", "--config", "saas.toml", raw])
			.expect("Mode should parse.");

		assert_eq!(args.mode, mode);
		assert_eq!(args.config, PathBuf::from("saas.toml"));
	}
}

#[test]
fn short_config_flag_is_accepted() {
	let args = Args::try_parse_from(["saas-etl", "gold", "-c", "cfg/saas.toml"])
		.expect("Short flag should parse.");

	assert_eq!(args.mode, Mode::Gold);
	assert_eq!(args.config, PathBuf::from("cfg/saas.toml"));
}

#[test]
fn unknown_mode_is_rejected() {
	let err = Args::try_parse_from(["saas-etl", "--config", "saas.toml", "platinum"])
		.expect_err("Unknown mode should fail.");

	assert_eq!(err.kind(), ErrorKind::InvalidValue);
}

#[test]
fn missing_mode_is_rejected() {
	let err = Args::try_parse_from(["saas-etl", "--config", "saas.toml"])
		.expect_err("Missing mode should fail.");

	assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}

#[test]
fn missing_config_is_rejected() {
	let err = Args::try_parse_from(["saas-etl", "all"]).expect_err("Missing config should fail.");

	assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
}
