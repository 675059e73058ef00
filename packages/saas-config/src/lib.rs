mod error;
mod types;

pub use error::{Error, Result};
pub use types::{BRONZE_TABLES, Bronze, BronzeSource, Config, Postgres, Report, Service, Storage};

use std::{collections::HashSet, fs, path::Path};

// Postgres caps a statement at 65_535 bind parameters; the widest silver table has 9 columns.
const MAX_INSERT_BATCH_ROWS: u32 = 7_000;

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.log_level.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.log_level must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.insert_batch_rows == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.insert_batch_rows must be greater than zero.".to_string(),
		});
	}
	if cfg.storage.postgres.insert_batch_rows > MAX_INSERT_BATCH_ROWS {
		return Err(Error::Validation {
			message: format!(
				"storage.postgres.insert_batch_rows must be {MAX_INSERT_BATCH_ROWS} or less."
			),
		});
	}
	if cfg.bronze.inputs_dir.as_os_str().is_empty() {
		return Err(Error::Validation {
			message: "bronze.inputs_dir must be non-empty.".to_string(),
		});
	}

	let mut seen_tables = HashSet::new();

	for source in &cfg.bronze.sources {
		if source.file.trim().is_empty() {
			return Err(Error::Validation {
				message: "bronze.sources.file must be non-empty.".to_string(),
			});
		}
		if !BRONZE_TABLES.contains(&source.table.as_str()) {
			return Err(Error::Validation {
				message: format!(
					"bronze.sources.table must be one of {}; got {:?}.",
					BRONZE_TABLES.join(", "),
					source.table
				),
			});
		}
		if !seen_tables.insert(source.table.as_str()) {
			return Err(Error::Validation {
				message: format!("bronze.sources.table {:?} is listed more than once.", source.table),
			});
		}
	}

	if cfg.report.churn_window_months == 0 {
		return Err(Error::Validation {
			message: "report.churn_window_months must be greater than zero.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	cfg.service.log_level = cfg.service.log_level.trim().to_string();

	for source in &mut cfg.bronze.sources {
		source.file = source.file.trim().to_string();
		source.table = source.table.trim().to_ascii_lowercase();

		if let Some(stripped) = source.table.strip_prefix("bronze.") {
			source.table = stripped.to_string();
		}
	}
}
