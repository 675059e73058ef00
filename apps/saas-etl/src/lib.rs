use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use saas_pipeline::{Pipeline, Report, TableRows};
use saas_storage::db::Db;

#[derive(Debug, Parser)]
#[command(
	version = saas_cli::VERSION,
	rename_all = "kebab",
	styles = saas_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Pipeline step to run.
	#[arg(value_enum)]
	pub mode: Mode,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
	/// Load the configured CSV files into the bronze tables.
	Bronze,
	/// Rebuild silver tables from bronze and audit rule violations.
	Silver,
	/// Rebuild the gold metric tables and the dashboard from silver.
	Gold,
	/// Silver, then gold.
	All,
	/// Print the dashboard summary and audit counts.
	Report,
}

#[derive(Debug, Serialize)]
struct RunOutput {
	mode: &'static str,
	tables: Vec<TableOutput>,
}

#[derive(Debug, Serialize)]
struct TableOutput {
	table: &'static str,
	rows: u64,
	rejected: u64,
}
impl From<TableRows> for TableOutput {
	fn from(entry: TableRows) -> Self {
		Self { table: entry.table, rows: entry.rows, rejected: entry.rejected }
	}
}

#[derive(Debug, Serialize)]
struct ReportOutput {
	summary: Option<SummaryOutput>,
	rejected: Vec<RejectedOutput>,
}

#[derive(Debug, Serialize)]
struct SummaryOutput {
	month: String,
	mrr: f64,
	active_customers: Option<i64>,
	avg_churn_rate: Option<f64>,
	churn_window_months: usize,
	dau_mau_ratio: Option<f64>,
}

#[derive(Debug, Serialize)]
struct RejectedOutput {
	table_name: String,
	rule_name: String,
	rows: i64,
}

impl Mode {
	fn as_str(self) -> &'static str {
		match self {
			Self::Bronze => "bronze",
			Self::Silver => "silver",
			Self::Gold => "gold",
			Self::All => "all",
			Self::Report => "report",
		}
	}
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = saas_config::load(&args.config)?;

	init_tracing(&config)?;

	let db = Db::connect(&config.storage.postgres).await?;

	db.ensure_schema().await?;

	let pipeline = Pipeline::new(config, db);
	let result = run_mode(&pipeline, args.mode).await;

	pipeline.close().await;

	let json = result?;

	println!("{json}");

	Ok(())
}

async fn run_mode(pipeline: &Pipeline, mode: Mode) -> color_eyre::Result<String> {
	tracing::info!(mode = mode.as_str(), "Pipeline run started.");

	let tables = match mode {
		Mode::Bronze => pipeline.load_bronze().await?,
		Mode::Silver => pipeline.run_silver().await?,
		Mode::Gold => pipeline.run_gold().await?,
		Mode::All => pipeline.run_all().await?,
		Mode::Report => {
			let report = pipeline.report().await?;

			return Ok(serde_json::to_string_pretty(&report_output(report))?);
		},
	};

	tracing::info!(mode = mode.as_str(), tables = tables.len(), "Pipeline run finished.");

	let output = RunOutput {
		mode: mode.as_str(),
		tables: tables.into_iter().map(TableOutput::from).collect(),
	};

	Ok(serde_json::to_string_pretty(&output)?)
}

fn report_output(report: Report) -> ReportOutput {
	ReportOutput {
		summary: report.summary.map(|summary| SummaryOutput {
			month: summary.month.to_string(),
			mrr: summary.mrr,
			active_customers: summary.active_customers,
			avg_churn_rate: summary.avg_churn_rate,
			churn_window_months: summary.churn_window_months,
			dau_mau_ratio: summary.dau_mau_ratio,
		}),
		rejected: report
			.rejected
			.into_iter()
			.map(|count| RejectedOutput {
				table_name: count.table_name,
				rule_name: count.rule_name,
				rows: count.rows,
			})
			.collect(),
	}
}

fn init_tracing(config: &saas_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

	Ok(())
}
