use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = saas_etl::Args::parse();

	saas_etl::run(args).await
}
