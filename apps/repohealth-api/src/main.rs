use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = repohealth_api::Args::parse();
	repohealth_api::run(args).await
}
