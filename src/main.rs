mod cli;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use cli::Cli;
use era_calc::report::{Report, share_id};
use era_calc::{SummaryGenerator, SummaryRequest, compute_periods, resolve_today};
use tracing::{debug, info};

#[tokio::main]
async fn main() -> Result<()> {
    // .env is optional
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    cli.init_logging();

    let birth = resolve_today(cli.dob, cli.age)?;
    info!(%birth, "resolved birth date");

    let mut report = Report::new(birth).with_country(cli.country.as_deref());

    if !cli.no_summary {
        let generator = SummaryGenerator::from_config(&cli.summary_config());
        let request = SummaryRequest::from_periods(&compute_periods(birth), cli.country.as_deref());
        debug!(country = %request.country, "generating cultural summary");
        report = report.with_summary(generator.generate(&request).await);
    }

    if cli.share {
        report = report.with_share_id(share_id(birth, Utc::now().timestamp()));
    }

    let output = report
        .render(cli.format)
        .context("Failed to render report")?;
    print!("{output}");

    Ok(())
}
