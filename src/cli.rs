use chrono::NaiveDate;
use clap::Parser;
use std::time::Duration;
use tracing::level_filters::LevelFilter;

use era_calc::{OutputFormat, SummaryConfig};

#[derive(Parser, Debug)]
#[command(name = "era-calc")]
#[command(about = "Childhood, teenage and young adult years for a birth date", long_about = None)]
pub struct Cli {
    /// Date of birth (YYYY-MM-DD)
    #[arg(long)]
    pub dob: Option<NaiveDate>,

    /// Age in whole years, counted back from today
    #[arg(long)]
    pub age: Option<i64>,

    /// Country of upbringing, used only in the summary prompt
    #[arg(short, long)]
    pub country: Option<String>,

    /// Skip the cultural summary
    #[arg(long)]
    pub no_summary: bool,

    /// Print a placeholder share id
    #[arg(long)]
    pub share: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// API key for the summary service
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Base URL of the OpenAI-compatible API
    #[arg(long, env = "OPENAI_API_BASE", default_value = "https://api.openai.com/v1")]
    pub api_base: String,

    /// Chat model used for the summary
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-3.5-turbo")]
    pub model: String,

    #[arg(long, default_value_t = 0.7)]
    pub temperature: f32,

    #[arg(long, default_value_t = 600)]
    pub max_tokens: u32,

    /// Timeout for the summary request, in seconds
    #[arg(long, default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, env = "LOG_LEVEL", default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    pub fn summary_config(&self) -> SummaryConfig {
        SummaryConfig {
            api_key: self.api_key.clone(),
            api_base: self.api_base.clone(),
            model: self.model.clone(),
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            timeout: Duration::from_secs(self.timeout_secs),
        }
    }

    pub fn level_filter(&self) -> LevelFilter {
        self.log_level.parse().unwrap_or(LevelFilter::WARN)
    }

    /// Logs go to stderr so stdout only carries the report.
    pub fn init_logging(&self) {
        tracing_subscriber::fmt()
            .with_max_level(self.level_filter())
            .with_writer(std::io::stderr)
            .with_target(false)
            .init();
    }
}
