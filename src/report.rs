use chrono::NaiveDate;
use serde::Serialize;

use crate::birth::BirthDate;
use crate::classify::{Generation, ZodiacSign, zodiac_sign};
use crate::periods::{LifeStage, compute_periods};

const MIN_ALIGN_WIDTH: usize = 44;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned plain-text rows
    #[default]
    Text,
    /// Markdown sections
    Markdown,
    /// Single JSON document
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PeriodRow {
    pub stage: LifeStage,
    pub label: &'static str,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub start_year: i32,
    pub end_year: i32,
    pub decade: String,
}

/// Everything computed for one birth date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    pub birth_date: BirthDate,
    pub periods: Vec<PeriodRow>,
    pub star_sign: ZodiacSign,
    pub generation: Generation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub share_id: Option<String>,
}

impl Report {
    pub fn new(birth: BirthDate) -> Self {
        let periods = compute_periods(birth)
            .iter()
            .map(|p| PeriodRow {
                stage: p.stage,
                label: p.stage.label(),
                start: p.start,
                end: p.end,
                start_year: p.start_year(),
                end_year: p.end_year(),
                decade: p.decade_label(),
            })
            .collect();

        Self {
            birth_date: birth,
            periods,
            star_sign: zodiac_sign(birth.date()),
            generation: Generation::from_birth_year(birth.year()),
            country: None,
            summary: None,
            share_id: None,
        }
    }

    pub fn with_country(mut self, country: Option<&str>) -> Self {
        self.country = country
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string);
        self
    }

    pub fn with_summary(mut self, summary: String) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_share_id(mut self, share_id: String) -> Self {
        self.share_id = Some(share_id);
        self
    }

    pub fn render(&self, format: OutputFormat) -> Result<String, serde_json::Error> {
        match format {
            OutputFormat::Text => Ok(render_text(self)),
            OutputFormat::Markdown => Ok(render_markdown(self)),
            OutputFormat::Json => serde_json::to_string_pretty(self),
        }
    }
}

/// Placeholder share identifier. Not stored anywhere and not unique across
/// two requests in the same second.
pub fn share_id(birth: BirthDate, unix_timestamp: i64) -> String {
    format!(
        "unique-id-{}-{}-{}-{unix_timestamp}",
        birth.year(),
        birth.month(),
        birth.day()
    )
}

fn period_value(row: &PeriodRow) -> String {
    format!("{} – {} ({})", row.start_year, row.end_year, row.decade)
}

pub fn render_markdown(report: &Report) -> String {
    let mut out = String::from("## Results\n\n");

    for row in &report.periods {
        out.push_str(&format!("**{}:** {}\n\n", row.label, period_value(row)));
    }
    out.push_str(&format!("**Star sign:** {}\n\n", report.star_sign));
    out.push_str(&format!("**Generation:** {}\n", report.generation));

    if let Some(summary) = &report.summary {
        out.push_str("\n---\n\n## Cultural Snapshot\n\n");
        out.push_str(summary);
        out.push('\n');
    }

    if let Some(id) = &report.share_id {
        out.push_str("\n---\n\n## Share this link\n\n");
        out.push_str(&format!("Share ID: `{id}`\n"));
    }

    out
}

pub fn render_text(report: &Report) -> String {
    let mut rows: Vec<(String, String)> =
        vec![("Born".to_string(), report.birth_date.to_string())];
    if let Some(country) = &report.country {
        rows.push(("Country".to_string(), country.clone()));
    }
    for row in &report.periods {
        rows.push((row.label.to_string(), period_value(row)));
    }
    rows.push(("Star sign".to_string(), report.star_sign.to_string()));
    rows.push(("Generation".to_string(), report.generation.to_string()));
    if let Some(id) = &report.share_id {
        rows.push(("Share ID".to_string(), id.clone()));
    }

    let align_width = rows
        .iter()
        .map(|(k, v)| k.len() + 2 + v.chars().count() + 3)
        .max()
        .unwrap_or(0)
        .max(MIN_ALIGN_WIDTH);

    let mut out = String::new();
    out.push_str(&build_header_line("Results", align_width));
    out.push('\n');
    for (key, value) in &rows {
        let (key_part, dots, value) = build_row(key, value, align_width);
        out.push_str(&format!("{key_part}{dots}{value}\n"));
    }

    if let Some(summary) = &report.summary {
        out.push('\n');
        out.push_str(&build_header_line("Cultural Snapshot", align_width));
        out.push('\n');
        out.push_str(summary);
        out.push('\n');
    }

    out
}

/// Pads `key: ` and `value` with dots so every row ends at `align_width`.
pub fn build_row(key: &str, value: &str, align_width: usize) -> (String, String, String) {
    let key_part = format!("{key}: ");
    let base_len = key_part.len() + value.chars().count();
    let available = align_width.saturating_sub(base_len);

    let dots = match available {
        0 => "".to_string(),
        1 => " ".to_string(),
        2 => ". ".to_string(),
        n => format!("{} ", ".".repeat(n - 1)),
    };

    (key_part, dots, value.to_string())
}

fn build_header_line(label: &str, align_width: usize) -> String {
    let base = format!("{label} ");
    let dash_count = align_width.saturating_sub(base.len());
    format!("{base}{}", "-".repeat(dash_count))
}
