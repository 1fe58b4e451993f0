//! Subcommand implementations
//!
//! Each command returns a [`CommandOutput`] holding both the human-readable
//! text and the JSON record, so `main` only decides which one to print.

use crate::config::{parse_weekend, ToolboxConfig};
use anyhow::Context;
use barcode_core::{BarcodeSettings, ImageFormat, Symbology};
use calc_core::{scientific, AreaUnit, ChangeType, TemperatureUnit};
use pdfrotate_core::{PageInfo, PdfInfo, Rotation};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

pub struct CommandOutput {
    pub text: String,
    pub json: serde_json::Value,
}

impl CommandOutput {
    fn new<T: Serialize>(text: String, record: &T) -> anyhow::Result<Self> {
        Ok(Self {
            text,
            json: serde_json::to_value(record).context("Failed to serialize result")?,
        })
    }

    pub fn render(&self, json: bool) -> anyhow::Result<String> {
        if json {
            serde_json::to_string_pretty(&self.json).context("Failed to serialize result")
        } else {
            Ok(self.text.clone())
        }
    }
}

#[derive(Debug, Serialize)]
struct RotateReport {
    input: PathBuf,
    output: PathBuf,
    pages: Vec<u32>,
    degrees: i64,
    size_bytes: usize,
}

/// Rotate `pages` (all when `None`) by `degrees` and write the result
pub fn rotate(
    input: &Path,
    output: Option<&Path>,
    pages: Option<&str>,
    degrees: i64,
    config: &ToolboxConfig,
) -> anyhow::Result<CommandOutput> {
    let bytes =
        fs::read(input).with_context(|| format!("Failed to read PDF: {}", input.display()))?;

    let rotation = Rotation::from_degrees(degrees)?;
    let page_count = pdfrotate_core::get_page_count(&bytes)?;
    let pages = match pages {
        Some(ranges) => pdfrotate_core::parse_ranges_for(ranges, page_count)?,
        None => (1..=page_count).collect(),
    };

    let result = pdfrotate_core::rotate_pages(&bytes, &pages, rotation)?;

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => {
            let stem = input
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("document");
            let parent = input.parent().unwrap_or_else(|| Path::new("."));
            config
                .output
                .resolve(&format!("{}-rotated.pdf", stem), parent)
        }
    };
    fs::write(&output, &result)
        .with_context(|| format!("Failed to write PDF: {}", output.display()))?;

    tracing::info!(
        pages = pages.len(),
        degrees = rotation.degrees(),
        "wrote {}",
        output.display()
    );

    let text = format!(
        "Rotated {} of {} page(s) by {}° -> {}",
        pages.len(),
        page_count,
        rotation.degrees(),
        output.display()
    );
    CommandOutput::new(
        text,
        &RotateReport {
            input: input.to_path_buf(),
            output,
            pages,
            degrees: rotation.degrees(),
            size_bytes: result.len(),
        },
    )
}

#[derive(Debug, Serialize)]
struct PdfReport {
    #[serde(flatten)]
    info: PdfInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    pages: Option<Vec<PageInfo>>,
}

pub fn pdf_info(input: &Path, with_pages: bool) -> anyhow::Result<CommandOutput> {
    let bytes =
        fs::read(input).with_context(|| format!("Failed to read PDF: {}", input.display()))?;
    let info = pdfrotate_core::validate_pdf(&bytes)?;

    let mut text = format!(
        "{}\n  Version:   {}\n  Pages:     {}\n  Size:      {} bytes\n  Encrypted: {}",
        input.display(),
        info.version,
        info.page_count,
        info.size_bytes,
        if info.encrypted { "yes" } else { "no" }
    );
    if let Some(title) = &info.title {
        text.push_str(&format!("\n  Title:     {}", title));
    }
    if let Some(author) = &info.author {
        text.push_str(&format!("\n  Author:    {}", author));
    }

    let pages = if with_pages {
        let doc = lopdf_load(&bytes)?;
        let pages = PageInfo::all_from_document(&doc)?;
        for page in &pages {
            text.push_str(&format!(
                "\n  Page {:>3}: {:.0} x {:.0} pt, {}°, {:?}",
                page.page_num,
                page.width,
                page.height,
                page.rotation.degrees(),
                page.orientation
            ));
        }
        Some(pages)
    } else {
        None
    };

    CommandOutput::new(text, &PdfReport { info, pages })
}

fn lopdf_load(bytes: &[u8]) -> anyhow::Result<lopdf::Document> {
    lopdf::Document::load_mem(bytes).context("Failed to parse PDF")
}

/// Overrides from the command line on top of the configured defaults
#[derive(Debug, Default, Clone)]
pub struct BarcodeOverrides {
    pub format: Option<Symbology>,
    pub module_width: Option<u32>,
    pub height: Option<u32>,
    pub hide_text: bool,
    pub line_color: Option<String>,
    pub background: Option<String>,
}

impl BarcodeOverrides {
    pub fn apply(&self, content: &str, config: &ToolboxConfig) -> BarcodeSettings {
        let mut settings = config.barcode.settings_for(content);
        if let Some(format) = self.format {
            settings.format = format;
        }
        if let Some(width) = self.module_width {
            settings.module_width = width;
        }
        if let Some(height) = self.height {
            settings.height = height;
        }
        if self.hide_text {
            settings.display_value = false;
        }
        if let Some(color) = &self.line_color {
            settings.line_color = color.clone();
        }
        if let Some(color) = &self.background {
            settings.background = color.clone();
        }
        settings
    }
}

#[derive(Debug, Serialize)]
struct BarcodeReport {
    content: String,
    format: Symbology,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data_url: Option<String>,
}

fn image_format_for(path: &Path) -> anyhow::Result<ImageFormat> {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => Ok(ImageFormat::Png),
        Some("svg") => Ok(ImageFormat::Svg),
        _ => anyhow::bail!("Output must end in .png or .svg: {}", path.display()),
    }
}

/// Write a barcode image, or print it as a data URL when `output` is `None`
pub fn barcode(
    content: &str,
    output: Option<&Path>,
    data_url_format: ImageFormat,
    overrides: &BarcodeOverrides,
    config: &ToolboxConfig,
) -> anyhow::Result<CommandOutput> {
    let settings = overrides.apply(content, config);
    let text = barcode_core::validate(content, settings.format)?;

    let (output, data_url) = match output {
        Some(path) => {
            let bytes = match image_format_for(path)? {
                ImageFormat::Png => barcode_core::render_png(&settings)?,
                ImageFormat::Svg => barcode_core::render_svg(&settings)?.into_bytes(),
            };
            let path = if path.is_relative() && path.parent() == Some(Path::new("")) {
                config.output.resolve(&path.to_string_lossy(), Path::new("."))
            } else {
                path.to_path_buf()
            };
            fs::write(&path, bytes)
                .with_context(|| format!("Failed to write image: {}", path.display()))?;
            tracing::info!(format = %settings.format, "wrote {}", path.display());
            (Some(path), None)
        }
        None => (
            None,
            Some(barcode_core::to_data_url(&settings, data_url_format)?),
        ),
    };

    let summary = match (&output, &data_url) {
        (Some(path), _) => format!("{} {} -> {}", settings.format, text, path.display()),
        (None, Some(url)) => url.clone(),
        (None, None) => text.clone(),
    };

    CommandOutput::new(
        summary,
        &BarcodeReport {
            content: content.to_string(),
            format: settings.format,
            text,
            output,
            data_url,
        },
    )
}

pub fn prime(number: u64) -> anyhow::Result<CommandOutput> {
    let analysis = calc_core::analyze(number)?;
    let factorization = calc_core::prime::format_factorization(&analysis.prime_factors);

    let mut text = if analysis.is_prime {
        format!("{} is prime", number)
    } else {
        format!("{} is not prime", number)
    };
    if !factorization.is_empty() {
        text.push_str(&format!("\n  Factorization: {}", factorization));
    }
    text.push_str(&format!(
        "\n  Divisors ({}): {}",
        analysis.factors.len(),
        analysis
            .factors
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    ));
    text.push_str(&format!("\n  Square root: {:.4}", analysis.square_root));

    CommandOutput::new(text, &analysis)
}

pub fn percent(original: f64, new: f64) -> anyhow::Result<CommandOutput> {
    let change = calc_core::percentage_change(original, new)?;

    let text = match (change.signed_percentage, change.change_type) {
        (None, _) => format!(
            "{} -> {}: change from zero is undefined (absolute change {})",
            original, new, change.absolute_change
        ),
        (Some(_), ChangeType::NoChange) => format!("{} -> {}: no change", original, new),
        (Some(signed), kind) => format!(
            "{} -> {}: {:+.2}% ({}, absolute change {})",
            original,
            new,
            signed,
            if kind == ChangeType::Increase {
                "increase"
            } else {
                "decrease"
            },
            change.absolute_change
        ),
    };

    CommandOutput::new(text, &change)
}

/// `percent`% of `value`
pub fn percent_of(percent: f64, value: f64) -> anyhow::Result<CommandOutput> {
    let result = calc_core::percentage::percent_of(percent, value)?;
    CommandOutput::new(
        format!("{}% of {} = {}", percent, value, result),
        &serde_json::json!({ "percent": percent, "value": value, "result": result }),
    )
}

/// `part` as a percentage of `whole`
pub fn percent_ratio(part: f64, whole: f64) -> anyhow::Result<CommandOutput> {
    let result = calc_core::percentage::percent_ratio(part, whole)?;
    CommandOutput::new(
        format!("{} is {:.2}% of {}", part, result, whole),
        &serde_json::json!({ "part": part, "whole": whole, "percent": result }),
    )
}

/// `value` raised (or lowered, for a negative `percent`) by `percent`%
pub fn percent_apply(value: f64, percent: f64) -> anyhow::Result<CommandOutput> {
    let result = calc_core::percentage::apply_percentage(value, percent)?;
    CommandOutput::new(
        format!("{} {:+}% = {}", value, percent, result),
        &serde_json::json!({ "value": value, "percent": percent, "result": result }),
    )
}

pub fn scientific(input: &str, precision: usize) -> anyhow::Result<CommandOutput> {
    let value = calc_core::parse_notation(input)?;
    let result = scientific::convert(value, precision)?;

    let text = format!(
        "{}\n  Scientific:  {}\n  E notation:  {}\n  Engineering: {}",
        input.trim(),
        result.scientific_text,
        result.e_notation,
        result.engineering_text
    );
    CommandOutput::new(text, &result)
}

pub fn temperature(value: f64, from: &str, to: Option<&str>) -> anyhow::Result<CommandOutput> {
    let from: TemperatureUnit = from.parse()?;
    match to {
        Some(to) => {
            let to: TemperatureUnit = to.parse()?;
            let result = calc_core::convert_temperature(value, from, to)?;
            let text = format!("{} {} = {:.2} {}", value, from, result, to);
            CommandOutput::new(
                text,
                &serde_json::json!({ "value": value, "from": from, "to": to, "result": result }),
            )
        }
        None => {
            let table = calc_core::convert_temperature_all(value, from)?;
            let text = format!(
                "{} {}\n  {:.2} °C\n  {:.2} °F\n  {:.2} K\n  {:.2} °R",
                value, from, table.celsius, table.fahrenheit, table.kelvin, table.rankine
            );
            CommandOutput::new(text, &table)
        }
    }
}

pub fn area(value: f64, from: &str, to: &str) -> anyhow::Result<CommandOutput> {
    let from: AreaUnit = from.parse()?;
    let to: AreaUnit = to.parse()?;
    let result = calc_core::convert_area(value, from, to)?;

    let text = format!("{} {} = {} {}", value, from, result, to);
    CommandOutput::new(
        text,
        &serde_json::json!({ "value": value, "from": from, "to": to, "result": result }),
    )
}

/// `weekend` overrides the configured weekend (comma-separated names)
pub fn workdays(
    start: &str,
    end: &str,
    weekend: Option<&str>,
    config: &ToolboxConfig,
) -> anyhow::Result<CommandOutput> {
    let start = calc_core::parse_date(start)?;
    let end = calc_core::parse_date(end)?;
    let week = match weekend {
        Some(days) => parse_weekend(days.split(','))?,
        None => config.workdays.workweek()?,
    };
    let summary = calc_core::count_workdays_with(start, end, &week)?;

    let text = format!(
        "{} to {}\n  Total days:   {}\n  Working days: {} ({}%)\n  Weekend days: {}",
        summary.start,
        summary.end,
        summary.total_days,
        summary.workdays,
        summary.percentage,
        summary.weekends
    );
    CommandOutput::new(text, &summary)
}

pub fn days_between(start: &str, end: &str) -> anyhow::Result<CommandOutput> {
    let start = calc_core::parse_date(start)?;
    let end = calc_core::parse_date(end)?;
    let days = calc_core::workdays::days_between(start, end);

    CommandOutput::new(
        format!("{} to {}: {} days", start, end, days),
        &serde_json::json!({ "start": start, "end": end, "days": days }),
    )
}

/// Date `days` working days after `start`
pub fn add_workdays(
    start: &str,
    days: u32,
    weekend: Option<&str>,
    config: &ToolboxConfig,
) -> anyhow::Result<CommandOutput> {
    let start = calc_core::parse_date(start)?;
    let week = match weekend {
        Some(days) => parse_weekend(days.split(','))?,
        None => config.workdays.workweek()?,
    };
    let end = calc_core::workdays::add_workdays(start, days, &week)?;
    let calendar_days = calc_core::workdays::days_between(start, end);

    CommandOutput::new(
        format!(
            "{} + {} working days = {} ({} calendar days)",
            start, days, end, calendar_days
        ),
        &serde_json::json!({
            "start": start,
            "workdays": days,
            "end": end,
            "calendar_days": calendar_days,
        }),
    )
}
