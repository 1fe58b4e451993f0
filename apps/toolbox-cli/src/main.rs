//! `toolbox` binary

use barcode_core::{ImageFormat, Symbology};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use toolbox_cli::commands::{self, BarcodeOverrides};
use toolbox_cli::ToolboxConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "toolbox")]
#[command(version, about = "PDF rotation, barcodes and everyday calculators")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// TOML file with barcode, workdays and output defaults
    #[arg(long, global = true, env = "TOOLBOX_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rotate pages of a PDF
    #[command(allow_negative_numbers = true)]
    Rotate {
        input: PathBuf,
        /// Output file (default: <input>-rotated.pdf)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Page selection like "1-3, 5" (default: all pages)
        #[arg(short, long)]
        pages: Option<String>,
        /// Clockwise degrees, a multiple of 90
        #[arg(short, long, default_value_t = 90)]
        degrees: i64,
    },

    /// Show file and page information for a PDF
    PdfInfo {
        input: PathBuf,
        /// Include per-page size and rotation
        #[arg(long)]
        pages: bool,
    },

    /// Generate a barcode image
    Barcode {
        content: String,
        /// Output .png or .svg file (prints a data URL when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// CODE128, CODE39, EAN13, EAN8, UPC or ITF14
        #[arg(short, long)]
        format: Option<Symbology>,
        #[arg(long)]
        module_width: Option<u32>,
        #[arg(long)]
        height: Option<u32>,
        /// Leave out the human-readable text
        #[arg(long)]
        no_text: bool,
        #[arg(long)]
        line_color: Option<String>,
        #[arg(long)]
        background: Option<String>,
        /// Image type for the data URL
        #[arg(long, value_enum, default_value_t = DataUrlFormat::Png)]
        data_url: DataUrlFormat,
    },

    /// Check whether a number is prime and list its factors
    Prime { number: u64 },

    /// Percentage change between two values
    #[command(allow_negative_numbers = true)]
    Percent { original: f64, new: f64 },

    /// What is PERCENT% of VALUE
    #[command(allow_negative_numbers = true)]
    PercentOf { percent: f64, value: f64 },

    /// PART as a percentage of WHOLE
    #[command(allow_negative_numbers = true)]
    PercentRatio { part: f64, whole: f64 },

    /// Increase VALUE by PERCENT% (negative to decrease)
    #[command(allow_negative_numbers = true)]
    PercentApply { value: f64, percent: f64 },

    /// Scientific and engineering notation
    #[command(allow_negative_numbers = true)]
    Scientific {
        value: String,
        /// Digits after the decimal point
        #[arg(short, long, default_value_t = 4)]
        precision: usize,
    },

    /// Convert a temperature (all units when --to is omitted)
    #[command(allow_negative_numbers = true)]
    Temperature {
        value: f64,
        /// C, F, K or R
        #[arg(short, long)]
        from: String,
        #[arg(short, long)]
        to: Option<String>,
    },

    /// Convert an area
    Area {
        value: f64,
        #[arg(short, long)]
        from: String,
        #[arg(short, long)]
        to: String,
    },

    /// Count working days between two dates (YYYY-MM-DD, inclusive)
    Workdays {
        start: String,
        end: String,
        /// Weekend days, e.g. "fri,sat" (overrides the config file)
        #[arg(long)]
        weekend: Option<String>,
    },

    /// Signed calendar days between two dates (YYYY-MM-DD)
    DaysBetween { start: String, end: String },

    /// Date reached after a number of working days
    AddWorkdays {
        start: String,
        days: u32,
        /// Weekend days, e.g. "fri,sat" (overrides the config file)
        #[arg(long)]
        weekend: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum DataUrlFormat {
    Png,
    Svg,
}

impl From<DataUrlFormat> for ImageFormat {
    fn from(format: DataUrlFormat) -> Self {
        match format {
            DataUrlFormat::Png => ImageFormat::Png,
            DataUrlFormat::Svg => ImageFormat::Svg,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for results
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = ToolboxConfig::load(cli.config.as_deref())?;
    if let Some(path) = &cli.config {
        tracing::debug!("loaded config from {}", path.display());
    }

    let output = match cli.command {
        Command::Rotate {
            input,
            output,
            pages,
            degrees,
        } => commands::rotate(
            &input,
            output.as_deref(),
            pages.as_deref(),
            degrees,
            &config,
        )?,
        Command::PdfInfo { input, pages } => commands::pdf_info(&input, pages)?,
        Command::Barcode {
            content,
            output,
            format,
            module_width,
            height,
            no_text,
            line_color,
            background,
            data_url,
        } => {
            let overrides = BarcodeOverrides {
                format,
                module_width,
                height,
                hide_text: no_text,
                line_color,
                background,
            };
            commands::barcode(
                &content,
                output.as_deref(),
                data_url.into(),
                &overrides,
                &config,
            )?
        }
        Command::Prime { number } => commands::prime(number)?,
        Command::Percent { original, new } => commands::percent(original, new)?,
        Command::PercentOf { percent, value } => commands::percent_of(percent, value)?,
        Command::PercentRatio { part, whole } => commands::percent_ratio(part, whole)?,
        Command::PercentApply { value, percent } => commands::percent_apply(value, percent)?,
        Command::Scientific { value, precision } => commands::scientific(&value, precision)?,
        Command::Temperature { value, from, to } => {
            commands::temperature(value, &from, to.as_deref())?
        }
        Command::Area { value, from, to } => commands::area(value, &from, &to)?,
        Command::Workdays {
            start,
            end,
            weekend,
        } => commands::workdays(&start, &end, weekend.as_deref(), &config)?,
        Command::DaysBetween { start, end } => commands::days_between(&start, &end)?,
        Command::AddWorkdays {
            start,
            days,
            weekend,
        } => commands::add_workdays(&start, days, weekend.as_deref(), &config)?,
    };

    println!("{}", output.render(cli.json)?);
    Ok(())
}
