//! Configuration file for the toolbox CLI
//!
//! Every section is optional; a missing file section falls back to the same
//! defaults the browser pages use.

use anyhow::Context;
use barcode_core::{BarcodeSettings, Symbology};
use calc_core::Workweek;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ToolboxConfig {
    #[serde(default)]
    pub barcode: BarcodeDefaults,
    #[serde(default)]
    pub workdays: WorkdaysConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl ToolboxConfig {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the TOML is malformed
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_str(s: &str) -> anyhow::Result<Self> {
        toml::from_str(s).context("Failed to parse TOML configuration")
    }

    /// Load `path` if given, otherwise use defaults
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Style defaults for generated barcodes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BarcodeDefaults {
    pub format: Symbology,
    pub module_width: u32,
    pub height: u32,
    pub margin: u32,
    pub display_value: bool,
    pub font_size: u32,
    pub line_color: String,
    pub background: String,
}

impl Default for BarcodeDefaults {
    fn default() -> Self {
        let settings = BarcodeSettings::default();
        Self {
            format: settings.format,
            module_width: settings.module_width,
            height: settings.height,
            margin: settings.margin,
            display_value: settings.display_value,
            font_size: settings.font_size,
            line_color: settings.line_color,
            background: settings.background,
        }
    }
}

impl BarcodeDefaults {
    /// Settings for `content` with these defaults applied
    pub fn settings_for(&self, content: &str) -> BarcodeSettings {
        BarcodeSettings {
            content: content.to_string(),
            format: self.format,
            module_width: self.module_width,
            height: self.height,
            margin: self.margin,
            display_value: self.display_value,
            font_size: self.font_size,
            line_color: self.line_color.clone(),
            background: self.background.clone(),
            ..BarcodeSettings::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorkdaysConfig {
    /// Weekday names, e.g. `["fri", "sat"]`
    pub weekend: Vec<String>,
}

impl Default for WorkdaysConfig {
    fn default() -> Self {
        Self {
            weekend: vec!["sat".to_string(), "sun".to_string()],
        }
    }
}

impl WorkdaysConfig {
    pub fn workweek(&self) -> anyhow::Result<Workweek> {
        parse_weekend(self.weekend.iter().map(String::as_str))
    }
}

/// Parse weekday names into a [`Workweek`]
pub fn parse_weekend<'a>(days: impl IntoIterator<Item = &'a str>) -> anyhow::Result<Workweek> {
    let weekend = days
        .into_iter()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| {
            d.parse::<Weekday>()
                .map_err(|_| anyhow::anyhow!("Unknown weekday: {}", d))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(Workweek { weekend })
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Where generated files go when no output path is given
    pub directory: Option<PathBuf>,
}

impl OutputConfig {
    /// Resolve a default file name against the configured directory,
    /// or `fallback_dir` when none is set
    pub fn resolve(&self, file_name: &str, fallback_dir: &Path) -> PathBuf {
        self.directory
            .as_deref()
            .unwrap_or(fallback_dir)
            .join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ToolboxConfig::from_str("").unwrap();
        assert_eq!(config, ToolboxConfig::default());
        assert_eq!(config.barcode.format, Symbology::Code128);
        assert_eq!(config.barcode.module_width, 2);
        assert_eq!(config.workdays.weekend, vec!["sat", "sun"]);
        assert_eq!(config.output.directory, None);
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r##"
            [barcode]
            format = "EAN13"
            module_width = 3
            height = 80
            line_color = "#112233"

            [workdays]
            weekend = ["fri", "sat"]

            [output]
            directory = "out"
        "##;

        let config = ToolboxConfig::from_str(toml).unwrap();
        assert_eq!(config.barcode.format, Symbology::Ean13);
        assert_eq!(config.barcode.module_width, 3);
        assert_eq!(config.barcode.height, 80);
        assert_eq!(config.barcode.margin, 10);
        assert_eq!(config.barcode.line_color, "#112233");
        assert_eq!(
            config.workdays.workweek().unwrap().weekend,
            vec![Weekday::Fri, Weekday::Sat]
        );
        assert_eq!(config.output.directory, Some(PathBuf::from("out")));
    }

    #[test]
    fn test_invalid_toml_fails() {
        assert!(ToolboxConfig::from_str("[barcode\nheight = ").is_err());
        assert!(ToolboxConfig::from_str("[barcode]\nformat = \"QR\"").is_err());
    }

    #[test]
    fn test_unknown_weekday_fails() {
        let config = WorkdaysConfig {
            weekend: vec!["caturday".to_string()],
        };
        assert!(config.workweek().is_err());
    }

    #[test]
    fn test_settings_for_applies_defaults() {
        let defaults = BarcodeDefaults {
            height: 40,
            ..BarcodeDefaults::default()
        };
        let settings = defaults.settings_for("ABC");
        assert_eq!(settings.content, "ABC");
        assert_eq!(settings.height, 40);
        assert_eq!(settings.text_margin, BarcodeSettings::default().text_margin);
    }

    #[test]
    fn test_output_resolve() {
        let output = OutputConfig::default();
        assert_eq!(
            output.resolve("a.pdf", Path::new("in")),
            PathBuf::from("in/a.pdf")
        );
        let output = OutputConfig {
            directory: Some(PathBuf::from("out")),
        };
        assert_eq!(
            output.resolve("a.pdf", Path::new("in")),
            PathBuf::from("out/a.pdf")
        );
    }

    #[test]
    fn test_from_file_missing() {
        let err = ToolboxConfig::from_file("/nonexistent/toolbox.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }
}
