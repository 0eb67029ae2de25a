use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

pub const CRITERION_PLACEHOLDER: &str = "{criterion}";

const DEFAULT_CONSTRAINT_COLUMN: &str = "all_cst";
const DEFAULT_CONSTRAINT_CUTOFF: f64 = 1.0;
const DEFAULT_QUALITY_COLUMN: &str = "total_score";
const DEFAULT_TOP_K: usize = 10;

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid value for '{name}': {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    #[error("Unknown preset '{0}'. Expected one of: interface, glycan")]
    UnknownPreset(String),
}

/// A column requested in the feature reports.
///
/// `Criterion` stands for the interface-energy column, whose full name is only
/// known once the header has been scanned for the criterion prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(into = "String")]
pub enum FeatureColumn {
    Named(String),
    Criterion,
}

impl FeatureColumn {
    pub fn resolve<'a>(&'a self, criterion: &'a str) -> &'a str {
        match self {
            FeatureColumn::Named(name) => name,
            FeatureColumn::Criterion => criterion,
        }
    }
}

impl From<&str> for FeatureColumn {
    fn from(s: &str) -> Self {
        if s == CRITERION_PLACEHOLDER {
            FeatureColumn::Criterion
        } else {
            FeatureColumn::Named(s.to_string())
        }
    }
}

impl From<String> for FeatureColumn {
    fn from(s: String) -> Self {
        FeatureColumn::from(s.as_str())
    }
}

impl From<FeatureColumn> for String {
    fn from(c: FeatureColumn) -> Self {
        match c {
            FeatureColumn::Named(name) => name,
            FeatureColumn::Criterion => CRITERION_PLACEHOLDER.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SelectionConfig {
    pub criterion_prefix: String,
    pub constraint_column: String,
    pub constraint_cutoff: f64,
    pub quality_column: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantile_fraction: Option<f64>, // None skips the quantile stage
    pub top_k: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    pub directory: PathBuf, // relative paths resolve against the working directory
    #[serde(rename = "features")]
    pub feature_columns: Vec<FeatureColumn>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub features_csv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_csv: Option<String>,
    pub report: String,
    pub copy_structures: bool,
    pub structure_extension: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PipelineConfig {
    pub selection: SelectionConfig,
    pub output: OutputConfig,
}

/// The two pipeline configurations used in practice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Constraint filter then top 10 by `SR_3_interf_E_1_2*`.
    Interface,
    /// Constraint filter, best 20% by `total_score`, then top 10 by `SR_2_interf_E_1_4*`.
    Glycan,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Interface, Preset::Glycan];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Interface => "interface",
            Preset::Glycan => "glycan",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Preset::Interface => {
                "Constraint filter, then the best entries by SR_3_interf_E_1_2 interface energy."
            }
            Preset::Glycan => {
                "Constraint filter, best 20% by total_score, then the best entries by SR_2_interf_E_1_4 interface energy."
            }
        }
    }

    pub fn builder(self) -> PipelineConfigBuilder {
        let base = PipelineConfigBuilder::new()
            .constraint_column(DEFAULT_CONSTRAINT_COLUMN)
            .constraint_cutoff(DEFAULT_CONSTRAINT_CUTOFF)
            .quality_column(DEFAULT_QUALITY_COLUMN)
            .top_k(DEFAULT_TOP_K)
            .copy_structures(true);

        match self {
            Preset::Interface => base
                .criterion_prefix("SR_3_interf_E_1_2")
                .quantile_fraction(None)
                .output_directory("logs_best_interfaces")
                .feature_columns(vec![
                    "description".into(),
                    "total_score".into(),
                    "all_cst".into(),
                    FeatureColumn::Criterion,
                ])
                .features_csv(None)
                .full_csv(Some("top_interfaces.csv".to_string()))
                .report("top_interfaces.txt"),
            Preset::Glycan => base
                .criterion_prefix("SR_2_interf_E_1_4")
                .quantile_fraction(Some(0.2))
                .output_directory("top_scores")
                .feature_columns(vec![
                    "description".into(),
                    "total_score".into(),
                    "all_cst".into(),
                    FeatureColumn::Criterion,
                    "SR_3_dsasa_1_2".into(),
                    "interface_delta_X".into(),
                ])
                .features_csv(Some("top_filtered.csv".to_string()))
                .full_csv(Some("top_fullscores.csv".to_string()))
                .report("top_features.txt"),
        }
    }

    pub fn config(self) -> PipelineConfig {
        self.builder()
            .build()
            .expect("built-in presets are valid configurations")
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name() == s)
            .ok_or_else(|| ConfigError::UnknownPreset(s.to_string()))
    }
}

#[derive(Debug, Default, Clone)]
pub struct PipelineConfigBuilder {
    criterion_prefix: Option<String>,
    constraint_column: Option<String>,
    constraint_cutoff: Option<f64>,
    quality_column: Option<String>,
    quantile_fraction: Option<Option<f64>>,
    top_k: Option<usize>,
    output_directory: Option<PathBuf>,
    feature_columns: Option<Vec<FeatureColumn>>,
    features_csv: Option<Option<String>>,
    full_csv: Option<Option<String>>,
    report: Option<String>,
    copy_structures: Option<bool>,
    structure_extension: Option<String>,
}

impl PipelineConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn criterion_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.criterion_prefix = Some(prefix.into());
        self
    }
    pub fn constraint_column(mut self, column: impl Into<String>) -> Self {
        self.constraint_column = Some(column.into());
        self
    }
    pub fn constraint_cutoff(mut self, cutoff: f64) -> Self {
        self.constraint_cutoff = Some(cutoff);
        self
    }
    pub fn quality_column(mut self, column: impl Into<String>) -> Self {
        self.quality_column = Some(column.into());
        self
    }
    pub fn quantile_fraction(mut self, fraction: Option<f64>) -> Self {
        self.quantile_fraction = Some(fraction);
        self
    }
    pub fn top_k(mut self, k: usize) -> Self {
        self.top_k = Some(k);
        self
    }
    pub fn output_directory(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_directory = Some(dir.into());
        self
    }
    pub fn feature_columns(mut self, columns: Vec<FeatureColumn>) -> Self {
        self.feature_columns = Some(columns);
        self
    }
    pub fn features_csv(mut self, name: Option<String>) -> Self {
        self.features_csv = Some(name);
        self
    }
    pub fn full_csv(mut self, name: Option<String>) -> Self {
        self.full_csv = Some(name);
        self
    }
    pub fn report(mut self, name: impl Into<String>) -> Self {
        self.report = Some(name.into());
        self
    }
    pub fn copy_structures(mut self, enabled: bool) -> Self {
        self.copy_structures = Some(enabled);
        self
    }
    pub fn structure_extension(mut self, extension: impl Into<String>) -> Self {
        self.structure_extension = Some(extension.into());
        self
    }

    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        let selection = SelectionConfig {
            criterion_prefix: self
                .criterion_prefix
                .ok_or(ConfigError::MissingParameter("criterion_prefix"))?,
            constraint_column: self
                .constraint_column
                .unwrap_or_else(|| DEFAULT_CONSTRAINT_COLUMN.to_string()),
            constraint_cutoff: self.constraint_cutoff.unwrap_or(DEFAULT_CONSTRAINT_CUTOFF),
            quality_column: self
                .quality_column
                .unwrap_or_else(|| DEFAULT_QUALITY_COLUMN.to_string()),
            quantile_fraction: self.quantile_fraction.flatten(),
            top_k: self.top_k.unwrap_or(DEFAULT_TOP_K),
        };
        let output = OutputConfig {
            directory: self
                .output_directory
                .ok_or(ConfigError::MissingParameter("output_directory"))?,
            feature_columns: self.feature_columns.unwrap_or_else(|| {
                vec![
                    "description".into(),
                    DEFAULT_QUALITY_COLUMN.into(),
                    DEFAULT_CONSTRAINT_COLUMN.into(),
                    FeatureColumn::Criterion,
                ]
            }),
            features_csv: self.features_csv.flatten(),
            full_csv: self.full_csv.flatten(),
            report: self.report.ok_or(ConfigError::MissingParameter("report"))?,
            copy_structures: self.copy_structures.unwrap_or(true),
            structure_extension: self
                .structure_extension
                .unwrap_or_else(|| crate::core::io::structures::STRUCTURE_EXTENSION.to_string()),
        };

        validate_selection(&selection)?;
        validate_output(&output)?;
        Ok(PipelineConfig { selection, output })
    }
}

fn invalid(name: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::InvalidParameter {
        name,
        reason: reason.into(),
    }
}

fn validate_selection(config: &SelectionConfig) -> Result<(), ConfigError> {
    if config.criterion_prefix.is_empty() {
        return Err(invalid("criterion_prefix", "must not be empty"));
    }
    if config.constraint_column.is_empty() {
        return Err(invalid("constraint_column", "must not be empty"));
    }
    if config.quality_column.is_empty() {
        return Err(invalid("quality_column", "must not be empty"));
    }
    if !config.constraint_cutoff.is_finite() {
        return Err(invalid("constraint_cutoff", "must be a finite number"));
    }
    if config.top_k == 0 {
        return Err(invalid("top_k", "must be at least 1"));
    }
    if let Some(fraction) = config.quantile_fraction {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(invalid(
                "quantile_fraction",
                format!("must be in (0, 1], got {}", fraction),
            ));
        }
    }
    Ok(())
}

fn validate_output(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.directory.as_os_str().is_empty() || config.directory == Path::new(".") {
        return Err(invalid(
            "output_directory",
            "must name a dedicated subdirectory",
        ));
    }
    if config.report.is_empty() {
        return Err(invalid("report", "must not be empty"));
    }
    for (name, file) in [
        ("features_csv", &config.features_csv),
        ("full_csv", &config.full_csv),
    ] {
        if file.as_deref() == Some("") {
            return Err(invalid(name, "must not be empty when set"));
        }
    }
    if config
        .feature_columns
        .iter()
        .any(|c| matches!(c, FeatureColumn::Named(n) if n.is_empty()))
    {
        return Err(invalid("feature_columns", "column names must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn glycan_preset_enables_the_quantile_stage() {
        let config = Preset::Glycan.config();
        assert_eq!(config.selection.criterion_prefix, "SR_2_interf_E_1_4");
        assert_eq!(config.selection.quantile_fraction, Some(0.2));
        assert_eq!(config.selection.constraint_cutoff, 1.0);
        assert_eq!(config.selection.top_k, 10);
        assert_eq!(config.output.directory, PathBuf::from("top_scores"));
        assert_eq!(config.output.features_csv.as_deref(), Some("top_filtered.csv"));
        assert_eq!(config.output.full_csv.as_deref(), Some("top_fullscores.csv"));
        assert_eq!(config.output.report, "top_features.txt");
        assert_eq!(config.output.feature_columns.len(), 6);
    }

    #[test]
    fn interface_preset_skips_the_quantile_stage() {
        let config = Preset::Interface.config();
        assert_eq!(config.selection.criterion_prefix, "SR_3_interf_E_1_2");
        assert_eq!(config.selection.quantile_fraction, None);
        assert_eq!(config.output.directory, PathBuf::from("logs_best_interfaces"));
        assert_eq!(config.output.features_csv, None);
        assert_eq!(config.output.full_csv.as_deref(), Some("top_interfaces.csv"));
    }

    #[test]
    fn presets_parse_from_their_names() {
        for preset in Preset::ALL {
            assert_eq!(preset.name().parse::<Preset>(), Ok(preset));
        }
        assert_eq!(
            "docking".parse::<Preset>(),
            Err(ConfigError::UnknownPreset("docking".into()))
        );
    }

    #[test]
    fn builder_requires_criterion_prefix() {
        let result = PipelineConfigBuilder::new()
            .output_directory("out")
            .report("top.txt")
            .build();
        assert_eq!(
            result,
            Err(ConfigError::MissingParameter("criterion_prefix"))
        );
    }

    #[test]
    fn builder_fills_defaults_for_optional_parameters() {
        let config = PipelineConfigBuilder::new()
            .criterion_prefix("SR_1_interf")
            .output_directory("out")
            .report("top.txt")
            .build()
            .unwrap();
        assert_eq!(config.selection.constraint_column, "all_cst");
        assert_eq!(config.selection.quality_column, "total_score");
        assert_eq!(config.selection.top_k, 10);
        assert_eq!(config.selection.quantile_fraction, None);
        assert_eq!(config.output.structure_extension, ".pdb");
        assert!(config.output.copy_structures);
    }

    #[test]
    fn builder_rejects_out_of_range_values() {
        let base = || Preset::Glycan.builder();
        assert!(matches!(
            base().top_k(0).build(),
            Err(ConfigError::InvalidParameter { name: "top_k", .. })
        ));
        assert!(matches!(
            base().quantile_fraction(Some(0.0)).build(),
            Err(ConfigError::InvalidParameter {
                name: "quantile_fraction",
                ..
            })
        ));
        assert!(matches!(
            base().quantile_fraction(Some(1.5)).build(),
            Err(ConfigError::InvalidParameter {
                name: "quantile_fraction",
                ..
            })
        ));
        for cutoff in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                base().constraint_cutoff(cutoff).build(),
                Err(ConfigError::InvalidParameter {
                    name: "constraint_cutoff",
                    ..
                })
            ));
        }
        assert!(matches!(
            base().criterion_prefix("").build(),
            Err(ConfigError::InvalidParameter {
                name: "criterion_prefix",
                ..
            })
        ));
    }

    #[test]
    fn builder_rejects_working_directory_as_output() {
        let result = Preset::Glycan.builder().output_directory(".").build();
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParameter {
                name: "output_directory",
                ..
            })
        ));
    }

    #[test]
    fn feature_column_placeholder_round_trips_through_strings() {
        assert_eq!(FeatureColumn::from("{criterion}"), FeatureColumn::Criterion);
        assert_eq!(
            FeatureColumn::from("all_cst"),
            FeatureColumn::Named("all_cst".into())
        );
        assert_eq!(String::from(FeatureColumn::Criterion), "{criterion}");
        assert_eq!(
            FeatureColumn::Criterion.resolve("SR_2_interf_E_1_4_x"),
            "SR_2_interf_E_1_4_x"
        );
    }
}
