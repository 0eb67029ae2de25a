use super::defaults::DefaultsConfig;
use super::file::{FileConfig, FileOutputConfig, FileSelectionConfig};
use super::models::AppConfig;
use crate::cli::{QuantileOverride, SelectArgs};
use crate::error::{CliError, Result};
use crate::utils::parser::{self, ParseError};
use scoresift::engine::config::{FeatureColumn, PipelineConfigBuilder, Preset};
use tracing::debug;

pub fn build_config(args: &SelectArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let preset = match (args.preset, file_config.preset.as_deref()) {
        (Some(name), _) => Preset::from(name),
        (None, Some(name)) => name
            .parse::<Preset>()
            .map_err(|e| CliError::Config(e.to_string()))?,
        (None, None) => defaults.preset,
    };
    debug!("Starting from the '{}' preset.", preset);

    let selection_file = file_config.selection.take().unwrap_or_default();
    let output_file = file_config.output.take().unwrap_or_default();

    let builder = preset.builder();
    let builder = merge_selection(builder, &selection_file, args);
    let builder = merge_quantile(builder, args.quantile, &selection_file);
    let builder = merge_output(builder, output_file, args);

    let pipeline = builder
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        working_dir: args.dir.clone(),
        preset,
        pipeline,
        strict_schema: args.strict_schema || defaults.strict_schema,
        dry_run: args.dry_run,
    })
}

fn merge_selection(
    mut builder: PipelineConfigBuilder,
    file_val: &FileSelectionConfig,
    args: &SelectArgs,
) -> PipelineConfigBuilder {
    if let Some(prefix) = args
        .criterion_prefix
        .as_ref()
        .or(file_val.criterion_prefix.as_ref())
    {
        builder = builder.criterion_prefix(prefix.clone());
    }
    if let Some(column) = &file_val.constraint_column {
        builder = builder.constraint_column(column.clone());
    }
    if let Some(cutoff) = args.cutoff.or(file_val.constraint_cutoff) {
        builder = builder.constraint_cutoff(cutoff);
    }
    if let Some(column) = &file_val.quality_column {
        builder = builder.quality_column(column.clone());
    }
    if let Some(k) = args.top_k.or(file_val.top_k) {
        builder = builder.top_k(k);
    }
    builder
}

fn merge_quantile(
    builder: PipelineConfigBuilder,
    cli_flags: QuantileOverride,
    file_val: &FileSelectionConfig,
) -> PipelineConfigBuilder {
    if cli_flags.no_quantile {
        builder.quantile_fraction(None)
    } else if let Some(fraction) = cli_flags.quantile {
        builder.quantile_fraction(Some(fraction))
    } else if file_val.skip_quantile == Some(true) {
        builder.quantile_fraction(None)
    } else if let Some(fraction) = file_val.quantile_fraction {
        builder.quantile_fraction(Some(fraction))
    } else {
        builder
    }
}

/// An empty file name in the config disables that output.
fn optional_file_name(name: String) -> Option<String> {
    if name.is_empty() { None } else { Some(name) }
}

fn merge_output(
    mut builder: PipelineConfigBuilder,
    file_val: FileOutputConfig,
    args: &SelectArgs,
) -> PipelineConfigBuilder {
    if let Some(dir) = args.output_dir.clone().or(file_val.directory) {
        builder = builder.output_directory(dir);
    }
    if let Some(features) = file_val.features {
        builder = builder.feature_columns(features.into_iter().map(FeatureColumn::from).collect());
    }
    if let Some(name) = file_val.features_csv {
        builder = builder.features_csv(optional_file_name(name));
    }
    if let Some(name) = file_val.full_csv {
        builder = builder.full_csv(optional_file_name(name));
    }
    if let Some(name) = file_val.report {
        builder = builder.report(name);
    }
    if let Some(enabled) = file_val.copy_structures {
        builder = builder.copy_structures(enabled);
    }
    if let Some(extension) = file_val.structure_extension {
        builder = builder.structure_extension(extension);
    }
    builder
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    if set_values.is_empty() {
        return Ok(config);
    }
    for kv_pair in set_values {
        let (key, value) =
            parser::parse_key_value(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;
        apply_set_value(&mut config, key, value).map_err(|e| CliError::Config(e.to_string()))?;
    }
    Ok(config)
}

fn apply_set_value(
    config: &mut FileConfig,
    key: &str,
    value: &str,
) -> std::result::Result<(), SetValueError> {
    match key {
        "preset" => config.preset = Some(value.to_string()),
        "selection.criterion-prefix" => {
            config.selection.get_or_insert_with(Default::default).criterion_prefix =
                Some(value.to_string());
        }
        "selection.constraint-column" => {
            config.selection.get_or_insert_with(Default::default).constraint_column =
                Some(value.to_string());
        }
        "selection.constraint-cutoff" => {
            config.selection.get_or_insert_with(Default::default).constraint_cutoff =
                Some(parser::parse_value(key, value, "float")?);
        }
        "selection.quality-column" => {
            config.selection.get_or_insert_with(Default::default).quality_column =
                Some(value.to_string());
        }
        "selection.quantile-fraction" => {
            config.selection.get_or_insert_with(Default::default).quantile_fraction =
                Some(parser::parse_value(key, value, "float")?);
        }
        "selection.skip-quantile" => {
            config.selection.get_or_insert_with(Default::default).skip_quantile =
                Some(parser::parse_value(key, value, "boolean")?);
        }
        "selection.top-k" => {
            config.selection.get_or_insert_with(Default::default).top_k =
                Some(parser::parse_value(key, value, "integer")?);
        }
        "output.directory" => {
            config.output.get_or_insert_with(Default::default).directory = Some(value.into());
        }
        "output.features" => {
            config.output.get_or_insert_with(Default::default).features = Some(parser::parse_list(value));
        }
        "output.features-csv" => {
            config.output.get_or_insert_with(Default::default).features_csv = Some(value.to_string());
        }
        "output.full-csv" => {
            config.output.get_or_insert_with(Default::default).full_csv = Some(value.to_string());
        }
        "output.report" => {
            config.output.get_or_insert_with(Default::default).report = Some(value.to_string());
        }
        "output.copy-structures" => {
            config.output.get_or_insert_with(Default::default).copy_structures =
                Some(parser::parse_value(key, value, "boolean")?);
        }
        "output.structure-extension" => {
            config.output.get_or_insert_with(Default::default).structure_extension =
                Some(value.to_string());
        }
        _ => return Err(SetValueError::UnsupportedKey(key.to_string())),
    }
    Ok(())
}

#[derive(Debug, thiserror::Error)]
enum SetValueError {
    #[error("Unsupported configuration key for --set: '{0}'")]
    UnsupportedKey(String),
    #[error(transparent)]
    Parse(#[from] ParseError),
}
