use crate::error::{CliError, Result};
use scoresift::engine::config::Preset;

/// Renders a preset as a config file that reproduces it.
pub fn render_preset(preset: Preset) -> Result<String> {
    let body =
        toml::to_string_pretty(&preset.config()).map_err(|e| CliError::Other(e.into()))?;
    Ok(format!(
        "# {}\npreset = \"{}\"\n\n{}",
        preset.description(),
        preset.name(),
        body
    ))
}

pub fn run() -> Result<()> {
    for (i, preset) in Preset::ALL.into_iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===", preset.name());
        print!("{}", render_preset(preset)?);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::file::FileConfig;

    #[test]
    fn rendered_presets_are_valid_config_files() {
        for preset in Preset::ALL {
            let text = render_preset(preset).unwrap();
            let parsed: FileConfig = toml::from_str(&text).unwrap();

            assert_eq!(parsed.preset.as_deref(), Some(preset.name()));
            let selection = parsed.selection.unwrap();
            let config = preset.config();
            assert_eq!(
                selection.criterion_prefix.as_deref(),
                Some(config.selection.criterion_prefix.as_str())
            );
            assert_eq!(selection.quantile_fraction, config.selection.quantile_fraction);
            let output = parsed.output.unwrap();
            assert_eq!(output.report.as_deref(), Some(config.output.report.as_str()));
            assert!(
                output
                    .features
                    .unwrap()
                    .iter()
                    .any(|f| f == "{criterion}")
            );
        }
    }
}
