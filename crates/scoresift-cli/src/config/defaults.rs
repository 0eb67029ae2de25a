use scoresift::engine::config::Preset;

pub struct DefaultsConfig {
    pub preset: Preset,
    pub strict_schema: bool,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            preset: Preset::Glycan,
            strict_schema: false,
        }
    }
}
