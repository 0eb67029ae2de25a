pub mod presets;
pub mod select;
