mod json;
mod text;
mod yaml;

pub use json::to_json;
pub use text::to_text;
pub use yaml::to_yaml;

use crate::models::ImportMap;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

impl OutputFormat {
    /// Match a format name case-insensitively. Unknown names give `None`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "text" => Some(OutputFormat::Text),
            "json" => Some(OutputFormat::Json),
            "yaml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }
}

/// Format an ImportMap according to the specified format.
///
/// Every rendering ends with exactly one newline. `colorize` only affects
/// the text format.
pub fn format_output(
    import_map: &ImportMap,
    format: OutputFormat,
    colorize: bool,
) -> Result<String, FormatError> {
    let mut output = match format {
        OutputFormat::Text => to_text(import_map, colorize),
        OutputFormat::Json => to_json(import_map)?,
        OutputFormat::Yaml => to_yaml(import_map)?,
    };

    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok(output)
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
