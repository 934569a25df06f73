use super::FormatError;
use crate::models::ImportMap;

/// Serialize ImportMap to block-style YAML
pub fn to_yaml(import_map: &ImportMap) -> Result<String, FormatError> {
    serde_yaml::to_string(import_map).map_err(FormatError::from)
}
