//! Load campaign rules from TOML files

use std::fs;
use std::path::Path;

use crate::core::error::Result;
use crate::rules::CampaignRules;

/// Load rules from `path`, falling back to defaults for absent sections
pub fn load_rules(path: &Path) -> Result<CampaignRules> {
    let content = fs::read_to_string(path)?;
    let rules = CampaignRules::from_toml_str(&content)?;
    tracing::debug!("Loaded campaign rules from {}", path.display());
    Ok(rules)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::AnchorfallError;

    #[test]
    fn test_load_bundled_rules() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/rules.toml");
        let rules = load_rules(&path).expect("bundled rules should load");
        assert_eq!(rules, CampaignRules::default());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = load_rules(Path::new("data/does_not_exist.toml")).unwrap_err();
        assert!(matches!(err, AnchorfallError::IoError(_)));
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        let err = CampaignRules::from_toml_str("[tension\ncadence_days = ").unwrap_err();
        assert!(matches!(err, AnchorfallError::TomlError(_)));
    }
}
