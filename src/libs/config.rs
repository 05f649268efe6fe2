use crate::libs::storage::storage_traits::StoreError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAMED_GROUP_PREFIX: &str = "Group ";

/// Directory settings. Missing keys fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Named groups are called `<prefix><ordinal>`.
    pub named_group_prefix: String,
    /// Reject `create_group` when any listed user was never passed to `create_user`.
    pub require_registered_users: bool,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            named_group_prefix: DEFAULT_NAMED_GROUP_PREFIX.to_string(),
            require_registered_users: false,
        }
    }
}

impl DirectoryConfig {
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn named_group_name(&self, ordinal: u32) -> String {
        format!("{}{}", self.named_group_prefix, ordinal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DirectoryConfig::default();
        assert_eq!(config.named_group_name(1), "Group 1");
        assert!(!config.require_registered_users);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DirectoryConfig::from_json(r#"{ "require_registered_users": true }"#).unwrap();
        assert!(config.require_registered_users);
        assert_eq!(config.named_group_prefix, DEFAULT_NAMED_GROUP_PREFIX);
    }

    #[test]
    fn test_custom_prefix() {
        let config = DirectoryConfig::from_json(r#"{ "named_group_prefix": "Team #" }"#).unwrap();
        assert_eq!(config.named_group_name(4), "Team #4");
    }

    #[test]
    fn test_bad_json() {
        let result = DirectoryConfig::from_json("{ named_group_prefix: ");
        assert!(matches!(result, Err(StoreError::Config(_))));
    }
}
