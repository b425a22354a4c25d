//! Extension configuration file parsing.

use std::fs;
use std::path::Path;

use super::registry::RegistryError;

/// Which generation of the extension set gets installed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    /// `toPairs`/`fromPairs`, `map(fn)`, `flip`, `translate`, `reverseTranslation`, `each`.
    Current,
    /// `map(schema)`, `reverseMap`, `forEach`.
    Legacy,
}

impl Revision {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "current" => Some(Revision::Current),
            "legacy" => Some(Revision::Legacy),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Revision::Current => "current",
            Revision::Legacy => "legacy",
        }
    }
}

/// What `translate` does with a key the schema has no entry for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingKeyPolicy {
    /// Keep the source key unchanged.
    Keep,
    /// Leave the entry out of the result.
    Drop,
    /// Raise an invalid-argument error.
    Error,
}

impl MissingKeyPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "keep" => Some(MissingKeyPolicy::Keep),
            "drop" => Some(MissingKeyPolicy::Drop),
            "error" => Some(MissingKeyPolicy::Error),
            _ => None,
        }
    }
}

/// What `flip` does when two keys share a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicateValuePolicy {
    /// The later key overwrites the earlier one.
    LastWins,
    /// Raise an invalid-argument error.
    Error,
}

impl DuplicateValuePolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "last_wins" => Some(DuplicateValuePolicy::LastWins),
            "error" => Some(DuplicateValuePolicy::Error),
            _ => None,
        }
    }
}

/// Complete extension configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AugmentConfig {
    pub revision: Revision,
    pub missing_key: MissingKeyPolicy,
    pub duplicate_values: DuplicateValuePolicy,
}

impl AugmentConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        AugmentConfig {
            revision: Revision::Current,
            missing_key: MissingKeyPolicy::Keep,
            duplicate_values: DuplicateValuePolicy::LastWins,
        }
    }

    /// Load configuration from a TOML file.
    ///
    /// Expected format:
    /// ```toml
    /// [extensions]
    /// revision = "current"        # or "legacy"
    /// missing_key = "keep"        # or "drop", "error"
    /// duplicate_values = "error"  # or "last_wins"
    /// ```
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path)
            .map_err(|e| RegistryError::ConfigError(format!("Failed to read config file: {}", e)))?;

        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    /// Only flat `key = "value"` entries are understood.
    pub fn parse(content: &str) -> Result<Self, RegistryError> {
        let mut config = AugmentConfig::new();
        let mut current_section = String::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = strip_comment(line).trim();

            if line.is_empty() {
                continue;
            }

            // Section headers
            if line.starts_with('[') && line.ends_with(']') {
                current_section = line[1..line.len() - 1].trim().to_string();
                if current_section != "extensions" {
                    return Err(RegistryError::ConfigError(format!(
                        "line {}: unknown section [{}]",
                        line_no + 1,
                        current_section
                    )));
                }
                continue;
            }

            match Self::parse_entry(line) {
                Some((key, value)) => config.set(&key, &value)?,
                None => {
                    return Err(RegistryError::ConfigError(format!(
                        "line {}: expected `key = \"value\"`, found `{}`",
                        line_no + 1,
                        line
                    )))
                }
            }
        }

        Ok(config)
    }

    /// Apply a single `key = value` setting.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), RegistryError> {
        let bad_value = || {
            RegistryError::ConfigError(format!("invalid value \"{}\" for `{}`", value, key))
        };
        match key {
            "revision" => self.revision = Revision::from_name(value).ok_or_else(bad_value)?,
            "missing_key" => {
                self.missing_key = MissingKeyPolicy::from_name(value).ok_or_else(bad_value)?
            }
            "duplicate_values" => {
                self.duplicate_values =
                    DuplicateValuePolicy::from_name(value).ok_or_else(bad_value)?
            }
            _ => {
                return Err(RegistryError::ConfigError(format!(
                    "unknown setting `{}`",
                    key
                )))
            }
        }
        Ok(())
    }

    /// Parse an entry like: missing_key = "drop"
    fn parse_entry(line: &str) -> Option<(String, String)> {
        let parts: Vec<&str> = line.splitn(2, '=').collect();
        if parts.len() != 2 {
            return None;
        }

        let key = parts[0].trim().trim_matches('"');
        let value = parts[1].trim().trim_matches('"');
        if key.is_empty() || value.is_empty() {
            return None;
        }

        Some((key.to_string(), value.to_string()))
    }
}

impl Default for AugmentConfig {
    fn default() -> Self {
        Self::new()
    }
}

fn strip_comment(line: &str) -> &str {
    let mut in_quotes = false;
    for (idx, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            '#' if !in_quotes => return &line[..idx],
            _ => {}
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_config() {
        let config = AugmentConfig::parse("").unwrap();
        assert_eq!(config, AugmentConfig::default());
        assert_eq!(config.revision, Revision::Current);
        assert_eq!(config.missing_key, MissingKeyPolicy::Keep);
        assert_eq!(config.duplicate_values, DuplicateValuePolicy::LastWins);
    }

    #[test]
    fn test_parse_full_config() {
        let config = AugmentConfig::parse(
            r#"
            # policies for translate / flip
            [extensions]
            revision = "legacy"
            missing_key = "drop"   # leave unmapped keys out
            duplicate_values = "error"
            "#,
        )
        .unwrap();
        assert_eq!(config.revision, Revision::Legacy);
        assert_eq!(config.missing_key, MissingKeyPolicy::Drop);
        assert_eq!(config.duplicate_values, DuplicateValuePolicy::Error);
    }

    #[test]
    fn test_parse_entry() {
        let entry = AugmentConfig::parse_entry(r#"missing_key = "error""#);
        assert_eq!(entry, Some(("missing_key".to_string(), "error".to_string())));
        assert_eq!(AugmentConfig::parse_entry("missing_key"), None);
        assert_eq!(AugmentConfig::parse_entry("missing_key = "), None);
    }

    #[test]
    fn test_rejects_unknown_setting() {
        let err = AugmentConfig::parse("speed = \"fast\"").unwrap_err();
        assert!(matches!(err, RegistryError::ConfigError(_)));
    }

    #[test]
    fn test_rejects_bad_value() {
        let err = AugmentConfig::parse("[extensions]\nrevision = \"next\"").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Config error: invalid value \"next\" for `revision`"
        );
    }

    #[test]
    fn test_rejects_unknown_section() {
        assert!(AugmentConfig::parse("[plugins]").is_err());
    }
}
