use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_OPTION_PREFIX: char = '-';

/// What to do with a flag that matches no declared option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnknownOptions {
    /// Skip the flag and the values that follow it.
    #[default]
    Ignore,
    /// Record a [`ParseError::UnknownOption`](crate::ParseError::UnknownOption).
    Report,
}

/// Parser-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParserConfiguration {
    /// Character that marks an argument as a flag.
    pub option_prefix: char,
    pub unknown_options: UnknownOptions,
}

impl Default for ParserConfiguration {
    fn default() -> Self {
        Self {
            option_prefix: DEFAULT_OPTION_PREFIX,
            unknown_options: UnknownOptions::default(),
        }
    }
}

impl ParserConfiguration {
    pub fn new(option_prefix: char) -> Self {
        Self {
            option_prefix,
            ..Self::default()
        }
    }

    pub fn unknown_options(mut self, policy: UnknownOptions) -> Self {
        self.unknown_options = policy;
        self
    }

    /// Report unknown flags instead of skipping them.
    pub fn strict(self) -> Self {
        self.unknown_options(UnknownOptions::Report)
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        let prefix = self.option_prefix;
        if prefix.is_alphanumeric() || prefix.is_whitespace() || prefix.is_control() {
            return Err(ConfigError::InvalidPrefix { prefix });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_dash_and_lenient() {
        let config = ParserConfiguration::default();
        assert_eq!(config.option_prefix, '-');
        assert_eq!(config.unknown_options, UnknownOptions::Ignore);
        assert_eq!(config.strict().unknown_options, UnknownOptions::Report);
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let config: ParserConfiguration =
            serde_json::from_str(r#"{ "optionPrefix": "/" }"#).unwrap();
        assert_eq!(config, ParserConfiguration::new('/'));

        let config: ParserConfiguration =
            serde_json::from_str(r#"{ "unknownOptions": "report" }"#).unwrap();
        assert_eq!(config.option_prefix, '-');
        assert_eq!(config.unknown_options, UnknownOptions::Report);
    }

    #[test]
    fn rejects_prefixes_that_cannot_mark_flags() {
        for prefix in ['a', '7', ' ', '\t'] {
            let err = ParserConfiguration::new(prefix).validate().unwrap_err();
            assert_eq!(err, ConfigError::InvalidPrefix { prefix });
        }
        assert!(ParserConfiguration::new('+').validate().is_ok());
        assert!(ParserConfiguration::new('/').validate().is_ok());
    }
}
