//! Name and alias index over a fixed set of options.

use std::collections::HashMap;

use crate::config::ParserConfiguration;
use crate::error::ConfigError;
use crate::option::AnyOption;

/// Every option, reachable by canonical name and by each alias.
///
/// Built once and read-only afterwards.
#[derive(Debug, Clone)]
pub struct OptionRegistry {
    options: Vec<AnyOption>,
    by_name: HashMap<String, usize>,
    prefix: char,
}

impl OptionRegistry {
    /// Index `options`, rejecting name collisions and broken dependencies.
    pub fn build<I>(configuration: &ParserConfiguration, options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<AnyOption>,
    {
        configuration.validate()?;

        let options: Vec<AnyOption> = options.into_iter().map(Into::into).collect();
        let mut by_name: HashMap<String, usize> = HashMap::new();

        for (idx, option) in options.iter().enumerate() {
            for alias in option.all_names() {
                if let Some(prev) = by_name.insert(alias.to_string(), idx) {
                    // Only the canonical name may repeat within one option.
                    if prev != idx || alias != option.name() {
                        return Err(ConfigError::DuplicateName {
                            alias: alias.to_string(),
                            first: options[prev].name().to_string(),
                            second: option.name().to_string(),
                        });
                    }
                }
            }
        }

        for option in &options {
            for dependency in option.dependencies() {
                if dependency == option.name() {
                    return Err(ConfigError::SelfDependency {
                        option: option.name().to_string(),
                    });
                }
                if !options.iter().any(|o| o.name() == dependency) {
                    return Err(ConfigError::UnknownDependency {
                        option: option.name().to_string(),
                        dependency: dependency.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            options = options.len(),
            names = by_name.len(),
            "built option registry"
        );

        Ok(Self {
            options,
            by_name,
            prefix: configuration.option_prefix,
        })
    }

    /// Look up a canonical name or alias.
    pub fn get(&self, name: &str) -> Option<&AnyOption> {
        self.by_name.get(name).map(|&idx| &self.options[idx])
    }

    /// Resolve flag text (prefix already stripped once).
    ///
    /// Tries an exact match first; text still carrying the prefix (`--size`
    /// arrives as `-size`) falls back to the remainder.
    pub fn resolve(&self, flag: &str) -> Option<&AnyOption> {
        self.get(flag).or_else(|| {
            flag.strip_prefix(self.prefix)
                .filter(|rest| !rest.is_empty())
                .and_then(|rest| self.get(rest))
        })
    }

    /// Options in declaration order.
    pub fn options(&self) -> &[AnyOption] {
        &self.options
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
