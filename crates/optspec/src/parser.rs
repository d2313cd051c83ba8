//! Matching argument vectors against a registry.

use crate::config::{ParserConfiguration, UnknownOptions};
use crate::error::{ConfigError, ParseError, ParseErrors};
use crate::option::{AnyOption, Arity};
use crate::registry::OptionRegistry;
use crate::result::ParseResult;
use crate::token::{self, Occurrence};
use crate::validate::validate_dependencies;

/// A frozen set of options ready to parse argument vectors.
///
/// Parsing never mutates the parser, so one instance can serve any number
/// of threads.
#[derive(Debug, Clone)]
pub struct Parser {
    registry: OptionRegistry,
    configuration: ParserConfiguration,
}

impl Parser {
    pub fn build<I>(configuration: ParserConfiguration, options: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator,
        I::Item: Into<AnyOption>,
    {
        let registry = OptionRegistry::build(&configuration, options)?;
        Ok(Self {
            registry,
            configuration,
        })
    }

    pub fn builder() -> ParserBuilder {
        ParserBuilder::default()
    }

    pub fn registry(&self) -> &OptionRegistry {
        &self.registry
    }

    pub fn configuration(&self) -> &ParserConfiguration {
        &self.configuration
    }

    /// Parse `args` (without the program name).
    ///
    /// Problems do not stop the pass: every unknown flag (when reported),
    /// arity violation, failed conversion, missing required option and
    /// missing dependency is collected, and any of them turns the whole call
    /// into an error.
    pub fn parse<S: AsRef<str>>(&self, args: &[S]) -> Result<ParseResult, ParseErrors> {
        let tokens = token::tokenize(self.configuration.option_prefix, args);
        let (leading, occurrences) = token::group(&tokens);

        let mut result = ParseResult::default();
        let mut errors: Vec<ParseError> = Vec::new();

        for value in leading {
            result.push_leftover(value);
        }

        for occurrence in &occurrences {
            self.match_occurrence(occurrence, &mut result, &mut errors);
        }

        let mut missing = Vec::new();
        for option in self.registry.options() {
            if option.is_required() && !result.contains(option.name()) {
                missing.push(ParseError::MissingRequiredOption {
                    name: option.name().to_string(),
                });
            }
        }
        errors.extend(missing);
        errors.extend(validate_dependencies(&self.registry, &result));

        match ParseErrors::from_vec(errors) {
            Some(errors) => {
                tracing::debug!(errors = errors.len(), "argument parsing failed");
                Err(errors)
            }
            None => Ok(result),
        }
    }

    fn match_occurrence(
        &self,
        occurrence: &Occurrence<'_>,
        result: &mut ParseResult,
        errors: &mut Vec<ParseError>,
    ) {
        let Some(option) = self.registry.resolve(occurrence.flag) else {
            match self.configuration.unknown_options {
                UnknownOptions::Ignore => {
                    tracing::debug!(
                        flag = occurrence.flag,
                        skipped_values = occurrence.values.len(),
                        "ignoring unknown option"
                    );
                }
                UnknownOptions::Report => errors.push(ParseError::UnknownOption {
                    token: format!("{}{}", self.configuration.option_prefix, occurrence.flag),
                }),
            }
            return;
        };

        let name = option.name();
        let values = &occurrence.values;
        let range = option.value_range();
        tracing::trace!(option = name, values = values.len(), "matched occurrence");
        result.push_explicit(name);

        if values.is_empty() && !option.requires_value() {
            if option.uses_default() {
                if let Some(default) = option.default_value() {
                    result.push_default(name, default);
                }
            }
            return;
        }

        let too_few = values.len() < range.min && option.requires_value();
        if too_few || !range.max.admits(values.len()) {
            errors.push(ParseError::ArityViolation {
                name: name.to_string(),
                expected: range,
                actual: values.len(),
            });
            if too_few {
                return;
            }
        }

        let limit = match range.max {
            Arity::Finite(max) => max,
            Arity::Unbounded => values.len(),
        };
        for raw in values.iter().take(limit) {
            match option.transform(raw) {
                Ok(value) => result.push_value(name, raw, value),
                Err(cause) => errors.push(ParseError::TransformFailure {
                    name: name.to_string(),
                    raw: raw.to_string(),
                    cause: cause.to_string(),
                }),
            }
        }
    }
}

/// Chained construction of a [`Parser`].
#[derive(Debug, Clone, Default)]
pub struct ParserBuilder {
    configuration: ParserConfiguration,
    options: Vec<AnyOption>,
}

impl ParserBuilder {
    pub fn configuration(mut self, configuration: ParserConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    pub fn option(mut self, option: impl Into<AnyOption>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn build(self) -> Result<Parser, ConfigError> {
        Parser::build(self.configuration, self.options)
    }
}
