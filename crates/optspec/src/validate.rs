//! Post-parse dependency checks.

use crate::error::ParseError;
use crate::registry::OptionRegistry;
use crate::result::ParseResult;

/// Report every option holding at least one value whose declared
/// dependencies were not given.
///
/// A dependency counts as given when its flag appeared, even if its values
/// failed to convert. Dependencies are not followed transitively: each
/// (option, missing dependency) pair is reported once.
pub fn validate_dependencies(registry: &OptionRegistry, result: &ParseResult) -> Vec<ParseError> {
    let mut errors = Vec::new();
    for name in result.names() {
        let Some(option) = registry.get(name) else {
            continue;
        };
        for dependency in option.dependencies() {
            if !result.is_explicit(dependency) {
                errors.push(ParseError::MissingDependency {
                    name: name.to_string(),
                    dependency: dependency.to_string(),
                });
            }
        }
    }
    errors
}
