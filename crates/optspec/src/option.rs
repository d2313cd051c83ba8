//! Option definitions.
//!
//! An option is described with an [`OptionBuilder`] and frozen into an
//! [`OptionSpec`] by [`OptionBuilder::parse_as`]. Frozen specs are immutable,
//! cheap to clone and safe to share between threads.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexSet;

use crate::error::{ConfigError, ValueRange};
use crate::transform::{AnyValue, ErasedParser, OptionParser, TransformError};

/// Maximum number of values one occurrence of an option may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Arity {
    Finite(usize),
    Unbounded,
}

pub const ARITY_UNBOUNDED: Arity = Arity::Unbounded;

impl Arity {
    /// Whether `count` values fit.
    pub fn admits(self, count: usize) -> bool {
        match self {
            Self::Finite(n) => count <= n,
            Self::Unbounded => true,
        }
    }

    pub fn is_unbounded(self) -> bool {
        matches!(self, Self::Unbounded)
    }
}

impl Default for Arity {
    fn default() -> Self {
        Self::Finite(1)
    }
}

impl From<usize> for Arity {
    fn from(n: usize) -> Self {
        Self::Finite(n)
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finite(n) => write!(f, "{n}"),
            Self::Unbounded => f.write_str("unbounded"),
        }
    }
}

/// Start describing an option named `name`.
pub fn option(name: impl Into<String>) -> OptionBuilder {
    OptionBuilder::named(name)
}

/// Builder for [`OptionSpec`].
///
/// Setters take and return the builder by value, so an in-progress
/// definition always has exactly one owner.
#[derive(Debug, Clone)]
pub struct OptionBuilder {
    name: String,
    aliases: IndexSet<String>,
    short_names: IndexSet<String>,
    long_names: IndexSet<String>,
    dependencies: IndexSet<String>,
    description: Option<String>,
    required: bool,
    arity: Arity,
    min_values: usize,
    max_values: Option<Arity>,
}

impl OptionBuilder {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: IndexSet::new(),
            short_names: IndexSet::new(),
            long_names: IndexSet::new(),
            dependencies: IndexSet::new(),
            description: None,
            required: false,
            arity: Arity::default(),
            min_values: 1,
            max_values: None,
        }
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        insert_non_empty(&mut self.aliases, alias.into());
        self
    }

    pub fn short_name(mut self, alias: impl Into<String>) -> Self {
        insert_non_empty(&mut self.short_names, alias.into());
        self
    }

    pub fn long_name(mut self, alias: impl Into<String>) -> Self {
        insert_non_empty(&mut self.long_names, alias.into());
        self
    }

    /// Require `dependency` (a canonical option name) whenever this option is given.
    pub fn depends_on(mut self, dependency: impl Into<String>) -> Self {
        insert_non_empty(&mut self.dependencies, dependency.into());
        self
    }

    pub fn described_as(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(self) -> Self {
        self.set_required(true)
    }

    pub fn not_required(self) -> Self {
        self.set_required(false)
    }

    pub fn set_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn arity(mut self, arity: impl Into<Arity>) -> Self {
        self.arity = arity.into();
        self
    }

    /// Shorthand for `arity(ARITY_UNBOUNDED)`.
    pub fn unbounded(self) -> Self {
        self.arity(Arity::Unbounded)
    }

    pub fn min_number_of_required_values(mut self, min: usize) -> Self {
        self.min_values = min;
        self
    }

    /// Defaults to the arity when never set.
    pub fn max_number_of_required_values(mut self, max: impl Into<Arity>) -> Self {
        self.max_values = Some(max.into());
        self
    }

    /// Freeze the definition, converting values with `parser`.
    pub fn parse_as<P: OptionParser>(self, parser: P) -> Result<OptionSpec<P::Value>, ConfigError> {
        let parser = Arc::new(parser);
        let typed: Arc<dyn OptionParser<Value = P::Value>> = parser.clone();
        let erased: Arc<dyn ErasedParser> = parser;
        let def = self.freeze(erased)?;
        Ok(OptionSpec {
            any: AnyOption { def: Arc::new(def) },
            parser: typed,
        })
    }

    fn freeze(self, parser: Arc<dyn ErasedParser>) -> Result<OptionDef, ConfigError> {
        if self.name.is_empty() {
            return Err(ConfigError::EmptyName);
        }
        let Some(description) = self.description else {
            return Err(ConfigError::Incomplete {
                name: self.name,
                missing: "description",
            });
        };
        if self.arity == Arity::Finite(0) {
            return Err(ConfigError::InvalidArity { name: self.name });
        }

        let max_values = self.max_values.unwrap_or(self.arity);
        if Arity::Finite(self.min_values) > max_values || max_values > self.arity {
            return Err(ConfigError::InvalidValueBounds {
                name: self.name,
                min: self.min_values,
                max: max_values,
                arity: self.arity,
            });
        }

        Ok(OptionDef {
            name: self.name,
            aliases: self.aliases,
            short_names: self.short_names,
            long_names: self.long_names,
            dependencies: self.dependencies,
            description,
            required: self.required,
            arity: self.arity,
            min_values: self.min_values,
            max_values,
            parser,
        })
    }
}

fn insert_non_empty(set: &mut IndexSet<String>, value: String) {
    if !value.is_empty() {
        set.insert(value);
    }
}

pub(crate) struct OptionDef {
    name: String,
    aliases: IndexSet<String>,
    short_names: IndexSet<String>,
    long_names: IndexSet<String>,
    dependencies: IndexSet<String>,
    description: String,
    required: bool,
    arity: Arity,
    min_values: usize,
    max_values: Arity,
    parser: Arc<dyn ErasedParser>,
}

/// A frozen option whose value type is erased.
///
/// This is what a [`Parser`](crate::Parser) stores, so options converting to
/// different types can live in one registry.
#[derive(Clone)]
pub struct AnyOption {
    def: Arc<OptionDef>,
}

impl AnyOption {
    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn description(&self) -> &str {
        &self.def.description
    }

    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.def.aliases.iter().map(String::as_str)
    }

    pub fn short_names(&self) -> impl Iterator<Item = &str> {
        self.def.short_names.iter().map(String::as_str)
    }

    pub fn long_names(&self) -> impl Iterator<Item = &str> {
        self.def.long_names.iter().map(String::as_str)
    }

    /// Canonical name followed by every alias, short and long name.
    pub fn all_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name())
            .chain(self.aliases())
            .chain(self.short_names())
            .chain(self.long_names())
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.def.dependencies.iter().map(String::as_str)
    }

    pub fn is_required(&self) -> bool {
        self.def.required
    }

    pub fn arity(&self) -> Arity {
        self.def.arity
    }

    pub fn min_number_of_required_values(&self) -> usize {
        self.def.min_values
    }

    pub fn max_number_of_required_values(&self) -> Arity {
        self.def.max_values
    }

    pub fn value_range(&self) -> ValueRange {
        ValueRange {
            min: self.def.min_values,
            max: self.def.max_values,
        }
    }

    pub fn requires_value(&self) -> bool {
        self.def.parser.value_required()
    }

    pub fn uses_default(&self) -> bool {
        self.def.parser.default_used()
    }

    pub(crate) fn transform(&self, raw: &str) -> Result<AnyValue, TransformError> {
        self.def.parser.transform_erased(raw)
    }

    pub(crate) fn default_value(&self) -> Option<AnyValue> {
        self.def.parser.default_erased()
    }
}

impl fmt::Debug for AnyOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyOption")
            .field("name", &self.def.name)
            .field("aliases", &self.def.aliases)
            .field("short_names", &self.def.short_names)
            .field("long_names", &self.def.long_names)
            .field("dependencies", &self.def.dependencies)
            .field("required", &self.def.required)
            .field("arity", &self.def.arity)
            .field("min_values", &self.def.min_values)
            .field("max_values", &self.def.max_values)
            .finish_non_exhaustive()
    }
}

/// A frozen option producing values of type `T`.
pub struct OptionSpec<T> {
    any: AnyOption,
    parser: Arc<dyn OptionParser<Value = T>>,
}

impl<T> OptionSpec<T> {
    pub fn name(&self) -> &str {
        self.any.name()
    }

    pub fn description(&self) -> &str {
        self.any.description()
    }

    pub fn is_required(&self) -> bool {
        self.any.is_required()
    }

    pub fn arity(&self) -> Arity {
        self.any.arity()
    }

    pub fn dependencies(&self) -> impl Iterator<Item = &str> {
        self.any.dependencies()
    }

    /// The value-type-erased view shared with the registry.
    pub fn as_any(&self) -> &AnyOption {
        &self.any
    }

    pub fn default_value(&self) -> Option<T>
    where
        T: Send + Sync + 'static,
    {
        self.parser.default_value()
    }

    /// Convert one raw value the way the parser will.
    pub fn apply(&self, raw: &str) -> Result<T, TransformError>
    where
        T: Send + Sync + 'static,
    {
        self.parser.transform(raw)
    }
}

impl OptionSpec<()> {
    /// Start describing an option; same as [`option`].
    pub fn named(name: impl Into<String>) -> OptionBuilder {
        OptionBuilder::named(name)
    }
}

impl<T> Clone for OptionSpec<T> {
    fn clone(&self) -> Self {
        Self {
            any: self.any.clone(),
            parser: Arc::clone(&self.parser),
        }
    }
}

impl<T> fmt::Debug for OptionSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("OptionSpec").field(&self.any).finish()
    }
}

impl<T> From<OptionSpec<T>> for AnyOption {
    fn from(spec: OptionSpec<T>) -> Self {
        spec.any
    }
}

impl<T> From<&OptionSpec<T>> for AnyOption {
    fn from(spec: &OptionSpec<T>) -> Self {
        spec.any.clone()
    }
}
