use std::any::Any;
use std::fmt;

use indexmap::{IndexMap, IndexSet};

use crate::option::OptionSpec;
use crate::transform::AnyValue;

/// Values collected by a successful parse.
///
/// Options appear in the order they were first given. An option that was not
/// given reads as having no values.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    entries: IndexMap<String, Values>,
    explicit: IndexSet<String>,
    leftovers: Vec<String>,
}

#[derive(Clone, Default)]
struct Values {
    converted: Vec<AnyValue>,
    raw: Vec<Option<String>>,
}

impl fmt::Debug for Values {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Values")
            .field("count", &self.converted.len())
            .field("raw", &self.raw)
            .finish()
    }
}

impl ParseResult {
    /// Last value of `spec`.
    pub fn get<T: Any>(&self, spec: &OptionSpec<T>) -> Option<&T> {
        self.values::<T>(spec.name()).pop()
    }

    /// Every value of `spec`, in input order.
    pub fn get_all<T: Any>(&self, spec: &OptionSpec<T>) -> Vec<&T> {
        self.values::<T>(spec.name())
    }

    /// Values of the option named `name` that are of type `T`.
    ///
    /// Values of any other type are skipped, so asking with the wrong type
    /// yields an empty list.
    pub fn values<T: Any>(&self, name: &str) -> Vec<&T> {
        self.entries
            .get(name)
            .map(|v| {
                v.converted
                    .iter()
                    .filter_map(|value| value.downcast_ref::<T>())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Raw text of each recorded value, index-aligned with the values.
    /// Defaults have no raw text and read as `None`.
    pub fn raw_values(&self, name: &str) -> Vec<Option<&str>> {
        self.entries
            .get(name)
            .map(|v| v.raw.iter().map(Option::as_deref).collect())
            .unwrap_or_default()
    }

    /// Number of values recorded for `name`.
    pub fn count(&self, name: &str) -> usize {
        self.entries.get(name).map_or(0, |v| v.converted.len())
    }

    /// Whether `name` has at least one value.
    pub fn contains(&self, name: &str) -> bool {
        self.count(name) > 0
    }

    /// Whether the option's flag appeared in the input.
    pub fn is_explicit(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    /// Names with at least one value, in first-encountered order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Values given before any flag.
    pub fn leftovers(&self) -> &[String] {
        &self.leftovers
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ParseResult {
    pub(crate) fn push_explicit(&mut self, name: &str) {
        if !self.explicit.contains(name) {
            self.explicit.insert(name.to_string());
        }
    }

    pub(crate) fn push_value(&mut self, name: &str, raw: &str, value: AnyValue) {
        let entry = self.entry(name);
        entry.converted.push(value);
        entry.raw.push(Some(raw.to_string()));
    }

    pub(crate) fn push_default(&mut self, name: &str, value: AnyValue) {
        let entry = self.entry(name);
        entry.converted.push(value);
        entry.raw.push(None);
    }

    pub(crate) fn push_leftover(&mut self, value: &str) {
        self.leftovers.push(value.to_string());
    }

    fn entry(&mut self, name: &str) -> &mut Values {
        self.entries.entry(name.to_string()).or_default()
    }
}
