//! Value transforms.
//!
//! Every option converts its raw textual values through an [`OptionParser`].
//! Plain closures are adapted with [`map`], [`from_fn`], [`optional`] and
//! [`custom`]; the built-ins ([`flag`], [`integer`], [`float`], [`boolean`],
//! [`string`]) cover the common cases.

use std::any::Any;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use thiserror::Error;

/// Why a raw value could not be converted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransformError {
    message: String,
}

impl TransformError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Converts raw option values into `Self::Value`.
///
/// Besides the conversion itself, a parser decides what happens when an
/// occurrence carries no value at all: whether a value is mandatory, and
/// whether a default stands in for it.
pub trait OptionParser: Send + Sync + 'static {
    type Value: Send + Sync + 'static;

    /// Value recorded for an occurrence without values, when [`uses_default`](Self::uses_default).
    fn default_value(&self) -> Option<Self::Value> {
        None
    }

    fn uses_default(&self) -> bool {
        false
    }

    /// Whether an occurrence must carry at least the option's minimum number of values.
    fn requires_value(&self) -> bool {
        true
    }

    fn transform(&self, raw: &str) -> Result<Self::Value, TransformError>;
}

/// Infallible transform, e.g. `map(|s| s.len())`.
pub fn map<T, F>(f: F) -> Map<F, T>
where
    F: Fn(&str) -> T + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    Map {
        f,
        _marker: PhantomData,
    }
}

/// Fallible transform; the error's `Display` becomes the failure cause.
pub fn from_fn<T, E, F>(f: F) -> FromFn<F, T, E>
where
    F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    T: Send + Sync + 'static,
    E: fmt::Display + 'static,
{
    FromFn {
        f,
        _marker: PhantomData,
    }
}

/// Transform that may produce nothing; `None` counts as a failure.
pub fn optional<T, F>(f: F) -> Optional<F, T>
where
    F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    Optional {
        f,
        _marker: PhantomData,
    }
}

/// Like [`optional`], with a configurable default and value requirement.
///
/// ```
/// use optspec::transform::{self, OptionParser};
///
/// let port = transform::custom(|s: &str| s.parse::<u16>().ok())
///     .with_default(8080)
///     .require_value(false);
/// assert_eq!(port.default_value(), Some(8080));
/// ```
pub fn custom<T, F>(f: F) -> Custom<F, T>
where
    F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    Custom {
        f,
        default: None,
        use_default: false,
        requires_value: true,
    }
}

pub struct Map<F, T> {
    f: F,
    _marker: PhantomData<fn() -> T>,
}

impl<F, T> OptionParser for Map<F, T>
where
    F: Fn(&str) -> T + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    type Value = T;

    fn transform(&self, raw: &str) -> Result<T, TransformError> {
        Ok((self.f)(raw))
    }
}

pub struct FromFn<F, T, E> {
    f: F,
    _marker: PhantomData<fn() -> (T, E)>,
}

impl<F, T, E> OptionParser for FromFn<F, T, E>
where
    F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    T: Send + Sync + 'static,
    E: fmt::Display + 'static,
{
    type Value = T;

    fn transform(&self, raw: &str) -> Result<T, TransformError> {
        (self.f)(raw).map_err(|e| TransformError::new(e.to_string()))
    }
}

pub struct Optional<F, T> {
    f: F,
    _marker: PhantomData<fn() -> T>,
}

impl<F, T> OptionParser for Optional<F, T>
where
    F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    T: Send + Sync + 'static,
{
    type Value = T;

    fn transform(&self, raw: &str) -> Result<T, TransformError> {
        (self.f)(raw).ok_or_else(|| TransformError::new("no value could be produced"))
    }
}

pub struct Custom<F, T> {
    f: F,
    default: Option<T>,
    use_default: bool,
    requires_value: bool,
}

impl<F, T> Custom<F, T> {
    /// Sets the default and turns on [`use_default`](Self::use_default).
    pub fn with_default(mut self, value: T) -> Self {
        self.default = Some(value);
        self.use_default = true;
        self
    }

    pub fn use_default(mut self, use_default: bool) -> Self {
        self.use_default = use_default;
        self
    }

    pub fn require_value(mut self, requires_value: bool) -> Self {
        self.requires_value = requires_value;
        self
    }
}

impl<F, T> OptionParser for Custom<F, T>
where
    F: Fn(&str) -> Option<T> + Send + Sync + 'static,
    T: Clone + Send + Sync + 'static,
{
    type Value = T;

    fn default_value(&self) -> Option<T> {
        self.default.clone()
    }

    fn uses_default(&self) -> bool {
        self.use_default
    }

    fn requires_value(&self) -> bool {
        self.requires_value
    }

    fn transform(&self, raw: &str) -> Result<T, TransformError> {
        (self.f)(raw).ok_or_else(|| TransformError::new("no value could be produced"))
    }
}

/// Boolean switch: `-verbose` alone records `true`.
pub fn flag() -> Flag {
    Flag
}

/// Signed integer; malformed text yields `0` instead of an error.
pub fn integer() -> Integer {
    Integer
}

/// Floating point; malformed text yields `0.0` instead of an error.
pub fn float() -> Float {
    Float
}

/// Boolean that needs an explicit value.
pub fn boolean() -> Boolean {
    Boolean
}

pub fn string() -> Text {
    Text
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Flag;

#[derive(Debug, Clone, Copy, Default)]
pub struct Integer;

#[derive(Debug, Clone, Copy, Default)]
pub struct Float;

#[derive(Debug, Clone, Copy, Default)]
pub struct Boolean;

#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

fn parse_bool_word(raw: &str) -> Result<bool, TransformError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(TransformError::new(format!(
            "expected one of true, false, yes, no, on, off, 1, 0; got '{raw}'"
        ))),
    }
}

impl OptionParser for Flag {
    type Value = bool;

    fn default_value(&self) -> Option<bool> {
        Some(true)
    }

    fn uses_default(&self) -> bool {
        true
    }

    fn requires_value(&self) -> bool {
        false
    }

    fn transform(&self, raw: &str) -> Result<bool, TransformError> {
        parse_bool_word(raw)
    }
}

impl OptionParser for Integer {
    type Value = i64;

    fn transform(&self, raw: &str) -> Result<i64, TransformError> {
        Ok(raw.trim().parse().unwrap_or(0))
    }
}

impl OptionParser for Float {
    type Value = f64;

    fn transform(&self, raw: &str) -> Result<f64, TransformError> {
        Ok(raw.trim().parse().unwrap_or(0.0))
    }
}

impl OptionParser for Boolean {
    type Value = bool;

    fn transform(&self, raw: &str) -> Result<bool, TransformError> {
        parse_bool_word(raw)
    }
}

impl OptionParser for Text {
    type Value = String;

    fn transform(&self, raw: &str) -> Result<String, TransformError> {
        Ok(raw.to_string())
    }
}

/// A converted value whose concrete type is only known to its option.
pub(crate) type AnyValue = Arc<dyn Any + Send + Sync>;

/// Object-safe view of an [`OptionParser`], so options of different value
/// types can share one registry.
pub(crate) trait ErasedParser: Send + Sync {
    fn transform_erased(&self, raw: &str) -> Result<AnyValue, TransformError>;
    fn default_erased(&self) -> Option<AnyValue>;
    fn default_used(&self) -> bool;
    fn value_required(&self) -> bool;
}

impl<P: OptionParser> ErasedParser for P {
    fn transform_erased(&self, raw: &str) -> Result<AnyValue, TransformError> {
        let value: AnyValue = Arc::new(OptionParser::transform(self, raw)?);
        Ok(value)
    }

    fn default_erased(&self) -> Option<AnyValue> {
        OptionParser::default_value(self).map(|v| Arc::new(v) as AnyValue)
    }

    fn default_used(&self) -> bool {
        OptionParser::uses_default(self)
    }

    fn value_required(&self) -> bool {
        OptionParser::requires_value(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_falls_back_to_zero_on_malformed_text() {
        assert_eq!(integer().transform("234").unwrap(), 234);
        assert_eq!(integer().transform(" -7 ").unwrap(), -7);
        assert_eq!(integer().transform("234a").unwrap(), 0);
    }

    #[test]
    fn float_falls_back_to_zero_on_malformed_text() {
        assert_eq!(float().transform("2.5").unwrap(), 2.5);
        assert_eq!(float().transform("two").unwrap(), 0.0);
    }

    #[test]
    fn flag_defaults_to_true_without_value() {
        let f = flag();
        assert!(!f.requires_value());
        assert!(f.uses_default());
        assert_eq!(f.default_value(), Some(true));
        assert!(!f.transform("off").unwrap());
        assert!(f.transform("YES").unwrap());
        assert!(f.transform("maybe").is_err());
    }

    #[test]
    fn boolean_requires_a_value() {
        let b = boolean();
        assert!(b.requires_value());
        assert!(!b.uses_default());
        assert!(b.transform("nope").is_err());
    }

    #[test]
    fn from_fn_reports_the_error_display() {
        let p = from_fn(|s: &str| s.parse::<u8>());
        assert_eq!(p.transform("12").unwrap(), 12);
        let err = p.transform("300").unwrap_err();
        assert!(err.message().contains("too large"), "{err}");
    }

    #[test]
    fn optional_treats_none_as_failure() {
        let p = optional(|s: &str| s.strip_prefix("id:").map(str::to_string));
        assert_eq!(p.transform("id:42").unwrap(), "42");
        assert!(p.transform("42").is_err());
    }

    #[test]
    fn custom_carries_default_and_value_policy() {
        let p = custom(|s: &str| s.parse::<u16>().ok())
            .with_default(8080)
            .require_value(false);
        assert_eq!(p.default_value(), Some(8080));
        assert!(p.uses_default());
        assert!(!p.requires_value());

        let bare = custom(|s: &str| s.parse::<u16>().ok());
        assert_eq!(bare.default_value(), None);
        assert!(!bare.uses_default());
        assert!(bare.requires_value());
    }

    #[test]
    fn erased_transform_downcasts_to_the_value_type() {
        let p = map(|s: &str| s.len());
        let value = p.transform_erased("hello").unwrap();
        assert_eq!(value.downcast_ref::<usize>(), Some(&5));
        assert!(p.default_erased().is_none());
    }
}
