//! Transforms that produce JSON values, so manifest-declared options of
//! different kinds can be collected and printed uniformly.

use optspec::transform;
use optspec::{OptionParser, TransformError};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Name of a built-in transform, as written in the manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    #[default]
    String,
    Integer,
    Float,
    Boolean,
    Flag,
    /// Length in bytes of the raw value.
    Length,
}

impl TransformKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::Boolean => "boolean",
            Self::Flag => "flag",
            Self::Length => "length",
        }
    }
}

/// [`OptionParser`] over [`TransformKind`], with an optional manifest default.
#[derive(Debug, Clone)]
pub struct JsonTransform {
    kind: TransformKind,
    default: Option<Value>,
}

impl JsonTransform {
    pub fn new(kind: TransformKind, default: Option<Value>) -> Self {
        Self { kind, default }
    }

    pub fn kind(&self) -> TransformKind {
        self.kind
    }
}

impl OptionParser for JsonTransform {
    type Value = Value;

    fn default_value(&self) -> Option<Value> {
        match (&self.default, self.kind) {
            (Some(value), _) => Some(value.clone()),
            (None, TransformKind::Flag) => transform::flag().default_value().map(Value::Bool),
            (None, _) => None,
        }
    }

    fn uses_default(&self) -> bool {
        self.default.is_some() || self.kind == TransformKind::Flag
    }

    fn requires_value(&self) -> bool {
        self.default.is_none() && self.kind != TransformKind::Flag
    }

    fn transform(&self, raw: &str) -> Result<Value, TransformError> {
        let value = match self.kind {
            TransformKind::String => Value::String(transform::string().transform(raw)?),
            TransformKind::Integer => Value::from(transform::integer().transform(raw)?),
            TransformKind::Float => Value::from(transform::float().transform(raw)?),
            TransformKind::Boolean => Value::Bool(transform::boolean().transform(raw)?),
            TransformKind::Flag => Value::Bool(transform::flag().transform(raw)?),
            TransformKind::Length => Value::from(raw.len()),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn converts_each_kind() {
        let convert = |kind, raw| JsonTransform::new(kind, None).transform(raw).unwrap();
        assert_eq!(convert(TransformKind::String, "abc"), json!("abc"));
        assert_eq!(convert(TransformKind::Integer, "42"), json!(42));
        assert_eq!(convert(TransformKind::Integer, "234a"), json!(0));
        assert_eq!(convert(TransformKind::Float, "2.5"), json!(2.5));
        assert_eq!(convert(TransformKind::Boolean, "yes"), json!(true));
        assert_eq!(convert(TransformKind::Flag, "off"), json!(false));
        assert_eq!(convert(TransformKind::Length, "hello"), json!(5));
    }

    #[test]
    fn boolean_rejects_other_words() {
        let err = JsonTransform::new(TransformKind::Boolean, None)
            .transform("maybe")
            .unwrap_err();
        assert!(err.message().contains("maybe"));
    }

    #[test]
    fn flag_defaults_to_true_without_value() {
        let flag = JsonTransform::new(TransformKind::Flag, None);
        assert!(flag.uses_default());
        assert!(!flag.requires_value());
        assert_eq!(flag.default_value(), Some(json!(true)));
    }

    #[test]
    fn manifest_default_relaxes_value_requirement() {
        let level = JsonTransform::new(TransformKind::Integer, Some(json!(3)));
        assert!(level.uses_default());
        assert!(!level.requires_value());
        assert_eq!(level.default_value(), Some(json!(3)));

        let plain = JsonTransform::new(TransformKind::Integer, None);
        assert!(!plain.uses_default());
        assert!(plain.requires_value());
        assert_eq!(plain.default_value(), None);
    }
}
