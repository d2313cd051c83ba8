//! Declarative option definitions stored as JSON.
//!
//! A manifest lists options the same way the builder API does, but as data:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "configuration": { "optionPrefix": "-", "unknownOptions": "ignore" },
//!   "options": [
//!     { "name": "size", "aliases": ["s"], "description": "word length", "transform": "length" }
//!   ]
//! }
//! ```
//!
//! Every value a manifest-built parser produces is a [`serde_json::Value`].

mod error;
mod value;

use std::fs;
use std::path::Path;

use optspec::{Arity, OptionSpec, Parser, ParserConfiguration, option};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use error::ManifestError;
pub use value::{JsonTransform, TransformKind};

pub const DEFAULT_MANIFEST_NAME: &str = "optspec.json";
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_version: Option<u32>,

    #[serde(default)]
    pub configuration: ParserConfiguration,

    #[serde(default)]
    pub options: Vec<OptionEntry>,
}

/// One option definition.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionEntry {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default)]
    pub transform: TransformKind,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arity: Option<ArityField>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_values: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_values: Option<ArityField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub depends_on: Vec<String>,
    /// Recorded for an occurrence without values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Arity as written in JSON: a count or the word `"unbounded"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ArityField {
    Count(usize),
    Keyword(ArityKeyword),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArityKeyword {
    Unbounded,
}

impl From<ArityField> for Arity {
    fn from(field: ArityField) -> Self {
        match field {
            ArityField::Count(n) => Arity::Finite(n),
            ArityField::Keyword(ArityKeyword::Unbounded) => Arity::Unbounded,
        }
    }
}

impl Manifest {
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ManifestError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let manifest = Self::from_json(&contents)?;
        tracing::debug!(
            path = %path.display(),
            options = manifest.options.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Freeze every entry and collect them into a [`Parser`].
    pub fn to_parser(&self) -> Result<Parser, ManifestError> {
        if let Some(found) = self.schema_version.filter(|v| *v != SCHEMA_VERSION) {
            return Err(ManifestError::UnsupportedSchema {
                found,
                expected: SCHEMA_VERSION,
            });
        }
        let specs = self
            .options
            .iter()
            .map(OptionEntry::to_spec)
            .collect::<Result<Vec<_>, _>>()?;
        Parser::build(self.configuration, specs).map_err(ManifestError::Parser)
    }

    /// Sample document written by `optspec init`.
    pub fn example() -> Self {
        Self {
            schema_version: Some(SCHEMA_VERSION),
            configuration: ParserConfiguration::default(),
            options: vec![
                OptionEntry {
                    name: "size".to_string(),
                    aliases: vec!["s".to_string(), "sz".to_string()],
                    description: "length of the given word".to_string(),
                    transform: TransformKind::Length,
                    ..OptionEntry::default()
                },
                OptionEntry {
                    name: "verbose".to_string(),
                    aliases: vec!["v".to_string()],
                    description: "print more".to_string(),
                    transform: TransformKind::Flag,
                    depends_on: vec!["size".to_string()],
                    ..OptionEntry::default()
                },
                OptionEntry {
                    name: "files".to_string(),
                    aliases: vec!["f".to_string()],
                    description: "input files".to_string(),
                    arity: Some(ArityField::Keyword(ArityKeyword::Unbounded)),
                    ..OptionEntry::default()
                },
            ],
        }
    }
}

impl OptionEntry {
    pub fn to_spec(&self) -> Result<OptionSpec<Value>, ManifestError> {
        let mut builder = option(self.name.as_str()).set_required(self.required);
        // An empty description counts as missing.
        if !self.description.is_empty() {
            builder = builder.described_as(self.description.as_str());
        }
        for alias in &self.aliases {
            builder = builder.alias(alias.as_str());
        }
        for dependency in &self.depends_on {
            builder = builder.depends_on(dependency.as_str());
        }
        if let Some(arity) = self.arity {
            builder = builder.arity(arity);
        }
        if let Some(min) = self.min_values {
            builder = builder.min_number_of_required_values(min);
        }
        if let Some(max) = self.max_values {
            builder = builder.max_number_of_required_values(max);
        }
        builder
            .parse_as(JsonTransform::new(self.transform, self.default.clone()))
            .map_err(|source| ManifestError::Option {
                name: self.name.clone(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use optspec::{ConfigError, ParseError, UnknownOptions};
    use serde_json::json;
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn make_temp_dir(prefix: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let pid = std::process::id();
        let dir = std::env::temp_dir().join(format!("optspec-{prefix}-{pid}-{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn manifest_deserializes_camel_case() {
        let json = r#"{
  "schemaVersion": 1,
  "configuration": { "optionPrefix": "/", "unknownOptions": "report" },
  "options": [
    {
      "name": "files",
      "aliases": ["f"],
      "description": "inputs",
      "transform": "string",
      "required": true,
      "arity": "unbounded",
      "minValues": 2,
      "maxValues": 4,
      "dependsOn": ["mode"],
      "default": "none"
    },
    { "name": "mode", "description": "mode", "transform": "integer", "arity": 1 }
  ]
}"#;
        let m = Manifest::from_json(json).unwrap();
        assert_eq!(m.schema_version, Some(1));
        assert_eq!(m.configuration.option_prefix, '/');
        assert_eq!(m.configuration.unknown_options, UnknownOptions::Report);
        assert_eq!(m.options.len(), 2);

        let files = &m.options[0];
        assert_eq!(files.aliases, vec!["f".to_string()]);
        assert!(files.required);
        assert_eq!(files.arity.map(Arity::from), Some(Arity::Unbounded));
        assert_eq!(files.min_values, Some(2));
        assert_eq!(files.max_values.map(Arity::from), Some(Arity::Finite(4)));
        assert_eq!(files.depends_on, vec!["mode".to_string()]);
        assert_eq!(files.default, Some(json!("none")));

        let mode = &m.options[1];
        assert_eq!(mode.transform, TransformKind::Integer);
        assert_eq!(mode.arity, Some(ArityField::Count(1)));
        assert!(mode.depends_on.is_empty());
    }

    #[test]
    fn missing_sections_use_defaults() {
        let m = Manifest::from_json("{}").unwrap();
        assert_eq!(m, Manifest::default());
        assert_eq!(m.configuration, ParserConfiguration::default());
    }

    #[test]
    fn rejects_unknown_arity_keyword() {
        let err = Manifest::from_json(
            r#"{ "options": [ { "name": "a", "description": "a", "arity": "many" } ] }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ManifestError::Json(_)));
    }

    #[test]
    fn example_parses_size_and_verbose() {
        let parser = Manifest::example().to_parser().unwrap();

        let result = parser.parse(&["-s", "hello", "-v"]).unwrap();
        assert_eq!(result.values::<Value>("size"), vec![&json!(5)]);
        assert_eq!(result.values::<Value>("verbose"), vec![&json!(true)]);

        let errors = parser.parse(&["-verbose"]).unwrap_err();
        assert_eq!(
            errors.into_vec(),
            vec![ParseError::MissingDependency {
                name: "verbose".to_string(),
                dependency: "size".to_string(),
            }]
        );
    }

    #[test]
    fn example_round_trips_through_json() {
        let json = serde_json::to_string_pretty(&Manifest::example()).unwrap();
        assert!(json.contains("\"arity\": \"unbounded\""));
        assert!(json.contains("\"dependsOn\""));
        assert_eq!(Manifest::from_json(&json).unwrap(), Manifest::example());
    }

    #[test]
    fn entry_without_description_is_reported_by_name() {
        let m = Manifest::from_json(r#"{ "options": [ { "name": "quiet" } ] }"#).unwrap();
        let err = m.to_parser().unwrap_err();
        let ManifestError::Option { name, source } = err else {
            panic!("expected option error, got {err:?}");
        };
        assert_eq!(name, "quiet");
        assert!(matches!(source, ConfigError::Incomplete { .. }));
    }

    #[test]
    fn duplicate_alias_fails_parser_build() {
        let m = Manifest::from_json(
            r#"{ "options": [
                { "name": "size", "aliases": ["s"], "description": "size" },
                { "name": "speed", "aliases": ["s"], "description": "speed" }
            ] }"#,
        )
        .unwrap();
        let err = m.to_parser().unwrap_err();
        assert!(matches!(
            err,
            ManifestError::Parser(ConfigError::DuplicateName { .. })
        ));
    }

    #[test]
    fn unsupported_schema_version_is_rejected() {
        let m = Manifest::from_json(r#"{ "schemaVersion": 7 }"#).unwrap();
        assert!(matches!(
            m.to_parser().unwrap_err(),
            ManifestError::UnsupportedSchema {
                found: 7,
                expected: 1
            }
        ));
    }

    #[test]
    fn manifest_default_fills_bare_occurrence() {
        let m = Manifest::from_json(
            r#"{ "options": [
                { "name": "level", "description": "level", "transform": "integer", "default": 3 }
            ] }"#,
        )
        .unwrap();
        let parser = m.to_parser().unwrap();
        let bare = parser.parse(&["-level"]).unwrap();
        assert_eq!(bare.values::<Value>("level"), vec![&json!(3)]);
        let given = parser.parse(&["-level", "9"]).unwrap();
        assert_eq!(given.values::<Value>("level"), vec![&json!(9)]);
    }

    #[test]
    fn from_file_reads_and_reports_missing_files() {
        let dir = make_temp_dir("manifest-file");
        let path = dir.join(DEFAULT_MANIFEST_NAME);
        fs::write(&path, serde_json::to_vec_pretty(&Manifest::example()).unwrap()).unwrap();

        let m = Manifest::from_file(&path).unwrap();
        assert_eq!(m.options.len(), 3);

        let err = Manifest::from_file(dir.join("missing.json")).unwrap_err();
        assert!(matches!(err, ManifestError::Read { .. }));

        let _ = fs::remove_dir_all(&dir);
    }
}
