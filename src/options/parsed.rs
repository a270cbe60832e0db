use super::ValueType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The option source refused an assembled argument list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("arguments rejected: {message}")]
pub struct ParseRejected {
    pub message: String,
}

impl ParseRejected {
    pub fn new<S: ToString>(message: S) -> ParseRejected {
        ParseRejected {
            message: message.to_string(),
        }
    }
}

/// A single parsed option value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParsedValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

impl ParsedValue {
    /// Interpret raw text according to the declared value type.
    pub fn from_text(text: &str, value_type: ValueType) -> Result<ParsedValue, ParseRejected> {
        match value_type {
            ValueType::String => Ok(ParsedValue::Text(text.to_string())),
            ValueType::Integer => text
                .parse()
                .map(ParsedValue::Integer)
                .map_err(|e| ParseRejected::new(format!("invalid integer '{text}': {e}"))),
            ValueType::Float => text
                .parse()
                .map(ParsedValue::Float)
                .map_err(|e| ParseRejected::new(format!("invalid float '{text}': {e}"))),
        }
    }
}

impl fmt::Display for ParsedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParsedValue::Bool(b) => write!(f, "{b}"),
            ParsedValue::Integer(i) => write!(f, "{i}"),
            ParsedValue::Float(x) => write!(f, "{x}"),
            ParsedValue::Text(t) => write!(f, "{t}"),
        }
    }
}

/// Structured result of a successful parse, keyed by option identifier.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParsedResult {
    pub values: BTreeMap<String, ParsedValue>,
}

impl ParsedResult {
    pub fn get(&self, dest: &str) -> Option<&ParsedValue> {
        self.values.get(dest)
    }

    pub fn insert<S: ToString>(&mut self, dest: S, value: ParsedValue) -> &mut Self {
        self.values.insert(dest.to_string(), value);
        self
    }
}

/// A value used to pre-seed a control when the form is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InitialValue {
    Bool(bool),
    Text(String),
}

impl InitialValue {
    /// Boolean reading of the value, for flag controls
    pub fn as_bool(&self) -> bool {
        match self {
            InitialValue::Bool(b) => *b,
            InitialValue::Text(t) => matches!(t.trim(), "true" | "1" | "yes" | "on"),
        }
    }
}

impl fmt::Display for InitialValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InitialValue::Bool(b) => write!(f, "{b}"),
            InitialValue::Text(t) => write!(f, "{t}"),
        }
    }
}

impl From<bool> for InitialValue {
    fn from(b: bool) -> Self {
        InitialValue::Bool(b)
    }
}

impl From<&str> for InitialValue {
    fn from(s: &str) -> Self {
        InitialValue::Text(s.to_string())
    }
}

impl From<String> for InitialValue {
    fn from(s: String) -> Self {
        InitialValue::Text(s)
    }
}

/// Identifier-to-value map that takes precedence over declared defaults.
pub type InitialArguments = BTreeMap<String, InitialValue>;

/// Read initial values from a TOML table of `dest = value` pairs.
///
/// Booleans stay booleans; every other scalar is rendered as text since that is
/// what a value control holds.
pub fn initial_arguments_from_toml(contents: &str) -> anyhow::Result<InitialArguments> {
    use anyhow::{anyhow, Context};

    let table: toml::Table =
        toml::from_str(contents).with_context(|| "Failed to parse initial values as TOML")?;

    table
        .into_iter()
        .map(|(dest, value)| {
            let value = match value {
                toml::Value::Boolean(b) => InitialValue::Bool(b),
                toml::Value::String(s) => InitialValue::Text(s),
                toml::Value::Integer(i) => InitialValue::Text(i.to_string()),
                toml::Value::Float(x) => InitialValue::Text(x.to_string()),
                other => {
                    return Err(anyhow!(
                        "Initial value for '{dest}' must be a scalar, found {}",
                        other.type_str()
                    ))
                }
            };
            Ok((dest, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn can_parse_typed_text() {
        assert_eq!(
            ParsedValue::from_text("5", ValueType::Integer),
            Ok(ParsedValue::Integer(5))
        );
        assert_eq!(
            ParsedValue::from_text("2.5", ValueType::Float),
            Ok(ParsedValue::Float(2.5))
        );
        assert_eq!(
            ParsedValue::from_text("a b", ValueType::String),
            Ok(ParsedValue::Text("a b".to_string()))
        );
        assert!(ParsedValue::from_text("abc", ValueType::Integer).is_err());
    }

    #[test]
    fn initial_values_read_from_toml() {
        let initial = initial_arguments_from_toml(
            r#"
            verbose = true
            count = 5
            ratio = 0.5
            name = "hello world"
            "#,
        )
        .expect("can parse initial values");

        assert_eq!(initial.get("verbose"), Some(&InitialValue::Bool(true)));
        assert_eq!(initial.get("count"), Some(&InitialValue::from("5")));
        assert_eq!(initial.get("ratio"), Some(&InitialValue::from("0.5")));
        assert_eq!(initial.get("name"), Some(&InitialValue::from("hello world")));
    }

    #[test]
    fn nested_initial_values_are_rejected() {
        assert!(initial_arguments_from_toml("[section]\nkey = 1").is_err());
    }

    #[test]
    fn parsed_result_serialises_as_plain_map() {
        let mut result = ParsedResult::default();
        result
            .insert("verbose", ParsedValue::Bool(true))
            .insert("count", ParsedValue::Integer(5));
        let json = serde_json::to_string(&result).expect("can serialise result");
        assert_eq!(json, r#"{"count":5,"verbose":true}"#);
    }
}
