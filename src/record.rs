use std::collections::HashMap;

/// A runtime field value inside a [`Record`].
///
/// The closed set of kinds a compiled query can be tested against. Absence
/// is expressed by the record not containing the key at all; a field that is
/// present with JSON `null` is [`FieldValue::Null`].
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Numeric field (integers and floats both land here)
    Number(f64),

    /// String field
    String(String),

    /// Boolean field
    Bool(bool),

    /// Field present with an explicit null
    Null,
}

impl FieldValue {
    /// Human-readable kind name, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Number(_) => "number",
            FieldValue::String(_) => "string",
            FieldValue::Bool(_) => "boolean",
            FieldValue::Null => "null",
        }
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i64> for FieldValue {
    fn from(n: i64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::String(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::String(s)
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

/// Errors produced while decoding a record from JSON.
#[derive(Debug)]
pub enum RecordError {
    /// Input is not valid JSON
    Json(serde_json::Error),

    /// Top-level JSON value is not an object
    NotAnObject,
}

impl std::fmt::Display for RecordError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordError::Json(e) => write!(f, "Invalid JSON: {}", e),
            RecordError::NotAnObject => write!(f, "Record must be a JSON object"),
        }
    }
}

impl std::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RecordError::Json(e) => Some(e),
            RecordError::NotAnObject => None,
        }
    }
}

impl From<serde_json::Error> for RecordError {
    fn from(e: serde_json::Error) -> Self {
        RecordError::Json(e)
    }
}

/// The field -> value data a compiled query is tested against.
///
/// Records are consumed, never owned or mutated, by evaluation. Typically
/// built from a flattened JSON object via [`Record::from_json_str`], or
/// assembled by hand with [`Record::insert`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Decode a record from a JSON string. The top level must be an object.
    pub fn from_json_str(input: &str) -> Result<Self, RecordError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Self::from_json(value)
    }

    /// Decode a record from a parsed JSON value. The top level must be an
    /// object. Scalar fields are kept; nested arrays and objects are out of
    /// scope for field values and are skipped, so queries see those fields
    /// as absent.
    pub fn from_json(value: serde_json::Value) -> Result<Self, RecordError> {
        let serde_json::Value::Object(map) = value else {
            return Err(RecordError::NotAnObject);
        };

        let mut fields = HashMap::with_capacity(map.len());
        for (key, v) in map {
            match v {
                serde_json::Value::Number(n) => {
                    if let Some(f) = n.as_f64() {
                        fields.insert(key, FieldValue::Number(f));
                    }
                }
                serde_json::Value::String(s) => {
                    fields.insert(key, FieldValue::String(s));
                }
                serde_json::Value::Bool(b) => {
                    fields.insert(key, FieldValue::Bool(b));
                }
                serde_json::Value::Null => {
                    fields.insert(key, FieldValue::Null);
                }
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => {}
            }
        }

        Ok(Record { fields })
    }
}

impl FromIterator<(String, FieldValue)> for Record {
    fn from_iter<T: IntoIterator<Item = (String, FieldValue)>>(iter: T) -> Self {
        Record {
            fields: iter.into_iter().collect(),
        }
    }
}
