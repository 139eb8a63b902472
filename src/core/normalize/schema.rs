use crate::core::normalize::NormalizeError;
use serde_json::{Map, Value};

/// Declarative mapping from one raw option value to its canonical form.
///
/// A schema lists fields in canonical output order. Each field names its
/// user-facing source key, its canonical target key, whether it is
/// required, an optional injected default, and the shape its value must
/// coerce into. Null values count as absent. Lookups fall back to the
/// canonical spelling so running a schema over its own output is identity.
pub struct Schema {
    invalid: &'static str,
    scalar_field: Option<&'static str>,
    fields: Vec<Field>,
}

impl Schema {
    /// Create a schema; `invalid` is the error raised when the raw value
    /// is not a mapping and no scalar shorthand is configured.
    pub fn new(invalid: &'static str) -> Self {
        Schema {
            invalid,
            scalar_field: None,
            fields: Vec::new(),
        }
    }

    /// Treat a non-mapping input as a mapping holding it under `field`.
    pub fn scalar_shorthand(mut self, field: &'static str) -> Self {
        self.scalar_field = Some(field);
        self
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// Normalize a raw value into the canonical mapping.
    ///
    /// Keys not named by any field are dropped.
    pub fn normalize(&self, raw: &Value) -> Result<Map<String, Value>, NormalizeError> {
        let mapping = self.as_mapping(raw)?;
        let mut canonical = Map::new();
        for field in &self.fields {
            match field.lookup(&mapping) {
                Some(value) => {
                    canonical.insert(field.target.to_string(), field.shape.coerce(value)?);
                }
                None => {
                    if let Some(missing) = field.missing {
                        return Err(NormalizeError::data(missing));
                    }
                    if let Some(default) = &field.default {
                        canonical.insert(field.target.to_string(), default.clone());
                    }
                }
            }
        }
        Ok(canonical)
    }

    fn as_mapping(&self, raw: &Value) -> Result<Map<String, Value>, NormalizeError> {
        match raw {
            Value::Object(mapping) => Ok(mapping.clone()),
            other => match self.scalar_field {
                Some(field) => {
                    let mut mapping = Map::new();
                    mapping.insert(field.to_string(), other.clone());
                    Ok(mapping)
                }
                None => Err(NormalizeError::data(self.invalid)),
            },
        }
    }
}

/// One schema field: source key, canonical target, requirement, default,
/// and value shape.
pub struct Field {
    source: &'static str,
    target: &'static str,
    missing: Option<&'static str>,
    default: Option<Value>,
    shape: Shape,
}

impl Field {
    /// Field that must be present and non-null; `missing` is the error
    /// raised otherwise.
    pub fn required(source: &'static str, missing: &'static str) -> Self {
        Field {
            source,
            target: source,
            missing: Some(missing),
            default: None,
            shape: Shape::Any,
        }
    }

    /// Field that may be absent.
    pub fn optional(source: &'static str) -> Self {
        Field {
            source,
            target: source,
            missing: None,
            default: None,
            shape: Shape::Any,
        }
    }

    /// Emit the field under a canonical key different from the source.
    pub fn renamed(mut self, target: &'static str) -> Self {
        self.target = target;
        self
    }

    /// Inject `default` when the field is absent.
    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Require a non-empty string.
    pub fn text(mut self, invalid: &'static str) -> Self {
        self.shape = Shape::Text(invalid);
        self
    }

    /// Accept any scalar and keep it as-is.
    pub fn scalar(mut self, invalid: &'static str) -> Self {
        self.shape = Shape::Scalar(invalid);
        self
    }

    /// Accept a string or a sequence of strings, always yielding a
    /// sequence.
    pub fn string_seq(mut self, invalid: &'static str) -> Self {
        self.shape = Shape::StringSeq(invalid);
        self
    }

    /// Normalize a nested mapping through `schema`.
    pub fn nested(mut self, schema: Schema, invalid: &'static str) -> Self {
        self.shape = Shape::Nested(Box::new(schema), invalid);
        self
    }

    fn lookup<'a>(&self, mapping: &'a Map<String, Value>) -> Option<&'a Value> {
        let value = mapping.get(self.source).or_else(|| {
            if self.target != self.source {
                mapping.get(self.target)
            } else {
                None
            }
        });
        value.filter(|v| !v.is_null())
    }
}

enum Shape {
    Any,
    Text(&'static str),
    Scalar(&'static str),
    StringSeq(&'static str),
    Nested(Box<Schema>, &'static str),
}

impl Shape {
    fn coerce(&self, value: &Value) -> Result<Value, NormalizeError> {
        match self {
            Shape::Any => Ok(value.clone()),
            Shape::Text(invalid) => match value.as_str() {
                Some(text) if !text.is_empty() => Ok(Value::String(text.to_string())),
                _ => Err(NormalizeError::data(*invalid)),
            },
            Shape::Scalar(invalid) => match value {
                Value::String(_) | Value::Number(_) | Value::Bool(_) => Ok(value.clone()),
                _ => Err(NormalizeError::data(*invalid)),
            },
            Shape::StringSeq(invalid) => match value {
                Value::String(text) => Ok(Value::Array(vec![Value::String(text.clone())])),
                Value::Array(items) => {
                    let mut seq = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            Value::String(text) => seq.push(Value::String(text.clone())),
                            _ => return Err(NormalizeError::data(*invalid)),
                        }
                    }
                    Ok(Value::Array(seq))
                }
                _ => Err(NormalizeError::data(*invalid)),
            },
            Shape::Nested(schema, invalid) => match value {
                Value::Object(_) => schema.normalize(value).map(Value::Object),
                _ => Err(NormalizeError::data(*invalid)),
            },
        }
    }
}
