//! Typed parameter schemas and argument validation.
//!
//! Model-supplied arguments are untrusted: they are checked against the
//! tool's schema before any handler runs, with light coercion for the
//! mistakes models commonly make (numbers sent as strings, `3.0` for an
//! integer).

use crate::error::ToolError;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Number, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Number,
    Integer,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::String => "string",
            ParamType::Number => "number",
            ParamType::Integer => "integer",
        }
    }
}

/// One named parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub param_type: ParamType,
    pub description: String,
    pub required: bool,
    /// Closed set of legal values, for enumerated string parameters.
    pub allowed: Option<Vec<String>>,
}

impl Param {
    fn new(name: impl Into<String>, param_type: ParamType, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type,
            description: description.into(),
            required: false,
            allowed: None,
        }
    }

    pub fn string(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamType::String, description)
    }

    pub fn number(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamType::Number, description)
    }

    pub fn integer(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(name, ParamType::Integer, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    fn to_json(&self) -> Value {
        let mut prop = json!({
            "type": self.param_type.as_str(),
            "description": self.description,
        });
        if let Some(allowed) = &self.allowed {
            prop["enum"] = json!(allowed);
        }
        prop
    }

    fn coerce(&self, value: &Value) -> Result<Value, ToolError> {
        let mismatch = || {
            ToolError::InvalidArguments(format!(
                "parameter '{}' must be a {}, got {}",
                self.name,
                self.param_type.as_str(),
                value
            ))
        };

        let coerced = match (self.param_type, value) {
            (ParamType::String, Value::String(_)) => value.clone(),
            (ParamType::Number, Value::Number(n)) if n.as_f64().is_some_and(f64::is_finite) => value.clone(),
            (ParamType::Number, Value::String(s)) => s
                .trim()
                .parse::<f64>()
                .ok()
                .and_then(Number::from_f64)
                .map(Value::Number)
                .ok_or_else(mismatch)?,
            (ParamType::Integer, Value::Number(n)) => match n.as_i64() {
                Some(i) => Value::from(i),
                None => n
                    .as_f64()
                    .and_then(integral)
                    .map(Value::from)
                    .ok_or_else(mismatch)?,
            },
            (ParamType::Integer, Value::String(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(integral))
                    .map(Value::from)
                    .ok_or_else(mismatch)?
            }
            _ => return Err(mismatch()),
        };

        if let (Some(allowed), Value::String(s)) = (&self.allowed, &coerced) {
            if !allowed.iter().any(|a| a == s) {
                return Err(ToolError::InvalidArguments(format!(
                    "parameter '{}' must be one of: {} (got '{}')",
                    self.name,
                    allowed.join(", "),
                    s
                )));
            }
        }

        Ok(coerced)
    }
}

fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

/// Ordered parameter list for one tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterSchema {
    params: Vec<Param>,
}

impl ParameterSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    /// Render as a JSON Schema object for the function-calling API.
    pub fn to_json(&self) -> Value {
        let properties: Map<String, Value> = self
            .params
            .iter()
            .map(|p| (p.name.clone(), p.to_json()))
            .collect();
        let required: Vec<&str> = self
            .params
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name.as_str())
            .collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Check `value` against the schema and return the cleaned arguments.
    ///
    /// Unknown keys are dropped; `null` counts as absent.
    pub fn validate(&self, value: &Value) -> Result<Arguments, ToolError> {
        let object = value.as_object().ok_or_else(|| {
            ToolError::InvalidArguments(format!("expected a JSON object, got {}", value))
        })?;

        let mut validated = Map::new();
        for param in &self.params {
            match object.get(&param.name) {
                None | Some(Value::Null) => {
                    if param.required {
                        return Err(ToolError::InvalidArguments(format!(
                            "missing required parameter '{}'",
                            param.name
                        )));
                    }
                }
                Some(v) => {
                    validated.insert(param.name.clone(), param.coerce(v)?);
                }
            }
        }

        Ok(Arguments(validated))
    }
}

/// Arguments that passed schema validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments(Map<String, Value>);

impl Arguments {
    /// Deserialize into the handler's typed argument struct.
    pub fn parse<T: DeserializeOwned>(self) -> Result<T, ToolError> {
        serde_json::from_value(Value::Object(self.0))
            .map_err(|e| ToolError::InvalidArguments(e.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}
