//! Tool trait and descriptor types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::fmt;

/// Scalar types a tool input or output may have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    Number,
    String,
}

impl ParamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Number => "number",
            Self::String => "string",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One declared input of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolInput {
    pub name: String,
    pub kind: ParamType,
    pub description: String,
}

impl ToolInput {
    pub fn number(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            kind: ParamType::Number,
            description: description.into(),
        }
    }

    pub fn string(name: &str, description: &str) -> Self {
        Self {
            name: name.into(),
            kind: ParamType::String,
            description: description.into(),
        }
    }
}

/// Name, description and typed signature of a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    pub inputs: Vec<ToolInput>,
    pub output_type: ParamType,
}

impl ToolDescriptor {
    /// JSON Schema for the tool's parameters, properties in declaration order.
    pub fn parameters_schema(&self) -> Value {
        let mut properties = Map::new();
        for input in &self.inputs {
            properties.insert(
                input.name.clone(),
                json!({
                    "type": input.kind.as_str(),
                    "description": input.description,
                }),
            );
        }
        let required: Vec<&str> = self.inputs.iter().map(|i| i.name.as_str()).collect();

        json!({
            "type": "object",
            "properties": properties,
            "required": required,
        })
    }

    /// Definition handed to the inference API.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: self.description.clone(),
            parameters: self.parameters_schema(),
        }
    }
}

/// Definition of a tool exposed to the inference model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Argument validation failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolError {
    #[error("missing argument '{0}'")]
    MissingArgument(String),

    #[error("argument '{name}' must be a {expected}")]
    InvalidArgument { name: String, expected: ParamType },

    #[error("tool arguments must be a JSON object")]
    NotAnObject,
}

/// A validated argument value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Number(f64),
    Text(String),
}

/// Arguments checked against a [`ToolDescriptor`]: every declared input is
/// present and has the declared type.
#[derive(Debug, Clone, PartialEq)]
pub struct ToolArgs {
    values: Vec<(String, ArgValue)>,
}

impl ToolArgs {
    pub fn validate(descriptor: &ToolDescriptor, raw: &Value) -> Result<Self, ToolError> {
        let obj = match raw {
            Value::Object(obj) => obj,
            Value::Null if descriptor.inputs.is_empty() => {
                return Ok(Self { values: Vec::new() })
            }
            _ => return Err(ToolError::NotAnObject),
        };

        let mut values = Vec::with_capacity(descriptor.inputs.len());
        for input in &descriptor.inputs {
            let value = obj
                .get(&input.name)
                .filter(|v| !v.is_null())
                .ok_or_else(|| ToolError::MissingArgument(input.name.clone()))?;
            let invalid = || ToolError::InvalidArgument {
                name: input.name.clone(),
                expected: input.kind,
            };

            let arg = match input.kind {
                ParamType::Number => match value {
                    Value::Number(n) => ArgValue::Number(n.as_f64().ok_or_else(invalid)?),
                    // Small local models often quote their numbers.
                    Value::String(s) => {
                        ArgValue::Number(s.trim().parse::<f64>().map_err(|_| invalid())?)
                    }
                    _ => return Err(invalid()),
                },
                ParamType::String => match value {
                    Value::String(s) => ArgValue::Text(s.clone()),
                    _ => return Err(invalid()),
                },
            };
            values.push((input.name.clone(), arg));
        }

        Ok(Self { values })
    }

    fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Numeric argument. Validation guarantees presence for declared inputs.
    pub fn number(&self, name: &str) -> Result<f64, ToolError> {
        match self.get(name) {
            Some(ArgValue::Number(n)) => Ok(*n),
            Some(ArgValue::Text(_)) => Err(ToolError::InvalidArgument {
                name: name.into(),
                expected: ParamType::Number,
            }),
            None => Err(ToolError::MissingArgument(name.into())),
        }
    }

    /// String argument. Validation guarantees presence for declared inputs.
    pub fn text(&self, name: &str) -> Result<&str, ToolError> {
        match self.get(name) {
            Some(ArgValue::Text(s)) => Ok(s),
            Some(ArgValue::Number(_)) => Err(ToolError::InvalidArgument {
                name: name.into(),
                expected: ParamType::String,
            }),
            None => Err(ToolError::MissingArgument(name.into())),
        }
    }
}

/// Value a tool hands back to the orchestrator.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolOutput {
    Number(f64),
    Text(String),
}

impl fmt::Display for ToolOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// A capability the orchestrator may call.
///
/// `invoke` never fails: tools collapse their own network and parsing
/// errors into descriptive text.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name, description and signature.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Tool name (used in function calls).
    fn name(&self) -> &str {
        &self.descriptor().name
    }

    /// Run the tool with already-validated arguments.
    async fn invoke(&self, args: &ToolArgs) -> ToolOutput;
}
