//! `add_numbers` and `multiply_numbers`.

use super::traits::{ParamType, Tool, ToolArgs, ToolDescriptor, ToolInput, ToolOutput};
use async_trait::async_trait;

pub const ADD_NUMBERS: &str = "add_numbers";
pub const MULTIPLY_NUMBERS: &str = "multiply_numbers";

pub fn add_numbers(a: f64, b: f64) -> f64 {
    a + b
}

pub fn multiply_numbers(a: f64, b: f64) -> f64 {
    a * b
}

/// Adds its two inputs.
pub struct AddNumbersTool {
    descriptor: ToolDescriptor,
}

impl AddNumbersTool {
    pub fn new() -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: ADD_NUMBERS.into(),
                description:
                    "Adds two numbers together. Takes two numeric inputs and returns their sum."
                        .into(),
                inputs: vec![
                    ToolInput::number("a", "The first number to add"),
                    ToolInput::number("b", "The second number to add"),
                ],
                output_type: ParamType::Number,
            },
        }
    }
}

impl Default for AddNumbersTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for AddNumbersTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, args: &ToolArgs) -> ToolOutput {
        binary_op(args, add_numbers)
    }
}

/// Multiplies its two inputs.
pub struct MultiplyNumbersTool {
    descriptor: ToolDescriptor,
}

impl MultiplyNumbersTool {
    pub fn new() -> Self {
        Self {
            descriptor: ToolDescriptor {
                name: MULTIPLY_NUMBERS.into(),
                description: "Multiplies two numbers together. Takes two numeric inputs and returns their product."
                    .into(),
                inputs: vec![
                    ToolInput::number("a", "The first number to multiply"),
                    ToolInput::number("b", "The second number to multiply"),
                ],
                output_type: ParamType::Number,
            },
        }
    }
}

impl Default for MultiplyNumbersTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Tool for MultiplyNumbersTool {
    fn descriptor(&self) -> &ToolDescriptor {
        &self.descriptor
    }

    async fn invoke(&self, args: &ToolArgs) -> ToolOutput {
        binary_op(args, multiply_numbers)
    }
}

fn binary_op(args: &ToolArgs, op: fn(f64, f64) -> f64) -> ToolOutput {
    match (args.number("a"), args.number("b")) {
        (Ok(a), Ok(b)) => ToolOutput::Number(op(a, b)),
        // Unreachable once the registry has validated the arguments.
        (Err(e), _) | (_, Err(e)) => ToolOutput::Text(format!("Error: {}", e)),
    }
}
