//! Command handlers.
//!
//! One module per collaborator type. Each handler asks the toolkit for a
//! fresh collaborator, calls the bound operation with the extracted
//! arguments and encodes the outcome.

pub mod fraud;
pub mod nik;
pub mod persona;
pub mod phone;
pub mod tracking;

use pegasus_protocol::{error::json_kind, Binding, BridgeError, BridgeRequest};
use serde_json::Value;

/// Positional arguments extracted from the payload in binding order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments {
    values: Vec<Option<String>>,
}

impl Arguments {
    /// Extract the binding's fields from the request payload.
    ///
    /// The payload must be a mapping. Missing and null fields become `None`.
    /// Numbers and booleans are passed as their JSON text; arrays and objects
    /// cannot be passed positionally.
    pub fn extract(request: &BridgeRequest, binding: &Binding) -> Result<Self, BridgeError> {
        let payload = request.arguments()?;
        let values = binding
            .fields
            .iter()
            .copied()
            .map(|field| match payload.get(field).filter(|value| !value.is_null()) {
                None => Ok(None),
                Some(Value::String(s)) => Ok(Some(s.clone())),
                Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(value.to_string())),
                Some(other) => Err(BridgeError::ArgumentShape {
                    field,
                    kind: json_kind(other),
                }),
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { values })
    }

    /// Argument at `index`, `None` when absent.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.values.get(index).and_then(|v| v.as_deref())
    }
}
