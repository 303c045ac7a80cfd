//! Check tool call arguments against the closed schema offered to the model.

use super::types::ObjectSchema;

/// Check a call's argument names against a tool's parameter schema.
///
/// Every argument must be a declared property, and every required property
/// that the schema declares must be present. A `required` entry naming an
/// undeclared property is left for the server to judge, as are value types.
/// Returns `Err(message)` describing the first violation found.
pub fn validate_arguments(
    args: &serde_json::Map<String, serde_json::Value>,
    schema: &ObjectSchema,
) -> Result<(), String> {
    if let Some(extra) = args.keys().find(|k| !schema.properties.contains_key(*k)) {
        return Err(format!("undeclared argument '{extra}'"));
    }

    if let Some(missing) = schema
        .required
        .iter()
        .filter(|name| schema.properties.contains_key(*name))
        .find(|name| !args.contains_key(*name))
    {
        return Err(format!("missing required field '{missing}'"));
    }

    Ok(())
}
