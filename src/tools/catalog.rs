//! Translate server tool descriptors into the chat model's function schema.

use super::types::{FunctionSchema, ObjectKind, ObjectSchema, ToolDescriptor, ToolKind, ToolSchema};

/// Convert advertised tools into closed function schemas, one per descriptor.
pub fn adapt(descriptors: &[ToolDescriptor]) -> Vec<ToolSchema> {
    descriptors.iter().map(adapt_one).collect()
}

fn adapt_one(descriptor: &ToolDescriptor) -> ToolSchema {
    ToolSchema {
        kind: ToolKind::Function,
        function: FunctionSchema {
            name: descriptor.name.clone(),
            description: descriptor.description.clone(),
            parameters: ObjectSchema {
                kind: ObjectKind::Object,
                properties: descriptor.parameters.properties.clone(),
                required: descriptor.parameters.required.clone(),
                additional_properties: false,
            },
        },
    }
}
