//! Tool catalog, invocation, and the tool server seam.

pub mod catalog;
pub mod invoker;
pub mod server;
pub mod types;
pub mod validation;

pub use catalog::adapt;
pub use invoker::ToolInvoker;
pub use server::ToolServer;
pub use types::{ParameterSchema, ToolContent, ToolDescriptor, ToolSchema, ValueKind};
