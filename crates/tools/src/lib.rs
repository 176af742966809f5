//! Tool registry and the built-in dashboard tools.

mod error;
mod executor;
mod registry;
mod schema;
mod types;
pub mod builtin;

pub use error::ToolError;
pub use executor::{ToolExecutor, DEFAULT_MAX_RESPONSE_LEN, DEFAULT_TIMEOUT};
pub use registry::ToolRegistry;
pub use schema::{Arguments, Param, ParamType, ParameterSchema};
pub use types::*;
