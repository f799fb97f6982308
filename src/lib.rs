//! Graph compilation core for the workflow editor: port resolution,
//! validation, layout and template-reference resolution over an immutable
//! `WorkflowGraph` value.

pub mod config;
pub mod contract;
pub mod error;
pub mod layout;
pub mod parse;
pub mod resolve;
pub mod template;
pub mod validate;
pub mod wasm;

