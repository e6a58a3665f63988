// Library root
// -----------
// Re-enables GitHub Actions workflows in bulk. The binary (`main.rs`) wires
// these modules into an interactive CLI.
//
// Module responsibilities:
// - `api`: blocking GitHub REST client (list repositories, list workflows,
//   enable a workflow) and error mapping for failed responses.
// - `keepalive`: the run itself, written against the `WorkflowApi` trait.
// - `ui`: terminal prompts and progress output.
// - `error`: the crate error type.
pub mod api;
pub mod error;
pub mod keepalive;
pub mod ui;

pub use error::{Error, Result};
