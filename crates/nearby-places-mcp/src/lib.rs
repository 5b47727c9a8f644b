//! MCP (Model Context Protocol) server for nearby place search
//!
//! This crate provides a stdio-based MCP server that exposes the nearby
//! places search to AI assistants via the Model Context Protocol.
//!
//! # Architecture
//!
//! The MCP server is organized into the following submodules:
//! - `server`: Server state and JSON-RPC method dispatch
//! - `tools`: The `get_nearby_places_by_coordinates` tool
//! - `resources`: Place category list and server info resources
//! - `transport`: Newline-delimited stdio transport and server loop
//! - `logging`: stderr-only tracing setup
//! - `error`: Error types and RFC 9457 problem details
//!
//! # Transport
//!
//! The server communicates via stdio using JSON-RPC 2.0 message format
//! as specified by the MCP specification. All logging is redirected to
//! stderr to prevent stdout protocol corruption.

pub mod error;
pub mod logging;
pub mod resources;
pub mod server;
pub mod tools;
pub mod transport;
pub mod types;

pub use error::{Error, Result};
pub use server::McpServerState;
