//! sseconv - normalize Server-Sent Events streams into replayable
//! `{timestamp, value}` records for mock servers.
//!
//! The [`sse`] module holds the parsing core. [`converter`] wraps it for the
//! three adapters: the [`cli`], the HTTP [`server`] and the stdio tool
//! server in [`mcp`].

pub mod cli;
pub mod config;
pub mod converter;
pub mod error;
pub mod logging;
pub mod mcp;
pub mod server;
pub mod sse;
pub mod tools;
pub mod traits;
