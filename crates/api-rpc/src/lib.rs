//! JSON-RPC API Layer
//!
//! Exposes the reminder run as a JSON-RPC 2.0 method, plus a thin wrapper
//! re-exposing the same options under the legacy calling convention.

pub mod handler;
pub mod server;
pub mod types;

pub use server::RpcServer;
