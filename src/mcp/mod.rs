/// MCP protocol implementation
///
/// This module handles the Model Context Protocol communication: JSON-RPC
/// message types and the line-oriented server that routes tool calls.

pub mod protocol;
pub mod server;

// Re-export main types
pub use server::McpServer;
