/// Session surface
///
/// This module handles the line-oriented JSON-RPC session a front end uses
/// to drive the companion: request parsing, method routing and advice
/// notifications.

pub mod protocol;
pub mod server;

// Re-export main types
pub use server::SessionServer;
