//! HTTP surface of the Tempo demo service
//!
//! Routes, handlers, the single-shot SSE stream, the OpenAPI document,
//! and the server lifecycle. The compression policy itself lives in
//! `tempo-compression` and is attached here as a middleware layer.

pub mod docs;
pub mod error;
pub mod handlers;
pub mod models;
pub mod router;
pub mod server;
pub mod shutdown;
pub mod sse;
pub mod state;

pub use router::build_router;
pub use server::Server;
pub use shutdown::ShutdownSignal;
pub use state::AppState;
