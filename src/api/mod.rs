//! HTTP API: router, endpoints, error mapping, and server lifecycle.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;

pub use router::upscale_router;
pub use server::ApiServer;
