//! System orchestration: wiring the session, transport, and typed clients
//! into one engine, plus tracing setup.

pub mod engine;
pub mod tracing;

pub use self::engine::*;
pub use self::tracing::*;
