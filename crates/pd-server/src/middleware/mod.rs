//! HTTP middleware: request ID and user context.

pub mod request_id;
pub mod user_context;
