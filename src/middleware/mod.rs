// ABOUTME: HTTP middleware for authentication, CORS and request correlation
// ABOUTME: Provides the bearer extractor, the CORS layer and the request id middleware

/// Bearer token extractor
pub mod auth;
/// CORS layer
pub mod cors;
/// Request id propagation
pub mod request_id;

// Authentication extractor
pub use auth::AuthenticatedUser;

// CORS configuration
pub use cors::setup_cors;

// Request correlation
pub use request_id::{request_id_middleware, RequestId};
