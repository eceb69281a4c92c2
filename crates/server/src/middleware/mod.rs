//! HTTP middleware stack.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, transaction)
//! 2. `TraceLayer` (`http_request` span)
//! 3. Request ID (recorded on the span, echoed on the response)
//! 4. CORS (origin allow-list)
//! 5. Security headers
//!
//! Admin authentication is an extractor ([`RequireAdmin`]) rather than a
//! layer, so public and protected routes share one router.

pub mod auth;
pub mod cors;
pub mod request_id;
pub mod security_headers;

pub use auth::RequireAdmin;
pub use cors::cors_layer;
pub use request_id::{REQUEST_ID_HEADER, RequestId, request_id_middleware};
pub use security_headers::security_headers_middleware;
