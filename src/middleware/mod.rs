//! Request pipeline
//!
//! The per-request parameter bag, the interceptor chain that runs over it,
//! and the interceptors themselves: authentication and parameter validators.
//! The request logging layer wraps the whole router.

pub mod auth;
pub mod chain;
pub mod logging;
pub mod params;
pub mod validators;

pub use auth::Authenticate;
pub use chain::{ChainOutcome, Interceptor, InterceptorChain};
pub use logging::{logging_middleware, request_span};
pub use params::{CallStyle, RequestParams};
