//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID assigned and echoed)
//!     → dispatcher.rs (resolve, authorize, redirect or forward)
//!     → response.rs (JSON error bodies, Allow header)
//!     → Send to client
//! ```

pub mod dispatcher;
pub mod request;
pub mod response;
pub mod server;

pub use dispatcher::{Dispatcher, MissingHandlers};
pub use request::X_REQUEST_ID;
pub use response::ApiError;
pub use server::HttpServer;
