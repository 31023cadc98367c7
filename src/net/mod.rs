//! Network layer.
//!
//! Plain TCP listeners are bound in `main`; this module only prepares the
//! optional TLS configuration handed to the server.

pub mod tls;
