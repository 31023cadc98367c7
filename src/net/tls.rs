//! TLS configuration and certificate loading.

use axum_server::tls_rustls::RustlsConfig;
use std::io;
use std::path::Path;

/// Load the listener's certificate chain and private key (PEM).
pub async fn load_tls_config(cert_path: &Path, key_path: &Path) -> Result<RustlsConfig, io::Error> {
    for (what, path) in [("certificate", cert_path), ("private key", key_path)] {
        if !path.exists() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("TLS {} not found: {}", what, path.display()),
            ));
        }
    }
    RustlsConfig::from_pem_file(cert_path, key_path).await
}
