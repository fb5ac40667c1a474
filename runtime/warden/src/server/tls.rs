use std::path::PathBuf;
use std::sync::Arc;

use rustls_pki_types::pem::PemObject;
use rustls_pki_types::{CertificateDer, PrivateKeyDer};
use tokio_rustls::TlsAcceptor;

#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(deny_unknown_fields)]
/// Serve HTTPS, terminating TLS with the given certificate and private key.
///
/// ```yaml
/// server:
///   tls:
///     cert_file: "/etc/warden/cert.pem"
///     key_file: "/etc/warden/key.pem"
/// ```
pub struct TlsConfig {
    /// A PEM file with the server certificate, followed by its intermediates.
    pub cert_file: PathBuf,
    /// A PEM file with the private key matching the server certificate.
    pub key_file: PathBuf,
}

impl TlsConfig {
    /// Read the certificate chain and the private key from disk.
    ///
    /// Clients can negotiate either HTTP/2 or HTTP/1.1 via ALPN.
    pub fn acceptor(&self) -> Result<TlsAcceptor, TlsConfigError> {
        let chain = CertificateDer::pem_file_iter(&self.cert_file)
            .and_then(|certs| certs.collect::<Result<Vec<_>, _>>())
            .map_err(|source| TlsConfigError::Certificates {
                path: self.cert_file.clone(),
                source,
            })?;
        if chain.is_empty() {
            return Err(TlsConfigError::NoCertificate {
                path: self.cert_file.clone(),
            });
        }
        let key =
            PrivateKeyDer::from_pem_file(&self.key_file).map_err(|source| {
                TlsConfigError::PrivateKey {
                    path: self.key_file.clone(),
                    source,
                }
            })?;

        let provider = Arc::new(rustls::crypto::ring::default_provider());
        let mut config = rustls::ServerConfig::builder_with_provider(provider)
            .with_safe_default_protocol_versions()?
            .with_no_client_auth()
            .with_single_cert(chain, key)?;
        config.alpn_protocols = vec![b"h2".to_vec(), b"http/1.1".to_vec()];
        Ok(TlsAcceptor::from(Arc::new(config)))
    }
}

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
/// The error returned by [`TlsConfig::acceptor`].
pub enum TlsConfigError {
    #[error("Failed to read the certificate chain from `{}`", path.display())]
    Certificates {
        path: PathBuf,
        #[source]
        source: rustls_pki_types::pem::Error,
    },
    #[error("`{}` doesn't contain any PEM-encoded certificate", path.display())]
    NoCertificate { path: PathBuf },
    #[error("Failed to read the private key from `{}`", path.display())]
    PrivateKey {
        path: PathBuf,
        #[source]
        source: rustls_pki_types::pem::Error,
    },
    #[error("The certificate chain and private key were rejected")]
    Rustls(#[from] rustls::Error),
}
