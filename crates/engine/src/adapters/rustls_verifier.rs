//! rustls integration: a `ServerCertVerifier` that replaces CA evaluation
//! with pinning for configured hosts.

use std::sync::Arc;

use rustls::client::danger::{HandshakeSignatureValid, ServerCertVerified, ServerCertVerifier};
use rustls::crypto::{verify_tls12_signature, verify_tls13_signature, CryptoProvider};
use rustls::pki_types::{CertificateDer, ServerName, UnixTime};
use rustls::{CertificateError, ClientConfig, DigitallySignedStruct, SignatureScheme};

use crate::crypto::chain::ServerTrust;
use crate::domain::error::PinResult;
use crate::domain::manager::{HostEvaluation, ServerTrustManager};
use crate::domain::sink::TrustDecisionSink;

/// Chain handed to the verifier by rustls, end entity first.
pub struct RustlsServerTrust<'a> {
    end_entity: &'a CertificateDer<'a>,
    intermediates: &'a [CertificateDer<'a>],
}

impl<'a> RustlsServerTrust<'a> {
    pub fn new(end_entity: &'a CertificateDer<'a>, intermediates: &'a [CertificateDer<'a>]) -> Self {
        Self { end_entity, intermediates }
    }
}

impl ServerTrust for RustlsServerTrust<'_> {
    type Credential = ServerCertVerified;

    fn certificate_chain(&self) -> PinResult<Vec<Vec<u8>>> {
        Ok(std::iter::once(self.end_entity)
            .chain(self.intermediates)
            .map(|cert| cert.as_ref().to_vec())
            .collect())
    }

    fn into_credential(self) -> Self::Credential {
        ServerCertVerified::assertion()
    }
}

/// Maps decisions onto rustls verifier results.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustlsSink;

impl TrustDecisionSink for RustlsSink {
    type Credential = ServerCertVerified;
    type Outcome = Result<ServerCertVerified, rustls::Error>;

    fn accept(&self, credential: ServerCertVerified) -> Self::Outcome {
        Ok(credential)
    }

    fn reject(&self) -> Self::Outcome {
        Err(rustls::Error::InvalidCertificate(
            CertificateError::ApplicationVerificationFailure,
        ))
    }
}

/// Verifier that only accepts pinned peers for hosts known to the manager.
///
/// Unpinned hosts go to the fallback verifier when one is set and are
/// rejected otherwise. Handshake signatures are always checked with the
/// crypto provider's algorithms.
#[derive(Debug)]
pub struct PinnedServerCertVerifier {
    manager: Arc<ServerTrustManager>,
    provider: Arc<CryptoProvider>,
    fallback: Option<Arc<dyn ServerCertVerifier>>,
}

impl PinnedServerCertVerifier {
    pub fn new(manager: Arc<ServerTrustManager>) -> Self {
        Self::with_provider(manager, Arc::new(rustls::crypto::ring::default_provider()))
    }

    pub fn with_provider(manager: Arc<ServerTrustManager>, provider: Arc<CryptoProvider>) -> Self {
        Self { manager, provider, fallback: None }
    }

    /// Verifier consulted for hosts without a pinning entry.
    pub fn with_fallback(mut self, fallback: Arc<dyn ServerCertVerifier>) -> Self {
        self.fallback = Some(fallback);
        self
    }

    pub fn provider(&self) -> &Arc<CryptoProvider> {
        &self.provider
    }
}

fn host_of(server_name: &ServerName<'_>) -> Option<String> {
    match server_name {
        ServerName::DnsName(name) => Some(name.as_ref().to_string()),
        ServerName::IpAddress(ip) => Some(std::net::IpAddr::from(*ip).to_string()),
        _ => None,
    }
}

impl ServerCertVerifier for PinnedServerCertVerifier {
    fn verify_server_cert(
        &self,
        end_entity: &CertificateDer<'_>,
        intermediates: &[CertificateDer<'_>],
        server_name: &ServerName<'_>,
        ocsp_response: &[u8],
        now: UnixTime,
    ) -> Result<ServerCertVerified, rustls::Error> {
        let Some(host) = host_of(server_name) else {
            tracing::error!("unsupported server name; rejecting handshake");
            return RustlsSink.reject();
        };

        let trust = RustlsServerTrust::new(end_entity, intermediates);
        match self.manager.evaluate_handshake(&host, trust) {
            HostEvaluation::Decided(decision) => RustlsSink.apply(decision),
            HostEvaluation::DefaultHandling(_) => match &self.fallback {
                Some(fallback) => fallback.verify_server_cert(
                    end_entity,
                    intermediates,
                    server_name,
                    ocsp_response,
                    now,
                ),
                None => {
                    tracing::error!(host = %host, "host not pinned and no fallback verifier");
                    RustlsSink.reject()
                }
            },
        }
    }

    fn verify_tls12_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls12_signature(message, cert, dss, &self.provider.signature_verification_algorithms)
    }

    fn verify_tls13_signature(
        &self,
        message: &[u8],
        cert: &CertificateDer<'_>,
        dss: &DigitallySignedStruct,
    ) -> Result<HandshakeSignatureValid, rustls::Error> {
        verify_tls13_signature(message, cert, dss, &self.provider.signature_verification_algorithms)
    }

    fn supported_verify_schemes(&self) -> Vec<SignatureScheme> {
        self.provider.signature_verification_algorithms.supported_schemes()
    }
}

/// Client configuration with no root store and the pinning verifier
/// installed.
pub fn pinned_client_config(manager: Arc<ServerTrustManager>) -> PinResult<Arc<ClientConfig>> {
    let verifier = PinnedServerCertVerifier::new(manager);
    let provider = verifier.provider().clone();

    tracing::info!("certificate pinning enabled for rustls client");
    let config = ClientConfig::builder_with_provider(provider)
        .with_safe_default_protocol_versions()?
        .dangerous()
        .with_custom_certificate_verifier(Arc::new(verifier))
        .with_no_client_auth();

    Ok(Arc::new(config))
}
