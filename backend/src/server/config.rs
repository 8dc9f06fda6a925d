//! HTTP server configuration object and helpers.

use std::net::SocketAddr;

use url::Url;

/// Builder-style configuration for creating the HTTP server.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub(crate) bind_addr: SocketAddr,
    pub(crate) verifier_url: Option<Url>,
}

impl ServerConfig {
    /// Construct a server configuration for the given bind address.
    #[must_use]
    pub fn new(bind_addr: SocketAddr) -> Self {
        Self {
            bind_addr,
            verifier_url: None,
        }
    }

    /// Attach the identity provider's token verification endpoint.
    ///
    /// Without one the server falls back to a verifier that rejects every
    /// token, so all sessions resolve anonymous.
    #[must_use]
    pub fn with_verifier_url(mut self, url: Url) -> Self {
        self.verifier_url = Some(url);
        self
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn verifier_endpoint_is_optional() {
        let addr: SocketAddr = "127.0.0.1:8080".parse().expect("socket addr");
        let config = ServerConfig::new(addr);
        assert_eq!(config.bind_addr(), addr);
        assert!(config.verifier_url.is_none());

        let url = Url::parse("https://identity.example/verify").expect("url");
        let config = config.with_verifier_url(url.clone());
        assert_eq!(config.verifier_url, Some(url));
    }
}
