use std::collections::BTreeMap;

use serde::Serialize;

use crate::{CdnUrlError, TrustStore};

/// A host together with the trust anchor used to validate it.
/// Without a trust store certificate validation is disabled for the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointUrl {
    url: String,
    trust_store: Option<TrustStore>,
}

impl EndpointUrl {
    pub fn new(url: impl Into<String>, trust_store: Option<TrustStore>) -> Self {
        Self {
            url: url.into(),
            trust_store,
        }
    }

    pub fn pinned(url: impl Into<String>) -> Self {
        Self::new(url, Some(TrustStore::signal_service()))
    }

    pub fn unpinned(url: impl Into<String>) -> Self {
        Self::new(url, None)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn trust_store(&self) -> Option<&TrustStore> {
        self.trust_store.as_ref()
    }
}

/// Attachment CDNs, keyed by the number the service hands out with each attachment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CdnUrls(BTreeMap<u32, Vec<EndpointUrl>>);

impl CdnUrls {
    pub fn new(cdn0: Vec<EndpointUrl>, cdn2: Vec<EndpointUrl>) -> Self {
        use signal_configuration::CdnNumbers;

        Self(BTreeMap::from([
            (CdnNumbers::CDN0, cdn0),
            (CdnNumbers::CDN2, cdn2),
        ]))
    }

    pub fn get(&self, cdn: u32) -> Result<&[EndpointUrl], CdnUrlError> {
        self.0
            .get(&cdn)
            .map(Vec::as_slice)
            .ok_or(CdnUrlError::UnknownCdn(cdn))
    }

    pub fn numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.0.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &[EndpointUrl])> {
        self.0.iter().map(|(n, urls)| (*n, urls.as_slice()))
    }
}
