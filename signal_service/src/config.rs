//! The service configuration, built once at startup.
//!
//! Every value starts from the signal.org production defaults. A property
//! source may override the trust root, the enclave id and the zkgroup params.
//! The presence of the `URL` property switches every endpoint over to the
//! property values with certificate validation disabled, which is how the
//! client is pointed at test and self-hosted servers.

use std::{net::IpAddr, sync::Arc};

use base64::{engine::general_purpose::STANDARD, Engine};
use signal_configuration::{
    PropertyKeys, SignalOrgUrls, SIGNAL_ORG_CDS_MRENCLAVE,
    SIGNAL_ORG_UNIDENTIFIED_SENDER_TRUST_ROOT, SIGNAL_ORG_ZK_GROUP_SERVER_PUBLIC_PARAMS,
};
use signal_cryptography::ServerPublicParams;

use crate::{
    Capabilities, CdnUrls, EndpointUrl, Limits, Properties, RequestInterceptor, ServiceConfigError,
    UserAgentInterceptor,
};

/// Custom name resolution for the transport
pub trait DnsResolver: std::fmt::Debug + Send + Sync {
    fn lookup(&self, host: &str) -> std::io::Result<Vec<IpAddr>>;
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    service_urls: Vec<EndpointUrl>,
    cdn_urls: CdnUrls,
    contact_discovery_urls: Vec<EndpointUrl>,
    key_backup_urls: Vec<EndpointUrl>,
    storage_urls: Vec<EndpointUrl>,
    interceptors: Vec<Arc<dyn RequestInterceptor>>,
    dns: Option<Arc<dyn DnsResolver>>,
    zk_group_server_public_params: Vec<u8>,
    capabilities: Capabilities,
    unidentified_sender_trust_root: String,
    cds_mrenclave: String,
}

impl ServiceConfig {
    pub fn builder() -> ServiceConfigBuilder {
        ServiceConfigBuilder::default()
    }

    pub fn service_urls(&self) -> &[EndpointUrl] {
        &self.service_urls
    }

    pub fn cdn_urls(&self) -> &CdnUrls {
        &self.cdn_urls
    }

    pub fn contact_discovery_urls(&self) -> &[EndpointUrl] {
        &self.contact_discovery_urls
    }

    pub fn key_backup_urls(&self) -> &[EndpointUrl] {
        &self.key_backup_urls
    }

    pub fn storage_urls(&self) -> &[EndpointUrl] {
        &self.storage_urls
    }

    pub fn interceptors(&self) -> &[Arc<dyn RequestInterceptor>] {
        &self.interceptors
    }

    pub fn dns(&self) -> Option<&Arc<dyn DnsResolver>> {
        self.dns.as_ref()
    }

    pub fn zk_group_server_public_params(&self) -> &[u8] {
        &self.zk_group_server_public_params
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    pub fn unidentified_sender_trust_root(&self) -> &str {
        &self.unidentified_sender_trust_root
    }

    pub fn cds_mrenclave(&self) -> &str {
        &self.cds_mrenclave
    }

    pub fn limits(&self) -> Limits {
        Limits::default()
    }

    /// Runs every interceptor, in order, over an outbound request
    pub fn apply_interceptors<B>(&self, request: http::Request<B>) -> http::Request<B> {
        let (mut parts, body) = request.into_parts();
        for interceptor in &self.interceptors {
            interceptor.intercept(&mut parts);
        }
        http::Request::from_parts(parts, body)
    }
}

#[derive(Default)]
pub struct ServiceConfigBuilder {
    user_agent: Option<String>,
    properties: Properties,
    dns: Option<Arc<dyn DnsResolver>>,
}

impl ServiceConfigBuilder {
    pub fn set_user_agent(&mut self, user_agent: impl Into<String>) {
        self.user_agent = Some(user_agent.into());
    }

    pub fn set_properties(&mut self, properties: Properties) {
        self.properties = properties;
    }

    pub fn set_dns_resolver(&mut self, dns: Arc<dyn DnsResolver>) {
        self.dns = Some(dns);
    }

    pub fn build(self) -> Result<ServiceConfig, ServiceConfigError> {
        let ServiceConfigBuilder {
            user_agent,
            properties,
            dns,
        } = self;
        let user_agent = user_agent.ok_or(ServiceConfigError::MissingUserAgent)?;
        let interceptors: Vec<Arc<dyn RequestInterceptor>> =
            vec![Arc::new(UserAgentInterceptor::new(&user_agent)?)];

        let unidentified_sender_trust_root = properties
            .get_or(
                PropertyKeys::UNIDENTIFIED_SENDER_TRUST_ROOT,
                SIGNAL_ORG_UNIDENTIFIED_SENDER_TRUST_ROOT,
            )
            .to_string();
        let cds_mrenclave = properties
            .get_or(PropertyKeys::CDS_MRENCLAVE, SIGNAL_ORG_CDS_MRENCLAVE)
            .to_string();

        let zk_group_server_public_params = STANDARD.decode(properties.get_or(
            PropertyKeys::ZK_GROUP_SERVER_PUBLIC_PARAMS,
            SIGNAL_ORG_ZK_GROUP_SERVER_PUBLIC_PARAMS,
        ))?;
        let zk_groups = match ServerPublicParams::try_parse(&zk_group_server_public_params) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "zkgroup server public params unusable, disabling group v2 capabilities"
                );
                false
            }
        };

        let endpoints = match properties.get(PropertyKeys::URL) {
            Some(url) => {
                tracing::warn!(
                    url = %url,
                    "using custom service endpoints without certificate pinning"
                );
                Endpoints::custom(url, &properties)
            }
            None => Endpoints::signal_org(&properties),
        };
        tracing::debug!(
            service = ?endpoints.service.iter().map(EndpointUrl::url).collect::<Vec<_>>(),
            custom = properties.contains(PropertyKeys::URL),
            zk_groups,
            "created service configuration"
        );

        Ok(ServiceConfig {
            service_urls: endpoints.service,
            cdn_urls: endpoints.cdn,
            contact_discovery_urls: endpoints.contact_discovery,
            key_backup_urls: endpoints.key_backup,
            storage_urls: endpoints.storage,
            interceptors,
            dns,
            zk_group_server_public_params,
            capabilities: Capabilities::from_zk_group_support(zk_groups),
            unidentified_sender_trust_root,
            cds_mrenclave,
        })
    }
}

/// Shorthand for building a configuration from a user agent and overrides
pub fn create_default_service_configuration(
    user_agent: &str,
    properties: Properties,
) -> Result<ServiceConfig, ServiceConfigError> {
    let mut builder = ServiceConfig::builder();
    builder.set_user_agent(user_agent);
    builder.set_properties(properties);
    builder.build()
}

struct Endpoints {
    service: Vec<EndpointUrl>,
    cdn: CdnUrls,
    contact_discovery: Vec<EndpointUrl>,
    key_backup: Vec<EndpointUrl>,
    storage: Vec<EndpointUrl>,
}

impl Endpoints {
    /// Every family from the properties, falling back to `url`, none of them pinned
    fn custom(url: &str, properties: &Properties) -> Self {
        let unpinned = |key: &str| vec![EndpointUrl::unpinned(properties.get_or(key, url))];
        Self {
            service: vec![EndpointUrl::unpinned(url)],
            cdn: CdnUrls::new(
                unpinned(PropertyKeys::CDN_URL),
                unpinned(PropertyKeys::CDN2_URL),
            ),
            contact_discovery: unpinned(PropertyKeys::CONTACT_DISCOVERY_URL),
            key_backup: unpinned(PropertyKeys::KEY_BACKUP_URL),
            storage: unpinned(PropertyKeys::STORAGE_URL),
        }
    }

    /// Production hosts, all pinned. Only storage may be overridden.
    fn signal_org(properties: &Properties) -> Self {
        let pinned = |url: &str| vec![EndpointUrl::pinned(url)];
        Self {
            service: pinned(SignalOrgUrls::SERVICE),
            cdn: CdnUrls::new(pinned(SignalOrgUrls::CDN), pinned(SignalOrgUrls::CDN2)),
            contact_discovery: pinned(SignalOrgUrls::CONTACT_DISCOVERY),
            key_backup: pinned(SignalOrgUrls::KEY_BACKUP),
            storage: pinned(properties.get_or(PropertyKeys::STORAGE_URL, SignalOrgUrls::STORAGE)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TrustStore;
    use http::header;
    use rstest::rstest;

    const USER_AGENT: &str = "signal-cli/test";

    fn build(properties: &[(&str, &str)]) -> ServiceConfig {
        create_default_service_configuration(USER_AGENT, properties.iter().copied().collect())
            .unwrap()
    }

    #[derive(Clone, Default)]
    struct Captured(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for Captured {
        type Writer = Self;
        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn warnings_while(f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let logs = captured.0.lock().unwrap().clone();
        String::from_utf8(logs).unwrap()
    }

    fn families(config: &ServiceConfig) -> Vec<&EndpointUrl> {
        config
            .service_urls()
            .iter()
            .chain(config.cdn_urls().get(0).unwrap())
            .chain(config.cdn_urls().get(2).unwrap())
            .chain(config.contact_discovery_urls())
            .chain(config.key_backup_urls())
            .chain(config.storage_urls())
            .collect()
    }

    #[test]
    fn defaults_are_signal_org_and_pinned() {
        let config = build(&[]);
        let urls: Vec<_> = families(&config).into_iter().map(EndpointUrl::url).collect();
        assert_eq!(
            urls,
            vec![
                SignalOrgUrls::SERVICE,
                SignalOrgUrls::CDN,
                SignalOrgUrls::CDN2,
                SignalOrgUrls::CONTACT_DISCOVERY,
                SignalOrgUrls::KEY_BACKUP,
                SignalOrgUrls::STORAGE,
            ]
        );
        for url in families(&config) {
            assert_eq!(url.trust_store(), Some(&TrustStore::signal_service()));
        }
        assert_eq!(
            config.unidentified_sender_trust_root(),
            SIGNAL_ORG_UNIDENTIFIED_SENDER_TRUST_ROOT
        );
        assert_eq!(config.cds_mrenclave(), SIGNAL_ORG_CDS_MRENCLAVE);
    }

    #[test]
    fn default_params_enable_zk_groups() {
        let config = build(&[]);
        let capabilities = config.capabilities();
        assert!(capabilities.gv2);
        assert!(capabilities.gv1_migration);
        assert!(!capabilities.uuid);
        assert!(!capabilities.storage);
        assert_eq!(
            config.zk_group_server_public_params(),
            STANDARD
                .decode(SIGNAL_ORG_ZK_GROUP_SERVER_PUBLIC_PARAMS)
                .unwrap()
        );
    }

    #[rstest]
    #[case::too_short("AQID")]
    #[case::too_long(&"A".repeat(216))]
    #[case::empty("")]
    fn unusable_params_disable_zk_groups(#[case] params: &str) {
        let config = build(&[(PropertyKeys::ZK_GROUP_SERVER_PUBLIC_PARAMS, params)]);
        assert!(!config.capabilities().gv2);
        assert!(!config.capabilities().gv1_migration);
        assert_eq!(
            config.zk_group_server_public_params(),
            STANDARD.decode(params).unwrap()
        );
    }

    #[test]
    fn invalid_points_disable_zk_groups() {
        let mut params = vec![0xff; 161];
        params[0] = 0;
        let encoded = STANDARD.encode(&params);
        let config = build(&[(PropertyKeys::ZK_GROUP_SERVER_PUBLIC_PARAMS, encoded.as_str())]);
        assert!(!config.capabilities().gv2);
        assert!(!config.capabilities().gv1_migration);
        assert_eq!(config.zk_group_server_public_params(), params);
    }

    #[test]
    fn undecodable_params_are_fatal() {
        let err = create_default_service_configuration(
            USER_AGENT,
            [(PropertyKeys::ZK_GROUP_SERVER_PUBLIC_PARAMS, "not base64!")]
                .into_iter()
                .collect(),
        )
        .unwrap_err();
        assert!(matches!(err, ServiceConfigError::PublicParamsDecode(_)));
    }

    #[test]
    fn url_override_unpins_every_family() {
        let config = build(&[(PropertyKeys::URL, "http://test.local")]);
        let endpoints = families(&config);
        assert_eq!(endpoints.len(), 6);
        for url in endpoints {
            assert_eq!(url.url(), "http://test.local");
            assert_eq!(url.trust_store(), None);
        }
    }

    #[test]
    fn url_override_uses_family_overrides() {
        let config = build(&[
            (PropertyKeys::URL, "http://test.local"),
            (PropertyKeys::CDN_URL, "http://cdn.test.local"),
            (PropertyKeys::CDN2_URL, "http://cdn2.test.local"),
            (PropertyKeys::CONTACT_DISCOVERY_URL, "http://cds.test.local"),
            (PropertyKeys::KEY_BACKUP_URL, "http://kbs.test.local"),
            (PropertyKeys::STORAGE_URL, "http://storage.test.local"),
        ]);
        let urls: Vec<_> = families(&config).into_iter().map(EndpointUrl::url).collect();
        assert_eq!(
            urls,
            vec![
                "http://test.local",
                "http://cdn.test.local",
                "http://cdn2.test.local",
                "http://cds.test.local",
                "http://kbs.test.local",
                "http://storage.test.local",
            ]
        );
        assert!(families(&config).into_iter().all(|u| u.trust_store().is_none()));
    }

    #[test]
    fn without_url_only_storage_is_overridable() {
        let config = build(&[
            (PropertyKeys::CDN_URL, "http://cdn.test.local"),
            (PropertyKeys::CONTACT_DISCOVERY_URL, "http://cds.test.local"),
            (PropertyKeys::STORAGE_URL, "https://storage.test.local"),
        ]);
        assert_eq!(config.cdn_urls().get(0).unwrap()[0].url(), SignalOrgUrls::CDN);
        assert_eq!(
            config.contact_discovery_urls()[0].url(),
            SignalOrgUrls::CONTACT_DISCOVERY
        );
        let storage = &config.storage_urls()[0];
        assert_eq!(storage.url(), "https://storage.test.local");
        assert_eq!(storage.trust_store(), Some(&TrustStore::signal_service()));
    }

    #[test]
    fn identifiers_are_taken_verbatim() {
        let config = build(&[
            (PropertyKeys::UNIDENTIFIED_SENDER_TRUST_ROOT, "not-a-key"),
            (PropertyKeys::CDS_MRENCLAVE, "zz"),
        ]);
        assert_eq!(config.unidentified_sender_trust_root(), "not-a-key");
        assert_eq!(config.cds_mrenclave(), "zz");
    }

    #[test]
    fn single_user_agent_interceptor() {
        let config = build(&[]);
        assert_eq!(config.interceptors().len(), 1);
        let request = config.apply_interceptors(http::Request::new(()));
        assert_eq!(request.headers()[header::USER_AGENT], USER_AGENT);
    }

    #[test]
    fn no_dns_override_by_default() {
        assert!(build(&[]).dns().is_none());
    }

    #[test]
    fn keeps_provided_dns_resolver() {
        #[derive(Debug)]
        struct Loopback;
        impl DnsResolver for Loopback {
            fn lookup(&self, _host: &str) -> std::io::Result<Vec<IpAddr>> {
                Ok(vec![IpAddr::from([127, 0, 0, 1])])
            }
        }

        let mut builder = ServiceConfig::builder();
        builder.set_user_agent(USER_AGENT);
        builder.set_dns_resolver(Arc::new(Loopback));
        let config = builder.build().unwrap();
        let dns = config.dns().unwrap();
        assert_eq!(dns.lookup("signal.org").unwrap(), vec![IpAddr::from([127, 0, 0, 1])]);
    }

    #[test]
    fn user_agent_is_required() {
        let err = ServiceConfig::builder().build().unwrap_err();
        assert!(matches!(err, ServiceConfigError::MissingUserAgent));
    }

    #[test]
    fn invalid_user_agent_is_rejected() {
        let err = create_default_service_configuration("bad\r\nagent", Properties::new())
            .unwrap_err();
        assert!(matches!(err, ServiceConfigError::InvalidUserAgent(_)));
    }

    #[test]
    fn custom_server_warns_about_unpinned_endpoints() {
        let logs = warnings_while(|| {
            build(&[("URL", "http://test.local")]);
        });
        assert!(logs.contains("without certificate pinning"));
        assert!(logs.contains("http://test.local"));
    }

    #[test]
    fn signal_org_endpoints_do_not_warn() {
        let logs = warnings_while(|| {
            build(&[("STORAGE_URL", "https://storage.test")]);
        });
        assert!(!logs.contains("without certificate pinning"));
    }
}
