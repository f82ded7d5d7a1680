//! Network configuration handed to the messaging library at client construction.

pub mod capabilities;
pub mod config;
pub mod error;
pub mod interceptor;
pub mod limits;
pub mod properties;
pub mod trust_store;
pub mod urls;

pub use capabilities::Capabilities;
pub use config::{
    create_default_service_configuration, DnsResolver, ServiceConfig, ServiceConfigBuilder,
};
pub use error::{CdnUrlError, PropertiesError, ServiceConfigError};
pub use interceptor::{RequestInterceptor, UserAgentInterceptor};
pub use limits::Limits;
pub use properties::Properties;
pub use trust_store::TrustStore;
pub use urls::{CdnUrls, EndpointUrl};
