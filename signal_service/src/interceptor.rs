//! Transforms applied to every outbound request
use http::{header, request::Parts, HeaderValue};

pub trait RequestInterceptor: std::fmt::Debug + Send + Sync {
    fn intercept(&self, parts: &mut Parts);
}

/// Sets the `User-Agent` header, replacing whatever the request carried
#[derive(Debug, Clone)]
pub struct UserAgentInterceptor {
    user_agent: HeaderValue,
}

impl UserAgentInterceptor {
    pub fn new(user_agent: &str) -> Result<Self, header::InvalidHeaderValue> {
        Ok(Self {
            user_agent: HeaderValue::from_str(user_agent)?,
        })
    }
}

impl RequestInterceptor for UserAgentInterceptor {
    fn intercept(&self, parts: &mut Parts) {
        parts
            .headers
            .insert(header::USER_AGENT, self.user_agent.clone());
    }
}
