use std::time::Duration;

use impact_api::ImpactCredentials;

/// Environment variable holding the Impact server url.
pub const URL_ENV: &str = "MODELON_IMPACT_CLIENT_URL";

const DEFAULT_ENDPOINT: &str = "http://localhost:8080/";

/// Configuration for the [ImpactClient](crate::ImpactClient). Can be created using [ImpactClientConfigBuilder], which is created using the [ImpactClientConfig::builder] method.
#[derive(Debug, Clone)]
pub struct ImpactClientConfig {
    /// The url of the Impact server
    pub endpoint: String,
    /// Credentials to log in with, an anonymous session is used when absent.
    pub credentials: Option<ImpactCredentials>,
    /// The number of retries to attempt when connecting to the Impact server.
    pub num_retries: u8,
    /// The interval to wait between retries in seconds.
    pub retry_interval: u64,
}

impl ImpactClientConfig {
    /// Create a new [ImpactClientConfigBuilder] with the given credentials.
    pub fn builder(creds: ImpactCredentials) -> ImpactClientConfigBuilder {
        ImpactClientConfigBuilder::new(Some(creds))
    }

    /// Create a new [ImpactClientConfigBuilder] logging in without an API key.
    pub fn anonymous() -> ImpactClientConfigBuilder {
        ImpactClientConfigBuilder::new(None)
    }

    /// Create a new [ImpactClientConfigBuilder] with the credentials found
    /// in the environment or in the key file.
    pub fn from_env() -> ImpactClientConfigBuilder {
        let creds = ImpactCredentials::discover();
        if creds.is_none() {
            log::info!("No API key found, an anonymous session will be used");
        }
        ImpactClientConfigBuilder::new(creds)
    }

    pub fn retry_interval(&self) -> Duration {
        Duration::from_secs(self.retry_interval)
    }
}

/// Builder for the ImpactClientConfig
pub struct ImpactClientConfigBuilder {
    config: ImpactClientConfig,
}

impl ImpactClientConfigBuilder {
    pub(crate) fn new(creds: Option<ImpactCredentials>) -> ImpactClientConfigBuilder {
        ImpactClientConfigBuilder {
            config: ImpactClientConfig {
                endpoint: default_endpoint(),
                credentials: creds,
                num_retries: 3,
                retry_interval: 3,
            },
        }
    }

    /// Set the url of the Impact server
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> ImpactClientConfigBuilder {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set the number of retries to attempt when connecting to the Impact server
    pub fn with_num_retries(mut self, num_retries: u8) -> ImpactClientConfigBuilder {
        self.config.num_retries = num_retries;
        self
    }

    /// Set the interval to wait between retries in seconds
    pub fn with_retry_interval(mut self, retry_interval: u64) -> ImpactClientConfigBuilder {
        self.config.retry_interval = retry_interval;
        self
    }

    /// Build the ImpactClientConfig
    pub fn build(self) -> ImpactClientConfig {
        self.config
    }
}

fn default_endpoint() -> String {
    match std::env::var(URL_ENV) {
        Ok(url) if !url.is_empty() => url,
        _ => {
            log::warn!(
                "No server url given and {URL_ENV} is not set, using {DEFAULT_ENDPOINT}"
            );
            DEFAULT_ENDPOINT.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_overrides_defaults() {
        let config = ImpactClientConfig::builder(ImpactCredentials::new("key"))
            .with_endpoint("https://impact.example.com/")
            .with_num_retries(0)
            .with_retry_interval(1)
            .build();

        assert_eq!(config.endpoint, "https://impact.example.com/");
        assert_eq!(config.num_retries, 0);
        assert_eq!(config.retry_interval(), Duration::from_secs(1));
        assert_eq!(
            config.credentials.as_ref().map(|c| c.api_key()),
            Some("key")
        );
    }

    #[test]
    fn anonymous_has_no_credentials() {
        let config = ImpactClientConfig::anonymous().build();

        assert!(config.credentials.is_none());
        assert_eq!(config.num_retries, 3);
        assert_eq!(config.retry_interval, 3);
    }
}
