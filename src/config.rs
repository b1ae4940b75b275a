use crate::error::ProbeError;
use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use url::Url;

/// Prefix of the public Supabase variables shared with the mobile app's `.env`.
pub const PUBLIC_ENV_PREFIX: &str = "EXPO_PUBLIC_";
/// Prefix of the probe's own tuning variables.
pub const PROBE_ENV_PREFIX: &str = "PROBE_";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// `EXPO_PUBLIC_SUPABASE_URL`
    #[serde(default, deserialize_with = "lenient_string")]
    pub supabase_url: Option<String>,
    /// `EXPO_PUBLIC_SUPABASE_ANON_KEY`
    #[serde(default, deserialize_with = "lenient_string")]
    pub supabase_anon_key: Option<String>,
    pub loglevel: String,
    #[serde(default)]
    pub proxy: Option<Url>,
    pub connect_timeout_secs: u64,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            supabase_url: None,
            supabase_anon_key: None,
            loglevel: "warn".to_string(),
            proxy: None,
            connect_timeout_secs: 5,
            timeout_secs: 15,
        }
    }
}

impl Config {
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Env::prefixed(PUBLIC_ENV_PREFIX))
            .merge(Env::prefixed(PROBE_ENV_PREFIX))
    }

    /// Extract from the process environment. Call `dotenvy::dotenv()` first if
    /// a `.env` file should be honoured.
    pub fn from_env() -> Result<Self, ProbeError> {
        Ok(Self::figment().extract()?)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate the two required values. Nothing here touches the network.
    pub fn credentials(&self) -> Result<Credentials, ProbeError> {
        let raw_url = self.supabase_url.as_deref();
        let url = non_empty(raw_url).ok_or(ProbeError::MissingCredentials)?;
        let key =
            non_empty(self.supabase_anon_key.as_deref()).ok_or(ProbeError::MissingCredentials)?;

        let endpoint = Url::parse(url)?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(ProbeError::InvalidEndpoint(format!(
                "unsupported scheme `{}`",
                endpoint.scheme()
            )));
        }
        if endpoint.cannot_be_a_base() {
            return Err(ProbeError::InvalidEndpoint(url.to_string()));
        }

        Ok(Credentials {
            url: raw_url.unwrap_or(url).to_string(),
            endpoint,
            key: key.to_string(),
        })
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// The env provider parses values, so an all-digit key arrives as a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Str(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
    Bool(bool),
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(|v| match v {
        Scalar::Str(s) => s,
        Scalar::Unsigned(n) => n.to_string(),
        Scalar::Signed(n) => n.to_string(),
        Scalar::Float(n) => n.to_string(),
        Scalar::Bool(b) => b.to_string(),
    }))
}

/// Validated service endpoint and access key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Endpoint exactly as configured, for display.
    pub url: String,
    pub endpoint: Url,
    pub key: String,
}

impl Credentials {
    /// First 20 characters of the key followed by an ellipsis.
    pub fn masked_key(&self) -> String {
        let prefix: String = self.key.chars().take(20).collect();
        format!("{prefix}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn reads_public_supabase_variables() {
        Jail::expect_with(|jail| {
            jail.set_env("EXPO_PUBLIC_SUPABASE_URL", "https://demo.supabase.co");
            jail.set_env("EXPO_PUBLIC_SUPABASE_ANON_KEY", "anon-key-0123456789abcdef");
            jail.set_env("PROBE_TIMEOUT_SECS", "30");

            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.supabase_url.as_deref(), Some("https://demo.supabase.co"));
            assert_eq!(cfg.timeout(), Duration::from_secs(30));
            assert_eq!(cfg.connect_timeout(), Duration::from_secs(5));
            assert_eq!(cfg.loglevel, "warn");

            let creds = cfg.credentials().expect("credentials should validate");
            assert_eq!(creds.url, "https://demo.supabase.co");
            assert_eq!(creds.key, "anon-key-0123456789abcdef");
            Ok(())
        });
    }

    #[test]
    fn missing_values_are_a_configuration_error() {
        Jail::expect_with(|jail| {
            jail.set_env("EXPO_PUBLIC_SUPABASE_URL", "https://demo.supabase.co");

            let cfg: Config = Config::figment().extract()?;
            let err = cfg.credentials().unwrap_err();
            assert!(matches!(err, ProbeError::MissingCredentials));
            assert!(err.is_configuration());
            Ok(())
        });
    }

    #[test]
    fn numeric_key_is_read_as_text() {
        Jail::expect_with(|jail| {
            jail.set_env("EXPO_PUBLIC_SUPABASE_URL", "http://localhost:54321");
            jail.set_env("EXPO_PUBLIC_SUPABASE_ANON_KEY", "12345");

            let cfg: Config = Config::figment().extract()?;
            assert_eq!(cfg.supabase_anon_key.as_deref(), Some("12345"));
            let creds = cfg.credentials().expect("credentials should validate");
            assert_eq!(creds.key, "12345");
            Ok(())
        });
    }

    #[test]
    fn displayed_url_is_the_configured_text() {
        let cfg = Config {
            supabase_url: Some(" https://demo.supabase.co ".into()),
            supabase_anon_key: Some("key".into()),
            ..Config::default()
        };
        let creds = cfg.credentials().expect("credentials should validate");
        assert_eq!(creds.url, " https://demo.supabase.co ");
        assert_eq!(creds.endpoint.as_str(), "https://demo.supabase.co/");
    }

    #[test]
    fn blank_values_count_as_missing() {
        let cfg = Config {
            supabase_url: Some("   ".into()),
            supabase_anon_key: Some("key".into()),
            ..Config::default()
        };
        assert!(matches!(
            cfg.credentials(),
            Err(ProbeError::MissingCredentials)
        ));
    }

    #[test]
    fn rejects_non_http_endpoints() {
        let cfg = Config {
            supabase_url: Some("ftp://demo.supabase.co".into()),
            supabase_anon_key: Some("key".into()),
            ..Config::default()
        };
        let err = cfg.credentials().unwrap_err();
        assert!(matches!(err, ProbeError::InvalidEndpoint(_)));

        let cfg = Config {
            supabase_url: Some("not a url".into()),
            ..cfg
        };
        assert!(cfg.credentials().unwrap_err().is_configuration());
    }

    #[test]
    fn masks_key_after_twenty_chars() {
        let creds = Credentials {
            url: "https://demo.supabase.co".into(),
            endpoint: Url::parse("https://demo.supabase.co").unwrap(),
            key: "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.payload".into(),
        };
        assert_eq!(creds.masked_key(), "eyJhbGciOiJIUzI1NiIs...");

        let short = Credentials {
            key: "abc".into(),
            ..creds
        };
        assert_eq!(short.masked_key(), "abc...");
    }
}
