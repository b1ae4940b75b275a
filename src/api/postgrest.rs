use super::TableReader;
use crate::config::{Config, Credentials};
use crate::error::ProbeError;
use reqwest::header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tracing::debug;
use url::Url;

const APIKEY: HeaderName = HeaderName::from_static("apikey");

/// Supabase REST (PostgREST) reader authenticated with the project's key.
#[derive(Clone)]
pub struct PostgrestClient {
    http: reqwest::Client,
    endpoint: Url,
}

impl PostgrestClient {
    /// Build the HTTP client with the auth headers, timeouts and proxy from config.
    pub fn new(creds: &Credentials, cfg: &Config) -> Result<Self, ProbeError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(APIKEY, header_value(&creds.key)?);
        headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", creds.key))?);

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("schema-probe/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(cfg.connect_timeout())
            .timeout(cfg.timeout())
            .default_headers(headers);
        if let Some(proxy_url) = cfg.proxy.as_ref() {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
        }

        Ok(Self {
            http: builder.build()?,
            endpoint: creds.endpoint.clone(),
        })
    }

    /// `{endpoint}/rest/v1/{table}`; an empty table names the API root.
    pub fn table_url(&self, table: &str) -> Result<Url, ProbeError> {
        let mut url = self.endpoint.clone();
        url.set_query(None);
        url.set_fragment(None);
        url.path_segments_mut()
            .map_err(|_| ProbeError::InvalidEndpoint(self.endpoint.to_string()))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);
        Ok(url)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ProbeError> {
    HeaderValue::from_str(value)
        .map_err(|_| ProbeError::InvalidKey("not a valid header value".into()))
}

impl TableReader for PostgrestClient {
    async fn ping(&self) -> Result<(), ProbeError> {
        let url = self.table_url("")?;
        let resp = self.http.get(url).send().await?;
        debug!(status = %resp.status(), "service reachable");
        Ok(())
    }

    async fn select(&self, table: &str, limit: Option<usize>) -> Result<Vec<Value>, ProbeError> {
        let mut url = self.table_url(table)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("select", "*");
            if let Some(limit) = limit {
                query.append_pair("limit", &limit.to_string());
            }
        }
        debug!(table, url = %url, "select");

        let resp = self.http.get(url).send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(ProbeError::from_upstream_body(status, &body));
        }
        Ok(serde_json::from_slice(&body)?)
    }
}
