pub mod endpoint;
pub mod error;
pub mod inverter;
pub mod power_station;
pub mod response;
pub mod scalar;

use crate::settings::Settings;
pub use error::Error;
use http::Method;
pub use inverter::InverterService;
pub use power_station::PowerStationService;
use response::{decode_result, Envelope};
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const API_URL: &str = "https://www.foxesscloud.com";
pub const DEFAULT_USER_AGENT: &str = concat!("foxesscloud-rs/", env!("CARGO_PKG_VERSION"));

/* Separator of the signed string. Four literal characters, not CR LF. */
const SIGNATURE_SEPARATOR: &str = "\\r\\n";

/// Everything the client needs, supplied by the caller.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Shared transport. A default `reqwest::Client` is built when absent.
    pub client: Option<reqwest::Client>,
    pub api_url: String,
    pub token: String,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(token: impl Into<String>, user_agent: impl Into<String>) -> Self {
        ClientConfig {
            client: None,
            api_url: API_URL.to_string(),
            token: token.into(),
            user_agent: user_agent.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Client {
    client: reqwest::Client,
    api_url: String,
    token: String,
    user_agent: String,
}

/// Hex MD5 of `path\r\ntoken\r\ntimestamp`, the `\r\n` being literal backslash escapes.
pub fn build_signature(path: &str, token: &str, timestamp: i64) -> String {
    let text = format!(
        "{}{sep}{}{sep}{}",
        path,
        token,
        timestamp,
        sep = SIGNATURE_SEPARATOR
    );
    format!("{:x}", md5::compute(text.as_bytes()))
}

impl Client {
    pub fn new(config: ClientConfig) -> Self {
        Client {
            client: config.client.unwrap_or_default(),
            api_url: config.api_url,
            token: config.token,
            user_agent: config.user_agent,
        }
    }

    pub fn from_settings(settings: Settings) -> Self {
        Client::new(ClientConfig {
            client: None,
            api_url: settings.api_url,
            token: settings.token,
            user_agent: settings.user_agent,
        })
    }

    pub fn power_stations(&self) -> PowerStationService<'_> {
        PowerStationService { client: self }
    }

    pub fn inverters(&self) -> InverterService<'_> {
        InverterService { client: self }
    }

    pub(crate) fn get_request(
        &self,
        path: &endpoint::Endpoint,
        query: &[(&str, &str)],
    ) -> Result<reqwest::Request, Error> {
        self.build_request::<()>(Method::GET, path, query, None)
    }

    pub(crate) fn post_request<P: Serialize + ?Sized>(
        &self,
        path: &endpoint::Endpoint,
        payload: &P,
    ) -> Result<reqwest::Request, Error> {
        self.build_request(Method::POST, path, &[], Some(payload))
    }

    fn build_request<P: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &endpoint::Endpoint,
        query: &[(&str, &str)],
        payload: Option<&P>,
    ) -> Result<reqwest::Request, Error> {
        let timestamp = chrono::Utc::now().timestamp_millis();
        self.build_request_at(method, path, query, payload, timestamp)
    }

    fn build_request_at<P: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &endpoint::Endpoint,
        query: &[(&str, &str)],
        payload: Option<&P>,
        timestamp: i64,
    ) -> Result<reqwest::Request, Error> {
        let url = format!("{}{}", self.api_url, path);

        let mut request = self.client.request(method, url);
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(payload) = payload {
            let body = serde_json::to_vec(payload).map_err(Error::RequestEncoding)?;
            request = request.body(body);
        }

        request
            .header("content-type", "application/json")
            .header("lang", "en")
            .header("timestamp", timestamp.to_string())
            .header("user-agent", self.user_agent.as_str())
            .header("token", self.token.as_str())
            .header("signature", build_signature(path, &self.token, timestamp))
            .build()
            .map_err(Error::Request)
    }

    /// Send `request`, check the envelope and decode its `result` as `T`.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        request: reqwest::Request,
    ) -> Result<T, Error> {
        log::debug!("{} {}", request.method(), request.url());

        let response_text = self
            .client
            .execute(request)
            .await
            .map_err(Error::Transport)?
            .text()
            .await
            .map_err(Error::BodyRead)?;

        log::trace!("response_text: {}", response_text);

        let envelope: Envelope = match serde_json::from_str(&response_text) {
            Ok(envelope) => envelope,
            Err(source) => {
                return Err(Error::InvalidResponse {
                    body: response_text,
                    source,
                })
            }
        };

        envelope.into_result().and_then(decode_result)
    }
}
