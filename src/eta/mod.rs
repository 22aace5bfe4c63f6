use self::data::{EtaEntry, EtaResponse};
use crate::registry::RouteConfig;
use isahc::{config::Configurable, AsyncReadResponseExt, HttpClient};
use std::{
    error::Error,
    fmt::{self, Display},
    time::Duration,
};

pub mod data;

pub const DEFAULT_API_URL: &str = "https://data.etabus.gov.hk";

/// Per-request deadline. The upstream occasionally hangs; without a
/// bound one stuck route would stall every route after it in the cycle.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug)]
pub enum FetchError {
    /// The request could not be completed (transport error or timeout).
    Http(String),
    /// The endpoint answered with a non-success status.
    Status(u16),
    /// The body of a 2xx response did not decode as an ETA response.
    Parse(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchError::Http(e) => write!(f, "http error: {}", e),
            FetchError::Status(code) => write!(f, "unexpected status code: {}", code),
            FetchError::Parse(e) => write!(f, "invalid response body: {}", e),
        }
    }
}

impl Error for FetchError {}

/// Seam between the scheduler and the network. One call is one GET for
/// one route; no retries, no filtering (sequence filtering happens in
/// the normalizer).
#[allow(async_fn_in_trait)]
pub trait FetchEtas {
    async fn fetch(&self, route: &str, config: &RouteConfig)
        -> Result<Vec<EtaEntry>, FetchError>;
}

pub struct EtaClient {
    api_url: String,
    http_client: HttpClient,
}

impl EtaClient {
    pub fn new(api_url: impl Into<String>) -> Result<Self, isahc::Error> {
        let http_client = HttpClient::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            api_url: api_url.into(),
            http_client,
        })
    }

    fn eta_url(&self, route: &str, config: &RouteConfig) -> String {
        format!(
            "{}/v1/transport/kmb/eta/{}/{}/{}",
            self.api_url, config.stop, route, config.service_type
        )
    }
}

impl FetchEtas for EtaClient {
    async fn fetch(
        &self,
        route: &str,
        config: &RouteConfig,
    ) -> Result<Vec<EtaEntry>, FetchError> {
        let url = self.eta_url(route, config);
        trace!("GET {}", url);

        let mut response = self
            .http_client
            .get_async(&url)
            .await
            .map_err(|e| FetchError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body: EtaResponse = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(body.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_follows_the_versioned_endpoint() {
        let client = EtaClient::new("https://data.etabus.gov.hk").unwrap();
        let config = RouteConfig {
            stop: "A6DCDE5BE439B179",
            service_type: "1",
            seq: 1,
        };

        assert_eq!(
            client.eta_url("39M", &config),
            "https://data.etabus.gov.hk/v1/transport/kmb/eta/A6DCDE5BE439B179/39M/1"
        );
    }

    #[test]
    fn response_body_decodes() {
        let body = r#"{
            "type": "ETA",
            "version": "1.0",
            "generated_timestamp": "2024-05-01T12:00:05+08:00",
            "data": [
                {
                    "co": "KMB",
                    "route": "30",
                    "dir": "O",
                    "service_type": 1,
                    "seq": 1,
                    "dest_tc": "長宏",
                    "dest_sc": "长宏",
                    "dest_en": "CHEUNG WANG",
                    "eta_seq": 1,
                    "eta": "2024-05-01T12:03:12+08:00",
                    "rmk_tc": "",
                    "rmk_sc": "",
                    "rmk_en": "",
                    "data_timestamp": "2024-05-01T12:00:00+08:00"
                },
                {
                    "co": "KMB",
                    "route": "30",
                    "dir": "O",
                    "service_type": 1,
                    "seq": 1,
                    "dest_tc": "長宏",
                    "dest_sc": "长宏",
                    "dest_en": "CHEUNG WANG",
                    "eta_seq": 2,
                    "eta": null,
                    "rmk_tc": "最後班次已過",
                    "rmk_sc": "最后班次已过",
                    "rmk_en": "The final bus has departed",
                    "data_timestamp": "2024-05-01T12:00:00+08:00"
                }
            ]
        }"#;

        let response: EtaResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.type_field, "ETA");
        assert_eq!(response.data.len(), 2);
        assert_eq!(
            response.data[0].eta.as_deref(),
            Some("2024-05-01T12:03:12+08:00")
        );
        assert!(response.data[1].eta.is_none());
        assert_eq!(response.data[1].rmk_tc, "最後班次已過");
    }

    #[test]
    fn malformed_body_is_a_parse_error() {
        let err = serde_json::from_str::<EtaResponse>("{\"type\": \"ETA\"}")
            .map_err(|e| FetchError::Parse(e.to_string()))
            .unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }
}
