//! TMAP POI client
//!
//! Uses the "search around" endpoint of the
//! [SK open API](https://openapi.sk.com) to find POIs near a point.

use std::time::Duration;

use async_trait::async_trait;
use domain::GeoLocation;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::config::PoiConfig;
use crate::error::PoiError;
use crate::models::{Poi, PoiSearchRequest};
use crate::provider::PoiProvider;

const MISSING_ADDRESS: &str = "주소 정보 없음";

/// TMAP implementation of [`PoiProvider`]
#[derive(Debug)]
pub struct TmapPoiClient {
    client: Client,
    config: PoiConfig,
    api_key: String,
}

impl TmapPoiClient {
    /// Create a new TMAP client
    ///
    /// # Errors
    ///
    /// Returns `PoiError::ConfigurationError` if no API key is configured,
    /// or `PoiError::ConnectionFailed` if the HTTP client cannot be built.
    pub fn new(config: &PoiConfig) -> Result<Self, PoiError> {
        let api_key = config
            .api_key()
            .ok_or_else(|| PoiError::ConfigurationError("TMAP API key is not set".to_string()))?
            .to_string();

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Yammi/0.1")
            .build()
            .map_err(|e| PoiError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key,
        })
    }

    fn search_url(&self) -> String {
        format!(
            "{}/pois/search/around",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn send(&self, request: &PoiSearchRequest) -> Result<reqwest::Response, PoiError> {
        let params = [
            ("version", "1".to_string()),
            ("searchKeyword", request.keyword.clone()),
            ("centerLon", request.center.longitude().to_string()),
            ("centerLat", request.center.latitude().to_string()),
            ("radius", request.radius_m.to_string()),
            ("searchType", "all".to_string()),
            ("searchtypCd", "A".to_string()),
            ("reqCoordType", "WGS84GEO".to_string()),
            ("resCoordType", "WGS84GEO".to_string()),
            ("count", request.count.to_string()),
        ];

        self.client
            .get(self.search_url())
            .header("Accept", "application/json")
            .header("appKey", &self.api_key)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PoiError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    PoiError::ConnectionFailed(e.to_string())
                }
            })
    }

    /// Parse a TMAP response body into POIs
    ///
    /// An empty body or a body without `searchPoiInfo` means no matches.
    /// POIs without a name or with unparseable coordinates are skipped.
    fn parse_response(body: &str) -> Result<Vec<Poi>, PoiError> {
        if body.trim().is_empty() {
            return Ok(Vec::new());
        }

        let raw: RawSearchResponse =
            serde_json::from_str(body).map_err(|e| PoiError::ParseError(e.to_string()))?;

        let pois = raw
            .search_poi_info
            .and_then(|info| info.pois)
            .map(|pois| pois.poi.into_vec())
            .unwrap_or_default();

        Ok(pois.into_iter().filter_map(Self::convert_poi).collect())
    }

    fn convert_poi(raw: RawPoi) -> Option<Poi> {
        let name = non_blank(raw.name.as_deref())?.to_string();

        let location = match GeoLocation::parse(
            raw.noor_lat.as_deref().unwrap_or_default(),
            raw.noor_lon.as_deref().unwrap_or_default(),
        ) {
            Ok(location) => location,
            Err(e) => {
                debug!(%name, error = %e, "Skipping POI with malformed coordinates");
                return None;
            },
        };

        let business_hint = [
            raw.upper_biz_name.as_deref(),
            raw.middle_biz_name.as_deref(),
            raw.lower_biz_name.as_deref(),
        ]
        .into_iter()
        .filter_map(non_blank)
        .collect::<Vec<_>>()
        .join(" ");
        let address = assemble_address(&raw);

        Some(Poi {
            id: raw.id,
            name,
            address,
            location,
            phone: raw.tel_no.filter(|tel| !tel.trim().is_empty()),
            business_hint,
        })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Administrative address when both upper and middle parts exist, otherwise
/// the road name, then the detail address, then a placeholder
fn assemble_address(raw: &RawPoi) -> String {
    let upper = non_blank(raw.upper_addr_name.as_deref());
    let middle = non_blank(raw.middle_addr_name.as_deref());

    if let (Some(upper), Some(middle)) = (upper, middle) {
        return match non_blank(raw.lower_addr_name.as_deref()) {
            Some(lower) => format!("{upper} {middle} {lower}"),
            None => format!("{upper} {middle}"),
        };
    }

    non_blank(raw.road_name.as_deref())
        .or_else(|| non_blank(raw.detail_addr_name.as_deref()))
        .unwrap_or(MISSING_ADDRESS)
        .to_string()
}

#[async_trait]
impl PoiProvider for TmapPoiClient {
    #[instrument(skip(self, request), fields(keyword = %request.keyword, radius_m = request.radius_m))]
    async fn search_around(&self, request: &PoiSearchRequest) -> Result<Vec<Poi>, PoiError> {
        if request.keyword.trim().is_empty() {
            return Err(PoiError::InvalidQuery(
                "Search keyword must not be empty".to_string(),
            ));
        }

        let response = self.send(request).await?;

        let status = response.status();
        match status {
            StatusCode::NO_CONTENT => {
                debug!("No POIs found");
                return Ok(Vec::new());
            },
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(PoiError::AuthenticationFailed(format!("HTTP {status}")));
            },
            StatusCode::TOO_MANY_REQUESTS => {
                return Err(PoiError::RateLimitExceeded {
                    retry_after_secs: response
                        .headers()
                        .get("retry-after")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|v| v.parse().ok()),
                });
            },
            s if s.is_server_error() => {
                return Err(PoiError::ServiceUnavailable(format!("HTTP {status}")));
            },
            s if !s.is_success() => {
                return Err(PoiError::RequestFailed(format!("HTTP {status}")));
            },
            _ => {},
        }

        let body = response
            .text()
            .await
            .map_err(|e| PoiError::ParseError(e.to_string()))?;

        let pois = Self::parse_response(&body)?;
        if pois.is_empty() {
            warn!("TMAP returned no usable POIs");
        }

        debug!(count = pois.len(), "POIs found");
        Ok(pois)
    }

    async fn is_healthy(&self) -> bool {
        let health_request = PoiSearchRequest::new("음식점", GeoLocation::seoul(), 100, 1);
        self.send(&health_request)
            .await
            .is_ok_and(|response| response.status().is_success())
    }

    fn provider_name(&self) -> &'static str {
        "tmap"
    }
}

// --- Raw API response types for deserialization ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSearchResponse {
    search_poi_info: Option<RawSearchPoiInfo>,
}

#[derive(Debug, Deserialize)]
struct RawSearchPoiInfo {
    pois: Option<RawPois>,
}

#[derive(Debug, Deserialize)]
struct RawPois {
    #[serde(default)]
    poi: OneOrMany<RawPoi>,
}

/// TMAP returns a bare object instead of an array when there is one match
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> Default for OneOrMany<T> {
    fn default() -> Self {
        Self::Many(Vec::new())
    }
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPoi {
    id: Option<String>,
    name: Option<String>,
    upper_addr_name: Option<String>,
    middle_addr_name: Option<String>,
    lower_addr_name: Option<String>,
    road_name: Option<String>,
    #[serde(rename = "detailAddrname")]
    detail_addr_name: Option<String>,
    noor_lat: Option<String>,
    noor_lon: Option<String>,
    tel_no: Option<String>,
    upper_biz_name: Option<String>,
    middle_biz_name: Option<String>,
    lower_biz_name: Option<String>,
}
