use crate::error::ListingsError;
use crate::listings::traits::ListingSource;
use crate::models::{ListingStatus, Property, PropertyId};
use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// MLS listings feed over HTTP.
///
/// Listings are addressed as `GET {base_url}/{id}` and authenticated with an
/// `access_token` query parameter. The id is percent-encoded as a single path
/// segment.
pub struct ListingsClient {
    client: Client,
    base_url: String,
    token: String,
}

impl ListingsClient {
    pub fn new(
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self, ListingsError> {
        Self::with_timeout(base_url, token, Duration::from_secs(30))
    }

    pub fn with_timeout(
        base_url: impl Into<String>,
        token: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ListingsError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("saved-homes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self::with_http_client(client, base_url, token))
    }

    /// Use a caller-configured reqwest client
    pub fn with_http_client(
        client: Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    fn listing_url(&self, id: &PropertyId) -> Result<Url, ListingsError> {
        if matches!(id.as_str(), "" | "." | "..") {
            return Err(ListingsError::InvalidId(id.clone()));
        }
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ListingsError::BaseUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| ListingsError::BaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .push(id.as_str());
        Ok(url)
    }
}

#[async_trait]
impl ListingSource for ListingsClient {
    async fn fetch(&self, id: &PropertyId) -> Result<Property, ListingsError> {
        let url = self.listing_url(id)?;
        debug!("Fetching listing: {}", url);

        let response = self
            .client
            .get(url)
            .query(&[("access_token", self.token.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ListingsError::Status {
                id: id.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        let payload: ListingPayload = serde_json::from_str(&body)?;
        Ok(payload.into_property(id.clone()))
    }

    fn source_name(&self) -> &'static str {
        "MLS"
    }
}

/// Listing payload as returned by the feed (RESO field names)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct ListingPayload {
    list_price: Option<f64>,
    bedrooms_total: Option<u32>,
    bathrooms_total_integer: Option<f32>,
    living_area: Option<f64>,
    unparsed_address: Option<String>,
    #[serde(default)]
    media: Vec<Media>,
    standard_status: Option<String>,
    year_built: Option<u16>,
    list_office_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Media {
    #[serde(rename = "MediaURL")]
    media_url: Option<String>,
}

impl ListingPayload {
    fn into_property(self, id: PropertyId) -> Property {
        Property {
            id,
            price: self.list_price.unwrap_or_default().round() as i64,
            beds: self.bedrooms_total.unwrap_or_default(),
            baths: self.bathrooms_total_integer.unwrap_or_default(),
            sqft: self.living_area.unwrap_or_default().round() as u32,
            address: self.unparsed_address.unwrap_or_default(),
            images: self.media.into_iter().filter_map(|m| m.media_url).collect(),
            status: self
                .standard_status
                .as_deref()
                .map(ListingStatus::parse)
                .unwrap_or(ListingStatus::Other(String::new())),
            year_built: self.year_built,
            listing_office: self.list_office_name,
            loved: false,
            is_placeholder: false,
            fetched_at: Utc::now(),
        }
    }
}
