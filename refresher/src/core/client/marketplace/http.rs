use super::types::{ProviderNftsResponse, ProviderRateLimitResponse};
use super::{FetchError, MetadataFetcher};
use crate::types::params::MarketplaceParams;
use crate::types::{FetchPage, MetadataItem};
use alloy_primitives::Address;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, RETRY_AFTER};
use reqwest::StatusCode;
use tracing::{debug, instrument, warn};
use url::Url;

const API_KEY_HEADER: &str = "x-api-key";

/// HTTP client for the marketplace collection endpoint.
pub struct HttpMetadataFetcher {
    client: reqwest::Client,
    base_url: Url,
    page_size: u32,
}

impl HttpMetadataFetcher {
    pub fn new(params: &MarketplaceParams) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some(api_key) = &params.api_key {
            let value = HeaderValue::from_str(api_key)
                .map_err(|e| FetchError::UrlError { slug: String::new(), message: e.to_string() })?;
            headers.insert(API_KEY_HEADER, value);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(params.request_timeout)
            .build()
            .map_err(|e| FetchError::from_reqwest_error("", e))?;

        Ok(Self { client, base_url: params.base_url.clone(), page_size: params.page_size })
    }

    fn collection_url(&self, slug: &str, continuation: Option<&str>) -> Result<Url, FetchError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::UrlError { slug: slug.to_string(), message: "base URL cannot be a base".into() })?
            .pop_if_empty()
            .extend(["collection", slug, "nfts"]);
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("limit", &self.page_size.to_string());
            if let Some(next) = continuation {
                query.append_pair("next", next);
            }
        }
        Ok(url)
    }

    /// Cooldown requested by a 429: body `expires_in`, then the `Retry-After` header.
    async fn rate_limit_expiry(response: reqwest::Response) -> Option<u64> {
        let header_hint = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());

        let body_hint = response.json::<ProviderRateLimitResponse>().await.ok().and_then(|body| body.expires_in);
        body_hint.or(header_hint)
    }
}

#[async_trait]
impl MetadataFetcher for HttpMetadataFetcher {
    #[instrument(skip(self, continuation), fields(has_continuation = continuation.is_some()))]
    async fn fetch(
        &self,
        contract: Address,
        slug: &str,
        method: &str,
        continuation: Option<String>,
    ) -> Result<FetchPage, FetchError> {
        let url = self.collection_url(slug, continuation.as_deref())?;
        let response = self.client.get(url).send().await.map_err(|e| FetchError::from_reqwest_error(slug, e))?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            // The scheduler applies its own floor, 0 only means "no hint".
            let expires_in_seconds = Self::rate_limit_expiry(response).await.unwrap_or_default();
            warn!(slug, method, expires_in_seconds, "Provider rate limit hit");
            return Err(FetchError::RateLimited { expires_in_seconds });
        }

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(FetchError::ApiError { slug: slug.to_string(), status, message });
        }

        let body: ProviderNftsResponse = response.json().await.map_err(|e| FetchError::from_reqwest_error(slug, e))?;
        let metadata: Vec<MetadataItem> = body
            .nfts
            .into_iter()
            .map(|nft| MetadataItem {
                contract: nft.contract.unwrap_or(contract),
                token_id: nft.identifier,
                collection: nft.collection,
                slug: Some(slug.to_string()),
                name: nft.name,
                description: nft.description,
                image_url: nft.image_url,
                media_url: nft.animation_url,
                attributes: nft.traits,
            })
            .collect();

        debug!(slug, items = metadata.len(), has_next = body.next.is_some(), "Fetched provider page");
        Ok(FetchPage { metadata, continuation: body.next.filter(|next| !next.is_empty()) })
    }
}
