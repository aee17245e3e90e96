//! PostgREST-compatible implementation of [`RemoteDataClient`].
//!
//! Talks to a hosted Postgres REST gateway: tables under `/rest/v1/<table>`,
//! stored procedures under `/rest/v1/rpc/<function>`, authenticated with the
//! project's anon key in both the `apikey` and bearer headers.

use async_trait::async_trait;
use reqwest::{Method, Request, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

use estate_types::{Listing, ListingId, ListingUpdate, NewListing, PortfolioEntry, WalletAddress};

use crate::client::{BuySharesRequest, RemoteDataClient, BUY_SHARES_FN, PORTFOLIO_TABLE, PROPERTIES_TABLE};
use crate::StoreError;

/// HTTP client for the listing database.
#[derive(Clone)]
pub struct RestDataClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Error body returned by PostgREST.
#[derive(Debug, Deserialize)]
struct PostgrestError {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

impl RestDataClient {
    /// Create a client for the project at `base_url` (e.g. `https://abc.supabase.co`).
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, StoreError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| StoreError::Request(format!("failed to create HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, table)
    }

    fn rpc_url(&self, function: &str) -> String {
        format!("{}/rest/v1/rpc/{}", self.base_url, function)
    }

    fn request(&self, method: Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn listings_request(&self) -> Result<Request, StoreError> {
        Ok(self
            .request(Method::GET, self.table_url(PROPERTIES_TABLE))
            .query(&[("select", "*"), ("order", "created_at.desc")])
            .build()?)
    }

    fn portfolio_request(&self, owner: &WalletAddress) -> Result<Request, StoreError> {
        Ok(self
            .request(Method::GET, self.table_url(PORTFOLIO_TABLE))
            .query(&[("select", "*".to_string()), ("user_id", format!("eq.{owner}"))])
            .build()?)
    }

    fn insert_request(&self, listing: &NewListing) -> Result<Request, StoreError> {
        Ok(self
            .request(Method::POST, self.table_url(PROPERTIES_TABLE))
            .header("Prefer", "return=minimal")
            .json(listing)
            .build()?)
    }

    fn update_request(&self, id: &ListingId, update: &ListingUpdate) -> Result<Request, StoreError> {
        Ok(self
            .request(Method::PATCH, self.table_url(PROPERTIES_TABLE))
            .query(&[("id", format!("eq.{id}"))])
            .header("Prefer", "return=minimal")
            .json(update)
            .build()?)
    }

    fn buy_request(&self, request: &BuySharesRequest) -> Result<Request, StoreError> {
        Ok(self
            .request(Method::POST, self.rpc_url(BUY_SHARES_FN))
            .json(request)
            .build()?)
    }

    async fn send(&self, request: Request) -> Result<Response, StoreError> {
        let method = request.method().clone();
        let path = request.url().path().to_string();
        debug!(%method, %path, "data request");

        let response = self.http.execute(request).await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        warn!(%method, %path, status = status.as_u16(), "data request rejected");
        Err(rejection(status.as_u16(), &body))
    }
}

/// Map a non-success response to an error, preferring the gateway's own message.
fn rejection(status: u16, body: &str) -> StoreError {
    match serde_json::from_str::<PostgrestError>(body) {
        Ok(err) => {
            if let Some(code) = err.code.as_deref() {
                debug!(code, "postgrest error code");
            }
            StoreError::Rejected(err.message)
        }
        Err(_) => StoreError::Http {
            status,
            body: body.to_string(),
        },
    }
}

#[async_trait]
impl RemoteDataClient for RestDataClient {
    async fn fetch_listings(&self) -> Result<Vec<Listing>, StoreError> {
        let response = self.send(self.listings_request()?).await?;
        Ok(response.json().await?)
    }

    async fn fetch_portfolio(
        &self,
        owner: &WalletAddress,
    ) -> Result<Vec<PortfolioEntry>, StoreError> {
        let response = self.send(self.portfolio_request(owner)?).await?;
        Ok(response.json().await?)
    }

    async fn insert_listing(&self, listing: &NewListing) -> Result<(), StoreError> {
        self.send(self.insert_request(listing)?).await?;
        Ok(())
    }

    async fn update_listing(
        &self,
        id: &ListingId,
        update: &ListingUpdate,
    ) -> Result<(), StoreError> {
        self.send(self.update_request(id, update)?).await?;
        Ok(())
    }

    async fn buy_shares(&self, request: &BuySharesRequest) -> Result<(), StoreError> {
        self.send(self.buy_request(request)?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> RestDataClient {
        RestDataClient::new("https://project.example.co/", "anon-key").unwrap()
    }

    fn owner() -> WalletAddress {
        WalletAddress::parse("0x71C7656EC7ab88b098defB751B7401B5f6d8976F").unwrap()
    }

    #[test]
    fn listings_are_ordered_newest_first() {
        let req = client().listings_request().unwrap();
        assert_eq!(req.method(), Method::GET);
        assert_eq!(req.url().path(), "/rest/v1/properties");
        assert_eq!(req.url().query(), Some("select=*&order=created_at.desc"));
        assert_eq!(req.headers()["apikey"], "anon-key");
        assert_eq!(req.headers()["authorization"], "Bearer anon-key");
    }

    #[test]
    fn portfolio_is_filtered_by_owner() {
        let req = client().portfolio_request(&owner()).unwrap();
        assert_eq!(req.url().path(), "/rest/v1/portfolio");
        let pairs: Vec<(String, String)> = req
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert!(pairs.contains(&(
            "user_id".to_string(),
            "eq.0x71C7656EC7ab88b098defB751B7401B5f6d8976F".to_string()
        )));
    }

    #[test]
    fn update_targets_single_row() {
        let update = ListingUpdate {
            price_per_share: 0.07,
            total_shares: 1200,
        };
        let req = client().update_request(&ListingId::new("7"), &update).unwrap();
        assert_eq!(req.method(), Method::PATCH);
        assert_eq!(req.url().query(), Some("id=eq.7"));
        let body = req.body().and_then(|b| b.as_bytes()).unwrap();
        let json: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(json["total_shares"], 1200);
    }

    #[test]
    fn buy_calls_remote_procedure() {
        let request = BuySharesRequest {
            asset_id: ListingId::new("7"),
            user_id: owner(),
            quantity: 10,
            total_price: 0.5,
        };
        let req = client().buy_request(&request).unwrap();
        assert_eq!(req.method(), Method::POST);
        assert_eq!(req.url().path(), "/rest/v1/rpc/buy_shares");
    }

    #[test]
    fn rejection_prefers_gateway_message() {
        let err = rejection(
            400,
            r#"{"code":"P0001","message":"Not enough shares available","details":null}"#,
        );
        assert_eq!(err.to_string(), "Not enough shares available");

        let err = rejection(502, "Bad Gateway");
        assert!(matches!(err, StoreError::Http { status: 502, .. }));
    }
}
