//! Read-only clients for the three third-party data feeds the front-end
//! consumes: Jupiter (balances, prices in SOL), Helius (asset metadata),
//! DexScreener (trading pairs) and CoinGecko (SOL/USD). No shared cache, no
//! retries; every failure maps to one `ApiError` for the caller to surface.

mod balances;
mod pairs;
mod prices;

pub use balances::TokenRow;
pub use pairs::{PairLiquidity, PairToken, TokenPair};

use serde::de::DeserializeOwned;

use crate::errors::ApiError;

/// Thin wrapper around one `reqwest` client. The Helius RPC endpoint is
/// optional; without it balance rows fall back to mint-derived metadata.
#[derive(Debug, Clone)]
pub struct TokenClient {
    http: reqwest::Client,
    rpc_endpoint: Option<String>,
}

impl TokenClient {
    pub fn new(rpc_endpoint: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            rpc_endpoint,
        }
    }

    pub(crate) fn rpc_endpoint(&self) -> Option<&str> {
        self.rpc_endpoint.as_deref()
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ApiError> {
        let res = self.http.get(url).send().await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status().as_u16(), url.to_string()));
        }
        Ok(res.json::<T>().await?)
    }

    pub(crate) async fn post_json<T: DeserializeOwned>(
        &self,
        url: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        let res = self.http.post(url).json(body).send().await?;
        if !res.status().is_success() {
            return Err(ApiError::Status(res.status().as_u16(), url.to_string()));
        }
        Ok(res.json::<T>().await?)
    }
}
