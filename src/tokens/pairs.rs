//! DexScreener trading-pair lookup, used to decide whether a token has a
//! live market. Only the fields the front-end actually reads.

use serde::Deserialize;

use crate::constants::DEXSCREENER_TOKENS_URL;
use crate::errors::ApiError;

use super::TokenClient;

#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    #[serde(rename = "chainId")]
    pub chain_id: String,
    #[serde(rename = "dexId")]
    pub dex_id: String,
    pub url: String,
    #[serde(rename = "pairAddress")]
    pub pair_address: String,
    #[serde(rename = "baseToken")]
    pub base_token: PairToken,
    #[serde(rename = "quoteToken")]
    pub quote_token: PairToken,
    #[serde(rename = "priceNative")]
    pub price_native: String,
    #[serde(rename = "priceUsd", default)]
    pub price_usd: Option<String>,
    #[serde(default)]
    pub liquidity: Option<PairLiquidity>,
    #[serde(rename = "marketCap", default)]
    pub market_cap: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairToken {
    pub address: String,
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PairLiquidity {
    #[serde(default)]
    pub usd: Option<f64>,
    #[serde(default)]
    pub base: Option<f64>,
    #[serde(default)]
    pub quote: Option<f64>,
}

impl TokenClient {
    /// All known pairs for the given token addresses on one chain.
    pub async fn pairs(&self, chain: &str, mints: &[String]) -> Result<Vec<TokenPair>, ApiError> {
        if mints.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{DEXSCREENER_TOKENS_URL}/{chain}/{}", mints.join(","));
        self.get_json(&url).await
    }
}
