//! Prices: Jupiter price v2 quotes everything against SOL (SOL itself is
//! always 1), CoinGecko supplies the SOL/USD leg.

use std::collections::HashMap;

use serde::Deserialize;

use crate::constants::{COINGECKO_SOL_PRICE_URL, JUPITER_PRICE_URL, NATIVE_MINT};
use crate::errors::ApiError;

use super::TokenClient;

#[derive(Debug, Deserialize)]
pub(crate) struct JupiterPriceResponse {
    #[serde(default)]
    pub data: HashMap<String, JupiterPriceEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct JupiterPriceEntry {
    /// The v2 API returns prices as strings.
    pub price: String,
}

#[derive(Debug, Deserialize)]
struct CoinGeckoSolPrice {
    #[serde(default)]
    solana: Option<CoinGeckoUsd>,
}

#[derive(Debug, Deserialize)]
struct CoinGeckoUsd {
    usd: f64,
}

impl TokenClient {
    /// Price of each mint in SOL; `None` where the feed has no quote.
    pub async fn prices_in_sol(
        &self,
        mints: &[String],
    ) -> Result<HashMap<String, Option<f64>>, ApiError> {
        let non_sol: Vec<&str> = mints
            .iter()
            .map(String::as_str)
            .filter(|m| !m.is_empty() && *m != NATIVE_MINT)
            .collect();

        let quoted = if non_sol.is_empty() {
            HashMap::new()
        } else {
            let url = format!(
                "{JUPITER_PRICE_URL}?ids={}&vsToken={NATIVE_MINT}",
                non_sol.join(",")
            );
            let res: JupiterPriceResponse = self.get_json(&url).await?;
            res.data
        };

        Ok(collect_prices(mints, &quoted))
    }

    pub async fn sol_price_usd(&self) -> Result<f64, ApiError> {
        let res: CoinGeckoSolPrice = self.get_json(COINGECKO_SOL_PRICE_URL).await?;
        res.solana
            .map(|s| s.usd)
            .ok_or_else(|| ApiError::Malformed("coingecko response missing solana.usd".into()))
    }
}

pub(crate) fn collect_prices(
    mints: &[String],
    quoted: &HashMap<String, JupiterPriceEntry>,
) -> HashMap<String, Option<f64>> {
    let mut prices = HashMap::with_capacity(mints.len());
    for mint in mints {
        let price = if mint == NATIVE_MINT {
            Some(1.0)
        } else {
            quoted.get(mint).and_then(|e| e.price.parse::<f64>().ok())
        };
        prices.insert(mint.clone(), price);
    }
    prices
}
