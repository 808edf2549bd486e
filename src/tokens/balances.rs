//! Wallet holdings: Jupiter balance feed merged with Helius asset metadata.
//! Rows are rebuilt from scratch on every fetch; nothing is cached here.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    known_decimals, ASSET_BATCH_CHUNK, FALLBACK_TOKEN_IMAGE, JUPITER_BALANCES_URL, NATIVE_MINT,
    SOL_LOGO_URL,
};
use crate::errors::ApiError;

use super::TokenClient;

/// Client-side view of one wallet holding, merged with metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenRow {
    pub mint: String,
    pub amount: f64,
    pub decimals: u8,
    pub symbol: String,
    pub name: String,
    pub image: String,
    /// Portion the user picked for deposit, if any.
    #[serde(default)]
    pub selected_amount: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct JupiterBalance {
    #[serde(rename = "uiAmount")]
    pub ui_amount: f64,
    #[serde(rename = "isFrozen", default)]
    #[allow(dead_code)]
    pub is_frozen: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct TokenMetadata {
    pub symbol: String,
    pub name: String,
    pub image: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HeliusAsset {
    pub id: String,
    #[serde(default)]
    pub token_info: Option<HeliusTokenInfo>,
    #[serde(default)]
    pub content: Option<HeliusContent>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HeliusTokenInfo {
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HeliusContent {
    #[serde(default)]
    pub metadata: Option<HeliusMetadata>,
    #[serde(default)]
    pub links: Option<HeliusLinks>,
    #[serde(default)]
    pub files: Option<Vec<HeliusFile>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HeliusMetadata {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HeliusLinks {
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct HeliusFile {
    #[serde(default)]
    pub cdn_uri: Option<String>,
    #[serde(default)]
    pub uri: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AssetBatchResponse {
    #[serde(default)]
    result: Option<Vec<HeliusAsset>>,
}

impl TokenClient {
    /// All non-zero holdings for `owner`, sorted by balance descending.
    pub async fn balances(&self, owner: &str) -> Result<Vec<TokenRow>, ApiError> {
        let url = format!("{JUPITER_BALANCES_URL}/{owner}");
        let balances: HashMap<String, JupiterBalance> = self.get_json(&url).await?;

        let non_zero: Vec<(String, JupiterBalance)> = balances
            .into_iter()
            .filter(|(_, b)| b.ui_amount > 0.0)
            .collect();
        if non_zero.is_empty() {
            return Ok(Vec::new());
        }

        let mints: Vec<String> = non_zero
            .iter()
            .filter(|(mint, _)| mint != "SOL")
            .map(|(mint, _)| mint.clone())
            .collect();
        let metadata = self.asset_metadata(&mints).await;

        Ok(merge_rows(non_zero, &metadata))
    }

    /// Best-effort metadata lookup; a failed chunk degrades that chunk to
    /// mint-derived fallbacks instead of failing the whole fetch.
    async fn asset_metadata(&self, mints: &[String]) -> HashMap<String, TokenMetadata> {
        let mut metadata = HashMap::new();
        let endpoint = match self.rpc_endpoint() {
            Some(endpoint) if !mints.is_empty() => endpoint.to_string(),
            _ => return metadata,
        };

        for chunk in mints.chunks(ASSET_BATCH_CHUNK) {
            let body = serde_json::json!({
                "jsonrpc": "2.0",
                "id": "asset-batch",
                "method": "getAssetBatch",
                "params": { "ids": chunk },
            });
            match self.post_json::<AssetBatchResponse>(&endpoint, &body).await {
                Ok(res) => {
                    for asset in res.result.unwrap_or_default() {
                        let meta = asset_to_metadata(&asset);
                        metadata.insert(asset.id, meta);
                    }
                }
                Err(err) => tracing::warn!(%err, "asset metadata chunk failed"),
            }
        }
        metadata
    }
}

pub(crate) fn asset_to_metadata(asset: &HeliusAsset) -> TokenMetadata {
    let content = asset.content.as_ref();
    let symbol = asset
        .token_info
        .as_ref()
        .and_then(|t| t.symbol.clone())
        .or_else(|| content.and_then(|c| c.metadata.as_ref()).and_then(|m| m.symbol.clone()))
        .unwrap_or_else(|| short_mint(&asset.id, 4));
    let name = content
        .and_then(|c| c.metadata.as_ref())
        .and_then(|m| m.name.clone())
        .or_else(|| asset.token_info.as_ref().and_then(|t| t.symbol.clone()))
        .unwrap_or_else(|| short_mint(&asset.id, 4));
    let first_file = content.and_then(|c| c.files.as_ref()).and_then(|f| f.first());
    let image = content
        .and_then(|c| c.links.as_ref())
        .and_then(|l| l.image.clone())
        .or_else(|| first_file.and_then(|f| f.cdn_uri.clone()))
        .or_else(|| first_file.and_then(|f| f.uri.clone()))
        .unwrap_or_else(|| FALLBACK_TOKEN_IMAGE.to_string());
    TokenMetadata { symbol, name, image }
}

pub(crate) fn merge_rows(
    non_zero: Vec<(String, JupiterBalance)>,
    metadata: &HashMap<String, TokenMetadata>,
) -> Vec<TokenRow> {
    let mut rows: Vec<TokenRow> = non_zero
        .into_iter()
        .map(|(mint, balance)| {
            if mint == "SOL" {
                // Jupiter reports native SOL under a symbolic key.
                TokenRow {
                    mint: NATIVE_MINT.to_string(),
                    amount: balance.ui_amount,
                    decimals: 9,
                    symbol: "SOL".to_string(),
                    name: "Solana".to_string(),
                    image: SOL_LOGO_URL.to_string(),
                    selected_amount: None,
                }
            } else {
                let meta = metadata.get(&mint).cloned().unwrap_or_else(|| TokenMetadata {
                    symbol: short_mint(&mint, 4),
                    name: short_mint(&mint, 8),
                    image: FALLBACK_TOKEN_IMAGE.to_string(),
                });
                TokenRow {
                    decimals: known_decimals(&mint),
                    amount: balance.ui_amount,
                    symbol: meta.symbol,
                    name: meta.name,
                    image: meta.image,
                    mint,
                    selected_amount: None,
                }
            }
        })
        .collect();

    rows.sort_by(|a, b| b.amount.partial_cmp(&a.amount).unwrap_or(Ordering::Equal));
    rows
}

fn short_mint(mint: &str, len: usize) -> String {
    mint.chars().take(len).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::USDC_MINT;

    #[test]
    fn jupiter_balance_payload_parses() {
        let json = format!(
            r#"{{
                "SOL": {{ "amount": "2500000000", "uiAmount": 2.5, "slot": 123, "isFrozen": false }},
                "{USDC_MINT}": {{ "amount": "10000000", "uiAmount": 10.0, "slot": 123, "isFrozen": false }}
            }}"#
        );
        let parsed: HashMap<String, JupiterBalance> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed["SOL"].ui_amount, 2.5);
    }

    #[test]
    fn rows_are_sorted_by_amount_descending_with_sol_mapped_to_native_mint() {
        let non_zero = vec![
            (
                USDC_MINT.to_string(),
                JupiterBalance {
                    ui_amount: 10.0,
                    is_frozen: false,
                },
            ),
            (
                "SOL".to_string(),
                JupiterBalance {
                    ui_amount: 2.5,
                    is_frozen: false,
                },
            ),
        ];
        let mut metadata = HashMap::new();
        metadata.insert(
            USDC_MINT.to_string(),
            TokenMetadata {
                symbol: "USDC".to_string(),
                name: "USD Coin".to_string(),
                image: "https://example.com/usdc.png".to_string(),
            },
        );

        let rows = merge_rows(non_zero, &metadata);
        assert_eq!(rows[0].symbol, "USDC");
        assert_eq!(rows[0].decimals, 6);
        assert_eq!(rows[1].mint, NATIVE_MINT);
        assert_eq!(rows[1].decimals, 9);
        assert_eq!(rows[1].name, "Solana");
    }

    #[test]
    fn unknown_mint_falls_back_to_mint_derived_metadata() {
        let non_zero = vec![(
            "Bonk9999999999999999999999999999999999999999".to_string(),
            JupiterBalance {
                ui_amount: 1.0,
                is_frozen: false,
            },
        )];
        let rows = merge_rows(non_zero, &HashMap::new());
        assert_eq!(rows[0].symbol, "Bonk");
        assert_eq!(rows[0].name, "Bonk9999");
        assert_eq!(rows[0].image, FALLBACK_TOKEN_IMAGE);
        assert_eq!(rows[0].decimals, 6);
    }

    #[test]
    fn helius_asset_fallback_chain() {
        let json = r#"{
            "id": "MintAAAA1111",
            "token_info": {},
            "content": {
                "metadata": { "name": "Widget" },
                "files": [{ "uri": "https://example.com/w.png" }]
            }
        }"#;
        let asset: HeliusAsset = serde_json::from_str(json).unwrap();
        let meta = asset_to_metadata(&asset);
        assert_eq!(meta.symbol, "Mint");
        assert_eq!(meta.name, "Widget");
        assert_eq!(meta.image, "https://example.com/w.png");
    }
}
