/// Pot capacity the donut renders against, in display dollars. The remaining
/// capacity becomes the first (background) slice of the wheel.
pub const ROUND_CAPACITY: f64 = 2_000.0;

pub const ROUND_DURATION_SECS: u32 = 54;
pub const NEW_ROUND_COUNTDOWN_SECS: u32 = 10;

/// Pause between winner selection and the wheel starting to move.
pub const SPIN_START_DELAY_MS: u64 = 500;
/// How long the wheel visually spins before coming to rest.
pub const SPIN_DURATION_MS: u64 = 6_500;
/// Extra buffer after the spin before the winner is revealed.
pub const SPIN_BUFFER_MS: u64 = 500;
/// Delay between round reset and the next round going live.
pub const ROUND_RESTART_DELAY_MS: u64 = 1_000;

/// A freshly accepted deposit keeps the chart transition in flight this long.
/// No structural data changes are allowed while the window is open.
pub const DEPOSIT_SETTLE_WINDOW_MS: u64 = 1_500;

pub const FEED_MIN_INTERVAL_MS: u64 = 5_000;
pub const FEED_MAX_INTERVAL_MS: u64 = 9_000;
pub const SELF_DEPOSIT_CHANCE: f64 = 0.2;
pub const STABLE_TOKEN_CHANCE: f64 = 0.3;
/// Fabricated deposits are whole dollars in [FEED_MIN_AMOUNT, FEED_MAX_AMOUNT).
pub const FEED_MIN_AMOUNT: u32 = 50;
pub const FEED_MAX_AMOUNT: u32 = 550;

pub const HISTORY_LIMIT: usize = 50;

pub const MIN_SPIN_TURNS: f64 = 6.0;
pub const MAX_SPIN_TURNS: f64 = 12.0;
/// Wobble applied to the composed rotation, in degrees (plus or minus).
pub const SPIN_WOBBLE_DEGREES: f64 = 1.0;
/// The winner pointer is fixed at the top of the wheel; pie angles start at 90°.
pub const POINTER_ANGLE: f64 = 90.0;

/// Display name the feed uses when a fabricated deposit belongs to the viewer.
pub const SELF_USER: &str = "You";

pub const REMAINING_CAPACITY_KEY: &str = "remaining-capacity";
pub const BACKGROUND_COLOR: &str = "#1A0B2E";
pub const CHART_COLORS: [&str; 20] = [
    "#FFD700", "#FF1493", "#FF8C00", "#FFFF00", "#FF69B4",
    "#00FFFF", "#9932CC", "#32CD32", "#FF4500", "#1E90FF",
    "#FF6347", "#8A2BE2", "#00FA9A", "#DC143C", "#40E0D0",
    "#FFA500", "#DA70D6", "#98FB98", "#F0E68C", "#DDA0DD",
];

pub const NATIVE_MINT: &str = "So11111111111111111111111111111111111111112";
pub const USDC_MINT: &str = "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v";
pub const USDT_MINT: &str = "Es9vMFrzaCERmJfrF4H2FYD4KCoNkY11McCe8BenwNYB";

pub const JUPITER_BALANCES_URL: &str = "https://lite-api.jup.ag/ultra/v1/balances";
pub const JUPITER_PRICE_URL: &str = "https://lite-api.jup.ag/price/v2";
pub const DEXSCREENER_TOKENS_URL: &str = "https://api.dexscreener.com/tokens/v1";
pub const COINGECKO_SOL_PRICE_URL: &str =
    "https://api.coingecko.com/api/v3/simple/price?ids=solana&vs_currencies=usd";

/// Helius getAssetBatch accepts at most this many ids per call.
pub const ASSET_BATCH_CHUNK: usize = 100;
pub const FALLBACK_TOKEN_IMAGE: &str = "/solana-logo.png";
pub const SOL_LOGO_URL: &str = "https://solana.com/src/img/branding/solanaLogoMark.png";

/// Decimals for mints we recognize without a metadata lookup.
pub fn known_decimals(mint: &str) -> u8 {
    match mint {
        NATIVE_MINT => 9,
        USDC_MINT | USDT_MINT => 6,
        _ => 6,
    }
}
