//! # Riptide Shared Types Library
//!
//! Domain types shared across the Riptide AMM engine.
//!
//! ## Design Philosophy
//!
//! - **No Precision Loss**: All financial magnitudes are unsigned 64-bit
//!   integers in native asset units; no floating point anywhere
//! - **Linear Value Objects**: [`Asset`] and [`LiquidityToken`] are owned,
//!   non-`Clone` values — they can be split, merged, or consumed, but never
//!   duplicated, so every code path must account for 100% of the value it
//!   receives
//! - **Canonical Identity**: [`AssetId`] carries the globally unique textual
//!   name of an asset type; its byte order defines the canonical ordering of
//!   every trading pair
//! - **Clear Boundaries**: the pool engine (`riptide-amm`) holds all business
//!   logic; this crate only defines the vocabulary it speaks
//!
//! ## Quick Start
//!
//! ```rust
//! use types::{Asset, AssetId, PairTag};
//!
//! let usdc = AssetId::new("USDC");
//! let weth = AssetId::new("WETH");
//!
//! // Pairs canonicalize on construction: (WETH, USDC) and (USDC, WETH)
//! // name the same pool.
//! let pair = PairTag::new(weth.clone(), usdc.clone()).unwrap();
//! assert_eq!(pair.registry_key(), "LP-USDC-WETH");
//!
//! // Value objects move; splitting is the only way to spend part of one.
//! let coin = Asset::new(usdc, 1_000);
//! let (payment, change) = coin.split(250).unwrap();
//! assert_eq!(payment.amount(), 250);
//! assert_eq!(change.amount(), 750);
//! ```

pub mod asset;
pub mod liquidity;
pub mod pair;

pub use asset::{Asset, AssetId};
pub use liquidity::LiquidityToken;
pub use pair::PairTag;

use thiserror::Error;

/// Errors raised by linear value-object operations.
///
/// These all indicate caller bugs (mixing assets from different pools or
/// arithmetic outside the u64 range), never recoverable economic conditions.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("asset mismatch: expected {expected}, got {actual}")]
    AssetMismatch { expected: String, actual: String },

    #[error("liquidity token pair mismatch: expected {expected}, got {actual}")]
    PairMismatch { expected: String, actual: String },

    #[error("value overflow merging amounts {0} and {1}")]
    ValueOverflow(u64, u64),

    #[error("split amount {requested} exceeds held value {held}")]
    SplitExceedsValue { requested: u64, held: u64 },

    #[error("cannot pair asset {0} with itself")]
    IdenticalAssets(String),
}
