//! # Riptide AMM Library - Constant-Product Pool Engine
//!
//! ## Purpose
//!
//! Registry of asset-pair liquidity pools with exact integer arithmetic:
//! participants deposit paired assets to mint a proportional liquidity
//! claim, redeem that claim for a proportional share of the reserves, and
//! swap one asset for the other along a constant-product price curve under
//! explicit fee and slippage rules.
//!
//! ## Integration Points
//!
//! - **Input Sources**: caller-held value objects (`types::Asset`,
//!   `types::LiquidityToken`) and slippage bounds
//! - **Output Destinations**: settled value objects plus deposit/swap
//!   reports back to the boundary caller
//! - **Precision**: all magnitudes are u64 in native asset units; every
//!   price and share computation routes through a 128-bit accumulator
//! - **Concurrency**: per-pool mutual exclusion, independent pools mutate
//!   in parallel, one-shot registration per pair
//!
//! ## Architecture Role
//!
//! ```text
//! entry ops ──► registry lookup ──► pool accounting ──► pricing ──► math
//! (boundary)    (DashMap + lock)    (mint/burn/settle)  (x*y=k)     (mul_div)
//! ```
//!
//! The settlement primitive trusts its caller to have priced the trade; it
//! is crate-private so only the checked exact-in/exact-out paths reach it.
//!
//! ## Module Guide
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`math`] | `mul_div`, widening multiply, integer square root |
//! | [`pricing`] | `get_amount_out` / `get_amount_in` / `quote` |
//! | [`pool`] | Pool record, reserve accounting, liquidity mint/burn |
//! | [`registry`] | Canonical pair key → pool, init-once global |
//! | [`entry`] | Boundary operations over linear value objects |
//! | [`config`] | TOML engine configuration |
//! | [`error`] | [`AmmError`] and the four-class error taxonomy |

pub mod config;
pub mod entry;
pub mod error;
pub mod math;
pub mod pool;
pub mod pricing;
pub mod registry;

pub use config::{EngineConfig, FeeConfig};
pub use entry::{add_liquidity, remove_liquidity, set_fee, swap_exact_in, swap_exact_out, Rejected};
pub use error::{AmmError, ErrorCategory};
pub use pool::{DepositReport, Pool, MAX_RESERVE, MINIMUM_LIQUIDITY};
pub use registry::{global, init_global, PoolRegistry};
