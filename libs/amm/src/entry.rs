//! Entry operations: the boundary between callers holding value objects and
//! the pool ledger.
//!
//! These functions detect the canonical order of the caller's pair, dispatch
//! into reserve accounting with sides swapped as needed, and move settled
//! value objects back out. Value accounting is total: every [`Asset`] or
//! [`LiquidityToken`] passed in is either consumed into the pool, returned
//! as change on success, or returned whole inside [`Rejected`] on failure.
//! Pool state never changes on a failed path.

use crate::error::AmmError;
use crate::pool::DepositReport;
use crate::registry::PoolRegistry;
use std::fmt::Debug;
use thiserror::Error;
use tracing::{debug, info};
use types::{Asset, AssetId, LiquidityToken, PairTag};

/// A failed entry operation, carrying the caller's unconsumed value back.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct Rejected<R: Debug> {
    pub error: AmmError,
    pub refund: R,
}

/// Deposits a pair of assets, minting a liquidity claim.
///
/// Auto-registers the pool on first use. The returned assets are the
/// unconsumed remainders of each deposit (zero-valued when fully consumed);
/// the report is in the caller's argument order.
pub fn add_liquidity(
    registry: &PoolRegistry,
    asset_a: Asset,
    min_a: u64,
    asset_b: Asset,
    min_b: u64,
) -> Result<(LiquidityToken, DepositReport, Asset, Asset), Rejected<(Asset, Asset)>> {
    let (id_a, amount_a) = asset_a.into_parts();
    let (id_b, amount_b) = asset_b.into_parts();

    match add_liquidity_inner(registry, &id_a, amount_a, min_a, &id_b, amount_b, min_b) {
        Ok((token, report)) => {
            let change_a = Asset::new(id_a, amount_a - report.consumed_a);
            let change_b = Asset::new(id_b, amount_b - report.consumed_b);
            Ok((token, report, change_a, change_b))
        }
        Err(error) => Err(Rejected {
            error,
            refund: (Asset::new(id_a, amount_a), Asset::new(id_b, amount_b)),
        }),
    }
}

fn add_liquidity_inner(
    registry: &PoolRegistry,
    id_a: &AssetId,
    amount_a: u64,
    min_a: u64,
    id_b: &AssetId,
    amount_b: u64,
    min_b: u64,
) -> Result<(LiquidityToken, DepositReport), AmmError> {
    let (pair, swapped) = PairTag::with_orientation(id_a.clone(), id_b.clone())?;

    if !registry.has_registered(&pair) {
        match registry.register(&pair) {
            // A concurrent caller may have won the registration race.
            Ok(()) | Err(AmmError::AlreadyRegistered(_)) => {}
            Err(other) => return Err(other),
        }
    }

    let (dep_a, dep_b, floor_a, floor_b) = if swapped {
        (amount_b, amount_a, min_b, min_a)
    } else {
        (amount_a, amount_b, min_a, min_b)
    };
    let report = registry.with_pool(&pair, |pool| {
        pool.add_liquidity(dep_a, floor_a, dep_b, floor_b)
    })?;

    // Back to the caller's argument order.
    let (consumed_a, consumed_b) = if swapped {
        (report.consumed_b, report.consumed_a)
    } else {
        (report.consumed_a, report.consumed_b)
    };
    info!(pair = %pair, consumed_a, consumed_b, minted = report.minted, "add_liquidity");
    Ok((
        LiquidityToken::new(pair, report.minted),
        DepositReport {
            consumed_a,
            consumed_b,
            minted: report.minted,
        },
    ))
}

/// Redeems a liquidity claim for its proportional share of both reserves.
/// Outputs come back in the pair's canonical order.
pub fn remove_liquidity(
    registry: &PoolRegistry,
    token: LiquidityToken,
) -> Result<(Asset, Asset), Rejected<LiquidityToken>> {
    let (pair, units) = token.into_parts();
    match registry.with_pool(&pair, |pool| pool.remove_liquidity(units)) {
        Ok((out_a, out_b)) => {
            info!(pair = %pair, burned = units, out_a, out_b, "remove_liquidity");
            Ok((
                Asset::new(pair.lesser().clone(), out_a),
                Asset::new(pair.greater().clone(), out_b),
            ))
        }
        Err(error) => Err(Rejected {
            error,
            refund: LiquidityToken::new(pair, units),
        }),
    }
}

/// Overwrites a pool's fee. Silently a no-op if the pair has no pool yet;
/// authorization is the caller's concern.
pub fn set_fee(
    registry: &PoolRegistry,
    asset_a: &AssetId,
    asset_b: &AssetId,
    fee_numerator: u64,
    fee_denominator: u64,
) -> Result<(), AmmError> {
    let pair = PairTag::new(asset_a.clone(), asset_b.clone())?;
    if !registry.has_registered(&pair) {
        debug!(pair = %pair, "set_fee on unregistered pair ignored");
        return Ok(());
    }
    registry.with_pool(&pair, |pool| pool.set_fee(fee_numerator, fee_denominator))
}

/// Sells the whole of `asset_in` for its counterpart, failing with a
/// slippage condition if the computed output is below `min_amount_out`.
pub fn swap_exact_in(
    registry: &PoolRegistry,
    asset_in: Asset,
    want_out: AssetId,
    min_amount_out: u64,
) -> Result<Asset, Rejected<Asset>> {
    let (id_in, amount_in) = asset_in.into_parts();
    match swap_inner(registry, &id_in, &want_out, |pool, a_to_b| {
        pool.swap_exact_in(amount_in, min_amount_out, a_to_b)
    }) {
        Ok(amount_out) => {
            debug!(%id_in, %want_out, amount_in, amount_out, "swap_exact_in");
            Ok(Asset::new(want_out, amount_out))
        }
        Err(error) => Err(Rejected {
            error,
            refund: Asset::new(id_in, amount_in),
        }),
    }
}

/// Buys exactly `amount_out` of the counterpart, spending from `asset_in`.
/// The value of `asset_in` is the caller's maximum: the trade fails with a
/// slippage condition if more would be required. Returns the output plus the
/// leftover input.
pub fn swap_exact_out(
    registry: &PoolRegistry,
    asset_in: Asset,
    want_out: AssetId,
    amount_out: u64,
) -> Result<(Asset, Asset), Rejected<Asset>> {
    let (id_in, max_amount_in) = asset_in.into_parts();
    match swap_inner(registry, &id_in, &want_out, |pool, a_to_b| {
        pool.swap_exact_out(amount_out, max_amount_in, a_to_b)
    }) {
        Ok(consumed_in) => {
            debug!(%id_in, %want_out, consumed_in, amount_out, "swap_exact_out");
            Ok((
                Asset::new(want_out, amount_out),
                Asset::new(id_in, max_amount_in - consumed_in),
            ))
        }
        Err(error) => Err(Rejected {
            error,
            refund: Asset::new(id_in, max_amount_in),
        }),
    }
}

fn swap_inner(
    registry: &PoolRegistry,
    id_in: &AssetId,
    want_out: &AssetId,
    op: impl FnOnce(&mut crate::pool::Pool, bool) -> Result<u64, AmmError>,
) -> Result<u64, AmmError> {
    let (pair, swapped) = PairTag::with_orientation(id_in.clone(), want_out.clone())?;
    // `swapped` means the input asset is the pair's greater side: a B→A trade.
    let a_to_b = !swapped;
    registry.with_pool(&pair, |pool| op(pool, a_to_b))
}
