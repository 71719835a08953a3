//! Constant-product pricing with a rational fee.
//!
//! Closed-form x*y=k formulas over a hypothetical `(reserve_in, reserve_out)`
//! pair. Pure functions: settlement happens elsewhere, so these stay
//! centrally testable.
//!
//! Fee convention: a trade pays `fee_numerator / fee_denominator` of its
//! input (e.g. 30/10000 = 0.30%); the valid range is
//! `fee_denominator > fee_numerator > 0`.

use crate::error::AmmError;
use crate::math::mul_div;

fn check_fee(fee_numerator: u64, fee_denominator: u64) -> Result<(), AmmError> {
    if fee_numerator == 0 || fee_denominator <= fee_numerator {
        return Err(AmmError::FeeOutOfRange {
            numerator: fee_numerator,
            denominator: fee_denominator,
        });
    }
    Ok(())
}

/// Exact output for a given input, fee-on-input.
///
/// `output = (in * (den - num) * reserve_out) / (reserve_in * den + in * (den - num))`
///
/// Floors the division, so the pool always keeps the rounding dust.
pub fn get_amount_out(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_numerator: u64,
    fee_denominator: u64,
) -> Result<u64, AmmError> {
    if amount_in == 0 {
        return Err(AmmError::ZeroAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::EmptyReserves);
    }
    check_fee(fee_numerator, fee_denominator)?;

    let effective_in = amount_in
        .checked_mul(fee_denominator - fee_numerator)
        .ok_or(AmmError::Overflow("get_amount_out"))?;
    let denominator = reserve_in
        .checked_mul(fee_denominator)
        .and_then(|scaled| scaled.checked_add(effective_in))
        .ok_or(AmmError::Overflow("get_amount_out"))?;

    mul_div(effective_in, reserve_out, denominator)
}

/// Required input for a desired output (inverse of [`get_amount_out`]).
///
/// The trailing `+1` rounds up: the caller can never under-pay because the
/// floor division dropped a fraction, so the pool is never shorted.
pub fn get_amount_in(
    amount_out: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_numerator: u64,
    fee_denominator: u64,
) -> Result<u64, AmmError> {
    if amount_out == 0 {
        return Err(AmmError::ZeroAmount);
    }
    if reserve_in == 0 || reserve_out == 0 {
        return Err(AmmError::EmptyReserves);
    }
    if amount_out >= reserve_out {
        // Cannot drain the entire output reserve.
        return Err(AmmError::InsufficientReserve {
            requested: amount_out,
            available: reserve_out,
        });
    }
    check_fee(fee_numerator, fee_denominator)?;

    let scaled_out = amount_out
        .checked_mul(fee_denominator)
        .ok_or(AmmError::Overflow("get_amount_in"))?;
    let denominator = (reserve_out - amount_out)
        .checked_mul(fee_denominator - fee_numerator)
        .ok_or(AmmError::Overflow("get_amount_in"))?;

    mul_div(scaled_out, reserve_in, denominator)?
        .checked_add(1)
        .ok_or(AmmError::Overflow("get_amount_in"))
}

/// Proportional conversion of `amount_a` at the pool's current ratio.
///
/// Used only to match a desired deposit ratio, never for trading (no fee).
pub fn quote(amount_a: u64, reserve_a: u64, reserve_b: u64) -> Result<u64, AmmError> {
    if amount_a == 0 {
        return Err(AmmError::ZeroAmount);
    }
    if reserve_a == 0 || reserve_b == 0 {
        return Err(AmmError::EmptyReserves);
    }
    mul_div(amount_a, reserve_b, reserve_a)
}

/// Slippage of a hypothetical trade in basis points: how far the realized
/// rate falls below the pool's spot rate for `amount_in`. Sizing aid for
/// callers choosing their slippage bounds.
pub fn slippage_bps(
    amount_in: u64,
    reserve_in: u64,
    reserve_out: u64,
    fee_numerator: u64,
    fee_denominator: u64,
) -> Result<u64, AmmError> {
    let actual = get_amount_out(
        amount_in,
        reserve_in,
        reserve_out,
        fee_numerator,
        fee_denominator,
    )?;
    let ideal = mul_div(amount_in, reserve_out, reserve_in)?;
    if ideal == 0 {
        return Ok(0);
    }
    mul_div(ideal - actual, 10_000, ideal)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FEE_NUM: u64 = 30;
    const FEE_DEN: u64 = 10_000;

    #[test]
    fn test_amount_out_reference_values() {
        // 1000 in against (10000, 20000) at 0.30%:
        // eff = 1000 * 9970; out = eff * 20000 / (10000 * 10000 + eff) = 1813
        assert_eq!(
            get_amount_out(1_000, 10_000, 20_000, FEE_NUM, FEE_DEN).unwrap(),
            1_813
        );
        // 100 in against (1000, 2000) at 0.30% ≈ 181.
        assert_eq!(get_amount_out(100, 1_000, 2_000, FEE_NUM, FEE_DEN).unwrap(), 181);
    }

    #[test]
    fn test_amount_out_rejects_bad_parameters() {
        assert_eq!(
            get_amount_out(0, 10, 10, FEE_NUM, FEE_DEN).unwrap_err(),
            AmmError::ZeroAmount
        );
        assert_eq!(
            get_amount_out(1, 0, 10, FEE_NUM, FEE_DEN).unwrap_err(),
            AmmError::EmptyReserves
        );
        assert_eq!(
            get_amount_out(1, 10, 10, 0, FEE_DEN).unwrap_err(),
            AmmError::FeeOutOfRange {
                numerator: 0,
                denominator: FEE_DEN
            }
        );
        assert_eq!(
            get_amount_out(1, 10, 10, FEE_DEN, FEE_DEN).unwrap_err(),
            AmmError::FeeOutOfRange {
                numerator: FEE_DEN,
                denominator: FEE_DEN
            }
        );
    }

    #[test]
    fn test_amount_in_inverts_with_ceiling_bias() {
        let out = get_amount_out(1_000, 10_000, 20_000, FEE_NUM, FEE_DEN).unwrap();
        let back = get_amount_in(out, 10_000, 20_000, FEE_NUM, FEE_DEN).unwrap();
        // The +1 ceiling bias never lets a round trip under-charge.
        assert!(back >= 1_000);
        // And it stays close: the bias is a rounding correction, not a levy.
        assert!(back <= 1_002);
    }

    #[test]
    fn test_amount_in_cannot_drain_reserve() {
        assert_eq!(
            get_amount_in(20_000, 10_000, 20_000, FEE_NUM, FEE_DEN).unwrap_err(),
            AmmError::InsufficientReserve {
                requested: 20_000,
                available: 20_000
            }
        );
        assert!(get_amount_in(19_999, 10_000, 20_000, FEE_NUM, FEE_DEN).is_ok());
    }

    #[test]
    fn test_quote_is_proportional() {
        assert_eq!(quote(500, 10_000, 20_000).unwrap(), 1_000);
        assert_eq!(quote(333, 1_000, 1_000).unwrap(), 333);
        assert_eq!(quote(0, 10, 10).unwrap_err(), AmmError::ZeroAmount);
        assert_eq!(quote(5, 0, 10).unwrap_err(), AmmError::EmptyReserves);
    }

    #[test]
    fn test_output_strictly_increasing_in_input() {
        let mut prev = 0;
        for amount_in in [100u64, 500, 1_000, 5_000, 10_000] {
            let out = get_amount_out(amount_in, 100_000, 200_000, FEE_NUM, FEE_DEN).unwrap();
            assert!(out > prev);
            prev = out;
        }
    }

    #[test]
    fn test_slippage_grows_with_trade_size() {
        let small = slippage_bps(10_000, 1_000_000, 1_000_000, FEE_NUM, FEE_DEN).unwrap();
        let large = slippage_bps(100_000, 1_000_000, 1_000_000, FEE_NUM, FEE_DEN).unwrap();
        assert!(large > small);
        // A 1%-of-reserves trade pays the 30 bps fee plus ~100 bps of curve.
        assert!(small >= 30);
        assert!(small < 150);
    }
}
