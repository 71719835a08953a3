//! Pool record and reserve accounting.
//!
//! A [`Pool`] holds one trading pair's economic state: two reserves, the
//! outstanding liquidity-share supply, the permanently locked
//! minimum-liquidity units, and the fee configuration. Sides A and B always
//! refer to the pair's canonical order (see `types::PairTag`); boundary code
//! is responsible for presenting swapped parameters when the caller's
//! orientation differs.
//!
//! State machine: **Unfunded** (all counters zero) → **Funded** (supply > 0),
//! one-way. Draining a funded pool down to the locked minimum never returns
//! it to Unfunded.
//!
//! Every mutating operation validates completely before writing anything:
//! on error the record is byte-for-byte unchanged.

use crate::error::AmmError;
use crate::math::{mul_div, sqrt, widening_mul};
use crate::pricing;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Liquidity units locked forever on first funding. Keeps the share price
/// away from degenerate values when a pool is later almost fully drained.
pub const MINIMUM_LIQUIDITY: u64 = 1_000;

/// Per-reserve ceiling. Keeps every future `reserve * fee_denominator`
/// product comfortably inside the 128-bit accumulator.
pub const MAX_RESERVE: u64 = u64::MAX / 10_000;

/// One trading pair's economic state. Exactly these fields persist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pool {
    reserve_a: u64,
    reserve_b: u64,
    liquidity_supply: u64,
    locked_minimum_liquidity: u64,
    fee_numerator: u64,
    fee_denominator: u64,
    owning_registry_id: u64,
}

/// Amounts actually consumed and units minted by a deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositReport {
    pub consumed_a: u64,
    pub consumed_b: u64,
    pub minted: u64,
}

impl Pool {
    /// A new pool in the Unfunded state. Fee is unset (zero) until
    /// [`Pool::set_fee`] configures it.
    pub fn new(owning_registry_id: u64) -> Self {
        Self {
            reserve_a: 0,
            reserve_b: 0,
            liquidity_supply: 0,
            locked_minimum_liquidity: 0,
            fee_numerator: 0,
            fee_denominator: 1,
            owning_registry_id,
        }
    }

    /// Snapshot of `(reserve_a, reserve_b)`.
    pub fn reserves(&self) -> (u64, u64) {
        (self.reserve_a, self.reserve_b)
    }

    pub fn liquidity_supply(&self) -> u64 {
        self.liquidity_supply
    }

    pub fn locked_minimum_liquidity(&self) -> u64 {
        self.locked_minimum_liquidity
    }

    /// `(fee_numerator, fee_denominator)`.
    pub fn fee(&self) -> (u64, u64) {
        (self.fee_numerator, self.fee_denominator)
    }

    pub fn owning_registry_id(&self) -> u64 {
        self.owning_registry_id
    }

    pub fn is_funded(&self) -> bool {
        self.liquidity_supply > 0
    }

    /// Overwrites the fee configuration. May be called in any state;
    /// authorization is the caller's concern.
    pub fn set_fee(&mut self, fee_numerator: u64, fee_denominator: u64) -> Result<(), AmmError> {
        if fee_numerator == 0 || fee_denominator <= fee_numerator {
            return Err(AmmError::FeeOutOfRange {
                numerator: fee_numerator,
                denominator: fee_denominator,
            });
        }
        self.fee_numerator = fee_numerator;
        self.fee_denominator = fee_denominator;
        Ok(())
    }

    /// The deposit pair the pool will actually consume for a desired
    /// `(deposit_a, deposit_b)`.
    ///
    /// Unfunded: exactly the desired amounts (first deposit sets the price).
    /// Funded: the side that fits the pool's current ratio limits the other,
    /// so the caller's posted ratio can never move the price; the excess on
    /// the non-limiting side stays with the caller.
    pub fn optimal_deposit(
        &self,
        deposit_a: u64,
        min_a: u64,
        deposit_b: u64,
        min_b: u64,
    ) -> Result<(u64, u64), AmmError> {
        if deposit_a == 0 || deposit_b == 0 {
            return Err(AmmError::ZeroAmount);
        }
        // A minimum above the posted deposit can never be met.
        if deposit_a < min_a {
            return Err(AmmError::DepositBelowMinimum {
                implied: deposit_a,
                minimum: min_a,
            });
        }
        if deposit_b < min_b {
            return Err(AmmError::DepositBelowMinimum {
                implied: deposit_b,
                minimum: min_b,
            });
        }
        if !self.is_funded() {
            return Ok((deposit_a, deposit_b));
        }

        let implied_b = pricing::quote(deposit_a, self.reserve_a, self.reserve_b)?;
        if implied_b <= deposit_b {
            if implied_b < min_b {
                return Err(AmmError::DepositBelowMinimum {
                    implied: implied_b,
                    minimum: min_b,
                });
            }
            Ok((deposit_a, implied_b))
        } else {
            let implied_a = pricing::quote(deposit_b, self.reserve_b, self.reserve_a)?;
            if implied_a > deposit_a {
                // Rounding can only shrink the implied amount; anything else
                // means the quote itself is inconsistent.
                return Err(AmmError::DepositBelowMinimum {
                    implied: implied_a,
                    minimum: deposit_a,
                });
            }
            if implied_a < min_a {
                return Err(AmmError::DepositBelowMinimum {
                    implied: implied_a,
                    minimum: min_a,
                });
            }
            Ok((implied_a, deposit_b))
        }
    }

    /// Deposits into the pool, minting liquidity units.
    ///
    /// Bootstrap (Unfunded): mints `sqrt(a*b)` units, locks
    /// [`MINIMUM_LIQUIDITY`] of them permanently, credits the remainder to
    /// the caller. Steady state: mints the stricter of the two proportional
    /// shares, floored.
    pub fn add_liquidity(
        &mut self,
        deposit_a: u64,
        min_a: u64,
        deposit_b: u64,
        min_b: u64,
    ) -> Result<DepositReport, AmmError> {
        let (optimal_a, optimal_b) = self.optimal_deposit(deposit_a, min_a, deposit_b, min_b)?;

        let bootstrap = !self.is_funded();
        let (minted, new_supply, locked) = if bootstrap {
            let initial = sqrt(widening_mul(optimal_a, optimal_b));
            if initial <= MINIMUM_LIQUIDITY {
                return Err(AmmError::BelowMinimumLiquidity {
                    initial,
                    floor: MINIMUM_LIQUIDITY,
                });
            }
            (initial - MINIMUM_LIQUIDITY, initial, MINIMUM_LIQUIDITY)
        } else {
            let share_a = mul_div(self.liquidity_supply, optimal_a, self.reserve_a)?;
            let share_b = mul_div(self.liquidity_supply, optimal_b, self.reserve_b)?;
            let minted = share_a.min(share_b);
            if minted == 0 {
                return Err(AmmError::NothingMinted);
            }
            let new_supply = self
                .liquidity_supply
                .checked_add(minted)
                .ok_or(AmmError::Overflow("add_liquidity"))?;
            (minted, new_supply, self.locked_minimum_liquidity)
        };

        let new_reserve_a = self.checked_join(self.reserve_a, optimal_a)?;
        let new_reserve_b = self.checked_join(self.reserve_b, optimal_b)?;

        // All validation done; commit.
        self.reserve_a = new_reserve_a;
        self.reserve_b = new_reserve_b;
        self.liquidity_supply = new_supply;
        self.locked_minimum_liquidity = locked;

        if bootstrap {
            info!(
                reserve_a = new_reserve_a,
                reserve_b = new_reserve_b,
                minted,
                locked,
                "pool funded"
            );
        } else {
            debug!(consumed_a = optimal_a, consumed_b = optimal_b, minted, "liquidity added");
        }

        Ok(DepositReport {
            consumed_a: optimal_a,
            consumed_b: optimal_b,
            minted,
        })
    }

    /// Burns `units` liquidity and splits out the proportional reserves.
    ///
    /// Both outputs floor, so a small residual attributable to the burned
    /// share may remain with the pool.
    pub fn remove_liquidity(&mut self, units: u64) -> Result<(u64, u64), AmmError> {
        if units == 0 {
            return Err(AmmError::ZeroAmount);
        }
        let redeemable = self.liquidity_supply - self.locked_minimum_liquidity;
        if units > redeemable {
            return Err(AmmError::InsufficientLiquidity {
                requested: units,
                redeemable,
            });
        }
        let out_a = mul_div(self.reserve_a, units, self.liquidity_supply)?;
        let out_b = mul_div(self.reserve_b, units, self.liquidity_supply)?;

        self.reserve_a -= out_a;
        self.reserve_b -= out_b;
        self.liquidity_supply -= units;

        debug!(burned = units, out_a, out_b, "liquidity removed");
        Ok((out_a, out_b))
    }

    /// Low-level swap settlement: joins the offered inputs into reserves and
    /// splits out the requested outputs.
    ///
    /// Does NOT verify the constant-product invariant — the checked
    /// exact-in/exact-out paths price the trade first with the formulas in
    /// [`crate::pricing`]. Crate-private so no external caller can settle a
    /// mis-priced trade.
    pub(crate) fn settle_swap(
        &mut self,
        amount_a_in: u64,
        amount_a_out: u64,
        amount_b_in: u64,
        amount_b_out: u64,
    ) -> Result<(), AmmError> {
        if amount_a_in == 0 && amount_b_in == 0 {
            return Err(AmmError::ZeroAmount);
        }
        if amount_a_out == 0 && amount_b_out == 0 {
            return Err(AmmError::ZeroAmount);
        }

        let new_reserve_a = self.settled_side(self.reserve_a, amount_a_in, amount_a_out)?;
        let new_reserve_b = self.settled_side(self.reserve_b, amount_b_in, amount_b_out)?;

        self.reserve_a = new_reserve_a;
        self.reserve_b = new_reserve_b;
        Ok(())
    }

    /// Prices and settles an exact-input swap. `a_to_b` gives the direction
    /// in canonical orientation. Returns the output amount.
    pub fn swap_exact_in(
        &mut self,
        amount_in: u64,
        min_amount_out: u64,
        a_to_b: bool,
    ) -> Result<u64, AmmError> {
        let (reserve_in, reserve_out) = self.oriented_reserves(a_to_b);
        let amount_out = pricing::get_amount_out(
            amount_in,
            reserve_in,
            reserve_out,
            self.fee_numerator,
            self.fee_denominator,
        )?;
        if amount_out < min_amount_out {
            return Err(AmmError::OutputBelowMinimum {
                computed: amount_out,
                minimum: min_amount_out,
            });
        }
        if a_to_b {
            self.settle_swap(amount_in, 0, 0, amount_out)?;
        } else {
            self.settle_swap(0, amount_out, amount_in, 0)?;
        }
        Ok(amount_out)
    }

    /// Prices and settles an exact-output swap. Returns the input actually
    /// consumed; the caller keeps `max_amount_in - consumed`.
    pub fn swap_exact_out(
        &mut self,
        amount_out: u64,
        max_amount_in: u64,
        a_to_b: bool,
    ) -> Result<u64, AmmError> {
        let (reserve_in, reserve_out) = self.oriented_reserves(a_to_b);
        let amount_in = pricing::get_amount_in(
            amount_out,
            reserve_in,
            reserve_out,
            self.fee_numerator,
            self.fee_denominator,
        )?;
        if amount_in > max_amount_in {
            return Err(AmmError::InputAboveMaximum {
                required: amount_in,
                maximum: max_amount_in,
            });
        }
        if a_to_b {
            self.settle_swap(amount_in, 0, 0, amount_out)?;
        } else {
            self.settle_swap(0, amount_out, amount_in, 0)?;
        }
        Ok(amount_in)
    }

    fn oriented_reserves(&self, a_to_b: bool) -> (u64, u64) {
        if a_to_b {
            (self.reserve_a, self.reserve_b)
        } else {
            (self.reserve_b, self.reserve_a)
        }
    }

    fn checked_join(&self, reserve: u64, amount: u64) -> Result<u64, AmmError> {
        let joined = reserve
            .checked_add(amount)
            .ok_or(AmmError::Overflow("reserve join"))?;
        if joined > MAX_RESERVE {
            return Err(AmmError::PoolFull {
                resulting: joined,
                ceiling: MAX_RESERVE,
            });
        }
        Ok(joined)
    }

    fn settled_side(&self, reserve: u64, joined: u64, split: u64) -> Result<u64, AmmError> {
        let after_join = self.checked_join(reserve, joined)?;
        if split >= after_join {
            // A funded pool's reserves must stay positive.
            return Err(AmmError::InsufficientReserve {
                requested: split,
                available: after_join,
            });
        }
        Ok(after_join - split)
    }
}
