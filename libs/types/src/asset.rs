//! Asset identity and the linear asset value object.

use crate::ValueError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identifier of an asset type.
///
/// The wrapped name is assumed globally unique per asset type. The derived
/// `Ord` (byte comparison over the name) is the total order used to
/// canonicalize trading pairs — see [`crate::PairTag`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The canonical textual name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An owned quantity of one asset.
///
/// Deliberately neither `Clone` nor `Copy`: an `Asset` models a transferable
/// value, so duplication would mint money. APIs that take an `Asset` must
/// account for all of it in their return values — consumed into a pool,
/// returned as change, or both.
#[derive(Debug, PartialEq, Eq)]
pub struct Asset {
    id: AssetId,
    amount: u64,
}

impl Asset {
    pub fn new(id: AssetId, amount: u64) -> Self {
        Self { id, amount }
    }

    /// An empty value of the given asset, used as change when nothing is
    /// returned on a path that must still account for the asset.
    pub fn zero(id: AssetId) -> Self {
        Self { id, amount: 0 }
    }

    pub fn id(&self) -> &AssetId {
        &self.id
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Splits off `amount`, returning `(taken, remainder)`.
    pub fn split(self, amount: u64) -> Result<(Asset, Asset), ValueError> {
        if amount > self.amount {
            return Err(ValueError::SplitExceedsValue {
                requested: amount,
                held: self.amount,
            });
        }
        let remainder = self.amount - amount;
        Ok((
            Asset::new(self.id.clone(), amount),
            Asset::new(self.id, remainder),
        ))
    }

    /// Absorbs `other` into `self`. Both values must be the same asset.
    pub fn merge(&mut self, other: Asset) -> Result<(), ValueError> {
        if other.id != self.id {
            return Err(ValueError::AssetMismatch {
                expected: self.id.to_string(),
                actual: other.id.to_string(),
            });
        }
        self.amount = self
            .amount
            .checked_add(other.amount)
            .ok_or(ValueError::ValueOverflow(self.amount, other.amount))?;
        Ok(())
    }

    /// Consumes the value, surrendering its parts.
    pub fn into_parts(self) -> (AssetId, u64) {
        (self.id, self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_and_merge_conserve_value() {
        let usdc = AssetId::new("USDC");
        let coin = Asset::new(usdc.clone(), 1_000);

        let (taken, mut rest) = coin.split(300).unwrap();
        assert_eq!(taken.amount(), 300);
        assert_eq!(rest.amount(), 700);

        rest.merge(taken).unwrap();
        assert_eq!(rest.amount(), 1_000);
        assert_eq!(rest.id(), &usdc);
    }

    #[test]
    fn test_split_exceeding_value_fails() {
        let coin = Asset::new(AssetId::new("WETH"), 10);
        let err = coin.split(11).unwrap_err();
        assert_eq!(
            err,
            ValueError::SplitExceedsValue {
                requested: 11,
                held: 10
            }
        );
    }

    #[test]
    fn test_merge_rejects_foreign_asset() {
        let mut usdc = Asset::new(AssetId::new("USDC"), 5);
        let weth = Asset::new(AssetId::new("WETH"), 5);
        assert!(matches!(
            usdc.merge(weth),
            Err(ValueError::AssetMismatch { .. })
        ));
        // Failed merge must not change the receiver.
        assert_eq!(usdc.amount(), 5);
    }

    #[test]
    fn test_merge_overflow() {
        let mut a = Asset::new(AssetId::new("USDC"), u64::MAX);
        let b = Asset::new(AssetId::new("USDC"), 1);
        assert!(matches!(a.merge(b), Err(ValueError::ValueOverflow(..))));
    }

    #[test]
    fn test_asset_id_ordering_is_byte_order() {
        assert!(AssetId::new("BTC") < AssetId::new("ETH"));
        assert!(AssetId::new("USDC") < AssetId::new("USDT"));
        // ASCII order: uppercase sorts before lowercase.
        assert!(AssetId::new("Z") < AssetId::new("a"));
    }
}
