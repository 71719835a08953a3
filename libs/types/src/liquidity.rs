//! Linear liquidity-share value object.

use crate::{pair::PairTag, ValueError};

/// An owned claim of liquidity-share units against one pool.
///
/// Like [`crate::Asset`], a `LiquidityToken` is linear: not `Clone`, not
/// `Copy`. The pool itself only tracks a supply counter; these tokens are the
/// circulating claims minted on deposit and burned on withdrawal.
#[derive(Debug, PartialEq, Eq)]
pub struct LiquidityToken {
    pair: PairTag,
    units: u64,
}

impl LiquidityToken {
    pub fn new(pair: PairTag, units: u64) -> Self {
        Self { pair, units }
    }

    pub fn pair(&self) -> &PairTag {
        &self.pair
    }

    pub fn units(&self) -> u64 {
        self.units
    }

    /// Splits off `units`, returning `(taken, remainder)`.
    pub fn split(self, units: u64) -> Result<(LiquidityToken, LiquidityToken), ValueError> {
        if units > self.units {
            return Err(ValueError::SplitExceedsValue {
                requested: units,
                held: self.units,
            });
        }
        let remainder = self.units - units;
        Ok((
            LiquidityToken::new(self.pair.clone(), units),
            LiquidityToken::new(self.pair, remainder),
        ))
    }

    /// Absorbs `other`. Both tokens must claim against the same pool.
    pub fn merge(&mut self, other: LiquidityToken) -> Result<(), ValueError> {
        if other.pair != self.pair {
            return Err(ValueError::PairMismatch {
                expected: self.pair.to_string(),
                actual: other.pair.to_string(),
            });
        }
        self.units = self
            .units
            .checked_add(other.units)
            .ok_or(ValueError::ValueOverflow(self.units, other.units))?;
        Ok(())
    }

    /// Consumes the token, surrendering its parts.
    pub fn into_parts(self) -> (PairTag, u64) {
        (self.pair, self.units)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::AssetId;

    fn pair() -> PairTag {
        PairTag::new(AssetId::new("USDC"), AssetId::new("WETH")).unwrap()
    }

    #[test]
    fn test_split_and_merge() {
        let token = LiquidityToken::new(pair(), 500);
        let (taken, mut rest) = token.split(200).unwrap();
        assert_eq!(taken.units(), 200);
        assert_eq!(rest.units(), 300);

        rest.merge(taken).unwrap();
        assert_eq!(rest.units(), 500);
    }

    #[test]
    fn test_merge_rejects_foreign_pool() {
        let other = PairTag::new(AssetId::new("DAI"), AssetId::new("WETH")).unwrap();
        let mut token = LiquidityToken::new(pair(), 10);
        assert!(matches!(
            token.merge(LiquidityToken::new(other, 10)),
            Err(ValueError::PairMismatch { .. })
        ));
    }
}
