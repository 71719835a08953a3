//! Canonical asset-pair identity.

use crate::{asset::AssetId, ValueError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The canonical (ordered) identity of a trading pair.
///
/// Construction always normalizes: the lesser asset id (byte order over the
/// canonical name, see [`AssetId`]) becomes side A and the greater becomes
/// side B, so `(WETH, USDC)` and `(USDC, WETH)` produce an identical tag.
/// This ordering is the single source of truth for which pool backs a pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairTag {
    lesser: AssetId,
    greater: AssetId,
}

impl PairTag {
    /// Builds the canonical tag for `(a, b)` in either order.
    pub fn new(a: AssetId, b: AssetId) -> Result<Self, ValueError> {
        Ok(Self::with_orientation(a, b)?.0)
    }

    /// Like [`PairTag::new`], additionally reporting whether the arguments
    /// arrived in reverse of canonical order. Boundary code uses the flag to
    /// dispatch with its A/B parameters swapped.
    pub fn with_orientation(a: AssetId, b: AssetId) -> Result<(Self, bool), ValueError> {
        if a == b {
            return Err(ValueError::IdenticalAssets(a.to_string()));
        }
        if a < b {
            Ok((Self { lesser: a, greater: b }, false))
        } else {
            Ok((Self { lesser: b, greater: a }, true))
        }
    }

    /// Side A: the lesser asset id in canonical order.
    pub fn lesser(&self) -> &AssetId {
        &self.lesser
    }

    /// Side B: the greater asset id in canonical order.
    pub fn greater(&self) -> &AssetId {
        &self.greater
    }

    pub fn contains(&self, id: &AssetId) -> bool {
        &self.lesser == id || &self.greater == id
    }

    /// The counterparty asset for `id`, if `id` is one of the pair's sides.
    pub fn other_side(&self, id: &AssetId) -> Option<&AssetId> {
        if id == &self.lesser {
            Some(&self.greater)
        } else if id == &self.greater {
            Some(&self.lesser)
        } else {
            None
        }
    }

    /// The registry lookup key: `"LP-" + lesser + "-" + greater`.
    ///
    /// Asset names are globally unique, so the key is collision-free across
    /// distinct pairs.
    pub fn registry_key(&self) -> String {
        format!("LP-{}-{}", self.lesser, self.greater)
    }
}

impl fmt::Display for PairTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.lesser, self.greater)
    }
}
