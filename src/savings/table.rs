use serde::{Deserialize, Serialize};

use super::{MAX_CATS, MIN_CATS};

/// Number of cat-count slots in a cost table (1 through 5 cats)
pub const CAT_SLOTS: usize = (MAX_CATS - MIN_CATS + 1) as usize;

/// Litter tier the baseline cost is looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LitterTier {
    Regular,
    Premium,
}

impl LitterTier {
    pub fn from_premium(is_premium: bool) -> Self {
        if is_premium {
            LitterTier::Premium
        } else {
            LitterTier::Regular
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LitterTier::Regular => "Regular",
            LitterTier::Premium => "Premium",
        }
    }
}

/// Monthly litter cost keyed by cat count.
///
/// The domain is `MIN_CATS..=MAX_CATS`. Lookups outside it clamp to the
/// nearest end of the table instead of failing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostTable {
    costs: [f64; CAT_SLOTS],
}

impl CostTable {
    pub const REGULAR: CostTable = CostTable::new([20.0, 35.0, 50.0, 65.0, 80.0]);
    pub const PREMIUM: CostTable = CostTable::new([40.0, 70.0, 100.0, 130.0, 160.0]);

    pub const fn new(costs: [f64; CAT_SLOTS]) -> Self {
        Self { costs }
    }

    /// Baseline monthly cost for `cats` cats
    pub fn cost_for(&self, cats: u8) -> f64 {
        let slot = cats.clamp(MIN_CATS, MAX_CATS) - MIN_CATS;
        self.costs[slot as usize]
    }

    /// Every entry must be a finite, non-negative amount
    pub fn is_valid(&self) -> bool {
        self.costs.iter().all(|c| c.is_finite() && *c >= 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_in_domain() {
        assert_eq!(CostTable::REGULAR.cost_for(1), 20.0);
        assert_eq!(CostTable::PREMIUM.cost_for(2), 70.0);
        assert_eq!(CostTable::REGULAR.cost_for(5), 80.0);
    }

    #[test]
    fn test_lookup_clamps_out_of_range() {
        assert_eq!(CostTable::REGULAR.cost_for(7), CostTable::REGULAR.cost_for(5));
        assert_eq!(CostTable::PREMIUM.cost_for(u8::MAX), 160.0);
        assert_eq!(CostTable::REGULAR.cost_for(0), CostTable::REGULAR.cost_for(1));
    }

    #[test]
    fn test_premium_never_cheaper_than_regular() {
        for cats in MIN_CATS..=MAX_CATS {
            assert!(
                CostTable::PREMIUM.cost_for(cats) >= CostTable::REGULAR.cost_for(cats),
                "premium baseline below regular for {} cats",
                cats
            );
        }
    }

    #[test]
    fn test_validity() {
        assert!(CostTable::REGULAR.is_valid());
        assert!(!CostTable::new([20.0, -1.0, 50.0, 65.0, 80.0]).is_valid());
        assert!(!CostTable::new([20.0, 35.0, f64::NAN, 65.0, 80.0]).is_valid());
    }

    #[test]
    fn test_tier_from_flag() {
        assert_eq!(LitterTier::from_premium(true), LitterTier::Premium);
        assert_eq!(LitterTier::from_premium(false), LitterTier::Regular);
    }
}
