//! Savings model for the litter additive.
//!
//! Turns the calculator inputs into yearly money saved, months of cat food
//! that money buys, and trees saved per year. Everything here is a pure
//! function of the inputs and the policy constants.

pub mod table;

use serde::{Deserialize, Serialize};

pub use table::{CostTable, LitterTier};

pub const MIN_CATS: u8 = 1;
pub const MAX_CATS: u8 = 5;
pub const MIN_CHANGES: u8 = 1;
pub const MAX_CHANGES: u8 = 10;

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SavingsError {
    /// A raw input was negative or not a finite number
    #[error("invalid {field}: {value} (must be a finite, non-negative number)")]
    InvalidInput { field: &'static str, value: f64 },

    /// The policy would divide by zero or otherwise leave the numeric domain
    #[error("domain error: {0}")]
    Domain(String),
}

/// User-adjustable calculator inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorInputs {
    pub cats_count: u8,
    pub is_premium_litter: bool,
    pub litter_changes_per_month: u8,
}

impl Default for CalculatorInputs {
    fn default() -> Self {
        Self {
            cats_count: 1,
            is_premium_litter: false,
            litter_changes_per_month: 4,
        }
    }
}

impl CalculatorInputs {
    /// Build inputs with both counts clamped to their slider ranges
    pub fn new(cats_count: u8, is_premium_litter: bool, litter_changes_per_month: u8) -> Self {
        Self {
            cats_count: cats_count.clamp(MIN_CATS, MAX_CATS),
            is_premium_litter,
            litter_changes_per_month: litter_changes_per_month.clamp(MIN_CHANGES, MAX_CHANGES),
        }
    }

    pub fn tier(&self) -> LitterTier {
        LitterTier::from_premium(self.is_premium_litter)
    }
}

/// Unvalidated inputs coming from outside the slider controls (command line)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawInputs {
    pub cats_count: f64,
    pub is_premium_litter: bool,
    pub litter_changes_per_month: f64,
}

impl TryFrom<RawInputs> for CalculatorInputs {
    type Error = SavingsError;

    fn try_from(raw: RawInputs) -> Result<Self, Self::Error> {
        let cats = checked_count("cats_count", raw.cats_count)?;
        let changes = checked_count("litter_changes_per_month", raw.litter_changes_per_month)?;
        Ok(CalculatorInputs::new(cats, raw.is_premium_litter, changes))
    }
}

/// Reject non-finite or negative values, then round to the nearest count.
/// Anything past `u8::MAX` saturates; the slider clamp brings it back in range.
fn checked_count(field: &'static str, value: f64) -> Result<u8, SavingsError> {
    if !value.is_finite() || value < 0.0 {
        return Err(SavingsError::InvalidInput { field, value });
    }
    Ok(value.round().min(f64::from(u8::MAX)) as u8)
}

/// Derived outputs, recomputed on every input change
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SavingsResult {
    pub money_saved: f64,
    pub cat_food_months: f64,
    pub trees_saved: f64,
}

/// Pricing and conversion constants.
///
/// These are marketing figures, not measured values. The defaults are the
/// ones shown on the site; a config file may replace them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsPolicy {
    pub additive_cost_per_month: f64,
    /// Fraction of litter changes the additive saves (0.5 = half as many)
    pub change_reduction: f64,
    pub cat_food_cost_per_month: f64,
    pub trees_per_change_reduced: f64,
    pub regular: CostTable,
    pub premium: CostTable,
}

impl Default for SavingsPolicy {
    fn default() -> Self {
        Self {
            additive_cost_per_month: 10.0,
            change_reduction: 0.5,
            cat_food_cost_per_month: 30.0,
            trees_per_change_reduced: 0.55,
            regular: CostTable::REGULAR,
            premium: CostTable::PREMIUM,
        }
    }
}

impl SavingsPolicy {
    pub fn table(&self, tier: LitterTier) -> &CostTable {
        match tier {
            LitterTier::Regular => &self.regular,
            LitterTier::Premium => &self.premium,
        }
    }

    /// Check every constant before the policy is used
    pub fn validate(&self) -> Result<(), SavingsError> {
        self.check_divisor()?;

        let amounts = [
            ("additive_cost_per_month", self.additive_cost_per_month),
            ("trees_per_change_reduced", self.trees_per_change_reduced),
        ];
        for (name, value) in amounts {
            if !value.is_finite() || value < 0.0 {
                return Err(SavingsError::Domain(format!(
                    "{} must be finite and non-negative, got {}",
                    name, value
                )));
            }
        }

        if !(0.0..=1.0).contains(&self.change_reduction) {
            return Err(SavingsError::Domain(format!(
                "change_reduction must be within 0..=1, got {}",
                self.change_reduction
            )));
        }

        if !self.regular.is_valid() || !self.premium.is_valid() {
            return Err(SavingsError::Domain(
                "cost tables must hold finite, non-negative amounts".to_string(),
            ));
        }

        Ok(())
    }

    fn check_divisor(&self) -> Result<(), SavingsError> {
        let divisor = self.cat_food_cost_per_month;
        if divisor == 0.0 || !divisor.is_finite() {
            return Err(SavingsError::Domain(format!(
                "cat_food_cost_per_month must be finite and non-zero, got {}",
                divisor
            )));
        }
        Ok(())
    }

    /// Compute savings, failing instead of dividing by a zero cat-food cost
    pub fn compute(&self, inputs: &CalculatorInputs) -> Result<SavingsResult, SavingsError> {
        self.check_divisor()?;
        Ok(self.evaluate(inputs))
    }

    // Caller guarantees a usable divisor
    fn evaluate(&self, inputs: &CalculatorInputs) -> SavingsResult {
        let monthly_litter_cost = self.table(inputs.tier()).cost_for(inputs.cats_count);

        let monthly_cost_without = monthly_litter_cost;
        let monthly_cost_with =
            monthly_litter_cost * (1.0 - self.change_reduction) + self.additive_cost_per_month;

        let yearly_savings = (monthly_cost_without - monthly_cost_with) * MONTHS_PER_YEAR;
        let cat_food_months = yearly_savings / self.cat_food_cost_per_month;

        let annual_change_reduction =
            f64::from(inputs.litter_changes_per_month) * self.change_reduction * MONTHS_PER_YEAR;
        let trees_saved = annual_change_reduction * self.trees_per_change_reduced;

        SavingsResult {
            money_saved: yearly_savings.max(0.0),
            cat_food_months: cat_food_months.max(0.0),
            trees_saved: trees_saved.max(0.0),
        }
    }
}

/// Savings under the default policy
pub fn compute_savings(inputs: &CalculatorInputs) -> SavingsResult {
    // The default divisor is a non-zero constant
    SavingsPolicy::default().evaluate(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_regular_single_cat() {
        let result = compute_savings(&CalculatorInputs::new(1, false, 4));
        assert!(approx(result.money_saved, 0.0));
        assert!(approx(result.cat_food_months, 0.0));
        assert!(approx(result.trees_saved, 13.2), "got {}", result.trees_saved);
    }

    #[test]
    fn test_premium_two_cats() {
        let result = compute_savings(&CalculatorInputs::new(2, true, 6));
        assert!(approx(result.money_saved, 300.0));
        assert!(approx(result.cat_food_months, 10.0));
        assert!(approx(result.trees_saved, 19.8), "got {}", result.trees_saved);
    }

    #[test]
    fn test_defaults() {
        let inputs = CalculatorInputs::default();
        assert_eq!(inputs.cats_count, 1);
        assert!(!inputs.is_premium_litter);
        assert_eq!(inputs.litter_changes_per_month, 4);
    }

    #[test]
    fn test_cat_count_clamps() {
        let over = CalculatorInputs {
            cats_count: 7,
            is_premium_litter: true,
            litter_changes_per_month: 5,
        };
        let capped = CalculatorInputs { cats_count: 5, ..over };
        assert_eq!(compute_savings(&over), compute_savings(&capped));

        let zero = CalculatorInputs { cats_count: 0, ..over };
        let one = CalculatorInputs { cats_count: 1, ..over };
        assert_eq!(compute_savings(&zero), compute_savings(&one));
    }

    #[test]
    fn test_negative_savings_clamp_to_zero() {
        // One cat on regular litter with a pricier additive loses money
        let policy = SavingsPolicy {
            additive_cost_per_month: 50.0,
            ..SavingsPolicy::default()
        };
        let result = policy.compute(&CalculatorInputs::default()).unwrap();
        assert_eq!(result.money_saved, 0.0);
        assert_eq!(result.cat_food_months, 0.0);
    }

    #[test]
    fn test_zero_divisor_is_domain_error() {
        let policy = SavingsPolicy {
            cat_food_cost_per_month: 0.0,
            ..SavingsPolicy::default()
        };
        let err = policy.compute(&CalculatorInputs::default()).unwrap_err();
        assert!(matches!(err, SavingsError::Domain(_)));
        assert!(policy.validate().is_err());
    }

    #[test]
    fn test_policy_validation() {
        assert!(SavingsPolicy::default().validate().is_ok());

        let bad_reduction = SavingsPolicy {
            change_reduction: 1.5,
            ..SavingsPolicy::default()
        };
        assert!(matches!(bad_reduction.validate(), Err(SavingsError::Domain(_))));

        let bad_table = SavingsPolicy {
            premium: CostTable::new([40.0, 70.0, -3.0, 130.0, 160.0]),
            ..SavingsPolicy::default()
        };
        assert!(bad_table.validate().is_err());

        let bad_additive = SavingsPolicy {
            additive_cost_per_month: f64::INFINITY,
            ..SavingsPolicy::default()
        };
        assert!(bad_additive.validate().is_err());
    }

    #[test]
    fn test_raw_inputs_rejects_bad_numbers() {
        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY, -1.0] {
            let raw = RawInputs {
                cats_count: bad,
                is_premium_litter: false,
                litter_changes_per_month: 4.0,
            };
            let err = CalculatorInputs::try_from(raw).unwrap_err();
            assert!(
                matches!(err, SavingsError::InvalidInput { field: "cats_count", .. }),
                "{:?}",
                err
            );
        }

        let raw = RawInputs {
            cats_count: 2.0,
            is_premium_litter: false,
            litter_changes_per_month: -0.5,
        };
        assert!(matches!(
            CalculatorInputs::try_from(raw),
            Err(SavingsError::InvalidInput { field: "litter_changes_per_month", .. })
        ));
    }

    #[test]
    fn test_raw_inputs_round_and_clamp() {
        let raw = RawInputs {
            cats_count: 2.6,
            is_premium_litter: true,
            litter_changes_per_month: 40.0,
        };
        let inputs = CalculatorInputs::try_from(raw).unwrap();
        assert_eq!(inputs, CalculatorInputs::new(3, true, 10));

        let raw = RawInputs {
            cats_count: 9.0,
            is_premium_litter: false,
            litter_changes_per_month: 0.0,
        };
        let inputs = CalculatorInputs::try_from(raw).unwrap();
        assert_eq!(inputs.cats_count, MAX_CATS);
        assert_eq!(inputs.litter_changes_per_month, MIN_CHANGES);

        let raw = RawInputs {
            cats_count: 1e12,
            is_premium_litter: false,
            litter_changes_per_month: 3.0,
        };
        assert_eq!(CalculatorInputs::try_from(raw).unwrap().cats_count, MAX_CATS);
    }

    fn any_inputs() -> impl Strategy<Value = CalculatorInputs> {
        (MIN_CATS..=MAX_CATS, any::<bool>(), MIN_CHANGES..=MAX_CHANGES)
            .prop_map(|(cats, premium, changes)| CalculatorInputs::new(cats, premium, changes))
    }

    proptest! {
        #[test]
        fn outputs_are_finite_and_non_negative(inputs in any_inputs()) {
            let result = compute_savings(&inputs);
            for value in [result.money_saved, result.cat_food_months, result.trees_saved] {
                prop_assert!(value.is_finite());
                prop_assert!(value >= 0.0);
            }
        }

        #[test]
        fn same_inputs_give_bit_identical_outputs(inputs in any_inputs()) {
            let a = compute_savings(&inputs);
            let b = compute_savings(&inputs);
            prop_assert_eq!(a.money_saved.to_bits(), b.money_saved.to_bits());
            prop_assert_eq!(a.cat_food_months.to_bits(), b.cat_food_months.to_bits());
            prop_assert_eq!(a.trees_saved.to_bits(), b.trees_saved.to_bits());
        }

        #[test]
        fn more_changes_never_save_fewer_trees(
            inputs in any_inputs(),
            extra in 0u8..=(MAX_CHANGES - MIN_CHANGES),
        ) {
            let more = CalculatorInputs::new(
                inputs.cats_count,
                inputs.is_premium_litter,
                inputs.litter_changes_per_month.saturating_add(extra),
            );
            prop_assert!(compute_savings(&more).trees_saved >= compute_savings(&inputs).trees_saved);
        }

        #[test]
        fn cat_counts_past_table_match_last_entry(cats in MAX_CATS..=u8::MAX, premium in any::<bool>()) {
            let over = CalculatorInputs { cats_count: cats, is_premium_litter: premium, litter_changes_per_month: 4 };
            let capped = CalculatorInputs { cats_count: MAX_CATS, ..over };
            prop_assert_eq!(compute_savings(&over), compute_savings(&capped));
        }
    }
}
