//! Market rate observations feeding curve calibration.
//!
//! Calibration consumes a set of zero rate quotes at liquid maturities.
//! [`ObservationSet`] validates and sorts the quotes once at construction,
//! so downstream code can rely on strictly increasing positive maturities.

use serde::{Deserialize, Serialize};

use crate::compounding::Compounding;
use crate::error::{CurveError, CurveResult};

/// A single zero rate quote: maturity in years and the observed rate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateObservation {
    /// Maturity in years.
    pub maturity: f64,
    /// Observed zero rate as a decimal (0.0315 for 3.15%).
    pub rate: f64,
}

impl RateObservation {
    /// Creates a new rate observation.
    #[must_use]
    pub fn new(maturity: f64, rate: f64) -> Self {
        Self { maturity, rate }
    }
}

/// A validated, maturity-sorted set of rate observations.
///
/// # Invariants
///
/// - At least one observation
/// - All maturities finite and strictly positive
/// - All rates finite and above -100%
/// - Maturities strictly increasing (duplicates rejected)
///
/// # Example
///
/// ```rust
/// use rfr_curves::ObservationSet;
///
/// let set = ObservationSet::from_pairs(&[
///     (10.0, 0.0340),
///     (1.0, 0.0280),
///     (5.0, 0.0315),
/// ]).unwrap();
///
/// // Sorted by maturity regardless of input order
/// assert_eq!(set.maturities(), vec![1.0, 5.0, 10.0]);
/// assert_eq!(set.last_liquid_point(), 10.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationSet {
    observations: Vec<RateObservation>,
}

impl ObservationSet {
    /// Creates a validated observation set, sorting by maturity.
    ///
    /// # Errors
    ///
    /// Returns an error if the set is empty, any maturity is non-positive
    /// or non-finite, any rate is not finite or not above -100%, or two
    /// observations share a maturity.
    pub fn new(mut observations: Vec<RateObservation>) -> CurveResult<Self> {
        if observations.is_empty() {
            return Err(CurveError::insufficient_data(1, 0));
        }

        for obs in &observations {
            if !obs.maturity.is_finite() || obs.maturity <= 0.0 {
                return Err(CurveError::invalid_parameter(format!(
                    "maturity must be positive and finite, got {}",
                    obs.maturity
                )));
            }
            if !obs.rate.is_finite() || obs.rate <= -1.0 {
                return Err(CurveError::invalid_parameter(format!(
                    "rate must be finite and above -100%, got {}",
                    obs.rate
                )));
            }
        }

        observations.sort_by(|a, b| a.maturity.total_cmp(&b.maturity));

        for pair in observations.windows(2) {
            if pair[0].maturity == pair[1].maturity {
                return Err(CurveError::invalid_parameter(format!(
                    "duplicate maturity {}",
                    pair[0].maturity
                )));
            }
        }

        Ok(Self { observations })
    }

    /// Creates an observation set from `(maturity, rate)` pairs.
    ///
    /// # Errors
    ///
    /// Same validation as [`ObservationSet::new`].
    pub fn from_pairs(pairs: &[(f64, f64)]) -> CurveResult<Self> {
        let observations = pairs
            .iter()
            .map(|&(maturity, rate)| RateObservation::new(maturity, rate))
            .collect();
        Self::new(observations)
    }

    /// Returns the observations, sorted by maturity.
    #[must_use]
    pub fn observations(&self) -> &[RateObservation] {
        &self.observations
    }

    /// Returns the number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// Returns true if the set holds no observations.
    ///
    /// Always false for a constructed set; present for API completeness.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// Returns the maturities in increasing order.
    #[must_use]
    pub fn maturities(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.maturity).collect()
    }

    /// Returns the rates, ordered by maturity.
    #[must_use]
    pub fn rates(&self) -> Vec<f64> {
        self.observations.iter().map(|obs| obs.rate).collect()
    }

    /// Returns the market discount factors under the given compounding.
    #[must_use]
    pub fn discount_factors(&self, compounding: Compounding) -> Vec<f64> {
        self.observations
            .iter()
            .map(|obs| compounding.discount_factor(obs.rate, obs.maturity))
            .collect()
    }

    /// Returns the longest observed maturity.
    #[must_use]
    pub fn last_liquid_point(&self) -> f64 {
        self.observations.last().map_or(0.0, |obs| obs.maturity)
    }

    /// Returns an iterator over the observations.
    pub fn iter(&self) -> std::slice::Iter<'_, RateObservation> {
        self.observations.iter()
    }
}

impl<'a> IntoIterator for &'a ObservationSet {
    type Item = &'a RateObservation;
    type IntoIter = std::slice::Iter<'a, RateObservation>;

    fn into_iter(self) -> Self::IntoIter {
        self.observations.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn eur_pairs() -> Vec<(f64, f64)> {
        vec![
            (1.0, 0.0280),
            (2.0, 0.0295),
            (5.0, 0.0315),
            (10.0, 0.0340),
            (20.0, 0.0375),
        ]
    }

    #[test]
    fn test_from_pairs() {
        let set = ObservationSet::from_pairs(&eur_pairs()).unwrap();

        assert_eq!(set.len(), 5);
        assert_relative_eq!(set.last_liquid_point(), 20.0, epsilon = 1e-15);
    }

    #[test]
    fn test_sorts_by_maturity() {
        let set = ObservationSet::from_pairs(&[(10.0, 0.034), (1.0, 0.028), (5.0, 0.0315)])
            .unwrap();

        assert_eq!(set.maturities(), vec![1.0, 5.0, 10.0]);
        assert_eq!(set.rates(), vec![0.028, 0.0315, 0.034]);
    }

    #[test]
    fn test_empty_rejected() {
        let result = ObservationSet::new(vec![]);
        assert!(matches!(result, Err(CurveError::InsufficientData { .. })));
    }

    #[test]
    fn test_non_positive_maturity_rejected() {
        assert!(ObservationSet::from_pairs(&[(0.0, 0.03)]).is_err());
        assert!(ObservationSet::from_pairs(&[(-1.0, 0.03)]).is_err());
    }

    #[test]
    fn test_non_finite_inputs_rejected() {
        assert!(ObservationSet::from_pairs(&[(f64::NAN, 0.03)]).is_err());
        assert!(ObservationSet::from_pairs(&[(1.0, f64::NAN)]).is_err());
        assert!(ObservationSet::from_pairs(&[(f64::INFINITY, 0.03)]).is_err());
    }

    #[test]
    fn test_rate_below_minus_one_rejected() {
        assert!(ObservationSet::from_pairs(&[(1.0, -1.0)]).is_err());
        assert!(ObservationSet::from_pairs(&[(1.0, -1.5)]).is_err());
    }

    #[test]
    fn test_negative_rate_accepted() {
        // Negative rates are observable market data
        let set = ObservationSet::from_pairs(&[(1.0, -0.005), (5.0, 0.001)]).unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_duplicate_maturity_rejected() {
        let result = ObservationSet::from_pairs(&[(1.0, 0.028), (5.0, 0.0315), (5.0, 0.032)]);
        assert!(matches!(result, Err(CurveError::InvalidParameter { .. })));
    }

    #[test]
    fn test_single_observation() {
        let set = ObservationSet::from_pairs(&[(10.0, 0.03)]).unwrap();

        assert_eq!(set.len(), 1);
        assert_relative_eq!(set.last_liquid_point(), 10.0, epsilon = 1e-15);
    }

    #[test]
    fn test_discount_factors_annual() {
        let set = ObservationSet::from_pairs(&[(1.0, 0.0280), (20.0, 0.0375)]).unwrap();
        let dfs = set.discount_factors(Compounding::Annual);

        assert_relative_eq!(dfs[0], 1.0280_f64.powf(-1.0), epsilon = 1e-15);
        assert_relative_eq!(dfs[1], 1.0375_f64.powf(-20.0), epsilon = 1e-15);
    }

    #[test]
    fn test_iteration() {
        let set = ObservationSet::from_pairs(&eur_pairs()).unwrap();
        let total: f64 = set.iter().map(|obs| obs.rate).sum();

        assert_relative_eq!(total, 0.0280 + 0.0295 + 0.0315 + 0.0340 + 0.0375, epsilon = 1e-15);
    }

    #[test]
    fn test_serde_roundtrip() {
        let set = ObservationSet::from_pairs(&eur_pairs()).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        let back: ObservationSet = serde_json::from_str(&json).unwrap();

        assert_eq!(set, back);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_maturities_sorted(
                gaps in prop::collection::vec(0.5f64..4.0, 1..12),
                rates in prop::collection::vec(-0.01f64..0.06, 12),
            ) {
                let mut maturity = 0.0;
                let pairs: Vec<(f64, f64)> = gaps
                    .iter()
                    .zip(rates.iter())
                    .map(|(&gap, &rate)| {
                        maturity += gap;
                        (maturity, rate)
                    })
                    .collect();

                let set = ObservationSet::from_pairs(&pairs).unwrap();
                let maturities = set.maturities();
                for pair in maturities.windows(2) {
                    prop_assert!(pair[0] < pair[1]);
                }
                prop_assert_eq!(set.len(), pairs.len());
            }
        }
    }
}
