//! Helper for describing chance outcomes while building a tree.

use crate::tree::TreeError;

/// Tolerance when checking that chance probabilities sum to 1.
const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// A named set of `(label, probability)` outcomes.
///
/// Concrete games use this to describe a chance node's outcomes before
/// attaching the corresponding edges; the distribution itself is not stored
/// in the tree.
#[derive(Debug, Clone)]
pub struct ChanceDistribution {
    /// Name used in error messages, e.g. `"deal"`.
    pub name: String,
    /// Ordered `(label, probability)` outcomes.
    pub outcomes: Vec<(String, f64)>,
}

impl ChanceDistribution {
    /// Create a distribution from `(label, probability)` pairs.
    pub fn new(name: impl Into<String>, outcomes: Vec<(String, f64)>) -> Self {
        Self {
            name: name.into(),
            outcomes,
        }
    }

    /// Check that the probabilities form a distribution.
    ///
    /// # Errors
    /// [`TreeError::DistributionNotNormalized`] when the probabilities do not
    /// sum to 1 within 1e-9.
    pub fn validate(&self) -> Result<(), TreeError> {
        let total: f64 = self.outcomes.iter().map(|(_, p)| p).sum();
        if (total - 1.0).abs() > PROBABILITY_TOLERANCE {
            return Err(TreeError::DistributionNotNormalized {
                name: self.name.clone(),
                total,
            });
        }
        Ok(())
    }

    /// Iterate over the `(label, probability)` outcomes.
    pub fn iter(&self) -> impl Iterator<Item = &(String, f64)> {
        self.outcomes.iter()
    }
}
