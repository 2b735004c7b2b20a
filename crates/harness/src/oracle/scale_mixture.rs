//! Scale-mixture Gaussian prior derivative.
//!
//! The verified units implement the derivative of the negative log of a
//! two-component Gaussian scale mixture, parameterized by the component
//! scales σA and σB (σA > σB):
//!
//! ```text
//! σ'² = σA²σB² / (σA² − σB²)
//! g(x) = exp(−x² / 2σ'²)
//! f(x) = −x/σ'² · ( 1 / (σB/(σA·g(x)) + 1) + σ'²/σA² )
//! ```
//!
//! At x = 0 the value is finite and obtained by direct substitution
//! (g(0) = 1), not by trusting the general expression blindly.

use serde::{Deserialize, Serialize};

/// Scale parameters of the mixture, fixed at configuration time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScaleMixture {
    /// Broad component scale σA.
    pub sigma_a: f64,
    /// Narrow component scale σB (must be below σA).
    pub sigma_b: f64,
}

impl Default for ScaleMixture {
    fn default() -> Self {
        Self {
            sigma_a: 1.0,
            sigma_b: 0.25,
        }
    }
}

impl ScaleMixture {
    /// The mixed variance σ'² = σA²σB² / (σA² − σB²).
    pub fn mixed_variance(self) -> f64 {
        let a2 = self.sigma_a * self.sigma_a;
        let b2 = self.sigma_b * self.sigma_b;
        a2 * b2 / (a2 - b2)
    }

    /// Evaluates the derivative at `x`.
    pub fn eval(self, x: f64) -> f64 {
        if x == 0.0 {
            // Direct substitution: g(0) = 1, so the bracket is finite and
            // the leading −x factor makes the value ±0.
            let a2 = self.sigma_a * self.sigma_a;
            let sp2 = self.mixed_variance();
            let bracket = 1.0 / (self.sigma_b / self.sigma_a + 1.0) + sp2 / a2;
            return -x / sp2 * bracket;
        }
        let a2 = self.sigma_a * self.sigma_a;
        let sp2 = self.mixed_variance();
        let g = (-x * x / (2.0 * sp2)).exp();
        let bracket = 1.0 / (self.sigma_b / (self.sigma_a * g) + 1.0) + sp2 / a2;
        -x / sp2 * bracket
    }
}
