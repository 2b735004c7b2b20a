//! Configuration system for the conformance harness.
//!
//! This module defines the configuration structures used to parameterize
//! campaigns. It provides:
//! 1. **Defaults:** Baseline constants (vector counts, cycle budgets, unit
//!    latencies, epsilon table, mixture scales).
//! 2. **Structures:** Hierarchical config for generation, timing, tolerance,
//!    and special-value policy selection.
//! 3. **Campaign assembly:** [`HarnessConfig::campaign`] builds the
//!    immutable per-campaign parameter set.
//!
//! Configuration is supplied via JSON or `HarnessConfig::default()`; every
//! campaign is parameterized from an explicit config value — nothing here
//! is global or mutable after a campaign starts.

use serde::Deserialize;

use crate::codec::FloatFormat;
use crate::common::FunctionKind;
use crate::oracle::{DomainEdge, ScaleMixture, SpecialValuePolicy, ZeroEdge};
use crate::runner::CampaignSpec;

/// Default configuration constants for the harness.
mod defaults {
    /// Seed for the random vector tail when none is given.
    pub const SEED: u64 = 0x5EED;

    /// Number of seeded-random vectors appended to the edge set.
    pub const RANDOM_VECTORS: usize = 64;

    /// Maximum clock steps per await loop before a vector times out.
    pub const TIMEOUT_BUDGET: u64 = 10_000;

    /// Pipeline latency of the fixed-latency arithmetic units.
    pub const FIXED_LATENCY: u64 = 2;

    /// Iteration count of the variable-latency div/sqrt units.
    pub const VARIABLE_LATENCY: u64 = 15;

    /// Pipeline depth of the multiplexed transcendental units; also the
    /// bubble count inserted between the phases of a two-phase function.
    pub const PIPELINE_DEPTH: u64 = 8;

    /// Relative tolerance for arithmetic at double precision.
    pub const EPS_ARITH_F64: f64 = 1.0e-12;

    /// Relative tolerance for arithmetic at single precision.
    pub const EPS_ARITH_F32: f64 = 1.0e-6;

    /// Relative tolerance for arithmetic at half precision.
    pub const EPS_ARITH_F16: f64 = 1.0e-3;

    /// Relative tolerance for approximators at double precision.
    pub const EPS_TRANS_F64: f64 = 1.0e-8;

    /// Relative tolerance for approximators at single precision.
    pub const EPS_TRANS_F32: f64 = 1.0e-5;

    /// Relative tolerance for approximators at half precision.
    pub const EPS_TRANS_F16: f64 = 1.0e-2;

    /// Saturation magnitude of the sigmoid-family units.
    pub const SIGMOID_SATURATION: f64 = 30.0;
}

/// Per-format relative tolerances for one function class.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct FormatEpsilons {
    /// Tolerance at half precision.
    pub half: f64,
    /// Tolerance at single precision.
    pub single: f64,
    /// Tolerance at double precision.
    pub double: f64,
}

impl FormatEpsilons {
    fn select(self, format: FloatFormat) -> f64 {
        match format {
            FloatFormat::Half => self.half,
            FloatFormat::Single => self.single,
            FloatFormat::Double => self.double,
        }
    }
}

impl Default for FormatEpsilons {
    fn default() -> Self {
        Self {
            half: defaults::EPS_ARITH_F16,
            single: defaults::EPS_ARITH_F32,
            double: defaults::EPS_ARITH_F64,
        }
    }
}

/// The campaign tolerance table: one row per function class.
///
/// The comparator itself is precision- and policy-agnostic; every epsilon
/// flows from here as a parameter.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct EpsilonTable {
    /// Exact-arithmetic units (add/sub/mul/fma/div/sqrt).
    pub arithmetic: FormatEpsilons,
    /// Approximation units (everything else).
    pub transcendental: FormatEpsilons,
}

impl Default for EpsilonTable {
    fn default() -> Self {
        Self {
            arithmetic: FormatEpsilons::default(),
            transcendental: FormatEpsilons {
                half: defaults::EPS_TRANS_F16,
                single: defaults::EPS_TRANS_F32,
                double: defaults::EPS_TRANS_F64,
            },
        }
    }
}

impl EpsilonTable {
    /// The tolerance for one (kind, format) campaign.
    pub fn epsilon_for(&self, kind: FunctionKind, format: FloatFormat) -> f64 {
        if kind.is_transcendental() {
            self.transcendental.select(format)
        } else {
            self.arithmetic.select(format)
        }
    }
}

/// Special-value policy selections for the documented units.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    /// Square-root family behavior for negative arguments.
    pub sqrt_negative: DomainEdge,
    /// Arccosine behavior outside [−1, 1].
    pub acos_out_of_domain: DomainEdge,
    /// Logarithm behavior for negative arguments.
    pub log_negative: DomainEdge,
    /// Sigmoid-family saturation magnitude.
    pub sigmoid_saturation: f64,
    /// Scale-mixture derivative behavior at exactly-zero input.
    pub smg_at_zero: ZeroEdge,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            sqrt_negative: DomainEdge::FlushToZero,
            acos_out_of_domain: DomainEdge::ClampToBoundary,
            log_negative: DomainEdge::Nan,
            sigmoid_saturation: defaults::SIGMOID_SATURATION,
            smg_at_zero: ZeroEdge::SignedInfinity,
        }
    }
}

/// Unit timing parameters for the built-in behavioral models.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Latency of the fixed-latency arithmetic units, in cycles.
    pub fixed_latency: u64,
    /// Iteration count of the div/sqrt units, in cycles per operation.
    pub variable_latency: u64,
    /// Depth of the multiplexed pipeline (and the inter-phase bubble count).
    pub pipeline_depth: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fixed_latency: defaults::FIXED_LATENCY,
            variable_latency: defaults::VARIABLE_LATENCY,
            pipeline_depth: defaults::PIPELINE_DEPTH,
        }
    }
}

/// Root harness configuration.
///
/// Deserialize from JSON or use the defaults; pass to
/// [`HarnessConfig::campaign`] to assemble the immutable per-campaign
/// parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Seed for the random vector tail.
    pub seed: u64,
    /// Number of seeded-random vectors per campaign.
    pub random_vectors: usize,
    /// Maximum clock steps per await loop.
    pub timeout_budget: u64,
    /// Timing of the built-in behavioral units.
    pub timing: TimingConfig,
    /// Relative tolerance table.
    pub epsilon: EpsilonTable,
    /// Special-value policy selections.
    pub policy: PolicyConfig,
    /// Scale-mixture derivative parameters.
    pub scale_mixture: ScaleMixture,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            seed: defaults::SEED,
            random_vectors: defaults::RANDOM_VECTORS,
            timeout_budget: defaults::TIMEOUT_BUDGET,
            timing: TimingConfig::default(),
            epsilon: EpsilonTable::default(),
            policy: PolicyConfig::default(),
            scale_mixture: ScaleMixture::default(),
        }
    }
}

impl HarnessConfig {
    /// Parses a configuration from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns the underlying parse error for malformed JSON or
    /// out-of-shape fields.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The special-value policy for one kind, per this configuration.
    pub fn policy_for(&self, kind: FunctionKind) -> SpecialValuePolicy {
        let mut policy = SpecialValuePolicy::default_for(kind);
        match kind {
            FunctionKind::Sqrt | FunctionKind::InvSqrt => {
                policy.out_of_domain = self.policy.sqrt_negative;
            }
            FunctionKind::Acos => {
                policy.out_of_domain = self.policy.acos_out_of_domain;
            }
            FunctionKind::Log => {
                policy.out_of_domain = self.policy.log_negative;
            }
            FunctionKind::Sigmoid | FunctionKind::SoftPlus => {
                policy.saturation_threshold = Some(self.policy.sigmoid_saturation);
            }
            FunctionKind::ScaleMixtureGaussian => {
                policy.at_zero = self.policy.smg_at_zero;
            }
            _ => {}
        }
        policy
    }

    /// Assembles the immutable parameters for one (kind, format) campaign.
    pub fn campaign(&self, kind: FunctionKind, format: FloatFormat) -> CampaignSpec {
        CampaignSpec {
            kind,
            format,
            seed: self.seed,
            random_vectors: self.random_vectors,
            epsilon: self.epsilon.epsilon_for(kind, format),
            budget: self.timeout_budget,
            policy: self.policy_for(kind),
            smg: self.scale_mixture,
        }
    }
}
