//! Campaign orchestration.
//!
//! Composes generator → driver → comparator → oracle into an end-to-end
//! pass/fail campaign for one (kind, format) pair. Partial-failure
//! semantics throughout: a failing vector is recorded with its full
//! diagnostic and the campaign continues — every vector is always
//! attempted, and every failure is surfaced, never only the first.
//! Nothing is retried: timing and randomness are seeded and
//! deterministic, so a retry would reproduce the identical outcome.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::codec::{Codec, FloatFormat};
use crate::common::{FunctionKind, ProtocolTimeout};
use crate::compare::{nearly_equal, relative_error};
use crate::driver::{DeviceUnderTest, ProtocolDriver};
use crate::oracle::{ReferenceOracle, ScaleMixture, SpecialOutcome, SpecialValuePolicy};
use crate::stats::CampaignStats;
use crate::vectors::{Expectation, TestVector, TestVectorGenerator};

/// Immutable parameters of one campaign.
///
/// Assembled by [`crate::config::HarnessConfig::campaign`]; everything a
/// run needs is here — no global state is consulted.
#[derive(Clone, Copy, Debug)]
pub struct CampaignSpec {
    /// Function under test.
    pub kind: FunctionKind,
    /// Encoding format under test.
    pub format: FloatFormat,
    /// Seed for the random vector tail.
    pub seed: u64,
    /// Number of seeded-random vectors.
    pub random_vectors: usize,
    /// Relative tolerance for the finite path.
    pub epsilon: f64,
    /// Maximum clock steps per await loop.
    pub budget: u64,
    /// The unit's documented special-value policy.
    pub policy: SpecialValuePolicy,
    /// Scale-mixture derivative parameters.
    pub smg: ScaleMixture,
}

/// Why a vector failed.
#[derive(Clone, Copy, Debug, Error, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The handshake never completed within the cycle budget.
    #[error("protocol timeout: {0}")]
    Timeout(ProtocolTimeout),

    /// The decoded output differs from the reference beyond epsilon.
    #[error(
        "tolerance exceeded: expected {expected:e}, got {actual:e} \
         (epsilon {epsilon:e}, relative error {relative_error:e})"
    )]
    Tolerance {
        /// Reference value, rounded into the campaign format.
        expected: f64,
        /// Decoded device output.
        actual: f64,
        /// Campaign tolerance.
        epsilon: f64,
        /// Observed relative error.
        relative_error: f64,
    },

    /// The output's class violates the policy-mandated class. Stricter
    /// than a tolerance mismatch: no epsilon applies.
    #[error("special-case class mismatch: expected {expected}, got {actual:e}")]
    SpecialCasePolicy {
        /// Policy-mandated output class.
        expected: SpecialOutcome,
        /// Decoded device output.
        actual: f64,
    },
}

/// Verdict for one vector.
#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VectorOutcome {
    /// The output satisfied the expectation.
    Passed,
    /// Driven but excluded from the verdict by policy.
    Exempt,
    /// Failed; the diagnostic says why.
    Failed(FailureKind),
}

impl VectorOutcome {
    /// Whether this outcome counts against the campaign verdict.
    pub fn is_failure(&self) -> bool {
        matches!(self, VectorOutcome::Failed(_))
    }
}

/// One vector's full diagnostic record.
#[derive(Clone, Debug, Serialize)]
pub struct ConformanceResult {
    /// Position in the campaign's vector sequence.
    pub index: usize,
    /// Input operands (quantized to the campaign format).
    pub inputs: Vec<f64>,
    /// What the device was expected to produce.
    pub expected: Expectation,
    /// Decoded device output; absent on protocol timeout.
    pub actual: Option<f64>,
    /// The verdict.
    pub outcome: VectorOutcome,
    /// Measured fill-wait cycles (zero on timeout).
    pub fill_wait: u64,
    /// Measured throughput cycles (zero on timeout).
    pub throughput: u64,
}

/// Aggregate result of one campaign.
#[derive(Clone, Debug, Serialize)]
pub struct CampaignReport {
    /// Function under test.
    pub kind: FunctionKind,
    /// Encoding format under test.
    pub format: FloatFormat,
    /// Seed the vectors were generated with.
    pub seed: u64,
    /// Aggregated counters and measurements.
    pub stats: CampaignStats,
    /// Per-vector diagnostics, in drive order.
    pub results: Vec<ConformanceResult>,
}

impl CampaignReport {
    /// Whether every non-exempt vector passed.
    pub fn passed(&self) -> bool {
        self.stats.failed == 0
    }

    /// The failing vectors, in drive order.
    pub fn failures(&self) -> impl Iterator<Item = &ConformanceResult> {
        self.results.iter().filter(|r| r.outcome.is_failure())
    }
}

/// Composes the harness components into end-to-end campaigns.
#[derive(Debug)]
pub struct ConformanceRunner;

impl ConformanceRunner {
    /// Runs one campaign against a device.
    ///
    /// The device is exclusively borrowed for the whole campaign; drive
    /// order and all timing are deterministic.
    pub fn run<D: DeviceUnderTest>(dut: &mut D, spec: &CampaignSpec) -> CampaignReport {
        let oracle = ReferenceOracle::new(spec.kind, spec.format, spec.policy, spec.smg);
        let vectors =
            TestVectorGenerator::new(spec.random_vectors).generate(&oracle, spec.format, spec.seed, spec.epsilon);
        let mut driver = ProtocolDriver::new(dut, spec.budget);

        info!(kind = %spec.kind, format = %spec.format, vectors = vectors.len(), "campaign start");

        let mut stats = CampaignStats::default();
        let mut results = Vec::with_capacity(vectors.len());

        for (index, vector) in vectors.iter().enumerate() {
            let encoded: Vec<u64> = vector
                .inputs
                .iter()
                .map(|&v| Codec::encode(v, spec.format))
                .collect();

            let result = match driver.run_vector(spec.kind, &encoded) {
                Err(timeout) => {
                    warn!(index, %timeout, inputs = ?vector.inputs, "vector timed out");
                    stats.timeouts += 1;
                    ConformanceResult {
                        index,
                        inputs: vector.inputs.clone(),
                        expected: vector.expected,
                        actual: None,
                        outcome: VectorOutcome::Failed(FailureKind::Timeout(timeout)),
                        fill_wait: 0,
                        throughput: 0,
                    }
                }
                Ok(drive) => {
                    let actual = Codec::decode(drive.bits, spec.format);
                    let outcome = Self::judge(vector, actual, spec.format);
                    stats.record_measurement(drive.fill_wait, drive.throughput);
                    if let VectorOutcome::Failed(failure) = &outcome {
                        warn!(index, %failure, inputs = ?vector.inputs, "vector failed");
                    } else {
                        debug!(index, actual, throughput = drive.throughput, "vector done");
                    }
                    ConformanceResult {
                        index,
                        inputs: vector.inputs.clone(),
                        expected: vector.expected,
                        actual: Some(actual),
                        outcome,
                        fill_wait: drive.fill_wait,
                        throughput: drive.throughput,
                    }
                }
            };

            match result.outcome {
                VectorOutcome::Passed => stats.passed += 1,
                VectorOutcome::Exempt => stats.exempt += 1,
                VectorOutcome::Failed(_) => stats.failed += 1,
            }
            stats.vectors += 1;
            results.push(result);
        }

        info!(
            kind = %spec.kind,
            format = %spec.format,
            passed = stats.passed,
            failed = stats.failed,
            exempt = stats.exempt,
            "campaign done"
        );

        CampaignReport {
            kind: spec.kind,
            format: spec.format,
            seed: spec.seed,
            stats,
            results,
        }
    }

    /// Verdict for one captured output.
    fn judge(vector: &TestVector, actual: f64, format: FloatFormat) -> VectorOutcome {
        match vector.expected {
            Expectation::Class(SpecialOutcome::Exempt) => VectorOutcome::Exempt,
            Expectation::Class(SpecialOutcome::Exact(target)) => {
                // Exact targets meet the device at format precision.
                let target = Codec::quantize(target, format);
                if SpecialOutcome::Exact(target).matches(actual) {
                    VectorOutcome::Passed
                } else {
                    VectorOutcome::Failed(FailureKind::SpecialCasePolicy {
                        expected: SpecialOutcome::Exact(target),
                        actual,
                    })
                }
            }
            Expectation::Class(class) => {
                if class.matches(actual) {
                    VectorOutcome::Passed
                } else {
                    VectorOutcome::Failed(FailureKind::SpecialCasePolicy {
                        expected: class,
                        actual,
                    })
                }
            }
            Expectation::Finite(reference) => {
                let expected = Codec::quantize(reference, format);
                if nearly_equal(actual, expected, vector.epsilon) {
                    VectorOutcome::Passed
                } else {
                    VectorOutcome::Failed(FailureKind::Tolerance {
                        expected,
                        actual,
                        epsilon: vector.epsilon,
                        relative_error: relative_error(actual, expected),
                    })
                }
            }
        }
    }
}
