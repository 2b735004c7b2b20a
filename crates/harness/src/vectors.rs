//! Test-vector generation.
//!
//! Each campaign's input set is a fixed deterministic edge set (zero, one,
//! minus one, two, kind-specific domain boundaries, and NaN/±Infinity
//! unless the unit is documented as not required to handle them)
//! concatenated with N seeded-random vectors drawn uniformly from the
//! kind's domain interval. Identical (kind, seed) always yields identical
//! vectors, so regression runs reproduce exactly.
//!
//! Inputs are quantized through the codec before the oracle evaluates
//! them: the reference must see exactly the bits the device sees.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::codec::{Codec, FloatFormat};
use crate::common::FunctionKind;
use crate::oracle::{EdgeBehavior, ReferenceOracle, SpecialOutcome};

/// One immutable conformance stimulus.
///
/// Created here, consumed once per run, never mutated.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct TestVector {
    /// Input operands, already quantized to the campaign format.
    pub inputs: Vec<f64>,
    /// What the device must produce.
    pub expected: Expectation,
    /// Relative tolerance for the finite path.
    pub epsilon: f64,
}

/// The expected behavior of one vector.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Expectation {
    /// A finite reference value, compared with the campaign epsilon.
    Finite(f64),
    /// A policy-mandated class, compared without tolerance.
    Class(SpecialOutcome),
}

/// Deterministic vector generator.
#[derive(Clone, Copy, Debug)]
pub struct TestVectorGenerator {
    random_count: usize,
}

impl TestVectorGenerator {
    /// Creates a generator emitting `random_count` seeded vectors after
    /// the edge set.
    pub fn new(random_count: usize) -> Self {
        Self { random_count }
    }

    /// Generates the vector set for one campaign.
    ///
    /// The edge set comes first, in a fixed order; the seeded-random tail
    /// follows. Every input is quantized to `format` before the oracle
    /// computes its expectation.
    pub fn generate(
        &self,
        oracle: &ReferenceOracle,
        format: FloatFormat,
        seed: u64,
        epsilon: f64,
    ) -> Vec<TestVector> {
        let kind = oracle.kind();
        let edges = Self::edge_values(oracle);
        let mut out = Vec::with_capacity(edges.len() * kind.arity() + self.random_count);

        for value in edges {
            out.push(Self::build(oracle, format, epsilon, &Self::spread(kind, value)));
            // Binary kinds see every edge on the second port too (division
            // by zero lives there).
            if kind.arity() == 2 {
                out.push(Self::build(oracle, format, epsilon, &[3.0, value]));
            }
        }

        let (lo, hi) = kind.domain();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..self.random_count {
            let inputs: Vec<f64> = (0..kind.arity()).map(|_| rng.gen_range(lo..=hi)).collect();
            out.push(Self::build(oracle, format, epsilon, &inputs));
        }

        out
    }

    /// The fixed edge inputs for a kind, special values included when the
    /// policy requires them to be handled.
    fn edge_values(oracle: &ReferenceOracle) -> Vec<f64> {
        let mut edges = vec![0.0, 1.0, -1.0, 2.0];
        match oracle.kind() {
            FunctionKind::Sqrt | FunctionKind::InvSqrt | FunctionKind::Reciprocal => {
                edges.push(-0.0);
                edges.push(4.0);
            }
            FunctionKind::Log => {
                edges.push(-0.0);
                edges.push(std::f64::consts::E);
            }
            FunctionKind::Acos => {
                // Domain boundaries and out-of-domain probes.
                edges.extend([0.5, -0.5, 1.5, -1.5]);
            }
            FunctionKind::Sin | FunctionKind::Cos => {
                edges.extend([std::f64::consts::PI, -std::f64::consts::FRAC_PI_2]);
            }
            FunctionKind::Sigmoid | FunctionKind::SoftPlus => {
                edges.extend([30.0, -30.0]);
            }
            FunctionKind::ScaleMixtureGaussian => {
                edges.extend([-0.0, 0.5, -0.5]);
            }
            _ => {}
        }
        let policy = oracle.policy();
        if policy.nan_inputs == EdgeBehavior::Propagate {
            edges.push(f64::NAN);
        }
        if policy.inf_inputs == EdgeBehavior::Propagate {
            edges.push(f64::INFINITY);
            edges.push(f64::NEG_INFINITY);
        }
        edges
    }

    /// Expands a single edge value to the kind's arity, pairing it with
    /// benign companions so the edge lands on each port.
    fn spread(kind: FunctionKind, value: f64) -> Vec<f64> {
        match kind.arity() {
            1 => vec![value],
            2 => vec![value, 3.0],
            _ => vec![value, 1.5, 0.5],
        }
    }

    /// Quantizes the inputs and asks the oracle for the expectation.
    fn build(
        oracle: &ReferenceOracle,
        format: FloatFormat,
        epsilon: f64,
        raw: &[f64],
    ) -> TestVector {
        let inputs: Vec<f64> = raw.iter().map(|&v| Codec::quantize(v, format)).collect();
        let expected = match oracle.special_case(&inputs) {
            Some(outcome) => Expectation::Class(outcome),
            None => Expectation::Finite(oracle.expected(&inputs)),
        };
        TestVector {
            inputs,
            expected,
            epsilon,
        }
    }
}
