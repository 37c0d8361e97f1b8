//! Distribution sampler: turns uniform draws into risk values.
//!
//! Each draw samples a probability under the chosen distribution, samples an
//! impact uniformly, couples the two linearly through `correlation_factor`,
//! and yields `clamp(probability, 0, 1) * max(impact', 0)`.
//!
//! The coupling `impact' = impact * (1 + c * (probability - 0.5))` is a
//! simple linear perturbation, not a copula. It is kept as is so stored
//! analyses stay comparable.

use std::f64::consts::PI;
use std::iter::FusedIterator;

use riskq_core::errors::ParameterError;
use riskq_core::traits::RandomSource;

use super::types::{ProbabilityDistribution, SimulationParameters};

/// Numeric inputs of one draw, copied out of the parameters.
#[derive(Debug, Clone, Copy)]
pub(crate) struct DrawInputs {
    distribution: ProbabilityDistribution,
    probability_min: f64,
    probability_max: f64,
    impact_min: f64,
    impact_max: f64,
    correlation_factor: f64,
}

impl From<&SimulationParameters> for DrawInputs {
    fn from(params: &SimulationParameters) -> Self {
        Self {
            distribution: params.distribution,
            probability_min: params.probability_min,
            probability_max: params.probability_max,
            impact_min: params.impact_min,
            impact_max: params.impact_max,
            correlation_factor: params.correlation_factor,
        }
    }
}

impl DrawInputs {
    fn draw<R: RandomSource + ?Sized>(&self, source: &mut R) -> f64 {
        let probability = sample_probability(
            self.distribution,
            self.probability_min,
            self.probability_max,
            source,
        );
        let impact = uniform(self.impact_min, self.impact_max, source.next_unit());
        risk_value(probability, impact, self.correlation_factor)
    }
}

/// A finite, one-shot sequence of risk values.
///
/// Yields exactly the requested number of draws and then stays exhausted.
#[derive(Debug)]
pub struct RiskDraws<R: RandomSource> {
    inputs: DrawInputs,
    source: R,
    remaining: u64,
}

impl<R: RandomSource> RiskDraws<R> {
    /// Validate `params` and prepare `params.iterations` draws from `source`.
    pub fn new(params: &SimulationParameters, source: R) -> Result<Self, ParameterError> {
        params.validate()?;
        Ok(Self::unchecked(DrawInputs::from(params), source, params.iterations))
    }

    /// Draws for already-validated parameters; used for per-chunk streams.
    pub(crate) fn unchecked(inputs: DrawInputs, source: R, count: u64) -> Self {
        Self {
            inputs,
            source,
            remaining: count,
        }
    }

    pub fn remaining(&self) -> u64 {
        self.remaining
    }
}

impl<R: RandomSource> Iterator for RiskDraws<R> {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.inputs.draw(&mut self.source))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (n, Some(n))
    }
}

impl<R: RandomSource> FusedIterator for RiskDraws<R> {}

/// Combine one probability/impact pair into a risk value.
pub fn risk_value(probability: f64, impact: f64, correlation_factor: f64) -> f64 {
    let coupled = impact * (1.0 + correlation_factor * (probability - 0.5));
    probability.clamp(0.0, 1.0) * coupled.max(0.0)
}

/// Sample a probability in the shape of `distribution` over `[min, max]`.
///
/// Normal and lognormal draws are not truncated here; the caller clamps.
pub fn sample_probability<R: RandomSource + ?Sized>(
    distribution: ProbabilityDistribution,
    min: f64,
    max: f64,
    source: &mut R,
) -> f64 {
    match distribution {
        ProbabilityDistribution::Normal => {
            // ±3σ spans the range
            let mean = (min + max) / 2.0;
            let std_dev = (max - min) / 6.0;
            mean + std_dev * standard_normal(source)
        }
        ProbabilityDistribution::Uniform => uniform(min, max, source.next_unit()),
        ProbabilityDistribution::Triangular => triangular(min, max, source.next_unit()),
        ProbabilityDistribution::Lognormal => lognormal(min, max, source),
    }
}

fn uniform(min: f64, max: f64, u: f64) -> f64 {
    min + u * (max - min)
}

/// Inverse-CDF triangular draw with the mode at the midpoint.
fn triangular(min: f64, max: f64, u: f64) -> f64 {
    let span = max - min;
    if span <= 0.0 {
        return min;
    }
    let mode = (min + max) / 2.0;
    let f_mode = (mode - min) / span;
    if u < f_mode {
        min + (u * span * (mode - min)).sqrt()
    } else {
        max - ((1.0 - u) * span * (max - mode)).sqrt()
    }
}

/// Lognormal draw with its median at the midpoint and `max` at +3σ in log space.
fn lognormal<R: RandomSource + ?Sized>(min: f64, max: f64, source: &mut R) -> f64 {
    let median = (min + max) / 2.0;
    if median <= 0.0 || max <= min {
        return median;
    }
    let sigma = (max / median).ln() / 3.0;
    (median.ln() + sigma * standard_normal(source)).exp()
}

/// Box-Muller standard normal variate from two uniforms.
fn standard_normal<R: RandomSource + ?Sized>(source: &mut R) -> f64 {
    // 1 - u keeps ln() away from zero
    let u1 = 1.0 - source.next_unit();
    let u2 = source.next_unit();
    (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays a fixed list of uniforms, cycling.
    struct Replay {
        values: Vec<f64>,
        pos: usize,
    }

    impl RandomSource for Replay {
        fn next_unit(&mut self) -> f64 {
            let v = self.values[self.pos % self.values.len()];
            self.pos += 1;
            v
        }
    }

    fn replay(values: &[f64]) -> Replay {
        Replay {
            values: values.to_vec(),
            pos: 0,
        }
    }

    #[test]
    fn uniform_hits_both_ends() {
        assert_eq!(uniform(0.2, 0.6, 0.0), 0.2);
        assert!((uniform(0.2, 0.6, 0.5) - 0.4).abs() < 1e-12);
    }

    #[test]
    fn triangular_median_is_mode() {
        assert!((triangular(0.0, 1.0, 0.5) - 0.5).abs() < 1e-12);
        assert_eq!(triangular(0.3, 0.3, 0.9), 0.3);
        for u in [0.0, 0.1, 0.49, 0.5, 0.9, 0.999] {
            let v = triangular(0.1, 0.9, u);
            assert!((0.1..=0.9).contains(&v), "u={u} gave {v}");
        }
    }

    #[test]
    fn lognormal_collapses_on_degenerate_range() {
        let mut src = replay(&[0.3, 0.7]);
        assert_eq!(lognormal(0.4, 0.4, &mut src), 0.4);
        assert_eq!(lognormal(0.0, 0.0, &mut src), 0.0);
    }

    #[test]
    fn normal_with_center_uniforms_is_mean() {
        // u2 = 0.25 -> cos(pi/2) = 0
        let mut src = replay(&[0.5, 0.25]);
        let p = sample_probability(ProbabilityDistribution::Normal, 0.2, 0.8, &mut src);
        assert!((p - 0.5).abs() < 1e-12);
    }

    #[test]
    fn risk_value_clamps_and_floors() {
        assert_eq!(risk_value(1.5, 100.0, 0.0), 100.0);
        assert_eq!(risk_value(-0.2, 100.0, 0.0), 0.0);
        // strong negative coupling drives impact below zero -> floored
        assert_eq!(risk_value(1.0, 100.0, -3.0), 0.0);
        assert!((risk_value(0.5, 200.0, 0.9) - 100.0).abs() < 1e-12);
    }

    #[test]
    fn draws_are_exact_length_and_fused() {
        let params = SimulationParameters {
            iterations: 3,
            distribution: ProbabilityDistribution::Uniform,
            probability_min: 0.1,
            probability_max: 0.9,
            impact_min: 10.0,
            impact_max: 20.0,
            correlation_factor: 0.0,
            confidence_levels: vec![],
        };
        let mut draws = RiskDraws::new(&params, replay(&[0.5])).unwrap();
        assert_eq!(draws.size_hint(), (3, Some(3)));
        assert_eq!(draws.by_ref().count(), 3);
        assert_eq!(draws.next(), None);
        assert_eq!(draws.remaining(), 0);
    }

    #[test]
    fn validation_happens_before_any_draw() {
        let params = SimulationParameters {
            iterations: 0,
            distribution: ProbabilityDistribution::Uniform,
            probability_min: 0.1,
            probability_max: 0.9,
            impact_min: 10.0,
            impact_max: 20.0,
            correlation_factor: 0.0,
            confidence_levels: vec![],
        };
        let src = replay(&[0.5]);
        assert!(matches!(
            RiskDraws::new(&params, src),
            Err(ParameterError::NonPositiveIterations)
        ));
    }
}
