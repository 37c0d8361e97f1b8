use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

use riskq_analysis::bowtie::{Barrier, BowTieComposer, BowTieModel, ConsequenceEvent, ThreatEvent};
use riskq_analysis::fmea::{FailureMode, FmeaRanker};
use riskq_analysis::scenario::{Scenario, ScenarioEvaluator, ScenarioSet};
use riskq_analysis::simulation::*;
use riskq_core::traits::{CancellationToken, SeededStreams};

fn distribution() -> impl Strategy<Value = ProbabilityDistribution> {
    prop::sample::select(ProbabilityDistribution::ALL.to_vec())
}

prop_compose! {
    fn simulation_params()(
        distribution in distribution(),
        p in (0.0..=1.0f64, 0.0..=1.0f64),
        i in (0.0..1e6f64, 0.0..1e6f64),
        correlation_factor in -1.0..=1.0f64,
        iterations in 1u64..400,
        levels in prop::collection::vec(0.01..0.99f64, 1..6),
    ) -> SimulationParameters {
        SimulationParameters {
            iterations,
            distribution,
            probability_min: p.0.min(p.1),
            probability_max: p.0.max(p.1),
            impact_min: i.0.min(i.1),
            impact_max: i.0.max(i.1),
            correlation_factor,
            confidence_levels: levels,
        }
    }
}

proptest! {
    #[test]
    fn percentiles_are_monotone_and_bounded(params in simulation_params(), seed in any::<u64>()) {
        let r = MonteCarloEngine::new()
            .run(&params, &SeededStreams::new(seed), &CancellationToken::new())
            .unwrap();
        prop_assert_eq!(r.total_simulations, params.iterations);
        prop_assert!(r.min <= r.median && r.median <= r.max);
        prop_assert!(r.min >= 0.0);
        prop_assert!(r.standard_deviation >= 0.0);
        for w in r.percentiles.windows(2) {
            prop_assert!(w[0].confidence_level < w[1].confidence_level);
            prop_assert!(w[0].value <= w[1].value);
        }
        for p in &r.percentiles {
            prop_assert!(r.min <= p.value && p.value <= r.max);
        }
    }

    #[test]
    fn seeded_runs_are_reproducible(params in simulation_params(), seed in any::<u64>()) {
        let sources = SeededStreams::new(seed);
        let engine = MonteCarloEngine::new().with_chunk_size(64);
        let a = engine.run(&params, &sources, &CancellationToken::new()).unwrap();
        let b = engine
            .clone()
            .with_parallel_threshold(0)
            .run(&params, &sources, &CancellationToken::new())
            .unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn sampled_probability_stays_in_range_for_bounded_shapes(
        lo in 0.0..=1.0f64,
        hi in 0.0..=1.0f64,
        seed in any::<u64>(),
    ) {
        let (min, max) = (lo.min(hi), lo.max(hi));
        let mut rng = StdRng::seed_from_u64(seed);
        for dist in [ProbabilityDistribution::Uniform, ProbabilityDistribution::Triangular] {
            for _ in 0..32 {
                let p = sample_probability(dist, min, max, &mut rng);
                prop_assert!(min - 1e-12 <= p && p <= max + 1e-12, "{} gave {} outside [{}, {}]", dist, p, min, max);
            }
        }
    }

    #[test]
    fn rpn_is_product_and_bounded(s in 1u8..=10, o in 1u8..=10, d in 1u8..=10, threshold in 0u32..1000) {
        let r = FmeaRanker::new(threshold)
            .rank(&[FailureMode::new("m", s, o, d)])
            .unwrap();
        let rpn = r.modes[0].rpn;
        prop_assert_eq!(rpn, u32::from(s) * u32::from(o) * u32::from(d));
        prop_assert!((1..=1000).contains(&rpn));
        prop_assert_eq!(r.modes[0].critical, rpn > threshold);
    }

    #[test]
    fn scores_outside_range_always_fail(s in prop_oneof![Just(0u8), 11u8..=255]) {
        prop_assert!(FmeaRanker::default().rank(&[FailureMode::new("m", s, 5, 5)]).is_err());
    }

    #[test]
    fn barriers_never_inflate_risk(
        threats in prop::collection::vec(0.0..=1.0f64, 0..4),
        impacts in prop::collection::vec(0.0..1e6f64, 0..4),
        preventive in prop::collection::vec(0.0..=1.0f64, 0..4),
        protective in prop::collection::vec(0.0..=1.0f64, 0..4),
    ) {
        let model = BowTieModel {
            central_event: "event".to_string(),
            threat_events: threats
                .iter()
                .map(|&probability| ThreatEvent { description: String::new(), probability, barriers: vec![] })
                .collect(),
            consequence_events: impacts
                .iter()
                .map(|&impact| ConsequenceEvent { description: String::new(), impact, barriers: vec![] })
                .collect(),
            preventive_barriers: preventive
                .iter()
                .enumerate()
                .map(|(i, &e)| Barrier::new(format!("P{i}"), e))
                .collect(),
            protective_barriers: protective
                .iter()
                .enumerate()
                .map(|(i, &e)| Barrier::new(format!("M{i}"), e))
                .collect(),
        };
        let r = BowTieComposer::new().compose(&model).unwrap();
        prop_assert!(r.residual_risk <= r.initial_risk * (1.0 + 1e-12));
        prop_assert!((0.0..=1.0).contains(&r.preventive_effectiveness));
        prop_assert!((0.0..=1.0).contains(&r.protective_effectiveness));
        prop_assert!(r.risk_reduction >= -1e-12 && r.risk_reduction <= 1.0 + 1e-12);
    }

    #[test]
    fn scenario_expected_values_are_exact(
        rows in prop::collection::vec((0.0..=1.0f64, 0.0..1e7f64), 1..8),
    ) {
        let set = ScenarioSet::new(
            rows.iter()
                .enumerate()
                .map(|(i, &(p, impact))| Scenario::new(format!("s{i}"), p, impact))
                .collect(),
        );
        let r = ScenarioEvaluator::new().evaluate(&set).unwrap();
        for (outcome, &(p, impact)) in r.outcomes.iter().zip(&rows) {
            prop_assert_eq!(outcome.expected_value, p * impact);
        }
        let mean = rows.iter().map(|&(p, i)| p * i).sum::<f64>() / rows.len() as f64;
        prop_assert_eq!(r.weighted_average, mean);
        let top = r.expected_value(&r.dominant_scenario).unwrap();
        prop_assert!(r.outcomes.iter().all(|o| o.expected_value <= top));
    }
}
