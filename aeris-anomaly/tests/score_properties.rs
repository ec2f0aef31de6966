use proptest::prelude::*;

use aeris_anomaly::detectors::{self, IsolationForest, LocalOutlierFactor, OneClassSvm};
use aeris_core::traits::{DetectorKind, IDetectorModel};

fn arb_samples() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(
        prop::collection::vec(-1e3f64..1e3, 3),
        10..40,
    )
}

fn arb_probe() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1e6f64..1e6, 3)
}

fn assert_unit_score(kind: DetectorKind, model: &mut dyn IDetectorModel, samples: &[Vec<f64>], probe: &[f64]) {
    model.fit(samples).expect("fit");
    let native = model.score(probe).expect("score");
    let score = detectors::normalize_score(kind, native);
    assert!(
        (0.0..=1.0).contains(&score),
        "{kind}: native {native} -> {score}"
    );
}

// ── score01 ∈ [0,1] for any finite input, all three variants ─────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn isolation_forest_score_is_bounded(samples in arb_samples(), probe in arb_probe()) {
        let mut model = IsolationForest::default();
        assert_unit_score(DetectorKind::IsolationForest, &mut model, &samples, &probe);
    }

    #[test]
    fn one_class_svm_score_is_bounded(samples in arb_samples(), probe in arb_probe()) {
        let mut model = OneClassSvm::default();
        assert_unit_score(DetectorKind::OneClassSvm, &mut model, &samples, &probe);
    }

    #[test]
    fn local_outlier_factor_score_is_bounded(samples in arb_samples(), probe in arb_probe()) {
        let mut model = LocalOutlierFactor::default();
        assert_unit_score(DetectorKind::LocalOutlierFactor, &mut model, &samples, &probe);
    }
}
