use pf_core::{Tolerances, m, nearly_equal};
use pf_pipe::{
    AdaptationParameters, FlowRegime, FrictionModel, PipeProfile, PipeProperties, PipeWall,
    classify, hydraulic_resistance_isaev, on_regime_boundary,
};

fn trunk_line() -> PipeProperties {
    let profile = PipeProfile::uniform(0.0, 12_000.0, 0.0, 0.0, 101).unwrap();
    let wall = PipeWall::new(m(0.7), m(0.01), m(1e-4)).unwrap();
    PipeProperties::new(profile, wall).unwrap()
}

#[test]
fn regimes_across_operating_range() {
    let k = trunk_line().relative_roughness();
    let table = [
        (0.5, FlowRegime::Creeping),
        (1000.0, FlowRegime::Laminar),
        (3000.0, FlowRegime::Transitional),
        (1e5, FlowRegime::Turbulent),
        (1e7, FlowRegime::FullyRough),
    ];
    for (re, regime) in table {
        assert_eq!(classify(re, k), regime, "Re = {re}");
        let lambda = FrictionModel::Isaev.checked_factor(re, k).unwrap();
        assert!(lambda > 0.0 && lambda.is_finite());
    }
}

#[test]
fn resistance_applies_friction_adaptation() {
    let pipe = trunk_line();
    let calibrated = pipe
        .clone()
        .with_adaptation(AdaptationParameters {
            friction: 1.1,
            ..Default::default()
        })
        .unwrap();

    let re = 66_000.0;
    let base = hydraulic_resistance_isaev(re, pipe.relative_roughness());
    assert_eq!(pipe.resistance(re), base);
    assert!(nearly_equal(calibrated.resistance(re), 1.1 * base, Tolerances::default()));
}

#[test]
fn diameter_adaptation_shifts_relative_roughness() {
    let pipe = trunk_line()
        .with_adaptation(AdaptationParameters {
            diameter: 0.98,
            ..Default::default()
        })
        .unwrap();
    assert!(nearly_equal(pipe.effective_diameter(), 0.686, Tolerances::default()));
    assert!(nearly_equal(
        pipe.relative_roughness(),
        1e-4 / 0.686,
        Tolerances::default()
    ));
}

#[test]
fn alternative_models_are_selectable() {
    let k: f64 = 1e-4 / 0.7;
    let isaev = trunk_line();
    let altshul = trunk_line().with_friction("altshul".parse().unwrap());
    let shifrinson = trunk_line().with_friction(FrictionModel::Shifrinson);

    // Altshul and Isaev agree within a few percent in the turbulent zone
    let (a, i) = (altshul.resistance(1e5), isaev.resistance(1e5));
    assert!(((a - i) / i).abs() < 0.1);
    assert_eq!(shifrinson.resistance(1e3), shifrinson.resistance(1e6));
    assert_eq!(shifrinson.resistance(1e3), 0.11 * k.powf(0.25));
}

#[test]
fn exact_thresholds_are_flagged() {
    let k = trunk_line().relative_roughness();
    for re in [1.0, 2320.0, 4000.0, 560.0 / k] {
        assert!(on_regime_boundary(re, k), "Re = {re}");
    }
    assert!(!on_regime_boundary(2320.5, k));
}
