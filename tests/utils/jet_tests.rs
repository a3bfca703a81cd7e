use super::*;
use chrono::NaiveDate;
use llj_analysis::{
    classify, find_jets, AnalysisError, Classification, FieldDefect, JetConfig, LevelOrder,
    Result, WindField,
};
use metfor::{HectoPascal, Quantity};
use ndarray::Array4;

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_classification(profile: Result<WindProfile>, tgt_vals: &HashMap<String, String>) {
    if tgt_vals.get("malformed").map(|v| v == "1").unwrap_or(false) {
        match profile {
            Err(AnalysisError::MalformedField(_)) => return,
            other => panic!("expected a malformed profile, got {:?}", other),
        }
    }

    let profile = profile.unwrap();
    let analysis = classify(&profile, &JetConfig::default());
    println!("{:#?}", analysis);

    let expect_jet = tgt_vals.get("jet").expect("no jet key") == "1";

    match analysis {
        Classification::Jet(jet) => {
            assert!(expect_jet, "found an unexpected jet");

            let tgt = |key: &str| -> f64 {
                f64::from_str(tgt_vals.get(key).expect(key)).expect("bad target value")
            };

            assert!(approx_equal(jet.core_level().unpack(), tgt("core level"), 1.0e-9));
            assert!(approx_equal(jet.core_speed().unpack(), tgt("core speed"), 1.0e-9));
            assert!(approx_equal(
                jet.decrease_above_core().unpack(),
                tgt("decrease"),
                1.0e-9
            ));
            assert_eq!(f64::from(jet.criterion().tier()), tgt("criterion"));
        }
        Classification::NoJet(reason) => {
            assert!(!expect_jet, "missed a jet: {}", reason);
            assert_eq!(
                &format!("{:?}", reason),
                tgt_vals.get("reason").expect("no reason key")
            );
        }
    }
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_repeatable(profile: Result<WindProfile>) {
    if let Ok(profile) = profile {
        let config = JetConfig::default();
        let first = classify(&profile, &config);
        for _ in 0..10 {
            assert_eq!(first, classify(&profile, &config));
        }
    }
}

/// Adding the same speed to every level keeps the core where it is and the decrease the same, but
/// makes the core faster. That can never make for a weaker criterion.
#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_stronger_core_never_downgrades(pairs: &[(f64, f64)]) {
    let config = JetConfig::default();

    let base = match WindProfile::from_pairs(pairs) {
        Ok(profile) => classify(&profile, &config),
        Err(_) => return,
    };

    for &extra in &[0.5, 1.0, 2.0, 5.0, 10.0] {
        let faster: Vec<(f64, f64)> = pairs.iter().map(|&(p, spd)| (p, spd + extra)).collect();
        let faster = classify(&WindProfile::from_pairs(&faster).unwrap(), &config);

        if let Classification::Jet(jet) = base {
            let faster_jet = faster.jet().expect("faster core lost its jet");
            assert_eq!(faster_jet.core_level(), jet.core_level());
            assert!(approx_equal(
                faster_jet.decrease_above_core().unpack(),
                jet.decrease_above_core().unpack(),
                1.0e-9
            ));
            assert!(faster_jet.criterion().tier() <= jet.criterion().tier());
        }
    }
}

/// Run the profile through the batch driver as a one point field.
#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn test_batch_agrees(profile: Result<WindProfile>, pairs: &[(f64, f64)]) {
    let field = match make_single_column_field(pairs) {
        Ok(field) => field,
        Err(err) => {
            // Only a bad level axis should stop the field from being built.
            assert_eq!(
                err,
                AnalysisError::MalformedField(FieldDefect::NonMonotonicLevels)
            );
            assert!(profile.is_err());
            return;
        }
    };

    let config = JetConfig::default();
    let analysis = find_jets(&field, &config).unwrap();

    match profile {
        Err(AnalysisError::MalformedField(FieldDefect::NonMonotonicLevels)) => {
            // A field accepts levels top first and flips them.
            assert_eq!(field.supplied_level_order(), LevelOrder::TopFirst);
            assert_eq!(analysis.skipped(), 0);
            assert_eq!(analysis.classified(), 1);
        }
        Err(_) => {
            assert_eq!(analysis.skipped(), 1);
            assert_eq!(analysis.classified(), 0);
            assert!(analysis.table().is_empty());
        }
        Ok(profile) => {
            assert_eq!(analysis.skipped(), 0);
            assert_eq!(analysis.classified(), 1);
            match classify(&profile, &config) {
                Classification::Jet(jet) => {
                    assert_eq!(analysis.table().len(), 1);
                    let rec = analysis.table().records()[0];
                    assert_eq!(rec.core_level(), jet.core_level());
                    assert_eq!(rec.criterion(), jet.criterion());
                    assert_eq!(rec.lat(), -20.5);
                    assert_eq!(rec.lon(), 300.0);
                }
                Classification::NoJet(reason) => {
                    assert!(analysis.table().is_empty());
                    assert_eq!(analysis.no_jet_count(reason), 1);
                }
            }
        }
    }
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn make_single_column_field(pairs: &[(f64, f64)]) -> Result<WindField> {
    let levels: Vec<HectoPascal> = pairs.iter().map(|&(p, _)| HectoPascal(p)).collect();

    let mut u = Array4::zeros((1, pairs.len(), 1, 1));
    for (lvl, &(_, spd)) in pairs.iter().enumerate() {
        u[[0, lvl, 0, 0]] = spd;
    }

    WindField::builder()
        .with_time_axis(vec![NaiveDate::from_ymd(1979, 1, 1).and_hms(0, 0, 0)])
        .with_level_axis(levels)
        .with_lat_axis(vec![-20.5])
        .with_lon_axis(vec![300.0])
        .with_u(u)
        .with_v(Array4::zeros((1, pairs.len(), 1, 1)))
        .build()
}
