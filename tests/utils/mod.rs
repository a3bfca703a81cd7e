use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;
use std::str::FromStr;

use llj_analysis::WindProfile;

pub mod jet_tests;

/// The keys that may appear in the analysis section of a test file.
#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub const ANALYSIS_KEYS: [&str; 7] = [
    "jet",
    "core level",
    "core speed",
    "decrease",
    "criterion",
    "reason",
    "malformed",
];

#[allow(unused_macros)] // False alarm
macro_rules! check_file_complete {
    ($test_name:ident, $fname:expr) => {
        #[test]
        fn $test_name() {
            let (_, pairs, vals) = crate::utils::load_test_file($fname);

            assert!(!pairs.is_empty(), "No profile data.");

            // Make sure there are no extra keys in there being ignored.
            for key in vals.keys() {
                assert!(
                    crate::utils::ANALYSIS_KEYS.contains(&key.as_str()),
                    "extra key found: {}",
                    key
                );
            }

            // Every file either expects a malformed profile or says if there is a jet.
            assert!(vals.contains_key("malformed") || vals.contains_key("jet"));

            if vals.get("jet").map(|v| v == "1").unwrap_or(false) {
                for key in &["core level", "core speed", "decrease", "criterion"] {
                    assert!(vals.contains_key(*key), "missing key: {}", key);
                }
            } else if vals.contains_key("jet") {
                assert!(vals.contains_key("reason"), "missing key: reason");
            }
        }
    };
}

#[allow(unused_macros)] // False alarm
macro_rules! test_file {
    ($test_mod_name:ident, $fname:expr) => {
        mod $test_mod_name {
            use crate::utils::{self, jet_tests};

            #[test]
            fn classification() {
                let (profile, _, vals) = utils::load_test_file($fname);
                jet_tests::test_classification(profile, &vals);
            }

            #[test]
            fn classification_is_repeatable() {
                let (profile, _, _) = utils::load_test_file($fname);
                jet_tests::test_repeatable(profile);
            }

            #[test]
            fn stronger_core_never_downgrades() {
                let (_, pairs, _) = utils::load_test_file($fname);
                jet_tests::test_stronger_core_never_downgrades(&pairs);
            }

            #[test]
            fn batch_agrees_with_classifier() {
                let (profile, pairs, _) = utils::load_test_file($fname);
                jet_tests::test_batch_agrees(profile, &pairs);
            }
        }
    };
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn load_test_file(
    fname: &str,
) -> (
    llj_analysis::Result<WindProfile>,
    Vec<(f64, f64)>,
    HashMap<String, String>,
) {
    let mut test_path = PathBuf::new();
    test_path.push("test_data");
    test_path.push(fname);
    load_test_csv_profile(&test_path)
}

#[allow(dead_code)] // False alarm - lint is done before macro expansion.
pub fn approx_equal(tgt: f64, guess: f64, tol: f64) -> bool {
    assert!(tol > 0.0);

    (tgt - guess).abs() <= tol
}

fn load_test_csv_profile(
    location: &PathBuf,
) -> (
    llj_analysis::Result<WindProfile>,
    Vec<(f64, f64)>,
    HashMap<String, String>,
) {
    let mut f = File::open(location).expect(&format!("Error opening file: {:#?}", location));

    let mut contents = String::new();
    f.read_to_string(&mut contents)
        .expect(&format!("Error reading file: {:#?}", location));

    let mut line_iter = contents.lines();

    //
    // Parse profile data
    //
    let mut pairs: Vec<(f64, f64)> = vec![];
    for line in line_iter.by_ref() {
        if line.starts_with("### Analysis Section ###") {
            break;
        }
        if line.starts_with('#') {
            continue;
        }

        let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
        if tokens.len() < 2 {
            continue;
        }

        let p = f64::from_str(tokens[0]).expect("bad pressure");
        let spd = f64::from_str(tokens[1]).expect("bad speed");
        pairs.push((p, spd));
    }

    //
    // Parse the expected analysis
    //
    let mut vals: HashMap<String, String> = HashMap::new();
    for line in line_iter {
        let tokens: Vec<&str> = line.split(',').map(str::trim).collect();
        if tokens.len() < 2 {
            continue;
        }
        vals.insert(tokens[0].to_owned(), tokens[1].to_owned());
    }

    (WindProfile::from_pairs(&pairs), pairs, vals)
}
