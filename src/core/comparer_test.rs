use proptest::prelude::*;

use super::scripts_changed;

const SCRIPT_A: &str = r#"<script src="a.js"></script>"#;
const SCRIPT_B: &str = r#"<script src="b.js"></script>"#;
const SCRIPT_C: &str = r#"<script src="c.js"></script>"#;
const SCRIPT_A_MODIFIED: &str = r#"<script src="a.js?v=2"></script>"#;

const EMPTY: [&str; 0] = [];

#[test]
fn identical_snapshots_are_unchanged() {
    assert!(!scripts_changed(&[SCRIPT_A, SCRIPT_B], &[SCRIPT_A, SCRIPT_B]));
}

#[test]
fn two_empty_snapshots_are_unchanged() {
    assert!(!scripts_changed(&EMPTY, &EMPTY));
}

#[test]
fn added_script_is_a_change() {
    assert!(scripts_changed(&[SCRIPT_A, SCRIPT_B], &[SCRIPT_A, SCRIPT_B, SCRIPT_C]));
}

#[test]
fn removed_script_is_a_change() {
    assert!(scripts_changed(&[SCRIPT_A, SCRIPT_B, SCRIPT_C], &[SCRIPT_A, SCRIPT_B]));
}

#[test]
fn modified_script_is_a_change() {
    assert!(scripts_changed(&[SCRIPT_A, SCRIPT_B], &[SCRIPT_A_MODIFIED, SCRIPT_B]));
}

#[test]
fn completely_different_scripts_are_a_change() {
    assert!(scripts_changed(&[SCRIPT_A, SCRIPT_B], &[SCRIPT_C, SCRIPT_A_MODIFIED]));
}

#[test]
fn reordering_is_not_a_change() {
    assert!(!scripts_changed(&[SCRIPT_A, SCRIPT_B], &[SCRIPT_B, SCRIPT_A]));
}

#[test]
fn duplicate_counts_are_ignored() {
    assert!(!scripts_changed(&[SCRIPT_A, SCRIPT_A, SCRIPT_B], &[SCRIPT_B, SCRIPT_A]));
}

#[test]
fn emptying_or_filling_a_snapshot_is_a_change() {
    assert!(scripts_changed(&[SCRIPT_A], &EMPTY));
    assert!(scripts_changed(&EMPTY, &["x"]));
}

#[test]
fn owned_and_borrowed_snapshots_compare() {
    let stored: Vec<String> = vec![SCRIPT_A.to_string(), SCRIPT_B.to_string()];
    assert!(!scripts_changed(&stored, &[SCRIPT_B, SCRIPT_A]));
}

fn snapshot() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[abc]{0,2}", 0..6)
}

proptest! {
    #[test]
    fn snapshot_never_differs_from_itself(a in snapshot()) {
        prop_assert!(!scripts_changed(&a, &a));
    }

    #[test]
    fn comparison_is_symmetric(a in snapshot(), b in snapshot()) {
        prop_assert_eq!(scripts_changed(&a, &b), scripts_changed(&b, &a));
    }

    #[test]
    fn duplicating_an_element_never_matters(a in snapshot(), b in snapshot(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!a.is_empty());
        let mut padded = a.clone();
        padded.push(a[pick.index(a.len())].clone());
        prop_assert_eq!(scripts_changed(&a, &b), scripts_changed(&padded, &b));
    }
}
