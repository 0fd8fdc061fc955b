use super::*;

#[test]
fn test_mean_defined_skips_undefined() {
    assert_eq!(mean_defined([Some(0.5), None, Some(1.0)]), Some(0.75));
    assert_eq!(mean_defined([None, None]), None);
    assert_eq!(mean_defined(Vec::new()), None);
}

#[test]
fn test_agreement_label() {
    assert_eq!(agreement_label(None), "undefined");
    assert_eq!(agreement_label(Some(-0.1)), "poor");
    assert_eq!(agreement_label(Some(0.0)), "slight");
    assert_eq!(agreement_label(Some(0.35)), "fair");
    assert_eq!(agreement_label(Some(0.6)), "moderate");
    assert_eq!(agreement_label(Some(0.75)), "substantial");
    assert_eq!(agreement_label(Some(0.95)), "almost perfect");
}

#[test]
fn test_formatting() {
    assert_eq!(format_kappa(Some(0.5)), "0.500000");
    assert_eq!(format_kappa(None), "undefined");
    assert_eq!(format_score(Some(3.25)), "3.250");
    assert_eq!(format_score(None), "n/a");
}
