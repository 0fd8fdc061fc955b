use super::*;
use serde_json::json;

#[test]
fn test_rating_range() {
    assert_eq!(Rating::new(0).map(Rating::value), Some(0));
    assert_eq!(Rating::new(5).map(Rating::value), Some(5));
    assert!(Rating::new(6).is_none());
}

#[test]
fn test_rating_from_json_accepts_numbers_and_strings() {
    assert_eq!(Rating::from_json("fluency_a", &json!(3)).unwrap().value(), 3);
    assert_eq!(Rating::from_json("fluency_a", &json!("4")).unwrap().value(), 4);
    assert_eq!(Rating::from_json("fluency_a", &json!(" 0 ")).unwrap().value(), 0);
}

#[test]
fn test_rating_from_json_rejects_out_of_range() {
    for bad in [json!(6), json!(-1), json!("9"), json!("good"), json!(2.5), json!(null)] {
        let err = Rating::from_json("adequacy_a", &bad).unwrap_err();
        assert!(matches!(err, EvalError::InvalidRating { .. }), "{bad}");
    }
}

#[test]
fn test_field_key() {
    let svc = Service::new("bing");
    assert_eq!(Dimension::Fluency.field_key(&svc), "fluency_bing");
    assert_eq!(Dimension::Adequacy.field_key(&svc), "adequacy_bing");
}
