use super::*;

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_record_increments_one_cell() {
    let mut m = ConfusionMatrix::default();
    m.record(2, 4).unwrap();
    m.record(2, 4).unwrap();
    assert_eq!(m.cell(2, 4), 2);
    assert_eq!(m.cell(4, 2), 0);
    assert_eq!(m.total(), 2);
    assert_eq!(m.row_sum(2), 2);
    assert_eq!(m.col_sum(4), 2);
}

#[test]
fn test_record_rejects_out_of_range() {
    let mut m = ConfusionMatrix::default();
    assert!(matches!(m.record(6, 0), Err(EvalError::InvalidRating { .. })));
    assert!(matches!(m.record(0, 9), Err(EvalError::InvalidRating { .. })));
    assert_eq!(m.total(), 0);
}

#[test]
fn test_kappa_diagonal_is_one() {
    let mut m = ConfusionMatrix::default();
    for k in [0u8, 1, 2, 3, 4, 5, 5, 3] {
        m.record(k, k).unwrap();
    }
    assert!(approx(m.kappa().unwrap(), 1.0));
}

#[test]
fn test_kappa_empty_is_undefined() {
    let m = ConfusionMatrix::default();
    assert_eq!(m.kappa(), Err(EvalError::DivisionUndefined));
}

#[test]
fn test_kappa_single_category_is_undefined() {
    let mut m = ConfusionMatrix::default();
    m.record(3, 3).unwrap();
    m.record(3, 3).unwrap();
    assert_eq!(m.kappa(), Err(EvalError::DivisionUndefined));
}

#[test]
fn test_kappa_known_value() {
    // 2x2 textbook table: a=20 (0,0), b=5 (0,1), c=10 (1,0), d=15 (1,1).
    let mut m = ConfusionMatrix::default();
    for _ in 0..20 {
        m.record(0, 0).unwrap();
    }
    for _ in 0..5 {
        m.record(0, 1).unwrap();
    }
    for _ in 0..10 {
        m.record(1, 0).unwrap();
    }
    for _ in 0..15 {
        m.record(1, 1).unwrap();
    }
    // po = 0.7, pe = 0.5*0.6 + 0.5*0.4 = 0.5, kappa = 0.4
    assert!(approx(m.kappa().unwrap(), 0.4));
}

#[test]
fn test_kappa_total_disagreement_is_minus_one() {
    let mut m = ConfusionMatrix::default();
    m.record(0, 5).unwrap();
    m.record(5, 0).unwrap();
    assert!(approx(m.kappa().unwrap(), -1.0));
}

#[test]
fn test_kappa_within_bounds() {
    let mut m = ConfusionMatrix::default();
    let pairs = [(0u8, 1u8), (1, 1), (2, 5), (5, 2), (3, 3), (4, 0), (0, 4), (2, 2)];
    for (a, b) in pairs {
        m.record(a, b).unwrap();
        if let Ok(k) = m.kappa() {
            assert!((-1.0..=1.0).contains(&k), "kappa {k} out of range");
        }
    }
}
