//! Integration tests for mrio-model
//!
//! These tests drive the builders end-to-end against in-memory fixture
//! sources with closed-form component values, so every derived quantity can
//! be checked exactly.

use std::collections::BTreeSet;

use mrio_model::schema::{EE_REGIONS, FINAL_DEMAND_CATEGORIES, SECTORS, TRAILING_ROWS};
use mrio_model::{EeModel, EeTable, ModelError, MrioModel, RowLabels, TabularSource};
use scirs2_core::ndarray_ext::Array2;

/// A uniform MRIO economy with closed-form derived quantities:
/// every flow is 0.5, every output 70, every factor input 1. The
/// coefficient matrix is then `J/140` (J all-ones) and the Leontief inverse
/// has the closed form `I + J/(140 − G·N)`.
struct FixtureSource {
    regions: usize,
}

impl TabularSource for FixtureSource {
    fn years(&self) -> BTreeSet<i32> {
        [2005, 2011].into_iter().collect()
    }

    fn fetch_mrio(&self, _year: i32) -> mrio_model::ModelResult<Array2<f64>> {
        let pairs = self.regions * SECTORS;
        let nrows = pairs + TRAILING_ROWS;
        let ncols = pairs + self.regions * FINAL_DEMAND_CATEGORIES + 1;
        Ok(Array2::from_shape_fn((nrows, ncols), |(i, j)| {
            if i == nrows - 1 {
                70.0 // total-output row
            } else if i >= pairs {
                1.0 // factor-input rows
            } else if j < pairs {
                0.5 // intermediate flows
            } else if j < ncols - 1 {
                2.0 // final demand
            } else {
                0.0 // total-output column, unused by the builder
            }
        }))
    }

    fn fetch_ee(&self, _year: i32, by: &[String]) -> mrio_model::ModelResult<EeTable> {
        let pairs = EE_REGIONS * SECTORS;
        let nrows = if by.is_empty() { 1 } else { 2 };
        let data = Array2::from_shape_fn((nrows, pairs + 3), |(i, j)| {
            (i + 1) as f64 * if j < pairs { 1.0 } else { 2.0 }
        });
        let rows = if by.is_empty() {
            Vec::new()
        } else {
            vec![
                vec!["CH4".to_string(); by.len()],
                vec!["CO2".to_string(); by.len()],
            ]
        };
        Ok(EeTable { rows, data })
    }
}

/// A source whose table is one column short of the documented layout.
struct TruncatedSource;

impl TabularSource for TruncatedSource {
    fn years(&self) -> BTreeSet<i32> {
        [2011].into_iter().collect()
    }

    fn fetch_mrio(&self, _year: i32) -> mrio_model::ModelResult<Array2<f64>> {
        let pairs = SECTORS;
        let nrows = pairs + TRAILING_ROWS;
        let ncols = pairs + FINAL_DEMAND_CATEGORIES; // missing the output column
        Ok(Array2::zeros((nrows, ncols)))
    }

    fn fetch_ee(&self, _year: i32, _by: &[String]) -> mrio_model::ModelResult<EeTable> {
        Ok(EeTable {
            rows: Vec::new(),
            data: Array2::zeros((1, 10)), // far too narrow for the emission block
        })
    }
}

#[test]
fn test_year_validation() {
    let source = FixtureSource { regions: 1 };
    let err = MrioModel::from_source(&source, 1999).unwrap_err();
    match err {
        ModelError::InvalidYear { year, available } => {
            assert_eq!(year, 1999);
            assert_eq!(available, vec![2005, 2011]);
        }
        other => panic!("expected InvalidYear, got {other}"),
    }
}

#[test]
fn test_component_extraction() {
    let source = FixtureSource { regions: 2 };
    let model = MrioModel::from_source(&source, 2011).unwrap();
    let pairs = 2 * SECTORS;

    assert_eq!(model.year, 2011);
    assert_eq!(model.schema.regions, 2);
    assert_eq!(model.x.shape(), &[pairs]);
    assert_eq!(model.z.shape(), &[pairs, pairs]);
    assert_eq!(model.y_big.shape(), &[pairs, 2 * FINAL_DEMAND_CATEGORIES]);
    assert_eq!(model.y.shape(), &[pairs, 2]);
    assert_eq!(model.va.shape(), &[pairs]);
    assert!(model.leontief.is_none());

    assert_eq!(model.x[&[0]], 70.0);
    assert_eq!(model.z[&[3, 68]], 0.5);
    assert_eq!(model.y_big[&[0, 9]], 2.0);
    // Six factor rows of ones sum to 6.
    assert_eq!(model.va[&[pairs - 1]], 6.0);
    // Five categories of 2 collapse to 10 per region column.
    assert_eq!(model.y[&[0, 0]], 10.0);
    assert_eq!(model.y[&[pairs - 1, 1]], 10.0);
}

#[test]
fn test_full_derivation_closed_form() {
    let source = FixtureSource { regions: 1 };
    let model = MrioModel::from_source_full(&source, 2005).unwrap();
    let leontief = model.leontief.as_ref().expect("full derivation requested");
    let dim = SECTORS;

    // v = va / x = 6/70 everywhere.
    assert!((leontief.v[&[0]] - 6.0 / 70.0).abs() < 1e-12);

    // A = 0.5/70 = 1/140 everywhere.
    for &idx in &[[0usize, 0usize], [7, 20], [34, 34]] {
        assert!((leontief.a[&idx[..]] - 1.0 / 140.0).abs() < 1e-12);
    }

    // For A = J/140 the Leontief inverse is I + J/(140 − dim).
    let off = 1.0 / (140.0 - dim as f64);
    for r in 0..dim {
        for c in 0..dim {
            let expected = if r == c { 1.0 + off } else { off };
            assert!(
                (leontief.b[&[r, c]] - expected).abs() < 1e-9,
                "B[{}, {}] = {}",
                r,
                c,
                leontief.b[&[r, c]]
            );
        }
    }
}

#[test]
fn test_leontief_identity_recovery() {
    let source = FixtureSource { regions: 2 };
    let model = MrioModel::from_source_full(&source, 2011).unwrap();
    let leontief = model.leontief.as_ref().unwrap();
    let dim = 2 * SECTORS;

    let identity = mrio_core::BlockMatrix::identity(dim, 2, SECTORS);
    let product = leontief
        .a
        .sub_from(&identity)
        .unwrap()
        .matmul(&leontief.b)
        .unwrap();
    for r in 0..dim {
        for c in 0..dim {
            let expected = if r == c { 1.0 } else { 0.0 };
            assert!((product[&[r, c]] - expected).abs() < 1e-9);
        }
    }
}

#[test]
fn test_schema_mismatch_fails_fast() {
    let err = MrioModel::from_source(&TruncatedSource, 2011).unwrap_err();
    assert!(matches!(err, ModelError::SchemaMismatch { .. }));
}

#[test]
fn test_ee_total_row() {
    let source = FixtureSource { regions: 1 };
    let model = EeModel::from_source(&source, 2011, &[]).unwrap();
    let pairs = EE_REGIONS * SECTORS;

    assert_eq!(model.rows, RowLabels::Total);
    assert_eq!(model.e.shape(), &[1, pairs]);
    assert_eq!(model.ef.shape(), &[1, 3]);
    assert_eq!(model.e[&[0, 0]], 1.0);
    assert_eq!(model.e[&[0, pairs - 1]], 1.0);
    assert_eq!(model.ef[&[0, 2]], 2.0);
}

#[test]
fn test_ee_grouped_rows() {
    let source = FixtureSource { regions: 1 };
    let by = vec!["gas".to_string()];
    let model = EeModel::from_source(&source, 2005, &by).unwrap();

    match &model.rows {
        RowLabels::Groups(groups) => {
            assert_eq!(groups.len(), 2);
            assert_eq!(groups[0], vec!["CH4".to_string()]);
            assert_eq!(groups[1], vec!["CO2".to_string()]);
        }
        RowLabels::Total => panic!("expected grouped rows"),
    }
    assert_eq!(model.e.shape()[0], 2);
    // Second group row carries doubled values in the fixture.
    assert_eq!(model.e[&[1, 0]], 2.0);
    assert_eq!(model.ef[&[1, 0]], 4.0);
}

#[test]
fn test_ee_rejects_narrow_table() {
    let err = EeModel::from_source(&TruncatedSource, 2011, &[]).unwrap_err();
    assert!(matches!(err, ModelError::EntityColumns { .. }));
}

#[test]
fn test_ee_year_validation() {
    let source = FixtureSource { regions: 1 };
    assert!(matches!(
        EeModel::from_source(&source, 1990, &[]),
        Err(ModelError::InvalidYear { .. })
    ));
}
