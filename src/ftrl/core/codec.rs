//! Model-state codec: the `z`/`n` frame that carries FTRL weights.
//!
//! Purpose
//! -------
//! Convert between the engine's internal weight vectors and the externally
//! visible two-column frame, and act as the only gate through which external
//! data may replace those weights.
//!
//! Key behaviors
//! -------------
//! - [`export_model`] materialises an owned frame with columns `z` and `n`
//!   (`float64`, one row per hash bin). The result is a snapshot; later
//!   training never changes it.
//! - [`validate_model_frame`] checks, in order and failing on the first
//!   violation:
//!   1. `nrows == d` and `ncols == 2` ([`FtrlError::ModelShape`]),
//!   2. names are exactly `["z", "n"]` ([`FtrlError::ModelNames`]),
//!   3. both columns are `float64` ([`FtrlError::ModelTypes`]).
//! - [`import_model`] validates and then returns owned copies of the two
//!   columns, ready to be adopted by the engine.
//!
//! Invariants & assumptions
//! ------------------------
//! - Nothing is handed to the engine unless all three checks passed, so a
//!   rejected frame never partially applies.
//! - Values themselves (NaN, negative `n`) are not inspected; the shape and
//!   typing contract is what the engine relies on.
use ndarray::{Array1, ArrayView1};

use crate::{
    frame::{Column, Frame, SType},
    ftrl::errors::{FtrlError, FtrlResult},
};

/// Required model column names, in order.
pub const MODEL_COLUMNS: [&str; 2] = ["z", "n"];

/// Build the exported model frame from the weight vectors.
pub fn export_model(z: ArrayView1<'_, f64>, n: ArrayView1<'_, f64>) -> FtrlResult<Frame> {
    Ok(Frame::new(vec![
        (MODEL_COLUMNS[0], Column::Float64(z.to_owned())),
        (MODEL_COLUMNS[1], Column::Float64(n.to_owned())),
    ])?)
}

/// Check that `frame` can serve as the model for `d` hash bins.
///
/// Errors
/// ------
/// - `FtrlError::ModelShape` if the frame is not `d × 2`.
/// - `FtrlError::ModelNames` if the columns are not named `z`, `n`.
/// - `FtrlError::ModelTypes` if either column is not `float64`.
pub fn validate_model_frame(frame: &Frame, d: u64) -> FtrlResult<()> {
    let (rows, cols) = frame.shape();
    if rows as u64 != d || cols != MODEL_COLUMNS.len() {
        return Err(FtrlError::ModelShape {
            expected_rows: d,
            expected_cols: MODEL_COLUMNS.len(),
            rows,
            cols,
        });
    }

    if frame.names().iter().map(String::as_str).ne(MODEL_COLUMNS) {
        return Err(FtrlError::ModelNames { received: frame.names().to_vec() });
    }

    let stypes = frame.stypes();
    if stypes.iter().any(|t| *t != SType::Float64) {
        return Err(FtrlError::ModelTypes { received: stypes });
    }

    Ok(())
}

/// Validate `frame` and return owned `(z, n)` vectors.
pub fn import_model(frame: &Frame, d: u64) -> FtrlResult<(Array1<f64>, Array1<f64>)> {
    validate_model_frame(frame, d)?;
    let column = |i: usize| {
        frame
            .column(i)
            .and_then(Column::as_f64)
            .map(|v| v.to_owned())
            .ok_or(FtrlError::ModelTypes { received: frame.stypes() })
    };
    Ok((column(0)?, column(1)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Export shape, names and types.
    // - Acceptance of well-formed frames for d in {0, 1, 1000}.
    // - Each single deviation mapped to its error, and the check order.
    // -------------------------------------------------------------------------

    fn model_frame(d: usize) -> Frame {
        let z: Vec<f64> = (0..d).map(|i| i as f64 * 0.5).collect();
        let n: Vec<f64> = (0..d).map(|i| i as f64).collect();
        Frame::new(vec![("z", Column::from(z)), ("n", Column::from(n))]).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Exported frames have the model shape.
    //
    // Given
    // -----
    // - `z = [1, 2, 3]`, `n = [4, 5, 6]`.
    //
    // Expect
    // ------
    // - A 3×2 frame named `z`, `n`, both `float64`, holding the same values.
    fn export_model_has_model_shape() {
        let z = array![1.0, 2.0, 3.0];
        let n = array![4.0, 5.0, 6.0];

        let frame = export_model(z.view(), n.view()).unwrap();

        assert_eq!(frame.shape(), (3, 2));
        assert_eq!(frame.names(), &["z".to_string(), "n".to_string()]);
        assert_eq!(frame.stypes(), vec![SType::Float64, SType::Float64]);
        assert_eq!(frame.column(1).and_then(Column::as_f64), Some(n.view()));
    }

    #[test]
    // Purpose
    // -------
    // Well-formed frames validate for several `d`, including zero.
    //
    // Given
    // -----
    // - `model_frame(d)` for d in {0, 1, 1000}.
    //
    // Expect
    // ------
    // - `import_model` returns vectors of length `d`.
    fn import_accepts_well_formed_frames() {
        for d in [0usize, 1, 1000] {
            let (z, n) = import_model(&model_frame(d), d as u64).unwrap();
            assert_eq!(z.len(), d);
            assert_eq!(n.len(), d);
        }
    }

    #[test]
    // Purpose
    // -------
    // Wrong row or column counts are shape errors.
    //
    // Given
    // -----
    // - A 5-row frame against d = 4; a 3-column frame against d = 2.
    //
    // Expect
    // ------
    // - `ModelShape` carrying expected and actual dimensions.
    fn wrong_dimensions_are_shape_errors() {
        assert_eq!(
            validate_model_frame(&model_frame(5), 4),
            Err(FtrlError::ModelShape { expected_rows: 4, expected_cols: 2, rows: 5, cols: 2 })
        );

        let wide = Frame::new(vec![
            ("z", Column::from(vec![0.0, 0.0])),
            ("n", Column::from(vec![0.0, 0.0])),
            ("w", Column::from(vec![0.0, 0.0])),
        ])
        .unwrap();
        assert_eq!(
            validate_model_frame(&wide, 2),
            Err(FtrlError::ModelShape { expected_rows: 2, expected_cols: 2, rows: 2, cols: 3 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Swapped or renamed columns are naming errors echoing the names.
    //
    // Given
    // -----
    // - Columns `n`, `z`; columns `z`, `m`.
    //
    // Expect
    // ------
    // - `ModelNames` with the received names.
    fn wrong_names_are_naming_errors() {
        for names in [["n", "z"], ["z", "m"]] {
            let frame = Frame::from_columns(
                names.to_vec(),
                vec![Column::from(vec![0.0]), Column::from(vec![0.0])],
            )
            .unwrap();
            assert_eq!(
                validate_model_frame(&frame, 1),
                Err(FtrlError::ModelNames { received: names.iter().map(|s| s.to_string()).collect() })
            );
        }
    }

    #[test]
    // Purpose
    // -------
    // A non-float64 column is a type error reporting both types.
    //
    // Given
    // -----
    // - `z: float64`, `n: float32`.
    //
    // Expect
    // ------
    // - `ModelTypes { received: [Float64, Float32] }`.
    fn wrong_types_are_type_errors() {
        let frame = Frame::new(vec![
            ("z", Column::from(vec![0.0_f64, 1.0])),
            ("n", Column::from(vec![0.0_f32, 1.0])),
        ])
        .unwrap();

        assert_eq!(
            import_model(&frame, 2),
            Err(FtrlError::ModelTypes { received: vec![SType::Float64, SType::Float32] })
        );
    }

    #[test]
    // Purpose
    // -------
    // Shape is checked before names, names before types.
    //
    // Given
    // -----
    // - A frame with wrong rows, wrong names and wrong types at once; then
    //   the same with the right rows.
    //
    // Expect
    // ------
    // - `ModelShape` first, then `ModelNames`.
    fn checks_run_in_order() {
        let frame = Frame::new(vec![
            ("a", Column::from(vec![1_i64, 2])),
            ("b", Column::from(vec![1_i64, 2])),
        ])
        .unwrap();

        assert!(matches!(validate_model_frame(&frame, 3), Err(FtrlError::ModelShape { .. })));
        assert!(matches!(validate_model_frame(&frame, 2), Err(FtrlError::ModelNames { .. })));
    }
}
