//! Integration tests for the FTRL model boundary.
//!
//! Purpose
//! -------
//! - Validate the end-to-end pipeline: configuration → construction → fit →
//!   predict → model export/import → reset, through the public API only.
//! - Check that every rejected input leaves the model exactly as it was.
//!
//! Coverage
//! --------
//! - `ftrl::FtrlConfig`: keyword mode, aggregate mode and their exclusivity.
//! - `ftrl::FtrlModel`: lifecycle transitions, `set_params`, per-field
//!   setters, `model` / `set_model`.
//! - `ftrl::core::codec`: well-formed and malformed model frames for several
//!   `d`.
//! - `RawBundle::from_json` with `ParamBundle` serialisation.
//!
//! Exclusions
//! ----------
//! - Learning quality and hashing details, covered by unit tests.
//! - The PyO3 layer, which needs a Python interpreter.
use approx::assert_relative_eq;
use rust_ftrl::{
    frame::{Column, Frame, SType},
    ftrl::{
        FtrlConfig, FtrlError, FtrlModel, HashType, LifecycleState, ParamBundle, ParamError,
        RawBundle,
    },
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Three feature columns of mixed types plus a boolean target.
fn training_frame() -> Frame {
    Frame::new(vec![
        ("price", Column::from(vec![1.5, 2.0, 0.5, 3.25, 1.0, 2.5, 0.75, 4.0])),
        ("count", Column::from(vec![3_i64, 1, 4, 1, 5, 9, 2, 6])),
        ("city", Column::from(vec!["oslo", "rome", "oslo", "lima", "rome", "lima", "oslo", "rome"])),
        ("clicked", Column::from(vec![true, false, true, false, false, true, true, false])),
    ])
    .unwrap()
}

fn feature_frame() -> Frame {
    Frame::new(vec![
        ("price", Column::from(vec![1.5, 3.0, 0.5])),
        ("count", Column::from(vec![3_i64, 2, 7])),
        ("city", Column::from(vec!["oslo", "lima", "paris"])),
    ])
    .unwrap()
}

fn model_frame(d: usize) -> Frame {
    let z: Vec<f64> = (0..d).map(|i| (i as f64 - 2.0) * 0.1).collect();
    let n: Vec<f64> = (0..d).map(|i| i as f64 * 0.5).collect();
    Frame::new(vec![("z", Column::from(z)), ("n", Column::from(n))]).unwrap()
}

#[test]
// Purpose
// -------
// The documented usage scenario works end to end.
//
// Given
// -----
// - `d = 50`, `n_epochs = 3`, a frame with 3 features and a target.
//
// Expect
// ------
// - `model()` is a 50×2 float64 frame named `z`, `n`; `predict` returns one
//   column with one probability in (0, 1) per input row.
fn usage_scenario_fits_and_predicts() {
    init_logging();
    let mut model = FtrlModel::new(FtrlConfig::new().d(50).n_epochs(3)).unwrap();
    assert_eq!(model.model(), Ok(None));

    model.fit(&training_frame()).unwrap();

    let exported = model.model().unwrap().unwrap();
    assert_eq!(exported.shape(), (50, 2));
    assert_eq!(exported.names(), &["z".to_string(), "n".to_string()]);
    assert_eq!(exported.stypes(), vec![SType::Float64, SType::Float64]);

    let predictions = model.predict(&feature_frame()).unwrap();
    assert_eq!(predictions.shape(), (3, 1));
    let p = predictions.column(0).and_then(Column::as_f64).unwrap();
    assert!(p.iter().all(|&v| v > 0.0 && v < 1.0), "got {p:?}");
}

#[test]
// Purpose
// -------
// Prediction before training is a state error; a wrong feature count after
// training is a training error.
//
// Given
// -----
// - A fresh model; then the same model after fitting, given 2 of 3 features.
//
// Expect
// ------
// - `NotTrained` with a readable message, then `Training`.
fn predict_requires_training_and_matching_features() {
    let mut model = FtrlModel::new(FtrlConfig::new().d(64)).unwrap();

    let err = model.predict(&feature_frame()).unwrap_err();
    assert_eq!(err, FtrlError::NotTrained { operation: "predict" });
    assert_eq!(err.to_string(), "Cannot predict, because the model was not trained");

    model.fit(&training_frame()).unwrap();
    let two_features = Frame::new(vec![
        ("price", Column::from(vec![1.0])),
        ("count", Column::from(vec![1_i64])),
    ])
    .unwrap();
    assert!(matches!(model.predict(&two_features), Err(FtrlError::Training { .. })));
}

#[test]
// Purpose
// -------
// `reset` clears the model but keeps the parameters.
//
// Given
// -----
// - A fitted model with non-default parameters.
//
// Expect
// ------
// - `model()` is `None`, `params()` unchanged, and refitting works.
fn reset_clears_model_and_keeps_params() {
    init_logging();
    let mut model =
        FtrlModel::new(FtrlConfig::new().a(0.1).l1(0.5).d(32).n_epochs(2).inter(true)).unwrap();
    model.fit(&training_frame()).unwrap();
    let params = model.params();

    model.reset();

    assert_eq!(model.state(), LifecycleState::Untrained);
    assert_eq!(model.model(), Ok(None));
    assert_eq!(model.params(), params);
    model.fit(&training_frame()).unwrap();
    assert_eq!(model.state(), LifecycleState::Trained);
}

#[test]
// Purpose
// -------
// Exported weights move between models without loss.
//
// Given
// -----
// - A fitted model `A` and a fresh model `B` with the same parameters;
//   `B.set_model(A.model())`.
//
// Expect
// ------
// - `B.model()` equals `A.model()` and both predict the same values.
fn exported_model_round_trips_into_fresh_model() {
    let config = || FtrlConfig::new().d(128).n_epochs(4).a(0.2);
    let mut source = FtrlModel::new(config()).unwrap();
    source.fit(&training_frame()).unwrap();
    let weights = source.model().unwrap().unwrap();

    let mut target = FtrlModel::new(config()).unwrap();
    target.set_model(&weights).unwrap();

    assert_eq!(target.state(), LifecycleState::Trained);
    assert_eq!(target.model(), Ok(Some(weights)));

    let expected = source.predict(&feature_frame()).unwrap();
    let actual = target.predict(&feature_frame()).unwrap();
    let expected = expected.column(0).and_then(Column::as_f64).unwrap();
    let actual = actual.column(0).and_then(Column::as_f64).unwrap();
    for (e, a) in expected.iter().zip(actual.iter()) {
        assert_relative_eq!(*e, *a, max_relative = 1e-12);
    }
}

#[test]
// Purpose
// -------
// `set_model` accepts exactly the `d × 2` float64 `z`, `n` frame and
// rejects any single deviation without changing state.
//
// Given
// -----
// - d in {0, 1, 1000}: a valid frame, a frame with one extra row, swapped
//   names, and `n` stored as float32.
//
// Expect
// ------
// - The valid frame round-trips; each deviation fails with its error and
//   the model stays untrained.
fn set_model_validates_structure_for_several_d() {
    for d in [0_usize, 1, 1000] {
        let mut model = FtrlModel::new(FtrlConfig::new().d(d as u64)).unwrap();

        let too_long = model_frame(d + 1);
        let swapped = Frame::from_columns(
            vec!["n", "z"],
            vec![Column::from(vec![0.0; d]), Column::from(vec![0.0; d])],
        )
        .unwrap();
        let float32 = Frame::new(vec![
            ("z", Column::from(vec![0.0_f64; d])),
            ("n", Column::from(vec![0.0_f32; d])),
        ])
        .unwrap();

        assert!(matches!(model.set_model(&too_long), Err(FtrlError::ModelShape { .. })));
        assert!(matches!(model.set_model(&swapped), Err(FtrlError::ModelNames { .. })));
        assert_eq!(
            model.set_model(&float32),
            Err(FtrlError::ModelTypes { received: vec![SType::Float64, SType::Float32] })
        );
        assert_eq!(model.state(), LifecycleState::Untrained);
        assert_eq!(model.model(), Ok(None));

        let valid = model_frame(d);
        model.set_model(&valid).unwrap();
        assert_eq!(model.model(), Ok(Some(valid)));
    }
}

#[test]
// Purpose
// -------
// The aggregate bundle and individual keywords are mutually exclusive, and
// the bundle must be exactly the seven bundle fields.
//
// Given
// -----
// - A full bundle plus `d`; a bundle with `seed`; a bundle without `inter`;
//   a full bundle alone; a bundle plus a `None` keyword.
//
// Expect
// ------
// - `ConflictingConfig`, `UnknownField`, `MissingField`, then success twice.
fn construction_modes_are_exclusive() {
    let bundle = RawBundle::from(ParamBundle { d: 20, n_epochs: 2, ..ParamBundle::default() });

    assert_eq!(
        FtrlModel::new(FtrlConfig::new().params(bundle.clone()).d(10)).unwrap_err(),
        FtrlError::ConflictingConfig { fields: vec!["d"] }
    );
    assert_eq!(
        FtrlModel::new(FtrlConfig::new().params(bundle.clone().with("seed", 1))).unwrap_err(),
        FtrlError::Param(ParamError::UnknownField { field: "seed".to_string() })
    );

    let without_inter: RawBundle = ParamBundle::FIELDS
        .iter()
        .filter(|&&f| f != "inter")
        .map(|&f| (f, bundle.get(f).cloned().unwrap()))
        .collect();
    assert_eq!(
        FtrlModel::new(FtrlConfig::new().params(without_inter)).unwrap_err(),
        FtrlError::Param(ParamError::MissingField { field: "inter" })
    );

    let model = FtrlModel::new(FtrlConfig::new().params(bundle.clone())).unwrap();
    assert_eq!(model.d(), 20);
    assert_eq!(model.hash_type(), HashType::Murmur2);

    let model = FtrlModel::new(FtrlConfig::new().params(bundle).seed(None::<i64>)).unwrap();
    assert_eq!(model.n_epochs(), 2);
}

#[test]
// Purpose
// -------
// Every hash type trains and predicts; invalid codes are rejected.
//
// Given
// -----
// - `hash_type` in {0, 1, 2} with `seed = 3`; then 3 and -1.
//
// Expect
// ------
// - Valid codes map to `Std`, `Murmur2`, `Murmur3` and give a 3×1
//   prediction; invalid codes are range errors at construction and via the
//   setter.
fn hash_types_train_and_invalid_codes_fail() {
    let expected = [HashType::Std, HashType::Murmur2, HashType::Murmur3];
    for (code, hash_type) in expected.into_iter().enumerate() {
        let config = FtrlConfig::new().d(40).hash_type(code as i64).seed(3).inter(true);
        let mut model = FtrlModel::new(config).unwrap();
        assert_eq!(model.hash_type(), hash_type);

        model.fit(&training_frame()).unwrap();
        assert_eq!(model.predict(&feature_frame()).unwrap().shape(), (3, 1));
    }

    for bad in [3_i64, -1] {
        assert!(matches!(
            FtrlModel::new(FtrlConfig::new().hash_type(bad)),
            Err(FtrlError::Param(ParamError::OutOfRange { field: "hash_type", .. }))
        ));
    }

    let mut model = FtrlModel::new(FtrlConfig::new().d(8)).unwrap();
    assert!(model.set_hash_type(7).is_err());
    assert_eq!(model.hash_type(), HashType::Murmur2);
}

#[test]
// Purpose
// -------
// Negative integers are rejected per field and the prior value survives.
//
// Given
// -----
// - `d = 16`, `n_epochs = 2`, `seed = 4`; then setters with -1 and a seed
//   above 32 bits.
//
// Expect
// ------
// - `OutOfRange` naming the field and echoing the value; getters unchanged.
fn negative_integers_keep_prior_values() {
    let mut model = FtrlModel::new(FtrlConfig::new().d(16).n_epochs(2).seed(4)).unwrap();

    assert_eq!(
        model.set_d(-1).unwrap_err().to_string(),
        "`d` cannot be negative; got: -1"
    );
    assert!(matches!(model.set_n_epochs(-1), Err(ParamError::OutOfRange { field: "n_epochs", .. })));
    assert!(matches!(model.set_seed(-1), Err(ParamError::OutOfRange { field: "seed", .. })));
    assert!(matches!(
        model.set_seed(1_i64 << 32),
        Err(ParamError::OutOfRange { field: "seed", .. })
    ));

    assert_eq!((model.d(), model.n_epochs(), model.seed()), (16, 2, 4));
}

#[test]
// Purpose
// -------
// Parameters survive a JSON round trip and feed back into `set_params`.
//
// Given
// -----
// - A model's `params()` serialised with `serde_json`, parsed back with
//   `RawBundle::from_json` and applied to a default model.
//
// Expect
// ------
// - Both models report the same bundle; malformed JSON is `Malformed`.
fn params_round_trip_through_json() {
    let source = FtrlModel::new(FtrlConfig::new().a(0.25).l2(2.0).d(30).inter(true)).unwrap();
    let json = serde_json::to_string(&source.params()).unwrap();

    let mut target: FtrlModel = FtrlModel::default();
    target.set_params(&RawBundle::from_json(&json).unwrap()).unwrap();

    assert_eq!(target.params(), source.params());
    assert_relative_eq!(target.a(), 0.25);
    assert!(matches!(RawBundle::from_json("{"), Err(ParamError::Malformed { .. })));
}

#[test]
// Purpose
// -------
// `d` has no upper bound: huge values are accepted at construction and by
// the setter, and only training reports that the bins cannot be allocated.
//
// Given
// -----
// - A model built with `d = u64::MAX`; a trained model switched to
//   `d = 2^61` with `set_d`, then fitted again.
//
// Expect
// ------
// - No panic; both models are `Untrained` with the requested `d`; the fit
//   fails with `Training` and the model stays `Untrained`.
fn huge_d_is_accepted_until_training() {
    init_logging();
    let huge = FtrlModel::new(FtrlConfig::new().d(u64::MAX)).unwrap();
    assert_eq!((huge.d(), huge.state()), (u64::MAX, LifecycleState::Untrained));

    let mut model = FtrlModel::new(FtrlConfig::new().d(32)).unwrap();
    model.fit(&training_frame()).unwrap();
    model.set_d(1_i64 << 61).unwrap();
    assert_eq!((model.d(), model.state()), (1 << 61, LifecycleState::Untrained));

    match model.fit(&training_frame()) {
        Err(FtrlError::Training { reason }) => assert!(reason.contains("2305843009213693952"), "{reason}"),
        other => panic!("expected Training error, got {other:?}"),
    }
    assert_eq!(model.state(), LifecycleState::Untrained);
}

#[test]
// Purpose
// -------
// Unsigned fields keep values above `i64::MAX` exactly and reject wider
// integers with the exact value in the message.
//
// Given
// -----
// - `n_epochs = u64::MAX` via the config and the setter; a JSON bundle with
//   `d = 18446744073709551615`; `set_d(2^70)` and `set_n_epochs(-2^70)`.
//
// Expect
// ------
// - Getters return `u64::MAX`; the wider values are `OutOfRange` and leave
//   the prior values in place.
fn unsigned_extremes_are_kept_exactly() {
    let mut model = FtrlModel::new(FtrlConfig::new().n_epochs(u64::MAX)).unwrap();
    assert_eq!(model.n_epochs(), u64::MAX);

    model.set_n_epochs(3).unwrap();
    model.set_n_epochs(u64::MAX).unwrap();
    assert_eq!(model.n_epochs(), u64::MAX);

    let json = r#"{"a": 0.5, "b": 1, "l1": 0, "l2": 1, "d": 18446744073709551615,
                   "n_epochs": 18446744073709551615, "inter": false}"#;
    model.set_params(&RawBundle::from_json(json).unwrap()).unwrap();
    assert_eq!((model.d(), model.n_epochs()), (u64::MAX, u64::MAX));

    assert_eq!(
        model.set_d(1_i128 << 70).unwrap_err().to_string(),
        "`d` must fit in 64 bits; got: 1180591620717411303424"
    );
    assert!(matches!(
        model.set_n_epochs(-(1_i128 << 70)),
        Err(ParamError::OutOfRange { field: "n_epochs", .. })
    ));
    assert_eq!((model.d(), model.n_epochs()), (u64::MAX, u64::MAX));
}
