use crate::detector::Detector;
use crate::error::EngineError;
use crate::evaluate::{
    build_scatterer, evaluate, evaluate_coefficients, evaluate_coupling, evaluate_far_field,
};
use crate::geometry::{RefractiveIndex, ScattererGeometry, ScattererOptics};
use crate::measure::Measure;
use crate::source::OpticalSource;

fn sphere_point() -> (ScattererGeometry, ScattererOptics, OpticalSource) {
    (
        ScattererGeometry::Sphere { diameter: 800e-9 },
        ScattererOptics {
            core: RefractiveIndex::real(1.5).unwrap(),
            shell: None,
            medium: 1.0,
        },
        OpticalSource::plane_wave(632.8e-9, 0.0, 1.0).unwrap(),
    )
}

#[test]
fn end_to_end_sphere_qsca() {
    let (geometry, optics, source) = sphere_point();
    let qsca = evaluate(&geometry, &optics, &source, Measure::Qsca).unwrap();
    let reference = 4.049_628_722_290;
    assert!((qsca - reference).abs() / reference < 1e-6, "Qsca = {qsca}");
    assert!(qsca > 0.0 && qsca < 5.0);
}

#[test]
fn evaluate_supports_every_sphere_measure() {
    let (geometry, optics, source) = sphere_point();
    for m in Measure::ALL {
        if m.needs_detector() {
            continue;
        }
        let value = evaluate(&geometry, &optics, &source, m).unwrap();
        assert!(value.is_finite(), "{m} returned {value}");
    }
}

#[test]
fn coupling_requires_the_dedicated_entry_point() {
    let (geometry, optics, source) = sphere_point();
    assert!(matches!(
        evaluate(&geometry, &optics, &source, Measure::Coupling),
        Err(EngineError::UnsupportedMeasure(_))
    ));
    let detector = Detector::new(200, 0.2, 0.0, 0.0, None, false).unwrap();
    let power = evaluate_coupling(&geometry, &optics, &source, &detector).unwrap();
    assert!(power.is_finite() && power > 0.0);
}

#[test]
fn far_field_returns_one_amplitude_pair_per_angle() {
    let (geometry, optics, source) = sphere_point();
    let angles: Vec<f64> = (0..50).map(|i| i as f64 * 0.06).collect();
    let pair = evaluate_far_field(&geometry, &optics, &source, &angles).unwrap();
    assert_eq!(pair.s1.len(), angles.len());
    assert_eq!(pair.s2.len(), angles.len());
}

#[test]
fn coefficient_entry_point_honours_order_override() {
    let (geometry, optics, source) = sphere_point();
    let (a, b) = evaluate_coefficients(&geometry, &optics, &source, 0).unwrap();
    assert_eq!(a.len(), 12);
    assert_eq!(b.len(), 12);
    let (a5, _) = evaluate_coefficients(&geometry, &optics, &source, 5).unwrap();
    assert_eq!(a5.len(), 5);
}

#[test]
fn coreshell_requires_a_shell_index() {
    let source = OpticalSource::plane_wave(632.8e-9, 0.0, 1.0).unwrap();
    let geometry = ScattererGeometry::CoreShell {
        core_diameter: 400e-9,
        shell_width: 200e-9,
    };
    let optics = ScattererOptics {
        core: RefractiveIndex::real(1.4).unwrap(),
        shell: None,
        medium: 1.0,
    };
    assert!(matches!(
        evaluate(&geometry, &optics, &source, Measure::Qsca),
        Err(EngineError::Validation(_))
    ));
}

#[test]
fn coreshell_point_matches_reference() {
    let source = OpticalSource::plane_wave(632.8e-9, 0.0, 1.0).unwrap();
    let geometry = ScattererGeometry::CoreShell {
        core_diameter: 400e-9,
        shell_width: 200e-9,
    };
    let optics = ScattererOptics {
        core: RefractiveIndex::real(1.4).unwrap(),
        shell: Some(RefractiveIndex::real(1.6).unwrap()),
        medium: 1.0,
    };
    let qsca = evaluate(&geometry, &optics, &source, Measure::Qsca).unwrap();
    let reference = 4.639_205_790_332;
    assert!((qsca - reference).abs() / reference < 1e-9);
}

#[test]
fn cylinder_point_uses_the_jones_merge() {
    let source = OpticalSource::plane_wave(632.8e-9, 0.0, 1.0).unwrap();
    let geometry = ScattererGeometry::Cylinder { diameter: 800e-9 };
    let optics = ScattererOptics {
        core: RefractiveIndex::real(1.5).unwrap(),
        shell: None,
        medium: 1.0,
    };
    let qsca = evaluate(&geometry, &optics, &source, Measure::Qsca).unwrap();
    assert!((qsca - 3.758_763_221_277_04).abs() < 1e-8);
}

#[test]
fn source_round_trips_through_serde() {
    let source = OpticalSource::gaussian(632.8e-9, 0.3, 1e-3, 0.2).unwrap();
    let json = serde_json::to_string(&source).unwrap();
    let back: OpticalSource = serde_json::from_str(&json).unwrap();
    assert_eq!(back, source);
    assert_eq!(back.jones, source.jones);
}

#[test]
fn invalid_points_fail_before_any_computation() {
    let (_, optics, source) = sphere_point();
    let bad = ScattererGeometry::Sphere { diameter: 0.0 };
    assert!(matches!(
        build_scatterer(&bad, &optics, &source),
        Err(EngineError::Validation(_))
    ));
    let bad_medium = ScattererOptics {
        medium: -1.0,
        ..optics
    };
    let geometry = ScattererGeometry::Sphere { diameter: 800e-9 };
    assert!(matches!(
        build_scatterer(&geometry, &bad_medium, &source),
        Err(EngineError::Validation(_))
    ));
}
