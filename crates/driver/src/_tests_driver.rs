use miekit_core::Measure;

use crate::config::SweepConfig;
use crate::driver::{BatchDriver, DriverError};
use crate::expansion::{column_names, expand_jobs, expand_sequential, sweep_axes};

fn sphere_sweep(diameters: &str, indices: &str) -> SweepConfig {
    SweepConfig::from_toml(&format!(
        r#"
        [source]
        wavelength = [632.8e-9]
        polarization = [0.0]
        amplitude = 1.0

        [scatterer]
        kind = "sphere"
        diameter = {diameters}
        index = {indices}
        medium = [1.0]
        "#
    ))
    .unwrap()
}

#[test]
fn axes_follow_declaration_order() {
    let config = sphere_sweep("[4.0e-7, 8.0e-7]", "[{ re = 1.4 }, { re = 1.5 }, { re = 1.6 }]");
    let axes = sweep_axes(&config);
    let names: Vec<&str> = axes.iter().map(|a| a.name).collect();
    assert_eq!(
        names,
        ["wavelength", "polarization", "diameter", "index", "medium"]
    );
    let lens: Vec<usize> = axes.iter().map(|a| a.len).collect();
    assert_eq!(lens, [1, 1, 2, 3, 1]);
    assert_eq!(
        column_names(&config),
        ["wavelength", "polarization", "diameter", "index_re", "index_im", "medium"]
    );
}

#[test]
fn cartesian_product_is_row_major() {
    let config = sphere_sweep(
        "[1.0e-7, 2.0e-7, 3.0e-7]",
        "[{ re = 1.4 }, { re = 1.5 }, { re = 1.6 }, { re = 1.7 }, { re = 1.8 }]",
    );
    let jobs = expand_jobs(&config).unwrap();
    assert_eq!(jobs.len(), 15);
    // Last axis (before the length-1 medium) varies fastest: the first
    // five jobs share the first diameter and walk the index axis.
    for (i, job) in jobs.iter().enumerate() {
        assert_eq!(job.index, i);
        let expected_diameter = [1.0e-7, 2.0e-7, 3.0e-7][i / 5];
        let expected_re = [1.4, 1.5, 1.6, 1.7, 1.8][i % 5];
        assert_eq!(job.values[2], expected_diameter);
        assert_eq!(job.values[3], expected_re);
    }
}

#[test]
fn empty_axis_short_circuits_to_zero_jobs() {
    let config = sphere_sweep("[]", "[{ re = 1.5 }]");
    assert_eq!(expand_jobs(&config).unwrap().len(), 0);
    let driver = BatchDriver::new(config, Some(2)).unwrap().quiet(true);
    let result = driver.run(Measure::Qsca).unwrap();
    assert!(result.values.is_empty());
    assert_eq!(result.stats.total_jobs, 0);
}

#[test]
fn batch_shape_matches_axis_lengths() {
    let config = sphere_sweep(
        "[1.0e-7, 2.0e-7, 3.0e-7]",
        "[{ re = 1.4 }, { re = 1.5 }, { re = 1.6 }, { re = 1.7 }, { re = 1.8 }]",
    );
    let driver = BatchDriver::new(config, Some(2)).unwrap().quiet(true);
    let result = driver.run(Measure::Qsca).unwrap();
    assert_eq!(result.shape, [1, 1, 3, 5, 1]);
    assert_eq!(result.values.len(), 15);
    assert_eq!(result.rows.len(), 15);
    assert_eq!(result.stats.completed, 15);
    assert_eq!(result.stats.failed, 0);
    for value in &result.values {
        assert!(value.is_finite() && *value > 0.0);
    }
}

#[test]
fn batch_values_land_in_axis_determined_slots() {
    // A 1-D sweep must reproduce single-point evaluations in order.
    let config = sphere_sweep("[2.0e-7, 4.0e-7, 8.0e-7]", "[{ re = 1.5 }]");
    let driver = BatchDriver::new(config, Some(4)).unwrap().quiet(true);
    let result = driver.run(Measure::Qsca).unwrap();
    for (row, value) in result.rows.iter().zip(result.values.iter()) {
        let single = sphere_sweep(&format!("[{}]", row[2]), "[{ re = 1.5 }]");
        let single_result = BatchDriver::new(single, Some(1))
            .unwrap()
            .quiet(true)
            .run(Measure::Qsca)
            .unwrap();
        assert_eq!(*value, single_result.values[0]);
    }
}

#[test]
fn sequential_mode_zips_axes() {
    let config = sphere_sweep(
        "[1.0e-7, 2.0e-7, 3.0e-7]",
        "[{ re = 1.4 }, { re = 1.5 }, { re = 1.6 }]",
    );
    let jobs = expand_sequential(&config).unwrap();
    assert_eq!(jobs.len(), 3);
    assert_eq!(jobs[1].values[2], 2.0e-7);
    assert_eq!(jobs[1].values[3], 1.5);

    let driver = BatchDriver::new(config, Some(2)).unwrap().quiet(true);
    let result = driver.run_sequential(Measure::Qext).unwrap();
    assert_eq!(result.shape, [3]);
    assert_eq!(result.values.len(), 3);
}

#[test]
fn sequential_mode_rejects_mismatched_lengths() {
    let config = sphere_sweep("[1.0e-7, 2.0e-7]", "[{ re = 1.4 }, { re = 1.5 }, { re = 1.6 }]");
    assert!(matches!(
        expand_sequential(&config),
        Err(DriverError::ConfigError(_))
    ));
}

#[test]
fn coupling_without_detector_fails_before_any_job() {
    let config = sphere_sweep("[8.0e-7]", "[{ re = 1.5 }]");
    let driver = BatchDriver::new(config, Some(1)).unwrap().quiet(true);
    assert!(matches!(
        driver.run(Measure::Coupling),
        Err(DriverError::UnsupportedMeasure(_))
    ));
}

#[test]
fn cylinder_sweep_rejects_backscatter_measures() {
    let config = SweepConfig::from_toml(
        r#"
        [source]
        wavelength = [632.8e-9]
        polarization = [0.0]
        amplitude = 1.0

        [scatterer]
        kind = "cylinder"
        diameter = [8.0e-7]
        index = [{ re = 1.5 }]
        medium = [1.0]
        "#,
    )
    .unwrap();
    let driver = BatchDriver::new(config, Some(1)).unwrap().quiet(true);
    assert!(matches!(
        driver.run(Measure::Qback),
        Err(DriverError::UnsupportedMeasure(_))
    ));
    assert!(driver.run(Measure::Qsca).is_ok());
}

#[test]
fn detector_sweep_produces_coupling_values() {
    let config = SweepConfig::from_toml(
        r#"
        [source]
        wavelength = [632.8e-9]
        polarization = [0.0]
        optical_power = 1.0e-3
        numerical_aperture = 0.1

        [scatterer]
        kind = "sphere"
        diameter = [8.0e-7]
        index = [{ re = 1.5 }]
        medium = [1.0]

        [detector]
        sampling = 100
        numerical_aperture = [0.2, 0.4]
        phi_offset = [0.0]
        gamma_offset = [0.0, 0.5, 1.0]
        "#,
    )
    .unwrap();
    let driver = BatchDriver::new(config, Some(2)).unwrap().quiet(true);
    assert_eq!(driver.job_count(), 6);
    let result = driver.run(Measure::Coupling).unwrap();
    assert_eq!(result.shape, [1, 1, 1, 1, 1, 2, 1, 3]);
    for value in &result.values {
        assert!(value.is_finite() && *value > 0.0);
    }
}

#[test]
fn bad_points_report_errors_without_aborting() {
    // The second diameter is invalid; its slot must be NaN while the
    // others complete.
    let config = sphere_sweep("[2.0e-7, -1.0, 8.0e-7]", "[{ re = 1.5 }]");
    let driver = BatchDriver::new(config, Some(2)).unwrap().quiet(true);
    let result = driver.run(Measure::Qsca).unwrap();
    assert_eq!(result.stats.completed, 2);
    assert_eq!(result.stats.failed, 1);
    assert_eq!(result.stats.errors[0].index, 1);
    assert!(result.values[1].is_nan());
    assert!(result.values[0].is_finite() && result.values[2].is_finite());
}

#[test]
fn source_amplitude_configuration_is_validated() {
    let toml = r#"
        [source]
        wavelength = [632.8e-9]
        polarization = [0.0]

        [scatterer]
        kind = "sphere"
        diameter = [8.0e-7]
        index = [{ re = 1.5 }]
        medium = [1.0]
    "#;
    assert!(matches!(
        SweepConfig::from_toml(toml),
        Err(DriverError::ConfigError(_))
    ));
}
