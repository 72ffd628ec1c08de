//! Multi-threaded sweep driver.
//!
//! Runs expanded evaluation points on a rayon pool, collects per-point
//! values into a dense row-major array, and reports failures without
//! aborting the rest of the sweep.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, warn};
use parking_lot::Mutex;
use rayon::prelude::*;
use thiserror::Error;

use miekit_core::evaluate::{evaluate, evaluate_coupling};
use miekit_core::Measure;

use crate::config::SweepConfig;
use crate::expansion::{
    column_names, expand_jobs, expand_sequential, sweep_axes, ExpandedJob, SweepAxis,
};

/// Error during a single point evaluation.
#[derive(Debug, Clone)]
pub struct JobError {
    /// Row-major index of the failed point.
    pub index: usize,
    pub message: String,
}

/// Driver-level failure.
#[derive(Debug, Error)]
pub enum DriverError {
    #[error("failed to create thread pool: {0}")]
    ThreadPoolError(String),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("unsupported measure: {0}")]
    UnsupportedMeasure(String),
}

/// Execution statistics for a completed sweep.
#[derive(Debug, Default)]
pub struct DriverStats {
    pub total_jobs: usize,
    pub completed: usize,
    pub failed: usize,
    pub cancelled: usize,
    pub total_time: Duration,
    pub errors: Vec<JobError>,
}

/// Dense result array of a sweep.
///
/// `values` is row-major over the declared axes; failed or cancelled points
/// hold NaN and are listed in `stats.errors`.
#[derive(Debug)]
pub struct BatchResult {
    pub values: Vec<f64>,
    /// One entry per axis, in declaration order. Sequential runs report a
    /// single dimension.
    pub shape: Vec<usize>,
    pub columns: Vec<String>,
    /// Per-job column values, aligned with `values` and `columns`.
    pub rows: Vec<Vec<f64>>,
    pub stats: DriverStats,
}

/// Pre-run summary printed before a sweep starts.
pub struct PreRunReport {
    lines: Vec<String>,
}

impl PreRunReport {
    pub fn build(axes: &[SweepAxis], jobs: usize, threads: usize, measure: Measure) -> Self {
        let mut lines = Vec::new();
        lines.push(format!(
            "  Points: {}  |  Threads: {}  |  Measure: {}",
            jobs, threads, measure
        ));
        let described: Vec<String> = axes
            .iter()
            .map(|axis| format!("{} ({})", axis.name, axis.len))
            .collect();
        lines.push(format!("  Axes: {}", described.join(" x ")));
        Self { lines }
    }

    pub fn print(&self) {
        for line in &self.lines {
            println!("{line}");
        }
    }
}

/// High-throughput driver for Mie parameter sweeps.
pub struct BatchDriver {
    config: SweepConfig,
    axes: Vec<SweepAxis>,
    threads: usize,
    quiet: bool,
    cancel: Arc<AtomicBool>,
}

impl BatchDriver {
    pub fn new(config: SweepConfig, threads: Option<usize>) -> Result<Self, DriverError> {
        config.validate()?;
        let axes = sweep_axes(&config);
        let threads = threads.unwrap_or_else(num_cpus::get).max(1);
        Ok(Self {
            config,
            axes,
            threads,
            quiet: false,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Suppress the pre-run report and progress bar.
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn axes(&self) -> &[SweepAxis] {
        &self.axes
    }

    pub fn job_count(&self) -> usize {
        self.axes.iter().map(|axis| axis.len).product()
    }

    /// Handle for cooperative cancellation; setting it stops the sweep
    /// between points.
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        self.cancel.clone()
    }

    /// Reject measure/configuration mismatches before any point runs.
    fn validate_measure(&self, measure: Measure) -> Result<(), DriverError> {
        if measure.needs_detector() && self.config.detector.is_none() {
            return Err(DriverError::UnsupportedMeasure(format!(
                "{measure} requires a [detector] section"
            )));
        }
        let cylinder = matches!(
            self.config.scatterer,
            crate::config::ScattererSweep::Cylinder { .. }
        );
        if cylinder
            && matches!(
                measure,
                Measure::Qback
                    | Measure::Qforward
                    | Measure::Qratio
                    | Measure::Cback
                    | Measure::Cforward
                    | Measure::Cratio
            )
        {
            return Err(DriverError::UnsupportedMeasure(format!(
                "{measure} is not defined for cylinders"
            )));
        }
        Ok(())
    }

    /// Run the full Cartesian product. The result shape is the axis
    /// lengths in declaration order.
    pub fn run(&self, measure: Measure) -> Result<BatchResult, DriverError> {
        self.validate_measure(measure)?;
        let jobs = expand_jobs(&self.config)?;
        let shape: Vec<usize> = self.axes.iter().map(|axis| axis.len).collect();
        self.execute(jobs, shape, measure)
    }

    /// Run in sequential (zip) mode: one point per aligned axis tuple.
    pub fn run_sequential(&self, measure: Measure) -> Result<BatchResult, DriverError> {
        self.validate_measure(measure)?;
        let jobs = expand_sequential(&self.config)?;
        let shape = vec![jobs.len()];
        self.execute(jobs, shape, measure)
    }

    fn execute(
        &self,
        jobs: Vec<ExpandedJob>,
        shape: Vec<usize>,
        measure: Measure,
    ) -> Result<BatchResult, DriverError> {
        let columns = column_names(&self.config);
        if jobs.is_empty() {
            warn!("no points to evaluate (an axis is empty)");
            return Ok(BatchResult {
                values: Vec::new(),
                shape,
                columns,
                rows: Vec::new(),
                stats: DriverStats::default(),
            });
        }

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.threads)
            .build()
            .map_err(|e| DriverError::ThreadPoolError(e.to_string()))?;

        if !self.quiet {
            PreRunReport::build(&self.axes, jobs.len(), self.threads, measure).print();
        }

        let progress = if self.quiet {
            ProgressBar::hidden()
        } else {
            let pb = ProgressBar::new(jobs.len() as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template(
                        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})",
                    )
                    .unwrap()
                    .progress_chars("█▓░"),
            );
            pb
        };

        let completed = AtomicUsize::new(0);
        let cancelled = AtomicUsize::new(0);
        let errors: Mutex<Vec<JobError>> = Mutex::new(Vec::new());
        let cancel = self.cancel.clone();
        let start = Instant::now();

        // Each point owns exactly its own output slot; collect preserves
        // job order, so slot k holds the row-major point k.
        let values: Vec<f64> = pool.install(|| {
            jobs.par_iter()
                .map(|job| {
                    if cancel.load(Ordering::Relaxed) {
                        cancelled.fetch_add(1, Ordering::Relaxed);
                        return f64::NAN;
                    }
                    match execute_point(job, measure) {
                        Ok(value) => {
                            completed.fetch_add(1, Ordering::Relaxed);
                            progress.inc(1);
                            value
                        }
                        Err(e) => {
                            debug!("point {} failed: {}", job.index, e.message);
                            errors.lock().push(e);
                            progress.inc(1);
                            f64::NAN
                        }
                    }
                })
                .collect()
        });

        progress.finish_and_clear();

        let errors = errors.into_inner();
        let failed = errors.len();
        let completed = completed.load(Ordering::Relaxed);
        let cancelled = cancelled.load(Ordering::Relaxed);
        let total_time = start.elapsed();

        if failed > 0 {
            for err in errors.iter().take(5) {
                error!("point {} failed: {}", err.index, err.message);
            }
            if failed > 5 {
                error!("... and {} more errors", failed - 5);
            }
        }
        if !self.quiet {
            if failed == 0 && cancelled == 0 {
                println!(
                    "{} points evaluated in {:.2}s",
                    completed,
                    total_time.as_secs_f64()
                );
            } else {
                println!(
                    "{}/{} points evaluated, {} failed, {} cancelled in {:.2}s",
                    completed,
                    jobs.len(),
                    failed,
                    cancelled,
                    total_time.as_secs_f64()
                );
            }
        }

        let total_jobs = jobs.len();
        let rows = jobs.into_iter().map(|job| job.values).collect();
        Ok(BatchResult {
            values,
            shape,
            columns,
            rows,
            stats: DriverStats {
                total_jobs,
                completed,
                failed,
                cancelled,
                total_time,
                errors,
            },
        })
    }
}

/// Evaluate a single point, trapping panics from the numerics so one bad
/// point cannot take down the sweep.
fn execute_point(job: &ExpandedJob, measure: Measure) -> Result<f64, JobError> {
    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let point = &job.point;
        if measure.needs_detector() {
            let detector = point.detector.as_ref().expect("validated before run");
            evaluate_coupling(&point.geometry, &point.optics, &point.source, detector)
        } else {
            evaluate(&point.geometry, &point.optics, &point.source, measure)
        }
    }));
    match outcome {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(JobError {
            index: job.index,
            message: e.to_string(),
        }),
        Err(payload) => {
            let message = if let Some(s) = payload.downcast_ref::<&str>() {
                (*s).to_string()
            } else if let Some(s) = payload.downcast_ref::<String>() {
                s.clone()
            } else {
                "unknown panic".to_string()
            };
            Err(JobError {
                index: job.index,
                message,
            })
        }
    }
}
