//! Demo entry point for accessor registration.
//!
//! # Responsibility
//! - Register the `geo` accessor on `Dataset` and read it from a sample.
//! - Keep output deterministic for quick local sanity checks.
//!
//! Logging is configured through `LABELKIT_LOG_LEVEL` and `LABELKIT_LOG_DIR`;
//! without a directory no log file is written.

use labelkit_core::{
    core_version, default_log_level, init_logging, register_dataset_accessor, Accessor,
    DataArray, Dataset, HostKind, ModelError,
};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::process::ExitCode;

const LOG_LEVEL_ENV: &str = "LABELKIT_LOG_LEVEL";
const LOG_DIR_ENV: &str = "LABELKIT_LOG_DIR";
const SAMPLE_POINTS: usize = 50;

#[derive(Debug)]
enum GeoError {
    MissingCoordinate(&'static str),
}

impl Display for GeoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCoordinate(name) => {
                write!(f, "dataset has no non-empty `{name}` variable")
            }
        }
    }
}

impl Error for GeoError {}

/// Geographic helpers over a dataset's `longitude`/`latitude` variables.
struct GeoAccessor {
    longitude: DataArray,
    latitude: DataArray,
}

impl GeoAccessor {
    /// Geographic center point as `(longitude, latitude)`.
    fn center(&self) -> Option<(f64, f64)> {
        Some((self.longitude.mean()?, self.latitude.mean()?))
    }
}

impl Accessor<Dataset> for GeoAccessor {
    type Error = GeoError;

    fn new(obj: &Dataset) -> Result<Self, Self::Error> {
        let coordinate = |name: &'static str| {
            obj.get(name)
                .filter(|array| !array.is_empty())
                .cloned()
                .ok_or(GeoError::MissingCoordinate(name))
        };
        Ok(Self {
            longitude: coordinate("longitude")?,
            latitude: coordinate("latitude")?,
        })
    }
}

fn linspace(start: f64, stop: f64, points: usize) -> Vec<f64> {
    if points < 2 {
        return vec![start; points];
    }
    let step = (stop - start) / (points - 1) as f64;
    (0..points).map(|i| start + step * i as f64).collect()
}

fn sample_dataset() -> Result<Dataset, ModelError> {
    Ok(Dataset::new()
        .with_variable(
            "longitude",
            DataArray::new(["point"], linspace(0.0, 10.0, SAMPLE_POINTS))?,
        )
        .with_variable(
            "latitude",
            DataArray::new(["point"], linspace(0.0, 20.0, SAMPLE_POINTS))?,
        ))
}

fn init_logging_from_env() -> Result<(), String> {
    let Ok(log_dir) = std::env::var(LOG_DIR_ENV) else {
        return Ok(());
    };
    let level =
        std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| default_log_level().to_string());
    init_logging(&level, &log_dir)
}

fn run() -> Result<(), Box<dyn Error>> {
    init_logging_from_env()?;
    register_dataset_accessor("geo").register_accessor::<GeoAccessor>()?;

    let ds = sample_dataset()?;
    println!("labelkit_core version={}", core_version());
    println!("geo resolved={}", ds.is_accessor_resolved("geo"));

    let geo = ds.accessor::<GeoAccessor>("geo")?;
    let (lon, lat) = geo
        .center()
        .ok_or(GeoError::MissingCoordinate("longitude"))?;
    println!("geo center=({lon:.1}, {lat:.1})");
    println!("geo resolved={}", ds.is_accessor_resolved("geo"));

    info!("event=demo_finish module=cli status=ok");
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("labelkit: {err}");
            ExitCode::FAILURE
        }
    }
}
