#![forbid(unsafe_code)]
//! chomp-homology library.
//!
//! Betti numbers of finite sets of grid-aligned unit cubes. Each cube is
//! given by its minimum corner; the pipeline grades a padded periodic
//! cubical complex so that the grade-0 cells are exactly the closed cubes,
//! then reads the homology of that subcomplex from the engine's connection
//! matrix.
//!
//! ```
//! let ring = [[0, 0], [1, 0], [2, 0], [0, 1], [2, 1], [0, 2], [1, 2], [2, 2]];
//! assert_eq!(chomp_homology::cubical_homology(&ring)?, vec![1, 1, 0]);
//! # Ok::<(), chomp_homology::HomologyError>(())
//! ```
//!
//! # Conventions
//!
//! - **Errors**: pipeline failures are [`HomologyError`]; engine failures
//!   pass through as [`HomologyError::Engine`]. Config parsing uses
//!   `anyhow::Result`.
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`).

mod config;
mod cube;
mod error;
mod grading;
mod pipeline;

pub use config::HomologyConfig;
pub use cube::Cube;
pub use error::HomologyError;
pub use grading::CubeGrading;
pub use pipeline::{cubical_homology, cubical_homology_with};
