#![forbid(unsafe_code)]
//! chomp-complex library.
//!
//! The combinatorial-topology engine: periodic cubical complexes, graded
//! complexes and connection matrices over GF(2).
//!
//! ```text
//! CubicalComplex::new(boxes) --> GradedComplex::new(&complex, grading)
//!                            --> ConnectionMatrix::compute(&graded).count()
//! ```
//!
//! # Conventions
//!
//! - **Errors**: fallible constructors and lookups return [`EngineError`].
//! - **Logging**: Use `tracing` macros (`debug!`, `trace!`).

mod connection;
mod cubical;
mod error;
mod graded;

pub use connection::{Betti, ConnectionMatrix};
pub use cubical::{CellComplex, CubicalComplex, MAX_DIMENSION};
pub use error::EngineError;
pub use graded::{GradedComplex, Grading};

/// Betti numbers of a whole complex.
///
/// # Errors
///
/// Never fails for a constant grading; the `Result` mirrors
/// [`GradedComplex::new`].
pub fn homology<C: CellComplex>(complex: &C) -> Result<Betti, EngineError> {
    let graded = GradedComplex::new(complex, |_: usize| 0_i64)?;
    Ok(ConnectionMatrix::compute(&graded).count().0)
}
