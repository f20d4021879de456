//! Graded complexes: a complex plus an integer grade per cell.
//!
//! The grading must be monotone (a face never has a larger grade than the
//! cell it bounds), which makes every sublevel set `{cell : grade <= g}` a
//! subcomplex. [`GradedComplex::new`] checks this once, up front.

use std::collections::BTreeSet;

use tracing::{debug, instrument};

use crate::cubical::CellComplex;
use crate::error::EngineError;

/// A pure `cell index -> grade` mapping.
///
/// Closures implement it directly; callers that want an explicit function
/// object implement it on their own type.
pub trait Grading {
    /// Grade of `cell`.
    fn grade(&self, cell: usize) -> i64;
}

impl<F> Grading for F
where
    F: Fn(usize) -> i64,
{
    fn grade(&self, cell: usize) -> i64 {
        self(cell)
    }
}

/// A complex whose cells each carry a grade.
#[derive(Debug, Clone)]
pub struct GradedComplex<'a, C> {
    complex: &'a C,
    grades: Vec<i64>,
}

impl<'a, C: CellComplex> GradedComplex<'a, C> {
    /// Evaluate `grading` on every cell of `complex`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NonMonotoneGrading`] for the first cell that
    /// has a face of strictly larger grade.
    #[instrument(skip_all, fields(cells = complex.size()))]
    pub fn new<G: Grading>(complex: &'a C, grading: G) -> Result<Self, EngineError> {
        let grades: Vec<i64> = (0..complex.size()).map(|cell| grading.grade(cell)).collect();

        for (cell, &cell_grade) in grades.iter().enumerate() {
            for face in complex.boundary(cell) {
                let face_grade = grades[face];
                if face_grade > cell_grade {
                    return Err(EngineError::NonMonotoneGrading {
                        cell,
                        cell_grade,
                        face,
                        face_grade,
                    });
                }
            }
        }

        let graded = Self { complex, grades };
        debug!(grades = ?graded.distinct_grades(), "built graded complex");
        Ok(graded)
    }

    /// The underlying complex.
    #[must_use]
    pub const fn complex(&self) -> &'a C {
        self.complex
    }

    /// Grade of `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not a cell of the complex.
    #[must_use]
    pub fn value(&self, cell: usize) -> i64 {
        self.grades[cell]
    }

    /// Grades of all cells, indexed by cell.
    #[must_use]
    pub fn grades(&self) -> &[i64] {
        &self.grades
    }

    /// The grades that occur, ascending.
    #[must_use]
    pub fn distinct_grades(&self) -> BTreeSet<i64> {
        self.grades.iter().copied().collect()
    }
}
