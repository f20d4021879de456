use crate::cubical::MAX_DIMENSION;

/// Errors raised while building complexes, gradings and connection matrices.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("cubical complex needs at least one axis")]
    EmptyGrid,

    #[error("axis {axis} has zero length")]
    InvalidGridSize { axis: usize },

    #[error("{axes} axes exceed the supported maximum of {MAX_DIMENSION}")]
    TooManyAxes { axes: usize },

    #[error("cubical complex over grid {boxes:?} has too many cells")]
    TooLarge { boxes: Vec<usize> },

    #[error("expected {expected} coordinates, got {found}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("shape {shape:#b} is not valid in dimension {dimension}")]
    InvalidShape { shape: u32, dimension: usize },

    #[error("coordinate {value} on axis {axis} is outside 0..{limit}")]
    CoordinateOutOfRange { axis: usize, value: i64, limit: usize },

    #[error(
        "grading is not monotone: face {face} (grade {face_grade}) lies above cell {cell} (grade {cell_grade})"
    )]
    NonMonotoneGrading {
        cell: usize,
        cell_grade: i64,
        face: usize,
        face_grade: i64,
    },
}
