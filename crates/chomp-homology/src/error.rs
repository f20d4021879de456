use chomp_complex::EngineError;

/// Errors raised by the cubical homology pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HomologyError {
    /// No cubes were given, so the space dimension is unknown.
    #[error("cube collection is empty; cannot infer the space dimension")]
    EmptyInput,

    /// A cube's length differs from the first cube's.
    #[error("cube {index} has {found} coordinates but the first cube has {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// The ambient complex would exceed the configured cell budget.
    #[error("ambient complex over grid {grid:?} needs {cells} cells (limit: {limit})")]
    TooLarge {
        grid: Vec<usize>,
        cells: usize,
        limit: usize,
    },

    /// Anything the engine rejected, unchanged.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
