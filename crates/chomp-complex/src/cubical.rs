//! Periodic cubical complexes over integer grids.
//!
//! # Overview
//!
//! A [`CubicalComplex`] built from `boxes = [n_0, .., n_{d-1}]` is the cubical
//! decomposition of the `d`-torus with `n_i` unit intervals along axis `i`.
//! Every grid position carries one cell per *shape*: bit `i` of the shape
//! says whether the cell spans `[x_i, x_i + 1]` on axis `i` or is degenerate
//! there. The complex therefore has `prod(boxes) * 2^d` cells.
//!
//! Because the grid wraps around, a caller that wants the homology of a
//! region in flat space must pad the region with at least one layer of
//! unused cells on every side.
//!
//! ## Indexing
//!
//! Cells are indexed by shape rank, then by position (axis 0 fastest).
//! Shapes are ranked by `(popcount, value)`, so all cells of one dimension
//! occupy a contiguous range ([`CubicalComplex::cells_of_dim`]) and the
//! top-dimensional cells come last.

use std::ops::Range;

use tracing::{debug, instrument};

use crate::error::EngineError;

/// Largest supported number of axes.
pub const MAX_DIMENSION: usize = 16;

// ---------------------------------------------------------------------------
// CellComplex
// ---------------------------------------------------------------------------

/// The queries a graded complex and its connection matrix need.
pub trait CellComplex {
    /// Dimension of the top cells.
    fn dimension(&self) -> usize;

    /// Total number of cells. Valid cell indices are `0..size()`.
    fn size(&self) -> usize;

    /// Dimension of `cell`.
    fn cell_dim(&self, cell: usize) -> usize;

    /// Faces of `cell` with nonzero GF(2) incidence, sorted.
    fn boundary(&self, cell: usize) -> Vec<usize>;
}

// ---------------------------------------------------------------------------
// CubicalComplex
// ---------------------------------------------------------------------------

/// Cubical decomposition of a torus; see the module docs for the layout.
#[derive(Debug, Clone)]
pub struct CubicalComplex {
    boxes: Vec<usize>,
    strides: Vec<usize>,
    positions: usize,
    /// Shape rank -> shape code.
    shapes: Vec<u32>,
    /// Shape code -> shape rank.
    shape_rank: Vec<usize>,
    /// `dim_begin[k]` is the first shape rank of dimension `k`.
    dim_begin: Vec<usize>,
}

impl CubicalComplex {
    /// Build the complex over a grid with `boxes[i]` intervals on axis `i`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::EmptyGrid`] if `boxes` is empty.
    /// - [`EngineError::TooManyAxes`] above [`MAX_DIMENSION`] axes.
    /// - [`EngineError::InvalidGridSize`] if an axis has zero length.
    /// - [`EngineError::TooLarge`] if the cell count overflows `usize`.
    #[instrument]
    pub fn new(boxes: &[usize]) -> Result<Self, EngineError> {
        let dimension = boxes.len();
        if dimension == 0 {
            return Err(EngineError::EmptyGrid);
        }
        if dimension > MAX_DIMENSION {
            return Err(EngineError::TooManyAxes { axes: dimension });
        }
        if let Some(axis) = boxes.iter().position(|&n| n == 0) {
            return Err(EngineError::InvalidGridSize { axis });
        }

        let too_large = || EngineError::TooLarge {
            boxes: boxes.to_vec(),
        };

        let mut strides = Vec::with_capacity(dimension);
        let mut positions = 1usize;
        for &n in boxes {
            strides.push(positions);
            positions = positions.checked_mul(n).ok_or_else(too_large)?;
        }

        let full = (1u32 << dimension) - 1;
        let mut shapes: Vec<u32> = (0..=full).collect();
        shapes.sort_unstable_by_key(|shape| (shape.count_ones(), *shape));
        if positions.checked_mul(shapes.len()).is_none() {
            return Err(too_large());
        }

        let mut shape_rank = vec![0; shapes.len()];
        for (rank, &shape) in shapes.iter().enumerate() {
            shape_rank[shape as usize] = rank;
        }

        let dim_begin = (0..=dimension + 1)
            .map(|k| {
                shapes
                    .iter()
                    .filter(|shape| (shape.count_ones() as usize) < k)
                    .count()
            })
            .collect();

        let complex = Self {
            boxes: boxes.to_vec(),
            strides,
            positions,
            shapes,
            shape_rank,
            dim_begin,
        };
        debug!(
            dimension,
            positions,
            cells = complex.size(),
            "built cubical complex"
        );
        Ok(complex)
    }

    /// Grid size per axis.
    #[must_use]
    pub fn boxes(&self) -> &[usize] {
        &self.boxes
    }

    /// Shape code of the top-dimensional cells (`2^d - 1`).
    #[must_use]
    pub fn top_shape(&self) -> u32 {
        (1u32 << self.boxes.len()) - 1
    }

    /// Index of the cell anchored at `coordinates` with the given `shape`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::DimensionMismatch`] if `coordinates` has the wrong length.
    /// - [`EngineError::InvalidShape`] if `shape` has bits beyond the last axis.
    /// - [`EngineError::CoordinateOutOfRange`] if a coordinate is negative or
    ///   not below the grid size of its axis.
    pub fn cell_index(&self, coordinates: &[i64], shape: u32) -> Result<usize, EngineError> {
        let dimension = self.boxes.len();
        if coordinates.len() != dimension {
            return Err(EngineError::DimensionMismatch {
                expected: dimension,
                found: coordinates.len(),
            });
        }
        if shape > self.top_shape() {
            return Err(EngineError::InvalidShape { shape, dimension });
        }

        let mut position = 0;
        for (axis, (&value, &limit)) in coordinates.iter().zip(&self.boxes).enumerate() {
            let coordinate = usize::try_from(value)
                .ok()
                .filter(|&c| c < limit)
                .ok_or(EngineError::CoordinateOutOfRange { axis, value, limit })?;
            position += coordinate * self.strides[axis];
        }

        Ok(self.index_of(position, shape))
    }

    /// Shape code of `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= self.size()`.
    #[must_use]
    pub fn cell_shape(&self, cell: usize) -> u32 {
        self.shapes[cell / self.positions]
    }

    /// Anchor coordinates of `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= self.size()`.
    #[must_use]
    pub fn coordinates(&self, cell: usize) -> Vec<usize> {
        assert!(cell < self.size(), "cell {cell} out of range");
        let position = cell % self.positions;
        self.boxes
            .iter()
            .zip(&self.strides)
            .map(|(&n, &stride)| (position / stride) % n)
            .collect()
    }

    /// Index range holding every cell of dimension `k` (empty above `d`).
    #[must_use]
    pub fn cells_of_dim(&self, k: usize) -> Range<usize> {
        if k > self.boxes.len() {
            return self.size()..self.size();
        }
        self.dim_begin[k] * self.positions..self.dim_begin[k + 1] * self.positions
    }

    /// Cells having `cell` as a face with nonzero GF(2) incidence, sorted.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= self.size()`.
    #[must_use]
    pub fn coboundary(&self, cell: usize) -> Vec<usize> {
        let (position, shape) = self.split(cell);
        let mut cofaces = Vec::new();
        for axis in self.free_axes(shape) {
            let coface_shape = shape | (1 << axis);
            cofaces.push(self.index_of(position, coface_shape));
            cofaces.push(self.index_of(self.shift(position, axis, false), coface_shape));
        }
        cancel_pairs(cofaces)
    }

    /// Every cell containing `cell`, `cell` included, sorted.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= self.size()`.
    #[must_use]
    pub fn star(&self, cell: usize) -> Vec<usize> {
        let (position, shape) = self.split(cell);
        let mut star = Vec::new();
        for_each_submask(self.top_shape() & !shape, |extra| {
            star.extend(self.cells_around(position, shape, shape | extra));
        });
        star.sort_unstable();
        star.dedup();
        star
    }

    /// Top-dimensional cells containing `cell`, sorted.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= self.size()`.
    #[must_use]
    pub fn topstar(&self, cell: usize) -> Vec<usize> {
        let (position, shape) = self.split(cell);
        let mut star = self.cells_around(position, shape, self.top_shape());
        star.sort_unstable();
        star.dedup();
        star
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    fn index_of(&self, position: usize, shape: u32) -> usize {
        self.shape_rank[shape as usize] * self.positions + position
    }

    fn split(&self, cell: usize) -> (usize, u32) {
        (cell % self.positions, self.cell_shape(cell))
    }

    fn free_axes(&self, shape: u32) -> impl Iterator<Item = usize> {
        (0..self.boxes.len()).filter(move |&axis| shape & (1 << axis) == 0)
    }

    /// Move one step along `axis`, wrapping around the torus.
    fn shift(&self, position: usize, axis: usize, forward: bool) -> usize {
        let n = self.boxes[axis];
        let stride = self.strides[axis];
        let coordinate = (position / stride) % n;
        let moved = if forward {
            (coordinate + 1) % n
        } else {
            (coordinate + n - 1) % n
        };
        position - coordinate * stride + moved * stride
    }

    /// Cells of shape `target` (a superset of `shape`) that contain the cell
    /// `(position, shape)`: on every newly spanned axis the anchor is either
    /// the same or one step back.
    fn cells_around(&self, position: usize, shape: u32, target: u32) -> Vec<usize> {
        let mut cells = Vec::new();
        for_each_submask(target & !shape, |back| {
            let anchor = (0..self.boxes.len())
                .filter(|&axis| back & (1 << axis) != 0)
                .fold(position, |p, axis| self.shift(p, axis, false));
            cells.push(self.index_of(anchor, target));
        });
        cells
    }
}

impl CellComplex for CubicalComplex {
    fn dimension(&self) -> usize {
        self.boxes.len()
    }

    fn size(&self) -> usize {
        self.positions * self.shapes.len()
    }

    fn cell_dim(&self, cell: usize) -> usize {
        self.cell_shape(cell).count_ones() as usize
    }

    fn boundary(&self, cell: usize) -> Vec<usize> {
        let (position, shape) = self.split(cell);
        let mut faces = Vec::new();
        for axis in (0..self.boxes.len()).filter(|&axis| shape & (1 << axis) != 0) {
            let face_shape = shape & !(1 << axis);
            faces.push(self.index_of(position, face_shape));
            faces.push(self.index_of(self.shift(position, axis, true), face_shape));
        }
        cancel_pairs(faces)
    }
}

/// Sort and drop every index that occurs an even number of times.
fn cancel_pairs(mut cells: Vec<usize>) -> Vec<usize> {
    cells.sort_unstable();
    let mut kept: Vec<usize> = Vec::with_capacity(cells.len());
    for cell in cells {
        if kept.last() == Some(&cell) {
            kept.pop();
        } else {
            kept.push(cell);
        }
    }
    kept
}

/// Call `f` once for every submask of `mask`, `mask` and `0` included.
fn for_each_submask(mask: u32, mut f: impl FnMut(u32)) {
    let mut sub = mask;
    loop {
        f(sub);
        if sub == 0 {
            break;
        }
        sub = (sub - 1) & mask;
    }
}
