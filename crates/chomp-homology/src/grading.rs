//! The binary grading that selects the closure of a cube set.

use chomp_complex::{CellComplex, CubicalComplex, EngineError, Grading};
use fixedbitset::FixedBitSet;

/// Grade 0 for every cell touching a selected top cell, grade 1 elsewhere.
///
/// The selected top cells are held by value as a bitset over cell indices,
/// so the grading is a plain `index -> level` function for the engine.
/// A face is graded 0 whenever any cell it bounds is, so the grade-0 cells
/// form a subcomplex: the union of the closed input cubes.
#[derive(Debug, Clone)]
pub struct CubeGrading<'a> {
    complex: &'a CubicalComplex,
    selected: FixedBitSet,
}

impl<'a> CubeGrading<'a> {
    /// Select the top cell of `complex` anchored at each cube's minimum
    /// corner. Duplicate cubes select the same cell.
    ///
    /// # Errors
    ///
    /// Returns the engine's error if a cube cannot be located in `complex`
    /// (wrong length, or a coordinate outside the grid).
    pub fn new<C: AsRef<[i64]>>(
        complex: &'a CubicalComplex,
        cubes: &[C],
    ) -> Result<Self, EngineError> {
        let shape = complex.top_shape();
        let mut selected = FixedBitSet::with_capacity(complex.size());
        for cube in cubes {
            selected.insert(complex.cell_index(cube.as_ref(), shape)?);
        }
        Ok(Self { complex, selected })
    }

    /// Number of distinct selected top cells.
    #[must_use]
    pub fn selected_count(&self) -> usize {
        self.selected.count_ones(..)
    }

    /// Whether `cell` is one of the selected top cells.
    #[must_use]
    pub fn is_selected(&self, cell: usize) -> bool {
        self.selected.contains(cell)
    }
}

impl Grading for CubeGrading<'_> {
    fn grade(&self, cell: usize) -> i64 {
        let touches_selection = self
            .complex
            .topstar(cell)
            .into_iter()
            .any(|top| self.selected.contains(top));
        i64::from(!touches_selection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicates_select_one_cell() {
        let complex = CubicalComplex::new(&[4, 4]).unwrap();
        let grading = CubeGrading::new(&complex, &[[1, 1], [1, 1], [2, 1]]).unwrap();
        assert_eq!(grading.selected_count(), 2);
        assert!(grading.is_selected(complex.cell_index(&[2, 1], 0b11).unwrap()));
        assert!(!grading.is_selected(complex.cell_index(&[2, 2], 0b11).unwrap()));
    }

    #[test]
    fn closure_of_selected_square_is_grade_zero() {
        let complex = CubicalComplex::new(&[4, 4]).unwrap();
        let grading = CubeGrading::new(&complex, &[[1, 1]]).unwrap();

        let corner = complex.cell_index(&[2, 2], 0).unwrap();
        let far_corner = complex.cell_index(&[3, 3], 0).unwrap();
        let side = complex.cell_index(&[1, 2], 0b01).unwrap();
        let outside_side = complex.cell_index(&[1, 3], 0b01).unwrap();

        assert_eq!(grading.grade(corner), 0);
        assert_eq!(grading.grade(side), 0);
        assert_eq!(grading.grade(far_corner), 1);
        assert_eq!(grading.grade(outside_side), 1);

        let grade_zero = (0..complex.size()).filter(|&c| grading.grade(c) == 0).count();
        // one square, four edges, four vertices
        assert_eq!(grade_zero, 9);
    }

    #[test]
    fn out_of_grid_cube_is_an_engine_error() {
        let complex = CubicalComplex::new(&[3, 3]).unwrap();
        let err = CubeGrading::new(&complex, &[[0, 3]]).unwrap_err();
        assert_eq!(
            err,
            EngineError::CoordinateOutOfRange {
                axis: 1,
                value: 3,
                limit: 3
            }
        );
    }
}
