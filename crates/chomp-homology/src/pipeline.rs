//! Cube set -> Betti numbers.
//!
//! # Steps
//!
//! 1. Infer the space dimension `d` from the first cube.
//! 2. Size the bounding grid: one past the largest coordinate on each axis.
//! 3. Pad every axis by two (one fringe layer per side). The engine's complex
//!    is periodic, so the fringe keeps the selection from touching itself
//!    across the seam.
//! 4. Build the ambient complex, grade it with [`CubeGrading`], and read the
//!    Betti numbers of the grade-0 sublevel set off the connection matrix.
//!
//! Nothing is cached; each call builds a fresh complex.

use chomp_complex::{ConnectionMatrix, CubicalComplex, GradedComplex};
use tracing::{debug, instrument};

use crate::config::HomologyConfig;
use crate::error::HomologyError;
use crate::grading::CubeGrading;

/// Betti numbers of the union of `cubes`, using the default config.
///
/// Index `k` of the result is the `k`-th Betti number, for `k` in `0..=d`.
///
/// # Errors
///
/// See [`cubical_homology_with`].
pub fn cubical_homology<C: AsRef<[i64]>>(cubes: &[C]) -> Result<Vec<usize>, HomologyError> {
    cubical_homology_with(cubes, &HomologyConfig::default())
}

/// Betti numbers of the union of `cubes`.
///
/// The result depends only on the set of distinct cubes: order and
/// repetition are irrelevant.
///
/// # Errors
///
/// - [`HomologyError::EmptyInput`] if `cubes` is empty.
/// - [`HomologyError::DimensionMismatch`] if cubes differ in length and
///   `config.validate_dimensions` is set.
/// - [`HomologyError::TooLarge`] if the padded grid exceeds
///   `config.max_cells`.
/// - [`HomologyError::Engine`] for anything the engine rejects, such as a
///   negative coordinate.
#[instrument(skip_all, fields(cubes = cubes.len()))]
pub fn cubical_homology_with<C: AsRef<[i64]>>(
    cubes: &[C],
    config: &HomologyConfig,
) -> Result<Vec<usize>, HomologyError> {
    let first = cubes.first().ok_or(HomologyError::EmptyInput)?;
    let dimension = first.as_ref().len();

    if config.validate_dimensions {
        check_dimensions(cubes, dimension)?;
    }

    let grid = bounding_grid(cubes, dimension);
    let extended: Vec<usize> = grid.iter().map(|n| n.saturating_add(2)).collect();
    debug!(dimension, ?grid, ?extended, "sized ambient grid");

    let cells = ambient_cell_count(&extended);
    if cells > config.max_cells {
        return Err(HomologyError::TooLarge {
            grid: extended,
            cells,
            limit: config.max_cells,
        });
    }

    let complex = CubicalComplex::new(&extended)?;
    let grading = CubeGrading::new(&complex, cubes)?;
    debug!(selected = grading.selected_count(), "selected top cells");

    let graded = GradedComplex::new(&complex, grading)?;
    let (betti, _) = ConnectionMatrix::compute(&graded).count();
    debug!(?betti, "computed cubical homology");
    Ok(betti)
}

fn check_dimensions<C: AsRef<[i64]>>(cubes: &[C], expected: usize) -> Result<(), HomologyError> {
    match cubes
        .iter()
        .enumerate()
        .find(|(_, cube)| cube.as_ref().len() != expected)
    {
        Some((index, cube)) => Err(HomologyError::DimensionMismatch {
            index,
            expected,
            found: cube.as_ref().len(),
        }),
        None => Ok(()),
    }
}

/// One past the largest coordinate on each axis; axes where every
/// coordinate is negative get size zero.
fn bounding_grid<C: AsRef<[i64]>>(cubes: &[C], dimension: usize) -> Vec<usize> {
    (0..dimension)
        .map(|axis| {
            cubes
                .iter()
                .filter_map(|cube| cube.as_ref().get(axis).copied())
                .max()
                .and_then(|max| usize::try_from(max.saturating_add(1)).ok())
                .unwrap_or(0)
        })
        .collect()
}

/// `prod(grid) * 2^d`, saturating at `usize::MAX`.
fn ambient_cell_count(grid: &[usize]) -> usize {
    let shapes = u32::try_from(grid.len())
        .ok()
        .and_then(|d| 1usize.checked_shl(d));
    grid.iter()
        .try_fold(1usize, |acc, &n| acc.checked_mul(n))
        .zip(shapes)
        .and_then(|(positions, shapes)| positions.checked_mul(shapes))
        .unwrap_or(usize::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounding_grid_is_one_past_max() {
        assert_eq!(bounding_grid(&[[0, 4], [2, 1]], 2), vec![3, 5]);
        assert_eq!(bounding_grid(&[[-3, 0]], 2), vec![0, 1]);
    }

    #[test]
    fn cell_count_saturates() {
        assert_eq!(ambient_cell_count(&[3, 2]), 24);
        assert_eq!(ambient_cell_count(&[usize::MAX, 2]), usize::MAX);
        assert_eq!(ambient_cell_count(&[1; 70]), usize::MAX);
    }

    #[test]
    fn first_mismatched_cube_is_reported() {
        let cubes = vec![vec![0, 0], vec![1, 1], vec![2], vec![3, 3, 3]];
        assert_eq!(
            check_dimensions(&cubes, 2),
            Err(HomologyError::DimensionMismatch {
                index: 2,
                expected: 2,
                found: 1
            })
        );
    }
}
