//! Connection matrices over GF(2).
//!
//! # Algorithm
//!
//! 1. Order the cells by `(grade, dimension, index)`. Monotone gradings make
//!    this a filtration: every face precedes the cells it bounds.
//! 2. Reduce the boundary matrix column by column, adding earlier reduced
//!    columns until the lowest entry is a fresh pivot (the standard
//!    persistence reduction).
//! 3. Each nonzero reduced column pairs its cell with the cell of its pivot
//!    row. Pairs inside one grade cancel. The cells left over form the
//!    connection-matrix basis, and the pairs crossing grades are its entries.
//!
//! Ranks are taken over GF(2). Subsets of 2- and 3-dimensional space have
//! torsion-free homology, so these agree with rational Betti numbers there.

use std::collections::BTreeMap;

use tracing::{debug, instrument, trace};

use crate::cubical::CellComplex;
use crate::graded::GradedComplex;

/// Betti numbers, index `k` holding the rank in dimension `k`.
pub type Betti = Vec<usize>;

/// The reduced, graded boundary data of a [`GradedComplex`].
#[derive(Debug, Clone)]
pub struct ConnectionMatrix {
    dimension: usize,
    /// Filtration position -> cell index.
    order: Vec<usize>,
    /// Filtration position -> grade.
    grade: Vec<i64>,
    /// Filtration position -> cell dimension.
    dim: Vec<usize>,
    /// Filtration position -> paired position, if any.
    partner: Vec<Option<usize>>,
}

impl ConnectionMatrix {
    /// Reduce the boundary matrix of `graded`.
    #[must_use]
    #[instrument(skip_all, fields(cells = graded.grades().len()))]
    pub fn compute<C: CellComplex>(graded: &GradedComplex<'_, C>) -> Self {
        let complex = graded.complex();
        let size = complex.size();

        let mut order: Vec<usize> = (0..size).collect();
        order.sort_unstable_by_key(|&cell| (graded.value(cell), complex.cell_dim(cell), cell));

        let mut position = vec![0; size];
        for (p, &cell) in order.iter().enumerate() {
            position[cell] = p;
        }

        let mut pivot_column: Vec<Option<usize>> = vec![None; size];
        let mut partner: Vec<Option<usize>> = vec![None; size];
        let mut reduced: Vec<Vec<usize>> = vec![Vec::new(); size];

        for (j, &cell) in order.iter().enumerate() {
            let mut column: Vec<usize> = complex
                .boundary(cell)
                .into_iter()
                .map(|face| position[face])
                .collect();
            column.sort_unstable();

            while let Some(&low) = column.last() {
                match pivot_column[low] {
                    Some(k) => column = add_columns(&column, &reduced[k]),
                    None => break,
                }
            }

            if let Some(&low) = column.last() {
                trace!(birth = order[low], death = cell, "paired cells");
                pivot_column[low] = Some(j);
                partner[low] = Some(j);
                partner[j] = Some(low);
                reduced[j] = column;
            }
        }

        let grade: Vec<i64> = order.iter().map(|&cell| graded.value(cell)).collect();
        let dim: Vec<usize> = order.iter().map(|&cell| complex.cell_dim(cell)).collect();

        let matrix = Self {
            dimension: complex.dimension(),
            order,
            grade,
            dim,
            partner,
        };
        debug!(
            basis = matrix.basis().len(),
            entries = matrix.entries().len(),
            "computed connection matrix"
        );
        matrix
    }

    /// Dimension of the underlying complex.
    #[must_use]
    pub const fn dimension(&self) -> usize {
        self.dimension
    }

    /// Cells that survive cancellation inside their grade, in filtration
    /// order.
    #[must_use]
    pub fn basis(&self) -> Vec<usize> {
        (0..self.order.len())
            .filter(|&p| self.survives(p))
            .map(|p| self.order[p])
            .collect()
    }

    /// Nonzero entries `(cell, face)` of the connection matrix: `face` lies
    /// in the boundary of `cell` after reduction and carries a lower grade.
    #[must_use]
    pub fn entries(&self) -> Vec<(usize, usize)> {
        self.partner
            .iter()
            .enumerate()
            .filter_map(|(p, &partner)| {
                partner
                    .filter(|&birth| birth < p && self.grade[birth] != self.grade[p])
                    .map(|birth| (self.order[p], self.order[birth]))
            })
            .collect()
    }

    /// Betti numbers of the subcomplex of cells with grade `<= grade`.
    #[must_use]
    pub fn sublevel_betti(&self, grade: i64) -> Betti {
        let mut betti = vec![0; self.dimension + 1];
        for p in 0..self.order.len() {
            if self.grade[p] > grade {
                continue;
            }
            let alive = match self.partner[p] {
                None => true,
                Some(death) if death > p => self.grade[death] > grade,
                Some(_) => false,
            };
            if alive {
                betti[self.dim[p]] += 1;
            }
        }
        betti
    }

    /// Per-grade rank of the Conley index, i.e. how many basis cells of each
    /// dimension every grade contributes.
    #[must_use]
    pub fn conley_ranks(&self) -> BTreeMap<i64, Betti> {
        let mut ranks: BTreeMap<i64, Betti> = BTreeMap::new();
        for p in 0..self.order.len() {
            let entry = ranks
                .entry(self.grade[p])
                .or_insert_with(|| vec![0; self.dimension + 1]);
            if self.survives(p) {
                entry[self.dim[p]] += 1;
            }
        }
        ranks
    }

    /// Betti numbers of the lowest sublevel set, followed by the Conley
    /// index ranks of every grade.
    #[must_use]
    pub fn count(&self) -> (Betti, BTreeMap<i64, Betti>) {
        let lowest = self
            .grade
            .first()
            .map_or_else(|| vec![0; self.dimension + 1], |&g| self.sublevel_betti(g));
        (lowest, self.conley_ranks())
    }

    fn survives(&self, p: usize) -> bool {
        self.partner[p].is_none_or(|q| self.grade[q] != self.grade[p])
    }
}

/// Sum of two sorted GF(2) columns.
fn add_columns(a: &[usize], b: &[usize]) -> Vec<usize> {
    let mut sum = Vec::with_capacity(a.len() + b.len());
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => {
                sum.push(a[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                sum.push(b[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                i += 1;
                j += 1;
            }
        }
    }
    sum.extend_from_slice(&a[i..]);
    sum.extend_from_slice(&b[j..]);
    sum
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cubical::CubicalComplex;

    #[test]
    fn add_columns_cancels_shared_rows() {
        assert_eq!(add_columns(&[1, 3, 5], &[3, 4]), vec![1, 4, 5]);
        assert_eq!(add_columns(&[2], &[2]), Vec::<usize>::new());
    }

    #[test]
    fn circle_has_one_component_and_one_loop() {
        let complex = CubicalComplex::new(&[4]).unwrap();
        let graded = GradedComplex::new(&complex, |_: usize| 0_i64).unwrap();
        let matrix = ConnectionMatrix::compute(&graded);

        let (betti, by_grade) = matrix.count();
        assert_eq!(betti, vec![1, 1]);
        assert_eq!(by_grade, BTreeMap::from([(0, vec![1, 1])]));
        assert_eq!(matrix.basis().len(), 2);
        assert!(matrix.entries().is_empty());
    }

    #[test]
    fn two_grades_split_the_circle() {
        // Arc of two edges at grade 0, the rest of the circle at grade 1.
        let complex = CubicalComplex::new(&[4]).unwrap();
        let arc = [
            complex.cell_index(&[0], 0).unwrap(),
            complex.cell_index(&[1], 0).unwrap(),
            complex.cell_index(&[2], 0).unwrap(),
            complex.cell_index(&[0], 1).unwrap(),
            complex.cell_index(&[1], 1).unwrap(),
        ];
        let graded = GradedComplex::new(&complex, |cell: usize| i64::from(!arc.contains(&cell)))
            .unwrap();
        let matrix = ConnectionMatrix::compute(&graded);

        let (betti, by_grade) = matrix.count();
        assert_eq!(betti, vec![1, 0], "the arc is contractible");
        assert_eq!(matrix.sublevel_betti(1), vec![1, 1]);
        // H(circle, arc) is concentrated in dimension one
        assert_eq!(by_grade[&0], vec![1, 0]);
        assert_eq!(by_grade[&1], vec![0, 1]);
    }

    #[test]
    fn entries_link_grades() {
        // Two-edge circle: both vertices at grade 0, both edges at grade 1.
        // The first edge merges the two components across grades.
        let complex = CubicalComplex::new(&[2]).unwrap();
        let graded = GradedComplex::new(&complex, |cell: usize| {
            i64::from(complex.cell_dim(cell) == 1)
        })
        .unwrap();
        let matrix = ConnectionMatrix::compute(&graded);

        let (betti, by_grade) = matrix.count();
        assert_eq!(betti, vec![2, 0]);
        assert_eq!(by_grade[&0], vec![2, 0]);
        assert_eq!(by_grade[&1], vec![0, 2]);

        let first_edge = complex.cell_index(&[0], 1).unwrap();
        let second_vertex = complex.cell_index(&[1], 0).unwrap();
        assert_eq!(matrix.entries(), vec![(first_edge, second_vertex)]);
        assert_eq!(matrix.basis().len(), 4);
    }
}
