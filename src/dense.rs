//! # Dense reachability matrices
//!
//! A [`DenseMatrix`] is a fully materialised `V × V` relation stored as a
//! single row-major [`BitVec`]. Cell `(i, j)` set means vertex `i` reaches
//! vertex `j`. Rows are always exactly `V` bits wide: the only way to build
//! a matrix from caller data is [`DenseMatrix::try_from_rows`], which rejects
//! ragged or non-square input before anything is stored.

use std::fmt;

use bitvec::{bitvec, slice::BitSlice, vec::BitVec};

use crate::{error::MalformedGraph, presence::Presence};

#[derive(Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct DenseMatrix {
    n: usize,
    bits: BitVec,
}

impl DenseMatrix {
    /// An `n × n` matrix with no cells set.
    pub fn new(n: usize) -> Self {
        DenseMatrix {
            n,
            bits: bitvec![0; n * n],
        }
    }

    /// An `n × n` matrix with only the diagonal set.
    pub fn identity(n: usize) -> Self {
        let mut matrix = Self::new(n);
        matrix.seed_diagonal();
        matrix
    }

    /// Builds a matrix from a sequence of rows of boolean-like values.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedGraph::RowLength`] for the first row whose length
    /// differs from the number of rows.
    pub fn try_from_rows<R, B>(rows: &[R]) -> Result<Self, MalformedGraph>
    where
        R: AsRef<[B]>,
        B: Presence,
    {
        let n = rows.len();
        for (row, cells) in rows.iter().enumerate() {
            let len = cells.as_ref().len();
            if len != n {
                return Err(MalformedGraph::RowLength {
                    row,
                    len,
                    expected: n,
                });
            }
        }

        let bits = rows
            .iter()
            .flat_map(|cells| cells.as_ref().iter().map(Presence::is_present))
            .collect();
        Ok(DenseMatrix { n, bits })
    }

    /// Number of vertices (rows).
    pub fn len(&self) -> usize {
        self.n
    }

    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    #[inline]
    fn offset(&self, i: usize, j: usize) -> usize {
        i * self.n + j
    }

    /// Cell `(i, j)`, or `None` if either index is out of range.
    pub fn get(&self, i: usize, j: usize) -> Option<bool> {
        if i < self.n && j < self.n {
            Some(self.bits[self.offset(i, j)])
        } else {
            None
        }
    }

    /// Whether `i` reaches `j`. Out-of-range indices reach nothing.
    pub fn reaches(&self, i: usize, j: usize) -> bool {
        self.get(i, j).unwrap_or(false)
    }

    /// Sets cell `(i, j)`, returning `true` if it was not set before.
    ///
    /// # Panics
    ///
    /// Panics if `i` or `j` is not below [`len`](Self::len).
    pub fn insert(&mut self, i: usize, j: usize) -> bool {
        assert!(
            i < self.n && j < self.n,
            "cell ({i}, {j}) out of range for a {n}x{n} matrix",
            n = self.n
        );
        let offset = self.offset(i, j);
        !self.bits.replace(offset, true)
    }

    /// Sets every `(v, v)` cell, returning how many were newly set.
    pub fn seed_diagonal(&mut self) -> usize {
        (0..self.n).filter(|&v| self.insert(v, v)).count()
    }

    /// Row `i` as a bit slice.
    ///
    /// # Panics
    ///
    /// Panics if `i` is not below [`len`](Self::len).
    pub fn row(&self, i: usize) -> &BitSlice {
        &self.bits[i * self.n..(i + 1) * self.n]
    }

    /// Every `j` such that `i` reaches `j`, in increasing order.
    pub fn successors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.row(i).iter_ones()
    }

    /// Number of set cells.
    pub fn edge_count(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        (0..self.n)
            .map(|i| self.row(i).iter().by_vals().collect())
            .collect()
    }

    pub(crate) fn bits_mut(&mut self) -> &mut BitSlice {
        &mut self.bits
    }
}

impl<B: Presence> TryFrom<Vec<Vec<B>>> for DenseMatrix {
    type Error = MalformedGraph;

    fn try_from(rows: Vec<Vec<B>>) -> Result<Self, Self::Error> {
        Self::try_from_rows(&rows)
    }
}

/// One line per row, `1` for a set cell and `0` otherwise.
impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.n {
            if i != 0 {
                writeln!(f)?;
            }
            for bit in self.row(i).iter().by_vals() {
                f.write_str(if bit { "1" } else { "0" })?;
            }
        }
        Ok(())
    }
}
