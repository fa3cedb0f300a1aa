//! This crate provides an implementation of D. E. Knuth's _Algorithm X_ for
//! solving the exact cover problem by means of _dancing links_.
//!
//! Suppose we're given a matrix of 0s and 1s; the _exact cover_ problem is
//! to find a set of rows such that every column contains exactly one 1 in
//! those rows. Knuth proposed a method that achieves this goal in the paper
//! "Dancing Links", [arXiv:cs/0011047][dl] [cs.DS] (2000), whose title
//! refers to a clever yet simple technique for deleting and restoring the
//! nodes of a doubly linked list. His backtracking scheme employs this
//! "waltzing" of links to visit all exact covers of the matrix in a
//! depth-first manner. [For further information, see Section 7.2.2.1 of
//! [_The Art of Computer Programming_ **4B** (2022)][taocp4b], Part 2, 65–70.]
//!
//! The 1s of the matrix are stored in a toroidal structure of nodes: each
//! node lies on a circular list of the nodes in its row and on a circular
//! list of the nodes in its column, and every column has a header node that
//! also belongs to a circular list of the columns still to be covered.
//! The nodes live in a single arena and refer to each other by position, so
//! removing a node from both of its lists and putting it back are $O(1)$
//! operations.
//!
//! The following structures are the most important pieces of this crate:
//! - [`Matrix`] holds the toroidal structure. Rows are added with
//!   [`Matrix::add_row`], and the exact covers are visited with
//!   [`Matrix::search`] (recursive) or [`Matrix::solve`] (iterative).
//! - [`Solution`] is the view of an exact cover handed to the visitor. Its
//!   [rows](Row) report the columns they cover, in the order in which they
//!   were inserted.
//!
//! Translating a puzzle into matrix rows, and the chosen rows back into a
//! puzzle solution, is left to the caller. The `demos` directory contains
//! two such translations:
//! - `langford_pairs.rs` finds all [Langford pairings] of $2n$ numbers.
//! - `domino_chessboard.rs` counts the ways to pack 32 dominoes into a
//!   chessboard.
//!
//! # Examples
//!
//! Knuth's paper begins with the following matrix, whose only exact cover
//! consists of rows 1, 4 and 5 (counting from 1):
//! \\[
//! \begin{pmatrix}
//! 0&0&1&0&1&1&0\\\\
//! 1&0&0&1&0&0&1\\\\
//! 0&1&1&0&0&1&0\\\\
//! 1&0&0&1&0&0&0\\\\
//! 0&1&0&0&0&0&1\\\\
//! 0&0&0&1&1&0&1
//! \end{pmatrix}
//! \\]
//!
//! ```
//! use dlx::{Matrix, RowId};
//!
//! let mut matrix = Matrix::new(7);
//! matrix.add_row([3, 5, 6])?;
//! matrix.add_row([1, 4, 7])?;
//! matrix.add_row([2, 3, 6])?;
//! matrix.add_row([1, 4])?;
//! matrix.add_row([2, 7])?;
//! matrix.add_row([4, 5, 7])?;
//!
//! let mut solutions = Vec::new();
//! let stopped = matrix.search(|solution| {
//!     let mut rows: Vec<usize> = solution.row_ids().map(RowId::get).collect();
//!     rows.sort();
//!     solutions.push(rows);
//!     false // Keep looking for more solutions.
//! });
//! assert!(!stopped);
//! assert_eq!(solutions, [vec![0, 3, 4]]);
//! # Ok::<(), dlx::RowError>(())
//! ```
//!
//! [dl]: https://arxiv.org/pdf/cs/0011047.pdf
//! [taocp4b]: https://www-cs-faculty.stanford.edu/~knuth/taocp.html#vol4
//! [Langford pairings]: https://en.wikipedia.org/wiki/Langford_pairing

mod config;
mod dl;
mod error;
mod indices;

pub use config::{Heuristic, SearchConfig};
pub use dl::{Matrix, SearchStats};
pub use error::RowError;
pub use indices::RowId;

use indices::NodeIndex;

use std::fmt;
use std::iter::FusedIterator;

/// An exact cover found by [`Matrix::search`] or [`Matrix::solve`].
///
/// The rows appear in the order in which they were chosen, that is, by
/// increasing depth in the search tree.
#[derive(Clone, Copy)]
pub struct Solution<'s> {
    /// The matrix that found the exact cover.
    matrix: &'s Matrix,
    /// One node of each chosen row: the node in the column that the search
    /// was branching on when the row was chosen.
    nodes: &'s [NodeIndex],
}

impl<'s> Solution<'s> {
    pub(crate) fn new(matrix: &'s Matrix) -> Self {
        Self {
            matrix,
            nodes: matrix.path(),
        }
    }

    /// Returns the number of rows in the solution.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether the solution has no rows, which happens only when the
    /// matrix has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns an iterator over the rows of the solution, in depth order.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = Row<'s>> + 's {
        let matrix = self.matrix;
        self.nodes.iter().map(move |&ix| matrix.row_of(ix))
    }

    /// Returns an iterator over the identifiers of the rows of the solution,
    /// in depth order.
    pub fn row_ids(&self) -> impl ExactSizeIterator<Item = RowId> + 's {
        self.rows().map(|row| row.id())
    }
}

impl fmt::Debug for Solution<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.row_ids().map(RowId::get))
            .finish()
    }
}

/// A row of a [`Matrix`].
#[derive(Clone, Copy)]
pub struct Row<'m> {
    matrix: &'m Matrix,
    id: RowId,
    /// The position of the first node of the row.
    first: NodeIndex,
}

impl<'m> Row<'m> {
    pub(crate) fn new(matrix: &'m Matrix, id: RowId, first: NodeIndex) -> Self {
        Self { matrix, id, first }
    }

    /// Returns the identifier that [`Matrix::add_row`] assigned to this row.
    #[must_use]
    pub fn id(&self) -> RowId {
        self.id
    }

    /// Returns the number of columns in which this row has a 1.
    #[must_use]
    pub fn len(&self) -> usize {
        self.matrix.row_len(self.id)
    }

    /// Always returns `false`, because [`Matrix::add_row`] rejects empty rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns an iterator over the columns of this row, in the order given
    /// to [`Matrix::add_row`].
    pub fn columns(&self) -> Columns<'m> {
        Columns {
            matrix: self.matrix,
            first: self.first,
            next: Some(self.first),
        }
    }
}

impl fmt::Debug for Row<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Row")
            .field("id", &self.id.get())
            .field("columns", &self.columns().collect::<Vec<_>>())
            .finish()
    }
}

/// An iterator over the columns of a [`Row`], which walks the horizontal
/// list of the row from its first node.
#[derive(Clone)]
pub struct Columns<'m> {
    matrix: &'m Matrix,
    first: NodeIndex,
    /// The node to visit next, or `None` once we are back at `first`.
    next: Option<NodeIndex>,
}

impl Iterator for Columns<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let ix = self.next?;
        let (column, right) = self.matrix.column_and_right(ix);
        self.next = (right != self.first).then_some(right);
        Some(column.get())
    }
}

impl FusedIterator for Columns<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_report_their_columns_in_insertion_order() {
        let mut matrix = Matrix::new(5);
        matrix.add_row([2, 5]).unwrap();
        let id = matrix.add_row([4, 1, 3]).unwrap();

        let row = matrix.row(id).unwrap();
        assert_eq!(row.id(), id);
        assert_eq!(row.len(), 3);
        assert!(!row.is_empty());
        let mut columns = row.columns();
        assert_eq!(columns.next(), Some(4));
        assert_eq!(columns.next(), Some(1));
        assert_eq!(columns.next(), Some(3));
        assert_eq!(columns.next(), None);
        assert_eq!(columns.next(), None);

        assert_eq!(format!("{row:?}"), "Row { id: 1, columns: [4, 1, 3] }");
        assert!(matrix.row(RowId::new(2)).is_none());
    }

    #[test]
    fn single_column_row() {
        let mut matrix = Matrix::new(1);
        let id = matrix.add_row([1]).unwrap();
        let row = matrix.row(id).unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.columns().collect::<Vec<_>>(), [1]);
    }

    #[test]
    fn solution_rows_start_at_their_first_node() {
        // Column 3 has the fewest rows, so the search reaches row 0 through
        // its last node. The row must still be reported from the start.
        let mut matrix = Matrix::new(3);
        matrix.add_row([1, 2, 3]).unwrap();
        matrix.add_row([1]).unwrap();
        matrix.add_row([2]).unwrap();
        matrix.add_row([1, 2]).unwrap();

        let mut found = Vec::new();
        matrix.search(|solution| {
            assert_eq!(solution.len(), 1);
            assert_eq!(format!("{solution:?}"), "[0]");
            found.extend(solution.rows().map(|row| row.columns().collect::<Vec<_>>()));
            false
        });
        assert_eq!(found, [vec![1, 2, 3]]);
    }
}
