use crate::config::SearchConfig;
use crate::error::RowError;
use crate::indices::{ColumnIndex, NodeIndex, RowId, HEAD};
use crate::{Row, Solution};
use log::{debug, trace};
use std::ops::ControlFlow;

/// A cell of the toroidal data structure of a [`Matrix`]. Every node lies
/// on two circular doubly linked lists at once: the vertical list of its
/// column, and the horizontal list of its row.
///
/// Column headers are nodes too. The header of column $c$ sits at position
/// $c$ of the arena, belongs to its own column, and uses its horizontal links
/// for the list of uncovered columns instead of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    /// The column this node belongs to.
    ///
    /// This field corresponds to the `TOP` pointer in Knuth's data structure.
    column: ColumnIndex,
    /// The first node of the row that contains this node, from which the
    /// whole row can be recovered. A column header points to itself.
    first: NodeIndex,
    /// The previous node in the vertical list of `column`, in cyclic order.
    /// The contents of this variable are preserved when the node is removed
    /// from the list, which is what makes the dancing links technique work.
    up: NodeIndex,
    /// The next node in the vertical list of `column`, in cyclic order.
    /// (See `self.up` for details.)
    down: NodeIndex,
    /// The previous node in the row, or the previous uncovered column if this
    /// is a header.
    left: NodeIndex,
    /// The next node in the row, or the next uncovered column if this is
    /// a header.
    right: NodeIndex,
}

impl Node {
    /// Creates the header of a column whose vertical list is empty.
    fn header(ix: ColumnIndex, left: NodeIndex, right: NodeIndex) -> Self {
        let node = ix.node();
        Self {
            column: ix,
            first: node,
            up: node,
            down: node,
            left,
            right,
        }
    }
}

/// Counters describing the most recent call to [`Matrix::search`] or
/// [`Matrix::solve`].
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub struct SearchStats {
    /// The number of solutions passed to the visitor.
    pub solutions: u64,
    /// The number of nodes of the search tree that were entered, including
    /// the root and the leaves.
    pub nodes: u64,
    /// The number of times a node was removed from a vertical list.
    pub updates: u64,
}

/// A sparse 0–1 matrix that visits all of its exact covers by means of
/// dancing links.
///
/// More precisely, this structure embodies an implementation of Algorithm X,
/// as presented by D. E. Knuth in the paper "Dancing links",
/// [arXiv:cs/0011047][dl] [cs.DS] (2000). Columns are numbered from 1 to
/// [`column_count`](Self::column_count); each call to
/// [`add_row`](Self::add_row) inserts a row with a 1 in the given columns.
///
/// [dl]: https://arxiv.org/pdf/cs/0011047.pdf
#[derive(Debug)]
pub struct Matrix {
    /// The node arena. Positions $0,1,\dots,n$ hold the column headers, with
    /// the head of the horizontal list at position 0; the nodes of each row
    /// follow contiguously in insertion order.
    nodes: Vec<Node>,
    /// The number of nodes in the vertical list of each column. Entry 0
    /// belongs to the head and is always zero.
    sizes: Vec<usize>,
    /// The position of the first node of every row, in insertion order.
    rows: Vec<NodeIndex>,
    /// A stack with the node chosen at each level of the current search.
    solution: Vec<NodeIndex>,
    config: SearchConfig,
    stats: SearchStats,
}

impl Matrix {
    /// Creates a matrix with `size` columns and no rows, using the default
    /// [`SearchConfig`].
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self::with_config(size, SearchConfig::default())
    }

    /// Creates a matrix with `size` columns and no rows.
    ///
    /// The columns are linked into the horizontal list in index order, and
    /// each vertical list starts out empty.
    #[must_use]
    pub fn with_config(size: usize, config: SearchConfig) -> Self {
        let nodes = (0..=size)
            .map(|ix| {
                let left = if ix == 0 { size } else { ix - 1 };
                let right = if ix == size { 0 } else { ix + 1 };
                Node::header(ColumnIndex::new(ix), left, right)
            })
            .collect();
        debug!("created exact cover matrix with {size} columns");
        Self {
            nodes,
            sizes: vec![0; size + 1],
            rows: Vec::new(),
            solution: Vec::new(),
            config,
            stats: SearchStats::default(),
        }
    }

    // Problem setup routines.

    /// Appends a row with a 1 in each of the given columns.
    ///
    /// The nodes of the row are linked horizontally in the order given by
    /// `columns`, and each node goes to the bottom of its column.
    ///
    /// # Errors
    ///
    /// The row is rejected, and the matrix left untouched, if `columns` is
    /// empty, names a column outside `1..=self.column_count()`, or names the
    /// same column twice.
    pub fn add_row<R>(&mut self, columns: R) -> Result<RowId, RowError>
    where
        R: AsRef<[usize]>,
    {
        let columns = columns.as_ref();
        self.check_row(columns)?;

        let first = self.nodes.len();
        let len = columns.len();
        self.nodes.reserve(len);
        for (offset, &column) in columns.iter().enumerate() {
            let ix = first + offset;
            let column = ColumnIndex::new(column);
            let header = column.node();
            // Append the node at the bottom of the vertical list.
            let above = self.nodes[header].up;
            self.nodes.push(Node {
                column,
                first,
                up: above,
                down: header,
                left: if offset == 0 { first + len - 1 } else { ix - 1 },
                right: if offset + 1 == len { first } else { ix + 1 },
            });
            self.nodes[above].down = ix;
            self.nodes[header].up = ix;
            self.sizes[column.get()] += 1;
        }

        let id = RowId::new(self.rows.len());
        self.rows.push(first);
        Ok(id)
    }

    fn check_row(&self, columns: &[usize]) -> Result<(), RowError> {
        if columns.is_empty() {
            return Err(RowError::Empty);
        }
        let size = self.column_count();
        for (ix, &column) in columns.iter().enumerate() {
            if column == HEAD.get() || column > size {
                return Err(RowError::ColumnOutOfRange { column, size });
            }
            if columns[..ix].contains(&column) {
                return Err(RowError::DuplicateColumn { column });
            }
        }
        Ok(())
    }

    // Algorithm X routines.

    /// Marks a column as covered by deleting it from the horizontal list,
    /// and by deleting every row that has a node in the column from the
    /// vertical lists of all other columns. The vertical list of `ix` itself
    /// is left intact.
    fn cover(&mut self, ix: ColumnIndex) {
        let header = ix.node();
        let Node { left, right, .. } = self.nodes[header];
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        // Hide the rows from top to bottom, each from left to right.
        let mut row_ix = self.nodes[header].down;
        while row_ix != header {
            let mut cur_ix = self.nodes[row_ix].right;
            while cur_ix != row_ix {
                let Node {
                    column, up, down, ..
                } = self.nodes[cur_ix];
                self.nodes[up].down = down;
                self.nodes[down].up = up;
                self.sizes[column.get()] -= 1;
                self.stats.updates += 1;
                cur_ix = self.nodes[cur_ix].right;
            }
            row_ix = self.nodes[row_ix].down;
        }
    }

    /// Undoes the updates made by the last [covering](`Self::cover`) of
    /// column `ix`.
    ///
    /// The traversal mirrors the one in `cover`: rows from bottom to top,
    /// each from right to left. This order is what makes arbitrarily deep
    /// nestings of cover and uncover exactly reversible.
    fn uncover(&mut self, ix: ColumnIndex) {
        let header = ix.node();
        let mut row_ix = self.nodes[header].up;
        while row_ix != header {
            let mut cur_ix = self.nodes[row_ix].left;
            while cur_ix != row_ix {
                let Node {
                    column, up, down, ..
                } = self.nodes[cur_ix];
                self.sizes[column.get()] += 1;
                self.nodes[up].down = cur_ix;
                self.nodes[down].up = cur_ix;
                cur_ix = self.nodes[cur_ix].left;
            }
            row_ix = self.nodes[row_ix].up;
        }

        let Node { left, right, .. } = self.nodes[header];
        self.nodes[left].right = header;
        self.nodes[right].left = header;
    }

    /// Given a node that selects its row to cover its column $c$, covers
    /// every other column of that row, cyclically from left to right.
    fn cover_row_of(&mut self, ix: NodeIndex) {
        let mut cur_ix = self.nodes[ix].right;
        while cur_ix != ix {
            self.cover(self.nodes[cur_ix].column);
            cur_ix = self.nodes[cur_ix].right;
        }
    }

    /// Undoes [`Self::cover_row_of`], cyclically from right to left.
    fn uncover_row_of(&mut self, ix: NodeIndex) {
        let mut cur_ix = self.nodes[ix].left;
        while cur_ix != ix {
            self.uncover(self.nodes[cur_ix].column);
            cur_ix = self.nodes[cur_ix].left;
        }
    }

    /// Finds an uncovered column $c$ for which the configured heuristic
    /// $h(c)$ is minimum. In case of equality, ties are broken by using the
    /// position of $c$ within the horizontal list.
    ///
    /// Returns `None` if all columns have been covered.
    fn choose_column(&self) -> Option<ColumnIndex> {
        let heuristic = self.config.heuristic;
        let mut min_h = usize::MAX;
        let mut min_ix = None;
        let mut cur_ix = self.nodes[HEAD.node()].right;
        while cur_ix != HEAD.node() {
            let h = heuristic.score(self.sizes[cur_ix]);
            if h < min_h {
                // If $h(c)=0$, then $c$ is surely the result.
                if h == 0 {
                    return Some(ColumnIndex::new(cur_ix));
                }
                min_h = h;
                min_ix = Some(ColumnIndex::new(cur_ix));
            }
            cur_ix = self.nodes[cur_ix].right;
        }
        min_ix
    }

    /// Calls a closure on each exact cover of the matrix, using the recursive
    /// formulation of Algorithm X.
    ///
    /// The enumeration stops as soon as `visit` returns `true`, in which case
    /// this function also returns `true`. It returns `false` once every
    /// solution has been visited, including when there are none.
    ///
    /// The matrix is restored to its original state before returning.
    /// The recursion depth is bounded by the number of columns; see
    /// [`Self::solve`] for a version that does not grow the call stack.
    pub fn search<F>(&mut self, mut visit: F) -> bool
    where
        F: FnMut(Solution<'_>) -> bool,
    {
        self.begin_search();
        let stopped = self.search_level(&mut visit);
        self.finish_search(stopped);
        stopped
    }

    fn search_level<F>(&mut self, visit: &mut F) -> bool
    where
        F: FnMut(Solution<'_>) -> bool,
    {
        self.stats.nodes += 1;
        let Some(column) = self.choose_column() else {
            // Every column is covered by the rows in `self.solution`.
            self.record_solution();
            return visit(Solution::new(self));
        };

        self.cover(column);
        let header = column.node();
        let mut stopped = false;
        let mut row_ix = self.nodes[header].down;
        while row_ix != header {
            self.solution.push(row_ix);
            self.cover_row_of(row_ix);
            stopped = self.search_level(visit);
            self.uncover_row_of(row_ix);
            self.solution.pop();
            if stopped {
                break;
            }
            row_ix = self.nodes[row_ix].down;
        }
        self.uncover(column);
        stopped
    }

    /// Calls a closure on each exact cover of the matrix.
    ///
    /// This is the iterative counterpart of [`Self::search`]: it keeps the
    /// chosen rows on an explicit stack instead of the call stack, and visits
    /// exactly the same solutions in exactly the same order. The solution
    /// process continues until the closure returns [`ControlFlow::Break`]
    /// or all solutions have been visited, whichever occurs first; the
    /// return value tells whether the closure stopped the enumeration.
    ///
    /// The matrix is restored to its original state before returning.
    pub fn solve<F>(&mut self, mut visit: F) -> bool
    where
        F: FnMut(Solution<'_>) -> ControlFlow<()>,
    {
        self.begin_search();
        let mut stopped = false;
        'outer: loop {
            // Choose rows for as many levels as possible, without backtracking.
            loop {
                self.stats.nodes += 1;
                let Some(column) = self.choose_column() else {
                    // All columns have been covered. Visit the solution
                    // given by the nodes in `self.solution`.
                    self.record_solution();
                    stopped = visit(Solution::new(self)).is_break();
                    break;
                };
                self.cover(column);
                let first_ix = self.nodes[column.node()].down;
                if first_ix == column.node() {
                    // No rows are left to cover the column; backtrack.
                    self.uncover(column);
                    break;
                }
                self.solution.push(first_ix);
                self.cover_row_of(first_ix);
            }
            // Leave the current level until we find a column that can be
            // covered with another row.
            while let Some(row_ix) = self.solution.pop() {
                self.uncover_row_of(row_ix);
                let Node { column, down, .. } = self.nodes[row_ix];
                if !stopped && down != column.node() {
                    self.solution.push(down);
                    self.cover_row_of(down);
                    continue 'outer;
                }
                // We have tried all rows for this column.
                self.uncover(column);
            }
            // We have explored the entire search tree, or the visitor asked
            // us to stop and the matrix has been restored.
            break;
        }
        self.finish_search(stopped);
        stopped
    }

    fn begin_search(&mut self) {
        self.solution.clear();
        self.stats = SearchStats::default();
        debug!(
            "searching {} columns and {} rows with {:?}",
            self.column_count(),
            self.row_count(),
            self.config.heuristic
        );
    }

    fn finish_search(&self, stopped: bool) {
        let SearchStats {
            solutions,
            nodes,
            updates,
        } = self.stats;
        debug!(
            "search {}: {solutions} solutions, {nodes} nodes, {updates} updates",
            if stopped { "stopped" } else { "exhausted" },
        );
    }

    fn record_solution(&mut self) {
        self.stats.solutions += 1;
        trace!(
            "solution #{} with {} rows",
            self.stats.solutions,
            self.solution.len()
        );
    }

    // Accessor methods.

    /// Returns the number of columns, excluding the head.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.sizes.len() - 1
    }

    /// Returns the number of rows inserted so far.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Returns the number of nodes in the vertical list of a column, or
    /// `None` if the column does not exist.
    #[must_use]
    pub fn column_size(&self, column: usize) -> Option<usize> {
        match column {
            0 => None,
            _ => self.sizes.get(column).copied(),
        }
    }

    /// Returns the row with the given identifier, if any.
    #[must_use]
    pub fn row(&self, id: RowId) -> Option<Row<'_>> {
        let first = *self.rows.get(id.get())?;
        Some(Row::new(self, id, first))
    }

    /// Returns the counters of the most recent search.
    #[must_use]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// Returns the search configuration.
    #[must_use]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Replaces the search configuration used by subsequent searches.
    pub fn set_config(&mut self, config: SearchConfig) {
        self.config = config;
    }

    /// Returns the row that contains the node at the given position.
    ///
    /// # Panics
    ///
    /// This function panics if the node is a column header.
    pub(crate) fn row_of(&self, ix: NodeIndex) -> Row<'_> {
        let first = self.nodes[ix].first;
        let id = self
            .rows
            .binary_search(&first)
            .unwrap_or_else(|_| panic!("node at index {ix} is not part of a row"));
        Row::new(self, RowId::new(id), first)
    }

    /// Returns the nodes selected at each level of the current search.
    pub(crate) fn path(&self) -> &[NodeIndex] {
        &self.solution
    }

    /// Returns the number of nodes in a row. The nodes of every row occupy
    /// consecutive positions of the arena.
    pub(crate) fn row_len(&self, id: RowId) -> usize {
        let first = self.rows[id.get()];
        let end = self
            .rows
            .get(id.get() + 1)
            .copied()
            .unwrap_or(self.nodes.len());
        end - first
    }

    /// Returns the column and the right neighbour of a node.
    pub(crate) fn column_and_right(&self, ix: NodeIndex) -> (ColumnIndex, NodeIndex) {
        let node = &self.nodes[ix];
        (node.column, node.right)
    }
}
