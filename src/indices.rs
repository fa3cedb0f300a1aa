/// The position of a column header in the node arena of a [`Matrix`].
///
/// Column headers occupy the first positions of the arena, so the index of a
/// header coincides with the 1-based column number seen by callers of
/// [`Matrix::add_row`]. Position 0 holds the [head](`HEAD`) of the horizontal
/// list of uncovered columns.
///
/// [`Matrix`]: `crate::Matrix`
/// [`Matrix::add_row`]: `crate::Matrix::add_row`
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
#[repr(transparent)]
pub(crate) struct ColumnIndex(usize);

impl ColumnIndex {
    /// Creates a new index.
    #[must_use]
    pub const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the index value as a primitive type.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }

    /// Returns the arena position of the header node of this column.
    pub(crate) const fn node(self) -> NodeIndex {
        self.0
    }
}

/// The special column that serves as the head of the horizontal list of
/// uncovered columns. It is never covered, and it has no vertical list.
pub(crate) const HEAD: ColumnIndex = ColumnIndex::new(0);

/// The position of a node in the sequential table of a [`Matrix`].
///
/// [`Matrix`]: `crate::Matrix`
pub(crate) type NodeIndex = usize;

/// Identifies a row of a [`Matrix`] by its insertion order, starting at 0.
///
/// [`Matrix`]: `crate::Matrix`
#[derive(Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Copy, Clone)]
#[repr(transparent)]
pub struct RowId(usize);

impl RowId {
    pub(crate) const fn new(ix: usize) -> Self {
        Self(ix)
    }

    /// Returns the insertion rank of the row.
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_get() {
        assert_eq!(ColumnIndex::new(0).get(), 0);
        assert_eq!(ColumnIndex::new(123).get(), 123);
        assert_eq!(ColumnIndex::new(456789).get(), 456789);

        assert_eq!(RowId::new(0).get(), 0);
        assert_eq!(RowId::new(87935).get(), 87935);
    }

    #[test]
    fn head_is_column_zero() {
        assert_eq!(HEAD, ColumnIndex::new(0));
        assert_eq!(HEAD.node(), 0);
    }

    #[test]
    fn row_ids_order_by_insertion() {
        assert!(RowId::new(2) < RowId::new(3));
        assert_eq!(RowId::new(7), RowId::new(7));
    }
}
