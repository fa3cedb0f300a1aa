/// The rule used to choose the column on which the search branches.
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub enum Heuristic {
    /// Choose an uncovered column whose vertical list is of minimum length,
    /// breaking ties by position in the horizontal list. Knuth calls this the
    /// "minimum remaining values" (MRV) heuristic; it keeps the branching
    /// factor of the search tree small.
    #[default]
    MinimumSize,
    /// Always choose the leftmost uncovered column.
    FirstColumn,
}

impl Heuristic {
    /// Returns the score $h(c)$ of a column with `size` active nodes.
    /// The search branches on a column with the smallest score.
    pub(crate) fn score(self, size: usize) -> usize {
        match self {
            Self::MinimumSize => size,
            Self::FirstColumn => 0,
        }
    }
}

/// Tunable parameters of [`Matrix::search`] and [`Matrix::solve`].
///
/// [`Matrix::search`]: crate::Matrix::search
/// [`Matrix::solve`]: crate::Matrix::solve
#[derive(Debug, Default, Eq, PartialEq, Copy, Clone)]
pub struct SearchConfig {
    /// How to pick the next column to cover.
    pub heuristic: Heuristic,
}

impl SearchConfig {
    /// Replaces the branching heuristic.
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_prefers_small_columns() {
        let config = SearchConfig::default();
        assert_eq!(config.heuristic, Heuristic::MinimumSize);
        assert!(config.heuristic.score(1) < config.heuristic.score(4));
    }

    #[test]
    fn first_column_scores_every_column_equally() {
        let config = SearchConfig::default().with_heuristic(Heuristic::FirstColumn);
        assert_eq!(config.heuristic.score(0), config.heuristic.score(100));
    }
}
