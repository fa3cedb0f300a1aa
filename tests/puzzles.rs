use dlx::{Heuristic, Matrix, SearchConfig, Solution};
use std::ops::ControlFlow;

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A placement of digit `val` at row `row` and column `col` of a Sudoku grid,
/// all 0-based.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
struct Placement {
    row: usize,
    col: usize,
    val: usize,
}

impl Placement {
    /// The four constraints satisfied by this placement: the cell is filled,
    /// and the digit appears in its row, its column and its box. There are
    /// 81 columns of the matrix for each kind of constraint.
    fn columns(self) -> [usize; 4] {
        let Self { row, col, val } = self;
        let square = (row / 3) * 3 + col / 3;
        [
            1 + row * 9 + col,
            1 + 81 + row * 9 + val,
            1 + 162 + col * 9 + val,
            1 + 243 + square * 9 + val,
        ]
    }
}

/// Builds the exact cover matrix of a Sudoku puzzle. Digits `1`–`9` are
/// givens, and any other character is an empty cell. The returned table maps
/// every row of the matrix to its placement.
fn sudoku(puzzle: &str, config: SearchConfig) -> (Matrix, Vec<Placement>) {
    let cells: Vec<Option<usize>> = puzzle
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_digit(10).filter(|&d| d > 0).map(|d| d as usize - 1))
        .collect();
    assert_eq!(cells.len(), 81);

    let mut matrix = Matrix::with_config(324, config);
    let mut placements = Vec::new();
    for (cell, given) in cells.into_iter().enumerate() {
        let (row, col) = (cell / 9, cell % 9);
        for val in 0..9 {
            if given.is_some_and(|g| g != val) {
                continue;
            }
            let placement = Placement { row, col, val };
            let id = matrix.add_row(placement.columns()).unwrap();
            assert_eq!(id.get(), placements.len());
            placements.push(placement);
        }
    }
    (matrix, placements)
}

/// Converts an exact cover of a Sudoku matrix back into a filled grid.
fn decode(solution: Solution<'_>, placements: &[Placement]) -> [[usize; 9]; 9] {
    let mut grid = [[0; 9]; 9];
    for id in solution.row_ids() {
        let Placement { row, col, val } = placements[id.get()];
        assert_eq!(grid[row][col], 0, "cell ({row}, {col}) filled twice");
        grid[row][col] = val + 1;
    }
    grid
}

fn assert_valid_grid(grid: &[[usize; 9]; 9]) {
    let full = |digits: &mut dyn Iterator<Item = usize>| {
        let mut seen = [false; 10];
        for d in digits {
            seen[d] = true;
        }
        seen[1..].iter().all(|&s| s)
    };
    for i in 0..9 {
        assert!(full(&mut grid[i].iter().copied()), "row {i}");
        assert!(full(&mut (0..9).map(|r| grid[r][i])), "column {i}");
        let (r0, c0) = ((i / 3) * 3, (i % 3) * 3);
        assert!(
            full(&mut (0..9).map(|k| grid[r0 + k / 3][c0 + k % 3])),
            "box {i}"
        );
    }
}

const PUZZLE: &str = "
    53..7....
    6..195...
    .98....6.
    8...6...3
    4..8.3..1
    7...2...6
    .6....28.
    ...419..5
    ....8..79
";

const SOLUTION: [[usize; 9]; 9] = [
    [5, 3, 4, 6, 7, 8, 9, 1, 2],
    [6, 7, 2, 1, 9, 5, 3, 4, 8],
    [1, 9, 8, 3, 4, 2, 5, 6, 7],
    [8, 5, 9, 7, 6, 1, 4, 2, 3],
    [4, 2, 6, 8, 5, 3, 7, 9, 1],
    [7, 1, 3, 9, 2, 4, 8, 5, 6],
    [9, 6, 1, 5, 3, 7, 2, 8, 4],
    [2, 8, 7, 4, 1, 9, 6, 3, 5],
    [3, 4, 5, 2, 8, 6, 1, 7, 9],
];

#[test]
fn sudoku_with_unique_solution() {
    init_logger();
    let (mut matrix, placements) = sudoku(PUZZLE, SearchConfig::default());

    let mut count = 0;
    let stopped = matrix.search(|solution| {
        assert_eq!(solution.len(), 81);
        // The rows of the solution partition the 324 columns.
        let mut covered: Vec<usize> = solution.rows().flat_map(|row| row.columns()).collect();
        covered.sort_unstable();
        assert_eq!(covered, (1..=324).collect::<Vec<_>>());

        assert_eq!(decode(solution, &placements), SOLUTION);
        count += 1;
        false
    });
    assert!(!stopped);
    assert_eq!(count, 1);
    assert_eq!(matrix.stats().solutions, 1);
}

#[test]
fn sudoku_solvers_agree() {
    let (mut matrix, _) = sudoku(PUZZLE, SearchConfig::default());
    let mut recursive = Vec::new();
    matrix.search(|solution| {
        recursive.extend(solution.row_ids());
        false
    });
    let recursive_stats = matrix.stats();

    let mut iterative = Vec::new();
    matrix.solve(|solution| {
        iterative.extend(solution.row_ids());
        ControlFlow::Continue(())
    });
    assert_eq!(recursive, iterative);
    assert_eq!(recursive_stats, matrix.stats());
}

#[test]
fn empty_sudoku_stops_at_first_solution() {
    init_logger();
    let (mut matrix, placements) = sudoku(&".".repeat(81), SearchConfig::default());
    assert_eq!(matrix.row_count(), 729);

    let mut count = 0;
    let stopped = matrix.search(|solution| {
        assert_valid_grid(&decode(solution, &placements));
        count += 1;
        true
    });
    assert!(stopped);
    assert_eq!(count, 1);

    // The matrix is ready for another search after an early stop.
    let mut first = None;
    let stopped = matrix.solve(|solution| {
        first = Some(decode(solution, &placements));
        ControlFlow::Break(())
    });
    assert!(stopped);
    assert_valid_grid(&first.unwrap());
}

#[test]
fn contradictory_sudoku_has_no_solution() {
    // Two 5s in the first row.
    let puzzle = format!("55{}", ".".repeat(79));
    let (mut matrix, _) = sudoku(&puzzle, SearchConfig::default());
    assert!(!matrix.search(|_| panic!("found a solution")));
    assert_eq!(matrix.stats().solutions, 0);
}

/// Builds the matrix of Langford's problem of order `n`, without removing
/// symmetric solutions. Columns $1,\dots,n$ are the numbers, and the next
/// $2n$ are the slots.
fn langford(n: usize, config: SearchConfig) -> Matrix {
    let mut matrix = Matrix::with_config(3 * n, config);
    for i in 1..=n {
        for j in 1..2 * n - i {
            let k = i + j + 1;
            matrix.add_row([i, n + j, n + k]).unwrap();
        }
    }
    matrix
}

fn langford_sequences(matrix: &mut Matrix, n: usize) -> Vec<Vec<usize>> {
    let mut sequences = Vec::new();
    matrix.search(|solution| {
        let mut sequence = vec![0; 2 * n];
        for row in solution.rows() {
            let columns: Vec<usize> = row.columns().collect();
            sequence[columns[1] - n - 1] = columns[0];
            sequence[columns[2] - n - 1] = columns[0];
        }
        sequences.push(sequence);
        false
    });
    sequences.sort();
    sequences
}

#[test]
fn langford_pairs() {
    for heuristic in [Heuristic::MinimumSize, Heuristic::FirstColumn] {
        let config = SearchConfig::default().with_heuristic(heuristic);

        let mut matrix = langford(3, config);
        assert_eq!(
            langford_sequences(&mut matrix, 3),
            [vec![2, 3, 1, 2, 1, 3], vec![3, 1, 2, 1, 3, 2]]
        );

        let mut matrix = langford(4, config);
        assert_eq!(
            langford_sequences(&mut matrix, 4),
            [vec![2, 3, 4, 2, 1, 3, 1, 4], vec![4, 1, 3, 1, 2, 4, 3, 2]]
        );

        // There are no Langford pairings when $n\equiv1$ or $n\equiv2$ (modulo 4).
        let mut matrix = langford(5, config);
        assert!(langford_sequences(&mut matrix, 5).is_empty());
        let mut matrix = langford(6, config);
        assert!(!matrix.solve(|_| panic!("found a Langford pairing of order 6")));
    }
}

#[test]
fn langford_pairs_of_order_seven() {
    let mut matrix = langford(7, SearchConfig::default());
    let mut count = 0;
    let stopped = matrix.solve(|solution| {
        assert_eq!(solution.len(), 7);
        count += 1;
        ControlFlow::Continue(())
    });
    assert!(!stopped);
    // 26 pairings, each counted along with its reverse.
    assert_eq!(count, 52);
    assert_eq!(matrix.stats().solutions, 52);
}
