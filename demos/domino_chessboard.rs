//! This program determines in how many ways can 32 dominoes fill an $8\times8$
//! chessboard. We set up an exact cover problem with one column for each of
//! the $8\times8=64$ cells, and one row for each of the $2\times8\times7=112$
//! placements of a domino.
//!
//! P. W. Kasteleyn obtained a closed formula for the number of domino coverings
//! of an $m\times n$ rectangle \[_Physica_ **27** (1961), pp. 1209–1225].
//! Interested readers can learn more by working out exercise 7.51 in the second
//! edition of the book _Concrete Mathematics_ (Addison–Wesley, 1994) by R. Graham,
//! D. E. Knuth and O. Patashnik.
use dlx::{Matrix, RowError};
use std::ops::ControlFlow;

/// The number $m$ of rows of the board, also known as _ranks_.
const ROWS: usize = 8;

/// The number $n$ of columns of the board, also known as _files_.
const COLUMNS: usize = 8;

/// Returns the matrix column of the cell at rank `x` and file `y`.
fn cell(x: usize, y: usize) -> usize {
    x * COLUMNS + y + 1
}

fn main() -> Result<(), RowError> {
    env_logger::init();

    let mut matrix = Matrix::new(ROWS * COLUMNS);

    // There's a row for each pair of adjacent cells. We start with the
    // $m(n-1)$ horizontal placements,
    for x0 in 0..ROWS {
        for y0 in 0..COLUMNS - 1 {
            matrix.add_row([cell(x0, y0), cell(x0, y0 + 1)])?;
        }
    }
    // and continue with the $n(m-1)$ vertical ones. To reduce symmetry, insist
    // that the domino occupying the upper left cell is laid out horizontally.
    for y0 in 0..COLUMNS {
        for x0 in usize::from(y0 == 0)..ROWS - 1 {
            matrix.add_row([cell(x0, y0), cell(x0 + 1, y0)])?;
        }
    }

    // Count the number of solutions, taking symmetry into account. The board
    // has 64 columns, so we use the iterative solver.
    let mut count = 0;
    matrix.solve(|_| {
        count += 2;
        ControlFlow::Continue(())
    });
    assert_eq!(count, 12_988_816);
    println!("{count} domino tilings, {:?}", matrix.stats());
    Ok(())
}
