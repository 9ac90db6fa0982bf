//! Rectangular matrices over arithmetic elements.
//!
//! A [`Matrix`] is an immutable, non-empty grid of cells. All arithmetic goes
//! through the cells' own groups, so the same code multiplies fractions,
//! primitive numbers or matrices of matrices. Every operation returns a new
//! matrix.

use std::fmt;
use std::ops::Index;
use std::sync::{Arc, OnceLock};

use crate::element::{AdditiveElement, ArithmeticElement, MultiplicativeElement};
use crate::error::{MatrixError, Result};
use crate::group::{BiGroup, SharedGroup};
use crate::square_matrix::SquareMatrix;

/// Non-empty rectangular matrix, stored row-major.
#[derive(Clone)]
pub struct Matrix<T> {
    rows: Vec<Vec<T>>,
    ncols: usize,
    cell_algebra: OnceLock<BiGroup<T>>,
    algebra: OnceLock<BiGroup<Matrix<T>>>,
}

impl<T> Matrix<T> {
    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.ncols
    }

    /// `(n_rows, n_cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols())
    }

    /// Whether the matrix has as many rows as columns
    pub fn is_square(&self) -> bool {
        self.n_rows() == self.n_cols()
    }

    /// All rows
    pub fn rows(&self) -> &[Vec<T>] {
        &self.rows
    }

    /// Consume the matrix, returning its rows
    pub fn into_rows(self) -> Vec<Vec<T>> {
        self.rows
    }

    /// Row `i`
    pub fn row(&self, i: usize) -> Result<&[T]> {
        self.rows
            .get(i)
            .map(Vec::as_slice)
            .ok_or(MatrixError::RowOutOfBounds {
                row: i,
                nrows: self.n_rows(),
            })
    }

    /// Cell `(i, j)`
    pub fn get(&self, i: usize, j: usize) -> Result<&T> {
        self.rows
            .get(i)
            .and_then(|row| row.get(j))
            .ok_or(MatrixError::IndexOutOfBounds {
                row: i,
                col: j,
                nrows: self.n_rows(),
                ncols: self.n_cols(),
            })
    }

    fn check_same_shape(&self, other: &Matrix<T>, operation: &'static str) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(self.mismatch(other, operation));
        }
        Ok(())
    }

    fn mismatch(&self, other: &Matrix<T>, operation: &'static str) -> MatrixError {
        MatrixError::DimensionMismatch {
            operation,
            lhs_rows: self.n_rows(),
            lhs_cols: self.n_cols(),
            rhs_rows: other.n_rows(),
            rhs_cols: other.n_cols(),
        }
    }
}

impl<T: Clone> Matrix<T> {
    /// Column `j`
    pub fn column(&self, j: usize) -> Result<Vec<T>> {
        if j >= self.n_cols() {
            return Err(MatrixError::IndexOutOfBounds {
                row: 0,
                col: j,
                nrows: self.n_rows(),
                ncols: self.n_cols(),
            });
        }
        Ok(self.rows.iter().map(|row| row[j].clone()).collect())
    }

    /// Keep the cells whose row and column indices satisfy the predicates.
    ///
    /// The result may be empty; callers decide whether that is an error.
    pub(crate) fn select<R, C>(&self, mut keep_row: R, mut keep_col: C) -> Vec<Vec<T>>
    where
        R: FnMut(&[T], usize) -> bool,
        C: FnMut(usize) -> bool,
    {
        let cols: Vec<usize> = (0..self.n_cols()).filter(|&j| keep_col(j)).collect();
        self.rows
            .iter()
            .enumerate()
            .filter(|(i, row)| keep_row(row.as_slice(), *i))
            .map(|(_, row)| cols.iter().map(|&j| row[j].clone()).collect())
            .collect()
    }
}

impl<T: ArithmeticElement> Matrix<T> {
    /// Create a matrix from its rows.
    ///
    /// # Errors
    ///
    /// `EmptyMatrix` if there are no rows or the rows are empty, `RaggedRows`
    /// if the rows differ in length.
    ///
    /// # Example
    ///
    /// ```
    /// use exactmatrix::{Fraction, Matrix};
    ///
    /// let m = Matrix::new(vec![
    ///     vec![Fraction::of(1, 2), Fraction::ZERO],
    ///     vec![Fraction::ONE, Fraction::of(2, 3)],
    /// ])
    /// .unwrap();
    /// assert_eq!(m.to_string(), "1/2 0/1\n1/1 2/3");
    /// ```
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self> {
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        if ncols == 0 {
            return Err(MatrixError::EmptyMatrix);
        }
        if let Some((row, actual)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != ncols)
        {
            return Err(MatrixError::RaggedRows {
                row,
                expected: ncols,
                actual,
            });
        }
        Ok(Self::from_rows_unchecked(rows))
    }

    /// Create a matrix by evaluating `generator(i, j)` for every cell.
    pub fn from_fn<F>(nrows: usize, ncols: usize, generator: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        if nrows == 0 || ncols == 0 {
            return Err(MatrixError::EmptyMatrix);
        }
        Ok(Self::generate(nrows, ncols, generator))
    }

    /// All-zero matrix, zero taken from `algebra`.
    pub fn zeros(nrows: usize, ncols: usize, algebra: &BiGroup<T>) -> Result<Self> {
        let zero = algebra.zero();
        Ok(Self::from_fn(nrows, ncols, |_, _| zero.clone())?.with_cell_algebra(algebra.clone()))
    }

    /// Rows must be non-empty and rectangular.
    pub(crate) fn from_rows_unchecked(rows: Vec<Vec<T>>) -> Self {
        let ncols = rows.first().map(Vec::len).unwrap_or(0);
        Self {
            rows,
            ncols,
            cell_algebra: OnceLock::new(),
            algebra: OnceLock::new(),
        }
    }

    /// Dimensions must be non-zero.
    pub(crate) fn generate<F>(nrows: usize, ncols: usize, mut generator: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        Self::from_rows_unchecked(
            (0..nrows)
                .map(|i| (0..ncols).map(|j| generator(i, j)).collect())
                .collect(),
        )
    }

    /// Seed the cell algebra cache, e.g. when deriving a matrix from a parent.
    pub(crate) fn with_cell_algebra(self, algebra: BiGroup<T>) -> Self {
        Self {
            cell_algebra: OnceLock::from(algebra),
            algebra: OnceLock::new(),
            ..self
        }
    }

    /// Algebra of the cells, taken from cell `(0, 0)` on first use.
    pub fn cell_algebra(&self) -> &BiGroup<T> {
        self.cell_algebra.get_or_init(|| self.rows[0][0].bigroup())
    }

    pub(crate) fn zero_of_cells(&self) -> T {
        self.cell_algebra().zero()
    }

    pub(crate) fn one_of_cells(&self) -> T {
        self.cell_algebra().one()
    }

    pub(crate) fn derived(&self, rows: Vec<Vec<T>>) -> Self {
        Self::from_rows_unchecked(rows).with_cell_algebra(self.cell_algebra().clone())
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` unless both matrices have the same shape.
    pub fn add_with(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_same_shape(other, "add")?;
        Ok(self.map_indexed(|cell, i, j| cell.add(&other.rows[i][j])))
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` unless both matrices have the same shape.
    pub fn subtract_with(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        self.check_same_shape(other, "subtract")?;
        Ok(self.map_indexed(|cell, i, j| cell.subtract(&other.rows[i][j])))
    }

    /// Matrix product `self * other`.
    ///
    /// Cell `(i, j)` is the sum over `k` of `self[i][k] * other[k][j]`, using
    /// the cells' own addition and multiplication.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` unless `self.n_cols() == other.n_rows()`.
    pub fn multiply_by(&self, other: &Matrix<T>) -> Result<Matrix<T>> {
        if self.n_cols() != other.n_rows() {
            return Err(self.mismatch(other, "multiply"));
        }
        let rows = (0..self.n_rows())
            .map(|i| {
                (0..other.n_cols())
                    .map(|j| {
                        (1..self.n_cols()).fold(
                            self.rows[i][0].multiply(&other.rows[0][j]),
                            |acc, k| acc.add(&self.rows[i][k].multiply(&other.rows[k][j])),
                        )
                    })
                    .collect()
            })
            .collect();
        Ok(self.derived(rows))
    }

    /// Multiply every cell by `scalar`.
    pub fn scalar_multiply(&self, scalar: &T) -> Matrix<T> {
        self.map_indexed(|cell, _, _| cell.multiply(scalar))
    }

    /// Apply `mapper` to every cell.
    pub fn map<U, F>(&self, mut mapper: F) -> Matrix<U>
    where
        U: ArithmeticElement,
        F: FnMut(&T) -> U,
    {
        Matrix::generate(self.n_rows(), self.n_cols(), |i, j| mapper(&self.rows[i][j]))
    }

    fn map_indexed<F>(&self, mut mapper: F) -> Matrix<T>
    where
        F: FnMut(&T, usize, usize) -> T,
    {
        Matrix::generate(self.n_rows(), self.n_cols(), |i, j| {
            mapper(&self.rows[i][j], i, j)
        })
        .with_cell_algebra(self.cell_algebra().clone())
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> Matrix<T> {
        Matrix::generate(self.n_cols(), self.n_rows(), |i, j| self.rows[j][i].clone())
            .with_cell_algebra(self.cell_algebra().clone())
    }

    /// Keep the rows for which `predicate(row, row_index)` holds, in order.
    ///
    /// # Errors
    ///
    /// `EmptyMatrix` if no row is kept.
    pub fn filter_rows<P>(&self, predicate: P) -> Result<Matrix<T>>
    where
        P: FnMut(&[T], usize) -> bool,
    {
        self.non_empty(self.select(predicate, |_| true))
    }

    /// Keep the columns for which `predicate(column_values, column_index)`
    /// holds, in order.
    ///
    /// # Errors
    ///
    /// `EmptyMatrix` if no column is kept.
    pub fn filter_cols<P>(&self, mut predicate: P) -> Result<Matrix<T>>
    where
        P: FnMut(&[T], usize) -> bool,
    {
        let columns = self.transpose();
        let keep: Vec<bool> = columns
            .rows
            .iter()
            .enumerate()
            .map(|(j, column)| predicate(column.as_slice(), j))
            .collect();
        self.non_empty(self.select(|_, _| true, |j| keep[j]))
    }

    fn non_empty(&self, rows: Vec<Vec<T>>) -> Result<Matrix<T>> {
        if rows.first().map_or(true, Vec::is_empty) {
            return Err(MatrixError::EmptyMatrix);
        }
        Ok(self.derived(rows))
    }

    /// Identity matrix with as many rows as `self`.
    pub fn identity_of_same_row_size(&self) -> SquareMatrix<T> {
        SquareMatrix::identity_unchecked(self.n_rows(), self.cell_algebra())
    }

    /// Identity matrix with as many columns as `self`.
    pub fn identity_of_same_col_size(&self) -> SquareMatrix<T> {
        SquareMatrix::identity_unchecked(self.n_cols(), self.cell_algebra())
    }

    /// All-zero matrix of the same shape.
    pub fn zero_of_same_size(&self) -> Matrix<T> {
        let zero = self.zero_of_cells();
        self.map_indexed(|_, _, _| zero.clone())
    }

    /// View as a square matrix.
    ///
    /// # Errors
    ///
    /// `NotSquare` if the row and column counts differ.
    pub fn into_square(self) -> Result<SquareMatrix<T>> {
        SquareMatrix::from_matrix(self)
    }

    fn algebra(&self) -> &BiGroup<Matrix<T>> {
        self.algebra.get_or_init(|| {
            let minus_one = self.one_of_cells().additive_inverse();
            BiGroup::create(
                self.zero_of_same_size(),
                move |m: &Matrix<T>| m.scalar_multiply(&minus_one),
                |a: &Matrix<T>, b: &Matrix<T>| or_panic(a.add_with(b)),
                self.identity_of_same_col_size().into_matrix(),
                |m: &Matrix<T>| {
                    or_panic(
                        m.clone()
                            .into_square()
                            .and_then(|s| s.inverse())
                            .map(SquareMatrix::into_matrix),
                    )
                },
                |a: &Matrix<T>, b: &Matrix<T>| or_panic(a.multiply_by(b)),
            )
        })
    }
}

/// Group operations have no error channel; shape and singularity failures
/// surface as panics carrying the error message.
pub(crate) fn or_panic<V>(result: Result<V>) -> V {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{err}"),
    }
}

/// Matrices form an additive group under elementwise addition and a
/// multiplicative structure under the matrix product.
///
/// # Panics
///
/// The derived operators panic on shape mismatches, and the multiplicative
/// inverse panics for non-square or singular matrices. Use
/// [`Matrix::add_with`], [`Matrix::multiply_by`] and [`SquareMatrix::inverse`]
/// for checked variants.
impl<T: ArithmeticElement> AdditiveElement for Matrix<T> {
    fn additive_group(&self) -> SharedGroup<Self> {
        Arc::clone(self.algebra().additive())
    }
}

impl<T: ArithmeticElement> MultiplicativeElement for Matrix<T> {
    fn multiplicative_group(&self) -> SharedGroup<Self> {
        Arc::clone(self.algebra().multiplicative())
    }
}

crate::impl_arithmetic_ops!([T: ArithmeticElement] Matrix<T>);

impl<T> Index<usize> for Matrix<T> {
    type Output = [T];

    fn index(&self, i: usize) -> &Self::Output {
        &self.rows[i]
    }
}

impl<T> Index<[usize; 2]> for Matrix<T> {
    type Output = T;

    fn index(&self, idx: [usize; 2]) -> &Self::Output {
        &self.rows[idx[0]][idx[1]]
    }
}

impl<T: PartialEq> PartialEq for Matrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
    }
}

impl<T: fmt::Debug> fmt::Debug for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matrix").field("rows", &self.rows).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Matrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, cell) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{cell}")?;
            }
        }
        Ok(())
    }
}
