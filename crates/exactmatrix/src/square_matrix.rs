//! Square matrices: determinant, cofactor, adjoint and inverse.
//!
//! Everything is computed by recursive cofactor (Laplace) expansion in the
//! cells' own exact arithmetic. There is no pivoting; the cost is exponential
//! in the matrix size, which is acceptable for the small matrices this crate
//! targets.

use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use tracing::trace;

use crate::element::{AdditiveElement, ArithmeticElement, MultiplicativeElement};
use crate::error::{MatrixError, Result};
use crate::group::{BiGroup, SharedGroup};
use crate::matrix::{or_panic, Matrix};

/// A [`Matrix`] with as many rows as columns.
///
/// Derefs to [`Matrix`] for the shared read-only API.
#[derive(Clone)]
pub struct SquareMatrix<T> {
    inner: Matrix<T>,
    algebra: OnceLock<BiGroup<SquareMatrix<T>>>,
}

impl<T> SquareMatrix<T> {
    /// Number of rows (and columns)
    pub fn size(&self) -> usize {
        self.inner.n_rows()
    }

    /// Borrow as a rectangular matrix
    pub fn as_matrix(&self) -> &Matrix<T> {
        &self.inner
    }

    /// Convert into a rectangular matrix
    pub fn into_matrix(self) -> Matrix<T> {
        self.inner
    }

    /// `inner` must be square.
    pub(crate) fn from_square_unchecked(inner: Matrix<T>) -> Self {
        Self {
            inner,
            algebra: OnceLock::new(),
        }
    }
}

impl<T: ArithmeticElement> SquareMatrix<T> {
    /// Create a square matrix from its rows.
    ///
    /// # Errors
    ///
    /// Any error of [`Matrix::new`], or `NotSquare`.
    pub fn new(rows: Vec<Vec<T>>) -> Result<Self> {
        Self::from_matrix(Matrix::new(rows)?)
    }

    /// Reinterpret a matrix as square.
    ///
    /// # Errors
    ///
    /// `NotSquare` if the row and column counts differ.
    pub fn from_matrix(matrix: Matrix<T>) -> Result<Self> {
        if !matrix.is_square() {
            return Err(MatrixError::NotSquare {
                nrows: matrix.n_rows(),
                ncols: matrix.n_cols(),
            });
        }
        Ok(Self::from_square_unchecked(matrix))
    }

    /// Create a `size x size` matrix by evaluating `generator(i, j)`.
    pub fn from_fn<F>(size: usize, generator: F) -> Result<Self>
    where
        F: FnMut(usize, usize) -> T,
    {
        Ok(Self::from_square_unchecked(Matrix::from_fn(
            size, size, generator,
        )?))
    }

    /// Identity matrix of the given size in the given algebra.
    ///
    /// Cells may themselves be matrices:
    ///
    /// ```
    /// use exactmatrix::{num_bigroup, ArithmeticElement, Primitives, SquareMatrix};
    ///
    /// let ints = Primitives::new(num_bigroup::<i32>());
    /// let i2 = SquareMatrix::identity(2, &ints.bigroup()).unwrap();
    /// let i3_of_i2 = SquareMatrix::identity(3, &i2.bigroup()).unwrap();
    /// assert_eq!(i3_of_i2[[0, 0]], i3_of_i2[[2, 2]]);
    /// assert_eq!(*i3_of_i2[[1, 0]][[0, 0]].value(), 0);
    /// ```
    ///
    /// # Errors
    ///
    /// `EmptyMatrix` if `size` is zero.
    pub fn identity(size: usize, algebra: &BiGroup<T>) -> Result<Self> {
        if size == 0 {
            return Err(MatrixError::EmptyMatrix);
        }
        Ok(Self::identity_unchecked(size, algebra))
    }

    /// `size` must be non-zero.
    pub(crate) fn identity_unchecked(size: usize, algebra: &BiGroup<T>) -> Self {
        let zero = algebra.zero();
        let one = algebra.one();
        let inner = Matrix::generate(size, size, |i, j| {
            if i == j {
                one.clone()
            } else {
                zero.clone()
            }
        })
        .with_cell_algebra(algebra.clone());
        Self::from_square_unchecked(inner)
    }

    /// Identity matrix of the same size, algebra taken from cell `(0, 0)`.
    pub fn identity_of_same_dimension(&self) -> Self {
        Self::identity_unchecked(self.size(), self.cell_algebra())
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> T {
        (1..self.size()).fold(self.inner[[0, 0]].clone(), |acc, i| {
            acc.add(&self.inner[[i, i]])
        })
    }

    /// Determinant by Laplace expansion along the first row.
    ///
    /// A `1 x 1` matrix is its own determinant. Otherwise the expansion sums
    /// `sign(j) * self[0][j] * det(cofactor(0, j))`, with the sign starting at
    /// the cells' one and alternating by additive inverse.
    pub fn determinant(&self) -> T {
        if self.size() == 1 {
            return self.inner[[0, 0]].clone();
        }
        let mut determinant = self.zero_of_cells();
        let mut sign = self.one_of_cells();
        for (j, cell) in self.inner[0].iter().enumerate() {
            let minor = self.minor(0, j).determinant();
            determinant = determinant.add(&sign.multiply(cell).multiply(&minor));
            sign = sign.additive_inverse();
        }
        determinant
    }

    /// The `(size - 1) x (size - 1)` submatrix with row `i` and column `j`
    /// removed.
    ///
    /// # Errors
    ///
    /// `IndexOutOfBounds` if `(i, j)` is outside the matrix, `EmptyMatrix` for
    /// a `1 x 1` matrix.
    pub fn cofactor(&self, i: usize, j: usize) -> Result<SquareMatrix<T>> {
        self.inner.get(i, j)?;
        let minor = self
            .inner
            .filter_rows(|_, row| row != i)?
            .filter_cols(|_, col| col != j)?;
        Ok(Self::from_square_unchecked(minor))
    }

    /// Same as [`SquareMatrix::cofactor`] for indices known to be valid on a
    /// matrix of size at least 2.
    fn minor(&self, i: usize, j: usize) -> SquareMatrix<T> {
        let rows = self.inner.select(|_, row| row != i, |col| col != j);
        Self::from_square_unchecked(self.inner.derived(rows))
    }

    /// Adjoint (adjugate): the transpose of the signed cofactor matrix.
    ///
    /// The adjoint of a `1 x 1` matrix is the `1 x 1` identity, so that
    /// `adjoint / determinant` is the inverse for every size.
    pub fn adjoint(&self) -> SquareMatrix<T> {
        if self.size() == 1 {
            return self.identity_of_same_dimension();
        }
        let cofactors = Matrix::generate(self.size(), self.size(), |i, j| {
            checkerboard(i, j, self.minor(i, j).determinant())
        })
        .with_cell_algebra(self.cell_algebra().clone());
        Self::from_square_unchecked(cofactors.transpose())
    }

    /// Inverse via `adjoint / determinant`.
    ///
    /// # Errors
    ///
    /// `SingularMatrix` if the determinant equals the cells' zero.
    pub fn inverse(&self) -> Result<SquareMatrix<T>> {
        trace!(size = self.size(), "inverting by cofactor expansion");
        let determinant = self.determinant();
        let zero = self.zero_of_cells();
        if determinant == zero {
            trace!(size = self.size(), "determinant is zero");
            return Err(MatrixError::SingularMatrix {
                matrix: self.to_string(),
                zero: zero.to_string(),
            });
        }
        Ok(self.adjoint().map(|cell| cell.divide(&determinant)))
    }

    /// Apply `mapper` to every cell.
    pub fn map<U, F>(&self, mapper: F) -> SquareMatrix<U>
    where
        U: ArithmeticElement,
        F: FnMut(&T) -> U,
    {
        SquareMatrix::from_square_unchecked(self.inner.map(mapper))
    }

    /// Swap rows and columns.
    pub fn transpose(&self) -> SquareMatrix<T> {
        Self::from_square_unchecked(self.inner.transpose())
    }

    /// Elementwise sum.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the sizes differ.
    pub fn add_with(&self, other: &SquareMatrix<T>) -> Result<SquareMatrix<T>> {
        Ok(Self::from_square_unchecked(self.inner.add_with(&other.inner)?))
    }

    /// Elementwise difference.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the sizes differ.
    pub fn subtract_with(&self, other: &SquareMatrix<T>) -> Result<SquareMatrix<T>> {
        Ok(Self::from_square_unchecked(
            self.inner.subtract_with(&other.inner)?,
        ))
    }

    /// Matrix product.
    ///
    /// # Errors
    ///
    /// `DimensionMismatch` if the sizes differ.
    pub fn multiply_by(&self, other: &SquareMatrix<T>) -> Result<SquareMatrix<T>> {
        Ok(Self::from_square_unchecked(
            self.inner.multiply_by(&other.inner)?,
        ))
    }

    fn algebra(&self) -> &BiGroup<SquareMatrix<T>> {
        self.algebra.get_or_init(|| {
            let minus_one = self.one_of_cells().additive_inverse();
            BiGroup::create(
                Self::from_square_unchecked(self.inner.zero_of_same_size()),
                move |m: &SquareMatrix<T>| {
                    Self::from_square_unchecked(m.inner.scalar_multiply(&minus_one))
                },
                |a: &SquareMatrix<T>, b: &SquareMatrix<T>| or_panic(a.add_with(b)),
                self.identity_of_same_dimension(),
                |m: &SquareMatrix<T>| or_panic(m.inverse()),
                |a: &SquareMatrix<T>, b: &SquareMatrix<T>| or_panic(a.multiply_by(b)),
            )
        })
    }
}

/// `value` on even `i + j`, its additive inverse on odd.
fn checkerboard<T: ArithmeticElement>(i: usize, j: usize, value: T) -> T {
    if (i + j) % 2 == 0 {
        value
    } else {
        value.additive_inverse()
    }
}

impl<T> Deref for SquareMatrix<T> {
    type Target = Matrix<T>;

    fn deref(&self) -> &Matrix<T> {
        &self.inner
    }
}

/// # Panics
///
/// The derived operators panic when sizes differ, and the multiplicative
/// inverse panics on a singular matrix.
impl<T: ArithmeticElement> AdditiveElement for SquareMatrix<T> {
    fn additive_group(&self) -> SharedGroup<Self> {
        Arc::clone(self.algebra().additive())
    }
}

impl<T: ArithmeticElement> MultiplicativeElement for SquareMatrix<T> {
    fn multiplicative_group(&self) -> SharedGroup<Self> {
        Arc::clone(self.algebra().multiplicative())
    }
}

crate::impl_arithmetic_ops!([T: ArithmeticElement] SquareMatrix<T>);

impl<T: PartialEq> PartialEq for SquareMatrix<T> {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for SquareMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SquareMatrix")
            .field("rows", &self.inner.rows())
            .finish()
    }
}

impl<T: fmt::Display> fmt::Display for SquareMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fraction::Fraction;
    use crate::primitive::{num_bigroup, Primitive, Primitives};

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::of(n, d)
    }

    fn fractions(rows: Vec<Vec<(i64, i64)>>) -> SquareMatrix<Fraction> {
        SquareMatrix::new(
            rows.into_iter()
                .map(|row| row.into_iter().map(|(n, d)| frac(n, d)).collect())
                .collect(),
        )
        .unwrap()
    }

    fn ints(rows: Vec<Vec<i64>>) -> SquareMatrix<Primitive<i64>> {
        let factory = Primitives::new(num_bigroup::<i64>());
        SquareMatrix::new(factory.rows(rows)).unwrap()
    }

    #[test]
    fn test_new_requires_square() {
        let err = SquareMatrix::new(vec![vec![Fraction::ONE, Fraction::ZERO]]).unwrap_err();
        assert_eq!(err, MatrixError::NotSquare { nrows: 1, ncols: 2 });
    }

    #[test]
    fn test_identity() {
        let reals = Primitives::new(num_bigroup::<f64>());
        let i3 = SquareMatrix::identity(3, &reals.bigroup()).unwrap();
        assert_eq!(i3.to_string(), "1 0 0\n0 1 0\n0 0 1");
        assert_eq!(
            SquareMatrix::identity(0, &Fraction::algebra()).unwrap_err(),
            MatrixError::EmptyMatrix
        );
    }

    #[test]
    fn test_determinant() {
        assert_eq!(*ints(vec![vec![7]]).determinant().value(), 7);
        assert_eq!(*ints(vec![vec![1, 2], vec![3, 4]]).determinant().value(), -2);
        assert_eq!(
            *ints(vec![vec![6, 1, 1], vec![4, -2, 5], vec![2, 8, 7]])
                .determinant()
                .value(),
            -306
        );
        let m = fractions(vec![vec![(1, 2), (1, 3)], vec![(1, 4), (1, 5)]]);
        assert_eq!(m.determinant(), frac(1, 10) - frac(1, 12));
    }

    #[test]
    fn test_cofactor() {
        let m = ints(vec![vec![1, 2, 3], vec![4, 5, 6], vec![7, 8, 9]]);
        assert_eq!(m.cofactor(1, 1).unwrap(), ints(vec![vec![1, 3], vec![7, 9]]));
        assert_eq!(m.cofactor(0, 2).unwrap(), ints(vec![vec![4, 5], vec![7, 8]]));
        assert!(matches!(
            m.cofactor(3, 0),
            Err(MatrixError::IndexOutOfBounds { .. })
        ));
        assert_eq!(
            ints(vec![vec![1]]).cofactor(0, 0).unwrap_err(),
            MatrixError::EmptyMatrix
        );
    }

    #[test]
    fn test_adjoint() {
        let m = ints(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(m.adjoint(), ints(vec![vec![4, -2], vec![-3, 1]]));

        let m = ints(vec![vec![-3, 2, -5], vec![-1, 0, -2], vec![3, -4, 1]]);
        assert_eq!(
            m.adjoint(),
            ints(vec![vec![-8, 18, -4], vec![-5, 12, -1], vec![4, -6, 2]])
        );
        assert_eq!(ints(vec![vec![9]]).adjoint(), ints(vec![vec![1]]));
    }

    #[test]
    fn test_single_cell_adjoint_is_identity() {
        let m = fractions(vec![vec![(2, 3)]]);
        let adjoint = m.adjoint();
        assert_eq!(adjoint, m.identity_of_same_dimension());
        assert_eq!(adjoint.to_string(), "1/1");
        assert_eq!(
            m.multiply_by(&m.inverse().unwrap()).unwrap(),
            m.identity_of_same_dimension()
        );
    }

    #[test]
    fn test_inverse() {
        let m = fractions(vec![vec![(2, 1), (1, 1)], vec![(7, 1), (4, 1)]]);
        let inv = m.inverse().unwrap();
        assert_eq!(
            inv,
            fractions(vec![vec![(4, 1), (-1, 1)], vec![(-7, 1), (2, 1)]])
        );
        assert_eq!(m.multiply_by(&inv).unwrap(), m.identity_of_same_dimension());

        let single = fractions(vec![vec![(2, 3)]]);
        assert_eq!(single.inverse().unwrap(), fractions(vec![vec![(3, 2)]]));
    }

    #[test]
    fn test_singular_inverse() {
        let m = fractions(vec![vec![(1, 2), (1, 4)], vec![(1, 1), (1, 2)]]);
        match m.inverse() {
            Err(MatrixError::SingularMatrix { matrix, zero }) => {
                assert_eq!(matrix, "1/2 1/4\n1/1 1/2");
                assert_eq!(zero, "0/1");
            }
            other => panic!("expected a singular matrix error, got {other:?}"),
        }

        let zero_row = fractions(vec![
            vec![(1, 2), (1, 2), (0, 1)],
            vec![(0, 1), (0, 1), (0, 1)],
            vec![(1, 3), (0, 1), (2, 3)],
        ]);
        assert!(matches!(
            zero_row.inverse(),
            Err(MatrixError::SingularMatrix { .. })
        ));
    }

    #[test]
    fn test_trace_and_transpose() {
        let m = ints(vec![vec![1, 2], vec![3, 4]]);
        assert_eq!(*m.trace().value(), 5);
        assert_eq!(m.transpose(), ints(vec![vec![1, 3], vec![2, 4]]));
    }

    #[test]
    fn test_square_matrix_arithmetic() {
        let a = fractions(vec![vec![(1, 1), (2, 1)], vec![(3, 1), (4, 1)]]);
        let i = a.identity_of_same_dimension();
        assert_eq!(&a * &i, a);
        assert_eq!(&a / &a, i);
        assert_eq!(&a - &a, a.zero());
        assert_eq!(a.multiplicative_inverse(), a.inverse().unwrap());
    }

    #[test]
    fn test_matrix_of_matrices() {
        let ints = Primitives::new(num_bigroup::<i32>());
        let i2 = SquareMatrix::identity(2, &ints.bigroup()).unwrap();
        let i3_of_i2 = SquareMatrix::identity(3, &i2.bigroup()).unwrap();

        assert_eq!(i3_of_i2[[0, 0]], i3_of_i2[[1, 1]]);
        assert_eq!(i3_of_i2[[0, 0]], i3_of_i2[[2, 2]]);
        assert_eq!(*i3_of_i2[[1, 0]][[0, 0]].value(), 0);

        let squared = &i3_of_i2 * &i3_of_i2;
        assert_eq!(squared, i3_of_i2);
        assert_eq!(i3_of_i2.determinant(), i2);
    }
}
