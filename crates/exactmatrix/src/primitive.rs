//! Primitive numbers as arithmetic elements.
//!
//! Built-in numeric types do not carry their own algebra, so a [`Primitive`]
//! wraps a value together with the [`BiGroup`] it computes in. The algebra is
//! always passed in explicitly; use [`num_bigroup`] for the usual signed
//! number types and [`Primitives`] to stamp out many cells that share it.
//!
//! ```
//! use exactmatrix::{num_bigroup, Primitives, SquareMatrix};
//!
//! let reals = Primitives::new(num_bigroup::<f64>());
//! let i3 = SquareMatrix::identity(3, &reals.bigroup()).unwrap();
//! assert_eq!(i3.to_string(), "1 0 0\n0 1 0\n0 0 1");
//! ```

use std::fmt;
use std::ops::Neg;
use std::sync::{Arc, OnceLock};

use num_traits::Num;

use crate::element::{AdditiveElement, MultiplicativeElement};
use crate::group::{BiGroup, Group, SharedGroup};

/// The additive and multiplicative groups of a signed number type.
///
/// The multiplicative inverse is `1 / x`, which truncates for integer types
/// exactly like integer division does.
pub fn num_bigroup<T>() -> BiGroup<T>
where
    T: Num + Neg<Output = T> + Clone + Send + Sync + 'static,
{
    BiGroup::create(
        T::zero(),
        |x: &T| -x.clone(),
        |a: &T, b: &T| a.clone() + b.clone(),
        T::one(),
        |x: &T| T::one() / x.clone(),
        |a: &T, b: &T| a.clone() * b.clone(),
    )
}

/// A primitive value paired with the algebra it computes in.
pub struct Primitive<T> {
    value: T,
    algebra: BiGroup<T>,
    lifted: OnceLock<BiGroup<Primitive<T>>>,
}

impl<T> Primitive<T> {
    /// Wrap `value` with the given algebra.
    pub fn new(value: T, algebra: BiGroup<T>) -> Self {
        Self {
            value,
            algebra,
            lifted: OnceLock::new(),
        }
    }

    /// The wrapped value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Unwrap into the raw value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// The algebra of the raw values.
    pub fn algebra(&self) -> &BiGroup<T> {
        &self.algebra
    }
}

impl<T: Clone + Send + Sync + 'static> Primitive<T> {
    /// Lift a raw-value algebra to an algebra over [`Primitive`] cells.
    pub fn lift(algebra: &BiGroup<T>) -> BiGroup<Primitive<T>> {
        BiGroup::using(
            Arc::new(LiftedGroup {
                inner: Arc::clone(algebra.additive()),
                algebra: algebra.clone(),
            }),
            Arc::new(LiftedGroup {
                inner: Arc::clone(algebra.multiplicative()),
                algebra: algebra.clone(),
            }),
        )
    }

    fn lifted(&self) -> &BiGroup<Primitive<T>> {
        self.lifted.get_or_init(|| Self::lift(&self.algebra))
    }
}

/// A raw-value group applied to [`Primitive`] cells.
struct LiftedGroup<T> {
    inner: SharedGroup<T>,
    algebra: BiGroup<T>,
}

impl<T: Clone + Send + Sync + 'static> Group<Primitive<T>> for LiftedGroup<T> {
    fn identity(&self) -> Primitive<T> {
        Primitive::new(self.inner.identity(), self.algebra.clone())
    }

    fn operation(&self, x: &Primitive<T>, y: &Primitive<T>) -> Primitive<T> {
        Primitive::new(self.inner.operation(&x.value, &y.value), self.algebra.clone())
    }

    fn inverse(&self, x: &Primitive<T>) -> Primitive<T> {
        Primitive::new(self.inner.inverse(&x.value), self.algebra.clone())
    }
}

impl<T> AdditiveElement for Primitive<T>
where
    T: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static,
{
    fn additive_group(&self) -> SharedGroup<Self> {
        Arc::clone(self.lifted().additive())
    }
}

impl<T> MultiplicativeElement for Primitive<T>
where
    T: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static,
{
    fn multiplicative_group(&self) -> SharedGroup<Self> {
        Arc::clone(self.lifted().multiplicative())
    }
}

crate::impl_arithmetic_ops!(
    [T: Clone + PartialEq + fmt::Debug + fmt::Display + Send + Sync + 'static] Primitive<T>
);

impl<T: Clone> Clone for Primitive<T> {
    fn clone(&self) -> Self {
        Self::new(self.value.clone(), self.algebra.clone())
    }
}

impl<T: PartialEq> PartialEq for Primitive<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Primitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Primitive").field(&self.value).finish()
    }
}

impl<T: fmt::Display> fmt::Display for Primitive<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)
    }
}

/// Factory for [`Primitive`] values sharing one algebra.
#[derive(Debug, Clone)]
pub struct Primitives<T> {
    algebra: BiGroup<T>,
}

impl<T: Clone + Send + Sync + 'static> Primitives<T> {
    /// Create a factory for the given algebra.
    pub fn new(algebra: BiGroup<T>) -> Self {
        Self { algebra }
    }

    /// Wrap one value.
    pub fn of(&self, value: T) -> Primitive<T> {
        Primitive::new(value, self.algebra.clone())
    }

    /// Wrap a row-major grid of values.
    pub fn rows<R, I>(&self, rows: R) -> Vec<Vec<Primitive<T>>>
    where
        R: IntoIterator<Item = I>,
        I: IntoIterator<Item = T>,
    {
        rows.into_iter()
            .map(|row| row.into_iter().map(|v| self.of(v)).collect())
            .collect()
    }

    /// The algebra over [`Primitive`] cells.
    pub fn bigroup(&self) -> BiGroup<Primitive<T>> {
        Primitive::lift(&self.algebra)
    }
}
