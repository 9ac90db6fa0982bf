//! Arithmetic element contract.
//!
//! Any value type that can report its own additive and multiplicative
//! [`Group`](crate::Group) gets the full set of derived operations for free.
//! The matrix layer and the Markov chain solver are written against these
//! traits only, so they work for fractions, primitive numbers and matrices of
//! matrices alike.

use std::fmt::{Debug, Display};

use crate::group::{BiGroup, SharedGroup};

/// Element that knows its additive group.
pub trait AdditiveElement: Clone + PartialEq + Debug + Display + Send + Sync + 'static {
    /// The additive group of this value's algebra.
    fn additive_group(&self) -> SharedGroup<Self>;

    /// `self + other`
    fn add(&self, other: &Self) -> Self {
        self.additive_group().operation(self, other)
    }

    /// `self - other`
    fn subtract(&self, other: &Self) -> Self {
        let group = self.additive_group();
        group.operation(self, &group.inverse(other))
    }

    /// `-self`
    fn additive_inverse(&self) -> Self {
        self.additive_group().inverse(self)
    }
}

/// Element that knows its multiplicative group.
pub trait MultiplicativeElement: Clone + PartialEq + Debug + Display + Send + Sync + 'static {
    /// The multiplicative group of this value's algebra.
    fn multiplicative_group(&self) -> SharedGroup<Self>;

    /// `self * other`
    fn multiply(&self, other: &Self) -> Self {
        self.multiplicative_group().operation(self, other)
    }

    /// `self / other`
    fn divide(&self, other: &Self) -> Self {
        let group = self.multiplicative_group();
        group.operation(self, &group.inverse(other))
    }

    /// `1 / self`
    fn multiplicative_inverse(&self) -> Self {
        self.multiplicative_group().inverse(self)
    }
}

/// Element with both an additive and a multiplicative group.
pub trait ArithmeticElement: AdditiveElement + MultiplicativeElement {
    /// Both groups packaged together, e.g. to build identity matrices whose
    /// cells are of this type.
    fn bigroup(&self) -> BiGroup<Self> {
        BiGroup::using(self.additive_group(), self.multiplicative_group())
    }

    /// Additive identity of this value's algebra.
    fn zero(&self) -> Self {
        self.additive_group().identity()
    }

    /// Multiplicative identity of this value's algebra.
    fn one(&self) -> Self {
        self.multiplicative_group().identity()
    }

    /// Whether this value is the additive identity.
    fn is_zero(&self) -> bool {
        *self == self.zero()
    }
}

impl<T: AdditiveElement + MultiplicativeElement> ArithmeticElement for T {}

/// Implement `Add`, `Sub`, `Mul`, `Div` and `Neg` (by value and by reference)
/// for an arithmetic element type in terms of its derived operations.
///
/// The optional leading bracket lists generic parameters with their bounds.
///
/// ```ignore
/// impl_arithmetic_ops!(Fraction);
/// impl_arithmetic_ops!([T: ArithmeticElement] Matrix<T>);
/// ```
#[macro_export]
macro_rules! impl_arithmetic_ops {
    (@binary [$($gen:tt)*] $ty:ty, $op:ident, $method:ident, $contract:ident, $derived:ident) => {
        impl<$($gen)*> ::std::ops::$op for $ty {
            type Output = $ty;

            fn $method(self, rhs: $ty) -> $ty {
                $crate::$contract::$derived(&self, &rhs)
            }
        }

        impl<$($gen)*> ::std::ops::$op<&$ty> for &$ty {
            type Output = $ty;

            fn $method(self, rhs: &$ty) -> $ty {
                $crate::$contract::$derived(self, rhs)
            }
        }
    };
    ([$($gen:tt)*] $ty:ty) => {
        $crate::impl_arithmetic_ops!(@binary [$($gen)*] $ty, Add, add, AdditiveElement, add);
        $crate::impl_arithmetic_ops!(@binary [$($gen)*] $ty, Sub, sub, AdditiveElement, subtract);
        $crate::impl_arithmetic_ops!(@binary [$($gen)*] $ty, Mul, mul, MultiplicativeElement, multiply);
        $crate::impl_arithmetic_ops!(@binary [$($gen)*] $ty, Div, div, MultiplicativeElement, divide);

        impl<$($gen)*> ::std::ops::Neg for $ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                $crate::AdditiveElement::additive_inverse(&self)
            }
        }

        impl<$($gen)*> ::std::ops::Neg for &$ty {
            type Output = $ty;

            fn neg(self) -> $ty {
                $crate::AdditiveElement::additive_inverse(self)
            }
        }
    };
    ($ty:ty) => {
        $crate::impl_arithmetic_ops!([] $ty);
    };
}
