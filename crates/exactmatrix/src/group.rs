//! Algebraic structures: groups and additive/multiplicative group pairs.
//!
//! A [`Group`] is an identity, a closed binary operation and an inverse over a
//! carrier type. A [`BiGroup`] pairs an additive and a multiplicative group on
//! the same carrier, which is all the arithmetic the matrix layer needs.
//!
//! Groups are shared as [`SharedGroup`] trait objects so that element types can
//! carry their algebra around by value.

use std::fmt;
use std::sync::Arc;

/// A group over carrier type `T`.
///
/// Implementations must satisfy the group laws:
/// - `operation(x, identity) == x`
/// - `operation(x, inverse(x)) == identity`
/// - `operation` is associative
///
/// The laws are not checked mechanically.
pub trait Group<T>: Send + Sync {
    /// The identity element.
    fn identity(&self) -> T;

    /// The binary operation.
    fn operation(&self, x: &T, y: &T) -> T;

    /// The inverse of `x` with respect to [`Group::operation`].
    fn inverse(&self, x: &T) -> T;

    /// Fold a sequence with the group operation, starting from the identity.
    fn combine_all<'a, I>(&self, items: I) -> T
    where
        I: IntoIterator<Item = &'a T>,
        T: 'a,
        Self: Sized,
    {
        items
            .into_iter()
            .fold(self.identity(), |acc, x| self.operation(&acc, x))
    }
}

/// Reference-counted group trait object.
pub type SharedGroup<T> = Arc<dyn Group<T>>;

type UnaryFn<T> = Box<dyn Fn(&T) -> T + Send + Sync>;
type BinaryFn<T> = Box<dyn Fn(&T, &T) -> T + Send + Sync>;

/// A group assembled from an identity value and two closures.
pub struct FnGroup<T> {
    identity: T,
    inverse: UnaryFn<T>,
    operation: BinaryFn<T>,
}

impl<T> FnGroup<T> {
    /// Create a group from its identity, inverse function and operation.
    pub fn new<I, O>(identity: T, inverse: I, operation: O) -> Self
    where
        I: Fn(&T) -> T + Send + Sync + 'static,
        O: Fn(&T, &T) -> T + Send + Sync + 'static,
    {
        Self {
            identity,
            inverse: Box::new(inverse),
            operation: Box::new(operation),
        }
    }
}

impl<T: Clone + Send + Sync> Group<T> for FnGroup<T> {
    fn identity(&self) -> T {
        self.identity.clone()
    }

    fn operation(&self, x: &T, y: &T) -> T {
        (self.operation)(x, y)
    }

    fn inverse(&self, x: &T) -> T {
        (self.inverse)(x)
    }
}

impl<T: fmt::Debug> fmt::Debug for FnGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnGroup")
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

/// Build a [`SharedGroup`] from an identity, an inverse and an operation.
pub fn group_from<T, I, O>(identity: T, inverse: I, operation: O) -> SharedGroup<T>
where
    T: Clone + Send + Sync + 'static,
    I: Fn(&T) -> T + Send + Sync + 'static,
    O: Fn(&T, &T) -> T + Send + Sync + 'static,
{
    Arc::new(FnGroup::new(identity, inverse, operation))
}

/// An additive and a multiplicative group over the same carrier.
///
/// No distributivity check is made; instantiations are expected to form a
/// ring (or field) for the derived arithmetic to behave.
pub struct BiGroup<T> {
    additive: SharedGroup<T>,
    multiplicative: SharedGroup<T>,
}

impl<T> BiGroup<T> {
    /// Pair two existing groups.
    pub fn using(additive: SharedGroup<T>, multiplicative: SharedGroup<T>) -> Self {
        Self {
            additive,
            multiplicative,
        }
    }

    /// The additive group.
    pub fn additive(&self) -> &SharedGroup<T> {
        &self.additive
    }

    /// The multiplicative group.
    pub fn multiplicative(&self) -> &SharedGroup<T> {
        &self.multiplicative
    }

    /// Additive identity.
    pub fn zero(&self) -> T {
        self.additive.identity()
    }

    /// Multiplicative identity.
    pub fn one(&self) -> T {
        self.multiplicative.identity()
    }
}

impl<T: Clone + Send + Sync + 'static> BiGroup<T> {
    /// Build both groups from six primitives.
    ///
    /// # Example
    ///
    /// ```
    /// use exactmatrix::{BiGroup, Group};
    ///
    /// let ints = BiGroup::create(0i64, |x| -x, |a, b| a + b, 1i64, |x| 1 / x, |a, b| a * b);
    /// assert_eq!(ints.additive().operation(&2, &3), 5);
    /// assert_eq!(ints.one(), 1);
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn create<AI, AO, MI, MO>(
        zero: T,
        negate: AI,
        add: AO,
        one: T,
        reciprocal: MI,
        multiply: MO,
    ) -> Self
    where
        AI: Fn(&T) -> T + Send + Sync + 'static,
        AO: Fn(&T, &T) -> T + Send + Sync + 'static,
        MI: Fn(&T) -> T + Send + Sync + 'static,
        MO: Fn(&T, &T) -> T + Send + Sync + 'static,
    {
        Self::using(
            group_from(zero, negate, add),
            group_from(one, reciprocal, multiply),
        )
    }
}

impl<T> Clone for BiGroup<T> {
    fn clone(&self) -> Self {
        Self {
            additive: Arc::clone(&self.additive),
            multiplicative: Arc::clone(&self.multiplicative),
        }
    }
}

impl<T> fmt::Debug for BiGroup<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BiGroup").finish_non_exhaustive()
    }
}
