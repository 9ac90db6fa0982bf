//! Exact rational numbers.
//!
//! A [`Fraction`] is always stored in lowest terms with the sign carried by the
//! numerator. Construction with a zero denominator does not fail; it yields the
//! [`Fraction::INFINITY`] sentinel, which then propagates through arithmetic.
//! Check [`Fraction::is_infinite`] on results where that matters.
//!
//! Numerator and denominator are `i128`. Products cancel common factors before
//! multiplying and every intermediate step is checked, so any result whose
//! reduced form fits in `i128` is computed exactly.
//!
//! # Panics
//!
//! Arithmetic whose reduced result does not fit in `i128` panics with a
//! `Fraction overflow` message. It never wraps.

use std::cmp::Ordering;
use std::fmt;
use std::sync::{Arc, OnceLock};

use num_integer::Integer;
use num_rational::Ratio;

use crate::element::{AdditiveElement, MultiplicativeElement};
use crate::group::{BiGroup, Group, SharedGroup};

/// An exact rational number in lowest terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: i128,
    denominator: i128,
}

impl Fraction {
    /// `0/1`
    pub const ZERO: Fraction = Fraction::raw(0, 1);
    /// `1/1`
    pub const ONE: Fraction = Fraction::raw(1, 1);
    /// `1/0`, produced whenever the denominator is zero.
    pub const INFINITY: Fraction = Fraction::raw(1, 0);

    const fn raw(numerator: i128, denominator: i128) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Create `numerator / denominator` reduced to lowest terms.
    ///
    /// A zero denominator returns [`Fraction::INFINITY`] regardless of the
    /// numerator.
    ///
    /// # Example
    ///
    /// ```
    /// use exactmatrix::Fraction;
    ///
    /// assert_eq!(Fraction::of(6, -8), Fraction::of(-3, 4));
    /// assert_eq!(Fraction::of(0, 5), Fraction::ZERO);
    /// assert_eq!(Fraction::of(3, 0), Fraction::INFINITY);
    /// assert_eq!(Fraction::of(i64::MIN, 2).numerator(), i128::from(i64::MIN / 2));
    /// ```
    ///
    /// # Panics
    ///
    /// If an argument is `i128::MIN`, or the reduced denominator is
    /// `i128::MIN` and cannot be made positive.
    pub fn of(numerator: impl Into<i128>, denominator: impl Into<i128>) -> Self {
        Self::reduced(numerator.into(), denominator.into(), "construction")
    }

    fn reduced(numerator: i128, denominator: i128, operation: &str) -> Self {
        if denominator == 0 {
            return Self::INFINITY;
        }
        let divisor = numerator.gcd(&denominator);
        let (numerator, denominator) = (numerator / divisor, denominator / divisor);
        if denominator > 0 {
            return Self::raw(numerator, denominator);
        }
        match (numerator.checked_neg(), denominator.checked_neg()) {
            (Some(numerator), Some(denominator)) => Self::raw(numerator, denominator),
            _ => overflow(operation),
        }
    }

    /// Create `value / 1`.
    pub const fn from_integer(value: i128) -> Self {
        Self::raw(value, 1)
    }

    /// Numerator; carries the sign.
    pub fn numerator(&self) -> i128 {
        self.numerator
    }

    /// Denominator; non-negative, zero only for [`Fraction::INFINITY`].
    pub fn denominator(&self) -> i128 {
        self.denominator
    }

    /// Whether this is the [`Fraction::INFINITY`] sentinel.
    pub fn is_infinite(&self) -> bool {
        self.denominator == 0
    }

    /// Whether this equals [`Fraction::ZERO`].
    pub fn is_zero(&self) -> bool {
        self.numerator == 0 && self.denominator != 0
    }

    /// Nearest `f64`; the sentinel maps to `f64::INFINITY`.
    pub fn to_f64(&self) -> f64 {
        self.numerator as f64 / self.denominator as f64
    }

    /// The shared algebra of all fractions.
    pub fn algebra() -> BiGroup<Fraction> {
        fraction_algebra().clone()
    }

    fn as_ratio(&self) -> Ratio<i128> {
        Ratio::new_raw(self.numerator, self.denominator)
    }
}

fn overflow(operation: &str) -> ! {
    panic!("Fraction overflow in {operation}: result does not fit in i128")
}

fn fraction_algebra() -> &'static BiGroup<Fraction> {
    static ALGEBRA: OnceLock<BiGroup<Fraction>> = OnceLock::new();
    ALGEBRA.get_or_init(|| BiGroup::using(Arc::new(FractionAddition), Arc::new(FractionMultiplication)))
}

struct FractionAddition;

impl Group<Fraction> for FractionAddition {
    fn identity(&self) -> Fraction {
        Fraction::ZERO
    }

    /// Sum over the least common denominator.
    fn operation(&self, x: &Fraction, y: &Fraction) -> Fraction {
        if x.is_infinite() || y.is_infinite() {
            return Fraction::INFINITY;
        }
        let divisor = x.denominator.gcd(&y.denominator);
        let x_scale = y.denominator / divisor;
        let y_scale = x.denominator / divisor;
        let numerator = x
            .numerator
            .checked_mul(x_scale)
            .zip(y.numerator.checked_mul(y_scale))
            .and_then(|(lhs, rhs)| lhs.checked_add(rhs));
        let common = x.denominator.checked_mul(x_scale);
        match (numerator, common) {
            (Some(numerator), Some(common)) => Fraction::reduced(numerator, common, "addition"),
            _ => overflow("addition"),
        }
    }

    fn inverse(&self, x: &Fraction) -> Fraction {
        match x.numerator.checked_neg() {
            Some(numerator) => Fraction::reduced(numerator, x.denominator, "negation"),
            None => overflow("negation"),
        }
    }
}

struct FractionMultiplication;

impl Group<Fraction> for FractionMultiplication {
    fn identity(&self) -> Fraction {
        Fraction::ONE
    }

    /// Cross-cancels before multiplying, so the product is already reduced.
    fn operation(&self, x: &Fraction, y: &Fraction) -> Fraction {
        if x.is_infinite() || y.is_infinite() {
            return Fraction::INFINITY;
        }
        let left = x.numerator.gcd(&y.denominator);
        let right = y.numerator.gcd(&x.denominator);
        let numerator = (x.numerator / left).checked_mul(y.numerator / right);
        let denominator = (x.denominator / right).checked_mul(y.denominator / left);
        match (numerator, denominator) {
            (Some(numerator), Some(denominator)) => {
                Fraction::reduced(numerator, denominator, "multiplication")
            }
            _ => overflow("multiplication"),
        }
    }

    fn inverse(&self, x: &Fraction) -> Fraction {
        Fraction::reduced(x.denominator, x.numerator, "reciprocal")
    }
}

impl AdditiveElement for Fraction {
    fn additive_group(&self) -> SharedGroup<Self> {
        Arc::clone(fraction_algebra().additive())
    }
}

impl MultiplicativeElement for Fraction {
    fn multiplicative_group(&self) -> SharedGroup<Self> {
        Arc::clone(fraction_algebra().multiplicative())
    }
}

crate::impl_arithmetic_ops!(Fraction);

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Self::from_integer(value.into())
    }
}

impl num_traits::Zero for Fraction {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        Fraction::is_zero(self)
    }
}

impl num_traits::One for Fraction {
    fn one() -> Self {
        Self::ONE
    }
}

/// [`Fraction::INFINITY`] compares greater than every finite value.
impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_infinite(), other.is_infinite()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.as_ratio().cmp(&other.as_ratio()),
        }
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ArithmeticElement;

    #[test]
    fn test_normalization() {
        let f = Fraction::of(6, 8);
        assert_eq!((f.numerator(), f.denominator()), (3, 4));

        let f = Fraction::of(3, -9);
        assert_eq!((f.numerator(), f.denominator()), (-1, 3));

        let f = Fraction::of(-4, -10);
        assert_eq!((f.numerator(), f.denominator()), (2, 5));

        assert_eq!(Fraction::of(0, -7), Fraction::ZERO);
    }

    #[test]
    fn test_zero_denominator_is_infinity() {
        assert_eq!(Fraction::of(5, 0), Fraction::INFINITY);
        assert_eq!(Fraction::of(-5, 0), Fraction::INFINITY);
        assert!(Fraction::ONE.divide(&Fraction::ZERO).is_infinite());
        assert_eq!(Fraction::INFINITY.multiplicative_inverse(), Fraction::ZERO);
        assert!((Fraction::INFINITY + Fraction::ONE).is_infinite());
        assert!((Fraction::of(1, 2) * Fraction::INFINITY).is_infinite());
        assert!(Fraction::INFINITY.to_f64().is_infinite());
    }

    #[test]
    fn test_group_identities() {
        let three_quarters = Fraction::of(3, 4);
        assert_eq!(three_quarters + Fraction::ZERO, three_quarters);
        assert_eq!(three_quarters * Fraction::ONE, three_quarters);
        assert_eq!(three_quarters.zero(), Fraction::ZERO);
        assert_eq!(three_quarters.one(), Fraction::ONE);
    }

    #[test]
    fn test_group_inverses() {
        let five_quarters = Fraction::of(5, 4);
        assert_eq!(five_quarters.additive_inverse(), Fraction::of(-5, 4));
        assert_eq!(five_quarters.multiplicative_inverse(), Fraction::of(4, 5));
        assert_eq!(
            Fraction::of(-2, 3).multiplicative_inverse(),
            Fraction::of(-3, 2)
        );
    }

    #[test]
    fn test_add_and_subtract() {
        assert_eq!(Fraction::of(3, 4) + Fraction::ONE, Fraction::of(7, 4));
        assert_eq!(Fraction::ONE - Fraction::of(3, 4), Fraction::of(1, 4));
        assert_eq!(Fraction::of(1, 6) + Fraction::of(1, 10), Fraction::of(4, 15));
        assert_eq!(Fraction::of(1, 2) - Fraction::of(1, 2), Fraction::ZERO);
    }

    #[test]
    fn test_multiply_and_divide() {
        assert_eq!(Fraction::of(2, 3) * Fraction::of(9, 4), Fraction::of(3, 2));
        assert_eq!(Fraction::of(2, 3) / Fraction::of(4, 9), Fraction::of(3, 2));
        assert_eq!(&Fraction::of(-1, 2) * &Fraction::of(-1, 2), Fraction::of(1, 4));
    }

    #[test]
    fn test_ordering() {
        assert!(Fraction::of(1, 3) < Fraction::of(1, 2));
        assert!(Fraction::of(-1, 2) < Fraction::ZERO);
        assert!(Fraction::of(1_000, 1) < Fraction::INFINITY);
        assert_eq!(Fraction::of(2, 4).cmp(&Fraction::of(1, 2)), Ordering::Equal);
    }

    #[test]
    fn test_display() {
        assert_eq!(Fraction::of(8, 21).to_string(), "8/21");
        assert_eq!(Fraction::ZERO.to_string(), "0/1");
        assert_eq!(Fraction::of(-3, 6).to_string(), "-1/2");
    }

    #[test]
    fn test_num_traits() {
        use num_traits::{One, Zero};
        assert!(<Fraction as Zero>::zero().is_zero());
        assert_eq!(<Fraction as One>::one(), Fraction::ONE);
        assert_eq!(Fraction::from(4), Fraction::of(8, 2));
    }

    #[test]
    fn test_i64_extremes() {
        let f = Fraction::of(i64::MIN, 2);
        assert_eq!(f.numerator(), -(1i128 << 62));
        assert_eq!(f.denominator(), 1);

        let f = Fraction::of(1, i64::MIN);
        assert_eq!((f.numerator(), f.denominator()), (-1, 1i128 << 63));

        let f = Fraction::of(i64::MIN, i64::MIN);
        assert_eq!(f, Fraction::ONE);
        assert_eq!(Fraction::from(i64::MIN).additive_inverse().numerator(), 1i128 << 63);
    }

    #[test]
    fn test_large_coprime_denominators() {
        let p = Fraction::of(1, 1_000_003);
        let q = Fraction::of(1, 999_983);
        assert_eq!(p + q, Fraction::of(1_999_986, 999_985_999_949i64));
        assert_eq!(p * q, Fraction::of(1, 999_985_999_949i64));

        // beyond i64 but exact in i128
        let tiny = Fraction::of(1, 1i64 << 40);
        assert_eq!((tiny * tiny).denominator(), 1i128 << 80);
        assert_eq!((tiny * tiny) / (tiny * tiny), Fraction::ONE);

        // cross-cancellation keeps products of reciprocals small
        let big = Fraction::of(1i64 << 40, 3);
        assert_eq!(tiny * big, Fraction::of(1, 3));
        assert!(Fraction::of(1, 999_983) > Fraction::of(1, 1_000_003));
    }

    #[test]
    #[should_panic(expected = "Fraction overflow")]
    fn test_overflow_panics_instead_of_wrapping() {
        let huge = Fraction::of(1, i128::MAX);
        let _ = huge * Fraction::of(1, i128::MAX - 1);
    }
}
