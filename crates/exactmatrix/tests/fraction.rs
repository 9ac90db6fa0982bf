use exactmatrix::{AdditiveElement, ArithmeticElement, Fraction, MultiplicativeElement};
use num_integer::Integer;
use proptest::prelude::*;

fn nonzero() -> impl Strategy<Value = i64> {
    prop_oneof![-10_000i64..=-1, 1i64..=10_000]
}

fn fraction() -> impl Strategy<Value = Fraction> {
    (-10_000i64..=10_000, nonzero()).prop_map(|(n, d)| Fraction::of(n, d))
}

proptest! {
    /// Construction always reduces to lowest terms with a positive denominator
    #[test]
    fn prop_normalized(n in any::<i64>(), d in any::<i64>().prop_filter("non-zero", |d| *d != 0)) {
        let f = Fraction::of(n, d);
        prop_assert!(f.denominator() > 0);
        prop_assert_eq!(f.numerator().gcd(&f.denominator()), 1);
        // same rational value
        prop_assert_eq!(f.numerator() * i128::from(d), i128::from(n) * f.denominator());
    }

    /// Sums and products of fractions with large denominators stay exact
    #[test]
    fn prop_large_denominators_are_exact(
        a in 1i64..=1_000_000_000,
        b in 1i64..=1_000_000_000,
        c in 1i64..=1_000_000_000,
        d in 1i64..=1_000_000_000,
    ) {
        let x = Fraction::of(a, b);
        let y = Fraction::of(c, d);
        let (a, b, c, d) = (i128::from(a), i128::from(b), i128::from(c), i128::from(d));
        prop_assert_eq!(x + y, Fraction::of(a * d + c * b, b * d));
        prop_assert_eq!(x * y, Fraction::of(a * c, b * d));
        prop_assert_eq!((x * y) / y, x);
    }

    /// Identities of both groups
    #[test]
    fn prop_identities(x in fraction()) {
        prop_assert_eq!(x + Fraction::ZERO, x);
        prop_assert_eq!(x * Fraction::ONE, x);
        prop_assert_eq!(x.zero(), Fraction::ZERO);
        prop_assert_eq!(x.one(), Fraction::ONE);
    }

    /// Inverses of both groups
    #[test]
    fn prop_inverses(x in fraction()) {
        prop_assert_eq!(x.add(&x.additive_inverse()), Fraction::ZERO);
        prop_assume!(!x.is_zero());
        prop_assert_eq!(x.multiply(&x.multiplicative_inverse()), Fraction::ONE);
    }

    /// Addition and multiplication commute and distribute
    #[test]
    fn prop_field_laws(x in fraction(), y in fraction(), z in fraction()) {
        prop_assert_eq!(x + y, y + x);
        prop_assert_eq!(x * y, y * x);
        prop_assert_eq!(x * (y + z), x * y + x * z);
        prop_assert_eq!((x - y) + y, x);
    }

    /// Ordering agrees with the floating-point value
    #[test]
    fn prop_ordering_matches_f64(x in fraction(), y in fraction()) {
        if x < y {
            prop_assert!(x.to_f64() <= y.to_f64());
        }
    }
}

#[test]
fn test_zero_denominator_passes_through_as_infinity() {
    let infinity = Fraction::of(7, 0);
    assert_eq!(infinity, Fraction::INFINITY);
    assert_eq!(infinity.to_string(), "1/0");

    // dividing by zero does not fail
    let quotient = Fraction::of(2, 3) / Fraction::ZERO;
    assert!(quotient.is_infinite());
    assert!((quotient - Fraction::ONE).is_infinite());
}

#[test]
fn test_subtract_divide() {
    assert_eq!(Fraction::ONE.subtract(&Fraction::of(3, 4)), Fraction::of(1, 4));
    assert_eq!(Fraction::of(3, 4).divide(&Fraction::of(3, 8)), Fraction::of(2, 1));
}
