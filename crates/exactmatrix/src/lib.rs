//! Exact matrix algebra over generic group-based elements.
//!
//! This crate computes with matrices whose cells bring their own arithmetic.
//! An element type only has to expose an additive and a multiplicative
//! [`Group`]; addition, subtraction, multiplication, division and the
//! operators follow from those. The matrix layer is written once against that
//! contract and works for exact fractions, primitive numbers and matrices of
//! matrices.
//!
//! # Overview
//!
//! - [`Group`], [`BiGroup`]: the algebraic structures
//! - [`AdditiveElement`], [`MultiplicativeElement`], [`ArithmeticElement`]:
//!   the element contract with its derived operations
//! - [`Fraction`]: exact rationals in lowest terms
//! - [`Primitive`], [`Primitives`], [`num_bigroup`]: built-in numbers with an
//!   explicitly supplied algebra
//! - [`Matrix`], [`SquareMatrix`]: transpose, filtering, products, and
//!   determinant / cofactor / adjoint / inverse by cofactor expansion
//! - [`AbsorbingChain`]: absorption probabilities of absorbing Markov chains
//!
//! # Quick Start
//!
//! ```
//! use exactmatrix::{AbsorbingChain, Fraction, SquareMatrix};
//!
//! let o = Fraction::ZERO;
//! let by = |n: i64, d: i64| Fraction::of(n, d);
//! let transition = SquareMatrix::new(vec![
//!     vec![o, by(2, 3), by(1, 3), o, o],
//!     vec![o, o, o, by(3, 7), by(4, 7)],
//!     vec![o, o, o, o, o],
//!     vec![o, o, o, o, o],
//!     vec![o, o, o, o, o],
//! ])
//! .unwrap();
//!
//! let chain = AbsorbingChain::new(transition);
//! let fr = chain.absorption_probabilities().unwrap();
//! assert_eq!(fr.to_string(), "1/3 2/7 8/21\n0/1 3/7 4/7");
//! ```
//!
//! # Error Handling
//!
//! Checked operations return [`Result`] with [`MatrixError`]:
//!
//! ```
//! use exactmatrix::{Fraction, MatrixError, SquareMatrix};
//!
//! let singular = SquareMatrix::new(vec![
//!     vec![Fraction::ONE, Fraction::of(2, 1)],
//!     vec![Fraction::of(1, 2), Fraction::ONE],
//! ])
//! .unwrap();
//! assert!(matches!(singular.inverse(), Err(MatrixError::SingularMatrix { .. })));
//! ```
//!
//! Operators (`+`, `-`, `*`, `/`) have no error channel and panic on the same
//! conditions. Division of fractions by zero does not fail at all: it yields
//! [`Fraction::INFINITY`].

pub mod element;
pub mod error;
pub mod fraction;
pub mod group;
pub mod markov;
pub mod matrix;
pub mod primitive;
pub mod square_matrix;

pub use element::{AdditiveElement, ArithmeticElement, MultiplicativeElement};
pub use error::{MatrixError, Result};
pub use fraction::Fraction;
pub use group::{group_from, BiGroup, FnGroup, Group, SharedGroup};
pub use markov::{AbsorbingChain, ChainOptions};
pub use matrix::Matrix;
pub use primitive::{num_bigroup, Primitive, Primitives};
pub use square_matrix::SquareMatrix;
