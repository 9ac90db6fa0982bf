//! Absorbing Markov chains.
//!
//! Given a right-stochastic transition matrix `P` (row `i`, column `j` is the
//! probability of moving from state `i` to state `j`), the states split into
//! absorbing and transient ones. Restricting `P` to transient rows gives the
//! canonical blocks
//!
//! - `Q`: transient to transient
//! - `R`: transient to absorbing
//!
//! The fundamental matrix is `F = (I - Q)^-1` and `F * R` holds the probability
//! of eventually being absorbed in each absorbing state. Everything is computed
//! exactly in the cells' own arithmetic, normally [`Fraction`].
//!
//! ```
//! use exactmatrix::{AbsorbingChain, Fraction, SquareMatrix};
//!
//! let (o, i) = (Fraction::ZERO, Fraction::ONE);
//! let half = Fraction::of(1, 2);
//! let chain = AbsorbingChain::new(
//!     SquareMatrix::new(vec![
//!         vec![o, half, half],
//!         vec![o, i, o],
//!         vec![o, o, i],
//!     ])
//!     .unwrap(),
//! );
//! let fr = chain.absorption_probabilities().unwrap();
//! assert_eq!(fr.to_string(), "1/2 1/2");
//! ```

use std::collections::BTreeSet;
use std::sync::OnceLock;

use tracing::debug;

use crate::element::ArithmeticElement;
use crate::error::{MatrixError, Result};
use crate::fraction::Fraction;
use crate::matrix::Matrix;
use crate::square_matrix::SquareMatrix;

/// Options for building an [`AbsorbingChain`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ChainOptions {
    /// Require every row to sum to exactly one, or to be all zero.
    pub require_stochastic: bool,
}

impl ChainOptions {
    /// Options that validate row sums.
    pub fn stochastic() -> Self {
        Self {
            require_stochastic: true,
        }
    }
}

/// An absorbing Markov chain over a square transition matrix.
#[derive(Debug, Clone)]
pub struct AbsorbingChain<T = Fraction> {
    transition: SquareMatrix<T>,
    absorbing: OnceLock<BTreeSet<usize>>,
}

impl<T: ArithmeticElement> AbsorbingChain<T> {
    /// Wrap a transition matrix without validation.
    pub fn new(transition: SquareMatrix<T>) -> Self {
        Self {
            transition,
            absorbing: OnceLock::new(),
        }
    }

    /// Wrap a transition matrix, validating it according to `options`.
    ///
    /// # Errors
    ///
    /// `NotStochastic` if `options.require_stochastic` is set and a row sums
    /// to anything but one or zero.
    pub fn with_options(transition: SquareMatrix<T>, options: ChainOptions) -> Result<Self> {
        if options.require_stochastic {
            let zero = transition.zero_of_cells();
            let one = transition.one_of_cells();
            for (row, cells) in transition.rows().iter().enumerate() {
                let sum = cells.iter().fold(zero.clone(), |acc, cell| acc.add(cell));
                if sum != one && sum != zero {
                    return Err(MatrixError::NotStochastic {
                        row,
                        sum: sum.to_string(),
                    });
                }
            }
        }
        Ok(Self::new(transition))
    }

    /// The transition matrix.
    pub fn transition_matrix(&self) -> &SquareMatrix<T> {
        &self.transition
    }

    /// Number of states.
    pub fn n_states(&self) -> usize {
        self.transition.size()
    }

    /// Indices of the absorbing states, computed once.
    ///
    /// State `i` is absorbing if row `i` is all zero, or if row `i` holds
    /// exactly one cell equal to one and that cell is on the diagonal.
    pub fn absorbing_states(&self) -> &BTreeSet<usize> {
        self.absorbing.get_or_init(|| {
            let zero = self.transition.zero_of_cells();
            let one = self.transition.one_of_cells();
            let absorbing: BTreeSet<usize> = self
                .transition
                .rows()
                .iter()
                .enumerate()
                .filter(|(i, row)| is_absorbing_row(row, *i, &zero, &one))
                .map(|(i, _)| i)
                .collect();
            debug!(
                states = self.n_states(),
                absorbing = absorbing.len(),
                transient = self.n_states() - absorbing.len(),
                "classified Markov chain states"
            );
            absorbing
        })
    }

    /// Whether `state` is absorbing.
    pub fn is_absorbing(&self, state: usize) -> bool {
        self.absorbing_states().contains(&state)
    }

    /// Indices of the transient states, ascending.
    pub fn transient_states(&self) -> Vec<usize> {
        (0..self.n_states())
            .filter(|&i| !self.is_absorbing(i))
            .collect()
    }

    fn transient_rows(&self) -> Result<Matrix<T>> {
        if self.absorbing_states().len() == self.n_states() {
            return Err(MatrixError::NoTransientStates);
        }
        self.transition
            .filter_rows(|_, state| !self.is_absorbing(state))
    }

    /// `Q`: transition probabilities among transient states.
    ///
    /// # Errors
    ///
    /// `NoTransientStates` if every state is absorbing.
    pub fn q(&self) -> Result<SquareMatrix<T>> {
        let q = self
            .transient_rows()?
            .filter_cols(|_, state| !self.is_absorbing(state))?;
        SquareMatrix::from_matrix(q)
    }

    /// `R`: transition probabilities from transient into absorbing states.
    ///
    /// # Errors
    ///
    /// `NoTransientStates` or `NoAbsorbingStates` if either block is empty.
    pub fn r(&self) -> Result<Matrix<T>> {
        if self.absorbing_states().is_empty() {
            return Err(MatrixError::NoAbsorbingStates);
        }
        self.transient_rows()?
            .filter_cols(|_, state| self.is_absorbing(state))
    }

    /// `F = (I - Q)^-1`; entry `(s, t)` is the expected number of visits to
    /// transient state `t` starting from transient state `s`.
    ///
    /// # Errors
    ///
    /// `SingularMatrix` if `I - Q` is singular, which means some transient
    /// state can never reach absorption.
    pub fn fundamental_matrix(&self) -> Result<SquareMatrix<T>> {
        let q = self.q()?;
        let i_minus_q = q.identity_of_same_dimension().subtract_with(&q)?;
        debug!(size = q.size(), "inverting I - Q");
        i_minus_q.inverse()
    }

    /// `F * R`: row `t`, column `a` is the probability of eventually being
    /// absorbed in the `a`-th absorbing state starting from the `t`-th
    /// transient state, both in ascending state order.
    ///
    /// # Errors
    ///
    /// Errors of [`AbsorbingChain::fundamental_matrix`] take precedence over
    /// those of [`AbsorbingChain::r`]. A stochastic chain without absorbing
    /// states therefore reports `SingularMatrix`, since `I - Q` is singular.
    /// `NoAbsorbingStates` is only reported when `I - Q` is invertible.
    pub fn absorption_probabilities(&self) -> Result<Matrix<T>> {
        let f = self.fundamental_matrix()?;
        let r = self.r()?;
        debug!(
            transient = r.n_rows(),
            absorbing = r.n_cols(),
            "computing absorption probabilities"
        );
        f.as_matrix().multiply_by(&r)
    }

    /// Absorption probabilities from one transient `state`, keyed by
    /// absorbing state index.
    ///
    /// # Errors
    ///
    /// `RowOutOfBounds` for an unknown state, `StateNotTransient` for an
    /// absorbing one, plus any error of
    /// [`AbsorbingChain::absorption_probabilities`].
    pub fn absorption_probabilities_from(&self, state: usize) -> Result<Vec<(usize, T)>> {
        if state >= self.n_states() {
            return Err(MatrixError::RowOutOfBounds {
                row: state,
                nrows: self.n_states(),
            });
        }
        let position = self
            .transient_states()
            .iter()
            .position(|&s| s == state)
            .ok_or(MatrixError::StateNotTransient { state })?;
        let fr = self.absorption_probabilities()?;
        Ok(self
            .absorbing_states()
            .iter()
            .copied()
            .zip(fr.row(position)?.iter().cloned())
            .collect())
    }

    /// Expected number of steps before absorption from each transient state,
    /// in ascending state order (row sums of the fundamental matrix).
    ///
    /// # Errors
    ///
    /// Any error of [`AbsorbingChain::fundamental_matrix`].
    pub fn expected_steps(&self) -> Result<Vec<T>> {
        let f = self.fundamental_matrix()?;
        let zero = f.zero_of_cells();
        Ok(f.rows()
            .iter()
            .map(|row| row.iter().fold(zero.clone(), |acc, cell| acc.add(cell)))
            .collect())
    }
}

/// An all-zero row counts as absorbing, as does a row whose only one sits on
/// the diagonal.
fn is_absorbing_row<T: ArithmeticElement>(row: &[T], index: usize, zero: &T, one: &T) -> bool {
    if row.iter().all(|cell| cell == zero) {
        return true;
    }
    let ones = row.iter().filter(|cell| *cell == one).count();
    ones == 1 && row[index] == *one
}
