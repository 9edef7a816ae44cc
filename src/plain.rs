//! Reference scheme context used by the demo binary and the self-tests.
//!
//! `PlainScheme` transports slot values in the clear behind an opaque
//! shared-state handle. It is not a cipher; it exists so the harness has a
//! live implementation of the boundary whose arithmetic is exactly checkable.
//! It still behaves like one where the harness cares: slot arithmetic is
//! performed mod the configured plain modulus with centered decode, every
//! ciphertext carries a multiplicative-depth level checked against the
//! configured budget, and the scalar product leaves trailing slots holding a
//! rotate-and-add artifact.

use crate::error::SchemeError;
use crate::scheme::{SchemeContext, SchemeParams};
use std::cell::RefCell;
use std::rc::Rc;

/// Encoded slot vector, reduced into `[0, t)`.
#[derive(Clone, Debug)]
pub struct PlainPlaintext {
    slots: Vec<i64>,
}

#[derive(Clone, Debug)]
struct SlotState {
    values: Vec<i64>, // residues in [0, t)
    level: u32,       // multiplicative depth consumed
}

/// Opaque ciphertext handle. The slot state behind it belongs to the scheme;
/// holding a handle says nothing about who else can reach that state.
#[derive(Debug)]
pub struct PlainCipher {
    state: Rc<RefCell<SlotState>>,
}

impl PlainCipher {
    fn fresh(values: Vec<i64>, level: u32) -> Self {
        Self {
            state: Rc::new(RefCell::new(SlotState { values, level })),
        }
    }
}

/// Clear-transport scheme context with modular slot arithmetic and depth
/// accounting.
pub struct PlainScheme {
    modulus: i64,
    slot_capacity: usize,
    depth_budget: u32,
    leaky_add: bool,
}

impl PlainScheme {
    /// Enable the known defect class this harness exists to catch: the
    /// non-mutating `+` writes the sum into its left operand and returns a
    /// handle sharing that state. Self-tests use this to prove the driver
    /// flags the aliasing instead of masking it.
    #[must_use]
    pub fn with_leaky_add(mut self) -> Self {
        self.leaky_add = true;
        self
    }

    fn reduce(&self, v: i64) -> i64 {
        v.rem_euclid(self.modulus)
    }

    /// Centered lift from `[0, t)` into `(-t/2, t/2]`.
    fn lift(&self, v: i64) -> i64 {
        if v > self.modulus / 2 {
            v - self.modulus
        } else {
            v
        }
    }

    fn mul_mod(&self, a: i64, b: i64) -> i64 {
        ((i128::from(a) * i128::from(b)).rem_euclid(i128::from(self.modulus))) as i64
    }

    fn check_depth(&self, level: u32) -> Result<u32, SchemeError> {
        if level > self.depth_budget {
            Err(SchemeError::DepthExceeded {
                level,
                budget: self.depth_budget,
            })
        } else {
            Ok(level)
        }
    }

    fn check_slots(a: &SlotState, b: &SlotState) -> Result<(), SchemeError> {
        if a.values.len() == b.values.len() {
            Ok(())
        } else {
            Err(SchemeError::SlotCountMismatch {
                left: a.values.len(),
                right: b.values.len(),
            })
        }
    }

    /// Combine two states element-wise at the given depth level.
    fn zip_with<F: Fn(i64, i64) -> i64>(
        &self,
        a: &SlotState,
        b: &SlotState,
        level: u32,
        f: F,
    ) -> Result<SlotState, SchemeError> {
        Self::check_slots(a, b)?;
        let values = a
            .values
            .iter()
            .zip(&b.values)
            .map(|(&x, &y)| self.reduce(f(x, y)))
            .collect();
        Ok(SlotState {
            values,
            level: self.check_depth(level)?,
        })
    }

    fn raise(&self, base: &SlotState, k: u32) -> Result<SlotState, SchemeError> {
        // Repeated squaring would be cheaper; repeated multiplication matches
        // the operator under test and keeps the depth accounting honest.
        let level = self.check_depth(base.level + k.saturating_sub(1))?;
        let mut values = base.values.clone();
        for _ in 1..k {
            values = values
                .iter()
                .zip(&base.values)
                .map(|(&x, &y)| self.mul_mod(x, y))
                .collect();
        }
        Ok(SlotState { values, level })
    }

    fn dot_state(&self, a: &SlotState, b: &SlotState) -> Result<SlotState, SchemeError> {
        Self::check_slots(a, b)?;
        let level = self.check_depth(a.level.max(b.level) + 1)?;
        let total = a
            .values
            .iter()
            .zip(&b.values)
            .fold(0i64, |acc, (&x, &y)| {
                self.reduce(acc + self.mul_mod(x, y))
            });
        // Rotate-and-add leaves every slot holding the total; only the
        // leading slot is contractually meaningful.
        Ok(SlotState {
            values: vec![total; a.values.len()],
            level,
        })
    }
}

impl SchemeContext for PlainScheme {
    type Plaintext = PlainPlaintext;
    type Ciphertext = PlainCipher;

    fn configure(params: SchemeParams) -> Result<Self, SchemeError> {
        params.validate()?;
        let modulus = i64::try_from(params.plain_modulus)
            .map_err(|_| SchemeError::BadParams(format!(
                "plain modulus {} exceeds the supported slot range",
                params.plain_modulus
            )))?;
        Ok(Self {
            modulus,
            slot_capacity: params.poly_degree,
            depth_budget: params.depth_budget,
            leaky_add: false,
        })
    }

    fn encode(&self, slots: &[i64]) -> Result<PlainPlaintext, SchemeError> {
        if slots.len() > self.slot_capacity {
            return Err(SchemeError::BadParams(format!(
                "vector length {} exceeds slot capacity {}",
                slots.len(),
                self.slot_capacity
            )));
        }
        Ok(PlainPlaintext {
            slots: slots.iter().map(|&v| self.reduce(v)).collect(),
        })
    }

    fn encrypt(&self, plain: PlainPlaintext) -> Result<PlainCipher, SchemeError> {
        Ok(PlainCipher::fresh(plain.slots, 0))
    }

    fn decrypt(&self, cipher: &PlainCipher) -> Result<Vec<i64>, SchemeError> {
        let state = cipher.state.borrow();
        Ok(state.values.iter().map(|&v| self.lift(v)).collect())
    }

    fn add_assign(&self, lhs: PlainCipher, rhs: &PlainCipher) -> Result<PlainCipher, SchemeError> {
        let (a, b) = (lhs.state.borrow(), rhs.state.borrow());
        let next = self.zip_with(&a, &b, a.level.max(b.level), |x, y| x + y)?;
        drop((a, b));
        Ok(PlainCipher::fresh(next.values, next.level))
    }

    fn sub_assign(&self, lhs: PlainCipher, rhs: &PlainCipher) -> Result<PlainCipher, SchemeError> {
        let (a, b) = (lhs.state.borrow(), rhs.state.borrow());
        let next = self.zip_with(&a, &b, a.level.max(b.level), |x, y| x - y)?;
        drop((a, b));
        Ok(PlainCipher::fresh(next.values, next.level))
    }

    fn mul_assign(&self, lhs: PlainCipher, rhs: &PlainCipher) -> Result<PlainCipher, SchemeError> {
        let (a, b) = (lhs.state.borrow(), rhs.state.borrow());
        let next = self.zip_with(&a, &b, a.level.max(b.level) + 1, |x, y| self.mul_mod(x, y))?;
        drop((a, b));
        Ok(PlainCipher::fresh(next.values, next.level))
    }

    fn dot_assign(&self, lhs: PlainCipher, rhs: &PlainCipher) -> Result<PlainCipher, SchemeError> {
        let next = self.dot_state(&lhs.state.borrow(), &rhs.state.borrow())?;
        Ok(PlainCipher::fresh(next.values, next.level))
    }

    fn pow_assign(&self, lhs: PlainCipher, k: u32) -> Result<PlainCipher, SchemeError> {
        let next = self.raise(&lhs.state.borrow(), k)?;
        Ok(PlainCipher::fresh(next.values, next.level))
    }

    fn add(&self, lhs: &PlainCipher, rhs: &PlainCipher) -> Result<PlainCipher, SchemeError> {
        if self.leaky_add {
            // The defect under test: write the sum into the left operand's
            // state and hand back a handle sharing it.
            let next = {
                let (a, b) = (lhs.state.borrow(), rhs.state.borrow());
                self.zip_with(&a, &b, a.level.max(b.level), |x, y| x + y)?
            };
            *lhs.state.borrow_mut() = next;
            return Ok(PlainCipher {
                state: Rc::clone(&lhs.state),
            });
        }
        let (a, b) = (lhs.state.borrow(), rhs.state.borrow());
        let next = self.zip_with(&a, &b, a.level.max(b.level), |x, y| x + y)?;
        drop((a, b));
        Ok(PlainCipher::fresh(next.values, next.level))
    }

    fn pow(&self, base: &PlainCipher, k: u32) -> Result<PlainCipher, SchemeError> {
        let next = self.raise(&base.state.borrow(), k)?;
        Ok(PlainCipher::fresh(next.values, next.level))
    }
}
