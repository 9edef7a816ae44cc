//! Scheme context boundary.
//!
//! The harness never touches scheme internals; everything it needs from a
//! homomorphic scheme is behind [`SchemeContext`]. Mutating operators consume
//! the left ciphertext by value and hand back its replacement; non-mutating
//! operators borrow both operands and return a fresh ciphertext. A correct
//! scheme therefore cannot alias through this interface — the harness still
//! verifies that at runtime rather than assuming it.

use crate::error::SchemeError;
use serde::Serialize;

/// Configuration accepted by a scheme context.
///
/// The fields determine how many operations fit before noise or precision is
/// exhausted; `validate` only rejects configurations no scheme could accept.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SchemeParams {
    /// Plaintext modulus. Slot values live in Z_t, decoded centered.
    pub plain_modulus: u64,
    /// Ring degree / slot capacity of one ciphertext.
    pub poly_degree: usize,
    /// Claimed security level in bits.
    pub security_bits: u32,
    /// Multiplicative depth budget per ciphertext.
    pub depth_budget: u32,
}

impl Default for SchemeParams {
    fn default() -> Self {
        Self {
            plain_modulus: 65537,
            poly_degree: 8192,
            security_bits: 128,
            depth_budget: 10,
        }
    }
}

impl SchemeParams {
    /// Reject degenerate parameter sets.
    pub fn validate(&self) -> Result<(), SchemeError> {
        if self.plain_modulus < 2 {
            return Err(SchemeError::BadParams(format!(
                "plain modulus {} is too small",
                self.plain_modulus
            )));
        }
        if self.poly_degree == 0 || !self.poly_degree.is_power_of_two() {
            return Err(SchemeError::BadParams(format!(
                "ring degree {} must be a non-zero power of two",
                self.poly_degree
            )));
        }
        if self.depth_budget == 0 {
            return Err(SchemeError::BadParams(
                "depth budget must allow at least one multiplication".into(),
            ));
        }
        Ok(())
    }
}

/// The capability the harness drives.
///
/// `Plaintext` is consumed exactly once by `encrypt`; `Ciphertext` is an
/// opaque owned handle to scheme-level encrypted state.
pub trait SchemeContext: Sized {
    /// Scheme-specific encoding of a slot vector.
    type Plaintext;
    /// Opaque handle to an encrypted slot vector.
    type Ciphertext;

    /// Build a context from `params`, rejecting unusable configurations.
    fn configure(params: SchemeParams) -> Result<Self, SchemeError>;

    /// Encode a slot vector into a plaintext.
    fn encode(&self, slots: &[i64]) -> Result<Self::Plaintext, SchemeError>;

    /// Encrypt a plaintext, consuming it.
    fn encrypt(&self, plain: Self::Plaintext) -> Result<Self::Ciphertext, SchemeError>;

    /// Decrypt a ciphertext back into slot values.
    fn decrypt(&self, cipher: &Self::Ciphertext) -> Result<Vec<i64>, SchemeError>;

    /// `lhs += rhs`: consumes the left ciphertext, returns its replacement.
    /// The right operand must come back out unmodified.
    fn add_assign(
        &self,
        lhs: Self::Ciphertext,
        rhs: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, SchemeError>;

    /// `lhs -= rhs`.
    fn sub_assign(
        &self,
        lhs: Self::Ciphertext,
        rhs: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, SchemeError>;

    /// `lhs *= rhs` (element-wise).
    fn mul_assign(
        &self,
        lhs: Self::Ciphertext,
        rhs: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, SchemeError>;

    /// `lhs %= rhs`: scalar product. Only the leading slot of the result is
    /// contractually meaningful; trailing slots are a scheme artifact.
    fn dot_assign(
        &self,
        lhs: Self::Ciphertext,
        rhs: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, SchemeError>;

    /// `lhs **= k`: element-wise integer power by repeated multiplication.
    fn pow_assign(&self, lhs: Self::Ciphertext, k: u32) -> Result<Self::Ciphertext, SchemeError>;

    /// `lhs + rhs`: produces a new ciphertext, both operands untouched.
    fn add(
        &self,
        lhs: &Self::Ciphertext,
        rhs: &Self::Ciphertext,
    ) -> Result<Self::Ciphertext, SchemeError>;

    /// `base ** k`: produces a new ciphertext, the operand untouched.
    fn pow(&self, base: &Self::Ciphertext, k: u32) -> Result<Self::Ciphertext, SchemeError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_validate() {
        assert!(SchemeParams::default().validate().is_ok());
    }

    #[test]
    fn test_degenerate_params_rejected() {
        let too_small = SchemeParams {
            plain_modulus: 1,
            ..SchemeParams::default()
        };
        assert!(matches!(
            too_small.validate(),
            Err(SchemeError::BadParams(_))
        ));

        let odd_degree = SchemeParams {
            poly_degree: 100,
            ..SchemeParams::default()
        };
        assert!(matches!(
            odd_degree.validate(),
            Err(SchemeError::BadParams(_))
        ));

        let no_depth = SchemeParams {
            depth_budget: 0,
            ..SchemeParams::default()
        };
        assert!(matches!(no_depth.validate(), Err(SchemeError::BadParams(_))));
    }
}
