//! Ciphertext algebra driver.
//!
//! Runs the operator battery against a scheme context: encrypts fresh
//! fixtures, snapshots every operand by decryption before each call, invokes
//! the operator, then decrypts both the declared result and the surviving
//! operands. The result is compared against the plaintext oracle (numeric
//! verdict); the operands are compared against their snapshots (aliasing
//! verdict). The two verdicts are never conflated.
//!
//! The chained block threads each stage's actual decrypted output into the
//! next stage's oracle input, so expectations stay consistent with whatever
//! precision behavior the scheme accumulates.

use crate::error::{HarnessError, SchemeError};
use crate::fixture::FixtureSet;
use crate::oracle;
use crate::report::{Op, TestCase, TestReport, Value, Verdict};
use crate::scheme::SchemeContext;

fn vector_case(
    op: Op,
    operands: Vec<Vec<i64>>,
    expected: Result<Vec<i64>, HarnessError>,
    actual: Vec<i64>,
    aliasing: Verdict,
) -> TestCase {
    match expected {
        Ok(want) => TestCase {
            op,
            operands,
            numeric: Verdict::from_bool(actual == want),
            expected: Some(Value::Vector(want)),
            actual: Some(Value::Vector(actual)),
            aliasing,
            cause: None,
        },
        // Oracle failure (fixture-construction bug): fatal to the scenario,
        // surfaced as a recorded failure rather than a silently wrong value.
        Err(e) => TestCase {
            op,
            operands,
            expected: None,
            actual: Some(Value::Vector(actual)),
            numeric: Verdict::Fail,
            aliasing,
            cause: Some(e.to_string()),
        },
    }
}

fn scalar_case(
    op: Op,
    operands: Vec<Vec<i64>>,
    expected: Result<i64, HarnessError>,
    actual_slots: &[i64],
    aliasing: Verdict,
) -> TestCase {
    let lead = actual_slots.first().copied();
    match expected {
        Ok(want) => TestCase {
            op,
            operands,
            numeric: Verdict::from_bool(lead == Some(want)),
            expected: Some(Value::Scalar(want)),
            actual: lead.map(Value::Scalar),
            aliasing,
            cause: lead
                .is_none()
                .then(|| SchemeError::EmptyDecryption.to_string()),
        },
        Err(e) => TestCase {
            op,
            operands,
            expected: None,
            actual: lead.map(Value::Scalar),
            numeric: Verdict::Fail,
            aliasing,
            cause: Some(e.to_string()),
        },
    }
}

/// Drives one scheme context through the battery.
pub struct Driver<'a, S: SchemeContext> {
    scheme: &'a S,
}

impl<'a, S: SchemeContext> Driver<'a, S> {
    /// Wrap a configured scheme context.
    pub fn new(scheme: &'a S) -> Self {
        Self { scheme }
    }

    fn seal(&self, slots: &[i64]) -> Result<S::Ciphertext, SchemeError> {
        let plain = self.scheme.encode(slots)?;
        self.scheme.encrypt(plain)
    }

    /// Run the full battery and aggregate every scenario's record.
    ///
    /// A scheme failure inside the chained block corrupts the shared
    /// ciphertext state and aborts the whole run; failures in the independent
    /// scenarios are isolated to their own [`TestCase`].
    pub fn run(&self, fixtures: &FixtureSet) -> Result<TestReport, HarnessError> {
        let mut report = TestReport::new();
        self.run_chained(fixtures, &mut report)?;

        report.record(self.pow_assign_case(&fixtures.square, 2));
        report.record(self.pow_assign_case(&fixtures.cube, 3));
        report.record(self.add_case(&fixtures.plain_a, &fixtures.plain_b));
        report.record(self.pow_case(&fixtures.square_nm, 2));
        report.record(self.pow_case(&fixtures.cube_nm, 3));
        Ok(report)
    }

    /// The `+=` → `-=` → `*=` → `%=` pipeline over one shared ciphertext.
    fn run_chained(
        &self,
        fixtures: &FixtureSet,
        report: &mut TestReport,
    ) -> Result<(), HarnessError> {
        type Apply<S> = fn(
            &S,
            <S as SchemeContext>::Ciphertext,
            &<S as SchemeContext>::Ciphertext,
        )
            -> Result<<S as SchemeContext>::Ciphertext, SchemeError>;
        type Expect = fn(&[i64], &[i64]) -> Result<Vec<i64>, HarnessError>;

        let stages: [(Op, Apply<S>, Expect); 3] = [
            (Op::AddAssign, S::add_assign, oracle::add),
            (Op::SubAssign, S::sub_assign, oracle::sub),
            (Op::MulAssign, S::mul_assign, oracle::mul),
        ];

        let mut left = self.seal(&fixtures.chain_a)?;
        let right = self.seal(&fixtures.chain_b)?;
        // The threaded value starts as the decrypted fresh ciphertext, so
        // every stage's expectation is phrased over what the scheme actually
        // holds rather than over the raw fixture.
        let mut threaded = self.scheme.decrypt(&left)?;

        for (op, apply, expect) in stages {
            let right_before = self.scheme.decrypt(&right)?;
            left = apply(self.scheme, left, &right)?;
            let actual = self.scheme.decrypt(&left)?;
            let right_after = self.scheme.decrypt(&right)?;
            let aliasing = Verdict::from_bool(right_after == right_before);
            let expected = expect(&threaded, &right_before);
            report.record(vector_case(
                op,
                vec![threaded.clone(), right_before],
                expected,
                actual.clone(),
                aliasing,
            ));
            threaded = actual;
        }

        // Scalar product closes the chain; only the leading slot of its
        // result carries meaning.
        let right_before = self.scheme.decrypt(&right)?;
        let closed = self.scheme.dot_assign(left, &right)?;
        let actual = self.scheme.decrypt(&closed)?;
        let right_after = self.scheme.decrypt(&right)?;
        let aliasing = Verdict::from_bool(right_after == right_before);
        let expected = oracle::dot(&threaded, &right_before);
        report.record(scalar_case(
            Op::DotAssign,
            vec![threaded, right_before],
            expected,
            &actual,
            aliasing,
        ));
        Ok(())
    }

    fn pow_assign_case(&self, operand: &[i64], k: u32) -> TestCase {
        self.try_pow_assign(operand, k).unwrap_or_else(|e| {
            TestCase::errored(Op::PowAssign(k), vec![operand.to_vec()], e.to_string())
        })
    }

    fn try_pow_assign(&self, operand: &[i64], k: u32) -> Result<TestCase, SchemeError> {
        let ct = self.seal(operand)?;
        let before = self.scheme.decrypt(&ct)?;
        let ct = self.scheme.pow_assign(ct, k)?;
        let actual = self.scheme.decrypt(&ct)?;
        let expected = oracle::pow(&before, k);
        // The single operand is consumed by the mutating form; there is no
        // surviving operand whose contract could be violated.
        Ok(vector_case(
            Op::PowAssign(k),
            vec![before],
            expected,
            actual,
            Verdict::Pass,
        ))
    }

    fn add_case(&self, a: &[i64], b: &[i64]) -> TestCase {
        self.try_add(a, b).unwrap_or_else(|e| {
            TestCase::errored(Op::Add, vec![a.to_vec(), b.to_vec()], e.to_string())
        })
    }

    fn try_add(&self, a: &[i64], b: &[i64]) -> Result<TestCase, SchemeError> {
        let ca = self.seal(a)?;
        let cb = self.seal(b)?;
        let left_before = self.scheme.decrypt(&ca)?;
        let right_before = self.scheme.decrypt(&cb)?;
        let result = self.scheme.add(&ca, &cb)?;
        let actual = self.scheme.decrypt(&result)?;
        let left_after = self.scheme.decrypt(&ca)?;
        let right_after = self.scheme.decrypt(&cb)?;
        // Both operands are contractually untouched; either one drifting from
        // its snapshot is an aliasing violation regardless of the numbers.
        let aliasing =
            Verdict::from_bool(left_after == left_before && right_after == right_before);
        let expected = oracle::add(&left_before, &right_before);
        Ok(vector_case(
            Op::Add,
            vec![left_before, right_before],
            expected,
            actual,
            aliasing,
        ))
    }

    fn pow_case(&self, operand: &[i64], k: u32) -> TestCase {
        self.try_pow(operand, k).unwrap_or_else(|e| {
            TestCase::errored(Op::Pow(k), vec![operand.to_vec()], e.to_string())
        })
    }

    fn try_pow(&self, operand: &[i64], k: u32) -> Result<TestCase, SchemeError> {
        let ct = self.seal(operand)?;
        let before = self.scheme.decrypt(&ct)?;
        let result = self.scheme.pow(&ct, k)?;
        let actual = self.scheme.decrypt(&result)?;
        let after = self.scheme.decrypt(&ct)?;
        let aliasing = Verdict::from_bool(after == before);
        let expected = oracle::pow(&before, k);
        Ok(vector_case(
            Op::Pow(k),
            vec![before],
            expected,
            actual,
            aliasing,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::FixtureMode;
    use crate::plain::{PlainCipher, PlainPlaintext, PlainScheme};
    use crate::scheme::SchemeParams;

    fn fixed_set() -> FixtureSet {
        FixtureSet::generate_with_thread_rng(FixtureMode::Fixed)
    }

    fn run_with(scheme: &PlainScheme) -> TestReport {
        Driver::new(scheme).run(&fixed_set()).unwrap()
    }

    #[test]
    fn test_fixed_battery_all_pass() {
        let scheme = PlainScheme::configure(SchemeParams::default()).unwrap();
        let report = run_with(&scheme);
        let summary = report.summary();
        assert_eq!(summary.success_count, 9);
        assert_eq!(summary.failure_count, 0);

        let expected: Vec<(Op, Value)> = vec![
            (Op::AddAssign, Value::Vector(vec![3, 4, 5, 6, 7])),
            (Op::SubAssign, Value::Vector(vec![1, 2, 3, 4, 5])),
            (Op::MulAssign, Value::Vector(vec![2, 4, 6, 8, 10])),
            (Op::DotAssign, Value::Scalar(60)),
            (Op::PowAssign(2), Value::Vector(vec![1, 4, 9, 16, 25])),
            (Op::PowAssign(3), Value::Vector(vec![1, 8, 27, 64, 125])),
            (Op::Add, Value::Vector(vec![3, 4, 5, 6, 7])),
            (Op::Pow(2), Value::Vector(vec![1, 4, 9, 16, 25])),
            (Op::Pow(3), Value::Vector(vec![1, 8, 27, 64, 125])),
        ];
        for (case, (op, value)) in summary.cases.iter().zip(&expected) {
            assert_eq!(case.op, *op);
            assert_eq!(case.expected.as_ref(), Some(value), "oracle value for {op}");
            assert_eq!(case.actual.as_ref(), Some(value), "decrypted value for {op}");
            assert!(case.passed(), "case {op} should pass");
        }
    }

    #[test]
    fn test_random_battery_all_pass() {
        // Default modulus is far above anything the random bounds can reach,
        // so plaintext and ciphertext arithmetic must agree exactly.
        let scheme = PlainScheme::configure(SchemeParams::default()).unwrap();
        let fixtures = FixtureSet::generate_with_thread_rng(FixtureMode::Random);
        let report = Driver::new(&scheme).run(&fixtures).unwrap();
        assert_eq!(report.summary().failure_count, 0);
    }

    #[test]
    fn test_leaky_add_flagged_as_aliasing_violation() {
        let scheme = PlainScheme::configure(SchemeParams::default())
            .unwrap()
            .with_leaky_add();
        let report = run_with(&scheme);
        let summary = report.summary();
        assert_eq!(summary.success_count, 8);
        assert_eq!(summary.failure_count, 1);

        let add = summary
            .cases
            .iter()
            .find(|c| c.op == Op::Add)
            .expect("+ case present");
        // The number is right and that must not excuse the corruption.
        assert_eq!(add.numeric, Verdict::Pass);
        assert_eq!(add.aliasing, Verdict::Fail);
        assert!(add.cause.is_none());
        assert!(!add.passed());
    }

    #[test]
    fn test_small_modulus_divergence_is_caught() {
        // 6^3 = 216 wraps past the centered range of Z_257, so both cube
        // forms must fail numerically while everything shallower passes.
        let params = SchemeParams {
            plain_modulus: 257,
            ..SchemeParams::default()
        };
        let scheme = PlainScheme::configure(params).unwrap();
        let fixtures = FixtureSet {
            chain_a: vec![6; 5],
            chain_b: vec![2; 5],
            square: vec![6; 5],
            cube: vec![6; 5],
            plain_a: vec![6; 5],
            plain_b: vec![2; 5],
            square_nm: vec![6; 5],
            cube_nm: vec![6; 5],
        };
        let report = Driver::new(&scheme).run(&fixtures).unwrap();
        let summary = report.summary();
        assert_eq!(summary.failure_count, 2);
        for case in summary.cases {
            let is_cube = matches!(case.op, Op::PowAssign(3) | Op::Pow(3));
            assert_eq!(case.numeric, Verdict::from_bool(!is_cube), "op {}", case.op);
            assert_eq!(case.aliasing, Verdict::Pass, "op {}", case.op);
        }
    }

    #[test]
    fn test_chain_failure_aborts_run() {
        // Depth budget 1 admits the chained *= but not the %= that follows.
        let params = SchemeParams {
            depth_budget: 1,
            ..SchemeParams::default()
        };
        let scheme = PlainScheme::configure(params).unwrap();
        let err = Driver::new(&scheme).run(&fixed_set()).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::Scheme(SchemeError::DepthExceeded { level: 2, budget: 1 })
        ));
    }

    /// Delegating wrapper that rejects every power operation, for checking
    /// that independent-scenario failures stay isolated.
    struct NoPowers(PlainScheme);

    impl SchemeContext for NoPowers {
        type Plaintext = PlainPlaintext;
        type Ciphertext = PlainCipher;

        fn configure(params: SchemeParams) -> Result<Self, SchemeError> {
            Ok(Self(PlainScheme::configure(params)?))
        }
        fn encode(&self, slots: &[i64]) -> Result<PlainPlaintext, SchemeError> {
            self.0.encode(slots)
        }
        fn encrypt(&self, plain: PlainPlaintext) -> Result<PlainCipher, SchemeError> {
            self.0.encrypt(plain)
        }
        fn decrypt(&self, cipher: &PlainCipher) -> Result<Vec<i64>, SchemeError> {
            self.0.decrypt(cipher)
        }
        fn add_assign(&self, l: PlainCipher, r: &PlainCipher) -> Result<PlainCipher, SchemeError> {
            self.0.add_assign(l, r)
        }
        fn sub_assign(&self, l: PlainCipher, r: &PlainCipher) -> Result<PlainCipher, SchemeError> {
            self.0.sub_assign(l, r)
        }
        fn mul_assign(&self, l: PlainCipher, r: &PlainCipher) -> Result<PlainCipher, SchemeError> {
            self.0.mul_assign(l, r)
        }
        fn dot_assign(&self, l: PlainCipher, r: &PlainCipher) -> Result<PlainCipher, SchemeError> {
            self.0.dot_assign(l, r)
        }
        fn pow_assign(&self, _l: PlainCipher, _k: u32) -> Result<PlainCipher, SchemeError> {
            Err(SchemeError::BadParams("powers unsupported".into()))
        }
        fn add(&self, l: &PlainCipher, r: &PlainCipher) -> Result<PlainCipher, SchemeError> {
            self.0.add(l, r)
        }
        fn pow(&self, _b: &PlainCipher, _k: u32) -> Result<PlainCipher, SchemeError> {
            Err(SchemeError::BadParams("powers unsupported".into()))
        }
    }

    #[test]
    fn test_independent_scheme_failures_are_isolated() {
        let scheme = NoPowers::configure(SchemeParams::default()).unwrap();
        let report = Driver::new(&scheme).run(&fixed_set()).unwrap();
        let summary = report.summary();
        // The run completes: chain and `+` pass, all four power forms fail
        // with a recorded cause.
        assert_eq!(summary.cases.len(), 9);
        assert_eq!(summary.success_count, 5);
        assert_eq!(summary.failure_count, 4);
        for case in summary.cases {
            let is_power = matches!(case.op, Op::PowAssign(_) | Op::Pow(_));
            assert_eq!(case.cause.is_some(), is_power, "op {}", case.op);
        }
    }
}
