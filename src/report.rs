//! Test records and the result aggregator.

use serde::Serialize;
use std::fmt;

/// Operator exercised by one scenario, named by its surface syntax.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Op {
    /// Mutating addition `+=`.
    AddAssign,
    /// Mutating subtraction `-=`.
    SubAssign,
    /// Mutating element-wise multiplication `*=`.
    MulAssign,
    /// Mutating scalar product `%=`.
    DotAssign,
    /// Mutating integer power `**=k`.
    PowAssign(u32),
    /// Non-mutating addition `+`.
    Add,
    /// Non-mutating integer power `**k`.
    Pow(u32),
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddAssign => write!(f, "+="),
            Self::SubAssign => write!(f, "-="),
            Self::MulAssign => write!(f, "*="),
            Self::DotAssign => write!(f, "%="),
            Self::PowAssign(k) => write!(f, "**={k}"),
            Self::Add => write!(f, "+"),
            Self::Pow(k) => write!(f, "**{k}"),
        }
    }
}

/// A computed result: a slot vector, or the scalar a dot product reduces to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Value {
    /// Full slot vector.
    Vector(Vec<i64>),
    /// Scalar result (leading slot of a scalar-product ciphertext).
    Scalar(i64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vector(v) => write!(f, "{v:?}"),
            Self::Scalar(s) => write!(f, "{s}"),
        }
    }
}

/// Outcome of one observable check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Verdict {
    /// The check held.
    Pass,
    /// The check was violated.
    Fail,
}

impl Verdict {
    /// Pass when `ok`, Fail otherwise.
    #[must_use]
    pub fn from_bool(ok: bool) -> Self {
        if ok {
            Self::Pass
        } else {
            Self::Fail
        }
    }

    /// True when the check held.
    #[must_use]
    pub fn passed(self) -> bool {
        self == Self::Pass
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pass => write!(f, "ok"),
            Self::Fail => write!(f, "FAIL"),
        }
    }
}

/// Everything observed while verifying one operator scenario.
///
/// `numeric` and `aliasing` are independent: a scenario can produce the right
/// number while silently corrupting an operand, and the report keeps both
/// facts visible.
#[derive(Clone, Debug, Serialize)]
pub struct TestCase {
    /// Operator under test.
    pub op: Op,
    /// Decrypted operand values as of invocation.
    pub operands: Vec<Vec<i64>>,
    /// Oracle result; absent when the scenario failed before it was computed.
    pub expected: Option<Value>,
    /// Decrypted ciphertext result; absent when the scenario errored.
    pub actual: Option<Value>,
    /// Did the decrypted result match the oracle exactly?
    pub numeric: Verdict,
    /// Did every contractually-unmodified operand survive the call intact?
    pub aliasing: Verdict,
    /// Error that cut the scenario short, if any.
    pub cause: Option<String>,
}

impl TestCase {
    /// Record for a scenario aborted by a scheme or fixture error.
    #[must_use]
    pub fn errored(op: Op, operands: Vec<Vec<i64>>, cause: String) -> Self {
        Self {
            op,
            operands,
            expected: None,
            actual: None,
            numeric: Verdict::Fail,
            aliasing: Verdict::Pass,
            cause: Some(cause),
        }
    }

    /// Combined verdict: numeric and aliasing both held and nothing errored.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.numeric.passed() && self.aliasing.passed() && self.cause.is_none()
    }
}

/// Read-only view of an aggregated run.
#[derive(Clone, Copy, Debug)]
pub struct Summary<'a> {
    /// Scenarios whose combined verdict passed.
    pub success_count: u32,
    /// Scenarios whose combined verdict failed.
    pub failure_count: u32,
    /// Per-scenario records in execution order.
    pub cases: &'a [TestCase],
}

/// Accumulates test cases and their pass/fail counters for one run.
#[derive(Debug, Default)]
pub struct TestReport {
    cases: Vec<TestCase>,
    success_count: u32,
    failure_count: u32,
}

impl TestReport {
    /// Empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a finalized case, bumping the matching counter.
    pub fn record(&mut self, case: TestCase) {
        if case.passed() {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
        self.cases.push(case);
    }

    /// Read-only view over counters and cases.
    #[must_use]
    pub fn summary(&self) -> Summary<'_> {
        Summary {
            success_count: self.success_count,
            failure_count: self.failure_count,
            cases: &self.cases,
        }
    }
}
