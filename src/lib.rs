//! HOMCHECK ― consistency harness for homomorphic ciphertext operators
//!
//! Drives a scheme context through a fixed battery of paired
//! plaintext/ciphertext computations (add, sub, mul, scalar product, square,
//! cube; mutating and non-mutating forms), detects numeric divergence and
//! aliasing corruption, and aggregates the verdicts into a report.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, missing_docs)]

pub mod driver;
pub mod error;
pub mod fixture;
pub mod oracle;
pub mod plain;
pub mod present;
pub mod report;
pub mod scheme;

pub use driver::Driver;
pub use error::{HarnessError, SchemeError};
pub use fixture::{FixtureMode, FixtureSet};
pub use plain::PlainScheme;
pub use report::{Summary, TestCase, TestReport};
pub use scheme::{SchemeContext, SchemeParams};
