//! Report presentation: per-test narrative, proportion chart, CSV export.
//!
//! Pure consumers of [`Summary`]; nothing here feeds back into the harness.

use crate::report::{Summary, TestCase, Value};
use serde::Serialize;
use std::path::Path;

fn fmt_value(value: Option<&Value>) -> String {
    value.map_or_else(|| "-".to_string(), ToString::to_string)
}

fn fmt_operands(case: &TestCase) -> String {
    case.operands
        .iter()
        .map(|v| format!("{v:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print the run banner, one block per test case, and the closing counters.
pub fn print_report(summary: &Summary<'_>) {
    println!();
    println!("     ************ Homomorphic operator consistency ************");
    println!();
    for case in summary.cases {
        println!("*** Test of operator {} ***", case.op);
        println!("operands:  {}", fmt_operands(case));
        println!("expected  -> {}", fmt_value(case.expected.as_ref()));
        println!("decrypted -> {}", fmt_value(case.actual.as_ref()));
        match &case.cause {
            Some(cause) => println!("numeric: {}  operands intact: {}  ({cause})",
                case.numeric, case.aliasing),
            None => println!("numeric: {}  operands intact: {}", case.numeric, case.aliasing),
        }
        println!();
    }
    println!("Number of successful tests: {}", summary.success_count);
    println!("Number of failed tests: {}", summary.failure_count);
}

const CHART_WIDTH: u32 = 40;

fn chart_lines(success: u32, failure: u32) -> Vec<String> {
    let total = success + failure;
    if total == 0 {
        return vec!["no test cases recorded".to_string()];
    }
    let mut lines = Vec::with_capacity(2);
    for (label, count) in [("success", success), ("failure", failure)] {
        let filled = (count * CHART_WIDTH / total) as usize;
        let percent = f64::from(count) * 100.0 / f64::from(total);
        lines.push(format!(
            "{label}  {:<width$}  {count} ({percent:.1}%)",
            "#".repeat(filled),
            width = CHART_WIDTH as usize,
        ));
    }
    lines
}

/// Two-slice proportion chart of successes versus failures.
pub fn render_chart(summary: &Summary<'_>) {
    println!();
    println!("Successful tests versus failed tests:");
    for line in chart_lines(summary.success_count, summary.failure_count) {
        println!("{line}");
    }
}

#[derive(Serialize)]
struct CsvRow {
    op: String,
    operands: String,
    expected: String,
    actual: String,
    numeric: String,
    aliasing: String,
    cause: String,
}

impl From<&TestCase> for CsvRow {
    fn from(case: &TestCase) -> Self {
        Self {
            op: case.op.to_string(),
            operands: fmt_operands(case),
            expected: fmt_value(case.expected.as_ref()),
            actual: fmt_value(case.actual.as_ref()),
            numeric: case.numeric.to_string(),
            aliasing: case.aliasing.to_string(),
            cause: case.cause.clone().unwrap_or_default(),
        }
    }
}

/// Write one row per test case, headers included, to `path`.
pub fn export_csv(summary: &Summary<'_>, path: &Path) -> Result<(), csv::Error> {
    let mut wtr = csv::Writer::from_path(path)?;
    for case in summary.cases {
        wtr.serialize(CsvRow::from(case))?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{Op, TestCase, TestReport, Verdict};

    fn sample_report() -> TestReport {
        let mut report = TestReport::new();
        report.record(TestCase {
            op: Op::AddAssign,
            operands: vec![vec![1, 2], vec![3, 4]],
            expected: Some(Value::Vector(vec![4, 6])),
            actual: Some(Value::Vector(vec![4, 6])),
            numeric: Verdict::Pass,
            aliasing: Verdict::Pass,
            cause: None,
        });
        report.record(TestCase::errored(
            Op::Pow(3),
            vec![vec![1, 2]],
            "powers unsupported".into(),
        ));
        report
    }

    #[test]
    fn test_chart_proportions() {
        let lines = chart_lines(3, 1);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("success"));
        assert!(lines[0].contains("3 (75.0%)"));
        assert!(lines[1].contains("1 (25.0%)"));
        assert_eq!(lines[0].matches('#').count(), 30);
        assert_eq!(lines[1].matches('#').count(), 10);

        assert_eq!(chart_lines(0, 0), vec!["no test cases recorded".to_string()]);
    }

    #[test]
    fn test_csv_round_trip() {
        let report = sample_report();
        let path = std::env::temp_dir().join("homcheck_present_test.csv");
        export_csv(&report.summary(), &path).unwrap();

        let body = std::fs::read_to_string(&path).unwrap();
        let mut lines = body.lines();
        assert_eq!(
            lines.next().unwrap(),
            "op,operands,expected,actual,numeric,aliasing,cause"
        );
        assert!(body.contains("+="));
        assert!(body.contains("powers unsupported"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_print_paths_do_not_panic() {
        let report = sample_report();
        print_report(&report.summary());
        render_chart(&report.summary());
    }
}
