//! Check outcomes, keyed by the serialization they were run against.

use std::fmt;

use rdf_orm::Format;

/// Outcome of one check against the output of one format.
///
/// A check passes when it records no issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Check {
    /// Format whose output was checked.
    pub format: Format,
    /// What was checked, e.g. `"statement count"`.
    pub name: &'static str,
    /// Problems found; empty when the check passed.
    pub issues: Vec<String>,
}

impl Check {
    /// A check that found `issues`.
    pub fn new(format: Format, name: &'static str, issues: Vec<String>) -> Self {
        Self {
            format,
            name,
            issues,
        }
    }

    /// A check that found nothing wrong.
    pub fn passed(format: Format, name: &'static str) -> Self {
        Self::new(format, name, Vec::new())
    }

    /// A check that found a single problem.
    pub fn failed(format: Format, name: &'static str, issue: impl Into<String>) -> Self {
        Self::new(format, name, vec![issue.into()])
    }

    /// True if any issue was recorded.
    pub fn is_failure(&self) -> bool {
        !self.issues.is_empty()
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return write!(f, "[{}] {}: ok", self.format.name(), self.name);
        }
        write!(f, "[{}] {}:", self.format.name(), self.name)?;
        for issue in &self.issues {
            write!(f, "\n    {issue}")?;
        }
        Ok(())
    }
}

/// Every check run by the suite, in run order.
#[derive(Debug, Default)]
pub struct ConformanceReport {
    checks: Vec<Check>,
}

impl ConformanceReport {
    /// An empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// All checks.
    pub fn checks(&self) -> &[Check] {
        &self.checks
    }

    /// Checks run against `format`.
    pub fn for_format(&self, format: Format) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(move |c| c.format == format)
    }

    /// Checks that recorded at least one issue.
    pub fn failures(&self) -> impl Iterator<Item = &Check> {
        self.checks.iter().filter(|c| c.is_failure())
    }

    /// True if no check recorded an issue.
    pub fn all_passed(&self) -> bool {
        self.failures().next().is_none()
    }
}

impl Extend<Check> for ConformanceReport {
    fn extend<I: IntoIterator<Item = Check>>(&mut self, checks: I) {
        self.checks.extend(checks);
    }
}

impl fmt::Display for ConformanceReport {
    /// Lists the failed checks, or a one-line summary when all passed.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.all_passed() {
            return write!(f, "all {} checks passed", self.checks.len());
        }
        let mut first = true;
        for check in self.failures() {
            if !first {
                writeln!(f)?;
            }
            write!(f, "{check}")?;
            first = false;
        }
        Ok(())
    }
}
