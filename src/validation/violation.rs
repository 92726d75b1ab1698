//! Violation types and the structured validation report

use std::fmt;

use serde::{Deserialize, Serialize};

/// Why a sample failed validation
///
/// Exactly one kind applies to any bad sample: NaN wins over everything,
/// infinities are never reported as out of range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationKind {
    /// Sample is NaN
    NotANumber,
    /// Sample is positive or negative infinity
    Infinite,
    /// Sample is finite but outside the validation range
    OutOfRange,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::NotANumber => "not_a_number",
            ViolationKind::Infinite => "infinite",
            ViolationKind::OutOfRange => "out_of_range",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single offending sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Violation {
    pub channel: usize,
    pub sample_index: usize,
    pub kind: ViolationKind,
    /// The offending value, widened to f64. NaN serialises as `null`.
    pub value: f64,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} sample {} at channel {}, index {}",
            self.kind, self.value, self.channel, self.sample_index
        )
    }
}

/// Outcome of validating one block
///
/// A report created with [`ValidationReport::with_limit`] stores at most
/// `limit` violations in preallocated space and never grows, while the
/// per-kind counters keep counting past the limit.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    violations: Vec<Violation>,
    #[serde(skip)]
    limit: Option<usize>,
    samples_checked: usize,
    not_a_number: usize,
    infinite: usize,
    out_of_range: usize,
}

impl ValidationReport {
    /// Largest record limit a bounded report will preallocate for
    pub const MAX_LIMIT: usize = 65_536;

    /// Unbounded report
    pub fn new() -> Self {
        Self::default()
    }

    /// Report that records at most `limit` violations without reallocating
    ///
    /// `limit` is capped at [`ValidationReport::MAX_LIMIT`].
    pub fn with_limit(limit: usize) -> Self {
        let limit = limit.min(Self::MAX_LIMIT);
        Self {
            violations: Vec::with_capacity(limit),
            limit: Some(limit),
            ..Self::default()
        }
    }

    /// Reset counters and recorded violations, keeping the allocation
    pub fn clear(&mut self) {
        self.violations.clear();
        self.samples_checked = 0;
        self.not_a_number = 0;
        self.infinite = 0;
        self.out_of_range = 0;
    }

    /// Record limit, or None for an unbounded report
    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub(crate) fn record(&mut self, violation: Violation) {
        match violation.kind {
            ViolationKind::NotANumber => self.not_a_number += 1,
            ViolationKind::Infinite => self.infinite += 1,
            ViolationKind::OutOfRange => self.out_of_range += 1,
        }

        if self.limit.map_or(true, |limit| self.violations.len() < limit) {
            self.violations.push(violation);
        }
    }

    pub(crate) fn set_samples_checked(&mut self, count: usize) {
        self.samples_checked = count;
    }

    /// True when no sample violated the range
    pub fn is_valid(&self) -> bool {
        self.violation_count() == 0
    }

    /// Total number of violations, including those past the record limit
    pub fn violation_count(&self) -> usize {
        self.not_a_number + self.infinite + self.out_of_range
    }

    /// Number of violations of one kind
    pub fn count(&self, kind: ViolationKind) -> usize {
        match kind {
            ViolationKind::NotANumber => self.not_a_number,
            ViolationKind::Infinite => self.infinite,
            ViolationKind::OutOfRange => self.out_of_range,
        }
    }

    /// Recorded violations in scan order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// The first violation found, if any
    pub fn first(&self) -> Option<&Violation> {
        self.violations.first()
    }

    pub fn samples_checked(&self) -> usize {
        self.samples_checked
    }

    /// True when some violations were counted but not recorded
    pub fn is_truncated(&self) -> bool {
        self.violations.len() < self.violation_count()
    }

    /// One-line human readable summary
    pub fn summary(&self) -> String {
        if self.is_valid() {
            return format!("OK: {} samples checked, no violations", self.samples_checked);
        }

        format!(
            "FAILED: {} of {} samples invalid (NaN: {}, Inf: {}, out of range: {})",
            self.violation_count(),
            self.samples_checked,
            self.not_a_number,
            self.infinite,
            self.out_of_range
        )
    }
}
