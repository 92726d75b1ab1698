//! Audio Sample Validation
//!
//! Detects samples that are NaN, infinite, or outside an amplitude range:
//! - `range`: inclusive amplitude bounds
//! - `violation`: violation kinds and the structured report
//! - `validator`: the scan itself, plus the debug-only assertion
//! - `policy`: responses to bad blocks (log, repair, assert)

mod policy;
mod range;
mod validator;
mod violation;

pub use policy::{repair_samples, SampleGuard, ViolationPolicy};
pub use range::ValidationRange;
pub use validator::{
    classify_sample, debug_validate, first_violation, for_each_violation, validate, validate_into,
};
pub use violation::{ValidationReport, Violation, ViolationKind};
