//! Reference-case harness for XSLT engines
//!
//! A catalog of small stylesheet/document pairs with their expected
//! results, a runner that executes them against any [`XsltEngine`], and a
//! summary report.
//!
//! [`XsltEngine`]: xslt_engine_traits::XsltEngine

pub mod catalog;
pub mod report;
pub mod runner;

pub use catalog::{Catalog, Expectation, ReferenceCase};
pub use report::HarnessSummary;
pub use runner::{run_case, run_catalog, CaseOutcome, CaseResult};
