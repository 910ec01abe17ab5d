//! Runs reference cases against an engine

use std::time::{Duration, Instant};

use xslt_engine_traits::{Result, TransformOutput, XsltEngine};

use crate::catalog::{Catalog, Expectation, ReferenceCase};

/// Result of running a single case
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub case_id: String,
    pub outcome: CaseOutcome,
    /// Output as text, if the engine produced any
    pub actual: Option<String>,
    pub duration: Duration,
}

/// Outcome of a case
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseOutcome {
    Pass,
    Fail(String),
}

impl CaseOutcome {
    pub fn is_pass(&self) -> bool {
        matches!(self, CaseOutcome::Pass)
    }
}

/// Compile and apply one case, then judge the result
pub fn run_case<E: XsltEngine>(engine: &E, case: &ReferenceCase) -> CaseResult {
    let start = Instant::now();
    let result = execute(engine, case);
    let duration = start.elapsed();

    let actual = result.as_ref().ok().map(lossy);
    let outcome = judge(&case.expect, &result);
    if let CaseOutcome::Fail(reason) = &outcome {
        tracing::debug!(case = %case.id, %reason, "reference case failed");
    }

    CaseResult {
        case_id: case.id.clone(),
        outcome,
        actual,
        duration,
    }
}

/// Run every case in `catalog`, in order
pub fn run_catalog<E: XsltEngine>(engine: &E, catalog: &Catalog) -> Vec<CaseResult> {
    catalog.cases.iter().map(|case| run_case(engine, case)).collect()
}

fn execute<E: XsltEngine>(engine: &E, case: &ReferenceCase) -> Result<TransformOutput> {
    let stylesheet = engine.compile(&case.stylesheet)?;
    engine.apply(&stylesheet, &case.source, &case.params)
}

fn judge(expect: &Expectation, result: &Result<TransformOutput>) -> CaseOutcome {
    match (expect, result) {
        (Expectation::Error(kind), Err(err)) if err.kind() == *kind => CaseOutcome::Pass,
        (Expectation::Error(kind), Err(err)) => {
            CaseOutcome::Fail(format!("expected {kind:?} error, got {:?}: {err}", err.kind()))
        }
        (Expectation::Error(kind), Ok(_)) => {
            CaseOutcome::Fail(format!("expected {kind:?} error, got success"))
        }
        (_, Err(err)) => CaseOutcome::Fail(format!("unexpected error: {err}")),
        (Expectation::Empty, Ok(out)) if out.is_empty() => CaseOutcome::Pass,
        (Expectation::Empty, Ok(out)) => {
            CaseOutcome::Fail(format!("expected empty output, got {} bytes", out.len()))
        }
        (Expectation::Output(expected), Ok(out)) => {
            let actual = lossy(out);
            if actual.trim_end() == expected.trim_end() {
                CaseOutcome::Pass
            } else {
                CaseOutcome::Fail(format!("expected {expected:?}, got {actual:?}"))
            }
        }
        (Expectation::Contains(fragments), Ok(out)) => {
            let actual = lossy(out);
            match fragments.iter().find(|f| !actual.contains(f.as_str())) {
                None => CaseOutcome::Pass,
                Some(missing) => CaseOutcome::Fail(format!("output lacks {missing:?}")),
            }
        }
    }
}

fn lossy(out: &TransformOutput) -> String {
    String::from_utf8_lossy(out.as_bytes()).into_owned()
}
