//! Summary report for a harness run

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::runner::{CaseOutcome, CaseResult};

/// Summary of a run over one catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarnessSummary {
    pub engine: String,
    pub catalog: String,
    pub timestamp: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub pass_rate: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub failures: Vec<FailureSummary>,
}

/// A failed case, for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureSummary {
    pub case_id: String,
    pub message: String,
    pub duration_ms: u64,
}

impl HarnessSummary {
    pub fn new(engine: &str, catalog: &str, results: &[CaseResult]) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.outcome.is_pass()).count();
        let failures: Vec<FailureSummary> = results
            .iter()
            .filter_map(|r| match &r.outcome {
                CaseOutcome::Pass => None,
                CaseOutcome::Fail(message) => Some(FailureSummary {
                    case_id: r.case_id.clone(),
                    message: message.clone(),
                    duration_ms: r.duration.as_millis() as u64,
                }),
            })
            .collect();
        let pass_rate = if total > 0 {
            (passed as f64 / total as f64) * 100.0
        } else {
            0.0
        };

        Self {
            engine: engine.to_string(),
            catalog: catalog.to_string(),
            timestamp: Utc::now(),
            total,
            passed,
            failed: failures.len(),
            pass_rate,
            failures,
        }
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Generate a markdown report
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();

        md.push_str(&format!("# {} Reference Report\n\n", self.engine));
        md.push_str(&format!("**Catalog:** {}\n", self.catalog));
        md.push_str(&format!(
            "**Date:** {}\n\n",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        ));

        md.push_str("| Metric | Count |\n");
        md.push_str("|--------|-------|\n");
        md.push_str(&format!("| Total | {} |\n", self.total));
        md.push_str(&format!("| Passed | {} |\n", self.passed));
        md.push_str(&format!("| Failed | {} |\n", self.failed));
        md.push_str(&format!("| **Pass Rate** | **{:.2}%** |\n\n", self.pass_rate));

        if !self.failures.is_empty() {
            md.push_str("## Failed Cases\n\n");
            md.push_str("| Case | Message |\n");
            md.push_str("|------|---------|\n");
            for f in &self.failures {
                md.push_str(&format!("| {} | {} |\n", f.case_id, f.message.replace('|', "\\|")));
            }
        }

        md
    }

    /// Generate a JSON report
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn result(id: &str, outcome: CaseOutcome) -> CaseResult {
        CaseResult {
            case_id: id.into(),
            outcome,
            actual: None,
            duration: Duration::from_millis(3),
        }
    }

    #[test]
    fn counts_and_rate() {
        let results = vec![
            result("a", CaseOutcome::Pass),
            result("b", CaseOutcome::Fail("nope".into())),
            result("c", CaseOutcome::Pass),
            result("d", CaseOutcome::Pass),
        ];
        let report = HarnessSummary::new("libxslt", "reference", &results);
        assert_eq!(report.total, 4);
        assert_eq!(report.passed, 3);
        assert_eq!(report.failed, 1);
        assert!((report.pass_rate - 75.0).abs() < f64::EPSILON);
        assert!(!report.all_passed());

        let md = report.to_markdown();
        assert!(md.contains("| b | nope |"));
        assert!(md.contains("**75.00%**"));
    }

    #[test]
    fn empty_run() {
        let report = HarnessSummary::new("libxslt", "none", &[]);
        assert_eq!(report.pass_rate, 0.0);
        assert!(report.all_passed());
        assert!(!report.to_json().contains("failures"));
    }
}
