//! Run report - per-step outcomes for one checkout run
//!
//! Each workflow step records an explicit outcome instead of signalling
//! through control flow. The aggregate is printable as a summary table and
//! serializable to JSON for scripting.

use serde::{Deserialize, Serialize};

/// Outcome of a single workflow step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum StepOutcome {
    /// Step ran to completion
    Completed,
    /// Optional step skipped; the run continues unaffected
    Skipped(String),
    /// Required step failed; the enclosing stage aborts
    Failed(String),
}

impl StepOutcome {
    /// Create a skipped outcome
    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped(reason.into())
    }

    /// Create a failed outcome
    pub fn failed(reason: impl Into<String>) -> Self {
        Self::Failed(reason.into())
    }

    /// Whether this outcome allows the run to continue
    pub fn is_ok(&self) -> bool {
        !matches!(self, Self::Failed(_))
    }
}

/// One recorded step with its outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// Step name, e.g. "fill email"
    pub step: String,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Ordered record of every step attempted during one run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunReport {
    steps: Vec<StepRecord>,
}

impl RunReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a step outcome, preserving attempt order
    pub fn record(&mut self, step: impl Into<String>, outcome: StepOutcome) {
        self.steps.push(StepRecord {
            step: step.into(),
            outcome,
        });
    }

    /// Record a completed step
    pub fn completed(&mut self, step: impl Into<String>) {
        self.record(step, StepOutcome::Completed);
    }

    /// Record a skipped step
    pub fn skipped(&mut self, step: impl Into<String>, reason: impl Into<String>) {
        self.record(step, StepOutcome::skipped(reason));
    }

    /// Record a failed step
    pub fn failed(&mut self, step: impl Into<String>, reason: impl Into<String>) {
        self.record(step, StepOutcome::failed(reason));
    }

    /// All recorded steps in attempt order
    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    /// Whether any required step failed
    pub fn has_failures(&self) -> bool {
        self.steps.iter().any(|s| !s.outcome.is_ok())
    }

    /// Whether the final payment submission completed
    pub fn submitted(&self) -> bool {
        self.steps
            .iter()
            .any(|s| s.step == "submit payment" && s.outcome == StepOutcome::Completed)
    }

    /// Human-readable summary, one line per step
    pub fn summary(&self) -> String {
        let mut out = String::from("Run report:\n");
        for record in &self.steps {
            let line = match &record.outcome {
                StepOutcome::Completed => format!("  [ok]      {}\n", record.step),
                StepOutcome::Skipped(reason) => {
                    format!("  [skipped] {} ({})\n", record.step, reason)
                }
                StepOutcome::Failed(reason) => {
                    format!("  [failed]  {} ({})\n", record.step, reason)
                }
            };
            out.push_str(&line);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_preserve_order() {
        let mut report = RunReport::new();
        report.completed("open storefront");
        report.skipped("fill city", "element not clickable");
        report.failed("submit payment", "button not found");

        let steps: Vec<&str> = report.steps().iter().map(|s| s.step.as_str()).collect();
        assert_eq!(steps, vec!["open storefront", "fill city", "submit payment"]);
    }

    #[test]
    fn test_skips_do_not_count_as_failures() {
        let mut report = RunReport::new();
        report.completed("fill email");
        report.skipped("fill phone", "element not clickable");
        assert!(!report.has_failures());
    }

    #[test]
    fn test_submitted_requires_completed_submit() {
        let mut report = RunReport::new();
        report.failed("submit payment", "button not found");
        assert!(!report.submitted());

        let mut report = RunReport::new();
        report.completed("submit payment");
        assert!(report.submitted());
    }

    #[test]
    fn test_submit_recorded_after_card_failure() {
        // A failed card field ends the card block, not the run: the
        // submit step is still attempted and recorded afterwards.
        let mut report = RunReport::new();
        report.completed("select card payment");
        report.failed("fill card number", "element not clickable");
        report.completed("submit payment");

        assert!(report.has_failures());
        assert!(report.submitted());

        let steps: Vec<&str> = report.steps().iter().map(|s| s.step.as_str()).collect();
        let card = steps.iter().position(|s| *s == "fill card number").unwrap();
        let submit = steps.iter().position(|s| *s == "submit payment").unwrap();
        assert!(card < submit);
    }

    #[test]
    fn test_summary_mentions_reasons() {
        let mut report = RunReport::new();
        report.skipped("fill state", "element not clickable");
        let summary = report.summary();
        assert!(summary.contains("fill state"));
        assert!(summary.contains("element not clickable"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let mut report = RunReport::new();
        report.completed("fill email");
        report.skipped("fill phone", "absent");

        let json = serde_json::to_value(&report).unwrap();
        let steps = json.get("steps").and_then(|s| s.as_array()).unwrap();
        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0]["status"], "completed");
        assert_eq!(steps[1]["status"], "skipped");
        assert_eq!(steps[1]["reason"], "absent");
    }
}
