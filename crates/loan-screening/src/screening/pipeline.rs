use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::LoanApplicationRecord;
use super::form::LoanApplicationForm;
use crate::model::{Classifier, DecisionLabel, InferenceError};

/// User-facing outcome of one submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictOutcome {
    Approved,
    Rejected,
}

impl VerdictOutcome {
    pub fn label(self) -> &'static str {
        match self {
            VerdictOutcome::Approved => "approved",
            VerdictOutcome::Rejected => "rejected",
        }
    }
}

/// Verdict plus the confidence in that verdict (not the raw model score:
/// the rejection branch reports the complement).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanVerdict {
    pub outcome: VerdictOutcome,
    pub confidence: f64,
}

impl LoanVerdict {
    /// Confidence rendered as a two-decimal percentage, e.g. "93.17%".
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }

    /// Static encouragement/advice copy keyed only by the outcome.
    pub fn advisory(&self) -> &'static str {
        match self.outcome {
            VerdictOutcome::Approved => {
                "Congratulations! Your loan application has been accepted."
            }
            VerdictOutcome::Rejected => "Advice: strengthen your file and try again.",
        }
    }
}

/// Map the classifier output to the displayed verdict. Pure: approved keeps
/// the positive-class score, rejected inverts it.
pub fn map_verdict(label: DecisionLabel, positive_probability: f64) -> LoanVerdict {
    match label {
        DecisionLabel::Approved => LoanVerdict {
            outcome: VerdictOutcome::Approved,
            confidence: positive_probability,
        },
        DecisionLabel::Rejected => LoanVerdict {
            outcome: VerdictOutcome::Rejected,
            confidence: 1.0 - positive_probability,
        },
    }
}

/// The prediction request pipeline: record in, verdict out.
///
/// Holds the classifier loaded at startup by shared reference; the handle is
/// read-only, so submissions from concurrent sessions need no coordination.
pub struct PredictionPipeline<C> {
    classifier: Arc<C>,
}

impl<C> Clone for PredictionPipeline<C> {
    fn clone(&self) -> Self {
        Self {
            classifier: self.classifier.clone(),
        }
    }
}

impl<C> PredictionPipeline<C>
where
    C: Classifier,
{
    pub fn new(classifier: Arc<C>) -> Self {
        Self { classifier }
    }

    /// Run one synchronous submission. An inference failure aborts only
    /// this submission; the pipeline stays usable for the next one.
    pub fn submit(&self, record: &LoanApplicationRecord) -> Result<LoanVerdict, InferenceError> {
        let label = self.classifier.predict(record)?;
        let probability = self.classifier.predict_probability(record)?;
        let verdict = map_verdict(label, probability);

        info!(
            outcome = verdict.outcome.label(),
            confidence = %verdict.confidence_percent(),
            "loan decision rendered",
        );
        Ok(verdict)
    }
}

/// Where one form session currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionPhase {
    /// Waiting for the submission trigger.
    Idle,
    /// Inference in flight, synchronous and blocking.
    Computing,
    /// Verdict shown.
    Rendered,
}

/// One interactive form session over the pipeline.
///
/// Tracks the Idle → Computing → Rendered machine: success lands in
/// Rendered, failure reports the error and returns to Idle so the form is
/// immediately resubmittable. There is no persistent failed state.
pub struct FormSession<C> {
    pipeline: PredictionPipeline<C>,
    form: LoanApplicationForm,
    phase: SubmissionPhase,
    verdict: Option<LoanVerdict>,
}

impl<C> FormSession<C>
where
    C: Classifier,
{
    pub fn new(pipeline: PredictionPipeline<C>) -> Self {
        Self {
            pipeline,
            form: LoanApplicationForm::default(),
            phase: SubmissionPhase::Idle,
            verdict: None,
        }
    }

    pub fn phase(&self) -> SubmissionPhase {
        self.phase
    }

    pub fn form(&self) -> &LoanApplicationForm {
        &self.form
    }

    /// Replace the current widget values without triggering a submission.
    pub fn edit(&mut self, form: LoanApplicationForm) {
        self.form = form;
    }

    pub fn verdict(&self) -> Option<&LoanVerdict> {
        self.verdict.as_ref()
    }

    /// The submission trigger: build a fresh record from the current widget
    /// values and run it through the pipeline.
    pub fn submit(&mut self) -> Result<&LoanVerdict, InferenceError> {
        self.phase = SubmissionPhase::Computing;
        let record = self.form.clone().into_record();

        match self.pipeline.submit(&record) {
            Ok(verdict) => {
                self.phase = SubmissionPhase::Rendered;
                Ok(&*self.verdict.insert(verdict))
            }
            Err(error) => {
                self.phase = SubmissionPhase::Idle;
                Err(error)
            }
        }
    }
}
