//! The prediction request pipeline: raw widget values to a typed record to
//! a classifier call to a rendered verdict.

pub mod domain;
pub mod form;
pub mod pipeline;
mod router;

pub use form::LoanApplicationForm;
pub use pipeline::{
    map_verdict, FormSession, LoanVerdict, PredictionPipeline, SubmissionPhase, VerdictOutcome,
};
pub use router::{decision_router, LoanVerdictView};
