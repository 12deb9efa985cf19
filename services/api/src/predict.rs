use clap::Args;
use loan_screening::config::AppConfig;
use loan_screening::error::AppError;
use loan_screening::model::load_classifier;
use loan_screening::screening::domain::{
    DefaultHistory, EducationLevel, Gender, HomeOwnership, LoanIntent,
};
use loan_screening::screening::{FormSession, LoanApplicationForm, PredictionPipeline};
use std::path::PathBuf;
use std::sync::Arc;

/// One-shot prediction from the command line. Any omitted flag falls back
/// to the form's initial widget value.
#[derive(Args, Debug, Default)]
pub(crate) struct PredictArgs {
    /// Override the configured path to the classifier artifact
    #[arg(long)]
    model_path: Option<PathBuf>,
    #[arg(long)]
    person_age: Option<i64>,
    #[arg(long)]
    person_income: Option<f64>,
    #[arg(long, value_enum)]
    person_home_ownership: Option<HomeOwnershipArg>,
    #[arg(long)]
    person_emp_length: Option<i64>,
    #[arg(long)]
    person_emp_exp: Option<i64>,
    #[arg(long, value_enum)]
    person_education: Option<EducationArg>,
    #[arg(long, value_enum)]
    person_gender: Option<GenderArg>,
    #[arg(long)]
    loan_amnt: Option<f64>,
    #[arg(long)]
    loan_int_rate: Option<f64>,
    #[arg(long)]
    loan_percent_income: Option<f64>,
    #[arg(long, value_enum)]
    loan_intent: Option<LoanIntentArg>,
    #[arg(long, value_enum)]
    cb_person_default_on_file: Option<YesNoArg>,
    #[arg(long, value_enum)]
    previous_loan_defaults_on_file: Option<YesNoArg>,
    #[arg(long)]
    credit_score: Option<f64>,
    #[arg(long)]
    cb_person_cred_hist_length: Option<i64>,
}

pub(crate) fn run_predict(args: PredictArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let artifact_path = args
        .model_path
        .clone()
        .unwrap_or(config.model.artifact_path);

    let classifier = load_classifier(&artifact_path)?;
    let pipeline = PredictionPipeline::new(Arc::new(classifier));

    let mut session = FormSession::new(pipeline);
    session.edit(args.into_form());

    match session.submit() {
        Ok(verdict) => {
            println!(
                "Loan {} with {} confidence.",
                verdict.outcome.label(),
                verdict.confidence_percent(),
            );
            println!("{}", verdict.advisory());
        }
        Err(error) => {
            // Recoverable by design: report and leave the exit code clean so
            // the caller can adjust inputs and retry.
            eprintln!("prediction failed: {error}");
        }
    }
    Ok(())
}

impl PredictArgs {
    fn into_form(self) -> LoanApplicationForm {
        let defaults = LoanApplicationForm::default();
        LoanApplicationForm {
            person_age: self.person_age.unwrap_or(defaults.person_age),
            person_income: self.person_income.unwrap_or(defaults.person_income),
            person_home_ownership: self
                .person_home_ownership
                .map(HomeOwnershipArg::into_domain)
                .unwrap_or(defaults.person_home_ownership),
            person_emp_length: self.person_emp_length.unwrap_or(defaults.person_emp_length),
            person_emp_exp: self.person_emp_exp.unwrap_or(defaults.person_emp_exp),
            person_education: self
                .person_education
                .map(EducationArg::into_domain)
                .unwrap_or(defaults.person_education),
            person_gender: self
                .person_gender
                .map(GenderArg::into_domain)
                .unwrap_or(defaults.person_gender),
            loan_amnt: self.loan_amnt.unwrap_or(defaults.loan_amnt),
            loan_int_rate: self.loan_int_rate.unwrap_or(defaults.loan_int_rate),
            loan_percent_income: self
                .loan_percent_income
                .unwrap_or(defaults.loan_percent_income),
            loan_intent: self
                .loan_intent
                .map(LoanIntentArg::into_domain)
                .unwrap_or(defaults.loan_intent),
            cb_person_default_on_file: self
                .cb_person_default_on_file
                .map(YesNoArg::into_domain)
                .unwrap_or(defaults.cb_person_default_on_file),
            previous_loan_defaults_on_file: self
                .previous_loan_defaults_on_file
                .map(YesNoArg::into_domain)
                .unwrap_or(defaults.previous_loan_defaults_on_file),
            credit_score: self.credit_score.unwrap_or(defaults.credit_score),
            cb_person_cred_hist_length: self
                .cb_person_cred_hist_length
                .unwrap_or(defaults.cb_person_cred_hist_length),
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum HomeOwnershipArg {
    Rent,
    Own,
    Mortgage,
    Other,
}

impl HomeOwnershipArg {
    fn into_domain(self) -> HomeOwnership {
        match self {
            Self::Rent => HomeOwnership::Rent,
            Self::Own => HomeOwnership::Own,
            Self::Mortgage => HomeOwnership::Mortgage,
            Self::Other => HomeOwnership::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum EducationArg {
    Primary,
    Secondary,
    Bachelors,
    Masters,
    Doctorate,
}

impl EducationArg {
    fn into_domain(self) -> EducationLevel {
        match self {
            Self::Primary => EducationLevel::Primary,
            Self::Secondary => EducationLevel::Secondary,
            Self::Bachelors => EducationLevel::Bachelors,
            Self::Masters => EducationLevel::Masters,
            Self::Doctorate => EducationLevel::Doctorate,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum GenderArg {
    Male,
    Female,
    Other,
}

impl GenderArg {
    fn into_domain(self) -> Gender {
        match self {
            Self::Male => Gender::Male,
            Self::Female => Gender::Female,
            Self::Other => Gender::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LoanIntentArg {
    Personal,
    Education,
    Medical,
    Venture,
    HomeImprovement,
    DebtConsolidation,
}

impl LoanIntentArg {
    fn into_domain(self) -> LoanIntent {
        match self {
            Self::Personal => LoanIntent::Personal,
            Self::Education => LoanIntent::Education,
            Self::Medical => LoanIntent::Medical,
            Self::Venture => LoanIntent::Venture,
            Self::HomeImprovement => LoanIntent::HomeImprovement,
            Self::DebtConsolidation => LoanIntent::DebtConsolidation,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum YesNoArg {
    Yes,
    No,
}

impl YesNoArg {
    fn into_domain(self) -> DefaultHistory {
        match self {
            Self::Yes => DefaultHistory::Yes,
            Self::No => DefaultHistory::No,
        }
    }
}
