use serde::{Deserialize, Serialize};

/// Number of columns the classifier was trained on.
pub const FEATURE_COUNT: usize = 15;

/// Canonical column names, in training order. Artifacts must declare the
/// exact same list or the loader refuses them.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "person_age",
    "person_income",
    "person_home_ownership",
    "person_emp_length",
    "person_emp_exp",
    "person_education",
    "person_gender",
    "loan_amnt",
    "loan_int_rate",
    "loan_percent_income",
    "loan_intent",
    "cb_person_default_on_file",
    "previous_loan_defaults_on_file",
    "credit_score",
    "cb_person_cred_hist_length",
];

/// One applicant snapshot, field-for-field what the classifier expects.
///
/// Built fresh per submission, consumed once, never stored. Field order
/// matches [`FEATURE_NAMES`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanApplicationRecord {
    pub person_age: u8,
    pub person_income: f64,
    pub person_home_ownership: HomeOwnership,
    pub person_emp_length: u8,
    pub person_emp_exp: u8,
    pub person_education: EducationLevel,
    pub person_gender: Gender,
    pub loan_amnt: f64,
    pub loan_int_rate: f64,
    pub loan_percent_income: f64,
    pub loan_intent: LoanIntent,
    pub cb_person_default_on_file: DefaultHistory,
    pub previous_loan_defaults_on_file: DefaultHistory,
    pub credit_score: f64,
    pub cb_person_cred_hist_length: u8,
}

impl LoanApplicationRecord {
    /// Encode the record as one row in training-column order. Categorical
    /// fields become the ordinal index of their declared option order.
    pub fn feature_vector(&self) -> [f64; FEATURE_COUNT] {
        [
            f64::from(self.person_age),
            self.person_income,
            self.person_home_ownership.encoded(),
            f64::from(self.person_emp_length),
            f64::from(self.person_emp_exp),
            self.person_education.encoded(),
            self.person_gender.encoded(),
            self.loan_amnt,
            self.loan_int_rate,
            self.loan_percent_income,
            self.loan_intent.encoded(),
            self.cb_person_default_on_file.encoded(),
            self.previous_loan_defaults_on_file.encoded(),
            self.credit_score,
            f64::from(self.cb_person_cred_hist_length),
        ]
    }
}

/// Housing status of the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HomeOwnership {
    Rent,
    Own,
    Mortgage,
    Other,
}

impl HomeOwnership {
    pub fn encoded(self) -> f64 {
        self as u8 as f64
    }
}

/// Highest completed education level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EducationLevel {
    Primary,
    Secondary,
    Bachelors,
    Masters,
    Doctorate,
}

impl EducationLevel {
    pub fn encoded(self) -> f64 {
        self as u8 as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub fn encoded(self) -> f64 {
        self as u8 as f64
    }
}

/// Declared purpose of the loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LoanIntent {
    Personal,
    Education,
    Medical,
    Venture,
    HomeImprovement,
    DebtConsolidation,
}

impl LoanIntent {
    pub fn encoded(self) -> f64 {
        self as u8 as f64
    }
}

/// Yes/No credit-bureau flag, encoded with "Yes" first to match the
/// training data's option order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefaultHistory {
    Yes,
    No,
}

impl DefaultHistory {
    pub fn encoded(self) -> f64 {
        self as u8 as f64
    }
}
