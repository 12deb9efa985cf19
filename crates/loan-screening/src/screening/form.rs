use serde::{Deserialize, Serialize};

use super::domain::{
    DefaultHistory, EducationLevel, Gender, HomeOwnership, LoanApplicationRecord, LoanIntent,
};

/// Slider bounds for the numeric widgets, mirrored by the form page.
pub const AGE_RANGE: (i64, i64) = (18, 80);
pub const EMP_YEARS_RANGE: (i64, i64) = (0, 40);
pub const CRED_HIST_RANGE: (i64, i64) = (0, 50);
pub const INT_RATE_RANGE: (f64, f64) = (0.0, 40.0);
pub const PERCENT_INCOME_RANGE: (f64, f64) = (0.0, 100.0);

/// Raw widget values for one submission, before clamping.
///
/// Every field has a default so a partial payload still renders the form's
/// initial state. The widgets are the validation layer: selectors restrict
/// categorical fields to their declared sets (strict serde enums), and
/// numeric fields clamp to their slider bounds in [`Self::into_record`],
/// so record construction never fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanApplicationForm {
    pub person_age: i64,
    pub person_income: f64,
    pub person_home_ownership: HomeOwnership,
    pub person_emp_length: i64,
    pub person_emp_exp: i64,
    pub person_education: EducationLevel,
    pub person_gender: Gender,
    pub loan_amnt: f64,
    pub loan_int_rate: f64,
    pub loan_percent_income: f64,
    pub loan_intent: LoanIntent,
    pub cb_person_default_on_file: DefaultHistory,
    pub previous_loan_defaults_on_file: DefaultHistory,
    pub credit_score: f64,
    pub cb_person_cred_hist_length: i64,
}

impl Default for LoanApplicationForm {
    fn default() -> Self {
        Self {
            person_age: 30,
            person_income: 3000.0,
            person_home_ownership: HomeOwnership::Rent,
            person_emp_length: 5,
            person_emp_exp: 5,
            person_education: EducationLevel::Primary,
            person_gender: Gender::Male,
            loan_amnt: 10_000.0,
            loan_int_rate: 12.0,
            loan_percent_income: 30.0,
            loan_intent: LoanIntent::Personal,
            // Both default-history selectors default to their first listed
            // option, which is "Yes".
            cb_person_default_on_file: DefaultHistory::Yes,
            previous_loan_defaults_on_file: DefaultHistory::Yes,
            credit_score: 600.0,
            cb_person_cred_hist_length: 10,
        }
    }
}

impl LoanApplicationForm {
    /// Apply widget clamping and produce the typed record, in fixed field
    /// order. Infallible for any payload that deserialized.
    pub fn into_record(self) -> LoanApplicationRecord {
        LoanApplicationRecord {
            person_age: clamp_years(self.person_age, AGE_RANGE),
            person_income: self.person_income.max(0.0),
            person_home_ownership: self.person_home_ownership,
            person_emp_length: clamp_years(self.person_emp_length, EMP_YEARS_RANGE),
            person_emp_exp: clamp_years(self.person_emp_exp, EMP_YEARS_RANGE),
            person_education: self.person_education,
            person_gender: self.person_gender,
            loan_amnt: self.loan_amnt.max(0.0),
            loan_int_rate: clamp_rate(self.loan_int_rate, INT_RATE_RANGE),
            loan_percent_income: clamp_rate(self.loan_percent_income, PERCENT_INCOME_RANGE),
            loan_intent: self.loan_intent,
            cb_person_default_on_file: self.cb_person_default_on_file,
            previous_loan_defaults_on_file: self.previous_loan_defaults_on_file,
            credit_score: self.credit_score,
            cb_person_cred_hist_length: clamp_years(
                self.cb_person_cred_hist_length,
                CRED_HIST_RANGE,
            ),
        }
    }
}

fn clamp_years(raw: i64, (min, max): (i64, i64)) -> u8 {
    raw.clamp(min, max) as u8
}

fn clamp_rate(raw: f64, (min, max): (f64, f64)) -> f64 {
    if raw.is_nan() {
        return min;
    }
    raw.clamp(min, max)
}
