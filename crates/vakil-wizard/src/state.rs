//! The wizard state machine: four linear steps, field-level updates,
//! category switching, and the final freeze into a [`DraftRequest`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::debug;
use vakil_core::{
    CategoryFields, CustodyStatus, DraftRequest, Jurisdiction, PetitionCategory, Petitioner,
    Respondent, STEP_LABELS, UserProfile,
};

use crate::validate::{
    FieldError, StepErrors, validate_jurisdiction, validate_narrative, validate_parties,
};

/// Wizard step. Transitions are strictly linear; no skipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Step {
    Parties,
    Jurisdiction,
    Narrative,
    Review,
}

impl Step {
    pub const COUNT: usize = STEP_LABELS.len();

    /// 1-based position shown to the user.
    pub fn position(self) -> usize {
        self as usize + 1
    }

    pub fn label(self) -> &'static str {
        STEP_LABELS[self as usize]
    }

    fn next(self) -> Option<Step> {
        match self {
            Step::Parties => Some(Step::Jurisdiction),
            Step::Jurisdiction => Some(Step::Narrative),
            Step::Narrative => Some(Step::Review),
            Step::Review => None,
        }
    }

    fn prev(self) -> Option<Step> {
        match self {
            Step::Parties => None,
            Step::Jurisdiction => Some(Step::Parties),
            Step::Narrative => Some(Step::Jurisdiction),
            Step::Review => Some(Step::Narrative),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Programming-error class for field updates.
///
/// The UI collaborator drives updates from closed widget sets, so an
/// unknown name or out-of-set choice is caller drift, not user input to
/// recover from. Kept separate from [`StepErrors`] for that reason.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpdateError {
    #[error("unknown {record} field: {field}")]
    UnknownField { record: &'static str, field: String },
    #[error("invalid value for {field}: {value}")]
    InvalidChoice { field: &'static str, value: String },
}

/// Accumulates partial input across steps.
///
/// Created at wizard entry (optionally pre-seeded from a saved profile),
/// mutated by field updates on every keystroke or selection, and
/// discarded after a successful final submission or an explicit reset.
/// Fields may be empty or zero-valued until the owning step validates.
#[derive(Debug, Clone)]
pub struct WizardState {
    step: Step,
    draft: DraftRequest,
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardState {
    /// A blank wizard at the first step, defaulting to a Civil petition.
    pub fn new() -> Self {
        let category = PetitionCategory::Civil;
        Self {
            step: Step::Parties,
            draft: DraftRequest {
                petitioner: Petitioner::default(),
                respondent: Respondent::default(),
                jurisdiction: Jurisdiction::default(),
                petition_type: category,
                cause_of_action: String::new(),
                category_fields: CategoryFields::for_category(category),
            },
        }
    }

    /// A blank wizard pre-seeded from a saved profile: petitioner name,
    /// address, age, and the default territorial jurisdiction. Every
    /// seeded field stays independently editable.
    pub fn prefilled(profile: &UserProfile) -> Self {
        let mut state = Self::new();
        state.draft.petitioner.name = profile.full_name.clone();
        state.draft.petitioner.address = profile.address.clone();
        state.draft.petitioner.age = profile.age;
        state.draft.jurisdiction.territorial = profile.jurisdiction.clone();
        state
    }

    /// Re-enter a previously composed draft at the review step, e.g.
    /// after a failed generation attempt or from a saved draft.
    ///
    /// A draft whose conditional fields do not match its category (a
    /// hand-edited file, say) is normalised to the category's blank set;
    /// submission then reports the missing fields.
    pub fn resume(mut draft: DraftRequest) -> Self {
        if !draft.category_fields.matches(draft.petition_type) {
            draft.category_fields = CategoryFields::for_category(draft.petition_type);
        }
        Self {
            step: Step::Review,
            draft,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    /// Read-only view of the in-progress draft.
    pub fn draft(&self) -> &DraftRequest {
        &self.draft
    }

    pub fn category(&self) -> PetitionCategory {
        self.draft.petition_type
    }

    /// Merge one petitioner field by its wire name.
    ///
    /// A non-numeric age clears the field; the parties step then reports
    /// it as missing rather than carrying garbage forward.
    pub fn update_petitioner(&mut self, field: &str, value: &str) -> Result<(), UpdateError> {
        match field {
            "name" => self.draft.petitioner.name = value.to_string(),
            "parentOrSpouse" => self.draft.petitioner.parent_or_spouse = opt(value),
            "address" => self.draft.petitioner.address = value.to_string(),
            "age" => self.draft.petitioner.age = value.trim().parse().unwrap_or(0),
            _ => {
                return Err(UpdateError::UnknownField {
                    record: "petitioner",
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge one respondent field by its wire name.
    pub fn update_respondent(&mut self, field: &str, value: &str) -> Result<(), UpdateError> {
        match field {
            "name" => self.draft.respondent.name = value.to_string(),
            "parentOrSpouse" => self.draft.respondent.parent_or_spouse = opt(value),
            "address" => self.draft.respondent.address = value.to_string(),
            _ => {
                return Err(UpdateError::UnknownField {
                    record: "respondent",
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge one jurisdiction field by its wire name.
    pub fn update_jurisdiction(&mut self, field: &str, value: &str) -> Result<(), UpdateError> {
        match field {
            "territorial" => self.draft.jurisdiction.territorial = value.to_string(),
            "pecuniary" => self.draft.jurisdiction.pecuniary = value.to_string(),
            _ => {
                return Err(UpdateError::UnknownField {
                    record: "jurisdiction",
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    pub fn set_cause_of_action(&mut self, value: &str) {
        self.draft.cause_of_action = value.to_string();
    }

    /// Select the petition category.
    ///
    /// Switching to a category whose variant differs replaces the
    /// conditional fields with that category's blank set: category-scoped
    /// input is deliberately not persisted across type changes, so stale
    /// cross-category data can never leak into a frozen request.
    pub fn set_category(&mut self, category: PetitionCategory) {
        if self.draft.petition_type == category {
            return;
        }
        debug!(from = %self.draft.petition_type, to = %category, "petition category changed");
        self.draft.petition_type = category;
        if !self.draft.category_fields.matches(category) {
            self.draft.category_fields = CategoryFields::for_category(category);
        }
    }

    /// Merge one category-specific field of the live variant by its wire
    /// name. Names belonging to another category are caller drift.
    pub fn update_category_field(&mut self, field: &str, value: &str) -> Result<(), UpdateError> {
        match (&mut self.draft.category_fields, field) {
            (CategoryFields::Criminal { fir_number, .. }, "firNumber") => {
                *fir_number = value.to_string();
            }
            (CategoryFields::Criminal { police_station, .. }, "policeStation") => {
                *police_station = value.to_string();
            }
            (CategoryFields::Criminal { custody_status, .. }, "custodyStatus") => {
                *custody_status = match value {
                    "judicial_custody" => CustodyStatus::JudicialCustody,
                    "anticipatory_bail" => CustodyStatus::AnticipatoryBail,
                    other => {
                        return Err(UpdateError::InvalidChoice {
                            field: "custodyStatus",
                            value: other.to_string(),
                        });
                    }
                };
            }
            (CategoryFields::Civil { date_of_cause_of_action }, "dateOfCauseOfAction") => {
                *date_of_cause_of_action = value.to_string();
            }
            (CategoryFields::Family { date_of_marriage }, "dateOfMarriage") => {
                *date_of_marriage = value.to_string();
            }
            _ => {
                return Err(UpdateError::UnknownField {
                    record: "categoryFields",
                    field: field.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Validate the current step and, if clean, move forward.
    ///
    /// On failure the wizard stays put and reports which fields are
    /// missing or malformed. Advancing from Review is a no-op.
    pub fn advance(&mut self) -> Result<Step, StepErrors> {
        let errors = self.validate_step(self.step);
        if !errors.is_empty() {
            debug!(step = %self.step, count = errors.len(), "step blocked by validation");
            return Err(StepErrors {
                step: self.step,
                errors,
            });
        }
        if let Some(next) = self.step.next() {
            debug!(from = %self.step, to = %next, "wizard advanced");
            self.step = next;
        }
        Ok(self.step)
    }

    /// Move one step back. Floors at the first step; never validates.
    pub fn retreat(&mut self) -> Step {
        if let Some(prev) = self.step.prev() {
            self.step = prev;
        }
        self.step
    }

    /// Re-validate the full aggregate and freeze it into an owned
    /// [`DraftRequest`].
    ///
    /// Only valid from the review step; an earlier call is a programming
    /// error (asserted in debug builds) and degrades to a full
    /// revalidation in release, so partial data is never silently
    /// submitted either way. On failure the wizard repositions itself at
    /// the first invalid section and returns its errors.
    pub fn submit(&mut self) -> Result<DraftRequest, StepErrors> {
        debug_assert_eq!(
            self.step,
            Step::Review,
            "submit is only valid from the review step"
        );
        for step in [Step::Parties, Step::Jurisdiction, Step::Narrative] {
            let errors = self.validate_step(step);
            if !errors.is_empty() {
                debug!(step = %step, count = errors.len(), "submission rejected");
                self.step = step;
                return Err(StepErrors { step, errors });
            }
        }
        debug!(category = %self.draft.petition_type, "draft request frozen");
        Ok(self.draft.clone())
    }

    fn validate_step(&self, step: Step) -> Vec<FieldError> {
        match step {
            Step::Parties => validate_parties(&self.draft),
            Step::Jurisdiction => validate_jurisdiction(&self.draft),
            Step::Narrative => validate_narrative(&self.draft),
            Step::Review => Vec::new(),
        }
    }
}

fn opt(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
