//! Per-section validation of wizard input.
//!
//! Failures are structured field-level messages, never panics: they block
//! the step transition that produced them and are surfaced to the caller
//! for display.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;
use vakil_core::{CategoryFields, DraftRequest, FieldKind, fields_for};

use crate::state::Step;

/// A single missing or malformed input, reported against its wire name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Validation failures for one wizard section.
///
/// Blocks the transition that produced it; the session itself is never
/// torn down by a validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{step}: {} field(s) missing or invalid", .errors.len())]
pub struct StepErrors {
    /// The section the wizard is (or was repositioned) at.
    pub step: Step,
    pub errors: Vec<FieldError>,
}

const REQUIRED: &str = "this field is required";
const BAD_DATE: &str = "must be an ISO date (YYYY-MM-DD)";

fn missing(field: &'static str, errors: &mut Vec<FieldError>, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            message: REQUIRED,
        });
    }
}

/// Step 1: both parties identified well enough to serve process.
pub(crate) fn validate_parties(draft: &DraftRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    missing("petitioner.name", &mut errors, &draft.petitioner.name);
    missing("petitioner.address", &mut errors, &draft.petitioner.address);
    if draft.petitioner.age == 0 {
        errors.push(FieldError {
            field: "petitioner.age",
            message: REQUIRED,
        });
    }
    missing("respondent.name", &mut errors, &draft.respondent.name);
    missing("respondent.address", &mut errors, &draft.respondent.address);
    errors
}

/// Step 2: jurisdiction strings plus the registry's required conditional
/// fields for the selected category.
pub(crate) fn validate_jurisdiction(draft: &DraftRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    missing(
        "jurisdiction.territorial",
        &mut errors,
        &draft.jurisdiction.territorial,
    );
    missing(
        "jurisdiction.pecuniary",
        &mut errors,
        &draft.jurisdiction.pecuniary,
    );

    for spec in fields_for(draft.petition_type) {
        let value = category_value(&draft.category_fields, spec.name);
        let trimmed = value.trim();
        if spec.required && trimmed.is_empty() {
            errors.push(FieldError {
                field: spec.name,
                message: REQUIRED,
            });
        } else if spec.kind == FieldKind::Date
            && !trimmed.is_empty()
            && NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_err()
        {
            errors.push(FieldError {
                field: spec.name,
                message: BAD_DATE,
            });
        }
    }
    errors
}

/// Step 3: the narrative is the heart of the petition and cannot be blank.
pub(crate) fn validate_narrative(draft: &DraftRequest) -> Vec<FieldError> {
    let mut errors = Vec::new();
    missing("causeOfAction", &mut errors, &draft.cause_of_action);
    errors
}

/// Current value of a registry field on the live variant.
///
/// The registry and the variant are derived from the same category, so a
/// name miss here would be a drift defect between the two; an empty string
/// keeps validation honest in release builds.
fn category_value<'a>(fields: &'a CategoryFields, name: &str) -> &'a str {
    match (fields, name) {
        (CategoryFields::Criminal { fir_number, .. }, "firNumber") => fir_number,
        (CategoryFields::Criminal { police_station, .. }, "policeStation") => police_station,
        (CategoryFields::Criminal { custody_status, .. }, "custodyStatus") => {
            custody_status.as_str()
        }
        (CategoryFields::Civil { date_of_cause_of_action }, "dateOfCauseOfAction") => {
            date_of_cause_of_action
        }
        (CategoryFields::Family { date_of_marriage }, "dateOfMarriage") => date_of_marriage,
        _ => {
            debug_assert!(false, "registry field {name} absent from live variant");
            ""
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vakil_core::{
        CustodyStatus, Jurisdiction, PetitionCategory, Petitioner, Respondent,
    };

    fn blank_draft(category: PetitionCategory) -> DraftRequest {
        DraftRequest {
            petitioner: Petitioner::default(),
            respondent: Respondent::default(),
            jurisdiction: Jurisdiction::default(),
            petition_type: category,
            cause_of_action: String::new(),
            category_fields: CategoryFields::for_category(category),
        }
    }

    #[test]
    fn blank_parties_report_every_required_field() {
        let errors = validate_parties(&blank_draft(PetitionCategory::Civil));
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            [
                "petitioner.name",
                "petitioner.address",
                "petitioner.age",
                "respondent.name",
                "respondent.address"
            ]
        );
    }

    #[test]
    fn whitespace_only_name_is_missing() {
        let mut draft = blank_draft(PetitionCategory::Civil);
        draft.petitioner.name = "   ".into();
        let errors = validate_parties(&draft);
        assert!(errors.iter().any(|e| e.field == "petitioner.name"));
    }

    #[test]
    fn criminal_jurisdiction_requires_fir_and_station() {
        let mut draft = blank_draft(PetitionCategory::Criminal);
        draft.jurisdiction = Jurisdiction {
            territorial: "Court of Sessions, Dwarka".into(),
            pecuniary: "N/A".into(),
        };
        let errors = validate_jurisdiction(&draft);
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, ["firNumber", "policeStation"]);
    }

    #[test]
    fn custody_status_never_reports_missing() {
        // A Choice field always carries a valid wire value.
        let mut draft = blank_draft(PetitionCategory::Criminal);
        draft.jurisdiction.territorial = "x".into();
        draft.jurisdiction.pecuniary = "N/A".into();
        draft.category_fields = CategoryFields::Criminal {
            fir_number: "FIR No. 1/2025".into(),
            police_station: "PS Hauz Khas".into(),
            custody_status: CustodyStatus::AnticipatoryBail,
        };
        assert!(validate_jurisdiction(&draft).is_empty());
    }

    #[test]
    fn civil_date_must_be_iso() {
        let mut draft = blank_draft(PetitionCategory::Civil);
        draft.jurisdiction.territorial = "District Court, Saket".into();
        draft.jurisdiction.pecuniary = "Rs. 5,00,000".into();
        draft.category_fields = CategoryFields::Civil {
            date_of_cause_of_action: "14/02/2025".into(),
        };
        let errors = validate_jurisdiction(&draft);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "dateOfCauseOfAction");
        assert_eq!(errors[0].message, BAD_DATE);

        draft.category_fields = CategoryFields::Civil {
            date_of_cause_of_action: "2025-02-14".into(),
        };
        assert!(validate_jurisdiction(&draft).is_empty());
    }

    #[test]
    fn consumer_passes_jurisdiction_without_category_fields() {
        let mut draft = blank_draft(PetitionCategory::Consumer);
        draft.jurisdiction.territorial = "District Consumer Forum, Pune".into();
        draft.jurisdiction.pecuniary = "Rs. 80,000".into();
        assert!(validate_jurisdiction(&draft).is_empty());
    }

    #[test]
    fn narrative_required() {
        let mut draft = blank_draft(PetitionCategory::Writ);
        assert_eq!(validate_narrative(&draft).len(), 1);
        draft.cause_of_action = "The respondent authority...".into();
        assert!(validate_narrative(&draft).is_empty());
    }

    #[test]
    fn step_errors_display_counts_fields() {
        let errors = StepErrors {
            step: Step::Parties,
            errors: validate_parties(&blank_draft(PetitionCategory::Civil)),
        };
        assert_eq!(errors.to_string(), "Parties: 5 field(s) missing or invalid");
    }

    #[test]
    fn step_errors_serialise_for_ui_consumers() {
        let errors = StepErrors {
            step: Step::Narrative,
            errors: vec![FieldError {
                field: "causeOfAction",
                message: REQUIRED,
            }],
        };
        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["step"], "Narrative");
        assert_eq!(json["errors"][0]["field"], "causeOfAction");
    }
}
