//! Per-category conditional field registry.
//!
//! Single source of truth for which extra inputs each petition category
//! collects at the jurisdiction step. The wizard validates against these
//! descriptors and the instruction templates interpolate the same fields,
//! so the two cannot drift apart.

use crate::petition::PetitionCategory;

/// Input shape of a conditional field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    /// ISO `YYYY-MM-DD` date string.
    Date,
    /// Closed set of wire values.
    Choice(&'static [&'static str]),
}

/// Descriptor for one category-specific field, keyed by its wire name.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

/// Canonical wizard step labels, in order.
pub const STEP_LABELS: [&str; 4] = ["Parties", "Jurisdiction", "Narrative", "Review"];

const CRIMINAL_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "firNumber",
        label: "FIR Number",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSpec {
        name: "policeStation",
        label: "Police Station",
        kind: FieldKind::Text,
        required: true,
    },
    FieldSpec {
        name: "custodyStatus",
        label: "Custody Status",
        kind: FieldKind::Choice(&["judicial_custody", "anticipatory_bail"]),
        required: true,
    },
];

const CIVIL_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "dateOfCauseOfAction",
    label: "Date of Cause of Action",
    kind: FieldKind::Date,
    required: true,
}];

const FAMILY_FIELDS: &[FieldSpec] = &[FieldSpec {
    name: "dateOfMarriage",
    label: "Date of Marriage",
    kind: FieldKind::Date,
    required: true,
}];

/// Conditional fields collected for `category`.
///
/// Writ and Consumer petitions collect none. The match is exhaustive over
/// the closed category enum, so an unknown category cannot reach here.
pub fn fields_for(category: PetitionCategory) -> &'static [FieldSpec] {
    match category {
        PetitionCategory::Criminal => CRIMINAL_FIELDS,
        PetitionCategory::Civil => CIVIL_FIELDS,
        PetitionCategory::Family => FAMILY_FIELDS,
        PetitionCategory::Writ | PetitionCategory::Consumer => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criminal_collects_three_required_fields() {
        let fields = fields_for(PetitionCategory::Criminal);
        assert_eq!(fields.len(), 3);
        assert!(fields.iter().all(|f| f.required));
        let names: Vec<_> = fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["firNumber", "policeStation", "custodyStatus"]);
    }

    #[test]
    fn writ_and_consumer_collect_nothing() {
        assert!(fields_for(PetitionCategory::Writ).is_empty());
        assert!(fields_for(PetitionCategory::Consumer).is_empty());
    }

    #[test]
    fn date_categories_use_date_kind() {
        assert_eq!(fields_for(PetitionCategory::Civil)[0].kind, FieldKind::Date);
        assert_eq!(fields_for(PetitionCategory::Family)[0].kind, FieldKind::Date);
    }

    #[test]
    fn custody_choices_match_wire_values() {
        let custody = fields_for(PetitionCategory::Criminal)
            .iter()
            .find(|f| f.name == "custodyStatus")
            .unwrap();
        assert_eq!(
            custody.kind,
            FieldKind::Choice(&["judicial_custody", "anticipatory_bail"])
        );
    }

    #[test]
    fn four_step_labels() {
        assert_eq!(STEP_LABELS.len(), 4);
        assert_eq!(STEP_LABELS[0], "Parties");
        assert_eq!(STEP_LABELS[3], "Review");
    }
}
