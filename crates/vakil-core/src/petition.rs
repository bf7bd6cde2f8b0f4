//! Shared petition types for the draft composition pipeline.
//!
//! A [`DraftRequest`] is the frozen aggregate the wizard produces on final
//! submission and the generation client consumes exactly once. Everything
//! here serialises to the camelCase wire shape the drafting service
//! expects, with category-specific fields flattened to the top level.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Legal-matter category of a petition.
///
/// Decides which conditional fields the wizard collects and which
/// instruction template variant the generation client applies. Immutable
/// once a [`DraftRequest`] is frozen; mutable while the wizard is editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PetitionCategory {
    Civil,
    Criminal,
    Writ,
    Consumer,
    Family,
}

impl PetitionCategory {
    pub const ALL: [PetitionCategory; 5] = [
        PetitionCategory::Civil,
        PetitionCategory::Criminal,
        PetitionCategory::Writ,
        PetitionCategory::Consumer,
        PetitionCategory::Family,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PetitionCategory::Civil => "Civil",
            PetitionCategory::Criminal => "Criminal",
            PetitionCategory::Writ => "Writ",
            PetitionCategory::Consumer => "Consumer",
            PetitionCategory::Family => "Family",
        }
    }
}

impl fmt::Display for PetitionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown petition category: {0}")]
pub struct ParseCategoryError(String);

impl FromStr for PetitionCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "civil" => Ok(PetitionCategory::Civil),
            "criminal" => Ok(PetitionCategory::Criminal),
            "writ" => Ok(PetitionCategory::Writ),
            "consumer" => Ok(PetitionCategory::Consumer),
            "family" => Ok(PetitionCategory::Family),
            other => Err(ParseCategoryError(other.to_string())),
        }
    }
}

/// The party filing the petition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Petitioner {
    pub name: String,
    /// Father's, mother's, or spouse's name for the cause title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_or_spouse: Option<String>,
    pub address: String,
    /// Zero means "not yet entered" in wizard state; submission requires a
    /// positive value.
    pub age: u32,
}

/// The party against whom relief is sought.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Respondent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_or_spouse: Option<String>,
    pub address: String,
}

/// Court and claim-value placement of the matter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Jurisdiction {
    /// Court or venue, e.g. "District Court, New Delhi".
    pub territorial: String,
    /// Monetary value of the claim, or the literal "N/A" for non-monetary
    /// matters.
    pub pecuniary: String,
}

/// Custody posture of the accused in a criminal matter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustodyStatus {
    JudicialCustody,
    AnticipatoryBail,
}

impl CustodyStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            CustodyStatus::JudicialCustody => "judicial_custody",
            CustodyStatus::AnticipatoryBail => "anticipatory_bail",
        }
    }

    /// Phrasing used in the generation instructions.
    pub fn describe(self) -> &'static str {
        match self {
            CustodyStatus::JudicialCustody => "Accused is in Judicial Custody",
            CustodyStatus::AnticipatoryBail => "Applying for Anticipatory Bail",
        }
    }
}

/// Category-specific fields of a request, as a tagged variant.
///
/// Exactly one variant is live at a time and it must match the request's
/// [`PetitionCategory`]; the wizard swaps the whole variant when the
/// category changes so stale cross-category input cannot leak into a
/// frozen request. Serialisation is untagged and flattened into
/// [`DraftRequest`], reproducing the flat wire shape (`firNumber`,
/// `dateOfMarriage`, ...) with Writ/Consumer contributing no keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryFields {
    #[serde(rename_all = "camelCase")]
    Criminal {
        fir_number: String,
        police_station: String,
        custody_status: CustodyStatus,
    },
    #[serde(rename_all = "camelCase")]
    Civil {
        /// ISO `YYYY-MM-DD` date string.
        date_of_cause_of_action: String,
    },
    #[serde(rename_all = "camelCase")]
    Family {
        /// ISO `YYYY-MM-DD` date string.
        date_of_marriage: String,
    },
    Empty {},
}

impl CategoryFields {
    /// The blank variant a freshly selected `category` starts from.
    pub fn for_category(category: PetitionCategory) -> Self {
        match category {
            PetitionCategory::Criminal => CategoryFields::Criminal {
                fir_number: String::new(),
                police_station: String::new(),
                custody_status: CustodyStatus::JudicialCustody,
            },
            PetitionCategory::Civil => CategoryFields::Civil {
                date_of_cause_of_action: String::new(),
            },
            PetitionCategory::Family => CategoryFields::Family {
                date_of_marriage: String::new(),
            },
            PetitionCategory::Writ | PetitionCategory::Consumer => CategoryFields::Empty {},
        }
    }

    /// Whether this variant is the one `category` requires.
    pub fn matches(&self, category: PetitionCategory) -> bool {
        matches!(
            (self, category),
            (CategoryFields::Criminal { .. }, PetitionCategory::Criminal)
                | (CategoryFields::Civil { .. }, PetitionCategory::Civil)
                | (CategoryFields::Family { .. }, PetitionCategory::Family)
                | (
                    CategoryFields::Empty {},
                    PetitionCategory::Writ | PetitionCategory::Consumer
                )
        )
    }
}

/// A fully composed, validated draft request.
///
/// Created by the wizard only on final-step submission and handed to the
/// generation client by value; it is never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRequest {
    pub petitioner: Petitioner,
    pub respondent: Respondent,
    pub jurisdiction: Jurisdiction,
    pub petition_type: PetitionCategory,
    /// Free-text narrative of the factual basis of the claim.
    pub cause_of_action: String,
    #[serde(flatten)]
    pub category_fields: CategoryFields,
}
