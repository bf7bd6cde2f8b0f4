pub mod language;
pub mod petition;
pub mod profile;
pub mod registry;

pub use language::Language;
pub use petition::{
    CategoryFields, CustodyStatus, DraftRequest, Jurisdiction, PetitionCategory, Petitioner,
    Respondent,
};
pub use profile::UserProfile;
pub use registry::{FieldKind, FieldSpec, STEP_LABELS, fields_for};
