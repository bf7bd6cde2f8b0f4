//! Draft request builder: a four-step wizard state machine that
//! accumulates partial input, validates each section, and freezes an
//! immutable [`DraftRequest`](vakil_core::DraftRequest) on final
//! submission.
//!
//! The wizard is synchronous and UI-agnostic: every operation is an
//! explicit state transition on a [`WizardState`] value, so the whole
//! flow can be exercised without any rendering surface.

mod state;
mod validate;

pub use state::{Step, UpdateError, WizardState};
pub use validate::{FieldError, StepErrors};
