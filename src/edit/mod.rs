//! The mutation engine: editing sessions and form plumbing
//!
//! The session is the single writer of the document root; everything it
//! needs from the presentation layer goes through the [`FormPrompter`]
//! and [`Confirmer`] traits.

pub mod forms;
pub mod session;

pub use forms::{template_fields, Confirmer, FieldSpec, FormAnswers, FormPrompter};
pub use session::EditSession;
