mod client;
mod duplicate;
mod feedback;
mod mailing_list;
mod payload;
mod reconciler;

pub use client::{FormApiClient, FormId, SubmissionTransport, TransportError};
pub use duplicate::{DuplicateClassifier, PhraseClassifier};
pub use feedback::{FormView, Notification, NotificationKind};
pub use mailing_list::MailingListClient;
pub use payload::Payload;
pub use reconciler::{FormSession, SubmitOutcome};
