mod attachment;
mod email_address;
mod person_name;
mod submission_result;
mod submission_status;

pub use attachment::*;
pub use email_address::EmailAddress;
pub use person_name::PersonName;
pub use submission_result::*;
pub use submission_status::SubmissionStatus;
