//! Type definitions

mod domain;
mod record;
mod user;
mod validation;
mod view;

pub use domain::{Domain, DomainHandle, DomainId, DomainSummary};
pub use record::{
    NewRecord, RecordDeletion, RecordFields, RecordKey, RecordType, RecordUpdate, ResourceRecord,
};
pub use user::User;
pub use validation::ValidationMessages;
pub use view::PageChrome;
