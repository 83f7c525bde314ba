//! Field mapper between the agency wire schema and the storage schema.
//!
//! Pure and synchronous; no HTTP or database dependencies. Nothing here
//! fails: missing optional input yields absent derived values.
//!
//! # Quick start
//!
//! ```no_run
//! use intake_core::wire::SearchRequestOrdered;
//! use intake_mapping::search_request_entity;
//!
//! let ordered = SearchRequestOrdered {
//!   search_request_key: "FMEP-001".into(),
//!   ..SearchRequestOrdered::default()
//! };
//! let entity = search_request_entity(&ordered);
//! assert_eq!(entity.search_request_key.as_deref(), Some("FMEP-001"));
//! ```

mod dates;
mod employer;
mod inbound;
mod outbound;

pub use dates::{date_slots, reference_dates};
pub use employer::{
  PRIMARY_CONTACT_PHONE, PRIMARY_FAX, PRIMARY_PHONE, contact_phones,
  employer_address, employer_phones, employment_contact_entity,
  employment_entity, employment_from_record,
};
pub use inbound::{
  ACTIVE_STATUS_CODE, address_entity, alias_entity, applicant_entity,
  identifier_entity, person_entity, phone_entity, related_person_entity,
  search_request_entity,
};
pub use outbound::{applicant_names, identifier_from_record, person_search_request};
