//! Storage representation: write payloads (`*Entity`) and stored records.
//!
//! An entity holds only the mergeable fields. A record wraps an entity with
//! the identifiers assigned by the store and the links to its owners. Nested
//! collections on a record are `None` when not loaded, and are stripped to
//! `None` before an update so the write never cascades into them.
//!
//! Field names serialize in camelCase, like the wire schema.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  codes::{IdentifierType, InformationSource, RelatedPersonType, RequestStatus},
  impl_overlay,
};

// ─── Shared pieces ───────────────────────────────────────────────────────────

/// The two positional reference-date slots of the flat storage schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateSlots {
  pub date1:       Option<DateTime<Utc>>,
  pub date1_label: Option<String>,
  pub date2:       Option<DateTime<Utc>>,
  pub date2_label: Option<String>,
}

impl_overlay!(DateSlots { date1, date1_label, date2, date2_label });

/// The owners a person-scoped record is stamped with on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonLink {
  pub search_request_id: Uuid,
  pub person_id:         Uuid,
}

// ─── Search request ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestEntity {
  pub search_request_key:            Option<String>,
  pub original_request_id:           Option<String>,
  pub requested_at:                  Option<DateTime<Utc>>,
  pub agency_code:                   Option<String>,
  pub requester_name:                Option<String>,
  pub notes:                         Option<String>,
  pub applicant_first_name:          Option<String>,
  pub applicant_last_name:           Option<String>,
  pub person_sought_first_name:      Option<String>,
  pub person_sought_last_name:       Option<String>,
  pub person_sought_date_of_birth:   Option<NaiveDate>,
  pub created_by_api:                bool,
  pub send_notification_on_creation: bool,
}

impl_overlay!(SearchRequestEntity {
  search_request_key,
  original_request_id,
  requested_at,
  agency_code,
  requester_name,
  notes,
  applicant_first_name,
  applicant_last_name,
  person_sought_first_name,
  person_sought_last_name,
  person_sought_date_of_birth,
  created_by_api,
  send_notification_on_creation,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestRecord {
  pub search_request_id: Uuid,
  pub status:            RequestStatus,
  /// Set when a later agency write supersedes this record's content.
  pub is_duplicated:     bool,
  pub entity:            SearchRequestEntity,
  pub persons:           Option<Vec<PersonRecord>>,
  pub notes:             Option<Vec<NotesRecord>>,
}

// ─── Person ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonEntity {
  pub first_name:           Option<String>,
  pub last_name:            Option<String>,
  pub middle_name:          Option<String>,
  pub other_name:           Option<String>,
  pub date_of_birth:        Option<NaiveDate>,
  pub gender:               Option<String>,
  pub dates:                DateSlots,
  pub information_source:   Option<InformationSource>,
  pub is_created_by_agency: bool,
}

impl_overlay!(PersonEntity {
  first_name,
  last_name,
  middle_name,
  other_name,
  date_of_birth,
  gender,
  dates,
  information_source,
  is_created_by_agency,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
  pub person_id:         Uuid,
  pub search_request_id: Uuid,
  pub is_duplicated:     bool,
  pub entity:            PersonEntity,
  pub identifiers:       Option<Vec<IdentifierRecord>>,
  pub addresses:         Option<Vec<AddressRecord>>,
  pub phone_numbers:     Option<Vec<PhoneNumberRecord>>,
  pub employments:       Option<Vec<EmploymentRecord>>,
  pub related_persons:   Option<Vec<RelatedPersonRecord>>,
  pub aliases:           Option<Vec<AliasRecord>>,
}

impl PersonRecord {
  /// Drop every nested collection so an update writes the person alone.
  pub fn strip_collections(&mut self) {
    self.identifiers = None;
    self.addresses = None;
    self.phone_numbers = None;
    self.employments = None;
    self.related_persons = None;
    self.aliases = None;
  }
}

// ─── Identifier ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierEntity {
  pub identification:       Option<String>,
  pub identifier_type:      Option<IdentifierType>,
  pub issued_by:            Option<String>,
  pub description:          Option<String>,
  pub notes:                Option<String>,
  pub dates:                DateSlots,
  pub information_source:   Option<InformationSource>,
  pub is_created_by_agency: bool,
}

impl_overlay!(IdentifierEntity {
  identification,
  identifier_type,
  issued_by,
  description,
  notes,
  dates,
  information_source,
  is_created_by_agency,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifierRecord {
  pub identifier_id: Uuid,
  pub link:          PersonLink,
  pub entity:        IdentifierEntity,
}

// ─── Address ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressEntity {
  pub address_line1:            Option<String>,
  pub address_line2:            Option<String>,
  pub address_line3:            Option<String>,
  pub city:                     Option<String>,
  pub country_subdivision_text: Option<String>,
  pub country_text:             Option<String>,
  pub postal_code:              Option<String>,
  pub category_text:            Option<String>,
  pub description:              Option<String>,
  pub information_source:       Option<InformationSource>,
  pub is_created_by_agency:     bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressRecord {
  pub address_id: Uuid,
  pub link:       PersonLink,
  pub entity:     AddressEntity,
}

// ─── Phone number ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumberEntity {
  pub telephone_number:     Option<String>,
  pub phone_extension:      Option<String>,
  pub type_label:           Option<String>,
  pub contact_name:         Option<String>,
  pub description:          Option<String>,
  pub information_source:   Option<InformationSource>,
  pub is_created_by_agency: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhoneNumberRecord {
  pub phone_number_id: Uuid,
  pub link:            PersonLink,
  pub entity:          PhoneNumberEntity,
}

// ─── Employment ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentEntity {
  pub employer_name:             Option<String>,
  pub occupation:                Option<String>,
  pub website:                   Option<String>,
  pub contact_person:            Option<String>,
  pub primary_phone_number:      Option<String>,
  pub primary_phone_extension:   Option<String>,
  pub primary_fax:               Option<String>,
  pub primary_contact_phone:     Option<String>,
  pub primary_contact_phone_ext: Option<String>,
  pub address_line1:             Option<String>,
  pub address_line2:             Option<String>,
  pub address_line3:             Option<String>,
  pub city:                      Option<String>,
  pub country_subdivision_text:  Option<String>,
  pub country_text:              Option<String>,
  pub postal_code:               Option<String>,
  pub dates:                     DateSlots,
  pub information_source:        Option<InformationSource>,
  pub is_created_by_agency:      bool,
}

impl_overlay!(EmploymentEntity {
  employer_name,
  occupation,
  website,
  contact_person,
  primary_phone_number,
  primary_phone_extension,
  primary_fax,
  primary_contact_phone,
  primary_contact_phone_ext,
  address_line1,
  address_line2,
  address_line3,
  city,
  country_subdivision_text,
  country_text,
  postal_code,
  dates,
  information_source,
  is_created_by_agency,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentRecord {
  pub employment_id: Uuid,
  pub link:          PersonLink,
  pub is_duplicated: bool,
  pub entity:        EmploymentEntity,
  pub contacts:      Option<Vec<EmploymentContactRecord>>,
}

/// A named contact at an employer. `phone_type` is the raw numeric code
/// resolved through [`crate::codes::TelephoneNumberType`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentContactEntity {
  pub contact_name:    Option<String>,
  pub phone_number:    Option<String>,
  pub phone_extension: Option<String>,
  pub fax_number:      Option<String>,
  pub phone_type:      Option<i32>,
  pub description:     Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmploymentContactRecord {
  pub employment_contact_id: Uuid,
  pub employment_id:         Uuid,
  pub entity:                EmploymentContactEntity,
}

// ─── Related person ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPersonEntity {
  pub first_name:           Option<String>,
  pub last_name:            Option<String>,
  pub middle_name:          Option<String>,
  pub other_name:           Option<String>,
  pub person_type:          Option<RelatedPersonType>,
  pub relation:             Option<String>,
  pub gender:               Option<String>,
  pub date_of_birth:        Option<NaiveDate>,
  pub description:          Option<String>,
  pub notes:                Option<String>,
  pub status_code:          Option<i32>,
  pub dates:                DateSlots,
  pub information_source:   Option<InformationSource>,
  pub is_created_by_agency: bool,
}

impl_overlay!(RelatedPersonEntity {
  first_name,
  last_name,
  middle_name,
  other_name,
  person_type,
  relation,
  gender,
  date_of_birth,
  description,
  notes,
  status_code,
  dates,
  information_source,
  is_created_by_agency,
});

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedPersonRecord {
  pub related_person_id: Uuid,
  pub link:              PersonLink,
  pub entity:            RelatedPersonEntity,
}

// ─── Alias ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasEntity {
  pub first_name:           Option<String>,
  pub last_name:            Option<String>,
  pub middle_name:          Option<String>,
  pub other_name:           Option<String>,
  pub type_label:           Option<String>,
  pub description:          Option<String>,
  pub information_source:   Option<InformationSource>,
  pub is_created_by_agency: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasRecord {
  pub alias_id: Uuid,
  pub link:     PersonLink,
  pub entity:   AliasEntity,
}

// ─── Notes ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesEntity {
  pub description:        Option<String>,
  pub status_code:        Option<i32>,
  pub information_source: Option<InformationSource>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesRecord {
  pub notes_id:          Uuid,
  pub search_request_id: Uuid,
  pub entity:            NotesEntity,
}
