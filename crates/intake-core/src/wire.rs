//! Wire representation of agency requests.
//!
//! These types mirror the JSON contract of the agency-facing API, so field
//! names are camelCase and every collection defaults to empty when omitted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::codes::{IdentifierType, OwnerType};

// ─── Request envelope ────────────────────────────────────────────────────────

/// An inbound agency request: create, update or cancel a search request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequestOrdered {
  /// The agency's key for the request; the store looks requests up by it.
  #[serde(default)]
  pub search_request_key:   String,
  pub request_id:           Option<String>,
  pub time_stamp:           Option<DateTime<Utc>>,
  pub agency_code:          Option<String>,
  pub requester_name:       Option<String>,
  pub notes:                Option<String>,
  pub applicant_first_name: Option<String>,
  pub applicant_last_name:  Option<String>,
  /// The person sought. Required by the update flow.
  pub person:               Option<Person>,
}

// ─── Person ──────────────────────────────────────────────────────────────────

/// The person sought, with every owned sub-collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Person {
  pub first_name:      Option<String>,
  pub last_name:       Option<String>,
  pub middle_name:     Option<String>,
  pub other_name:      Option<String>,
  pub date_of_birth:   Option<NaiveDate>,
  pub gender:          Option<String>,
  pub reference_dates: Vec<ReferenceDate>,
  pub identifiers:     Vec<PersonalIdentifier>,
  pub addresses:       Vec<Address>,
  pub phones:          Vec<Phone>,
  pub names:           Vec<Name>,
  pub employments:     Vec<Employment>,
  pub related_persons: Vec<RelatedPerson>,
}

/// A labelled date occupying one of two positional slots.
///
/// `index` 0 is the first slot and 1 the second; any other index has no
/// storage slot and is dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceDate {
  pub index: u8,
  pub key:   String,
  pub value: DateTime<Utc>,
}

// ─── Sub-items ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalIdentifier {
  pub value:           Option<String>,
  #[serde(rename = "type")]
  pub kind:            Option<IdentifierType>,
  pub issued_by:       Option<String>,
  pub description:     Option<String>,
  pub notes:           Option<String>,
  pub owner:           OwnerType,
  pub reference_dates: Vec<ReferenceDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
  pub address_line1:   Option<String>,
  pub address_line2:   Option<String>,
  pub address_line3:   Option<String>,
  pub city:            Option<String>,
  pub state_province:  Option<String>,
  pub country_region:  Option<String>,
  pub zip_postal_code: Option<String>,
  #[serde(rename = "type")]
  pub kind:            Option<String>,
  pub description:     Option<String>,
  pub owner:           OwnerType,
}

/// A telephone number. `kind` is a free label: a [`TelephoneNumberType`]
/// name for contacts, or one of the `primary*` labels for employer fields.
///
/// [`TelephoneNumberType`]: crate::codes::TelephoneNumberType
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Phone {
  pub phone_number: Option<String>,
  pub extension:    Option<String>,
  #[serde(rename = "type")]
  pub kind:         Option<String>,
  pub contact_name: Option<String>,
  pub description:  Option<String>,
  pub owner:        OwnerType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Name {
  pub first_name:  Option<String>,
  pub last_name:   Option<String>,
  pub middle_name: Option<String>,
  pub other_name:  Option<String>,
  #[serde(rename = "type")]
  pub kind:        Option<String>,
  pub description: Option<String>,
  pub owner:       OwnerType,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employment {
  pub occupation:      Option<String>,
  pub website:         Option<String>,
  pub employer:        Option<Employer>,
  pub reference_dates: Vec<ReferenceDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Employer {
  pub name:           Option<String>,
  pub contact_person: Option<String>,
  pub address:        Option<Address>,
  pub phones:         Vec<Phone>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RelatedPerson {
  pub first_name:      Option<String>,
  pub last_name:       Option<String>,
  pub middle_name:     Option<String>,
  pub other_name:      Option<String>,
  /// Free-text relation, e.g. "Spouse".
  #[serde(rename = "type")]
  pub kind:            Option<String>,
  pub gender:          Option<String>,
  pub date_of_birth:   Option<NaiveDate>,
  pub description:     Option<String>,
  pub notes:           Option<String>,
  pub owner:           OwnerType,
  pub reference_dates: Vec<ReferenceDate>,
}

// ─── Outbound projection ─────────────────────────────────────────────────────

/// A stored search request projected back to wire form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSearchRequest {
  pub search_request_key: String,
  pub first_name:         Option<String>,
  pub last_name:          Option<String>,
  pub middle_name:        Option<String>,
  pub date_of_birth:      Option<NaiveDate>,
  pub gender:             Option<String>,
  /// Absent (not empty) when no applicant name was supplied.
  pub names:              Option<Vec<Name>>,
  pub reference_dates:    Vec<ReferenceDate>,
  pub identifiers:        Vec<PersonalIdentifier>,
  pub employments:        Vec<Employment>,
}
