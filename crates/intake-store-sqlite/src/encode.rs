//! Encoding and decoding helpers between the storage records and the
//! plain-text representations stored in SQLite columns.
//!
//! Timestamps are RFC 3339 strings, UUIDs hyphenated lowercase strings and
//! entities compact JSON.

use chrono::{DateTime, Utc};
use intake_core::{
  codes::RequestStatus,
  entity::{
    EmploymentContactRecord, NotesRecord, PersonLink, PersonRecord,
    SearchRequestRecord,
  },
};
use serde::{Serialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalars ─────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn encode_json<T: Serialize>(value: &T) -> Result<String> {
  Ok(serde_json::to_string(value)?)
}

fn decode_json<T: DeserializeOwned>(s: &str) -> Result<T> {
  Ok(serde_json::from_str(s)?)
}

// ─── RequestStatus ───────────────────────────────────────────────────────────

pub fn encode_status(s: RequestStatus) -> &'static str {
  match s {
    RequestStatus::Active => "active",
    RequestStatus::Cancelled => "cancelled",
  }
}

pub fn decode_status(s: &str) -> Result<RequestStatus> {
  match s {
    "active" => Ok(RequestStatus::Active),
    "cancelled" => Ok(RequestStatus::Cancelled),
    other => Err(Error::Decode(format!("unknown request status: {other:?}"))),
  }
}

// ─── ItemKind ────────────────────────────────────────────────────────────────

/// Discriminant of a `person_items` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemKind {
  Identifier,
  Address,
  PhoneNumber,
  Employment,
  RelatedPerson,
  Alias,
}

impl ItemKind {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Identifier => "identifier",
      Self::Address => "address",
      Self::PhoneNumber => "phone_number",
      Self::Employment => "employment",
      Self::RelatedPerson => "related_person",
      Self::Alias => "alias",
    }
  }

  pub fn decode(s: &str) -> Result<Self> {
    match s {
      "identifier" => Ok(Self::Identifier),
      "address" => Ok(Self::Address),
      "phone_number" => Ok(Self::PhoneNumber),
      "employment" => Ok(Self::Employment),
      "related_person" => Ok(Self::RelatedPerson),
      "alias" => Ok(Self::Alias),
      other => Err(Error::Decode(format!("unknown item kind: {other:?}"))),
    }
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw strings read directly from a `search_requests` row.
pub struct RawSearchRequest {
  pub search_request_id: String,
  pub status:            String,
  pub is_duplicated:     bool,
  pub entity_json:       String,
}

impl RawSearchRequest {
  /// Collections are left unloaded.
  pub fn into_record(self) -> Result<SearchRequestRecord> {
    Ok(SearchRequestRecord {
      search_request_id: decode_uuid(&self.search_request_id)?,
      status:            decode_status(&self.status)?,
      is_duplicated:     self.is_duplicated,
      entity:            decode_json(&self.entity_json)?,
      persons:           None,
      notes:             None,
    })
  }
}

/// Raw strings read directly from a `persons` row.
pub struct RawPerson {
  pub person_id:         String,
  pub search_request_id: String,
  pub is_duplicated:     bool,
  pub entity_json:       String,
}

impl RawPerson {
  pub fn into_record(self) -> Result<PersonRecord> {
    Ok(PersonRecord {
      person_id:         decode_uuid(&self.person_id)?,
      search_request_id: decode_uuid(&self.search_request_id)?,
      is_duplicated:     self.is_duplicated,
      entity:            decode_json(&self.entity_json)?,
      identifiers:       None,
      addresses:         None,
      phone_numbers:     None,
      employments:       None,
      related_persons:   None,
      aliases:           None,
    })
  }
}

/// Raw strings read directly from a `person_items` row.
pub struct RawItem {
  pub item_id:           String,
  pub person_id:         String,
  pub search_request_id: String,
  pub kind:              String,
  pub is_duplicated:     bool,
  pub entity_json:       String,
}

/// A decoded `person_items` row with its entity still generic.
pub struct Item<T> {
  pub id:            Uuid,
  pub link:          PersonLink,
  pub is_duplicated: bool,
  pub entity:        T,
}

impl RawItem {
  pub fn kind(&self) -> Result<ItemKind> { ItemKind::decode(&self.kind) }

  pub fn decode<T: DeserializeOwned>(&self) -> Result<Item<T>> {
    Ok(Item {
      id:            decode_uuid(&self.item_id)?,
      link:          PersonLink {
        search_request_id: decode_uuid(&self.search_request_id)?,
        person_id:         decode_uuid(&self.person_id)?,
      },
      is_duplicated: self.is_duplicated,
      entity:        decode_json(&self.entity_json)?,
    })
  }
}

/// Raw strings read directly from an `employment_contacts` row.
pub struct RawContact {
  pub employment_contact_id: String,
  pub employment_id:         String,
  pub entity_json:           String,
}

impl RawContact {
  pub fn into_record(self) -> Result<EmploymentContactRecord> {
    Ok(EmploymentContactRecord {
      employment_contact_id: decode_uuid(&self.employment_contact_id)?,
      employment_id:         decode_uuid(&self.employment_id)?,
      entity:                decode_json(&self.entity_json)?,
    })
  }
}

/// Raw strings read directly from a `notes` row.
pub struct RawNotes {
  pub notes_id:          String,
  pub search_request_id: String,
  pub entity_json:       String,
}

impl RawNotes {
  pub fn into_record(self) -> Result<NotesRecord> {
    Ok(NotesRecord {
      notes_id:          decode_uuid(&self.notes_id)?,
      search_request_id: decode_uuid(&self.search_request_id)?,
      entity:            decode_json(&self.entity_json)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn item_kinds_round_trip() {
    for kind in [
      ItemKind::Identifier,
      ItemKind::Address,
      ItemKind::PhoneNumber,
      ItemKind::Employment,
      ItemKind::RelatedPerson,
      ItemKind::Alias,
    ] {
      assert_eq!(ItemKind::decode(kind.as_str()).unwrap(), kind);
    }
    assert!(ItemKind::decode("pet").is_err());
  }

  #[test]
  fn unknown_status_is_a_decode_error() {
    assert!(matches!(decode_status("paused"), Err(Error::Decode(_))));
    assert_eq!(decode_status("cancelled").unwrap(), RequestStatus::Cancelled);
  }
}
