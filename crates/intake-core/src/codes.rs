//! Closed enumerations shared by the wire and storage schemas.
//!
//! Each storage-side enumeration carries an explicit code table mirroring the
//! option-set values used by the backend. Labels come from the variant names.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result};

// ─── Owner ───────────────────────────────────────────────────────────────────

/// Whose data a wire item describes. Only `PersonSought` items propagate into
/// the person's identifier, address, phone and alias collections.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display,
)]
pub enum OwnerType {
  #[default]
  NotApplicable,
  PersonSought,
  Applicant,
}

// ─── Information source ──────────────────────────────────────────────────────

/// Where a stored record originated. Agency submissions are always `Request`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(into = "i32", try_from = "i32")]
pub enum InformationSource {
  Request,
  Employer,
  Provider,
  Other,
}

impl InformationSource {
  pub fn code(self) -> i32 {
    match self {
      Self::Request => 867_670_000,
      Self::Employer => 867_670_001,
      Self::Provider => 867_670_002,
      Self::Other => 867_670_003,
    }
  }

  pub fn from_code(code: i32) -> Result<Self> {
    match code {
      867_670_000 => Ok(Self::Request),
      867_670_001 => Ok(Self::Employer),
      867_670_002 => Ok(Self::Provider),
      867_670_003 => Ok(Self::Other),
      code => Err(Error::UnknownCode { kind: "information source", code }),
    }
  }
}

impl From<InformationSource> for i32 {
  fn from(s: InformationSource) -> Self { s.code() }
}

impl TryFrom<i32> for InformationSource {
  type Error = Error;

  fn try_from(code: i32) -> Result<Self> { Self::from_code(code) }
}

// ─── Related person type ─────────────────────────────────────────────────────

/// Distinguishes an ordinary relation from the applicant on the related
/// persons collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter)]
#[serde(into = "i32", try_from = "i32")]
pub enum RelatedPersonType {
  Relation,
  Applicant,
}

impl RelatedPersonType {
  pub fn code(self) -> i32 {
    match self {
      Self::Relation => 867_670_000,
      Self::Applicant => 867_670_001,
    }
  }

  pub fn from_code(code: i32) -> Result<Self> {
    match code {
      867_670_000 => Ok(Self::Relation),
      867_670_001 => Ok(Self::Applicant),
      code => Err(Error::UnknownCode { kind: "related person type", code }),
    }
  }
}

impl From<RelatedPersonType> for i32 {
  fn from(t: RelatedPersonType) -> Self { t.code() }
}

impl TryFrom<i32> for RelatedPersonType {
  type Error = Error;

  fn try_from(code: i32) -> Result<Self> { Self::from_code(code) }
}

// ─── Telephone number type ───────────────────────────────────────────────────

/// Phone type stored as a raw numeric code on employment contacts.
///
/// The label (`Display`) is what the wire schema carries; parsing a label is
/// case-insensitive.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum TelephoneNumberType {
  Home,
  Work,
  Cell,
  Fax,
}

impl TelephoneNumberType {
  pub fn code(self) -> i32 {
    match self {
      Self::Home => 0,
      Self::Work => 1,
      Self::Cell => 2,
      Self::Fax => 3,
    }
  }

  /// Lookup by code; unknown codes resolve to `None` rather than an error.
  pub fn from_code(code: i32) -> Option<Self> {
    match code {
      0 => Some(Self::Home),
      1 => Some(Self::Work),
      2 => Some(Self::Cell),
      3 => Some(Self::Fax),
      _ => None,
    }
  }

  /// Lookup by label, e.g. `"work"` → `Work`.
  pub fn from_label(label: &str) -> Option<Self> { label.parse().ok() }
}

// ─── Identifier type ─────────────────────────────────────────────────────────

/// The kind of a personal identifier. Update matching keys on this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum IdentifierType {
  DriverLicense,
  SocialInsuranceNumber,
  PersonalHealthNumber,
  BirthCertificate,
  CorrectionsId,
  NativeStatusCard,
  Passport,
  WcbClaim,
  Other,
}

// ─── Request status ──────────────────────────────────────────────────────────

/// Lifecycle status of a stored search request. Cancellation never deletes.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
  #[default]
  Active,
  Cancelled,
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator as _;

  use super::*;

  #[test]
  fn telephone_code_one_is_work() {
    assert_eq!(TelephoneNumberType::from_code(1), Some(TelephoneNumberType::Work));
    assert_eq!(TelephoneNumberType::Work.to_string(), "Work");
  }

  #[test]
  fn telephone_unknown_code_is_none() {
    assert_eq!(TelephoneNumberType::from_code(42), None);
  }

  #[test]
  fn telephone_label_parse_ignores_case() {
    assert_eq!(TelephoneNumberType::from_label("fax"), Some(TelephoneNumberType::Fax));
    assert_eq!(TelephoneNumberType::from_label("CELL"), Some(TelephoneNumberType::Cell));
    assert_eq!(TelephoneNumberType::from_label("primaryPhone"), None);
  }

  #[test]
  fn code_tables_are_bijective() {
    for t in TelephoneNumberType::iter() {
      assert_eq!(TelephoneNumberType::from_code(t.code()), Some(t));
    }
    for s in InformationSource::iter() {
      assert_eq!(InformationSource::from_code(s.code()).unwrap(), s);
    }
    for t in RelatedPersonType::iter() {
      assert_eq!(RelatedPersonType::from_code(t.code()).unwrap(), t);
    }
  }

  #[test]
  fn information_source_serializes_as_code() {
    let json = serde_json::to_string(&InformationSource::Request).unwrap();
    assert_eq!(json, "867670000");
    let back: InformationSource = serde_json::from_str(&json).unwrap();
    assert_eq!(back, InformationSource::Request);
    assert!(serde_json::from_str::<InformationSource>("1").is_err());
  }
}
