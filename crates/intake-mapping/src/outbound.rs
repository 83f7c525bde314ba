//! Storage → wire projections used to describe a stored request.

use intake_core::{
  codes::OwnerType,
  entity::{IdentifierRecord, PersonRecord, SearchRequestRecord},
  wire::{Name, PersonSearchRequest, PersonalIdentifier},
};

use crate::{dates::reference_dates, employer::employment_from_record};

/// A single applicant-owned name when either applicant name is present.
///
/// Returns `None`, not an empty list, when neither is supplied so consumers
/// can tell "no name data" apart from "no names".
pub fn applicant_names(first: Option<&str>, last: Option<&str>) -> Option<Vec<Name>> {
  if first.is_none() && last.is_none() {
    return None;
  }
  Some(vec![Name {
    first_name: first.map(str::to_owned),
    last_name: last.map(str::to_owned),
    owner: OwnerType::Applicant,
    ..Name::default()
  }])
}

pub fn identifier_from_record(record: &IdentifierRecord) -> PersonalIdentifier {
  let e = &record.entity;
  PersonalIdentifier {
    value:           e.identification.clone(),
    kind:            e.identifier_type,
    issued_by:       e.issued_by.clone(),
    description:     e.description.clone(),
    notes:           e.notes.clone(),
    owner:           OwnerType::PersonSought,
    reference_dates: reference_dates(&e.dates),
  }
}

/// Project a stored request and its person sought back to wire form.
///
/// Identifiers and employments are included only when `person` was loaded
/// with its collections.
pub fn person_search_request(
  request: &SearchRequestRecord,
  person: &PersonRecord,
) -> PersonSearchRequest {
  let r = &request.entity;
  let p = &person.entity;

  PersonSearchRequest {
    search_request_key: r.search_request_key.clone().unwrap_or_default(),
    first_name:         p.first_name.clone(),
    last_name:          p.last_name.clone(),
    middle_name:        p.middle_name.clone(),
    date_of_birth:      p.date_of_birth,
    gender:             p.gender.clone(),
    names:              applicant_names(
      r.applicant_first_name.as_deref(),
      r.applicant_last_name.as_deref(),
    ),
    reference_dates:    reference_dates(&p.dates),
    identifiers:        person
      .identifiers
      .iter()
      .flatten()
      .map(identifier_from_record)
      .collect(),
    employments:        person
      .employments
      .iter()
      .flatten()
      .map(employment_from_record)
      .collect(),
  }
}

#[cfg(test)]
mod tests {
  use chrono::{TimeZone, Utc};
  use intake_core::{
    codes::{IdentifierType, RequestStatus},
    entity::{
      DateSlots, EmploymentEntity, EmploymentRecord, IdentifierEntity,
      PersonEntity, PersonLink, SearchRequestEntity,
    },
    wire::{Person, ReferenceDate, SearchRequestOrdered},
  };
  use uuid::Uuid;

  use super::*;
  use crate::inbound::person_entity;

  #[test]
  fn only_first_name_yields_one_applicant_name() {
    let ordered = SearchRequestOrdered {
      applicant_first_name: Some("Jo".into()),
      ..SearchRequestOrdered::default()
    };
    let names = applicant_names(
      ordered.applicant_first_name.as_deref(),
      ordered.applicant_last_name.as_deref(),
    )
    .expect("names present");
    assert_eq!(names.len(), 1);
    assert_eq!(names[0].owner, OwnerType::Applicant);
    assert_eq!(names[0].first_name.as_deref(), Some("Jo"));
    assert_eq!(names[0].last_name, None);
  }

  #[test]
  fn no_applicant_name_is_absent_not_empty() {
    assert_eq!(applicant_names(None, None), None);
  }

  fn link() -> PersonLink {
    PersonLink { search_request_id: Uuid::new_v4(), person_id: Uuid::new_v4() }
  }

  #[test]
  fn person_dates_survive_wire_storage_wire() {
    let dates = vec![
      ReferenceDate { index: 0, key: "Filed".into(), value: Utc.timestamp_opt(100, 0).unwrap() },
      ReferenceDate { index: 1, key: "Served".into(), value: Utc.timestamp_opt(200, 0).unwrap() },
    ];
    let wire = Person { reference_dates: dates.clone(), ..Person::default() };
    let l = link();
    let person = PersonRecord {
      person_id:         l.person_id,
      search_request_id: l.search_request_id,
      is_duplicated:     false,
      entity:            person_entity(&wire),
      identifiers:       None,
      addresses:         None,
      phone_numbers:     None,
      employments:       None,
      related_persons:   None,
      aliases:           None,
    };
    let request = SearchRequestRecord {
      search_request_id: l.search_request_id,
      status:            RequestStatus::Active,
      is_duplicated:     false,
      entity:            SearchRequestEntity {
        search_request_key: Some("K-1".into()),
        ..SearchRequestEntity::default()
      },
      persons:           None,
      notes:             None,
    };

    let out = person_search_request(&request, &person);
    assert_eq!(out.search_request_key, "K-1");
    assert_eq!(out.reference_dates, dates);
    assert_eq!(out.names, None);
    assert!(out.identifiers.is_empty());
  }

  #[test]
  fn loaded_collections_are_projected() {
    let l = link();
    let identifier = IdentifierRecord {
      identifier_id: Uuid::new_v4(),
      link:          l,
      entity:        IdentifierEntity {
        identification: Some("DL-42".into()),
        identifier_type: Some(IdentifierType::DriverLicense),
        dates: DateSlots {
          date2: Some(Utc.timestamp_opt(300, 0).unwrap()),
          date2_label: Some("Expiry".into()),
          ..DateSlots::default()
        },
        ..IdentifierEntity::default()
      },
    };
    let employment = EmploymentRecord {
      employment_id: Uuid::new_v4(),
      link:          l,
      is_duplicated: false,
      entity:        EmploymentEntity {
        employer_name: Some("Acme".into()),
        ..EmploymentEntity::default()
      },
      contacts:      None,
    };
    let person = PersonRecord {
      person_id:         l.person_id,
      search_request_id: l.search_request_id,
      is_duplicated:     false,
      entity:            PersonEntity::default(),
      identifiers:       Some(vec![identifier]),
      addresses:         None,
      phone_numbers:     None,
      employments:       Some(vec![employment]),
      related_persons:   None,
      aliases:           None,
    };
    let request = SearchRequestRecord {
      search_request_id: l.search_request_id,
      status:            RequestStatus::Active,
      is_duplicated:     false,
      entity:            SearchRequestEntity {
        applicant_last_name: Some("Doe".into()),
        ..SearchRequestEntity::default()
      },
      persons:           None,
      notes:             None,
    };

    let out = person_search_request(&request, &person);
    assert_eq!(out.identifiers.len(), 1);
    assert_eq!(out.identifiers[0].value.as_deref(), Some("DL-42"));
    assert_eq!(out.identifiers[0].reference_dates.len(), 1);
    assert_eq!(out.identifiers[0].reference_dates[0].index, 1);
    assert_eq!(out.employments.len(), 1);
    assert_eq!(
      out.employments[0].employer.as_ref().and_then(|e| e.name.as_deref()),
      Some("Acme")
    );
    assert_eq!(out.names.map(|n| n.len()), Some(1));
  }
}
