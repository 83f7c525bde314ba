//! Integration tests for `SqliteStore` against an in-memory database.

use std::{future::pending, time::Duration};

use intake_core::{
  cancel::{CancelSignal, CancelSource},
  codes::{IdentifierType, InformationSource, RequestStatus},
  entity::{
    AddressEntity, EmploymentContactEntity, EmploymentEntity, IdentifierEntity,
    NotesEntity, PersonEntity, PersonLink, SearchRequestEntity,
  },
  store::SearchRequestStore,
};
use uuid::Uuid;

use crate::{Error, SqliteStore, store::guarded};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn never() -> CancelSignal { CancelSignal::never() }

fn request(key: &str) -> SearchRequestEntity {
  SearchRequestEntity {
    search_request_key: Some(key.into()),
    notes: Some("first".into()),
    person_sought_first_name: Some("Sam".into()),
    created_by_api: true,
    ..SearchRequestEntity::default()
  }
}

fn person() -> PersonEntity {
  PersonEntity {
    first_name: Some("Sam".into()),
    last_name: Some("Roe".into()),
    information_source: Some(InformationSource::Request),
    is_created_by_agency: true,
    ..PersonEntity::default()
  }
}

/// A stored request with one person, returning the link between them.
async fn seeded(s: &SqliteStore, key: &str) -> PersonLink {
  let r = s.create_search_request(request(key), &never()).await.unwrap();
  let p = s.save_person(r.search_request_id, person(), &never()).await.unwrap();
  PersonLink { search_request_id: r.search_request_id, person_id: p.person_id }
}

// ─── Search requests ─────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_by_key() {
  let s = store().await;
  let created = s.create_search_request(request("K-1"), &never()).await.unwrap();
  assert_eq!(created.status, RequestStatus::Active);

  let fetched = s.get_search_request("K-1", &never()).await.unwrap().unwrap();
  assert_eq!(fetched.search_request_id, created.search_request_id);
  assert_eq!(fetched.entity, request("K-1"));
  assert_eq!(fetched.persons, Some(vec![]));
  assert_eq!(fetched.notes, Some(vec![]));
}

#[tokio::test]
async fn get_missing_key_returns_none() {
  let s = store().await;
  assert!(s.get_search_request("NOPE", &never()).await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_key_is_rejected() {
  let s = store().await;
  s.create_search_request(request("K-1"), &never()).await.unwrap();
  let err = s.create_search_request(request("K-1"), &never()).await.unwrap_err();
  assert!(matches!(err, Error::DuplicateKey(k) if k == "K-1"));
}

#[tokio::test]
async fn update_persists_entity_and_flag() {
  let s = store().await;
  let mut record = s.create_search_request(request("K-1"), &never()).await.unwrap();
  record.is_duplicated = true;
  record.entity.requester_name = Some("Agent".into());
  s.update_search_request(record, &never()).await.unwrap();

  let fetched = s.get_search_request("K-1", &never()).await.unwrap().unwrap();
  assert!(fetched.is_duplicated);
  assert_eq!(fetched.entity.requester_name.as_deref(), Some("Agent"));
}

#[tokio::test]
async fn update_unknown_request_is_not_found() {
  let s = store().await;
  let mut record = s.create_search_request(request("K-1"), &never()).await.unwrap();
  record.search_request_id = Uuid::new_v4();
  let err = s.update_search_request(record, &never()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: "search request", .. }));
}

#[tokio::test]
async fn cancel_marks_status() {
  let s = store().await;
  s.create_search_request(request("K-1"), &never()).await.unwrap();

  let cancelled = s.cancel_search_request("K-1", &never()).await.unwrap();
  assert_eq!(cancelled.status, RequestStatus::Cancelled);

  let fetched = s.get_search_request("K-1", &never()).await.unwrap().unwrap();
  assert_eq!(fetched.status, RequestStatus::Cancelled);
}

#[tokio::test]
async fn cancel_unknown_key_fails() {
  let s = store().await;
  let err = s.cancel_search_request("NOPE", &never()).await.unwrap_err();
  assert!(matches!(err, Error::UnknownKey(_)));
}

// ─── Persons ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn request_lists_its_persons_shallow() {
  let s = store().await;
  let link = seeded(&s, "K-1").await;
  s.create_address(link, AddressEntity::default(), &never()).await.unwrap();

  let fetched = s.get_search_request("K-1", &never()).await.unwrap().unwrap();
  let persons = fetched.persons.unwrap();
  assert_eq!(persons.len(), 1);
  assert_eq!(persons[0].person_id, link.person_id);
  assert_eq!(persons[0].entity, person());
  assert!(persons[0].addresses.is_none());
}

#[tokio::test]
async fn get_person_loads_collections() {
  let s = store().await;
  let link = seeded(&s, "K-1").await;

  s.create_identifier(
    link,
    IdentifierEntity {
      identification: Some("P-1".into()),
      identifier_type: Some(IdentifierType::Passport),
      ..IdentifierEntity::default()
    },
    &never(),
  )
  .await
  .unwrap();
  s.create_address(
    link,
    AddressEntity { city: Some("Victoria".into()), ..AddressEntity::default() },
    &never(),
  )
  .await
  .unwrap();
  let employment = s
    .create_employment(
      link,
      EmploymentEntity { employer_name: Some("Acme".into()), ..EmploymentEntity::default() },
      &never(),
    )
    .await
    .unwrap();
  s.create_employment_contact(
    employment.employment_id,
    EmploymentContactEntity { contact_name: Some("Jane".into()), ..EmploymentContactEntity::default() },
    &never(),
  )
  .await
  .unwrap();

  let p = s.get_person(link.person_id, &never()).await.unwrap().unwrap();
  let identifiers = p.identifiers.unwrap();
  assert_eq!(identifiers.len(), 1);
  assert_eq!(identifiers[0].link, link);
  assert_eq!(identifiers[0].entity.identifier_type, Some(IdentifierType::Passport));
  assert_eq!(p.addresses.unwrap()[0].entity.city.as_deref(), Some("Victoria"));
  assert_eq!(p.phone_numbers, Some(vec![]));
  assert_eq!(p.related_persons, Some(vec![]));

  let employments = p.employments.unwrap();
  assert_eq!(employments.len(), 1);
  let contacts = employments[0].contacts.as_ref().unwrap();
  assert_eq!(contacts.len(), 1);
  assert_eq!(contacts[0].entity.contact_name.as_deref(), Some("Jane"));
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let s = store().await;
  assert!(s.get_person(Uuid::new_v4(), &never()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_person_overwrites_entity() {
  let s = store().await;
  let link = seeded(&s, "K-1").await;
  let mut p = s.get_person(link.person_id, &never()).await.unwrap().unwrap();
  p.entity.gender = Some("F".into());
  p.is_duplicated = true;
  p.strip_collections();
  s.update_person(p, &never()).await.unwrap();

  let fetched = s.get_person(link.person_id, &never()).await.unwrap().unwrap();
  assert!(fetched.is_duplicated);
  assert_eq!(fetched.entity.gender.as_deref(), Some("F"));
}

// ─── Person-scoped records ───────────────────────────────────────────────────

#[tokio::test]
async fn update_identifier_round_trips() {
  let s = store().await;
  let link = seeded(&s, "K-1").await;
  let mut id = s
    .create_identifier(link, IdentifierEntity::default(), &never())
    .await
    .unwrap();
  id.entity.identification = Some("DL-9".into());
  s.update_identifier(id.clone(), &never()).await.unwrap();

  let p = s.get_person(link.person_id, &never()).await.unwrap().unwrap();
  assert_eq!(p.identifiers.unwrap(), vec![id]);
}

#[tokio::test]
async fn update_item_checks_kind() {
  let s = store().await;
  let link = seeded(&s, "K-1").await;
  let address = s.create_address(link, AddressEntity::default(), &never()).await.unwrap();

  let employment = intake_core::entity::EmploymentRecord {
    employment_id: address.address_id,
    link,
    is_duplicated: false,
    entity: EmploymentEntity::default(),
    contacts: None,
  };
  let err = s.update_employment(employment, &never()).await.unwrap_err();
  assert!(matches!(err, Error::NotFound { kind: "employment", .. }));
}

#[tokio::test]
async fn get_employment_by_id() {
  let s = store().await;
  let link = seeded(&s, "K-1").await;
  let created = s
    .create_employment(link, EmploymentEntity::default(), &never())
    .await
    .unwrap();

  let mut fetched = s
    .get_employment(created.employment_id, &never())
    .await
    .unwrap()
    .unwrap();
  assert_eq!(fetched.contacts, Some(vec![]));

  fetched.is_duplicated = true;
  fetched.entity.occupation = Some("Faller".into());
  s.update_employment(fetched, &never()).await.unwrap();

  let again = s
    .get_employment(created.employment_id, &never())
    .await
    .unwrap()
    .unwrap();
  assert!(again.is_duplicated);
  assert_eq!(again.entity.occupation.as_deref(), Some("Faller"));
  assert!(s.get_employment(Uuid::new_v4(), &never()).await.unwrap().is_none());
}

// ─── Notes ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn notes_are_listed_on_the_request() {
  let s = store().await;
  let link = seeded(&s, "K-1").await;
  s.create_notes(
    link.search_request_id,
    NotesEntity { description: Some("call after 5pm".into()), status_code: Some(1), ..NotesEntity::default() },
    &never(),
  )
  .await
  .unwrap();

  let fetched = s.get_search_request("K-1", &never()).await.unwrap().unwrap();
  let notes = fetched.notes.unwrap();
  assert_eq!(notes.len(), 1);
  assert_eq!(notes[0].entity.description.as_deref(), Some("call after 5pm"));
}

// ─── Cancellation ────────────────────────────────────────────────────────────

#[tokio::test]
async fn cancelled_signal_aborts_before_writing() {
  let s = store().await;
  let source = CancelSource::new();
  let cancel = source.signal();
  source.cancel();

  let err = s.create_search_request(request("K-1"), &cancel).await.unwrap_err();
  assert!(matches!(err, Error::Cancelled));
  assert!(s.get_search_request("K-1", &never()).await.unwrap().is_none());
}

#[tokio::test]
async fn dropped_source_counts_as_cancelled() {
  let s = store().await;
  let cancel = CancelSource::new().signal();

  let err = s.get_search_request("K-1", &cancel).await.unwrap_err();
  assert!(matches!(err, Error::Cancelled));
}

#[tokio::test]
async fn cancel_fired_mid_call_aborts_it() {
  let source = CancelSource::new();
  let cancel = source.signal();
  let call = guarded(&cancel, pending::<Result<(), Error>>());
  let fire = async {
    tokio::time::sleep(Duration::from_millis(20)).await;
    source.cancel();
  };

  let (result, ()) = tokio::join!(call, fire);
  assert!(matches!(result, Err(Error::Cancelled)));
}
