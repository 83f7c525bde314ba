//! The `SearchRequestStore` trait: the storage collaborator.
//!
//! The trait is implemented by storage backends (e.g. `intake-store-sqlite`).
//! The orchestrator in `intake-service` depends on this abstraction only.
//! Every call takes the operation's [`CancelSignal`]; a backend should abort
//! and fail once it fires.

use std::future::Future;

use uuid::Uuid;

use crate::{
  cancel::CancelSignal,
  entity::{
    AddressEntity, AddressRecord, AliasEntity, AliasRecord,
    EmploymentContactEntity, EmploymentContactRecord, EmploymentEntity,
    EmploymentRecord, IdentifierEntity, IdentifierRecord, NotesEntity,
    NotesRecord, PersonEntity, PersonLink, PersonRecord, PhoneNumberEntity,
    PhoneNumberRecord, RelatedPersonEntity, RelatedPersonRecord,
    SearchRequestEntity, SearchRequestRecord,
  },
};

/// CRUD surface of the backend data store, keyed by opaque identifiers.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait SearchRequestStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Search requests ───────────────────────────────────────────────────

  /// Look a request up by its agency key. The returned record carries its
  /// persons (without their nested collections); `None` if not found.
  fn get_search_request<'a>(
    &'a self,
    key: &'a str,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<Option<SearchRequestRecord>, Self::Error>>
  + Send
  + 'a;

  fn create_search_request<'a>(
    &'a self,
    entity: SearchRequestEntity,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<SearchRequestRecord, Self::Error>> + Send + 'a;

  /// Persist the record's entity and flags. Nested collections are ignored.
  fn update_search_request<'a>(
    &'a self,
    record: SearchRequestRecord,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<SearchRequestRecord, Self::Error>> + Send + 'a;

  /// Mark a request cancelled. Records are never deleted.
  fn cancel_search_request<'a>(
    &'a self,
    key: &'a str,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<SearchRequestRecord, Self::Error>> + Send + 'a;

  // ── Persons ───────────────────────────────────────────────────────────

  /// Fetch a person with every owned collection loaded.
  fn get_person<'a>(
    &'a self,
    person_id: Uuid,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<Option<PersonRecord>, Self::Error>> + Send + 'a;

  fn save_person<'a>(
    &'a self,
    search_request_id: Uuid,
    entity: PersonEntity,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<PersonRecord, Self::Error>> + Send + 'a;

  fn update_person<'a>(
    &'a self,
    record: PersonRecord,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<PersonRecord, Self::Error>> + Send + 'a;

  // ── Person-scoped records ─────────────────────────────────────────────

  fn create_identifier<'a>(
    &'a self,
    link: PersonLink,
    entity: IdentifierEntity,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<IdentifierRecord, Self::Error>> + Send + 'a;

  fn update_identifier<'a>(
    &'a self,
    record: IdentifierRecord,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<IdentifierRecord, Self::Error>> + Send + 'a;

  fn create_address<'a>(
    &'a self,
    link: PersonLink,
    entity: AddressEntity,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<AddressRecord, Self::Error>> + Send + 'a;

  fn create_phone_number<'a>(
    &'a self,
    link: PersonLink,
    entity: PhoneNumberEntity,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<PhoneNumberRecord, Self::Error>> + Send + 'a;

  fn create_employment<'a>(
    &'a self,
    link: PersonLink,
    entity: EmploymentEntity,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<EmploymentRecord, Self::Error>> + Send + 'a;

  fn get_employment<'a>(
    &'a self,
    employment_id: Uuid,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<Option<EmploymentRecord>, Self::Error>>
  + Send
  + 'a;

  fn update_employment<'a>(
    &'a self,
    record: EmploymentRecord,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<EmploymentRecord, Self::Error>> + Send + 'a;

  fn create_employment_contact<'a>(
    &'a self,
    employment_id: Uuid,
    entity: EmploymentContactEntity,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<EmploymentContactRecord, Self::Error>>
  + Send
  + 'a;

  fn create_related_person<'a>(
    &'a self,
    link: PersonLink,
    entity: RelatedPersonEntity,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<RelatedPersonRecord, Self::Error>> + Send + 'a;

  fn update_related_person<'a>(
    &'a self,
    record: RelatedPersonRecord,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<RelatedPersonRecord, Self::Error>> + Send + 'a;

  fn create_alias<'a>(
    &'a self,
    link: PersonLink,
    entity: AliasEntity,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<AliasRecord, Self::Error>> + Send + 'a;

  // ── Notes ─────────────────────────────────────────────────────────────

  fn create_notes<'a>(
    &'a self,
    search_request_id: Uuid,
    entity: NotesEntity,
    cancel: &'a CancelSignal,
  ) -> impl Future<Output = Result<NotesRecord, Self::Error>> + Send + 'a;
}
