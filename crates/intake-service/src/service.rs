//! [`AgencyRequestService`]: the three inbound operations plus the read
//! projection.

use std::sync::Arc;

use intake_core::{
  cancel::CancelSignal,
  codes::InformationSource,
  entity::{PersonRecord, SearchRequestRecord},
  store::SearchRequestStore,
  wire::{PersonSearchRequest, SearchRequestOrdered},
};
use tracing::{error, info};

use crate::{
  cascade::{self, RequestContext},
  error::{Error, Result},
  update,
};

/// Sequences collaborator calls for one agency request at a time.
///
/// Holds no per-request state, so one instance can serve concurrent calls.
pub struct AgencyRequestService<S> {
  store: Arc<S>,
}

impl<S> Clone for AgencyRequestService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

/// The agency-created person whose names match those recorded on the
/// request.
fn find_person_sought(request: &SearchRequestRecord) -> Option<&PersonRecord> {
  let entity = &request.entity;
  request.persons.iter().flatten().find(|p| {
    p.entity.first_name == entity.person_sought_first_name
      && p.entity.last_name == entity.person_sought_last_name
      && p.entity.information_source == Some(InformationSource::Request)
      && p.entity.is_created_by_agency
  })
}

impl<S: SearchRequestStore> AgencyRequestService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &S { &self.store }

  /// Create the request, its person sought and every dependent record.
  ///
  /// Returns `None`, without writing anything, when the payload has no
  /// person. Writes are not rolled back if a later one fails.
  pub async fn process_create(
    &self,
    ordered: &SearchRequestOrdered,
    cancel: &CancelSignal,
  ) -> Result<Option<SearchRequestRecord>> {
    let key = ordered.search_request_key.as_str();
    let Some(person) = ordered.person.as_ref() else {
      error!(key, "new search request carries no person");
      return Ok(None);
    };
    let store = self.store.as_ref();

    let mut entity = intake_mapping::search_request_entity(ordered);
    entity.created_by_api = true;
    entity.send_notification_on_creation = true;
    let search_request = store
      .create_search_request(entity, cancel)
      .await
      .map_err(Error::store)?;
    info!(key, search_request_id = %search_request.search_request_id, "search request created");

    let mut person_entity = intake_mapping::person_entity(person);
    person_entity.information_source = Some(InformationSource::Request);
    person_entity.is_created_by_agency = true;
    let saved = store
      .save_person(search_request.search_request_id, person_entity, cancel)
      .await
      .map_err(Error::store)?;
    info!(key, person_id = %saved.person_id, "person sought created");

    let ctx = RequestContext { search_request, person: saved, cancel };
    cascade::upload_identifiers(store, person, &ctx).await?;
    cascade::upload_addresses(store, person, &ctx).await?;
    cascade::upload_phones(store, person, &ctx).await?;
    cascade::upload_employments(store, person, &ctx).await?;
    cascade::upload_related_persons(store, person, &ctx).await?;
    cascade::upload_aliases(store, person, &ctx).await?;

    Ok(Some(ctx.search_request))
  }

  /// Cancel a stored request. `None` when no request has the key, in which
  /// case the collaborator's cancel is never invoked.
  pub async fn process_cancel(
    &self,
    ordered: &SearchRequestOrdered,
    cancel: &CancelSignal,
  ) -> Result<Option<SearchRequestRecord>> {
    let key = ordered.search_request_key.as_str();
    let existing = self
      .store
      .get_search_request(key, cancel)
      .await
      .map_err(Error::store)?;
    if existing.is_none() {
      info!(key, "cancelled search request does not exist");
      return Ok(None);
    }

    let cancelled = self
      .store
      .cancel_search_request(key, cancel)
      .await
      .map_err(Error::store)?;
    info!(key, search_request_id = %cancelled.search_request_id, "search request cancelled");
    Ok(Some(cancelled))
  }

  /// Merge an inbound update into the stored request.
  ///
  /// Returns `None`, having written nothing, when the request or its person
  /// sought cannot be found or the payload has no person.
  pub async fn process_update(
    &self,
    ordered: &SearchRequestOrdered,
    cancel: &CancelSignal,
  ) -> Result<Option<SearchRequestRecord>> {
    let key = ordered.search_request_key.as_str();
    let store = self.store.as_ref();

    let Some(mut existing) = store
      .get_search_request(key, cancel)
      .await
      .map_err(Error::store)?
    else {
      info!(key, "updated search request does not exist");
      return Ok(None);
    };

    let Some(sought_id) = find_person_sought(&existing).map(|p| p.person_id) else {
      error!(key, "person sought missing from stored search request");
      return Ok(None);
    };
    let Some(mut person_record) = store
      .get_person(sought_id, cancel)
      .await
      .map_err(Error::store)?
    else {
      error!(key, person_id = %sought_id, "person sought could not be fetched");
      return Ok(None);
    };

    let Some(person) = ordered.person.as_ref() else {
      error!(key, "search request update carries no person");
      return Ok(None);
    };

    existing.is_duplicated = true;
    person_record.is_duplicated = true;

    let incoming = intake_mapping::search_request_entity(ordered);
    let original_notes = existing.entity.notes.clone();
    let search_request =
      update::update_search_request(store, existing, incoming, cancel).await?;

    let ctx = RequestContext { search_request, person: person_record, cancel };
    update::upload_notes(
      store,
      original_notes.as_deref(),
      ordered.notes.as_deref(),
      &ctx,
    )
    .await?;

    update::update_person_sought(store, person, &ctx).await?;
    update::update_related_applicant(store, ordered, &ctx).await?;
    update::update_employment(store, person, &ctx).await?;
    update::update_identifiers(store, person, &ctx).await?;

    // Appended, never matched: repeated updates duplicate these records.
    cascade::upload_appended(store, person, &ctx).await?;

    Ok(Some(ctx.search_request))
  }

  /// The stored request and its person sought in outbound wire form.
  pub async fn describe(
    &self,
    key: &str,
    cancel: &CancelSignal,
  ) -> Result<Option<PersonSearchRequest>> {
    let store = self.store.as_ref();
    let Some(request) = store
      .get_search_request(key, cancel)
      .await
      .map_err(Error::store)?
    else {
      return Ok(None);
    };
    let Some(sought_id) = find_person_sought(&request).map(|p| p.person_id) else {
      error!(key, "person sought missing from stored search request");
      return Ok(None);
    };
    let person = store
      .get_person(sought_id, cancel)
      .await
      .map_err(Error::store)?;

    Ok(person.map(|p| intake_mapping::person_search_request(&request, &p)))
  }
}
