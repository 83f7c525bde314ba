//! Merge-or-create steps of the update flow.
//!
//! Each step maps the inbound item, overlays it onto the stored copy with
//! [`merge_updates`] and writes only when the merge reports a change.

use intake_core::{
  codes::{InformationSource, OwnerType, RelatedPersonType},
  entity::{NotesEntity, SearchRequestEntity, SearchRequestRecord},
  merge::merge_updates,
  store::SearchRequestStore,
  wire::{Person, SearchRequestOrdered},
};
use tracing::{debug, info};

use crate::{
  cascade::{self, RequestContext},
  error::{Error, Result},
};

/// Case-insensitive notes comparison; absent and present always differ.
pub(crate) fn notes_differ(current: Option<&str>, incoming: Option<&str>) -> bool {
  match (current, incoming) {
    (Some(a), Some(b)) => a.to_lowercase() != b.to_lowercase(),
    (None, None) => false,
    _ => true,
  }
}

/// Overlay the inbound request onto the stored one and persist it if
/// anything changed. Returns the record to carry forward.
///
/// Notes are applied to the base copy before merging, so a notes-only change
/// never triggers a request write, and a case-only change is dropped.
pub(crate) async fn update_search_request<S: SearchRequestStore>(
  store: &S,
  existing: SearchRequestRecord,
  mut incoming: SearchRequestEntity,
  cancel: &intake_core::cancel::CancelSignal,
) -> Result<SearchRequestRecord> {
  incoming.created_by_api = true;
  incoming.send_notification_on_creation = true;

  let mut base = existing.entity.clone();
  if incoming.notes.is_some()
    && notes_differ(base.notes.as_deref(), incoming.notes.as_deref())
  {
    base.notes = incoming.notes.clone();
  }
  incoming.notes = None;

  let merged = merge_updates(&base, &incoming);
  if !merged.changed {
    debug!(key = ?existing.entity.search_request_key, "search request unchanged");
    return Ok(existing);
  }

  let mut record = existing;
  record.entity = merged.value;
  record.persons = None;
  record.notes = None;
  let updated = store
    .update_search_request(record, cancel)
    .await
    .map_err(Error::store)?;
  info!(
    key = ?updated.entity.search_request_key,
    search_request_id = %updated.search_request_id,
    "search request updated"
  );
  Ok(updated)
}

/// A new notes record when the inbound notes are non-empty and differ from
/// what was stored before the update.
pub(crate) async fn upload_notes<S: SearchRequestStore>(
  store: &S,
  original: Option<&str>,
  incoming: Option<&str>,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let Some(notes) = incoming.filter(|n| !n.is_empty()) else {
    return Ok(());
  };
  if !notes_differ(original, Some(notes)) {
    return Ok(());
  }

  let entity = NotesEntity {
    description:        Some(notes.to_owned()),
    status_code:        Some(intake_mapping::ACTIVE_STATUS_CODE),
    information_source: Some(InformationSource::Request),
  };
  let created = store
    .create_notes(ctx.search_request.search_request_id, entity, ctx.cancel)
    .await
    .map_err(Error::store)?;
  info!(key = ctx.key(), notes_id = %created.notes_id, "notes created");
  Ok(())
}

pub(crate) async fn update_person_sought<S: SearchRequestStore>(
  store: &S,
  person: &Person,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let mut incoming = intake_mapping::person_entity(person);
  incoming.is_created_by_agency = true;

  let merged = merge_updates(&ctx.person.entity, &incoming);
  if !merged.changed {
    debug!(key = ctx.key(), person_id = %ctx.person.person_id, "person sought unchanged");
    return Ok(());
  }

  let mut record = ctx.person.clone();
  record.entity = merged.value;
  record.search_request_id = ctx.search_request.search_request_id;
  record.strip_collections();
  let updated = store
    .update_person(record, ctx.cancel)
    .await
    .map_err(Error::store)?;
  info!(key = ctx.key(), person_id = %updated.person_id, "person sought updated");
  Ok(())
}

/// Create or merge the related person standing for the applicant. Skipped
/// unless both applicant names are present.
pub(crate) async fn update_related_applicant<S: SearchRequestStore>(
  store: &S,
  ordered: &SearchRequestOrdered,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let Some(mut incoming) = intake_mapping::applicant_entity(ordered) else {
    return Ok(());
  };
  incoming.information_source = Some(InformationSource::Request);

  let original = ctx.person.related_persons.iter().flatten().find(|r| {
    r.entity.information_source == Some(InformationSource::Request)
      && r.entity.person_type == Some(RelatedPersonType::Applicant)
  });

  let Some(original) = original else {
    let created = store
      .create_related_person(ctx.link(), incoming, ctx.cancel)
      .await
      .map_err(Error::store)?;
    info!(
      key = ctx.key(),
      related_person_id = %created.related_person_id,
      "related applicant created"
    );
    return Ok(());
  };

  let merged = merge_updates(&original.entity, &incoming);
  if !merged.changed {
    return Ok(());
  }
  let mut record = original.clone();
  record.entity = merged.value;
  record.link = ctx.link();
  let updated = store
    .update_related_person(record, ctx.cancel)
    .await
    .map_err(Error::store)?;
  info!(
    key = ctx.key(),
    related_person_id = %updated.related_person_id,
    "related applicant updated"
  );
  Ok(())
}

/// Only the first inbound employment is matched. Without a stored
/// agency-created employment every inbound employment is created.
pub(crate) async fn update_employment<S: SearchRequestStore>(
  store: &S,
  person: &Person,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let Some(first) = person.employments.first() else {
    return Ok(());
  };

  let original = ctx.person.employments.iter().flatten().find(|e| {
    e.entity.information_source == Some(InformationSource::Request)
      && e.entity.is_created_by_agency
  });
  let Some(original) = original else {
    return cascade::upload_employments(store, person, ctx).await;
  };

  let mut current = store
    .get_employment(original.employment_id, ctx.cancel)
    .await
    .map_err(Error::store)?
    .unwrap_or_else(|| original.clone());
  current.is_duplicated = true;

  let mut incoming = intake_mapping::employment_entity(first);
  incoming.is_created_by_agency = true;

  let merged = merge_updates(&current.entity, &incoming);
  if merged.changed {
    let mut record = current.clone();
    record.entity = merged.value;
    record.entity.information_source = Some(InformationSource::Request);
    record.link = ctx.link();
    record.contacts = None;
    store
      .update_employment(record, ctx.cancel)
      .await
      .map_err(Error::store)?;
    info!(key = ctx.key(), employment_id = %current.employment_id, "employment updated");
  }

  cascade::upload_employment_contacts(store, current.employment_id, first, ctx).await
}

/// Identifiers match on type among the agency-created ones from this
/// source; unmatched identifiers are created one by one.
pub(crate) async fn update_identifiers<S: SearchRequestStore>(
  store: &S,
  person: &Person,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let inbound = person
    .identifiers
    .iter()
    .filter(|i| i.owner == OwnerType::PersonSought);

  for id in inbound {
    let mut incoming = intake_mapping::identifier_entity(id);
    let original = ctx.person.identifiers.iter().flatten().find(|o| {
      o.entity.information_source == Some(InformationSource::Request)
        && o.entity.identifier_type == incoming.identifier_type
        && o.entity.is_created_by_agency
    });

    let Some(original) = original else {
      cascade::create_identifier(store, id, ctx).await?;
      continue;
    };

    incoming.is_created_by_agency = true;
    let merged = merge_updates(&original.entity, &incoming);
    if !merged.changed {
      continue;
    }
    let mut record = original.clone();
    record.entity = merged.value;
    record.link = ctx.link();
    store
      .update_identifier(record, ctx.cancel)
      .await
      .map_err(Error::store)?;
    info!(key = ctx.key(), identifier_id = %original.identifier_id, "identifier updated");
  }
  Ok(())
}
