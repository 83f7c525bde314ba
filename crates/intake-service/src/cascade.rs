//! Create-style uploads of the person-scoped collections.
//!
//! Used by the create flow for everything, and by the update flow for the
//! collections that are never matched against existing records.

use intake_core::{
  cancel::CancelSignal,
  codes::{InformationSource, OwnerType},
  entity::{PersonLink, PersonRecord, SearchRequestRecord},
  store::SearchRequestStore,
  wire::{Employment, Person, PersonalIdentifier},
};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// State shared by every step of one create or update call.
pub(crate) struct RequestContext<'a> {
  pub search_request: SearchRequestRecord,
  pub person:         PersonRecord,
  pub cancel:         &'a CancelSignal,
}

impl RequestContext<'_> {
  pub fn link(&self) -> PersonLink {
    PersonLink {
      search_request_id: self.search_request.search_request_id,
      person_id:         self.person.person_id,
    }
  }

  pub fn key(&self) -> &str {
    self.search_request.entity.search_request_key.as_deref().unwrap_or_default()
  }
}

fn sought(owner: &OwnerType) -> bool { *owner == OwnerType::PersonSought }

pub(crate) async fn upload_identifiers<S: SearchRequestStore>(
  store: &S,
  person: &Person,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let mut count = 0usize;
  for id in person.identifiers.iter().filter(|i| sought(&i.owner)) {
    create_identifier(store, id, ctx).await?;
    count += 1;
  }
  info!(key = ctx.key(), count, "identifiers uploaded");
  Ok(())
}

pub(crate) async fn create_identifier<S: SearchRequestStore>(
  store: &S,
  id: &PersonalIdentifier,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let mut entity = intake_mapping::identifier_entity(id);
  entity.information_source = Some(InformationSource::Request);
  entity.is_created_by_agency = true;
  let created = store
    .create_identifier(ctx.link(), entity, ctx.cancel)
    .await
    .map_err(Error::store)?;
  debug!(key = ctx.key(), identifier_id = %created.identifier_id, "identifier created");
  Ok(())
}

pub(crate) async fn upload_addresses<S: SearchRequestStore>(
  store: &S,
  person: &Person,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let mut count = 0usize;
  for address in person.addresses.iter().filter(|a| sought(&a.owner)) {
    let mut entity = intake_mapping::address_entity(address);
    entity.information_source = Some(InformationSource::Request);
    entity.is_created_by_agency = true;
    store
      .create_address(ctx.link(), entity, ctx.cancel)
      .await
      .map_err(Error::store)?;
    count += 1;
  }
  info!(key = ctx.key(), count, "addresses uploaded");
  Ok(())
}

pub(crate) async fn upload_phones<S: SearchRequestStore>(
  store: &S,
  person: &Person,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let mut count = 0usize;
  for phone in person.phones.iter().filter(|p| sought(&p.owner)) {
    let mut entity = intake_mapping::phone_entity(phone);
    entity.information_source = Some(InformationSource::Request);
    entity.is_created_by_agency = true;
    store
      .create_phone_number(ctx.link(), entity, ctx.cancel)
      .await
      .map_err(Error::store)?;
    count += 1;
  }
  info!(key = ctx.key(), count, "phone numbers uploaded");
  Ok(())
}

/// Every employment, each followed by its employer's non-primary phones as
/// employment contacts.
pub(crate) async fn upload_employments<S: SearchRequestStore>(
  store: &S,
  person: &Person,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  for employment in &person.employments {
    create_employment(store, employment, ctx).await?;
  }
  info!(key = ctx.key(), count = person.employments.len(), "employments uploaded");
  Ok(())
}

async fn create_employment<S: SearchRequestStore>(
  store: &S,
  employment: &Employment,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let mut entity = intake_mapping::employment_entity(employment);
  entity.information_source = Some(InformationSource::Request);
  entity.is_created_by_agency = true;
  let created = store
    .create_employment(ctx.link(), entity, ctx.cancel)
    .await
    .map_err(Error::store)?;
  info!(key = ctx.key(), employment_id = %created.employment_id, "employment created");

  upload_employment_contacts(store, created.employment_id, employment, ctx).await
}

pub(crate) async fn upload_employment_contacts<S: SearchRequestStore>(
  store: &S,
  employment_id: uuid::Uuid,
  employment: &Employment,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let Some(employer) = &employment.employer else {
    return Ok(());
  };
  let mut count = 0usize;
  for phone in intake_mapping::contact_phones(employer) {
    let entity = intake_mapping::employment_contact_entity(phone);
    store
      .create_employment_contact(employment_id, entity, ctx.cancel)
      .await
      .map_err(Error::store)?;
    count += 1;
  }
  info!(key = ctx.key(), %employment_id, count, "employment contacts uploaded");
  Ok(())
}

pub(crate) async fn upload_related_persons<S: SearchRequestStore>(
  store: &S,
  person: &Person,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  for related in &person.related_persons {
    let mut entity = intake_mapping::related_person_entity(related);
    entity.information_source = Some(InformationSource::Request);
    entity.is_created_by_agency = true;
    store
      .create_related_person(ctx.link(), entity, ctx.cancel)
      .await
      .map_err(Error::store)?;
  }
  info!(key = ctx.key(), count = person.related_persons.len(), "related persons uploaded");
  Ok(())
}

pub(crate) async fn upload_aliases<S: SearchRequestStore>(
  store: &S,
  person: &Person,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  let mut count = 0usize;
  for name in person.names.iter().filter(|n| sought(&n.owner)) {
    let mut entity = intake_mapping::alias_entity(name);
    entity.information_source = Some(InformationSource::Request);
    entity.is_created_by_agency = true;
    store
      .create_alias(ctx.link(), entity, ctx.cancel)
      .await
      .map_err(Error::store)?;
    count += 1;
  }
  info!(key = ctx.key(), count, "aliases uploaded");
  Ok(())
}

/// The tail of the update flow: collections appended rather than matched.
pub(crate) async fn upload_appended<S: SearchRequestStore>(
  store: &S,
  person: &Person,
  ctx: &RequestContext<'_>,
) -> Result<()> {
  upload_addresses(store, person, ctx).await?;
  upload_phones(store, person, ctx).await?;
  upload_related_persons(store, person, ctx).await?;
  upload_aliases(store, person, ctx).await
}
