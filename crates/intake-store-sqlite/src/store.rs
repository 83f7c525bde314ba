//! [`SqliteStore`], the SQLite implementation of [`SearchRequestStore`].

use std::{future::Future, path::Path};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use serde::Serialize;
use uuid::Uuid;

use intake_core::{
  cancel::CancelSignal,
  codes::RequestStatus,
  entity::{
    AddressEntity, AddressRecord, AliasEntity, AliasRecord,
    EmploymentContactEntity, EmploymentContactRecord, EmploymentEntity,
    EmploymentRecord, IdentifierEntity, IdentifierRecord, NotesEntity,
    NotesRecord, PersonEntity, PersonLink, PersonRecord, PhoneNumberEntity,
    PhoneNumberRecord, RelatedPersonEntity, RelatedPersonRecord,
    SearchRequestEntity, SearchRequestRecord,
  },
  store::SearchRequestStore,
};

use crate::{
  Error, Result,
  encode::{
    Item, ItemKind, RawContact, RawItem, RawNotes, RawPerson, RawSearchRequest,
    encode_dt, encode_json, encode_status, encode_uuid,
  },
  schema::SCHEMA,
};

// ─── Row readers ─────────────────────────────────────────────────────────────

const REQUEST_COLUMNS: &str =
  "SELECT search_request_id, status, is_duplicated, entity_json FROM search_requests";
const PERSON_COLUMNS: &str =
  "SELECT person_id, search_request_id, is_duplicated, entity_json FROM persons";
const ITEM_COLUMNS: &str = "SELECT item_id, person_id, search_request_id, kind, \
                            is_duplicated, entity_json FROM person_items";

fn read_request(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSearchRequest> {
  Ok(RawSearchRequest {
    search_request_id: row.get(0)?,
    status:            row.get(1)?,
    is_duplicated:     row.get(2)?,
    entity_json:       row.get(3)?,
  })
}

fn read_person(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPerson> {
  Ok(RawPerson {
    person_id:         row.get(0)?,
    search_request_id: row.get(1)?,
    is_duplicated:     row.get(2)?,
    entity_json:       row.get(3)?,
  })
}

fn read_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawItem> {
  Ok(RawItem {
    item_id:           row.get(0)?,
    person_id:         row.get(1)?,
    search_request_id: row.get(2)?,
    kind:              row.get(3)?,
    is_duplicated:     row.get(4)?,
    entity_json:       row.get(5)?,
  })
}

fn read_contact(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawContact> {
  Ok(RawContact {
    employment_contact_id: row.get(0)?,
    employment_id:         row.get(1)?,
    entity_json:           row.get(2)?,
  })
}

fn read_notes(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawNotes> {
  Ok(RawNotes {
    notes_id:          row.get(0)?,
    search_request_id: row.get(1)?,
    entity_json:       row.get(2)?,
  })
}

fn employment_record(
  item: Item<EmploymentEntity>,
  contacts: &[EmploymentContactRecord],
) -> EmploymentRecord {
  EmploymentRecord {
    employment_id: item.id,
    link:          item.link,
    is_duplicated: item.is_duplicated,
    contacts:      Some(
      contacts
        .iter()
        .filter(|c| c.employment_id == item.id)
        .cloned()
        .collect(),
    ),
    entity:        item.entity,
  }
}

/// Sort a person's raw item rows into its typed collections.
fn assemble_person(
  raw: RawPerson,
  items: Vec<RawItem>,
  contacts: Vec<RawContact>,
) -> Result<PersonRecord> {
  let mut person = raw.into_record()?;
  let contacts = contacts
    .into_iter()
    .map(RawContact::into_record)
    .collect::<Result<Vec<_>>>()?;

  let mut identifiers = Vec::new();
  let mut addresses = Vec::new();
  let mut phone_numbers = Vec::new();
  let mut employments = Vec::new();
  let mut related_persons = Vec::new();
  let mut aliases = Vec::new();

  for item in items {
    match item.kind()? {
      ItemKind::Identifier => {
        let i = item.decode::<IdentifierEntity>()?;
        identifiers.push(IdentifierRecord { identifier_id: i.id, link: i.link, entity: i.entity });
      }
      ItemKind::Address => {
        let i = item.decode::<AddressEntity>()?;
        addresses.push(AddressRecord { address_id: i.id, link: i.link, entity: i.entity });
      }
      ItemKind::PhoneNumber => {
        let i = item.decode::<PhoneNumberEntity>()?;
        phone_numbers.push(PhoneNumberRecord {
          phone_number_id: i.id,
          link:            i.link,
          entity:          i.entity,
        });
      }
      ItemKind::Employment => {
        employments.push(employment_record(item.decode()?, &contacts));
      }
      ItemKind::RelatedPerson => {
        let i = item.decode::<RelatedPersonEntity>()?;
        related_persons.push(RelatedPersonRecord {
          related_person_id: i.id,
          link:              i.link,
          entity:            i.entity,
        });
      }
      ItemKind::Alias => {
        let i = item.decode::<AliasEntity>()?;
        aliases.push(AliasRecord { alias_id: i.id, link: i.link, entity: i.entity });
      }
    }
  }

  person.identifiers = Some(identifiers);
  person.addresses = Some(addresses);
  person.phone_numbers = Some(phone_numbers);
  person.employments = Some(employments);
  person.related_persons = Some(related_persons);
  person.aliases = Some(aliases);
  Ok(person)
}

/// Fail at once if `cancel` has fired, otherwise race `op` against it.
pub(crate) async fn guarded<T, E>(
  cancel: &CancelSignal,
  op: impl Future<Output = Result<T, E>>,
) -> Result<T>
where
  Error: From<E>,
{
  if cancel.is_cancelled() {
    return Err(Error::Cancelled);
  }
  tokio::select! {
    biased;
    () = cancel.cancelled() => Err(Error::Cancelled),
    result = op => Ok(result?),
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A search request store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The request with its persons (shallow) and notes.
  async fn fetch_request(&self, key: String) -> Result<Option<SearchRequestRecord>> {
    let raw = self
      .conn
      .call(move |conn| {
        let request = conn
          .query_row(
            &format!("{REQUEST_COLUMNS} WHERE search_request_key = ?1"),
            rusqlite::params![key],
            read_request,
          )
          .optional()?;
        let Some(request) = request else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(&format!(
          "{PERSON_COLUMNS} WHERE search_request_id = ?1 ORDER BY rowid"
        ))?;
        let persons = stmt
          .query_map(rusqlite::params![request.search_request_id], read_person)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(
          "SELECT notes_id, search_request_id, entity_json FROM notes
           WHERE search_request_id = ?1 ORDER BY rowid",
        )?;
        let notes = stmt
          .query_map(rusqlite::params![request.search_request_id], read_notes)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((request, persons, notes)))
      })
      .await?;

    let Some((request, persons, notes)) = raw else {
      return Ok(None);
    };
    let mut record = request.into_record()?;
    record.persons = Some(
      persons
        .into_iter()
        .map(RawPerson::into_record)
        .collect::<Result<_>>()?,
    );
    record.notes = Some(
      notes
        .into_iter()
        .map(RawNotes::into_record)
        .collect::<Result<_>>()?,
    );
    Ok(Some(record))
  }

  async fn fetch_person(&self, person_id: Uuid) -> Result<Option<PersonRecord>> {
    let id_str = encode_uuid(person_id);

    let raw = self
      .conn
      .call(move |conn| {
        let person = conn
          .query_row(
            &format!("{PERSON_COLUMNS} WHERE person_id = ?1"),
            rusqlite::params![id_str],
            read_person,
          )
          .optional()?;
        let Some(person) = person else {
          return Ok(None);
        };

        let mut stmt =
          conn.prepare(&format!("{ITEM_COLUMNS} WHERE person_id = ?1 ORDER BY rowid"))?;
        let items = stmt
          .query_map(rusqlite::params![id_str], read_item)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(
          "SELECT c.employment_contact_id, c.employment_id, c.entity_json
           FROM employment_contacts c
           JOIN person_items i ON i.item_id = c.employment_id
           WHERE i.person_id = ?1
           ORDER BY c.rowid",
        )?;
        let contacts = stmt
          .query_map(rusqlite::params![id_str], read_contact)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((person, items, contacts)))
      })
      .await?;

    raw
      .map(|(person, items, contacts)| assemble_person(person, items, contacts))
      .transpose()
  }

  async fn fetch_employment(&self, employment_id: Uuid) -> Result<Option<EmploymentRecord>> {
    let id_str = encode_uuid(employment_id);
    let kind = ItemKind::Employment.as_str();

    let raw = self
      .conn
      .call(move |conn| {
        let item = conn
          .query_row(
            &format!("{ITEM_COLUMNS} WHERE item_id = ?1 AND kind = ?2"),
            rusqlite::params![id_str, kind],
            read_item,
          )
          .optional()?;
        let Some(item) = item else {
          return Ok(None);
        };

        let mut stmt = conn.prepare(
          "SELECT employment_contact_id, employment_id, entity_json
           FROM employment_contacts WHERE employment_id = ?1 ORDER BY rowid",
        )?;
        let contacts = stmt
          .query_map(rusqlite::params![id_str], read_contact)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(Some((item, contacts)))
      })
      .await?;

    let Some((item, contacts)) = raw else {
      return Ok(None);
    };
    let contacts = contacts
      .into_iter()
      .map(RawContact::into_record)
      .collect::<Result<Vec<_>>>()?;
    Ok(Some(employment_record(item.decode()?, &contacts)))
  }

  async fn insert_request(&self, record: &SearchRequestRecord) -> Result<()> {
    let id_str      = encode_uuid(record.search_request_id);
    let key         = record.entity.search_request_key.clone();
    let status_str  = encode_status(record.status);
    let entity_json = encode_json(&record.entity)?;
    let now_str     = encode_dt(Utc::now());

    let lookup = key.clone();
    let inserted = self
      .conn
      .call(move |conn| {
        let taken = conn
          .query_row(
            "SELECT 1 FROM search_requests WHERE search_request_key = ?1",
            rusqlite::params![lookup],
            |_| Ok(true),
          )
          .optional()?
          .unwrap_or(false);
        if taken {
          return Ok(false);
        }

        conn.execute(
          "INSERT INTO search_requests (
             search_request_id, search_request_key, status, is_duplicated,
             entity_json, created_at, updated_at
           ) VALUES (?1, ?2, ?3, 0, ?4, ?5, ?5)",
          rusqlite::params![id_str, lookup, status_str, entity_json, now_str],
        )?;
        Ok(true)
      })
      .await?;

    if !inserted {
      return Err(Error::DuplicateKey(key.unwrap_or_default()));
    }
    Ok(())
  }

  async fn insert_item<T: Serialize>(
    &self,
    kind: ItemKind,
    link: PersonLink,
    entity: &T,
  ) -> Result<Uuid> {
    let item_id     = Uuid::new_v4();
    let id_str      = encode_uuid(item_id);
    let person_str  = encode_uuid(link.person_id);
    let request_str = encode_uuid(link.search_request_id);
    let kind_str    = kind.as_str();
    let entity_json = encode_json(entity)?;
    let now_str     = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO person_items (
             item_id, person_id, search_request_id, kind, is_duplicated,
             entity_json, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?6, ?6)",
          rusqlite::params![id_str, person_str, request_str, kind_str, entity_json, now_str],
        )?;
        Ok(())
      })
      .await?;
    Ok(item_id)
  }

  async fn update_item<T: Serialize>(
    &self,
    kind: ItemKind,
    item: Item<&T>,
  ) -> Result<()> {
    let id_str      = encode_uuid(item.id);
    let person_str  = encode_uuid(item.link.person_id);
    let request_str = encode_uuid(item.link.search_request_id);
    let kind_str    = kind.as_str();
    let duplicated  = item.is_duplicated;
    let entity_json = encode_json(item.entity)?;
    let now_str     = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE person_items
           SET person_id = ?2, search_request_id = ?3, is_duplicated = ?4,
               entity_json = ?5, updated_at = ?6
           WHERE item_id = ?1 AND kind = ?7",
          rusqlite::params![
            id_str,
            person_str,
            request_str,
            duplicated,
            entity_json,
            now_str,
            kind_str,
          ],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(Error::NotFound { kind: kind.as_str(), id: item.id });
    }
    Ok(())
  }
}

// ─── SearchRequestStore impl ─────────────────────────────────────────────────

impl SearchRequestStore for SqliteStore {
  type Error = Error;

  // ── Search requests ───────────────────────────────────────────────────────

  async fn get_search_request(
    &self,
    key: &str,
    cancel: &CancelSignal,
  ) -> Result<Option<SearchRequestRecord>> {
    guarded(cancel, self.fetch_request(key.to_owned())).await
  }

  async fn create_search_request(
    &self,
    entity: SearchRequestEntity,
    cancel: &CancelSignal,
  ) -> Result<SearchRequestRecord> {
    let record = SearchRequestRecord {
      search_request_id: Uuid::new_v4(),
      status: RequestStatus::Active,
      is_duplicated: false,
      entity,
      persons: None,
      notes: None,
    };
    guarded(cancel, self.insert_request(&record)).await?;
    Ok(record)
  }

  async fn update_search_request(
    &self,
    record: SearchRequestRecord,
    cancel: &CancelSignal,
  ) -> Result<SearchRequestRecord> {
    let id_str      = encode_uuid(record.search_request_id);
    let key         = record.entity.search_request_key.clone();
    let status_str  = encode_status(record.status);
    let duplicated  = record.is_duplicated;
    let entity_json = encode_json(&record.entity)?;
    let now_str     = encode_dt(Utc::now());

    let changed = guarded(
      cancel,
      self.conn.call(move |conn| {
        Ok(conn.execute(
          "UPDATE search_requests
           SET search_request_key = ?2, status = ?3, is_duplicated = ?4,
               entity_json = ?5, updated_at = ?6
           WHERE search_request_id = ?1",
          rusqlite::params![id_str, key, status_str, duplicated, entity_json, now_str],
        )?)
      }),
    )
    .await?;

    if changed == 0 {
      return Err(Error::NotFound {
        kind: "search request",
        id:   record.search_request_id,
      });
    }
    Ok(record)
  }

  async fn cancel_search_request(
    &self,
    key: &str,
    cancel: &CancelSignal,
  ) -> Result<SearchRequestRecord> {
    let key_str    = key.to_owned();
    let status_str = encode_status(RequestStatus::Cancelled);
    let now_str    = encode_dt(Utc::now());

    let changed = guarded(
      cancel,
      self.conn.call(move |conn| {
        Ok(conn.execute(
          "UPDATE search_requests SET status = ?2, updated_at = ?3
           WHERE search_request_key = ?1",
          rusqlite::params![key_str, status_str, now_str],
        )?)
      }),
    )
    .await?;

    if changed == 0 {
      return Err(Error::UnknownKey(key.to_owned()));
    }
    guarded(cancel, self.fetch_request(key.to_owned()))
      .await?
      .ok_or_else(|| Error::UnknownKey(key.to_owned()))
  }

  // ── Persons ───────────────────────────────────────────────────────────────

  async fn get_person(
    &self,
    person_id: Uuid,
    cancel: &CancelSignal,
  ) -> Result<Option<PersonRecord>> {
    guarded(cancel, self.fetch_person(person_id)).await
  }

  async fn save_person(
    &self,
    search_request_id: Uuid,
    entity: PersonEntity,
    cancel: &CancelSignal,
  ) -> Result<PersonRecord> {
    let record = PersonRecord {
      person_id: Uuid::new_v4(),
      search_request_id,
      is_duplicated: false,
      entity,
      identifiers: None,
      addresses: None,
      phone_numbers: None,
      employments: None,
      related_persons: None,
      aliases: None,
    };

    let id_str      = encode_uuid(record.person_id);
    let request_str = encode_uuid(search_request_id);
    let entity_json = encode_json(&record.entity)?;
    let now_str     = encode_dt(Utc::now());

    guarded(
      cancel,
      self.conn.call(move |conn| {
        conn.execute(
          "INSERT INTO persons (
             person_id, search_request_id, is_duplicated, entity_json,
             created_at, updated_at
           ) VALUES (?1, ?2, 0, ?3, ?4, ?4)",
          rusqlite::params![id_str, request_str, entity_json, now_str],
        )?;
        Ok(())
      }),
    )
    .await?;
    Ok(record)
  }

  async fn update_person(
    &self,
    record: PersonRecord,
    cancel: &CancelSignal,
  ) -> Result<PersonRecord> {
    let id_str      = encode_uuid(record.person_id);
    let request_str = encode_uuid(record.search_request_id);
    let duplicated  = record.is_duplicated;
    let entity_json = encode_json(&record.entity)?;
    let now_str     = encode_dt(Utc::now());

    let changed = guarded(
      cancel,
      self.conn.call(move |conn| {
        Ok(conn.execute(
          "UPDATE persons
           SET search_request_id = ?2, is_duplicated = ?3, entity_json = ?4,
               updated_at = ?5
           WHERE person_id = ?1",
          rusqlite::params![id_str, request_str, duplicated, entity_json, now_str],
        )?)
      }),
    )
    .await?;

    if changed == 0 {
      return Err(Error::NotFound { kind: "person", id: record.person_id });
    }
    Ok(record)
  }

  // ── Person-scoped records ─────────────────────────────────────────────────

  async fn create_identifier(
    &self,
    link: PersonLink,
    entity: IdentifierEntity,
    cancel: &CancelSignal,
  ) -> Result<IdentifierRecord> {
    let identifier_id =
      guarded(cancel, self.insert_item(ItemKind::Identifier, link, &entity)).await?;
    Ok(IdentifierRecord { identifier_id, link, entity })
  }

  async fn update_identifier(
    &self,
    record: IdentifierRecord,
    cancel: &CancelSignal,
  ) -> Result<IdentifierRecord> {
    let item = Item {
      id:            record.identifier_id,
      link:          record.link,
      is_duplicated: false,
      entity:        &record.entity,
    };
    guarded(cancel, self.update_item(ItemKind::Identifier, item)).await?;
    Ok(record)
  }

  async fn create_address(
    &self,
    link: PersonLink,
    entity: AddressEntity,
    cancel: &CancelSignal,
  ) -> Result<AddressRecord> {
    let address_id =
      guarded(cancel, self.insert_item(ItemKind::Address, link, &entity)).await?;
    Ok(AddressRecord { address_id, link, entity })
  }

  async fn create_phone_number(
    &self,
    link: PersonLink,
    entity: PhoneNumberEntity,
    cancel: &CancelSignal,
  ) -> Result<PhoneNumberRecord> {
    let phone_number_id =
      guarded(cancel, self.insert_item(ItemKind::PhoneNumber, link, &entity)).await?;
    Ok(PhoneNumberRecord { phone_number_id, link, entity })
  }

  async fn create_employment(
    &self,
    link: PersonLink,
    entity: EmploymentEntity,
    cancel: &CancelSignal,
  ) -> Result<EmploymentRecord> {
    let employment_id =
      guarded(cancel, self.insert_item(ItemKind::Employment, link, &entity)).await?;
    Ok(EmploymentRecord {
      employment_id,
      link,
      is_duplicated: false,
      entity,
      contacts: None,
    })
  }

  async fn get_employment(
    &self,
    employment_id: Uuid,
    cancel: &CancelSignal,
  ) -> Result<Option<EmploymentRecord>> {
    guarded(cancel, self.fetch_employment(employment_id)).await
  }

  async fn update_employment(
    &self,
    record: EmploymentRecord,
    cancel: &CancelSignal,
  ) -> Result<EmploymentRecord> {
    let item = Item {
      id:            record.employment_id,
      link:          record.link,
      is_duplicated: record.is_duplicated,
      entity:        &record.entity,
    };
    guarded(cancel, self.update_item(ItemKind::Employment, item)).await?;
    Ok(record)
  }

  async fn create_employment_contact(
    &self,
    employment_id: Uuid,
    entity: EmploymentContactEntity,
    cancel: &CancelSignal,
  ) -> Result<EmploymentContactRecord> {
    let record = EmploymentContactRecord {
      employment_contact_id: Uuid::new_v4(),
      employment_id,
      entity,
    };

    let id_str         = encode_uuid(record.employment_contact_id);
    let employment_str = encode_uuid(employment_id);
    let entity_json    = encode_json(&record.entity)?;
    let now_str        = encode_dt(Utc::now());

    guarded(
      cancel,
      self.conn.call(move |conn| {
        conn.execute(
          "INSERT INTO employment_contacts (
             employment_contact_id, employment_id, entity_json, created_at
           ) VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, employment_str, entity_json, now_str],
        )?;
        Ok(())
      }),
    )
    .await?;
    Ok(record)
  }

  async fn create_related_person(
    &self,
    link: PersonLink,
    entity: RelatedPersonEntity,
    cancel: &CancelSignal,
  ) -> Result<RelatedPersonRecord> {
    let related_person_id =
      guarded(cancel, self.insert_item(ItemKind::RelatedPerson, link, &entity)).await?;
    Ok(RelatedPersonRecord { related_person_id, link, entity })
  }

  async fn update_related_person(
    &self,
    record: RelatedPersonRecord,
    cancel: &CancelSignal,
  ) -> Result<RelatedPersonRecord> {
    let item = Item {
      id:            record.related_person_id,
      link:          record.link,
      is_duplicated: false,
      entity:        &record.entity,
    };
    guarded(cancel, self.update_item(ItemKind::RelatedPerson, item)).await?;
    Ok(record)
  }

  async fn create_alias(
    &self,
    link: PersonLink,
    entity: AliasEntity,
    cancel: &CancelSignal,
  ) -> Result<AliasRecord> {
    let alias_id = guarded(cancel, self.insert_item(ItemKind::Alias, link, &entity)).await?;
    Ok(AliasRecord { alias_id, link, entity })
  }

  // ── Notes ─────────────────────────────────────────────────────────────────

  async fn create_notes(
    &self,
    search_request_id: Uuid,
    entity: NotesEntity,
    cancel: &CancelSignal,
  ) -> Result<NotesRecord> {
    let record = NotesRecord { notes_id: Uuid::new_v4(), search_request_id, entity };

    let id_str      = encode_uuid(record.notes_id);
    let request_str = encode_uuid(search_request_id);
    let entity_json = encode_json(&record.entity)?;
    let now_str     = encode_dt(Utc::now());

    guarded(
      cancel,
      self.conn.call(move |conn| {
        conn.execute(
          "INSERT INTO notes (notes_id, search_request_id, entity_json, created_at)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, request_str, entity_json, now_str],
        )?;
        Ok(())
      }),
    )
    .await?;
    Ok(record)
  }
}
