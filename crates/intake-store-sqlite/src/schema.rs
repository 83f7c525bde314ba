//! SQL schema for the search request store.
//!
//! Executed once at connection startup. Entities are stored as JSON next to
//! the columns needed for lookups and links.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS search_requests (
    search_request_id  TEXT PRIMARY KEY,
    search_request_key TEXT UNIQUE,
    status             TEXT NOT NULL DEFAULT 'active',  -- 'active' | 'cancelled'
    is_duplicated      INTEGER NOT NULL DEFAULT 0,
    entity_json        TEXT NOT NULL,
    created_at         TEXT NOT NULL,
    updated_at         TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS persons (
    person_id         TEXT PRIMARY KEY,
    search_request_id TEXT NOT NULL REFERENCES search_requests(search_request_id),
    is_duplicated     INTEGER NOT NULL DEFAULT 0,
    entity_json       TEXT NOT NULL,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
);

-- Identifiers, addresses, phones, employments, related persons and aliases.
CREATE TABLE IF NOT EXISTS person_items (
    item_id           TEXT PRIMARY KEY,
    person_id         TEXT NOT NULL REFERENCES persons(person_id),
    search_request_id TEXT NOT NULL REFERENCES search_requests(search_request_id),
    kind              TEXT NOT NULL,
    is_duplicated     INTEGER NOT NULL DEFAULT 0,
    entity_json       TEXT NOT NULL,
    created_at        TEXT NOT NULL,
    updated_at        TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS employment_contacts (
    employment_contact_id TEXT PRIMARY KEY,
    employment_id         TEXT NOT NULL REFERENCES person_items(item_id),
    entity_json           TEXT NOT NULL,
    created_at            TEXT NOT NULL
);

-- Notes are append-only.
CREATE TABLE IF NOT EXISTS notes (
    notes_id          TEXT PRIMARY KEY,
    search_request_id TEXT NOT NULL REFERENCES search_requests(search_request_id),
    entity_json       TEXT NOT NULL,
    created_at        TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS persons_request_idx      ON persons(search_request_id);
CREATE INDEX IF NOT EXISTS person_items_person_idx  ON person_items(person_id, kind);
CREATE INDEX IF NOT EXISTS contacts_employment_idx  ON employment_contacts(employment_id);
CREATE INDEX IF NOT EXISTS notes_request_idx        ON notes(search_request_id);

PRAGMA user_version = 1;
";
