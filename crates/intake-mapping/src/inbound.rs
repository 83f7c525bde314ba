//! Wire → storage projections for the request, the person and the
//! person-scoped items.
//!
//! These produce bare entities. Stamping the information source and the
//! agency flag is the orchestrator's job, since it differs between the
//! create and update flows.

use intake_core::{
  codes::RelatedPersonType,
  entity::{
    AddressEntity, AliasEntity, IdentifierEntity, PersonEntity,
    PhoneNumberEntity, RelatedPersonEntity, SearchRequestEntity,
  },
  wire::{
    Address, Name, Person, PersonalIdentifier, Phone, RelatedPerson,
    SearchRequestOrdered,
  },
};

use crate::dates::date_slots;

/// Status code the backend uses for an active related person or note.
pub const ACTIVE_STATUS_CODE: i32 = 1;

pub fn search_request_entity(ordered: &SearchRequestOrdered) -> SearchRequestEntity {
  let person = ordered.person.as_ref();
  SearchRequestEntity {
    search_request_key:            Some(ordered.search_request_key.clone()),
    original_request_id:           ordered.request_id.clone(),
    requested_at:                  ordered.time_stamp,
    agency_code:                   ordered.agency_code.clone(),
    requester_name:                ordered.requester_name.clone(),
    notes:                         ordered.notes.clone(),
    applicant_first_name:          ordered.applicant_first_name.clone(),
    applicant_last_name:           ordered.applicant_last_name.clone(),
    person_sought_first_name:      person.and_then(|p| p.first_name.clone()),
    person_sought_last_name:       person.and_then(|p| p.last_name.clone()),
    person_sought_date_of_birth:   person.and_then(|p| p.date_of_birth),
    created_by_api:                false,
    send_notification_on_creation: false,
  }
}

pub fn person_entity(person: &Person) -> PersonEntity {
  PersonEntity {
    first_name:           person.first_name.clone(),
    last_name:            person.last_name.clone(),
    middle_name:          person.middle_name.clone(),
    other_name:           person.other_name.clone(),
    date_of_birth:        person.date_of_birth,
    gender:               person.gender.clone(),
    dates:                date_slots(&person.reference_dates),
    information_source:   None,
    is_created_by_agency: false,
  }
}

pub fn identifier_entity(id: &PersonalIdentifier) -> IdentifierEntity {
  IdentifierEntity {
    identification:       id.value.clone(),
    identifier_type:      id.kind,
    issued_by:            id.issued_by.clone(),
    description:          id.description.clone(),
    notes:                id.notes.clone(),
    dates:                date_slots(&id.reference_dates),
    information_source:   None,
    is_created_by_agency: false,
  }
}

pub fn address_entity(address: &Address) -> AddressEntity {
  AddressEntity {
    address_line1:            address.address_line1.clone(),
    address_line2:            address.address_line2.clone(),
    address_line3:            address.address_line3.clone(),
    city:                     address.city.clone(),
    country_subdivision_text: address.state_province.clone(),
    country_text:             address.country_region.clone(),
    postal_code:              address.zip_postal_code.clone(),
    category_text:            address.kind.clone(),
    description:              address.description.clone(),
    information_source:       None,
    is_created_by_agency:     false,
  }
}

pub fn phone_entity(phone: &Phone) -> PhoneNumberEntity {
  PhoneNumberEntity {
    telephone_number:     phone.phone_number.clone(),
    phone_extension:      phone.extension.clone(),
    type_label:           phone.kind.clone(),
    contact_name:         phone.contact_name.clone(),
    description:          phone.description.clone(),
    information_source:   None,
    is_created_by_agency: false,
  }
}

pub fn alias_entity(name: &Name) -> AliasEntity {
  AliasEntity {
    first_name:           name.first_name.clone(),
    last_name:            name.last_name.clone(),
    middle_name:          name.middle_name.clone(),
    other_name:           name.other_name.clone(),
    type_label:           name.kind.clone(),
    description:          name.description.clone(),
    information_source:   None,
    is_created_by_agency: false,
  }
}

pub fn related_person_entity(related: &RelatedPerson) -> RelatedPersonEntity {
  RelatedPersonEntity {
    first_name:           related.first_name.clone(),
    last_name:            related.last_name.clone(),
    middle_name:          related.middle_name.clone(),
    other_name:           related.other_name.clone(),
    person_type:          Some(RelatedPersonType::Relation),
    relation:             related.kind.clone(),
    gender:               related.gender.clone(),
    date_of_birth:        related.date_of_birth,
    description:          related.description.clone(),
    notes:                related.notes.clone(),
    status_code:          None,
    dates:                date_slots(&related.reference_dates),
    information_source:   None,
    is_created_by_agency: false,
  }
}

/// The applicant as a related person, or `None` unless the request carries
/// both a first and a last applicant name.
pub fn applicant_entity(ordered: &SearchRequestOrdered) -> Option<RelatedPersonEntity> {
  let first = ordered.applicant_first_name.as_deref().filter(|s| !s.is_empty())?;
  let last = ordered.applicant_last_name.as_deref().filter(|s| !s.is_empty())?;

  Some(RelatedPersonEntity {
    first_name: Some(first.to_owned()),
    last_name: Some(last.to_owned()),
    person_type: Some(RelatedPersonType::Applicant),
    status_code: Some(ACTIVE_STATUS_CODE),
    ..RelatedPersonEntity::default()
  })
}
