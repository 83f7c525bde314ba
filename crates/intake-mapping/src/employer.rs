//! Employment and employer projections.
//!
//! On the wire an employer is a name, an address and a flat list of phones.
//! In storage the employment row holds the employer's address and its
//! primary phone, fax and contact phone directly, and every other phone is a
//! separate employment-contact record carrying a numeric phone-type code.

use intake_core::{
  codes::TelephoneNumberType,
  entity::{EmploymentContactEntity, EmploymentEntity, EmploymentRecord},
  wire::{Address, Employer, Employment, Phone},
};

use crate::dates::{date_slots, reference_dates};

pub const PRIMARY_PHONE: &str = "primaryPhone";
pub const PRIMARY_FAX: &str = "primaryFax";
pub const PRIMARY_CONTACT_PHONE: &str = "primaryContactPhone";

fn is_primary(phone: &Phone) -> bool {
  matches!(
    phone.kind.as_deref(),
    Some(PRIMARY_PHONE | PRIMARY_FAX | PRIMARY_CONTACT_PHONE)
  )
}

fn non_empty(s: &Option<String>) -> Option<&str> {
  s.as_deref().filter(|s| !s.is_empty())
}

// ─── Wire → storage ──────────────────────────────────────────────────────────

pub fn employment_entity(employment: &Employment) -> EmploymentEntity {
  let employer = employment.employer.as_ref();
  let address = employer.and_then(|e| e.address.as_ref());
  let primary = |label: &str| {
    employer.and_then(|e| e.phones.iter().find(|p| p.kind.as_deref() == Some(label)))
  };
  let phone = primary(PRIMARY_PHONE);
  let contact_phone = primary(PRIMARY_CONTACT_PHONE);

  EmploymentEntity {
    employer_name:             employer.and_then(|e| e.name.clone()),
    occupation:                employment.occupation.clone(),
    website:                   employment.website.clone(),
    contact_person:            employer.and_then(|e| e.contact_person.clone()),
    primary_phone_number:      phone.and_then(|p| p.phone_number.clone()),
    primary_phone_extension:   phone.and_then(|p| p.extension.clone()),
    primary_fax:               primary(PRIMARY_FAX).and_then(|p| p.phone_number.clone()),
    primary_contact_phone:     contact_phone.and_then(|p| p.phone_number.clone()),
    primary_contact_phone_ext: contact_phone.and_then(|p| p.extension.clone()),
    address_line1:             address.and_then(|a| a.address_line1.clone()),
    address_line2:             address.and_then(|a| a.address_line2.clone()),
    address_line3:             address.and_then(|a| a.address_line3.clone()),
    city:                      address.and_then(|a| a.city.clone()),
    country_subdivision_text:  address.and_then(|a| a.state_province.clone()),
    country_text:              address.and_then(|a| a.country_region.clone()),
    postal_code:               address.and_then(|a| a.zip_postal_code.clone()),
    dates:                     date_slots(&employment.reference_dates),
    information_source:        None,
    is_created_by_agency:      false,
  }
}

/// The employer phones that become employment-contact records. The
/// `primary*` phones live on the employment row instead.
pub fn contact_phones(employer: &Employer) -> impl Iterator<Item = &Phone> {
  employer.phones.iter().filter(|p| !is_primary(p))
}

/// A wire phone as an employment contact. A phone typed `Fax` fills the fax
/// number; anything else fills the phone number.
pub fn employment_contact_entity(phone: &Phone) -> EmploymentContactEntity {
  let kind = phone.kind.as_deref().and_then(TelephoneNumberType::from_label);
  let is_fax = kind == Some(TelephoneNumberType::Fax);

  EmploymentContactEntity {
    contact_name:    phone.contact_name.clone(),
    phone_number:    if is_fax { None } else { phone.phone_number.clone() },
    phone_extension: if is_fax { None } else { phone.extension.clone() },
    fax_number:      if is_fax { phone.phone_number.clone() } else { None },
    phone_type:      kind.map(TelephoneNumberType::code),
    description:     phone.description.clone(),
  }
}

// ─── Storage → wire ──────────────────────────────────────────────────────────

/// Straight field copy of the employment's address columns.
pub fn employer_address(employment: &EmploymentEntity) -> Address {
  Address {
    address_line1:   employment.address_line1.clone(),
    address_line2:   employment.address_line2.clone(),
    address_line3:   employment.address_line3.clone(),
    city:            employment.city.clone(),
    state_province:  employment.country_subdivision_text.clone(),
    country_region:  employment.country_text.clone(),
    zip_postal_code: employment.postal_code.clone(),
    ..Address::default()
  }
}

/// Flatten the employer's primary numbers and named contacts into one phone
/// list.
///
/// Each contact contributes up to two entries, decided independently: one
/// for a non-empty phone number, typed by its code, and one for a non-empty
/// fax number, typed `Fax` when the contact has no code.
pub fn employer_phones(
  employment: &EmploymentEntity,
  contacts: &[EmploymentContactEntity],
) -> Vec<Phone> {
  let mut phones = Vec::new();

  if let Some(number) = non_empty(&employment.primary_phone_number) {
    phones.push(Phone {
      phone_number: Some(number.to_owned()),
      extension: employment.primary_phone_extension.clone(),
      kind: Some(PRIMARY_PHONE.to_owned()),
      ..Phone::default()
    });
  }
  if let Some(number) = non_empty(&employment.primary_fax) {
    phones.push(Phone {
      phone_number: Some(number.to_owned()),
      kind: Some(PRIMARY_FAX.to_owned()),
      ..Phone::default()
    });
  }
  if let Some(number) = non_empty(&employment.primary_contact_phone) {
    phones.push(Phone {
      phone_number: Some(number.to_owned()),
      extension: employment.primary_contact_phone_ext.clone(),
      kind: Some(PRIMARY_CONTACT_PHONE.to_owned()),
      ..Phone::default()
    });
  }

  for contact in contacts {
    let coded = contact
      .phone_type
      .and_then(TelephoneNumberType::from_code)
      .map(|t| t.to_string());

    if let Some(number) = non_empty(&contact.phone_number) {
      phones.push(Phone {
        phone_number: Some(number.to_owned()),
        extension: contact.phone_extension.clone(),
        kind: coded.clone(),
        contact_name: contact.contact_name.clone(),
        description: contact.description.clone(),
        ..Phone::default()
      });
    }
    if let Some(number) = non_empty(&contact.fax_number) {
      let kind = match contact.phone_type {
        None => Some(TelephoneNumberType::Fax.to_string()),
        Some(_) => coded.clone(),
      };
      phones.push(Phone {
        phone_number: Some(number.to_owned()),
        kind,
        contact_name: contact.contact_name.clone(),
        description: contact.description.clone(),
        ..Phone::default()
      });
    }
  }

  phones
}

/// A stored employment back in wire form, contacts included when loaded.
pub fn employment_from_record(record: &EmploymentRecord) -> Employment {
  let entity = &record.entity;
  let contacts: Vec<EmploymentContactEntity> = record
    .contacts
    .iter()
    .flatten()
    .map(|c| c.entity.clone())
    .collect();

  Employment {
    occupation:      entity.occupation.clone(),
    website:         entity.website.clone(),
    employer:        Some(Employer {
      name:           entity.employer_name.clone(),
      contact_person: entity.contact_person.clone(),
      address:        Some(employer_address(entity)),
      phones:         employer_phones(entity, &contacts),
    }),
    reference_dates: reference_dates(&entity.dates),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn employment_row() -> EmploymentEntity {
    EmploymentEntity {
      employer_name: Some("Acme Logging".into()),
      primary_phone_number: Some("555-1111".into()),
      primary_phone_extension: Some("10".into()),
      primary_fax: Some("555-2222".into()),
      ..EmploymentEntity::default()
    }
  }

  fn jane() -> EmploymentContactEntity {
    EmploymentContactEntity {
      contact_name: Some("Jane".into()),
      phone_number: Some("555-3333".into()),
      phone_type: Some(1),
      ..EmploymentContactEntity::default()
    }
  }

  #[test]
  fn primary_numbers_and_contact_flatten_to_three_phones() {
    let phones = employer_phones(&employment_row(), &[jane()]);
    assert_eq!(phones.len(), 3);

    assert_eq!(phones[0].phone_number.as_deref(), Some("555-1111"));
    assert_eq!(phones[0].extension.as_deref(), Some("10"));
    assert_eq!(phones[0].kind.as_deref(), Some(PRIMARY_PHONE));
    assert_eq!(phones[0].contact_name, None);

    assert_eq!(phones[1].phone_number.as_deref(), Some("555-2222"));
    assert_eq!(phones[1].kind.as_deref(), Some(PRIMARY_FAX));

    assert_eq!(phones[2].phone_number.as_deref(), Some("555-3333"));
    assert_eq!(phones[2].kind.as_deref(), Some("Work"));
    assert_eq!(phones[2].contact_name.as_deref(), Some("Jane"));
  }

  #[test]
  fn contact_fax_without_code_defaults_to_fax() {
    let contact = EmploymentContactEntity {
      contact_name: Some("Raj".into()),
      fax_number: Some("555-4444".into()),
      ..EmploymentContactEntity::default()
    };
    let phones = employer_phones(&EmploymentEntity::default(), &[contact]);
    assert_eq!(phones.len(), 1);
    assert_eq!(phones[0].kind.as_deref(), Some("Fax"));
    assert_eq!(phones[0].contact_name.as_deref(), Some("Raj"));
  }

  #[test]
  fn contact_with_phone_and_fax_yields_two_entries() {
    let contact = EmploymentContactEntity {
      fax_number: Some("555-4444".into()),
      ..jane()
    };
    let phones = employer_phones(&EmploymentEntity::default(), &[contact]);
    assert_eq!(phones.len(), 2);
    // The code applies to both entries when present.
    assert!(phones.iter().all(|p| p.kind.as_deref() == Some("Work")));
  }

  #[test]
  fn empty_numbers_are_skipped() {
    let contact = EmploymentContactEntity {
      contact_name: Some("Nobody".into()),
      phone_number: Some(String::new()),
      ..EmploymentContactEntity::default()
    };
    let row = EmploymentEntity {
      primary_phone_number: Some(String::new()),
      ..EmploymentEntity::default()
    };
    assert!(employer_phones(&row, &[contact]).is_empty());
  }

  #[test]
  fn unknown_code_leaves_type_empty() {
    let contact = EmploymentContactEntity { phone_type: Some(99), ..jane() };
    let phones = employer_phones(&EmploymentEntity::default(), &[contact]);
    assert_eq!(phones[0].kind, None);
  }

  #[test]
  fn address_is_a_field_copy() {
    let row = EmploymentEntity {
      address_line1: Some("1 Mill Rd".into()),
      city: Some("Nanaimo".into()),
      country_subdivision_text: Some("BC".into()),
      country_text: Some("Canada".into()),
      postal_code: Some("V9R 1A1".into()),
      ..EmploymentEntity::default()
    };
    let a = employer_address(&row);
    assert_eq!(a.address_line1.as_deref(), Some("1 Mill Rd"));
    assert_eq!(a.city.as_deref(), Some("Nanaimo"));
    assert_eq!(a.state_province.as_deref(), Some("BC"));
    assert_eq!(a.country_region.as_deref(), Some("Canada"));
    assert_eq!(a.zip_postal_code.as_deref(), Some("V9R 1A1"));
  }

  #[test]
  fn fax_typed_phone_becomes_contact_fax() {
    let phone = Phone {
      phone_number: Some("555-9999".into()),
      extension: Some("7".into()),
      kind: Some("fax".into()),
      contact_name: Some("Lee".into()),
      ..Phone::default()
    };
    let c = employment_contact_entity(&phone);
    assert_eq!(c.fax_number.as_deref(), Some("555-9999"));
    assert_eq!(c.phone_number, None);
    assert_eq!(c.phone_extension, None);
    assert_eq!(c.phone_type, Some(TelephoneNumberType::Fax.code()));
  }

  #[test]
  fn primary_phones_fill_employment_row_not_contacts() {
    let employer = Employer {
      name: Some("Acme".into()),
      phones: vec![
        Phone {
          phone_number: Some("555-1111".into()),
          extension: Some("10".into()),
          kind: Some(PRIMARY_PHONE.into()),
          ..Phone::default()
        },
        Phone {
          phone_number: Some("555-3333".into()),
          kind: Some("Work".into()),
          contact_name: Some("Jane".into()),
          ..Phone::default()
        },
      ],
      ..Employer::default()
    };
    let employment = Employment { employer: Some(employer.clone()), ..Employment::default() };

    let row = employment_entity(&employment);
    assert_eq!(row.primary_phone_number.as_deref(), Some("555-1111"));
    assert_eq!(row.primary_phone_extension.as_deref(), Some("10"));
    assert_eq!(row.employer_name.as_deref(), Some("Acme"));

    let contacts: Vec<_> = contact_phones(&employer).collect();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].contact_name.as_deref(), Some("Jane"));
  }
}
