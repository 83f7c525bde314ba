//! Reference dates ↔ the two positional date slots.

use chrono::{DateTime, Utc};
use intake_core::{entity::DateSlots, wire::ReferenceDate};

/// Project a reference-date collection onto the flat slots: index 0 fills
/// `date1`, index 1 fills `date2`. A missing index leaves its slot empty; if
/// an index repeats, its first entry wins.
pub fn date_slots(dates: &[ReferenceDate]) -> DateSlots {
  let at = |index: u8| dates.iter().find(|d| d.index == index);
  let first = at(0);
  let second = at(1);

  DateSlots {
    date1:       first.map(|d| d.value),
    date1_label: first.map(|d| d.key.clone()),
    date2:       second.map(|d| d.value),
    date2_label: second.map(|d| d.key.clone()),
  }
}

/// The reverse of [`date_slots`]: each populated slot becomes one entry
/// carrying its positional index. Empty slots produce nothing.
pub fn reference_dates(slots: &DateSlots) -> Vec<ReferenceDate> {
  let slot = |index: u8, value: Option<DateTime<Utc>>, label: &Option<String>| {
    value.map(|value| ReferenceDate {
      index,
      key: label.clone().unwrap_or_default(),
      value,
    })
  };

  [
    slot(0, slots.date1, &slots.date1_label),
    slot(1, slots.date2, &slots.date2_label),
  ]
  .into_iter()
  .flatten()
  .collect()
}
