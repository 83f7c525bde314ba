//! Field-level merge of an incoming entity onto a stored one.
//!
//! [`merge_updates`] is a pure function: the stored value is cloned, every
//! field the incoming value actually supplies is overlaid, and the result
//! reports whether anything changed. Callers write only when it did.

/// Overlay `incoming` onto `self`, returning `true` if `self` changed.
///
/// "Supplied" means non-null for `Option` fields and `true` for flags; an
/// absent or default incoming value never clears stored data.
pub trait Overlay {
  fn overlay(&mut self, incoming: &Self) -> bool;
}

impl<T: Clone + PartialEq> Overlay for Option<T> {
  fn overlay(&mut self, incoming: &Self) -> bool {
    match incoming {
      Some(value) if self.as_ref() != Some(value) => {
        *self = Some(value.clone());
        true
      }
      _ => false,
    }
  }
}

impl Overlay for bool {
  fn overlay(&mut self, incoming: &Self) -> bool {
    if *incoming && !*self {
      *self = true;
      true
    } else {
      false
    }
  }
}

/// The outcome of [`merge_updates`].
#[derive(Debug, Clone, PartialEq)]
pub struct Merged<T> {
  pub value:   T,
  /// Set when at least one field took a different value.
  pub changed: bool,
}

/// Clone `existing` and overlay `incoming` onto the copy.
pub fn merge_updates<T: Overlay + Clone>(existing: &T, incoming: &T) -> Merged<T> {
  let mut value = existing.clone();
  let changed = value.overlay(incoming);
  Merged { value, changed }
}

/// Implement [`Overlay`] for a struct by overlaying each listed field.
///
/// Every field is visited even after a change is seen.
#[macro_export]
macro_rules! impl_overlay {
  ($ty:ty { $($field:ident),+ $(,)? }) => {
    impl $crate::merge::Overlay for $ty {
      fn overlay(&mut self, incoming: &Self) -> bool {
        let mut changed = false;
        $(
          changed |= $crate::merge::Overlay::overlay(
            &mut self.$field,
            &incoming.$field,
          );
        )+
        changed
      }
    }
  };
}

#[cfg(test)]
mod tests {
  use super::*;

  #[derive(Debug, Clone, Default, PartialEq)]
  struct Sample {
    name:    Option<String>,
    city:    Option<String>,
    flagged: bool,
  }

  crate::impl_overlay!(Sample { name, city, flagged });

  #[test]
  fn identical_values_report_no_change() {
    let a = Sample { name: Some("Ann".into()), city: None, flagged: true };
    let merged = merge_updates(&a, &a.clone());
    assert!(!merged.changed);
    assert_eq!(merged.value, a);
  }

  #[test]
  fn absent_fields_do_not_clear_stored_values() {
    let stored = Sample { name: Some("Ann".into()), city: Some("Victoria".into()), flagged: true };
    let merged = merge_updates(&stored, &Sample::default());
    assert!(!merged.changed);
    assert_eq!(merged.value, stored);
  }

  #[test]
  fn supplied_difference_is_overlaid() {
    let stored = Sample { name: Some("Ann".into()), city: Some("Victoria".into()), flagged: false };
    let incoming = Sample { name: None, city: Some("Surrey".into()), flagged: true };
    let merged = merge_updates(&stored, &incoming);
    assert!(merged.changed);
    assert_eq!(merged.value.name.as_deref(), Some("Ann"));
    assert_eq!(merged.value.city.as_deref(), Some("Surrey"));
    assert!(merged.value.flagged);
  }

  #[test]
  fn merge_leaves_stored_value_untouched() {
    let stored = Sample { name: Some("Ann".into()), ..Sample::default() };
    let incoming = Sample { name: Some("Bea".into()), ..Sample::default() };
    let _ = merge_updates(&stored, &incoming);
    assert_eq!(stored.name.as_deref(), Some("Ann"));
  }
}
