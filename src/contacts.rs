use std::collections::HashSet;

use crate::Viewer;

/// Reduces a phone number to its ASCII digits so that differently formatted
/// entries of the same number compare equal.
pub fn normalize_phone_number(value: &str) -> String {
    value.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

/// A viewer's registered contacts, keyed by normalized phone number.
#[derive(Debug, Clone, Default)]
pub struct ContactBook {
    numbers: HashSet<String>,
}

impl ContactBook {
    pub fn new<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let numbers = numbers
            .into_iter()
            .map(|number| normalize_phone_number(number.as_ref()))
            .filter(|number| !number.is_empty())
            .collect();
        Self { numbers }
    }

    pub fn for_viewer(viewer: &Viewer) -> Self {
        Self::new(&viewer.contact_phone_numbers)
    }

    pub fn contains(&self, phone_number: &str) -> bool {
        let normalized = normalize_phone_number(phone_number);
        !normalized.is_empty() && self.numbers.contains(&normalized)
    }

    /// Missing numbers are never contacts.
    pub fn contains_opt(&self, phone_number: Option<&str>) -> bool {
        phone_number.map(|number| self.contains(number)).unwrap_or(false)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }
}

/// True when `phone_number` appears in `allowed`, comparing normalized digits.
pub fn is_listed(phone_number: &str, allowed: &[String]) -> bool {
    let normalized = normalize_phone_number(phone_number);
    if normalized.is_empty() {
        return false;
    }
    allowed
        .iter()
        .any(|candidate| normalize_phone_number(candidate) == normalized)
}
