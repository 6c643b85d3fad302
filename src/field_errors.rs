//! Field-keyed error lists

use crate::Semigroup;

/// Validation messages grouped by field, in the order fields first failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FieldErrors {
    entries: Vec<(String, Vec<String>)>,
}

impl FieldErrors {
    /// An empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message to the list of `field`.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        let field = field.into();
        let message = message.into();
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, messages)) => messages.push(message),
            None => self.entries.push((field, vec![message])),
        }
    }

    /// Messages recorded for `field`. Never fails; may be empty.
    pub fn get(&self, field: &str) -> &[String] {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map_or(&[], |(_, messages)| messages.as_slice())
    }

    /// True if `field` has at least one message.
    pub fn has(&self, field: &str) -> bool {
        !self.get(field).is_empty()
    }

    /// True if no field has a message.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of fields with messages.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Names of the failing fields, first failure first.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(field, messages)` pairs, first failure first.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(name, messages)| (name.as_str(), messages.as_slice()))
    }
}

impl Semigroup for FieldErrors {
    fn combine(mut self, other: Self) -> Self {
        for (field, messages) in other.entries {
            for message in messages {
                self.add(field.clone(), message);
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_accumulate_per_field() {
        let mut errors = FieldErrors::new();
        errors.add("zipCode", "first");
        errors.add("city", "second");
        errors.add("zipCode", "third");

        assert_eq!(errors.get("zipCode"), ["first", "third"]);
        assert_eq!(errors.fields().collect::<Vec<_>>(), ["zipCode", "city"]);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn unknown_field_has_no_messages() {
        let errors = FieldErrors::new();
        assert!(errors.get("anything").is_empty());
        assert!(!errors.has("anything"));
        assert!(errors.is_empty());
    }

    #[test]
    fn combine_merges_lists_of_the_same_field() {
        let mut a = FieldErrors::new();
        a.add("id", "one");
        let mut b = FieldErrors::new();
        b.add("id", "two");
        b.add("city", "three");

        let merged = a.combine(b);
        assert_eq!(merged.get("id"), ["one", "two"]);
        assert_eq!(merged.get("city"), ["three"]);
    }
}
