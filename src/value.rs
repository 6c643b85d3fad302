//! Field values as seen by validators and view helpers

use std::borrow::Cow;

/// The current value of a form field.
///
/// Form types keep their fields strongly typed; the [`Schema`](crate::Schema)
/// exposes them to validators and templates through this small enum.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldValue {
    /// No value (an unset optional field or a missing indexed entry).
    #[default]
    Empty,
    /// A text value, exactly as submitted.
    Text(String),
    /// A checkbox-like flag.
    Flag(bool),
    /// Repeated values bound from `name[]` parameters.
    List(Vec<String>),
}

impl FieldValue {
    /// Text representation used for rendering and length checks.
    ///
    /// Flags render as `"1"` when set and as the empty string otherwise.
    pub fn as_text(&self) -> Cow<'_, str> {
        match self {
            FieldValue::Empty => Cow::Borrowed(""),
            FieldValue::Text(s) => Cow::Borrowed(s),
            FieldValue::Flag(true) => Cow::Borrowed("1"),
            FieldValue::Flag(false) => Cow::Borrowed(""),
            FieldValue::List(items) => Cow::Owned(items.join(",")),
        }
    }

    /// True when a required-field check must fail.
    ///
    /// ```
    /// use formkit::FieldValue;
    ///
    /// assert!(FieldValue::Text(String::new()).is_blank());
    /// assert!(FieldValue::Flag(false).is_blank());
    /// assert!(!FieldValue::Text("0".into()).is_blank());
    /// ```
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Flag(set) => !set,
            FieldValue::List(items) => items.is_empty(),
        }
    }

    /// Length in Unicode scalar values.
    pub fn char_len(&self) -> usize {
        self.as_text().chars().count()
    }

    /// Entry `index` of a list value. Missing entries are [`FieldValue::Empty`].
    ///
    /// Returns `None` when the value is not a list.
    pub fn at(&self, index: usize) -> Option<FieldValue> {
        match self {
            FieldValue::List(items) => Some(
                items
                    .get(index)
                    .cloned()
                    .map_or(FieldValue::Empty, FieldValue::Text),
            ),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Empty, Into::into)
    }
}
