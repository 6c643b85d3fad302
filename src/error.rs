//! Programming errors
//!
//! A [`FormError`] means the templates, forms and validators are wired up
//! inconsistently: a validator names a field the form does not have, a view
//! helper runs before a form was bound, and so on. These are never user input
//! problems (those end up in [`FieldErrors`](crate::FieldErrors)) and are
//! propagated with `?` instead of being recorded.

#[cfg(feature = "serde")]
use std::path::PathBuf;

/// Usage error raised by the form, validator and view layers.
#[derive(Debug, thiserror::Error)]
pub enum FormError {
    /// The form type has no field with this name.
    #[error("No property '{field}' found in '{form}'")]
    UnknownField {
        /// Form type name.
        form: &'static str,
        /// Requested field name.
        field: String,
    },

    /// An index was applied to a field that does not hold repeated values.
    #[error("Property '{field}' of '{form}' is not indexed")]
    NotIndexed {
        /// Form type name.
        form: &'static str,
        /// Requested field name.
        field: String,
    },

    /// A view helper was called before [`Html::bind_form`](crate::Html::bind_form).
    #[error("No form bound to HTML")]
    NoFormBound,

    /// A field helper was called before [`Html::bind_field`](crate::Html::bind_field).
    #[error("No field bound to HTML")]
    NoFieldBound,

    /// A mask validator was configured with an unusable regular expression.
    #[error("Invalid mask '{mask}': {source}")]
    InvalidMask {
        /// The offending mask.
        mask: String,
        /// Underlying regex error.
        #[source]
        source: regex::Error,
    },

    /// A `/pattern/flags` mask used a flag other than `i`, `m` or `s`.
    #[error("Unsupported flag '{flag}' in mask '{mask}'")]
    InvalidMaskFlag {
        /// The offending mask.
        mask: String,
        /// The unsupported flag.
        flag: char,
    },

    /// An identifier was assigned to a record that already has one.
    #[error("Changing ID is not allowed.")]
    IdAlreadyAssigned,

    /// A record lookup referenced an identifier that does not exist.
    #[error("No {kind} with ID {id} found")]
    UnknownRecord {
        /// Record kind, e.g. "address".
        kind: &'static str,
        /// Requested identifier.
        id: u64,
    },

    /// A message file could not be read.
    #[cfg(feature = "serde")]
    #[error("Unable to read messages from {path}: {source}")]
    CatalogIo {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A message file is not a flat JSON object of strings.
    #[cfg(feature = "serde")]
    #[error("Malformed message file {path}: {source}")]
    CatalogFormat {
        /// File that failed to parse.
        path: PathBuf,
        /// Underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

impl FormError {
    pub(crate) fn unknown_field(form: &'static str, field: impl Into<String>) -> Self {
        FormError::UnknownField {
            form,
            field: field.into(),
        }
    }
}
