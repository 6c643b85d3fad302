//! Message catalog
//!
//! Maps message keys to printf-style templates. The catalog is filled while the
//! application starts and only read afterwards; requests share it through an
//! `Arc`.
//!
//! ```
//! use formkit::Catalog;
//!
//! let mut catalog = Catalog::new();
//! catalog.add_message("greeting", "Hello %s, you have %d new messages");
//!
//! assert_eq!(catalog.format("greeting", &[&"Klaus", &3]), "Hello Klaus, you have 3 new messages");
//! assert_eq!(catalog.message("missing"), "???missing???");
//! ```

use std::collections::HashMap;
use std::fmt::{self, Write as _};
#[cfg(feature = "serde")]
use std::path::Path;

/// Message key of the required-field check.
pub const REQUIRED: &str = "formkit.validation.required";
/// Message key of the minimum-length checks. Takes the minimum as `%d`.
pub const MIN_LENGTH: &str = "formkit.validation.minLength";
/// Message key of the maximum-length check. Takes the maximum as `%d`.
pub const MAX_LENGTH: &str = "formkit.validation.maxLength";
/// Message key of the mask check. Takes the mask as `%s`.
pub const MASK: &str = "formkit.validation.mask";
/// Message key of the password confirmation check.
pub const PASSWORD_CONFIRM: &str = "formkit.validation.passwordConfirm";

const DEFAULTS: &[(&str, &str)] = &[
    (REQUIRED, "This field is required."),
    (MIN_LENGTH, "Please enter at least %d characters"),
    (MAX_LENGTH, "Please enter no more than %d characters"),
    (MASK, "Please enter a valid value"),
    (PASSWORD_CONFIRM, "The passwords do not match."),
];

/// Key → template lookup with the built-in validation messages preloaded.
#[derive(Debug, Clone)]
pub struct Catalog {
    messages: HashMap<String, String>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    /// A catalog holding only the built-in validation messages.
    pub fn new() -> Self {
        Self {
            messages: DEFAULTS
                .iter()
                .map(|(key, message)| (key.to_string(), message.to_string()))
                .collect(),
        }
    }

    /// Add or replace one message.
    pub fn add_message(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    /// Add or replace several messages.
    pub fn add_messages<K, V>(&mut self, messages: impl IntoIterator<Item = (K, V)>)
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (key, message) in messages {
            self.add_message(key, message);
        }
    }

    /// Load a flat JSON object of `key: template` pairs.
    #[cfg(feature = "serde")]
    pub fn load_json(&mut self, path: impl AsRef<Path>) -> Result<(), crate::FormError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| crate::FormError::CatalogIo {
            path: path.to_path_buf(),
            source,
        })?;
        let messages: HashMap<String, String> =
            serde_json::from_str(&text).map_err(|source| crate::FormError::CatalogFormat {
                path: path.to_path_buf(),
                source,
            })?;
        tracing::debug!(path = %path.display(), count = messages.len(), "loaded messages");
        self.add_messages(messages);
        Ok(())
    }

    /// True if `key` has a template.
    pub fn contains(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// The template of `key` without arguments.
    pub fn message(&self, key: &str) -> String {
        self.format(key, &[])
    }

    /// The template of `key` with `%s` / `%d` placeholders filled from `args`.
    ///
    /// A missing key renders as `???key???`. `%%` is a literal percent sign.
    pub fn format(&self, key: &str, args: &[&dyn fmt::Display]) -> String {
        match self.messages.get(key) {
            Some(template) => fill(template, args),
            None => {
                tracing::warn!(key, "no message for key");
                format!("???{key}???")
            }
        }
    }
}

fn fill(template: &str, args: &[&dyn fmt::Display]) -> String {
    if args.is_empty() {
        return template.to_string();
    }
    let mut out = String::with_capacity(template.len());
    let mut args = args.iter();
    let mut chars = template.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '%' {
            out.push(c);
            continue;
        }
        match chars.peek() {
            Some('%') => {
                chars.next();
                out.push('%');
            }
            Some('s' | 'd') => {
                chars.next();
                if let Some(arg) = args.next() {
                    let _ = write!(out, "{arg}");
                }
            }
            _ => out.push('%'),
        }
    }
    out
}
