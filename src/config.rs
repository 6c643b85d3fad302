//! Application settings
//!
//! [`Settings`] collects what an application decides once at startup: where it
//! is deployed, which locales it offers and which messages it adds to the
//! built-in catalog. With the `serde` feature it can be read from JSON.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::request::RequestBuilder;
use crate::{Catalog, FormError, Request};

/// Startup configuration shared by every request.
///
/// ```
/// use formkit::Settings;
///
/// let settings = Settings::new()
///     .locales(["en", "de"])
///     .default_locale("en")
///     .message("formkit.validation.required", "Please fill in this field.");
///
/// let catalog = settings.catalog().unwrap();
/// assert_eq!(catalog.message("formkit.validation.required"), "Please fill in this field.");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct Settings {
    /// Directory of the application root, used to derive relative base URLs.
    pub base_dir: Option<PathBuf>,
    /// Fixed base URL; overrides derivation from `base_dir`.
    pub base_url: Option<String>,
    /// Locales the application has messages for.
    pub locales: Vec<String>,
    /// Locale used when the client asks for none of `locales`.
    pub default_locale: String,
    /// Messages added on top of the built-in ones.
    pub messages: BTreeMap<String, String>,
    /// JSON message files loaded after `messages`, in order.
    #[cfg(feature = "serde")]
    pub message_files: Vec<PathBuf>,
}

impl Settings {
    /// Empty settings: no base directory, no extra locales or messages.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read settings from a JSON document.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Set the application root directory.
    pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(base_dir.into());
        self
    }

    /// Set a fixed base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the offered locales.
    pub fn locales<I, S>(mut self, locales: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.locales = locales.into_iter().map(Into::into).collect();
        self
    }

    /// Set the fallback locale.
    pub fn default_locale(mut self, locale: impl Into<String>) -> Self {
        self.default_locale = locale.into();
        self
    }

    /// Add or replace one message.
    pub fn message(mut self, key: impl Into<String>, message: impl Into<String>) -> Self {
        self.messages.insert(key.into(), message.into());
        self
    }

    /// Load a JSON message file when building the catalog.
    #[cfg(feature = "serde")]
    pub fn message_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.message_files.push(path.into());
        self
    }

    /// Build the message catalog: built-in messages, then `messages`, then
    /// message files.
    pub fn catalog(&self) -> Result<Catalog, FormError> {
        let mut catalog = Catalog::new();
        catalog.add_messages(self.messages.iter().map(|(key, message)| (key.as_str(), message.as_str())));
        #[cfg(feature = "serde")]
        for path in &self.message_files {
            catalog.load_json(path)?;
        }
        tracing::debug!(extra = self.messages.len(), "message catalog ready");
        Ok(catalog)
    }

    /// Apply the deployment settings to a request under construction.
    pub fn configure(&self, mut builder: RequestBuilder) -> RequestBuilder {
        if let Some(base_dir) = &self.base_dir {
            builder = builder.base_dir(base_dir.clone());
        }
        if let Some(base_url) = &self.base_url {
            builder = builder.base_url(base_url.clone());
        }
        builder
    }

    /// The locale to answer `request` in.
    pub fn locale<'a>(&'a self, request: &Request) -> &'a str {
        request.locale(self.locales.as_slice(), &self.default_locale)
    }
}
