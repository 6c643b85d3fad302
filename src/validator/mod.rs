//! Validators: paired server-side checks and client-side scripts
//!
//! Every validator implements the same rule twice: [`Validator::validate`]
//! runs it against a bound form, [`Validator::script`] emits JavaScript that
//! runs it in the browser before submission. The script runs with `this`
//! bound to the client form object:
//!
//! - `this.get('field')` returns the current value of an input,
//! - `this.length('field')` counts its characters (code points),
//! - `this.error('field', message)` reports an error.
//!
//! Both sides follow the same policy: a field that already failed a rule is
//! not reported again, so every failing field carries exactly one message and
//! re-running a chain adds nothing.

mod confirm;
mod length;
mod mask;
mod require;

pub use confirm::PasswordConfirmValidator;
pub use length::{MaxLengthValidator, MinLengthIfSetValidator, MinLengthValidator};
pub use mask::MaskValidator;
pub use require::RequireValidator;

use std::fmt;

use crate::html::escape_js;
use crate::{Catalog, FieldValue, FormAccess, FormError};

/// A validation rule over one or more named fields.
pub trait Validator: fmt::Debug + Send + Sync {
    /// Check the form and record failures with [`FormAccess::add_error`].
    ///
    /// Fails only on programming errors such as unknown field names.
    fn validate(&self, form: &mut dyn FormAccess, catalog: &Catalog) -> Result<(), FormError>;

    /// JavaScript performing the same check on the client, if any.
    fn script(&self, catalog: &Catalog) -> Option<String>;
}

/// An ordered validator chain.
#[derive(Debug, Default)]
pub struct Validators {
    chain: Vec<Box<dyn Validator>>,
}

impl Validators {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a validator.
    pub fn push(&mut self, validator: impl Validator + 'static) {
        self.chain.push(Box::new(validator));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, validator: impl Validator + 'static) -> Self {
        self.push(validator);
        self
    }

    /// Number of validators.
    pub fn len(&self) -> usize {
        self.chain.len()
    }

    /// True if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }

    /// The validators in order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn Validator> {
        self.chain.iter().map(AsRef::as_ref)
    }

    /// Run every validator in order. All of them run, whatever earlier ones
    /// reported.
    pub fn validate(&self, form: &mut dyn FormAccess, catalog: &Catalog) -> Result<(), FormError> {
        for validator in &self.chain {
            validator.validate(form, catalog)?;
        }
        Ok(())
    }

    /// The client scripts of all validators, concatenated in order.
    pub fn script(&self, catalog: &Catalog) -> String {
        self.chain
            .iter()
            .filter_map(|validator| validator.script(catalog))
            .collect()
    }
}

pub(crate) fn field_list<I, S>(fields: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    fields.into_iter().map(Into::into).collect()
}

/// Record `message` on `field` unless the field already failed.
pub(crate) fn report(form: &mut dyn FormAccess, field: &str, message: &str) {
    if !form.has_field_errors(field) {
        form.add_error(field, message.to_string());
    }
}

/// Read a field as text.
pub(crate) fn read_text(form: &dyn FormAccess, field: &str) -> Result<FieldValue, FormError> {
    form.read_property(field, None)
}

/// Opening line shared by all scripts: the message bound to `m`.
pub(crate) fn script_header(message: &str) -> String {
    format!("var m = '{}';\n", escape_js(message))
}

/// A field name as a quoted JavaScript string.
pub(crate) fn js_field(field: &str) -> String {
    format!("'{}'", escape_js(field))
}
