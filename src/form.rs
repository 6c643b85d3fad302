//! Forms: typed field sets bound from request parameters
//!
//! A form type declares its fields through a [`Schema`], its rules through
//! [`Validators`] and its defaults through [`Form::init`]. At runtime it lives
//! inside a [`FormState`], which adds the field-keyed error lists.
//!
//! ```
//! use std::sync::OnceLock;
//! use formkit::{Catalog, Form, FormError, FormState, Params, RequireValidator, Schema, Validators};
//!
//! #[derive(Debug, Clone, Default)]
//! struct Search {
//!     query: String,
//! }
//!
//! impl Form for Search {
//!     type Init = ();
//!
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: OnceLock<Schema<Search>> = OnceLock::new();
//!         SCHEMA.get_or_init(|| Schema::<Self>::new("Search").text("query", |f| &f.query, |f| &mut f.query))
//!     }
//!
//!     fn validators() -> Result<Validators, FormError> {
//!         Ok(Validators::new().with(RequireValidator::new(["query"])))
//!     }
//! }
//!
//! let mut state = FormState::new(Search::default());
//! state.bind(&Params::new().with("query", "").with("page", "2"));
//! state.validate(&Catalog::new()).unwrap();
//! assert_eq!(state.errors("query"), ["This field is required."]);
//! ```

use crate::{Catalog, FieldErrors, FieldValue, FormError, Params, Schema, Validation, Validators};

/// A form type.
///
/// Parsing always starts from `Default`; [`init`](Form::init) only runs when a
/// page asks for a form that was not submitted in this request.
pub trait Form: Default + Clone + 'static {
    /// Arguments for [`init`](Form::init).
    type Init;

    /// Field table of this form type.
    fn schema() -> &'static Schema<Self>;

    /// Validators in the order they run.
    fn validators() -> Result<Validators, FormError> {
        Ok(Validators::new())
    }

    /// Prepare a fresh form for display: set defaults or load existing data.
    fn init(&mut self, _args: Self::Init) -> Result<(), FormError> {
        Ok(())
    }
}

/// Object-safe view of a form instance, used by validators and view helpers.
pub trait FormAccess {
    /// Name of the form type.
    fn form_name(&self) -> &'static str;

    /// Field names in declaration order.
    fn field_names(&self) -> Vec<&'static str>;

    /// Read field `name`, or entry `index` of a repeated field.
    fn read_property(&self, name: &str, index: Option<usize>) -> Result<FieldValue, FormError>;

    /// Append an error message to field `name`.
    fn add_error(&mut self, name: &str, message: String);

    /// Messages recorded for field `name`.
    fn errors(&self, name: &str) -> &[String];

    /// True if any field has an error.
    fn has_errors(&self) -> bool;

    /// True if field `name` has an error.
    fn has_field_errors(&self, name: &str) -> bool;

    /// The first field, in declaration order, that has an error.
    fn first_error_field(&self) -> Option<&'static str>;

    /// The validator chain of the form type.
    fn validators(&self) -> Result<Validators, FormError>;
}

/// A form instance together with its validation errors.
#[derive(Debug, Clone, Default)]
pub struct FormState<F> {
    data: F,
    errors: FieldErrors,
}

impl<F: Form> FormState<F> {
    /// Wrap form data with an empty error set.
    pub fn new(data: F) -> Self {
        Self {
            data,
            errors: FieldErrors::new(),
        }
    }

    /// A default form after [`Form::init`].
    pub fn initialized(args: F::Init) -> Result<Self, FormError> {
        let mut data = F::default();
        data.init(args)?;
        Ok(Self::new(data))
    }

    /// The typed field values.
    pub fn data(&self) -> &F {
        &self.data
    }

    /// Mutable access to the typed field values.
    pub fn data_mut(&mut self) -> &mut F {
        &mut self.data
    }

    /// The recorded errors.
    pub fn field_errors(&self) -> &FieldErrors {
        &self.errors
    }

    /// Write every parameter that names a field; others are ignored.
    ///
    /// Returns the number of parameters bound.
    pub fn bind(&mut self, params: &Params) -> usize {
        let schema = F::schema();
        let mut bound = 0;
        for (name, value) in params.field_values() {
            if !schema.has_field(&name) {
                tracing::trace!(form = schema.form_name(), param = %name, "ignoring parameter");
                continue;
            }
            // The field exists, so writing cannot fail.
            if schema.write(&mut self.data, &name, value).is_ok() {
                bound += 1;
            }
        }
        tracing::debug!(form = schema.form_name(), bound, "bound request parameters");
        bound
    }

    /// Run the validator chain, recording failures.
    pub fn validate(&mut self, catalog: &Catalog) -> Result<(), FormError> {
        let validators = F::validators()?;
        validators.validate(self, catalog)?;
        if !self.errors.is_empty() {
            tracing::debug!(
                form = F::schema().form_name(),
                fields = ?self.errors.fields().collect::<Vec<_>>(),
                "validation failed"
            );
        }
        Ok(())
    }

    /// Read field `name` (see [`FormAccess::read_property`]).
    pub fn read_property(&self, name: &str, index: Option<usize>) -> Result<FieldValue, FormError> {
        F::schema().read(&self.data, name, index)
    }

    /// Write field `name`.
    pub fn write_property(&mut self, name: &str, value: impl Into<FieldValue>) -> Result<(), FormError> {
        F::schema().write(&mut self.data, name, value.into())
    }

    /// Append an error message to field `name`.
    pub fn add_error(&mut self, name: impl Into<String>, message: impl Into<String>) {
        self.errors.add(name, message);
    }

    /// Messages recorded for field `name`.
    pub fn errors(&self, name: &str) -> &[String] {
        self.errors.get(name)
    }

    /// True if any field has an error.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// True if field `name` has an error.
    pub fn has_field_errors(&self, name: &str) -> bool {
        self.errors.has(name)
    }

    /// The first field, in declaration order, that has an error.
    pub fn first_error_field(&self) -> Option<&'static str> {
        F::schema()
            .field_names()
            .find(|name| self.errors.has(name))
    }

    /// The form data if no errors were recorded, the errors otherwise.
    pub fn to_validation(&self) -> Validation<F, FieldErrors> {
        if self.errors.is_empty() {
            Validation::success(self.data.clone())
        } else {
            Validation::failure(self.errors.clone())
        }
    }
}

impl<F: Form> FormAccess for FormState<F> {
    fn form_name(&self) -> &'static str {
        F::schema().form_name()
    }

    fn field_names(&self) -> Vec<&'static str> {
        F::schema().field_names().collect()
    }

    fn read_property(&self, name: &str, index: Option<usize>) -> Result<FieldValue, FormError> {
        FormState::read_property(self, name, index)
    }

    fn add_error(&mut self, name: &str, message: String) {
        self.errors.add(name, message);
    }

    fn errors(&self, name: &str) -> &[String] {
        self.errors.get(name)
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_field_errors(&self, name: &str) -> bool {
        self.errors.has(name)
    }

    fn first_error_field(&self) -> Option<&'static str> {
        FormState::first_error_field(self)
    }

    fn validators(&self) -> Result<Validators, FormError> {
        F::validators()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MinLengthValidator, RequireValidator};
    use std::sync::OnceLock;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Signup {
        user: String,
        nick: String,
        newsletter: bool,
    }

    impl Form for Signup {
        type Init = &'static str;

        fn schema() -> &'static Schema<Self> {
            static SCHEMA: OnceLock<Schema<Signup>> = OnceLock::new();
            SCHEMA.get_or_init(|| {
                Schema::<Self>::new("Signup")
                    .text("user", |f| &f.user, |f| &mut f.user)
                    .text("nick", |f| &f.nick, |f| &mut f.nick)
                    .flag("newsletter", |f| &f.newsletter, |f| &mut f.newsletter)
            })
        }

        fn validators() -> Result<Validators, FormError> {
            Ok(Validators::new()
                .with(RequireValidator::new(["user", "nick"]))
                .with(MinLengthValidator::new(3, ["user", "nick"])))
        }

        fn init(&mut self, user: &'static str) -> Result<(), FormError> {
            self.user = user.to_string();
            self.newsletter = true;
            Ok(())
        }
    }

    #[test]
    fn bind_ignores_unknown_parameters() {
        let mut state = FormState::new(Signup::default());
        let params = Params::new()
            .with("user", "klaus")
            .with("submit", "Save")
            .with("newsletter", "1");
        assert_eq!(state.bind(&params), 2);
        assert_eq!(state.data().user, "klaus");
        assert!(state.data().newsletter);
    }

    #[test]
    fn first_error_field_follows_declaration_order() {
        let mut state = FormState::new(Signup::default());
        state.add_error("nick", "late");
        state.add_error("user", "early");
        assert_eq!(state.first_error_field(), Some("user"));
    }

    #[test]
    fn validation_collects_one_error_per_failing_field() {
        let mut state = FormState::new(Signup::default());
        state.bind(&Params::new().with("user", "").with("nick", "ab"));
        state.validate(&Catalog::new()).unwrap();

        assert_eq!(state.errors("user"), ["This field is required."]);
        assert_eq!(state.errors("nick"), ["Please enter at least 3 characters"]);
    }

    #[test]
    fn validating_twice_adds_nothing() {
        let mut state = FormState::new(Signup::default());
        let catalog = Catalog::new();
        state.validate(&catalog).unwrap();
        let first = state.field_errors().clone();
        state.validate(&catalog).unwrap();
        assert_eq!(state.field_errors(), &first);
    }

    #[test]
    fn to_validation_reflects_errors() {
        let mut state = FormState::<Signup>::initialized("klaus").unwrap();
        state.write_property("nick", "kla").unwrap();
        state.validate(&Catalog::new()).unwrap();
        assert!(state.to_validation().is_success());

        state.add_error("nick", "taken");
        assert!(state.to_validation().is_failure());
    }

    #[test]
    fn write_property_rejects_unknown_fields() {
        let mut state = FormState::new(Signup::default());
        assert!(matches!(
            state.write_property("password", "x"),
            Err(FormError::UnknownField { .. })
        ));
    }
}
