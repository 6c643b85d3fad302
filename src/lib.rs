//! # formkit
//!
//! Request-scoped web forms: typed binding of request parameters, validator
//! chains that run on the server and generate the same checks for the
//! browser, and escaping view helpers that render fields, errors and focus.
//!
//! ## The request cycle
//!
//! 1. A page asks its [`RequestContext`] for a form and renders it through an
//!    [`Html`] cursor. The `onsubmit` attribute carries the client-side checks.
//! 2. The action calls [`RequestContext::parse`] (or
//!    [`parse_or_redisplay`](RequestContext::parse_or_redisplay)): parameters
//!    are bound onto a fresh form, every validator runs, and the outcome is a
//!    [`Validation`] rather than an early exit.
//! 3. On failure the same form instance, errors attached, is rendered again.
//!    On success the action uses the typed fields.
//!
//! ## Quick Example
//!
//! ```rust
//! use std::sync::{Arc, OnceLock};
//! use formkit::{
//!     Catalog, Form, FormError, MinLengthValidator, Request, RequestContext, RequireValidator,
//!     Schema, Validation, Validators,
//! };
//!
//! #[derive(Debug, Clone, Default)]
//! struct Signup {
//!     user: String,
//! }
//!
//! impl Form for Signup {
//!     type Init = ();
//!
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: OnceLock<Schema<Signup>> = OnceLock::new();
//!         SCHEMA.get_or_init(|| Schema::<Self>::new("Signup").text("user", |f| &f.user, |f| &mut f.user))
//!     }
//!
//!     fn validators() -> Result<Validators, FormError> {
//!         Ok(Validators::new()
//!             .with(RequireValidator::new(["user"]))
//!             .with(MinLengthValidator::new(3, ["user"])))
//!     }
//! }
//!
//! let request = Request::builder("POST", "/signup").form_body("user=al").build();
//! let mut ctx = RequestContext::new(request, Arc::new(Catalog::new()));
//!
//! match ctx.parse::<Signup>().unwrap() {
//!     Validation::Success(signup) => println!("welcome {}", signup.user),
//!     Validation::Failure(errors) => {
//!         assert_eq!(errors.get("user"), ["Please enter at least 3 characters"]);
//!     }
//! }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod addressbook;
pub mod catalog;
pub mod config;
pub mod context;
pub mod error;
pub mod field_errors;
pub mod form;
pub mod html;
pub mod request;
pub mod response;
pub mod schema;
pub mod script;
pub mod semigroup;
pub mod testing;
pub mod validation;
pub mod validator;
pub mod value;

// Re-exports
pub use catalog::Catalog;
pub use config::Settings;
pub use context::{Notices, RequestContext};
pub use error::FormError;
pub use field_errors::FieldErrors;
pub use form::{Form, FormAccess, FormState};
pub use html::Html;
pub use request::{NotAcceptable, Params, Request};
pub use response::Response;
pub use schema::Schema;
pub use semigroup::Semigroup;
pub use validation::Validation;
pub use validator::{
    MaskValidator, MaxLengthValidator, MinLengthIfSetValidator, MinLengthValidator,
    PasswordConfirmValidator, RequireValidator, Validator, Validators,
};
pub use value::FieldValue;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::context::RequestContext;
    pub use crate::error::FormError;
    pub use crate::field_errors::FieldErrors;
    pub use crate::form::{Form, FormAccess, FormState};
    pub use crate::html::Html;
    pub use crate::schema::Schema;
    pub use crate::semigroup::Semigroup;
    pub use crate::validation::Validation;
    pub use crate::validator::{Validator, Validators};
}
