//! Request-scoped state
//!
//! A [`RequestContext`] is created when a request arrives and dropped when the
//! response is sent. It owns the request, shares the application's message
//! catalog and holds at most one instance per form type, so that an action
//! which fails validation can hand the very same instance to the page that
//! redisplays it.
//!
//! ```
//! use std::sync::{Arc, OnceLock};
//! use formkit::{
//!     Catalog, Form, FormError, Request, RequestContext, RequireValidator, Response, Schema,
//!     Validation, Validators,
//! };
//!
//! #[derive(Debug, Clone, Default)]
//! struct Comment {
//!     text: String,
//! }
//!
//! impl Form for Comment {
//!     type Init = ();
//!
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: OnceLock<Schema<Comment>> = OnceLock::new();
//!         SCHEMA.get_or_init(|| Schema::<Self>::new("Comment").text("text", |f| &f.text, |f| &mut f.text))
//!     }
//!
//!     fn validators() -> Result<Validators, FormError> {
//!         Ok(Validators::new().with(RequireValidator::new(["text"])))
//!     }
//! }
//!
//! fn comment_page(ctx: &mut RequestContext) -> Result<Response, FormError> {
//!     let mut html = ctx.view::<Comment>(())?;
//!     html.bind_field("text", None)?;
//!     Ok(Response::html(format!("<textarea {}></textarea>{}", html.input()?, html.messages()?)))
//! }
//!
//! let request = Request::builder("POST", "/comment").param("text", "").build();
//! let mut ctx = RequestContext::new(request, Arc::new(Catalog::new()));
//!
//! match ctx.parse_or_redisplay::<Comment, _>(comment_page).unwrap() {
//!     Validation::Success(comment) => unreachable!("{comment:?}"),
//!     Validation::Failure(page) => assert!(page.body().contains("This field is required.")),
//! }
//! ```

use std::any::{Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::{Catalog, FieldErrors, Form, FormAccess, FormError, FormState, Html, Request, Response, Validation};

trait FormSlot: FormAccess {
    fn as_any(&self) -> &dyn Any;
    fn as_form(&self) -> &dyn FormAccess;
}

impl<F: Form> FormSlot for FormState<F> {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_form(&self) -> &dyn FormAccess {
        self
    }
}

/// General error messages not tied to a field, e.g. "address was deleted
/// in the meantime".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notices {
    errors: Vec<String>,
}

impl Notices {
    /// Record a message.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Messages in the order they were recorded.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// True if any message was recorded.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Everything that lives for the duration of one request.
pub struct RequestContext {
    request: Request,
    catalog: Arc<Catalog>,
    forms: HashMap<TypeId, Box<dyn FormSlot>>,
    notices: Notices,
}

impl RequestContext {
    /// A fresh context with no forms.
    pub fn new(request: Request, catalog: Arc<Catalog>) -> Self {
        Self {
            request,
            catalog,
            forms: HashMap::new(),
            notices: Notices::default(),
        }
    }

    /// The request being handled.
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// The shared message catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// General messages of this request.
    pub fn notices(&self) -> &Notices {
        &self.notices
    }

    /// Mutable access to the general messages.
    pub fn notices_mut(&mut self) -> &mut Notices {
        &mut self.notices
    }

    /// Bind the request parameters onto a fresh `F` and validate it.
    ///
    /// The result replaces any instance of `F` held so far, errors included.
    /// `Err` means the form or its validators are wired up wrongly.
    pub fn parse<F: Form>(&mut self) -> Result<Validation<F, FieldErrors>, FormError> {
        let mut state = FormState::<F>::default();
        state.bind(self.request.params());
        state.validate(&self.catalog)?;
        let result = state.to_validation();
        self.forms.insert(TypeId::of::<F>(), Box::new(state));
        Ok(result)
    }

    /// Like [`parse`](Self::parse), but on validation failure renders `page`
    /// (which sees the failed instance through [`form`](Self::form) or
    /// [`view`](Self::view)) and returns the rendered page instead of the
    /// errors.
    pub fn parse_or_redisplay<F, P>(&mut self, page: P) -> Result<Validation<F, Response>, FormError>
    where
        F: Form,
        P: FnOnce(&mut RequestContext) -> Result<Response, FormError>,
    {
        match self.parse::<F>()? {
            Validation::Success(form) => Ok(Validation::Success(form)),
            Validation::Failure(errors) => {
                tracing::debug!(
                    form = F::schema().form_name(),
                    fields = errors.len(),
                    "redisplaying input page"
                );
                Ok(Validation::Failure(page(self)?))
            }
        }
    }

    /// The instance of `F` for this request.
    ///
    /// Returns the parsed instance if [`parse`](Self::parse) ran, otherwise
    /// creates one with [`Form::init`] on first use. `args` is ignored when
    /// an instance exists already.
    pub fn form<F: Form>(&mut self, args: F::Init) -> Result<&dyn FormAccess, FormError> {
        Self::slot::<F>(&mut self.forms, args)
    }

    /// The instance of `F`, if one was parsed or created.
    pub fn cached_form<F: Form>(&self) -> Option<&FormState<F>> {
        self.forms
            .get(&TypeId::of::<F>())
            .and_then(|slot| slot.as_any().downcast_ref())
    }

    /// A view cursor with the instance of `F` bound (see [`form`](Self::form)).
    pub fn view<F: Form>(&mut self, args: F::Init) -> Result<Html<'_>, FormError> {
        let form = Self::slot::<F>(&mut self.forms, args)?;
        let mut html = Html::new(&self.catalog, &self.request);
        html.bind_form(form);
        Ok(html)
    }

    /// A view cursor with no form bound.
    pub fn html(&self) -> Html<'_> {
        Html::new(&self.catalog, &self.request)
    }

    fn slot<F: Form>(
        forms: &mut HashMap<TypeId, Box<dyn FormSlot>>,
        args: F::Init,
    ) -> Result<&dyn FormAccess, FormError> {
        let slot = match forms.entry(TypeId::of::<F>()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                tracing::debug!(form = F::schema().form_name(), "initializing form");
                entry.insert(Box::new(FormState::<F>::initialized(args)?))
            }
        };
        Ok(slot.as_form())
    }
}

impl fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestContext")
            .field("request", &self.request)
            .field(
                "forms",
                &self.forms.values().map(|form| form.form_name()).collect::<Vec<_>>(),
            )
            .field("notices", &self.notices)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RequireValidator, Schema, Validators};
    use std::sync::OnceLock;

    #[derive(Debug, Clone, Default, PartialEq)]
    struct Greeting {
        name: String,
        language: String,
    }

    impl Form for Greeting {
        type Init = &'static str;

        fn schema() -> &'static Schema<Self> {
            static SCHEMA: OnceLock<Schema<Greeting>> = OnceLock::new();
            SCHEMA.get_or_init(|| {
                Schema::<Self>::new("Greeting")
                    .text("name", |f| &f.name, |f| &mut f.name)
                    .text("language", |f| &f.language, |f| &mut f.language)
            })
        }

        fn validators() -> Result<Validators, FormError> {
            Ok(Validators::new().with(RequireValidator::new(["name"])))
        }

        fn init(&mut self, language: &'static str) -> Result<(), FormError> {
            self.language = language.to_string();
            Ok(())
        }
    }

    fn context(params: &[(&str, &str)]) -> RequestContext {
        let request = Request::builder("POST", "/greet")
            .params(params.iter().copied())
            .build();
        RequestContext::new(request, Arc::new(Catalog::new()))
    }

    #[test]
    fn parse_returns_the_bound_form() {
        let mut ctx = context(&[("name", "Ada"), ("language", "en")]);
        let greeting = ctx.parse::<Greeting>().unwrap().into_result().unwrap();
        assert_eq!(greeting.name, "Ada");
    }

    #[test]
    fn failed_parse_is_cached_for_redisplay() {
        let mut ctx = context(&[("language", "fr")]);
        let errors = ctx.parse::<Greeting>().unwrap().into_result().unwrap_err();
        assert!(errors.has("name"));

        let form = ctx.form::<Greeting>("de").unwrap();
        assert_eq!(form.read_property("language", None).unwrap().as_text(), "fr");
        assert!(form.has_field_errors("name"));
    }

    #[test]
    fn form_initializes_once() {
        let mut ctx = context(&[]);
        ctx.form::<Greeting>("de").unwrap();
        ctx.form::<Greeting>("en").unwrap();
        assert_eq!(ctx.cached_form::<Greeting>().unwrap().data().language, "de");
    }

    #[test]
    fn redisplay_renders_the_page_only_on_failure() {
        let page = |ctx: &mut RequestContext| -> Result<Response, FormError> {
            let html = ctx.view::<Greeting>("en")?;
            Ok(Response::html(html.param("language").unwrap_or_default().to_string()))
        };

        let mut ctx = context(&[("name", "Ada")]);
        assert!(ctx.parse_or_redisplay::<Greeting, _>(page).unwrap().is_success());

        let mut ctx = context(&[("language", "it")]);
        match ctx.parse_or_redisplay::<Greeting, _>(page).unwrap() {
            Validation::Failure(response) => assert_eq!(response.body(), "it"),
            Validation::Success(_) => panic!("expected the page"),
        }
    }

    #[test]
    fn notices_collect_general_errors() {
        let mut ctx = context(&[]);
        assert!(!ctx.notices().has_errors());
        ctx.notices_mut().add_error("Address not found");
        assert_eq!(ctx.notices().errors(), ["Address not found"]);
    }
}
