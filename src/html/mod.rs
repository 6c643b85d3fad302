//! View helpers for rendering bound forms
//!
//! [`Html`] is the rendering cursor a page threads through its markup: it
//! knows the message catalog, the current request, the form being rendered
//! and, optionally, the field being rendered. Field helpers return attribute
//! or element markup as `String`s, always HTML-escaped, for the page to splice
//! into its output.
//!
//! ```
//! use std::sync::OnceLock;
//! use formkit::{Catalog, Form, FormState, Html, Request, Schema};
//!
//! #[derive(Debug, Clone, Default)]
//! struct Login {
//!     user: String,
//! }
//!
//! impl Form for Login {
//!     type Init = ();
//!
//!     fn schema() -> &'static Schema<Self> {
//!         static SCHEMA: OnceLock<Schema<Login>> = OnceLock::new();
//!         SCHEMA.get_or_init(|| Schema::<Self>::new("Login").text("user", |f| &f.user, |f| &mut f.user))
//!     }
//! }
//!
//! let catalog = Catalog::new();
//! let request = Request::builder("GET", "/login").build();
//! let mut state = FormState::new(Login::default());
//! state.write_property("user", "<klaus>").unwrap();
//! state.add_error("user", "Unknown user");
//!
//! let mut html = Html::new(&catalog, &request);
//! html.bind_form(&state);
//! html.bind_field("user", None).unwrap();
//! assert_eq!(
//!     html.input().unwrap(),
//!     r#"id="user" name="user" value="&lt;klaus&gt;" autofocus"#
//! );
//! assert_eq!(
//!     html.messages().unwrap(),
//!     r#"<ul class="errors user"><li>Unknown user</li></ul>"#
//! );
//! ```

mod escape;

pub use escape::{escape_html, escape_js};

use std::fmt;

use crate::{Catalog, FieldValue, FormAccess, FormError, Request};

#[derive(Debug, Clone)]
struct BoundField {
    name: String,
    index: Option<usize>,
}

impl BoundField {
    fn id(&self) -> String {
        match self.index {
            Some(index) => format!("{}-{index}", self.name),
            None => self.name.clone(),
        }
    }

    fn param_name(&self) -> String {
        match self.index {
            Some(index) => format!("{}[{index}]", self.name),
            None => self.name.clone(),
        }
    }
}

/// Rendering cursor over one page.
pub struct Html<'a> {
    catalog: &'a Catalog,
    request: &'a Request,
    form: Option<&'a dyn FormAccess>,
    field: Option<BoundField>,
    focus_taken: bool,
}

impl<'a> Html<'a> {
    /// A cursor with no form bound.
    pub fn new(catalog: &'a Catalog, request: &'a Request) -> Self {
        Self {
            catalog,
            request,
            form: None,
            field: None,
            focus_taken: false,
        }
    }

    /// Make `form` the active form. Clears the active field.
    pub fn bind_form(&mut self, form: &'a dyn FormAccess) {
        self.form = Some(form);
        self.field = None;
        self.focus_taken = false;
    }

    /// Make `name` (entry `index` of a repeated field) the active field.
    ///
    /// Fails if the active form has no such field or if `index` is applied to
    /// a field that is not repeated.
    pub fn bind_field(&mut self, name: &str, index: Option<usize>) -> Result<(), FormError> {
        self.bound_form()?.read_property(name, index)?;
        self.field = Some(BoundField {
            name: name.to_string(),
            index,
        });
        Ok(())
    }

    /// Clear the active field.
    pub fn unbind_field(&mut self) {
        self.field = None;
    }

    /// Name of the active field, if any.
    pub fn field_name(&self) -> Option<&str> {
        self.field.as_ref().map(|field| field.name.as_str())
    }

    fn bound_form(&self) -> Result<&'a dyn FormAccess, FormError> {
        self.form.ok_or(FormError::NoFormBound)
    }

    fn bound_field(&self) -> Result<(&'a dyn FormAccess, BoundField), FormError> {
        let form = self.bound_form()?;
        let field = self.field.clone().ok_or(FormError::NoFieldBound)?;
        Ok((form, field))
    }

    fn value(form: &dyn FormAccess, field: &BoundField) -> Result<FieldValue, FormError> {
        form.read_property(&field.name, field.index)
    }

    /// `" autofocus"` for the first-declared field with an error, once per
    /// form; the empty string otherwise.
    fn focus_for(&mut self, form: &dyn FormAccess, field: &BoundField) -> &'static str {
        if !self.focus_taken && form.first_error_field() == Some(field.name.as_str()) {
            self.focus_taken = true;
            " autofocus"
        } else {
            ""
        }
    }

    /// The `onsubmit` attribute running every client-side validator of the
    /// active form. Starts a new form: auto-focus is available again.
    pub fn form_attrs(&mut self) -> Result<String, FormError> {
        let form = self.bound_form()?;
        let script = form.validators()?.script(self.catalog);
        self.focus_taken = false;
        Ok(format!(
            "onsubmit=\"return new formkit.Form(this).submit(function(){{\n{}}})\"",
            escape_html(&script)
        ))
    }

    /// `" autofocus"` for an element that should have the focus when no
    /// field of the form has errors. Only the first call per form produces it.
    ///
    /// Errors recorded under names the form does not declare do not count:
    /// no element could take the focus for them.
    pub fn auto_focus(&mut self) -> Result<&'static str, FormError> {
        let form = self.bound_form()?;
        if form.first_error_field().is_some() || self.focus_taken {
            return Ok("");
        }
        self.focus_taken = true;
        Ok(" autofocus")
    }

    /// `id`, `name` and `value` attributes of a text input.
    pub fn input(&mut self) -> Result<String, FormError> {
        let (form, field) = self.bound_field()?;
        let value = Self::value(form, &field)?;
        let focus = self.focus_for(form, &field);
        Ok(format!(
            "id=\"{}\" name=\"{}\" value=\"{}\"{focus}",
            escape_html(&field.id()),
            escape_html(&field.param_name()),
            escape_html(&value.as_text()),
        ))
    }

    /// Attributes of a checkbox submitting `1`, checked when the field is set.
    pub fn checkbox(&mut self) -> Result<String, FormError> {
        let (form, field) = self.bound_field()?;
        let checked = if Self::value(form, &field)?.is_blank() {
            ""
        } else {
            " checked"
        };
        let focus = self.focus_for(form, &field);
        Ok(format!(
            "type=\"checkbox\" id=\"{}\" name=\"{}\" value=\"1\"{checked}{focus}",
            escape_html(&field.id()),
            escape_html(&field.param_name()),
        ))
    }

    /// Attributes of the radio button submitting `value`, checked when the
    /// field currently holds it. The id is `<field>-<value>`.
    pub fn radio(&mut self, value: &str) -> Result<String, FormError> {
        let (form, field) = self.bound_field()?;
        let checked = if Self::value(form, &field)?.as_text() == value {
            " checked"
        } else {
            ""
        };
        let focus = self.focus_for(form, &field);
        Ok(format!(
            "type=\"radio\" id=\"{}\" name=\"{}\" value=\"{}\"{checked}{focus}",
            escape_html(&format!("{}-{value}", field.id())),
            escape_html(&field.param_name()),
            escape_html(value),
        ))
    }

    /// `id` and `name` attributes of a select box.
    pub fn select(&mut self) -> Result<String, FormError> {
        let (form, field) = self.bound_field()?;
        let focus = self.focus_for(form, &field);
        Ok(format!(
            "id=\"{}\" name=\"{}\"{focus}",
            escape_html(&field.id()),
            escape_html(&field.param_name()),
        ))
    }

    /// `<option>` elements for `(value, caption)` pairs, selecting the one
    /// that matches the field.
    pub fn options(&self, options: &[(&str, &str)]) -> Result<String, FormError> {
        let (form, field) = self.bound_field()?;
        let current = Self::value(form, &field)?;
        let current = current.as_text();
        Ok(options
            .iter()
            .map(|(value, caption)| {
                format!(
                    "<option value=\"{}\"{}>{}</option>\n",
                    escape_html(value),
                    if *value == current { " selected" } else { "" },
                    escape_html(caption),
                )
            })
            .collect())
    }

    /// The error list of the active field, or an empty list when no field is
    /// bound. The client script fills the same list.
    pub fn messages(&self) -> Result<String, FormError> {
        let form = self.bound_form()?;
        let Some(field) = &self.field else {
            return Ok("<ul class=\"errors\"></ul>".to_string());
        };
        let items: String = form
            .errors(&field.name)
            .iter()
            .map(|message| format!("<li>{}</li>", escape_html(message)))
            .collect();
        Ok(format!(
            "<ul class=\"errors {}\">{items}</ul>",
            escape_html(&field.name)
        ))
    }

    /// The `for` attribute of a label pointing at the active field.
    pub fn label(&self) -> Result<String, FormError> {
        let (_, field) = self.bound_field()?;
        Ok(format!("for=\"{}\"", escape_html(&field.id())))
    }

    /// `text`, HTML-escaped.
    pub fn text(&self, text: &str) -> String {
        escape_html(text)
    }

    /// `text`, escaped for a JavaScript string literal.
    pub fn js_text(&self, text: &str) -> String {
        escape_js(text)
    }

    /// `url` relative to the application root, resolved against the current
    /// request and HTML-escaped.
    pub fn url(&self, url: &str) -> String {
        escape_html(&self.request.build_url(url))
    }

    /// Like [`url`](Self::url), escaped for a JavaScript string literal.
    pub fn js_url(&self, url: &str) -> String {
        escape_js(&self.request.build_url(url))
    }

    /// Catalog message `key`, HTML-escaped.
    pub fn msg(&self, key: &str, args: &[&dyn fmt::Display]) -> String {
        escape_html(&self.catalog.format(key, args))
    }

    /// Catalog message `key`, escaped for a JavaScript string literal.
    pub fn js_msg(&self, key: &str, args: &[&dyn fmt::Display]) -> String {
        escape_js(&self.catalog.format(key, args))
    }

    /// Request parameter `name`, unescaped.
    pub fn param(&self, name: &str) -> Option<&'a str> {
        self.request.param(name)
    }

    /// The request being rendered.
    pub fn request(&self) -> &'a Request {
        self.request
    }

    /// The message catalog.
    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }
}

impl fmt::Debug for Html<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Html")
            .field("form", &self.form.map(|form| form.form_name()))
            .field("field", &self.field)
            .field("focus_taken", &self.focus_taken)
            .finish()
    }
}
