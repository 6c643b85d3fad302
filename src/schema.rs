//! Per-form-type field tables
//!
//! A [`Schema`] maps field names to typed accessors for one form type. It is
//! built once (usually into a `static OnceLock`) and used for binding request
//! parameters, for validators reading fields, and for view helpers rendering
//! them.
//!
//! ```
//! use formkit::{FieldValue, Schema};
//!
//! #[derive(Default)]
//! struct Login {
//!     user: String,
//!     remember: bool,
//! }
//!
//! let schema = Schema::<Login>::new("Login")
//!     .text("user", |f| &f.user, |f| &mut f.user)
//!     .flag("remember", |f| &f.remember, |f| &mut f.remember);
//!
//! let mut login = Login::default();
//! schema.write(&mut login, "user", FieldValue::from("klaus")).unwrap();
//! assert_eq!(login.user, "klaus");
//! assert!(schema.write(&mut login, "password", FieldValue::from("x")).is_err());
//! ```

use std::fmt;

use crate::{FieldValue, FormError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Text,
    Flag,
    List,
    Accessor,
}

type Getter<F> = Box<dyn Fn(&F) -> FieldValue + Send + Sync>;
type Setter<F> = Box<dyn Fn(&mut F, FieldValue) + Send + Sync>;

struct Binding<F> {
    kind: Kind,
    get: Getter<F>,
    set: Setter<F>,
}

/// Field name → typed getter/setter table for the form type `F`.
pub struct Schema<F> {
    form: &'static str,
    fields: Vec<(&'static str, Binding<F>)>,
}

impl<F: 'static> Schema<F> {
    /// Start an empty table. `form` names the type in error messages.
    pub fn new(form: &'static str) -> Self {
        Self {
            form,
            fields: Vec::new(),
        }
    }

    fn push(mut self, name: &'static str, kind: Kind, get: Getter<F>, set: Setter<F>) -> Self {
        self.fields.push((name, Binding { kind, get, set }));
        self
    }

    /// A plain text field, stored verbatim.
    pub fn text(
        self,
        name: &'static str,
        get: fn(&F) -> &String,
        get_mut: fn(&mut F) -> &mut String,
    ) -> Self {
        self.push(
            name,
            Kind::Text,
            Box::new(move |form: &F| FieldValue::Text(get(form).clone())),
            Box::new(move |form: &mut F, value: FieldValue| {
                *get_mut(form) = match value {
                    FieldValue::Text(text) => text,
                    other => other.as_text().into_owned(),
                };
            }),
        )
    }

    /// A boolean field (checkbox). Any non-blank value other than `"0"` sets it.
    pub fn flag(
        self,
        name: &'static str,
        get: fn(&F) -> &bool,
        get_mut: fn(&mut F) -> &mut bool,
    ) -> Self {
        self.push(
            name,
            Kind::Flag,
            Box::new(move |form: &F| FieldValue::Flag(*get(form))),
            Box::new(move |form: &mut F, value: FieldValue| {
                *get_mut(form) = match value {
                    FieldValue::Flag(set) => set,
                    other => !other.is_blank() && other.as_text() != "0",
                };
            }),
        )
    }

    /// A repeated field bound from `name[]` / `name[N]` parameters.
    pub fn list(
        self,
        name: &'static str,
        get: fn(&F) -> &Vec<String>,
        get_mut: fn(&mut F) -> &mut Vec<String>,
    ) -> Self {
        self.push(
            name,
            Kind::List,
            Box::new(move |form: &F| FieldValue::List(get(form).clone())),
            Box::new(move |form: &mut F, value: FieldValue| {
                *get_mut(form) = match value {
                    FieldValue::List(items) => items,
                    FieldValue::Empty => Vec::new(),
                    other => vec![other.as_text().into_owned()],
                };
            }),
        )
    }

    /// A field exposed through a getter/setter pair, for values that are not
    /// stored as plain strings.
    pub fn accessor(
        self,
        name: &'static str,
        get: fn(&F) -> FieldValue,
        set: fn(&mut F, FieldValue),
    ) -> Self {
        self.push(name, Kind::Accessor, Box::new(get), Box::new(set))
    }

    /// Append every field of `base`, reached through the embedded base form.
    ///
    /// Used by form types that extend another form type.
    pub fn extend<B: 'static>(
        mut self,
        base: &'static Schema<B>,
        project: fn(&F) -> &B,
        project_mut: fn(&mut F) -> &mut B,
    ) -> Self {
        for (name, binding) in &base.fields {
            self = self.push(
                *name,
                binding.kind,
                Box::new(move |form: &F| (binding.get)(project(form))),
                Box::new(move |form: &mut F, value: FieldValue| {
                    (binding.set)(project_mut(form), value)
                }),
            );
        }
        self
    }
}

impl<F> Schema<F> {
    /// Name of the form type.
    pub fn form_name(&self) -> &'static str {
        self.form
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields.iter().map(|(name, _)| *name)
    }

    /// True if the table has a field called `name`.
    pub fn has_field(&self, name: &str) -> bool {
        self.binding(name).is_some()
    }

    /// True if `name` is a repeated field.
    pub fn is_list(&self, name: &str) -> bool {
        self.binding(name)
            .is_some_and(|binding| binding.kind == Kind::List)
    }

    fn binding(&self, name: &str) -> Option<&Binding<F>> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, binding)| binding)
    }

    /// Read field `name`, or entry `index` of a repeated field.
    pub fn read(&self, form: &F, name: &str, index: Option<usize>) -> Result<FieldValue, FormError> {
        let binding = self
            .binding(name)
            .ok_or_else(|| FormError::unknown_field(self.form, name))?;
        let value = (binding.get)(form);
        match index {
            None => Ok(value),
            Some(index) => value.at(index).ok_or_else(|| FormError::NotIndexed {
                form: self.form,
                field: name.to_string(),
            }),
        }
    }

    /// Write `value` onto field `name`.
    pub fn write(&self, form: &mut F, name: &str, value: FieldValue) -> Result<(), FormError> {
        let binding = self
            .binding(name)
            .ok_or_else(|| FormError::unknown_field(self.form, name))?;
        (binding.set)(form, value);
        Ok(())
    }
}

impl<F> fmt::Debug for Schema<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Schema")
            .field("form", &self.form)
            .field(
                "fields",
                &self
                    .fields
                    .iter()
                    .map(|(name, binding)| (*name, binding.kind))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::OnceLock;

    #[derive(Debug, Default)]
    struct Profile {
        name: String,
        public: bool,
        tags: Vec<String>,
        age: Option<u32>,
    }

    #[derive(Debug, Default)]
    struct AdminProfile {
        profile: Profile,
        role: String,
    }

    fn profile_schema() -> &'static Schema<Profile> {
        static SCHEMA: OnceLock<Schema<Profile>> = OnceLock::new();
        SCHEMA.get_or_init(|| {
            Schema::<Profile>::new("Profile")
                .text("name", |f| &f.name, |f| &mut f.name)
                .flag("public", |f| &f.public, |f| &mut f.public)
                .list("tags", |f| &f.tags, |f| &mut f.tags)
                .accessor(
                    "age",
                    |f| FieldValue::from(f.age.map(|age| age.to_string())),
                    |f, value| f.age = value.as_text().parse().ok(),
                )
        })
    }

    #[test]
    fn text_round_trip_is_verbatim() {
        let mut profile = Profile::default();
        let schema = profile_schema();
        schema
            .write(&mut profile, "name", FieldValue::from("  O'Brien <x> "))
            .unwrap();
        assert_eq!(
            schema.read(&profile, "name", None).unwrap(),
            FieldValue::from("  O'Brien <x> ")
        );
    }

    #[test]
    fn flag_accepts_checkbox_values() {
        let mut profile = Profile::default();
        let schema = profile_schema();
        schema.write(&mut profile, "public", FieldValue::from("1")).unwrap();
        assert!(profile.public);
        schema.write(&mut profile, "public", FieldValue::from("0")).unwrap();
        assert!(!profile.public);
    }

    #[test]
    fn list_fields_support_indexed_reads() {
        let mut profile = Profile::default();
        let schema = profile_schema();
        let tags = FieldValue::List(vec!["red".into(), "blue".into()]);
        schema.write(&mut profile, "tags", tags).unwrap();

        assert_eq!(
            schema.read(&profile, "tags", Some(1)).unwrap(),
            FieldValue::from("blue")
        );
        assert!(schema.is_list("tags"));
    }

    #[test]
    fn indexing_a_scalar_field_is_an_error() {
        let profile = Profile::default();
        let err = profile_schema().read(&profile, "name", Some(0)).unwrap_err();
        assert!(matches!(err, FormError::NotIndexed { .. }));
    }

    #[test]
    fn accessor_fields_convert_on_write() {
        let mut profile = Profile::default();
        let schema = profile_schema();
        schema.write(&mut profile, "age", FieldValue::from("42")).unwrap();
        assert_eq!(profile.age, Some(42));
        schema.write(&mut profile, "age", FieldValue::from("abc")).unwrap();
        assert_eq!(profile.age, None);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let mut profile = Profile::default();
        let err = profile_schema()
            .write(&mut profile, "nickname", FieldValue::from("x"))
            .unwrap_err();
        assert!(matches!(err, FormError::UnknownField { form: "Profile", .. }));
    }

    #[test]
    fn extended_schema_reaches_base_fields() {
        let schema = Schema::<AdminProfile>::new("AdminProfile")
            .extend(profile_schema(), |f| &f.profile, |f| &mut f.profile)
            .text("role", |f| &f.role, |f| &mut f.role);

        let mut admin = AdminProfile::default();
        schema.write(&mut admin, "name", FieldValue::from("root")).unwrap();
        schema.write(&mut admin, "role", FieldValue::from("ops")).unwrap();

        assert_eq!(admin.profile.name, "root");
        assert_eq!(
            schema.field_names().collect::<Vec<_>>(),
            ["name", "public", "tags", "age", "role"]
        );
    }
}
