use super::{field_list, js_field, read_text, report, script_header, Validator};
use crate::catalog::REQUIRED;
use crate::{Catalog, FormAccess, FormError};

/// Fails every listed field whose value is blank.
///
/// Blank means empty text, an unchecked flag, an empty list or no value at
/// all. The text `"0"` is a value.
#[derive(Debug, Clone)]
pub struct RequireValidator {
    fields: Vec<String>,
}

impl RequireValidator {
    /// Require each of `fields`.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            fields: field_list(fields),
        }
    }
}

impl Validator for RequireValidator {
    fn validate(&self, form: &mut dyn FormAccess, catalog: &Catalog) -> Result<(), FormError> {
        let message = catalog.message(REQUIRED);
        for field in &self.fields {
            if read_text(form, field)?.is_blank() {
                report(form, field, &message);
            }
        }
        Ok(())
    }

    fn script(&self, catalog: &Catalog) -> Option<String> {
        let mut script = script_header(&catalog.message(REQUIRED));
        for field in &self.fields {
            let field = js_field(field);
            script.push_str(&format!("if (!this.get({field})) this.error({field}, m);\n"));
        }
        Some(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::test_support::state;

    #[test]
    fn blank_fields_fail() {
        let mut form = state("", "0", " ");
        RequireValidator::new(["a", "b", "c", "on"])
            .validate(&mut form, &Catalog::new())
            .unwrap();

        assert_eq!(form.errors("a"), ["This field is required."]);
        assert!(!form.has_field_errors("b"));
        assert!(!form.has_field_errors("c"));
        assert!(form.has_field_errors("on"));
    }

    #[test]
    fn script_checks_every_field() {
        let script = RequireValidator::new(["a", "b"])
            .script(&Catalog::new())
            .unwrap();
        assert_eq!(
            script,
            "var m = 'This field is required.';\n\
             if (!this.get('a')) this.error('a', m);\n\
             if (!this.get('b')) this.error('b', m);\n"
        );
    }

    #[test]
    fn script_escapes_translated_messages() {
        let mut catalog = Catalog::new();
        catalog.add_message(REQUIRED, "Don't leave this empty");
        let script = RequireValidator::new(["a"]).script(&catalog).unwrap();
        assert!(script.starts_with("var m = 'Don\\'t leave this empty';\n"));
    }
}
