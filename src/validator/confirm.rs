use super::{js_field, read_text, report, script_header, Validator};
use crate::catalog::PASSWORD_CONFIRM;
use crate::{Catalog, FormAccess, FormError};

/// Fails when a password and its confirmation differ.
///
/// The error is recorded on the password field.
#[derive(Debug, Clone)]
pub struct PasswordConfirmValidator {
    password: String,
    confirmation: String,
}

impl PasswordConfirmValidator {
    /// Compare `password` with `confirmation`.
    pub fn new(password: impl Into<String>, confirmation: impl Into<String>) -> Self {
        Self {
            password: password.into(),
            confirmation: confirmation.into(),
        }
    }
}

impl Validator for PasswordConfirmValidator {
    fn validate(&self, form: &mut dyn FormAccess, catalog: &Catalog) -> Result<(), FormError> {
        let password = read_text(form, &self.password)?;
        let confirmation = read_text(form, &self.confirmation)?;
        if password.as_text() != confirmation.as_text() {
            report(form, &self.password, &catalog.message(PASSWORD_CONFIRM));
        }
        Ok(())
    }

    fn script(&self, catalog: &Catalog) -> Option<String> {
        let password = js_field(&self.password);
        let confirmation = js_field(&self.confirmation);
        let mut script = script_header(&catalog.message(PASSWORD_CONFIRM));
        script.push_str(&format!(
            "if (this.get({password}) != this.get({confirmation})) this.error({password}, m);\n"
        ));
        Some(script)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::test_support::state;

    #[test]
    fn mismatch_is_reported_on_the_password_field() {
        let mut form = state("secret", "secreT", "");
        PasswordConfirmValidator::new("a", "b")
            .validate(&mut form, &Catalog::new())
            .unwrap();
        assert_eq!(form.errors("a"), ["The passwords do not match."]);
        assert!(!form.has_field_errors("b"));
    }

    #[test]
    fn equal_values_pass() {
        let mut form = state("secret", "secret", "");
        PasswordConfirmValidator::new("a", "b")
            .validate(&mut form, &Catalog::new())
            .unwrap();
        assert!(!form.has_errors());
    }

    #[test]
    fn unknown_confirmation_field_is_an_error() {
        let mut form = state("", "", "");
        let err = PasswordConfirmValidator::new("a", "again")
            .validate(&mut form, &Catalog::new())
            .unwrap_err();
        assert!(matches!(err, FormError::UnknownField { .. }));
    }

    #[test]
    fn script_compares_both_fields() {
        let script = PasswordConfirmValidator::new("password", "password2")
            .script(&Catalog::new())
            .unwrap();
        assert!(script.ends_with(
            "if (this.get('password') != this.get('password2')) this.error('password', m);\n"
        ));
    }
}
