//! Test helpers for forms and validators
//!
//! [`submit`] binds and validates a form the way an action would; the
//! assertion macros check the resulting [`Validation`](crate::Validation).
//!
//! ```rust
//! use formkit::addressbook::AddressForm;
//! use formkit::testing::submit;
//! use formkit::{assert_failure, assert_success};
//!
//! let rejected = submit::<AddressForm>(&[("firstName", "Al")]);
//! assert_failure!(rejected.to_validation());
//!
//! let accepted = submit::<AddressForm>(&[
//!     ("firstName", "Al"),
//!     ("lastName", "Smith"),
//!     ("street", "Main"),
//!     ("zipCode", "12345"),
//!     ("city", "X"),
//!     ("country", "uk"),
//! ]);
//! assert_success!(accepted.to_validation());
//! ```

use crate::{Catalog, Form, FormState, Params};

/// Bind `params` onto a fresh `F` and validate it with the built-in messages.
///
/// Panics if the form or its validators are wired up wrongly.
///
/// ```rust
/// use formkit::addressbook::AddressForm;
/// use formkit::testing::submit;
///
/// let state = submit::<AddressForm>(&[("firstName", "Al"), ("zipCode", "1234")]);
/// assert_eq!(state.errors("zipCode"), ["Please enter a valid value"]);
/// assert_eq!(state.errors("city"), ["This field is required."]);
/// ```
pub fn submit<F: Form>(params: &[(&str, &str)]) -> FormState<F> {
    let mut state = FormState::<F>::default();
    state.bind(&params.iter().copied().collect::<Params>());
    if let Err(err) = state.validate(&Catalog::new()) {
        panic!("validation of {} failed: {err}", F::schema().form_name());
    }
    state
}

/// Panic with the errors unless the validation is a `Success`.
#[macro_export]
macro_rules! assert_success {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Success(_) => {}
            $crate::Validation::Failure(e) => {
                panic!("submission rejected: {:?}", e);
            }
        }
    };
}

/// Panic with the value unless the validation is a `Failure`.
#[macro_export]
macro_rules! assert_failure {
    ($validation:expr) => {
        match $validation {
            $crate::Validation::Failure(_) => {}
            $crate::Validation::Success(v) => {
                panic!("submission accepted: {:?}", v);
            }
        }
    };
}

/// Assert that a validation fails with exactly the listed field errors.
///
/// Fields not listed must have no errors. Messages are compared in order.
///
/// # Example
///
/// ```rust
/// use formkit::{FieldErrors, Validation, assert_field_errors};
///
/// let mut errors = FieldErrors::new();
/// errors.add("zipCode", "Please enter a valid value");
/// let val = Validation::<(), _>::failure(errors);
///
/// assert_field_errors!(val, {
///     "zipCode" => ["Please enter a valid value"],
/// });
/// ```
#[macro_export]
macro_rules! assert_field_errors {
    ($validation:expr, { $($field:expr => [$($message:expr),* $(,)?]),* $(,)? }) => {
        match $validation {
            $crate::Validation::Failure(errors) => {
                let errors: $crate::FieldErrors = errors;
                let expected: ::std::vec::Vec<(&str, ::std::vec::Vec<&str>)> =
                    ::std::vec![$(($field, ::std::vec![$($message),*])),*];
                let actual: ::std::vec::Vec<(&str, ::std::vec::Vec<&str>)> = errors
                    .iter()
                    .map(|(field, messages)| {
                        (field, messages.iter().map(::std::string::String::as_str).collect())
                    })
                    .collect();
                let mut expected_sorted = expected.clone();
                expected_sorted.sort();
                let mut actual_sorted = actual.clone();
                actual_sorted.sort();
                assert_eq!(
                    actual_sorted, expected_sorted,
                    "field errors differ: got {:?}, expected {:?}", actual, expected
                );
            }
            $crate::Validation::Success(v) => {
                panic!("submission accepted, expected field errors: {:?}", v);
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::addressbook::AddressForm;
    use crate::{FieldErrors, Validation};

    use super::submit;

    fn rejected(field: &str, message: &str) -> Validation<AddressForm, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        Validation::Failure(errors)
    }

    #[test]
    #[should_panic(expected = "submission rejected")]
    fn assert_success_reports_the_errors() {
        assert_success!(rejected("city", "This field is required."));
    }

    #[test]
    #[should_panic(expected = "submission accepted")]
    fn assert_failure_reports_the_value() {
        assert_failure!(Validation::<_, FieldErrors>::success(AddressForm::default()));
    }

    #[test]
    fn assert_field_errors_ignores_field_order() {
        let mut errors = FieldErrors::new();
        errors.add("zipCode", "Please enter a valid value");
        errors.add("city", "This field is required.");
        assert_field_errors!(Validation::<(), _>::failure(errors), {
            "city" => ["This field is required."],
            "zipCode" => ["Please enter a valid value"],
        });
    }

    #[test]
    #[should_panic(expected = "field errors differ")]
    fn assert_field_errors_rejects_unlisted_fields() {
        let mut errors = FieldErrors::new();
        errors.add("firstName", "Please enter at least 2 characters");
        errors.add("lastName", "This field is required.");
        assert_field_errors!(Validation::<(), _>::failure(errors), {
            "firstName" => ["Please enter at least 2 characters"],
        });
    }

    #[test]
    #[should_panic(expected = "expected field errors")]
    fn assert_field_errors_panics_on_success() {
        assert_field_errors!(Validation::<_, FieldErrors>::success(1), {
            "firstName" => ["Please enter at least 2 characters"],
        });
    }

    #[test]
    fn submit_binds_and_validates() {
        let state = submit::<AddressForm>(&[
            ("firstName", "Al"),
            ("lastName", "Smith"),
            ("street", "Main"),
            ("zipCode", "12345"),
            ("city", "X"),
            ("country", "germany"),
        ]);
        assert!(!state.has_errors());
        assert_eq!(state.data().city, "X");
        assert_success!(state.to_validation());
    }
}
