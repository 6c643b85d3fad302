//! Validation outcome of a form submission
//!
//! Parsing a form never throws the user back to the input page. It produces
//! a [`Validation`]: the bound value, or every error found while binding it.
//! The action decides what to render.
//!
//! ```
//! use formkit::{FieldErrors, Validation};
//!
//! let mut errors = FieldErrors::new();
//! errors.add("zipCode", "Please enter a valid value");
//!
//! let parsed: Validation<String, FieldErrors> = Validation::Failure(errors);
//! let shown = parsed.map_err(|errors| format!("{} field(s) to fix", errors.len()));
//! assert_eq!(shown, Validation::Failure("1 field(s) to fix".to_string()));
//! ```
//!
//! Two submissions parsed in one request combine with [`Validation::and`];
//! their field errors are merged, not short-circuited:
//!
//! ```
//! use formkit::{FieldErrors, Validation};
//!
//! let mut address = FieldErrors::new();
//! address.add("city", "This field is required.");
//! let mut account = FieldErrors::new();
//! account.add("password", "The passwords do not match.");
//!
//! let both = Validation::<(), _>::Failure(address).and(Validation::<(), _>::Failure(account));
//! let errors = both.errors().unwrap();
//! assert_eq!(errors.fields().collect::<Vec<_>>(), ["city", "password"]);
//! ```

use crate::Semigroup;

/// Either a validated value or the accumulated errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation<T, E> {
    /// Every check passed.
    Success(T),
    /// At least one check failed.
    Failure(E),
}

impl<T, E> Validation<T, E> {
    /// Wrap a validated value.
    #[inline]
    pub fn success(value: T) -> Self {
        Validation::Success(value)
    }

    /// Wrap the errors of a failed check.
    #[inline]
    pub fn failure(error: E) -> Self {
        Validation::Failure(error)
    }

    /// `Ok` for success, `Err` for failure.
    #[inline]
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Validation::Success(value) => Ok(value),
            Validation::Failure(error) => Err(error),
        }
    }

    /// The validated value, dropping any errors.
    #[inline]
    pub fn ok(self) -> Option<T> {
        match self {
            Validation::Success(value) => Some(value),
            Validation::Failure(_) => None,
        }
    }

    /// True for [`Validation::Success`].
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, Validation::Success(_))
    }

    /// True for [`Validation::Failure`].
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Validation::Failure(_))
    }

    /// Apply `f` to the validated value.
    #[inline]
    pub fn map<U, F>(self, f: F) -> Validation<U, E>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Validation::Success(value) => Validation::Success(f(value)),
            Validation::Failure(error) => Validation::Failure(error),
        }
    }

    /// Apply `f` to the errors, e.g. to render the input page from them.
    #[inline]
    pub fn map_err<E2, F>(self, f: F) -> Validation<T, E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            Validation::Success(value) => Validation::Success(value),
            Validation::Failure(error) => Validation::Failure(f(error)),
        }
    }

    /// The errors of a failed validation.
    #[inline]
    pub fn errors(&self) -> Option<&E> {
        match self {
            Validation::Success(_) => None,
            Validation::Failure(error) => Some(error),
        }
    }
}

impl<T, E: Semigroup> Validation<T, E> {
    /// Pair two outcomes. Succeeds only if both do; otherwise carries the
    /// errors of every failed side, merged in order.
    pub fn and<U>(self, other: Validation<U, E>) -> Validation<(T, U), E> {
        match (self, other) {
            (Validation::Success(a), Validation::Success(b)) => Validation::Success((a, b)),
            (Validation::Failure(left), Validation::Failure(right)) => {
                Validation::Failure(left.combine(right))
            }
            (Validation::Failure(error), _) | (_, Validation::Failure(error)) => {
                Validation::Failure(error)
            }
        }
    }
}

impl<T, E> From<Validation<T, E>> for Result<T, E> {
    fn from(validation: Validation<T, E>) -> Self {
        validation.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldErrors;

    fn failed(field: &str, message: &str) -> Validation<u64, FieldErrors> {
        let mut errors = FieldErrors::new();
        errors.add(field, message);
        Validation::Failure(errors)
    }

    #[test]
    fn and_merges_field_errors_of_both_sides() {
        let merged = failed("firstName", "too short").and(failed("firstName", "too long"));
        assert_eq!(merged.errors().unwrap().get("firstName"), ["too short", "too long"]);
    }

    #[test]
    fn and_keeps_the_single_failure() {
        let merged = Validation::<_, FieldErrors>::success(1).and(failed("city", "required"));
        assert_eq!(merged.errors().unwrap().fields().collect::<Vec<_>>(), ["city"]);
    }

    #[test]
    fn and_pairs_successes() {
        let both = Validation::<_, FieldErrors>::success(1).and(Validation::success("Berlin"));
        assert_eq!(both.ok(), Some((1, "Berlin")));
    }

    #[test]
    fn map_err_turns_errors_into_a_page() {
        let page = failed("zipCode", "invalid").map_err(|errors| format!("<p>{}</p>", errors.len()));
        assert_eq!(page, Validation::Failure("<p>1</p>".to_string()));
    }

    #[test]
    fn converts_into_result() {
        let result: Result<u64, FieldErrors> = Validation::success(7).into();
        assert_eq!(result, Ok(7));
        assert!(failed("id", "required").into_result().is_err());
    }
}
