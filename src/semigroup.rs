//! Semigroup trait for accumulating validation errors
//!
//! Field errors are collected rather than short-circuited: every validator in a
//! chain runs, and checks performed outside the chain (an action looking up a
//! record, say) are merged into the same error set. A `Semigroup` is the
//! associative "merge" that makes this possible.
//!
//! # Laws
//!
//! ```text
//! a.combine(b).combine(c) == a.combine(b.combine(c))
//! ```
//!
//! # Examples
//!
//! ```
//! use formkit::{FieldErrors, Semigroup};
//!
//! let mut a = FieldErrors::new();
//! a.add("zipCode", "Please enter a valid value");
//!
//! let mut b = FieldErrors::new();
//! b.add("id", "No address with ID 7 found");
//!
//! let merged = a.combine(b);
//! assert!(merged.has("zipCode"));
//! assert!(merged.has("id"));
//! ```

/// A type that supports an associative binary operation
///
/// `combine` takes `self` by value. Clone first if the originals are still
/// needed.
pub trait Semigroup: Sized {
    /// Combine this value with another value associatively
    ///
    /// # Examples
    ///
    /// ```
    /// use formkit::Semigroup;
    ///
    /// let v1 = vec!["required"];
    /// let v2 = vec!["too short"];
    /// assert_eq!(v1.combine(v2), vec!["required", "too short"]);
    /// ```
    fn combine(self, other: Self) -> Self;
}

impl<T> Semigroup for Vec<T> {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.extend(other);
        self
    }
}

impl Semigroup for String {
    #[inline]
    fn combine(mut self, other: Self) -> Self {
        self.push_str(&other);
        self
    }
}
