//! The client-side validation runtime
//!
//! The `onsubmit` handlers rendered by [`Html::form_attrs`](crate::Html::form_attrs)
//! call into `formkit.Form`, which pages load as a static script. It clears the
//! `ul.errors` lists, runs the generated checks, fills the lists with the
//! messages the server would have produced and focuses the first failing
//! field.

use chrono::{DateTime, Duration, Utc};

use crate::Response;

/// Source of the client runtime.
pub const CLIENT_SCRIPT: &str = include_str!("../data/formkit.js");

/// How long clients may cache the runtime, in seconds.
pub const CACHE_SECONDS: i64 = 5 * 60;

/// Serve the client runtime with caching headers relative to the current time.
pub fn client_script_response() -> Response {
    client_script_response_at(Utc::now())
}

/// Serve the client runtime as if the current time were `now`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use formkit::script::client_script_response_at;
///
/// let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
/// let response = client_script_response_at(now);
/// assert_eq!(response.header("Expires"), Some("Fri, 01 Mar 2024 12:05:00 GMT"));
/// ```
pub fn client_script_response_at(now: DateTime<Utc>) -> Response {
    let expires = now + Duration::seconds(CACHE_SECONDS);
    Response::new(200)
        .with_header("Content-Type", "application/javascript")
        .with_header("Pragma", "public")
        .with_header("Cache-Control", format!("max-age={CACHE_SECONDS}"))
        .with_header(
            "Expires",
            expires.format("%a, %d %b %Y %H:%M:%S GMT").to_string(),
        )
        .with_body(CLIENT_SCRIPT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn headers_allow_five_minutes_of_caching() {
        let now = Utc.with_ymd_and_hms(2023, 12, 31, 23, 58, 30).unwrap();
        let response = client_script_response_at(now);
        assert_eq!(response.header("Content-Type"), Some("application/javascript"));
        assert_eq!(response.header("Pragma"), Some("public"));
        assert_eq!(response.header("Cache-Control"), Some("max-age=300"));
        assert_eq!(response.header("Expires"), Some("Mon, 01 Jan 2024 00:03:30 GMT"));
    }

    #[test]
    fn runtime_defines_what_generated_scripts_call() {
        for member in [
            "formkit.Form = function",
            "prototype.submit",
            "prototype.get",
            "prototype.length",
            "prototype.error",
            "ul.errors.",
        ] {
            assert!(CLIENT_SCRIPT.contains(member), "missing {member}");
        }
    }
}
