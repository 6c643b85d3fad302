//! Responses produced by pages and actions

use crate::request::NotAcceptable;

/// An HTTP response handed back to the host server adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: u16,
    headers: Vec<(String, String)>,
    body: String,
}

impl Response {
    /// A response with `status`, no headers and an empty body.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// `200 OK` with an HTML body.
    pub fn html(body: impl Into<String>) -> Self {
        Self::new(200)
            .with_header("Content-Type", "text/html; charset=utf-8")
            .with_body(body)
    }

    /// A plain text response.
    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self::new(status)
            .with_header("Content-Type", "text/plain; charset=utf-8")
            .with_body(body)
    }

    /// `302 Found` pointing at `location`.
    ///
    /// ```
    /// use formkit::Response;
    ///
    /// let response = Response::redirect("../index");
    /// assert_eq!(response.status(), 302);
    /// assert_eq!(response.location(), Some("../index"));
    /// ```
    pub fn redirect(location: impl Into<String>) -> Self {
        Self::new(302).with_header("Location", location)
    }

    /// `406 Not Acceptable` listing the required and the requested media types.
    pub fn not_acceptable(err: &NotAcceptable) -> Self {
        Self::text(406, err.to_string())
    }

    /// Add a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Replace the body.
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// The status code.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// All headers in the order they were added.
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// The redirect target, if any.
    pub fn location(&self) -> Option<&str> {
        self.header("Location")
    }

    /// The body.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// True for `3xx` responses.
    pub fn is_redirect(&self) -> bool {
        (300..400).contains(&self.status)
    }
}
