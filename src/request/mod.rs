//! The incoming request: parameters, headers, paths and negotiation
//!
//! [`Request`] is an immutable snapshot built by the host server adapter. It
//! answers the questions templates and actions ask: what was submitted, where
//! the application root is relative to the current URL, and which locale and
//! media type the client prefers.

mod negotiate;
mod params;

pub use negotiate::{match_locale, match_media_type, parse_value_range, Preference};
pub use params::Params;

use std::path::{Path, PathBuf, MAIN_SEPARATOR};

/// No acceptable media type was requested.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("No acceptable media type found. Required: {}. Requested: {}.", .required.join(", "), .requested.join(", "))]
pub struct NotAcceptable {
    /// Media types the handler can produce.
    pub required: Vec<String>,
    /// Media ranges the client asked for, best first.
    pub requested: Vec<String>,
}

/// Snapshot of one HTTP request.
#[derive(Debug, Clone, Default)]
pub struct Request {
    method: String,
    request_uri: String,
    script_name: String,
    script_filename: PathBuf,
    base_dir: Option<PathBuf>,
    base_url: Option<String>,
    headers: Vec<(String, String)>,
    params: Params,
}

impl Request {
    /// Start building a request for `method` and `request_uri` (path plus
    /// optional query string). Query parameters are parsed right away.
    ///
    /// ```
    /// use formkit::Request;
    ///
    /// let request = Request::builder("GET", "/address?id=3").build();
    /// assert_eq!(request.path(), "/address");
    /// assert_eq!(request.param("id"), Some("3"));
    /// ```
    pub fn builder(method: impl Into<String>, request_uri: impl Into<String>) -> RequestBuilder {
        let request_uri = request_uri.into();
        let params = request_uri
            .split_once('?')
            .map(|(_, query)| Params::from_urlencoded(query))
            .unwrap_or_default();
        RequestBuilder {
            request: Request {
                method: method.into(),
                script_name: String::new(),
                request_uri,
                params,
                ..Request::default()
            },
        }
    }

    /// HTTP method, upper case as received.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Request path without the query string.
    pub fn path(&self) -> &str {
        self.request_uri
            .split_once('?')
            .map_or(self.request_uri.as_str(), |(path, _)| path)
    }

    /// All parameters (query string first, then body).
    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Last submitted value of parameter `name`.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name)
    }

    /// Parameter `name`, or `default` when it was not submitted.
    pub fn param_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.params.get_or(name, default)
    }

    /// Value of header `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Relative URL of the application root as seen from the current request,
    /// `"."` when the request is already at the root.
    ///
    /// Derived by comparing how deep the executing script sits below the base
    /// directory with how deep the request path is, so the same application
    /// works at any mount point without configuration.
    ///
    /// ```
    /// use formkit::Request;
    ///
    /// let request = Request::builder("POST", "/app/actions/add")
    ///     .script("/app/actions/add", "/srv/www/app/actions/add.rs")
    ///     .base_dir("/srv/www/app")
    ///     .build();
    /// assert_eq!(request.base_url(), "..");
    /// ```
    pub fn base_url(&self) -> String {
        if let Some(base_url) = &self.base_url {
            return base_url.clone();
        }
        let Some(base_dir) = &self.base_dir else {
            return ".".to_string();
        };
        let script_dir = self.script_filename.parent().unwrap_or(Path::new(""));
        let depth = separators(script_dir) as isize - separators(base_dir) as isize
            - slashes(&self.script_name) as isize
            + slashes(self.path()) as isize;
        if depth <= 0 {
            ".".to_string()
        } else {
            vec![".."; depth as usize].join("/")
        }
    }

    /// Resolve `url` (relative to the application root) against the current
    /// request.
    ///
    /// ```
    /// use formkit::Request;
    ///
    /// let request = Request::builder("GET", "/").base_url("../..").build();
    /// assert_eq!(request.build_url("index"), "../../index");
    /// assert_eq!(request.build_url(""), "../../");
    ///
    /// let root = Request::builder("GET", "/").build();
    /// assert_eq!(root.build_url("index"), "index");
    /// assert_eq!(root.build_url(""), "./");
    /// ```
    pub fn build_url(&self, url: &str) -> String {
        let base_url = self.base_url();
        if base_url != "." || url.is_empty() {
            format!("{base_url}/{url}")
        } else {
            url.to_string()
        }
    }

    /// Media ranges from the `Accept` header, best first. Without the header
    /// the client accepts anything (`*/*`).
    pub fn media_types(&self) -> Vec<String> {
        match self.header("Accept") {
            Some(accept) => parse_value_range(accept)
                .into_iter()
                .map(|pref| pref.value)
                .collect(),
            None => vec!["*/*".to_string()],
        }
    }

    /// The first of `allowed` that the client accepts, trying the client's
    /// preferences in order.
    pub fn require_media_type<'a, S: AsRef<str>>(
        &self,
        allowed: &'a [S],
    ) -> Result<&'a str, NotAcceptable> {
        let requested = self.media_types();
        requested
            .iter()
            .find_map(|range| match_media_type(allowed, range))
            .ok_or_else(|| NotAcceptable {
                required: allowed.iter().map(|s| s.as_ref().to_string()).collect(),
                requested,
            })
    }

    /// Locales from `Accept-Language`, best first.
    pub fn locales(&self) -> Vec<String> {
        self.header("Accept-Language")
            .map(parse_value_range)
            .unwrap_or_default()
            .into_iter()
            .map(|pref| pref.value)
            .collect()
    }

    /// Requested locales mapped onto `available`, best first, without
    /// duplicates.
    pub fn matching_locales<'a, S: AsRef<str>>(&self, available: &'a [S]) -> Vec<&'a str> {
        let mut result: Vec<&'a str> = Vec::new();
        for locale in self.locales() {
            if let Some(found) = match_locale(available, &locale) {
                if !result.contains(&found) {
                    result.push(found);
                }
            }
        }
        result
    }

    /// The best available locale, or `default`.
    pub fn locale<'a, S: AsRef<str>>(&self, available: &'a [S], default: &'a str) -> &'a str {
        self.matching_locales(available)
            .first()
            .copied()
            .unwrap_or(default)
    }
}

fn slashes(path: &str) -> usize {
    path.matches('/').count()
}

fn separators(path: &Path) -> usize {
    path.to_string_lossy().matches(MAIN_SEPARATOR).count()
}

/// Builder for [`Request`].
#[derive(Debug)]
pub struct RequestBuilder {
    request: Request,
}

impl RequestBuilder {
    /// Add a header.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((name.into(), value.into()));
        self
    }

    /// Append one body parameter.
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.params.push(name, value);
        self
    }

    /// Append several body parameters.
    pub fn params<K, V>(mut self, params: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in params {
            self.request.params.push(name, value);
        }
        self
    }

    /// Append the parameters of an urlencoded form body.
    pub fn form_body(mut self, body: &str) -> Self {
        for (name, value) in Params::from_urlencoded(body).iter() {
            self.request.params.push(name, value);
        }
        self
    }

    /// URL path of the executing handler and the file that implements it.
    pub fn script(mut self, script_name: impl Into<String>, script_filename: impl Into<PathBuf>) -> Self {
        self.request.script_name = script_name.into();
        self.request.script_filename = script_filename.into();
        self
    }

    /// Directory that corresponds to the application root.
    pub fn base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.request.base_dir = Some(base_dir.into());
        self
    }

    /// Use a fixed base URL instead of deriving it.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.request.base_url = Some(base_url.into());
        self
    }

    /// Finish the request.
    pub fn build(self) -> Request {
        self.request
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deployed(uri: &str, script_name: &str, script_file: &str) -> Request {
        Request::builder("GET", uri)
            .script(script_name, script_file)
            .base_dir("/srv/www/book")
            .build()
    }

    #[test]
    fn base_url_at_root_is_dot() {
        let request = deployed("/book/index", "/book/index", "/srv/www/book/index.rs");
        assert_eq!(request.base_url(), ".");
        assert_eq!(request.build_url("add"), "add");
    }

    #[test]
    fn base_url_climbs_out_of_sub_directories_and_path_info() {
        let request = deployed(
            "/book/actions/change/extra",
            "/book/actions/change",
            "/srv/www/book/actions/change.rs",
        );
        assert_eq!(request.base_url(), "../..");
        assert_eq!(request.build_url("index"), "../../index");
    }

    #[test]
    fn query_string_does_not_count_as_depth() {
        let request = deployed(
            "/book/address?return=/book/list",
            "/book/address",
            "/srv/www/book/address.rs",
        );
        assert_eq!(request.base_url(), ".");
    }

    #[test]
    fn headers_are_case_insensitive() {
        let request = Request::builder("GET", "/")
            .header("accept-language", "de")
            .build();
        assert_eq!(request.header("Accept-Language"), Some("de"));
    }

    #[test]
    fn locale_negotiation_prefers_client_order() {
        let request = Request::builder("GET", "/")
            .header("Accept-Language", "fr;q=0.3, de-AT, en;q=0.7")
            .build();
        let available = ["en", "de"];
        assert_eq!(request.matching_locales(&available), ["de", "en"]);
        assert_eq!(request.locale(&available, "en"), "de");
    }

    #[test]
    fn locale_falls_back_to_default() {
        let request = Request::builder("GET", "/").build();
        assert!(request.locales().is_empty());
        assert_eq!(request.locale(&["de"], "en"), "en");
    }

    #[test]
    fn require_media_type_accepts_wildcards() {
        let request = Request::builder("GET", "/")
            .header("Accept", "image/*;q=0.5, application/json")
            .build();
        assert_eq!(
            request.require_media_type(&["image/png", "application/json"]),
            Ok("application/json")
        );
    }

    #[test]
    fn missing_accept_header_accepts_anything() {
        let request = Request::builder("GET", "/").build();
        assert_eq!(request.require_media_type(&["text/html"]), Ok("text/html"));
    }

    #[test]
    fn require_media_type_reports_both_sides() {
        let request = Request::builder("GET", "/")
            .header("Accept", "image/png")
            .build();
        let err = request.require_media_type(&["text/html"]).unwrap_err();
        assert_eq!(err.required, ["text/html"]);
        assert_eq!(err.requested, ["image/png"]);
    }

    #[test]
    fn body_and_query_parameters_are_merged() {
        let request = Request::builder("POST", "/actions/change?id=4")
            .form_body("firstName=Al&lastName=Smith")
            .build();
        assert_eq!(request.param("id"), Some("4"));
        assert_eq!(request.param("lastName"), Some("Smith"));
        assert_eq!(request.param_or("city", "?"), "?");
    }
}
