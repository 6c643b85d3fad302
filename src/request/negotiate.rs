//! `Accept` / `Accept-Language` negotiation

/// One entry of a quality-ranked header such as `Accept-Language`.
#[derive(Debug, Clone, PartialEq)]
pub struct Preference {
    /// The range itself, e.g. `de-DE` or `text/html`.
    pub value: String,
    /// The `q` parameter, `1.0` when absent.
    pub quality: f32,
    /// Other parameters in header order.
    pub extensions: Vec<(String, String)>,
}

/// Parse a comma separated value range into preferences, best first.
///
/// Entries of equal quality keep their header order. A value listed twice
/// keeps its last parameters but its first position.
///
/// ```
/// use formkit::request::parse_value_range;
///
/// let prefs = parse_value_range("de;q=0.8, en-US, fr;q=0.8");
/// let values: Vec<_> = prefs.iter().map(|p| p.value.as_str()).collect();
/// assert_eq!(values, ["en-US", "de", "fr"]);
/// ```
pub fn parse_value_range(header: &str) -> Vec<Preference> {
    let mut prefs: Vec<Preference> = Vec::new();
    for range in header.split(',') {
        let mut parts = range.split(';');
        let value = parts.next().unwrap_or_default().trim();
        if value.is_empty() {
            continue;
        }
        let mut quality = 1.0;
        let mut extensions = Vec::new();
        for param in parts {
            let (name, arg) = param.split_once('=').unwrap_or((param, ""));
            let (name, arg) = (name.trim(), arg.trim());
            if name == "q" {
                quality = parse_quality(arg);
            } else {
                extensions.push((name.to_string(), arg.to_string()));
            }
        }
        let pref = Preference {
            value: value.to_string(),
            quality,
            extensions,
        };
        match prefs.iter_mut().find(|p| p.value == pref.value) {
            Some(existing) => *existing = pref,
            None => prefs.push(pref),
        }
    }
    prefs.sort_by(|a, b| b.quality.total_cmp(&a.quality));
    prefs
}

/// A `q` value clamped to `0..=1`. Anything that is not a finite number
/// counts as `0`.
fn parse_quality(arg: &str) -> f32 {
    match arg.parse::<f32>() {
        Ok(quality) if quality.is_finite() => quality.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Match a requested locale against the available ones.
///
/// Comparison ignores case and treats `-` and `_` alike. The full locale is
/// tried first, then the language alone. The available spelling is returned.
///
/// ```
/// use formkit::request::match_locale;
///
/// let available = ["en", "de_DE", "de"];
/// assert_eq!(match_locale(&available, "de-de"), Some("de_DE"));
/// assert_eq!(match_locale(&available, "en-GB"), Some("en"));
/// assert_eq!(match_locale(&available, "fr"), None);
/// ```
pub fn match_locale<'a, S: AsRef<str>>(available: &'a [S], requested: &str) -> Option<&'a str> {
    let requested = normalize_locale(requested);
    let find = |wanted: &str| {
        available
            .iter()
            .map(AsRef::<str>::as_ref)
            .find(|candidate| normalize_locale(candidate) == wanted)
    };
    find(requested.as_str()).or_else(|| {
        requested
            .split_once('_')
            .and_then(|(language, _)| find(language))
    })
}

fn normalize_locale(locale: &str) -> String {
    locale.trim().replace('-', "_").to_lowercase()
}

/// Match a requested media range against the available media types.
///
/// `*` in the requested type or subtype matches anything. The first
/// available type that matches is returned.
///
/// ```
/// use formkit::request::match_media_type;
///
/// let available = ["application/json", "text/html"];
/// assert_eq!(match_media_type(&available, "text/*"), Some("text/html"));
/// assert_eq!(match_media_type(&available, "*/*"), Some("application/json"));
/// assert_eq!(match_media_type(&available, "image/png"), None);
/// ```
pub fn match_media_type<'a, S: AsRef<str>>(
    available: &'a [S],
    requested: &str,
) -> Option<&'a str> {
    let (kind, subtype) = split_media_type(requested);
    available.iter().map(AsRef::<str>::as_ref).find(|candidate| {
        let (candidate_kind, candidate_subtype) = split_media_type(candidate);
        (kind == "*" || kind == candidate_kind) && (subtype == "*" || subtype == candidate_subtype)
    })
}

fn split_media_type(media_type: &str) -> (&str, &str) {
    let essence = media_type.split(';').next().unwrap_or_default().trim();
    essence.split_once('/').unwrap_or((essence, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn malformed_quality_ranks_last() {
        let prefs = parse_value_range("de;q=NaN, fr;q=inf, it;q=7, en;q=0.5, es;q=abc");
        let ranked: Vec<_> = prefs.iter().map(|p| (p.value.as_str(), p.quality)).collect();
        assert_eq!(
            ranked,
            [("it", 1.0), ("en", 0.5), ("de", 0.0), ("fr", 0.0), ("es", 0.0)]
        );
    }

    #[test]
    fn negative_quality_is_zero() {
        assert_eq!(parse_value_range("en;q=-1")[0].quality, 0.0);
    }

    #[test]
    fn extensions_are_kept_and_quality_is_parsed() {
        let prefs = parse_value_range("text/html;level=1;q=0.5");
        assert_eq!(prefs.len(), 1);
        assert_eq!(prefs[0].quality, 0.5);
        assert_eq!(prefs[0].extensions, [("level".to_string(), "1".to_string())]);
    }

    #[test]
    fn browser_accept_header() {
        let prefs = parse_value_range(
            "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
        );
        let values: Vec<_> = prefs.iter().map(|p| p.value.as_str()).collect();
        assert_eq!(
            values,
            ["text/html", "application/xhtml+xml", "application/xml", "*/*"]
        );
    }

    #[test]
    fn empty_header_yields_nothing() {
        assert!(parse_value_range("").is_empty());
        assert!(parse_value_range(" , ").is_empty());
    }

    #[test]
    fn exact_locale_beats_language_match() {
        let available = ["de", "de_AT"];
        assert_eq!(match_locale(&available, "de-AT"), Some("de_AT"));
        assert_eq!(match_locale(&available, "de-CH"), Some("de"));
    }

    #[test]
    fn media_type_parameters_are_ignored() {
        let available = ["text/html; charset=utf-8"];
        assert_eq!(
            match_media_type(&available, "text/html;q=0.9"),
            Some("text/html; charset=utf-8")
        );
    }

    proptest! {
        #[test]
        fn prop_preferences_are_sorted_by_quality(
            qualities in prop::collection::vec(0u8..=10, 1..8)
        ) {
            let header = qualities
                .iter()
                .enumerate()
                .map(|(i, q)| format!("v{i};q={}", f32::from(*q) / 10.0))
                .collect::<Vec<_>>()
                .join(",");
            let prefs = parse_value_range(&header);
            prop_assert_eq!(prefs.len(), qualities.len());
            for pair in prefs.windows(2) {
                prop_assert!(pair[0].quality >= pair[1].quality);
            }
        }
    }
}
