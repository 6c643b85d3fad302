use regex::{Regex, RegexBuilder};

use super::{field_list, js_field, read_text, report, script_header, Validator};
use crate::catalog::MASK;
use crate::html::escape_js;
use crate::{Catalog, FormAccess, FormError};

/// Fails fields whose value does not match a regular expression.
///
/// The expression is searched anywhere in the value; anchor it with `^` and
/// `$` to match the whole value. Empty values are checked too, so combine it
/// with [`RequireValidator`](crate::RequireValidator) or write a mask that
/// accepts the empty string for optional fields.
///
/// The same expression runs in the browser, so masks should stay within the
/// syntax both regex engines share.
///
/// ```
/// use formkit::MaskValidator;
///
/// let zip = MaskValidator::new("^[0-9]{5}$", ["zipCode"]).unwrap();
/// assert_eq!(zip.pattern(), "^[0-9]{5}$");
///
/// let code = MaskValidator::parse("/^[a-z]{3}$/i", ["code"]).unwrap();
/// assert_eq!(code.flags(), "i");
/// assert!(MaskValidator::new("([0-9]", ["broken"]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct MaskValidator {
    mask: String,
    pattern: String,
    flags: String,
    regex: Regex,
    fields: Vec<String>,
}

impl MaskValidator {
    /// Check `fields` against `pattern`.
    pub fn new<I, S>(pattern: &str, fields: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(pattern, pattern, "", field_list(fields))
    }

    /// Check `fields` against a mask written as `/pattern/flags`.
    ///
    /// Supported flags are `i` (case-insensitive), `m` (multi-line) and `s`
    /// (dot matches newline). A mask without slashes is a bare pattern.
    pub fn parse<I, S>(mask: &str, fields: I) -> Result<Self, FormError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let (pattern, flags) = mask
            .strip_prefix('/')
            .and_then(|rest| rest.rsplit_once('/'))
            .unwrap_or((mask, ""));
        Self::build(mask, pattern, flags, field_list(fields))
    }

    fn build(mask: &str, pattern: &str, flags: &str, fields: Vec<String>) -> Result<Self, FormError> {
        let mut builder = RegexBuilder::new(pattern);
        for flag in flags.chars() {
            match flag {
                'i' => builder.case_insensitive(true),
                'm' => builder.multi_line(true),
                's' => builder.dot_matches_new_line(true),
                flag => {
                    return Err(FormError::InvalidMaskFlag {
                        mask: mask.to_string(),
                        flag,
                    })
                }
            };
        }
        let regex = builder.build().map_err(|source| FormError::InvalidMask {
            mask: mask.to_string(),
            source,
        })?;
        Ok(Self {
            mask: mask.to_string(),
            pattern: pattern.to_string(),
            flags: flags.to_string(),
            regex,
            fields,
        })
    }

    /// The mask as configured.
    pub fn mask(&self) -> &str {
        &self.mask
    }

    /// The regular expression without delimiters and flags.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The flags of a `/pattern/flags` mask.
    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl Validator for MaskValidator {
    fn validate(&self, form: &mut dyn FormAccess, catalog: &Catalog) -> Result<(), FormError> {
        let message = catalog.format(MASK, &[&self.mask]);
        for field in &self.fields {
            if !self.regex.is_match(&read_text(form, field)?.as_text()) {
                report(form, field, &message);
            }
        }
        Ok(())
    }

    fn script(&self, catalog: &Catalog) -> Option<String> {
        let mut script = script_header(&catalog.format(MASK, &[&self.mask]));
        script.push_str(&format!(
            "var v = new RegExp('{}', '{}');\n",
            escape_js(&self.pattern),
            escape_js(&self.flags)
        ));
        for field in &self.fields {
            let field = js_field(field);
            script.push_str(&format!("if (!v.test(this.get({field}))) this.error({field}, m);\n"));
        }
        Some(script)
    }
}
