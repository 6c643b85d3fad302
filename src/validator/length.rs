use super::{field_list, js_field, read_text, report, script_header, Validator};
use crate::catalog::{MAX_LENGTH, MIN_LENGTH};
use crate::{Catalog, FormAccess, FormError};

/// Fails fields shorter than `min` characters, including empty ones.
#[derive(Debug, Clone)]
pub struct MinLengthValidator {
    min: usize,
    fields: Vec<String>,
}

impl MinLengthValidator {
    /// Require at least `min` characters in each of `fields`.
    pub fn new<I, S>(min: usize, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            min,
            fields: field_list(fields),
        }
    }
}

impl Validator for MinLengthValidator {
    fn validate(&self, form: &mut dyn FormAccess, catalog: &Catalog) -> Result<(), FormError> {
        let message = catalog.format(MIN_LENGTH, &[&self.min]);
        for field in &self.fields {
            if read_text(form, field)?.char_len() < self.min {
                report(form, field, &message);
            }
        }
        Ok(())
    }

    fn script(&self, catalog: &Catalog) -> Option<String> {
        let min = self.min;
        let mut script = script_header(&catalog.format(MIN_LENGTH, &[&min]));
        for field in &self.fields {
            let field = js_field(field);
            script.push_str(&format!(
                "if (this.length({field}) < {min}) this.error({field}, m);\n"
            ));
        }
        Some(script)
    }
}

/// Like [`MinLengthValidator`], but empty fields pass.
///
/// For optional inputs that must be long enough once filled in.
#[derive(Debug, Clone)]
pub struct MinLengthIfSetValidator {
    min: usize,
    fields: Vec<String>,
}

impl MinLengthIfSetValidator {
    /// Require at least `min` characters in each non-empty field of `fields`.
    pub fn new<I, S>(min: usize, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            min,
            fields: field_list(fields),
        }
    }
}

impl Validator for MinLengthIfSetValidator {
    fn validate(&self, form: &mut dyn FormAccess, catalog: &Catalog) -> Result<(), FormError> {
        let message = catalog.format(MIN_LENGTH, &[&self.min]);
        for field in &self.fields {
            let len = read_text(form, field)?.char_len();
            if len > 0 && len < self.min {
                report(form, field, &message);
            }
        }
        Ok(())
    }

    fn script(&self, catalog: &Catalog) -> Option<String> {
        let min = self.min;
        let mut script = script_header(&catalog.format(MIN_LENGTH, &[&min]));
        for field in &self.fields {
            let field = js_field(field);
            script.push_str(&format!(
                "if (this.length({field}) > 0 && this.length({field}) < {min}) this.error({field}, m);\n"
            ));
        }
        Some(script)
    }
}

/// Fails fields longer than `max` characters.
#[derive(Debug, Clone)]
pub struct MaxLengthValidator {
    max: usize,
    fields: Vec<String>,
}

impl MaxLengthValidator {
    /// Allow at most `max` characters in each of `fields`.
    pub fn new<I, S>(max: usize, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            max,
            fields: field_list(fields),
        }
    }
}

impl Validator for MaxLengthValidator {
    fn validate(&self, form: &mut dyn FormAccess, catalog: &Catalog) -> Result<(), FormError> {
        let message = catalog.format(MAX_LENGTH, &[&self.max]);
        for field in &self.fields {
            if read_text(form, field)?.char_len() > self.max {
                report(form, field, &message);
            }
        }
        Ok(())
    }

    fn script(&self, catalog: &Catalog) -> Option<String> {
        let max = self.max;
        let mut script = script_header(&catalog.format(MAX_LENGTH, &[&max]));
        for field in &self.fields {
            let field = js_field(field);
            script.push_str(&format!(
                "if (this.length({field}) > {max}) this.error({field}, m);\n"
            ));
        }
        Some(script)
    }
}
