//! Submitted request parameters

use crate::FieldValue;

/// Request parameters in submission order.
///
/// Names may repeat. Scalar lookups see the last value, as a form post with a
/// duplicated field would overwrite earlier values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    pairs: Vec<(String, String)>,
}

impl Params {
    /// No parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters from an `application/x-www-form-urlencoded` string (a query
    /// string or a form body). A leading `?` is ignored.
    ///
    /// ```
    /// use formkit::Params;
    ///
    /// let params = Params::from_urlencoded("?firstName=Al&city=K%C3%B6ln&tags[]=a&tags[]=b");
    /// assert_eq!(params.get("city"), Some("Köln"));
    /// assert_eq!(params.len(), 4);
    /// ```
    pub fn from_urlencoded(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        url::form_urlencoded::parse(input.as_bytes())
            .map(|(name, value)| (name.into_owned(), value.into_owned()))
            .collect()
    }

    /// Append one parameter.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Builder form of [`push`](Self::push).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    /// Last value submitted for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Last value submitted for `name`, or `default`.
    pub fn get_or<'a>(&'a self, name: &str, default: &'a str) -> &'a str {
        self.get(name).unwrap_or(default)
    }

    /// Number of submitted pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// True if nothing was submitted.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// All pairs in submission order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Parameters grouped into bindable field values.
    ///
    /// Plain names yield [`FieldValue::Text`] (last value wins). `name[]` and
    /// `name[N]` yield one [`FieldValue::List`] per base name; explicit indices
    /// order the entries, `[]` entries follow in submission order.
    pub fn field_values(&self) -> Vec<(String, FieldValue)> {
        let mut groups: Vec<(String, Group)> = Vec::new();
        for (name, value) in &self.pairs {
            let (base, slot) = split_indexed(name);
            let pos = match groups.iter().position(|(key, _)| key == base) {
                Some(pos) => pos,
                None => {
                    groups.push((base.to_string(), Group::default()));
                    groups.len() - 1
                }
            };
            groups[pos].1.add(slot, value);
        }
        groups
            .into_iter()
            .map(|(name, group)| (name, group.into_value()))
            .collect()
    }
}

impl FromIterator<(String, String)> for Params {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            pairs: iter.into_iter().collect(),
        }
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for Params {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        iter.into_iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect()
    }
}

/// Highest accepted `name[N]` index. Larger indexes keep the whole name and
/// so match no field.
const MAX_INDEX: usize = 999;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Scalar,
    Append,
    At(usize),
}

#[derive(Debug, Default)]
struct Group {
    scalar: Option<String>,
    listed: bool,
    items: Vec<(Option<usize>, String)>,
}

impl Group {
    fn add(&mut self, slot: Slot, value: &str) {
        match slot {
            Slot::Scalar => self.scalar = Some(value.to_string()),
            Slot::Append => {
                self.listed = true;
                self.items.push((None, value.to_string()));
            }
            Slot::At(index) => {
                self.listed = true;
                self.items.push((Some(index), value.to_string()));
            }
        }
    }

    fn into_value(self) -> FieldValue {
        if !self.listed {
            return FieldValue::from(self.scalar);
        }
        // `name[N]` lands at position N, gaps stay empty; `name[]` appends.
        let len = self
            .items
            .iter()
            .filter_map(|(index, _)| *index)
            .max()
            .map_or(0, |max| max + 1);
        let mut values = vec![String::new(); len];
        let mut appended = Vec::new();
        for (index, value) in self.items {
            match index {
                Some(index) => values[index] = value,
                None => appended.push(value),
            }
        }
        values.extend(appended);
        FieldValue::List(values)
    }
}

fn split_indexed(name: &str) -> (&str, Slot) {
    let Some(open) = name.find('[') else {
        return (name, Slot::Scalar);
    };
    let Some(inner) = name[open + 1..].strip_suffix(']') else {
        return (name, Slot::Scalar);
    };
    let base = &name[..open];
    if inner.is_empty() {
        (base, Slot::Append)
    } else {
        match inner.parse() {
            Ok(index) if index <= MAX_INDEX => (base, Slot::At(index)),
            _ => (name, Slot::Scalar),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_value_wins_for_scalars() {
        let params = Params::new().with("city", "Bonn").with("city", "Köln");
        assert_eq!(params.get("city"), Some("Köln"));
        assert_eq!(params.get_or("zip", "00000"), "00000");
    }

    #[test]
    fn urlencoded_values_are_decoded() {
        let params = Params::from_urlencoded("street=Main+Street+1&note=a%26b");
        assert_eq!(params.get("street"), Some("Main Street 1"));
        assert_eq!(params.get("note"), Some("a&b"));
    }

    #[test]
    fn indexed_names_group_into_lists() {
        let params = Params::new()
            .with("phones[1]", "second")
            .with("name", "Al")
            .with("phones[0]", "first")
            .with("phones[]", "extra");

        let values = params.field_values();
        assert_eq!(
            values,
            vec![
                (
                    "phones".to_string(),
                    FieldValue::List(vec!["first".into(), "second".into(), "extra".into()])
                ),
                ("name".to_string(), FieldValue::from("Al")),
            ]
        );
    }

    #[test]
    fn indexed_values_keep_their_position() {
        let params = Params::new().with("picked[3]", "1").with("picked[1]", "x");
        assert_eq!(
            params.field_values(),
            vec![(
                "picked".to_string(),
                FieldValue::List(vec!["".into(), "x".into(), "".into(), "1".into()])
            )]
        );
    }

    #[test]
    fn oversized_indexes_are_not_lists() {
        assert_eq!(split_indexed("a[1000]"), ("a[1000]", Slot::Scalar));
        assert_eq!(split_indexed("a[999]"), ("a", Slot::At(999)));
    }

    #[test]
    fn malformed_brackets_stay_scalar() {
        assert_eq!(split_indexed("a[x]"), ("a[x]", Slot::Scalar));
        assert_eq!(split_indexed("a[1"), ("a[1", Slot::Scalar));
        assert_eq!(split_indexed("a[2]"), ("a", Slot::At(2)));
    }
}
