//! Labels and insertion-ordered label sets.

use {
    crate::error::{Error, Result},
    once_cell::sync::Lazy,
    regex::Regex,
    std::fmt,
};

#[allow(clippy::expect_used)]
static LABEL_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-zA-Z_][a-zA-Z0-9_]*$").expect("hard-coded pattern"));

#[allow(clippy::expect_used)]
static LABEL_STRING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^([a-zA-Z_][a-zA-Z0-9_]*)="(.+)"$"#).expect("hard-coded pattern"));

/// A single `name="value"` annotation.
///
/// Name and value are trimmed at construction. A value that trims to the
/// empty string is rejected, which also means a legitimately-blank value
/// cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    name: String,
    value: String,
}

impl Label {
    /// # Errors
    ///
    /// Returns [`Error::InvalidLabelName`] if the trimmed name does not
    /// match `[a-zA-Z_][a-zA-Z0-9_]*`, or [`Error::EmptyLabelValue`] if the
    /// value trims to nothing.
    pub fn new(name: impl AsRef<str>, value: impl AsRef<str>) -> Result<Self> {
        let trimmed_name = name.as_ref().trim();
        let trimmed_value = value.as_ref().trim();

        if !LABEL_NAME.is_match(trimmed_name) {
            return Err(Error::InvalidLabelName(name.as_ref().to_owned()));
        }
        if trimmed_value.is_empty() {
            return Err(Error::EmptyLabelValue);
        }

        Ok(Self {
            name: trimmed_name.to_owned(),
            value: trimmed_value.to_owned(),
        })
    }

    /// Parse a rendered `name="value"` string back into a label,
    /// unescaping C-style escapes in the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidLabelString`] if the input does not have the
    /// `name="value"` shape, or the underlying error if the unescaped parts
    /// fail validation.
    pub fn parse(label_string: &str) -> Result<Self> {
        let captures = LABEL_STRING
            .captures(label_string)
            .ok_or_else(|| Error::InvalidLabelString(label_string.to_owned()))?;

        Self::new(&captures[1], unescape(&captures[2]))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Render as `name="value"` with `\` and `"` backslash-escaped and
    /// literal newlines emitted as the two-character sequence `\n`.
    #[must_use]
    pub fn render(&self) -> String {
        format!("{}=\"{}\"", self.name, escape(&self.value))
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn unescape(value: &str) -> String {
    let mut unescaped = String::with_capacity(value.len());
    let mut chars = value.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            unescaped.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => unescaped.push('\n'),
            Some('r') => unescaped.push('\r'),
            Some('t') => unescaped.push('\t'),
            // Unknown escape: the backslash is dropped, the char kept.
            Some(other) => unescaped.push(other),
            None => {}
        }
    }
    unescaped
}

/// An insertion-ordered set of labels keyed by name.
///
/// Adding a label whose name is already present overwrites the value in
/// place: first-insertion order is preserved, last write wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelSet {
    labels: Vec<Label>,
}

impl LabelSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_labels(labels: impl IntoIterator<Item = Label>) -> Self {
        let mut set = Self::new();
        for label in labels {
            set.add(label);
        }
        set
    }

    pub fn add(&mut self, label: Label) {
        match self.labels.iter_mut().find(|l| l.name() == label.name()) {
            Some(existing) => *existing = label,
            None => self.labels.push(label),
        }
    }

    /// Merge another set into this one, with `other`'s values winning on
    /// name clashes.
    pub fn merge(&mut self, other: LabelSet) {
        for label in other.labels {
            self.add(label);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Label> {
        self.labels.iter()
    }

    /// Render the combined label string: `""` for an empty set, otherwise
    /// `{k1="v1",k2="v2"}` in insertion order.
    #[must_use]
    pub fn render(&self) -> String {
        if self.labels.is_empty() {
            return String::new();
        }
        let rendered: Vec<String> = self.labels.iter().map(Label::render).collect();
        format!("{{{}}}", rendered.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_empty_values() {
        for value in ["", " ", "\t", "\n \t"] {
            assert!(matches!(Label::new("name", value), Err(Error::EmptyLabelValue)));
        }
    }

    #[test]
    fn rejects_invalid_names() {
        for name in ["", "with space", "with-dash", "with,comma", "with:colon", "1digit"] {
            assert!(
                matches!(Label::new(name, "value"), Err(Error::InvalidLabelName(_))),
                "expected rejection for {name:?}"
            );
        }
    }

    #[test]
    fn renders_with_escaping() {
        let cases = [
            ("unit", "test", r#"unit="test""#),
            ("name", "value with whitespaces", r#"name="value with whitespaces""#),
            ("name", "value with \"", r#"name="value with \"""#),
            ("name", "value with \\", r#"name="value with \\""#),
            ("name", "value with\nlinebreak", r#"name="value with\nlinebreak""#),
        ];
        for (name, value, expected) in cases {
            assert_eq!(Label::new(name, value).unwrap().render(), expected);
        }
    }

    #[test]
    fn trims_name_and_value() {
        let label = Label::new(" padded_name ", " padded value ").unwrap();
        assert_eq!(label.name(), "padded_name");
        assert_eq!(label.value(), "padded value");
    }

    #[test]
    fn parses_rendered_labels() {
        let label = Label::parse(r#"unit="test""#).unwrap();
        assert_eq!(label.name(), "unit");
        assert_eq!(label.value(), "test");
    }

    #[test]
    fn parse_rejects_malformed_strings() {
        for raw in ["", "noequals", r#"name=unquoted"#, r#"name="""#, r#"1name="value""#] {
            assert!(Label::parse(raw).is_err(), "expected rejection for {raw:?}");
        }
    }

    #[test]
    fn round_trips_escaped_values() {
        for value in ["value with \"", "value with \\", "value with\nlinebreak"] {
            let label = Label::new("name", value).unwrap();
            let parsed = Label::parse(&label.render()).unwrap();
            assert_eq!(parsed.name(), label.name());
            assert_eq!(parsed.value(), label.value());
        }
    }

    #[test]
    fn label_set_overwrites_in_place() {
        let mut set = LabelSet::new();
        set.add(Label::new("a", "1").unwrap());
        set.add(Label::new("b", "2").unwrap());
        set.add(Label::new("a", "3").unwrap());

        assert_eq!(set.len(), 2);
        assert_eq!(set.render(), r#"{a="3",b="2"}"#);
    }

    #[test]
    fn empty_label_set_renders_empty_string() {
        assert_eq!(LabelSet::new().render(), "");
    }
}
