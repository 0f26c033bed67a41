use std::collections::BTreeMap;
use std::fmt;

use crate::error::MalformedQueryError;

/// A single `name=value` query parameter, taken verbatim (no URL decoding).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryParameter {
    pub name: String,
    pub value: String,
}

impl QueryParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for QueryParameter {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}

/// Query parameters keyed by name, always iterated in ascending byte order
/// of the name. Inserting an existing name replaces its value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameterSet {
    params: BTreeMap<String, String>,
}

impl QueryParameterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses the query string portion of `url`. See [`parse_query_string`].
    pub fn from_url(url: &str) -> Result<Self, MalformedQueryError> {
        parse_query_string(url)
    }

    /// Inserts a parameter, returning the value it replaced.
    pub fn insert(&mut self, param: QueryParameter) -> Option<String> {
        self.params.insert(param.name, param.value)
    }

    /// Chaining form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(QueryParameter::new(name, value));
        self
    }

    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.params.remove(name)
    }

    pub fn clear(&mut self) {
        self.params.clear();
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// Parameters as a list, sorted by name.
    pub fn to_list(&self) -> Vec<QueryParameter> {
        self.iter()
            .map(|(name, value)| QueryParameter::new(name, value))
            .collect()
    }

    /// Canonical query string: `""` when empty, otherwise `?a=1&b=2`.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for QueryParameterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, value)) in self.iter().enumerate() {
            let separator = if i == 0 { '?' } else { '&' };
            write!(f, "{separator}{name}={value}")?;
        }
        Ok(())
    }
}

impl FromIterator<QueryParameter> for QueryParameterSet {
    fn from_iter<I: IntoIterator<Item = QueryParameter>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl Extend<QueryParameter> for QueryParameterSet {
    fn extend<I: IntoIterator<Item = QueryParameter>>(&mut self, iter: I) {
        for param in iter {
            self.insert(param);
        }
    }
}

/// Extracts the query parameters of an endpoint URL.
///
/// A URL without `?` yields an empty set. Otherwise the URL must contain
/// exactly one `?`, the text after it must be non-empty, and every
/// `&`-separated token must contain exactly one `=`. Names and values are
/// kept verbatim; `%20` stays `%20`.
pub fn parse_query_string(url: &str) -> Result<QueryParameterSet, MalformedQueryError> {
    let mut sections = url.split('?');
    sections.next();

    let Some(query) = sections.next() else {
        return Ok(QueryParameterSet::new());
    };
    if sections.next().is_some() {
        return Err(MalformedQueryError::MultipleQuestionMarks);
    }
    if query.is_empty() {
        return Err(MalformedQueryError::EmptyParameterSection);
    }

    let mut set = QueryParameterSet::new();
    for pair in query.split('&') {
        match pair.split_once('=') {
            Some((name, value)) if !value.contains('=') => {
                set.insert(QueryParameter::new(name, value));
            }
            _ => return Err(MalformedQueryError::InvalidParameter(pair.to_string())),
        }
    }
    Ok(set)
}

pub fn render_query_string(set: &QueryParameterSet) -> String {
    set.render()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_without_question_mark_is_empty() {
        let set = parse_query_string("https://api.example.com/v1/accounts").unwrap();
        assert!(set.is_empty());
        assert_eq!(render_query_string(&set), "");
    }

    #[test]
    fn parse_then_render() {
        let set = parse_query_string("x?a=1&b=2").unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.render(), "?a=1&b=2");
    }

    #[test]
    fn renders_sorted_by_name() {
        let set = QueryParameterSet::new().with("b", "2").with("a", "1");
        assert_eq!(set.render(), "?a=1&b=2");

        let parsed = parse_query_string("/accounts?zeta=9&alpha=0&mid=5").unwrap();
        assert_eq!(parsed.render(), "?alpha=0&mid=5&zeta=9");
    }

    #[test]
    fn ordering_is_bytewise() {
        let set = QueryParameterSet::new()
            .with("b", "1")
            .with("B", "2")
            .with("a", "3");
        assert_eq!(set.render(), "?B=2&a=3&b=1");
    }

    #[test]
    fn single_parameter_has_no_separator() {
        let set = QueryParameterSet::new().with("page", "1");
        assert_eq!(set.render(), "?page=1");
    }

    #[test]
    fn duplicate_name_overwrites() {
        let mut set = QueryParameterSet::new();
        assert_eq!(set.insert(QueryParameter::new("a", "1")), None);
        assert_eq!(set.insert(QueryParameter::new("a", "2")), Some("1".to_string()));
        assert_eq!(set.get("a"), Some("2"));
        assert_eq!(set.render(), "?a=2");

        let parsed = parse_query_string("u?a=1&a=3").unwrap();
        assert_eq!(parsed.render(), "?a=3");
    }

    #[test]
    fn values_are_not_decoded() {
        let set = parse_query_string("u?name=John%20Doe&q=a+b").unwrap();
        assert_eq!(set.get("name"), Some("John%20Doe"));
        assert_eq!(set.render(), "?name=John%20Doe&q=a+b");
    }

    #[test]
    fn empty_name_or_value_is_accepted() {
        let set = parse_query_string("u?a=&=b").unwrap();
        assert_eq!(set.get("a"), Some(""));
        assert_eq!(set.get(""), Some("b"));
        assert_eq!(set.render(), "?=b&a=");
    }

    #[test]
    fn two_question_marks_rejected() {
        assert_eq!(
            parse_query_string("url??a=1"),
            Err(MalformedQueryError::MultipleQuestionMarks)
        );
        assert_eq!(
            parse_query_string("url?a=1?b=2"),
            Err(MalformedQueryError::MultipleQuestionMarks)
        );
    }

    #[test]
    fn empty_section_rejected() {
        assert_eq!(
            parse_query_string("url?"),
            Err(MalformedQueryError::EmptyParameterSection)
        );
    }

    #[test]
    fn token_without_equals_rejected() {
        assert_eq!(
            parse_query_string("url?a=1&bad"),
            Err(MalformedQueryError::InvalidParameter("bad".into()))
        );
        assert_eq!(
            parse_query_string("url?a=1&&b=2"),
            Err(MalformedQueryError::InvalidParameter("".into()))
        );
    }

    #[test]
    fn token_with_two_equals_rejected() {
        assert_eq!(
            parse_query_string("url?a=1=2"),
            Err(MalformedQueryError::InvalidParameter("a=1=2".into()))
        );
    }

    #[test]
    fn remove_and_clear() {
        let mut set = QueryParameterSet::new().with("a", "1").with("b", "2");
        assert_eq!(set.remove("a"), Some("1".to_string()));
        assert_eq!(set.remove("missing"), None);
        assert_eq!(set.render(), "?b=2");

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.render(), "");
    }

    #[test]
    fn to_list_is_sorted() {
        let set: QueryParameterSet = [("c", "3"), ("a", "1"), ("b", "2")]
            .into_iter()
            .map(QueryParameter::from)
            .collect();
        let names: Vec<_> = set.to_list().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["a", "b", "c"]);
    }
}
