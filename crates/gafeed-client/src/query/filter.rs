//! Scanner for free-text filter expressions such as `browser == Firefox`.
//!
//! An expression is `<field><operator><value>`: a run of word characters, a
//! run of operator characters, then everything else as the value. Operator
//! tokens separated by whitespace are joined (`< =` reads as `<=`) only while
//! each token stands alone, so `== @home` keeps `@home` as the value. The scanner does
//! not check the operator against [`METRIC_OPERATORS`] or
//! [`DIMENSION_OPERATORS`]; the service rejects unknown operators itself.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::error::ValidationError;

/// Operators the service accepts on metric filters.
pub const METRIC_OPERATORS: [&str; 6] = ["==", "!=", ">", "<", ">=", "<="];

/// Operators the service accepts on dimension filters.
pub const DIMENSION_OPERATORS: [&str; 6] = ["==", "!=", "=~", "!~", "=@", "~@"];

const OPERATOR_CHARS: [char; 6] = ['=', '!', '<', '>', '~', '@'];

/// Form-style escaping: everything but `A-Za-z0-9-._~` is encoded and spaces
/// become `+` (see [`encode_component`]).
const FORM_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// One filter expression split into its three parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedFilter {
    pub field: String,
    /// Operator with all whitespace removed.
    pub operator: String,
    pub value: String,
}

impl ParsedFilter {
    /// Parses a raw expression.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidFilter`] carrying the raw expression
    /// when the field, operator, or value is empty.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidFilter(raw.to_owned());

        let (field, rest) = split_field(raw);
        let (operator, value) = split_operator(rest.trim_start());
        let value = value.trim();

        if field.is_empty() || operator.is_empty() || value.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            field: field.to_owned(),
            operator,
            value: value.to_owned(),
        })
    }

    #[must_use]
    pub fn is_metric_operator(&self) -> bool {
        METRIC_OPERATORS.contains(&self.operator.as_str())
    }

    #[must_use]
    pub fn is_dimension_operator(&self) -> bool {
        DIMENSION_OPERATORS.contains(&self.operator.as_str())
    }

    /// Wire form: `<prefix><field><escaped operator><escaped value>`.
    #[must_use]
    pub fn to_query_fragment(&self, prefix: &str) -> String {
        format!(
            "{prefix}{}{}{}",
            self.field,
            encode_component(&self.operator),
            encode_component(&self.value)
        )
    }
}

/// Leading word characters (`[A-Za-z0-9_]`) of `raw` and the remainder.
///
/// The query builder uses this to find which field a filter targets before
/// the filter is fully parsed.
#[must_use]
pub fn split_field(raw: &str) -> (&str, &str) {
    let end = raw
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(raw.len());
    raw.split_at(end)
}

/// Operator at the start of `input`, whitespace inside it removed, and the
/// remainder.
///
/// After the first run of operator characters, further runs are joined only
/// when followed by whitespace or the end of input.
fn split_operator(input: &str) -> (String, &str) {
    let run_len =
        |s: &str| s.find(|c: char| !OPERATOR_CHARS.contains(&c)).unwrap_or(s.len());

    let first = run_len(input);
    let mut operator = input[..first].to_owned();
    let mut rest = &input[first..];
    if operator.is_empty() {
        return (operator, rest);
    }

    loop {
        let candidate = rest.trim_start();
        let len = run_len(candidate);
        let after = &candidate[len..];
        if len == 0 || !(after.is_empty() || after.starts_with(char::is_whitespace)) {
            break;
        }
        operator.push_str(&candidate[..len]);
        rest = after;
    }

    (operator, rest)
}

/// Percent-encodes a query component the way HTML forms do.
pub(crate) fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, FORM_ESCAPE)
        .to_string()
        .replace("%20", "+")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ParsedFilter {
        ParsedFilter::parse(raw).expect("filter should parse")
    }

    #[test]
    fn splits_spaced_expression() {
        let f = parse("browser == Firefox");
        assert_eq!(f.field, "browser");
        assert_eq!(f.operator, "==");
        assert_eq!(f.value, "Firefox");
    }

    #[test]
    fn splits_compact_expression() {
        let f = parse("visits>=100");
        assert_eq!(f.field, "visits");
        assert_eq!(f.operator, ">=");
        assert_eq!(f.value, "100");
    }

    #[test]
    fn strips_whitespace_inside_operator() {
        let f = parse("pageviews < = 5");
        assert_eq!(f.operator, "<=");
        assert_eq!(f.value, "5");
    }

    #[test]
    fn value_may_start_with_operator_characters() {
        let f = parse("pagePath =~ ~home");
        assert_eq!(f.operator, "=~");
        assert_eq!(f.value, "~home");

        let f = parse("keyword == @home");
        assert_eq!(f.operator, "==");
        assert_eq!(f.value, "@home");
        assert!(f.is_dimension_operator());
    }

    #[test]
    fn standalone_operator_tokens_are_joined() {
        let f = parse("visits > = 10");
        assert_eq!(f.operator, ">=");
        assert_eq!(f.value, "10");

        let f = parse("pagePath !~ ^/blog");
        assert_eq!(f.operator, "!~");
        assert_eq!(f.value, "^/blog");
    }

    #[test]
    fn compact_value_with_operator_prefix_is_kept() {
        let f = parse("keyword==@home");
        assert_eq!(f.operator, "==@");
        assert_eq!(f.value, "home");
    }

    #[test]
    fn value_keeps_inner_whitespace() {
        let f = parse("city == San Francisco ");
        assert_eq!(f.value, "San Francisco");
    }

    #[test]
    fn missing_field_is_invalid() {
        let err = ParsedFilter::parse("== Firefox").unwrap_err();
        assert_eq!(err, ValidationError::InvalidFilter("== Firefox".to_owned()));
    }

    #[test]
    fn missing_operator_is_invalid() {
        assert!(matches!(
            ParsedFilter::parse("browser Firefox"),
            Err(ValidationError::InvalidFilter(_))
        ));
    }

    #[test]
    fn missing_value_is_invalid() {
        assert!(matches!(
            ParsedFilter::parse("browser ==   "),
            Err(ValidationError::InvalidFilter(_))
        ));
    }

    #[test]
    fn operator_vocabulary_checks() {
        assert!(parse("visits > 3").is_metric_operator());
        assert!(!parse("visits > 3").is_dimension_operator());
        assert!(parse("browser =@ fox").is_dimension_operator());
        assert!(parse("browser == fox").is_metric_operator());
        assert!(!parse("browser <> fox").is_metric_operator());
    }

    #[test]
    fn fragment_escapes_operator_and_value() {
        let f = parse("browser == Firefox");
        assert_eq!(f.to_query_fragment("ga:"), "ga:browser%3D%3DFirefox");

        let f = parse("city =@ San Jose, CA");
        assert_eq!(f.to_query_fragment("ga:"), "ga:city%3D%40San+Jose%2C+CA");
    }

    #[test]
    fn split_field_stops_at_first_non_word_char() {
        assert_eq!(split_field("browser==x"), ("browser", "==x"));
        assert_eq!(split_field(" browser"), ("", " browser"));
        assert_eq!(split_field("ga_1"), ("ga_1", ""));
    }
}
