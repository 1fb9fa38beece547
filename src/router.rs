//! Normalization of Heroku router log messages.
//!
//! Router lines carry `key=value` tokens in a fixed order, e.g.
//! `at=info method=GET path="/" host=example.com connect=1ms service=10ms`.
//! [`normalize`] drops the keys and keeps only the values, quoting the
//! free-form string fields and stripping the unit from timing fields:
//!
//! ```rust
//! use drainlog::router::normalize;
//!
//! let body = r#"at=info method=GET path="/" host=example.com connect=1ms service=10ms"#;
//! assert_eq!(normalize(body), r#"info GET "/" "example.com" 1 10"#);
//! ```

/// The PROCID that marks a line as emitted by the platform router.
pub const ROUTER_PROCID: &str = "router";

/// Length of the unit suffix on `connect` and `service` values (`ms`).
const UNIT_SUFFIX_LEN: usize = 2;

/// One `key=value` token from a router message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouterField<'a> {
    pub key: &'a str,
    pub value: &'a str,
}

impl<'a> RouterField<'a> {
    /// Split a token on its first `=`. Returns `None` if the token has no `=`.
    pub fn parse(token: &'a str) -> Option<Self> {
        token
            .split_once('=')
            .map(|(key, value)| Self { key, value })
    }

    /// Append the rendered value of this field to `out`.
    fn render_into(&self, out: &mut String) {
        match self.key {
            "host" | "request_id" | "dyno" => {
                out.push('"');
                out.push_str(self.value);
                out.push('"');
            }
            "connect" | "service" => match strip_unit(self.value) {
                Some(number) => out.push_str(number),
                None => {
                    tracing::debug!(
                        key = self.key,
                        value = self.value,
                        "router timing value without unit suffix, passing through"
                    );
                    out.push_str(self.value);
                }
            },
            _ => out.push_str(self.value),
        }
    }
}

/// Strip a two-letter unit from a timing value, e.g. `3375ms` -> `3375`.
fn strip_unit(value: &str) -> Option<&str> {
    if value.len() <= UNIT_SUFFIX_LEN {
        return None;
    }
    let split = value.len() - UNIT_SUFFIX_LEN;
    if !value.is_char_boundary(split) {
        return None;
    }
    let (number, unit) = value.split_at(split);
    unit.bytes()
        .all(|b| b.is_ascii_alphabetic())
        .then_some(number)
}

/// Rewrite a router message body into its positional form.
///
/// Values are emitted in their original order separated by single spaces.
/// `host`, `request_id` and `dyno` are wrapped in double quotes, `connect`
/// and `service` lose their unit suffix, and every other value is copied
/// verbatim. Tokens without a `=` are copied verbatim as well.
pub fn normalize(body: &str) -> String {
    let mut out = String::with_capacity(body.len());

    for (i, token) in body.split_whitespace().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        match RouterField::parse(token) {
            Some(field) => field.render_into(&mut out),
            None => {
                tracing::debug!(token, "router token without '=', passing through");
                out.push_str(token);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_parse_splits_on_first_equals() {
        let field = RouterField::parse("path=/a?b=c").unwrap();
        assert_eq!(field.key, "path");
        assert_eq!(field.value, "/a?b=c");

        let empty = RouterField::parse("fwd=").unwrap();
        assert_eq!(empty.value, "");

        assert!(RouterField::parse("bare").is_none());
    }

    #[test]
    fn test_quoted_fields() {
        assert_eq!(
            normalize("host=example.com request_id=abc-123 dyno=web.2"),
            r#""example.com" "abc-123" "web.2""#
        );
    }

    #[test]
    fn test_timing_fields() {
        assert_eq!(normalize("connect=1ms service=3375ms"), "1 3375");
        assert_eq!(normalize("connect=0ms"), "0");
    }

    #[test]
    fn test_other_fields_verbatim() {
        assert_eq!(
            normalize(r#"at=error code=H12 desc="Request" fwd="1.2.3.4" status=503"#),
            r#"error H12 "Request" "1.2.3.4" 503"#
        );
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize("  at=info \t method=GET  "), "info GET");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_malformed_tokens_pass_through() {
        assert_eq!(normalize("at=info sock=client bare"), "info client bare");
        assert_eq!(normalize("connect=ms service=5"), "ms 5");
        assert_eq!(normalize("service=30000"), "30000");
    }

    #[test]
    fn test_strip_unit() {
        assert_eq!(strip_unit("1ms"), Some("1"));
        assert_eq!(strip_unit("12us"), Some("12"));
        assert_eq!(strip_unit("ms"), None);
        assert_eq!(strip_unit("123"), None);
        assert_eq!(strip_unit("1é"), None);
    }
}
