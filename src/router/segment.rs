//! Route pattern tokenizer.
//!
//! A pattern such as `/files/{name:[a-z]+}.json` is consumed one segment at a
//! time: `/files/` (static), `{name:[a-z]+}` (regex, delimited by `.`),
//! `.json` (static). Each call to [`parse_segment`] looks only at the front of
//! the remaining text.

use regex::Regex;

use super::error::RegistrationError;

/// Default capture delimiter.
pub(crate) const SLASH: u8 = b'/';

/// Kind of a tree node, and of the pattern segment that produces it.
///
/// The declaration order is the lookup precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Static,
    Regex,
    Param,
    Wildcard,
}

impl NodeKind {
    /// Order in which child groups are tried during lookup.
    pub const PRECEDENCE: [NodeKind; 4] = [
        NodeKind::Static,
        NodeKind::Regex,
        NodeKind::Param,
        NodeKind::Wildcard,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Static => "static",
            NodeKind::Regex => "regex",
            NodeKind::Param => "param",
            NodeKind::Wildcard => "wildcard",
        }
    }
}

/// One typed piece of a route pattern.
#[derive(Debug, Clone)]
pub(crate) enum Segment<'p> {
    /// Literal text, matched byte for byte.
    Static(&'p str),
    /// `{name}`: captures up to the next `/`.
    Param { name: &'p str },
    /// `{name:regex}`: captures up to `tail`, and the capture must match `pattern`.
    Regex {
        name: &'p str,
        pattern: Regex,
        tail: u8,
    },
    /// `*`: captures the rest of the path.
    Wildcard,
}

impl Segment<'_> {
    pub(crate) fn kind(&self) -> NodeKind {
        match self {
            Segment::Static(_) => NodeKind::Static,
            Segment::Param { .. } => NodeKind::Param,
            Segment::Regex { .. } => NodeKind::Regex,
            Segment::Wildcard => NodeKind::Wildcard,
        }
    }
}

/// A segment plus the number of bytes of the remaining pattern it consumed.
#[derive(Debug, Clone)]
pub(crate) struct ParsedSegment<'p> {
    pub segment: Segment<'p>,
    pub consumed: usize,
}

/// Parse the segment at the front of `remaining`.
///
/// `pattern` is the full route pattern and is only used in error values.
/// `remaining` must not be empty.
pub(crate) fn parse_segment<'p>(
    remaining: &'p str,
    pattern: &str,
) -> Result<ParsedSegment<'p>, RegistrationError> {
    let special = match (remaining.find('{'), remaining.find('*')) {
        (None, None) => {
            return Ok(ParsedSegment {
                segment: Segment::Static(remaining),
                consumed: remaining.len(),
            })
        }
        (Some(brace), Some(star)) => brace.min(star),
        (Some(brace), None) => brace,
        (None, Some(star)) => star,
    };

    if special > 0 {
        return Ok(ParsedSegment {
            segment: Segment::Static(&remaining[..special]),
            consumed: special,
        });
    }

    if remaining.starts_with('*') {
        if remaining.len() != 1 {
            return Err(RegistrationError::MisplacedWildcard {
                pattern: pattern.to_string(),
            });
        }
        return Ok(ParsedSegment {
            segment: Segment::Wildcard,
            consumed: 1,
        });
    }

    let close = remaining
        .find('}')
        .ok_or_else(|| RegistrationError::UnclosedParam {
            pattern: pattern.to_string(),
        })?;
    let inner = &remaining[1..close];
    if inner.contains('{') {
        return Err(RegistrationError::NestedParam {
            pattern: pattern.to_string(),
        });
    }
    let next = remaining.as_bytes().get(close + 1).copied();

    let segment = match inner.split_once(':') {
        Some((name, source)) => {
            if name.is_empty() {
                return Err(RegistrationError::EmptyParamName {
                    pattern: pattern.to_string(),
                });
            }
            Segment::Regex {
                name,
                pattern: compile_constraint(source, pattern)?,
                tail: next.unwrap_or(SLASH),
            }
        }
        None => {
            if inner.is_empty() {
                return Err(RegistrationError::EmptyParamName {
                    pattern: pattern.to_string(),
                });
            }
            if matches!(next, Some(b) if b != SLASH) {
                return Err(RegistrationError::ParamNotFollowedBySlash {
                    pattern: pattern.to_string(),
                    name: inner.to_string(),
                });
            }
            Segment::Param { name: inner }
        }
    };

    Ok(ParsedSegment {
        segment,
        consumed: close + 1,
    })
}

/// Split a whole pattern into segments, failing on the first malformed one.
pub(crate) fn parse_pattern(pattern: &str) -> Result<Vec<Segment<'_>>, RegistrationError> {
    let mut segments = Vec::new();
    let mut rest = pattern;
    while !rest.is_empty() {
        let parsed = parse_segment(rest, pattern)?;
        rest = &rest[parsed.consumed..];
        segments.push(parsed.segment);
    }
    Ok(segments)
}

/// Compile a placeholder constraint so that it must match the whole capture.
fn compile_constraint(source: &str, pattern: &str) -> Result<Regex, RegistrationError> {
    if source.is_empty() {
        return Err(RegistrationError::InvalidRegex {
            pattern: pattern.to_string(),
            source: String::new(),
            reason: String::new(),
        });
    }
    Regex::new(&format!("^(?:{source})$")).map_err(|e| RegistrationError::InvalidRegex {
        pattern: pattern.to_string(),
        source: source.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(remaining: &str) -> ParsedSegment<'_> {
        parse_segment(remaining, remaining).unwrap()
    }

    #[test]
    fn test_plain_literal_is_static() {
        let parsed = parse("/users/list");
        assert!(matches!(parsed.segment, Segment::Static("/users/list")));
        assert_eq!(parsed.consumed, 11);
    }

    #[test]
    fn test_literal_stops_before_placeholder() {
        let parsed = parse("/users/{id}");
        assert!(matches!(parsed.segment, Segment::Static("/users/")));
        assert_eq!(parsed.consumed, 7);
    }

    #[test]
    fn test_literal_stops_before_wildcard() {
        let parsed = parse("/assets/*");
        assert!(matches!(parsed.segment, Segment::Static("/assets/")));
        assert_eq!(parsed.consumed, 8);
    }

    #[test]
    fn test_param() {
        let parsed = parse("{id}/posts");
        assert!(matches!(parsed.segment, Segment::Param { name: "id" }));
        assert_eq!(parsed.consumed, 4);
        assert_eq!(parsed.segment.kind(), NodeKind::Param);
    }

    #[test]
    fn test_regex_takes_following_byte_as_tail() {
        let parsed = parse("{name:[a-z]+}.json");
        match parsed.segment {
            Segment::Regex {
                name,
                pattern,
                tail,
            } => {
                assert_eq!(name, "name");
                assert_eq!(tail, b'.');
                assert!(pattern.is_match("abc"));
                // Anchored: partial matches are not enough.
                assert!(!pattern.is_match("abc1"));
            }
            other => panic!("expected regex segment, got {other:?}"),
        }
        assert_eq!(parsed.consumed, 13);
    }

    #[test]
    fn test_regex_at_end_defaults_tail_to_slash() {
        match parse("{id:\\d+}").segment {
            Segment::Regex { tail, .. } => assert_eq!(tail, SLASH),
            other => panic!("expected regex segment, got {other:?}"),
        }
    }

    #[test]
    fn test_wildcard() {
        let parsed = parse("*");
        assert!(matches!(parsed.segment, Segment::Wildcard));
        assert_eq!(parsed.consumed, 1);
    }

    #[test]
    fn test_errors() {
        let err = |p: &str| parse_segment(p, p).unwrap_err();
        assert!(matches!(err("{id"), RegistrationError::UnclosedParam { .. }));
        assert!(matches!(err("{a{b}}"), RegistrationError::NestedParam { .. }));
        assert!(matches!(err("{id:[a-z}"), RegistrationError::InvalidRegex { .. }));
        assert!(matches!(err("{id:}"), RegistrationError::InvalidRegex { .. }));
        assert!(matches!(err("*/more"), RegistrationError::MisplacedWildcard { .. }));
        assert!(matches!(
            err("{id}.json"),
            RegistrationError::ParamNotFollowedBySlash { .. }
        ));
        assert!(matches!(err("{}"), RegistrationError::EmptyParamName { .. }));
        assert!(matches!(err("{:\\d+}"), RegistrationError::EmptyParamName { .. }));
    }

    #[test]
    fn test_parse_pattern_walks_every_segment() {
        let segments = parse_pattern("/files/{dir}/{name:[a-z]+}.txt/*").unwrap();
        let kinds: Vec<NodeKind> = segments.iter().map(Segment::kind).collect();
        assert_eq!(
            kinds,
            vec![
                NodeKind::Static,
                NodeKind::Param,
                NodeKind::Static,
                NodeKind::Regex,
                NodeKind::Static,
                NodeKind::Wildcard,
            ]
        );
    }

    #[test]
    fn test_star_inside_regex_is_not_a_wildcard() {
        let segments = parse_pattern("/p/{rest:a*}").unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].kind(), NodeKind::Regex);
    }

    #[test]
    fn test_star_before_brace_is_misplaced() {
        assert!(matches!(
            parse_pattern("/a*/{id}").unwrap_err(),
            RegistrationError::MisplacedWildcard { .. }
        ));
    }
}
