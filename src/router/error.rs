use http::StatusCode;
use std::fmt;

/// Error returned when a route declaration cannot be registered.
///
/// Every variant aborts only the registration that produced it; the tree is
/// left exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A `{` has no matching `}`.
    UnclosedParam {
        /// The full pattern being registered
        pattern: String,
    },
    /// A `{` appears inside another `{...}` placeholder.
    NestedParam {
        /// The full pattern being registered
        pattern: String,
    },
    /// The source of a `{name:regex}` placeholder is empty or does not compile.
    InvalidRegex {
        /// The full pattern being registered
        pattern: String,
        /// The regex source as written in the pattern
        source: String,
        /// Compiler message, empty when the source was empty
        reason: String,
    },
    /// A `*` that is not the final character of the pattern.
    MisplacedWildcard {
        /// The full pattern being registered
        pattern: String,
    },
    /// A plain `{name}` placeholder followed by something other than `/`.
    ParamNotFollowedBySlash {
        /// The full pattern being registered
        pattern: String,
        /// Placeholder name
        name: String,
    },
    /// A placeholder with no name, e.g. `{}` or `{:\d+}`.
    EmptyParamName {
        /// The full pattern being registered
        pattern: String,
    },
    /// A verb outside of GET, POST, PUT and DELETE.
    UnknownMethod {
        /// The verb as received
        method: String,
    },
}

impl fmt::Display for RegistrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistrationError::UnclosedParam { pattern } => {
                write!(f, "unclosed '{{' in route pattern '{pattern}'")
            }
            RegistrationError::NestedParam { pattern } => {
                write!(f, "nested '{{' inside a placeholder in route pattern '{pattern}'")
            }
            RegistrationError::InvalidRegex {
                pattern,
                source,
                reason,
            } => {
                if reason.is_empty() {
                    write!(f, "empty regex in route pattern '{pattern}'")
                } else {
                    write!(
                        f,
                        "invalid regex '{source}' in route pattern '{pattern}': {reason}"
                    )
                }
            }
            RegistrationError::MisplacedWildcard { pattern } => {
                write!(
                    f,
                    "wildcard '*' must be the last character of route pattern '{pattern}'"
                )
            }
            RegistrationError::ParamNotFollowedBySlash { pattern, name } => {
                write!(
                    f,
                    "parameter '{{{name}}}' must be followed by '/' or end the route pattern '{pattern}'"
                )
            }
            RegistrationError::EmptyParamName { pattern } => {
                write!(f, "placeholder without a name in route pattern '{pattern}'")
            }
            RegistrationError::UnknownMethod { method } => {
                write!(f, "unsupported HTTP method '{method}'")
            }
        }
    }
}

impl std::error::Error for RegistrationError {}

/// Outcome of a lookup that did not produce a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupError {
    /// No registered pattern matches the path for any method.
    NotFound,
    /// The path matches a registered pattern, but not for the requested method.
    MethodNotAllowed,
}

impl LookupError {
    /// HTTP status the surrounding layer should answer with.
    #[must_use]
    pub fn status_code(self) -> StatusCode {
        match self {
            LookupError::NotFound => StatusCode::NOT_FOUND,
            LookupError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::NotFound => write!(f, "404 Not Found"),
            LookupError::MethodNotAllowed => write!(f, "405 Method Not Allowed"),
        }
    }
}

impl std::error::Error for LookupError {}
