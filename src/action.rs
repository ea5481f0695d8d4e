use {
    crate::StatementError,
    log::debug,
    serde::{
        de::{self, Deserializer, Unexpected, Visitor},
        ser::Serializer,
        Deserialize, Serialize,
    },
    std::{
        fmt::{Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// A parsed `service:Verb` action name.
///
/// Statement drafts store actions as plain strings; this type is used where the name has to be taken apart, such as
/// registry lookups and service descriptor validation.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    Any,
    Specific {
        service: String,
        action: String,
    },
}

impl Action {
    pub fn new<S: Into<String>, A: Into<String>>(service: S, action: A) -> Result<Self, StatementError> {
        let service = service.into();
        let action = action.into();

        if !is_valid_service_prefix(&service) {
            debug!("Action '{service}:{action}' has an invalid service.");
            return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
        }

        if action.is_empty() || !action.is_ascii() {
            debug!("Action '{service}:{action}' has an empty or non-ASCII action.");
            return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
        }

        for (i, c) in action.bytes().enumerate() {
            if !c.is_ascii_alphanumeric()
                && c != b'*'
                && c != b'?'
                && !(i > 0 && i < action.len() - 1 && (c == b'-' || c == b'_'))
            {
                debug!("Action '{service}:{action}' has an invalid action.");
                return Err(StatementError::InvalidAction(format!("{}:{}", service, action)));
            }
        }

        Ok(Action::Specific {
            service,
            action,
        })
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    #[inline]
    pub fn is_specific(&self) -> bool {
        matches!(self, Self::Specific { .. })
    }

    #[inline]
    pub fn service(&self) -> &str {
        match self {
            Self::Any => "*",
            Self::Specific {
                service,
                ..
            } => service,
        }
    }

    #[inline]
    pub fn action(&self) -> &str {
        match self {
            Self::Any => "*",
            Self::Specific {
                action,
                ..
            } => action,
        }
    }

    /// Whether the action's verb contains a `*` or `?` wildcard.
    pub fn is_wildcard(&self) -> bool {
        match self {
            Self::Any => true,
            Self::Specific {
                action,
                ..
            } => action.contains(['*', '?']),
        }
    }

    /// Service prefixes are case-insensitive in IAM.
    pub fn in_service(&self, prefix: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Specific {
                service,
                ..
            } => service.eq_ignore_ascii_case(prefix),
        }
    }
}

/// Service prefixes are ASCII alphanumerics with interior `-` or `_`.
pub(crate) fn is_valid_service_prefix(service: &str) -> bool {
    if service.is_empty() || !service.is_ascii() {
        return false;
    }

    service
        .bytes()
        .enumerate()
        .all(|(i, c)| c.is_ascii_alphanumeric() || (i > 0 && i < service.len() - 1 && (c == b'-' || c == b'_')))
}

impl FromStr for Action {
    type Err = StatementError;
    fn from_str(v: &str) -> Result<Self, Self::Err> {
        if v == "*" {
            return Ok(Self::Any);
        }

        match v.split_once(':') {
            Some((service, action)) if !action.contains(':') => Action::new(service, action),
            _ => Err(StatementError::InvalidAction(v.to_string())),
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Any => f.write_str("*"),
            Self::Specific {
                service,
                action,
            } => write!(f, "{}:{}", service, action),
        }
    }
}

struct ActionVisitor {}
impl<'de> Visitor<'de> for ActionVisitor {
    type Value = Action;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "service:action or \"*\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match Action::from_str(v) {
            Ok(action) => Ok(action),
            Err(_) => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(ActionVisitor {})
    }
}

impl Serialize for Action {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
