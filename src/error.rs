use std::{
    error::Error,
    fmt::{Display, Formatter, Result as FmtResult},
};

#[derive(Debug, Eq, PartialEq)]
pub enum StatementError {
    InvalidAccessLevel(String),
    InvalidAction(String),
    InvalidConditionOperator(String),
    InvalidPattern(String),
    InvalidServiceDescriptor(String),
    UnknownAction(String),
    UnknownResourceType(String),
    UnknownService(String),
}

impl Display for StatementError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidAccessLevel(level) => write!(f, "Invalid access level: {}", level),
            Self::InvalidAction(action) => write!(f, "Invalid action: {}", action),
            Self::InvalidConditionOperator(operator) => write!(f, "Invalid condition operator: {}", operator),
            Self::InvalidPattern(reason) => write!(f, "Invalid action pattern: {}", reason),
            Self::InvalidServiceDescriptor(reason) => write!(f, "Invalid service descriptor: {}", reason),
            Self::UnknownAction(action) => write!(f, "Unknown action: {}", action),
            Self::UnknownResourceType(resource_type) => write!(f, "Unknown resource type: {}", resource_type),
            Self::UnknownService(service) => write!(f, "Unknown service: {}", service),
        }
    }
}

impl Error for StatementError {}

#[cfg(test)]
mod tests {
    use {
        crate::StatementError,
        pretty_assertions::{assert_eq, assert_ne},
    };

    #[test_log::test]
    fn test_display() {
        let _ = format!("{:?}", StatementError::InvalidAction("foo".to_string()));
        assert_eq!(StatementError::InvalidAction("foo".to_string()).to_string(), "Invalid action: foo");
        assert_eq!(StatementError::InvalidAccessLevel("Admin".to_string()).to_string(), "Invalid access level: Admin");
        assert_eq!(
            StatementError::InvalidConditionOperator("StringSorta".to_string()).to_string(),
            "Invalid condition operator: StringSorta"
        );
        assert_eq!(StatementError::InvalidPattern("(".to_string()).to_string(), "Invalid action pattern: (");
        assert_eq!(
            StatementError::InvalidServiceDescriptor("empty prefix".to_string()).to_string(),
            "Invalid service descriptor: empty prefix"
        );
        assert_eq!(
            StatementError::UnknownAction("memorydb:Frobnicate".to_string()).to_string(),
            "Unknown action: memorydb:Frobnicate"
        );
        assert_eq!(
            StatementError::UnknownResourceType("widget".to_string()).to_string(),
            "Unknown resource type: widget"
        );
        assert_eq!(StatementError::UnknownService("nope".to_string()).to_string(), "Unknown service: nope");
    }

    #[test_log::test]
    fn test_eq() {
        let e1a = StatementError::UnknownAction("foo".to_string());
        let e1b = StatementError::UnknownAction("foo".to_string());
        let e2 = StatementError::UnknownService("foo".to_string());
        let e3 = StatementError::UnknownAction("bar".to_string());

        assert_eq!(e1a, e1b);
        assert_ne!(e1a, e2);
        assert_ne!(e1a, e3);
        assert_ne!(e2, e3);
    }
}
