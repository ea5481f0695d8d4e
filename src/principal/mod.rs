mod specified;

pub use specified::{PrincipalKind, SpecifiedPrincipal, SpecifiedPrincipalBuilder, SpecifiedPrincipalBuilderError};

use {
    crate::display_json,
    serde::{ser::Serializer, Serialize},
};

/// The `Principal` (or `NotPrincipal`) block of a statement. Only resource-based policies carry one.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Principal {
    Any,
    Specified(SpecifiedPrincipal),
}

impl Principal {
    #[inline]
    pub fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }

    /// Add a principal. Adding to [Principal::Any] is a no-op, since it already matches everyone.
    pub fn add<S: Into<String>>(&mut self, kind: PrincipalKind, principal: S) {
        if let Self::Specified(specified) = self {
            specified.add(kind, principal);
        }
    }
}

impl From<SpecifiedPrincipal> for Principal {
    fn from(sp: SpecifiedPrincipal) -> Self {
        Self::Specified(sp)
    }
}

impl Serialize for Principal {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Any => serializer.serialize_str("*"),
            Self::Specified(specified) => specified.serialize(serializer),
        }
    }
}

display_json!(Principal);

/// The ARN IAM uses to name an entire account as a principal.
pub fn account_root_arn(partition: &str, account: &str) -> String {
    format!("arn:{partition}:iam::{account}:root")
}

#[cfg(test)]
mod tests {
    use {
        super::account_root_arn,
        crate::{Principal, PrincipalKind, SpecifiedPrincipal},
        indoc::indoc,
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_formatting() {
        let mut p2 = Principal::from(SpecifiedPrincipal::default());
        p2.add(PrincipalKind::Aws, account_root_arn("aws", "123456789012"));
        p2.add(PrincipalKind::Aws, "arn:aws:iam::123456789012:role/test");

        let mut p1 = Principal::Any;
        p1.add(PrincipalKind::Aws, "ignored");

        assert!(p1.is_any());
        assert_eq!(format!("{}", p1), r#""*""#);
        assert_eq!(
            format!("{}", p2),
            indoc! { r#"
            {
                "AWS": [
                    "arn:aws:iam::123456789012:root",
                    "arn:aws:iam::123456789012:role/test"
                ]
            }"#}
        )
    }
}
