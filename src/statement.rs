use {
    crate::{display_json, serutil::StringList, ConditionList, Effect, Principal},
    derive_builder::Builder,
    serde::Serialize,
};

/// A finished IAM policy statement.
///
/// Statements are normally produced by [StatementDraft::build][crate::StatementDraft::build]; the builder here is for
/// assembling one directly. [Display] renders the statement as pretty-printed IAM JSON.
#[derive(Builder, Clone, Debug, Eq, PartialEq, Serialize)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(rename_all = "PascalCase")]
pub struct Statement {
    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) sid: Option<String>,

    pub(crate) effect: Effect,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) action: Option<StringList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) not_action: Option<StringList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) resource: Option<StringList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) not_resource: Option<StringList>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) principal: Option<Principal>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) not_principal: Option<Principal>,

    #[builder(setter(into, strip_option), default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) condition: Option<ConditionList>,
}

display_json!(Statement);

impl Statement {
    pub fn builder() -> StatementBuilder {
        StatementBuilder::default()
    }

    #[inline]
    pub fn sid(&self) -> Option<&str> {
        self.sid.as_deref()
    }

    #[inline]
    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    #[inline]
    pub fn action(&self) -> Option<&StringList> {
        self.action.as_ref()
    }

    #[inline]
    pub fn not_action(&self) -> Option<&StringList> {
        self.not_action.as_ref()
    }

    #[inline]
    pub fn resource(&self) -> Option<&StringList> {
        self.resource.as_ref()
    }

    #[inline]
    pub fn not_resource(&self) -> Option<&StringList> {
        self.not_resource.as_ref()
    }

    #[inline]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    #[inline]
    pub fn not_principal(&self) -> Option<&Principal> {
        self.not_principal.as_ref()
    }

    #[inline]
    pub fn condition(&self) -> Option<&ConditionList> {
        self.condition.as_ref()
    }

    /// The actions (or not-actions) of the statement, in the order they were added.
    pub fn actions(&self) -> Vec<&str> {
        self.action.as_ref().or(self.not_action.as_ref()).map(StringList::to_vec).unwrap_or_default()
    }

    /// The resources (or not-resources) of the statement, in the order they were added.
    pub fn resources(&self) -> Vec<&str> {
        self.resource.as_ref().or(self.not_resource.as_ref()).map(StringList::to_vec).unwrap_or_default()
    }
}

impl StatementBuilder {
    fn validate(&self) -> Result<(), StatementBuilderError> {
        let mut errors = Vec::with_capacity(5);
        if self.effect.is_none() {
            errors.push("Effect must be set.");
        }

        match (&self.action, &self.not_action) {
            (Some(Some(_)), Some(Some(_))) => errors.push("Action and NotAction cannot both be set."),
            (None, None) | (Some(None), None) | (None, Some(None)) | (Some(None), Some(None)) => {
                errors.push("Either Action or NotAction must be set.")
            }
            _ => (),
        }

        if let (Some(Some(_)), Some(Some(_))) = (&self.resource, &self.not_resource) {
            errors.push("Resource and NotResource cannot both be set.");
        }

        if let (Some(Some(_)), Some(Some(_))) = (&self.principal, &self.not_principal) {
            errors.push("Principal and NotPrincipal cannot both be set.");
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(StatementBuilderError::ValidationError(errors.join(" ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            build_condition, Effect, FluentStatement, Principal, PrincipalKind, SpecifiedPrincipal, Statement,
            StatementDraft,
        },
        indoc::indoc,
        pretty_assertions::assert_eq,
    };

    #[test_log::test]
    fn test_builder() {
        let err = Statement::builder().build().unwrap_err();
        assert_eq!(err.to_string(), "Effect must be set. Either Action or NotAction must be set.");

        let err = Statement::builder()
            .effect(Effect::Allow)
            .action(vec!["sqs:SendMessage"])
            .not_action(vec!["sqs:DeleteQueue"])
            .build()
            .unwrap_err();
        assert_eq!(err.to_string(), "Action and NotAction cannot both be set.");

        let err = Statement::builder()
            .effect(Effect::Deny)
            .not_action(vec!["sqs:DeleteQueue"])
            .resource("*")
            .not_resource(vec!["arn:aws:sqs:*:*:orders"])
            .principal(Principal::Any)
            .not_principal(Principal::Any)
            .build()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Resource and NotResource cannot both be set. Principal and NotPrincipal cannot both be set."
        );

        let statement = Statement::builder()
            .sid("SendOnly")
            .effect(Effect::Allow)
            .action(vec!["sqs:SendMessage"])
            .resource("*")
            .build()
            .unwrap();
        assert_eq!(statement.sid(), Some("SendOnly"));
        assert_eq!(statement.actions(), vec!["sqs:SendMessage"]);
        assert_eq!(statement.resources(), vec!["*"]);
        assert!(statement.condition().is_none());
        assert_eq!(
            statement.to_string(),
            indoc! { r#"
            {
                "Sid": "SendOnly",
                "Effect": "Allow",
                "Action": [
                    "sqs:SendMessage"
                ],
                "Resource": "*"
            }"# }
        );
    }

    #[test_log::test]
    fn test_render_full_statement() {
        let mut draft = StatementDraft::new();
        draft
            .sid("Cross account")
            .deny()
            .not_action()
            .add_action("sqs:ReceiveMessage")
            .add_resource("arn:aws:sqs:us-east-1:123456789012:orders")
            .add_condition(build_condition("aws:ResourceTag/${TagKey}", Some("Team"), "payments", None))
            .add_condition(build_condition("aws:SecureTransport", None, false, Some("Bool")));

        let mut principal = SpecifiedPrincipal::default();
        principal.add(PrincipalKind::Aws, "arn:aws:iam::210987654321:root");
        draft.set_principal(principal.into());

        let statement = draft.build();
        assert_eq!(statement.effect(), &Effect::Deny);
        assert!(statement.action().is_none());
        assert_eq!(
            statement.to_string(),
            indoc! { r#"
            {
                "Sid": "Cross account",
                "Effect": "Deny",
                "NotAction": [
                    "sqs:ReceiveMessage"
                ],
                "Resource": [
                    "arn:aws:sqs:us-east-1:123456789012:orders"
                ],
                "Principal": {
                    "AWS": [
                        "arn:aws:iam::210987654321:root"
                    ]
                },
                "Condition": {
                    "StringLike": {
                        "aws:ResourceTag/Team": [
                            "payments"
                        ]
                    },
                    "Bool": {
                        "aws:SecureTransport": [
                            "false"
                        ]
                    }
                }
            }"# }
        );
    }
}
