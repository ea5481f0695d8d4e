use {
    crate::{
        build_condition, principal::account_root_arn, serutil::StringList, ArnDefaults, ConditionClause,
        ConditionList, ConditionValues, Effect, Principal, PrincipalKind, SpecifiedPrincipal, Statement,
    },
    log::trace,
};

/// A statement under construction.
///
/// Drafts never fail: actions are taken as given, resources and conditions are appended in call order, and nothing is
/// checked against a service registry. Call [StatementDraft::build] to take an immutable [Statement] snapshot.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StatementDraft {
    sid: Option<String>,
    effect: Effect,
    actions: Vec<String>,
    not_action: bool,
    resources: Vec<String>,
    not_resource: bool,
    conditions: ConditionList,
    principal: Option<Principal>,
    not_principal: bool,
    defaults: ArnDefaults,
}

impl StatementDraft {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn actions(&self) -> &[String] {
        &self.actions
    }

    #[inline]
    pub fn resources(&self) -> &[String] {
        &self.resources
    }

    #[inline]
    pub fn conditions(&self) -> &ConditionList {
        &self.conditions
    }

    #[inline]
    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    /// The partition, region, and account used for ARN placeholders the caller leaves out.
    #[inline]
    pub fn arn_defaults(&self) -> &ArnDefaults {
        &self.defaults
    }

    /// Take a snapshot of the draft.
    ///
    /// With no resources and no principal attached, the statement applies to `"*"`.
    pub fn build(&self) -> Statement {
        let actions = StringList::List(self.actions.clone());
        let (action, not_action) = if self.not_action {
            (None, Some(actions))
        } else {
            (Some(actions), None)
        };

        let resources = if self.resources.is_empty() {
            if self.principal.is_none() {
                Some(StringList::Single("*".to_string()))
            } else {
                None
            }
        } else {
            Some(StringList::List(self.resources.clone()))
        };
        let (resource, not_resource) = if self.not_resource {
            (None, resources)
        } else {
            (resources, None)
        };

        let (principal, not_principal) = if self.not_principal {
            (None, self.principal.clone())
        } else {
            (self.principal.clone(), None)
        };

        let condition = if self.conditions.is_empty() {
            None
        } else {
            Some(self.conditions.clone())
        };

        Statement {
            sid: self.sid.clone(),
            effect: self.effect,
            action,
            not_action,
            resource,
            not_resource,
            principal,
            not_principal,
            condition,
        }
    }

    fn add_principal(&mut self, kind: PrincipalKind, principal: String) {
        trace!("add_principal: {} {}", kind.as_str(), principal);
        self.principal.get_or_insert_with(|| SpecifiedPrincipal::default().into()).add(kind, principal);
    }
}

/// Chainable statement-building methods shared by [StatementDraft] and the service-bound builders.
///
/// Implementors only expose their draft; every method here is provided and returns `&mut Self` so calls can be
/// chained.
pub trait FluentStatement {
    fn draft(&self) -> &StatementDraft;

    fn draft_mut(&mut self) -> &mut StatementDraft;

    fn sid<S: Into<String>>(&mut self, sid: S) -> &mut Self {
        self.draft_mut().sid = Some(sid.into());
        self
    }

    fn allow(&mut self) -> &mut Self {
        self.draft_mut().effect = Effect::Allow;
        self
    }

    fn deny(&mut self) -> &mut Self {
        self.draft_mut().effect = Effect::Deny;
        self
    }

    /// Add a qualified `service:Verb` action. Adding one already present does nothing.
    fn add_action<S: Into<String>>(&mut self, action: S) -> &mut Self {
        let action = action.into();
        let draft = self.draft_mut();
        if draft.actions.contains(&action) {
            trace!("add_action: {action} already present");
        } else {
            trace!("add_action: {action}");
            draft.actions.push(action);
        }
        self
    }

    fn add_actions<I, S>(&mut self, actions: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for action in actions {
            self.add_action(action);
        }
        self
    }

    /// Append a resource ARN. Repeats are kept.
    fn add_resource<S: Into<String>>(&mut self, arn: S) -> &mut Self {
        let arn = arn.into();
        trace!("add_resource: {arn}");
        self.draft_mut().resources.push(arn);
        self
    }

    fn on_all_resources(&mut self) -> &mut Self {
        self.add_resource("*")
    }

    /// Append a condition clause. Repeats are kept.
    fn add_condition(&mut self, clause: ConditionClause) -> &mut Self {
        self.draft_mut().conditions.push(clause);
        self
    }

    /// Build a clause with [build_condition] and append it.
    fn if_condition<V: Into<ConditionValues>>(
        &mut self,
        key_template: &str,
        key_param: Option<&str>,
        values: V,
        operator: Option<&str>,
    ) -> &mut Self {
        self.add_condition(build_condition(key_template, key_param, values, operator))
    }

    /// Render the actions as `NotAction`.
    fn not_action(&mut self) -> &mut Self {
        self.draft_mut().not_action = true;
        self
    }

    /// Render the resources as `NotResource`.
    fn not_resource(&mut self) -> &mut Self {
        self.draft_mut().not_resource = true;
        self
    }

    /// Render the principal as `NotPrincipal`.
    fn not_principal(&mut self) -> &mut Self {
        self.draft_mut().not_principal = true;
        self
    }

    fn set_principal(&mut self, principal: Principal) -> &mut Self {
        self.draft_mut().principal = Some(principal);
        self
    }

    fn with_arn_defaults(&mut self, defaults: ArnDefaults) -> &mut Self {
        self.draft_mut().defaults = defaults;
        self
    }

    /// Use `account` for the `${Account}` placeholder of resource ARNs added afterwards.
    fn in_account(&mut self, account: &str) -> &mut Self {
        let draft = self.draft_mut();
        draft.defaults = draft.defaults.in_scope(Some(account), None, None);
        self
    }

    fn in_region(&mut self, region: &str) -> &mut Self {
        let draft = self.draft_mut();
        draft.defaults = draft.defaults.in_scope(None, Some(region), None);
        self
    }

    fn in_partition(&mut self, partition: &str) -> &mut Self {
        let draft = self.draft_mut();
        draft.defaults = draft.defaults.in_scope(None, None, Some(partition));
        self
    }

    fn for_account(&mut self, account: &str) -> &mut Self {
        let draft = self.draft_mut();
        let arn = account_root_arn(draft.defaults.partition(), account);
        draft.add_principal(PrincipalKind::Aws, arn);
        self
    }

    fn for_user(&mut self, account: &str, user: &str) -> &mut Self {
        let draft = self.draft_mut();
        let arn = format!("arn:{}:iam::{}:user/{}", draft.defaults.partition(), account, user);
        draft.add_principal(PrincipalKind::Aws, arn);
        self
    }

    fn for_role(&mut self, account: &str, role: &str) -> &mut Self {
        let draft = self.draft_mut();
        let arn = format!("arn:{}:iam::{}:role/{}", draft.defaults.partition(), account, role);
        draft.add_principal(PrincipalKind::Aws, arn);
        self
    }

    /// Any principal ARN, such as an assumed-role session.
    fn for_arn(&mut self, arn: &str) -> &mut Self {
        self.draft_mut().add_principal(PrincipalKind::Aws, arn.to_string());
        self
    }

    /// An AWS service principal, e.g. `lambda.amazonaws.com`.
    fn for_service(&mut self, service: &str) -> &mut Self {
        self.draft_mut().add_principal(PrincipalKind::Service, service.to_string());
        self
    }

    /// A web identity or SAML provider.
    fn for_federated(&mut self, provider: &str) -> &mut Self {
        self.draft_mut().add_principal(PrincipalKind::Federated, provider.to_string());
        self
    }

    fn for_canonical_user(&mut self, canonical_user_id: &str) -> &mut Self {
        self.draft_mut().add_principal(PrincipalKind::CanonicalUser, canonical_user_id.to_string());
        self
    }

    /// Everyone. Other principals added before or after are subsumed.
    fn for_public(&mut self) -> &mut Self {
        self.set_principal(Principal::Any)
    }

    fn if_aws_request_tag<V: Into<ConditionValues>>(
        &mut self,
        tag_key: &str,
        values: V,
        operator: Option<&str>,
    ) -> &mut Self {
        self.if_condition("aws:RequestTag/${TagKey}", Some(tag_key), values, operator)
    }

    fn if_aws_resource_tag<V: Into<ConditionValues>>(
        &mut self,
        tag_key: &str,
        values: V,
        operator: Option<&str>,
    ) -> &mut Self {
        self.if_condition("aws:ResourceTag/${TagKey}", Some(tag_key), values, operator)
    }

    fn if_aws_tag_keys<V: Into<ConditionValues>>(&mut self, values: V, operator: Option<&str>) -> &mut Self {
        self.if_condition("aws:TagKeys", None, values, operator)
    }

    fn if_aws_called_via<V: Into<ConditionValues>>(&mut self, values: V, operator: Option<&str>) -> &mut Self {
        self.if_condition("aws:CalledVia", None, values, operator)
    }

    fn if_aws_principal_account<V: Into<ConditionValues>>(&mut self, values: V, operator: Option<&str>) -> &mut Self {
        self.if_condition("aws:PrincipalAccount", None, values, operator)
    }

    fn if_aws_principal_arn<V: Into<ConditionValues>>(&mut self, values: V, operator: Option<&str>) -> &mut Self {
        self.if_condition("aws:PrincipalArn", None, values, operator.or(Some("ArnLike")))
    }

    fn if_aws_principal_org_id<V: Into<ConditionValues>>(&mut self, values: V, operator: Option<&str>) -> &mut Self {
        self.if_condition("aws:PrincipalOrgID", None, values, operator)
    }

    fn if_aws_requested_region<V: Into<ConditionValues>>(&mut self, values: V, operator: Option<&str>) -> &mut Self {
        self.if_condition("aws:RequestedRegion", None, values, operator)
    }

    fn if_aws_source_ip<V: Into<ConditionValues>>(&mut self, values: V, operator: Option<&str>) -> &mut Self {
        self.if_condition("aws:SourceIp", None, values, operator.or(Some("IpAddress")))
    }

    fn if_aws_source_vpc<V: Into<ConditionValues>>(&mut self, values: V, operator: Option<&str>) -> &mut Self {
        self.if_condition("aws:SourceVpc", None, values, operator)
    }

    fn if_aws_secure_transport(&mut self, value: bool) -> &mut Self {
        self.if_condition("aws:SecureTransport", None, value, Some("Bool"))
    }

    fn if_aws_multi_factor_auth_present(&mut self, value: bool) -> &mut Self {
        self.if_condition("aws:MultiFactorAuthPresent", None, value, Some("Bool"))
    }

    /// Seconds since the principal last authenticated with MFA.
    fn if_aws_multi_factor_auth_age<V: Into<ConditionValues>>(
        &mut self,
        values: V,
        operator: Option<&str>,
    ) -> &mut Self {
        self.if_condition("aws:MultiFactorAuthAge", None, values, operator.or(Some("NumericLessThan")))
    }

    fn if_aws_current_time<V: Into<ConditionValues>>(&mut self, values: V, operator: Option<&str>) -> &mut Self {
        self.if_condition("aws:CurrentTime", None, values, operator.or(Some("DateLessThan")))
    }

    fn if_aws_epoch_time<V: Into<ConditionValues>>(&mut self, values: V, operator: Option<&str>) -> &mut Self {
        self.if_condition("aws:EpochTime", None, values, operator.or(Some("DateLessThan")))
    }

    fn if_aws_via_aws_service(&mut self, value: bool) -> &mut Self {
        self.if_condition("aws:ViaAWSService", None, value, Some("Bool"))
    }

    fn build(&self) -> Statement {
        self.draft().build()
    }
}

impl FluentStatement for StatementDraft {
    #[inline]
    fn draft(&self) -> &StatementDraft {
        self
    }

    #[inline]
    fn draft_mut(&mut self) -> &mut StatementDraft {
        self
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            build_condition, ArnDefaults, ConditionValues, FluentStatement, Principal, PrincipalKind,
            SpecifiedPrincipal, StatementDraft,
        },
        chrono::{TimeZone, Utc},
        indoc::indoc,
        ipnet::IpNet,
        pretty_assertions::assert_eq,
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_actions_are_idempotent() {
        let mut draft = StatementDraft::new();
        draft.add_action("memorydb:CreateCluster").add_action("memorydb:CreateCluster");
        assert_eq!(draft.actions(), &["memorydb:CreateCluster".to_string()]);

        draft.add_actions(["memorydb:DeleteCluster", "memorydb:CreateCluster", "memorydb:DescribeClusters"]);
        assert_eq!(draft.actions(), &["memorydb:CreateCluster", "memorydb:DeleteCluster", "memorydb:DescribeClusters"]);
    }

    #[test_log::test]
    fn test_resources_keep_order_and_repeats() {
        let mut draft = StatementDraft::new();
        draft.add_resource("arn:aws:sqs:*:*:b").add_resource("arn:aws:sqs:*:*:a").add_resource("arn:aws:sqs:*:*:b");
        assert_eq!(draft.resources(), &["arn:aws:sqs:*:*:b", "arn:aws:sqs:*:*:a", "arn:aws:sqs:*:*:b"]);

        let statement = draft.build();
        assert_eq!(statement.resources(), vec!["arn:aws:sqs:*:*:b", "arn:aws:sqs:*:*:a", "arn:aws:sqs:*:*:b"]);
    }

    #[test_log::test]
    fn test_conditions_keep_order_and_repeats() {
        let mut draft = StatementDraft::new();
        draft
            .if_condition("aws:ResourceTag/${TagKey}", Some("Team"), "payments", None)
            .if_condition("aws:ResourceTag/${TagKey}", Some("Team"), "payments", Some("StringEquals"));

        assert_eq!(draft.conditions().len(), 2);
        assert_eq!(draft.conditions()[0].operator(), "StringLike");
        assert_eq!(draft.conditions()[1].operator(), "StringEquals");
        assert_eq!(draft.conditions()[0].key(), draft.conditions()[1].key());
    }

    #[test_log::test]
    fn test_default_resource() {
        let mut draft = StatementDraft::new();
        draft.add_action("sqs:ListQueues");
        assert_eq!(
            draft.build().to_string(),
            indoc! { r#"
            {
                "Effect": "Allow",
                "Action": [
                    "sqs:ListQueues"
                ],
                "Resource": "*"
            }"# }
        );

        draft.for_service("sns.amazonaws.com");
        assert!(draft.build().resource().is_none());

        draft.not_resource();
        assert!(draft.build().not_resource().is_none());
        draft.on_all_resources();
        assert_eq!(draft.build().not_resource().unwrap().to_vec(), vec!["*"]);
    }

    #[test_log::test]
    fn test_principals() {
        let mut draft = StatementDraft::new();
        draft
            .in_partition("aws-us-gov")
            .for_account("123456789012")
            .for_user("123456789012", "alice")
            .for_role("123456789012", "deployer")
            .for_arn("arn:aws-us-gov:sts::123456789012:assumed-role/deployer/session")
            .for_account("123456789012")
            .for_service("lambda.amazonaws.com")
            .for_federated("cognito-identity.amazonaws.com")
            .for_canonical_user("79a59df900b949e55d96a1e698fbacedfd6e09d98eacf8f8d5218e7cd47ef2be")
            .not_principal();

        let statement = draft.build();
        assert!(statement.principal().is_none());
        assert_eq!(
            format!("{}", statement.not_principal().unwrap()),
            indoc! { r#"
            {
                "AWS": [
                    "arn:aws-us-gov:iam::123456789012:root",
                    "arn:aws-us-gov:iam::123456789012:user/alice",
                    "arn:aws-us-gov:iam::123456789012:role/deployer",
                    "arn:aws-us-gov:sts::123456789012:assumed-role/deployer/session"
                ],
                "CanonicalUser": [
                    "79a59df900b949e55d96a1e698fbacedfd6e09d98eacf8f8d5218e7cd47ef2be"
                ],
                "Federated": [
                    "cognito-identity.amazonaws.com"
                ],
                "Service": [
                    "lambda.amazonaws.com"
                ]
            }"# }
        );

        draft.for_public().for_account("210987654321");
        assert_eq!(draft.principal(), Some(&Principal::Any));
    }

    #[test_log::test]
    fn test_scope() {
        let mut draft = StatementDraft::new();
        draft.in_account("123456789012").in_region("eu-west-1");
        assert_eq!(draft.arn_defaults(), &ArnDefaults::new().in_scope(Some("123456789012"), Some("eu-west-1"), None));

        draft.with_arn_defaults(ArnDefaults::new());
        assert_eq!(draft.arn_defaults().account(), "*");
        assert!(draft.principal().is_none());

        draft.set_principal(Principal::Any);
        let mut sp = SpecifiedPrincipal::default();
        sp.add(PrincipalKind::Service, "ec2.amazonaws.com");
        draft.set_principal(sp.into());
        draft.for_service("ec2.amazonaws.com");
        assert_eq!(
            format!("{}", draft.principal().unwrap()),
            indoc! { r#"
            {
                "Service": [
                    "ec2.amazonaws.com"
                ]
            }"# }
        );
    }

    #[test_log::test]
    fn test_global_condition_helpers() {
        let mut draft = StatementDraft::new();
        draft
            .deny()
            .sid("Guardrails")
            .add_action("sqs:*")
            .if_aws_request_tag("Team", "payments", None)
            .if_aws_resource_tag("Team", ["payments", "billing"], Some("StringEquals"))
            .if_aws_tag_keys(vec!["Team", "CostCenter"], Some("ForAllValues:StringEquals"))
            .if_aws_called_via("cloudformation.amazonaws.com", Some("ForAnyValue:StringEquals"))
            .if_aws_principal_account("123456789012", None)
            .if_aws_principal_arn("arn:aws:iam::123456789012:role/*", None)
            .if_aws_principal_org_id("o-abcdefghij", Some("StringEquals"))
            .if_aws_requested_region(["us-east-1", "us-west-2"], Some("StringNotEquals"))
            .if_aws_source_ip(IpNet::from_str("203.0.113.0/24").unwrap(), Some("NotIpAddress"))
            .if_aws_source_vpc("vpc-111bbb22", None)
            .if_aws_secure_transport(false)
            .if_aws_multi_factor_auth_present(true)
            .if_aws_multi_factor_auth_age(3600_i64, None)
            .if_aws_current_time(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(), None)
            .if_aws_epoch_time(1767225600_i64, Some("DateGreaterThan"))
            .if_aws_via_aws_service(true);

        let operators: Vec<&str> = draft.conditions().iter().map(|c| c.operator()).collect();
        assert_eq!(
            operators,
            vec![
                "StringLike",
                "StringEquals",
                "ForAllValues:StringEquals",
                "ForAnyValue:StringEquals",
                "StringLike",
                "ArnLike",
                "StringEquals",
                "StringNotEquals",
                "NotIpAddress",
                "StringLike",
                "Bool",
                "Bool",
                "NumericLessThan",
                "DateLessThan",
                "DateGreaterThan",
                "Bool",
            ]
        );

        let keys: Vec<&str> = draft.conditions().iter().map(|c| c.key()).collect();
        assert_eq!(
            keys,
            vec![
                "aws:RequestTag/Team",
                "aws:ResourceTag/Team",
                "aws:TagKeys",
                "aws:CalledVia",
                "aws:PrincipalAccount",
                "aws:PrincipalArn",
                "aws:PrincipalOrgID",
                "aws:RequestedRegion",
                "aws:SourceIp",
                "aws:SourceVpc",
                "aws:SecureTransport",
                "aws:MultiFactorAuthPresent",
                "aws:MultiFactorAuthAge",
                "aws:CurrentTime",
                "aws:EpochTime",
                "aws:ViaAWSService",
            ]
        );

        assert_eq!(draft.conditions()[8].values(), &["203.0.113.0/24"]);
        assert_eq!(draft.conditions()[13].values(), &["2026-01-01T00:00:00Z"]);
        assert_eq!(draft.conditions()[14].values(), &["1767225600"]);

        let mut other = StatementDraft::new();
        let clause = build_condition("aws:SourceIp", None, ConditionValues::from("10.0.0.0/8"), Some("IpAddress"));
        other.add_condition(clause);
        assert_eq!(other.conditions()[0].key(), "aws:SourceIp");
    }
}
