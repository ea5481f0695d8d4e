use {
    crate::{
        arn::resolve_arn, AccessLevel, ConditionClause, ConditionValues, FluentStatement, ServiceCatalog,
        ServiceDescriptor, StatementDraft, StatementError,
    },
    log::debug,
    regex::Regex,
};

/// Statement-building methods for a builder bound to one service.
///
/// Implementors say which service they are for and which actions it has; the bulk selectors and the `to`/`if_key`
/// shorthands are provided.
pub trait ServiceActions: FluentStatement {
    /// The IAM service prefix, e.g. `sqs`.
    fn service_prefix(&self) -> &str;

    /// Every action verb of the service with its access level.
    fn action_levels(&self) -> Vec<(&str, AccessLevel)>;

    /// The operator to use for a condition key when the caller does not give one.
    fn key_operator(&self, _key: &str) -> Option<&'static str> {
        None
    }

    /// Add `prefix:verb`.
    fn to(&mut self, verb: &str) -> &mut Self {
        let action = format!("{}:{}", self.service_prefix(), verb);
        self.add_action(action)
    }

    /// Add `prefix:*`.
    fn all_actions(&mut self) -> &mut Self {
        self.to("*")
    }

    /// Add every action whose verb matches the regular expression `pattern`.
    fn all_matching_actions(&mut self, pattern: &str) -> Result<&mut Self, StatementError> {
        let re = Regex::new(pattern).map_err(|e| {
            debug!("Invalid action pattern {pattern:?}: {e}");
            StatementError::InvalidPattern(pattern.to_string())
        })?;

        let verbs: Vec<String> = self
            .action_levels()
            .into_iter()
            .filter(|(verb, _)| re.is_match(verb))
            .map(|(verb, _)| verb.to_string())
            .collect();
        for verb in verbs {
            self.to(&verb);
        }
        Ok(self)
    }

    fn all_actions_with_access_level(&mut self, level: AccessLevel) -> &mut Self {
        let verbs: Vec<String> = self
            .action_levels()
            .into_iter()
            .filter(|(_, action_level)| *action_level == level)
            .map(|(verb, _)| verb.to_string())
            .collect();
        for verb in verbs {
            self.to(&verb);
        }
        self
    }

    fn all_list_actions(&mut self) -> &mut Self {
        self.all_actions_with_access_level(AccessLevel::List)
    }

    fn all_read_actions(&mut self) -> &mut Self {
        self.all_actions_with_access_level(AccessLevel::Read)
    }

    fn all_write_actions(&mut self) -> &mut Self {
        self.all_actions_with_access_level(AccessLevel::Write)
    }

    fn all_permission_management_actions(&mut self) -> &mut Self {
        self.all_actions_with_access_level(AccessLevel::PermissionsManagement)
    }

    fn all_tagging_actions(&mut self) -> &mut Self {
        self.all_actions_with_access_level(AccessLevel::Tagging)
    }

    /// Add a condition on a service key. A key without a `:` gets the service prefix, so `TLSEnabled` on `memorydb`
    /// becomes `memorydb:TLSEnabled`.
    fn if_key<V: Into<ConditionValues>>(&mut self, key: &str, values: V, operator: Option<&str>) -> &mut Self {
        let key = if key.contains(':') {
            key.to_string()
        } else {
            format!("{}:{}", self.service_prefix(), key)
        };
        let operator = operator.or_else(|| self.key_operator(&key));
        self.add_condition(ConditionClause::new(key, values, operator))
    }
}

/// A statement builder bound to a [ServiceDescriptor].
///
/// The descriptor supplies the resource ARN templates for [ServiceStatement::on], the action tables for the bulk
/// selectors, and the value types of the service's condition keys.
#[derive(Clone, Debug)]
pub struct ServiceStatement<'a> {
    service: &'a ServiceDescriptor,
    draft: StatementDraft,
}

impl<'a> ServiceStatement<'a> {
    pub fn new(service: &'a ServiceDescriptor) -> Self {
        Self {
            service,
            draft: StatementDraft::new(),
        }
    }

    /// A builder for one of the built-in services.
    pub fn builtin(prefix: &str) -> Result<ServiceStatement<'static>, StatementError> {
        Ok(ServiceStatement::new(ServiceCatalog::builtin().get(prefix)?))
    }

    #[inline]
    pub fn descriptor(&self) -> &'a ServiceDescriptor {
        self.service
    }

    /// Add the ARN of a `resource_type` resource.
    ///
    /// Placeholders in the type's ARN template take their value from `substitutions`, then from the draft's
    /// [ArnDefaults][crate::ArnDefaults]. Any other placeholder is left in the ARN.
    pub fn on(&mut self, resource_type: &str, substitutions: &[(&str, &str)]) -> Result<&mut Self, StatementError> {
        let template = match self.service.resource_type(resource_type) {
            Some(descriptor) => descriptor.arn(),
            None => {
                debug!("Service {} has no resource type {resource_type}", self.service.prefix());
                return Err(StatementError::UnknownResourceType(resource_type.to_string()));
            }
        };

        let arn = resolve_arn(template, substitutions, self.draft.arn_defaults());
        Ok(self.add_resource(arn))
    }
}

impl<'a> FluentStatement for ServiceStatement<'a> {
    #[inline]
    fn draft(&self) -> &StatementDraft {
        &self.draft
    }

    #[inline]
    fn draft_mut(&mut self) -> &mut StatementDraft {
        &mut self.draft
    }
}

impl<'a> ServiceActions for ServiceStatement<'a> {
    fn service_prefix(&self) -> &str {
        self.service.prefix()
    }

    fn action_levels(&self) -> Vec<(&str, AccessLevel)> {
        self.service.actions().iter().map(|action| (action.name(), action.access_level())).collect()
    }

    fn key_operator(&self, key: &str) -> Option<&'static str> {
        self.service.condition_key(key).map(|descriptor| descriptor.value_type().default_operator())
    }
}
