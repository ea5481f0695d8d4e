use {
    crate::{action::is_valid_service_prefix, display_json, from_str_json, AccessLevel, Action, StatementError},
    derive_builder::Builder,
    log::debug,
    regex::Regex,
    serde::{Deserialize, Serialize},
    std::{collections::HashMap, str::FromStr},
};

/// A resource type an action can be scoped to.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct ResourceRef {
    #[builder(setter(into))]
    name: String,

    #[builder(default)]
    #[serde(default)]
    required: bool,
}

impl ResourceRef {
    pub fn new<S: Into<String>>(name: S, required: bool) -> Self {
        Self {
            name: name.into(),
            required,
        }
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn required(&self) -> bool {
        self.required
    }
}

/// Documentation for one action of a service.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct ActionDescriptor {
    /// The action verb, without the service prefix.
    #[builder(setter(into))]
    name: String,

    /// The owning service's prefix. Filled in when the service descriptor is assembled.
    #[builder(setter(skip))]
    #[serde(skip)]
    service: String,

    #[builder(setter(into), default)]
    #[serde(default)]
    url: String,

    #[builder(setter(into), default)]
    #[serde(default)]
    description: String,

    access_level: AccessLevel,

    #[builder(setter(into), default)]
    #[serde(default)]
    resource_types: Vec<ResourceRef>,

    #[builder(setter(into), default)]
    #[serde(default)]
    condition_keys: Vec<String>,

    /// Other actions IAM also evaluates when this one is requested.
    #[builder(setter(into), default)]
    #[serde(default)]
    dependent_actions: Vec<String>,
}

impl ActionDescriptor {
    #[inline]
    pub fn builder() -> ActionDescriptorBuilder {
        ActionDescriptorBuilder::default()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// The `service:Verb` form used in policy statements.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.service, self.name)
    }

    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn access_level(&self) -> AccessLevel {
        self.access_level
    }

    #[inline]
    pub fn resource_types(&self) -> &[ResourceRef] {
        &self.resource_types
    }

    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }

    #[inline]
    pub fn dependent_actions(&self) -> &[String] {
        &self.dependent_actions
    }

    pub fn required_resource_types(&self) -> impl Iterator<Item = &str> {
        self.resource_types.iter().filter(|r| r.required).map(|r| r.name.as_str())
    }
}

/// One resource shape of a service and the ARN template that names it.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct ResourceTypeDescriptor {
    #[builder(setter(into))]
    name: String,

    #[builder(setter(into))]
    arn: String,

    #[builder(setter(into), default)]
    #[serde(default)]
    condition_keys: Vec<String>,
}

impl ResourceTypeDescriptor {
    #[inline]
    pub fn builder() -> ResourceTypeDescriptorBuilder {
        ResourceTypeDescriptorBuilder::default()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The ARN template, e.g. `arn:${Partition}:sqs:${Region}:${Account}:${QueueName}`.
    #[inline]
    pub fn arn(&self) -> &str {
        &self.arn
    }

    #[inline]
    pub fn condition_keys(&self) -> &[String] {
        &self.condition_keys
    }

    /// The placeholders of the ARN template that the caller has to supply, i.e. everything except partition, region,
    /// and account.
    pub fn identifiers(&self) -> Vec<String> {
        crate::arn::placeholders(&self.arn)
            .into_iter()
            .filter(|name| ![crate::arn::PARTITION, crate::arn::REGION, crate::arn::ACCOUNT].contains(&name.as_str()))
            .collect()
    }
}

/// The value type of a condition key, as AWS documents it.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum ConditionValueType {
    #[serde(rename = "String")]
    String,
    #[serde(rename = "ArrayOfString")]
    ArrayOfString,
    #[serde(rename = "ARN")]
    Arn,
    #[serde(rename = "ArrayOfARN")]
    ArrayOfArn,
    #[serde(rename = "Bool")]
    Bool,
    #[serde(rename = "ArrayOfBool")]
    ArrayOfBool,
    #[serde(rename = "Date")]
    Date,
    #[serde(rename = "Numeric")]
    Numeric,
    #[serde(rename = "IPAddress")]
    IpAddress,
    #[serde(rename = "Binary")]
    Binary,
}

impl ConditionValueType {
    /// The operator the typed condition helpers use for keys of this type.
    pub fn default_operator(&self) -> &'static str {
        match self {
            Self::String | Self::ArrayOfString => "StringLike",
            Self::Arn | Self::ArrayOfArn => "ArnLike",
            Self::Bool | Self::ArrayOfBool => "Bool",
            Self::Date => "DateLessThan",
            Self::Numeric => "NumericLessThan",
            Self::IpAddress => "IpAddress",
            Self::Binary => "BinaryEquals",
        }
    }
}

/// Documentation for a condition key.
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct ConditionKeyDescriptor {
    #[builder(setter(into))]
    name: String,

    #[builder(setter(into), default)]
    #[serde(default)]
    description: String,

    #[serde(rename = "Type")]
    value_type: ConditionValueType,
}

impl ConditionKeyDescriptor {
    #[inline]
    pub fn builder() -> ConditionKeyDescriptorBuilder {
        ConditionKeyDescriptorBuilder::default()
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[inline]
    pub fn value_type(&self) -> ConditionValueType {
        self.value_type
    }
}

/// The unvalidated form of a [ServiceDescriptor], as written in JSON or assembled with [ServiceDefinitionBuilder].
#[derive(Builder, Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields, rename_all = "PascalCase")]
pub struct ServiceDefinition {
    #[builder(setter(into))]
    prefix: String,

    #[builder(setter(into))]
    name: String,

    #[builder(setter(into, strip_option), default)]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    url: Option<String>,

    #[builder(setter(into), default)]
    #[serde(default)]
    actions: Vec<ActionDescriptor>,

    #[builder(setter(into), default)]
    #[serde(default)]
    resource_types: Vec<ResourceTypeDescriptor>,

    #[builder(setter(into), default)]
    #[serde(default)]
    condition_keys: Vec<ConditionKeyDescriptor>,
}

impl ServiceDefinition {
    #[inline]
    pub fn builder() -> ServiceDefinitionBuilder {
        ServiceDefinitionBuilder::default()
    }
}

/// The read-only action registry of one service: its actions, resource types, and condition keys.
///
/// Descriptors are validated when they are created and never change afterwards. Statement building does not consult
/// the registry; it is there for documentation and introspection.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(try_from = "ServiceDefinition", into = "ServiceDefinition")]
pub struct ServiceDescriptor {
    prefix: String,
    name: String,
    url: Option<String>,
    actions: Vec<ActionDescriptor>,
    action_index: HashMap<String, usize>,
    resource_types: Vec<ResourceTypeDescriptor>,
    condition_keys: Vec<ConditionKeyDescriptor>,
}

display_json!(ServiceDescriptor);
from_str_json!(ServiceDescriptor);

impl TryFrom<ServiceDefinition> for ServiceDescriptor {
    type Error = StatementError;

    fn try_from(definition: ServiceDefinition) -> Result<Self, Self::Error> {
        let ServiceDefinition {
            prefix,
            name,
            url,
            mut actions,
            resource_types,
            condition_keys,
        } = definition;

        if !is_valid_service_prefix(&prefix) {
            debug!("Service descriptor has an invalid prefix: {prefix:?}");
            return Err(invalid(format!("invalid service prefix: {prefix}")));
        }

        let mut resource_names: Vec<&str> = Vec::with_capacity(resource_types.len());
        for resource_type in &resource_types {
            if resource_names.contains(&resource_type.name.as_str()) {
                return Err(invalid(format!("duplicate resource type: {}", resource_type.name)));
            }

            let parts: Vec<&str> = resource_type.arn.splitn(6, ':').collect();
            if parts.len() != 6 || parts[0] != "arn" {
                debug!("Resource type {} has a malformed ARN template: {}", resource_type.name, resource_type.arn);
                return Err(invalid(format!(
                    "resource type {} has an invalid ARN template: {}",
                    resource_type.name, resource_type.arn
                )));
            }

            resource_names.push(&resource_type.name);
        }

        let mut action_index = HashMap::with_capacity(actions.len());
        for (i, action) in actions.iter_mut().enumerate() {
            match Action::new(prefix.as_str(), action.name.as_str()) {
                Ok(parsed) if !parsed.is_wildcard() => (),
                _ => return Err(invalid(format!("invalid action name: {}:{}", prefix, action.name))),
            }

            if action_index.insert(action.name.clone(), i).is_some() {
                return Err(invalid(format!("duplicate action: {}:{}", prefix, action.name)));
            }

            for resource in &action.resource_types {
                if !resource_names.contains(&resource.name.as_str()) {
                    return Err(invalid(format!(
                        "action {}:{} references undeclared resource type {}",
                        prefix, action.name, resource.name
                    )));
                }
            }

            action.service = prefix.clone();
        }

        Ok(Self {
            prefix,
            name,
            url,
            actions,
            action_index,
            resource_types,
            condition_keys,
        })
    }
}

impl From<ServiceDescriptor> for ServiceDefinition {
    fn from(descriptor: ServiceDescriptor) -> Self {
        Self {
            prefix: descriptor.prefix,
            name: descriptor.name,
            url: descriptor.url,
            actions: descriptor.actions,
            resource_types: descriptor.resource_types,
            condition_keys: descriptor.condition_keys,
        }
    }
}

fn invalid(reason: String) -> StatementError {
    StatementError::InvalidServiceDescriptor(reason)
}

impl ServiceDescriptor {
    /// The IAM service prefix, e.g. `memorydb`.
    #[inline]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[inline]
    pub fn actions(&self) -> &[ActionDescriptor] {
        &self.actions
    }

    #[inline]
    pub fn resource_types(&self) -> &[ResourceTypeDescriptor] {
        &self.resource_types
    }

    #[inline]
    pub fn condition_keys(&self) -> &[ConditionKeyDescriptor] {
        &self.condition_keys
    }

    /// Look up an action by its qualified `service:Verb` name.
    ///
    /// The service prefix is compared case-insensitively; the verb must match exactly.
    pub fn describe(&self, action_name: &str) -> Result<&ActionDescriptor, StatementError> {
        let action = Action::from_str(action_name)?;
        if action.is_any() || !action.in_service(&self.prefix) {
            return Err(StatementError::UnknownAction(action_name.to_string()));
        }

        match self.action_index.get(action.action()) {
            Some(i) => Ok(&self.actions[*i]),
            None => Err(StatementError::UnknownAction(action_name.to_string())),
        }
    }

    /// Look up an action by its verb alone.
    pub fn action(&self, verb: &str) -> Option<&ActionDescriptor> {
        self.action_index.get(verb).map(|i| &self.actions[*i])
    }

    pub fn actions_with_access_level(&self, level: AccessLevel) -> impl Iterator<Item = &ActionDescriptor> {
        self.actions.iter().filter(move |action| action.access_level == level)
    }

    /// Actions whose verb matches the regular expression `pattern`.
    pub fn actions_matching(&self, pattern: &str) -> Result<Vec<&ActionDescriptor>, StatementError> {
        let re = Regex::new(pattern).map_err(|e| {
            debug!("Invalid action pattern {pattern:?}: {e}");
            StatementError::InvalidPattern(pattern.to_string())
        })?;

        Ok(self.actions.iter().filter(|action| re.is_match(&action.name)).collect())
    }

    pub fn resource_type(&self, name: &str) -> Option<&ResourceTypeDescriptor> {
        self.resource_types.iter().find(|resource_type| resource_type.name == name)
    }

    pub fn condition_key(&self, name: &str) -> Option<&ConditionKeyDescriptor> {
        self.condition_keys.iter().find(|key| key.name == name)
    }
}
