#![warn(clippy::all)]
pub(crate) mod access;
pub(crate) mod action;
pub mod arn;
pub(crate) mod catalog;
pub(crate) mod condition;
pub(crate) mod draft;
pub(crate) mod effect;
pub(crate) mod error;
pub(crate) mod principal;
pub(crate) mod registry;
pub(crate) mod service;
pub mod services;
pub(crate) mod statement;

#[macro_use]
pub(crate) mod serutil;

pub use {
    access::AccessLevel,
    action::Action,
    arn::ArnDefaults,
    catalog::ServiceCatalog,
    condition::{
        build_condition, ConditionClause, ConditionList, ConditionOp, ConditionValues, QualifiedOp, SetOperator,
        DEFAULT_OPERATOR,
    },
    draft::{FluentStatement, StatementDraft},
    effect::Effect,
    error::StatementError,
    principal::{
        account_root_arn, Principal, PrincipalKind, SpecifiedPrincipal, SpecifiedPrincipalBuilder,
        SpecifiedPrincipalBuilderError,
    },
    registry::{
        ActionDescriptor, ActionDescriptorBuilder, ActionDescriptorBuilderError, ConditionKeyDescriptor,
        ConditionKeyDescriptorBuilder, ConditionKeyDescriptorBuilderError, ConditionValueType, ResourceRef,
        ResourceRefBuilder, ResourceRefBuilderError, ResourceTypeDescriptor, ResourceTypeDescriptorBuilder,
        ResourceTypeDescriptorBuilderError, ServiceDefinition, ServiceDefinitionBuilder, ServiceDefinitionBuilderError,
        ServiceDescriptor,
    },
    serutil::StringList,
    service::{ServiceActions, ServiceStatement},
    statement::{Statement, StatementBuilder, StatementBuilderError},
};
