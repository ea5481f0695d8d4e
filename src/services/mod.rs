//! Typed statement builders for the built-in services.
//!
//! Each builder has a `to_*` method per action, an `on_*` method per resource type, and an `if_*` method per
//! service-specific condition key. The tables they are generated from mirror the service descriptors under `data/`,
//! which cover a subset of each service's actions and resource types; the rest are reachable through
//! [crate::ServiceActions::to] and [crate::FluentStatement::add_resource].

/// Generate a typed statement builder for one service.
macro_rules! service_statement {
    (
        $(#[$meta:meta])*
        $name:ident, $prefix:literal;
        actions {
            $($to:ident => $verb:literal, $level:ident;)*
        }
        resources {
            $($on:ident($($param:ident => $placeholder:literal),*) => $template:literal;)*
        }
        conditions {
            $($if_key:ident => $key:literal, $operator:literal;)*
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default)]
        pub struct $name {
            draft: $crate::StatementDraft,
        }

        impl $name {
            /// The IAM service prefix.
            pub const PREFIX: &'static str = $prefix;

            /// Every action verb of the service with its access level.
            pub const ACTIONS: &'static [(&'static str, $crate::AccessLevel)] =
                &[$(($verb, $crate::AccessLevel::$level)),*];

            /// Condition keys of the service and the operator their `if_*` methods default to.
            pub const CONDITION_KEYS: &'static [(&'static str, &'static str)] = &[$(($key, $operator)),*];

            #[inline]
            pub fn new() -> Self {
                Self::default()
            }

            /// The registry entry for this service.
            pub fn descriptor() -> Result<&'static $crate::ServiceDescriptor, $crate::StatementError> {
                $crate::ServiceCatalog::builtin().get($prefix)
            }

            $(
                #[doc = concat!("Add `", $prefix, ":", $verb, "`.")]
                pub fn $to(&mut self) -> &mut Self {
                    <Self as $crate::ServiceActions>::to(self, $verb)
                }
            )*

            $(
                #[doc = concat!("Add a resource ARN built from `", $template, "`.")]
                pub fn $on(&mut self, $($param: &str),*) -> &mut Self {
                    let arn = $crate::arn::resolve_arn(
                        $template,
                        &[$(($placeholder, $param)),*],
                        self.draft.arn_defaults(),
                    );
                    <Self as $crate::FluentStatement>::add_resource(self, arn)
                }
            )*

            $(
                #[doc = concat!("Add a condition on `", $key, "`. The operator defaults to `", $operator, "`.")]
                pub fn $if_key<V>(&mut self, values: V, operator: Option<&str>) -> &mut Self
                where
                    V: Into<$crate::ConditionValues>,
                {
                    let operator = operator.or(Some($operator));
                    <Self as $crate::FluentStatement>::if_condition(self, $key, None, values, operator)
                }
            )*
        }

        impl $crate::FluentStatement for $name {
            #[inline]
            fn draft(&self) -> &$crate::StatementDraft {
                &self.draft
            }

            #[inline]
            fn draft_mut(&mut self) -> &mut $crate::StatementDraft {
                &mut self.draft
            }
        }

        impl $crate::ServiceActions for $name {
            fn service_prefix(&self) -> &str {
                $prefix
            }

            fn action_levels(&self) -> Vec<(&str, $crate::AccessLevel)> {
                Self::ACTIONS.to_vec()
            }

            fn key_operator(&self, key: &str) -> Option<&'static str> {
                Self::CONDITION_KEYS.iter().find(|(name, _)| *name == key).map(|(_, operator)| *operator)
            }
        }
    };
}

mod memorydb;
mod sqs;

pub use {memorydb::MemoryDb, sqs::Sqs};

#[cfg(test)]
mod tests {
    use {
        super::{MemoryDb, Sqs},
        crate::{AccessLevel, ServiceDescriptor},
        pretty_assertions::assert_eq,
    };

    fn check_tables(
        service: &ServiceDescriptor,
        actions: &[(&str, AccessLevel)],
        condition_keys: &[(&str, &str)],
        templates: &[&str],
    ) {
        assert_eq!(actions.len(), service.actions().len(), "{} action count", service.prefix());
        for (verb, level) in actions {
            let qualified = format!("{}:{}", service.prefix(), verb);
            let descriptor = service.describe(&qualified).unwrap();
            assert_eq!(descriptor.access_level(), *level, "{}", qualified);
            assert!(AccessLevel::ALL.contains(&descriptor.access_level()));
        }

        for (key, operator) in condition_keys {
            let descriptor = service.condition_key(key).unwrap();
            assert_eq!(descriptor.value_type().default_operator(), *operator, "{}", key);
        }

        for template in templates {
            assert!(service.resource_types().iter().any(|r| r.arn() == *template), "{}", template);
        }
    }

    #[test_log::test]
    fn test_memorydb_tables_match_registry() {
        check_tables(
            MemoryDb::descriptor().unwrap(),
            MemoryDb::ACTIONS,
            MemoryDb::CONDITION_KEYS,
            &[
                "arn:${Partition}:memorydb:${Region}:${Account}:acl/${AclName}",
                "arn:${Partition}:memorydb:${Region}:${Account}:cluster/${ClusterName}",
                "arn:${Partition}:memorydb:${Region}:${Account}:parametergroup/${ParameterGroupName}",
                "arn:${Partition}:memorydb:${Region}:${Account}:snapshot/${SnapshotName}",
                "arn:${Partition}:memorydb:${Region}:${Account}:subnetgroup/${SubnetGroupName}",
                "arn:${Partition}:memorydb:${Region}:${Account}:user/${UserName}",
            ],
        );
    }

    #[test_log::test]
    fn test_sqs_tables_match_registry() {
        check_tables(
            Sqs::descriptor().unwrap(),
            Sqs::ACTIONS,
            Sqs::CONDITION_KEYS,
            &["arn:${Partition}:sqs:${Region}:${Account}:${QueueName}"],
        );
    }
}
