use {
    crate::{ActionDescriptor, ServiceDescriptor, StatementError},
    lazy_static::lazy_static,
    log::{debug, error},
    std::{collections::BTreeMap, str::FromStr},
};

/// Service descriptors compiled into the crate, by file name.
const BUILTIN_SOURCES: &[(&str, &str)] =
    &[("memorydb.json", include_str!("../data/memorydb.json")), ("sqs.json", include_str!("../data/sqs.json"))];

lazy_static! {
    static ref BUILTIN: ServiceCatalog = ServiceCatalog::from_sources(BUILTIN_SOURCES);
}

/// A set of service descriptors, keyed by service prefix.
///
/// Prefixes are looked up case-insensitively.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ServiceCatalog {
    services: BTreeMap<String, ServiceDescriptor>,
}

impl ServiceCatalog {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// The descriptors shipped with this crate.
    pub fn builtin() -> &'static ServiceCatalog {
        &BUILTIN
    }

    fn from_sources(sources: &[(&str, &str)]) -> Self {
        let mut catalog = Self::new();
        for (name, json) in sources {
            if let Err(e) = catalog.load_json(json) {
                error!("Failed to load service descriptor {name}: {e}");
            }
        }
        catalog
    }

    /// Add a descriptor, returning the one it replaces, if any.
    pub fn insert(&mut self, service: ServiceDescriptor) -> Option<ServiceDescriptor> {
        debug!("Adding service {} ({}) to catalog", service.prefix(), service.name());
        self.services.insert(service.prefix().to_ascii_lowercase(), service)
    }

    /// Parse a descriptor from JSON and add it.
    pub fn load_json(&mut self, json: &str) -> Result<&ServiceDescriptor, serde_json::Error> {
        let service = ServiceDescriptor::from_str(json)?;
        let key = service.prefix().to_ascii_lowercase();
        self.insert(service);
        Ok(&self.services[&key])
    }

    pub fn get(&self, prefix: &str) -> Result<&ServiceDescriptor, StatementError> {
        match self.services.get(&prefix.to_ascii_lowercase()) {
            Some(service) => Ok(service),
            None => Err(StatementError::UnknownService(prefix.to_string())),
        }
    }

    /// Look up a qualified `service:Verb` action across all services.
    pub fn describe(&self, action_name: &str) -> Result<&ActionDescriptor, StatementError> {
        match action_name.split_once(':') {
            Some((prefix, _)) => self.get(prefix)?.describe(action_name),
            None => Err(StatementError::InvalidAction(action_name.to_string())),
        }
    }

    /// Service prefixes, sorted.
    pub fn prefixes(&self) -> impl Iterator<Item = &str> {
        self.services.values().map(ServiceDescriptor::prefix)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceDescriptor> {
        self.services.values()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.services.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
