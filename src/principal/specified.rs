use {
    crate::display_json,
    derive_builder::Builder,
    serde::{ser::SerializeMap, Serialize, Serializer},
};

/// The kinds of principal IAM accepts in a `Principal` block.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum PrincipalKind {
    Aws,
    CanonicalUser,
    Federated,
    Service,
}

impl PrincipalKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Aws => "AWS",
            Self::CanonicalUser => "CanonicalUser",
            Self::Federated => "Federated",
            Self::Service => "Service",
        }
    }
}

/// Principals grouped by kind. Each list keeps insertion order and ignores repeats.
#[derive(Builder, Clone, Debug, Default, Eq, PartialEq)]
pub struct SpecifiedPrincipal {
    #[builder(setter(into), default)]
    aws: Vec<String>,

    #[builder(setter(into), default)]
    canonical_user: Vec<String>,

    #[builder(setter(into), default)]
    federated: Vec<String>,

    #[builder(setter(into), default)]
    service: Vec<String>,
}

display_json!(SpecifiedPrincipal);

impl SpecifiedPrincipal {
    #[inline]
    pub fn builder() -> SpecifiedPrincipalBuilder {
        SpecifiedPrincipalBuilder::default()
    }

    #[inline]
    pub fn aws(&self) -> &[String] {
        &self.aws
    }

    #[inline]
    pub fn canonical_user(&self) -> &[String] {
        &self.canonical_user
    }

    #[inline]
    pub fn federated(&self) -> &[String] {
        &self.federated
    }

    #[inline]
    pub fn service(&self) -> &[String] {
        &self.service
    }

    pub fn get(&self, kind: PrincipalKind) -> &[String] {
        match kind {
            PrincipalKind::Aws => &self.aws,
            PrincipalKind::CanonicalUser => &self.canonical_user,
            PrincipalKind::Federated => &self.federated,
            PrincipalKind::Service => &self.service,
        }
    }

    pub fn add<S: Into<String>>(&mut self, kind: PrincipalKind, principal: S) {
        let list = match kind {
            PrincipalKind::Aws => &mut self.aws,
            PrincipalKind::CanonicalUser => &mut self.canonical_user,
            PrincipalKind::Federated => &mut self.federated,
            PrincipalKind::Service => &mut self.service,
        };

        let principal = principal.into();
        if !list.contains(&principal) {
            list.push(principal);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.aws.is_empty() && self.canonical_user.is_empty() && self.federated.is_empty() && self.service.is_empty()
    }
}

impl Serialize for SpecifiedPrincipal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for kind in [PrincipalKind::Aws, PrincipalKind::CanonicalUser, PrincipalKind::Federated, PrincipalKind::Service]
        {
            let list = self.get(kind);
            if !list.is_empty() {
                map.serialize_entry(kind.as_str(), list)?;
            }
        }
        map.end()
    }
}
