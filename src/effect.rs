use {
    serde::{Deserialize, Serialize},
    std::fmt::{Display, Formatter, Result as FmtResult},
};

/// Whether a statement grants or refuses the access it describes.
///
/// New drafts start out as [Effect::Allow].
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub enum Effect {
    #[default]
    Allow,
    Deny,
}

impl Effect {
    #[inline]
    pub fn is_allow(self) -> bool {
        matches!(self, Self::Allow)
    }

    #[inline]
    pub fn is_deny(self) -> bool {
        matches!(self, Self::Deny)
    }
}

impl Display for Effect {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::Allow => f.write_str("Allow"),
            Self::Deny => f.write_str("Deny"),
        }
    }
}
