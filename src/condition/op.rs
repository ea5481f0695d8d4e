use {
    crate::StatementError,
    log::debug,
    serde::{de, de::Deserializer, ser::Serializer, Deserialize, Serialize},
    std::{
        fmt::{Debug, Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// IAM's documented condition operators.
///
/// Condition clauses carry their operator as a string and the builder never checks it; this type exists for consumers
/// that want to validate or inspect an operator.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum ConditionOp {
    ArnEquals,
    ArnEqualsIfExists,
    ArnLike,
    ArnLikeIfExists,
    ArnNotEquals,
    ArnNotEqualsIfExists,
    ArnNotLike,
    ArnNotLikeIfExists,
    BinaryEquals,
    BinaryEqualsIfExists,
    Bool,
    BoolIfExists,
    DateEquals,
    DateEqualsIfExists,
    DateGreaterThan,
    DateGreaterThanEquals,
    DateGreaterThanEqualsIfExists,
    DateGreaterThanIfExists,
    DateLessThan,
    DateLessThanEquals,
    DateLessThanEqualsIfExists,
    DateLessThanIfExists,
    DateNotEquals,
    DateNotEqualsIfExists,
    IpAddress,
    IpAddressIfExists,
    NotIpAddress,
    NotIpAddressIfExists,
    Null,
    NumericEquals,
    NumericEqualsIfExists,
    NumericGreaterThan,
    NumericGreaterThanEquals,
    NumericGreaterThanEqualsIfExists,
    NumericGreaterThanIfExists,
    NumericLessThan,
    NumericLessThanEquals,
    NumericLessThanEqualsIfExists,
    NumericLessThanIfExists,
    NumericNotEquals,
    NumericNotEqualsIfExists,
    StringEquals,
    StringEqualsIfExists,
    StringEqualsIgnoreCase,
    StringEqualsIgnoreCaseIfExists,
    StringLike,
    StringLikeIfExists,
    StringNotEquals,
    StringNotEqualsIfExists,
    StringNotEqualsIgnoreCase,
    StringNotEqualsIgnoreCaseIfExists,
    StringNotLike,
    StringNotLikeIfExists,
}

impl ConditionOp {
    pub const ALL: [ConditionOp; 53] = [
        Self::ArnEquals,
        Self::ArnEqualsIfExists,
        Self::ArnLike,
        Self::ArnLikeIfExists,
        Self::ArnNotEquals,
        Self::ArnNotEqualsIfExists,
        Self::ArnNotLike,
        Self::ArnNotLikeIfExists,
        Self::BinaryEquals,
        Self::BinaryEqualsIfExists,
        Self::Bool,
        Self::BoolIfExists,
        Self::DateEquals,
        Self::DateEqualsIfExists,
        Self::DateGreaterThan,
        Self::DateGreaterThanEquals,
        Self::DateGreaterThanEqualsIfExists,
        Self::DateGreaterThanIfExists,
        Self::DateLessThan,
        Self::DateLessThanEquals,
        Self::DateLessThanEqualsIfExists,
        Self::DateLessThanIfExists,
        Self::DateNotEquals,
        Self::DateNotEqualsIfExists,
        Self::IpAddress,
        Self::IpAddressIfExists,
        Self::NotIpAddress,
        Self::NotIpAddressIfExists,
        Self::Null,
        Self::NumericEquals,
        Self::NumericEqualsIfExists,
        Self::NumericGreaterThan,
        Self::NumericGreaterThanEquals,
        Self::NumericGreaterThanEqualsIfExists,
        Self::NumericGreaterThanIfExists,
        Self::NumericLessThan,
        Self::NumericLessThanEquals,
        Self::NumericLessThanEqualsIfExists,
        Self::NumericLessThanIfExists,
        Self::NumericNotEquals,
        Self::NumericNotEqualsIfExists,
        Self::StringEquals,
        Self::StringEqualsIfExists,
        Self::StringEqualsIgnoreCase,
        Self::StringEqualsIgnoreCaseIfExists,
        Self::StringLike,
        Self::StringLikeIfExists,
        Self::StringNotEquals,
        Self::StringNotEqualsIfExists,
        Self::StringNotEqualsIgnoreCase,
        Self::StringNotEqualsIgnoreCaseIfExists,
        Self::StringNotLike,
        Self::StringNotLikeIfExists,
    ];

    /// Whether this is one of the `...IfExists` forms.
    #[inline]
    pub fn is_if_exists(self) -> bool {
        self.to_string().ends_with("IfExists")
    }
}

impl Display for ConditionOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(self, f)
    }
}

impl FromStr for ConditionOp {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::ALL.iter().find(|op| op.to_string() == s) {
            Some(op) => Ok(*op),
            None => {
                debug!("Unrecognized condition operator: {s:?}");
                Err(StatementError::InvalidConditionOperator(s.to_string()))
            }
        }
    }
}

impl<'de> Deserialize<'de> for ConditionOp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        ConditionOp::from_str(&s).map_err(de::Error::custom)
    }
}

impl Serialize for ConditionOp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// The multivalued-key prefixes IAM allows in front of an operator.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SetOperator {
    ForAllValues,
    ForAnyValue,
}

impl Display for SetOperator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Debug::fmt(self, f)
    }
}

/// An operator with its optional set prefix, e.g. `ForAnyValue:StringLike`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct QualifiedOp {
    set: Option<SetOperator>,
    op: ConditionOp,
}

impl QualifiedOp {
    #[inline]
    pub fn new(set: Option<SetOperator>, op: ConditionOp) -> Self {
        Self {
            set,
            op,
        }
    }

    #[inline]
    pub fn set(&self) -> Option<SetOperator> {
        self.set
    }

    #[inline]
    pub fn op(&self) -> ConditionOp {
        self.op
    }
}

impl From<ConditionOp> for QualifiedOp {
    fn from(op: ConditionOp) -> Self {
        Self::new(None, op)
    }
}

impl Display for QualifiedOp {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self.set {
            Some(set) => write!(f, "{}:{}", set, self.op),
            None => write!(f, "{}", self.op),
        }
    }
}

impl FromStr for QualifiedOp {
    type Err = StatementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (set, op) = match s.split_once(':') {
            Some(("ForAllValues", op)) => (Some(SetOperator::ForAllValues), op),
            Some(("ForAnyValue", op)) => (Some(SetOperator::ForAnyValue), op),
            Some(_) => return Err(StatementError::InvalidConditionOperator(s.to_string())),
            None => (None, s),
        };

        match ConditionOp::from_str(op) {
            Ok(op) => Ok(Self::new(set, op)),
            Err(_) => Err(StatementError::InvalidConditionOperator(s.to_string())),
        }
    }
}
