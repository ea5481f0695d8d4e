mod op;

pub use op::{ConditionOp, QualifiedOp, SetOperator};

use {
    crate::{arn::resolve_with, display_json, StatementError},
    chrono::{DateTime, SecondsFormat, Utc},
    ipnet::IpNet,
    log::{debug, trace},
    serde::{
        ser::{SerializeMap, Serializer},
        Serialize,
    },
    std::{ops::Index, slice::Iter, str::FromStr},
};

/// The operator used when a condition is added without one.
pub const DEFAULT_OPERATOR: &str = "StringLike";

/// The values of a condition clause, normalized to a list of strings.
///
/// Conversions exist for the value shapes condition keys use: strings, lists of strings, booleans, numbers, dates
/// (rendered as RFC 3339), and IP networks (rendered in CIDR notation).
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConditionValues(Vec<String>);

impl ConditionValues {
    /// Base64-encode raw bytes for use with `BinaryEquals`.
    pub fn binary(bytes: &[u8]) -> Self {
        Self(vec![base64::encode(bytes)])
    }

    #[inline]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[inline]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl From<&str> for ConditionValues {
    fn from(v: &str) -> Self {
        Self(vec![v.to_string()])
    }
}

impl From<String> for ConditionValues {
    fn from(v: String) -> Self {
        Self(vec![v])
    }
}

impl From<&String> for ConditionValues {
    fn from(v: &String) -> Self {
        Self(vec![v.clone()])
    }
}

impl From<Vec<String>> for ConditionValues {
    fn from(v: Vec<String>) -> Self {
        Self(v)
    }
}

impl From<Vec<&str>> for ConditionValues {
    fn from(v: Vec<&str>) -> Self {
        Self(v.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for ConditionValues {
    fn from(v: &[&str]) -> Self {
        Self(v.iter().map(|s| s.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for ConditionValues {
    fn from(v: [&str; N]) -> Self {
        Self(v.iter().map(|s| s.to_string()).collect())
    }
}

impl From<bool> for ConditionValues {
    fn from(v: bool) -> Self {
        Self(vec![v.to_string()])
    }
}

impl From<i64> for ConditionValues {
    fn from(v: i64) -> Self {
        Self(vec![v.to_string()])
    }
}

impl From<u64> for ConditionValues {
    fn from(v: u64) -> Self {
        Self(vec![v.to_string()])
    }
}

impl From<i32> for ConditionValues {
    fn from(v: i32) -> Self {
        Self(vec![v.to_string()])
    }
}

impl From<f64> for ConditionValues {
    fn from(v: f64) -> Self {
        Self(vec![v.to_string()])
    }
}

impl From<DateTime<Utc>> for ConditionValues {
    fn from(v: DateTime<Utc>) -> Self {
        Self(vec![v.to_rfc3339_opts(SecondsFormat::Secs, true)])
    }
}

impl From<IpNet> for ConditionValues {
    fn from(v: IpNet) -> Self {
        Self(vec![v.to_string()])
    }
}

impl From<Vec<IpNet>> for ConditionValues {
    fn from(v: Vec<IpNet>) -> Self {
        Self(v.iter().map(IpNet::to_string).collect())
    }
}

/// One condition attached to a statement: a key, the values it is compared against, and the comparison operator.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ConditionClause {
    key: String,
    values: Vec<String>,
    operator: String,
}

impl ConditionClause {
    /// Create a clause from an already-resolved key. A missing operator becomes [DEFAULT_OPERATOR].
    pub fn new<K, V>(key: K, values: V, operator: Option<&str>) -> Self
    where
        K: Into<String>,
        V: Into<ConditionValues>,
    {
        Self {
            key: key.into(),
            values: values.into().into_vec(),
            operator: operator.unwrap_or(DEFAULT_OPERATOR).to_string(),
        }
    }

    #[inline]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[inline]
    pub fn values(&self) -> &[String] {
        &self.values
    }

    #[inline]
    pub fn operator(&self) -> &str {
        &self.operator
    }

    /// Parse the operator. Clauses accept any operator string, so this is where an unknown one is reported.
    pub fn op(&self) -> Result<QualifiedOp, StatementError> {
        QualifiedOp::from_str(&self.operator)
    }
}

/// Build a condition clause.
///
/// Placeholders in `key_template` (such as the `${TagKey}` in `aws:ResourceTag/${TagKey}`) are replaced by
/// `key_param`; with no parameter, or an empty one, they are left in place. `key_param` is ignored for keys without
/// placeholders. The operator is passed through untouched and defaults to [DEFAULT_OPERATOR].
pub fn build_condition<V: Into<ConditionValues>>(
    key_template: &str,
    key_param: Option<&str>,
    values: V,
    operator: Option<&str>,
) -> ConditionClause {
    let key = match key_param.filter(|p| !p.is_empty()) {
        Some(param) => resolve_with(key_template, |_| Some(param.to_string())),
        None => key_template.to_string(),
    };

    let clause = ConditionClause::new(key, values, operator);
    trace!("build_condition: {} {} {:?}", clause.operator, clause.key, clause.values);
    clause
}

/// The ordered condition clauses of a statement.
///
/// Clauses keep their call order. When rendered as an IAM `Condition` block, operators and keys appear in order of
/// first use; clauses sharing an operator and key are merged since the block cannot repeat them. IAM matches any of a
/// key's values, so a merged entry is wider than the separate clauses: two `StringEquals` clauses on one key render
/// as a single entry satisfied by either value.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ConditionList(Vec<ConditionClause>);

impl ConditionList {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, clause: ConditionClause) {
        self.0.push(clause);
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, ConditionClause> {
        self.0.iter()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// All clauses on `key`, in call order.
    pub fn for_key<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a ConditionClause> + 'a {
        self.0.iter().filter(move |clause| clause.key == key)
    }

    /// Group the clauses by operator, then key, merging values.
    fn grouped(&self) -> Vec<(&str, Vec<(&str, Vec<&str>)>)> {
        let mut groups: Vec<(&str, Vec<(&str, Vec<&str>)>)> = Vec::new();

        for clause in &self.0 {
            let group = match groups.iter().position(|(op, _)| *op == clause.operator) {
                Some(i) => i,
                None => {
                    groups.push((clause.operator.as_str(), Vec::new()));
                    groups.len() - 1
                }
            };

            let keys = &mut groups[group].1;
            let entry = match keys.iter().position(|(key, _)| *key == clause.key) {
                Some(i) => {
                    debug!(
                        "Merging values of {} {} into one condition entry; either value now matches",
                        clause.operator, clause.key
                    );
                    i
                }
                None => {
                    keys.push((clause.key.as_str(), Vec::new()));
                    keys.len() - 1
                }
            };

            let values = &mut keys[entry].1;
            for value in &clause.values {
                if !values.contains(&value.as_str()) {
                    values.push(value.as_str());
                }
            }
        }

        groups
    }
}

impl From<Vec<ConditionClause>> for ConditionList {
    fn from(clauses: Vec<ConditionClause>) -> Self {
        Self(clauses)
    }
}

impl Index<usize> for ConditionList {
    type Output = ConditionClause;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a ConditionList {
    type Item = &'a ConditionClause;
    type IntoIter = Iter<'a, ConditionClause>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

struct KeyValues<'a>(Vec<(&'a str, Vec<&'a str>)>);

impl<'a> Serialize for KeyValues<'a> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, values) in &self.0 {
            map.serialize_entry(key, values)?;
        }
        map.end()
    }
}

impl Serialize for ConditionList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let groups = self.grouped();
        let mut map = serializer.serialize_map(Some(groups.len()))?;
        for (op, keys) in groups {
            map.serialize_entry(op, &KeyValues(keys))?;
        }
        map.end()
    }
}

display_json!(ConditionList);
