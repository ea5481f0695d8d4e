use {
    crate::{display_json, from_str_json},
    lazy_static::lazy_static,
    log::trace,
    regex::{Captures, Regex},
    serde::{Deserialize, Serialize},
    std::{borrow::Borrow, collections::HashMap, hash::Hash},
};

/// Placeholder naming the AWS partition in ARN templates.
pub const PARTITION: &str = "Partition";

/// Placeholder naming the AWS region in ARN templates.
pub const REGION: &str = "Region";

/// Placeholder naming the AWS account ID in ARN templates.
pub const ACCOUNT: &str = "Account";

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\$\{([^}]*)\}").unwrap();
}

/// Values used for the `${Partition}`, `${Region}`, and `${Account}` placeholders when the caller does not supply
/// one.
///
/// The defaults are `aws`, `*`, and `*`, so a resource ARN built without any scoping matches the resource in every
/// region and account of the commercial partition.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields, rename_all = "PascalCase")]
pub struct ArnDefaults {
    partition: String,
    region: String,
    account: String,
}

display_json!(ArnDefaults);
from_str_json!(ArnDefaults);

impl Default for ArnDefaults {
    fn default() -> Self {
        Self {
            partition: "aws".to_string(),
            region: "*".to_string(),
            account: "*".to_string(),
        }
    }
}

impl ArnDefaults {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy with the given account, region, and partition overriding the current ones. `None` keeps the
    /// current value.
    pub fn in_scope(&self, account: Option<&str>, region: Option<&str>, partition: Option<&str>) -> Self {
        Self {
            partition: partition.map(str::to_string).unwrap_or_else(|| self.partition.clone()),
            region: region.map(str::to_string).unwrap_or_else(|| self.region.clone()),
            account: account.map(str::to_string).unwrap_or_else(|| self.account.clone()),
        }
    }

    #[inline]
    pub fn partition(&self) -> &str {
        &self.partition
    }

    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    #[inline]
    pub fn account(&self) -> &str {
        &self.account
    }

    /// The default for a placeholder, if it has one.
    pub fn get(&self, placeholder: &str) -> Option<&str> {
        match placeholder {
            PARTITION => Some(&self.partition),
            REGION => Some(&self.region),
            ACCOUNT => Some(&self.account),
            _ => None,
        }
    }

    pub fn to_map(&self) -> HashMap<&'static str, String> {
        HashMap::from([
            (PARTITION, self.partition.clone()),
            (REGION, self.region.clone()),
            (ACCOUNT, self.account.clone()),
        ])
    }
}

/// Substitute every `${Name}` placeholder in `template`.
///
/// A placeholder takes the caller-supplied value when one is present and non-empty, otherwise its default. A
/// placeholder with neither is left in the output as-is. Substituted text is never scanned again, so values that
/// themselves contain `${...}` come through literally.
pub fn resolve<K, V>(template: &str, substitutions: &HashMap<K, V>, defaults: &HashMap<K, V>) -> String
where
    K: Borrow<str> + Eq + Hash,
    V: AsRef<str>,
{
    resolve_with(template, |name| {
        substitutions
            .get(name)
            .map(|value| AsRef::<str>::as_ref(value))
            .filter(|value| !value.is_empty())
            .or_else(|| defaults.get(name).map(|value| AsRef::<str>::as_ref(value)))
            .map(str::to_string)
    })
}

/// Substitute placeholders using a lookup function. Returning `None` leaves the placeholder untouched.
pub fn resolve_with<F>(template: &str, lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            let name = &caps[1];
            match lookup(name) {
                Some(value) => {
                    trace!("resolve: ${{{name}}} -> {value:?}");
                    value
                }
                None => {
                    trace!("resolve: ${{{name}}} has no value; leaving it in place");
                    caps[0].to_string()
                }
            }
        })
        .into_owned()
}

/// Resolve an ARN template against a list of `(placeholder, value)` pairs and the given [ArnDefaults].
///
/// Empty values fall through to the default, matching [resolve].
pub fn resolve_arn(template: &str, substitutions: &[(&str, &str)], defaults: &ArnDefaults) -> String {
    resolve_with(template, |name| {
        substitutions
            .iter()
            .find(|(key, value)| *key == name && !value.is_empty())
            .map(|(_, value)| *value)
            .or_else(|| defaults.get(name))
            .map(str::to_string)
    })
}

/// The placeholder names in `template`, in order of first appearance.
pub fn placeholders(template: &str) -> Vec<String> {
    let mut result: Vec<String> = Vec::new();
    for caps in PLACEHOLDER.captures_iter(template) {
        let name = &caps[1];
        if !result.iter().any(|seen| seen == name) {
            result.push(name.to_string());
        }
    }
    result
}

/// Whether `s` still contains a `${Name}` placeholder.
#[inline]
pub fn has_placeholders(s: &str) -> bool {
    PLACEHOLDER.is_match(s)
}

#[cfg(test)]
mod tests {
    use {
        super::{has_placeholders, placeholders, resolve, resolve_arn, resolve_with, ArnDefaults},
        indoc::indoc,
        pretty_assertions::assert_eq,
        std::{collections::HashMap, str::FromStr},
    };

    const CLUSTER: &str = "arn:${Partition}:memorydb:${Region}:${Account}:cluster/${ClusterName}";

    #[test_log::test]
    fn test_defaults_fill_scope() {
        let defaults = ArnDefaults::default();
        let arn = resolve_arn(CLUSTER, &[("ClusterName", "orders")], &defaults);
        assert_eq!(arn, "arn:aws:memorydb:*:*:cluster/orders");
        assert!(!has_placeholders(&arn));
    }

    #[test_log::test]
    fn test_supplied_values_win() {
        let defaults = ArnDefaults::default();
        let arn = resolve_arn(
            CLUSTER,
            &[("ClusterName", "orders"), ("Region", "eu-west-1"), ("Account", "123456789012"), ("Partition", "aws-cn")],
            &defaults,
        );
        assert_eq!(arn, "arn:aws-cn:memorydb:eu-west-1:123456789012:cluster/orders");
    }

    #[test_log::test]
    fn test_empty_value_uses_default() {
        let defaults = ArnDefaults::default();
        let arn = resolve_arn(CLUSTER, &[("ClusterName", "orders"), ("Region", "")], &defaults);
        assert_eq!(arn, "arn:aws:memorydb:*:*:cluster/orders");
    }

    #[test_log::test]
    fn test_missing_required_stays_literal() {
        let defaults = ArnDefaults::default();
        let arn = resolve_arn(CLUSTER, &[], &defaults);
        assert_eq!(arn, "arn:aws:memorydb:*:*:cluster/${ClusterName}");
        assert!(has_placeholders(&arn));
    }

    #[test_log::test]
    fn test_single_pass() {
        let defaults = ArnDefaults::default();
        let arn = resolve_arn(CLUSTER, &[("ClusterName", "${Region}")], &defaults);
        assert_eq!(arn, "arn:aws:memorydb:*:*:cluster/${Region}");

        let arn = resolve_with("${A}${B}", |name| Some(format!("${{{}}}", if name == "A" { "B" } else { "A" })));
        assert_eq!(arn, "${B}${A}");
    }

    #[test_log::test]
    fn test_repeated_and_unterminated() {
        let defaults = ArnDefaults::default();
        let template = "arn:${Partition}:s3:::${Bucket}/${Bucket}/${unterminated";
        let arn = resolve_arn(template, &[("Bucket", "b")], &defaults);
        assert_eq!(arn, "arn:aws:s3:::b/b/${unterminated");
    }

    #[test_log::test]
    fn test_resolve_with_maps() {
        let substitutions = HashMap::from([("QueueName", "jobs"), ("Region", "")]);
        let defaults = HashMap::from([("Partition", "aws"), ("Region", "*"), ("Account", "*")]);
        let arn = resolve("arn:${Partition}:sqs:${Region}:${Account}:${QueueName}", &substitutions, &defaults);
        assert_eq!(arn, "arn:aws:sqs:*:*:jobs");

        let owned_defaults: HashMap<&str, String> = ArnDefaults::default().to_map();
        let owned_substitutions: HashMap<&str, String> = HashMap::from([("QueueName", "jobs".to_string())]);
        let template = "arn:${Partition}:sqs:${Region}:${Account}:${QueueName}";
        let arn = resolve(template, &owned_substitutions, &owned_defaults);
        assert_eq!(arn, "arn:aws:sqs:*:*:jobs");
    }

    #[test_log::test]
    fn test_placeholders() {
        assert_eq!(placeholders(CLUSTER), vec!["Partition", "Region", "Account", "ClusterName"]);
        assert_eq!(placeholders("arn:${Partition}:s3:::${Bucket}/${Bucket}"), vec!["Partition", "Bucket"]);
        assert!(placeholders("*").is_empty());
    }

    #[test_log::test]
    fn test_scope() {
        let defaults = ArnDefaults::new().in_scope(Some("123456789012"), None, None);
        assert_eq!(defaults.account(), "123456789012");
        assert_eq!(defaults.region(), "*");
        assert_eq!(defaults.partition(), "aws");

        let defaults = defaults.in_scope(None, Some("us-gov-west-1"), Some("aws-us-gov"));
        assert_eq!(defaults.account(), "123456789012");
        assert_eq!(
            resolve_arn(CLUSTER, &[("ClusterName", "c")], &defaults),
            "arn:aws-us-gov:memorydb:us-gov-west-1:123456789012:cluster/c"
        );
    }

    #[test_log::test]
    fn test_defaults_json() {
        let defaults = ArnDefaults::from_str(r#"{"Account": "123456789012"}"#).unwrap();
        assert_eq!(defaults.partition(), "aws");
        assert_eq!(defaults.account(), "123456789012");
        assert_eq!(
            defaults.to_string(),
            indoc! { r#"
            {
                "Partition": "aws",
                "Region": "*",
                "Account": "123456789012"
            }"# }
        );

        assert!(ArnDefaults::from_str(r#"{"Zone": "a"}"#).is_err());
    }
}
