use serde::de::{self, Unexpected};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

/// Metafield namespace the admin app writes the rule configuration under.
pub const METAFIELD_NAMESPACE: &str = "$app:vip-express-discount";
/// Metafield key holding the JSON-encoded [`Configuration`].
pub const METAFIELD_KEY: &str = "function-configuration";
/// Title given to automatic discounts created from the template.
pub const DISCOUNT_TITLE: &str = "First Time VIP Shipping Discount";

/// Merchant-supplied rule configuration.
///
/// Every field is optional: an unconfigured rule decodes to [`Configuration::default`], which
/// never produces a proposal. The canonical keys are the ones the admin form writes
/// (`discount`, `methodName`, `customerTag`); older snake_case keys are accepted on read.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Percentage as text, forwarded to the proposal untouched.
    #[serde(
        rename = "discount",
        alias = "discountPercentage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub discount_percentage: Option<String>,
    /// Delivery option title that qualifies, compared case-insensitively.
    #[serde(
        rename = "methodName",
        alias = "method_name",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub method_name: Option<String>,
    /// Customer tag the rule was configured for. Not consulted by the eligibility gate.
    #[serde(
        rename = "customerTag",
        alias = "customer_tag",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub customer_tag: Option<String>,
}

impl Configuration {
    /// Decodes the metafield value, failing closed to an empty configuration.
    ///
    /// A missing metafield, a JSON `null`, invalid JSON, or a value that is not an object all
    /// yield [`Configuration::default`]. Only the malformed cases are logged.
    pub fn from_metafield(value: Option<&str>) -> Self {
        let Some(raw) = value else {
            return Self::default();
        };

        let decoded = serde_json::from_str::<Value>(raw).and_then(|value| match value {
            Value::Null => Ok(Self::default()),
            Value::Object(_) => serde_json::from_value(value),
            other => Err(<serde_json::Error as de::Error>::invalid_type(
                unexpected(&other),
                &"a configuration object",
            )),
        });

        match decoded {
            Ok(config) => config,
            Err(err) => {
                warn!(
                    error = %err,
                    "malformed discount configuration, treating rule as unconfigured"
                );
                Self::default()
            }
        }
    }

    /// Encodes the configuration with canonical keys, as stored in the metafield.
    pub fn to_metafield_value(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Values the admin form proposes when a merchant creates a new rule.
    pub fn new_rule_template() -> Self {
        Self {
            discount_percentage: Some("50".to_string()),
            method_name: Some("Express".to_string()),
            customer_tag: Some("VIP".to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.discount_percentage.is_none()
            && self.method_name.is_none()
            && self.customer_tag.is_none()
    }
}

fn unexpected(value: &Value) -> Unexpected<'_> {
    match value {
        Value::Null => Unexpected::Unit,
        Value::Bool(flag) => Unexpected::Bool(*flag),
        Value::Number(_) => Unexpected::Other("number"),
        Value::String(text) => Unexpected::Str(text),
        Value::Array(_) => Unexpected::Seq,
        Value::Object(_) => Unexpected::Map,
    }
}
