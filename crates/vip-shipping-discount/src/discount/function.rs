//! Wire shapes exchanged with the checkout pipeline and the `run` entry point.
//!
//! Input and output follow the camelCase JSON the pipeline sends and expects. Decoding into
//! [`CartSnapshot`] happens once here; anything the pipeline guarantees but omits is reported
//! as a [`CartContractViolation`] carrying the JSON path of the missing field.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use super::cart::{CartSnapshot, CustomerSnapshot, CustomerTag, DeliveryGroup, DeliveryOption};
use super::configuration::Configuration;
use super::evaluation::{DiscountEvaluator, DiscountProposal};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionRunInput {
    #[serde(default)]
    pub discount_node: Option<DiscountNodeInput>,
    #[serde(default)]
    pub cart: Option<CartInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscountNodeInput {
    #[serde(default)]
    pub metafield: Option<MetafieldInput>,
}

/// Raw metafield value. Anything other than a string is treated as a malformed configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetafieldInput {
    #[serde(default)]
    pub value: Option<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartInput {
    #[serde(default)]
    pub buyer_identity: Option<BuyerIdentityInput>,
    #[serde(default)]
    pub delivery_groups: Option<Vec<DeliveryGroupInput>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuyerIdentityInput {
    #[serde(default)]
    pub customer: Option<CustomerInput>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerInput {
    #[serde(default)]
    pub number_of_orders: Option<u64>,
    #[serde(default)]
    pub has_tags: Option<Vec<HasTagInput>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HasTagInput {
    pub has_tag: bool,
    #[serde(default)]
    pub tag: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryGroupInput {
    #[serde(default)]
    pub delivery_options: Option<Vec<DeliveryOptionInput>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOptionInput {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub handle: Option<String>,
}

/// Discounts the pipeline should apply. Empty when the checkout does not qualify.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionRunResult {
    pub discounts: Vec<Discount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discount {
    pub value: DiscountValue,
    pub targets: Vec<Target>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountValue {
    pub percentage: Percentage,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Percentage {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub delivery_option: DeliveryOptionTarget,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOptionTarget {
    pub handle: String,
}

impl From<DiscountProposal> for Discount {
    fn from(proposal: DiscountProposal) -> Self {
        Self {
            value: DiscountValue {
                percentage: Percentage {
                    value: proposal.percentage_value,
                },
            },
            targets: proposal
                .targets
                .into_iter()
                .map(|target| Target {
                    delivery_option: DeliveryOptionTarget {
                        handle: target.option_handle,
                    },
                })
                .collect(),
            message: proposal.message,
        }
    }
}

impl From<Option<DiscountProposal>> for FunctionRunResult {
    fn from(proposal: Option<DiscountProposal>) -> Self {
        Self {
            discounts: proposal.map(Discount::from).into_iter().collect(),
        }
    }
}

/// A field the pipeline guarantees was missing or null.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cart contract violation: required field `{path}` is missing")]
pub struct CartContractViolation {
    pub path: String,
}

impl CartContractViolation {
    fn missing(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl FunctionRunInput {
    /// Rule configuration carried by the discount node, decoded fail-closed.
    pub fn configuration(&self) -> Configuration {
        let value = self
            .discount_node
            .as_ref()
            .and_then(|node| node.metafield.as_ref())
            .and_then(|metafield| metafield.value.as_ref());

        match value {
            None | Some(Value::Null) => Configuration::default(),
            Some(Value::String(raw)) => Configuration::from_metafield(Some(raw)),
            Some(other) => {
                warn!(
                    found = %other,
                    "metafield value is not a string, treating rule as unconfigured"
                );
                Configuration::default()
            }
        }
    }

    pub fn cart_snapshot(&self) -> Result<CartSnapshot, CartContractViolation> {
        let cart = self
            .cart
            .as_ref()
            .ok_or_else(|| CartContractViolation::missing("cart"))?;
        CartSnapshot::try_from(cart)
    }
}

impl TryFrom<&CartInput> for CartSnapshot {
    type Error = CartContractViolation;

    fn try_from(cart: &CartInput) -> Result<Self, Self::Error> {
        let customer = cart
            .buyer_identity
            .as_ref()
            .and_then(|identity| identity.customer.as_ref())
            .map(customer_snapshot)
            .transpose()?;

        let groups = cart
            .delivery_groups
            .as_ref()
            .ok_or_else(|| CartContractViolation::missing("cart.deliveryGroups"))?;

        let delivery_groups = groups
            .iter()
            .enumerate()
            .map(|(group_index, group)| delivery_group(group_index, group))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            customer,
            delivery_groups,
        })
    }
}

fn customer_snapshot(customer: &CustomerInput) -> Result<CustomerSnapshot, CartContractViolation> {
    let number_of_orders = customer.number_of_orders.ok_or_else(|| {
        CartContractViolation::missing("cart.buyerIdentity.customer.numberOfOrders")
    })?;
    let tags = customer
        .has_tags
        .as_ref()
        .ok_or_else(|| CartContractViolation::missing("cart.buyerIdentity.customer.hasTags"))?
        .iter()
        .map(|tag| CustomerTag {
            tag_name: tag.tag.clone(),
            present: tag.has_tag,
        })
        .collect();

    Ok(CustomerSnapshot {
        number_of_orders,
        tags,
    })
}

fn delivery_group(
    group_index: usize,
    group: &DeliveryGroupInput,
) -> Result<DeliveryGroup, CartContractViolation> {
    let options = group.delivery_options.as_ref().ok_or_else(|| {
        CartContractViolation::missing(format!(
            "cart.deliveryGroups[{group_index}].deliveryOptions"
        ))
    })?;

    let delivery_options = options
        .iter()
        .enumerate()
        .map(|(option_index, option)| -> Result<DeliveryOption, CartContractViolation> {
            let handle = option.handle.clone().ok_or_else(|| {
                CartContractViolation::missing(format!(
                    "cart.deliveryGroups[{group_index}].deliveryOptions[{option_index}].handle"
                ))
            })?;
            Ok(DeliveryOption {
                title: option.title.clone(),
                handle,
            })
        })
        .collect::<Result<Vec<_>, CartContractViolation>>()?;

    Ok(DeliveryGroup { delivery_options })
}

/// Decodes the input, evaluates the rule and encodes the pipeline result.
pub fn run(input: &FunctionRunInput) -> Result<FunctionRunResult, CartContractViolation> {
    let cart = input.cart_snapshot()?;
    let evaluator = DiscountEvaluator::new(input.configuration());
    Ok(evaluator.evaluate(&cart).into())
}
