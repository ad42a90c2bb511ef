pub(crate) mod eligibility;
mod targets;

pub use eligibility::Eligibility;

use super::cart::CartSnapshot;
use super::configuration::Configuration;
use eligibility::check_eligibility;
use serde::{Deserialize, Serialize};
use targets::matching_targets;
use tracing::{debug, warn};

/// Customer-facing text attached to every proposal.
pub const DISCOUNT_MESSAGE: &str = "50% off express shipping for our VIPs!";

/// Stateless evaluator that applies a rule configuration to a checkout.
///
/// The qualifying method name is lowercased once at construction; evaluating never re-reads
/// the raw configuration.
#[derive(Debug, Clone)]
pub struct DiscountEvaluator {
    config: Configuration,
    method_name: Option<String>,
}

impl DiscountEvaluator {
    pub fn new(config: Configuration) -> Self {
        let method_name = config.method_name.as_deref().map(str::to_lowercase);
        Self {
            config,
            method_name,
        }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn evaluate(&self, cart: &CartSnapshot) -> Option<DiscountProposal> {
        let eligibility = check_eligibility(cart);
        if !eligibility.is_eligible() {
            debug!(reason = eligibility.label(), "customer not eligible for shipping discount");
            return None;
        }

        let method_name = self.method_name.as_deref()?;
        let targets = matching_targets(cart, method_name);
        if targets.is_empty() {
            debug!(method_name, "no delivery option matched the configured method");
            return None;
        }

        let Some(percentage_value) = self.config.discount_percentage.clone() else {
            warn!(
                matched = targets.len(),
                "delivery options matched but the rule has no discount percentage"
            );
            return None;
        };

        debug!(targets = targets.len(), "shipping discount proposed");
        Some(DiscountProposal {
            percentage_value,
            targets,
            message: DISCOUNT_MESSAGE.to_string(),
        })
    }
}

/// Evaluates `cart` against `config` without keeping an evaluator around.
pub fn evaluate(config: &Configuration, cart: &CartSnapshot) -> Option<DiscountProposal> {
    DiscountEvaluator::new(config.clone()).evaluate(cart)
}

/// Delivery option the discount applies to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountTarget {
    pub option_handle: String,
}

/// Percentage discount over one or more delivery options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountProposal {
    pub percentage_value: String,
    pub targets: Vec<DiscountTarget>,
    pub message: String,
}
