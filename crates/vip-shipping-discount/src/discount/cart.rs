use serde::{Deserialize, Serialize};

/// Read-only view of the checkout the evaluator inspects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    /// `None` for anonymous checkouts, which are never eligible.
    pub customer: Option<CustomerSnapshot>,
    pub delivery_groups: Vec<DeliveryGroup>,
}

impl CartSnapshot {
    /// Every delivery option in group order, then option order within each group.
    pub fn delivery_options(&self) -> impl Iterator<Item = &DeliveryOption> + '_ {
        self.delivery_groups
            .iter()
            .flat_map(|group| group.delivery_options.iter())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSnapshot {
    /// Completed orders placed before this checkout.
    pub number_of_orders: u64,
    pub tags: Vec<CustomerTag>,
}

impl CustomerSnapshot {
    pub fn is_first_order(&self) -> bool {
        self.number_of_orders == 0
    }

    pub fn has_any_tag(&self) -> bool {
        self.tags.iter().any(|tag| tag.present)
    }
}

/// Whether the customer carries `tag_name`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerTag {
    pub tag_name: String,
    pub present: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryGroup {
    pub delivery_options: Vec<DeliveryOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryOption {
    /// Human label; some carriers omit it.
    pub title: Option<String>,
    /// Identifier unique within one checkout.
    pub handle: String,
}
