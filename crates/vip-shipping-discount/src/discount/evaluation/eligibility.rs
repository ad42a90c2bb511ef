use super::super::cart::CartSnapshot;

/// Result of the first-order VIP gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Eligible,
    AnonymousBuyer,
    ReturningCustomer { number_of_orders: u64 },
    NoPresentTag,
}

impl Eligibility {
    pub fn is_eligible(self) -> bool {
        matches!(self, Eligibility::Eligible)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Eligibility::Eligible => "eligible",
            Eligibility::AnonymousBuyer => "anonymous buyer",
            Eligibility::ReturningCustomer { .. } => "returning customer",
            Eligibility::NoPresentTag => "no tag present",
        }
    }
}

/// First order plus any present tag. The tag name is not compared with the configured
/// `customerTag`.
pub(crate) fn check_eligibility(cart: &CartSnapshot) -> Eligibility {
    let Some(customer) = &cart.customer else {
        return Eligibility::AnonymousBuyer;
    };

    if !customer.is_first_order() {
        return Eligibility::ReturningCustomer {
            number_of_orders: customer.number_of_orders,
        };
    }

    if !customer.has_any_tag() {
        return Eligibility::NoPresentTag;
    }

    Eligibility::Eligible
}
