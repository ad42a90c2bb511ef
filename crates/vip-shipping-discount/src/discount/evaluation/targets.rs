use super::super::cart::CartSnapshot;
use super::DiscountTarget;

/// Collects every option whose title equals `method_name` ignoring case, in scan order.
pub(crate) fn matching_targets(cart: &CartSnapshot, method_name: &str) -> Vec<DiscountTarget> {
    cart.delivery_options()
        .filter(|option| {
            option
                .title
                .as_deref()
                .is_some_and(|title| title.to_lowercase() == method_name)
        })
        .map(|option| DiscountTarget {
            option_handle: option.handle.clone(),
        })
        .collect()
}
