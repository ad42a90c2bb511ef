//! First-order VIP shipping discount.
//!
//! [`DiscountEvaluator`] is the pure decision: given a rule [`Configuration`] and a
//! [`CartSnapshot`] it proposes at most one percentage discount over the delivery options whose
//! title matches the configured method. [`function`] adapts that decision to the checkout
//! pipeline's wire shapes and [`router`] serves it over HTTP.

pub mod cart;
pub mod configuration;
pub(crate) mod evaluation;
pub mod function;
pub mod router;

#[cfg(test)]
mod tests;

pub use cart::{CartSnapshot, CustomerSnapshot, CustomerTag, DeliveryGroup, DeliveryOption};
pub use configuration::{Configuration, DISCOUNT_TITLE, METAFIELD_KEY, METAFIELD_NAMESPACE};
pub use evaluation::{
    evaluate, DiscountEvaluator, DiscountProposal, DiscountTarget, Eligibility, DISCOUNT_MESSAGE,
};
pub use function::{run, CartContractViolation, FunctionRunInput, FunctionRunResult};
pub use router::{discount_router, RuleTemplate};
