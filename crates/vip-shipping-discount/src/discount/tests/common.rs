use axum::response::Response;
use serde_json::{json, Value};

use crate::discount::cart::{
    CartSnapshot, CustomerSnapshot, CustomerTag, DeliveryGroup, DeliveryOption,
};
use crate::discount::configuration::Configuration;
use crate::discount::function::FunctionRunInput;

pub(super) const ECONOMY_HANDLE: &str =
    "538e36d0567ff7ccdda95a73e62478cb-9e912b3dae9b0e04b6f1facf08aa7cb2";
pub(super) const STANDARD_HANDLE: &str =
    "538e36d0567ff7ccdda95a73e62478cb-ee768830e386b87e4f230f4292c237a3";
pub(super) const EXPRESS_HANDLE: &str =
    "538e36d0567ff7ccdda95a73e62478cb-9bc19cc1ae6807304d5d933ef3f1056d";
pub(super) const SECOND_EXPRESS_HANDLE: &str = "another-handle-for-express-option";

pub(super) const METAFIELD_JSON: &str =
    r#"{"discount":"50","methodName":"express","customerTag":"vip"}"#;

pub(super) fn express_config() -> Configuration {
    Configuration {
        discount_percentage: Some("50".to_string()),
        method_name: Some("Express".to_string()),
        customer_tag: Some("VIP".to_string()),
    }
}

pub(super) fn option(title: &str, handle: &str) -> DeliveryOption {
    DeliveryOption {
        title: Some(title.to_string()),
        handle: handle.to_string(),
    }
}

pub(super) fn standard_group() -> DeliveryGroup {
    DeliveryGroup {
        delivery_options: vec![
            option("Economy", ECONOMY_HANDLE),
            option("Standard", STANDARD_HANDLE),
            option("Express", EXPRESS_HANDLE),
        ],
    }
}

pub(super) fn customer(number_of_orders: u64, has_tag: bool) -> CustomerSnapshot {
    CustomerSnapshot {
        number_of_orders,
        tags: vec![CustomerTag {
            tag_name: "VIP".to_string(),
            present: has_tag,
        }],
    }
}

pub(super) fn cart(number_of_orders: u64, has_tag: bool) -> CartSnapshot {
    CartSnapshot {
        customer: Some(customer(number_of_orders, has_tag)),
        delivery_groups: vec![standard_group()],
    }
}

pub(super) fn split_shipment_cart() -> CartSnapshot {
    let mut cart = cart(0, true);
    cart.delivery_groups.push(DeliveryGroup {
        delivery_options: vec![option("Express", SECOND_EXPRESS_HANDLE)],
    });
    cart
}

pub(super) fn input_json(metafield: Option<&str>, number_of_orders: u64, has_tag: bool) -> Value {
    let metafield = match metafield {
        Some(value) => json!({ "value": value }),
        None => Value::Null,
    };

    json!({
        "discountNode": { "metafield": metafield },
        "cart": {
            "buyerIdentity": {
                "customer": {
                    "numberOfOrders": number_of_orders,
                    "hasTags": [ { "hasTag": has_tag, "tag": "VIP" } ]
                }
            },
            "deliveryGroups": [
                {
                    "deliveryOptions": [
                        { "title": "Economy", "handle": ECONOMY_HANDLE },
                        { "title": "Standard", "handle": STANDARD_HANDLE },
                        { "title": "Express", "handle": EXPRESS_HANDLE }
                    ]
                }
            ]
        }
    })
}

pub(super) fn input(
    metafield: Option<&str>,
    number_of_orders: u64,
    has_tag: bool,
) -> FunctionRunInput {
    serde_json::from_value(input_json(metafield, number_of_orders, has_tag))
        .expect("fixture decodes")
}

pub(super) fn express_discount_json(percentage: &str, handles: &[&str]) -> Value {
    let targets: Vec<Value> = handles
        .iter()
        .map(|handle| json!({ "deliveryOption": { "handle": handle } }))
        .collect();

    json!({
        "discounts": [
            {
                "value": { "percentage": { "value": percentage } },
                "targets": targets,
                "message": "50% off express shipping for our VIPs!"
            }
        ]
    })
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 4096)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
