pub mod registry_order_policy;
pub mod selection_policy;
