//! Demo controllers
//!
//! Each module declares its mappings next to the handlers that serve them;
//! [`routes`] gathers them into the application's route table.

pub mod mapping;
pub mod model_attribute;
pub mod request_body_json;
pub mod request_body_string;
pub mod request_header;
pub mod request_param;
pub mod response_body;
pub mod response_view;

use crate::routing::RouteDef;

/// Every mapping served by the application, in declaration order
pub fn routes() -> Vec<RouteDef> {
    [
        log_test::routes(),
        mapping::routes(),
        request_header::routes(),
        request_param::routes(),
        model_attribute::routes(),
        request_body_string::routes(),
        request_body_json::routes(),
        response_body::routes(),
        response_view::routes(),
    ]
    .into_iter()
    .flatten()
    .collect()
}
