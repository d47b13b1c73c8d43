//! Response bodies written directly instead of through a view

use hyper::StatusCode;

use crate::binding::ParamSpec;
use crate::emit::{Reply, ResponseEntity};
use crate::error::MvcError;
use crate::handler::Invocation;
use crate::http::media::TEXT_PLAIN_UTF8;
use crate::model::HelloData;
use crate::routing::RouteDef;

pub fn routes() -> Vec<RouteDef> {
    vec![
        RouteDef::get("/response-body-string-v1", response_body_v1)
            .name("response_body_v1")
            .arg(ParamSpec::writer()),
        RouteDef::get("/response-body-string-v2", response_body_v2).name("response_body_v2"),
        RouteDef::get("/response-body-string-v3", response_body_v3).name("response_body_v3"),
        RouteDef::get("/response-body-json-v1", response_body_json_v1)
            .name("response_body_json_v1"),
        RouteDef::get("/response-body-json-v2", response_body_json_v2)
            .name("response_body_json_v2"),
    ]
}

fn response_body_v1(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    inv.writer.set_header("Content-Type", TEXT_PLAIN_UTF8);
    inv.writer.write("OK");
    Ok(Reply::Unit)
}

fn response_body_v2(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    Ok(Reply::Entity(
        ResponseEntity::new(StatusCode::OK, "OK").with_header("Content-Type", TEXT_PLAIN_UTF8),
    ))
}

fn response_body_v3(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    Ok(Reply::ok())
}

fn response_body_json_v1(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let data = HelloData::new("userA", 20);
    Ok(Reply::Entity(ResponseEntity::json(StatusCode::OK, &data)?))
}

fn response_body_json_v2(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let data = HelloData::new("userA", 20);
    Reply::json_with_status(StatusCode::OK, &data)
}
