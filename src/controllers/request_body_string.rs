//! Plain-text request bodies

use hyper::StatusCode;
use tracing::info;

use crate::binding::ParamSpec;
use crate::emit::{Reply, ResponseEntity};
use crate::error::MvcError;
use crate::handler::Invocation;
use crate::http::media::TEXT_PLAIN_UTF8;
use crate::routing::RouteDef;

pub fn routes() -> Vec<RouteDef> {
    vec![
        RouteDef::post("/request-body-string-v1", request_body_string_v1)
            .name("request_body_string_v1")
            .arg(ParamSpec::request())
            .arg(ParamSpec::writer()),
        RouteDef::post("/request-body-string-v2", request_body_string_v2)
            .name("request_body_string_v2")
            .arg(ParamSpec::request())
            .arg(ParamSpec::writer()),
        RouteDef::post("/request-body-string-v3", request_body_string_v3)
            .name("request_body_string_v3")
            .arg(ParamSpec::entity("httpEntity")),
        RouteDef::post("/request-body-string-v4", request_body_string_v4)
            .name("request_body_string_v4")
            .arg(ParamSpec::body("messageBody")),
    ]
}

fn request_body_string_v1(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let message_body = inv.request.body_text();
    info!("messageBody={message_body}");

    inv.writer.write("OK");
    Ok(Reply::Unit)
}

/// Same as v1, but only touches the body bytes and the output buffer
fn request_body_string_v2(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let message_body = String::from_utf8_lossy(&inv.request.body);
    info!("messageBody = {message_body}");

    inv.writer.write_bytes(b"OK");
    Ok(Reply::Unit)
}

fn request_body_string_v3(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let entity = inv.args.entity("httpEntity")?;
    info!("messageBody = {}", entity.body);

    Ok(Reply::Entity(
        ResponseEntity::new(StatusCode::OK, "OK").with_header("Content-Type", TEXT_PLAIN_UTF8),
    ))
}

fn request_body_string_v4(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let message_body = inv.args.text("messageBody")?;
    info!("messageBody = {message_body}");
    Ok(Reply::ok())
}
