//! JSON request bodies, from hand-parsed text to direct record binding

use tracing::info;

use crate::binding::ParamSpec;
use crate::emit::Reply;
use crate::error::MvcError;
use crate::handler::Invocation;
use crate::model::HelloData;
use crate::routing::RouteDef;

pub fn routes() -> Vec<RouteDef> {
    vec![
        RouteDef::post("/request-body-json-v1", request_body_json_v1)
            .name("request_body_json_v1")
            .arg(ParamSpec::request())
            .arg(ParamSpec::writer()),
        RouteDef::post("/request-body-json-v2", request_body_json_v2)
            .name("request_body_json_v2")
            .arg(ParamSpec::body("messageBody")),
        RouteDef::post("/request-body-json-v3", request_body_json_v3)
            .name("request_body_json_v3")
            .arg(ParamSpec::body("data").record::<HelloData>()),
        RouteDef::post("/request-body-json-v4", request_body_json_v4)
            .name("request_body_json_v4")
            .arg(ParamSpec::entity("httpEntity").record::<HelloData>()),
        RouteDef::post("/request-body-json-v5", request_body_json_v5)
            .name("request_body_json_v5")
            .arg(ParamSpec::body("data").record::<HelloData>()),
    ]
}

fn parse_hello(text: &str) -> Result<HelloData, MvcError> {
    serde_json::from_str(text).map_err(|e| MvcError::MessageNotReadable(e.to_string()))
}

fn request_body_json_v1(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let message_body = inv.request.body_text();
    info!("messageBody= {message_body}");

    let data = parse_hello(&message_body)?;
    info!("username={}, age={}", data.username, data.age);

    inv.writer.write("OK");
    Ok(Reply::Unit)
}

fn request_body_json_v2(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let data = parse_hello(inv.args.text("messageBody")?)?;
    info!("username={}, age={}", data.username, data.age);
    Ok(Reply::ok())
}

fn request_body_json_v3(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let data: HelloData = inv.args.record("data")?;
    info!("username={} , age={}", data.username, data.age);
    Ok(Reply::ok())
}

fn request_body_json_v4(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let data: HelloData = inv.args.entity("httpEntity")?.record()?;
    info!("username={}, age={}", data.username, data.age);
    Ok(Reply::ok())
}

/// Echoes the decoded record back as JSON
fn request_body_json_v5(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let data: HelloData = inv.args.record("data")?;
    info!("username={}, age={}", data.username, data.age);
    Reply::json(&data)
}
