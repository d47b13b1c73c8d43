//! Query and form parameter binding
//!
//! The versions go from reading the raw request to letting the binder do
//! everything, including the cases where binding rejects the request.

use hyper::StatusCode;
use tracing::info;

use crate::binding::ParamSpec;
use crate::emit::Reply;
use crate::error::MvcError;
use crate::handler::Invocation;
use crate::routing::RouteDef;

pub fn routes() -> Vec<RouteDef> {
    vec![
        RouteDef::any("/request-param-v1", request_param_v1)
            .name("request_param_v1")
            .arg(ParamSpec::request())
            .arg(ParamSpec::writer()),
        RouteDef::any("/request-param-v2", request_param_v2)
            .name("request_param_v2")
            .arg(ParamSpec::query("memberName").key("username"))
            .arg(ParamSpec::query("memberAge").key("age").int()),
        RouteDef::any("/request-param-v3", request_param_v3)
            .name("request_param_v3")
            .arg(ParamSpec::query("username"))
            .arg(ParamSpec::query("age").int()),
        // No annotations: both optional, and an absent `age` cannot be null
        RouteDef::any("/request-param-v4", request_param_v4)
            .name("request_param_v4")
            .arg(ParamSpec::implicit("username"))
            .arg(ParamSpec::implicit("age").int()),
        RouteDef::any("/request-param-required", request_param_required)
            .name("request_param_required")
            .arg(ParamSpec::query("username"))
            .arg(ParamSpec::query("age").nullable_int().optional()),
        RouteDef::any("/request-param-default", request_param_default)
            .name("request_param_default")
            .arg(
                ParamSpec::query("username")
                    .default_value("guest")
                    .default_on_empty(),
            )
            .arg(
                ParamSpec::query("age")
                    .int()
                    .optional()
                    .default_value("-1")
                    .default_on_empty(),
            ),
        RouteDef::any("/request-param-map", request_param_map)
            .name("request_param_map")
            .arg(ParamSpec::param_map("paramMap")),
    ]
}

/// Reads the request and writes the response by hand
///
/// Nothing is bound, so a missing or malformed `age` is a handler failure
/// rather than a client error.
fn request_param_v1(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let username = inv.request.param("username").unwrap_or_default();
    let age: i32 = inv
        .request
        .param("age")
        .ok_or_else(|| MvcError::Handler("parameter 'age' is null".to_string()))?
        .parse()
        .map_err(|e| MvcError::Handler(format!("parameter 'age': {e}")))?;
    info!("username={username}, age={age}");

    inv.writer.set_status(StatusCode::OK);
    inv.writer.write("OK");
    Ok(Reply::Unit)
}

fn request_param_v2(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let member_name = inv.args.text("memberName")?;
    let member_age = inv.args.int("memberAge")?;
    info!("username={member_name}, age={member_age}");
    Ok(Reply::ok())
}

fn request_param_v3(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let username = inv.args.text("username")?;
    let age = inv.args.int("age")?;
    info!("username={username}, age={age}");
    Ok(Reply::ok())
}

fn request_param_v4(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let username = inv.args.opt_text("username")?;
    let age = inv.args.int("age")?;
    info!("username={username:?}, age={age}");
    Ok(Reply::ok())
}

fn request_param_required(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let username = inv.args.text("username")?;
    let age = inv.args.opt_int("age")?;
    info!("username={username}, age={age:?}");
    Ok(Reply::ok())
}

fn request_param_default(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let username = inv.args.text("username")?;
    let age = inv.args.int("age")?;
    info!("username={username}, age={age}");
    Ok(Reply::ok())
}

fn request_param_map(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let params = inv.args.param_map("paramMap")?;
    let first = |name: &str| {
        params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    };
    info!("username={:?}, age={:?}", first("username"), first("age"));
    Ok(Reply::ok())
}
