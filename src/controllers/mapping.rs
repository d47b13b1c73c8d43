//! Request mapping demos: methods, path variables and request conditions

use hyper::Method;
use tracing::info;

use crate::binding::ParamSpec;
use crate::emit::Reply;
use crate::error::MvcError;
use crate::handler::Invocation;
use crate::http::media::APPLICATION_JSON;
use crate::routing::RouteDef;

pub fn routes() -> Vec<RouteDef> {
    vec![
        // Any method; `/hello-basic/` is a different path
        RouteDef::any("/hello-basic", hello_basic).name("hello_basic"),
        RouteDef::any("/mapping-get-v1", mapping_get_v1)
            .method(Method::GET)
            .name("mapping_get_v1"),
        RouteDef::get("/mapping-get-v2", mapping_get_v2).name("mapping_get_v2"),
        RouteDef::get("/mapping/{userId}", mapping_path)
            .name("mapping_path")
            .arg(ParamSpec::path("data").key("userId")),
        RouteDef::get("/mapping/users/{userId}/orders/{orderId}", mapping_path_multi)
            .name("mapping_path_multi")
            .arg(ParamSpec::path("userId"))
            .arg(ParamSpec::path("orderId").long()),
        RouteDef::get("/mapping-param", mapping_param)
            .name("mapping_param")
            .params(&["mode=debug"]),
        RouteDef::get("/mapping-header", mapping_header)
            .name("mapping_header")
            .headers(&["mode=debug"]),
        RouteDef::post("/mapping-consume", mapping_consumes)
            .name("mapping_consumes")
            .consumes(&[APPLICATION_JSON]),
        RouteDef::post("/mapping-produce", mapping_produces)
            .name("mapping_produces")
            .produces(&["text/html"]),
    ]
}

fn hello_basic(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    info!("hello Basic");
    Ok(Reply::ok())
}

fn mapping_get_v1(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    info!("mapping Get V1");
    Ok(Reply::ok())
}

fn mapping_get_v2(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    info!("mapping-get-v2");
    Ok(Reply::ok())
}

fn mapping_path(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let data = inv.args.text("data")?;
    info!("mapping userId = {data}");
    Ok(Reply::ok())
}

fn mapping_path_multi(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let user_id = inv.args.text("userId")?;
    let order_id = inv.args.long("orderId")?;
    info!("mappingPath userId = {user_id}, orderId = {order_id}");
    Ok(Reply::ok())
}

fn mapping_param(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    info!("mappingParam");
    Ok(Reply::ok())
}

fn mapping_header(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    info!("mappingHeader");
    Ok(Reply::ok())
}

fn mapping_consumes(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    info!("mappingConsumes");
    Ok(Reply::ok())
}

fn mapping_produces(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    info!("mappingProduces");
    Ok(Reply::ok())
}
