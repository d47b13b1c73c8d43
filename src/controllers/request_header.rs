//! Request metadata: method, locale, headers and cookies

use tracing::info;

use crate::binding::ParamSpec;
use crate::emit::Reply;
use crate::error::MvcError;
use crate::handler::Invocation;
use crate::routing::RouteDef;

pub fn routes() -> Vec<RouteDef> {
    vec![RouteDef::any("/headers", headers)
        .name("headers")
        .arg(ParamSpec::request())
        .arg(ParamSpec::writer())
        .arg(ParamSpec::method("httpMethod"))
        .arg(ParamSpec::locale("locale"))
        .arg(ParamSpec::header_map("headerMap"))
        .arg(ParamSpec::header("host").required())
        .arg(ParamSpec::cookie("myCookie"))]
}

fn headers(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    info!("request={} {}", inv.request.method, inv.request.uri());
    info!("response status={}", inv.writer.status());
    info!("httpMethod={}", inv.args.method("httpMethod")?);
    info!("locale={}", inv.args.locale("locale")?);
    info!("headerMap={:?}", inv.args.header_map("headerMap")?);
    info!("headerHost={}", inv.args.text("host")?);
    info!("myCookie={:?}", inv.args.opt_text("myCookie")?);

    // Several values under one key, in insertion order
    let mut multi: Vec<(&str, Vec<&str>)> = Vec::new();
    for (key, value) in [("keyA", "value1"), ("keyA", "value2")] {
        match multi.iter_mut().find(|(k, _)| *k == key) {
            Some((_, values)) => values.push(value),
            None => multi.push((key, vec![value])),
        }
    }
    info!("map={:?}", multi.first().map(|(_, values)| values));

    Ok(Reply::ok())
}
