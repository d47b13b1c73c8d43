//! Records bound field by field from request parameters

use tracing::info;

use crate::binding::ParamSpec;
use crate::emit::Reply;
use crate::error::MvcError;
use crate::handler::Invocation;
use crate::model::HelloData;
use crate::routing::RouteDef;

pub fn routes() -> Vec<RouteDef> {
    vec![
        RouteDef::any("/model-attribute-v1", model_attribute_v1)
            .name("model_attribute_v1")
            .arg(ParamSpec::model::<HelloData>("helloData")),
        // Unannotated record argument resolves to a model binding
        RouteDef::any("/model-attribute-v2", model_attribute_v2)
            .name("model_attribute_v2")
            .arg(ParamSpec::implicit("helloData").record::<HelloData>()),
    ]
}

fn model_attribute_v1(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let data: HelloData = inv.args.record("helloData")?;
    info!("username={}, age={}", data.username, data.age);
    info!("helloData={data:?}");
    Ok(Reply::ok())
}

fn model_attribute_v2(inv: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    let data: HelloData = inv.args.record("helloData")?;
    info!("helloData={data:?}");
    Ok(Reply::ok())
}
