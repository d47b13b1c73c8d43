//! Template-rendered responses

use crate::emit::{ModelAndView, Reply};
use crate::error::MvcError;
use crate::handler::Invocation;
use crate::routing::RouteDef;

pub fn routes() -> Vec<RouteDef> {
    vec![
        RouteDef::any("/response-view-v1", response_view_v1).name("response_view_v1"),
        RouteDef::any("/response-view-v2", response_view_v2)
            .name("response_view_v2")
            .view(),
        // Unit reply in view mode: the path names the template
        RouteDef::any("/response/hello", response_view_v3)
            .name("response_view_v3")
            .view(),
    ]
}

fn response_view_v1(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    Ok(Reply::View(
        ModelAndView::new("response/hello").add_object("data", "hello!"),
    ))
}

/// Returned text is a view name, not a body
fn response_view_v2(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    Ok(Reply::text("response/hello"))
}

fn response_view_v3(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
    Ok(Reply::Unit)
}
