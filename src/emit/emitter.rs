//! Response emitter
//!
//! Turns a handler's [`Reply`] into the HTTP response, according to the
//! route's response mode and negotiated content type.

use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use tracing::debug;

use super::reply::{ModelAndView, Reply, ResponseMode};
use super::view::ViewRenderer;
use super::writer::ResponseWriter;
use crate::error::MvcError;
use crate::http::media::{APPLICATION_JSON, TEXT_HTML_UTF8, TEXT_PLAIN_UTF8};
use crate::http::{build_body_response, build_raw_response};

/// What the emitter needs to know about the matched route
#[derive(Debug, Clone, Copy)]
pub struct EmitContext<'a> {
    pub mode: ResponseMode,
    /// Content type chosen from the route's `produces`, if it declares one
    pub produces: Option<&'a str>,
    pub path: &'a str,
}

pub struct Emitter {
    views: Arc<dyn ViewRenderer>,
    server_name: String,
}

impl Emitter {
    pub fn new(views: Arc<dyn ViewRenderer>, server_name: &str) -> Self {
        Self {
            views,
            server_name: server_name.to_string(),
        }
    }

    /// Emit the response for one reply
    ///
    /// `writer` is set when the handler declared a raw writer; a unit reply
    /// then sends whatever the handler wrote.
    pub fn emit(
        &self,
        reply: Reply,
        ctx: EmitContext<'_>,
        writer: Option<ResponseWriter>,
    ) -> Result<Response<Full<Bytes>>, MvcError> {
        match (reply, ctx.mode) {
            (Reply::Text(body), ResponseMode::Body) => Ok(build_body_response(
                StatusCode::OK,
                ctx.produces.unwrap_or(TEXT_PLAIN_UTF8),
                body,
                &self.server_name,
            )),
            (Reply::Text(view), ResponseMode::View) => {
                self.render(&ModelAndView::new(&view))
            }
            (Reply::Json { status, value }, _) => {
                let body = serde_json::to_vec(&value).map_err(MvcError::Serialization)?;
                Ok(build_body_response(
                    status,
                    APPLICATION_JSON,
                    body,
                    &self.server_name,
                ))
            }
            (Reply::Entity(entity), _) => Ok(build_raw_response(
                entity.status,
                &entity.headers,
                entity.body,
            )),
            (Reply::View(mav), _) => self.render(&mav),
            (Reply::Unit, mode) => match (writer, mode) {
                (Some(writer), _) => Ok(writer.into_response()),
                (None, ResponseMode::View) => {
                    let view = ctx.path.trim_start_matches('/');
                    debug!(view, "Rendering view named after request path");
                    self.render(&ModelAndView::new(view))
                }
                (None, ResponseMode::Body) => Ok(build_body_response(
                    StatusCode::OK,
                    ctx.produces.unwrap_or(TEXT_PLAIN_UTF8),
                    Bytes::new(),
                    &self.server_name,
                )),
            },
        }
    }

    fn render(&self, mav: &ModelAndView) -> Result<Response<Full<Bytes>>, MvcError> {
        let html = self.views.render(&mav.view, &mav.model)?;
        Ok(build_body_response(
            StatusCode::OK,
            TEXT_HTML_UTF8,
            html,
            &self.server_name,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::{ResponseEntity, TemplateViews};
    use http_body_util::BodyExt;

    fn emitter() -> Emitter {
        let views = TemplateViews::from_sources(
            [
                ("response/hello", "<p>{{ data }}</p>"),
                ("response-view-v3", "plain view"),
            ],
            ".html",
        )
        .unwrap();
        Emitter::new(Arc::new(views), "mvc-basic")
    }

    fn ctx(mode: ResponseMode) -> EmitContext<'static> {
        EmitContext {
            mode,
            produces: None,
            path: "/response-view-v3",
        }
    }

    async fn body_of(resp: Response<Full<Bytes>>) -> String {
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_text_body() {
        let resp = emitter()
            .emit(Reply::ok(), ctx(ResponseMode::Body), None)
            .unwrap();
        assert_eq!(resp.headers()["content-type"], TEXT_PLAIN_UTF8);
        assert_eq!(body_of(resp).await, "OK");
    }

    #[tokio::test]
    async fn test_text_uses_produces() {
        let ctx = EmitContext {
            produces: Some("text/plain"),
            ..ctx(ResponseMode::Body)
        };
        let resp = emitter().emit(Reply::ok(), ctx, None).unwrap();
        assert_eq!(resp.headers()["content-type"], "text/plain");
    }

    #[tokio::test]
    async fn test_text_names_view_in_view_mode() {
        let resp = emitter()
            .emit(Reply::text("response-view-v3"), ctx(ResponseMode::View), None)
            .unwrap();
        assert_eq!(resp.headers()["content-type"], TEXT_HTML_UTF8);
        assert_eq!(body_of(resp).await, "plain view");
    }

    #[tokio::test]
    async fn test_model_and_view() {
        let mav = ModelAndView::new("response/hello").add_object("data", "hello!");
        let resp = emitter()
            .emit(Reply::View(mav), ctx(ResponseMode::Body), None)
            .unwrap();
        assert_eq!(body_of(resp).await, "<p>hello!</p>");
    }

    #[tokio::test]
    async fn test_unit_renders_path_view() {
        let resp = emitter()
            .emit(Reply::Unit, ctx(ResponseMode::View), None)
            .unwrap();
        assert_eq!(body_of(resp).await, "plain view");
    }

    #[tokio::test]
    async fn test_unit_with_writer() {
        let mut writer = ResponseWriter::default();
        writer.write("OK");
        let resp = emitter()
            .emit(Reply::Unit, ctx(ResponseMode::View), Some(writer))
            .unwrap();
        assert!(resp.headers().get("content-type").is_none());
        assert_eq!(body_of(resp).await, "OK");
    }

    #[tokio::test]
    async fn test_entity_is_exact() {
        let entity = ResponseEntity::new(StatusCode::CREATED, "OK").with_header("X-Custom", "1");
        let resp = emitter()
            .emit(Reply::Entity(entity), ctx(ResponseMode::Body), None)
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        assert_eq!(resp.headers()["x-custom"], "1");
        assert!(resp.headers().get("server").is_none());
    }

    #[tokio::test]
    async fn test_json_status() {
        let reply = Reply::json_with_status(StatusCode::OK, &serde_json::json!({"a": 1})).unwrap();
        let resp = emitter().emit(reply, ctx(ResponseMode::Body), None).unwrap();
        assert_eq!(resp.headers()["content-type"], APPLICATION_JSON);
        assert_eq!(body_of(resp).await, r#"{"a":1}"#);
    }

    #[test]
    fn test_missing_view_is_server_error() {
        let err = emitter()
            .emit(Reply::text("nowhere"), ctx(ResponseMode::View), None)
            .unwrap_err();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
