//! Route table
//!
//! Routes are declared once at startup and immutable afterwards. Lookup
//! filters by path, then method, then the remaining request conditions, and
//! reports the mismatch of the candidate that got furthest when nothing fits.

use hyper::Method;

use super::condition::{Expression, RequestCondition};
use super::template::PathTemplate;
use crate::binding::{Descriptor, ParamSpec};
use crate::emit::ResponseMode;
use crate::error::Mismatch;
use crate::handler::HandlerFn;
use crate::http::media::MediaType;
use crate::http::RequestParts;
use crate::logger;

/// Route declaration, turned into a [`Route`] by [`RouteTable::new`]
pub struct RouteDef {
    name: Option<String>,
    template: String,
    condition: RequestCondition,
    args: Vec<ParamSpec>,
    mode: ResponseMode,
    handler: HandlerFn,
}

impl RouteDef {
    /// Route accepting any method
    pub fn any(path: &str, handler: HandlerFn) -> Self {
        Self {
            name: None,
            template: path.to_string(),
            condition: RequestCondition::default(),
            args: Vec::new(),
            mode: ResponseMode::Body,
            handler,
        }
    }

    pub fn get(path: &str, handler: HandlerFn) -> Self {
        Self::any(path, handler).method(Method::GET)
    }

    pub fn post(path: &str, handler: HandlerFn) -> Self {
        Self::any(path, handler).method(Method::POST)
    }

    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.condition.methods.push(method);
        self
    }

    /// Handler name used in logs; defaults to the path template
    #[must_use]
    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Declare the next handler argument
    #[must_use]
    pub fn arg(mut self, spec: ParamSpec) -> Self {
        self.args.push(spec);
        self
    }

    /// Parameter predicates, see [`Expression`]
    #[must_use]
    pub fn params(mut self, exprs: &[&str]) -> Self {
        self.condition
            .params
            .extend(exprs.iter().map(|e| Expression::parse(e)));
        self
    }

    /// Header predicates, see [`Expression`]
    #[must_use]
    pub fn headers(mut self, exprs: &[&str]) -> Self {
        self.condition
            .headers
            .extend(exprs.iter().map(|e| Expression::parse(e)));
        self
    }

    #[must_use]
    pub fn consumes(mut self, types: &[&str]) -> Self {
        self.condition.consumes.extend(parse_types(&self.template, types));
        self
    }

    #[must_use]
    pub fn produces(mut self, types: &[&str]) -> Self {
        self.condition.produces.extend(parse_types(&self.template, types));
        self
    }

    /// Interpret text and unit returns as view names
    #[must_use]
    pub fn view(mut self) -> Self {
        self.mode = ResponseMode::View;
        self
    }
}

fn parse_types(route: &str, types: &[&str]) -> Vec<MediaType> {
    types
        .iter()
        .filter_map(|t| {
            let parsed = MediaType::parse(t);
            if parsed.is_none() {
                logger::log_warning(&format!("Route {route}: ignoring invalid media type '{t}'"));
            }
            parsed
        })
        .collect()
}

pub struct Route {
    pub name: String,
    pub template: PathTemplate,
    pub condition: RequestCondition,
    pub descriptor: Descriptor,
    pub mode: ResponseMode,
    pub handler: HandlerFn,
}

impl Route {
    fn from_def(def: RouteDef) -> Self {
        let template = PathTemplate::parse(&def.template);
        let descriptor = Descriptor::build(template.as_str(), def.args);
        Self {
            name: def.name.unwrap_or_else(|| template.to_string()),
            template,
            condition: def.condition,
            descriptor,
            mode: def.mode,
            handler: def.handler,
        }
    }
}

/// Successful lookup
pub struct RouteMatch<'a> {
    pub route: &'a Route,
    pub path_vars: Vec<(String, String)>,
    /// Negotiated content type when the route declares `produces`
    pub produces: Option<MediaType>,
}

pub struct RouteTable {
    routes: Vec<Route>,
}

impl RouteTable {
    pub fn new(defs: Vec<RouteDef>) -> Self {
        let routes: Vec<Route> = defs.into_iter().map(Route::from_def).collect();
        for (i, route) in routes.iter().enumerate() {
            let duplicate = routes[..i].iter().any(|earlier| {
                earlier.template == route.template && earlier.condition.methods == route.condition.methods
            });
            if duplicate {
                logger::log_warning(&format!(
                    "Route {} is declared more than once; the first declaration wins",
                    route.template
                ));
            }
        }
        Self { routes }
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Select the route for a request
    ///
    /// Among routes whose template matches the path, the one with the fewest
    /// captures is tried first, then declaration order.
    pub fn lookup(&self, req: &RequestParts) -> Result<RouteMatch<'_>, Mismatch> {
        let mut candidates: Vec<(&Route, Vec<(String, String)>)> = self
            .routes
            .iter()
            .filter_map(|route| route.template.matches(&req.path).map(|vars| (route, vars)))
            .collect();
        if candidates.is_empty() {
            return Err(Mismatch::NotFound);
        }
        candidates.sort_by_key(|(route, _)| route.template.captures());

        let mut allowed: Vec<String> = Vec::new();
        let mut furthest: Option<Mismatch> = None;

        for (route, path_vars) in candidates {
            if !route.condition.allows_method(&req.method) {
                for m in &route.condition.methods {
                    if !allowed.iter().any(|a| a == m.as_str()) {
                        allowed.push(m.as_str().to_string());
                    }
                }
                continue;
            }

            match route.condition.check(req) {
                Ok(produces) => {
                    return Ok(RouteMatch {
                        route,
                        path_vars,
                        produces,
                    })
                }
                Err(mismatch) => {
                    if !furthest.as_ref().is_some_and(|f| mismatch.stage() <= f.stage()) {
                        furthest = Some(mismatch);
                    }
                }
            }
        }

        Err(furthest.unwrap_or(Mismatch::MethodNotAllowed { allowed }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::Reply;
    use crate::error::MvcError;
    use crate::handler::Invocation;

    fn ok(_: &mut Invocation<'_>) -> Result<Reply, MvcError> {
        Ok(Reply::ok())
    }

    fn table() -> RouteTable {
        RouteTable::new(vec![
            RouteDef::any("/hello-basic", ok),
            RouteDef::get("/mapping-get-v2", ok),
            RouteDef::get("/mapping/{userId}", ok).name("mapping_path"),
            RouteDef::get("/mapping/users", ok).name("mapping_users"),
            RouteDef::get("/mapping-param", ok).params(&["mode=debug"]),
            RouteDef::post("/mapping-consume", ok).consumes(&["application/json"]),
            RouteDef::post("/mapping-produce", ok).produces(&["text/html"]),
        ])
    }

    fn req(method: Method, uri: &str) -> RequestParts {
        RequestParts::builder(method, uri).build()
    }

    #[test]
    fn test_any_method() {
        let table = table();
        for method in [Method::GET, Method::POST, Method::DELETE] {
            assert!(table.lookup(&req(method, "/hello-basic")).is_ok());
        }
    }

    #[test]
    fn test_not_found() {
        assert_eq!(
            table().lookup(&req(Method::GET, "/nope")).err(),
            Some(Mismatch::NotFound)
        );
        assert_eq!(
            table().lookup(&req(Method::GET, "/hello-basic/")).err(),
            Some(Mismatch::NotFound)
        );
    }

    #[test]
    fn test_method_not_allowed() {
        assert_eq!(
            table().lookup(&req(Method::POST, "/mapping-get-v2")).err(),
            Some(Mismatch::MethodNotAllowed {
                allowed: vec!["GET".to_string()]
            })
        );
    }

    #[test]
    fn test_literal_beats_capture() {
        let table = table();
        let m = table.lookup(&req(Method::GET, "/mapping/users")).ok().unwrap();
        assert_eq!(m.route.name, "mapping_users");
        assert!(m.path_vars.is_empty());

        let m = table.lookup(&req(Method::GET, "/mapping/userA")).ok().unwrap();
        assert_eq!(m.route.name, "mapping_path");
        assert_eq!(m.path_vars, [("userId".to_string(), "userA".to_string())]);
    }

    #[test]
    fn test_condition_mismatches() {
        let table = table();
        assert!(matches!(
            table.lookup(&req(Method::GET, "/mapping-param")).err(),
            Some(Mismatch::Condition { .. })
        ));

        let text = RequestParts::builder(Method::POST, "/mapping-consume")
            .header("content-type", "text/plain")
            .build();
        assert_eq!(
            table.lookup(&text).err().map(|m| m.status()),
            Some(hyper::StatusCode::UNSUPPORTED_MEDIA_TYPE)
        );

        let json_only = RequestParts::builder(Method::POST, "/mapping-produce")
            .header("accept", "application/json")
            .build();
        assert_eq!(
            table.lookup(&json_only).err().map(|m| m.status()),
            Some(hyper::StatusCode::NOT_ACCEPTABLE)
        );
    }

    #[test]
    fn test_produces_is_negotiated() {
        let table = table();
        let m = table.lookup(&req(Method::POST, "/mapping-produce")).ok().unwrap();
        assert_eq!(m.produces.map(|mt| mt.to_string()), Some("text/html".to_string()));
    }

    #[test]
    fn test_furthest_mismatch_wins() {
        let table = RouteTable::new(vec![
            RouteDef::post("/x", ok),
            RouteDef::get("/x", ok).params(&["a"]),
            RouteDef::get("/x", ok).params(&["b"]).produces(&["text/html"]),
        ]);
        let r = RequestParts::builder(Method::GET, "/x?b=1")
            .header("accept", "application/json")
            .build();
        assert!(matches!(
            table.lookup(&r).err(),
            Some(Mismatch::NotAcceptable { .. })
        ));
    }
}
