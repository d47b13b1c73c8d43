//! Routing module
//!
//! Provides request mapping capabilities including:
//! - Path templates with `{name}` placeholders
//! - Method filtering with 405 reporting
//! - Parameter and header predicates
//! - `consumes` / `produces` content negotiation

mod condition;
mod table;
mod template;

pub use condition::{Expression, RequestCondition};
pub use table::{Route, RouteDef, RouteMatch, RouteTable};
pub use template::PathTemplate;
