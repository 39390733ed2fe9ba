//! Map-driven search: when to query, and keeping results in step with the viewport

pub mod builder;
pub mod controller;
pub mod policy;

pub use builder::SearchControllerBuilder;
pub use controller::SearchController;
pub use policy::{decide, should_search_again, SearchDecision, SearchTicket};
