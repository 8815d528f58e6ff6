//! CreatorDesk - Content Creator Growth Dashboard
//!
//! The engineering core of a creator growth dashboard: session lifecycle
//! against a hosted auth service, typed accessors over the hosted data
//! plane, onboarding and team-approval gates with a pure route guard,
//! calculator tools, and a streaming AI suggestion gateway with its
//! consuming client.

pub mod auth;
pub mod backend;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod gates;
pub mod routes;
pub mod suggest;
pub mod tools;

// Re-export commonly used types
pub use auth::context::AuthContext;
pub use backend::client::BackendClient;
pub use config::AppConfig;
pub use dashboard::Dashboard;
pub use gates::guard::GuardDecision;
pub use routes::Route;
