pub mod abf;
pub mod client;
pub mod config;
pub mod context;
pub mod error;
pub mod resource;
pub mod routes;

pub use abf::{Decision, DecisionClient};
pub use config::{ClientConfig, Config};
pub use context::AppContext;
pub use error::{AppError, AppResult};
pub use resource::{Resource, ResourceStore};
pub use routes::create_router;
