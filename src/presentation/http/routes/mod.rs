pub mod chat_routes;
pub mod dashboard_routes;
pub mod document_routes;
pub mod health_routes;

pub use chat_routes::*;
pub use dashboard_routes::*;
pub use document_routes::*;
pub use health_routes::*;
