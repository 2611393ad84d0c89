pub mod api;
pub mod config;
pub mod errors;
pub mod ext;
pub mod model;
pub mod router;
pub mod store;
pub mod utils;
