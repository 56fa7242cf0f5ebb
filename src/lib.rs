pub mod api;
pub mod config;
pub mod image;
pub mod request;
pub mod search;
pub mod server;
pub use dotenv::dotenv;
