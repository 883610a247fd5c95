// Library exports for the blog site
// This allows integration tests and external code to use its modules

pub mod blog;
pub mod config;
pub mod db;
pub mod error;
pub mod routes;
pub mod state;
