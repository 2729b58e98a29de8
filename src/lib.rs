pub mod app;
pub mod catalog;
pub mod config;
pub mod domain;
pub mod enumerator;
pub mod error;
pub mod output;
pub mod query;
pub mod reshape;
pub mod resolver;
