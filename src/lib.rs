// Library for tests to access modules

pub mod aggregation_worker;
pub mod broadcaster;
pub mod charts;
pub mod collectors;
pub mod config;
pub mod models;
pub mod producer;
pub mod registry;
pub mod routes;
pub mod store;
pub mod summary;
pub mod version;
