pub mod devices;
pub mod log;
pub mod migrate;
pub mod models;
pub mod pool;
pub mod queries;
pub mod requests;
