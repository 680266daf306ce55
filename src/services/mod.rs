pub mod query_engine;
pub mod remote_talent;
pub mod schema_adapter;
pub mod talent_service;
pub mod talent_store;
