pub mod auth_transport;
pub mod backend_client;
pub mod catalog;
pub mod editors;
pub mod registration;
pub mod session_store;
pub mod token_provider;
