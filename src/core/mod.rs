pub mod client;
pub mod form;
pub mod repository;
