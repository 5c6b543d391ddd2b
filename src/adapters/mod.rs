pub mod rest;

pub use rest::RestClient;
