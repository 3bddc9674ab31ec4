pub mod coercion;
pub mod models;
pub mod mutation;
pub mod services;
pub mod validation;
