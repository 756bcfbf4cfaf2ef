pub mod client;
pub mod order;
pub mod statistics;
