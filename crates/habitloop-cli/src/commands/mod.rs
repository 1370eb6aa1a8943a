pub mod demo;
pub mod habit;
pub mod stats;
pub mod user;
