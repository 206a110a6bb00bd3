pub mod balance;
pub mod context;
pub mod employee;
pub mod error;
pub mod leave;
pub mod workdays;
