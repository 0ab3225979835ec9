//! Value Object Module

pub mod account_password;
pub mod account_role;
pub mod email;
pub mod person_name;
