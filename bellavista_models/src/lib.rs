pub mod contact;
pub mod sanitize;
