pub mod about;
pub mod admin;
pub mod home;
pub mod instances;
pub mod login;
pub mod not_found;
pub mod verify;
