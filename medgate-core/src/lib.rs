pub mod authorization;
pub mod settings;
pub mod user;
