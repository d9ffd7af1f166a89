pub mod authorization;
pub mod directory;

pub use authorization::Gatekeeper;
