pub mod roles;
pub mod permissions;
