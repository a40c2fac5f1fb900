pub mod contacts;
pub mod system;
