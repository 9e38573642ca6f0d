pub mod echo;
pub mod fail;
pub mod registry;
