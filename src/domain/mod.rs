pub mod config;
pub mod error;

// Clinical record module
pub mod clinical;
