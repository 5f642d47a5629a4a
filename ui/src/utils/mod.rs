pub mod colors;
pub mod files;
