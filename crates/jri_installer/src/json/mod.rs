pub mod files;
pub mod list;
