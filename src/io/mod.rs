pub mod permission;
pub mod reader;
pub mod writer;
