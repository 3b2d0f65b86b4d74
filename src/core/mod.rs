pub mod detection;
pub mod encoding;
