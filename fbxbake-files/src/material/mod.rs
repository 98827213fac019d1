pub mod channels;
pub mod types;
