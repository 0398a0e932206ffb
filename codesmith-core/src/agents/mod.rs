pub mod agent;
pub mod coder;
