pub mod bridge;
pub mod ports;
pub mod stdio;
