//! Guardian Application Layer: ports (hexagonal boundaries) and the use
//! cases that implement the Guardian, Threat Intelligence, and Firewall
//! Control Plane services against them. No I/O of its own.

pub mod ports;
pub mod subnet_hash;
pub mod use_cases;

pub use ports::*;
pub use use_cases::*;
