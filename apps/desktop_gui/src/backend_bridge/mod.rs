//! Backend worker: owns the product controller and runs UI commands against it.

pub mod commands;
pub mod runtime;
