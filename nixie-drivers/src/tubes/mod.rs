//! Tube drivers

pub mod multiplexer;

pub use multiplexer::NixieMultiplexer;
