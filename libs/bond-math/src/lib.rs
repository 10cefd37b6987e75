#![no_std]

pub mod curve;
pub mod trade;
pub mod wad;

pub use curve::*;
pub use trade::*;
pub use wad::*;
