//! Turning `xrandr` output into ordered, classified display records

pub mod classify;
mod order;
mod parser;

pub use order::order_displays;
pub use parser::parse_displays;
