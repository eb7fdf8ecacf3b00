pub mod byte_units;
pub mod node;
pub mod renderer;
