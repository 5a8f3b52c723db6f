pub mod builder;
pub mod errors;
pub mod gadgets;
pub mod gate;
pub mod load;

pub use builder::CircuitBuilder;
pub use errors::*;
pub use gate::{Circuit, CircuitInput, Gate};
