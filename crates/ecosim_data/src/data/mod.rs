pub mod component;
pub mod definition;
pub mod math;

pub use component::*;
pub use definition::*;
pub use math::Vec2;
