pub mod gate;
pub mod lifetime;
