pub mod ease;
pub mod generator;
pub mod sdf;
pub mod shape;
pub mod surface;
