pub mod filter;
pub mod options;
pub mod svg;
