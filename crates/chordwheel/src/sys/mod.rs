pub mod assets;
pub mod runtime;
