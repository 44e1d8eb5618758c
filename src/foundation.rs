pub mod error;
pub mod pixels;
