//! Code administration handlers.

mod generate_code;

pub use generate_code::{GenerateCodeCommand, GenerateCodeHandler};
