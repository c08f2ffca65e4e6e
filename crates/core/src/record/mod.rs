#![forbid(unsafe_code)]

mod key;
mod payload;

pub use key::*;
pub use payload::*;

#[cfg(test)]
mod tests;
