//! `toolbelt-core` library crate.
//!
//! Stateless helpers grouped by concern. Every function takes primitive
//! inputs and returns a primitive or a small value object; nullish inputs
//! are modelled as `Option::None` and map to a neutral default unless the
//! function is documented to fail fast.

pub mod color;
pub mod date;
pub mod error;
pub mod errors;
pub mod http;
pub mod number;
pub mod strings;
pub mod thread;
pub mod time;
pub mod types;
pub mod units;
pub mod uri;
