//! Record encoding: the line layout, positional templates, typed field values, and the
//! list/context message forms. Everything here runs on the producer's thread.

mod color;
mod encoder;
pub mod list;
pub mod template;
mod value;

pub use color::Color;
pub use encoder::{Body, DEFAULT_LAYOUT, Encoder, Record, field_separator};
pub use value::{Field, Value};
