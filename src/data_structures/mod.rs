mod bit_field;
mod slot_buffer;

pub use bit_field::*;
pub use slot_buffer::*;
