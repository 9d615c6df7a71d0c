mod input;
mod output;

pub use input::read_text;
pub use output::{write_output, OutputConfig};
