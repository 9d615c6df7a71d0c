use std::fs::File;
use std::io::{self, Write};

use is_terminal::IsTerminal;
use mtrans::transform::util::has_visible;

use crate::error::Result;
use crate::types::OutputDest;

pub struct OutputConfig {
    pub dest: OutputDest,
    /// Print escapes instead of text a terminal would render as nothing.
    pub escape_invisible: bool,
}

pub fn write_output(text: &str, config: &OutputConfig) -> Result<()> {
    match &config.dest {
        OutputDest::File(path) => {
            let mut file = File::create(path)?;
            file.write_all(text.as_bytes())?;
            Ok(())
        }
        OutputDest::Stdout => {
            let stdout = io::stdout();
            if stdout.is_terminal() && config.escape_invisible && !text.is_empty() && !has_visible(text) {
                print_escaped_preview(text);
            } else {
                let mut handle = stdout.lock();
                handle.write_all(text.as_bytes())?;
                handle.write_all(b"\n")?;
            }
            Ok(())
        }
    }
}

fn print_escaped_preview(text: &str) {
    const MAX_CHARS: usize = 256;

    let count = text.chars().count();
    eprintln!(
        "Invisible output ({} characters). Showing escapes (redirect or use --out @file for raw text):\n",
        count
    );
    let escaped: String = text.chars().take(MAX_CHARS).flat_map(char::escape_unicode).collect();
    println!("{}", escaped);
    if count > MAX_CHARS {
        eprintln!("\n... ({} more characters)", count - MAX_CHARS);
    }
}
