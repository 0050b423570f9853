pub mod assemble;
pub mod convert;

use std::io::Read;
use std::path::Path;

use anyhow::Context;

/// Read a whole input document. `-` reads stdin.
pub fn read_input(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(input).with_context(|| format!("reading {input}"))
}

/// Write `content` to `output`, or stdout when there is none.
pub fn write_output(output: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))
        }
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
