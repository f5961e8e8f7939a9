use std::io::{BufRead, Write};

use tracing::debug;

use crate::commands::interpret::interpret;
use crate::error::Result;
use crate::store::FileStore;

const PROMPT: &str = "> ";

/// Read commands from `input` until `q`, `quit`, or end of input.
///
/// Bad commands are answered with an error line and the loop carries on;
/// storage failures end the loop with the error.
pub fn run<R, W>(store: &FileStore, mut input: R, mut output: W) -> Result<()>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{PROMPT}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            break;
        }

        let command = line.trim_end_matches(['\n', '\r']);
        if matches!(command, "q" | "quit") {
            break;
        }
        if command.trim().is_empty() {
            continue;
        }

        match interpret(store, command) {
            Ok(reply) => writeln!(output, "{reply}")?,
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                debug!(code = e.code(), "command rejected");
                writeln!(output, "error: {e}")?;
            }
        }
    }
    Ok(())
}
