//! Line-by-line tee of an input stream into a file and, optionally, stdout

use std::io::{self, BufRead, Write};

/// Totals for one tee run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TeeStats {
    pub lines: u64,
    pub bytes: u64,
}

/// Copy `input` to `file`, echoing each line to `echo` when given
///
/// Lines are raw bytes including their terminator, so content passes through
/// unchanged. The echo is flushed after every line so interleaving with the
/// file matches input order.
pub fn tee_lines<R, F, E>(
    input: &mut R,
    file: &mut F,
    mut echo: Option<&mut E>,
) -> io::Result<TeeStats>
where
    R: BufRead + ?Sized,
    F: Write + ?Sized,
    E: Write + ?Sized,
{
    let mut stats = TeeStats::default();
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = input.read_until(b'\n', &mut line)?;
        if read == 0 {
            break;
        }

        if let Some(out) = echo.as_deref_mut() {
            out.write_all(&line)?;
            out.flush()?;
        }
        file.write_all(&line)?;

        stats.lines += 1;
        stats.bytes += read as u64;
    }

    file.flush()?;
    Ok(stats)
}
