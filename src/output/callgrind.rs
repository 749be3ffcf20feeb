//! Callgrind profile writer.
//!
//! Emits the text format read by KCachegrind and QCachegrind. Every profile
//! entry gets its own `fn=` block; viewers merge entries sharing a name.

use super::prepare_output_path;
use crate::callgraph::ProfileEntry;
use crate::utils::config::MICROS_PER_SECOND;
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn to_micros(seconds: f64) -> u64 {
    (seconds * MICROS_PER_SECOND).round().max(0.0) as u64
}

/// Write entries in callgrind format
///
/// `entries` are profile roots; their callees are written too.
pub fn write_callgrind<W: Write>(entries: &[ProfileEntry], mut writer: W) -> std::io::Result<()> {
    let summary: u64 = entries.iter().map(|entry| to_micros(entry.total_time)).sum();

    writeln!(writer, "version: 1")?;
    writeln!(writer, "creator: time-trace {}", env!("CARGO_PKG_VERSION"))?;
    writeln!(writer, "events: Microseconds")?;
    writeln!(writer, "summary: {}", summary)?;

    for entry in entries.iter().flat_map(|entry| entry.iter()) {
        writeln!(writer)?;
        writeln!(writer, "fn={}", entry.name)?;
        writeln!(writer, "0 {}", to_micros(entry.self_time))?;

        for call in &entry.calls {
            writeln!(writer, "cfn={}", call.name)?;
            writeln!(writer, "calls={} 0", call.call_count)?;
            writeln!(writer, "0 {}", to_micros(call.total_time))?;
        }
    }

    Ok(())
}

/// Write entries to a callgrind file
///
/// **Public** - main entry point for call graph output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is invalid
pub fn write_callgrind_file(
    entries: &[ProfileEntry],
    output_path: impl AsRef<Path>,
) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing callgrind profile to: {}", output_path.display());
    prepare_output_path(output_path)?;

    let mut writer = BufWriter::new(File::create(output_path)?);
    write_callgrind(entries, &mut writer)?;
    writer.flush()?;

    info!("Callgrind profile written ({} root entries)", entries.len());
    Ok(())
}
