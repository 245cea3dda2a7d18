use std::io::{Error, Write};
use tempfile::NamedTempFile;

/// A config with the production links and millisecond-scale timings.
pub fn fast_config() -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "[auth]")?;
    writeln!(file, "countdown_from = 3")?;
    writeln!(file, "tick_ms = 50")?;
    writeln!(file, "handoff_delay_ms = 100")?;
    writeln!(file, "fallback_delay_ms = 100")?;
    file.flush()?;
    Ok(file)
}
