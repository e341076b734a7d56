use log::debug;
use std::io::Write;

/// Writes the finished document followed by a single newline.
pub fn write_output<W: Write>(writer: &mut W, formatted_content: &str) -> anyhow::Result<()> {
    debug!("Writing {} bytes of output", formatted_content.len());
    writer.write_all(formatted_content.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
