use std::borrow::Cow;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use eldorado_core::{ArticleRecord, Result};

/// Byte-order mark so spreadsheet tools pick up UTF-8 for Korean titles.
const BOM: &str = "\u{feff}";
const HEADER: &str = "aid,title,press,time,link";

fn escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

pub fn write_csv<W: Write>(mut out: W, records: &[ArticleRecord]) -> std::io::Result<()> {
    out.write_all(BOM.as_bytes())?;
    writeln!(out, "{}", HEADER)?;
    for r in records {
        writeln!(
            out,
            "{},{},{},{},{}",
            escape(&r.aid),
            escape(&r.title),
            escape(&r.press),
            escape(&r.time),
            escape(&r.link)
        )?;
    }
    Ok(())
}

/// Saves the batch as CSV. A run with nothing collected writes no file.
pub fn save_csv(path: &Path, records: &[ArticleRecord]) -> Result<()> {
    if records.is_empty() {
        return Ok(());
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_csv(&mut writer, records)?;
    writer.flush()?;
    info!(path = %path.display(), count = records.len(), "saved CSV");
    Ok(())
}
