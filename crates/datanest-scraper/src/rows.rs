//! CSV row access for downloaded feeds.
//!
//! Feeds are comma-separated with standard quoting. The first row is a
//! header and is discarded unconditionally. The reader is flexible about
//! per-row column counts so that a short row surfaces as a row-level
//! `MissingColumn` error from the scraper (skippable) rather than a reader
//! error that would abort the run.

use std::fs::File;
use std::path::Path;

use crate::error::ScraperError;

/// Opens a downloaded feed for row iteration, skipping the header row.
///
/// # Errors
///
/// Returns [`ScraperError::Csv`] if the file cannot be opened.
pub fn open_feed(path: &Path) -> Result<csv::Reader<File>, ScraperError> {
    let reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    Ok(reader)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn feed_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(content.as_bytes()).expect("write fixture");
        file.flush().expect("flush fixture");
        file
    }

    #[test]
    fn open_feed_skips_header_row() {
        let file = feed_file("ico,name\n123,Alpha\n456,Beta\n");
        let mut reader = open_feed(file.path()).unwrap();
        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "123");
    }

    #[test]
    fn open_feed_handles_quoted_fields() {
        let file = feed_file("ico,name\n123,\"Alpha, s.r.o.\"\n");
        let mut reader = open_feed(file.path()).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[1], "Alpha, s.r.o.");
    }

    #[test]
    fn open_feed_tolerates_short_rows() {
        // Column-count drift must not abort iteration; the scraper decides
        // what to do with a short row.
        let file = feed_file("a,b,c\n1,2,3\n1,2\n");
        let mut reader = open_feed(file.path()).unwrap();
        let rows: Vec<csv::StringRecord> =
            reader.records().collect::<Result<_, _>>().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].len(), 2);
    }
}
