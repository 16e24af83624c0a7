//! Reading filming locations from a plain text catalog.
//!
//! Each relevant line consists of a title, the release year in
//! parentheses, optional annotations and a free-text location:
//!
//! ```text
//! Some Film Title (2000) {segment}	USA, California, Los Angeles
//! ```
//!
//! Catalog files are Latin-1 encoded.

use crate::{entities::*, text::strip_annotations, Error};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::Path,
};

pub fn year_marker(year: u16) -> String {
    format!("({year})")
}

/// Decodes ISO-8859-1 bytes. Every byte is a valid code point
/// so this never fails.
pub fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().copied().map(char::from).collect()
}

/// Splits a single line at the year marker.
///
/// Returns `None` if the line does not contain the marker
/// as a separate token.
pub fn parse_line(line: &str, year: u16) -> Option<LocationRecord> {
    let marker = year_marker(year);
    if !line.contains(&marker) {
        return None;
    }
    let line = line.replace('\t', " ");
    let tokens: Vec<_> = line.split_whitespace().collect();
    let Some(idx) = tokens.iter().position(|t| *t == marker) else {
        log::debug!("Skipping line without a separate year marker: {line}");
        return None;
    };
    let title = tokens[..idx].join(" ");
    let raw_location = strip_annotations(&tokens[idx + 1..].join(" "));
    Some(LocationRecord {
        title,
        year,
        raw_location,
    })
}

/// Reads all records of the given year, preserving their order.
pub fn parse_records<R: BufRead>(mut reader: R, year: u16) -> Result<Vec<LocationRecord>, Error> {
    let mut records = vec![];
    let mut buf = Vec::new();
    let mut line_count = 0_usize;
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_count += 1;
        let line = decode_latin1(trim_line_break(&buf));
        if let Some(record) = parse_line(&line, year) {
            records.push(record);
        }
    }
    log::debug!(
        "Found {} records of {year} in {line_count} lines",
        records.len()
    );
    Ok(records)
}

pub fn read_records_by_year<P: AsRef<Path>>(
    path: P,
    year: u16,
) -> Result<Vec<LocationRecord>, Error> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| match err.kind() {
        io::ErrorKind::NotFound => Error::FileNotFound(path.to_path_buf()),
        _ => Error::Io(err),
    })?;
    log::info!("Reading catalog {}", path.display());
    parse_records(BufReader::new(file), year)
}

fn trim_line_break(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = "\
CRC: 0x8B3D3B4F  Date: Fri Feb 10 00:00:00 2017

LOCATIONS LIST
==============

\"#1 Single\" (2006)\t\t\t\tLos Angeles, California, USA
Some Film Title (2000) {segment}\tUSA, California, Los Angeles
Another Film (2000)\t\tLondon, England, UK\t(studio)
Not This One (2001)\t\tParis, France
Glued Title(2000)\t\tNowhere
\"Series\" (2000) {Episode (#1.2)}\tBerlin, Germany (location)
";

    #[test]
    fn parse_the_example_line() {
        let record = parse_line(
            "Some Film Title (2000) {segment} USA, California, Los Angeles",
            2000,
        )
        .unwrap();
        assert_eq!(
            record,
            LocationRecord {
                title: "Some Film Title".into(),
                year: 2000,
                raw_location: "USA, California, Los Angeles".into(),
            }
        );
    }

    #[test]
    fn ignore_lines_of_other_years() {
        assert!(parse_line("Not This One (2001)\tParis, France", 2000).is_none());
        assert!(parse_line("", 2000).is_none());
    }

    #[test]
    fn skip_lines_without_separate_marker() {
        assert!(parse_line("Glued Title(2000)\t\tNowhere", 2000).is_none());
    }

    #[test]
    fn split_at_the_first_marker() {
        let record = parse_line("Remake (2000) (2000)\tRome, Italy", 2000).unwrap();
        assert_eq!("Remake", record.title);
        assert_eq!("Rome, Italy", record.raw_location);
    }

    #[test]
    fn normalize_tabs_and_whitespace() {
        let record = parse_line("A\tFilm  (2000)\t\t Somewhere,\t Else  ", 2000).unwrap();
        assert_eq!("A Film", record.title);
        assert_eq!("Somewhere, Else", record.raw_location);
    }

    #[test]
    fn parse_records_in_file_order() {
        let records = parse_records(CATALOG.as_bytes(), 2000).unwrap();
        let titles: Vec<_> = records.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Some Film Title", "Another Film", "\"Series\""]);
        let locations: Vec<_> = records.iter().map(|r| r.raw_location.as_str()).collect();
        assert_eq!(
            locations,
            vec![
                "USA, California, Los Angeles",
                "London, England, UK",
                "Berlin, Germany"
            ]
        );
        assert!(records.iter().all(|r| r.year == 2000));
    }

    #[test]
    fn year_without_matches() {
        let records = parse_records(CATALOG.as_bytes(), 1895).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn decode_latin1_bytes() {
        let bytes = b"\xA1Ja me maaten...! (2000)\tZ\xFCrich, Switzerland\r\n";
        let records = parse_records(&bytes[..], 2000).unwrap();
        assert_eq!(1, records.len());
        assert_eq!("\u{a1}Ja me maaten...!", records[0].title);
        assert_eq!("Z\u{fc}rich, Switzerland", records[0].raw_location);
    }

    #[test]
    fn last_line_without_line_break() {
        let records = parse_records(&b"X (2000)\tY\nZ (2000)\tW"[..], 2000).unwrap();
        assert_eq!(2, records.len());
        assert_eq!("W", records[1].raw_location);
    }

    #[test]
    fn missing_file() {
        let err = read_records_by_year("this/file/does/not/exist.list", 2000).unwrap_err();
        assert!(matches!(err, Error::FileNotFound(_)));
    }
}
