use std::io::Read;
use std::path::Path;

use anyhow::Context;
use chrono::NaiveDateTime;
use serde::Deserialize;

use super::fetch::{self, DATA_URL};
use super::model::{Pickup, PickupDataset};
use crate::error::DataError;

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Normalized name of the timestamp column.
pub const DATE_COLUMN: &str = "date/time";

/// Load at most `row_limit` pickups from the fixed remote source.
pub fn load_remote(row_limit: usize) -> Result<PickupDataset, DataError> {
    let body = fetch::fetch_csv(DATA_URL)?;
    parse_csv(body.as_slice(), row_limit)
}

/// Load a local `.csv` / `.csv.gz` export of the same table.
pub fn load_file(path: &Path, row_limit: usize) -> anyhow::Result<PickupDataset> {
    let raw = std::fs::read(path).context("reading file")?;
    let body = fetch::decompress_if_gzip(&raw).context("decompressing file")?;
    Ok(parse_csv(body.as_slice(), row_limit)?)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// One raw CSV row, matched against the lower-cased headers.
#[derive(Debug, Deserialize)]
struct RawRow {
    #[serde(rename = "date/time")]
    timestamp: String,
    lat: f64,
    lon: f64,
    base: String,
}

/// Parse CSV bytes into a dataset, truncated at `row_limit` rows.
///
/// Header names are lower-cased once on load; headers that are already
/// lower-case come through unchanged, so the normalization is idempotent.
/// Any unparseable timestamp or coordinate fails the whole load.
pub fn parse_csv<R: Read>(reader: R, row_limit: usize) -> Result<PickupDataset, DataError> {
    let mut csv_reader = csv::Reader::from_reader(reader);

    let headers: Vec<String> = csv_reader
        .headers()
        .map_err(|e| DataError::Parse {
            row: 0,
            column: "<header>".to_string(),
            reason: e.to_string(),
        })?
        .iter()
        .map(|h| h.trim().to_ascii_lowercase())
        .collect();

    if !headers.iter().any(|h| h == DATE_COLUMN) {
        return Err(DataError::Parse {
            row: 0,
            column: DATE_COLUMN.to_string(),
            reason: format!("column not found (headers: {headers:?})"),
        });
    }

    let header_record = csv::StringRecord::from(headers.clone());
    let mut pickups = Vec::new();

    for (row_no, result) in csv_reader.records().enumerate() {
        if pickups.len() >= row_limit {
            break;
        }
        // Header row is row 0, so data rows are 1-based in errors.
        let row = row_no + 1;

        let record = result.map_err(|e| DataError::Parse {
            row,
            column: "<record>".to_string(),
            reason: e.to_string(),
        })?;

        let raw: RawRow = record
            .deserialize(Some(&header_record))
            .map_err(|e| DataError::Parse {
                row,
                column: "<record>".to_string(),
                reason: e.to_string(),
            })?;

        let timestamp = parse_timestamp(&raw.timestamp).ok_or_else(|| DataError::Parse {
            row,
            column: DATE_COLUMN.to_string(),
            reason: format!("'{}' is not a date/time", raw.timestamp),
        })?;

        pickups.push(Pickup {
            timestamp,
            lat: raw.lat,
            lon: raw.lon,
            base: raw.base,
        });
    }

    Ok(PickupDataset::from_pickups(pickups, headers))
}

/// The published dataset writes `9/1/2014 0:01:00`; ISO-8601 is accepted as
/// a fallback for hand-written files.
fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, "%m/%d/%Y %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Date/Time,Lat,Lon,Base
9/1/2014 0:01:00,40.2201,-74.0021,B02512
9/1/2014 5:10:00,40.7500,-73.9800,B02598
9/1/2014 17:02:00,40.7759,-73.9864,B02617
";

    #[test]
    fn headers_are_lower_cased() {
        let ds = parse_csv(SAMPLE.as_bytes(), 100).unwrap();
        assert_eq!(ds.columns, vec!["date/time", "lat", "lon", "base"]);
    }

    #[test]
    fn rows_parse_in_order() {
        let ds = parse_csv(SAMPLE.as_bytes(), 100).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.pickups[0].hour(), 0);
        assert_eq!(ds.pickups[1].hour(), 5);
        assert_eq!(ds.pickups[2].hour(), 17);
        assert_eq!(ds.pickups[1].base, "B02598");
        assert!((ds.pickups[0].lat - 40.2201).abs() < 1e-9);
    }

    #[test]
    fn row_limit_truncates() {
        let ds = parse_csv(SAMPLE.as_bytes(), 2).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.pickups[1].hour(), 5);
    }

    #[test]
    fn row_limit_larger_than_file_is_fine() {
        let ds = parse_csv(SAMPLE.as_bytes(), 1_000_000).unwrap();
        assert_eq!(ds.len(), 3);
    }

    #[test]
    fn iso_timestamps_are_accepted() {
        let csv = "date/time,lat,lon,base\n2019-07-06T05:10:00,40.75,-73.98,B02512\n";
        let ds = parse_csv(csv.as_bytes(), 10).unwrap();
        assert_eq!(ds.pickups[0].hour(), 5);
    }

    #[test]
    fn bad_timestamp_fails_the_whole_load() {
        let csv = "date/time,lat,lon,base\n\
                   9/1/2014 0:01:00,40.1,-74.0,B02512\n\
                   not-a-date,40.2,-74.0,B02512\n";
        let err = parse_csv(csv.as_bytes(), 10).unwrap_err();
        match err {
            DataError::Parse { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, DATE_COLUMN);
            }
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn bad_coordinate_fails_the_whole_load() {
        let csv = "date/time,lat,lon,base\n9/1/2014 0:01:00,north,-74.0,B02512\n";
        assert!(matches!(
            parse_csv(csv.as_bytes(), 10),
            Err(DataError::Parse { row: 1, .. })
        ));
    }

    #[test]
    fn missing_timestamp_column_is_reported() {
        let csv = "when,lat,lon,base\n9/1/2014 0:01:00,40.1,-74.0,B02512\n";
        assert!(matches!(
            parse_csv(csv.as_bytes(), 10),
            Err(DataError::Parse { row: 0, .. })
        ));
    }

    #[test]
    fn date_index_collects_distinct_dates() {
        let csv = "date/time,lat,lon,base\n\
                   9/1/2014 0:01:00,40.1,-74.0,B02512\n\
                   9/1/2014 9:30:00,40.2,-74.0,B02512\n\
                   9/2/2014 9:30:00,40.3,-74.0,B02512\n";
        let ds = parse_csv(csv.as_bytes(), 10).unwrap();
        assert_eq!(ds.dates.len(), 2);
    }
}
