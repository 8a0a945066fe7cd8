use std::io::Read;
use std::time::Duration;

use flate2::read::GzDecoder;

use crate::error::DataError;

// ---------------------------------------------------------------------------
// Remote source
// ---------------------------------------------------------------------------

/// Fixed remote source: September 2014 Uber pickups in NYC, gzipped CSV.
pub const DATA_URL: &str =
    "https://s3-us-west-2.amazonaws.com/streamlit-demo-data/uber-raw-data-sep14.csv.gz";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Download the raw CSV body from `url`, gunzipping gzip payloads.
///
/// No retry and no recovery policy: a failed fetch surfaces as
/// [`DataError::Fetch`] and the caller decides what to do.
pub fn fetch_csv(url: &str) -> Result<Vec<u8>, DataError> {
    let fetch_err = |reason: String| DataError::Fetch {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| fetch_err(e.to_string()))?;

    let response = client
        .get(url)
        .send()
        .map_err(|e| fetch_err(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        return Err(fetch_err(format!("HTTP {}", status.as_u16())));
    }

    let body = response.bytes().map_err(|e| fetch_err(e.to_string()))?;

    decompress_if_gzip(&body).map_err(|e| fetch_err(e.to_string()))
}

/// Gzip payloads start with the magic bytes `1f 8b`; anything else is
/// passed through unchanged.
pub fn decompress_if_gzip(body: &[u8]) -> std::io::Result<Vec<u8>> {
    if body.starts_with(&[0x1f, 0x8b]) {
        let mut out = Vec::new();
        GzDecoder::new(body).read_to_end(&mut out)?;
        Ok(out)
    } else {
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;

    use super::*;

    #[test]
    fn plain_body_passes_through() {
        let body = b"date/time,lat,lon,base\n";
        assert_eq!(decompress_if_gzip(body).unwrap(), body);
    }

    #[test]
    fn gzip_body_is_decoded() {
        let text = b"date/time,lat,lon,base\n9/1/2014 0:01:00,40.7,-73.9,B02512\n";
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text).unwrap();
        let compressed = encoder.finish().unwrap();

        assert_eq!(decompress_if_gzip(&compressed).unwrap(), text);
    }

    #[test]
    fn truncated_gzip_body_is_an_error() {
        let text = b"date/time,lat,lon,base\n";
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(text).unwrap();
        let mut compressed = encoder.finish().unwrap();
        compressed.truncate(compressed.len() / 2);

        assert!(decompress_if_gzip(&compressed).is_err());
    }
}
