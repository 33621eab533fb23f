use crate::metadata::CaptureTimestamp;
use chrono::NaiveDateTime;
use exif::Reader;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CAPTURE_TIME_TAG: &str = "datetimeoriginal";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("could not open {path} for metadata reading")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("i/o failure while reading metadata of {path}")]
    Container {
        path: PathBuf,
        #[source]
        source: exif::Error,
    },
}

pub fn read_capture_timestamp(path: &Path) -> Result<CaptureTimestamp, ExtractError> {
    let file = File::open(path).map_err(|source| ExtractError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut buf = BufReader::new(file);
    let exif = match Reader::new().read_from_container(&mut buf) {
        Ok(exif) => exif,
        // Files without a readable metadata container still take part in the
        // batch as undated; only genuine i/o failures abort the run.
        Err(err @ exif::Error::Io(_)) => {
            return Err(ExtractError::Container {
                path: path.to_path_buf(),
                source: err,
            })
        }
        Err(_) => return Ok(CaptureTimestamp::MissingField),
    };

    let mut raw: Option<String> = None;
    for field in exif.fields() {
        let tag_name = format!("{}", field.tag);
        if tag_name.to_ascii_lowercase().contains(CAPTURE_TIME_TAG) {
            // Last matching field in container order wins.
            raw = Some(field.display_value().to_string());
        }
    }

    match raw {
        Some(value) => Ok(parse_capture_time(&value)),
        None => Ok(CaptureTimestamp::MissingField),
    }
}

fn parse_capture_time(input: &str) -> CaptureTimestamp {
    let normalized = input.trim();

    let candidates = ["%Y:%m:%d %H:%M:%S", "%Y-%m-%d %H:%M:%S"];
    for fmt in candidates {
        if let Ok(ts) = NaiveDateTime::parse_from_str(normalized, fmt) {
            return CaptureTimestamp::Known(ts);
        }
    }

    CaptureTimestamp::Unparsable
}

// Minimal little-endian TIFF with a single Exif DateTimeOriginal field,
// used as an in-memory metadata fixture by tests across the crate.
#[cfg(test)]
pub(crate) fn tiff_with_datetime(value: &str) -> Vec<u8> {
    let mut ascii = value.as_bytes().to_vec();
    ascii.push(0);
    let count = ascii.len() as u32;

    let mut out = Vec::new();
    out.extend_from_slice(b"II");
    out.extend_from_slice(&42u16.to_le_bytes());
    out.extend_from_slice(&8u32.to_le_bytes());

    // IFD0: a single ExifIFDPointer entry.
    let exif_ifd_offset: u32 = 8 + 2 + 12 + 4;
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&0x8769u16.to_le_bytes());
    out.extend_from_slice(&4u16.to_le_bytes());
    out.extend_from_slice(&1u32.to_le_bytes());
    out.extend_from_slice(&exif_ifd_offset.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    // Exif IFD: DateTimeOriginal as ASCII.
    let value_offset: u32 = exif_ifd_offset + 2 + 12 + 4;
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&0x9003u16.to_le_bytes());
    out.extend_from_slice(&2u16.to_le_bytes());
    out.extend_from_slice(&count.to_le_bytes());
    if count <= 4 {
        let mut inline = ascii.clone();
        inline.resize(4, 0);
        out.extend_from_slice(&inline);
    } else {
        out.extend_from_slice(&value_offset.to_le_bytes());
    }
    out.extend_from_slice(&0u32.to_le_bytes());
    if count > 4 {
        out.extend_from_slice(&ascii);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{parse_capture_time, read_capture_timestamp, tiff_with_datetime, ExtractError};
    use crate::metadata::CaptureTimestamp;
    use chrono::NaiveDateTime;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn expected(value: &str) -> CaptureTimestamp {
        CaptureTimestamp::Known(
            NaiveDateTime::parse_from_str(value, "%Y:%m:%d %H:%M:%S").expect("fixture timestamp"),
        )
    }

    #[test]
    fn reads_datetime_original_from_container() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("a.jpg");
        fs::write(&path, tiff_with_datetime("2020:01:01 10:00:00")).expect("write fixture");

        let ts = read_capture_timestamp(&path).expect("extraction should succeed");
        assert_eq!(ts, expected("2020:01:01 10:00:00"));
    }

    #[test]
    fn malformed_field_value_is_unparsable() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("b.jpg");
        fs::write(&path, tiff_with_datetime("not a date at all!!")).expect("write fixture");

        let ts = read_capture_timestamp(&path).expect("extraction should succeed");
        assert_eq!(ts, CaptureTimestamp::Unparsable);
    }

    #[test]
    fn file_without_metadata_container_is_missing_field() {
        let temp = tempdir().expect("tempdir");
        let path = temp.path().join("notes.txt");
        fs::write(&path, b"plain text, no metadata here").expect("write fixture");

        let ts = read_capture_timestamp(&path).expect("junk content should not abort");
        assert_eq!(ts, CaptureTimestamp::MissingField);
    }

    #[test]
    fn unopenable_file_is_a_fatal_extract_error() {
        let err = read_capture_timestamp(Path::new("/no/such/photo.jpg"))
            .expect_err("missing file should fail to open");
        assert!(matches!(err, ExtractError::Open { .. }));
    }

    #[test]
    fn parse_accepts_colon_and_dash_separated_dates() {
        assert_eq!(
            parse_capture_time("2020:01:01 09:00:00"),
            expected("2020:01:01 09:00:00")
        );
        assert_eq!(
            parse_capture_time("  2020-01-01 09:00:00  "),
            expected("2020:01:01 09:00:00")
        );
        assert_eq!(
            parse_capture_time("2020/01/01 09:00"),
            CaptureTimestamp::Unparsable
        );
    }
}
