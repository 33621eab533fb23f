use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CaptureTimestamp {
    Known(NaiveDateTime),
    MissingField,
    Unparsable,
}

impl CaptureTimestamp {
    pub fn known(&self) -> Option<NaiveDateTime> {
        match self {
            CaptureTimestamp::Known(ts) => Some(*ts),
            CaptureTimestamp::MissingField | CaptureTimestamp::Unparsable => None,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.known().is_none()
    }

    // Dated files order ascending ahead of all undated files; undated files
    // compare equal so a stable sort keeps their input order.
    pub fn sort_key(&self) -> (bool, Option<NaiveDateTime>) {
        (self.is_unknown(), self.known())
    }
}

impl fmt::Display for CaptureTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaptureTimestamp::Known(ts) => write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S")),
            CaptureTimestamp::MissingField => f.write_str("no capture time"),
            CaptureTimestamp::Unparsable => f.write_str("unreadable capture time"),
        }
    }
}
