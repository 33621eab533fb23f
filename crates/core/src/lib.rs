mod apply;
mod exif_reader;
mod metadata;
mod planner;

pub use apply::{apply_plan, place_file, ApplyResult, PlaceMode, Placement};
pub use exif_reader::{read_capture_timestamp, ExtractError};
pub use metadata::CaptureTimestamp;
pub use planner::{generate_plan, PlanOptions, SortCandidate, SortPlan, SortStats};
