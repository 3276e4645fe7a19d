pub mod header;
pub mod reader;
pub mod report;

pub use header::{HeaderError, HeaderRecord, TagDecoding, HEADER_READ_LEN, MIN_HEADER_LEN};
pub use reader::read_header;
pub use report::ReportOptions;
