//! Stable error codes surfaced alongside container errors.

pub const CONTAINER_IO: &str = "PBIT001";
pub const CONTAINER_ZIP: &str = "PBIT002";
pub const CONTAINER_NOT_ZIP: &str = "PBIT003";
pub const CONTAINER_TOO_MANY_ENTRIES: &str = "PBIT004";
pub const CONTAINER_PART_TOO_LARGE: &str = "PBIT005";
pub const CONTAINER_TOTAL_TOO_LARGE: &str = "PBIT006";
