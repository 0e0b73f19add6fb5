//! Device classification for the query log.

use std::sync::LazyLock;

use regex::Regex;

use super::models::DeviceType;

static MOBILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)mobi|android").expect("static mobile pattern compiles"));

/// Map a user-agent style client signal to a coarse device category.
pub fn classify_device(signal: &str) -> DeviceType {
    if MOBILE_PATTERN.is_match(signal) {
        DeviceType::Mobile
    } else {
        DeviceType::Desktop
    }
}
