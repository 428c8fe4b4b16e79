//! Field names and the normalized output record.

use serde::Serialize;

pub const TIMESTAMP: &str = "Timestamp";
pub const ADDRESS: &str = "Address";
pub const ZIP: &str = "ZIP";
pub const FULL_NAME: &str = "FullName";
pub const FOO_DURATION: &str = "FooDuration";
pub const BAR_DURATION: &str = "BarDuration";
pub const TOTAL_DURATION: &str = "TotalDuration";
pub const NOTES: &str = "Notes";

/// Header row of the normalized output, in column order.
pub const OUTPUT_HEADER: [&str; 8] = [
    TIMESTAMP,
    ADDRESS,
    ZIP,
    FULL_NAME,
    FOO_DURATION,
    BAR_DURATION,
    TOTAL_DURATION,
    NOTES,
];

/// One fully validated output row.
///
/// Field order matches [`OUTPUT_HEADER`]; the CSV writer serializes the
/// struct positionally, so keep the two in sync.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedRecord {
    /// ISO 8601 timestamp with numeric UTC offset.
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Address")]
    pub address: String,
    /// Zero-filled to at least five characters.
    #[serde(rename = "ZIP")]
    pub zip: String,
    #[serde(rename = "FullName")]
    pub full_name: String,
    /// Seconds, fixed to three decimals.
    #[serde(rename = "FooDuration")]
    pub foo_duration: String,
    #[serde(rename = "BarDuration")]
    pub bar_duration: String,
    #[serde(rename = "TotalDuration")]
    pub total_duration: String,
    #[serde(rename = "Notes")]
    pub notes: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_columns_follow_header() {
        let record = NormalizedRecord {
            timestamp: "2011-04-01T14:00:00-04:00".to_string(),
            address: "123 Main St".to_string(),
            zip: "02345".to_string(),
            full_name: "JANE DOE".to_string(),
            foo_duration: "5012.123".to_string(),
            bar_duration: "0.000".to_string(),
            total_duration: "5012.123".to_string(),
            notes: String::new(),
        };

        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(&record).expect("serialize");
        let bytes = writer.into_inner().expect("flush");
        let text = String::from_utf8(bytes).expect("utf8");
        let mut lines = text.lines();

        assert_eq!(lines.next(), Some(OUTPUT_HEADER.join(",").as_str()));
        assert_eq!(
            lines.next(),
            Some("2011-04-01T14:00:00-04:00,123 Main St,02345,JANE DOE,5012.123,0.000,5012.123,")
        );
    }
}
