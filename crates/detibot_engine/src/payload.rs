use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::UrlSourceRequest;

/// Value of `response` that the ingest endpoints return on success.
pub const SUCCESS_MARKER: &str = "Successfull";
pub const URL_LOADER_TYPE: &str = "url";
/// Crawl politeness delay the admin form always requests.
pub const URL_WAIT_TIME_SECS: u32 = 3;

pub(crate) const FILE_SOURCE_PATH: &str = "insert_filesource";
pub(crate) const URL_SOURCE_PATH: &str = "insert_urlsource";
pub(crate) const FAQ_SOURCE_PATH: &str = "insert_faqsource";

pub(crate) const FILE_PART: &str = "file";
pub(crate) const DESCRIPTION_PART: &str = "descript";

#[derive(Debug, Serialize)]
pub(crate) struct UrlSourcePayload<'a> {
    pub url: &'a str,
    pub recursive: bool,
    pub paths: &'a [String],
    pub loader_type: &'static str,
    pub update_period: &'a str,
    pub description: &'a str,
    pub wait_time: u32,
}

impl<'a> From<&'a UrlSourceRequest> for UrlSourcePayload<'a> {
    fn from(source: &'a UrlSourceRequest) -> Self {
        Self {
            url: &source.url,
            recursive: source.recursive,
            paths: &source.paths,
            loader_type: URL_LOADER_TYPE,
            update_period: &source.update_period,
            description: &source.description,
            wait_time: URL_WAIT_TIME_SECS,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct FaqPayload<'a> {
    pub question: &'a str,
    pub answer: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct PromptPayload<'a> {
    pub prompt: &'a str,
    pub chat: &'a [String],
}

/// Body of the ingest endpoints. `response` is the marker string on success and
/// may be a boolean or message otherwise.
#[derive(Debug, Deserialize)]
pub(crate) struct IngestResponse {
    #[serde(default)]
    pub response: serde_json::Value,
}

impl IngestResponse {
    pub fn is_success(&self) -> bool {
        self.response.as_str() == Some(SUCCESS_MARKER)
    }
}

/// MIME type for an uploaded file. The backend picks its document loader from it.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("csv") => "application/csv",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("json") => "application/json",
        Some("html" | "htm") => "text/html",
        Some("txt" | "md") => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_type_follows_extension() {
        assert_eq!(content_type_for("Guide.PDF"), "application/pdf");
        assert_eq!(content_type_for("table.csv"), "application/csv");
        assert_eq!(content_type_for("notes"), "application/octet-stream");
    }

    #[test]
    fn url_payload_carries_constant_fields() {
        let source = UrlSourceRequest {
            url: "https://x.test".into(),
            recursive: false,
            paths: vec![],
            update_period: "Daily".into(),
            description: "d".into(),
        };
        let value = serde_json::to_value(UrlSourcePayload::from(&source)).unwrap();
        assert_eq!(value["loader_type"], json!("url"));
        assert_eq!(value["wait_time"], json!(3));
        assert_eq!(value["paths"], json!([]));
    }

    #[test]
    fn only_the_marker_string_counts_as_success() {
        let ok: IngestResponse = serde_json::from_value(json!({"response": "Successfull"})).unwrap();
        let refused: IngestResponse = serde_json::from_value(json!({"response": false})).unwrap();
        let empty: IngestResponse = serde_json::from_value(json!({})).unwrap();
        assert!(ok.is_success());
        assert!(!refused.is_success());
        assert!(!empty.is_success());
    }
}
