use once_cell::sync::Lazy;
use regex::Regex;

use crate::transport::ApiResponse;

pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const CSV_CONTENT_TYPE: &str = "text/csv";

static FILENAME: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r#"filename="([^"]+)""#).ok());

/// A file produced by the API (or by the client) for the browser to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Download {
    /// Wrap a binary response. The file name comes from `Content-Disposition`
    /// when the server sends one, otherwise `fallback_name` is used.
    pub fn from_response(
        response: ApiResponse,
        fallback_name: String,
        default_content_type: &str,
    ) -> Self {
        let file_name = response
            .header("content-disposition")
            .and_then(filename_from_disposition)
            .unwrap_or(fallback_name);
        let content_type = response
            .header("content-type")
            .filter(|value| !value.starts_with("application/json"))
            .unwrap_or(default_content_type)
            .to_string();

        Self {
            file_name,
            content_type,
            bytes: response.body,
        }
    }

    pub fn csv(file_name: impl Into<String>, text: String) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: CSV_CONTENT_TYPE.to_string(),
            bytes: text.into_bytes(),
        }
    }
}

/// Extract `name.xlsx` from `attachment; filename="name.xlsx"`.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    FILENAME
        .as_ref()?
        .captures(header)
        .and_then(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use reqwest::header::{HeaderMap, HeaderValue};

    #[test]
    fn disposition_filename_is_extracted() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="ot_weekly.xlsx""#),
            Some("ot_weekly.xlsx".to_string())
        );
        assert_eq!(filename_from_disposition("attachment"), None);
    }

    #[test]
    fn missing_header_uses_fallback() {
        let response = ApiResponse {
            status: StatusCode::OK,
            headers: HeaderMap::new(),
            body: vec![1, 2, 3],
        };
        let download = Download::from_response(
            response,
            "ot_daily_2025-01-01_records.xlsx".to_string(),
            XLSX_CONTENT_TYPE,
        );
        assert_eq!(download.file_name, "ot_daily_2025-01-01_records.xlsx");
        assert_eq!(download.content_type, XLSX_CONTENT_TYPE);
        assert_eq!(download.bytes, vec![1, 2, 3]);
    }

    #[test]
    fn server_filename_wins() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "content-disposition",
            HeaderValue::from_static(r#"attachment; filename="server.xlsx""#),
        );
        let response = ApiResponse {
            status: StatusCode::OK,
            headers,
            body: Vec::new(),
        };
        let download =
            Download::from_response(response, "fallback.xlsx".to_string(), XLSX_CONTENT_TYPE);
        assert_eq!(download.file_name, "server.xlsx");
    }
}
