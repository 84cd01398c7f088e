use shared::models::FingerprintResult;

use super::ApiClient;
use crate::download::Download;
use crate::error::{ClientError, ClientResult};
use crate::transport::{ApiRequest, FilePart};

const EXPORT_FILE_NAME: &str = "fingerprint_logs.csv";
const TYPE_COLUMN: usize = 3;

/// Keep the CSV as is, or drop the fourth (`Type`) column.
pub fn project_csv(csv: &str, include_type: bool) -> ClientResult<String> {
    if include_type {
        return Ok(csv.to_string());
    }

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(csv.as_bytes());
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for record in reader.records() {
        let record = record.map_err(|err| ClientError::Decode(err.to_string()))?;
        writer
            .write_record(record.iter().take(TYPE_COLUMN))
            .map_err(|err| ClientError::Decode(err.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|err| ClientError::Decode(err.to_string()))?;
    String::from_utf8(bytes).map_err(|err| ClientError::Decode(err.to_string()))
}

impl ApiClient {
    /// Upload a raw terminal export and get the parsed punches back.
    pub async fn process_fingerprint(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<FingerprintResult> {
        if bytes.is_empty() {
            return Err(ClientError::invalid("Choose a log file first"));
        }
        let part = FilePart {
            field: "file".to_string(),
            file_name: file_name.to_string(),
            bytes,
        };
        let result: FingerprintResult = self
            .fetch(ApiRequest::post("/fingerprint/process").multipart(part))
            .await?;
        if result.logs.is_empty() {
            return Err(ClientError::invalid("Invalid file or empty log file."));
        }
        Ok(result)
    }
}

/// The converted CSV as a browser download.
pub fn fingerprint_download(result: &FingerprintResult, include_type: bool) -> ClientResult<Download> {
    Ok(Download::csv(EXPORT_FILE_NAME, project_csv(&result.csv, include_type)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "EmpID,Date,Time,Type\n7,2025-01-01,08:00,IN\n7,2025-01-01,17:00,OUT\n";

    #[test]
    fn type_column_is_dropped_on_request() {
        let projected = project_csv(CSV, false).unwrap();
        assert_eq!(
            projected,
            "EmpID,Date,Time\n7,2025-01-01,08:00\n7,2025-01-01,17:00\n"
        );
    }

    #[test]
    fn csv_is_untouched_with_type() {
        assert_eq!(project_csv(CSV, true).unwrap(), CSV);
    }

    #[test]
    fn short_rows_survive_projection() {
        let projected = project_csv("EmpID,Date,Time,Type\n8,2025-01-02,09:00\n", false).unwrap();
        assert_eq!(projected, "EmpID,Date,Time\n8,2025-01-02,09:00\n");
    }

    #[test]
    fn download_uses_csv_name_and_type() {
        let result = FingerprintResult {
            logs: Vec::new(),
            csv: CSV.to_string(),
        };
        let download = fingerprint_download(&result, false).unwrap();
        assert_eq!(download.file_name, "fingerprint_logs.csv");
        assert_eq!(download.content_type, "text/csv");
    }
}
