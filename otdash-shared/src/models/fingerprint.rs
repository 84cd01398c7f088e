use serde::{Deserialize, Serialize};

/// Punch direction recorded by the fingerprint terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum PunchType {
    In,
    Out,
}

/// One parsed punch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct FingerprintLog {
    pub emp_id: String,
    pub date: String,
    pub time: String,
    #[serde(rename = "type", default)]
    pub punch: Option<PunchType>,
}

/// Body of `/fingerprint/process`: parsed rows plus the server-rendered CSV.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FingerprintResult {
    #[serde(default)]
    pub logs: Vec<FingerprintLog>,
    #[serde(default)]
    pub csv: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn punch_type_is_optional() {
        let json = r#"{"logs":[{"empId":"7","date":"2025-01-01","time":"08:00","type":"IN"},
            {"empId":"7","date":"2025-01-01","time":"17:00"}],"csv":"EmpID,Date,Time\n"}"#;
        let result: FingerprintResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.logs[0].punch, Some(PunchType::In));
        assert_eq!(result.logs[1].punch, None);
    }
}
