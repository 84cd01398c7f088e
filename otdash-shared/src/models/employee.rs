use serde::{Deserialize, Serialize};

/// An employee record as listed on the Employees screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Record identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Badge / payroll number printed on fingerprint logs.
    pub emp_id: String,
    /// Full name.
    pub name: String,
    /// Optional contact email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Soft-delete marker.
    #[serde(default)]
    pub is_deleted: bool,
    /// When the record was soft-deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deleted_at: Option<String>,
    /// Creation timestamp (ISO-8601).
    #[serde(default)]
    pub created_at: String,
}

/// The compact employee reference embedded in OT rows and lookups.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeRef {
    /// Record identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    /// Badge / payroll number.
    pub emp_id: String,
    /// Full name.
    pub name: String,
}

impl EmployeeRef {
    /// `"E042 - Jane Doe"` as shown in selects and tables.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{} - {}", self.emp_id, self.name)
    }
}

impl From<&Employee> for EmployeeRef {
    fn from(employee: &Employee) -> Self {
        Self {
            id: employee.id.clone(),
            emp_id: employee.emp_id.clone(),
            name: employee.name.clone(),
        }
    }
}

/// Payload for `POST /employees`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    /// Badge / payroll number.
    pub emp_id: String,
    /// Full name.
    pub name: String,
    /// Optional contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Payload for `PATCH /employees/{id}`. The badge number is immutable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateEmployeeRequest {
    /// Full name.
    pub name: String,
    /// Optional contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_reads_mongo_style_id() {
        let json = r#"{"_id":"e1","empId":"E042","name":"Jane Doe","createdAt":"2025-01-02T10:00:00Z"}"#;
        let employee: Employee = serde_json::from_str(json).unwrap();
        assert_eq!(employee.id, "e1");
        assert_eq!(employee.emp_id, "E042");
        assert!(!employee.is_deleted);
        assert_eq!(EmployeeRef::from(&employee).label(), "E042 - Jane Doe");
    }

    #[test]
    fn create_request_omits_missing_email() {
        let request = CreateEmployeeRequest {
            emp_id: "E1".to_string(),
            name: "A".to_string(),
            email: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["empId"], "E1");
        assert!(json.get("email").is_none());
    }
}
