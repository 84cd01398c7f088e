use serde::Serialize;
use shared::models::{CreateEmployeeRequest, Employee, Page, UpdateEmployeeRequest};

use super::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::transport::ApiRequest;

/// Filters for `GET /employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub include_deleted: bool,
}

impl Default for EmployeeQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            search: None,
            include_deleted: false,
        }
    }
}

impl ApiClient {
    pub async fn list_employees(&self, query: &EmployeeQuery) -> ClientResult<Page<Employee>> {
        self.fetch(ApiRequest::get("/employees").query(query)?).await
    }

    /// Every active employee, for selects and filters.
    pub async fn employee_lookup(&self) -> ClientResult<Vec<Employee>> {
        let query = EmployeeQuery {
            limit: self.config().lookup_limit,
            ..EmployeeQuery::default()
        };
        Ok(self.list_employees(&query).await?.items)
    }

    pub async fn create_employee(&self, request: &CreateEmployeeRequest) -> ClientResult<Employee> {
        if request.emp_id.trim().is_empty() || request.name.trim().is_empty() {
            return Err(ClientError::invalid("Employee ID and name are required"));
        }
        self.fetch(ApiRequest::post("/employees").json(request)?).await
    }

    pub async fn update_employee(
        &self,
        id: &str,
        request: &UpdateEmployeeRequest,
    ) -> ClientResult<()> {
        if request.name.trim().is_empty() {
            return Err(ClientError::invalid("Name is required"));
        }
        self.send_unit(ApiRequest::patch(format!("/employees/{id}")).json(request)?)
            .await
    }

    /// Soft delete; the record stays listed with `includeDeleted`.
    pub async fn delete_employee(&self, id: &str) -> ClientResult<()> {
        self.send_unit(ApiRequest::patch(format!("/employees/{id}/delete")))
            .await
    }

    pub async fn restore_employee(&self, id: &str) -> ClientResult<()> {
        self.send_unit(ApiRequest::patch(format!("/employees/{id}/restore")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn include_deleted_is_sent_only_when_set() {
        let request = ApiRequest::get("/employees").query(&EmployeeQuery::default()).unwrap();
        assert_eq!(request.query_value("includeDeleted"), None);
        assert_eq!(request.query_value("limit"), Some("20"));

        let query = EmployeeQuery {
            include_deleted: true,
            search: Some("jane".to_string()),
            ..EmployeeQuery::default()
        };
        let request = ApiRequest::get("/employees").query(&query).unwrap();
        assert_eq!(request.query_value("includeDeleted"), Some("true"));
        assert_eq!(request.query_value("search"), Some("jane"));
    }
}
