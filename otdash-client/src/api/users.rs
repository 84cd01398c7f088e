use serde::Serialize;
use shared::models::{
    Account, CreateAccountRequest, Page, ResetPasswordRequest, SetActiveRequest,
    UpdateAccountRequest,
};

use super::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::transport::ApiRequest;

pub const MIN_PASSWORD_LEN: usize = 8;

/// Filters for `GET /users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl Default for UserQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 20,
            search: None,
            role_id: None,
            is_active: None,
        }
    }
}

fn check_password(password: &str) -> ClientResult<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ClientError::invalid(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}

impl ApiClient {
    pub async fn list_users(&self, query: &UserQuery) -> ClientResult<Page<Account>> {
        self.fetch(ApiRequest::get("/users").query(query)?).await
    }

    pub async fn create_user(&self, request: &CreateAccountRequest) -> ClientResult<()> {
        if request.email.trim().is_empty() || request.username.trim().is_empty() {
            return Err(ClientError::invalid("Email and username are required"));
        }
        if request.role_id.is_empty() {
            return Err(ClientError::invalid("Select a role"));
        }
        check_password(&request.password)?;
        self.send_unit(ApiRequest::post("/users").json(request)?)
            .await
    }

    pub async fn update_user(&self, id: &str, request: &UpdateAccountRequest) -> ClientResult<()> {
        self.send_unit(ApiRequest::patch(format!("/users/{id}")).json(request)?)
            .await
    }

    pub async fn set_user_active(&self, id: &str, is_active: bool) -> ClientResult<()> {
        self.send_unit(
            ApiRequest::patch(format!("/users/{id}")).json(&SetActiveRequest { is_active })?,
        )
        .await
    }

    pub async fn reset_user_password(&self, id: &str, password: &str) -> ClientResult<()> {
        check_password(password)?;
        let request = ResetPasswordRequest {
            password: password.to_string(),
        };
        self.send_unit(ApiRequest::patch(format!("/users/{id}/password")).json(&request)?)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_passwords_are_rejected() {
        assert!(check_password("1234567").is_err());
        assert!(check_password("12345678").is_ok());
    }

    #[test]
    fn active_filter_serializes_as_bool_text() {
        let query = UserQuery {
            is_active: Some(false),
            role_id: Some("r1".to_string()),
            ..UserQuery::default()
        };
        let request = ApiRequest::get("/users").query(&query).unwrap();
        assert_eq!(request.query_value("isActive"), Some("false"));
        assert_eq!(request.query_value("roleId"), Some("r1"));
        assert_eq!(request.query_value("search"), None);
    }
}
