use shared::models::{Page, Permission, RoleRecord, RoleRequest};

use super::ApiClient;
use crate::error::{ClientError, ClientResult};
use crate::transport::ApiRequest;

impl ApiClient {
    pub async fn list_roles(&self) -> ClientResult<Vec<RoleRecord>> {
        let page: Page<RoleRecord> = self.fetch(ApiRequest::get("/roles")).await?;
        Ok(page.items)
    }

    /// Every permission token the server knows about.
    pub async fn list_permissions(&self) -> ClientResult<Vec<Permission>> {
        let page: Page<Permission> = self.fetch(ApiRequest::get("/roles/permissions")).await?;
        Ok(page.items)
    }

    /// Create a role with no permissions.
    pub async fn create_role(&self, name: &str) -> ClientResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ClientError::invalid("Role name is required"));
        }
        let request = RoleRequest {
            name: name.to_string(),
            permissions: Vec::new(),
        };
        self.send_unit(ApiRequest::post("/roles").json(&request)?)
            .await
    }

    /// Replace the role's name and full permission set.
    pub async fn update_role(&self, role: &RoleRecord) -> ClientResult<()> {
        let request = RoleRequest {
            name: role.name.clone(),
            permissions: role.permissions.iter().cloned().collect(),
        };
        self.send_unit(ApiRequest::patch(format!("/roles/{}", role.id)).json(&request)?)
            .await
    }
}
