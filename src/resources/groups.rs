use serde::{Deserialize, Serialize};

use crate::errors::{KvError, Result};
use crate::http::{ApiClient, Method, RequestBody};

/// ARM API version of resource groups.
pub const GROUPS_API_VERSION: &str = "2021-04-01";

/// A resource group as returned by ARM.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceGroup {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    pub location: String,
}

/// Binding for resource groups in one subscription.
#[derive(Clone)]
pub struct GroupsClient {
    api: ApiClient,
    endpoint: String,
    subscription_id: String,
}

impl GroupsClient {
    pub fn new(api: ApiClient, endpoint: &str, subscription_id: &str) -> Self {
        Self {
            api,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            subscription_id: subscription_id.to_string(),
        }
    }

    fn group_url(&self, name: &str) -> String {
        format!(
            "{}/subscriptions/{}/resourcegroups/{name}?api-version={GROUPS_API_VERSION}",
            self.endpoint, self.subscription_id
        )
    }

    /// Create or update a resource group in `location`.
    pub fn create_group(&self, name: &str, location: &str) -> Result<ResourceGroup> {
        if name.trim().is_empty() {
            return Err(KvError::InvalidArgument("resource group name cannot be empty".into()));
        }
        let body = serde_json::json!({ "location": location });
        let group = self
            .api
            .call(Method::Put, &self.group_url(name), RequestBody::Json(body))?;
        tracing::info!(group = name, location, "resource group created");
        Ok(group)
    }

    /// Start deleting a resource group and everything in it.
    ///
    /// Returns the acknowledgment status (usually 202). Completion is not
    /// awaited.
    pub fn delete_group(&self, name: &str) -> Result<u16> {
        if name.trim().is_empty() {
            return Err(KvError::InvalidArgument("resource group name cannot be empty".into()));
        }
        let status = self
            .api
            .call_status(Method::Delete, &self.group_url(name), RequestBody::Empty)?;
        tracing::info!(group = name, status, "resource group deletion accepted");
        Ok(status)
    }
}
