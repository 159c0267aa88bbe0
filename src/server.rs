use crate::config::Config;
use crate::defaults::{DefaultKind, DefaultsMap, DEFAULT_OBJECT_NAME};
use crate::error::{MetadataError, Result};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info};

/// Response of `api/system/info.json`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    pub version: String,
    #[serde(default)]
    pub system_name: String,
}

/// Authenticated client for the target server's web API.
///
/// Requests are sent one at a time with the transport's default timeout and
/// no retries; a failure aborts the operation that issued it.
pub struct ServerClient {
    client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl ServerClient {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.server_url.trim_end_matches('/').to_string(),
            username: config.username.clone(),
            password: config.password.clone(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base}/api/{resource}` with `paging=false` and the given filter.
    async fn get_json(&self, resource: &str, filter: Option<&str>) -> Result<Value> {
        let url = format!("{}/api/{}", self.base_url, resource);

        let mut request = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password));
        if let Some(filter) = filter {
            request = request.query(&[("filter", filter)]);
        }
        request = request.query(&[("paging", "false")]);

        debug!("GET {}", url);
        let response = request
            .send()
            .await
            .map_err(|e| MetadataError::ServerUnreachable {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED => return Err(MetadataError::BadCredentials),
            StatusCode::NOT_FOUND => {
                return Err(MetadataError::ServerUnreachable {
                    url,
                    reason: "404 Not Found - server not found or not running".to_string(),
                })
            }
            status => {
                return Err(MetadataError::ServerError {
                    url,
                    status: status.as_u16(),
                })
            }
        }

        let body = response
            .text()
            .await
            .map_err(|e| MetadataError::ServerUnreachable {
                url: url.clone(),
                reason: e.to_string(),
            })?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Check connectivity and credentials.
    pub async fn system_info(&self) -> Result<SystemInfo> {
        let value = self.get_json("system/info.json", None).await?;
        let info: SystemInfo = serde_json::from_value(value)?;
        info!("Connected to {}, DHIS2 {}", info.system_name, info.version);
        Ok(info)
    }

    /// Identifier of the single object named "default" of `kind`.
    ///
    /// # Errors
    /// `AmbiguousDefault` unless exactly one object matches.
    pub async fn default_id(&self, kind: DefaultKind) -> Result<String> {
        let resource = format!("{}.json", kind.type_name());
        let filter = format!("name:eq:{}", DEFAULT_OBJECT_NAME);
        let data = self.get_json(&resource, Some(&filter)).await?;

        let matches = data
            .get(kind.type_name())
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default();
        match matches {
            [single] => single
                .get("id")
                .and_then(Value::as_str)
                .map(str::to_string)
                .ok_or(MetadataError::AmbiguousDefault { kind, found: 0 }),
            other => Err(MetadataError::AmbiguousDefault {
                kind,
                found: other.len(),
            }),
        }
    }
}

/// Query the default identifier of every category type, in substitution order.
///
/// Stops at the first type that cannot be resolved.
pub async fn resolve_server_defaults(client: &ServerClient) -> Result<DefaultsMap> {
    let mut defaults = DefaultsMap::default();
    for kind in DefaultKind::SUBSTITUTION_ORDER {
        let id = client.default_id(kind).await?;
        defaults.set(kind, Some(id));
    }
    info!("Defaults on server: {}", defaults);
    Ok(defaults)
}
