//! In-memory Azure Resource Manager and Key Vault data plane.
//!
//! Implements `kvprov::http::Transport` so the real clients run unchanged
//! against it. Only the routes kvprov uses are modelled.

#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use kvprov::auth::StaticToken;
use kvprov::config::Settings;
use kvprov::errors::Result;
use kvprov::http::{HttpRequest, HttpResponse, Method, RequestBody, Transport};
use kvprov::session::Session;
use serde_json::{json, Value};

pub const ARM: &str = "https://arm.test";
pub const SUBSCRIPTION: &str = "sub-1";
pub const TENANT: &str = "72f988bf-86f1-41af-91ab-2d7cd011db47";
pub const CLIENT_ID: &str = "client-1";
pub const OPERATOR: &str = "operator-1";
pub const MGMT_TOKEN: &str = "mgmt-token";
pub const KV_TOKEN: &str = "kv-token";

#[derive(Default)]
struct State {
    groups: HashMap<String, String>,
    /// (group, vault) -> stored resource.
    vaults: BTreeMap<(String, String), Value>,
    requests: Vec<HttpRequest>,
    page_size: usize,
    list_pages_served: usize,
    fail_list_page: Option<usize>,
}

pub struct FakeAzure {
    state: Mutex<State>,
}

impl FakeAzure {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            state: Mutex::new(State {
                page_size: 2,
                ..State::default()
            }),
        })
    }

    /// Pre-create a resource group without going through the API.
    pub fn with_group(self: &Arc<Self>, name: &str, location: &str) -> Arc<Self> {
        self.state
            .lock()
            .unwrap()
            .groups
            .insert(name.to_string(), location.to_string());
        self.clone()
    }

    pub fn set_page_size(&self, size: usize) {
        self.state.lock().unwrap().page_size = size;
    }

    /// Answer the `n`th list page request (1-based, counted across all
    /// listings) with a 500.
    pub fn fail_list_page(&self, n: usize) {
        self.state.lock().unwrap().fail_list_page = Some(n);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.state.lock().unwrap().requests.clear();
    }

    pub fn count(&self, method: Method, fragment: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.url.contains(fragment))
            .count()
    }

    pub fn has_group(&self, name: &str) -> bool {
        self.state.lock().unwrap().groups.contains_key(name)
    }

    pub fn vault_count(&self) -> usize {
        self.state.lock().unwrap().vaults.len()
    }

    fn route(&self, state: &mut State, request: &HttpRequest) -> HttpResponse {
        let (base, query) = split_query(&request.url);

        if let Some(path) = base.strip_prefix(ARM) {
            if !bearer_is(request, MGMT_TOKEN) {
                return error(401, "InvalidAuthenticationToken", "management token required");
            }
            return self.route_arm(state, request, path, query);
        }

        if base.contains(".vault.test/") {
            if !bearer_is(request, KV_TOKEN) {
                return error(401, "Unauthorized", "vault-scoped token required");
            }
            return create_key(state, request, base);
        }

        error(404, "NoRoute", &format!("no route for {}", request.url))
    }

    fn route_arm(
        &self,
        state: &mut State,
        request: &HttpRequest,
        path: &str,
        query: &str,
    ) -> HttpResponse {
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        if segments.len() < 2 || segments[0] != "subscriptions" || segments[1] != SUBSCRIPTION {
            return error(404, "SubscriptionNotFound", "unknown subscription");
        }

        match (&request.method, &segments[2..]) {
            (Method::Put, [rg, group]) if rg.eq_ignore_ascii_case("resourcegroups") => {
                let location = json_body(request)["location"].as_str().unwrap_or("").to_string();
                state.groups.insert(group.to_string(), location.clone());
                HttpResponse::new(
                    201,
                    json!({
                        "id": format!("/subscriptions/{SUBSCRIPTION}/resourceGroups/{group}"),
                        "name": group,
                        "location": location,
                    })
                    .to_string(),
                )
            }
            (Method::Delete, [rg, group]) if rg.eq_ignore_ascii_case("resourcegroups") => {
                if state.groups.remove(*group).is_none() {
                    return error(404, "ResourceGroupNotFound", "group not found");
                }
                state.vaults.retain(|(g, _), _| g != group);
                HttpResponse::new(202, "")
            }
            (Method::Get, ["providers", "Microsoft.KeyVault", "vaults"]) => {
                let all: Vec<Value> = state.vaults.values().cloned().collect();
                list_page(state, request, all, query)
            }
            (Method::Get, [rg, group, "providers", "Microsoft.KeyVault", "vaults"])
                if rg.eq_ignore_ascii_case("resourcegroups") =>
            {
                let in_group: Vec<Value> = state
                    .vaults
                    .iter()
                    .filter(|((g, _), _)| g == group)
                    .map(|(_, v)| v.clone())
                    .collect();
                list_page(state, request, in_group, query)
            }
            (method, [rg, group, "providers", "Microsoft.KeyVault", "vaults", name])
                if rg.eq_ignore_ascii_case("resourcegroups") =>
            {
                vault_route(state, method, request, group, name)
            }
            _ => error(404, "NoRoute", path),
        }
    }
}

impl Transport for FakeAzure {
    fn send(&self, request: &HttpRequest) -> Result<HttpResponse> {
        let mut state = self.state.lock().unwrap();
        state.requests.push(request.clone());
        Ok(self.route(&mut state, request))
    }
}

fn vault_route(
    state: &mut State,
    method: &Method,
    request: &HttpRequest,
    group: &str,
    name: &str,
) -> HttpResponse {
    let key = (group.to_string(), name.to_string());
    match method {
        Method::Put => {
            if !state.groups.contains_key(group) {
                return error(404, "ResourceGroupNotFound", "group not found");
            }
            let body = json_body(request);
            let mut properties = body["properties"].clone();
            properties["vaultUri"] = json!(format!("https://{name}.vault.test/"));
            let vault = json!({
                "id": format!(
                    "/subscriptions/{SUBSCRIPTION}/resourceGroups/{group}/providers/Microsoft.KeyVault/vaults/{name}"
                ),
                "name": name,
                "type": "Microsoft.KeyVault/vaults",
                "location": body["location"],
                "tags": body.get("tags").cloned().unwrap_or_else(|| json!({})),
                "properties": properties,
            });
            let status = if state.vaults.contains_key(&key) { 200 } else { 201 };
            state.vaults.insert(key, vault.clone());
            HttpResponse::new(status, vault.to_string())
        }
        Method::Get => match state.vaults.get(&key) {
            Some(vault) => HttpResponse::new(200, vault.to_string()),
            None => error(404, "ResourceNotFound", &format!("vault '{name}' was not found")),
        },
        Method::Delete => match state.vaults.remove(&key) {
            Some(_) => HttpResponse::new(200, ""),
            None => HttpResponse::new(204, ""),
        },
        Method::Post => error(405, "MethodNotAllowed", "POST on vault"),
    }
}

fn list_page(
    state: &mut State,
    request: &HttpRequest,
    items: Vec<Value>,
    query: &str,
) -> HttpResponse {
    state.list_pages_served += 1;
    if state.fail_list_page == Some(state.list_pages_served) {
        return error(500, "InternalServerError", "page unavailable");
    }

    let skip: usize = query_param(query, "$skiptoken")
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let end = (skip + state.page_size).min(items.len());
    let page: Vec<Value> = items.get(skip..end).map(<[Value]>::to_vec).unwrap_or_default();

    let mut body = json!({ "value": page });
    if end < items.len() {
        let base_query: Vec<&str> = query
            .split('&')
            .filter(|p| !p.starts_with("$skiptoken="))
            .collect();
        let (path, _) = split_query(&request.url);
        body["nextLink"] = json!(format!("{path}?{}&$skiptoken={end}", base_query.join("&")));
    }
    HttpResponse::new(200, body.to_string())
}

fn create_key(state: &mut State, request: &HttpRequest, url: &str) -> HttpResponse {
    if request.method != Method::Post {
        return error(405, "MethodNotAllowed", "keys create requires POST");
    }
    let rest = url.trim_start_matches("https://");
    let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
    let vault_name = host.split('.').next().unwrap_or("");
    let segments: Vec<&str> = path.split('/').collect();
    let key_name = match segments.as_slice() {
        ["keys", name, "create"] => *name,
        _ => return error(404, "NoRoute", path),
    };

    let Some(vault) = state
        .vaults
        .iter()
        .find(|((_, v), _)| v == vault_name)
        .map(|(_, v)| v)
    else {
        return error(404, "VaultNotFound", vault_name);
    };

    let can_create = vault["properties"]["accessPolicies"]
        .as_array()
        .into_iter()
        .flatten()
        .filter(|p| p["objectId"] == CLIENT_ID)
        .any(|p| {
            p["permissions"]["keys"]
                .as_array()
                .is_some_and(|keys| keys.iter().any(|k| k == "create"))
        });
    if !can_create {
        return error(
            403,
            "Forbidden",
            &format!("caller {CLIENT_ID} does not have keys create permission on {vault_name}"),
        );
    }

    let body = json_body(request);
    HttpResponse::new(
        200,
        json!({
            "key": {
                "kid": format!("https://{vault_name}.vault.test/keys/{key_name}/0123456789abcdef"),
                "kty": body["kty"],
                "key_ops": body["key_ops"],
                "n": "u1Xy",
                "e": "AQAB",
            },
            "attributes": {
                "enabled": true,
                "created": 1_700_000_000,
                "updated": 1_700_000_000,
                "recoveryLevel": "Purgeable",
            },
        })
        .to_string(),
    )
}

fn bearer_is(request: &HttpRequest, token: &str) -> bool {
    request
        .header_value("Authorization")
        .and_then(|v| v.strip_prefix("Bearer "))
        == Some(token)
}

fn json_body(request: &HttpRequest) -> Value {
    match &request.body {
        RequestBody::Json(v) => v.clone(),
        _ => Value::Null,
    }
}

fn split_query(url: &str) -> (&str, &str) {
    url.split_once('?').unwrap_or((url, ""))
}

fn query_param<'a>(query: &'a str, name: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}

fn error(status: u16, code: &str, message: &str) -> HttpResponse {
    HttpResponse::new(
        status,
        json!({ "error": { "code": code, "message": message } }).to_string(),
    )
}

pub fn settings(group: &str) -> Settings {
    Settings {
        subscription_id: SUBSCRIPTION.into(),
        tenant_id: TENANT.into(),
        client_id: CLIENT_ID.into(),
        group_name: group.into(),
        location: "westus2".into(),
        operator_object_id: OPERATOR.into(),
        management_endpoint: ARM.into(),
        ..Settings::default()
    }
}

pub fn session(fake: &Arc<FakeAzure>, settings: Settings) -> Session {
    Session::with_authorizers(
        settings,
        fake.clone(),
        Arc::new(StaticToken::new(MGMT_TOKEN)),
        Arc::new(StaticToken::new(KV_TOKEN)),
    )
    .expect("valid test settings")
}
