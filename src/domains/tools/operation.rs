//! Declarative REST operation descriptors.
//!
//! Most tools are a single REST call: a verb, a path template and a handful
//! of arguments. [`RestOperation`] captures that mapping as data and turns
//! into a [`ToolEntry`] with a generated JSON schema.

use serde_json::{Value, json};
use std::sync::Arc;

use super::entry::{Arguments, Completion, InvocationContext, Operation, ToolEntry};
use super::error::ToolError;
use crate::domains::client::{ApiRequest, HttpMethod, WorkspaceClient};

/// Upper bound on pages fetched for one list call.
const MAX_PAGES: usize = 50;

/// JSON type of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array,
}

impl ParamType {
    fn schema_name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Number => "number",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_i64() || value.is_u64(),
            Self::Number => value.is_number(),
            Self::Boolean => value.is_boolean(),
            Self::Object => value.is_object(),
            Self::Array => value.is_array(),
        }
    }
}

/// Where a parameter travels when it is not a path placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Query,
    Body,
}

/// One tool argument.
#[derive(Debug, Clone)]
pub struct Param {
    name: &'static str,
    ty: ParamType,
    description: &'static str,
    required: bool,
    default: Option<Value>,
    api_name: Option<&'static str>,
    location: Option<ParamLocation>,
    keep_slashes: bool,
}

impl Param {
    fn new(name: &'static str, ty: ParamType, description: &'static str) -> Self {
        Self {
            name,
            ty,
            description,
            required: true,
            default: None,
            api_name: None,
            location: None,
            keep_slashes: false,
        }
    }

    pub fn string(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::String, description)
    }

    pub fn integer(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Integer, description)
    }

    pub fn number(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Number, description)
    }

    pub fn boolean(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Boolean, description)
    }

    pub fn object(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Object, description)
    }

    pub fn array(name: &'static str, description: &'static str) -> Self {
        Self::new(name, ParamType::Array, description)
    }

    /// Mark the parameter as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Optional parameter with a default sent when the caller omits it.
    pub fn default(mut self, value: Value) -> Self {
        self.required = false;
        self.default = Some(value);
        self
    }

    /// Field name used on the wire when it differs from the tool argument.
    pub fn api_name(mut self, name: &'static str) -> Self {
        self.api_name = Some(name);
        self
    }

    /// Force the parameter into the query string.
    pub fn in_query(mut self) -> Self {
        self.location = Some(ParamLocation::Query);
        self
    }

    /// Substitute the value into the path as a multi-segment path (`/`
    /// is kept, everything else is still percent-encoded).
    pub fn keep_slashes(mut self) -> Self {
        self.keep_slashes = true;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    fn wire_name(&self) -> &'static str {
        self.api_name.unwrap_or(self.name)
    }

    /// Resolve the value for this parameter from the call arguments.
    ///
    /// Missing, null and empty-string values count as absent; absent
    /// optional parameters fall back to their default.
    fn resolve(&self, args: &Arguments) -> Result<Option<Value>, ToolError> {
        let provided = args
            .get(self.name)
            .filter(|v| !v.is_null())
            .filter(|v| v.as_str().map(|s| !s.is_empty()).unwrap_or(true));

        match provided {
            Some(value) => {
                let value = self.coerce(value)?;
                Ok(Some(value))
            }
            None if self.required => Err(ToolError::invalid_arguments(format!(
                "missing required argument '{}'",
                self.name
            ))),
            None => Ok(self.default.clone()),
        }
    }

    /// Check the JSON type, accepting integral floats for integers.
    fn coerce(&self, value: &Value) -> Result<Value, ToolError> {
        if self.ty.accepts(value) {
            return Ok(value.clone());
        }
        if self.ty == ParamType::Integer {
            // `as` saturates, so out-of-range floats are rejected first.
            if let Some(f) = value
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i64::MIN as f64 && *f < i64::MAX as f64)
            {
                return Ok(json!(f as i64));
            }
        }
        Err(ToolError::invalid_arguments(format!(
            "argument '{}' must be of type {}",
            self.name,
            self.ty.schema_name()
        )))
    }

    fn schema(&self) -> Value {
        let mut schema = json!({
            "type": self.ty.schema_name(),
            "description": self.description,
        });
        if let Some(default) = &self.default {
            schema["default"] = default.clone();
        }
        schema
    }
}

/// Shape of a successful response.
#[derive(Debug, Clone)]
pub enum ResponseShape {
    /// Return the payload as-is.
    Object,
    /// Collect `items_key` across `next_page_token` pages.
    List { items_key: &'static str },
    /// Return a confirmation message with `{param}` placeholders filled in
    /// from the arguments or the response.
    Acknowledge(&'static str),
}

/// Post-processing of the collected body fields.
pub type BodyBuilder = fn(Arguments) -> Result<Value, ToolError>;

/// A REST-backed tool operation.
#[derive(Debug, Clone)]
pub struct RestOperation {
    name: &'static str,
    description: &'static str,
    method: HttpMethod,
    path: &'static str,
    params: Vec<Param>,
    fixed: Vec<(&'static str, Value)>,
    body_builder: Option<BodyBuilder>,
    shape: ResponseShape,
    completion: Completion,
}

impl RestOperation {
    pub fn new(method: HttpMethod, name: &'static str, path: &'static str) -> Self {
        Self {
            name,
            description: "",
            method,
            path,
            params: Vec::new(),
            fixed: Vec::new(),
            body_builder: None,
            shape: ResponseShape::Object,
            completion: Completion::Immediate,
        }
    }

    pub fn get(name: &'static str, path: &'static str) -> Self {
        Self::new(HttpMethod::Get, name, path)
    }

    pub fn post(name: &'static str, path: &'static str) -> Self {
        Self::new(HttpMethod::Post, name, path)
    }

    pub fn put(name: &'static str, path: &'static str) -> Self {
        Self::new(HttpMethod::Put, name, path)
    }

    pub fn patch(name: &'static str, path: &'static str) -> Self {
        Self::new(HttpMethod::Patch, name, path)
    }

    pub fn delete(name: &'static str, path: &'static str) -> Self {
        Self::new(HttpMethod::Delete, name, path)
    }

    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }

    pub fn param(mut self, param: Param) -> Self {
        self.params.push(param);
        self
    }

    /// Constant field sent with every call.
    pub fn fixed(mut self, key: &'static str, value: Value) -> Self {
        self.fixed.push((key, value));
        self
    }

    pub fn body_with(mut self, builder: BodyBuilder) -> Self {
        self.body_builder = Some(builder);
        self
    }

    pub fn list(mut self, items_key: &'static str) -> Self {
        self.shape = ResponseShape::List { items_key };
        self
    }

    pub fn acknowledge(mut self, template: &'static str) -> Self {
        self.shape = ResponseShape::Acknowledge(template);
        self
    }

    /// Declare the call as fire-and-report: it only starts remote work.
    pub fn started(mut self) -> Self {
        self.completion = Completion::Started;
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn params(&self) -> &[Param] {
        &self.params
    }

    pub fn completion(&self) -> Completion {
        self.completion
    }

    /// JSON schema for the tool arguments.
    pub fn input_schema(&self) -> rmcp::model::JsonObject {
        params_schema(&self.params)
    }

    /// Wrap this operation into a registry entry owned by `module`.
    pub fn into_entry(self, module: &'static str) -> ToolEntry {
        let name = self.name;
        let description = self.description;
        let completion = self.completion;
        let schema = Arc::new(self.input_schema());
        ToolEntry::new(name, module, description, schema, completion, Arc::new(self))
    }

    /// Resolve arguments into a concrete request.
    pub fn build_request(&self, args: &Arguments) -> Result<ApiRequest, ToolError> {
        let mut path = self.path.to_string();
        let mut request_query = Vec::new();
        let mut body = Arguments::new();
        let default_location = if self.method.uses_query() {
            ParamLocation::Query
        } else {
            ParamLocation::Body
        };

        for param in &self.params {
            let Some(value) = param.resolve(args)? else {
                continue;
            };

            let placeholder = format!("{{{}}}", param.name);
            if path.contains(&placeholder) {
                let text = scalar_text(&value);
                let encoded = if param.keep_slashes {
                    text.split('/').map(encode_segment).collect::<Vec<_>>().join("/")
                } else {
                    encode_segment(&text)
                };
                path = path.replace(&placeholder, &encoded);
                continue;
            }

            match param.location.unwrap_or(default_location) {
                ParamLocation::Query => {
                    request_query.push((param.wire_name().to_string(), scalar_text(&value)))
                }
                ParamLocation::Body => {
                    body.insert(param.wire_name().to_string(), value);
                }
            }
        }

        for (key, value) in &self.fixed {
            match default_location {
                ParamLocation::Query => request_query.push((key.to_string(), scalar_text(value))),
                ParamLocation::Body => {
                    body.insert(key.to_string(), value.clone());
                }
            }
        }

        let mut request = ApiRequest::new(self.method, path);
        request.query = request_query;
        request.body = match self.body_builder {
            Some(builder) => Some(builder(body)?),
            None if default_location == ParamLocation::Body => Some(Value::Object(body)),
            None if !body.is_empty() => Some(Value::Object(body)),
            None => None,
        };
        Ok(request)
    }

    /// Fill `{name}` placeholders from the arguments, then from top-level
    /// fields of the response (e.g. a `run_id` assigned by the server).
    fn acknowledge_text(&self, template: &str, args: &Arguments, response: &Value) -> String {
        let text = self.params.iter().fold(template.to_string(), |text, param| {
            let value = args.get(param.name).map(scalar_text).unwrap_or_default();
            text.replace(&format!("{{{}}}", param.name), &value)
        });
        match response.as_object() {
            Some(fields) => fields.iter().fold(text, |text, (key, value)| {
                text.replace(&format!("{{{}}}", key), &scalar_text(value))
            }),
            None => text,
        }
    }
}

impl Operation for RestOperation {
    fn invoke(&self, ctx: &InvocationContext, args: &Arguments) -> Result<Value, ToolError> {
        let request = self.build_request(args)?;
        let client = ctx.client()?;

        match &self.shape {
            ResponseShape::Object => Ok(client.execute(&request)?),
            ResponseShape::List { items_key } => {
                collect_pages(client.as_ref(), request, items_key, ctx.max_items())
            }
            ResponseShape::Acknowledge(template) => {
                let response = client.execute(&request)?;
                Ok(Value::String(self.acknowledge_text(template, args, &response)))
            }
        }
    }
}

/// JSON schema object describing a parameter list.
pub fn params_schema(params: &[Param]) -> rmcp::model::JsonObject {
    let properties: serde_json::Map<String, Value> = params
        .iter()
        .map(|p| (p.name.to_string(), p.schema()))
        .collect();
    let required: Vec<&str> = params
        .iter()
        .filter(|p| p.required)
        .map(|p| p.name)
        .collect();

    let mut schema = rmcp::model::JsonObject::new();
    schema.insert("type".into(), json!("object"));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert("required".into(), json!(required));
    }
    schema
}

/// Check call arguments against a parameter list and fill in defaults.
///
/// The result only holds declared parameters that resolved to a value.
pub fn resolve_params(params: &[Param], args: &Arguments) -> Result<Arguments, ToolError> {
    let mut resolved = Arguments::new();
    for param in params {
        if let Some(value) = param.resolve(args)? {
            resolved.insert(param.name.to_string(), value);
        }
    }
    Ok(resolved)
}

/// Follow `next_page_token` until the items run out or `max_items` is reached.
pub fn collect_pages(
    client: &dyn WorkspaceClient,
    mut request: ApiRequest,
    items_key: &str,
    max_items: usize,
) -> Result<Value, ToolError> {
    let mut items: Vec<Value> = Vec::new();
    let mut truncated = false;
    let mut more_pages = false;

    for _ in 0..MAX_PAGES {
        let page = client.execute(&request)?;
        if let Some(batch) = page.get(items_key).and_then(Value::as_array) {
            items.extend(batch.iter().cloned());
        }

        if items.len() > max_items {
            items.truncate(max_items);
            truncated = true;
            break;
        }

        let next = page
            .get("next_page_token")
            .and_then(Value::as_str)
            .filter(|t| !t.is_empty());
        match next {
            Some(_) if items.len() == max_items => {
                truncated = true;
                break;
            }
            Some(token) => {
                set_page_token(&mut request, token);
                more_pages = true;
            }
            None => {
                more_pages = false;
                break;
            }
        }
    }
    // Page cap reached with a token still pending.
    truncated |= more_pages;

    let count = items.len();
    let mut result = serde_json::Map::new();
    result.insert(items_key.to_string(), Value::Array(items));
    result.insert("count".into(), json!(count));
    result.insert("truncated".into(), json!(truncated));
    Ok(Value::Object(result))
}

fn set_page_token(request: &mut ApiRequest, token: &str) {
    if request.method.uses_query() {
        request.set_query("page_token", token);
    } else if let Some(Value::Object(body)) = request.body.as_mut() {
        body.insert("page_token".into(), json!(token));
    } else {
        request.body = Some(json!({ "page_token": token }));
    }
}

/// Textual form of a scalar for paths and query strings.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Percent-encode a path segment (RFC 3986 unreserved characters pass through).
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

/// Convenience for building argument maps.
pub fn arguments(value: Value) -> Arguments {
    match value {
        Value::Object(map) => map,
        _ => Arguments::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::client::testing::MockClient;
    use crate::domains::client::RemoteError;

    fn get_warehouse() -> RestOperation {
        RestOperation::get("databricks_get_warehouse", "/api/2.0/sql/warehouses/{id}")
            .describe("Get a warehouse.")
            .param(Param::string("id", "Warehouse id"))
    }

    #[test]
    fn test_path_placeholder_is_filled_and_encoded() {
        let req = get_warehouse()
            .build_request(&arguments(json!({"id": "a b/c"})))
            .unwrap();
        assert_eq!(req.path, "/api/2.0/sql/warehouses/a%20b%2Fc");
        assert!(req.query.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn test_multi_segment_path() {
        let op = RestOperation::get("databricks_list_volume_directory", "/api/2.0/fs/directories{path}")
            .param(Param::string("path", "Directory").keep_slashes());
        let req = op
            .build_request(&arguments(json!({"path": "/Volumes/main/raw/my files"})))
            .unwrap();
        assert_eq!(req.path, "/api/2.0/fs/directories/Volumes/main/raw/my%20files");
    }

    #[test]
    fn test_missing_required_argument() {
        let err = get_warehouse().build_request(&Arguments::new()).unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments(_)));
        assert!(err.to_string().contains("'id'"));
    }

    #[test]
    fn test_type_mismatch_is_rejected() {
        let op = RestOperation::post("x", "/api/x").param(Param::integer("n", "n"));
        assert!(op.build_request(&arguments(json!({"n": "ten"}))).is_err());
        let req = op.build_request(&arguments(json!({"n": 10.0}))).unwrap();
        assert_eq!(req.body, Some(json!({"n": 10})));
    }

    #[test]
    fn test_body_defaults_fixed_and_empty_strings() {
        let op = RestOperation::post("databricks_create_catalog", "/api/2.1/unity-catalog/catalogs")
            .param(Param::string("name", "Catalog name"))
            .param(Param::string("comment", "Comment").optional())
            .param(Param::integer("auto_stop_mins", "Minutes").default(json!(15)))
            .fixed("enable_serverless_compute", json!(true));
        let req = op
            .build_request(&arguments(json!({"name": "main", "comment": ""})))
            .unwrap();
        assert_eq!(
            req.body,
            Some(json!({"name": "main", "auto_stop_mins": 15, "enable_serverless_compute": true}))
        );
    }

    #[test]
    fn test_get_arguments_go_to_query_with_api_name() {
        let op = RestOperation::get("databricks_list_users", "/api/2.0/preview/scim/v2/Users")
            .param(Param::string("filter_str", "SCIM filter").optional().api_name("filter"))
            .param(Param::integer("count", "Page size").default(json!(100)));
        let req = op
            .build_request(&arguments(json!({"filter_str": "userName eq \"a\""})))
            .unwrap();
        assert_eq!(
            req.query,
            vec![
                ("filter".to_string(), "userName eq \"a\"".to_string()),
                ("count".to_string(), "100".to_string())
            ]
        );
    }

    #[test]
    fn test_schema_lists_required_params() {
        let schema = get_warehouse().input_schema();
        assert_eq!(schema["type"], json!("object"));
        assert_eq!(schema["required"], json!(["id"]));
        assert_eq!(schema["properties"]["id"]["type"], json!("string"));
    }

    #[test]
    fn test_list_follows_pages_and_truncates() {
        let client = MockClient::new();
        let op = RestOperation::get("databricks_list_jobs", "/api/2.1/jobs/list").list("jobs");
        let first = json!({"jobs": [{"job_id": 1}, {"job_id": 2}], "next_page_token": "p2"});
        let second = json!({"jobs": [{"job_id": 3}, {"job_id": 4}], "next_page_token": "p3"});
        let client = client
            .respond(HttpMethod::Get, "/api/2.1/jobs/list", first)
            .respond(HttpMethod::Get, "/api/2.1/jobs/list", second);

        let request = op.build_request(&Arguments::new()).unwrap();
        let value = collect_pages(&client, request, "jobs", 3).unwrap();
        assert_eq!(value["count"], json!(3));
        assert_eq!(value["truncated"], json!(true));
        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(
            calls[1].query,
            vec![("page_token".to_string(), "p2".to_string())]
        );
    }

    #[test]
    fn test_page_cap_reports_truncated() {
        let batch: Vec<Value> = (0..20).map(|i| json!({"job_id": i})).collect();
        let client = MockClient::new().respond(
            HttpMethod::Get,
            "/api/2.1/jobs/list",
            json!({"jobs": batch, "next_page_token": "more"}),
        );
        let op = RestOperation::get("databricks_list_jobs", "/api/2.1/jobs/list").list("jobs");

        let request = op.build_request(&Arguments::new()).unwrap();
        let value = collect_pages(&client, request, "jobs", 5000).unwrap();
        assert_eq!(client.calls().len(), MAX_PAGES);
        assert_eq!(value["count"], json!(MAX_PAGES * 20));
        assert_eq!(value["truncated"], json!(true));
    }

    #[test]
    fn test_last_page_is_not_truncated() {
        let client = MockClient::new().respond(
            HttpMethod::Get,
            "/api/2.1/jobs/list",
            json!({"jobs": [{"job_id": 1}]}),
        );
        let request = ApiRequest::new(HttpMethod::Get, "/api/2.1/jobs/list");
        let value = collect_pages(&client, request, "jobs", 10).unwrap();
        assert_eq!(value["count"], json!(1));
        assert_eq!(value["truncated"], json!(false));
    }

    #[test]
    fn test_out_of_range_integer_is_rejected() {
        let op = RestOperation::post("x", "/api/x").param(Param::integer("n", "n"));
        let err = op.build_request(&arguments(json!({"n": 1e30}))).unwrap_err();
        assert!(err.to_string().contains("must be of type integer"));
        assert!(op.build_request(&arguments(json!({"n": -1e19}))).is_err());
    }

    #[test]
    fn test_acknowledge_uses_response_fields() {
        let (_, provider) = MockClient::new()
            .respond(HttpMethod::Post, "/api/2.1/jobs/run-now", json!({"run_id": 77}))
            .into_provider();
        let ctx = InvocationContext::new(provider, 100);
        let op = RestOperation::post("databricks_run_job", "/api/2.1/jobs/run-now")
            .param(Param::integer("job_id", "Job id"))
            .acknowledge("Job {job_id} triggered. Run ID: {run_id}.");
        let text = op.invoke(&ctx, &arguments(json!({"job_id": 5}))).unwrap();
        assert_eq!(text, json!("Job 5 triggered. Run ID: 77."));
    }

    #[test]
    fn test_acknowledge_and_remote_error() {
        let (client, provider) = MockClient::new()
            .fail(
                HttpMethod::Post,
                "/api/2.0/sql/warehouses/w2/start",
                RemoteError::api(404, Some("RESOURCE_DOES_NOT_EXIST".into()), "missing"),
            )
            .into_provider();
        let ctx = InvocationContext::new(provider, 100);
        let op = RestOperation::post("databricks_start_warehouse", "/api/2.0/sql/warehouses/{id}/start")
            .param(Param::string("id", "Warehouse id"))
            .acknowledge("Warehouse '{id}' start initiated.")
            .started();

        let ok = op.invoke(&ctx, &arguments(json!({"id": "w1"}))).unwrap();
        assert_eq!(ok, json!("Warehouse 'w1' start initiated."));

        let err = op.invoke(&ctx, &arguments(json!({"id": "w2"}))).unwrap_err();
        assert!(err.to_string().contains("[RESOURCE_DOES_NOT_EXIST]"));
        assert_eq!(client.calls().len(), 2);
    }

    #[test]
    fn test_resolve_params_fills_defaults_and_drops_unknown() {
        let params = [
            Param::string("table_name", "Table"),
            Param::integer("limit", "Rows").default(json!(10)),
            Param::string("warehouse_id", "Warehouse").optional(),
        ];
        let resolved = resolve_params(
            &params,
            &arguments(json!({"table_name": "main.a.b", "warehouse_id": "", "extra": 1})),
        )
        .unwrap();
        assert_eq!(Value::Object(resolved), json!({"table_name": "main.a.b", "limit": 10}));

        let err = resolve_params(&params, &Arguments::new()).unwrap_err();
        assert!(err.to_string().contains("missing required argument 'table_name'"));
    }
}
