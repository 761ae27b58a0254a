//! API Gateway proxy events for the Lambda binary. REST APIs (v1) send
//! `httpMethod`, HTTP APIs (v2) send `requestContext.http.method`.

use crate::app::handler::{FunctionResponse, GrantFunction};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyRequest {
    pub http_method: Option<String>,
    pub request_context: Option<RequestContext>,
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

#[derive(Debug, Default, Deserialize)]
pub struct RequestContext {
    pub http: Option<HttpContext>,
}

#[derive(Debug, Deserialize)]
pub struct HttpContext {
    pub method: String,
}

impl ProxyRequest {
    /// Upper-cased method, or `None` when the event carries neither form.
    pub fn method(&self) -> Option<String> {
        self.http_method
            .as_deref()
            .or_else(|| {
                self.request_context
                    .as_ref()
                    .and_then(|ctx| ctx.http.as_ref())
                    .map(|http| http.method.as_str())
            })
            .map(str::to_ascii_uppercase)
    }

    /// Raw body bytes; `None` when a base64 body does not decode.
    pub fn body_bytes(&self) -> Option<Vec<u8>> {
        let body = self.body.as_deref().unwrap_or_default();
        if self.is_base64_encoded {
            STANDARD.decode(body).ok()
        } else {
            Some(body.as_bytes().to_vec())
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProxyResponse {
    pub status_code: u16,
    pub headers: HashMap<String, String>,
    pub body: String,
}

impl From<FunctionResponse> for ProxyResponse {
    fn from(response: FunctionResponse) -> Self {
        Self {
            status_code: response.status,
            headers: response
                .headers
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: response.body,
        }
    }
}

pub async fn dispatch(function: &GrantFunction, request: ProxyRequest) -> ProxyResponse {
    let Some(method) = request.method() else {
        tracing::warn!("Proxy event has no HTTP method");
        return FunctionResponse::error(405, "Method not allowed").into();
    };
    tracing::info!("Handling {} request", method);

    let response = match request.body_bytes() {
        Some(body) => function.handle(&method, &body).await,
        None => {
            tracing::warn!("Proxy event body is not valid base64");
            FunctionResponse::error(400, "Invalid request body")
        }
    };

    tracing::info!("Responded with status {}", response.status);
    response.into()
}
