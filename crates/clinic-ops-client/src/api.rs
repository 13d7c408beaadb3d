//! REST client surface.
//!
//! All methods return the raw `serde_json::Value` envelope; shape and
//! field normalization happen in one place (`clinic_ops_core::normalize`),
//! never at call sites. Workflows are generic over [`ClinicApi`] so tests
//! drive them against an in-memory mock.

use reqwest::multipart;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{ApiError, ApiResult};

/// Backend operations the workflows consume.
#[allow(async_fn_in_trait)]
pub trait ClinicApi {
    async fn login(&self, username: &str, password: &str) -> ApiResult<Value>;
    async fn logout(&self) -> ApiResult<Value>;

    async fn get_leads(&self) -> ApiResult<Value>;
    async fn create_lead(&self, payload: &Value) -> ApiResult<Value>;
    async fn update_lead(&self, lead_id: &str, payload: &Value) -> ApiResult<Value>;

    async fn get_patients(&self) -> ApiResult<Value>;
    async fn get_patient(&self, patient_id: &str) -> ApiResult<Value>;
    async fn create_patient(&self, payload: &Value) -> ApiResult<Value>;
    async fn update_patient(&self, patient_id: &str, payload: &Value) -> ApiResult<Value>;

    async fn get_patient_documents(&self, patient_id: &str) -> ApiResult<Value>;
    async fn upload_patient_document(
        &self,
        patient_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
        kind: &str,
    ) -> ApiResult<Value>;

    async fn get_appointments(&self) -> ApiResult<Value>;
    async fn get_patient_appointments(&self, patient_id: &str) -> ApiResult<Value>;
    async fn create_appointment(&self, payload: &Value) -> ApiResult<Value>;

    async fn get_clinical_notes(&self, patient_id: &str) -> ApiResult<Value>;
    async fn save_clinical_note(&self, patient_id: &str, note: &str) -> ApiResult<Value>;

    async fn assistant_chat(&self, payload: &Value) -> ApiResult<Value>;

    async fn patient_flow_summary(&self) -> ApiResult<Value>;
    async fn waiting_alerts(&self) -> ApiResult<Value>;
    async fn live_queue(&self) -> ApiResult<Value>;
    async fn doctor_utilization(&self) -> ApiResult<Value>;
    async fn lead_snapshot(&self) -> ApiResult<Value>;
}

/// reqwest-backed implementation against a live backend.
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl HttpClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            token: RwLock::new(None),
        }
    }

    /// Set the bearer token used by subsequent requests.
    pub async fn set_token(&self, token: Option<String>) {
        *self.token.write().await = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ApiResult<Value> {
        let request = match self.token.read().await.as_deref() {
            Some(token) => request.bearer_auth(token),
            None => request,
        };
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;
        let body: Option<Value> = serde_json::from_str(&text).ok();

        if status.is_success() {
            return Ok(body.unwrap_or(Value::Null));
        }

        // Prefer the backend's own error text; fall back to the status
        // line (e.g. "409 Conflict") so is_conflict keeps working.
        let message = body
            .as_ref()
            .and_then(|b| b.get("error").or_else(|| b.get("message")))
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| status.to_string());
        debug!(%status, %message, "backend call failed");
        Err(ApiError::Http {
            status: status.as_u16(),
            message,
            body,
        })
    }

    async fn get(&self, path: &str) -> ApiResult<Value> {
        self.send(self.client.get(self.url(path))).await
    }

    async fn post(&self, path: &str, payload: &Value) -> ApiResult<Value> {
        self.send(self.client.post(self.url(path)).json(payload)).await
    }

    async fn put(&self, path: &str, payload: &Value) -> ApiResult<Value> {
        self.send(self.client.put(self.url(path)).json(payload)).await
    }
}

impl ClinicApi for HttpClient {
    async fn login(&self, username: &str, password: &str) -> ApiResult<Value> {
        let payload = serde_json::json!({ "username": username, "password": password });
        let response = self.post("/auth/login", &payload).await?;
        if let Some(token) = response
            .get("token")
            .or_else(|| response.get("data").and_then(|d| d.get("token")))
            .and_then(Value::as_str)
        {
            self.set_token(Some(token.to_string())).await;
        }
        Ok(response)
    }

    async fn logout(&self) -> ApiResult<Value> {
        let response = self.post("/auth/logout", &Value::Null).await;
        self.set_token(None).await;
        response
    }

    async fn get_leads(&self) -> ApiResult<Value> {
        self.get("/leads").await
    }

    async fn create_lead(&self, payload: &Value) -> ApiResult<Value> {
        self.post("/leads", payload).await
    }

    async fn update_lead(&self, lead_id: &str, payload: &Value) -> ApiResult<Value> {
        self.put(&format!("/leads/{lead_id}"), payload).await
    }

    async fn get_patients(&self) -> ApiResult<Value> {
        self.get("/patients").await
    }

    async fn get_patient(&self, patient_id: &str) -> ApiResult<Value> {
        self.get(&format!("/patients/{patient_id}")).await
    }

    async fn create_patient(&self, payload: &Value) -> ApiResult<Value> {
        self.post("/patients", payload).await
    }

    async fn update_patient(&self, patient_id: &str, payload: &Value) -> ApiResult<Value> {
        self.put(&format!("/patients/{patient_id}"), payload).await
    }

    async fn get_patient_documents(&self, patient_id: &str) -> ApiResult<Value> {
        self.get(&format!("/patients/{patient_id}/documents")).await
    }

    async fn upload_patient_document(
        &self,
        patient_id: &str,
        file_name: &str,
        bytes: Vec<u8>,
        kind: &str,
    ) -> ApiResult<Value> {
        let part = multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = multipart::Form::new()
            .part("file", part)
            .text("type", kind.to_string());
        let request = self
            .client
            .post(self.url(&format!("/patients/{patient_id}/documents")))
            .multipart(form);
        self.send(request).await
    }

    async fn get_appointments(&self) -> ApiResult<Value> {
        self.get("/appointments").await
    }

    async fn get_patient_appointments(&self, patient_id: &str) -> ApiResult<Value> {
        self.get(&format!("/patients/{patient_id}/appointments")).await
    }

    async fn create_appointment(&self, payload: &Value) -> ApiResult<Value> {
        self.post("/appointments", payload).await
    }

    async fn get_clinical_notes(&self, patient_id: &str) -> ApiResult<Value> {
        self.get(&format!("/patients/{patient_id}/notes")).await
    }

    async fn save_clinical_note(&self, patient_id: &str, note: &str) -> ApiResult<Value> {
        let payload = serde_json::json!({ "note": note });
        self.post(&format!("/patients/{patient_id}/notes"), &payload).await
    }

    async fn assistant_chat(&self, payload: &Value) -> ApiResult<Value> {
        self.post("/assistant/chat", payload).await
    }

    async fn patient_flow_summary(&self) -> ApiResult<Value> {
        self.get("/metrics/patient-flow").await
    }

    async fn waiting_alerts(&self) -> ApiResult<Value> {
        self.get("/metrics/waiting-alerts").await
    }

    async fn live_queue(&self) -> ApiResult<Value> {
        self.get("/metrics/live-queue").await
    }

    async fn doctor_utilization(&self) -> ApiResult<Value> {
        self.get("/metrics/doctor-utilization").await
    }

    async fn lead_snapshot(&self) -> ApiResult<Value> {
        self.get("/metrics/leads").await
    }
}
