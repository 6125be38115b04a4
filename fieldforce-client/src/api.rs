//! Authorized HTTP request layer.
//!
//! Every outgoing call reads the bearer token from the persisted
//! credential store at send time, so a login or logout in the same process
//! takes effect on the very next request. Responses map to the
//! `ApiFailure` descriptor the classifier consumes.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::store::{keys, CredentialStore};
use fieldforce_core::types::*;
use fieldforce_core::{ApiFailure, Credential, ProbeOutcome};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;
use tracing::{debug, warn};

/// Body shape the server uses for error responses.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    health_url: String,
    store: CredentialStore,
    probe_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, store: CredentialStore) -> Result<Self, ClientError> {
        let mut builder = reqwest::Client::builder();
        // Authenticated calls are unbounded unless configured; only the
        // health probe carries a mandatory timeout.
        if let Some(ms) = config.request_timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let client = builder.build()?;
        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            health_url: config.health_url.clone(),
            store,
            probe_timeout: Duration::from_millis(config.probe_timeout_ms),
        })
    }

    /// Headers for the next request: JSON content type always, bearer
    /// token only when the store currently holds one. A store read error
    /// degrades to an unauthenticated request rather than failing the call.
    fn request_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let token = match self.store.get(keys::TOKEN) {
            Ok(token) => token,
            Err(err) => {
                warn!(%err, "credential store read failed, sending unauthenticated");
                None
            }
        };
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            let value = format!("Bearer {}", token);
            if let Ok(value) = HeaderValue::from_str(&value) {
                headers.insert(AUTHORIZATION, value);
            }
        }
        headers
    }

    // ------------------------------------------------------------------------
    // Auth endpoints
    // ------------------------------------------------------------------------

    pub async fn employee_login(
        &self,
        req: &LoginRequest,
    ) -> Result<ApiEnvelope<Credential>, ApiFailure> {
        self.post_json("/employee/login", req).await
    }

    pub async fn admin_login(
        &self,
        req: &LoginRequest,
    ) -> Result<ApiEnvelope<Credential>, ApiFailure> {
        self.post_json("/admin/login", req).await
    }

    // ------------------------------------------------------------------------
    // Employee endpoints
    // ------------------------------------------------------------------------

    pub async fn list_employees(
        &self,
        params: &ListEmployeesRequest,
    ) -> Result<ListEmployeesResponse, ApiFailure> {
        self.get_json("/employees", Some(params)).await
    }

    pub async fn get_employee(&self, id: &str) -> Result<ApiEnvelope<Employee>, ApiFailure> {
        let path = format!("/employee/{}", id);
        self.get_json::<ApiEnvelope<Employee>, ()>(&path, None).await
    }

    pub async fn create_employee(
        &self,
        req: &CreateEmployeeRequest,
    ) -> Result<ApiEnvelope<Employee>, ApiFailure> {
        self.post_json("/employee", req).await
    }

    // ------------------------------------------------------------------------
    // Headquarter endpoints
    // ------------------------------------------------------------------------

    pub async fn list_headquarters(&self) -> Result<ApiEnvelope<Vec<Headquarter>>, ApiFailure> {
        self.get_json::<ApiEnvelope<Vec<Headquarter>>, ()>("/headquarters", None)
            .await
    }

    pub async fn create_headquarter(
        &self,
        req: &CreateHeadquarterRequest,
    ) -> Result<ApiEnvelope<Headquarter>, ApiFailure> {
        self.post_json("/headquarters", req).await
    }

    // ------------------------------------------------------------------------
    // Doctor / chemist endpoints
    // ------------------------------------------------------------------------

    pub async fn directory(&self) -> Result<DirectoryResponse, ApiFailure> {
        self.get_json::<DirectoryResponse, ()>("/doctorChemists/all", None)
            .await
    }

    pub async fn create_doctor_chemist(
        &self,
        req: &CreateDoctorChemistRequest,
    ) -> Result<ApiEnvelope<DoctorChemist>, ApiFailure> {
        self.post_json("/doctorChemists", req).await
    }

    // ------------------------------------------------------------------------
    // Attendance endpoints
    // ------------------------------------------------------------------------

    pub async fn today_attendance(&self) -> Result<ApiEnvelope<TodayAttendance>, ApiFailure> {
        self.get_json::<ApiEnvelope<TodayAttendance>, ()>("/attendances/", None)
            .await
    }

    pub async fn mark_attendance(
        &self,
        req: &MarkAttendanceRequest,
    ) -> Result<ApiEnvelope<MarkAttendanceData>, ApiFailure> {
        self.post_json("/attendances/", req).await
    }

    // ------------------------------------------------------------------------
    // Leave endpoints
    // ------------------------------------------------------------------------

    pub async fn list_leaves(
        &self,
        params: &ListLeavesRequest,
    ) -> Result<ListLeavesResponse, ApiFailure> {
        self.get_json("/leaves", Some(params)).await
    }

    pub async fn my_leaves(&self, params: &MyLeavesRequest) -> Result<ListLeavesResponse, ApiFailure> {
        self.get_json("/leaves/my", Some(params)).await
    }

    pub async fn get_leave(&self, id: &str) -> Result<ApiEnvelope<Leave>, ApiFailure> {
        let path = format!("/leaves/{}", id);
        self.get_json::<ApiEnvelope<Leave>, ()>(&path, None).await
    }

    pub async fn apply_leave(&self, req: &ApplyLeaveRequest) -> Result<ApiEnvelope<Leave>, ApiFailure> {
        self.post_json("/leaves", req).await
    }

    pub async fn update_leave_status(
        &self,
        id: &str,
        req: &UpdateLeaveStatusRequest,
    ) -> Result<ApiEnvelope<Leave>, ApiFailure> {
        let path = format!("/leaves/{}/status", id);
        self.patch_json(&path, req).await
    }

    pub async fn delete_leave(&self, id: &str) -> Result<Acknowledgement, ApiFailure> {
        let path = format!("/leaves/{}", id);
        self.delete_json(&path).await
    }

    pub async fn leave_stats(&self) -> Result<LeaveStatsResponse, ApiFailure> {
        self.get_json::<LeaveStatsResponse, ()>("/leaves/stats", None)
            .await
    }

    // ------------------------------------------------------------------------
    // Admin dashboard
    // ------------------------------------------------------------------------

    pub async fn admin_dashboard(&self) -> Result<ApiEnvelope<serde_json::Value>, ApiFailure> {
        self.get_json::<ApiEnvelope<serde_json::Value>, ()>("/admin/dashboard", None)
            .await
    }

    // ------------------------------------------------------------------------
    // Health probe
    // ------------------------------------------------------------------------

    /// One bounded health probe against the service root. Never errors:
    /// every failure mode collapses into a `ProbeOutcome`.
    pub async fn probe_health(&self) -> ProbeOutcome {
        let request = self.client.get(self.health_url.as_str()).send();
        match tokio::time::timeout(self.probe_timeout, request).await {
            Err(_) => ProbeOutcome::TimedOut,
            Ok(Err(err)) if err.is_timeout() => ProbeOutcome::TimedOut,
            Ok(Err(err)) => {
                debug!(%err, "health probe failed");
                ProbeOutcome::Unreachable
            }
            Ok(Ok(response)) => ProbeOutcome::Responded {
                status: response.status().as_u16(),
            },
        }
    }

    // ------------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------------

    async fn get_json<T, Q>(&self, path: &str, query: Option<&Q>) -> Result<T, ApiFailure>
    where
        T: serde::de::DeserializeOwned,
        Q: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let mut request = self.client.get(url).headers(self.request_headers());
        if let Some(query) = query {
            request = request.query(query);
        }
        let response = request.send().await.map_err(map_transport_error)?;
        parse_response(response).await
    }

    async fn post_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiFailure>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .post(url)
            .headers(self.request_headers())
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        parse_response(response).await
    }

    async fn patch_json<T, B>(&self, path: &str, body: &B) -> Result<T, ApiFailure>
    where
        T: serde::de::DeserializeOwned,
        B: serde::Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .patch(url)
            .headers(self.request_headers())
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        parse_response(response).await
    }

    async fn delete_json<T>(&self, path: &str) -> Result<T, ApiFailure>
    where
        T: serde::de::DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .delete(url)
            .headers(self.request_headers())
            .send()
            .await
            .map_err(map_transport_error)?;
        parse_response(response).await
    }
}

fn map_transport_error(err: reqwest::Error) -> ApiFailure {
    if err.is_timeout() {
        ApiFailure::Timeout
    } else {
        debug!(%err, "request failed before a response arrived");
        ApiFailure::Network
    }
}

async fn parse_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ApiFailure> {
    let status = response.status();
    if status.is_success() {
        response
            .json::<T>()
            .await
            .map_err(|err| ApiFailure::Decode(err.to_string()))
    } else {
        let message = match response.text().await {
            Ok(text) => serde_json::from_str::<ErrorBody>(&text)
                .ok()
                .and_then(|body| body.message),
            Err(_) => None,
        };
        Err(ApiFailure::Status {
            code: status.as_u16(),
            message,
        })
    }
}
