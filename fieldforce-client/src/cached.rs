//! Cached API client.
//!
//! Wraps `ApiClient` so query endpoints read through the `QueryCache`
//! transparently and mutation endpoints invalidate the tags they affect.
//! Callers use the same method names either way; the cache is invisible
//! at the call site.

use crate::api::ApiClient;
use crate::cache::QueryCache;
use fieldforce_core::types::*;
use fieldforce_core::{ApiFailure, CacheKey, CacheTag};
use std::sync::Arc;

#[derive(Clone)]
pub struct CachedClient {
    api: ApiClient,
    cache: Arc<QueryCache>,
}

impl CachedClient {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: Arc::new(QueryCache::new()),
        }
    }

    /// The uncached client, for callers that need to bypass the cache.
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Drop every cached query result. Part of the logout flow.
    pub async fn reset_cache(&self) {
        self.cache.reset().await;
    }

    // ------------------------------------------------------------------------
    // Queries (read through the cache)
    // ------------------------------------------------------------------------

    pub async fn list_employees(
        &self,
        params: &ListEmployeesRequest,
    ) -> Result<ListEmployeesResponse, ApiFailure> {
        let key = CacheKey::with_args("/employees", params);
        self.cache
            .get_or_fetch(key, &[CacheTag::Employee], || self.api.list_employees(params))
            .await
    }

    pub async fn get_employee(&self, id: &str) -> Result<ApiEnvelope<Employee>, ApiFailure> {
        let key = CacheKey::bare(format!("/employee/{}", id));
        self.cache
            .get_or_fetch(key, &[CacheTag::Employee], || self.api.get_employee(id))
            .await
    }

    pub async fn list_headquarters(&self) -> Result<ApiEnvelope<Vec<Headquarter>>, ApiFailure> {
        let key = CacheKey::bare("/headquarters");
        self.cache
            .get_or_fetch(key, &[CacheTag::Hq], || self.api.list_headquarters())
            .await
    }

    pub async fn directory(&self) -> Result<DirectoryResponse, ApiFailure> {
        let key = CacheKey::bare("/doctorChemists/all");
        self.cache
            .get_or_fetch(key, &[CacheTag::DoctorChemist], || self.api.directory())
            .await
    }

    /// Today's attendance is intentionally untagged: marking attendance
    /// does not invalidate it upstream either, and screens refetch it on
    /// focus.
    pub async fn today_attendance(&self) -> Result<ApiEnvelope<TodayAttendance>, ApiFailure> {
        let key = CacheKey::bare("/attendances/");
        self.cache
            .get_or_fetch(key, &[], || self.api.today_attendance())
            .await
    }

    pub async fn list_leaves(
        &self,
        params: &ListLeavesRequest,
    ) -> Result<ListLeavesResponse, ApiFailure> {
        let key = CacheKey::with_args("/leaves", params);
        self.cache
            .get_or_fetch(key, &[CacheTag::Leave], || self.api.list_leaves(params))
            .await
    }

    pub async fn my_leaves(&self, params: &MyLeavesRequest) -> Result<ListLeavesResponse, ApiFailure> {
        let key = CacheKey::with_args("/leaves/my", params);
        self.cache
            .get_or_fetch(key, &[CacheTag::Leave], || self.api.my_leaves(params))
            .await
    }

    pub async fn get_leave(&self, id: &str) -> Result<ApiEnvelope<Leave>, ApiFailure> {
        let key = CacheKey::bare(format!("/leaves/{}", id));
        self.cache
            .get_or_fetch(key, &[CacheTag::Leave], || self.api.get_leave(id))
            .await
    }

    pub async fn leave_stats(&self) -> Result<LeaveStatsResponse, ApiFailure> {
        let key = CacheKey::bare("/leaves/stats");
        self.cache
            .get_or_fetch(key, &[CacheTag::Leave], || self.api.leave_stats())
            .await
    }

    pub async fn admin_dashboard(&self) -> Result<ApiEnvelope<serde_json::Value>, ApiFailure> {
        let key = CacheKey::bare("/admin/dashboard");
        self.cache
            .get_or_fetch(key, &[CacheTag::AdminDashboard], || self.api.admin_dashboard())
            .await
    }

    // ------------------------------------------------------------------------
    // Mutations (pass through, then invalidate)
    // ------------------------------------------------------------------------

    pub async fn create_employee(
        &self,
        req: &CreateEmployeeRequest,
    ) -> Result<ApiEnvelope<Employee>, ApiFailure> {
        let response = self.api.create_employee(req).await?;
        self.cache
            .invalidate(&[CacheTag::AdminDashboard, CacheTag::Employee])
            .await;
        Ok(response)
    }

    pub async fn create_headquarter(
        &self,
        req: &CreateHeadquarterRequest,
    ) -> Result<ApiEnvelope<Headquarter>, ApiFailure> {
        let response = self.api.create_headquarter(req).await?;
        self.cache
            .invalidate(&[CacheTag::AdminDashboard, CacheTag::Hq])
            .await;
        Ok(response)
    }

    pub async fn create_doctor_chemist(
        &self,
        req: &CreateDoctorChemistRequest,
    ) -> Result<ApiEnvelope<DoctorChemist>, ApiFailure> {
        let response = self.api.create_doctor_chemist(req).await?;
        self.cache.invalidate(&[CacheTag::DoctorChemist]).await;
        Ok(response)
    }

    pub async fn mark_attendance(
        &self,
        req: &MarkAttendanceRequest,
    ) -> Result<ApiEnvelope<MarkAttendanceData>, ApiFailure> {
        self.api.mark_attendance(req).await
    }

    pub async fn apply_leave(&self, req: &ApplyLeaveRequest) -> Result<ApiEnvelope<Leave>, ApiFailure> {
        let response = self.api.apply_leave(req).await?;
        self.cache.invalidate(&[CacheTag::Leave]).await;
        Ok(response)
    }

    pub async fn update_leave_status(
        &self,
        id: &str,
        req: &UpdateLeaveStatusRequest,
    ) -> Result<ApiEnvelope<Leave>, ApiFailure> {
        let response = self.api.update_leave_status(id, req).await?;
        self.cache.invalidate(&[CacheTag::Leave]).await;
        Ok(response)
    }

    pub async fn delete_leave(&self, id: &str) -> Result<Acknowledgement, ApiFailure> {
        let response = self.api.delete_leave(id).await?;
        self.cache.invalidate(&[CacheTag::Leave]).await;
        Ok(response)
    }
}
