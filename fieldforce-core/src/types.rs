//! API Request and Response Types
//!
//! Wire-level request and response types for every endpoint the client
//! exposes. Field names follow the upstream JSON contract (camelCase,
//! Mongo-style `_id` ids); serde renames keep the Rust side idiomatic.

use crate::session::Role;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// ENVELOPE
// ============================================================================

/// Standard response envelope used by most endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the operation succeeded server-side.
    pub success: bool,
    /// Optional human-readable message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The payload.
    pub data: T,
}

/// Minimal acknowledgement for endpoints that return no payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Acknowledgement {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// ============================================================================
// AUTH TYPES
// ============================================================================

/// Credentials submitted to either login endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// EMPLOYEE TYPES
// ============================================================================

/// Per-category count of leaves already taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LeavesTaken {
    pub sick: u32,
    pub casual: u32,
    pub earned: u32,
    pub public: u32,
}

/// Reference to a headquarter embedded in other entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HqRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
}

/// An employee record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub hq: HqRef,
    /// Id of the managing user.
    pub manager: String,
    pub leaves_taken: LeavesTaken,
    /// Which collection the manager id refers to.
    pub manager_model: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query arguments for the employee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEmployeesRequest {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub search: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub department: String,
    #[serde(skip_serializing_if = "String::is_empty", default)]
    pub status: String,
}

impl Default for ListEmployeesRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: String::new(),
            department: String::new(),
            status: String::new(),
        }
    }
}

/// Paginated employee list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEmployeesResponse {
    pub success: bool,
    pub employees: Vec<Employee>,
    pub total: u32,
    pub page: u32,
    pub total_pages: u32,
}

/// Request to create a new employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEmployeeRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    /// Headquarter id the employee is assigned to.
    pub hq: String,
    pub manager: String,
    pub manager_model: String,
}

// ============================================================================
// LEAVE TYPES
// ============================================================================

/// Review state of a leave application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

/// Category of leave being applied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaveType {
    Sick,
    Casual,
    Earned,
    Public,
    Maternity,
    Paternity,
}

/// Employee reference embedded in a leave record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveEmployeeRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
}

/// A leave application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Leave {
    #[serde(rename = "_id")]
    pub id: String,
    pub employee: LeaveEmployeeRef,
    /// Inclusive start date, as submitted (YYYY-MM-DD).
    pub start_date: String,
    /// Inclusive end date, as submitted (YYYY-MM-DD).
    pub end_date: String,
    pub reason: String,
    pub leave_type: LeaveType,
    pub status: LeaveStatus,
    /// Length in days.
    pub duration: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Query arguments for the admin-facing leave list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLeavesRequest {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<LeaveStatus>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub employee_id: Option<String>,
}

impl Default for ListLeavesRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
            employee_id: None,
        }
    }
}

/// Query arguments for the caller's own leaves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MyLeavesRequest {
    pub page: u32,
    pub limit: u32,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub status: Option<LeaveStatus>,
}

impl Default for MyLeavesRequest {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            status: None,
        }
    }
}

/// Paginated leave list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLeavesResponse {
    pub success: bool,
    pub leaves: Vec<Leave>,
    pub total: u32,
    pub page: u32,
    pub total_pages: u32,
}

/// Request to apply for leave.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyLeaveRequest {
    pub start_date: String,
    pub end_date: String,
    pub reason: String,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
}

/// Request to approve or reject a leave (admin only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLeaveStatusRequest {
    pub status: LeaveStatus,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub admin_notes: Option<String>,
}

/// Aggregate leave counters for the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveStats {
    pub total: u32,
    pub pending: u32,
    pub approved: u32,
    pub rejected: u32,
    pub available: LeavesTaken,
}

/// Envelope for the stats endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaveStatsResponse {
    pub success: bool,
    pub stats: LeaveStats,
}

// ============================================================================
// ATTENDANCE TYPES
// ============================================================================

/// Check-in or check-out event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttendanceEvent {
    #[serde(rename = "check-in")]
    CheckIn,
    #[serde(rename = "check-out")]
    CheckOut,
}

/// GeoJSON-style point, coordinates as [longitude, latitude].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "type", default = "geo_point_type")]
    pub kind: String,
    pub coordinates: [f64; 2],
}

fn geo_point_type() -> String {
    "Point".to_string()
}

/// Location payload submitted when marking attendance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkLocation {
    pub coordinates: [f64; 2],
}

/// Request to mark attendance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkAttendanceRequest {
    #[serde(rename = "type")]
    pub event: AttendanceEvent,
    pub location: MarkLocation,
}

/// Payload returned after marking attendance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceData {
    pub attendance_id: String,
    pub date: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start_location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub working_hours: Option<f64>,
}

/// A stored attendance record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    #[serde(rename = "_id")]
    pub id: String,
    /// Id of the employee the record belongs to.
    pub employee: String,
    pub date: String,
    pub start_time: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_time: Option<String>,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start_location: Option<GeoPoint>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_location: Option<GeoPoint>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The caller's attendance picture for today.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayAttendance {
    pub work_started: bool,
    pub work_ended: bool,
    /// Formatted duration worked so far.
    pub working_hours: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attendance: Option<AttendanceRecord>,
}

// ============================================================================
// DOCTOR / CHEMIST TYPES
// ============================================================================

/// Contact category in the CRM directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactKind {
    Doctor,
    Chemist,
}

/// Provenance of a directory entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedBy {
    pub id: String,
    pub role: String,
    pub model: String,
}

/// A doctor or chemist contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DoctorChemist {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: ContactKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,
    /// Headquarter id the contact belongs to.
    pub hq: String,
    pub added_by: AddedBy,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request to create a directory contact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDoctorChemistRequest {
    pub name: String,
    pub email: String,
    #[serde(rename = "type")]
    pub kind: ContactKind,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub specialization: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub location: Option<String>,
    pub hq: String,
    pub added_by: AddedBy,
}

/// Directory-wide counters returned alongside the contact list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DirectoryExtra {
    pub total: u32,
    pub chemists: u32,
    pub doctors: u32,
}

/// Full directory listing with counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectoryResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: Vec<DoctorChemist>,
    #[serde(default)]
    pub extra: DirectoryExtra,
}

// ============================================================================
// HEADQUARTER TYPES
// ============================================================================

/// A headquarter (territory) record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Headquarter {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub location: String,
}

/// Request to create a headquarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateHeadquarterRequest {
    pub name: String,
    pub location: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn employee_list_args_skip_empty_filters() {
        let args = ListEmployeesRequest::default();
        let json = serde_json::to_value(&args).unwrap();
        assert_eq!(json, serde_json::json!({ "page": 1, "limit": 10 }));
    }

    #[test]
    fn apply_leave_serializes_type_field() {
        let req = ApplyLeaveRequest {
            start_date: "2026-09-01".into(),
            end_date: "2026-09-03".into(),
            reason: "fever".into(),
            leave_type: LeaveType::Sick,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["type"], "sick");
        assert_eq!(json["startDate"], "2026-09-01");
    }

    #[test]
    fn attendance_event_uses_hyphenated_wire_names() {
        assert_eq!(
            serde_json::to_string(&AttendanceEvent::CheckIn).unwrap(),
            "\"check-in\""
        );
        assert_eq!(
            serde_json::to_string(&AttendanceEvent::CheckOut).unwrap(),
            "\"check-out\""
        );
    }

    #[test]
    fn directory_entry_deserializes_wire_shape() {
        let json = serde_json::json!({
            "_id": "d1",
            "name": "Dr. Rao",
            "email": "rao@example.com",
            "type": "doctor",
            "specialization": "cardiology",
            "hq": "hq1",
            "addedBy": { "id": "u1", "role": "employee", "model": "Employee" },
            "createdAt": "2026-01-10T09:00:00Z",
            "updatedAt": "2026-01-10T09:00:00Z"
        });
        let contact: DoctorChemist = serde_json::from_value(json).unwrap();
        assert_eq!(contact.kind, ContactKind::Doctor);
        assert_eq!(contact.location, None);
        assert_eq!(contact.added_by.model, "Employee");
    }

    #[test]
    fn envelope_tolerates_missing_message() {
        let json = serde_json::json!({ "success": true, "data": { "_id": "h1", "name": "North", "location": "Pune" } });
        let envelope: ApiEnvelope<Headquarter> = serde_json::from_value(json).unwrap();
        assert!(envelope.success);
        assert_eq!(envelope.message, None);
        assert_eq!(envelope.data.name, "North");
    }
}
