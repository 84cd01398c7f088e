pub mod account;
pub mod audit;
pub mod auth;
pub mod decision_reason;
pub mod employee;
pub mod errors;
pub mod fingerprint;
pub mod overtime;
pub mod page;
pub mod permission;
pub mod triple_ot;

pub use account::{
    Account, CreateAccountRequest, ResetPasswordRequest, RoleRecord, RoleRequest,
    SetActiveRequest, UpdateAccountRequest,
};
pub use audit::{AUDIT_ENTITY_TYPES, AuditActor, AuditEntry};
pub use auth::{AuthResponse, LoginRequest, Role, User};
pub use decision_reason::{CreateReasonRequest, DecisionReason, ReasonType, UpdateReasonRequest};
pub use employee::{CreateEmployeeRequest, Employee, EmployeeRef, UpdateEmployeeRequest};
pub use errors::ErrorResponse;
pub use fingerprint::{FingerprintLog, FingerprintResult, PunchType};
pub use overtime::{
    ApproveOtRequest, BulkOtRequest, BulkOtResult, BulkOtRow, DayStats, HoursBreakdown, LogView,
    NotificationCount, NotificationEmployee, OtEntry, OtStatus, OtSummaryRow, PendingNotification,
    PendingNotifications, RejectOtRequest, ReportScope, Shift, UpdateOtRequest,
};
pub use page::Page;
pub use permission::Permission;
pub use triple_ot::{CreateTripleOtRequest, TripleOtDate};
