pub mod admin_config;
pub mod audit;
pub mod dashboard;
pub mod employees;
pub mod login;
pub mod ot_entry;
pub mod ot_logs;
pub mod ot_reason;
pub mod triple_ot;
pub mod users;

pub use admin_config::AdminConfigPage;
pub use audit::AuditPage;
pub use dashboard::DashboardPage;
pub use employees::EmployeesPage;
pub use login::LoginPage;
pub use ot_entry::OtEntryPage;
pub use ot_logs::OtLogsPage;
pub use ot_reason::DecisionReasonsPage;
pub use triple_ot::TripleOtPage;
pub use users::UsersPage;
