pub(crate) mod access_denied;
pub(crate) mod fingerprint_panel;
pub(crate) mod loading;
pub(crate) mod modal;
pub(crate) mod nav_item;
pub(crate) mod notification_bell;
pub(crate) mod pagination;
pub(crate) mod toasts;
pub(crate) mod user_dropdown;

pub use modal::Modal;
pub use pagination::Pagination;
