pub(crate) mod header;
pub(crate) mod layout;
pub(crate) mod sidebar;
