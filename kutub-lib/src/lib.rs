pub mod error;
pub mod ids;
pub mod serde;
pub mod validation;

pub mod session;
pub mod sec;
pub mod filter;
pub mod nav;

/// group id that marks a member as a full administrator
pub const ADMIN_GROUP_ID: &str = "1";

/// placeholder shown when a related record is missing
pub const NO_DATA: &str = "Ma'lumot yo'q";

pub fn or_no_data(given: Option<&str>) -> &str {
    match given {
        Some(v) if !v.is_empty() => v,
        _ => NO_DATA
    }
}
