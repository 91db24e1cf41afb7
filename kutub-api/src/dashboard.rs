use serde::{Serialize, Deserialize};

pub const DASHBOARD_PATH: &str = "/api/dashboard";

/// headline counters, zero until loaded
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub books: u64,
    #[serde(default)]
    pub users: u64,
    #[serde(default)]
    pub issued: u64,
}

impl std::fmt::Display for Metrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "books:  {}", self.books)?;
            writeln!(f, "users:  {}", self.users)?;
            write!(f, "issued: {}", self.issued)
        } else {
            write!(f, "books: {} users: {} issued: {}", self.books, self.users, self.issued)
        }
    }
}
