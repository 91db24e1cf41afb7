use serde::{Serialize, Deserialize};

use kutub_lib::ids::GroupId;
use kutub_lib::validation;

use crate::ApiError;
use crate::traits::{Validator, Invalid};

pub const LOGIN_PATH: &str = "/api/admin/log";

#[derive(Debug, Clone, Serialize)]
pub struct LoginBody {
    pub passport_id: String,
    pub password: String,
}

impl Validator for LoginBody {
    fn validate(&self) -> Result<(), ApiError> {
        Invalid::new()
            .check("passport_id", validation::required(&self.passport_id))
            .check("password", validation::required(&self.password))
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UserGroup {
    pub group_id: GroupId,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LoginData {
    pub token: String,
    #[serde(rename = "userGroups", default)]
    pub user_groups: Option<Vec<UserGroup>>,
}

impl LoginData {
    /// group ids from the response, empty when the server omitted them
    pub fn memberships(&self) -> Vec<GroupId> {
        self.user_groups.iter()
            .flatten()
            .map(|g| g.group_id.clone())
            .collect()
    }
}
