//! library users: students (read only) and staff accounts.

use serde::{Serialize, Deserialize};

use kutub_lib::ids::{Id, GroupId};
use kutub_lib::validation;
use kutub_lib::filter::{Placement, GroupRef};

use crate::ApiError;
use crate::traits::{Validator, Invalid};
use crate::resource::{resource, CreateResource};

/// group names whose members are shown in the staff list
pub const STAFF_GROUPS: [&str; 2] = ["admin", "kutubxonachi"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Student {
    pub id: Id,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub passport_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "StudentGroup", default, skip_serializing_if = "Option::is_none")]
    pub group: Option<GroupRef>,
}

impl Placement for Student {
    fn placement(&self) -> Option<&GroupRef> {
        self.group.as_ref()
    }

    fn label(&self) -> &str {
        &self.full_name
    }
}

resource!(Students, Student, "student", "/api/all-users");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffUser {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub passport_id: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StaffGroup {
    #[serde(default)]
    pub id: Option<GroupId>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Staff {
    pub id: Id,
    #[serde(default)]
    pub user: Option<StaffUser>,
    #[serde(rename = "groupInfo", default)]
    pub group_info: Option<StaffGroup>,
}

impl Staff {
    pub fn group_name(&self) -> Option<&str> {
        self.group_info.as_ref().and_then(|g| g.name.as_deref())
    }

    /// a complete account in one of the staff groups
    pub fn is_listed(&self) -> bool {
        let Some(user) = &self.user else {
            return false;
        };

        let complete = [&user.full_name, &user.phone, &user.passport_id]
            .iter()
            .all(|field| field.as_deref().map(validation::required).unwrap_or(false));

        if !complete {
            return false;
        }

        self.group_name()
            .map(|name| {
                let name = name.to_lowercase();

                STAFF_GROUPS.contains(&name.as_str())
            })
            .unwrap_or(false)
    }
}

/// keeps only the rows that [`Staff::is_listed`] accepts
pub fn listed_staff<I>(rows: I) -> Vec<Staff>
where
    I: IntoIterator<Item = Staff>
{
    rows.into_iter()
        .filter(Staff::is_listed)
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterStaff {
    pub full_name: String,
    pub passport_id: String,
    pub phone: String,
    pub password: String,
    pub group_id: GroupId,
}

impl Validator for RegisterStaff {
    fn validate(&self) -> Result<(), ApiError> {
        Invalid::new()
            .check("full_name", validation::name_valid(&self.full_name))
            .check("passport_id", validation::required(&self.passport_id))
            .check("phone", validation::phone_valid(&self.phone))
            .check("password", validation::required(&self.password))
            .check("group_id", validation::required(&self.group_id))
            .finish()
    }
}

resource!(StaffMembers, Staff, "staff", "/api/admin/all-users");

impl CreateResource for StaffMembers {
    type Create = RegisterStaff;

    fn create_path() -> &'static str {
        "/api/admin/register"
    }
}
