use serde::{Serialize, Deserialize};

use kutub_lib::ids::{GroupId, PermissionId};
use kutub_lib::validation;
use kutub_lib::sec::authz::permission::GroupPermissionLink;

use crate::ApiError;
use crate::traits::{Validator, Invalid};
use crate::resource::{resource, CreateResource, DeleteResource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Permission {
    pub id: PermissionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code_name: String,
    #[serde(default)]
    pub table: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatePermission {
    pub name: String,
    pub code_name: String,
    pub table: String,
}

impl CreatePermission {
    /// the code name is derived from the display name
    pub fn new<N, T>(name: N, table: T) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        let name = name.into();
        let code_name = validation::code_name_from(&name);

        CreatePermission {
            name,
            code_name,
            table: table.into(),
        }
    }

    /// replaces the derived code name
    pub fn code_name<C>(&mut self, code_name: C) -> &mut Self
    where
        C: Into<String>
    {
        self.code_name = code_name.into();
        self
    }
}

impl Validator for CreatePermission {
    fn validate(&self) -> Result<(), ApiError> {
        Invalid::new()
            .check("name", validation::name_valid(&self.name))
            .check("code_name", validation::code_name_valid(&self.code_name))
            .check("table", validation::required(&self.table))
            .finish()
    }
}

resource!(Permissions, Permission, "permission", "/api/permissions");

impl CreateResource for Permissions {
    type Create = CreatePermission;
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignPermissions {
    pub group_id: GroupId,
    pub permission_ids: Vec<PermissionId>,
}

impl Validator for AssignPermissions {
    fn validate(&self) -> Result<(), ApiError> {
        Invalid::new()
            .check("group_id", validation::required(&self.group_id))
            .check("permission_ids", !self.permission_ids.is_empty())
            .finish()
    }
}

resource!(GroupPermissions, GroupPermissionLink, "role permission", "/api/group-permissions");

impl CreateResource for GroupPermissions {
    type Create = AssignPermissions;

    fn create_path() -> &'static str {
        "/api/group-permissions/assign"
    }
}

impl DeleteResource for GroupPermissions {}

/// links for a single group that still reference a permission
pub fn links_for_group<'a>(
    links: &'a [GroupPermissionLink],
    group: &GroupId
) -> Vec<&'a GroupPermissionLink> {
    links.iter()
        .filter(|link| link.permission_info.is_some() && link.group() == Some(group))
        .collect()
}
