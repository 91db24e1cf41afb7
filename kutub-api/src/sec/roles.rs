use serde::{Serialize, Deserialize};

use kutub_lib::ids::GroupId;
use kutub_lib::validation;

use crate::ApiError;
use crate::traits::{Validator, Invalid};
use crate::resource::{resource, CreateResource, UpdateResource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub id: GroupId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub can_login: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleBody {
    pub name: String,
    pub can_login: bool,
}

impl Validator for RoleBody {
    fn validate(&self) -> Result<(), ApiError> {
        Invalid::new()
            .check("name", validation::name_valid(&self.name))
            .finish()
    }
}

resource!(Roles, Role, "role", "/api/groups/");

impl CreateResource for Roles {
    type Create = RoleBody;
}

impl UpdateResource for Roles {
    type Update = RoleBody;
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn create_keeps_trailing_slash() {
        assert_eq!(<Roles as CreateResource>::create_path(), "/api/groups/");
    }

    #[test]
    fn can_login_defaults_off() {
        let role: Role = serde_json::from_str(r#"{"id":2,"name":"kutubxonachi"}"#).unwrap();

        assert!(!role.can_login);
    }
}
