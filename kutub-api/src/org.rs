//! academic structure: faculties and their title-only lookups (education
//! forms, training types, faculty groups), directions and student groups.
//! departments only carry a name and live in [`crate::catalog`].

use serde::{Serialize, Deserialize};

use kutub_lib::ids::{Id, DepartmentId, DirectionId};
use kutub_lib::validation;
use kutub_lib::serde::id_as_number;

use crate::ApiError;
use crate::traits::{Validator, Invalid};
use crate::resource::{resource, CreateResource, UpdateResource, DeleteResource};

/// record of the faculty service, only an id and a title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Titled {
    #[serde(alias = "_id")]
    pub id: Id,
    #[serde(default)]
    pub title: String,
}

pub type Faculty = Titled;
pub type Education = Titled;
pub type TredType = Titled;
pub type FacultyGroup = Titled;

#[derive(Debug, Clone, Serialize)]
pub struct FacultyBody {
    pub title: String,
}

impl Validator for FacultyBody {
    fn validate(&self) -> Result<(), ApiError> {
        Invalid::new()
            .check("title", validation::name_valid(&self.title))
            .finish()
    }
}

macro_rules! titled_crud {
    ($marker:ident, $name:expr, $path:expr) => {
        resource!($marker, Titled, $name, $path);

        impl CreateResource for $marker {
            type Create = FacultyBody;
        }

        impl UpdateResource for $marker {
            type Update = FacultyBody;
        }

        impl DeleteResource for $marker {}
    };
}

titled_crud!(Faculties, "faculty", "/api/v1/faculty");
titled_crud!(Educations, "education form", "/api/v1/faculty/education");
titled_crud!(TredTypes, "training type", "/api/v1/faculty/tredtype");
titled_crud!(FacultyGroups, "faculty group", "/api/v1/faculty/group");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Direction {
    pub id: DirectionId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub kafedra_id: Option<DepartmentId>,
}

/// a direction always belongs to a department
#[derive(Debug, Clone, Serialize)]
pub struct DirectionBody {
    pub name: String,
    #[serde(serialize_with = "id_as_number")]
    pub kafedra_id: DepartmentId,
}

impl Validator for DirectionBody {
    fn validate(&self) -> Result<(), ApiError> {
        Invalid::new()
            .check("name", validation::name_valid(&self.name))
            .check("kafedra_id", validation::required(&self.kafedra_id))
            .finish()
    }
}

resource!(Directions, Direction, "direction", "/api/yonalish");

impl CreateResource for Directions {
    type Create = DirectionBody;
}

impl UpdateResource for Directions {
    type Update = DirectionBody;
}

impl DeleteResource for Directions {}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentGroup {
    pub id: Id,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub yonalish_id: Option<DirectionId>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentGroupBody {
    pub name: String,
    #[serde(serialize_with = "id_as_number")]
    pub yonalish_id: DirectionId,
}

impl Validator for StudentGroupBody {
    fn validate(&self) -> Result<(), ApiError> {
        Invalid::new()
            .check("name", validation::name_valid(&self.name))
            .check("yonalish_id", validation::required(&self.yonalish_id))
            .finish()
    }
}

resource!(StudentGroups, StudentGroup, "student group", "/api/student-groups");

impl CreateResource for StudentGroups {
    type Create = StudentGroupBody;
}

impl UpdateResource for StudentGroups {
    type Update = StudentGroupBody;
}

impl DeleteResource for StudentGroups {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::resource::Resource;

    #[test]
    fn faculty_accepts_mongo_style_id() {
        let faculty: Faculty = serde_json::from_str(
            r#"{"_id":"65f0a1","title":"Fizika"}"#
        ).unwrap();

        assert_eq!(faculty.id, "65f0a1");
    }

    #[test]
    fn faculty_lookups_share_the_title_body() {
        assert_eq!(Educations::PATH, "/api/v1/faculty/education");
        assert_eq!(<TredTypes as CreateResource>::create_path(), "/api/v1/faculty/tredtype");
        assert_eq!(FacultyGroups::PATH, "/api/v1/faculty/group");

        let body = FacultyBody { title: "Sirtqi".into() };

        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"title":"Sirtqi"}"#);
        assert!(FacultyBody { title: " ".into() }.validate().is_err());
    }

    #[test]
    fn direction_requires_department() {
        let body = DirectionBody {
            name: "Informatika".into(),
            kafedra_id: Id::from(""),
        };

        let err = body.validate().unwrap_err();

        assert_eq!(err.to_string(), "ValidationFailed: kafedra_id");
    }

    #[test]
    fn group_sends_numeric_direction() {
        let body = StudentGroupBody {
            name: "IT-21".into(),
            yonalish_id: Id::from("12"),
        };

        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json, serde_json::json!({"name": "IT-21", "yonalish_id": 12}));
    }
}
