//! single field lookup collections: authors, categories, languages and
//! departments all carry nothing more than a name.

use serde::{Serialize, Deserialize};

use kutub_lib::ids::Id;
use kutub_lib::validation;

use crate::ApiError;
use crate::traits::{Validator, Invalid};
use crate::resource::{resource, CreateResource, UpdateResource, DeleteResource};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Named {
    pub id: Id,
    #[serde(default)]
    pub name: String,
}

pub type Author = Named;
pub type Category = Named;
pub type Language = Named;
pub type Department = Named;

#[derive(Debug, Clone, Serialize)]
pub struct NameBody {
    pub name: String,
}

impl NameBody {
    pub fn new<N>(name: N) -> Self
    where
        N: Into<String>
    {
        NameBody { name: name.into() }
    }
}

impl Validator for NameBody {
    fn validate(&self) -> Result<(), ApiError> {
        Invalid::new()
            .check("name", validation::name_valid(&self.name))
            .finish()
    }
}

resource!(Authors, Author, "author", "/api/auther");
resource!(Categories, Category, "category", "/api/categories");
resource!(Languages, Language, "language", "/api/languages");
resource!(Departments, Department, "department", "/api/kafedra");

macro_rules! name_crud {
    ($($marker:ident),*) => {
        $(
            impl CreateResource for $marker {
                type Create = NameBody;
            }

            impl UpdateResource for $marker {
                type Update = NameBody;
            }

            impl DeleteResource for $marker {}
        )*
    };
}

name_crud!(Authors, Categories, Languages, Departments);
