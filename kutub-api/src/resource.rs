//! describes the REST collections the panel manages.
//!
//! every collection follows the same shape: `GET path` lists items,
//! `POST path` creates one, `PUT path/:id` replaces one and
//! `DELETE path/:id` removes one. the id is always a single escaped
//! path segment. a few collections post somewhere else
//! and override [`CreateResource::create_path`].

use serde::Serialize;
use serde::de::DeserializeOwned;

use kutub_lib::ids::Id;

use crate::Validator;

pub trait Resource {
    type Item: DeserializeOwned;

    /// human readable name used in logs and prompts
    const NAME: &'static str;

    /// collection path relative to the api host
    const PATH: &'static str;

    fn item_id(item: &Self::Item) -> &Id;
}

pub trait CreateResource: Resource {
    type Create: Serialize + Validator;

    fn create_path() -> &'static str {
        Self::PATH
    }
}

pub trait UpdateResource: Resource {
    type Update: Serialize + Validator;
}

pub trait DeleteResource: Resource {}

/// declares a marker type for a collection
macro_rules! resource {
    ($marker:ident, $item:ty, $name:expr, $path:expr) => {
        #[derive(Debug)]
        pub struct $marker;

        impl $crate::resource::Resource for $marker {
            type Item = $item;

            const NAME: &'static str = $name;
            const PATH: &'static str = $path;

            fn item_id(item: &Self::Item) -> &kutub_lib::ids::Id {
                &item.id
            }
        }
    };
}

pub(crate) use resource;
