use std::marker::PhantomData;

use kutub_lib::ids::Id;

use crate::client::error::RequestError;
use crate::client::{ApiClient, read_payload, read_ack};
use crate::resource::{Resource, CreateResource, UpdateResource, DeleteResource};
use crate::{Payload, Ack, Validator};

pub struct QueryList<R> {
    marker: PhantomData<R>,
}

impl<R> QueryList<R>
where
    R: Resource
{
    pub fn new() -> Self {
        QueryList { marker: PhantomData }
    }

    pub fn send(self, client: &ApiClient) -> Result<Payload<Vec<R::Item>>, RequestError> {
        let res = client.get(R::PATH)?.send()?;

        read_payload(res)
    }
}

impl<R> Default for QueryList<R>
where
    R: Resource
{
    fn default() -> Self {
        QueryList::new()
    }
}

pub struct CreateItem<R>
where
    R: CreateResource
{
    body: R::Create,
}

impl<R> CreateItem<R>
where
    R: CreateResource
{
    pub fn new(body: R::Create) -> Self {
        CreateItem { body }
    }

    /// validates locally first, nothing is sent for an invalid body
    pub fn send(self, client: &ApiClient) -> Result<Ack, RequestError> {
        self.body.assert_ok()?;

        let res = client.post(R::create_path())?
            .json(&self.body)
            .send()?;

        read_ack(res)
    }
}

pub struct UpdateItem<R>
where
    R: UpdateResource
{
    id: Id,
    body: R::Update,
}

impl<R> UpdateItem<R>
where
    R: UpdateResource
{
    pub fn id(id: Id, body: R::Update) -> Self {
        UpdateItem { id, body }
    }

    pub fn send(self, client: &ApiClient) -> Result<Ack, RequestError> {
        self.body.assert_ok()?;

        let res = client.put_item(R::PATH, &self.id)?
            .json(&self.body)
            .send()?;

        read_ack(res)
    }
}

pub struct DeleteItem<R> {
    id: Id,
    marker: PhantomData<R>,
}

impl<R> DeleteItem<R>
where
    R: DeleteResource
{
    pub fn id(id: Id) -> Self {
        DeleteItem { id, marker: PhantomData }
    }

    pub fn send(self, client: &ApiClient) -> Result<Ack, RequestError> {
        let res = client.delete_item(R::PATH, &self.id)?.send()?;

        read_ack(res)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{GeneralKind, ApiErrorKind};
    use crate::client::test::unroutable;
    use crate::books::{Books, BookBody};
    use crate::catalog::{Authors, NameBody};
    use crate::users::{StaffMembers, RegisterStaff};

    fn validation_failed(err: RequestError) -> Vec<String> {
        match err {
            RequestError::Api(api) => {
                assert_eq!(*api.kind(), ApiErrorKind::General(GeneralKind::ValidationFailed));

                api.detail().map(|d| d.keys().to_vec()).unwrap_or_default()
            },
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn invalid_create_is_not_sent() {
        let client = unroutable();

        let err = CreateItem::<Authors>::new(NameBody::new(""))
            .send(&client)
            .unwrap_err();

        assert_eq!(validation_failed(err), vec!["name"]);
    }

    #[test]
    fn invalid_update_is_not_sent() {
        let client = unroutable();
        let body = BookBody {
            name: "Sarob".into(),
            auther_id: Id::from(""),
            year: 1937,
            page: 0,
            book_code: "S-1".into(),
        };

        let err = UpdateItem::<Books>::id(Id::from(4), body)
            .send(&client)
            .unwrap_err();

        assert_eq!(validation_failed(err), vec!["auther_id", "page"]);
    }

    #[test]
    fn staff_phone_checked_before_register() {
        let client = unroutable();
        let body = RegisterStaff {
            full_name: "Ali".into(),
            passport_id: "AA1".into(),
            phone: "998901234567".into(),
            password: "pw".into(),
            group_id: Id::from(2),
        };

        let err = CreateItem::<StaffMembers>::new(body)
            .send(&client)
            .unwrap_err();

        assert_eq!(validation_failed(err), vec!["phone"]);
    }

    #[test]
    fn unreachable_server_is_a_transport_error() {
        let client = unroutable();

        let err = QueryList::<Authors>::new().send(&client).unwrap_err();

        assert!(matches!(err, RequestError::Reqwest(_)));
    }
}
