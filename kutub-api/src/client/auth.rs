use reqwest::Method;

use crate::client::error::RequestError;
use crate::client::{ApiClient, read_payload};
use crate::auth::{LoginBody, LoginData, LOGIN_PATH};
use crate::{ApiError, AuthKind, GeneralKind, Validator};

pub struct Login {
    body: LoginBody
}

impl Login {
    pub fn passport<I, P>(passport_id: I, password: P) -> Self
    where
        I: Into<String>,
        P: Into<String>,
    {
        Login {
            body: LoginBody {
                passport_id: passport_id.into(),
                password: password.into(),
            }
        }
    }

    /// posts the credentials, a rejected login keeps the server message
    pub fn send(self, client: &ApiClient) -> Result<LoginData, RequestError> {
        self.body.validate()?;

        let res = client.request(Method::POST, LOGIN_PATH, false)?
            .json(&self.body)
            .send()?;

        match read_payload::<LoginData>(res) {
            Ok(payload) => Ok(payload.into_payload()),
            Err(RequestError::Api(err)) if *err.kind() == GeneralKind::Rejected => {
                let rejected = ApiError::from(AuthKind::LoginRejected);

                Err(match err.message() {
                    Some(msg) => rejected.with_message(msg),
                    None => rejected.with_message("login failed"),
                }.into())
            },
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::client::test::unroutable;
    use crate::ApiErrorKind;

    #[test]
    fn empty_credentials_are_not_sent() {
        let client = unroutable();

        let err = Login::passport("", "secret").send(&client).unwrap_err();

        match err {
            RequestError::Api(api) => {
                assert_eq!(*api.kind(), ApiErrorKind::General(GeneralKind::ValidationFailed));
            },
            other => panic!("unexpected error {:?}", other),
        }
    }
}
