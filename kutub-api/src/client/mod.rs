use reqwest::{Method, Url};
use reqwest::blocking::{RequestBuilder, Response};
use serde::de::DeserializeOwned;

use kutub_lib::ids::Id;

use crate::{ApiError, GeneralKind, Payload, Ack};

pub mod error;
pub mod auth;
pub mod resource;
pub mod dashboard;
pub mod permissions;
pub mod screen;

use error::{ApiClientError, RequestError};

/// header carrying the code name the server authorizes the request against
pub const PERMISSION_HEADER: &str = "X-permission";

pub struct Info {
    pub url: Url
}

#[derive(Debug, Default)]
pub(crate) struct Credentials {
    token: Option<String>,
    permission: Option<String>,
}

pub struct ApiClient {
    pub(crate) client: reqwest::blocking::Client,
    pub(crate) info: Info,
    pub(crate) creds: Credentials,
}

impl ApiClient {
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder {
            url: None,
            host: None,
            port: None,
            secure: false,
            agent: None
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.info.url
    }

    pub fn token(&self) -> Option<&str> {
        self.creds.token.as_deref()
    }

    pub fn set_token(&mut self, token: Option<String>) {
        self.creds.token = token;
    }

    pub fn permission(&self) -> Option<&str> {
        self.creds.permission.as_deref()
    }

    pub fn set_permission(&mut self, permission: Option<String>) {
        self.creds.permission = permission;
    }

    /// builds a request with the bearer token and, when `scoped`, the
    /// permission header attached
    pub(crate) fn request<U>(
        &self,
        method: Method,
        path: U,
        scoped: bool
    ) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>,
    {
        let url = self.info.url.join(path.as_ref())?;

        Ok(self.request_url(method, url, scoped))
    }

    fn request_url(&self, method: Method, url: Url, scoped: bool) -> RequestBuilder {
        tracing::debug!("{} {}", method, url);

        let mut builder = self.client.request(method, url);

        if let Some(token) = &self.creds.token {
            builder = builder.bearer_auth(token);
        }

        if scoped {
            if let Some(permission) = &self.creds.permission {
                builder = builder.header(PERMISSION_HEADER, permission);
            }
        }

        builder
    }

    /// url of a single record. the id is appended as one percent encoded
    /// segment so it can never leave the collection
    pub(crate) fn item_url(&self, path: &str, id: &Id) -> Result<Url, RequestError> {
        let id = id.as_str();

        if id.is_empty() || id == "." || id == ".." {
            return Err(ApiError::from(GeneralKind::InvalidData)
                .with_message(format!("invalid record id \"{}\"", id))
                .into());
        }

        let mut url = self.info.url.join(path)?;

        {
            let Ok(mut segments) = url.path_segments_mut() else {
                return Err(ApiError::from(GeneralKind::InvalidRequest)
                    .with_message("api url cannot hold a record id")
                    .into());
            };

            segments.pop_if_empty().push(id);
        }

        Ok(url)
    }

    pub(crate) fn get<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>,
    {
        self.request(Method::GET, path, true)
    }

    pub(crate) fn post<U>(&self, path: U) -> Result<RequestBuilder, RequestError>
    where
        U: AsRef<str>
    {
        self.request(Method::POST, path, true)
    }

    pub(crate) fn put_item(&self, path: &str, id: &Id) -> Result<RequestBuilder, RequestError> {
        let url = self.item_url(path, id)?;

        Ok(self.request_url(Method::PUT, url, true))
    }

    pub(crate) fn delete_item(&self, path: &str, id: &Id) -> Result<RequestBuilder, RequestError> {
        let url = self.item_url(path, id)?;

        Ok(self.request_url(Method::DELETE, url, true))
    }
}

pub struct ApiClientBuilder {
    url: Option<Url>,
    host: Option<String>,
    port: Option<u16>,
    secure: bool,
    agent: Option<String>
}

impl ApiClientBuilder {
    pub fn secure(&mut self, is_secure: bool) -> &mut Self {
        self.secure = is_secure;
        self
    }

    pub fn host<H>(&mut self, host: H) -> &mut Self
    where
        H: Into<String>
    {
        self.host = Some(host.into());
        self
    }

    pub fn port(&mut self, port: Option<u16>) -> &mut Self {
        self.port = port;
        self
    }

    /// full base url, overrides host, port and secure
    pub fn base_url(&mut self, url: Url) -> &mut Self {
        self.url = Some(url);
        self
    }

    pub fn user_agent<U>(&mut self, user_agent: U) -> &mut Self
    where
        U: Into<String>
    {
        self.agent = Some(user_agent.into());
        self
    }

    fn resolve_url(&self) -> Result<Url, ApiClientError> {
        if let Some(url) = &self.url {
            return Ok(url.clone());
        }

        let scheme = if self.secure { "https" } else { "http" };
        let host = self.host.as_deref().unwrap_or("localhost");
        let given = match self.port {
            Some(port) => format!("{}://{}:{}/", scheme, host, port),
            None => format!("{}://{}/", scheme, host),
        };

        Ok(Url::parse(&given)?)
    }

    pub fn build(&self) -> Result<ApiClient, ApiClientError> {
        let url = self.resolve_url()?;
        let user_agent = self.agent.clone()
            .unwrap_or_else(|| String::from("kutub-api-client/0.1.0"));

        let client = reqwest::blocking::Client::builder()
            .user_agent(user_agent)
            .build()?;

        Ok(ApiClient {
            client,
            info: Info {
                url
            },
            creds: Credentials::default(),
        })
    }
}

/// reads the server message from a failed response
pub(crate) fn read_error(res: Response) -> RequestError {
    let status = res.status().as_u16();
    let text = match res.text() {
        Ok(text) => text,
        Err(err) => return RequestError::Reqwest(err),
    };

    let msg = serde_json::from_str::<Ack>(&text)
        .ok()
        .and_then(|ack| ack.message);

    tracing::debug!("request failed with status {}: {:?}", status, msg);

    RequestError::Api(ApiError::from_status(status, msg))
}

/// decodes an enveloped body, an explicit `success: false` is an error
pub(crate) fn read_payload<T>(res: Response) -> Result<Payload<T>, RequestError>
where
    T: DeserializeOwned
{
    if !res.status().is_success() {
        return Err(read_error(res));
    }

    let payload: Payload<T> = res.json()?;

    if !payload.success() {
        let err = ApiError::from(GeneralKind::Rejected);

        return Err(match payload.message() {
            Some(msg) => err.with_message(msg),
            None => err,
        }.into());
    }

    Ok(payload)
}

/// body of a successful mutation. an empty body is an acknowledgement, an
/// unreadable one is logged and accepted
fn parse_ack(text: &str) -> Ack {
    if text.trim().is_empty() {
        return Ack::default();
    }

    match serde_json::from_str::<Ack>(text) {
        Ok(ack) => ack,
        Err(err) => {
            tracing::warn!(
                "success response with an unreadable body, treating it as accepted: {} body: {:.200}",
                err,
                text
            );

            Ack::default()
        }
    }
}

/// decodes a mutation response where only `success`/`message` matter
pub(crate) fn read_ack(res: Response) -> Result<Ack, RequestError> {
    if !res.status().is_success() {
        return Err(read_error(res));
    }

    let text = res.text()?;

    let ack = parse_ack(&text);

    if ack.rejected() {
        let err = ApiError::from(GeneralKind::Rejected);

        return Err(match &ack.message {
            Some(msg) => err.with_message(msg.clone()),
            None => err,
        }.into());
    }

    Ok(ack)
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    /// a client pointed at a port nothing listens on
    pub(crate) fn unroutable() -> ApiClient {
        ApiClient::builder()
            .host("127.0.0.1")
            .port(Some(9))
            .build()
            .unwrap()
    }

    #[test]
    fn builder_url() {
        let client = ApiClient::builder()
            .host("kutub.example")
            .port(Some(8080))
            .secure(true)
            .build()
            .unwrap();

        assert_eq!(client.base_url().as_str(), "https://kutub.example:8080/");

        let client = ApiClient::builder().build().unwrap();

        assert_eq!(client.base_url().as_str(), "http://localhost/");
    }

    #[test]
    fn headers_attached() {
        let mut client = unroutable();
        client.set_token(Some("abc".into()));
        client.set_permission(Some("books_view".into()));

        let req = client.get("/api/books").unwrap().build().unwrap();

        assert_eq!(req.url().as_str(), "http://127.0.0.1:9/api/books");
        assert_eq!(req.headers()["authorization"], "Bearer abc");
        assert_eq!(req.headers()[PERMISSION_HEADER], "books_view");

        let req = client.request(Method::GET, "/api/group-permissions", false)
            .unwrap()
            .build()
            .unwrap();

        assert!(req.headers().get(PERMISSION_HEADER).is_none());
    }

    #[test]
    fn no_permission_no_header() {
        let mut client = unroutable();
        client.set_token(Some("abc".into()));

        let req = client.delete_item("/api/books", &Id::from(1)).unwrap().build().unwrap();

        assert_eq!(req.url().as_str(), "http://127.0.0.1:9/api/books/1");
        assert!(req.headers().get(PERMISSION_HEADER).is_none());
    }

    #[test]
    fn ack_bodies() {
        assert!(!parse_ack("").rejected());
        assert!(!parse_ack("<html>gateway</html>").rejected());
        assert!(parse_ack(r#"{"success":false,"message":"Xato"}"#).rejected());
        assert_eq!(parse_ack(r#"{"message":"Saqlandi"}"#).message.as_deref(), Some("Saqlandi"));
    }

    #[test]
    fn item_ids_stay_inside_the_collection() {
        let client = unroutable();

        let url = client.item_url("/api/books", &Id::from("../users/3")).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9/api/books/..%2Fusers%2F3");

        let url = client.item_url("/api/books", &Id::from("1?force=true")).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9/api/books/1%3Fforce=true");
        assert_eq!(url.query(), None);

        let url = client.item_url("/api/groups/", &Id::from(3)).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9/api/groups/3");
    }

    #[test]
    fn empty_item_id_is_refused() {
        let client = unroutable();

        for given in ["", ".", ".."] {
            let err = client.delete_item("/api/books", &Id::from(given)).unwrap_err();

            assert_eq!(
                err.api().map(|e| e.kind().clone()),
                Some(GeneralKind::InvalidData.into())
            );
        }
    }
}
