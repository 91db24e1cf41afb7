use serde::{Serialize, Deserialize};
use strum::{AsRefStr as StrumAsRefStr};

/// shown when the server gave no usable message
pub const GENERIC_FAILURE: &str = "something went wrong, please try again";

/// shown when the server could not be reached at all
pub const GENERIC_NETWORK: &str = "unable to reach the server";

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum AuthKind {
    PermissionDenied,
    Unauthenticated,

    SessionExpired,
    LoginRejected,
}

impl std::fmt::Display for AuthKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    StrumAsRefStr,
    Serialize, Deserialize
)]
pub enum GeneralKind {
    InternalFailure,
    Timeout,

    AlreadyExists,
    NotFound,

    NoWork,
    Rejected,

    ValidationFailed,
    InvalidData,
    InvalidRequest,
}

impl std::fmt::Display for GeneralKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self.as_ref(), f)
    }
}

#[derive(
    Debug, Clone, PartialEq, Eq,
    Serialize, Deserialize
)]
pub enum ApiErrorKind {
    General(GeneralKind),
    Auth(AuthKind),
}

impl ApiErrorKind {
    /// maps a non success http status to the closest kind
    pub fn from_status(status: u16) -> Self {
        match status {
            400 | 422 => GeneralKind::InvalidRequest.into(),
            401 => AuthKind::Unauthenticated.into(),
            403 => AuthKind::PermissionDenied.into(),
            404 => GeneralKind::NotFound.into(),
            408 | 504 => GeneralKind::Timeout.into(),
            409 => GeneralKind::AlreadyExists.into(),
            _ => GeneralKind::InternalFailure.into(),
        }
    }
}

impl std::fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiErrorKind::General(v) => std::fmt::Display::fmt(v, f),
            ApiErrorKind::Auth(v) => std::fmt::Display::fmt(v, f),
        }
    }
}

impl From<GeneralKind> for ApiErrorKind {
    fn from(v: GeneralKind) -> Self {
        ApiErrorKind::General(v)
    }
}

impl From<AuthKind> for ApiErrorKind {
    fn from(v: AuthKind) -> Self {
        ApiErrorKind::Auth(v)
    }
}

impl PartialEq<GeneralKind> for ApiErrorKind {
    fn eq(&self, other: &GeneralKind) -> bool {
        matches!(self, ApiErrorKind::General(v) if v == other)
    }
}

impl PartialEq<AuthKind> for ApiErrorKind {
    fn eq(&self, other: &AuthKind) -> bool {
        matches!(self, ApiErrorKind::Auth(v) if v == other)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Detail {
    Keys(Vec<String>),
}

impl Detail {
    pub fn with_key(key: impl Into<String>) -> Self {
        Detail::Keys(vec![key.into()])
    }

    pub fn keys(&self) -> &[String] {
        match self {
            Detail::Keys(list) => list,
        }
    }
}

impl std::fmt::Display for Detail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Detail::Keys(list) => {
                let mut iter = list.iter();

                if let Some(first) = iter.next() {
                    write!(f, "{}", first)?;

                    for key in iter {
                        write!(f, ",{}", key)?;
                    }
                }
            },
        }

        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    kind: ApiErrorKind,
    detail: Option<Detail>,
    msg: Option<String>,
}

impl ApiError {
    pub fn new() -> Self {
        ApiError {
            kind: ApiErrorKind::General(GeneralKind::InternalFailure),
            detail: None,
            msg: None
        }
    }

    /// a failed status response, the server message is kept verbatim
    pub fn from_status(status: u16, msg: Option<String>) -> Self {
        ApiError {
            kind: ApiErrorKind::from_status(status),
            detail: None,
            msg: msg.filter(|m| !m.trim().is_empty()),
        }
    }

    /// local validation failure naming the offending fields
    pub fn invalid_keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        ApiError {
            kind: GeneralKind::ValidationFailed.into(),
            detail: Some(Detail::Keys(keys.into_iter().map(Into::into).collect())),
            msg: None,
        }
    }

    pub fn with_kind<K>(mut self, kind: K) -> Self
    where
        K: Into<ApiErrorKind>
    {
        self.kind = kind.into();
        self
    }

    pub fn with_message<M>(mut self, msg: M) -> Self
    where
        M: Into<String>
    {
        self.msg = Some(msg.into());
        self
    }

    pub fn kind(&self) -> &ApiErrorKind {
        &self.kind
    }

    pub fn detail(&self) -> Option<&Detail> {
        self.detail.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.msg.as_deref()
    }

    /// text suitable for showing to an operator
    pub fn display_message(&self) -> String {
        if let Some(msg) = &self.msg {
            return msg.clone();
        }

        match (&self.kind, &self.detail) {
            (ApiErrorKind::General(GeneralKind::ValidationFailed), Some(detail)) => {
                format!("please fill in the required fields: {}", detail)
            },
            (ApiErrorKind::General(GeneralKind::NoWork), _) => String::from("nothing to do"),
            (ApiErrorKind::Auth(AuthKind::SessionExpired), _) |
            (ApiErrorKind::Auth(AuthKind::Unauthenticated), _) => {
                String::from("session expired, please log in again")
            },
            (ApiErrorKind::Auth(AuthKind::PermissionDenied), _) => {
                String::from("you do not have permission for this action")
            },
            _ => String::from(GENERIC_FAILURE),
        }
    }
}

impl std::default::Default for ApiError {
    fn default() -> Self {
        ApiError::new()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;

        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }

        if let Some(msg) = &self.msg {
            write!(f, ": {}", msg)?;
        }

        Ok(())
    }
}

impl std::error::Error for ApiError {}

impl<K> From<K> for ApiError
where
    K: Into<ApiErrorKind>
{
    fn from(kind: K) -> Self {
        ApiError {
            kind: kind.into(),
            detail: None,
            msg: None
        }
    }
}

impl<K,M> From<(K, M)> for ApiError
where
    K: Into<ApiErrorKind>,
    M: Into<String>,
{
    fn from((kind, msg): (K, M)) -> Self {
        ApiError {
            kind: kind.into(),
            detail: None,
            msg: Some(msg.into())
        }
    }
}

impl<K> From<(K, Detail)> for ApiError
where
    K: Into<ApiErrorKind>
{
    fn from((kind, detail): (K, Detail)) -> Self {
        ApiError {
            kind: kind.into(),
            detail: Some(detail),
            msg: None
        }
    }
}
