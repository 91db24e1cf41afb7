use serde::{Serialize, Deserialize};

fn default_success() -> bool {
    true
}

/// standard response envelope `{ success, message, data }`
#[derive(Debug, Serialize, Deserialize)]
pub struct Payload<T> {
    #[serde(default = "default_success")]
    success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,

    data: T
}

impl<T> Payload<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn payload(&self) -> &T {
        &self.data
    }

    pub fn swap_payload<P>(self, data: P) -> Payload<P> {
        Payload {
            success: self.success,
            message: self.message,
            data
        }
    }

    pub fn into_payload(self) -> T {
        self.data
    }
}

impl<T> std::fmt::Display for Payload<T>
where
    T: std::fmt::Display
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> Result<(), std::fmt::Error> {
        if f.alternate() {
            write!(f, "{:#}", self.data)
        } else {
            write!(f, "{}", self.data)
        }
    }
}

/// body of create, update and delete responses where `data` is optional
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Ack {
    /// only an explicit `success: false` counts as a rejection
    pub fn rejected(&self) -> bool {
        self.success == Some(false)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn success_defaults_to_true() {
        let payload: Payload<Vec<i32>> = serde_json::from_str(r#"{"data":[1,2]}"#).unwrap();

        assert!(payload.success());
        assert_eq!(payload.into_payload(), vec![1, 2]);
    }

    #[test]
    fn ack_without_success_is_accepted() {
        let ack: Ack = serde_json::from_str(r#"{"message":"Saqlandi"}"#).unwrap();

        assert!(!ack.rejected());
        assert_eq!(ack.message.as_deref(), Some("Saqlandi"));

        let ack: Ack = serde_json::from_str(r#"{"success":false,"message":"Xato"}"#).unwrap();

        assert!(ack.rejected());
    }
}
