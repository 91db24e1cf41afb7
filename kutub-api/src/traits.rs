use crate::{ApiError, GeneralKind};

pub trait Validator {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }

    fn has_work(&self) -> bool {
        true
    }

    fn assert_ok(&self) -> Result<(), ApiError> {
        self.validate()?;

        if !self.has_work() {
            Err(ApiError::from(GeneralKind::NoWork))
        } else {
            Ok(())
        }
    }
}

/// collects the names of invalid fields for a single validation error
#[derive(Debug, Default)]
pub(crate) struct Invalid {
    keys: Vec<&'static str>,
}

impl Invalid {
    pub fn new() -> Self {
        Invalid::default()
    }

    pub fn check(&mut self, key: &'static str, valid: bool) -> &mut Self {
        if !valid {
            self.keys.push(key);
        }

        self
    }

    pub fn finish(&self) -> Result<(), ApiError> {
        if self.keys.is_empty() {
            Ok(())
        } else {
            Err(ApiError::invalid_keys(self.keys.iter().copied()))
        }
    }
}
