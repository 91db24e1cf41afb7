use crate::client::error::RequestError;
use crate::client::{ApiClient, read_payload};
use crate::dashboard::{Metrics, DASHBOARD_PATH};
use crate::Payload;

pub struct QueryDashboard {}

impl QueryDashboard {
    pub fn new() -> Self {
        QueryDashboard {}
    }

    pub fn send(self, client: &ApiClient) -> Result<Payload<Metrics>, RequestError> {
        let res = client.get(DASHBOARD_PATH)?.send()?;

        read_payload(res)
    }
}

impl Default for QueryDashboard {
    fn default() -> Self {
        QueryDashboard::new()
    }
}
