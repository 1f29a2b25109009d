use serde::Serialize;

use crate::blood_requests::repo::{BloodRequest, BloodRequestWithRequester};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodRequestListResponse {
    pub success: bool,
    pub count: usize,
    pub blood_requests: Vec<BloodRequestWithRequester>,
}

#[derive(Debug, Serialize)]
pub struct BloodRequestActionResponse {
    pub success: bool,
    pub message: String,
    pub request: BloodRequest,
}
