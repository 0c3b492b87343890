//! # Manager Data Transfer Objects

use super::auth::UserInfo;
use serde::{Deserialize, Serialize};

/// `GET /manager/users` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserListResponse {
    pub users: Vec<UserInfo>,
    /// Email of the manager who made the request
    pub manager: String,
}

/// `PATCH /manager/users/{email}/deactivate` response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeactivateResponse {
    pub message: String,
    pub manager: String,
}
