//! Authentication data models

use serde::{Deserialize, Serialize};

use super::identity::InternalIdentity;
use super::token::SessionIdentity;

/// Session JWT claims
#[derive(Serialize, Deserialize, Debug)]
pub struct SessionClaims {
    pub iss: String,
    pub aud: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub exp: i64,
}

/// Body of `POST /auth/google`
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct GoogleAuthRequest {
    pub id_token: String,
}

/// Body of `POST /auth/facebook`
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct FacebookAuthRequest {
    pub access_token: String,
}

/// User as returned to the client
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub photo_url: Option<String>,
}

impl From<InternalIdentity> for UserDto {
    fn from(identity: InternalIdentity) -> Self {
        Self {
            id: identity.user_id,
            name: identity.name,
            email: identity.email,
            photo_url: identity.photo_url,
        }
    }
}

impl From<SessionIdentity> for UserDto {
    fn from(identity: SessionIdentity) -> Self {
        Self {
            id: identity.user_id,
            name: identity.name,
            email: identity.email,
            photo_url: None,
        }
    }
}

/// Successful login response
#[derive(Serialize, Deserialize, Debug)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserDto,
}
