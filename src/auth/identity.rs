//! Provider claim sets and the mapping to internal identities
//!
//! Internal user ids are derived as `<provider>_<subject>`, so no lookup
//! table is needed and the same provider account always maps to the same id.

use serde::Deserialize;
use std::fmt;

/// Supported third-party identity providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    Google,
    Facebook,
}

impl Provider {
    /// Prefix used in internal user ids
    pub fn as_str(&self) -> &'static str {
        match self {
            Provider::Google => "google",
            Provider::Facebook => "facebook",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Provider::Google => "Google",
            Provider::Facebook => "Facebook",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payload of Google's tokeninfo endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoogleClaims {
    #[serde(rename = "sub")]
    pub subject_id: String,
    pub email: String,
    pub name: String,
    #[serde(rename = "picture", default)]
    pub photo_url: Option<String>,
    #[serde(rename = "aud")]
    pub audience: String,
    #[serde(rename = "iss")]
    pub issuer: String,
}

/// Payload of Facebook's Graph `/me?fields=id,name,email`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FacebookClaims {
    #[serde(rename = "id")]
    pub provider_id: String,
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Normalized output of a provider verifier
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderClaims {
    Google(GoogleClaims),
    Facebook(FacebookClaims),
}

impl ProviderClaims {
    pub fn provider(&self) -> Provider {
        match self {
            ProviderClaims::Google(_) => Provider::Google,
            ProviderClaims::Facebook(_) => Provider::Facebook,
        }
    }
}

/// Identity as seen by the rest of the application. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InternalIdentity {
    pub user_id: String,
    pub email: String,
    pub name: String,
    pub photo_url: Option<String>,
}

pub fn internal_user_id(provider: Provider, subject: &str) -> String {
    format!("{}_{}", provider.as_str(), subject)
}

/// Maps verified provider claims to an internal identity.
///
/// Facebook does not always return an email; in that case a placeholder
/// `<userId>@facebook.com` is synthesized. It is not a deliverable address.
pub fn map_identity(claims: &ProviderClaims) -> InternalIdentity {
    match claims {
        ProviderClaims::Google(google) => InternalIdentity {
            user_id: internal_user_id(Provider::Google, &google.subject_id),
            email: google.email.clone(),
            name: google.name.clone(),
            photo_url: google.photo_url.clone(),
        },
        ProviderClaims::Facebook(facebook) => {
            let user_id = internal_user_id(Provider::Facebook, &facebook.provider_id);
            let email = facebook
                .email
                .clone()
                .unwrap_or_else(|| format!("{}@facebook.com", user_id));
            InternalIdentity {
                user_id,
                email,
                name: facebook.name.clone(),
                photo_url: None,
            }
        }
    }
}
