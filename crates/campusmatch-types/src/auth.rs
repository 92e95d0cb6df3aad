//! Authentication request and response shapes.
//!
//! Registration is a JSON body; login is form-encoded (the service
//! follows the OAuth2 password-grant form convention). The password
//! travels only inside these request bodies and is never stored.

use serde::{Deserialize, Serialize};

/// Body of `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

/// Successful response of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    /// Opaque bearer token. Three dot-separated base64url segments;
    /// the middle segment carries a `sub` claim with the caller's id.
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_serialize() {
        let req = RegisterRequest {
            email: "a@cmu.edu".to_string(),
            password: "hunter2".to_string(),
            full_name: "Ada".to_string(),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"full_name\":\"Ada\""));
    }

    #[test]
    fn test_login_response_without_token_type() {
        let resp: LoginResponse =
            serde_json::from_str(r#"{"access_token": "abc.def.ghi"}"#).unwrap();
        assert_eq!(resp.access_token, "abc.def.ghi");
        assert!(resp.token_type.is_empty());
    }

    #[test]
    fn test_login_response_full() {
        let resp: LoginResponse = serde_json::from_str(
            r#"{"access_token": "abc.def.ghi", "token_type": "bearer"}"#,
        )
        .unwrap();
        assert_eq!(resp.token_type, "bearer");
    }
}
