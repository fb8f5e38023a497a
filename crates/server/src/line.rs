// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! LINE login adapter.
//!
//! The callback flow is deliberately thin: validate the CSRF state
//! issued at login start, validate the post-auth redirect target,
//! exchange the authorization code at the provider's token endpoint,
//! and provision or sign in the matching local user. The token
//! exchange sits behind a trait so tests can run without the network.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::Deserialize;
use std::collections::HashSet;
use std::sync::Mutex;
use tracing::warn;

/// Identity claims obtained from a successful code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct LineIdentity {
    /// The provider's stable subject identifier.
    pub subject: String,
    /// The account email, when the provider shares one.
    pub email: Option<String>,
    /// The display name.
    pub name: Option<String>,
    /// The avatar URL.
    pub picture: Option<String>,
}

/// Exchanges an authorization code for verified identity claims.
pub trait LineTokenExchanger: Send + Sync {
    /// Performs the code exchange at the provider's token endpoint.
    ///
    /// # Errors
    ///
    /// Returns a provider- or transport-level error message. The
    /// message is logged server-side, never shown to the client.
    fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<LineIdentity, String>;
}

/// LINE login configuration for the HTTP exchanger.
#[derive(Debug, Clone)]
pub struct LineConfig {
    /// OAuth channel ID.
    pub channel_id: String,
    /// OAuth channel secret.
    pub channel_secret: String,
    /// Registered redirect URI.
    pub redirect_uri: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct IdTokenClaims {
    sub: String,
    email: Option<String>,
    name: Option<String>,
    picture: Option<String>,
}

/// HTTP implementation of the token exchange.
pub struct HttpLineExchanger {
    config: LineConfig,
    client: reqwest::blocking::Client,
}

impl HttpLineExchanger {
    const TOKEN_ENDPOINT: &'static str = "https://api.line.me/oauth2/v2.1/token";
    const ISSUER: &'static str = "https://access.line.me";

    /// Creates a new exchanger for the given channel configuration.
    #[must_use]
    pub fn new(config: LineConfig) -> Self {
        Self {
            config,
            client: reqwest::blocking::Client::new(),
        }
    }

    /// Verifies and decodes an ID token.
    ///
    /// LINE signs ID tokens with HS256 using the channel secret; the
    /// audience must be the channel ID.
    fn verify_id_token(&self, id_token: &str) -> Result<IdTokenClaims, String> {
        let mut validation: Validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.channel_id]);
        validation.set_issuer(&[Self::ISSUER]);

        decode::<IdTokenClaims>(
            id_token,
            &DecodingKey::from_secret(self.config.channel_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| format!("ID token verification: {e}"))
    }
}

impl LineTokenExchanger for HttpLineExchanger {
    fn exchange_code(&self, code: &str, redirect_uri: &str) -> Result<LineIdentity, String> {
        let response: TokenResponse = self
            .client
            .post(Self::TOKEN_ENDPOINT)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", redirect_uri),
                ("client_id", &self.config.channel_id),
                ("client_secret", &self.config.channel_secret),
            ])
            .send()
            .map_err(|e| format!("token endpoint request: {e}"))?
            .error_for_status()
            .map_err(|e| format!("token endpoint status: {e}"))?
            .json()
            .map_err(|e| format!("token endpoint body: {e}"))?;

        let id_token: String = response
            .id_token
            .ok_or_else(|| String::from("token response carried no ID token"))?;
        let claims: IdTokenClaims = self.verify_id_token(&id_token)?;

        Ok(LineIdentity {
            subject: claims.sub,
            email: claims.email,
            name: claims.name,
            picture: claims.picture,
        })
    }
}

/// Issued CSRF states awaiting their callback.
///
/// A state is single-use: the callback consumes it. Unknown states are
/// rejected as forged callbacks.
#[derive(Debug, Default)]
pub struct StateStore {
    issued: Mutex<HashSet<String>>,
}

impl StateStore {
    /// Records a freshly issued state.
    pub fn issue(&self, state: &str) {
        if let Ok(mut issued) = self.issued.lock() {
            issued.insert(state.to_string());
        }
    }

    /// Consumes a state, returning whether it had been issued.
    pub fn consume(&self, state: &str) -> bool {
        match self.issued.lock() {
            Ok(mut issued) => issued.remove(state),
            Err(e) => {
                warn!(error = %e, "State store poisoned");
                false
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        iss: String,
        sub: String,
        aud: String,
        exp: i64,
        email: Option<String>,
    }

    fn exchanger() -> HttpLineExchanger {
        HttpLineExchanger::new(LineConfig {
            channel_id: "channel-123".to_string(),
            channel_secret: "test-secret".to_string(),
            redirect_uri: "https://example.com/auth/line-callback".to_string(),
        })
    }

    fn signed_token(secret: &str) -> String {
        let claims = TestClaims {
            iss: "https://access.line.me".to_string(),
            sub: "U1234567890".to_string(),
            aud: "channel-123".to_string(),
            exp: 4_102_444_800, // far future
            email: Some("tanaka@example.com".to_string()),
        };
        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_verify_id_token_accepts_valid_signature() {
        let claims: IdTokenClaims = exchanger()
            .verify_id_token(&signed_token("test-secret"))
            .unwrap();
        assert_eq!(claims.sub, "U1234567890");
        assert_eq!(claims.email.as_deref(), Some("tanaka@example.com"));
    }

    #[test]
    fn test_verify_id_token_rejects_wrong_secret() {
        assert!(
            exchanger()
                .verify_id_token(&signed_token("other-secret"))
                .is_err()
        );
    }

    #[test]
    fn test_verify_id_token_rejects_garbage() {
        assert!(exchanger().verify_id_token("not-a-jwt").is_err());
    }

    #[test]
    fn test_state_is_single_use() {
        let store: StateStore = StateStore::default();
        store.issue("abc123");
        assert!(store.consume("abc123"));
        assert!(!store.consume("abc123"));
        assert!(!store.consume("never-issued"));
    }
}
