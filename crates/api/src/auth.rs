// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sign-up, credential login, and token-session authentication.
//!
//! Sessions are opaque random tokens stored server-side with a
//! sliding-activity timestamp and a hard expiry. All operations take
//! the persistence adapter and the current instant from the caller.

use crate::error::{ApiError, ApiResult, translate_persistence_error};
use crate::password_policy::PasswordPolicy;
use crate::referral::process_referral;
use crate::request_response::SignUpRequest;
use action_board_domain::{is_prefecture, parse_birth_date, validate_age};
use action_board_persistence::{NewSession, NewUser, Persistence, PersistenceError, SessionData};
use rand::Rng;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::{error, warn};

/// Session lifetime in hours.
pub const SESSION_TTL_HOURS: i64 = 24;

/// A signed-in user attached to a validated session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    /// The user's ID.
    pub user_id: i64,
    /// The user's display name.
    pub name: String,
}

/// Formats an instant as RFC 3339 UTC.
pub(crate) fn fmt_rfc3339(instant: OffsetDateTime) -> ApiResult<String> {
    instant.format(&Rfc3339).map_err(|e| {
        error!(error = %e, "Failed to format timestamp");
        ApiError::Internal {
            message: String::from("timestamp formatting failed"),
        }
    })
}

fn generate_token(bytes: usize) -> String {
    let mut buf: Vec<u8> = vec![0; bytes];
    rand::rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

fn looks_like_email(email: &str) -> bool {
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}

/// Registers a new user.
///
/// Validates the email shape, the password policy, and the adult age
/// gate; creates the user with a hashed password and a fresh referral
/// code, initializes the season level row, and processes an inbound
/// referral code when present. Referral processing never fails the
/// sign-up itself.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `request` - The sign-up payload
/// * `now` - The current instant
///
/// # Errors
///
/// Returns a typed validation error for bad input, or an internal
/// error if the user cannot be created.
pub fn sign_up(
    persistence: &mut Persistence,
    request: &SignUpRequest,
    now: OffsetDateTime,
) -> ApiResult<i64> {
    if !looks_like_email(&request.email) {
        return Err(ApiError::InvalidInput {
            field: String::from("email"),
            message: String::from("メールアドレスの形式が正しくありません"),
        });
    }

    PasswordPolicy::default().validate(&request.password)?;

    if request.name.trim().is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("name"),
            message: String::from("名前を入力してください"),
        });
    }

    if let Some(prefecture) = request.address_prefecture.as_deref()
        && !is_prefecture(prefecture)
    {
        return Err(ApiError::InvalidInput {
            field: String::from("address_prefecture"),
            message: format!("不明な都道府県です: {prefecture}"),
        });
    }

    let birth_date = parse_birth_date(&request.date_of_birth).map_err(|_| {
        ApiError::InvalidInput {
            field: String::from("date_of_birth"),
            message: String::from("生年月日の形式が正しくありません"),
        }
    })?;
    if let Some(message) = validate_age(birth_date, now.date()) {
        return Err(ApiError::InvalidInput {
            field: String::from("date_of_birth"),
            message,
        });
    }

    if persistence
        .get_user_by_email(&request.email)
        .map_err(|e| {
            error!(error = %e, "Failed to check email uniqueness");
            translate_persistence_error("sign_up", &e)
        })?
        .is_some()
    {
        return Err(ApiError::InvalidInput {
            field: String::from("email"),
            message: String::from("このメールアドレスは既に登録されています"),
        });
    }

    let password_hash: String =
        bcrypt::hash(&request.password, bcrypt::DEFAULT_COST).map_err(|e| {
            error!(error = %e, "Failed to hash password");
            ApiError::Internal {
                message: String::from("sign_up failed"),
            }
        })?;

    let created_at: String = fmt_rfc3339(now)?;
    let user_id: i64 = persistence
        .create_user(&NewUser {
            name: request.name.clone(),
            email: request.email.clone(),
            password_hash,
            address_prefecture: request.address_prefecture.clone(),
            avatar_url: None,
            date_of_birth: Some(request.date_of_birth.clone()),
            referral_code: None,
            created_at,
        })
        .map_err(|e| {
            error!(error = %e, "Failed to create user");
            translate_persistence_error("sign_up", &e)
        })?;

    // Every user gets a shareable referral code. A collision with the
    // 8-byte random code is not worth retry machinery; log and move on.
    let referral_code: String = generate_token(8).to_uppercase();
    if let Err(e) = persistence.set_referral_code(user_id, &referral_code) {
        warn!(error = %e, user_id, "Failed to assign referral code");
    }

    initialize_level_for_active_season(persistence, user_id, now);

    if let Some(code) = request.referral_code.as_deref() {
        // Failures are logged inside; the inviter's reward never
        // blocks the invitee's registration.
        process_referral(persistence, code, &request.email, now);
    }

    Ok(user_id)
}

fn initialize_level_for_active_season(
    persistence: &mut Persistence,
    user_id: i64,
    now: OffsetDateTime,
) {
    let season = match persistence.get_active_season() {
        Ok(season) => season,
        Err(e) => {
            warn!(error = %e, "No active season; skipping level initialization");
            return;
        }
    };
    let Ok(now_str) = fmt_rfc3339(now) else {
        return;
    };
    if let Err(e) = persistence.initialize_user_level(user_id, season.season_id, &now_str) {
        error!(error = %e, user_id, "Failed to initialize user level");
    }
}

/// Authentication and session management.
///
/// Associated functions only; all state lives in the injected
/// persistence adapter.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Verifies credentials and opens a session.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The injected persistence adapter
    /// * `email` - The login email
    /// * `password` - The plain-text password
    /// * `now` - The current instant
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` for unknown emails or wrong
    /// passwords; the two cases are indistinguishable to the caller.
    pub fn log_in(
        persistence: &mut Persistence,
        email: &str,
        password: &str,
        now: OffsetDateTime,
    ) -> ApiResult<(AuthenticatedUser, String)> {
        let failed = || ApiError::AuthenticationFailed {
            reason: String::from("メールアドレスまたはパスワードが正しくありません"),
        };

        let user = persistence
            .get_user_by_email(email)
            .map_err(|e| {
                error!(error = %e, "Login lookup failed");
                ApiError::Internal {
                    message: String::from("log_in failed"),
                }
            })?
            .ok_or_else(failed)?;

        let verified: bool = bcrypt::verify(password, &user.password_hash).map_err(|e| {
            error!(error = %e, "Password verification failed");
            ApiError::Internal {
                message: String::from("log_in failed"),
            }
        })?;
        if !verified {
            return Err(failed());
        }

        let token: String = generate_token(32);
        let now_str: String = fmt_rfc3339(now)?;
        let expires_at: String = fmt_rfc3339(now + time::Duration::hours(SESSION_TTL_HOURS))?;
        persistence
            .create_session(&NewSession {
                session_token: token.clone(),
                user_id: user.user_id,
                created_at: now_str.clone(),
                last_activity_at: now_str,
                expires_at,
            })
            .map_err(|e| {
                error!(error = %e, "Failed to create session");
                ApiError::Internal {
                    message: String::from("log_in failed"),
                }
            })?;

        Ok((
            AuthenticatedUser {
                user_id: user.user_id,
                name: user.name,
            },
            token,
        ))
    }

    /// Validates a session token and returns the signed-in user.
    ///
    /// Expired sessions are deleted on sight. Valid sessions get their
    /// activity timestamp refreshed.
    ///
    /// # Arguments
    ///
    /// * `persistence` - The injected persistence adapter
    /// * `session_token` - The opaque token from the request
    /// * `now` - The current instant
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` for unknown, expired, or orphaned
    /// sessions.
    pub fn validate_session(
        persistence: &mut Persistence,
        session_token: &str,
        now: OffsetDateTime,
    ) -> ApiResult<AuthenticatedUser> {
        let unauthorized = || ApiError::Unauthorized {
            action: String::from("validate_session"),
        };

        let session: SessionData = persistence
            .get_session_by_token(session_token)
            .map_err(|e| {
                error!(error = %e, "Session lookup failed");
                ApiError::Internal {
                    message: String::from("validate_session failed"),
                }
            })?
            .ok_or_else(unauthorized)?;

        let expires_at = OffsetDateTime::parse(&session.expires_at, &Rfc3339).map_err(|e| {
            error!(error = %e, "Stored session expiry is unparsable");
            ApiError::Internal {
                message: String::from("validate_session failed"),
            }
        })?;
        if expires_at <= now {
            if let Err(e) = persistence.delete_session(session_token) {
                warn!(error = %e, "Failed to delete expired session");
            }
            return Err(unauthorized());
        }

        let user = persistence
            .get_user_by_id(session.user_id)
            .map_err(|e| {
                error!(error = %e, "Session user lookup failed");
                ApiError::Internal {
                    message: String::from("validate_session failed"),
                }
            })?
            .filter(|user| !user.is_deleted())
            .ok_or_else(unauthorized)?;

        let now_str: String = fmt_rfc3339(now)?;
        if let Err(e) = persistence.update_session_activity(session.session_id, &now_str) {
            warn!(error = %e, "Failed to refresh session activity");
        }

        Ok(AuthenticatedUser {
            user_id: user.user_id,
            name: user.name,
        })
    }

    /// Closes a session.
    ///
    /// # Errors
    ///
    /// Returns an internal error if the delete fails.
    pub fn log_out(persistence: &mut Persistence, session_token: &str) -> ApiResult<()> {
        persistence.delete_session(session_token).map_err(|e| {
            error!(error = %e, "Failed to delete session");
            ApiError::Internal {
                message: String::from("log_out failed"),
            }
        })
    }
}

/// Deletes the signed-in user's account.
///
/// Soft-deletes the user row, hard-deletes owned rows, and destroys
/// all sessions.
///
/// # Arguments
///
/// * `persistence` - The injected persistence adapter
/// * `user` - The signed-in user
/// * `now` - The current instant
///
/// # Errors
///
/// Returns an internal error if the deletion fails; the transaction
/// rolls back in that case.
pub fn delete_account(
    persistence: &mut Persistence,
    user: &AuthenticatedUser,
    now: OffsetDateTime,
) -> ApiResult<()> {
    let now_str: String = fmt_rfc3339(now)?;
    persistence
        .delete_account(user.user_id, &now_str)
        .map_err(|e| match e {
            PersistenceError::UserNotFound(_) => translate_persistence_error("delete_account", &e),
            _ => {
                error!(error = %e, user_id = user.user_id, "Account deletion failed");
                ApiError::Internal {
                    message: String::from("delete_account failed"),
                }
            }
        })
}
