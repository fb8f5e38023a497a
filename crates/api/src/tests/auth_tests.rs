// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Sign-up validation, sessions, and referral crediting.

use super::helpers::{now, persistence, seed_mission, sign_up_request, signed_up_user};
use crate::auth::{AuthenticationService, SESSION_TTL_HOURS, sign_up};
use crate::error::ApiError;
use crate::request_response::SignUpRequest;
use action_board_domain::ArtifactType;
use action_board_persistence::Persistence;
use time::Duration;

#[test]
fn test_sign_up_creates_user_with_level_and_referral_code() {
    let mut p: Persistence = persistence();
    let user_id: i64 = sign_up(&mut p, &sign_up_request("tanaka@example.com"), now()).unwrap();

    let user = p.get_user_by_id(user_id).unwrap().unwrap();
    assert!(user.referral_code.is_some());
    assert_ne!(user.password_hash, "abcd1234");

    let season = p.get_active_season().unwrap();
    let level = p.get_user_level(user_id, season.season_id).unwrap().unwrap();
    assert_eq!(level.xp, 0);
    assert_eq!(level.level, 1);
}

#[test]
fn test_sign_up_rejects_minors() {
    let mut p: Persistence = persistence();

    // One day short of 18 at the fixed test instant.
    let request = SignUpRequest {
        date_of_birth: "2008-06-16".to_string(),
        ..sign_up_request("minor@example.com")
    };
    let err: ApiError = sign_up(&mut p, &request, now()).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "date_of_birth"));

    // Exactly 18 on the same day passes.
    let request = SignUpRequest {
        date_of_birth: "2008-06-15".to_string(),
        ..sign_up_request("adult@example.com")
    };
    assert!(sign_up(&mut p, &request, now()).is_ok());
}

#[test]
fn test_sign_up_rejects_bad_passwords() {
    let mut p: Persistence = persistence();
    let request = SignUpRequest {
        password: "short1".to_string(),
        ..sign_up_request("weak@example.com")
    };
    assert!(matches!(
        sign_up(&mut p, &request, now()).unwrap_err(),
        ApiError::PasswordPolicyViolation { .. }
    ));
}

#[test]
fn test_sign_up_rejects_bad_email_and_duplicates() {
    let mut p: Persistence = persistence();

    let request = SignUpRequest {
        email: "not-an-email".to_string(),
        ..sign_up_request("x@example.com")
    };
    assert!(matches!(
        sign_up(&mut p, &request, now()).unwrap_err(),
        ApiError::InvalidInput { ref field, .. } if field == "email"
    ));

    sign_up(&mut p, &sign_up_request("taken@example.com"), now()).unwrap();
    assert!(matches!(
        sign_up(&mut p, &sign_up_request("taken@example.com"), now()).unwrap_err(),
        ApiError::InvalidInput { ref field, .. } if field == "email"
    ));
}

#[test]
fn test_login_and_session_round_trip() {
    let mut p: Persistence = persistence();
    signed_up_user(&mut p, "tanaka@example.com");

    let (user, token) =
        AuthenticationService::log_in(&mut p, "tanaka@example.com", "abcd1234", now()).unwrap();
    assert_eq!(user.name, "田中太郎");

    let validated =
        AuthenticationService::validate_session(&mut p, &token, now() + Duration::hours(1))
            .unwrap();
    assert_eq!(validated.user_id, user.user_id);

    AuthenticationService::log_out(&mut p, &token).unwrap();
    assert!(matches!(
        AuthenticationService::validate_session(&mut p, &token, now()).unwrap_err(),
        ApiError::Unauthorized { .. }
    ));
}

#[test]
fn test_login_rejects_wrong_password() {
    let mut p: Persistence = persistence();
    signed_up_user(&mut p, "tanaka@example.com");

    assert!(matches!(
        AuthenticationService::log_in(&mut p, "tanaka@example.com", "wrong999", now()).unwrap_err(),
        ApiError::AuthenticationFailed { .. }
    ));
    assert!(matches!(
        AuthenticationService::log_in(&mut p, "nobody@example.com", "abcd1234", now()).unwrap_err(),
        ApiError::AuthenticationFailed { .. }
    ));
}

#[test]
fn test_sessions_expire() {
    let mut p: Persistence = persistence();
    signed_up_user(&mut p, "tanaka@example.com");
    let (_, token) =
        AuthenticationService::log_in(&mut p, "tanaka@example.com", "abcd1234", now()).unwrap();

    let after_expiry = now() + Duration::hours(SESSION_TTL_HOURS + 1);
    assert!(matches!(
        AuthenticationService::validate_session(&mut p, &token, after_expiry).unwrap_err(),
        ApiError::Unauthorized { .. }
    ));
}

#[test]
fn test_referral_credits_the_referrer_once_per_email() {
    let mut p: Persistence = persistence();
    seed_mission(&mut p, "referral", 2, None, ArtifactType::Referral);

    let referrer = signed_up_user(&mut p, "referrer@example.com");
    let code: String = p
        .get_user_by_id(referrer.user_id)
        .unwrap()
        .unwrap()
        .referral_code
        .unwrap();

    // First invitee: referrer earns the referral mission's XP (difficulty 2 = 100).
    let request = SignUpRequest {
        referral_code: Some(code.clone()),
        ..sign_up_request("invitee@example.com")
    };
    sign_up(&mut p, &request, now()).unwrap();

    let season = p.get_active_season().unwrap();
    let level = p
        .get_user_level(referrer.user_id, season.season_id)
        .unwrap()
        .unwrap();
    assert_eq!(level.xp, 100);

    // Same invitee email again: no double credit.
    let request = SignUpRequest {
        referral_code: Some(code),
        ..sign_up_request("Invitee@Example.com")
    };
    // A different account with the same (case-folded) email is the
    // interesting path; email uniqueness makes this second sign-up
    // fail, but the referral artifact check alone must also block it.
    let _ = sign_up(&mut p, &request, now());
    assert!(p
        .is_email_already_used_in_referral("INVITEE@example.com")
        .unwrap());

    let level = p
        .get_user_level(referrer.user_id, season.season_id)
        .unwrap()
        .unwrap();
    assert_eq!(level.xp, 100);
}

#[test]
fn test_invalid_referral_code_does_not_block_sign_up() {
    let mut p: Persistence = persistence();
    seed_mission(&mut p, "referral", 2, None, ArtifactType::Referral);

    let request = SignUpRequest {
        referral_code: Some("DOES-NOT-EXIST".to_string()),
        ..sign_up_request("invitee@example.com")
    };
    assert!(sign_up(&mut p, &request, now()).is_ok());
}

#[test]
fn test_delete_account_invalidates_sessions() {
    let mut p: Persistence = persistence();
    let user = signed_up_user(&mut p, "tanaka@example.com");
    let (_, token) =
        AuthenticationService::log_in(&mut p, "tanaka@example.com", "abcd1234", now()).unwrap();

    crate::auth::delete_account(&mut p, &user, now()).unwrap();

    assert!(matches!(
        AuthenticationService::validate_session(&mut p, &token, now()).unwrap_err(),
        ApiError::Unauthorized { .. }
    ));
    assert!(p
        .get_user_by_id(user.user_id)
        .unwrap()
        .unwrap()
        .is_deleted());
}
