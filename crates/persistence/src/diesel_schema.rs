// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

diesel::table! {
    users (user_id) {
        user_id -> BigInt,
        name -> Text,
        email -> Text,
        password_hash -> Text,
        address_prefecture -> Nullable<Text>,
        avatar_url -> Nullable<Text>,
        date_of_birth -> Nullable<Text>,
        referral_code -> Nullable<Text>,
        created_at -> Text,
        deleted_at -> Nullable<Text>,
    }
}

diesel::table! {
    sessions (session_id) {
        session_id -> BigInt,
        session_token -> Text,
        user_id -> BigInt,
        created_at -> Text,
        last_activity_at -> Text,
        expires_at -> Text,
    }
}

diesel::table! {
    seasons (season_id) {
        season_id -> BigInt,
        slug -> Text,
        name -> Text,
        start_date -> Text,
        end_date -> Nullable<Text>,
        is_active -> Integer,
    }
}

diesel::table! {
    missions (mission_id) {
        mission_id -> BigInt,
        slug -> Text,
        title -> Text,
        difficulty -> Integer,
        max_achievement_count -> Nullable<Integer>,
        required_artifact_type -> Text,
        is_hidden -> Integer,
    }
}

diesel::table! {
    achievements (achievement_id) {
        achievement_id -> BigInt,
        user_id -> BigInt,
        mission_id -> BigInt,
        season_id -> BigInt,
        created_at -> Text,
    }
}

diesel::table! {
    mission_artifacts (artifact_id) {
        artifact_id -> BigInt,
        achievement_id -> BigInt,
        user_id -> BigInt,
        artifact_type -> Text,
        text_content -> Nullable<Text>,
        image_url -> Nullable<Text>,
        latitude -> Nullable<Double>,
        longitude -> Nullable<Double>,
        created_at -> Text,
    }
}

diesel::table! {
    user_levels (user_id, season_id) {
        user_id -> BigInt,
        season_id -> BigInt,
        xp -> BigInt,
        level -> Integer,
        updated_at -> Text,
    }
}

diesel::table! {
    xp_transactions (transaction_id) {
        transaction_id -> BigInt,
        user_id -> BigInt,
        season_id -> BigInt,
        xp_amount -> BigInt,
        source_type -> Text,
        source_id -> Nullable<BigInt>,
        description -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    user_badges (badge_id) {
        badge_id -> BigInt,
        user_id -> BigInt,
        season_id -> BigInt,
        badge_type -> Text,
        sub_type -> Nullable<Text>,
        rank -> Integer,
        is_notified -> Integer,
        achieved_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    poster_boards (board_id) {
        board_id -> BigInt,
        prefecture -> Text,
        city -> Nullable<Text>,
        name -> Nullable<Text>,
        address -> Nullable<Text>,
        number -> Nullable<Text>,
        latitude -> Double,
        longitude -> Double,
        status -> Integer,
    }
}

diesel::table! {
    poster_board_status_history (history_id) {
        history_id -> BigInt,
        board_id -> BigInt,
        user_id -> BigInt,
        previous_status -> Integer,
        new_status -> Integer,
        note -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::table! {
    posting_events (event_id) {
        event_id -> BigInt,
        user_id -> BigInt,
        season_id -> BigInt,
        posted_count -> Integer,
        latitude -> Nullable<Double>,
        longitude -> Nullable<Double>,
        note -> Nullable<Text>,
        created_at -> Text,
    }
}

diesel::joinable!(sessions -> users (user_id));
diesel::joinable!(achievements -> users (user_id));
diesel::joinable!(achievements -> missions (mission_id));
diesel::joinable!(achievements -> seasons (season_id));
diesel::joinable!(mission_artifacts -> achievements (achievement_id));
diesel::joinable!(mission_artifacts -> users (user_id));
diesel::joinable!(user_levels -> users (user_id));
diesel::joinable!(user_levels -> seasons (season_id));
diesel::joinable!(xp_transactions -> users (user_id));
diesel::joinable!(xp_transactions -> seasons (season_id));
diesel::joinable!(user_badges -> users (user_id));
diesel::joinable!(user_badges -> seasons (season_id));
diesel::joinable!(poster_board_status_history -> poster_boards (board_id));
diesel::joinable!(poster_board_status_history -> users (user_id));
diesel::joinable!(posting_events -> users (user_id));
diesel::joinable!(posting_events -> seasons (season_id));

diesel::allow_tables_to_appear_in_same_query!(
    achievements,
    mission_artifacts,
    missions,
    poster_board_status_history,
    poster_boards,
    posting_events,
    seasons,
    sessions,
    user_badges,
    user_levels,
    users,
    xp_transactions,
);
