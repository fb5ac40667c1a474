use googletest::prelude::*;
use warden::Response;
use warden_auth::{AuthLevel, LevelAuth, AUTH_LEVEL_KEY};
use warden_session::SessionStore;

use crate::helpers::{cookie_pair, request};

/// Grant `level` to a brand new client, returning the cookie it should send back.
fn grant(gate: &LevelAuth, level: u32) -> String {
    let mut response = Response::ok();
    gate.set_auth_level(&mut response, &request("/login", None), level)
        .unwrap();
    cookie_pair(&response)
}

#[googletest::test]
fn granted_levels_satisfy_lower_or_equal_requirements() {
    let gate = LevelAuth::new(SessionStore::default());
    let cookie = grant(&gate, 5);
    let request = request("/", Some(&cookie));

    expect_true!(gate.has_auth(&request, "5"));
    expect_true!(gate.has_auth(&request, "4"));
    expect_true!(gate.has_auth(&request, "0"));
    expect_false!(gate.has_auth(&request, "6"));
    expect_that!(gate.auth_level(&request), some(eq(AuthLevel::new(5))));
}

#[googletest::test]
fn malformed_requirements_deny_access() {
    let gate = LevelAuth::new(SessionStore::default());
    let cookie = grant(&gate, 5);
    let request = request("/", Some(&cookie));

    expect_false!(gate.has_auth(&request, "abc"));
    expect_false!(gate.has_auth(&request, ""));
    expect_false!(gate.has_auth(&request, "-1"));
    expect_false!(gate.has_auth(&request, "4294967296"));
    expect_false!(gate.has_auth(&request, "+5"));
    expect_true!(gate.has_auth(&request, "5"));
}

#[googletest::test]
fn requests_without_a_session_are_denied() {
    let gate = LevelAuth::new(SessionStore::default());
    let request = request("/", None);

    expect_false!(gate.has_auth(&request, "0"));
    expect_that!(gate.auth_level(&request), none());
}

#[googletest::test]
fn sessions_without_a_level_are_denied() {
    let store = SessionStore::default();
    let gate = LevelAuth::new(store.clone());
    let mut response = Response::ok();
    store.start(&mut response).unwrap();
    let request = request("/", Some(&cookie_pair(&response)));

    expect_false!(gate.has_auth(&request, "0"));
}

#[googletest::test]
fn truncated_levels_are_ignored() {
    let store = SessionStore::default();
    let gate = LevelAuth::new(store.clone());
    let mut response = Response::ok();
    let session = store.start(&mut response).unwrap();
    session.insert(AUTH_LEVEL_KEY, vec![0, 0, 9]);
    let request = request("/", Some(&cookie_pair(&response)));

    expect_false!(gate.has_auth(&request, "0"));
}

#[googletest::test]
fn the_level_is_stored_as_four_big_endian_bytes() {
    let store = SessionStore::default();
    let gate = LevelAuth::new(store.clone());
    let cookie = grant(&gate, 258);

    let session = store.get(&request("/", Some(&cookie))).unwrap();
    assert_eq!(session.get(AUTH_LEVEL_KEY), Some(vec![0, 0, 1, 2]));
}

#[googletest::test]
fn setting_a_level_reuses_the_existing_session() {
    let store = SessionStore::default();
    let gate = LevelAuth::new(store.clone());
    let cookie = grant(&gate, 10);
    let request = request("/", Some(&cookie));

    let mut response = Response::ok();
    gate.set_auth_level(&mut response, &request, 1).unwrap();
    expect_that!(store.len(), eq(1));
    expect_true!(response.headers().is_empty());
    // Levels are overwritten, not maxed.
    expect_false!(gate.has_auth(&request, "2"));
    expect_true!(gate.has_auth(&request, "1"));
}

#[googletest::test]
fn revoked_levels_no_longer_grant_access() {
    let gate = LevelAuth::new(SessionStore::default());
    let cookie = grant(&gate, 3);
    let request = request("/", Some(&cookie));

    expect_true!(gate.revoke_auth_level(&request));
    expect_false!(gate.has_auth(&request, "0"));
    expect_false!(gate.revoke_auth_level(&request));
}
