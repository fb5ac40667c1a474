use std::collections::HashSet;

use googletest::prelude::*;
use warden::Response;
use warden_session::{SessionConfig, SessionStore};

use crate::helpers::{cookie_pair, request_with_cookie, set_cookie_headers};

#[googletest::test]
fn started_sessions_have_distinct_ids() {
    let store = SessionStore::default();
    let mut ids = HashSet::new();
    for _ in 0..1000 {
        let session = store.start(&mut Response::ok()).unwrap();
        ids.insert(session.id());
    }
    expect_that!(ids.len(), eq(1000));
    expect_that!(store.len(), eq(1000));
}

#[googletest::test]
fn the_session_cookie_carries_the_expected_attributes() {
    let store = SessionStore::default();
    let mut response = Response::ok();
    let session = store.start(&mut response).unwrap();

    let headers = set_cookie_headers(&response);
    expect_that!(headers.len(), eq(1));
    let header = headers[0].as_str();
    let pair = format!("id={}", session.id());
    expect_that!(header, starts_with(pair.as_str()));
    expect_that!(header, contains_substring("Path=/"));
    expect_that!(header, contains_substring("HttpOnly"));
    expect_that!(header, contains_substring("Max-Age=86400"));
}

#[googletest::test]
fn a_zero_max_age_issues_a_browser_session_cookie() {
    let mut config = SessionConfig::default();
    config.cookie.name = "session".into();
    config.cookie.max_age = 0;
    let store = SessionStore::new(config);

    let mut response = Response::ok();
    store.start(&mut response).unwrap();
    let header = set_cookie_headers(&response).remove(0);
    expect_that!(header.as_str(), starts_with("session="));
    expect_that!(header.as_str(), not(contains_substring("Max-Age")));
}

#[googletest::test]
fn start_appends_to_existing_set_cookie_headers() {
    let store = SessionStore::default();
    let mut response = Response::ok().append_header(
        warden::http::header::SET_COOKIE,
        warden::http::HeaderValue::from_static("theme=dark"),
    );
    store.start(&mut response).unwrap();
    expect_that!(set_cookie_headers(&response).len(), eq(2));
}

#[googletest::test]
fn get_returns_the_session_identified_by_the_cookie() {
    let store = SessionStore::default();
    let mut response = Response::ok();
    let session = store.start(&mut response).unwrap();
    session.insert("answer", vec![42]);

    let cookie = cookie_pair(&response);
    let request = request_with_cookie(Some(&cookie));
    let retrieved = store.get(&request).unwrap();
    expect_that!(retrieved.id(), eq(session.id()));
    expect_true!(retrieved.ptr_eq(&session));
    assert_eq!(retrieved.get("answer"), Some(vec![42]));
}

#[googletest::test]
fn get_finds_the_session_cookie_among_other_cookies() {
    let store = SessionStore::default();
    let mut response = Response::ok();
    let session = store.start(&mut response).unwrap();

    let cookie = format!("theme=dark; {}; lang=en", cookie_pair(&response));
    let retrieved = store.get(&request_with_cookie(Some(&cookie))).unwrap();
    expect_that!(retrieved.id(), eq(session.id()));
}

#[googletest::test]
fn invalid_sibling_cookies_do_not_hide_the_session() {
    let store = SessionStore::default();
    let mut response = Response::ok();
    let session = store.start(&mut response).unwrap();
    let pair = cookie_pair(&response);

    for cookie in [
        format!("{pair}; tracker"),
        format!("=orphan; {pair}"),
        format!("tracker; =orphan; {pair}; lang=en"),
    ] {
        let retrieved = store.get(&request_with_cookie(Some(&cookie)));
        assert!(
            retrieved.is_ok_and(|s| s.ptr_eq(&session)),
            "No session found for `{cookie}`"
        );
    }
}

#[googletest::test]
fn get_fails_without_a_usable_session_cookie() {
    let store = SessionStore::default();
    store.start(&mut Response::ok()).unwrap();

    // No cookie at all.
    expect_true!(store.get(&request_with_cookie(None)).is_err());
    // A different cookie.
    expect_true!(store.get(&request_with_cookie(Some("theme=dark"))).is_err());
    // An empty value.
    expect_true!(store.get(&request_with_cookie(Some("id="))).is_err());
    // Not a session ID.
    expect_true!(store.get(&request_with_cookie(Some("id=abc"))).is_err());
    // A well-formed ID the store has never issued.
    expect_true!(store
        .get(&request_with_cookie(Some(
            "id=67e55044-10b1-426f-9247-bb680e5fe0c8"
        )))
        .is_err());
}

#[googletest::test]
fn sessions_issued_by_another_store_are_unknown() {
    let store = SessionStore::default();
    let other = SessionStore::default();
    let mut response = Response::ok();
    other.start(&mut response).unwrap();

    let request = request_with_cookie(Some(&cookie_pair(&response)));
    expect_true!(store.get(&request).is_err());
}

#[googletest::test]
fn get_or_start_reuses_an_existing_session() {
    let store = SessionStore::default();
    let mut response = Response::ok();
    let session = store.start(&mut response).unwrap();
    let request = request_with_cookie(Some(&cookie_pair(&response)));

    let mut second_response = Response::ok();
    let retrieved = store.get_or_start(&mut second_response, &request).unwrap();
    expect_true!(retrieved.ptr_eq(&session));
    expect_that!(set_cookie_headers(&second_response).len(), eq(0));
    expect_that!(store.len(), eq(1));
}

#[googletest::test]
fn get_or_start_starts_a_session_when_there_is_none() {
    let store = SessionStore::default();
    let mut response = Response::ok();
    let session = store
        .get_or_start(&mut response, &request_with_cookie(None))
        .unwrap();
    expect_that!(store.len(), eq(1));
    assert_eq!(cookie_pair(&response), format!("id={}", session.id()));
}

#[googletest::test]
fn end_expires_the_cookie_even_without_a_session() {
    let store = SessionStore::default();
    let mut response = Response::ok();
    store.end(&mut response);

    let headers = set_cookie_headers(&response);
    expect_that!(headers.len(), eq(1));
    let header = headers[0].as_str();
    expect_that!(header, starts_with("id=;"));
    expect_that!(header, contains_substring("Max-Age=0"));
    expect_that!(header, contains_substring("Path=/"));
    expect_that!(header, contains_substring("HttpOnly"));
}

#[googletest::test]
fn end_keeps_the_server_side_session() {
    let store = SessionStore::default();
    let mut response = Response::ok();
    store.start(&mut response).unwrap();
    let request = request_with_cookie(Some(&cookie_pair(&response)));

    store.end(&mut Response::ok());
    expect_that!(store.len(), eq(1));
    expect_true!(store.get(&request).is_ok());
}
