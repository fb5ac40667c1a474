use googletest::prelude::*;
use warden::RequestHandler;
use warden_auth::AuthHandler;

use crate::helpers::{request, Spy, StubCheck};

#[googletest::test]
fn denied_requests_never_reach_the_inner_handler() {
    let spy = Spy::default();
    let check = StubCheck::new(false);
    let handler = AuthHandler::new(check.clone(), "7", spy.handler());

    let response = handler.handle(&request("/vault", None));
    expect_that!(response.status().as_u16(), eq(404));
    expect_true!(response.body().is_empty());
    expect_that!(spy.calls(), eq(0));
    assert_eq!(*check.requirements.lock().unwrap(), vec!["7".to_string()]);
}

#[googletest::test]
fn authorized_requests_are_forwarded_exactly_once() {
    let spy = Spy::default();
    let check = StubCheck::new(true);
    let handler = AuthHandler::new(check.clone(), "7", spy.handler());

    let response = handler.handle(&request("/vault?item=1", None));
    expect_that!(response.status().as_u16(), eq(200));
    expect_that!(response.body().as_ref(), eq(b"secret".as_slice()));
    expect_that!(spy.calls(), eq(1));
    assert_eq!(*spy.paths.lock().unwrap(), vec!["/vault?item=1".to_string()]);
}

#[googletest::test]
fn the_requirement_is_exposed() {
    let handler = AuthHandler::new(StubCheck::new(true), "admin", Spy::default().handler());
    expect_that!(handler.required(), eq("admin"));
}
