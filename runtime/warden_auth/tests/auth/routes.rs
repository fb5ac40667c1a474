use std::sync::Arc;

use googletest::prelude::*;
use warden::http::{Method, StatusCode};
use warden::router::{RouteRegistry, Router};
use warden::{Request, RequestHandler, Response};
use warden_auth::{AuthRouter, AuthRoutes, LevelAuth};
use warden_session::SessionStore;

use crate::helpers::{cookie_pair, request, Spy, StubCheck};

/// A registry that remembers what was registered, without routing anything.
#[derive(Default)]
struct RecordingRegistry {
    registrations: Vec<(Method, String, Box<dyn RequestHandler>)>,
}

impl RouteRegistry for RecordingRegistry {
    fn handler<H>(&mut self, method: Method, path: &str, handler: H)
    where
        H: RequestHandler,
    {
        let handler: Box<dyn RequestHandler> = Box::new(handler);
        self.registrations.push((method, path.to_owned(), handler));
    }
}

#[googletest::test]
fn each_guarded_route_is_registered_once_as_a_plain_handler() {
    let mut registry = RecordingRegistry::default();
    let spy = Spy::default();
    {
        let mut routes = AuthRoutes::new(&mut registry, StubCheck::new(false));
        routes.handler(Method::GET, "/", |_: &Request| Response::ok());
        routes.auth_handler(Method::POST, "/admin", "9", spy.handler());
    }

    expect_that!(registry.registrations.len(), eq(2));
    let (method, path, handler) = &registry.registrations[1];
    expect_that!(method, eq(&Method::POST));
    expect_that!(path.as_str(), eq("/admin"));
    // The registered handler is the guard, not the raw handler.
    let response = handler.handle(&request("/admin", None));
    expect_that!(response.status().as_u16(), eq(404));
    expect_that!(spy.calls(), eq(0));
}

#[googletest::test]
fn denied_guarded_routes_look_like_missing_routes() {
    let gate = LevelAuth::new(SessionStore::default());
    let mut router = Router::new();
    let spy = Spy::default();
    AuthRoutes::new(&mut router, Arc::new(gate.clone())).auth_handler(
        Method::GET,
        "/admin",
        "10",
        spy.handler(),
    );

    let guarded = router.route(request("/admin", None));
    let missing = router.route(request("/nowhere", None));
    expect_that!(guarded.status(), eq(StatusCode::NOT_FOUND));
    expect_that!(guarded.status(), eq(missing.status()));
    expect_that!(guarded.body().as_ref(), eq(missing.body().as_ref()));
    expect_that!(spy.calls(), eq(0));
}

#[googletest::test]
fn routing_failures_on_a_guarded_path_are_answered_by_the_router() {
    let mut router = Router::new();
    let spy = Spy::default();
    AuthRoutes::new(&mut router, StubCheck::new(false)).auth_handler(
        Method::GET,
        "/admin",
        "10",
        spy.handler(),
    );

    let wrong_method: Request = warden::http::Request::post("/admin")
        .body(Default::default())
        .unwrap()
        .into();
    let response = router.route(wrong_method);
    expect_that!(response.status(), eq(StatusCode::METHOD_NOT_ALLOWED));
    expect_that!(
        response.headers()["allow"].to_str().unwrap(),
        eq("GET, OPTIONS")
    );

    let trailing_slash = router.route(request("/admin/", None));
    expect_that!(trailing_slash.status(), eq(StatusCode::MOVED_PERMANENTLY));
    expect_that!(spy.calls(), eq(0));
}

#[googletest::test]
fn levels_granted_through_the_gate_unlock_guarded_routes() {
    let gate = LevelAuth::new(SessionStore::default());
    let mut router = Router::new();
    let spy = Spy::default();
    {
        let mut routes = AuthRoutes::new(&mut router, Arc::new(gate.clone()));
        let login_gate = gate.clone();
        routes.handler(Method::POST, "/login/{level}", move |request: &Request| {
            let Some(level) = request
                .path_params()
                .get("level")
                .and_then(|l| l.parse::<u32>().ok())
            else {
                return Response::bad_request();
            };
            let mut response = Response::ok();
            match login_gate.set_auth_level(&mut response, request, level) {
                Ok(()) => response,
                Err(e) => e.into_response(),
            }
        });
        routes.auth_handler(Method::GET, "/reports", "3", spy.handler());
    }

    let login: Request = warden::http::Request::post("/login/3")
        .body(Default::default())
        .unwrap()
        .into();
    let response = router.route(login);
    expect_that!(response.status(), eq(StatusCode::OK));
    let cookie = cookie_pair(&response);

    let response = router.route(request("/reports", Some(&cookie)));
    expect_that!(response.status(), eq(StatusCode::OK));
    expect_that!(spy.calls(), eq(1));
}
