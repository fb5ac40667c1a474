use std::sync::Arc;

use tracing_log_error::log_error;
use warden::http::Method;
use warden::response::body::Html;
use warden::router::{RouteRegistry, Router};
use warden::{Request, Response};
use warden_auth::{AuthRouter, AuthRoutes, LevelAuth};
use warden_tracing::LoggedRoutes;

/// The level required to read reports.
pub const REPORTS_LEVEL: &str = "1";
/// The level required to access the admin area.
pub const ADMIN_LEVEL: &str = "10";

#[derive(serde::Serialize)]
struct WhoAmI {
    level: Option<u32>,
}

/// Register every route of the service on a new [`Router`].
///
/// Every handler, guarded ones included, runs inside its request's root span:
/// denied requests are logged too.
pub fn router(gate: LevelAuth) -> Router {
    let mut router = Router::new();
    {
        let mut logged = LoggedRoutes::new(&mut router);
        let mut routes = AuthRoutes::new(&mut logged, Arc::new(gate.clone()));

        routes.handler(Method::GET, "/", index);
        routes.handler(Method::GET, "/api/ping", |_: &Request| Response::ok());

        let login_gate = gate.clone();
        routes.handler(Method::POST, "/login/{level}", move |request: &Request| {
            login(&login_gate, request)
        });
        let logout_gate = gate.clone();
        routes.handler(Method::POST, "/logout", move |request: &Request| {
            logout(&logout_gate, request)
        });
        let whoami_gate = gate;
        routes.handler(Method::GET, "/whoami", move |request: &Request| {
            let level = whoami_gate.auth_level(request).map(|l| l.get());
            Response::json(WhoAmI { level })
        });

        routes.auth_handler(Method::GET, "/reports", REPORTS_LEVEL, |_: &Request| {
            Response::ok().set_typed_body("Quarterly reports: all good.")
        });
        routes.auth_handler(Method::GET, "/admin", ADMIN_LEVEL, |_: &Request| {
            Response::ok().set_typed_body(Html::from(ADMIN_PAGE))
        });
    }
    router
}

fn index(_request: &Request) -> Response {
    Response::ok().set_typed_body(Html::from(INDEX_PAGE))
}

fn login(gate: &LevelAuth, request: &Request) -> Response {
    let Some(level) = request
        .path_params()
        .get("level")
        .and_then(|level| level.parse::<u32>().ok())
    else {
        return Response::bad_request().set_typed_body("The level must be a non-negative integer");
    };
    let mut response = Response::json(WhoAmI { level: Some(level) });
    match gate.set_auth_level(&mut response, request, level) {
        Ok(()) => {
            tracing::info!(auth.level = level, "Client logged in");
            response
        }
        Err(e) => {
            log_error!(e, "Failed to grant an authorization level");
            e.into_response()
        }
    }
}

fn logout(gate: &LevelAuth, request: &Request) -> Response {
    gate.revoke_auth_level(request);
    let mut response = Response::no_content();
    gate.store().end(&mut response);
    response
}

const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Levels</title></head>
<body>
<h1>Levels</h1>
<ul>
<li><code>POST /login/{level}</code> grants you an authorization level</li>
<li><code>GET /whoami</code> tells you your level</li>
<li><code>GET /reports</code> requires level 1</li>
<li><code>GET /admin</code> requires level 10</li>
<li><code>POST /logout</code> forgets about you</li>
</ul>
</body>
</html>
"#;

const ADMIN_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Admin</title></head>
<body><h1>Welcome to the admin area</h1></body>
</html>
"#;
