use warden::http::header::{COOKIE, SET_COOKIE};
use warden::{Request, Response};

/// The values of every `Set-Cookie` header on `response`.
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_owned())
        .collect()
}

/// The `name=value` pair of the only `Set-Cookie` header on `response`,
/// ready to be sent back in a `Cookie` header.
pub fn cookie_pair(response: &Response) -> String {
    let headers = set_cookie_headers(response);
    assert_eq!(headers.len(), 1, "Expected exactly one `Set-Cookie` header");
    headers[0].split(';').next().unwrap().trim().to_owned()
}

/// A `GET /` request, carrying `cookie` in its `Cookie` header if provided.
pub fn request_with_cookie(cookie: Option<&str>) -> Request {
    let mut builder = warden::http::Request::get("/");
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Default::default()).unwrap().into()
}
