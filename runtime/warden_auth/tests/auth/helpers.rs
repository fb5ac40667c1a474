use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use warden::http::header::{COOKIE, SET_COOKIE};
use warden::{Request, Response};
use warden_auth::CheckAuth;

/// A `GET {path}` request, carrying `cookie` in its `Cookie` header if provided.
pub fn request(path: &str, cookie: Option<&str>) -> Request {
    let mut builder = warden::http::Request::get(path);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    builder.body(Default::default()).unwrap().into()
}

/// The `name=value` pair of the first `Set-Cookie` header on `response`.
pub fn cookie_pair(response: &Response) -> String {
    let header = response.headers()[SET_COOKIE].to_str().unwrap();
    header.split(';').next().unwrap().trim().to_owned()
}

/// A [`CheckAuth`] with a fixed answer, remembering every requirement it was asked about.
pub struct StubCheck {
    answer: bool,
    pub requirements: Mutex<Vec<String>>,
}

impl StubCheck {
    pub fn new(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            requirements: Mutex::new(Vec::new()),
        })
    }
}

impl CheckAuth for StubCheck {
    fn has_auth(&self, _request: &Request, required: &str) -> bool {
        self.requirements.lock().unwrap().push(required.to_owned());
        self.answer
    }
}

/// A request handler that counts its invocations and records the path it was called with.
#[derive(Clone, Default)]
pub struct Spy {
    pub calls: Arc<AtomicUsize>,
    pub paths: Arc<Mutex<Vec<String>>>,
}

impl Spy {
    pub fn handler(&self) -> impl Fn(&Request) -> Response + Send + Sync + 'static {
        let spy = self.clone();
        move |request: &Request| {
            spy.calls.fetch_add(1, Ordering::SeqCst);
            spy.paths
                .lock()
                .unwrap()
                .push(request.head.target.to_string());
            Response::ok().set_typed_body("secret")
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}
