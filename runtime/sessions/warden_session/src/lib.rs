/*!
In-memory HTTP sessions for warden.

# Why do we need sessions?

HTTP is stateless: the outcome of a request is only influenced by its content and by
whatever state the server queries while processing it.
That's not enough to, say, remember that a user has already logged in: they would have to
provide their credentials on every single request.

**Sessions** are the solution. The server sets a cookie on the response (`Set-Cookie` header),
the client stores it and sends it back with every subsequent request (`Cookie` header).
The cookie carries an opaque, unguessable **session ID**, which the server uses to look up
the state it attached to that client.

# Anatomy of a warden session

- The cookie holds nothing but the session ID. Its name and `Max-Age` are configurable via
  [`SessionConfig`], it's always scoped to `Path=/` and marked as `HttpOnly`.
- The server-side state is a bag of attributes, string keys mapped to raw bytes, held in
  process memory by the [`SessionStore`]. It's lost when the process exits and it's not
  shared across processes.

```rust
use warden::http::header::{COOKIE, SET_COOKIE};
use warden::{Request, Response};
use warden_session::{SessionConfig, SessionStore};

let store = SessionStore::new(SessionConfig::default());

// First request: no cookie, a new session is started.
let mut response = Response::ok();
let session = store.start(&mut response).unwrap();
session.insert("theme", "dark");

// The client sends the cookie back.
let set_cookie = response.headers()[SET_COOKIE].to_str().unwrap();
let cookie = set_cookie.split(';').next().unwrap();
let request: Request = warden::http::Request::get("/")
    .header(COOKIE, cookie)
    .body(Default::default())
    .unwrap()
    .into();
let same_session = store.get(&request).unwrap();
assert_eq!(same_session.get("theme").as_deref(), Some(&b"dark"[..]));
```

## References

- [RFC 6265](https://datatracker.ietf.org/doc/html/rfc6265);
- [OWASP's session management cheat-sheet](https://cheatsheetseries.owasp.org/cheatsheets/Session_Management_Cheat_Sheet.html).
*/
mod config;
pub mod errors;
mod id;
mod session_;
mod store_;

pub use config::{SessionConfig, SessionCookieConfig};
pub use id::SessionId;
pub use session_::Session;
pub use store_::SessionStore;
