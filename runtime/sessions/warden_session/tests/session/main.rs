mod concurrency;
mod helpers;
mod lifecycle;

static_assertions::assert_impl_all!(warden_session::SessionStore: Send, Sync, Clone);
static_assertions::assert_impl_all!(warden_session::Session: Send, Sync, Clone);
