mod dispatch;
mod helpers;
mod level;
mod routes;

static_assertions::assert_impl_all!(warden_auth::LevelAuth: warden_auth::CheckAuth, Clone);
static_assertions::assert_impl_all!(warden_auth::AuthHandler: warden::RequestHandler);
