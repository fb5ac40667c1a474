use warden::Request;

/// Decide whether an incoming request satisfies an authorization requirement.
///
/// The requirement is an opaque string: its format is defined by each implementation.
/// [`LevelAuth`](crate::LevelAuth), for example, expects a non-negative integer.
pub trait CheckAuth: Send + Sync + 'static {
    /// `true` if `request` is authorized to access a resource guarded by `required`.
    ///
    /// Implementations must not fail: anything that prevents a positive answer,
    /// including a malformed requirement, is a denial.
    fn has_auth(&self, request: &Request, required: &str) -> bool;
}
