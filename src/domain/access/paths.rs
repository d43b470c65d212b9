//! Fixed portal paths used by the gates.

/// Public home page; the only path the landing redirector watches.
pub const ROOT_PATH: &str = "/";

/// Sign-in page. Unauthenticated visitors of protected routes land here.
pub const LOGIN_PATH: &str = "/login";

/// One-time profile completion form.
pub const COMPLETE_PROFILE_PATH: &str = "/complete-profile";

/// Paths an authenticated user with an incomplete profile may visit.
///
/// Compared exactly and case-sensitively.
pub const PROFILE_EXEMPT_ROUTES: [&str; 5] = [
    COMPLETE_PROFILE_PATH,
    LOGIN_PATH,
    "/registro",
    "/auth/callback",
    "/reset-password",
];

/// Returns true when `path` is on the profile-exempt allow-list.
pub fn is_profile_exempt(path: &str) -> bool {
    PROFILE_EXEMPT_ROUTES.contains(&path)
}

/// Strips the query string and fragment from a location.
///
/// `/admin?tab=sedes#top` gates the same way as `/admin`.
pub fn route_path(location: &str) -> &str {
    let end = location.find(['?', '#']).unwrap_or(location.len());
    &location[..end]
}
