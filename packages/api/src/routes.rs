//! Page paths and redirect targets shared by the auth flows.

use url::Url;

pub const SITE_ROOT: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const REDIRECT_PARAM: &str = "redirect";

/// Pages that require a session.
pub const PROTECTED_ROUTES: [&str; 6] = [
    "/passenger",
    "/payment",
    "/extras",
    "/confirmation",
    "/profile",
    "/bookings",
];

/// Whether `path` is the login page (`/login` or a static `login.html`).
pub fn is_login_path(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    path.ends_with(LOGIN_PATH) || path.ends_with("login.html")
}

pub fn is_protected(path: &str) -> bool {
    let path = path.trim_end_matches('/');
    PROTECTED_ROUTES
        .iter()
        .any(|route| path == *route || path.ends_with(route))
}

/// Where to go after a successful login: the `redirect` query parameter of
/// `href`, else the site root.
pub fn redirect_target(href: &str) -> String {
    Url::parse(href)
        .ok()
        .and_then(|url| {
            url.query_pairs()
                .find(|(key, _)| key == REDIRECT_PARAM)
                .map(|(_, value)| value.into_owned())
        })
        .filter(|target| !target.is_empty())
        .unwrap_or_else(|| SITE_ROOT.to_string())
}

/// `/login?redirect=<href>` with `href` percent-encoded.
pub fn login_url_with_redirect(href: &str) -> String {
    let encoded: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair(REDIRECT_PARAM, href)
        .finish();
    format!("{LOGIN_PATH}?{encoded}")
}
