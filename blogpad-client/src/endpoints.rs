use urlencoding::encode;

pub const BASE_URL: &str = "http://localhost:5016";
pub const VERSION: &str = "v1";

pub const LOGIN: &str = "login";
pub const LOGOUT: &str = "logout";
pub const REGISTER: &str = "signup";
pub const POSTS: &str = "posts";
pub const ACCOUNT: &str = "account";

/// Versioned API root, e.g. `http://localhost:5016/v1`
pub fn api_root(base_url: &str, version: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let version = version.trim_matches('/');
    if version.is_empty() {
        base.to_string()
    } else {
        format!("{}/{}", base, version)
    }
}

// ids are percent-encoded so `?`, `#` and `/` stay inside their segment

pub fn post(id: &str) -> String {
    format!("{}/{}", POSTS, encode(id))
}

pub fn comments(post_id: &str) -> String {
    format!("{}/{}/comments", POSTS, encode(post_id))
}

pub fn comment(post_id: &str, comment_id: &str) -> String {
    format!("{}/{}/comments/{}", POSTS, encode(post_id), encode(comment_id))
}
