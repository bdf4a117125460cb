use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Root,
    Register,
    Login,
    Posts,
    NewPost,
    PostDetails(String),
    EditPost(String),
    NotFound(String),
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] => Route::Root,
            ["register"] => Route::Register,
            ["login"] => Route::Login,
            ["posts"] => Route::Posts,
            ["posts", "new"] => Route::NewPost,
            ["posts", "edit", id] => Route::EditPost(id.to_string()),
            ["posts", id] => Route::PostDetails(id.to_string()),
            _ => Route::NotFound(path.to_string()),
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Root => "/".to_string(),
            Route::Register => "/register".to_string(),
            Route::Login => "/login".to_string(),
            Route::Posts => "/posts".to_string(),
            Route::NewPost => "/posts/new".to_string(),
            Route::PostDetails(id) => format!("/posts/{}", id),
            Route::EditPost(id) => format!("/posts/edit/{}", id),
            Route::NotFound(path) => path.clone(),
        }
    }

    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Root | Route::Posts | Route::NewPost | Route::PostDetails(_) | Route::EditPost(_)
        )
    }

    /// Where a navigation actually lands, given the auth flag
    pub fn resolve(self, authenticated: bool) -> Route {
        if self.is_protected() && !authenticated {
            return Route::Register;
        }
        match self {
            Route::Root => Route::Register,
            other => other,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_route_table() {
        assert_eq!(Route::parse("/"), Route::Root);
        assert_eq!(Route::parse("/register"), Route::Register);
        assert_eq!(Route::parse("/login/"), Route::Login);
        assert_eq!(Route::parse("/posts"), Route::Posts);
        assert_eq!(Route::parse("/posts/new"), Route::NewPost);
        assert_eq!(Route::parse("/posts/abc"), Route::PostDetails("abc".into()));
        assert_eq!(Route::parse("/posts/edit/abc"), Route::EditPost("abc".into()));
        assert_eq!(
            Route::parse("/nope/deeper"),
            Route::NotFound("/nope/deeper".into())
        );
    }

    #[test]
    fn path_round_trips() {
        for route in [
            Route::Register,
            Route::Posts,
            Route::NewPost,
            Route::PostDetails("7".into()),
            Route::EditPost("7".into()),
        ] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }

    #[test]
    fn protected_routes_redirect_to_register() {
        assert_eq!(Route::Posts.resolve(false), Route::Register);
        assert_eq!(Route::EditPost("1".into()).resolve(false), Route::Register);
        assert_eq!(Route::Login.resolve(false), Route::Login);
        assert_eq!(Route::Posts.resolve(true), Route::Posts);
    }

    #[test]
    fn root_always_lands_on_register() {
        assert_eq!(Route::Root.resolve(true), Route::Register);
        assert_eq!(Route::Root.resolve(false), Route::Register);
    }
}
