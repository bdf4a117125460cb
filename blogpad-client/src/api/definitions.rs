//! Declarative query and mutation definitions: method, URL, body and tags.

use super::tags::{Tag, TagKind};
use crate::endpoints;
use crate::models::{PostParams, SignInParams, SignUpParams};
use serde_json::{json, Value};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_reqwest(&self) -> reqwest::Method {
        match self {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<Value>,
}

impl RequestSpec {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    fn param(mut self, name: &'static str, value: impl ToString) -> Self {
        self.query.push((name, value.to_string()));
        self
    }

    fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Path with query string, relative to the API root
    pub fn url_path(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let params: Vec<String> = self
            .query
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        format!("{}?{}", self.path, params.join("&"))
    }
}

/// Read operations. Each value is also the cache key of its result.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    CurrentUser,
    Posts { page: u32, size: u32 },
    Post { id: String },
    Comments { post_id: String, page: u32, size: u32 },
}

impl Query {
    pub fn request(&self) -> RequestSpec {
        match self {
            Query::CurrentUser => RequestSpec::new(Method::Get, endpoints::ACCOUNT),
            Query::Posts { page, size } => RequestSpec::new(Method::Get, endpoints::POSTS)
                .param("page", page)
                .param("size", size),
            Query::Post { id } => RequestSpec::new(Method::Get, endpoints::post(id)),
            Query::Comments {
                post_id,
                page,
                size,
            } => RequestSpec::new(Method::Get, endpoints::comments(post_id))
                .param("page", page)
                .param("size", size),
        }
    }

    pub fn provides(&self) -> Vec<Tag> {
        match self {
            Query::CurrentUser => vec![Tag::kind(TagKind::Auth)],
            Query::Posts { .. } => vec![Tag::kind(TagKind::Post), Tag::list(TagKind::Post)],
            Query::Post { id } => {
                vec![Tag::kind(TagKind::Post), Tag::id(TagKind::Post, id.clone())]
            }
            Query::Comments { .. } => {
                vec![Tag::kind(TagKind::Comment), Tag::list(TagKind::Comment)]
            }
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GET {}", self.request().url_path())
    }
}

/// Write operations.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    SignUp(SignUpParams),
    SignIn(SignInParams),
    Logout,
    CreatePost(PostParams),
    UpdatePost { id: String, params: PostParams },
    DeletePost { id: String },
    AddComment { post_id: String, content: String },
    DeleteComment { post_id: String, comment_id: String },
}

impl Mutation {
    pub fn name(&self) -> &'static str {
        match self {
            Mutation::SignUp(_) => "signUp",
            Mutation::SignIn(_) => "signIn",
            Mutation::Logout => "logout",
            Mutation::CreatePost(_) => "createPost",
            Mutation::UpdatePost { .. } => "updatePost",
            Mutation::DeletePost { .. } => "deletePost",
            Mutation::AddComment { .. } => "addComment",
            Mutation::DeleteComment { .. } => "deleteComment",
        }
    }

    pub fn request(&self) -> Result<RequestSpec, serde_json::Error> {
        let spec = match self {
            Mutation::SignUp(params) => {
                RequestSpec::new(Method::Post, endpoints::REGISTER)
                    .body(serde_json::to_value(params)?)
            }
            Mutation::SignIn(params) => {
                RequestSpec::new(Method::Post, endpoints::LOGIN).body(serde_json::to_value(params)?)
            }
            Mutation::Logout => RequestSpec::new(Method::Post, endpoints::LOGOUT),
            Mutation::CreatePost(params) => {
                RequestSpec::new(Method::Post, endpoints::POSTS).body(serde_json::to_value(params)?)
            }
            Mutation::UpdatePost { id, params } => {
                RequestSpec::new(Method::Put, endpoints::post(id))
                    .body(serde_json::to_value(params)?)
            }
            Mutation::DeletePost { id } => RequestSpec::new(Method::Delete, endpoints::post(id)),
            Mutation::AddComment { post_id, content } => {
                RequestSpec::new(Method::Post, endpoints::comments(post_id))
                    .body(json!({ "content": content }))
            }
            Mutation::DeleteComment {
                post_id,
                comment_id,
            } => RequestSpec::new(Method::Delete, endpoints::comment(post_id, comment_id)),
        };
        Ok(spec)
    }

    pub fn invalidates(&self) -> Vec<Tag> {
        match self {
            Mutation::SignUp(_) | Mutation::SignIn(_) | Mutation::Logout => {
                vec![Tag::kind(TagKind::Auth)]
            }
            Mutation::CreatePost(_) | Mutation::UpdatePost { .. } => vec![Tag::kind(TagKind::Post)],
            Mutation::DeletePost { id } => vec![
                Tag::list(TagKind::Post),
                Tag::id(TagKind::Post, id.clone()),
            ],
            Mutation::AddComment { .. } | Mutation::DeleteComment { .. } => {
                vec![Tag::kind(TagKind::Comment)]
            }
        }
    }
}
