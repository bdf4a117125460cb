pub mod cache;
pub mod definitions;
pub mod http;
pub mod tags;

pub use cache::QueryCache;
pub use definitions::{Method, Mutation, Query, RequestSpec};
pub use http::HttpClient;
pub use tags::{Tag, TagId, TagKind};

use crate::config::ClientConfig;
use crate::error::ClientError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Query/mutation runner on top of [`HttpClient`] with a tag-invalidated
/// [`QueryCache`]. The auth token is supplied per call by the owner of the
/// auth state.
#[derive(Debug)]
pub struct Api {
    http: HttpClient,
    cache: QueryCache,
}

impl Api {
    pub fn new(config: &ClientConfig) -> Self {
        let http = HttpClient::new(config.api_root(), Duration::from_secs(config.timeout_secs));
        Self {
            http,
            cache: QueryCache::new(),
        }
    }

    pub fn root(&self) -> &str {
        self.http.root()
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn watch(&mut self, query: Query) {
        self.cache.watch(query);
    }

    pub fn unwatch(&mut self, query: &Query) {
        self.cache.unwatch(query);
    }

    /// Cached result when fresh, otherwise fetch and cache
    pub async fn query<T: DeserializeOwned>(
        &mut self,
        query: &Query,
        token: Option<&str>,
    ) -> Result<T, ClientError> {
        if let Some(data) = self.cache.get(query) {
            tracing::debug!("Cache hit: {}", query);
            return Ok(serde_json::from_value(data.clone())?);
        }
        tracing::debug!("Cache miss: {}", query);
        let data = self.fetch(query, token).await?;
        Ok(serde_json::from_value(data)?)
    }

    /// Always hit the network and refresh the cache entry
    pub async fn fetch(
        &mut self,
        query: &Query,
        token: Option<&str>,
    ) -> Result<Value, ClientError> {
        let data = self.http.execute(&query.request(), token).await?;
        self.cache.insert(query.clone(), data.clone());
        Ok(data)
    }

    /// Execute a mutation without touching the cache
    pub async fn run(
        &self,
        mutation: &Mutation,
        token: Option<&str>,
    ) -> Result<Value, ClientError> {
        tracing::debug!("Mutation {}", mutation.name());
        let spec = mutation.request()?;
        self.http.execute(&spec, token).await
    }

    /// Execute a mutation, then invalidate its tags
    pub async fn mutate(
        &mut self,
        mutation: &Mutation,
        token: Option<&str>,
    ) -> Result<Value, ClientError> {
        let result = self.run(mutation, token).await?;
        self.invalidate(&mutation.invalidates(), token).await;
        Ok(result)
    }

    /// Mark matching queries stale and refetch the ones an active view is
    /// watching. Returns the refetched queries.
    pub async fn invalidate(&mut self, tags: &[Tag], token: Option<&str>) -> Vec<Query> {
        let affected = self.cache.invalidate(tags);
        if affected.is_empty() {
            return affected;
        }
        let names: Vec<String> = tags.iter().map(|t| t.to_string()).collect();
        tracing::debug!("Invalidated [{}]: {} queries", names.join(", "), affected.len());

        let mut refetched = Vec::new();
        for query in affected {
            if !self.cache.is_watched(&query) {
                continue;
            }
            match self.fetch(&query, token).await {
                Ok(_) => refetched.push(query),
                Err(e) => tracing::warn!("Refetch of {} failed: {}", query, e),
            }
        }
        refetched
    }

    /// Drop every cached result, e.g. after logout
    pub fn reset(&mut self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PostParams, PostsResponse, User};
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api_for(server: &MockServer) -> Api {
        let config = ClientConfig {
            base_url: server.uri(),
            ..ClientConfig::default()
        };
        Api::new(&config)
    }

    fn posts_body() -> Value {
        json!({
            "posts": [{
                "id": "p1",
                "title": "First",
                "content": "Hello",
                "createdAt": "2024-03-01T10:00:00Z",
                "updatedAt": "2024-03-01T10:00:00Z",
                "isEdited": false,
                "commentCount": 0,
                "userName": "ann"
            }],
            "pageInfo": { "pageNumber": 1, "pageSize": 5, "totalItems": 1, "totalPages": 1 }
        })
    }

    #[tokio::test]
    async fn query_sends_bearer_token_and_caches() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/account"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "userId": "u1",
                "email": "ann@example.com",
                "firstName": "Ann",
                "lastName": "Lee",
                "userName": "ann"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut api = api_for(&server);
        let user: User = api.query(&Query::CurrentUser, Some("tok")).await.unwrap();
        assert_eq!(user.user_name, "ann");

        // second read is served from cache
        let again: User = api.query(&Query::CurrentUser, Some("tok")).await.unwrap();
        assert_eq!(again, user);
    }

    #[tokio::test]
    async fn list_query_uses_page_and_size() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts"))
            .and(query_param("page", "2"))
            .and(query_param("size", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(posts_body()))
            .expect(1)
            .mount(&server)
            .await;

        let mut api = api_for(&server);
        let page: PostsResponse = api
            .query(&Query::Posts { page: 2, size: 5 }, None)
            .await
            .unwrap();
        assert_eq!(page.posts.len(), 1);
    }

    #[tokio::test]
    async fn deleting_a_post_refetches_a_watched_list() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(posts_body()))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/v1/posts/p1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!(true)))
            .expect(1)
            .mount(&server)
            .await;

        let mut api = api_for(&server);
        let list = Query::Posts { page: 1, size: 5 };
        api.watch(list.clone());
        let _: PostsResponse = api.query(&list, Some("tok")).await.unwrap();

        api.mutate(&Mutation::DeletePost { id: "p1".into() }, Some("tok"))
            .await
            .unwrap();

        assert!(api.cache().get(&list).is_some());
    }

    #[tokio::test]
    async fn unwatched_queries_are_only_marked_stale() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts"))
            .respond_with(ResponseTemplate::new(200).set_body_json(posts_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v1/posts"))
            .and(body_json(json!({"title": "T", "content": "C"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "p2",
                "title": "T",
                "content": "C",
                "createdAt": "2024-03-02T10:00:00Z",
                "updatedAt": "2024-03-02T10:00:00Z",
                "userName": "ann"
            })))
            .mount(&server)
            .await;

        let mut api = api_for(&server);
        let list = Query::Posts { page: 1, size: 5 };
        let _: PostsResponse = api.query(&list, None).await.unwrap();

        let params = PostParams {
            title: "T".into(),
            content: "C".into(),
        };
        api.mutate(&Mutation::CreatePost(params), None).await.unwrap();
        assert!(api.cache().is_stale(&list));
    }

    #[tokio::test]
    async fn failed_mutation_keeps_cache_fresh() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/v1/posts/p1"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "not yours"})))
            .mount(&server)
            .await;

        let mut api = api_for(&server);
        let list = Query::Posts { page: 1, size: 5 };
        api.cache.insert(list.clone(), posts_body());

        let err = api
            .mutate(&Mutation::DeletePost { id: "p1".into() }, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Forbidden(ref m) if m == "not yours"));
        assert!(!api.cache().is_stale(&list));
    }

    #[tokio::test]
    async fn status_errors_are_structured() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/posts/missing"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/account"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let mut api = api_for(&server);
        let err = api
            .fetch(&Query::Post { id: "missing".into() }, None)
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = api.fetch(&Query::CurrentUser, None).await.unwrap_err();
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.to_string(), "HTTP 500: boom");
    }
}
