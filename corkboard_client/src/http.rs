// Copyright 2025 the Corkboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use corkboard_canvas::{Entity, EntityId, ViewportWindow};
use kurbo::Point;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{BoxFuture, ContentService, ServiceError, Session};

const USER_TOKEN_HEADER: &str = "x-user-token";

#[derive(Deserialize)]
struct PostsBody {
    posts: Vec<Entity>,
}

#[derive(Deserialize)]
struct PostBody {
    post: Entity,
}

#[derive(Serialize)]
struct PositionBody {
    x: f64,
    y: f64,
}

/// [`ContentService`] over the board's JSON API.
///
/// - `GET /api/posts?minX=&maxX=&minY=&maxY=` lists a window.
/// - `GET /api/posts` lists the most recent entities.
/// - `PATCH /api/posts/{id}` with `{"x","y"}` moves one entity.
#[derive(Clone, Debug)]
pub struct HttpContentService {
    client: Client,
    base_url: String,
    session: Session,
}

impl HttpContentService {
    /// Creates a service rooted at `base_url` (for example
    /// `https://board.example`).
    pub fn new(base_url: impl Into<String>, session: Session) -> Self {
        Self::with_client(Client::new(), base_url, session)
    }

    /// Like [`new`](Self::new) with a preconfigured client.
    pub fn with_client(client: Client, base_url: impl Into<String>, session: Session) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self {
            client,
            base_url,
            session,
        }
    }

    /// Base URL without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn posts_url(&self) -> String {
        format!("{}/api/posts", self.base_url)
    }

    /// `posts_url` plus `id` as one percent-encoded path segment.
    fn post_url(&self, id: &EntityId) -> Result<Url, ServiceError> {
        let invalid = || ServiceError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.posts_url()).map_err(|_| invalid())?;
        url.path_segments_mut().map_err(|()| invalid())?.push(&id.0);
        Ok(url)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let builder = self.client.request(method, url);
        match &self.session.user_token {
            Some(token) => builder.header(USER_TOKEN_HEADER, token),
            None => builder,
        }
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ServiceError> {
    let status = resp.status();
    let body = resp.text().await?;
    if !status.is_success() {
        return Err(ServiceError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(serde_json::from_str(&body)?)
}

impl ContentService for HttpContentService {
    fn list_window(&self, window: ViewportWindow) -> BoxFuture<'_, Result<Vec<Entity>, ServiceError>> {
        let url = self.posts_url();
        Box::pin(async move {
            let resp = self
                .request(Method::GET, &url)
                .query(&[
                    ("minX", window.min_x),
                    ("maxX", window.max_x),
                    ("minY", window.min_y),
                    ("maxY", window.max_y),
                ])
                .send()
                .await?;
            Ok(decode::<PostsBody>(resp).await?.posts)
        })
    }

    fn list_recent(&self) -> BoxFuture<'_, Result<Vec<Entity>, ServiceError>> {
        let url = self.posts_url();
        Box::pin(async move {
            let resp = self.request(Method::GET, &url).send().await?;
            Ok(decode::<PostsBody>(resp).await?.posts)
        })
    }

    fn update_position(
        &self,
        id: EntityId,
        position: Point,
    ) -> BoxFuture<'_, Result<Entity, ServiceError>> {
        let url = self.post_url(&id);
        Box::pin(async move {
            let resp = self
                .request(Method::PATCH, url?.as_str())
                .json(&PositionBody {
                    x: position.x,
                    y: position.y,
                })
                .send()
                .await?;
            if resp.status() == StatusCode::NOT_FOUND {
                return Err(ServiceError::NotFound(id));
            }
            Ok(decode::<PostBody>(resp).await?.post)
        })
    }
}

#[cfg(test)]
mod tests {
    use corkboard_canvas::EntityId;

    use super::{HttpContentService, PostsBody};
    use crate::{ServiceError, Session};

    #[test]
    fn base_url_is_normalized() {
        let service = HttpContentService::new("http://localhost:3000/", Session::default());
        assert_eq!(service.base_url(), "http://localhost:3000");
        assert_eq!(service.posts_url(), "http://localhost:3000/api/posts");
    }

    #[test]
    fn entity_ids_are_escaped_in_update_urls() {
        let service = HttpContentService::new("http://localhost:3000", Session::default());
        let url = service.post_url(&EntityId::from("a/b?c")).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3000/api/posts/a%2Fb%3Fc");

        let service = HttpContentService::new("not a url", Session::default());
        let err = service.post_url(&EntityId::from("a")).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidUrl(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn posts_body_decodes_wire_entities() {
        let body: PostsBody = serde_json::from_str(
            r#"{"posts":[{"id":"p1","shortId":"abc","x":-120.5,"y":40,"createdAt":"2025-01-01T00:00:00Z","replyCount":2,"likes":7,"isNSFW":false}]}"#,
        )
        .unwrap();
        assert_eq!(body.posts.len(), 1);
        let post = &body.posts[0];
        assert_eq!(post.id.0, "p1");
        assert_eq!(post.x, -120.5);
        assert_eq!(post.reply_count, 2);
    }
}
