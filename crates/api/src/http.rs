use std::env;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use course_core::model::{Chapter, ChapterId, Module, ModuleId, ProgressOverview, Subchapter,
    SubchapterId};
use course_core::progress::Progress;

use crate::client::{ApiError, CourseApi, ProgressApi, SubchapterBundle};

#[derive(Clone, Debug)]
pub struct HttpApiConfig {
    pub base_url: String,
    pub token: Option<String>,
}

impl HttpApiConfig {
    /// Reads the endpoint from `COURSE_API_BASE_URL` and the bearer token from
    /// `COURSE_API_TOKEN`. Returns `None` when no base URL is configured.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let base_url = env::var("COURSE_API_BASE_URL").ok()?;
        if base_url.trim().is_empty() {
            return None;
        }
        let token = env::var("COURSE_API_TOKEN")
            .ok()
            .filter(|t| !t.trim().is_empty());
        Some(Self { base_url, token })
    }
}

/// JSON-over-HTTP backend for the course and progress contracts.
#[derive(Clone)]
pub struct HttpApi {
    client: Client,
    config: HttpApiConfig,
}

impl HttpApi {
    #[must_use]
    pub fn new(config: HttpApiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn from_env() -> Option<Self> {
        HttpApiConfig::from_env().map(Self::new)
    }

    /// Whether a bearer token is present. The view layer gates page access on
    /// this; the engine itself is auth-agnostic.
    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.config.token.is_some()
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.config.base_url.trim_end_matches('/'))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let mut request = self.client.get(self.url(path));
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status if !status.is_success() => Err(ApiError::HttpStatus(status)),
            _ => Ok(response.json().await?),
        }
    }

    async fn put_json<B: Serialize>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let mut request = self.client.put(self.url(path)).json(body);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(ApiError::NotFound),
            status if !status.is_success() => Err(ApiError::HttpStatus(status)),
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl CourseApi for HttpApi {
    async fn get_module(&self, module_id: ModuleId) -> Result<Module, ApiError> {
        let dto: ModuleDto = self.get_json(&format!("modules/{module_id}")).await?;
        Ok(dto.into_module())
    }

    async fn get_chapters(&self, module_id: ModuleId) -> Result<Vec<Chapter>, ApiError> {
        let dtos: Vec<ChapterDto> = self
            .get_json(&format!("modules/{module_id}/chapters"))
            .await?;
        Ok(dtos.into_iter().map(ChapterDto::into_chapter).collect())
    }

    async fn get_subchapters(
        &self,
        module_id: ModuleId,
        chapter_id: ChapterId,
    ) -> Result<Vec<Subchapter>, ApiError> {
        let dtos: Vec<SubchapterDto> = self
            .get_json(&format!(
                "modules/{module_id}/chapters/{chapter_id}/subchapters"
            ))
            .await?;
        Ok(dtos.into_iter().map(SubchapterDto::into_subchapter).collect())
    }

    async fn get_subchapter_full(
        &self,
        subchapter_id: SubchapterId,
    ) -> Result<SubchapterBundle, ApiError> {
        let dto: SubchapterFullDto = self
            .get_json(&format!("subchapters/{subchapter_id}/full"))
            .await?;
        Ok(dto.into_bundle())
    }
}

#[async_trait]
impl ProgressApi for HttpApi {
    async fn get_overview(&self) -> Result<ProgressOverview, ApiError> {
        self.get_json("progress/overview").await
    }

    async fn update_module_progress(
        &self,
        module_id: ModuleId,
        progress: Progress,
    ) -> Result<(), ApiError> {
        let body = UpdateProgressRequest {
            progress: progress.value(),
        };
        self.put_json(&format!("progress/modules/{module_id}"), &body)
            .await
    }
}

//
// ─── WIRE SHAPES ───────────────────────────────────────────────────────────────
//

#[derive(Debug, Deserialize)]
struct ModuleDto {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl ModuleDto {
    fn into_module(self) -> Module {
        Module::new(
            ModuleId::new(self.id),
            self.title.unwrap_or_default(),
            self.description.unwrap_or_default(),
        )
    }
}

#[derive(Debug, Deserialize)]
struct ChapterDto {
    id: u64,
    module_id: u64,
}

impl ChapterDto {
    fn into_chapter(self) -> Chapter {
        Chapter::new(ChapterId::new(self.id), ModuleId::new(self.module_id))
    }
}

#[derive(Debug, Deserialize)]
struct SubchapterDto {
    id: u64,
    chapter_id: u64,
    #[serde(default)]
    title: String,
    // Absent order means "unordered"; the id tie-break keeps the sequence total.
    #[serde(default)]
    order_sequence: i64,
    #[serde(default)]
    content_html: String,
    #[serde(default)]
    content_css: Option<String>,
}

impl SubchapterDto {
    fn into_subchapter(self) -> Subchapter {
        Subchapter::new(
            SubchapterId::new(self.id),
            ChapterId::new(self.chapter_id),
            self.title,
            self.order_sequence,
            self.content_html,
            self.content_css,
        )
    }
}

#[derive(Debug, Deserialize)]
struct SubchapterFullDto {
    module: ModuleDto,
    chapter: ChapterDto,
    subchapter: SubchapterDto,
    #[serde(default)]
    all_subchapters: Vec<SubchapterDto>,
}

impl SubchapterFullDto {
    fn into_bundle(self) -> SubchapterBundle {
        SubchapterBundle {
            module: self.module.into_module(),
            chapter: self.chapter.into_chapter(),
            subchapter: self.subchapter.into_subchapter(),
            all_subchapters: self
                .all_subchapters
                .into_iter()
                .map(SubchapterDto::into_subchapter)
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateProgressRequest {
    progress: u8,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subchapter_dto_defaults_missing_order_to_zero() {
        let dto: SubchapterDto = serde_json::from_str(
            r#"{"id": 3, "chapter_id": 1, "title": "Intro", "content_html": "<p>x</p>"}"#,
        )
        .unwrap();
        let sub = dto.into_subchapter();
        assert_eq!(sub.order_sequence(), 0);
        assert!(sub.content_css().is_none());
    }

    #[test]
    fn full_dto_maps_into_bundle() {
        let dto: SubchapterFullDto = serde_json::from_str(
            r#"{
                "module": {"id": 1, "title": "M", "description": "d"},
                "chapter": {"id": 2, "module_id": 1},
                "subchapter": {"id": 3, "chapter_id": 2, "title": "S",
                               "order_sequence": 1, "content_html": "<p>x</p>",
                               "content_css": "p { color: red }"},
                "all_subchapters": [
                    {"id": 3, "chapter_id": 2, "title": "S", "content_html": ""}
                ]
            }"#,
        )
        .unwrap();
        let bundle = dto.into_bundle();
        assert_eq!(bundle.module.id(), ModuleId::new(1));
        assert_eq!(bundle.subchapter.content_css(), Some("p { color: red }"));
        assert_eq!(bundle.all_subchapters.len(), 1);
    }

    #[test]
    fn module_dto_tolerates_missing_title() {
        let dto: ModuleDto = serde_json::from_str(r#"{"id": 9}"#).unwrap();
        let module = dto.into_module();
        assert_eq!(module.title(), "");
    }

    #[test]
    fn url_join_handles_trailing_slash() {
        let api = HttpApi::new(HttpApiConfig {
            base_url: "https://api.example.test/v1/".into(),
            token: None,
        });
        assert_eq!(
            api.url("modules/3/chapters"),
            "https://api.example.test/v1/modules/3/chapters"
        );
    }

    #[test]
    fn authenticated_only_with_token() {
        let anon = HttpApi::new(HttpApiConfig {
            base_url: "https://api.example.test".into(),
            token: None,
        });
        assert!(!anon.is_authenticated());

        let authed = HttpApi::new(HttpApiConfig {
            base_url: "https://api.example.test".into(),
            token: Some("secret".into()),
        });
        assert!(authed.is_authenticated());
    }
}
