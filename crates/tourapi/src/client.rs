//! HTTP client for the tourism API endpoints.
//!
//! One [`TourApiClient`] is built at startup and shared; it wraps a single
//! [`reqwest::Client`] so all calls reuse the same connection pool.

use mytrip_core::place::{PetInfo, PlaceDetail, PlaceSummary};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{TourApiConfig, MOBILE_OS};
use crate::envelope::{Body, Envelope};
use crate::error::TourApiError;
use crate::wire::{DetailItem, PetItem, PlaceItem};

const AREA_BASED_LIST: &str = "areaBasedList2";
const SEARCH_KEYWORD: &str = "searchKeyword2";
const DETAIL_COMMON: &str = "detailCommon2";
const DETAIL_PET_TOUR: &str = "detailPetTour2";

/// Longest body excerpt kept in a decode error.
const BODY_EXCERPT_LEN: usize = 200;

/// Paging and filter parameters shared by the list endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListQuery {
    pub page_no: u32,
    pub num_of_rows: u32,
    pub area_code: Option<String>,
    pub content_type_id: Option<String>,
    /// Upstream sort key (`A` title, `C` modified, `D` created, and the
    /// image-only variants `O`, `Q`, `R`).
    pub arrange: Option<String>,
}

impl Default for ListQuery {
    fn default() -> Self {
        Self {
            page_no: 1,
            num_of_rows: 10,
            area_code: None,
            content_type_id: None,
            arrange: None,
        }
    }
}

impl ListQuery {
    pub fn new(page_no: u32, num_of_rows: u32) -> Self {
        Self {
            page_no,
            num_of_rows,
            ..Self::default()
        }
    }

    fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("numOfRows", self.num_of_rows.to_string()),
            ("pageNo", self.page_no.to_string()),
        ];
        if let Some(code) = &self.area_code {
            params.push(("areaCode", code.clone()));
        }
        if let Some(id) = &self.content_type_id {
            params.push(("contentTypeId", id.clone()));
        }
        if let Some(arrange) = &self.arrange {
            params.push(("arrange", arrange.clone()));
        }
        params
    }
}

/// The single category a count query is restricted to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    Area(String),
    ContentType(String),
}

/// One page of list results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub num_of_rows: u32,
    pub page_no: u32,
    pub total_count: u64,
}

impl<T> Page<T> {
    fn from_body<W: Into<T>>(body: Body<W>) -> Self {
        Page {
            items: body.items.into_vec().into_iter().map(Into::into).collect(),
            num_of_rows: body.num_of_rows,
            page_no: body.page_no,
            total_count: body.total_count,
        }
    }
}

/// Client for a single tourism API deployment.
pub struct TourApiClient {
    client: reqwest::Client,
    config: TourApiConfig,
}

impl TourApiClient {
    pub fn new(config: TourApiConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: TourApiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &TourApiConfig {
        &self.config
    }

    /// Whether a service key is available. Without one every call fails
    /// with [`TourApiError::MissingServiceKey`].
    pub fn is_configured(&self) -> bool {
        self.config.service_key().is_some()
    }

    /// Places filtered by region and/or type.
    pub async fn area_based_list(
        &self,
        query: &ListQuery,
    ) -> Result<Page<PlaceSummary>, TourApiError> {
        let body = self
            .get::<PlaceItem>(AREA_BASED_LIST, self.service_key()?, query.params())
            .await?;
        Ok(Page::from_body(body))
    }

    /// Places whose title matches `keyword`. The keyword is trimmed and
    /// must not be empty.
    pub async fn search_keyword(
        &self,
        keyword: &str,
        query: &ListQuery,
    ) -> Result<Page<PlaceSummary>, TourApiError> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(TourApiError::Validation(
                "Search keyword must not be empty".to_string(),
            ));
        }

        let mut params = query.params();
        params.push(("keyword", keyword.to_string()));
        let body = self
            .get::<PlaceItem>(SEARCH_KEYWORD, self.service_key()?, params)
            .await?;
        Ok(Page::from_body(body))
    }

    /// Full detail for one place, or `None` if the API has no such item.
    pub async fn detail_common(
        &self,
        content_id: &str,
    ) -> Result<Option<PlaceDetail>, TourApiError> {
        let content_id = validate_content_id(content_id)?;
        let body = self
            .get::<DetailItem>(
                DETAIL_COMMON,
                self.service_key()?,
                vec![("contentId", content_id.to_string())],
            )
            .await?;
        Ok(body.items.into_vec().into_iter().next().map(Into::into))
    }

    /// Pet-travel information for one place, or `None` when there is none.
    pub async fn detail_pet_tour(&self, content_id: &str) -> Result<Option<PetInfo>, TourApiError> {
        let content_id = validate_content_id(content_id)?;
        let key = self
            .config
            .pet_service_key()
            .ok_or(TourApiError::MissingServiceKey)?;
        let body = self
            .get::<PetItem>(
                DETAIL_PET_TOUR,
                key,
                vec![("contentId", content_id.to_string())],
            )
            .await?;
        Ok(body.items.into_vec().into_iter().next().map(Into::into))
    }

    /// Number of places in one category, from a one-row list query.
    pub async fn total_count(&self, filter: &CategoryFilter) -> Result<u64, TourApiError> {
        let mut query = ListQuery::new(1, 1);
        match filter {
            CategoryFilter::Area(code) => query.area_code = Some(code.clone()),
            CategoryFilter::ContentType(id) => query.content_type_id = Some(id.clone()),
        }
        let body = self
            .get::<serde_json::Value>(AREA_BASED_LIST, self.service_key()?, query.params())
            .await?;
        Ok(body.total_count)
    }

    // ---- private helpers ----

    fn service_key(&self) -> Result<&str, TourApiError> {
        self.config
            .service_key()
            .ok_or(TourApiError::MissingServiceKey)
    }

    /// Issue a GET with the common parameters and unwrap the envelope.
    async fn get<T: DeserializeOwned>(
        &self,
        operation: &str,
        service_key: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<Body<T>, TourApiError> {
        let url = format!("{}/{}", self.config.base_url, operation);
        tracing::debug!(operation, ?params, "Calling tourism API");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("serviceKey", service_key),
                ("MobileOS", MOBILE_OS),
                ("MobileApp", self.config.mobile_app.as_str()),
                ("_type", "json"),
            ])
            .query(&params)
            .send()
            .await?;

        let envelope: Envelope<T> = Self::parse_response(response).await?;
        envelope.into_body()
    }

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`TourApiError::Http`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, TourApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(TourApiError::Http {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    ///
    /// The API answers some failures (bad keys, quota) with a 200 and an
    /// XML body, so a parse failure keeps an excerpt of what came back.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, TourApiError> {
        let response = Self::ensure_success(response).await?;
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            let excerpt: String = text.chars().take(BODY_EXCERPT_LEN).collect();
            TourApiError::Decode(format!("{e}; body starts with: {excerpt}"))
        })
    }
}

fn validate_content_id(content_id: &str) -> Result<&str, TourApiError> {
    let content_id = content_id.trim();
    if content_id.is_empty() {
        return Err(TourApiError::Validation(
            "Content id must not be empty".to_string(),
        ));
    }
    Ok(content_id)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client_for(server: &MockServer) -> TourApiClient {
        TourApiClient::new(TourApiConfig::new(server.base_url(), Some("test-key".into())))
    }

    fn ok_envelope(items: serde_json::Value, total_count: u64) -> serde_json::Value {
        json!({
            "response": {
                "header": { "resultCode": "0000", "resultMsg": "OK" },
                "body": {
                    "items": items,
                    "numOfRows": 12,
                    "pageNo": 1,
                    "totalCount": total_count,
                }
            }
        })
    }

    // -- list endpoints ------------------------------------------------------

    #[tokio::test]
    async fn area_based_list_sends_common_and_filter_params() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/areaBasedList2")
                .query_param("serviceKey", "test-key")
                .query_param("MobileOS", "ETC")
                .query_param("MobileApp", "MyTrip")
                .query_param("_type", "json")
                .query_param("areaCode", "39")
                .query_param("numOfRows", "12")
                .query_param("pageNo", "2");
            then.status(200).json_body(ok_envelope(
                json!({ "item": [
                    { "contentid": "1", "title": "성산일출봉", "areacode": "39" },
                    { "contentid": "2", "title": "한라산", "areacode": "39" },
                ]}),
                2,
            ));
        });

        let query = ListQuery {
            area_code: Some("39".into()),
            ..ListQuery::new(2, 12)
        };
        let page = client_for(&server).area_based_list(&query).await.unwrap();

        mock.assert();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].title, "성산일출봉");
        assert_eq!(page.total_count, 2);
    }

    #[tokio::test]
    async fn single_item_response_is_normalized() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/searchKeyword2").query_param("keyword", "경복궁");
            then.status(200).json_body(ok_envelope(
                json!({ "item": { "contentid": "126508", "title": "경복궁" } }),
                1,
            ));
        });

        let page = client_for(&server)
            .search_keyword("  경복궁 ", &ListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].content_id, "126508");
    }

    #[tokio::test]
    async fn empty_keyword_is_rejected_without_a_request() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.path("/searchKeyword2");
            then.status(200);
        });

        let err = client_for(&server)
            .search_keyword("   ", &ListQuery::default())
            .await
            .unwrap_err();
        assert_matches!(err, TourApiError::Validation(_));
        assert_eq!(mock.calls(), 0);
    }

    // -- detail endpoints ----------------------------------------------------

    #[tokio::test]
    async fn detail_common_returns_first_item() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/detailCommon2").query_param("contentId", "7");
            then.status(200).json_body(ok_envelope(
                json!({ "item": [{ "contentid": "7", "title": "남산", "overview": "산" }] }),
                1,
            ));
        });

        let detail = client_for(&server).detail_common("7").await.unwrap().unwrap();
        assert_eq!(detail.summary.content_id, "7");
        assert_eq!(detail.overview, "산");
    }

    #[tokio::test]
    async fn detail_common_without_items_is_none() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/detailCommon2");
            then.status(200).json_body(ok_envelope(json!(""), 0));
        });

        assert!(client_for(&server).detail_common("7").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn pet_lookup_uses_pet_key_when_configured() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/detailPetTour2")
                .query_param("serviceKey", "pet-key");
            then.status(200).json_body(ok_envelope(
                json!({ "item": { "contentid": "9", "acmpyPsblCpam": "소형견" } }),
                1,
            ));
        });

        let config = TourApiConfig::new(server.base_url(), Some("test-key".into()))
            .with_pet_service_key(Some("pet-key".into()));
        let info = TourApiClient::new(config)
            .detail_pet_tour("9")
            .await
            .unwrap()
            .unwrap();

        mock.assert();
        assert_eq!(info.acmpy_psbl_cpam.as_deref(), Some("소형견"));
    }

    #[tokio::test]
    async fn empty_content_id_is_validation_error() {
        let client = TourApiClient::new(TourApiConfig::new("http://127.0.0.1:9", Some("k".into())));
        assert_matches!(client.detail_common(" ").await, Err(TourApiError::Validation(_)));
        assert_matches!(client.detail_pet_tour("").await, Err(TourApiError::Validation(_)));
    }

    // -- total_count ---------------------------------------------------------

    #[tokio::test]
    async fn total_count_reads_quoted_count() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET)
                .path("/areaBasedList2")
                .query_param("contentTypeId", "12")
                .query_param("numOfRows", "1");
            then.status(200).json_body(json!({
                "response": {
                    "header": { "resultCode": "0000", "resultMsg": "OK" },
                    "body": { "items": { "item": [{ "contentid": "1" }] }, "totalCount": "15230" }
                }
            }));
        });

        let count = client_for(&server)
            .total_count(&CategoryFilter::ContentType("12".into()))
            .await
            .unwrap();
        assert_eq!(count, 15230);
    }

    // -- failures ------------------------------------------------------------

    #[tokio::test]
    async fn missing_key_fails_before_request() {
        let client = TourApiClient::new(TourApiConfig::new("http://127.0.0.1:9", None));
        assert!(!client.is_configured());
        assert_matches!(
            client.area_based_list(&ListQuery::default()).await,
            Err(TourApiError::MissingServiceKey)
        );
    }

    #[tokio::test]
    async fn non_success_result_code_is_upstream_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/areaBasedList2");
            then.status(200).json_body(json!({
                "response": { "header": { "resultCode": "22", "resultMsg": "LIMITED NUMBER OF SERVICE REQUESTS EXCEEDS ERROR" } }
            }));
        });

        let err = client_for(&server)
            .area_based_list(&ListQuery::default())
            .await
            .unwrap_err();
        assert_matches!(err, TourApiError::Upstream { ref code, .. } if code == "22");
    }

    #[tokio::test]
    async fn http_error_keeps_status_and_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/areaBasedList2");
            then.status(503).body("Service Unavailable");
        });

        let err = client_for(&server)
            .area_based_list(&ListQuery::default())
            .await
            .unwrap_err();
        assert_matches!(
            err,
            TourApiError::Http { status: 503, ref body } if body == "Service Unavailable"
        );
    }

    #[tokio::test]
    async fn xml_body_is_decode_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/areaBasedList2");
            then.status(200)
                .body("<OpenAPI_ServiceResponse><cmmMsgHeader>SERVICE_KEY_IS_NOT_REGISTERED_ERROR</cmmMsgHeader></OpenAPI_ServiceResponse>");
        });

        let err = client_for(&server)
            .area_based_list(&ListQuery::default())
            .await
            .unwrap_err();
        assert_matches!(err, TourApiError::Decode(ref msg) if msg.contains("OpenAPI_ServiceResponse"));
    }
}
