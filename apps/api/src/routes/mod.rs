pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate", post(handlers::handle_generate))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::Value;
    use tower::ServiceExt;
    use zip::ZipArchive;

    use super::*;
    use crate::test_support::{
        test_state, CannedBackend, FakeCompiler, COVER_LETTER_JSON, TAILOR_JSON,
    };

    const BOUNDARY: &str = "tailor-test-boundary";

    fn router(backend: CannedBackend, compiler: FakeCompiler, work_dir: &std::path::Path) -> Router {
        build_router(test_state(Arc::new(backend), Arc::new(compiler), work_dir))
    }

    fn multipart_body(fields: &[(&str, &str)]) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            ));
        }
        body.push_str(&format!("--{BOUNDARY}--\r\n"));
        body
    }

    fn multipart_request(fields: &[(&str, &str)]) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(multipart_body(fields)))
            .unwrap()
    }

    fn urlencoded_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/generate")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    async fn error_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    fn zip_entries(bytes: Vec<u8>) -> Vec<String> {
        let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut names: Vec<String> = archive.file_names().map(String::from).collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_health() {
        let work = tempfile::tempdir().unwrap();
        let app = router(CannedBackend::always("{}"), FakeCompiler::default(), work.path());

        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = error_json(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_multipart_generate_returns_zip_attachment() {
        let work = tempfile::tempdir().unwrap();
        let app = router(
            CannedBackend::documents(TAILOR_JSON, COVER_LETTER_JSON),
            FakeCompiler::default(),
            work.path(),
        );

        let response = app
            .oneshot(multipart_request(&[
                ("job_title", "Backend Engineer at Acme"),
                ("job_description", "Python, Kafka, Kubernetes"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/zip"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Backend_Engineer_at_Acme.zip\""
        );
        assert_eq!(
            zip_entries(body_bytes(response).await),
            vec![
                "Backend_Engineer_at_Acme/cl_Singh.pdf".to_string(),
                "Backend_Engineer_at_Acme/resume_Singh.pdf".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_urlencoded_generate_respects_type() {
        let work = tempfile::tempdir().unwrap();
        let app = router(
            CannedBackend::documents(TAILOR_JSON, COVER_LETTER_JSON),
            FakeCompiler::default(),
            work.path(),
        );

        let response = app
            .oneshot(urlencoded_request(
                "job_title=Data+Engineer&job_description=Spark&type=cover_letter",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            zip_entries(body_bytes(response).await),
            vec!["Data_Engineer/cl_Singh.pdf".to_string()]
        );
    }

    #[tokio::test]
    async fn test_bad_type_is_400() {
        let work = tempfile::tempdir().unwrap();
        let app = router(CannedBackend::always(TAILOR_JSON), FakeCompiler::default(), work.path());

        let response = app
            .oneshot(multipart_request(&[
                ("job_title", "SRE"),
                ("job_description", "Go"),
                ("type", "portfolio"),
            ]))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_job_title_is_400() {
        let work = tempfile::tempdir().unwrap();
        let app = router(CannedBackend::always(TAILOR_JSON), FakeCompiler::default(), work.path());

        let response = app
            .oneshot(urlencoded_request("job_description=Go"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_model_failure_is_500_with_raw_output() {
        let work = tempfile::tempdir().unwrap();
        let app = router(
            CannedBackend::always("Sorry, I cannot help with that."),
            FakeCompiler::default(),
            work.path(),
        );

        let response = app
            .oneshot(urlencoded_request(
                "job_title=SRE&job_description=Go&type=resume",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = error_json(response).await;
        assert_eq!(body["error"]["code"], "LLM_ERROR");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("Sorry, I cannot help with that."));
    }

    #[tokio::test]
    async fn test_compile_failure_is_500() {
        let work = tempfile::tempdir().unwrap();
        let app = router(
            CannedBackend::always(TAILOR_JSON),
            FakeCompiler::failing(),
            work.path(),
        );

        let response = app
            .oneshot(urlencoded_request(
                "job_title=SRE&job_description=Go&type=resume",
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(error_json(response).await["error"]["code"], "COMPILE_ERROR");
    }
}
