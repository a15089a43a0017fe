use actix_multipart::{form::MultipartFormConfig, MultipartError};
use actix_web::{
    dev::ServiceResponse,
    http::StatusCode,
    middleware::{ErrorHandlerResponse, ErrorHandlers},
    web,
    ResponseError,
};

use crate::errors::AppError;

const MULTIPART_TOTAL_LIMIT: usize = 20 * 1024 * 1024;

/// Payload extractor failures render through the standard failure envelope.
pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::from(err).into()
    }));

    cfg.app_data(
        MultipartFormConfig::default()
            .total_limit(MULTIPART_TOTAL_LIMIT)
            .error_handler(|err, _req| AppError::from(err).into()),
    );
}

/// The multipart extractor rejects a wrong content type with a bare 415
/// before its configured error handler runs. JSON routes already answer
/// 400 through `JsonConfig`, so any 415 left here comes from a multipart
/// route.
pub fn payload_error_handlers<B: 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::UNSUPPORTED_MEDIA_TYPE, unsupported_media_type)
}

fn unsupported_media_type<B>(res: ServiceResponse<B>) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let (req, _) = res.into_parts();
    let response = AppError::from(MultipartError::ContentTypeIncompatible).error_response();

    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App, HttpResponse};

    #[actix_rt::test]
    async fn unsupported_media_type_becomes_bad_request_envelope() {
        let app = test::init_service(
            App::new()
                .wrap(payload_error_handlers())
                .route("/upload", web::post().to(|| async { HttpResponse::UnsupportedMediaType().finish() })),
        )
        .await;

        let req = test::TestRequest::post().uri("/upload").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Request must be multipart/form-data");
    }
}
