// 转换端点处理器
// 四个端点只是给同一条管线传入不同的 Endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{debug, error};

use crate::models::conversion::ConversionRequest;
use crate::proxy::common::error::ApiError;
use crate::proxy::pipeline::{self, Endpoint};
use crate::proxy::server::AppState;

type Body = Result<Json<ConversionRequest>, JsonRejection>;

async fn dispatch(state: AppState, endpoint: Endpoint, body: Body) -> Response {
    // 非 JSON / 字段类型错误按字段缺失处理，交给校验阶段返回 400
    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!("{} body rejected: {}", endpoint.path(), rejection.body_text());
            ConversionRequest::default()
        }
    };

    match pipeline::run(&state, endpoint, request).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => {
            if e.status().is_server_error() {
                error!("API 오류 | {}: {}", endpoint.path(), e);
            }
            e.into_response()
        }
    }
}

/// POST /api/convert
pub async fn handle_convert(State(state): State<AppState>, body: Body) -> Response {
    dispatch(state, Endpoint::Convert, body).await
}

/// POST /api/translate-all
pub async fn handle_translate_all(State(state): State<AppState>, body: Body) -> Response {
    dispatch(state, Endpoint::TranslateAll, body).await
}

/// POST /api/translate-detect
pub async fn handle_translate_detect(State(state): State<AppState>, body: Body) -> Response {
    dispatch(state, Endpoint::TranslateDetect, body).await
}

/// POST /api/translate-list
pub async fn handle_translate_list(State(state): State<AppState>, body: Body) -> Response {
    dispatch(state, Endpoint::TranslateList, body).await
}

/// Any verb other than POST (OPTIONS is answered by the CORS middleware).
pub async fn handle_method_not_allowed() -> Response {
    ApiError::MethodNotAllowed.into_response()
}
