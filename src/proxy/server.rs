use axum::{
    extract::DefaultBodyLimit,
    response::{IntoResponse, Json, Response},
    routing::{get, post, MethodRouter},
    Router,
};
use std::sync::Arc;
use tokio::sync::oneshot;
use tower_http::trace::TraceLayer;
use tracing::{debug, error};

use crate::error::AppError;
use crate::proxy::config::ServiceConfig;
use crate::proxy::handlers;
use crate::proxy::pipeline::Endpoint;
use crate::proxy::upstream::CompletionClient;

const MAX_BODY_BYTES: usize = 1024 * 1024;

/// Axum 应用状态 (启动后只读)
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServiceConfig>,
    pub completion: Arc<dyn CompletionClient>,
}

impl AppState {
    pub fn new(config: ServiceConfig, completion: Arc<dyn CompletionClient>) -> Self {
        Self {
            config: Arc::new(config),
            completion,
        }
    }
}

/// POST handler for `endpoint`; any other method gets the 405 envelope.
fn conversion_route(endpoint: Endpoint) -> MethodRouter<AppState> {
    let route = match endpoint {
        Endpoint::Convert => post(handlers::handle_convert),
        Endpoint::TranslateAll => post(handlers::handle_translate_all),
        Endpoint::TranslateDetect => post(handlers::handle_translate_detect),
        Endpoint::TranslateList => post(handlers::handle_translate_list),
    };
    route.fallback(handlers::handle_method_not_allowed)
}

/// 构建路由
pub fn build_router(state: AppState) -> Router {
    Endpoint::ALL
        .into_iter()
        .fold(Router::new(), |router, endpoint| {
            router.route(endpoint.path(), conversion_route(endpoint))
        })
        .route("/healthz", get(health_check_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn(crate::proxy::middleware::cors_middleware))
        .with_state(state)
}

/// Axum 服务器实例
pub struct AxumServer {
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl AxumServer {
    /// 启动 Axum 服务器
    pub async fn start(
        config: ServiceConfig,
        completion: Arc<dyn CompletionClient>,
    ) -> Result<(Self, tokio::task::JoinHandle<()>), AppError> {
        let addr = format!("{}:{}", config.get_bind_address(), config.port);
        let app = build_router(AppState::new(config, completion));

        // 绑定地址
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| AppError::Bind(format!("地址 {} 绑定失败: {}", addr, e)))?;

        tracing::info!("Hangul relay listening on http://{}", addr);

        // 创建关闭通道
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();

        // 在新任务中启动服务器
        let handle = tokio::spawn(async move {
            use hyper::server::conn::http1;
            use hyper_util::rt::TokioIo;
            use hyper_util::service::TowerToHyperService;

            loop {
                tokio::select! {
                    res = listener.accept() => {
                        match res {
                            Ok((stream, _)) => {
                                let io = TokioIo::new(stream);
                                let service = TowerToHyperService::new(app.clone());

                                tokio::task::spawn(async move {
                                    if let Err(err) = http1::Builder::new()
                                        .serve_connection(io, service)
                                        .await
                                    {
                                        debug!("连接处理结束或出错: {:?}", err);
                                    }
                                });
                            }
                            Err(e) => {
                                error!("接收连接失败: {:?}", e);
                            }
                        }
                    }
                    _ = &mut shutdown_rx => {
                        tracing::info!("Hangul relay stopped listening");
                        break;
                    }
                }
            }
        });

        Ok((
            Self {
                shutdown_tx: Some(shutdown_tx),
            },
            handle,
        ))
    }

    /// 停止服务器
    pub fn stop(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

/// 健康检查处理器
async fn health_check_handler() -> Response {
    Json(serde_json::json!({
        "status": "ok"
    }))
    .into_response()
}
