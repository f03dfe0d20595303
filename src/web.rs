use crate::{
    app::{App, AppError, SectionView},
    assistant::Reply,
    bookmarks::Bookmark,
    catalog::{self, Category, Item, Section},
    config::Config,
    notifications::Notification,
    prefs::Theme,
    search::{SearchEntry, UiAction},
};
use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::{Arc, Mutex};
use tokio::{signal, sync::RwLock};

#[derive(Clone)]
struct SharedState {
    app: Arc<RwLock<App>>,

    // follow-up actions the assistant scheduled; clients poll and pop
    pending_action: Arc<Mutex<Option<UiAction>>>,
}

async fn start_app(app: App) {
    let listen_addr = app.config().read().unwrap().listen_addr.clone();

    let app = Arc::new(RwLock::new(app));

    let signal = shutdown_signal(app.clone());
    let shared_state = Arc::new(SharedState {
        app: app.clone(),
        pending_action: Arc::new(Mutex::new(None)),
    });

    async fn shutdown_signal(app: Arc<RwLock<App>>) {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler");
        };

        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install signal handler")
                .recv()
                .await;
        };

        tokio::select! {
            _ = ctrl_c => {
                // drop any pending assistant follow-up before going down
                app.write().await.close_assistant();
            },
            _ = terminate => {},
        }
    }

    let app = Router::new()
        .route("/api/home", get(home))
        .route("/api/sections", get(sections_list))
        .route("/api/sections/open", post(open_section))
        .route("/api/search", post(search_index))
        .route("/api/bookmarks", get(bookmarks_list))
        .route("/api/bookmarks/add", post(bookmarks_add))
        .route("/api/bookmarks/delete", post(bookmarks_delete))
        .route("/api/bookmarks/clear", post(bookmarks_clear))
        .route("/api/bookmarks/count", get(bookmarks_count))
        .route("/api/notifications", get(notifications_list))
        .route("/api/notifications/read", post(notifications_read))
        .route("/api/notifications/read_all", post(notifications_read_all))
        .route("/api/assistant/ask", post(assistant_ask))
        .route("/api/assistant/close", post(assistant_close))
        .route("/api/assistant/pending", get(assistant_pending))
        .route("/api/theme", get(theme_get).post(theme_set))
        .route("/api/theme/toggle", post(theme_toggle))
        .route("/api/ui/shortcuts", get(shortcuts))
        .route("/api/config", get(get_config))
        .route("/api/config", post(update_config))
        .layer(
            tower_http::trace::TraceLayer::new_for_http()
                .make_span_with(
                    tower_http::trace::DefaultMakeSpan::new().level(tracing::Level::INFO),
                )
                .on_response(
                    tower_http::trace::DefaultOnResponse::new().level(tracing::Level::INFO),
                ),
        )
        .with_state(shared_state);

    let listener = tokio::net::TcpListener::bind(&listen_addr).await.unwrap();
    log::info!("listening on {listen_addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(signal)
        .await
        .unwrap();
}

pub fn start_daemon(app: App) {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .unwrap()
        .block_on(async { start_app(app).await });
}

// Wraps `AppError` so axum knows which status each variant maps to.
#[derive(Debug)]
struct HttpError(AppError);

impl IntoResponse for HttpError {
    fn into_response(self) -> axum::response::Response {
        match self.0 {
            AppError::UnknownSection(_) => (
                axum::http::StatusCode::NOT_FOUND,
                json!({"error": self.0.to_string()}).to_string(),
            ),
            AppError::AlreadyBookmarked => (
                axum::http::StatusCode::CONFLICT,
                json!({"error": self.0.to_string()}).to_string(),
            ),
            AppError::Other(_) => {
                log::error!("{self:?}");
                (
                    axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": self.0.to_string()}).to_string(),
                )
            }
        }
        .into_response()
    }
}

impl<E> From<E> for HttpError
where
    E: Into<AppError>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[derive(Debug, Serialize)]
struct HomeResponse {
    greeting: String,
    theme: Theme,
    bookmark_count: usize,
    unread_notifications: usize,
}

async fn home(State(state): State<Arc<SharedState>>) -> Result<Json<HomeResponse>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        Ok(Json(HomeResponse {
            greeting: app.greeting(),
            theme: app.prefs().theme(),
            bookmark_count: app.bookmarks().count(),
            unread_notifications: app.notifications().unread_count(),
        }))
    })
}

#[derive(Debug, Serialize)]
struct SectionSummary {
    category: Category,
    title: &'static str,
    subtitle: &'static str,
}

async fn sections_list() -> Json<Vec<SectionSummary>> {
    Json(
        Category::ALL
            .into_iter()
            .map(|category| {
                let section = Section::of(category);
                SectionSummary {
                    category,
                    title: section.title,
                    subtitle: section.subtitle,
                }
            })
            .collect(),
    )
}

#[derive(Debug, Clone, Deserialize)]
struct OpenSectionRequest {
    section: String,

    /// Filter chip token; absent means the default "show all" chip.
    #[serde(default)]
    filter: Option<String>,
}

async fn open_section(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<OpenSectionRequest>,
) -> Result<Json<SectionView>, HttpError> {
    let app = state.app.clone();

    log::debug!("payload: {payload:?}");

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        app.section_for_token(&payload.section, payload.filter.as_deref())
            .map(Json)
            .map_err(Into::into)
    })
}

#[derive(Debug, Clone, Deserialize)]
struct SearchRequest {
    query: String,
}

async fn search_index(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<SearchRequest>,
) -> Result<Json<Vec<SearchEntry>>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        Ok(Json(app.search(&payload.query)))
    })
}

async fn bookmarks_list(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<Vec<Bookmark>>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        Ok(Json(app.bookmarks().list()))
    })
}

async fn bookmarks_add(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<Item>,
) -> Result<Json<Bookmark>, HttpError> {
    let app = state.app.clone();

    log::debug!("payload: {payload:?}");

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        app.add_bookmark(&payload).map(Json).map_err(Into::into)
    })
}

#[derive(Debug, Deserialize)]
struct BookmarkDeleteRequest {
    id: u64,
}

async fn bookmarks_delete(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<BookmarkDeleteRequest>,
) -> Result<Json<()>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        app.bookmarks().remove(payload.id);
        Ok(Json(()))
    })
}

#[derive(Debug, Serialize)]
struct ClearResponse {
    removed: usize,
}

async fn bookmarks_clear(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<ClearResponse>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        Ok(Json(ClearResponse {
            removed: app.bookmarks().clear(),
        }))
    })
}

#[derive(Debug, Serialize)]
struct CountResponse {
    count: usize,
}

async fn bookmarks_count(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<CountResponse>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        Ok(Json(CountResponse {
            count: app.bookmarks().count(),
        }))
    })
}

#[derive(Debug, Serialize)]
struct NotificationsResponse {
    items: Vec<Notification>,
    unread: usize,
}

async fn notifications_list(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<NotificationsResponse>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        Ok(Json(NotificationsResponse {
            items: app.notifications().items().to_vec(),
            unread: app.notifications().unread_count(),
        }))
    })
}

#[derive(Debug, Deserialize)]
struct NotificationReadRequest {
    id: u32,
}

#[derive(Debug, Serialize)]
struct NotificationReadResponse {
    changed: usize,
}

async fn notifications_read(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<NotificationReadRequest>,
) -> Result<Json<NotificationReadResponse>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let mut app = app.blocking_write();
        let changed = usize::from(app.notifications_mut().mark_read(payload.id));
        Ok(Json(NotificationReadResponse { changed }))
    })
}

async fn notifications_read_all(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<NotificationReadResponse>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let mut app = app.blocking_write();
        Ok(Json(NotificationReadResponse {
            changed: app.notifications_mut().mark_all_read(),
        }))
    })
}

#[derive(Debug, Deserialize)]
struct AskRequest {
    message: String,
}

#[derive(Debug, Serialize)]
struct AskResponse {
    reply: Reply,

    // timing hints so a client can pace delivery and the follow-up poll
    reply_delay_ms: u64,
    follow_up_delay_ms: u64,
}

async fn assistant_ask(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<AskRequest>,
) -> Result<Json<AskResponse>, HttpError> {
    let app = state.app.clone();
    let pending = state.pending_action.clone();

    tokio::task::block_in_place(move || {
        let mut app = app.blocking_write();

        let (reply_delay_ms, follow_up_delay_ms) = {
            let config = app.config();
            let config = config.read().unwrap();
            (
                config.assistant.reply_delay_ms,
                config.assistant.follow_up_delay_ms,
            )
        };

        let reply = app.ask(&payload.message, move |action| {
            *pending.lock().unwrap() = Some(action);
        });

        Ok(Json(AskResponse {
            reply,
            reply_delay_ms,
            follow_up_delay_ms,
        }))
    })
}

async fn assistant_close(State(state): State<Arc<SharedState>>) -> Result<Json<()>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let mut app = app.blocking_write();
        app.close_assistant();
        *state.pending_action.lock().unwrap() = None;
        Ok(Json(()))
    })
}

#[derive(Debug, Serialize)]
struct PendingResponse {
    action: Option<UiAction>,
}

async fn assistant_pending(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<PendingResponse>, HttpError> {
    Ok(Json(PendingResponse {
        action: state.pending_action.lock().unwrap().take(),
    }))
}

#[derive(Debug, Serialize)]
struct ThemeResponse {
    theme: Theme,
}

async fn theme_get(State(state): State<Arc<SharedState>>) -> Result<Json<ThemeResponse>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        Ok(Json(ThemeResponse {
            theme: app.prefs().theme(),
        }))
    })
}

#[derive(Debug, Deserialize)]
struct ThemeSetRequest {
    theme: Theme,
}

async fn theme_set(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<ThemeSetRequest>,
) -> Result<Json<ThemeResponse>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let mut app = app.blocking_write();
        app.prefs_mut().set_theme(payload.theme);
        Ok(Json(ThemeResponse {
            theme: app.prefs().theme(),
        }))
    })
}

async fn theme_toggle(
    State(state): State<Arc<SharedState>>,
) -> Result<Json<ThemeResponse>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let mut app = app.blocking_write();
        Ok(Json(ThemeResponse {
            theme: app.prefs_mut().toggle_theme(),
        }))
    })
}

async fn shortcuts() -> Json<&'static [catalog::Shortcut]> {
    Json(catalog::SHORTCUTS)
}

async fn get_config(State(state): State<Arc<SharedState>>) -> Result<Json<Config>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        Ok(Json(app.config().read().unwrap().clone()))
    })
}

async fn update_config(
    State(state): State<Arc<SharedState>>,
    Json(payload): Json<Config>,
) -> Result<Json<Config>, HttpError> {
    let app = state.app.clone();

    tokio::task::block_in_place(move || {
        let app = app.blocking_read();
        *app.config().write().unwrap() = payload.clone();
        Ok(Json(app.config().read().unwrap().clone()))
    })
}
