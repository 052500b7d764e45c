use crate::auth::{TokenResolver, TokenStore};
use crate::fetcher::CatalogFetcher;
use crate::render::EndpointId;
use crate::session::ExplorerSession;
use serde::Deserialize;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use warp::http::StatusCode;
use warp::Filter;

pub struct AppState<S> {
    pub session: RwLock<ExplorerSession>,
    pub resolver: TokenResolver<S>,
    pub fetcher: CatalogFetcher,
}

#[derive(Debug, Deserialize)]
struct ViewQuery {
    q: Option<String>,
}

fn with_state<S>(
    state: Arc<AppState<S>>,
) -> impl Filter<Extract = (Arc<AppState<S>>,), Error = Infallible> + Clone
where
    S: TokenStore + Send + Sync + 'static,
{
    warp::any().map(move || state.clone())
}

pub fn routes<S>(
    state: Arc<AppState<S>>,
) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone
where
    S: TokenStore + Send + Sync + 'static,
{
    let health_route = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::json(&serde_json::json!({"status": "healthy"})));

    let view_route = warp::path("view")
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<ViewQuery>())
        .and(with_state(state.clone()))
        .and_then(view_handler::<S>);

    let toggle_category_route = warp::path!("toggle" / "category" / usize)
        .and(warp::post())
        .and(with_state(state.clone()))
        .and_then(toggle_category_handler::<S>);

    let toggle_endpoint_route = warp::path!("toggle" / "endpoint" / usize / usize)
        .and(warp::post())
        .and(with_state(state.clone()))
        .and_then(toggle_endpoint_handler::<S>);

    let command_route = warp::path!("command" / usize / usize)
        .and(warp::get())
        .and(with_state(state.clone()))
        .and_then(command_handler::<S>);

    let reload_route = warp::path("reload")
        .and(warp::post())
        .and(with_state(state))
        .and_then(reload_handler::<S>);

    health_route
        .or(view_route)
        .or(toggle_category_route)
        .or(toggle_endpoint_route)
        .or(command_route)
        .or(reload_route)
        .with(warp::cors().allow_any_origin())
}

/// Renders the session with `q` as the search text; no `q` shows everything.
async fn view_handler<S>(query: ViewQuery, state: Arc<AppState<S>>) -> Result<impl warp::Reply, Infallible> {
    let mut session = state.session.write().await;
    session.set_query(query.q.unwrap_or_default());
    let status = match session.failure() {
        Some(failure) if failure.is_auth_failure() => StatusCode::UNAUTHORIZED,
        Some(_) => StatusCode::BAD_GATEWAY,
        None => StatusCode::OK,
    };
    Ok(warp::reply::with_status(warp::reply::json(&session.view()), status))
}

async fn toggle_category_handler<S>(index: usize, state: Arc<AppState<S>>) -> Result<impl warp::Reply, Infallible> {
    let result = state.session.write().await.toggle_category(index);
    Ok(toggle_reply(result))
}

async fn toggle_endpoint_handler<S>(
    category: usize,
    endpoint: usize,
    state: Arc<AppState<S>>,
) -> Result<impl warp::Reply, Infallible> {
    let result = state
        .session
        .write()
        .await
        .toggle_endpoint(EndpointId::new(category, endpoint));
    Ok(toggle_reply(result))
}

fn toggle_reply(
    result: Result<bool, crate::error::LookupError>,
) -> warp::reply::WithStatus<warp::reply::Json> {
    match result {
        Ok(expanded) => warp::reply::with_status(
            warp::reply::json(&serde_json::json!({"expanded": expanded})),
            StatusCode::OK,
        ),
        Err(e) => warp::reply::with_status(
            warp::reply::json(&serde_json::json!({"error": e.to_string()})),
            StatusCode::NOT_FOUND,
        ),
    }
}

async fn command_handler<S>(
    category: usize,
    endpoint: usize,
    state: Arc<AppState<S>>,
) -> Result<impl warp::Reply, Infallible> {
    let session = state.session.read().await;
    let reply = match session.command_for(EndpointId::new(category, endpoint)) {
        Ok(command) => warp::reply::with_status(command, StatusCode::OK),
        Err(e) => warp::reply::with_status(e.to_string(), StatusCode::NOT_FOUND),
    };
    Ok(reply)
}

async fn reload_handler<S>(state: Arc<AppState<S>>) -> Result<impl warp::Reply, Infallible>
where
    S: TokenStore + Send + Sync,
{
    // The session lock is never held across the fetch; meanwhile `/view`
    // reports `loading`.
    let pending = state.session.write().await.prepare_load(&state.resolver);
    if let Some((ticket, token)) = pending {
        let outcome = state.fetcher.fetch(&token).await;
        state.session.write().await.apply_outcome(ticket, outcome);
    }
    let session = state.session.read().await;
    Ok(warp::reply::json(&session.view()))
}

pub async fn run_server<S>(addr: SocketAddr, state: Arc<AppState<S>>)
where
    S: TokenStore + Send + Sync + 'static,
{
    tracing::info!("explorer server running on http://{}", addr);
    warp::serve(routes(state)).run(addr).await;
}
