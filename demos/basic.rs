//! Minimal jsonwrap demo: one handler, JSON in every answer.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example basic
//!
//! Try:
//!   curl -i http://localhost:3000/users/42
//!   curl -i http://localhost:3000/users/0
//!   curl -i -X POST http://localhost:3000/users -d '{"name":"alice"}'

use http::header::{HeaderValue, LOCATION};
use http::{Method, StatusCode};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use jsonwrap::{ApiError, Request, Response, wrap};
use serde::Serialize;
use tokio::net::TcpListener;
use tracing::{error, info};

#[derive(Clone, Serialize)]
struct User {
    id: u64,
    name: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::fmt::init();

    let listener = TcpListener::bind("0.0.0.0:3000").await?;
    let service = wrap(users).body_limit(64 * 1024);
    info!(addr = %listener.local_addr()?, "demo listening");

    // jsonwrap stops at the service; accepting connections is up to the app.
    loop {
        let (stream, peer) = listener.accept().await?;
        let service = service.clone();
        tokio::spawn(async move {
            if let Err(e) = Builder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                error!(%peer, "connection error: {e}");
            }
        });
    }
}

// jsonwrap does not route. A match on method and path is plenty here.
async fn users(req: Request) -> Result<Response<User>, ApiError> {
    match (req.method(), req.path()) {
        (&Method::GET, path) => get_user(path),
        (&Method::POST, "/users") => create_user(&req),
        _ => Err(ApiError::METHOD_NOT_ALLOWED),
    }
}

fn get_user(path: &str) -> Result<Response<User>, ApiError> {
    let id: u64 = path
        .strip_prefix("/users/")
        .and_then(|id| id.parse().ok())
        .ok_or(ApiError::NOT_FOUND)?;
    if id == 0 {
        return Err(ApiError::NOT_FOUND.with_message(format!("User {id} does not exist.")));
    }
    Ok(Response::new(User { id, name: "alice".into() }))
}

fn create_user(req: &Request) -> Result<Response<User>, ApiError> {
    if req.body().is_empty() {
        return Err(ApiError::BAD_REQUEST.with_message("Body is required."));
    }

    // Real app: let input: CreateUser = serde_json::from_slice(req.body())?;
    Ok(Response::new(User { id: 99, name: "new_user".into() })
        .with_status_code(StatusCode::CREATED)
        .with_header(LOCATION, HeaderValue::from_static("/users/99")))
}
