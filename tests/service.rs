//! End-to-end: a wrapped handler behind hyper on 127.0.0.1, a real hyper client.

use std::time::Duration;

use bytes::Bytes;
use http::header::{CONTENT_TYPE, HOST, SET_COOKIE};
use http::{HeaderValue, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder;
use jsonwrap::{ApiError, Handler, Request, Response, Wrapped, wrap};
use serde::Serialize;
use tokio::net::{TcpListener, TcpStream};

#[derive(Clone, Serialize)]
struct Field {
    field: &'static str,
}

fn some_body() -> Field {
    Field { field: "value" }
}

/// Serves `service` for one connection on an ephemeral port, sends `req`
/// through it and returns what came back.
async fn send(service: Wrapped, req: http::request::Builder, body: Bytes) -> (http::response::Parts, String) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let serving = tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        Builder::new(TokioExecutor::new())
            .serve_connection(TokioIo::new(stream), service)
            .await
    });

    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .unwrap();
    let client = tokio::spawn(conn);

    let req = req.header(HOST, addr.to_string()).body(Full::new(body)).unwrap();
    let res = sender.send_request(req).await.unwrap();
    let (parts, body) = res.into_parts();
    let body = body.collect().await.unwrap().to_bytes();

    drop(sender);
    client.await.unwrap().unwrap();
    tokio::time::timeout(Duration::from_secs(5), serving)
        .await
        .expect("connection did not close")
        .unwrap()
        .unwrap();

    (parts, String::from_utf8(body.to_vec()).unwrap())
}

async fn execute(handler: impl Handler) -> (http::response::Parts, String) {
    send(wrap(handler), http::Request::get("/"), Bytes::new()).await
}

#[tokio::test]
async fn response() {
    let (res, body) = execute(|_req: Request| async { Response::new(some_body()) }).await;

    assert_eq!(body, r#"{"field":"value"}"#);
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn response_custom_content_type() {
    let (res, body) = execute(|_req: Request| async {
        Response::new(some_body())
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/xml"))
    })
    .await;

    assert_eq!(body, r#"{"field":"value"}"#);
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.headers[CONTENT_TYPE], "application/xml");
    assert_eq!(res.headers.get_all(CONTENT_TYPE).iter().count(), 1);
}

#[tokio::test]
async fn response_with_code() {
    let (res, body) = execute(|_req: Request| async {
        Response::new(some_body()).with_status_code(StatusCode::ACCEPTED)
    })
    .await;

    assert_eq!(body, r#"{"field":"value"}"#);
    assert_eq!(res.status, StatusCode::ACCEPTED);
    assert_eq!(res.headers[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn response_with_header() {
    let (res, body) = execute(|_req: Request| async {
        Response::new(some_body())
            .try_with_header("Header", "value")
            .unwrap()
    })
    .await;

    assert_eq!(body, r#"{"field":"value"}"#);
    assert_eq!(res.headers[CONTENT_TYPE], "application/json");
    assert_eq!(res.headers["header"], "value");
}

#[tokio::test]
async fn repeated_header_arrives_as_separate_lines() {
    let (res, _) = execute(|_req: Request| async {
        Response::new(some_body())
            .with_header(SET_COOKIE, HeaderValue::from_static("a=1"))
            .with_header(SET_COOKIE, HeaderValue::from_static("b=2"))
    })
    .await;

    let cookies: Vec<_> = res.headers.get_all(SET_COOKIE).iter().collect();
    assert_eq!(cookies, ["a=1", "b=2"]);
}

#[tokio::test]
async fn response_impossible_to_marshal() {
    let (res, body) = execute(|_req: Request| async { Response::new(f64::INFINITY) }).await;

    assert_eq!(body, r#"{"statusCode":500,"message":"Internal server error."}"#);
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.headers[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn error() {
    let (res, body) = execute(|_req: Request| async { ApiError::NOT_ACCEPTABLE }).await;

    assert_eq!(body, r#"{"statusCode":406,"message":"Not acceptable."}"#);
    assert_eq!(res.status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(res.headers[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn error_with_message() {
    let (res, body) = execute(|_req: Request| async {
        ApiError::NOT_ACCEPTABLE.with_message("Custom message.")
    })
    .await;

    assert_eq!(body, r#"{"statusCode":406,"message":"Custom message."}"#);
    assert_eq!(res.status, StatusCode::NOT_ACCEPTABLE);
    assert_eq!(res.headers[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn result_handler() {
    let (res, body) = execute(|req: Request| async move {
        if req.header("authorization").is_none() {
            return Err(ApiError::UNAUTHORIZED);
        }
        Ok(Response::new(some_body()))
    })
    .await;

    assert_eq!(body, r#"{"statusCode":401,"message":"Unauthorized."}"#);
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn request_body_reaches_the_handler() {
    let service = wrap(|req: Request| async move { Response::new(req.body().len()) });
    let (res, body) = send(service, http::Request::post("/"), Bytes::from_static(b"hello")).await;

    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(body, "5");
}

#[tokio::test]
async fn oversized_body_gets_payload_too_large() {
    let service = wrap(|req: Request| async move { Response::new(req.body().len()) }).body_limit(16);
    let (res, body) = send(service, http::Request::post("/"), Bytes::from(vec![b'x'; 1024])).await;

    assert_eq!(body, r#"{"statusCode":413,"message":"Request entity too large."}"#);
    assert_eq!(res.status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(res.headers[CONTENT_TYPE], "application/json");
}

#[tokio::test]
async fn empty_content_type_does_not_override_a_real_one() {
    let (res, _) = execute(|_req: Request| async {
        Response::new(some_body())
            .with_header(CONTENT_TYPE, HeaderValue::from_static(""))
            .with_header(CONTENT_TYPE, HeaderValue::from_static("application/xml"))
    })
    .await;

    let values: Vec<_> = res.headers.get_all(CONTENT_TYPE).iter().collect();
    assert_eq!(values, ["application/xml"]);
}
