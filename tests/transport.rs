//! Sends decoded requests through a real hyper HTTP/1.1 connection to a
//! local echo server and checks what arrives on the other side.

use std::convert::Infallible;
use std::io::Read;
use std::net::SocketAddr;

use bytes::Bytes;
use flate2::read::GzDecoder;
use http::header::CONTENT_ENCODING;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, TcpStream};

use reqspec::{Decoder, decode};

/// Replies with `<METHOD> <path> <encoding> <decoded body>`.
async fn echo(req: hyper::Request<Incoming>) -> Result<hyper::Response<Full<Bytes>>, Infallible> {
    let method = req.method().to_string();
    let path = req.uri().path().to_owned();
    let gzip = req
        .headers()
        .get(CONTENT_ENCODING)
        .is_some_and(|v| v.as_bytes() == b"gzip");

    let raw = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => Bytes::from(format!("<body error: {e}>")),
    };
    let body = if gzip {
        let mut text = String::new();
        match GzDecoder::new(&raw[..]).read_to_string(&mut text) {
            Ok(_) => text,
            Err(e) => format!("<gunzip error: {e}>"),
        }
    } else {
        String::from_utf8_lossy(&raw).into_owned()
    };

    let encoding = if gzip { "gzip" } else { "identity" };
    let reply = format!("{method} {path} {encoding} {body}");
    Ok(hyper::Response::new(Full::new(Bytes::from(reply))))
}

async fn spawn_echo_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            tokio::spawn(async move {
                let _ = hyper::server::conn::http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), service_fn(echo))
                    .await;
            });
        }
    });

    addr
}

async fn send(addr: SocketAddr, req: reqspec::Request) -> String {
    let stream = TcpStream::connect(addr).await.unwrap();
    let (mut sender, conn) = hyper::client::conn::http1::handshake(TokioIo::new(stream))
        .await
        .unwrap();
    tokio::spawn(async move {
        let _ = conn.await;
    });

    let mut req = req.into_http("").unwrap();
    req.headers_mut()
        .insert(http::header::HOST, addr.to_string().parse().unwrap());

    let res = sender.send_request(req).await.unwrap();
    assert!(res.status().is_success());
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[tokio::test(flavor = "multi_thread")]
async fn plain_body_arrives_verbatim() {
    init_tracing();
    let addr = spawn_echo_server().await;

    let req = decode(r#"post:/db:{"db": "true"}"#, false).unwrap();
    assert_eq!(send(addr, req).await, r#"POST /db identity {"db": "true"}"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn gzip_body_is_marked_and_decodes() {
    init_tracing();
    let addr = spawn_echo_server().await;

    let req = decode(r#"put:/orders/7:{"qty": 3}"#, true).unwrap();
    assert_eq!(send(addr, req).await, r#"PUT /orders/7 gzip {"qty": 3}"#);
}

#[tokio::test(flavor = "multi_thread")]
async fn large_gzip_body_streams_through() {
    init_tracing();
    let addr = spawn_echo_server().await;

    let payload: String = (0..50_000u32).map(|i| format!("{i:08x}")).collect();
    let decoder = Decoder::new()
        .level(1)
        .resolver(move |_: &str| -> std::io::Result<String> { Ok(payload.clone()) });
    let req = decoder.decode("post:/bulk:ignored").unwrap();

    let reply = send(addr, req).await;
    let body = reply.strip_prefix("POST /bulk gzip ").unwrap();
    assert_eq!(body.len(), 50_000 * 8);
    assert!(body.starts_with("0000000000000001"));
}

#[tokio::test(flavor = "multi_thread")]
async fn bodyless_request_sends_nothing() {
    init_tracing();
    let addr = spawn_echo_server().await;

    let req = decode("GET:ping", true).unwrap();
    assert_eq!(send(addr, req).await, "GET /ping identity ");
}
