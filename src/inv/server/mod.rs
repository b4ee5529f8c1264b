// Copyright (c) 2026 Inventory Dashboard Developers. All Rights Reserved.

//! The config provider: hands the backend connection parameters to the
//! dashboard at `/api/config` and serves the single-page frontend.

use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use futures::*;

use hyper::header::{HeaderValue, CONTENT_TYPE};
use hyper::service::service_fn_ok;
use hyper::{Body, Method, Request, Response, Server, StatusCode};

use crate::inv;
use crate::inv::config::ServerConfig;
use crate::inv::error::ErrorKind;

pub const CONFIG_ROUTE: &str = "/api/config";
pub const INDEX_DOCUMENT: &str = "index.html";

lazy_static! {
    static ref CONTENT_TYPES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("html", "text/html; charset=utf-8");
        m.insert("js", "application/javascript");
        m.insert("css", "text/css");
        m.insert("json", "application/json");
        m.insert("png", "image/png");
        m.insert("svg", "image/svg+xml");
        m.insert("ico", "image/x-icon");
        m
    };
}

fn content_type(path: &Path) -> &'static str {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| CONTENT_TYPES.get(ext.to_lowercase().as_str()).cloned())
        .unwrap_or("application/octet-stream")
}

fn respond(status: StatusCode, content_type: &'static str, body: Body) -> Response<Body> {
    let mut response = Response::new(body);
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static(content_type));
    response
}

fn plain(status: StatusCode, message: &'static str) -> Response<Body> {
    respond(status, "text/plain; charset=utf-8", Body::from(message))
}

/// Map a request path onto a file below `root`. Paths that try to climb
/// out of `root` are rejected.
pub fn resolve_path(root: &Path, request_path: &str) -> inv::Result<PathBuf> {
    let relative = Path::new(request_path.trim_start_matches('/'));
    let mut resolved = root.to_path_buf();
    for component in relative.components() {
        match component {
            Component::Normal(part) => resolved.push(part),
            Component::CurDir => {}
            _ => return Err(ErrorKind::InvalidPath(request_path.to_string()).into()),
        }
    }
    Ok(resolved)
}

fn serve_config(config: &ServerConfig) -> Response<Body> {
    match serde_json::to_vec(config.backend()) {
        Ok(json) => respond(StatusCode::OK, "application/json", Body::from(json)),
        Err(err) => {
            error!("could not serialize backend config: {}", err);
            plain(StatusCode::INTERNAL_SERVER_ERROR, "internal error")
        }
    }
}

// Serve an existing file below the public directory, falling back to the
// entry document so that client-side routes resolve.
fn serve_static(config: &ServerConfig, request_path: &str) -> Response<Body> {
    let root = config.public_dir();
    let candidate = match resolve_path(root, request_path) {
        Ok(path) => path,
        Err(err) => {
            warn!("{}", err);
            return plain(StatusCode::BAD_REQUEST, "bad request");
        }
    };

    let file = if candidate.is_file() {
        candidate
    } else {
        root.join(INDEX_DOCUMENT)
    };

    match fs::read(&file) {
        Ok(bytes) => respond(StatusCode::OK, content_type(&file), Body::from(bytes)),
        Err(err) => {
            error!("could not read {}: {}", file.display(), err);
            plain(StatusCode::NOT_FOUND, "not found")
        }
    }
}

/// Answer one request.
pub fn handle(config: &ServerConfig, req: &Request<Body>) -> Response<Body> {
    let path = req.uri().path();
    debug!("inv:server<{}:{}>", req.method(), path);
    match *req.method() {
        Method::GET | Method::HEAD if path == CONFIG_ROUTE => serve_config(config),
        Method::GET | Method::HEAD => serve_static(config, path),
        _ => plain(StatusCode::METHOD_NOT_ALLOWED, "method not allowed"),
    }
}

/// Bind the server to all interfaces on the configured port. The returned
/// future runs until the server fails.
pub fn serve(config: ServerConfig) -> inv::Result<(SocketAddr, inv::Future<()>)> {
    let addr: SocketAddr = ([0, 0, 0, 0], config.port()).into();
    let config = Arc::new(config);
    let server = Server::try_bind(&addr)?.serve(move || {
        let config = Arc::clone(&config);
        service_fn_ok(move |req: Request<Body>| handle(&config, &req))
    });
    let local_addr = server.local_addr();
    info!("server is running on http://localhost:{}", local_addr.port());
    let running: inv::Future<()> =
        Box::new(server.map_err(|e| inv::Error::with_chain(e, "inv:server")));
    Ok((local_addr, running))
}
