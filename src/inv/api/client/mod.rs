//! Functions to interact with the inventory backend.

use std::sync::{Arc, Mutex};

use futures::*;

use hyper::client::{Client, HttpConnector};
use hyper::header::{HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use hyper_tls::HttpsConnector;

use url::Url;

use super::{request, response};
use crate::inv;
use crate::inv::config::{BackendConfig, Config};
use crate::inv::error::ErrorKind;
use crate::inv::model::{AccessToken, InventoryId, InventoryRecord};
use crate::inv::util::futures::into_future_trait;

// Threads used by the TLS connector for DNS resolution:
const DNS_WORKER_THREADS: usize = 4;

type HttpClient = Client<HttpsConnector<HttpConnector>>;

struct InventoryImpl {
    config: Config,
    http_client: HttpClient,
    access_token: Option<AccessToken>,
}

/// The inventory backend client.
pub struct Inventory {
    inner: Arc<Mutex<InventoryImpl>>,
}

impl Clone for Inventory {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

// =============================================================================

// Payload type for bodiless requests:
type Nothing = serde_json::Value;

// Fills `{name}` placeholders of a route from id values:
macro_rules! route {
    ($uri:expr, $($var:ident),*) => (
        format!($uri, $($var = Into::<String>::into($var)),*)
    )
}

macro_rules! payload {
    () => {
        None as Option<&Nothing>
    };
    ($target:expr) => {
        Some($target)
    };
}

macro_rules! get {
    ($target:expr, $route:expr) => {
        $target.request($route, hyper::Method::GET, payload!())
    };
}

macro_rules! post {
    ($target:expr, $route:expr, $payload:expr) => {
        $target.request($route, hyper::Method::POST, payload!($payload))
    };
}

// =============================================================================

fn https_client() -> inv::Result<HttpClient> {
    let connector = HttpsConnector::new(DNS_WORKER_THREADS)
        .map_err(|e| inv::Error::with_chain(e, "inv:client:tls"))?;
    Ok(Client::builder().build(connector))
}

fn build_request(
    method: hyper::Method,
    url: &Url,
    token: Option<&AccessToken>,
    body: Option<hyper::Body>,
) -> inv::Result<hyper::Request<hyper::Body>> {
    let uri = url
        .as_str()
        .parse::<hyper::Uri>()
        .map_err(|e| inv::Error::with_chain(e, "inv:request:uri"))?;

    let is_json = body.is_some();
    let mut req = hyper::Request::builder()
        .method(method)
        .uri(uri)
        .body(body.unwrap_or_else(hyper::Body::empty))
        .map_err(|e| inv::Error::with_chain(e, "inv:request:build"))?;

    if is_json {
        req.headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    }

    // The backend expects the access token as a bearer credential:
    if let Some(token) = token {
        let bearer = format!("Bearer {}", AsRef::<str>::as_ref(token));
        let value = HeaderValue::from_str(&bearer)
            .map_err(|e| inv::Error::with_chain(e, "inv:request:authorization"))?;
        req.headers_mut().insert(AUTHORIZATION, value);
    }

    Ok(req)
}

// Issue a request and decode its JSON response body. Any 4XX or 5XX status
// terminates the future with an `ApiError` carrying the response body.
fn execute<Q>(
    client: &HttpClient,
    method: hyper::Method,
    url: Url,
    token: Option<AccessToken>,
    body: Option<hyper::Body>,
) -> inv::Future<Q>
where
    Q: 'static + Send + serde::de::DeserializeOwned,
{
    let context = format!("inv:request<{}:{}>", method, url);
    debug!("{}", context);

    let req = match build_request(method, &url, token.as_ref(), body) {
        Ok(req) => req,
        Err(err) => return into_future_trait(future::err(err)),
    };

    let execute_context = context.clone();
    let response_context = context.clone();

    let f = client
        .request(req)
        .map_err(move |e| inv::Error::with_chain(e, format!("{}:execute", execute_context)))
        .and_then(move |resp| {
            let status_code = resp.status();
            resp.into_body()
                .concat2()
                .map_err(move |e| {
                    inv::Error::with_chain(e, format!("{}:response", response_context))
                })
                .map(move |body: hyper::Chunk| (status_code, body))
        })
        .and_then(move |(status_code, body): (hyper::StatusCode, hyper::Chunk)| -> inv::Result<Q> {
            if status_code.is_client_error() || status_code.is_server_error() {
                return Err(ErrorKind::ApiError(
                    status_code,
                    String::from_utf8_lossy(&body).to_string(),
                )
                .into());
            }
            debug!("{}:payload bytes = {}", context, body.len());
            // Finally, attempt to parse the JSON response into a typeful representation:
            serde_json::from_slice(&body)
                .map_err(|e| inv::Error::with_chain(e, format!("{}:deserialize", context)))
        });

    into_future_trait(f)
}

/// Fetch the backend connection parameters from a running config provider,
/// i.e. `GET {frontend}/api/config`.
pub fn fetch_backend_config(frontend: Url) -> inv::Future<BackendConfig> {
    let client = match https_client() {
        Ok(client) => client,
        Err(err) => return into_future_trait(future::err(err)),
    };
    let mut url = frontend;
    url.set_path("/api/config");
    execute(&client, hyper::Method::GET, url, None, None)
}

// ============================================================================

impl Inventory {
    /// Create a new inventory API client.
    pub fn new(config: Config) -> inv::Result<Self> {
        Ok(Self {
            inner: Arc::new(Mutex::new(InventoryImpl {
                config,
                http_client: https_client()?,
                access_token: None,
            })),
        })
    }

    pub(crate) fn access_token(&self) -> Option<AccessToken> {
        self.inner.lock().unwrap().access_token.clone()
    }

    fn request<P, Q, S>(&self, route: S, method: hyper::Method, payload: Option<&P>) -> inv::Future<Q>
    where
        P: serde::Serialize,
        Q: 'static + Send + serde::de::DeserializeOwned,
        S: Into<String>,
    {
        let (url, client, token) = {
            let inner = self.inner.lock().unwrap();
            let url = inner.config.api_url();
            (url, inner.http_client.clone(), inner.access_token.clone())
        };

        // Build the request url: configured backend base + route:
        let mut use_url = match url {
            Ok(url) => url,
            Err(err) => return into_future_trait(future::err(err)),
        };
        use_url.set_path(&route.into());

        let body = match payload.map(serde_json::to_string) {
            Some(Ok(json)) => Some(hyper::Body::from(json)),
            Some(Err(e)) => {
                return into_future_trait(future::err(inv::Error::with_chain(
                    e,
                    "inv:request:serde",
                )))
            }
            None => None,
        };

        execute(&client, method, use_url, token, body)
    }

    // Protected routes require a token; fail fast rather than sending an
    // unauthenticated request:
    fn protected<Q>(&self, route: String) -> inv::Future<Q>
    where
        Q: 'static + Send + serde::de::DeserializeOwned,
    {
        if !self.has_session() {
            return into_future_trait(future::err(ErrorKind::NoSession.into()));
        }
        get!(self, route)
    }

    /// Test if the client holds an access token.
    pub fn has_session(&self) -> bool {
        self.access_token().is_some()
    }

    /// Set the access token used for subsequent requests.
    pub fn set_access_token(&self, token: Option<AccessToken>) {
        self.inner.lock().unwrap().access_token = token;
    }

    /// Log in to the inventory backend.
    ///
    /// If successful, the client will store the resulting access token for
    /// subsequent API calls. A response without an `access_token` (or with
    /// an empty one) fails with `ErrorKind::MissingAccessToken`.
    pub fn login<S: Into<String>>(&self, username: S, password: S) -> inv::Future<response::Login> {
        let payload = request::Login::new(username.into(), password.into());
        let this = self.clone();
        into_future_trait(post!(self, "/login", &payload).and_then(
            move |login_response: response::Login| {
                let token = login_response
                    .access_token()
                    .filter(|token| !AsRef::<str>::as_ref(*token).is_empty())
                    .cloned();
                match token {
                    Some(token) => {
                        info!("login successful, token received: {:?}", token);
                        this.set_access_token(Some(token));
                        Ok(login_response)
                    }
                    None => Err(ErrorKind::MissingAccessToken.into()),
                }
            },
        ))
    }

    /// Get every inventory record.
    pub fn get_inventory(&self) -> inv::Future<Vec<InventoryRecord>> {
        self.protected("/inventory".to_string())
    }

    /// Get a specific inventory record, as shown by the details view.
    pub fn get_inventory_by_id(&self, id: InventoryId) -> inv::Future<InventoryRecord> {
        self.protected(route!("/inventory/{id}", id))
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::net::SocketAddr;

    use hyper::service::service_fn;
    use hyper::{Body, Method, Request, Response, Server, StatusCode};
    use tokio::runtime::Runtime;

    const TEST_TOKEN: &str = "test-token";

    const INVENTORY_JSON: &str = r#"[
        {"id": 1, "servername": "web01", "os": "linux", "environment": "prod", "application_id": "A1"},
        {"id": 2, "servername": "db01", "os": "windows", "environment": "dev", "application_id": "A2"}
    ]"#;

    type BoxFut = Box<dyn Future<Item = Response<Body>, Error = hyper::Error> + Send>;

    fn json(status: u16, body: &str) -> Response<Body> {
        Response::builder()
            .status(status)
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    // A stand-in for the inventory backend: "alice"/"secret" logs in,
    // "nobody" gets a 200 without a token, everyone else a 401.
    fn fake_backend(req: Request<Body>) -> BoxFut {
        let (parts, body) = req.into_parts();
        let authorized = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(|v| v == format!("Bearer {}", TEST_TOKEN))
            .unwrap_or(false);

        match (&parts.method, parts.uri.path()) {
            (&Method::POST, "/login") => Box::new(body.concat2().map(|chunk| {
                let login: serde_json::Value = serde_json::from_slice(&chunk).unwrap_or_default();
                if login["username"] == "alice" && login["password"] == "secret" {
                    json(200, r#"{"access_token": "test-token"}"#)
                } else if login["username"] == "nobody" {
                    json(200, r#"{"message": "welcome"}"#)
                } else {
                    json(401, r#"{"error": "Invalid credentials"}"#)
                }
            })),
            (&Method::GET, "/api/config") => Box::new(future::ok(json(
                200,
                r#"{"BACKEND_PROTOCOL": "https", "BACKEND_HOST": "inventory", "BACKEND_PORT": "8443"}"#,
            ))),
            (_, _) if !authorized => Box::new(future::ok(json(
                401,
                r#"{"msg": "Missing Authorization Header"}"#,
            ))),
            (&Method::GET, "/inventory") => Box::new(future::ok(json(200, INVENTORY_JSON))),
            (&Method::GET, "/inventory/2") => Box::new(future::ok(json(
                200,
                r#"{"id": 2, "servername": "db01", "os": "windows", "environment": "dev", "application_id": "A2"}"#,
            ))),
            (&Method::GET, "/inventory/broken") => Box::new(future::ok(json(200, "not json"))),
            _ => Box::new(future::ok(json(404, r#"{"error": "Server not found"}"#))),
        }
    }

    fn serve_fake_backend(rt: &mut Runtime) -> SocketAddr {
        let addr: SocketAddr = ([127, 0, 0, 1], 0).into();
        let server = Server::bind(&addr).serve(|| service_fn(fake_backend));
        let local_addr = server.local_addr();
        rt.spawn(server.map_err(|e| eprintln!("fake backend error: {}", e)));
        local_addr
    }

    fn client_for(addr: SocketAddr) -> Inventory {
        let backend = BackendConfig::new("http", addr.ip().to_string(), addr.port().to_string());
        Inventory::new(Config::new(backend)).unwrap()
    }

    fn setup() -> (Runtime, Inventory) {
        let mut rt = Runtime::new().unwrap();
        let addr = serve_fake_backend(&mut rt);
        (rt, client_for(addr))
    }

    #[test]
    fn login_successfully() {
        let (mut rt, inventory) = setup();
        let result = rt.block_on(inventory.login("alice", "secret"));
        assert!(result.is_ok());
        assert!(inventory.has_session());
        assert_eq!(
            inventory.access_token(),
            Some(AccessToken::new(TEST_TOKEN))
        );
    }

    #[test]
    fn login_fails_with_bad_credentials() {
        let (mut rt, inventory) = setup();
        let err = rt.block_on(inventory.login("alice", "wrong")).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
        assert!(!inventory.has_session());
    }

    #[test]
    fn login_without_access_token_is_a_failure() {
        let (mut rt, inventory) = setup();
        let err = rt.block_on(inventory.login("nobody", "whatever")).unwrap_err();
        match *err.kind() {
            ErrorKind::MissingAccessToken => {}
            ref other => panic!("unexpected error: {:?}", other),
        }
        assert!(!inventory.has_session());
    }

    #[test]
    fn fetching_inventory_after_login_is_successful() {
        let (mut rt, inventory) = setup();
        let this = inventory.clone();
        let records = rt
            .block_on(inventory.login("alice", "secret").and_then(move |_| this.get_inventory()))
            .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].servername(), "web01");
        assert_eq!(records[1].servername(), "db01");
    }

    #[test]
    fn fetching_inventory_without_session_fails_fast() {
        let (mut rt, inventory) = setup();
        let err = rt.block_on(inventory.get_inventory()).unwrap_err();
        match *err.kind() {
            ErrorKind::NoSession => {}
            ref other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn fetching_inventory_with_a_rejected_token_is_an_api_error() {
        let (mut rt, inventory) = setup();
        inventory.set_access_token(Some(AccessToken::new("stale")));
        let err = rt.block_on(inventory.get_inventory()).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    }

    #[test]
    fn fetching_inventory_by_id_is_successful() {
        let (mut rt, inventory) = setup();
        inventory.set_access_token(Some(AccessToken::new(TEST_TOKEN)));
        let record = rt
            .block_on(inventory.get_inventory_by_id(InventoryId::new("2")))
            .unwrap();
        assert_eq!(record.servername(), "db01");
        assert_eq!(record.os(), "windows");
    }

    #[test]
    fn fetching_missing_inventory_by_id_is_not_found() {
        let (mut rt, inventory) = setup();
        inventory.set_access_token(Some(AccessToken::new(TEST_TOKEN)));
        let err = rt
            .block_on(inventory.get_inventory_by_id(InventoryId::new("999")))
            .unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn unparseable_payloads_are_errors() {
        let (mut rt, inventory) = setup();
        inventory.set_access_token(Some(AccessToken::new(TEST_TOKEN)));
        let result = rt.block_on(inventory.get_inventory_by_id(InventoryId::new("broken")));
        assert!(result.is_err());
    }

    #[test]
    fn fetching_backend_config_from_the_provider() {
        let mut rt = Runtime::new().unwrap();
        let addr = serve_fake_backend(&mut rt);
        let frontend: Url = format!("http://{}", addr).parse().unwrap();
        let backend = rt.block_on(fetch_backend_config(frontend)).unwrap();
        assert_eq!(backend, BackendConfig::new("https", "inventory", "8443"));
    }
}
