//! Test server wrapper that starts faultline on a random port

use std::net::SocketAddr;
use std::sync::Arc;

use faultline_booking::BookingManagement;
use faultline_config::Config;
use faultline_server::Server;
use serde_json::Value;
use tokio_util::sync::CancellationToken;

/// A running test server instance
pub struct TestServer {
    addr: SocketAddr,
    shutdown: CancellationToken,
    client: reqwest::Client,
}

impl TestServer {
    /// Start a test server with the given configuration
    ///
    /// Binds to port 0 for automatic port assignment
    pub async fn start(config: Config) -> anyhow::Result<Self> {
        Self::serve(Server::new(config)?).await
    }

    /// Start a test server backed by a custom booking store
    pub async fn with_bookings(config: Config, bookings: Arc<dyn BookingManagement>) -> anyhow::Result<Self> {
        Self::serve(Server::with_bookings(config, bookings)?).await
    }

    async fn serve(server: Server) -> anyhow::Result<Self> {
        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        // Bind the listener here so we know the actual port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        tokio::spawn(async move {
            axum::serve(listener, server.into_router())
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        let client = reqwest::Client::new();

        Ok(Self { addr, shutdown, client })
    }

    /// Base URL of the running test server
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    /// Get a reference to the HTTP client
    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    /// Server address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// POST a JSON booking and return status plus body
    pub async fn create_booking(&self, booking: &Value) -> (u16, Value) {
        let resp = self
            .client
            .post(self.url("/booking"))
            .json(booking)
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        (status, resp.json().await.unwrap())
    }

    /// GET a booking by its raw path segment
    pub async fn get_booking(&self, id: &str) -> (u16, Option<String>, Value) {
        let resp = self
            .client
            .get(self.url(&format!("/booking/{id}")))
            .send()
            .await
            .unwrap();
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .map(|v| v.to_str().unwrap().to_owned());
        (status, content_type, resp.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Assert a problem body against expected fields, ignoring `instance`
///
/// `instance` must still be a `urn:uuid:` URN.
pub fn assert_problem(body: &Value, expected: &Value) {
    let mut actual = body.clone();
    let instance = actual
        .as_object_mut()
        .and_then(|o| o.remove("instance"))
        .expect("problem has an instance");

    let uuid = instance
        .as_str()
        .and_then(|s| s.strip_prefix("urn:uuid:"))
        .expect("instance is a urn:uuid URN");
    assert!(uuid::Uuid::parse_str(uuid).is_ok(), "instance is not a UUID: {uuid}");

    assert_eq!(&actual, expected);
}
