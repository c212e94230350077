mod fallback;
mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use faultline_booking::{BookingManagement, BookingState};
use faultline_config::Config;
use faultline_problem::{Dispatcher, KindCatalog, Registry, defaults};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

pub use fallback::{METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED_TYPE, MethodNotAllowed, UNKNOWN_ROUTE, UnknownRoute};

/// Assembled server with all routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
    dispatcher: Arc<Dispatcher>,
}

impl Server {
    /// Build the server from configuration with the in-memory booking store
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation or the problem
    /// mapping configuration is invalid
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let bookings = BookingState::from_config(&config.booking);
        Self::build(config, bookings)
    }

    /// Build the server around a caller-provided booking store
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation or the problem
    /// mapping configuration is invalid
    pub fn with_bookings(config: Config, bookings: Arc<dyn BookingManagement>) -> anyhow::Result<Self> {
        let state = BookingState::new(bookings, config.booking.max_seats);
        Self::build(config, state)
    }

    fn build(config: Config, bookings: BookingState) -> anyhow::Result<Self> {
        // Configs built in code skip the checks `Config::load` runs
        config.validate()?;

        let listen_address = config
            .server
            .listen_address
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let dispatcher = Arc::new(build_dispatcher(&config)?);

        let mut app = Router::new();

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Booking routes
        app = app.merge(faultline_booking::booking_router(bookings));

        // Only reaches routes registered above
        app = app.method_not_allowed_fallback(fallback::method_not_allowed);
        app = app.fallback(fallback::unknown_route);

        // Apply middleware layers (innermost first)

        // Problem rendering for handler errors
        app = app.layer(axum::middleware::from_fn_with_state(
            Arc::clone(&dispatcher),
            faultline_problem::problem_middleware,
        ));

        // Panics become internal-error problems
        app = app.layer(CatchPanicLayer::custom(faultline_problem::panic_responder(Arc::clone(
            &dispatcher,
        ))));

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address,
            dispatcher,
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Dispatcher shared by all routes
    #[must_use]
    pub fn dispatcher(&self) -> Arc<Dispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

/// Register every kind the server can raise and build the rule set
fn build_dispatcher(config: &Config) -> anyhow::Result<Dispatcher> {
    let mut catalog = KindCatalog::builtin();
    catalog.register_all(faultline_booking::KINDS)?;
    catalog.register_all(fallback::KINDS)?;

    let mut specs = defaults::specs();
    specs.push(fallback::method_not_allowed_rule());

    let registry = Registry::from_specs(specs, &config.problems, &catalog)?;
    tracing::debug!(kinds = catalog.len(), rules = registry.len(), "problem mapping ready");

    Ok(Dispatcher::new(registry))
}
