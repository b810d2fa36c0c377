use std::net::SocketAddr;

use driver::database::{MemoryDatabase, PostgresDatabase};
use error_stack::ResultExt;
use kernel::interface::query::DependOnBookQuery;
use kernel::interface::update::DependOnBookModifier;
use kernel::KernelError;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::Layer;

use crate::error::StackTrace;
use crate::handler::AppModule;
use crate::route::BookRouter;

mod controller;
mod error;
mod handler;
mod request;
mod response;
mod route;

const DEFAULT_FILTER: &str =
    "driver=debug,application=debug,server=debug,tower_http=debug,sqlx=info";

#[tokio::main]
async fn main() -> Result<(), StackTrace> {
    dotenvy::dotenv().ok();

    let appender = tracing_appender::rolling::daily(std::path::Path::new("./logs/"), "debug.log");
    let (non_blocking_appender, _guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_filter(tracing_subscriber::EnvFilter::new(
                    std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_FILTER.into()),
                ))
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .with(
            tracing_subscriber::fmt::Layer::default()
                .with_writer(non_blocking_appender)
                .with_ansi(false)
                .with_filter(tracing_subscriber::filter::LevelFilter::DEBUG),
        )
        .init();

    if dotenvy::var("POSTGRES_URL").is_ok() {
        serve(PostgresDatabase::new().await?).await?;
    } else {
        tracing::warn!("POSTGRES_URL not set, books are kept in memory");
        serve(MemoryDatabase::new()).await?;
    }

    Ok(())
}

async fn serve<D>(database: D) -> error_stack::Result<(), KernelError>
where
    D: DependOnBookQuery + DependOnBookModifier,
{
    let router = axum::Router::<AppModule<D>>::new()
        .route_book()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(AppModule::new(database));

    let bind = SocketAddr::from(([0, 0, 0, 0], 8080));
    let tcp = TcpListener::bind(bind)
        .await
        .change_context_lazy(|| KernelError::Internal)
        .attach_printable_lazy(|| "Failed to listen tcp")?;
    tracing::info!(%bind, "bookstore listening");

    axum::serve(tcp, router.into_make_service())
        .await
        .change_context_lazy(|| KernelError::Internal)?;

    Ok(())
}
