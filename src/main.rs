use std::{process, sync::Arc};

use canale::{
    application::{error::AppError, render::RenderService},
    config,
    infra::{
        http::{HttpState, build_router},
        telemetry,
    },
};
use tokio::net::TcpListener;
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (_cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    let state = HttpState {
        render: Arc::new(RenderService::new()),
    };
    let router = build_router(state);

    let listener = TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::unexpected(format!("failed to bind listener: {err}")))?;

    info!(addr = %settings.server.addr, "canale listening");

    axum::serve(listener, router)
        .await
        .map_err(|err| AppError::unexpected(format!("server terminated: {err}")))?;

    Ok(())
}
