use std::io;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};

use quiz_host::{
    app_state::AppState, config::Config, db::Database, handlers, middleware::RequestIdMiddleware,
};

fn build_cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default()
            .allowed_origin(origin)
            .allow_any_method()
            .allow_any_header()
            .max_age(3600),
        None => Cors::permissive(),
    }
}

#[actix_web::main]
async fn main() -> io::Result<()> {
    Config::load_dotenv();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();
    if config.is_production() {
        config
            .validate_for_production()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    }

    let db = Database::connect(&config).await.map_err(|e| {
        log::error!("MongoDB connection failed: {}", e);
        io::Error::other(e.to_string())
    })?;

    let bind_addr = (config.web_server_host.clone(), config.web_server_port);
    let cors_origin = config.cors_allowed_origin.clone();
    let state = AppState::new(config, &db)
        .await
        .map_err(|e| io::Error::other(e.to_string()))?;

    log::info!(
        "Starting HTTP server on http://{}:{}",
        bind_addr.0,
        bind_addr.1
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(handlers::json_config())
            .wrap(build_cors(cors_origin.as_deref()))
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run();

    let result = server.await;

    db.shutdown().await;
    log::info!("Server stopped");

    result
}
