use std::env;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::Arc;

use actix_cors::Cors;
use actix_web::http::header;
use actix_web::{middleware, web, App, HttpServer};
use log::{info, warn};
use rustls::ServerConfig;
use rustls_pemfile::{certs, pkcs8_private_keys};

use repo_explorer::auth::SessionCredentials;
use repo_explorer::config::AppConfig;
use repo_explorer::github::GithubClient;
use repo_explorer::handlers::{self, AppState};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Override the log level with the RUST_LOG environment variable,
    // e.g. `RUST_LOG=debug cargo run` for per-directory fetch logging.
    env::set_var("RUST_LOG", env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()));
    env_logger::init();

    let config = AppConfig::from_env()
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?;
    let addr = config.bind_addr();

    let github = GithubClient::new(&config.github_api_base)
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let credentials = Arc::new(SessionCredentials {
        fallback: config.github_token.clone(),
    });
    let state = web::Data::new(AppState {
        github,
        credentials,
    });

    info!("Exploring repositories via {}", config.github_api_base);

    let mut http_server = HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET"])
            .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(handlers::register)
    });

    if let (Some(cert_path), Some(key_path)) = (&config.cert_path, &config.key_path) {
        if !Path::new(cert_path).exists() || !Path::new(key_path).exists() {
            warn!("CERT_PATH or KEY_PATH points to a non-existent file. Starting without HTTPS.");
            info!("Server running at http://{}", addr);
            http_server = http_server.bind(addr)?;
        } else {
            info!("Attempting to start HTTPS server...");
            let cert_file = &mut BufReader::new(File::open(cert_path)?);
            let key_file = &mut BufReader::new(File::open(key_path)?);
            let cert_chain = certs(cert_file).collect::<Result<Vec<_>, _>>()?;
            let mut keys = pkcs8_private_keys(key_file).collect::<Result<Vec<_>, _>>()?;

            if keys.is_empty() {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    "No private keys found in key file",
                ));
            }

            let tls_config = ServerConfig::builder()
                .with_no_client_auth()
                .with_single_cert(cert_chain, keys.remove(0).into())
                .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

            info!("Successfully configured TLS. Binding to https://{}", addr);
            http_server = http_server.bind_rustls_0_23(addr, tls_config)?;
        }
    } else {
        info!("No CERT_PATH or KEY_PATH found in env. Starting plain HTTP server at http://{}", addr);
        http_server = http_server.bind(addr)?;
    }

    http_server.run().await
}
