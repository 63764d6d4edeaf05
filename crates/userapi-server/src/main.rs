// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! UserApi HTTP server binary.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use userapi_cache::{CacheStore, NoopStore, RedisStore};
use userapi_graph::{DirectoryClient, GraphAuthConfig, GraphClient, GraphClientConfig};
use userapi_provisioning::config::{GroupMap, GroupRole, ProvisioningConfig};
use userapi_provisioning::service::UserProvisioningService;
use userapi_server::{create_router, AppState};
use userapi_server_config::ServerConfig;

/// UserApi server - REST proxy for directory user and group management.
#[derive(Parser, Debug)]
#[command(name = "userapi-server", about = "UserApi HTTP server", version)]
struct Args {
	/// Subcommands for userapi-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,

	/// Path to a TOML config file (defaults to /etc/userapi/server.toml)
	#[arg(long)]
	config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("userapi-server {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match &args.config {
		Some(path) => userapi_server_config::load_config_with_file(path)?,
		None => userapi_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		email_domain = %config.users.email_domain,
		is_live = config.users.is_live,
		"starting userapi-server"
	);

	let provisioning = build_provisioning_service(&config).await;

	let app = create_router(AppState { provisioning })
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("received shutdown signal");
		}
	}

	tracing::info!("server shutdown complete");
	Ok(())
}

async fn build_provisioning_service(config: &ServerConfig) -> Arc<UserProvisioningService> {
	let auth = GraphAuthConfig::new(
		&config.graph.tenant_id,
		&config.graph.client_id,
		config.graph.client_secret.clone(),
	);
	let graph_config = GraphClientConfig {
		timeout: Duration::from_secs(config.graph.timeout_secs),
		..Default::default()
	};
	let directory: Arc<dyn DirectoryClient> = Arc::new(GraphClient::new(auth, graph_config));

	// The cache is best-effort: an unreachable redis downgrades to the
	// no-op store instead of failing startup.
	let cache: Arc<dyn CacheStore> = match &config.cache.redis_url {
		Some(url) => match RedisStore::connect(url).await {
			Ok(store) => Arc::new(store),
			Err(e) => {
				tracing::warn!(error = %e, "redis unavailable, continuing without cache");
				Arc::new(NoopStore)
			}
		},
		None => Arc::new(NoopStore),
	};

	let mut groups = GroupMap::new();
	if let Some(id) = &config.groups.judges_group_id {
		groups = groups.with_group(GroupRole::Judges, id);
	}
	if let Some(id) = &config.groups.test_accounts_group_id {
		groups = groups.with_group(GroupRole::TestAccounts, id);
	}

	let provisioning_config = ProvisioningConfig {
		email_domain: config.users.email_domain.clone(),
		groups,
		is_live: config.users.is_live,
		test_user_password: config.users.test_user_password.clone(),
		admin_role_name: config.users.admin_role_name.clone(),
		perf_test_prefix: config.users.perf_test_prefix.clone(),
	};

	Arc::new(UserProvisioningService::new(directory, provisioning_config).with_cache(cache))
}
