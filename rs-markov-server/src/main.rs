use std::fs;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{App, HttpResponse, HttpServer, Responder, delete, get, post, web};
use log::{error, info};
use serde::Deserialize;

use rs_markov_core::{ChainConfig, MarkovChain, SharedChain, Tokenizer};

/// Server configuration, read from the JSON file given as first argument.
///
/// Missing fields fall back to `127.0.0.1:5000` and the default chain.
/// `chain` names a separate `ChainConfig` JSON file.
#[derive(Deserialize)]
#[serde(default)]
struct ServerConfig {
	host: String,
	port: u16,
	chain: Option<PathBuf>,
}

impl Default for ServerConfig {
	fn default() -> Self {
		Self { host: "127.0.0.1".to_owned(), port: 5000, chain: None }
	}
}

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	max_length: Option<usize>,
}

/// State shared by every worker: one chain, one tokenizer.
struct SharedData {
	chain: SharedChain<String>,
	tokenizer: Tokenizer,
}

/// HTTP POST endpoint `/v1/learn`
///
/// Tokenizes the request body and learns every phrase found in it.
/// Returns the number of phrases learned.
#[post("/v1/learn")]
async fn post_learn(data: web::Data<SharedData>, body: String) -> impl Responder {
	let phrases = data.tokenizer.phrases(&body);
	for phrase in &phrases {
		if let Err(e) = data.chain.add_phrase(phrase) {
			error!("Learning failed: {e}");
			return HttpResponse::InternalServerError().body(e.to_string());
		}
	}
	HttpResponse::Ok().body(phrases.len().to_string())
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates one sentence. With `max_length > 0` the walk heads for the end
/// of the phrase once that many words were produced.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let max_length = query.max_length.unwrap_or(0);
	let result = data.chain.with(|chain| {
		if max_length > 0 { chain.make_bounded_sentence(max_length) } else { chain.make_sentence() }
	});

	match result.and_then(|sentence| sentence) {
		Ok(sentence) => HttpResponse::Ok().body(sentence),
		Err(e) => {
			error!("Generation failed: {e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

#[get("/v1/stats")]
async fn get_stats(data: web::Data<SharedData>) -> impl Responder {
	match data.chain.stats() {
		Ok(stats) => HttpResponse::Ok().json(stats),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

#[get("/v1/export")]
async fn get_export(data: web::Data<SharedData>) -> impl Responder {
	let mut buffer = Vec::new();
	match data.chain.export_xml(&mut buffer) {
		Ok(()) => HttpResponse::Ok().content_type("application/xml").body(buffer),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

#[delete("/v1/chain")]
async fn delete_chain(data: web::Data<SharedData>) -> impl Responder {
	match data.chain.clear() {
		Ok(()) => HttpResponse::Ok().body("Chain cleared"),
		Err(e) => HttpResponse::InternalServerError().body(e.to_string()),
	}
}

fn load_config() -> Result<(ServerConfig, ChainConfig), Box<dyn std::error::Error>> {
	let Some(path) = std::env::args().nth(1) else {
		return Ok((ServerConfig::default(), ChainConfig::default()));
	};
	let config: ServerConfig = serde_json::from_str(&fs::read_to_string(&path)?)?;
	info!("Configuration loaded from {path}");

	let chain = match &config.chain {
		Some(chain_path) => {
			let chain = ChainConfig::from_json_file(chain_path)?;
			info!("Chain configuration loaded from {}", chain_path.display());
			chain
		}
		None => ChainConfig::default(),
	};
	Ok((config, chain))
}

/// Main entry point for the server.
///
/// Builds the chain, wraps it in a `SharedChain` so learning and generation
/// requests can run concurrently, and starts an Actix-web HTTP server.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let (config, chain_config) = load_config().map_err(|e| std::io::Error::other(e.to_string()))?;
	let chain = MarkovChain::from_config(&chain_config).map_err(std::io::Error::other)?;
	let shared_data = web::Data::new(SharedData {
		chain: SharedChain::new(chain),
		tokenizer: chain_config.tokenizer(),
	});

	info!("Listening on {}:{} (order {})", config.host, config.port, chain_config.order);
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(post_learn)
			.service(get_generated)
			.service(get_stats)
			.service(get_export)
			.service(delete_chain)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
