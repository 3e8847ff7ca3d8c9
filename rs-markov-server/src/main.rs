use std::sync::atomic::{AtomicU64, Ordering};

use actix_cors::Cors;
use actix_web::{get, web, App, HttpResponse, HttpServer, Responder};
use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Deserialize;
use tracing::{info, warn};

use rs_markov_core::corpus::{load_corpus, CorpusSource};
use rs_markov_core::{MarkovError, MarkovText, StartSeed, TermCountRange};

/// Command-line configuration of the server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
	/// Text file the model is built from.
	#[arg(short, long, default_value = "data/inspiration_quotes.txt")]
	corpus: String,

	/// Use the whole file instead of the text between typographic quotes.
	#[arg(long, default_value_t = false)]
	raw: bool,

	#[arg(long, default_value = "127.0.0.1")]
	host: String,

	#[arg(short, long, default_value_t = 5000)]
	port: u16,

	#[arg(long, default_value_t = 10)]
	min_terms: usize,

	#[arg(long, default_value_t = 50)]
	max_terms: usize,

	#[arg(long, default_value_t = 5)]
	step_terms: usize,

	#[arg(long, default_value_t = 15)]
	default_terms: usize,

	/// Makes generation reproducible across server runs.
	#[arg(long)]
	rng_seed: Option<u64>,
}

/// Query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	seed: Option<String>, // blank or missing -> random start
	term_count: Option<usize>,
}

#[derive(Deserialize)]
struct TableQuery {
	keys: Option<usize>,
	followers: Option<usize>,
}

/// Read-only state shared by every worker.
///
/// The model is never mutated after start-up, so no lock is needed.
struct SharedData {
	model: MarkovText,
	range: TermCountRange,
	rng_seed: Option<u64>,
	requests: AtomicU64,
}

impl SharedData {
	/// Randomness source for one request.
	///
	/// With a configured seed, the n-th request always gets the same stream.
	fn request_rng(&self) -> StdRng {
		match self.rng_seed {
			Some(seed) => {
				let request = self.requests.fetch_add(1, Ordering::Relaxed);
				StdRng::seed_from_u64(seed.wrapping_add(request))
			}
			None => StdRng::from_rng(&mut rand::rng()),
		}
	}
}

impl GenerateParams {
	fn start_seed(&self) -> StartSeed {
		self.seed.as_deref().map(StartSeed::from_user_input).unwrap_or_default()
	}
}

/// Maps a model condition to a user-facing response.
fn error_response(error: &MarkovError) -> HttpResponse {
	let body = error.to_string();
	match error {
		MarkovError::SeedNotFound(_) => HttpResponse::NotFound().body(body),
		MarkovError::InvalidTermCount { .. } => HttpResponse::BadRequest().body(body),
		MarkovError::EmptyModel | MarkovError::UninitializedModel => HttpResponse::Conflict().body(body),
		MarkovError::Io(_) => HttpResponse::InternalServerError().body(body),
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates a sequence from the shared model and returns it as the body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let term_count = match query.term_count {
		Some(count) => match data.range.validate(count) {
			Ok(count) => count,
			Err(e) => return error_response(&e),
		},
		None => data.range.default_count(),
	};
	let start_seed = query.start_seed();

	let mut rng = data.request_rng();
	match data.model.generate(&mut rng, start_seed.as_term(), term_count) {
		Ok(text) => HttpResponse::Ok().body(text),
		Err(e) => {
			warn!(error = %e, "generation refused");
			error_response(&e)
		}
	}
}

/// HTTP GET endpoint `/v1/table`
///
/// Returns the table size and a sample of its first entries as JSON.
#[get("/v1/table")]
async fn get_table(data: web::Data<SharedData>, query: web::Query<TableQuery>) -> impl Responder {
	match data.model.term_table() {
		Ok(table) => HttpResponse::Ok().json(table.summary(query.keys.unwrap_or(5), query.followers.unwrap_or(5))),
		Err(e) => error_response(&e),
	}
}

#[get("/v1/term_range")]
async fn get_term_range(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().json(data.range)
}

fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated).service(get_table).service(get_term_range);
}

/// Main entry point for the server.
///
/// Loads and cleans the corpus, builds the model once, and starts an
/// Actix-web HTTP server sharing it read-only between workers.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	tracing_subscriber::fmt::init();
	let cli = Cli::parse();

	let range = TermCountRange::new(cli.min_terms, cli.max_terms, cli.step_terms, cli.default_terms)
		.map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;

	let source = if cli.raw { CorpusSource::Raw } else { CorpusSource::Quotes };
	let corpus = load_corpus(&cli.corpus, source).map_err(|e| match e {
		MarkovError::Io(io) => io,
		other => std::io::Error::other(other.to_string()),
	})?;

	let model = MarkovText::from_corpus(corpus);
	let states = model.term_table().map(|t| t.len()).unwrap_or(0);
	if states == 0 {
		warn!("corpus '{}' produced an empty table, only errors will be served", cli.corpus);
	}
	info!("Model ready: {} tokens, {} states", model.tokens().len(), states);

	let shared_data = web::Data::new(SharedData {
		model,
		range,
		rng_seed: cli.rng_seed,
		requests: AtomicU64::new(0),
	});

	info!("Listening on {}:{}", cli.host, cli.port);
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::default().allow_any_origin().allowed_methods(vec!["GET"]))
			.app_data(shared_data.clone())
			.configure(routes)
	})
		.bind((cli.host.as_str(), cli.port))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;

	const CORPUS: &str = "Life is short Life is long Life short";

	fn shared(model: MarkovText) -> web::Data<SharedData> {
		web::Data::new(SharedData {
			model,
			range: TermCountRange::default(),
			rng_seed: Some(42),
			requests: AtomicU64::new(0),
		})
	}

	async fn call(data: web::Data<SharedData>, uri: &str) -> (StatusCode, String) {
		let app = test::init_service(App::new().app_data(data).configure(routes)).await;
		let response = test::call_service(&app, test::TestRequest::get().uri(uri).to_request()).await;
		let status = response.status();
		let body = test::read_body(response).await;
		(status, String::from_utf8_lossy(&body).into_owned())
	}

	#[actix_web::test]
	async fn generate_with_seed() {
		let (status, body) = call(shared(MarkovText::from_corpus(CORPUS)), "/v1/generate?seed=Life&term_count=10").await;
		assert_eq!(status, StatusCode::OK);
		assert!(body.starts_with("Life "));
		assert!(body.split(' ').count() <= 10);
	}

	#[actix_web::test]
	async fn blank_seed_means_random() {
		let (status, body) = call(shared(MarkovText::from_corpus(CORPUS)), "/v1/generate?seed=%20%20").await;
		assert_eq!(status, StatusCode::OK);
		assert!(!body.is_empty());
	}

	#[actix_web::test]
	async fn unknown_seed_is_not_found() {
		let (status, body) = call(shared(MarkovText::from_corpus(CORPUS)), "/v1/generate?seed=zzz").await;
		assert_eq!(status, StatusCode::NOT_FOUND);
		assert!(body.contains("zzz"));
	}

	#[actix_web::test]
	async fn out_of_range_term_count_is_bad_request() {
		let (status, _) = call(shared(MarkovText::from_corpus(CORPUS)), "/v1/generate?term_count=12").await;
		assert_eq!(status, StatusCode::BAD_REQUEST);
	}

	#[actix_web::test]
	async fn unbuilt_model_is_conflict() {
		let (status, _) = call(shared(MarkovText::new(CORPUS)), "/v1/generate").await;
		assert_eq!(status, StatusCode::CONFLICT);
	}

	#[actix_web::test]
	async fn table_summary_as_json() {
		let (status, body) = call(shared(MarkovText::from_corpus(CORPUS)), "/v1/table?keys=1&followers=2").await;
		assert_eq!(status, StatusCode::OK);

		let json: serde_json::Value = serde_json::from_str(&body).unwrap();
		assert_eq!(json["states"], 4);
		assert_eq!(json["sample"][0]["term"], "Life");
		assert_eq!(json["sample"][0]["followers"], serde_json::json!(["is", "is", "..."]));
	}

	#[actix_web::test]
	async fn term_range_as_json() {
		let (status, body) = call(shared(MarkovText::from_corpus(CORPUS)), "/v1/term_range").await;
		assert_eq!(status, StatusCode::OK);

		let json: serde_json::Value = serde_json::from_str(&body).unwrap();
		assert_eq!(json, serde_json::json!({ "min": 10, "max": 50, "step": 5, "default": 15 }));
	}

	#[actix_web::test]
	async fn seeded_requests_are_reproducible() {
		let corpus = "the cat sat on the mat and the cat ran to the mat and the dog sat";
		let uri = "/v1/generate?term_count=30";

		let (status_a, first_a) = call(shared(MarkovText::from_corpus(corpus)), uri).await;
		let (status_b, first_b) = call(shared(MarkovText::from_corpus(corpus)), uri).await;
		assert_eq!(status_a, StatusCode::OK);
		assert_eq!(status_b, StatusCode::OK);
		assert_eq!(first_a, first_b);
	}

	#[actix_web::test]
	async fn seeded_request_stream_is_reproducible() {
		let corpus = "the cat sat on the mat and the cat ran to the mat and the dog sat";
		let run = |data: web::Data<SharedData>| async move {
			let app = test::init_service(App::new().app_data(data).configure(routes)).await;
			let mut bodies = Vec::new();
			for _ in 0..3 {
				let request = test::TestRequest::get().uri("/v1/generate?seed=the&term_count=20").to_request();
				bodies.push(test::call_and_read_body(&app, request).await);
			}
			bodies
		};

		let a = run(shared(MarkovText::from_corpus(corpus))).await;
		let b = run(shared(MarkovText::from_corpus(corpus))).await;
		assert_eq!(a, b);
	}
}
