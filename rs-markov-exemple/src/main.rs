use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;

use rs_markov_core::corpus::{load_corpus, CorpusSource};
use rs_markov_core::{GenerationInput, MarkovText, StartSeed};

#[derive(Parser, Debug)]
#[command(author, version, about = "Markov text generator walk-through", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "data/inspiration_quotes.txt")]
    corpus: String,

    /// Optional starting word, blank means random
    #[arg(short, long, default_value = "")]
    seed: String,

    #[arg(short, long, default_value_t = 15)]
    term_count: usize,

    #[arg(long)]
    rng_seed: Option<u64>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    // The corpus file holds numbered quotes with their authors,
    // only the quoted text is kept
    let corpus = load_corpus(&cli.corpus, CorpusSource::Quotes)?;

    // Tokenizes the corpus; the table is not built yet
    let mut model = MarkovText::new(corpus);

    // Generating now fails: the table does not exist
    let mut rng = match cli.rng_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    if let Err(e) = model.generate(&mut rng, None, cli.term_count) {
        println!("Before build: {e}");
    }

    // Build the transition table once, it is read-only from now on
    let states = model.build_term_table().len();
    info!("Table built from {} tokens, {} states", model.tokens().len(), states);

    // Diagnostics: number of states and the first few entries
    let summary = model.term_table()?.summary(5, 5);
    println!("Total unique words (states): {}", summary.states);
    println!("Recorded transitions: {}", summary.transitions);
    for entry in &summary.sample {
        println!("  {:?} -> {:?}", entry.term, entry.followers);
    }

    // Seed and term count, validated against the 10..=50 step 5 range
    let mut input = GenerationInput::default();
    input.start_seed = StartSeed::from_user_input(&cli.seed);
    if let Err(e) = input.set_term_count(cli.term_count) {
        println!("{e}, keeping {} terms", input.term_count());
    }

    // A seed that is not in the corpus is reported, not fatal
    match model.generate(&mut rng, Some("zzz"), input.term_count()) {
        Ok(_) => println!("Should not happen"),
        Err(e) => println!("{e}"),
    }

    // Generate 5 sequences with the same model
    for i in 0..5 {
        match model.generate_with(&mut rng, &input) {
            Ok(text) => println!("Generated quote {}: {}", i + 1, text),
            Err(e) => println!("Generation {} failed: {}", i + 1, e),
        }
    }

    Ok(())
}
