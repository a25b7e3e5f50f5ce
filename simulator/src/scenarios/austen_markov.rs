use std::path::PathBuf;
use toymc::corpus::{load_corpus, TextModel};
use toymc::utils::logging;

use super::utils::{run_trials, setup_logging};
use crate::config::AustenMarkovConfig;
use crate::error::SimulatorError;
use crate::simulation_results::SimulationResults;

/// Sentences generated by a word-to-word Markov chain learned from a corpus
pub async fn run_austen_markov() -> Result<PathBuf, SimulatorError> {
    let scenario = AustenMarkovConfig::SCENARIO;
    setup_logging(scenario);
    let config = AustenMarkovConfig::load()?;
    let experiment = config.experiment.to_experiment();
    let seed = experiment.resolved_seed();
    let mut results = SimulationResults::new(scenario, &experiment, seed, &config.corpus)?;

    let tokens = load_corpus(&config.corpus.path)?;
    let model = TextModel::from_tokens(&tokens)?;
    logging::log(
        "SIMULATOR",
        &format!("Corpus has {} tokens and {} distinct words", tokens.len(), model.vocabulary().len()),
    );

    let chain = model.chain(&config.corpus.start_word, config.corpus.words)?;
    let sentences: Vec<String> = run_trials(&experiment, seed, chain)
        .await?
        .iter()
        .map(|sequence| model.vocabulary().render(sequence).trim_start().to_string())
        .collect();
    for sentence in &sentences {
        println!("{}\n", sentence);
    }

    results.insert_derived("tokens", tokens.len())?;
    results.insert_derived("vocabulary", model.vocabulary().len())?;
    results.insert_derived("sentences", sentences)?;
    results.save()
}
