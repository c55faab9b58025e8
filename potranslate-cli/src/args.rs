use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use potranslate::{ClientConfig, Credentials, Error, SubmitOptions, Tier, WordBounds};

use crate::validation::parse_language_code;

const LONG_ABOUT: &str = "\
Sends the untranslated entries of a gettext catalog to Gengo as one order.

Running the command again on the same catalog checks that order: finished
jobs are shown for review, and once every job is approved the translations
are written into the catalog.";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = LONG_ABOUT)]
pub struct Args {
    /// The .po catalog to translate
    pub catalog: PathBuf,

    /// Language code of the source texts (e.g. en)
    #[arg(value_parser = parse_language_code)]
    pub source: String,

    /// Language code to translate into (e.g. de)
    #[arg(value_parser = parse_language_code)]
    pub target: String,

    /// Gengo service tier
    #[arg(long, value_enum, default_value_t = TierArg::Standard)]
    pub tier: TierArg,

    /// Gengo API public key
    #[arg(long, env = "GENGO_PUBLIC_KEY", hide_env_values = true)]
    pub public_key: Option<String>,

    /// Gengo API private key
    #[arg(long, env = "GENGO_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Use the Gengo sandbox instead of production
    #[arg(long)]
    pub sandbox: bool,

    /// Log every API request to stderr
    #[arg(long)]
    pub debug: bool,

    /// Submit at most this many entries
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub limit: Option<u64>,

    /// Comment attached to every job
    #[arg(long)]
    pub comment: Option<String>,

    /// Tone the translators should use (e.g. friendly)
    #[arg(long)]
    pub tone: Option<String>,

    /// Skip entries with fewer words than this
    #[arg(long)]
    pub min_words: Option<usize>,

    /// Skip entries with more words than this
    #[arg(long)]
    pub max_words: Option<usize>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TierArg {
    Standard,
    Pro,
}

impl From<TierArg> for Tier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Standard => Tier::Standard,
            TierArg::Pro => Tier::Pro,
        }
    }
}

impl Args {
    /// Fails when either API key is missing or blank.
    pub fn client_config(&self) -> Result<ClientConfig, Error> {
        let credentials = Credentials::resolve(self.public_key.clone(), self.private_key.clone())?;
        Ok(ClientConfig::new(credentials).with_sandbox(self.sandbox))
    }

    pub fn submit_options(&self) -> SubmitOptions {
        SubmitOptions::new(&self.source, &self.target)
            .with_tier(self.tier.into())
            .with_comment(self.comment.clone())
            .with_tone(self.tone.clone())
            .with_bounds(WordBounds::new(self.min_words, self.max_words))
            .with_limit(self.limit.map(|limit| usize::try_from(limit).unwrap_or(usize::MAX)))
    }
}
