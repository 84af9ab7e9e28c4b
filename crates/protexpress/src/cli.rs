use anyhow::Context;
use clap::Parser;
use protexpress::Predictor;
use protexpress_core::read_fasta_file;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the trained model artifacts
    #[arg(short, long, env = "PROTEXPRESS_ARTIFACTS", default_value = ".")]
    artifacts: PathBuf,

    /// Print the result on a single line
    #[arg(long)]
    compact: bool,

    /// Protein sequence, or the path of a FASTA file
    input: String,
}

impl Cli {
    pub fn execute(self) -> anyhow::Result<()> {
        let sequence = self.sequence()?;
        let predictor = Predictor::from_dir(&self.artifacts).with_context(|| {
            format!("failed to load artifacts from {}", self.artifacts.display())
        })?;
        let result = predictor.predict(&sequence)?;

        let json = if self.compact {
            serde_json::to_string(&result)?
        } else {
            serde_json::to_string_pretty(&result)?
        };
        println!("{json}");
        Ok(())
    }

    fn sequence(&self) -> anyhow::Result<String> {
        let path = Path::new(&self.input);
        if path.exists() {
            read_fasta_file(path).with_context(|| format!("failed to read {}", path.display()))
        } else {
            Ok(self.input.clone())
        }
    }
}
