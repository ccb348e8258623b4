use anyhow::Result;
use clap::{Parser, Subcommand};
use mft_dataset::analysis::{SignalExtractor, TagExtractor};
use mft_dataset::pipeline::config::{
    DEFAULT_ANNOTATIONS_FILE, DEFAULT_DATASET_FILE, DEFAULT_OUTPUT_FILE,
};
use mft_dataset::{ConstructConfig, DatasetConstructor, DatasetMerger, MergeConfig};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "mft-dataset")]
#[command(about = "Build audio feature datasets and merge MFT annotation scores", long_about = None)]
struct Args {
    /// Log at debug level
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Extract features from a folder of audio files and preview the dataset
    Construct(ConstructArgs),

    /// Join MFT annotation scores onto a feature dataset
    Merge {
        /// Annotation CSV with `id` and the ten MFT score columns
        #[arg(short = 'a', long, default_value = DEFAULT_ANNOTATIONS_FILE)]
        annotations: String,

        /// Feature dataset CSV with `file_id`
        #[arg(short = 'd', long, default_value = DEFAULT_DATASET_FILE)]
        dataset: String,

        /// Merged output CSV
        #[arg(short = 'o', long, default_value = DEFAULT_OUTPUT_FILE)]
        output: String,

        /// Don't re-read the output to check it
        #[arg(long)]
        no_validate: bool,
    },
}

#[derive(clap::Args, Debug)]
struct ConstructArgs {
    /// Folder containing the audio files
    audio_dir: String,

    /// Also write the dataset to this CSV file
    #[arg(short = 'o', long)]
    output: Option<String>,

    /// Only scan the top-level folder
    #[arg(long)]
    no_recursive: bool,

    /// Audio file extensions to include, comma-separated
    /// (default: mp3,wav,flac,ogg,m4a,aac)
    #[arg(long, value_delimiter = ',')]
    extensions: Vec<String>,

    /// Read tags and stream properties only (no decoding)
    #[arg(long)]
    fast: bool,

    /// Skip tempo and key detection
    #[arg(long)]
    no_tempo: bool,

    /// Lowest tempo reported; slower detections are doubled
    #[arg(long, default_value = "70")]
    min_bpm: f32,

    /// Highest tempo reported; faster detections are halved
    #[arg(long, default_value = "170")]
    max_bpm: f32,

    /// Seconds of audio to decode per file (0 = whole file)
    #[arg(long, default_value = "120")]
    max_seconds: f32,

    /// Number of rows to print
    #[arg(long, default_value = "5")]
    preview: usize,

    /// Log and skip files that fail extraction instead of aborting
    #[arg(long)]
    skip_unreadable: bool,
}

impl ConstructArgs {
    fn config(&self) -> ConstructConfig {
        let mut config = ConstructConfig::new(expand(&self.audio_dir))
            .with_recursive(!self.no_recursive)
            .with_skip_unreadable(self.skip_unreadable)
            .with_preview_rows(self.preview);
        if !self.extensions.is_empty() {
            config = config.with_extensions(&self.extensions);
        }
        if let Some(output) = &self.output {
            config = config.with_output(expand(output));
        }
        config
    }
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    match args.command {
        Command::Construct(construct) => {
            let config = construct.config();

            if construct.fast {
                log::info!("Tag-only extraction (no decoding)");
                DatasetConstructor::new(config, TagExtractor::new()).run()?;
            } else {
                let max_seconds = (construct.max_seconds > 0.0).then_some(construct.max_seconds);
                let extractor = SignalExtractor::new()
                    .with_bpm_range(construct.min_bpm, construct.max_bpm)
                    .with_tempo(!construct.no_tempo)
                    .with_max_seconds(max_seconds);

                if !construct.no_tempo {
                    log::info!(
                        "BPM detection range: {}-{} BPM",
                        construct.min_bpm,
                        construct.max_bpm
                    );
                }
                DatasetConstructor::new(config, extractor).run()?;
            }
        }

        Command::Merge {
            annotations,
            dataset,
            output,
            no_validate,
        } => {
            let config = MergeConfig::default()
                .with_annotations(expand(&annotations))
                .with_dataset(expand(&dataset))
                .with_output(expand(&output))
                .with_validation(!no_validate);

            let summary = DatasetMerger::new(config).run()?;
            log::info!(
                "Merge complete: {} of {} rows annotated, written to {:?}",
                summary.merged_rows,
                summary.input_rows,
                summary.output_path
            );
        }
    }

    Ok(())
}
