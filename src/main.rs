use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use naive_bayes::{
    evaluate, loader, FitOptions, LikelihoodTable, LoadOptions, Mode, NaiveBayesClassifier,
    Schema, SigmaPolicy,
};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Categorical,
    Gaussian,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Categorical => Mode::Categorical,
            ModeArg::Gaussian => Mode::Gaussian,
        }
    }
}

/// Fits a naive Bayes classifier on a CSV file and reports its accuracy.
#[derive(Debug, Parser)]
#[command(name = "naive-bayes", version)]
struct Cli {
    /// Training data, one instance per row.
    train: PathBuf,

    /// Data to classify. Defaults to the training data.
    #[arg(long)]
    test: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ModeArg::Categorical)]
    mode: ModeArg,

    /// Zero-based class column. Defaults to the last column.
    #[arg(long)]
    class_column: Option<usize>,

    /// The files have no header row.
    #[arg(long)]
    no_headers: bool,

    /// Score categorical attributes with the Laplace-smoothed table.
    #[arg(long)]
    laplace_likelihood: bool,

    /// Raise zero standard deviations to this value instead of failing.
    #[arg(long)]
    sigma_floor: Option<f64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mode = Mode::from(cli.mode);
    let load_options = LoadOptions {
        mode,
        has_headers: !cli.no_headers,
        class_column: cli.class_column,
    };
    let fit_options = FitOptions {
        mode,
        likelihood: if cli.laplace_likelihood {
            LikelihoodTable::Laplace
        } else {
            LikelihoodTable::Raw
        },
        sigma_policy: cli.sigma_floor.map_or(SigmaPolicy::Reject, SigmaPolicy::Floor),
    };

    let train = loader::load_csv_path(&cli.train, &load_options)
        .with_context(|| format!("cannot read the file: {}", cli.train.display()))?;

    let mut classifier = NaiveBayesClassifier::new(fit_options);
    classifier.fit(&train).context("fitting failed")?;

    let loaded;
    let test = match &cli.test {
        Some(path) => {
            loaded = loader::load_csv_path_with_schema(path, &load_options, &Schema::of(&train))
                .with_context(|| format!("cannot read the file: {}", path.display()))?;
            &loaded
        }
        None => &train,
    };

    let predictions = classifier.classify_all(test).context("classification failed")?;
    let evaluation = evaluate(&predictions, test)?;
    log::info!("{evaluation}");

    println!("The accuracy is: {}", evaluation.accuracy());

    Ok(())
}
