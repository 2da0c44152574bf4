use std::path::PathBuf;

use clap::Parser;
use env_logger::{Builder, Env};
use log::info;
use ols::{
    dataset::{Dataset, BMI_FEATURE_INDEX},
    mean_squared_error,
    plot::plot_fit,
    r2_score, LinearRegression,
};

const DATA_FILEPATH: &str = "data/diabetes.tab.txt";
const PLOT_FILEPATH: &str = "diabetes-fit.svg";
const TEST_SIZE: usize = 20;

/// Fits ordinary least squares models on the diabetes dataset.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Tab-separated diabetes table (header row, target in the last column)
    #[arg(long, default_value = DATA_FILEPATH)]
    data: PathBuf,

    /// Number of trailing samples held out for testing
    #[arg(long, default_value_t = TEST_SIZE)]
    test_size: usize,

    /// Feature column used by the single-feature model
    #[arg(long, default_value_t = BMI_FEATURE_INDEX)]
    feature: usize,

    /// Where to write the single-feature plot
    #[arg(long, default_value = PLOT_FILEPATH)]
    plot: PathBuf,
}

fn format_values(values: impl IntoIterator<Item = f64>) -> String {
    values
        .into_iter()
        .map(|value| format!("{value:.2}"))
        .collect::<Vec<_>>()
        .join(", ")
}

fn single_feature(dataset: &Dataset, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let selected = dataset.select_features(&[args.feature])?;
    let feature_name = selected.feature_names()[0].clone();
    let (train, test) = selected.split_tail(args.test_size)?;

    let model = LinearRegression::fit(train.features(), train.targets())?;
    let predictions = model.predict(test.features())?;

    println!("single feature model ({feature_name})");
    println!("  coefficient: {:.2}", model.coefficients()[0]);
    println!("  intercept: {:.2}", model.intercept());
    println!("  test predictions: [{}]", format_values(predictions.iter().copied()));
    println!(
        "  test mean squared error: {:.2}",
        mean_squared_error(test.targets(), predictions.view())?
    );
    println!(
        "  test R²: {:.2}",
        r2_score(test.targets(), predictions.view())?
    );

    plot_fit(
        &args.plot,
        &feature_name,
        test.features().column(0),
        test.targets(),
        predictions.view(),
    )?;
    println!("  plot written to {}", args.plot.display());

    Ok(())
}

fn all_features(dataset: &Dataset, args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let (train, test) = dataset.split_tail(args.test_size)?;

    let model = LinearRegression::fit(train.features(), train.targets())?;
    let train_predictions = model.predict(train.features())?;
    let test_predictions = model.predict(test.features())?;

    println!("all features model ({})", dataset.feature_names().join(", "));
    println!(
        "  coefficients: [{}]",
        format_values(model.coefficients().iter().copied())
    );
    println!("  intercept: {:.2}", model.intercept());
    println!(
        "  train mean squared error: {:.2}",
        mean_squared_error(train.targets(), train_predictions.view())?
    );
    println!(
        "  test mean squared error: {:.2}",
        mean_squared_error(test.targets(), test_predictions.view())?
    );
    println!(
        "  test R²: {:.2}",
        model.score(test.features(), test.targets())?
    );

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    info!("running with {args:?}");

    let dataset = Dataset::from_path(&args.data)?.scaled();

    single_feature(&dataset, &args)?;
    println!();
    all_features(&dataset, &args)?;

    Ok(())
}
