use std::env;
use std::process;

use stock_data::YahooFinanceProvider;
use stock_forecast::{DataLoader, ForecastError, ForecastReport, Forecaster};

const CHART_WIDTH: u32 = 800;
const CHART_HEIGHT: u32 = 500;

struct Options {
    symbol: Option<String>,
    csv_path: Option<String>,
    out_path: String,
}

fn usage() -> ! {
    eprintln!("Usage: stock_forecast SYMBOL [--out CHART.png]");
    eprintln!("       stock_forecast --csv CLOSES.csv [--out CHART.png]");
    eprintln!();
    eprintln!("Fetches five years of daily closes for SYMBOL (or reads them from a");
    eprintln!("CSV file with date and close columns), forecasts five years ahead,");
    eprintln!("prints checkpoint summaries and writes a chart image.");
    process::exit(2);
}

fn parse_args() -> Options {
    let mut options = Options {
        symbol: None,
        csv_path: None,
        out_path: "forecast.png".to_string(),
    };

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--csv" => match args.next() {
                Some(path) => options.csv_path = Some(path),
                None => usage(),
            },
            "--out" => match args.next() {
                Some(path) => options.out_path = path,
                None => usage(),
            },
            "--help" | "-h" => usage(),
            _ if arg.starts_with('-') => usage(),
            _ => options.symbol = Some(arg),
        }
    }

    if options.symbol.is_none() && options.csv_path.is_none() {
        usage();
    }

    options
}

fn run(options: &Options) -> Result<ForecastReport, ForecastError> {
    let forecaster = Forecaster::new(YahooFinanceProvider::default());

    match &options.csv_path {
        Some(path) => {
            let series = DataLoader::from_csv(path)?;
            let name = options.symbol.clone().unwrap_or_else(|| path.clone());
            forecaster.run_with_series(&name, &series)
        }
        None => forecaster.run(options.symbol.as_deref().unwrap_or_default()),
    }
}

fn print_report(report: &ForecastReport) {
    println!("{} ({})", report.company_name, report.symbol);
    println!(
        "Current price: {:.2} (as of {})",
        report.current_price, report.last_actual_date
    );
    println!();
    println!(
        "{:<10} {:>12} {:>9} {:>12} {:>12}",
        "Horizon", "Predicted", "Change", "Lower", "Upper"
    );

    for entry in &report.summary {
        println!(
            "{:<10} {:>12.2} {:>+8.1}% {:>12.2} {:>12.2}",
            entry.label,
            entry.predicted_price,
            entry.change_rate,
            entry.lower_bound,
            entry.upper_bound
        );
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let options = parse_args();

    let report = match run(&options) {
        Ok(report) => report,
        Err(err) => {
            let message = match &err {
                ForecastError::DataUnavailable(_) => {
                    "Symbol not found. Check the ticker code and try again."
                }
                ForecastError::ForecastingError(_) => "Forecasting failed for this series.",
                ForecastError::InvalidInput(_) => "Enter a ticker symbol, e.g. AAPL or 7203.T.",
                _ => "The forecast run failed.",
            };
            eprintln!("{message} ({err})");
            process::exit(1);
        }
    };

    print_report(&report);

    match report
        .chart_data()
        .render_png(&options.out_path, CHART_WIDTH, CHART_HEIGHT)
    {
        Ok(()) => println!("\nChart written to {}", options.out_path),
        Err(err) => {
            eprintln!("Could not write chart: {err}");
            process::exit(1);
        }
    }
}
