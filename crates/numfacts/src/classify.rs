use crate::facts::{FactOptions, FactProvider};
use crate::prelude::{eprintln, println, *};
use colored::Colorize;
use numfacts_core::classify::{classify, NumberProperties};

#[derive(Debug, clap::Args)]
pub struct ClassifyOptions {
    /// Integer to classify
    #[arg(allow_negative_numbers = true)]
    pub number: i64,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    #[clap(flatten)]
    pub facts: FactOptions,
}

pub async fn run(options: ClassifyOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Classifying {}...", options.number);
    }

    let provider = options.facts.build_provider()?;
    let report = number_report(&provider, options.number).await?;

    if options.json {
        output_json(&report)?;
    } else {
        output_formatted(&report);
    }

    Ok(())
}

/// Classify `number` and attach a fun fact
///
/// Classification is CPU bound (factorization is O(√n)) so it runs on the
/// blocking pool. Shared by the CLI and the HTTP handlers.
pub async fn number_report(provider: &FactProvider, number: i64) -> Result<NumberProperties, Error> {
    let classification = tokio::task::spawn_blocking(move || classify(number))
        .await
        .map_err(|e| Error::Internal(format!("classification task failed: {e}")))??;

    let fun_fact = provider.resolve(number).await;

    Ok(classification.with_fun_fact(fun_fact))
}

fn output_json(report: &NumberProperties) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .map_err(|e| eyre!("JSON serialization failed: {}", e))?;
    println!("{}", json);
    Ok(())
}

fn output_formatted(report: &NumberProperties) {
    print!("{}", format_report_text(report));
}

fn yes_no(value: bool) -> String {
    if value {
        "yes".green().to_string()
    } else {
        "no".red().to_string()
    }
}

/// Render a report as a header, a property table and the fun fact
fn format_report_text(report: &NumberProperties) -> String {
    let p = &report.properties;
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "=".repeat(60).bright_cyan()));
    result.push_str(&f!(
        "{}\n",
        f!("{} NUMBER {}", report.emoji, report.number)
            .bright_cyan()
            .bold()
    ));
    result.push_str(&f!("{}\n\n", "=".repeat(60).bright_cyan()));

    let factors = p
        .factors
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(", ");

    let mut table = new_table();
    table.add_row(prettytable::row!["Even", yes_no(p.is_even)]);
    table.add_row(prettytable::row!["Prime", yes_no(p.is_prime)]);
    table.add_row(prettytable::row!["Fibonacci", yes_no(p.is_fibonacci)]);
    table.add_row(prettytable::row!["Perfect square", yes_no(p.is_perfect_square)]);
    table.add_row(prettytable::row!["Perfect cube", yes_no(p.is_perfect_cube)]);
    table.add_row(prettytable::row!["Power of two", yes_no(p.is_power_of_two)]);
    table.add_row(prettytable::row!["Armstrong", yes_no(p.is_armstrong)]);
    table.add_row(prettytable::row!["Perfect number", yes_no(p.is_perfect_number)]);
    table.add_row(prettytable::row!["Absolute value", p.absolute_value]);
    table.add_row(prettytable::row!["Sign", f!("{:?}", p.sign).to_lowercase()]);
    table.add_row(prettytable::row!["Factors", factors]);
    table.add_row(prettytable::row!["Digit sum", p.digit_sum]);
    table.add_row(prettytable::row!["Binary", p.binary]);
    table.add_row(prettytable::row!["Hexadecimal", p.hexadecimal]);
    table.add_row(prettytable::row!["Factorial", p.factorial]);
    result.push_str(&table.to_string());

    let tags = report
        .classification
        .iter()
        .map(|tag| tag.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    result.push_str(&f!("\n{}: {}\n", "Classification".green(), tags.yellow()));
    result.push_str(&f!("{}: {}\n", "Fun fact".green(), report.fun_fact.white()));

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use numfacts_core::facts::FixedPicker;
    use std::sync::Arc;

    fn offline_provider() -> FactProvider {
        FactProvider::new(
            Arc::new(FixedPicker(0)),
            Arc::new(crate::facts::LogObserver),
        )
    }

    #[tokio::test]
    async fn test_number_report_attaches_fun_fact() {
        let report = number_report(&offline_provider(), 28).await.unwrap();

        assert_eq!(report.number, 28);
        assert_eq!(report.fun_fact, "28 is an even number.");
        assert!(report.properties.is_perfect_number);
    }

    #[tokio::test]
    async fn test_number_report_negative_number() {
        let report = number_report(&offline_provider(), -8).await.unwrap();

        assert!(!report.properties.is_power_of_two);
        assert_eq!(report.properties.absolute_value, 8);
    }

    #[tokio::test]
    async fn test_format_report_text_lists_properties() {
        let report = number_report(&offline_provider(), 6).await.unwrap();
        let text = format_report_text(&report);

        assert!(text.contains("NUMBER 6"));
        assert!(text.contains("Perfect number"));
        assert!(text.contains("1, 2, 3, 6"));
        assert!(text.contains("720"));
        assert!(text.contains("perfect-number"));
        assert!(text.contains("6 is an even number."));
    }

    #[tokio::test]
    async fn test_format_report_text_factorial_sentinel() {
        let report = number_report(&offline_provider(), 20).await.unwrap();
        let text = format_report_text(&report);

        assert!(text.contains("too large to calculate"));
    }
}
