//! Display functions for command results

use super::formatters::{create_progress_bar, format_frequency, format_pattern};
use crate::commands::{FilterOutcome, FilterResult, TrendTable};
use crate::trends::TrendError;
use colored::{Color, Colorize};

/// Matches per printed row
const WORDS_PER_ROW: usize = 8;

/// Same hue order as the TUI chart
const SERIES_COLORS: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Print the result of the filter command
pub fn print_filter_outcome(outcome: &FilterOutcome) {
    match outcome {
        FilterOutcome::NoConstraints => {
            println!("{}", "Enter some constraints to see matches.".bright_black());
        }
        FilterOutcome::Matches(result) => print_filter_result(result),
    }
}

fn print_filter_result(result: &FilterResult) {
    let constraints = &result.constraints;

    println!("\n{}", "─".repeat(60).cyan());
    println!(
        "Correct:     {}",
        format_pattern(&constraints.correct).green().bold()
    );
    println!(
        "Wrong spots: {}",
        format_pattern(&constraints.wrong_spots).yellow().bold()
    );
    println!(
        "Not in word: {}",
        constraints.excluded.to_string().to_uppercase().bright_black()
    );
    println!("{}", "─".repeat(60).cyan());

    if result.match_count == 0 {
        println!("\n{}", "No matches. Adjust your constraints.".red().bold());
        return;
    }

    println!(
        "\nMatches ({} results found, {} words checked)",
        result.match_count.to_string().bright_yellow().bold(),
        result.total_words
    );

    for row in result.matches.chunks(WORDS_PER_ROW) {
        let line: Vec<String> = row.iter().map(|w| w.to_uppercase()).collect();
        println!("  {}", line.join("  "));
    }

    let hidden = result.match_count - result.matches.len();
    if hidden > 0 {
        println!("  {}", format!("... and {hidden} more").bright_black());
    }
}

/// Print yearly usage, one bar per word and year
pub fn print_trend_table(table: &TrendTable) {
    if table.points.is_empty() {
        return;
    }

    println!("\n📈 {}", "Usage over time:".bright_cyan().bold());
    let max = table.max_value();

    for point in &table.points {
        println!("\n  {}", point.year.to_string().bold());
        for (i, word) in table.words.iter().enumerate() {
            let value = point.value(word);
            let color = SERIES_COLORS[i % SERIES_COLORS.len()];
            println!(
                "    {:<6} {} {}",
                word.to_uppercase(),
                create_progress_bar(value, max, 30).color(color),
                format_frequency(value)
            );
        }
    }
}

/// Print why the trend lookup failed; filtering results stay valid
pub fn print_trend_error(err: &TrendError) {
    println!(
        "\n{} {}",
        "Unable to fetch trend data at the moment:".red(),
        err
    );
}
