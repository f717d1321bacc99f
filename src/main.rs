mod app;
mod calculator;
mod config;
mod savings;
mod testimonials;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use app::{App, Popup};
use calculator::IconGrid;
use config::AppConfig;
use savings::{CalculatorInputs, RawInputs};

#[derive(Parser, Debug)]
#[command(name = "purrify")]
#[command(author = "Purrify")]
#[command(version = "0.1.0")]
#[command(about = "See how much the Purrify litter additive saves you")]
struct Args {
    /// Number of cats (1-5, larger values count as 5)
    #[arg(long, allow_negative_numbers = true)]
    cats: Option<f64>,

    /// Litter changes per month (1-10)
    #[arg(long, allow_negative_numbers = true)]
    changes: Option<f64>,

    /// Use premium litter pricing
    #[arg(long)]
    premium: bool,

    /// Print the savings once and exit
    #[arg(short, long)]
    print: bool,

    /// Print the savings once as JSON and exit
    #[arg(short, long)]
    json: bool,

    /// Read config from this file instead of the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    /// Validate the command-line inputs, filling gaps with the widget defaults
    fn inputs(&self) -> Result<CalculatorInputs> {
        let defaults = CalculatorInputs::default();
        let raw = RawInputs {
            cats_count: self.cats.unwrap_or(f64::from(defaults.cats_count)),
            is_premium_litter: self.premium,
            litter_changes_per_month: self
                .changes
                .unwrap_or(f64::from(defaults.litter_changes_per_month)),
        };
        Ok(CalculatorInputs::try_from(raw)?)
    }
}

fn main() -> Result<()> {
    // Initialize logging (stderr keeps stdout clean for the TUI and --json)
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let config = AppConfig::load(args.config.as_deref())?;
    let inputs = args.inputs()?;

    // Handle CLI-only commands
    if args.json {
        return print_json(&config, inputs);
    }

    if args.print {
        return print_summary(&config, inputs);
    }

    ui::init_theme(theme::Theme::from_config(&config.theme));

    // Run TUI
    run_tui(&config, inputs)
}

fn print_json(config: &AppConfig, inputs: CalculatorInputs) -> Result<()> {
    let result = config.policy.compute(&inputs)?;
    tracing::info!(?inputs, ?result, "computed savings");

    let output = serde_json::json!({
        "inputs": inputs,
        "result": result,
        "trees_icons": IconGrid::for_trees(result.trees_saved).count,
    });

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

fn print_summary(config: &AppConfig, inputs: CalculatorInputs) -> Result<()> {
    let result = config.policy.compute(&inputs)?;
    tracing::info!(?inputs, ?result, "computed savings");

    println!(
        "{} cat(s), {} litter, {} changes/month",
        inputs.cats_count,
        inputs.tier().label(),
        inputs.litter_changes_per_month
    );
    for (label, value) in ui::format_result(&result) {
        println!("{:<16} {}", label, value);
    }
    Ok(())
}

fn run_tui(config: &AppConfig, inputs: CalculatorInputs) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(config, inputs, Instant::now());

    // Main loop
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc if app.popup == Popup::None => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(event::KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        _ => app.handle_key(key, Instant::now()),
                    }
                }
            }
        }

        // Periodic refresh
        app.tick(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("purrify").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_when_flags_missing() {
        let inputs = parse(&["--print"]).inputs().unwrap();
        assert_eq!(inputs, CalculatorInputs::default());
    }

    #[test]
    fn test_flags_become_inputs() {
        let inputs = parse(&["--cats", "2", "--premium", "--changes", "6"]).inputs().unwrap();
        assert_eq!(inputs, CalculatorInputs::new(2, true, 6));
    }

    #[test]
    fn test_negative_flag_rejected() {
        let args = parse(&["--cats", "-2", "--json"]);
        let err = args.inputs().unwrap_err();
        assert!(err.to_string().contains("cats_count"), "{}", err);
    }

    #[test]
    fn test_nan_flag_rejected() {
        assert!(parse(&["--changes", "NaN"]).inputs().is_err());
    }
}
