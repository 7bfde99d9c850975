use colored::{ColoredString, Colorize};
use dialoguer::{theme::ColorfulTheme, Select};
use indicatif::{ProgressBar, ProgressStyle};
use markets::{Card, Snapshot, Tone, View};
use std::time::Duration;

pub fn spinner(msg: String) -> anyhow::Result<ProgressBar> {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed_precise}]")?);
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    Ok(pb)
}

fn tone(text: &str, tone: Tone) -> ColoredString {
    match tone {
        Tone::Positive => text.green(),
        Tone::Negative => text.red(),
        Tone::Undefined => text.dimmed(),
    }
}

pub fn print_status(status: &str) {
    if status.starts_with("Error") || status.starts_with("Please") {
        println!("{}", status.yellow());
    } else {
        println!("{}", status.dimmed());
    }
}

pub fn print_snapshot(snap: &Snapshot) {
    println!();
    println!("{}", snap.view.to_string().to_uppercase().bold());
    print_status(&snap.status);
    println!();

    for card in &snap.cards {
        match card {
            Card::Metrics {
                name,
                ticker,
                last_date,
                latest,
                metrics,
            } => {
                println!(
                    "{:<26} {:<6} {} {}",
                    name.bold(),
                    ticker.cyan(),
                    last_date.dimmed(),
                    latest
                );
                let row = metrics
                    .iter()
                    .map(|m| format!("{} {:>9}", m.label.dimmed(), tone(&m.text, m.tone)))
                    .collect::<Vec<_>>()
                    .join("   ");
                println!("    {row}");
            }

            Card::Failed {
                name,
                ticker,
                message,
            } => {
                println!("{:<26} {:<6}", name.bold(), ticker.cyan());
                println!("    {}", message.dimmed());
            }
        }
    }
    println!();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Refresh,
    Switch,
    Quit,
}

/// Asks for the next action on a blocking thread.
pub async fn prompt(view: View) -> anyhow::Result<Action> {
    let options = vec![
        "Refresh".to_string(),
        format!("Switch to {}", view.other()),
        "Quit".to_string(),
    ];

    let selection = tokio::task::spawn_blocking(move || {
        Select::with_theme(&ColorfulTheme::default())
            .with_prompt(format!("markets [{view}]"))
            .default(0)
            .items(&options)
            .interact()
    })
    .await??;

    Ok(match selection {
        0 => Action::Refresh,
        1 => Action::Switch,
        _ => Action::Quit,
    })
}
