//! Welcome Tour
//!
//! This example walks the built-in five-step welcome tour across two
//! simulated page loads.
//!
//! Key concepts:
//! - Progress persisted to a JSON file after every committed step
//! - Closing mid-tour keeps the tour resumable
//! - Analytics events logged through `tracing` and collected in memory
//! - Render-ready view snapshots for the UI layer
//!
//! Run with: RUST_LOG=onboardx=info cargo run --example welcome_tour

use onboardx::analytics::MemorySink;
use onboardx::presets::{self, Highlight};
use onboardx::{TourConfig, TourMachine};

fn render(tour: &TourMachine) {
    let view = tour.view();
    if view.shows_intro() {
        println!("  [intro] \"Start tour\" / \"Maybe later\"");
        return;
    }
    if !view.shows_step() {
        let hint = if view.has_progress {
            " (resume available)"
        } else {
            ""
        };
        println!("  [launcher]{}", hint);
        return;
    }

    let highlight = Highlight::for_step(view.step)
        .map(|h| format!(" highlighting {:?}", h))
        .unwrap_or_default();
    println!(
        "  [{} | {:>3.0}%] {}{}",
        view.counter_label(),
        view.progress_percent,
        view.step.title,
        highlight
    );
    println!(
        "      back: {}  primary: {}",
        if view.can_go_back { "yes" } else { "no" },
        view.primary_label
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    println!("=== Welcome Tour Example ===\n");

    let dir = match tempfile::tempdir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Could not create a storage directory: {}", e);
            return;
        }
    };
    let config = TourConfig {
        storage_dir: Some(dir.path().to_path_buf()),
        ..TourConfig::default()
    }
    .with_env_overrides();

    // Page load 1: start the tour and leave halfway
    println!("Page load 1");
    println!("----------------------------------------");
    let events = MemorySink::new();
    let mut tour = match presets::welcome_tour()
        .config(config.clone())
        .sink(events.clone())
        .build()
    {
        Ok(tour) => tour,
        Err(e) => {
            eprintln!("Invalid tour: {}", e);
            return;
        }
    };

    render(&tour);
    tour.open_launcher();
    render(&tour);
    tour.start();
    render(&tour);
    tour.next();
    render(&tour);
    tour.next();
    render(&tour);

    let back = tour.back();
    println!("  back -> {:?}", back);
    render(&tour);

    tour.close();
    render(&tour);
    println!("  {} events so far\n", events.len());

    // Page load 2: progress comes back from disk
    println!("Page load 2");
    println!("----------------------------------------");
    let mut tour = match presets::welcome_tour().config(config).build() {
        Ok(tour) => tour,
        Err(e) => {
            eprintln!("Invalid tour: {}", e);
            return;
        }
    };

    render(&tour);
    tour.open_launcher();
    render(&tour);
    while tour.next().is_applied() {
        render(&tour);
    }

    let ignored = tour.back();
    println!("  back after finishing -> {:?}", ignored);

    println!("\nMode path this page load:");
    for mode in tour.history().get_path() {
        println!("  - {}", mode);
    }

    println!("\nKey Takeaways:");
    println!("- The machine owns the rules; rendering only reads a view");
    println!("- Persisted progress is best-effort and resumes on the next load");
    println!("- Invalid actions are ignored, never fatal");

    println!("\n=== Example Complete ===");
}
