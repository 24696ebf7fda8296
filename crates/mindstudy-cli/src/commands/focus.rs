//! Foreground focus-session runner.
//!
//! Plays the host role the engine expects: a once-per-second tick plus
//! line commands on stdin. The engine itself never blocks or sleeps, so
//! everything here is one `tokio::select!` loop.

use std::io::Write;
use std::time::Duration;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use mindstudy_core::{FocusEngine, InMemoryTaskList, SessionStatus, Settings};

#[derive(Args)]
pub struct FocusArgs {
    /// Work phase length in minutes (overrides settings)
    #[arg(long)]
    work: Option<u32>,
    /// Break phase length in minutes (overrides settings)
    #[arg(long = "break")]
    break_minutes: Option<u32>,
    /// Planner task id to attribute the session to
    #[arg(long)]
    task_id: Option<i64>,
    /// Free-form task label (wins over --task-id)
    #[arg(long)]
    task: Option<String>,
    /// Emit events as JSON lines instead of the live countdown
    #[arg(long)]
    json: bool,
}

pub async fn run(args: FocusArgs) -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::load_or_default();
    let mut config = settings.session;
    if let Some(minutes) = args.work {
        config.set_work_minutes(minutes);
    }
    if let Some(minutes) = args.break_minutes {
        config.set_break_minutes(minutes);
    }

    let mut engine = FocusEngine::new(config);
    engine.set_task_list(Box::new(InMemoryTaskList::load(&settings.tasks_source()?)?));

    let json = args.json;
    if json {
        engine.on_event(|event| {
            if let Ok(line) = serde_json::to_string(event) {
                println!("{line}");
            }
        });
    } else {
        println!(
            "focus session: {}m work / {}m break",
            config.work_minutes, config.break_minutes
        );
        println!("commands: pause resume reset work N break N task X status quit");
    }

    engine.select_task(args.task_id, args.task.as_deref().unwrap_or(""));
    engine.start();

    let mut interval = tokio::time::interval(Duration::from_secs(1));
    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Some(event) = engine.tick() {
                    if !json {
                        if let mindstudy_core::SessionEvent::PhaseCompleted {
                            completed, next, cycle, ..
                        } = event
                        {
                            println!("\n{completed} phase complete; {next} begins (cycle {cycle})");
                        }
                    }
                }
                if !json {
                    render_countdown(&engine);
                }
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => {
                        if !handle_command(&mut engine, line.trim(), json) {
                            break;
                        }
                    }
                    Ok(None) => break, // stdin closed
                    Err(err) => return Err(err.into()),
                }
            }
            _ = tokio::signal::ctrl_c() => {
                debug!("interrupted");
                break;
            }
        }
    }

    if !json {
        println!();
    }
    Ok(())
}

/// Apply one stdin command. Returns false when the session should end.
fn handle_command(engine: &mut FocusEngine, line: &str, json: bool) -> bool {
    let Some(command) = line.split_whitespace().next() else {
        return true;
    };
    let rest = line[command.len()..].trim();

    match command {
        "pause" => {
            if engine.pause().is_none() {
                debug!("pause ignored, nothing running");
            }
        }
        "resume" => {
            if engine.resume().is_none() {
                debug!("resume ignored, nothing paused");
            }
        }
        "reset" => {
            engine.reset();
        }
        "work" => match rest.parse::<u32>() {
            Ok(minutes) => {
                if engine.set_work_minutes(minutes).is_none() {
                    notice(json, "length change ignored while running");
                }
            }
            Err(_) => notice(json, "usage: work <minutes>"),
        },
        "break" => match rest.parse::<u32>() {
            Ok(minutes) => {
                if engine.set_break_minutes(minutes).is_none() {
                    notice(json, "length change ignored while running");
                }
            }
            Err(_) => notice(json, "usage: break <minutes>"),
        },
        "task" => {
            if rest.is_empty() {
                notice(json, "usage: task <id|label>");
            } else {
                let applied = match rest.parse::<i64>() {
                    Ok(id) => engine.select_task(Some(id), ""),
                    Err(_) => engine.select_task(None, rest),
                };
                if applied.is_none() {
                    notice(json, "no such task; selection kept");
                }
            }
        }
        "status" => {
            if !json {
                println!();
            }
            match serde_json::to_string(&engine.snapshot()) {
                Ok(snapshot) => println!("{snapshot}"),
                Err(err) => debug!("snapshot serialization failed: {err}"),
            }
        }
        "quit" | "exit" => return false,
        _ => notice(json, &format!("unknown command: {command}")),
    }
    true
}

fn notice(json: bool, message: &str) {
    if json {
        eprintln!("{message}");
    } else {
        println!("\n{message}");
    }
}

fn render_countdown(engine: &FocusEngine) {
    let remaining = engine.remaining_seconds();
    let paused = match engine.status() {
        SessionStatus::Paused => " (paused)",
        _ => "",
    };
    print!(
        "\r[{}] {:02}:{:02} {} cycle {}  {}{}   ",
        engine.mode(),
        remaining / 60,
        remaining % 60,
        progress_bar(engine.progress_fraction(), 20),
        engine.cycle_count(),
        engine.active_task_label(),
        paused,
    );
    let _ = std::io::stdout().flush();
}

fn progress_bar(fraction: f64, width: usize) -> String {
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_bar_spans_edges() {
        assert_eq!(progress_bar(0.0, 4), "[----]");
        assert_eq!(progress_bar(0.5, 4), "[##--]");
        assert_eq!(progress_bar(1.0, 4), "[####]");
        // Over-full input never overflows the width.
        assert_eq!(progress_bar(1.7, 4), "[####]");
    }

    #[test]
    fn quit_and_stdin_commands_drive_the_engine() {
        let mut engine = FocusEngine::new(mindstudy_core::SessionConfig::new(25, 5));
        engine.start();

        assert!(handle_command(&mut engine, "pause", true));
        assert_eq!(engine.status(), SessionStatus::Paused);

        assert!(handle_command(&mut engine, "resume", true));
        assert_eq!(engine.status(), SessionStatus::Running);

        // Length change is refused mid-run, applied after reset.
        assert!(handle_command(&mut engine, "work 40", true));
        assert_eq!(engine.work_minutes(), 25);
        assert!(handle_command(&mut engine, "reset", true));
        assert!(handle_command(&mut engine, "work 40", true));
        assert_eq!(engine.work_minutes(), 40);

        assert!(handle_command(&mut engine, "task Essay draft", true));
        assert_eq!(engine.active_task_label(), "Essay draft");

        assert!(handle_command(&mut engine, "", true));
        assert!(!handle_command(&mut engine, "quit", true));
    }
}
