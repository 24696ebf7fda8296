//! Planner task commands for CLI.

use clap::Subcommand;
use mindstudy_core::{InMemoryTaskList, Settings, TaskList};

#[derive(Subcommand)]
pub enum TasksAction {
    /// List the planner's exported tasks
    List {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(action: TasksAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TasksAction::List { json } => {
            let settings = Settings::load_or_default();
            let path = settings.tasks_source()?;
            let list = InMemoryTaskList::load(&path)?;

            if json {
                println!("{}", serde_json::to_string_pretty(list.tasks())?);
            } else if list.tasks().is_empty() {
                println!("no tasks in {}", path.display());
            } else {
                for task in list.tasks() {
                    match &task.description {
                        Some(description) => {
                            println!("{:>4}  {} ({description})", task.id, task.title)
                        }
                        None => println!("{:>4}  {}", task.id, task.title),
                    }
                }
            }
        }
    }
    Ok(())
}
