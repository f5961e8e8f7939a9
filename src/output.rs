use crate::error::Result;
use crate::list::{Entry, TaskList};
use crate::model::{DATE_FORMAT, Task};
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Pretty,
    Minimal,
}

pub fn render_task(id: u64, task: &Task, format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string(&Entry { id, task })?,
        Format::Pretty => task.to_string(),
        Format::Minimal => minimal_row(id, task),
    })
}

pub fn render_tasks(tasks: &TaskList, format: Format) -> Result<String> {
    Ok(match format {
        Format::Json => serde_json::to_string(&tasks.entries())?,
        Format::Pretty => tasks.to_string().trim_end().to_string(),
        Format::Minimal => {
            let mut out = format!("{:>4} {:4} {:10} DESCRIPTION\n", "ID", "DONE", "DUE");
            out.push_str(&"-".repeat(50));
            for (id, task) in tasks.iter() {
                out.push('\n');
                out.push_str(&minimal_row(id, task));
            }
            out
        }
    })
}

fn minimal_row(id: u64, task: &Task) -> String {
    let done = if task.done { "x" } else { "-" };
    format!(
        "{:>4} {:4} {:10} {}",
        id,
        done,
        task.due.format(DATE_FORMAT).to_string(),
        truncate_description(&task.description, 40)
    )
}

/// Shorten `description` to at most `max_len` characters, ending in `...`
/// when anything was cut. Widths under 3 leave room only for the dots.
pub fn truncate_description(description: &str, max_len: usize) -> String {
    if description.char_indices().nth(max_len).is_none() {
        return description.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let end = description
        .char_indices()
        .nth(keep)
        .map_or(description.len(), |(at, _)| at);
    format!("{}...", &description[..end])
}

pub fn print_task(id: u64, task: &Task, format: Format) -> Result<()> {
    println!("{}", render_task(id, task, format)?);
    Ok(())
}

pub fn print_tasks(tasks: &TaskList, format: Format) -> Result<()> {
    let rendered = render_tasks(tasks, format)?;
    if !rendered.is_empty() {
        println!("{rendered}");
    }
    Ok(())
}

/// Acknowledge a mutation; JSON callers get the affected task id.
///
/// Unreadable lines that were carried through the save are reported on
/// stderr, or as a `kept_unreadable` count in JSON.
pub fn print_done(id: u64, kept_unreadable: usize, format: Format) -> Result<()> {
    match format {
        Format::Json => println!(
            "{}",
            serde_json::json!({ "id": id, "status": "ok", "kept_unreadable": kept_unreadable })
        ),
        _ => {
            println!("Done.");
            if kept_unreadable > 0 {
                eprintln!("{}", unreadable_warning(kept_unreadable));
            }
        }
    }
    Ok(())
}

pub fn unreadable_warning(count: usize) -> String {
    let lines = if count == 1 { "line" } else { "lines" };
    format!("warning: {count} unreadable {lines} in the task file left as-is")
}
