//! Line-oriented session over stdin.
//!
//! State lives only for the lifetime of the process.

use std::io::{BufRead, Write};
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use cupmate_core::reminder::parse_time_of_day;
use cupmate_core::{Category, Event, LogNotifier, Notifier, Session};
use tracing::debug;

use super::{load_config, ring, CmdResult};

const HELP: &str = "\
commands:
  add <category> <ml>         record intake
  sub <category> <ml>         remove intake (floors at 0)
  reset <category>            zero one category
  reset-day                   zero everything
  status                      totals per category
  ring                        progress ring
  period add <HH:MM> <HH:MM>  add a work period
  period list                 list work periods
  period on|off <n>           enable/disable period n
  period rm <n>               remove period n
  remind on|off               switch reminders
  json                        session snapshot as JSON
  quit                        leave";

pub fn run(config_path: Option<&Path>) -> CmdResult {
    let config = load_config(config_path)?;
    let mut session = Session::from_config(&config, LogNotifier)?;
    debug!(goal_ml = session.goal().ml(), "session started");

    let stdin = std::io::stdin();
    let mut out = std::io::stdout();
    for line in stdin.lock().lines() {
        let line = line?;
        match execute(&mut session, &line, Local::now().naive_local()) {
            Ok(Reply::Quit) => break,
            Ok(Reply::Text(text)) => {
                if !text.is_empty() {
                    writeln!(out, "{text}")?;
                }
            }
            Err(e) => writeln!(out, "error: {e}")?,
        }
        out.flush()?;
    }
    Ok(())
}

#[derive(Debug, PartialEq)]
pub enum Reply {
    Text(String),
    Quit,
}

fn parse_category(word: Option<&str>) -> Result<Category, String> {
    word.ok_or_else(|| "missing category".to_string())?.parse()
}

fn period_id<N: Notifier>(session: &Session<N>, word: Option<&str>) -> Result<String, String> {
    let n: usize = word
        .ok_or("missing period number")?
        .parse()
        .map_err(|_| "period number must be a positive integer".to_string())?;
    session
        .reminders()
        .config()
        .work_periods
        .iter()
        .nth(n.saturating_sub(1))
        .filter(|_| n > 0)
        .map(|(p, _)| p.id.clone())
        .ok_or_else(|| format!("no period {n}"))
}

/// Run one input line against the session.
pub fn execute<N: Notifier>(
    session: &mut Session<N>,
    line: &str,
    now: NaiveDateTime,
) -> Result<Reply, Box<dyn std::error::Error>> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(Reply::Text(String::new()));
    };

    let text = match cmd {
        "add" | "sub" => {
            let category = parse_category(words.next())?;
            let amount = words.next().unwrap_or("");
            let event = if cmd == "add" {
                session.add_intake_text(category, amount)
            } else {
                session.subtract_intake_text(category, amount)
            };
            describe(&event)
        }
        "reset" => describe(&session.reset_intake(parse_category(words.next())?)),
        "reset-day" => describe(&session.reset_day()),
        "status" => {
            let intake = session.intake();
            let mut text = String::new();
            for category in Category::ALL {
                text.push_str(&format!(
                    "{:<7} {:>7.0} ml  cup {:>3.0}%\n",
                    category.to_string(),
                    intake.get(category),
                    intake.fill_level(category) * 100.0
                ));
            }
            text.push_str(&format!("total   {:>7.0} ml", intake.total()));
            text
        }
        "ring" => ring::render(&session.progress()).trim_end().to_string(),
        "json" => serde_json::to_string(&session.snapshot())?,
        "period" => match words.next() {
            Some("add") => {
                let start = parse_time_of_day(words.next().unwrap_or(""))?;
                let end = parse_time_of_day(words.next().unwrap_or(""))?;
                session.edit_work_periods(now, |p| p.add(start, end))?;
                "period added".to_string()
            }
            Some("list") => {
                let periods = &session.reminders().config().work_periods;
                if periods.is_empty() {
                    "no work periods".to_string()
                } else {
                    periods
                        .iter()
                        .enumerate()
                        .map(|(i, (p, on))| {
                            format!("{}. {} [{}]", i + 1, p.label(), if on { "on" } else { "off" })
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
            Some(toggle @ ("on" | "off")) => {
                let id = period_id(session, words.next())?;
                session.edit_work_periods(now, |p| p.set_enabled(&id, toggle == "on"))?;
                format!("period {toggle}")
            }
            Some("rm") => {
                let id = period_id(session, words.next())?;
                let removed = session.edit_work_periods(now, |p| p.remove(&id))?;
                format!("removed {}", removed.label())
            }
            _ => "usage: period add|list|on|off|rm".to_string(),
        },
        "remind" => match words.next() {
            Some("on") => describe(&session.enable_reminders(now)?),
            Some("off") => describe(&session.disable_reminders()),
            _ => "usage: remind on|off".to_string(),
        },
        "help" => HELP.to_string(),
        "quit" | "exit" => return Ok(Reply::Quit),
        other => format!("unknown command '{other}' (try 'help')"),
    };
    Ok(Reply::Text(text))
}

fn describe(event: &Event) -> String {
    match event {
        Event::IntakeAdded {
            category,
            amount_ml,
            total_ml,
            ..
        } => format!("+{amount_ml} ml {category} (total {total_ml} ml)"),
        Event::IntakeSubtracted {
            category,
            amount_ml,
            total_ml,
            ..
        } => format!("-{amount_ml} ml {category} (total {total_ml} ml)"),
        Event::IntakeReset {
            category, total_ml, ..
        } => format!("{category} reset (total {total_ml} ml)"),
        Event::DayReset { .. } => "day reset".to_string(),
        Event::InputRejected {
            category, input, ..
        } => format!("ignored '{input}' for {category}: not a positive number"),
        Event::RemindersScheduled { times, .. } => {
            let list: Vec<String> = times.iter().map(|t| t.format("%H:%M").to_string()).collect();
            format!("reminders at {}", list.join(", "))
        }
        Event::NoRemindersToday { reason, .. } => format!("no reminders today: {reason}"),
        Event::RemindersCleared { .. } => "reminders off".to_string(),
    }
}
