use std::path::Path;

use clap::Args;
use cupmate_core::reminder::parse_time_of_day;
use cupmate_core::{
    LogNotifier, ReminderConfig, ReminderInterval, ReminderPlan, ReminderScheduler, SoundChoice,
    WorkPeriods,
};

use super::{load_config, resolve_now, CmdResult};

#[derive(Args)]
pub struct RemindArgs {
    /// Work period start (HH:MM); replaces the configured periods
    #[arg(long, requires = "end")]
    start: Option<String>,
    /// Work period end (HH:MM)
    #[arg(long, requires = "start")]
    end: Option<String>,
    /// Interval hours (0-3)
    #[arg(long)]
    hours: Option<u8>,
    /// Interval minutes (0, 15, 30 or 45)
    #[arg(long)]
    minutes: Option<u8>,
    /// Active weekday, 1 = Monday ... 7 = Sunday (repeatable)
    #[arg(long = "weekday")]
    weekdays: Vec<u8>,
    /// Ignore the weekday filter
    #[arg(long)]
    no_workday_filter: bool,
    /// Notification text
    #[arg(long)]
    message: Option<String>,
    /// Notification sound (default, water_drop, bird_song, custom)
    #[arg(long)]
    sound: Option<SoundChoice>,
    /// Pretend the current time is HH:MM
    #[arg(long)]
    now: Option<String>,
    /// Pretend today is YYYY-MM-DD
    #[arg(long)]
    date: Option<String>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Overlay command-line options on the configured reminder settings.
fn build_config(args: &RemindArgs, base: ReminderConfig) -> Result<ReminderConfig, Box<dyn std::error::Error>> {
    let mut cfg = base;

    if let (Some(start), Some(end)) = (&args.start, &args.end) {
        let start = parse_time_of_day(start).map_err(|e| format!("invalid start '{start}': {e}"))?;
        let end = parse_time_of_day(end).map_err(|e| format!("invalid end '{end}': {e}"))?;
        let mut periods = WorkPeriods::new();
        periods.add(start, end)?;
        cfg.work_periods = periods;
    }
    if args.hours.is_some() || args.minutes.is_some() {
        cfg.interval = ReminderInterval::new(
            args.hours.unwrap_or(cfg.interval.hours()),
            args.minutes.unwrap_or(cfg.interval.minutes()),
        )?;
    }
    if !args.weekdays.is_empty() {
        cfg.active_weekdays = args.weekdays.iter().copied().collect();
    }
    if args.no_workday_filter {
        cfg.workday_filter_enabled = false;
    }
    if let Some(message) = &args.message {
        cfg.message = message.clone();
    }
    if let Some(sound) = args.sound {
        cfg.sound = sound;
    }
    Ok(cfg)
}

pub fn run(args: RemindArgs, config_path: Option<&Path>) -> CmdResult {
    let base = load_config(config_path)?.reminders;
    let cfg = build_config(&args, base)?;
    let now = resolve_now(args.date.as_deref(), args.now.as_deref())?;

    let mut scheduler = ReminderScheduler::new(cfg, LogNotifier)?;
    let plan = scheduler.enable(now)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(plan)?);
        return Ok(());
    }
    match plan {
        ReminderPlan::Scheduled { times } => {
            println!("Reminders today:");
            for at in times {
                println!("  {}", at.format("%H:%M"));
            }
        }
        ReminderPlan::Empty { reason } => println!("No reminders today: {reason}"),
    }
    Ok(())
}
