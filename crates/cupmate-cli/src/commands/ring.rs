use std::path::Path;

use clap::Args;
use cupmate_core::{Category, DailyGoal, IntakeStore, ProgressRing};

use super::{load_config, CmdResult};

#[derive(Args)]
pub struct RingArgs {
    /// Drink intake in ml
    #[arg(long, default_value_t = 0.0)]
    drink: f64,
    /// Coffee intake in ml
    #[arg(long, default_value_t = 0.0)]
    coffee: f64,
    /// Water intake in ml
    #[arg(long, default_value_t = 0.0)]
    water: f64,
    /// Soup intake in ml
    #[arg(long, default_value_t = 0.0)]
    soup: f64,
    /// Daily goal in ml (defaults to the configured goal)
    #[arg(long)]
    goal: Option<f64>,
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

pub fn run(args: RingArgs, config_path: Option<&Path>) -> CmdResult {
    let goal = match args.goal {
        Some(ml) => DailyGoal::new(ml)?,
        None => load_config(config_path)?.intake.daily_goal,
    };

    let mut store = IntakeStore::new();
    for (category, amount) in [
        (Category::Drink, args.drink),
        (Category::Coffee, args.coffee),
        (Category::Water, args.water),
        (Category::Soup, args.soup),
    ] {
        if amount != 0.0 && !store.add(category, amount).is_applied() {
            return Err(format!("invalid amount for {category}: {amount}").into());
        }
    }

    let ring = ProgressRing::compute(&store.snapshot(), goal);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&ring)?);
    } else {
        print!("{}", render(&ring));
    }
    Ok(())
}

/// Human-readable ring: header plus one line per category.
pub fn render(ring: &ProgressRing) -> String {
    let mut out = format!("{}\n", ring.summary());
    for (segment, label) in ring.segments.iter().zip(&ring.labels) {
        out.push_str(&format!(
            "  {:<7} {:>6.1}° -> {:>6.1}°  {:>3}%\n",
            segment.category.to_string(),
            segment.start_angle,
            segment.end_angle,
            label.percent
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_lists_every_category() {
        let mut store = IntakeStore::new();
        let _ = store.add(Category::Water, 500.0);
        let ring = ProgressRing::compute(&store.snapshot(), DailyGoal::default());
        let text = render(&ring);
        assert!(text.starts_with("500 / 3000 ml\n"));
        assert_eq!(text.lines().count(), 5);
        assert!(text.contains("water"));
        assert!(text.contains(" 17%"));
    }
}
