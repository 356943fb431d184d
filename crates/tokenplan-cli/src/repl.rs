//! Line-oriented editing loop over a `PlannerSession`.
//!
//! Bad input is reported and the loop continues; only I/O failures end it.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{anyhow, bail};
use chrono::NaiveDate;
use tokenplan_presets::save_configuration;
use tokenplan_session::{EditField, EditStatus, PlannerSession};
use tracing::debug;

use crate::render;

const HELP: &str = "\
commands:
  show [metrics|schedule|allocation]   print the current plan (default: metrics + allocation)
  set <category> <field> <value>       field = percentage | tge | cliff | duration
  expand <category>                    toggle the detail panel of a category
  grid on|off                          schedule grid lines
  legend on|off                        schedule legend
  supply <tokens>                      total supply
  price <usd>                          initial token price
  tge-date <YYYY-MM-DD|none>           label months with dates
  save <path>                          write the configuration as JSON
  quit
";

/// What the loop should do after a command.
enum Flow {
    Continue,
    Quit,
}

pub fn run<R: BufRead, W: Write>(
    mut session: PlannerSession,
    input: R,
    mut output: W,
) -> anyhow::Result<()> {
    writeln!(output, "tokenplan interactive, type `help` for commands")?;
    write!(output, "{}", render::metrics_panel(&session.view()))?;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match execute(&mut session, line) {
            Ok((Flow::Quit, _)) => break,
            Ok((Flow::Continue, text)) => write!(output, "{text}")?,
            Err(e) => writeln!(output, "error: {e}")?,
        }
        output.flush()?;
    }
    Ok(())
}

fn execute(session: &mut PlannerSession, line: &str) -> anyhow::Result<(Flow, String)> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some(command) = words.first() else {
        return Ok((Flow::Continue, String::new()));
    };
    debug!(command, "repl command");

    let text = match words.as_slice() {
        ["quit"] | ["exit"] => return Ok((Flow::Quit, String::new())),
        ["help"] => HELP.to_string(),

        ["show"] => {
            let view = session.view();
            format!(
                "{}{}",
                render::metrics_panel(&view),
                render::allocation_table(&view)
            )
        }
        ["show", "metrics"] => render::metrics_panel(&session.view()),
        ["show", "schedule"] => render::schedule_table(&session.view()),
        ["show", "allocation"] => render::allocation_table(&session.view()),

        ["set", category, field, value] => {
            let field: EditField = field.parse().map_err(|e: String| anyhow!(e))?;
            let value = parse_number(value)?;
            match session.set_field(category, field, value)? {
                EditStatus::Applied => render::metrics_panel(&session.view()),
                EditStatus::Rejected => format!(
                    "unchanged: total allocation would exceed 100% (now {:.2}%)\n",
                    session.config().total_percentage()
                ),
            }
        }

        ["expand", category] => {
            session.toggle_category(category)?;
            render::allocation_table(&session.view())
        }

        ["grid", state] => {
            session.set_show_grid(parse_switch(state)?);
            String::new()
        }
        ["legend", state] => {
            session.set_show_legend(parse_switch(state)?);
            String::new()
        }

        ["supply", value] => {
            session.set_total_supply(parse_number(value)?);
            render::metrics_panel(&session.view())
        }
        ["price", value] => {
            session.set_token_price(parse_number(value)?);
            render::metrics_panel(&session.view())
        }
        ["tge-date", "none"] => {
            session.set_tge_date(None);
            String::new()
        }
        ["tge-date", date] => {
            let date: NaiveDate = date.parse()?;
            session.set_tge_date(Some(date));
            String::new()
        }

        ["save", path] => {
            let path = PathBuf::from(*path);
            save_configuration(&path, session.config())?;
            format!("saved to {}\n", path.display())
        }

        _ => bail!("unrecognised command `{line}` (try `help`)"),
    };
    Ok((Flow::Continue, text))
}

/// Empty input counts as zero, as a cleared number field does.
fn parse_number(raw: &str) -> anyhow::Result<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(0.0);
    }
    raw.replace('_', "")
        .replace(',', "")
        .parse::<f64>()
        .map_err(|_| anyhow!("`{raw}` is not a number"))
}

fn parse_switch(raw: &str) -> anyhow::Result<bool> {
    match raw {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        other => bail!("expected on or off, got `{other}`"),
    }
}
