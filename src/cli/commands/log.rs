use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use ansi_term::Colour;

const OP_WIDTH: usize = 60;

fn color_for_operation(op: &str) -> Colour {
    match op {
        "clock" | "org" | "staff" => Colour::Green,
        "submit" | "register" => Colour::Cyan,
        "approve" => Colour::Green,
        "reject" | "revoke" => Colour::Red,
        "export" => Colour::Blue,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51),
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut t: String = s.chars().take(max - 3).collect();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if !matches!(cmd, Commands::Log { print: true }) {
        return Ok(());
    }

    let pool = DbPool::new(&cfg.database)?;
    let entries = load_log(&pool.conn)?;

    if entries.is_empty() {
        info("The internal log is empty.");
        return Ok(());
    }

    let id_w = entries
        .iter()
        .map(|e| e.id.to_string().len())
        .max()
        .unwrap_or(1);

    println!("📜 Internal log:\n");

    for e in &entries {
        let date = chrono::DateTime::parse_from_rfc3339(&e.date)
            .map(|dt| dt.format("%FT%T%:z").to_string())
            .unwrap_or_else(|_| e.date.clone());

        // only the operation word is colored; width is measured on plain text
        let rest = if e.target.is_empty() {
            String::new()
        } else {
            format!(" ({})", e.target)
        };
        let plain = truncate(&format!("{}{rest}", e.operation), OP_WIDTH);
        let (op, tail) = plain.split_at(e.operation.len().min(plain.len()));
        let padding = " ".repeat(OP_WIDTH.saturating_sub(plain.chars().count()));

        println!(
            "{:>id_w$}: {} | {}{}{} => {}",
            e.id,
            date,
            color_for_operation(&e.operation).paint(op),
            tail,
            padding,
            e.message,
            id_w = id_w
        );
    }

    Ok(())
}
