//! Grocery List CLI Entry Point

use grocery_list::commands::{self, CustomItemInput, GroceryListView};
use grocery_list::config::AppConfig;
use grocery_list::pipeline::format_quantity;
use grocery_list::AppState;
use rolling_logger::LoggerConfig;

const USAGE: &str = "usage: grocery-list <command>
  list [weekly|monthly|all] [fresh|frozen|pantry|all]
  check <id>
  qty <id> <quantity>
  add <name> <quantity> <unit> <category> <weekly|monthly> <fresh|frozen|pantry>
  remove <id>
  clear-checked
  reset
  logs";

#[tokio::main]
async fn main() {
    if let Err(e) = run(std::env::args().skip(1).collect()).await {
        // Only fails when logging never came up
        let _ = rolling_logger::error(&e);
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Vec<String>) -> Result<(), String> {
    let config = AppConfig::load().map_err(|e| e.to_string())?;

    let logger_config = LoggerConfig {
        default_filter: config.log_filter.clone(),
        ..LoggerConfig::default()
    };
    match rolling_logger::init_with_config(config.log_dir(), &config.app_name, logger_config) {
        Ok(()) => {
            let _ = rolling_logger::info(&format!("grocery-list {}", args.join(" ")));
        }
        Err(e) => eprintln!("logging disabled: {}", e),
    }

    let state = AppState::init(&config).await.map_err(|e| e.to_string())?;
    let args: Vec<&str> = args.iter().map(String::as_str).collect();

    match args.as_slice() {
        [] | ["list"] => print_list(&commands::get_grocery_list(&state).await?),
        ["list", mode] => {
            commands::set_view_mode(&state, mode).await?;
            print_list(&commands::get_grocery_list(&state).await?);
        }
        ["list", mode, storage] => {
            commands::set_view_mode(&state, mode).await?;
            commands::set_storage_filter(&state, storage).await?;
            print_list(&commands::get_grocery_list(&state).await?);
        }
        ["check", id] => {
            let checked = commands::toggle_item(&state, id).await?;
            println!("{} {}", id, if checked { "checked" } else { "unchecked" });
        }
        ["qty", id, quantity] => {
            let item = commands::update_item_quantity(&state, id, quantity).await?;
            println!("{} now {}", item.name(), format_quantity(item.quantity(), item.unit()));
        }
        ["add", name, quantity, unit, category, frequency, storage] => {
            let item = commands::add_custom_item(
                &state,
                CustomItemInput {
                    name: name.to_string(),
                    quantity: quantity.to_string(),
                    unit: unit.to_string(),
                    category: category.to_string(),
                    purchase_frequency: frequency.to_string(),
                    storage_type: storage.to_string(),
                },
            )
            .await?;
            println!("added {} as {}", item.name(), item.id);
        }
        ["remove", id] => {
            commands::remove_item(&state, id).await?;
            println!("removed {}", id);
        }
        ["clear-checked"] => {
            let removed = commands::clear_checked_items(&state).await?;
            println!("removed {} checked item(s)", removed);
        }
        ["reset"] => {
            commands::reset_items(&state).await?;
            println!("list reset");
        }
        ["logs"] => {
            let lines = rolling_logger::tail_log_file(&config.log_dir(), &config.app_name, 50)
                .map_err(|e| format!("failed to read log: {}", e))?;
            for line in lines {
                println!("{}", line);
            }
        }
        _ => return Err(USAGE.to_string()),
    }

    state.flush().await;
    Ok(())
}

fn print_list(view: &GroceryListView) {
    println!(
        "{} / {}  ({} of {} checked, {}%)",
        view.view_mode,
        view.storage_filter,
        view.progress.checked,
        view.progress.total,
        view.progress.percentage
    );
    for section in &view.sections {
        println!("\n{}", section.label);
        for line in &section.items {
            let mark = if line.item.checked { "x" } else { " " };
            let origin = if line.item.is_custom { " (custom)" } else { "" };
            println!(
                "  [{}] {:<5} {} {}{}",
                mark,
                line.item.id,
                line.item.name(),
                line.display_quantity,
                origin
            );
        }
    }
}
