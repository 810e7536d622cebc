use crate::cli::io;
use crate::cli::output::section as output_section;
use crate::cli::registry::{CommandEntry, CommandRegistry};
use crate::domain::Category;

/// Worked example shown under a command's usage line, when it has one.
fn example_for(command: &str) -> Option<&'static str> {
    match command {
        "add" => Some("add \"Weekly groceries\" 5000 Food Expense 2024-03-01"),
        "delete" => Some("delete 2    (row 2 of the last list)  |  delete 3f2a9c1b"),
        "filter" => Some("filter Travel"),
        "config" => Some("config set currency USD"),
        _ => None,
    }
}

fn category_names() -> String {
    Category::ALL
        .iter()
        .map(Category::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn overview_lines(registry: &CommandRegistry) -> Vec<String> {
    let mut lines: Vec<String> = registry
        .list()
        .into_iter()
        .map(|entry| format!("  {:<10} {}", entry.name, entry.description))
        .collect();
    lines.push(format!("Categories: {}", category_names()));
    lines.push("Dates use YYYY-MM-DD. Use `help <command>` for details.".into());
    lines
}

pub fn command_lines(entry: &CommandEntry) -> Vec<String> {
    let mut lines = vec![
        format!("  Description: {}", entry.description),
        format!("  Usage: {}", entry.usage),
    ];
    if !entry.aliases.is_empty() {
        lines.push(format!("  Aliases: {}", entry.aliases.join(", ")));
    }
    if let Some(example) = example_for(entry.name) {
        lines.push(format!("  Example: {}", example));
    }
    lines
}

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for line in overview_lines(registry) {
        io::print_info(line);
    }
}

pub fn print_command(entry: &CommandEntry) {
    output_section(format!("Help: {}", entry.name));
    for line in command_lines(entry) {
        io::print_info(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;

    fn registry() -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);
        registry
    }

    #[test]
    fn overview_lists_commands_and_categories() {
        let lines = overview_lines(&registry());
        assert!(lines.iter().any(|line| line.trim_start().starts_with("add")));
        assert!(lines
            .iter()
            .any(|line| line == "Categories: Food, Rent, Travel, Shopping, Other"));
    }

    #[test]
    fn add_help_includes_an_example() {
        let registry = registry();
        let entry = registry.get("add").unwrap();
        let lines = command_lines(entry);
        assert!(lines.iter().any(|line| line.starts_with("  Example: add")));
    }

    #[test]
    fn alias_resolves_to_command_help() {
        let registry = registry();
        let entry = registry.get("rm").unwrap();
        assert_eq!(entry.name, "delete");
        assert!(command_lines(entry).contains(&"  Aliases: rm".to_string()));
    }
}
