use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::config::ViewTab;
use crate::domain::CategoryFilter;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "list",
            "Show transactions, newest first",
            "list [All|<category>]",
            cmd_list,
        )
        .with_aliases(&["ls"]),
        CommandEntry::new(
            "filter",
            "Choose which category the list shows",
            "filter <All|Food|Rent|Travel|Shopping|Other>",
            cmd_filter,
        ),
        CommandEntry::new("chart", "Show expenses by category", "chart", cmd_chart),
        CommandEntry::new("stats", "Show income, expense, and balance totals", "stats", cmd_stats)
            .with_aliases(&["statistics"]),
        CommandEntry::new(
            "view",
            "Switch the view shown after each change",
            "view <list|chart|stats>",
            cmd_view,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(value) = args.first() {
        context.filter = value.parse::<CategoryFilter>()?;
    }
    context.show_view(ViewTab::List);
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let value = match args {
        [value] => *value,
        [] => {
            io::print_info(format!("Current filter: {}", context.filter));
            return Ok(());
        }
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: filter <All|Food|Rent|Travel|Shopping|Other>".into(),
            ))
        }
    };
    context.filter = value.parse::<CategoryFilter>()?;
    context.show_view(ViewTab::List);
    Ok(())
}

fn cmd_chart(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show_view(ViewTab::Chart);
    Ok(())
}

fn cmd_stats(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.show_view(ViewTab::Stats);
    Ok(())
}

fn cmd_view(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [value] => {
            let view = value.parse::<ViewTab>()?;
            context.show_view(view);
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: view <list|chart|stats>".into(),
        )),
    }
}
