use colored::Colorize;

use crate::cli::context::{usage_error, CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::core::{services::BudgetStatus, Command};
use crate::domain::MonthKey;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "month",
            "Show or switch the month being edited",
            "month [YYYY-MM]",
            cmd_month,
        ),
        CommandEntry::new(
            "this-month",
            "Switch to the current calendar month",
            "this-month",
            cmd_this_month,
        ),
        CommandEntry::new(
            "months",
            "List every month that has been opened",
            "months",
            cmd_months,
        ),
        CommandEntry::new(
            "show",
            "Show the matrix and budget bar of the month",
            "show",
            cmd_show,
        ),
        CommandEntry::new(
            "budget",
            "Show or set the month's budget; non-numeric input clears it",
            "budget [amount]",
            cmd_budget,
        ),
        CommandEntry::new(
            "clear-month",
            "Delete every wish and the budget of the month",
            "clear-month",
            cmd_clear_month,
        ),
    ]
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let Some(raw) = args.first() else {
        output::info(format!("Editing {}", context.session.month()));
        return Ok(());
    };
    let month = MonthKey::parse_or_current(raw)
        .map_err(|err| CommandError::InvalidArguments(err.to_string()))?;
    switch_to(context, Command::SelectMonth(month))
}

fn cmd_this_month(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    switch_to(context, Command::ThisMonth)
}

fn switch_to(context: &mut ShellContext, command: Command) -> CommandResult {
    context.run(command)?;
    let count = context.session.items().len();
    output::success(format!(
        "Editing {} ({} wish(es))",
        context.session.month(),
        count
    ));
    Ok(())
}

fn cmd_months(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let style = context.style();
    let store = context.session.store();
    output::section("Months");
    for month in store.month_keys() {
        output::info(render::month_line(
            &month,
            store.items(&month).len(),
            store.get_budget(&month),
            &month == context.session.month(),
            &style,
        ));
    }
    Ok(())
}

fn cmd_show(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let style = context.style();
    output::section(context.session.month());
    for line in render::matrix_lines(&context.session.view(), &style) {
        output::info(line);
    }

    let progress = context.session.progress();
    output::info("");
    output::info(render::budget_summary(&progress, &style));
    if progress.budget.is_some() {
        let bar = render::budget_bar(&progress);
        output::info(if progress.over {
            bar.bright_red().to_string()
        } else {
            bar
        });
    }
    let note = progress.note(&style);
    match progress.status {
        BudgetStatus::Over { .. } => output::info(note.bright_red().bold()),
        BudgetStatus::Within { .. } => output::info(note.green()),
        BudgetStatus::Unset => output::hint(note),
    }
    Ok(())
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() {
        let style = context.style();
        match context.session.store().get_budget(context.session.month()) {
            Some(budget) => output::info(format!(
                "Budget for {}: {}",
                context.session.month(),
                style.format_with_suffix(i64::try_from(budget).unwrap_or(i64::MAX))
            )),
            None => output::info(format!("No budget set for {}", context.session.month())),
        }
        return Ok(());
    }

    context.run(Command::SetBudgetText(args.join(" ")))?;
    let style = context.style();
    match context.session.store().get_budget(context.session.month()) {
        Some(budget) => output::success(format!(
            "Budget for {} set to {}",
            context.session.month(),
            style.format_with_suffix(i64::try_from(budget).unwrap_or(i64::MAX))
        )),
        None => output::info(format!("Budget for {} cleared", context.session.month())),
    }
    Ok(())
}

fn cmd_clear_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage_error("clear-month"));
    }
    context.run(Command::ClearMonth)?;
    output::success(format!("Cleared {}", context.session.month()));
    Ok(())
}
