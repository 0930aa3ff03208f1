use crate::cli::context::{usage_error, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::cli::render;
use crate::core::{Command, CommandOutcome};
use crate::currency::parse_int;
use crate::domain::{ItemDraft, Quadrant};
use crate::errors::ValidationError;

const ADD_USAGE: &str = "add <name> <price> <IU|I|U|N>";
const EDIT_USAGE: &str = "edit <id> <name> <price> <IU|I|U|N>";
const MOVE_USAGE: &str = "move <id> <IU|I|U|N>";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Add a wish to the month", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "edit",
            "Replace the name, price and quadrant of a wish",
            EDIT_USAGE,
            cmd_edit,
        ),
        CommandEntry::new("delete", "Delete one wish", "delete <id>", cmd_delete),
        CommandEntry::new(
            "select",
            "Mark a wish for purchase",
            "select <id>",
            cmd_select,
        ),
        CommandEntry::new(
            "unselect",
            "Unmark a wish",
            "unselect <id>",
            cmd_unselect,
        ),
        CommandEntry::new(
            "clear-selected",
            "Unmark every wish of the month",
            "clear-selected",
            cmd_clear_selected,
        ),
        CommandEntry::new(
            "delete-selected",
            "Delete every marked wish of the month",
            "delete-selected",
            cmd_delete_selected,
        ),
        CommandEntry::new(
            "move",
            "Move a wish to another quadrant",
            MOVE_USAGE,
            cmd_move,
        ),
    ]
}

/// Price text goes through the lenient integer parser; name is still checked
/// first so the reported error matches the field order.
fn parse_draft(name: &str, price: &str, quad: &str) -> Result<ItemDraft, ValidationError> {
    match parse_int(price) {
        Some(price) => Ok(ItemDraft::new(name, price, quad)),
        None if name.trim().is_empty() => Err(ValidationError::EmptyName),
        None => Err(ValidationError::InvalidPrice),
    }
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let &[name, price, quad] = args else {
        return Err(usage_error(ADD_USAGE));
    };
    let draft = parse_draft(name, price, quad)?;
    let valid = draft.validate()?;
    let outcome = context.run(Command::AddItem {
        name: draft.name,
        price: draft.price,
        quad: valid.quad,
    })?;
    if let CommandOutcome::Added(item) = outcome {
        output::success(format!(
            "Added `{}` to {} as {}",
            item.name,
            item.quad.label(),
            render::short_id(&item.id)
        ));
    }
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let &[id, name, price, quad] = args else {
        return Err(usage_error(EDIT_USAGE));
    };
    let id = context.resolve_id(id)?;
    let draft = parse_draft(name, price, quad)?;
    let outcome = context.run(Command::EditItem { id, draft })?;
    if let CommandOutcome::Edited(item) = outcome {
        output::success(format!(
            "Updated `{}` ({}, {})",
            item.name,
            context.style().format_with_suffix(amount(item.price)),
            item.quad.label()
        ));
    }
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let &[id] = args else {
        return Err(usage_error("delete <id>"));
    };
    let id = context.resolve_id(id)?;
    let label = context.label(&id);
    context.run(Command::DeleteItem { id })?;
    output::success(format!("Deleted {}", label));
    Ok(())
}

fn cmd_select(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    toggle(context, args, true, "select <id>")
}

fn cmd_unselect(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    toggle(context, args, false, "unselect <id>")
}

fn toggle(context: &mut ShellContext, args: &[&str], value: bool, usage: &str) -> CommandResult {
    let &[id] = args else {
        return Err(usage_error(usage));
    };
    let id = context.resolve_id(id)?;
    context.run(Command::ToggleSelected {
        id: id.clone(),
        value,
    })?;
    let progress = context.session.progress();
    output::success(format!(
        "{} {}; selected total {}",
        if value { "Selected" } else { "Unselected" },
        render::short_id(&id),
        context
            .style()
            .format_with_suffix(amount(progress.selected_sum))
    ));
    Ok(())
}

fn cmd_clear_selected(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.run(Command::ClearSelected)?;
    output::success("Selection cleared");
    Ok(())
}

fn cmd_delete_selected(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if let CommandOutcome::SelectedDeleted(count) = context.run(Command::DeleteSelected)? {
        output::success(format!("Deleted {} selected wish(es)", count));
    }
    Ok(())
}

fn cmd_move(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let &[id, quad] = args else {
        return Err(usage_error(MOVE_USAGE));
    };
    let id = context.resolve_id(id)?;
    let target = Quadrant::parse_input(quad)?;
    context.run(Command::ReassignQuadrant {
        id: id.clone(),
        quad: target.tag().to_string(),
    })?;
    output::success(format!("Moved {} to {}", context.label(&id), target.label()));
    Ok(())
}

fn amount(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
