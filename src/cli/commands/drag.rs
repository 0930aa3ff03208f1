use crate::cli::context::{usage_error, CommandResult, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::{Command, CommandOutcome, DragEvent, DropIgnored, DropOutcome};

const DROP_USAGE: &str = "drop <IU|I|U|N> [id]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("drag", "Pick up a wish", "drag <id>", cmd_drag),
        CommandEntry::new(
            "over",
            "Hover the dragged wish over a quadrant",
            "over <IU|I|U|N>",
            cmd_over,
        ),
        CommandEntry::new("leave", "Move off the hovered quadrant", "leave", cmd_leave),
        CommandEntry::new(
            "drop",
            "Drop onto a quadrant; an explicit id overrides the dragged wish",
            DROP_USAGE,
            cmd_drop,
        ),
        CommandEntry::new(
            "cancel-drag",
            "Abandon the drag without moving anything",
            "cancel-drag",
            cmd_cancel_drag,
        ),
    ]
}

fn cmd_drag(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let &[id] = args else {
        return Err(usage_error("drag <id>"));
    };
    let item = context.resolve_id(id)?;
    context.run(Command::Drag(DragEvent::Start { item: item.clone() }))?;
    output::info(format!(
        "Dragging {}. Use `over`, `drop` or `cancel-drag`.",
        context.label(&item)
    ));
    Ok(())
}

fn cmd_over(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let &[target] = args else {
        return Err(usage_error("over <IU|I|U|N>"));
    };
    if !context.session.drag().is_dragging() {
        output::warning("Nothing is being dragged.");
        return Ok(());
    }
    context.run(Command::Drag(DragEvent::Over {
        target: target.to_string(),
    }))?;
    match context.session.drag().hover_target() {
        Some(quad) => output::info(format!("Over {}", quad.label())),
        None => output::warning(format!("`{}` is not a drop target", target)),
    }
    Ok(())
}

fn cmd_leave(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.run(Command::Drag(DragEvent::Leave))?;
    Ok(())
}

/// The payload is resolved like any id when possible; otherwise it is passed
/// through untouched and the store decides.
fn cmd_drop(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (target, payload) = match args {
        &[target] => (target, None),
        &[target, payload] => {
            let resolved = context
                .resolve_id(payload)
                .map(|id| id.as_str().to_string())
                .unwrap_or_else(|_| payload.to_string());
            (target, Some(resolved))
        }
        _ => return Err(usage_error(DROP_USAGE)),
    };
    let outcome = context.run(Command::Drag(DragEvent::Drop {
        target: target.to_string(),
        payload,
    }))?;
    match outcome {
        CommandOutcome::Drag(Some(DropOutcome::Moved { item, .. })) => {
            output::success(format!("Moved {}", context.label(&item)))
        }
        CommandOutcome::Drag(Some(DropOutcome::Ignored(DropIgnored::NoItem))) => {
            output::warning("Nothing is being dragged.")
        }
        _ => output::warning(format!("Drop on `{}` was ignored.", target)),
    }
    Ok(())
}

fn cmd_cancel_drag(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let was_dragging = context.session.drag().is_dragging();
    context.run(Command::Drag(DragEvent::End))?;
    if was_dragging {
        output::info("Drag cancelled.");
    }
    Ok(())
}
