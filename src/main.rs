//! Tagbind - Entry Point
//!
//! Loads a template document, then drives an editing session from stdin:
//! spawn entities, register them as targets, pick interactions by mask,
//! and apply the template in one undoable batch.

use tagbind::command::{Command, CommandExecutor, Session};
use tagbind::core::error::Result;
use tagbind::engine::progress::TracingProgress;
use tagbind::engine::readiness::MeshReadChecker;
use tagbind::handler::{HandlerCatalog, HandlerKind};
use tagbind::template::document::TemplateDocument;
use tagbind::updater::check::run_startup_check;

use std::io::{self, Write};
use std::path::Path;
use tokio::runtime::Runtime;

fn main() -> Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter("tagbind=info")
        .init();

    tracing::info!("Tagbind starting...");

    let rt = Runtime::new()?;

    // Silent once-per-session update check in the background
    let manifest_path = Path::new("package.json");
    if manifest_path.exists() {
        rt.spawn(run_startup_check(manifest_path));
    }

    // Load the template document named on the command line
    let document_path = std::env::args().nth(1).unwrap_or_else(|| "template.toml".into());
    let document = TemplateDocument::load_path(Path::new(&document_path))?;

    // The CLI has no compiled handler types of its own; every handler the
    // document references is registered as an attachable behavior.
    let mut handlers = HandlerCatalog::new();
    for entry in &document.entries {
        for key in &entry.handler_refs {
            handlers.register(key.clone(), HandlerKind::Behavior);
        }
    }

    let mut session = Session::from_document(document, handlers)?;
    let checker = MeshReadChecker;
    let mut progress = TracingProgress;

    println!("\n=== TAGBIND ===");
    println!("Template: {} ({} tags, {} entries)", document_path,
        session.catalog.len(),
        session.store.as_ref().map_or(0, |s| s.len()));
    println!();
    println!("Commands:");
    println!("  spawn <name>       - Spawn an entity and register it as a target");
    println!("  remove <i>         - Remove target i");
    println!("  select <i> <mask>  - Set target i's interaction mask (bits index the catalog)");
    println!("  tags               - List catalog tags with their bit positions");
    println!("  targets            - Show registered targets");
    println!("  conflicts          - Show duplicate tag assignments in the template");
    println!("  apply              - Apply the template to all targets");
    println!("  undo               - Roll back the last apply as one group");
    println!("  quit / q           - Exit");
    println!();

    let conflicts = session.conflicts();
    if !conflicts.is_empty() {
        for index in &conflicts {
            if let Some(entry) = session.store.as_ref().and_then(|s| s.entries().get(*index)) {
                tracing::warn!("Entry {} duplicates tag '{}'", index, entry.tag);
            }
        }
    }

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;
        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input == "quit" || input == "q" {
            break;
        }

        if input == "tags" {
            for (i, tag) in session.catalog.tags().iter().enumerate() {
                println!("  bit {} ({:#b}): {}", i, 1u64 << i, tag);
            }
            continue;
        }

        if input == "targets" {
            if session.registry.is_empty() {
                println!("No targets registered.");
                continue;
            }
            for (i, target) in session.registry.targets().iter().enumerate() {
                let name = session
                    .scene
                    .get(target.entity)
                    .map(|e| e.name.as_str())
                    .unwrap_or("<gone>");
                let mut tags: Vec<&str> =
                    target.resolved_tags().iter().map(String::as_str).collect();
                tags.sort_unstable();
                println!(
                    "  [{}] {} mask={:#b} tags=[{}] handlers={}",
                    i,
                    name,
                    target.selection,
                    tags.join(", "),
                    session
                        .scene
                        .get(target.entity)
                        .map_or(0, |e| e.handlers().len())
                );
            }
            continue;
        }

        if input == "conflicts" {
            let conflicts = session.conflicts();
            if conflicts.is_empty() {
                println!("No duplicate tag assignments.");
            } else {
                for index in conflicts {
                    if let Some(entry) =
                        session.store.as_ref().and_then(|s| s.entries().get(index))
                    {
                        println!("  Entry {} duplicates tag '{}'", index, entry.tag);
                    }
                }
            }
            continue;
        }

        if let Some(name) = input.strip_prefix("spawn ") {
            if name.is_empty() {
                println!("Usage: spawn <name>");
                continue;
            }
            let id = session.scene.spawn(name);
            run_command(&mut session, Command::AddTarget(id), &checker, &mut progress);
            continue;
        }

        if let Some(rest) = input.strip_prefix("remove ") {
            match rest.parse::<usize>() {
                Ok(index) => {
                    run_command(&mut session, Command::RemoveTarget(index), &checker, &mut progress)
                }
                Err(_) => println!("Usage: remove <index>"),
            }
            continue;
        }

        if let Some(rest) = input.strip_prefix("select ") {
            let mut parts = rest.split_whitespace();
            let parsed = (
                parts.next().and_then(|s| s.parse::<usize>().ok()),
                parts.next().and_then(|s| parse_mask(s)),
            );
            match parsed {
                (Some(index), Some(mask)) => run_command(
                    &mut session,
                    Command::SetSelection { index, mask },
                    &checker,
                    &mut progress,
                ),
                _ => println!("Usage: select <index> <mask> (mask decimal or 0b/0x prefixed)"),
            }
            continue;
        }

        if input == "apply" {
            run_command(&mut session, Command::ApplyTemplate, &checker, &mut progress);
            continue;
        }

        if input == "undo" {
            run_command(&mut session, Command::Undo, &checker, &mut progress);
            continue;
        }

        println!("Unknown command. Try: spawn, remove, select, tags, targets, conflicts, apply, undo, quit");
    }

    println!(
        "\nGoodbye! {} entities in scene, {} batch(es) still undoable.",
        session.scene.entity_count(),
        session.undo_depth()
    );
    Ok(())
}

fn run_command(
    session: &mut Session,
    command: Command,
    checker: &MeshReadChecker,
    progress: &mut TracingProgress,
) {
    match CommandExecutor::execute(session, command, checker, progress) {
        Ok(result) => println!("{}", result.message),
        Err(e) => println!("Command failed: {}", e),
    }
}

fn parse_mask(s: &str) -> Option<u64> {
    if let Some(bin) = s.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()
    } else if let Some(hex) = s.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else {
        s.parse().ok()
    }
}
