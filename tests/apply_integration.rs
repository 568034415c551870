//! Batch apply integration tests
//!
//! Exercises the full lifecycle: load a template document, spawn scene
//! entities, register them as targets, select interactions by mask, apply
//! the batch, and roll it back as one group.

use tagbind::command::{Command, CommandExecutor, Session};
use tagbind::engine::apply::{ApplyEngine, WarningKind};
use tagbind::engine::progress::{NullProgress, ProgressSink};
use tagbind::engine::readiness::{MeshReadChecker, NoopChecker};
use tagbind::handler::{HandlerCatalog, HandlerKind};
use tagbind::registry::TargetRegistry;
use tagbind::scene::{MeshResource, Scene};
use tagbind::template::conflict::find_duplicates;
use tagbind::template::document::TemplateDocument;
use tagbind::template::store::HandlerRef;

const TEMPLATE_DOC: &str = r#"
catalog = ["Grab", "Throw", "Pull"]

[[entries]]
tag = "Grab"
use_custom_handler = true
handler_refs = ["grab_handler"]

[[entries]]
tag = "Throw"
use_custom_handler = true
handler_refs = ["throw_handler", "throw_arc_preview"]

[[entries]]
tag = "Pull"
use_custom_handler = false
handler_refs = ["pull_handler"]
"#;

fn registered_handlers() -> HandlerCatalog {
    let mut handlers = HandlerCatalog::new();
    handlers.register("grab_handler", HandlerKind::Behavior);
    handlers.register("throw_handler", HandlerKind::Behavior);
    // Deliberately not a behavior: resolving it must warn, not attach
    handlers.register("throw_arc_preview", HandlerKind::EditorExtension);
    handlers.register("pull_handler", HandlerKind::Behavior);
    handlers
}

fn load_session() -> Session {
    let document = TemplateDocument::from_toml_str(TEMPLATE_DOC).unwrap();
    Session::from_document(document, registered_handlers()).unwrap()
}

struct CountingSink {
    reports: usize,
    closed: bool,
}

impl ProgressSink for CountingSink {
    fn report(&mut self, _current: usize, _total: usize, _message: &str) {
        self.reports += 1;
    }

    fn close(&mut self) {
        self.closed = true;
    }
}

#[test]
fn test_full_apply_lifecycle() {
    let mut session = load_session();

    let crate_id = session.scene.spawn("Crate");
    let barrel_id = session.scene.spawn("Barrel");
    let statue_id = session.scene.spawn("Statue");

    session.registry.add(crate_id);
    session.registry.add(barrel_id);
    session.registry.add(statue_id);

    // Crate: Grab only. Barrel: Grab + Throw. Statue: Pull only (inactive entry).
    session.registry.set_selection(0, 0b001, &session.catalog).unwrap();
    session.registry.set_selection(1, 0b011, &session.catalog).unwrap();
    session.registry.set_selection(2, 0b100, &session.catalog).unwrap();

    let summary = session
        .apply_template(&NoopChecker, &mut NullProgress)
        .unwrap();

    assert_eq!(summary.targets_processed, 3);
    // grab on Crate, grab + throw on Barrel; the Pull entry is inactive and
    // throw_arc_preview is not attachable
    assert_eq!(summary.attached, 3);
    assert_eq!(
        summary
            .warnings
            .iter()
            .filter(|w| w.kind == WarningKind::InvalidHandlerType)
            .count(),
        1
    );

    let handlers = &session.handlers;
    let grab = handlers.resolve(&HandlerRef("grab_handler".into())).unwrap().id;
    let throw = handlers.resolve(&HandlerRef("throw_handler".into())).unwrap().id;
    let pull = handlers.resolve(&HandlerRef("pull_handler".into())).unwrap().id;

    assert!(session.scene.get(crate_id).unwrap().has_handler(grab));
    assert!(!session.scene.get(crate_id).unwrap().has_handler(throw));
    assert!(session.scene.get(barrel_id).unwrap().has_handler(grab));
    assert!(session.scene.get(barrel_id).unwrap().has_handler(throw));
    assert!(!session.scene.get(statue_id).unwrap().has_handler(pull));

    // Second run over the unchanged registry attaches nothing new
    let second = session
        .apply_template(&NoopChecker, &mut NullProgress)
        .unwrap();
    assert_eq!(second.attached, 0);
    assert_eq!(
        second
            .warnings
            .iter()
            .filter(|w| w.kind == WarningKind::DuplicateAttachment)
            .count(),
        3
    );

    // Two batches on the history; roll both back
    assert_eq!(session.undo_depth(), 2);
    assert_eq!(session.undo_last().unwrap(), Some(0));
    assert_eq!(session.undo_last().unwrap(), Some(3));
    assert!(session.scene.get(crate_id).unwrap().handlers().is_empty());
    assert!(session.scene.get(barrel_id).unwrap().handlers().is_empty());
}

#[test]
fn test_empty_registry_never_touches_progress() {
    let mut scene = Scene::new();
    let document = TemplateDocument::from_toml_str(TEMPLATE_DOC).unwrap();
    let (_, store) = document.into_parts().unwrap();
    let registry = TargetRegistry::new();
    let handlers = registered_handlers();

    let mut sink = CountingSink {
        reports: 0,
        closed: false,
    };
    let result = ApplyEngine::apply(
        &mut scene,
        Some(&store),
        &handlers,
        &registry,
        &NoopChecker,
        &mut sink,
    );

    assert!(result.is_err());
    assert_eq!(sink.reports, 0);
    assert!(!sink.closed);
}

#[test]
fn test_duplicate_tag_entries_first_wins() {
    let doc = r#"
catalog = ["Throw"]

[[entries]]
tag = "Throw"
use_custom_handler = true
handler_refs = ["throw_handler"]

[[entries]]
tag = "Grab"
use_custom_handler = false
handler_refs = []

[[entries]]
tag = ""
use_custom_handler = false
handler_refs = []

[[entries]]
tag = "Throw"
use_custom_handler = true
handler_refs = ["throw_alt_handler"]
"#;
    let document = TemplateDocument::from_toml_str(doc).unwrap();
    let (catalog, store) = document.into_parts().unwrap();

    let duplicates = find_duplicates(store.entries());
    assert_eq!(duplicates.into_iter().collect::<Vec<_>>(), vec![3]);
    assert_eq!(
        store.entry_for_tag("Throw").unwrap().handlers[0].key(),
        "throw_handler"
    );

    // Both entries run in store order; with distinct handler types both
    // attach, the first one first.
    let mut handlers = HandlerCatalog::new();
    let primary = handlers.register("throw_handler", HandlerKind::Behavior);
    let alt = handlers.register("throw_alt_handler", HandlerKind::Behavior);

    let mut scene = Scene::new();
    let id = scene.spawn("Spear");
    let mut registry = TargetRegistry::new();
    registry.add(id);
    registry.set_selection(0, 1, &catalog).unwrap();

    let result = ApplyEngine::apply(
        &mut scene,
        Some(&store),
        &handlers,
        &registry,
        &NoopChecker,
        &mut NullProgress,
    )
    .unwrap();

    assert_eq!(result.attached, 2);
    assert_eq!(scene.get(id).unwrap().handlers(), &[primary, alt]);
}

#[test]
fn test_mesh_readiness_preflight_fixes_resource() {
    let mut session = load_session();
    let id = session.scene.spawn_with_resource(
        "Rock",
        MeshResource {
            name: "rock_mesh".into(),
            readable: false,
        },
    );
    session.registry.add(id);
    session.registry.set_selection(0, 0b001, &session.catalog).unwrap();

    let summary = session
        .apply_template(&MeshReadChecker, &mut NullProgress)
        .unwrap();

    assert_eq!(summary.attached, 1);
    assert!(summary.warnings.is_empty());
    assert!(session.scene.get(id).unwrap().resource.as_ref().unwrap().readable);
}

#[test]
fn test_command_surface_drives_the_session() {
    let mut session = load_session();
    let id = session.scene.spawn("Crate");

    CommandExecutor::execute(
        &mut session,
        Command::AddTarget(id),
        &NoopChecker,
        &mut NullProgress,
    )
    .unwrap();
    // Registering the same entity again stays a no-op
    CommandExecutor::execute(
        &mut session,
        Command::AddTarget(id),
        &NoopChecker,
        &mut NullProgress,
    )
    .unwrap();
    assert_eq!(session.registry.len(), 1);

    CommandExecutor::execute(
        &mut session,
        Command::SetSelection { index: 0, mask: 0b011 },
        &NoopChecker,
        &mut NullProgress,
    )
    .unwrap();

    let applied = CommandExecutor::execute(
        &mut session,
        Command::ApplyTemplate,
        &NoopChecker,
        &mut NullProgress,
    )
    .unwrap();
    assert_eq!(applied.attached, 2);

    let undone = CommandExecutor::execute(
        &mut session,
        Command::Undo,
        &NoopChecker,
        &mut NullProgress,
    )
    .unwrap();
    assert!(undone.message.contains("detached 2"));
    assert!(session.scene.get(id).unwrap().handlers().is_empty());
}
