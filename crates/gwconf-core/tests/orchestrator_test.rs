//! End-to-end edit sessions against the in-memory stores.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use gwconf_core::orchestrator::SAVED_NOTICE;
use gwconf_core::{
    ActiveEditor, CoreError, DynamicService, EditMode, EditOrchestrator, GatewayRecord,
    GatewayView, MemoryEnodebStore, MemoryGatewayStore, RadioUnitInfo, Section, StoreError,
    StoreOp, Transition,
};
use pretty_assertions::assert_eq;

type Orchestrator = EditOrchestrator<Arc<MemoryGatewayStore>, Arc<MemoryEnodebStore>>;

fn existing() -> GatewayRecord {
    let mut gw = GatewayRecord::template();
    gw.id = "gw1".into();
    gw.name = "Edge".into();
    gw.connected_enodeb_serials = vec!["enb1".into()];
    gw
}

fn setup() -> (Orchestrator, Arc<MemoryGatewayStore>, Arc<MemoryEnodebStore>) {
    let gateways = Arc::new(MemoryGatewayStore::with_records([existing()]));
    let enodebs = Arc::new(MemoryEnodebStore::with_units([
        RadioUnitInfo::new("enb1", "Lobby"),
        RadioUnitInfo::new("enb2", "Roof"),
    ]));
    let orch = EditOrchestrator::new(Arc::clone(&gateways), Arc::clone(&enodebs));
    (orch, gateways, enodebs)
}

fn identity(orch: &mut Orchestrator) -> &mut gwconf_core::IdentityEditor {
    match orch.editor_mut() {
        Some(ActiveEditor::Identity(editor)) => editor,
        other => panic!("expected identity editor, got {other:?}"),
    }
}

// ── Add flow ────────────────────────────────────────────────────────

#[tokio::test]
async fn add_flow_walks_all_sections_then_closes() {
    let (mut orch, gateways, _) = setup();
    orch.open(EditMode::AddNew, None).await.unwrap();

    let editor = identity(&mut orch);
    editor.set_id("gwnew").unwrap();
    editor.set_name("New gateway");
    assert_eq!(
        orch.save().await.unwrap(),
        Transition::Advance(Section::Aggregation)
    );
    assert_eq!(orch.tab_index(), 1);
    assert_eq!(orch.draft().unwrap().id, "gwnew");

    let Some(ActiveEditor::Aggregation(editor)) = orch.editor_mut() else {
        panic!("expected aggregation editor");
    };
    editor.set_event_aggregation(true);
    assert_eq!(orch.save().await.unwrap(), Transition::Advance(Section::Epc));

    let Some(ActiveEditor::Epc(editor)) = orch.editor_mut() else {
        panic!("expected epc editor");
    };
    editor.set_dns_primary("8.8.8.8");
    assert_eq!(orch.save().await.unwrap(), Transition::Advance(Section::Ran));

    let Some(ActiveEditor::Ran(editor)) = orch.editor_mut() else {
        panic!("expected ran editor");
    };
    assert_eq!(editor.available(), ["enb1", "enb2"]);
    editor.set_serials(["enb2"]);
    assert_eq!(orch.save().await.unwrap(), Transition::Close);

    assert!(!orch.is_open());
    assert_eq!(orch.tab_index(), 0);
    assert!(orch.draft().is_none());

    let stored = gateways.get("gwnew").unwrap();
    assert_eq!(stored.name, "New gateway");
    assert!(stored.magmad.has_service(DynamicService::Eventd));
    assert_eq!(stored.cellular.epc.dns_primary.as_deref(), Some("8.8.8.8"));
    assert_eq!(stored.connected_enodeb_serials, vec!["enb2"]);

    let journal = gateways.journal();
    assert_eq!(journal.len(), 4);
    assert!(journal[0].is_write());
    assert!(journal[1..].iter().all(|op| !op.is_write()));
    assert!(journal.iter().all(|op| op.id() == "gwnew"));

    let notices = orch.take_notices();
    assert_eq!(notices.len(), 4);
    assert!(notices.iter().all(|n| n.message == SAVED_NOTICE));
    assert!(orch.take_notices().is_empty());
}

#[tokio::test]
async fn cancel_after_identity_keeps_the_write_but_drops_the_draft() {
    let (mut orch, gateways, _) = setup();
    orch.open(EditMode::AddNew, None).await.unwrap();
    identity(&mut orch).set_id("gwnew").unwrap();
    orch.save().await.unwrap();

    assert_eq!(orch.current_section(), Some(Section::Aggregation));
    assert_eq!(orch.draft().unwrap().id, "gwnew");

    orch.cancel();

    assert!(!orch.is_open());
    assert!(orch.draft().is_none());
    assert!(gateways.get("gwnew").is_some());
    assert_eq!(gateways.journal(), vec![StoreOp::Write { id: "gwnew".into() }]);
}

#[tokio::test]
async fn duplicate_identifier_stays_on_identity() {
    let (mut orch, gateways, _) = setup();
    orch.open(EditMode::AddNew, None).await.unwrap();
    identity(&mut orch).set_id("gw1").unwrap();

    let err = orch.save().await.unwrap_err();

    assert_eq!(err, CoreError::GatewayExists { id: "gw1".into() });
    assert_eq!(orch.current_section(), Some(Section::Identity));
    assert_eq!(
        orch.editor().unwrap().error(),
        Some("Gateway gw1 already exists")
    );
    assert!(orch.draft().is_none());
    assert!(gateways.journal().is_empty());
    assert!(orch.take_notices().is_empty());
}

#[tokio::test]
async fn navigating_back_reuses_draft_and_allows_same_id() {
    let (mut orch, gateways, _) = setup();
    orch.open(EditMode::AddNew, None).await.unwrap();
    identity(&mut orch).set_id("gwnew").unwrap();
    orch.save().await.unwrap();

    assert!(orch.is_selectable(Section::Identity));
    assert!(orch.is_selectable(Section::Aggregation));
    assert!(!orch.is_selectable(Section::Epc));

    orch.select(Section::Identity).unwrap();
    let editor = identity(&mut orch);
    assert_eq!(editor.id(), "gwnew");
    editor.set_description("second pass");

    assert_eq!(
        orch.save().await.unwrap(),
        Transition::Advance(Section::Aggregation)
    );
    assert_eq!(gateways.get("gwnew").unwrap().description, "second pass");
}

#[tokio::test]
async fn identifier_is_fixed_after_first_identity_save() {
    let (mut orch, gateways, _) = setup();
    orch.open(EditMode::AddNew, None).await.unwrap();
    identity(&mut orch).set_id("gwnew").unwrap();
    orch.save().await.unwrap();

    orch.select(Section::Identity).unwrap();
    let editor = identity(&mut orch);
    assert!(!editor.id_editable());
    assert!(editor.set_id("gwother").unwrap_err().is_validation());
    assert_eq!(editor.id(), "gwnew");

    assert_eq!(
        orch.save().await.unwrap(),
        Transition::Advance(Section::Aggregation)
    );
    assert!(gateways.get("gwother").is_none());
    assert_eq!(gateways.len(), 2);
    assert_eq!(orch.draft().unwrap().id, "gwnew");
    assert!(gateways.journal().iter().all(|op| op.id() == "gwnew"));
}

#[tokio::test]
async fn instance_is_reusable_after_close() {
    let (mut orch, _, _) = setup();
    orch.open(EditMode::AddNew, None).await.unwrap();
    identity(&mut orch).set_id("gwnew").unwrap();
    orch.save().await.unwrap();
    orch.cancel();

    orch.open(EditMode::SingleSection(Section::Epc), Some(existing()))
        .await
        .unwrap();
    assert_eq!(orch.current_section(), Some(Section::Epc));
    assert!(orch.draft().is_none());
    assert_eq!(orch.base().unwrap().id, "gw1");
}

// ── Single-section flow ─────────────────────────────────────────────

#[tokio::test]
async fn single_section_save_closes_and_patches_one_slice() {
    let (mut orch, gateways, _) = setup();
    orch.open_gateway("gw1", EditMode::SingleSection(Section::Aggregation))
        .await
        .unwrap();

    assert!(!orch.is_selectable(Section::Identity));
    assert_eq!(
        orch.select(Section::Ran),
        Err(CoreError::SectionLocked {
            section: Section::Ran
        })
    );

    let Some(ActiveEditor::Aggregation(editor)) = orch.editor_mut() else {
        panic!("expected aggregation editor");
    };
    editor.set_log_aggregation(true);
    assert_eq!(orch.save().await.unwrap(), Transition::Close);

    let stored = gateways.get("gw1").unwrap();
    assert!(stored.magmad.logging.is_some());
    assert_eq!(stored.connected_enodeb_serials, vec!["enb1"]);

    let journal = gateways.journal();
    let [StoreOp::Patch { patch, .. }] = journal.as_slice() else {
        panic!("expected one patch, got {journal:?}");
    };
    assert_eq!(patch.slices(), vec!["magmad"]);
}

#[tokio::test]
async fn identity_in_single_section_mode_keeps_id_fixed() {
    let (mut orch, gateways, _) = setup();
    orch.open_gateway("gw1", EditMode::SingleSection(Section::Identity))
        .await
        .unwrap();

    let editor = identity(&mut orch);
    assert!(!editor.id_editable());
    assert!(editor.set_id("other").is_err());
    editor.set_name("Renamed");

    assert_eq!(orch.save().await.unwrap(), Transition::Close);
    assert_eq!(gateways.get("gw1").unwrap().name, "Renamed");
    assert_eq!(gateways.journal(), vec![StoreOp::Write { id: "gw1".into() }]);
}

#[tokio::test]
async fn failed_save_keeps_state_and_allows_resubmit() {
    let (mut orch, gateways, _) = setup();
    orch.open_gateway("gw1", EditMode::SingleSection(Section::Ran))
        .await
        .unwrap();
    gateways.fail_next(StoreError::rejected(400, "pci collides with neighbour"));

    let err = orch.save().await.unwrap_err();
    assert_eq!(err.inline_message(), "pci collides with neighbour");
    assert!(orch.is_open());
    assert_eq!(orch.current_section(), Some(Section::Ran));
    assert_eq!(
        orch.editor().unwrap().error(),
        Some("pci collides with neighbour")
    );
    assert!(orch.take_notices().is_empty());

    assert_eq!(orch.save().await.unwrap(), Transition::Close);
    assert_eq!(orch.take_notices().len(), 1);
}

// ── Display after edit ──────────────────────────────────────────────

#[tokio::test]
async fn view_reflects_saved_changes() {
    let (mut orch, gateways, enodebs) = setup();
    orch.open_gateway("gw1", EditMode::SingleSection(Section::Ran))
        .await
        .unwrap();
    let Some(ActiveEditor::Ran(editor)) = orch.editor_mut() else {
        panic!("expected ran editor");
    };
    editor.set_serials(["enb1", "enb2"]);
    editor.set_pci("17");
    orch.save().await.unwrap();

    let view = GatewayView::load(&gateways, &enodebs, "gw1").await.unwrap();
    assert_eq!(view.ran.cell("PCI").unwrap().value, "17");
    let registered = view.ran.cell("Registered eNodeBs").unwrap();
    assert_eq!(registered.value, "2");
    assert_eq!(registered.nested.as_ref().unwrap().rows.len(), 2);

    let missing = GatewayView::load(&gateways, &enodebs, "nope").await;
    assert_eq!(
        missing.unwrap_err(),
        CoreError::GatewayNotFound { id: "nope".into() }
    );
}
