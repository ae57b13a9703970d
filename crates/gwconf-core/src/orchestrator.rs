// ── Edit orchestrator ──
//
// Tabbed multi-step edit session. Sequences the section editors, carries
// the working draft between steps and decides after each save whether to
// advance or close. One instance is reused across sessions; closing
// drops the draft and resets the tab.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::editor::{
    ActiveEditor, AggregationEditor, EditorMode, EpcEditor, IdentityEditor, RanEditor, Section,
};
use crate::error::CoreError;
use crate::model::{GatewayRecord, RadioUnitInfo};
use crate::store::{EnodebStore, GatewayStore};

/// Text of the notice emitted after every successful save.
pub const SAVED_NOTICE: &str = "Gateway saved successfully";

/// What a session was opened for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    /// Create a gateway, walking all four sections in order.
    AddNew,
    /// Edit one section of an existing gateway, then close.
    SingleSection(Section),
}

impl EditMode {
    pub fn first_section(self) -> Section {
        match self {
            Self::AddNew => Section::FIRST,
            Self::SingleSection(section) => section,
        }
    }
}

/// Outcome of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Advance(Section),
    Close,
}

impl Transition {
    fn after(mode: EditMode, saved: Section) -> Self {
        match mode {
            EditMode::SingleSection(_) => Self::Close,
            EditMode::AddNew => saved.next().map_or(Self::Close, Self::Advance),
        }
    }
}

/// Success notification, drained by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub section: Section,
    pub gateway_id: String,
    pub message: String,
}

#[derive(Debug)]
struct Session {
    mode: EditMode,
    /// Record supplied by the caller at open.
    record: Option<GatewayRecord>,
    /// Result of the most recent successful save in this session.
    draft: Option<GatewayRecord>,
    /// Furthest tab reached in the add flow.
    reached: Section,
    enodebs: BTreeMap<String, RadioUnitInfo>,
    editor: ActiveEditor,
}

impl Session {
    fn base(&self) -> Option<&GatewayRecord> {
        self.draft.as_ref().or(self.record.as_ref())
    }

    fn selectable(&self, section: Section) -> bool {
        match self.mode {
            EditMode::SingleSection(only) => section == only,
            EditMode::AddNew => section <= self.reached,
        }
    }

    fn editor_for(&self, section: Section) -> ActiveEditor {
        build_editor(self.mode, self.base(), &self.enodebs, section)
    }
}

fn build_editor(
    mode: EditMode,
    base: Option<&GatewayRecord>,
    enodebs: &BTreeMap<String, RadioUnitInfo>,
    section: Section,
) -> ActiveEditor {
    match section {
        Section::Identity => {
            // Once the add flow has written a record its id is fixed.
            let created = base.is_some_and(|b| !b.id.is_empty());
            let identity_mode = match mode {
                EditMode::AddNew if !created => EditorMode::Create,
                EditMode::AddNew | EditMode::SingleSection(_) => EditorMode::Update,
            };
            ActiveEditor::Identity(IdentityEditor::new(base, identity_mode))
        }
        Section::Aggregation => ActiveEditor::Aggregation(AggregationEditor::new(base)),
        Section::Epc => ActiveEditor::Epc(EpcEditor::new(base)),
        Section::Ran => ActiveEditor::Ran(RanEditor::new(base, enodebs)),
    }
}

/// Edit orchestrator over injected gateway and enodeb stores.
pub struct EditOrchestrator<G, E> {
    gateways: G,
    enodebs: E,
    session: Option<Session>,
    notices: Vec<Notice>,
}

impl<G: GatewayStore, E: EnodebStore> EditOrchestrator<G, E> {
    pub fn new(gateways: G, enodebs: E) -> Self {
        Self {
            gateways,
            enodebs,
            session: None,
            notices: Vec::new(),
        }
    }

    pub fn gateways(&self) -> &G {
        &self.gateways
    }

    pub fn enodebs(&self) -> &E {
        &self.enodebs
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Open a session over `record`. Single-section sessions need an
    /// existing record; add sessions may start from nothing.
    pub async fn open(
        &mut self,
        mode: EditMode,
        record: Option<GatewayRecord>,
    ) -> Result<(), CoreError> {
        if matches!(mode, EditMode::SingleSection(_)) && record.is_none() {
            return Err(CoreError::validation(
                "gateway",
                "editing a single section needs an existing gateway",
            ));
        }

        let enodebs = self.enodebs.read().await?;
        let first = mode.first_section();
        let editor = build_editor(mode, record.as_ref(), &enodebs, first);
        let session = Session {
            mode,
            record,
            draft: None,
            reached: first,
            enodebs,
            editor,
        };

        info!(
            ?mode,
            gateway = session.record.as_ref().map_or("<new>", |r| r.id.as_str()),
            "edit session opened"
        );
        self.session = Some(session);
        Ok(())
    }

    /// Read `id` from the gateway store and open a session over it.
    pub async fn open_gateway(&mut self, id: &str, mode: EditMode) -> Result<(), CoreError> {
        let record = self
            .gateways
            .read(id)
            .await?
            .ok_or_else(|| CoreError::GatewayNotFound { id: id.to_owned() })?;
        self.open(mode, Some(record)).await
    }

    /// Close the session and discard the draft. Writes already made stay.
    pub fn cancel(&mut self) {
        if self.session.is_some() {
            info!("edit session cancelled");
        }
        self.close();
    }

    fn close(&mut self) {
        self.session = None;
    }

    // ── Navigation ───────────────────────────────────────────────────

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn mode(&self) -> Option<EditMode> {
        self.session.as_ref().map(|s| s.mode)
    }

    pub fn current_section(&self) -> Option<Section> {
        self.session.as_ref().map(|s| s.editor.section())
    }

    /// Current tab index, 0 when closed.
    pub fn tab_index(&self) -> usize {
        self.current_section().map_or(0, Section::index)
    }

    /// Whether `section` can be selected right now.
    pub fn is_selectable(&self, section: Section) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| s.selectable(section))
    }

    /// Switch to `section`, reopening its editor over the current base.
    pub fn select(&mut self, section: Section) -> Result<(), CoreError> {
        let session = self.session.as_mut().ok_or(CoreError::SessionClosed)?;
        if !session.selectable(section) {
            return Err(CoreError::SectionLocked { section });
        }
        debug!(%section, "tab selected");
        session.editor = session.editor_for(section);
        Ok(())
    }

    // ── Editing ──────────────────────────────────────────────────────

    /// The in-session draft, if any save has succeeded yet.
    pub fn draft(&self) -> Option<&GatewayRecord> {
        self.session.as_ref().and_then(|s| s.draft.as_ref())
    }

    /// Base handed to editors: the draft, else the caller's record.
    pub fn base(&self) -> Option<&GatewayRecord> {
        self.session.as_ref().and_then(Session::base)
    }

    pub fn editor(&self) -> Option<&ActiveEditor> {
        self.session.as_ref().map(|s| &s.editor)
    }

    pub fn editor_mut(&mut self) -> Option<&mut ActiveEditor> {
        self.session.as_mut().map(|s| &mut s.editor)
    }

    /// Save the active editor. On success the draft is replaced, a notice
    /// is queued and the transition is applied. On failure nothing moves;
    /// the editor keeps the message inline.
    pub async fn save(&mut self) -> Result<Transition, CoreError> {
        let session = self.session.as_mut().ok_or(CoreError::SessionClosed)?;
        let section = session.editor.section();
        let record = session.editor.save(&self.gateways).await?;

        self.notices.push(Notice {
            section,
            gateway_id: record.id.clone(),
            message: SAVED_NOTICE.to_owned(),
        });
        session.draft = Some(record);

        let transition = Transition::after(session.mode, section);
        match transition {
            Transition::Advance(next) => {
                debug!(from = %section, to = %next, "advancing");
                session.reached = session.reached.max(next);
                session.editor = session.editor_for(next);
            }
            Transition::Close => {
                info!(%section, "edit session finished");
                self.close();
            }
        }
        Ok(transition)
    }

    /// Drain queued success notices.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::store::{MemoryEnodebStore, MemoryGatewayStore};

    fn orchestrator() -> EditOrchestrator<MemoryGatewayStore, MemoryEnodebStore> {
        EditOrchestrator::new(MemoryGatewayStore::new(), MemoryEnodebStore::new())
    }

    #[test]
    fn transition_table() {
        let add = EditMode::AddNew;
        assert_eq!(
            Transition::after(add, Section::Identity),
            Transition::Advance(Section::Aggregation)
        );
        assert_eq!(
            Transition::after(add, Section::Epc),
            Transition::Advance(Section::Ran)
        );
        assert_eq!(Transition::after(add, Section::Ran), Transition::Close);

        let single = EditMode::SingleSection(Section::Identity);
        assert_eq!(Transition::after(single, Section::Identity), Transition::Close);
    }

    #[tokio::test]
    async fn closed_orchestrator_refuses_work() {
        let mut orch = orchestrator();
        assert_eq!(orch.save().await, Err(CoreError::SessionClosed));
        assert_eq!(orch.select(Section::Epc), Err(CoreError::SessionClosed));
        assert_eq!(orch.tab_index(), 0);
        assert!(!orch.is_selectable(Section::Identity));
    }

    #[tokio::test]
    async fn single_section_needs_a_record() {
        let mut orch = orchestrator();
        let err = orch
            .open(EditMode::SingleSection(Section::Epc), None)
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(!orch.is_open());
    }

    #[tokio::test]
    async fn add_flow_locks_unreached_tabs() {
        let mut orch = orchestrator();
        orch.open(EditMode::AddNew, None).await.unwrap();

        assert_eq!(orch.current_section(), Some(Section::Identity));
        assert!(orch.is_selectable(Section::Identity));
        assert_eq!(
            orch.select(Section::Ran),
            Err(CoreError::SectionLocked {
                section: Section::Ran
            })
        );
    }

    #[tokio::test]
    async fn unknown_gateway_cannot_be_opened() {
        let mut orch = orchestrator();
        let err = orch
            .open_gateway("ghost", EditMode::SingleSection(Section::Ran))
            .await
            .unwrap_err();
        assert_eq!(err, CoreError::GatewayNotFound { id: "ghost".into() });
    }
}
