// ── Editable JSON document ──
//
// Whole-record editing as raw JSON. The exported document omits the
// reported status (it is owned by the gateway) and always carries a
// serial list so the user sees where to add radio units.

use serde_json::Value;
use tracing::info;

use crate::error::CoreError;
use crate::model::GatewayRecord;
use crate::store::GatewayStore;

/// Render `record` as the pretty-printed document offered for editing.
pub fn export(record: &GatewayRecord) -> Result<String, CoreError> {
    let mut doc = record.clone();
    doc.status = None;
    serde_json::to_string_pretty(&doc).map_err(|e| CoreError::validation("document", e.to_string()))
}

/// Parse an edited document into a record stored under `id`.
///
/// The id inside the document is ignored; the gateway being edited is
/// fixed by the caller.
pub fn parse(id: &str, text: &str) -> Result<GatewayRecord, CoreError> {
    let value: Value =
        serde_json::from_str(text).map_err(|e| CoreError::validation("document", e.to_string()))?;
    if !value.is_object() {
        return Err(CoreError::validation("document", "expected a JSON object"));
    }
    let mut record: GatewayRecord = serde_json::from_value(value)
        .map_err(|e| CoreError::validation("document", e.to_string()))?;
    id.clone_into(&mut record.id);
    Ok(record)
}

/// Parse `text` and write it as the full record for `id`.
pub async fn apply<S: GatewayStore>(
    store: &S,
    id: &str,
    text: &str,
) -> Result<GatewayRecord, CoreError> {
    let record = parse(id, text)?;
    store.write(id, record.clone()).await?;
    info!(gateway = id, "gateway document applied");
    Ok(record)
}
