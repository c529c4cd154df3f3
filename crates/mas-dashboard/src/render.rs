use mas_common::StatusSnapshot;

use crate::document::{Document, Item, RegionSink};
use crate::markup::MarkupContract;
use crate::time_format::TimestampFormat;

/// Shown in place of a missing or empty field.
pub const PLACEHOLDER: &str = "—";
pub const NO_ALERTS: &str = "No alerts";

/// Projects one snapshot onto the contract's regions. Regions the document
/// lacks are skipped; regions the contract does not name are never touched.
pub fn render_snapshot(
    snapshot: &StatusSnapshot,
    doc: &mut Document,
    contract: MarkupContract,
    time_format: &TimestampFormat,
) {
    let ids = contract.regions();

    doc.region(ids.stage)
        .set_text(snapshot.stage().unwrap_or(PLACEHOLDER));
    doc.region(ids.cluster_status)
        .set_text(snapshot.cluster_status().unwrap_or(PLACEHOLDER));

    if snapshot.has_alerts() {
        let class = contract.alert_class();
        let items = snapshot
            .alerts
            .iter()
            .map(|alert| Item::new(alert.as_str(), class))
            .collect();
        doc.region(ids.alerts).set_items(items);
    } else {
        doc.region(ids.alerts).set_text(NO_ALERTS);
    }

    if let (Some(id), Some(ts)) = (ids.last_update, snapshot.last_update) {
        doc.region(id).set_text(time_format.format(ts));
    }
}
