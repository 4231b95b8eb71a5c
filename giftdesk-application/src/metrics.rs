use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    checkins: AtomicU64,
    rejections: AtomicU64,
    undos: AtomicU64,
    edits: AtomicU64,
    deletes: AtomicU64,
    drift_corrections: AtomicU64,
    inventory_adjustments: AtomicU64,
}

impl Metrics {
    pub fn record_checkin(&self) {
        self.checkins.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_rejection(&self) {
        self.rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_undo(&self) {
        self.undos.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_edit(&self) {
        self.edits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_delete(&self) {
        self.deletes.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_drift_correction(&self) {
        self.drift_corrections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_inventory_adjustment(&self) {
        self.inventory_adjustments.fetch_add(1, Ordering::Relaxed);
    }

    pub fn drift_corrections(&self) -> u64 {
        self.drift_corrections.load(Ordering::Relaxed)
    }

    pub fn render_prometheus(&self) -> String {
        let checkins = self.checkins.load(Ordering::Relaxed);
        let rejections = self.rejections.load(Ordering::Relaxed);
        let undos = self.undos.load(Ordering::Relaxed);
        let edits = self.edits.load(Ordering::Relaxed);
        let deletes = self.deletes.load(Ordering::Relaxed);
        let drift = self.drift_corrections.load(Ordering::Relaxed);
        let adjustments = self.inventory_adjustments.load(Ordering::Relaxed);

        format!(
            "# TYPE giftdesk_checkins_total counter\n\
giftdesk_checkins_total {}\n\
# TYPE giftdesk_checkin_rejections_total counter\n\
giftdesk_checkin_rejections_total {}\n\
# TYPE giftdesk_checkin_undos_total counter\n\
giftdesk_checkin_undos_total {}\n\
# TYPE giftdesk_checkin_edits_total counter\n\
giftdesk_checkin_edits_total {}\n\
# TYPE giftdesk_checkin_deletes_total counter\n\
giftdesk_checkin_deletes_total {}\n\
# TYPE giftdesk_inventory_drift_corrections_total counter\n\
giftdesk_inventory_drift_corrections_total {}\n\
# TYPE giftdesk_inventory_adjustments_total counter\n\
giftdesk_inventory_adjustments_total {}\n",
            checkins, rejections, undos, edits, deletes, drift, adjustments
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prometheus_output_reflects_counters() {
        let metrics = Metrics::default();
        metrics.record_checkin();
        metrics.record_checkin();
        metrics.record_drift_correction();
        let text = metrics.render_prometheus();
        assert!(text.contains("giftdesk_checkins_total 2\n"));
        assert!(text.contains("giftdesk_inventory_drift_corrections_total 1\n"));
        assert!(text.contains("giftdesk_checkin_undos_total 0\n"));
    }
}
