use std::sync::Arc;

use dashmap::DashMap;

use crate::flight_reports::FlightReport;

/// Append-only store of filed flight reports.
#[derive(Clone, Default)]
pub struct FlightReportsRepository {
    reports: Arc<DashMap<uuid::Uuid, FlightReport>>,
}

impl FlightReportsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// File a report. Reports are historical records and are never updated
    /// or deleted by this engine.
    pub fn create(&self, report: FlightReport) {
        self.reports.insert(report.id, report);
    }

    pub fn get(&self, id: uuid::Uuid) -> Option<FlightReport> {
        self.reports.get(&id).map(|r| r.clone())
    }

    /// All reports filed by a pilot, newest first.
    pub fn list_for_pilot(&self, pilot_id: &str) -> Vec<FlightReport> {
        let mut reports: Vec<FlightReport> = self
            .reports
            .iter()
            .filter(|entry| entry.value().pilot_id == pilot_id)
            .map(|entry| entry.value().clone())
            .collect();
        reports.sort_by(|a, b| b.filed_at.cmp(&a.filed_at));
        reports
    }
}
