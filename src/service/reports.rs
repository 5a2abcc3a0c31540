use rust_decimal::Decimal;
use tracing::instrument;

use crate::model::{
    models::{ClientShare, DailySummaryRow, ReportOutputType, ReportPeriod, ReportTotals, RevenuePoint, VehicleFlowPoint},
    seed,
};

/**
 * Represents the service behind the reports dashboard. Serves sample datasets.
 */
pub struct ReportsService {
    vehicle_flow: Vec<VehicleFlowPoint>,
    revenue: Vec<RevenuePoint>,
    client_types: Vec<ClientShare>,
    daily_summary: Vec<DailySummaryRow>,
}

impl ReportsService {
    /**
     * Creates a new instance of `ReportsService` over the sample datasets.
     */
    pub fn new() -> Self {
        ReportsService { vehicle_flow: seed::vehicle_flow(), revenue: seed::revenue(), client_types: seed::client_types(), daily_summary: seed::daily_summary() }
    }

    /**
     * Builds the dashboard for a period. The sample data is the same for every period.
     *
     * # Arguments
     * `period`: The period selected in the dashboard filter.
     *
     * # Returns
     * The datasets together with their totals.
     */
    #[instrument(skip(self))]
    pub fn get_report(&self, period: ReportPeriod) -> ReportOutputType {
        ReportOutputType {
            period,
            vehicle_flow: self.vehicle_flow.clone(),
            revenue: self.revenue.clone(),
            client_types: self.client_types.clone(),
            daily_summary: self.daily_summary.clone(),
            totals: Self::get_totals(&self.vehicle_flow, &self.revenue),
        }
    }

    fn get_totals(vehicle_flow: &[VehicleFlowPoint], revenue: &[RevenuePoint]) -> ReportTotals {
        ReportTotals {
            total_entries: vehicle_flow.iter().map(|point| point.entries).sum(),
            total_exits: vehicle_flow.iter().map(|point| point.exits).sum(),
            total_revenue: revenue.iter().map(|point| point.revenue).sum::<Decimal>(),
            busiest_day: vehicle_flow.iter().max_by_key(|point| point.entries).map(|point| point.day.clone()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_totals() {
        let report = ReportsService::new().get_report(ReportPeriod::Weekly);
        assert_eq!(report.totals.total_entries, 430);
        assert_eq!(report.totals.total_exits, 415);
        assert_eq!(report.totals.total_revenue, Decimal::new(2_910_000, 0));
        assert_eq!(report.totals.busiest_day.as_deref(), Some("Sat"));
    }

    #[test]
    fn test_period_is_echoed() {
        let report = ReportsService::new().get_report(ReportPeriod::Yearly);
        assert_eq!(report.period, ReportPeriod::Yearly);
        assert_eq!(report.vehicle_flow.len(), 7);
        assert_eq!(report.client_types.iter().map(|share| share.percentage).sum::<u32>(), 100);
    }

    #[test]
    fn test_totals_of_empty_datasets() {
        let totals = ReportsService::get_totals(&[], &[]);
        assert_eq!(totals.total_entries, 0);
        assert_eq!(totals.total_revenue, Decimal::ZERO);
        assert!(totals.busiest_day.is_none());
    }
}
