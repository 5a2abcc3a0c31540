use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::model::models::{ClientShare, DailySummaryRow, ParkingLocation, ParkingRate, PaymentHistoryItem, PaymentMethod, PaymentStatus, RevenuePoint, VehicleFlowPoint, VehicleType};

/**
 * Locations every process starts with.
 */
pub fn initial_locations() -> Vec<ParkingLocation> {
    vec![
        ParkingLocation { id: 1, name: "Centro Comercial Andino".to_string(), address: "Carrera 11 #82-71".to_string(), capacity: 150, latitude: 4.667, longitude: -74.055 },
        ParkingLocation { id: 2, name: "Centro Internacional".to_string(), address: "Carrera 7 #33-49".to_string(), capacity: 200, latitude: 4.617, longitude: -74.068 },
        ParkingLocation { id: 3, name: "Parque de la 93".to_string(), address: "Calle 93 #13-45".to_string(), capacity: 120, latitude: 4.676, longitude: -74.046 },
    ]
}

/**
 * Rate plans every process starts with.
 */
pub fn initial_rates() -> Vec<ParkingRate> {
    vec![
        ParkingRate { id: 1, name: "Tarifa Estándar".to_string(), hourly_rate: Decimal::new(5000, 0), daily_rate: Decimal::new(25000, 0), vehicle_type: VehicleType::Car },
        ParkingRate { id: 2, name: "Tarifa Motocicleta".to_string(), hourly_rate: Decimal::new(3000, 0), daily_rate: Decimal::new(15000, 0), vehicle_type: VehicleType::Motorcycle },
        ParkingRate { id: 3, name: "Tarifa Premium".to_string(), hourly_rate: Decimal::new(8000, 0), daily_rate: Decimal::new(40000, 0), vehicle_type: VehicleType::Car },
    ]
}

/**
 * Static payment history shown on the payments page.
 */
pub fn payment_history() -> Vec<PaymentHistoryItem> {
    vec![
        history_item("1", (2025, 4, 10), (14, 30), 12000, PaymentMethod::CreditCard, "Centro Comercial Centro", PaymentStatus::Completed, "PV-2025041001"),
        history_item("2", (2025, 4, 5), (10, 15), 8000, PaymentMethod::App, "Chapinero Central", PaymentStatus::Completed, "PV-2025040501"),
        history_item("3", (2025, 4, 1), (17, 45), 15000, PaymentMethod::DebitCard, "Salitre Plaza", PaymentStatus::Completed, "PV-2025040101"),
        history_item("4", (2025, 3, 28), (9, 20), 5000, PaymentMethod::Cash, "Centro Comercial Norte", PaymentStatus::Pending, "PV-2025032801"),
    ]
}

pub fn vehicle_flow() -> Vec<VehicleFlowPoint> {
    [("Mon", 45, 40), ("Tue", 52, 48), ("Wed", 49, 51), ("Thu", 63, 59), ("Fri", 75, 72), ("Sat", 84, 80), ("Sun", 62, 65)]
        .into_iter()
        .map(|(day, entries, exits)| VehicleFlowPoint { day: day.to_string(), entries, exits })
        .collect()
}

pub fn revenue() -> Vec<RevenuePoint> {
    [("Mon", 250_000), ("Tue", 320_000), ("Wed", 300_000), ("Thu", 450_000), ("Fri", 520_000), ("Sat", 650_000), ("Sun", 420_000)]
        .into_iter()
        .map(|(day, revenue)| RevenuePoint { day: day.to_string(), revenue: Decimal::new(revenue, 0) })
        .collect()
}

pub fn client_types() -> Vec<ClientShare> {
    [("Regular", 65), ("Occasional", 25), ("Business", 10)].into_iter().map(|(segment, percentage)| ClientShare { segment: segment.to_string(), percentage }).collect()
}

pub fn daily_summary() -> Vec<DailySummaryRow> {
    [((2024, 4, 1), 152, 145, 1_230_000, 202), ((2024, 4, 2), 168, 170, 1_345_000, 165), ((2024, 4, 3), 145, 142, 1_180_000, 185), ((2024, 4, 4), 175, 168, 1_420_000, 178), ((2024, 4, 5), 195, 192, 1_580_000, 195)]
        .into_iter()
        .filter_map(|((year, month, day), entries, exits, revenue, average_stay_minutes)| {
            Some(DailySummaryRow { date: NaiveDate::from_ymd_opt(year, month, day)?, entries, exits, revenue: Decimal::new(revenue, 0), average_stay_minutes })
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn history_item(id: &str, (year, month, day): (i32, u32, u32), (hour, minute): (u32, u32), amount: i64, payment_method: PaymentMethod, location: &str, status: PaymentStatus, reference: &str) -> PaymentHistoryItem {
    let date = NaiveDate::from_ymd_opt(year, month, day).and_then(|date| NaiveTime::from_hms_opt(hour, minute, 0).map(|time| NaiveDateTime::new(date, time))).unwrap_or_default();
    PaymentHistoryItem { id: id.to_string(), date, amount: Decimal::new(amount, 0), payment_method, location: location.to_string(), status, reference: reference.to_string() }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_seed_ids_are_unique() {
        let mut ids: Vec<u64> = initial_locations().iter().map(|location| location.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3]);
        let mut ids: Vec<u64> = initial_rates().iter().map(|rate| rate.id).collect();
        ids.dedup();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_daily_summary_dates_parse() {
        assert_eq!(daily_summary().len(), 5);
        assert_eq!(payment_history()[0].date.to_string(), "2025-04-10 14:30:00");
    }
}
