use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::model::{
    apperror::{ApplicationError, ErrorType, FieldErrors},
    models::{
        ClientShare, DailySummaryRow, LocationFields, ParkingLocation, ParkingRate, PaymentHistoryItem, PaymentMethod, PaymentStatus, RateFields, ReportOutputType, ReportPeriod, ReportTotals,
        RevenuePoint, VehicleFlowPoint, VehicleType,
    },
};
use crate::service::{
    notification::{Notification, Variant},
    validation::RawForm,
};

/***************** Common models *********************/

/**
 * Response structure for listing the records of a collection.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordListResponse<T> {
    records: Vec<T>,
}

impl<T> RecordListResponse<T> {
    pub fn new(records: Vec<T>) -> Self {
        RecordListResponse { records }
    }
}

/**
 * Body of every form submission: a flat JSON object keyed by camelCase field name.
 * Numbers and booleans are kept as their literal text, `null` counts as absent.
 */
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct FormRequest {
    fields: Map<String, Value>,
}

impl From<FormRequest> for RawForm {
    fn from(request: FormRequest) -> Self {
        request
            .fields
            .into_iter()
            .filter_map(|(key, value)| match value {
                Value::Null => None,
                Value::String(text) => Some((key, text)),
                other => Some((key, other.to_string())),
            })
            .collect()
    }
}

/***************** Locations models *********************/

/**
 * Values of the location form, as shown when the edit surface is open.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationForm {
    name: String,
    address: String,
    capacity: u32,
    latitude: f64,
    longitude: f64,
}

impl From<LocationFields> for LocationForm {
    fn from(fields: LocationFields) -> Self {
        LocationForm { name: fields.name, address: fields.address, capacity: fields.capacity, latitude: fields.latitude, longitude: fields.longitude }
    }
}

/**
 * Represents a location in API responses.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationResponse {
    id: u64,
    name: String,
    address: String,
    /**
     * Number of vehicles the location holds.
     */
    capacity: u32,
    latitude: f64,
    longitude: f64,
}

impl From<ParkingLocation> for LocationResponse {
    fn from(location: ParkingLocation) -> Self {
        LocationResponse { id: location.id, name: location.name, address: location.address, capacity: location.capacity, latitude: location.latitude, longitude: location.longitude }
    }
}

/***************** Rates models *********************/

/**
 * Values of the rate plan form.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateForm {
    name: String,
    hourly_rate: Decimal,
    daily_rate: Decimal,
    vehicle_type: VehicleType,
}

impl From<RateFields> for RateForm {
    fn from(fields: RateFields) -> Self {
        RateForm { name: fields.name, hourly_rate: fields.hourly_rate, daily_rate: fields.daily_rate, vehicle_type: fields.vehicle_type }
    }
}

/**
 * Represents a rate plan in API responses. Amounts are in COP.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateResponse {
    id: u64,
    name: String,
    hourly_rate: Decimal,
    daily_rate: Decimal,
    vehicle_type: VehicleType,
}

impl From<ParkingRate> for RateResponse {
    fn from(rate: ParkingRate) -> Self {
        RateResponse { id: rate.id, name: rate.name, hourly_rate: rate.hourly_rate, daily_rate: rate.daily_rate, vehicle_type: rate.vehicle_type }
    }
}

/***************** Editor models *********************/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EditorMode {
    Idle,
    Creating,
    Editing,
}

/**
 * Request structure for opening the edit surface. No record id opens the create form.
 */
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOpenRequest {
    pub record_id: Option<u64>,
}

/**
 * Response structure describing the edit surface of a collection.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorStateResponse<F> {
    mode: EditorMode,
    /**
     * Id of the record being edited.
     */
    #[serde(skip_serializing_if = "Option::is_none")]
    record_id: Option<u64>,
    /**
     * Values the form shows when the surface is open.
     */
    #[serde(skip_serializing_if = "Option::is_none")]
    form: Option<F>,
}

impl<F> EditorStateResponse<F> {
    pub fn new(mode: EditorMode, record_id: Option<u64>, form: Option<F>) -> Self {
        EditorStateResponse { mode, record_id, form }
    }
}

/***************** Payments models *********************/

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistoryResponse {
    payments: Vec<PaymentHistoryElement>,
}

impl From<&[PaymentHistoryItem]> for PaymentHistoryResponse {
    fn from(history: &[PaymentHistoryItem]) -> Self {
        PaymentHistoryResponse { payments: history.iter().cloned().map(PaymentHistoryElement::from).collect() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentHistoryElement {
    id: String,
    date: NaiveDateTime,
    amount: Decimal,
    payment_method: PaymentMethod,
    location: String,
    status: PaymentStatus,
    reference: String,
}

impl From<PaymentHistoryItem> for PaymentHistoryElement {
    fn from(item: PaymentHistoryItem) -> Self {
        PaymentHistoryElement { id: item.id, date: item.date, amount: item.amount, payment_method: item.payment_method, location: item.location, status: item.status, reference: item.reference }
    }
}

/***************** Reports models *********************/

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub period: Option<ReportPeriod>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    period: ReportPeriod,
    vehicle_flow: Vec<VehicleFlowElement>,
    revenue: Vec<RevenueElement>,
    client_types: Vec<ClientShareElement>,
    daily_summary: Vec<DailySummaryElement>,
    totals: ReportTotalsElement,
}

impl From<ReportOutputType> for ReportResponse {
    fn from(output: ReportOutputType) -> Self {
        ReportResponse {
            period: output.period,
            vehicle_flow: output.vehicle_flow.into_iter().map(VehicleFlowElement::from).collect(),
            revenue: output.revenue.into_iter().map(RevenueElement::from).collect(),
            client_types: output.client_types.into_iter().map(ClientShareElement::from).collect(),
            daily_summary: output.daily_summary.into_iter().map(DailySummaryElement::from).collect(),
            totals: ReportTotalsElement::from(output.totals),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VehicleFlowElement {
    day: String,
    entries: u32,
    exits: u32,
}

impl From<VehicleFlowPoint> for VehicleFlowElement {
    fn from(point: VehicleFlowPoint) -> Self {
        VehicleFlowElement { day: point.day, entries: point.entries, exits: point.exits }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueElement {
    day: String,
    revenue: Decimal,
}

impl From<RevenuePoint> for RevenueElement {
    fn from(point: RevenuePoint) -> Self {
        RevenueElement { day: point.day, revenue: point.revenue }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientShareElement {
    segment: String,
    percentage: u32,
}

impl From<ClientShare> for ClientShareElement {
    fn from(share: ClientShare) -> Self {
        ClientShareElement { segment: share.segment, percentage: share.percentage }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummaryElement {
    date: NaiveDate,
    entries: u32,
    exits: u32,
    revenue: Decimal,
    average_stay_minutes: u32,
}

impl From<DailySummaryRow> for DailySummaryElement {
    fn from(row: DailySummaryRow) -> Self {
        DailySummaryElement { date: row.date, entries: row.entries, exits: row.exits, revenue: row.revenue, average_stay_minutes: row.average_stay_minutes }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportTotalsElement {
    total_entries: u32,
    total_exits: u32,
    total_revenue: Decimal,
    busiest_day: Option<String>,
}

impl From<ReportTotals> for ReportTotalsElement {
    fn from(totals: ReportTotals) -> Self {
        ReportTotalsElement { total_entries: totals.total_entries, total_exits: totals.total_exits, total_revenue: totals.total_revenue, busiest_day: totals.busiest_day }
    }
}

/***************** Notification models *********************/

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListResponse {
    notifications: Vec<NotificationElement>,
}

impl From<Vec<Notification>> for NotificationListResponse {
    fn from(notifications: Vec<Notification>) -> Self {
        NotificationListResponse { notifications: notifications.into_iter().map(NotificationElement::from).collect() }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationElement {
    title: String,
    description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    variant: Option<&'static str>,
}

impl From<Notification> for NotificationElement {
    fn from(notification: Notification) -> Self {
        let variant = notification.variant.map(|variant| match variant {
            Variant::Destructive => "destructive",
        });
        NotificationElement { title: notification.title, description: notification.description, variant }
    }
}

/***************** Error models *********************/

/**
 * Custom error response for the application.
 */
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /**
     * The error code associated with the error type.
     */
    pub code: u16,
    /**
     * A human-readable message describing the error.
     */
    pub message: String,
    /**
     * Messages per rejected form field.
     */
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub field_errors: FieldErrors,
}

impl ResponseError for ApplicationError {
    fn status_code(&self) -> StatusCode {
        get_statuscode(&self.error_type)
    }

    /**
     * Generates an error response for the application error.
     */
    fn error_response(&self) -> HttpResponse {
        let error_response = ErrorResponse { code: get_error_code(&self.error_type), message: self.message.clone(), field_errors: self.field_errors.clone() };
        HttpResponse::build(self.status_code()).json(&error_response)
    }
}

/**
* Maps application errors to HTTP status codes.
*
* # Arguments
* `application_error`: The type of error that occurred.
*
* # Returns
* The corresponding HTTP status code.
*/
fn get_statuscode(application_error: &ErrorType) -> StatusCode {
    match application_error {
        ErrorType::Validation => StatusCode::BAD_REQUEST,
        ErrorType::NotFound => StatusCode::NOT_FOUND,
        ErrorType::InvalidState => StatusCode::CONFLICT,
        ErrorType::Initialization | ErrorType::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/**
 * Maps application errors to error codes.
 *
 * # Arguments
 * `application_error`: The type of error that occurred.
 *
 * # Returns
 * The corresponding error code.
 */
fn get_error_code(application_error: &ErrorType) -> u16 {
    match application_error {
        ErrorType::Initialization => 1001,
        ErrorType::Validation => 1002,
        ErrorType::Internal => 1003,
        ErrorType::NotFound => 1004,
        ErrorType::InvalidState => 1005,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_error_response_mapping() {
        assert_eq!(get_statuscode(&ErrorType::Validation), StatusCode::BAD_REQUEST);
        assert_eq!(get_statuscode(&ErrorType::InvalidState), StatusCode::CONFLICT);
        assert_eq!(get_error_code(&ErrorType::NotFound), 1004);
        let error = ApplicationError::new(ErrorType::NotFound, "Location 9 not found".to_string());
        assert_eq!(error.error_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_form_request_keeps_literal_values() {
        let request: FormRequest = serde_json::from_str(r#"{"name":"Tarifa Estándar","hourlyRate":5000,"latitude":4.647,"tosAccepted":true,"cardNumber":null}"#).unwrap();
        let form = RawForm::from(request);
        assert_eq!(form["name"], "Tarifa Estándar");
        assert_eq!(form["hourlyRate"], "5000");
        assert_eq!(form["latitude"], "4.647");
        assert_eq!(form["tosAccepted"], "true");
        assert!(!form.contains_key("cardNumber"));
    }

    #[test]
    fn test_form_request_rejects_non_object_body() {
        assert!(serde_json::from_str::<FormRequest>("[1, 2]").is_err());
    }

    #[test]
    fn test_notification_element_variant() {
        let json = serde_json::to_value(NotificationElement::from(Notification::destructive("Rate deleted", "gone"))).unwrap();
        assert_eq!(json["variant"], "destructive");
        let json = serde_json::to_value(NotificationElement::from(Notification::new("Rate created", "added"))).unwrap();
        assert!(json.get("variant").is_none());
    }
}
