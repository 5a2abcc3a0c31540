use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::model::record::Record;

/***************** Locations *********************/

/**
 * A parking location managed from the admin panel.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingLocation {
    pub id: u64,
    pub name: String,
    pub address: String,
    pub capacity: u32,
    pub latitude: f64,
    pub longitude: f64,
}

/**
 * A parking location without its identifier, as entered in the location form.
 */
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct LocationFields {
    #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
    pub name: String,
    #[validate(length(min = 5, message = "Address must be at least 5 characters"))]
    pub address: String,
    #[validate(range(min = 1, message = "Capacity must be a positive number"))]
    pub capacity: u32,
    #[validate(custom = "finite", range(min = -90.0, max = 90.0, message = "Latitude must be between -90 and 90"))]
    pub latitude: f64,
    #[validate(custom = "finite", range(min = -180.0, max = 180.0, message = "Longitude must be between -180 and 180"))]
    pub longitude: f64,
}

impl Record for ParkingLocation {
    type Fields = LocationFields;

    const KIND: &'static str = "location";
    const LABEL: &'static str = "Location";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn with_id(id: u64, fields: LocationFields) -> Self {
        ParkingLocation { id, name: fields.name, address: fields.address, capacity: fields.capacity, latitude: fields.latitude, longitude: fields.longitude }
    }

    fn fields(&self) -> LocationFields {
        LocationFields { name: self.name.clone(), address: self.address.clone(), capacity: self.capacity, latitude: self.latitude, longitude: self.longitude }
    }

    /**
     * Blank location form, centered on Bogotá.
     */
    fn form_defaults() -> LocationFields {
        LocationFields { name: String::new(), address: String::new(), capacity: 100, latitude: 4.6097, longitude: -74.0817 }
    }
}

/***************** Rates *********************/

/**
 * Vehicle categories a rate plan can apply to.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleType {
    Car,
    Motorcycle,
    Bicycle,
    Truck,
}

impl VehicleType {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleType::Car => "car",
            VehicleType::Motorcycle => "motorcycle",
            VehicleType::Bicycle => "bicycle",
            VehicleType::Truck => "truck",
        }
    }
}

impl FromStr for VehicleType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "car" => Ok(VehicleType::Car),
            "motorcycle" => Ok(VehicleType::Motorcycle),
            "bicycle" => Ok(VehicleType::Bicycle),
            "truck" => Ok(VehicleType::Truck),
            other => Err(format!("Unknown vehicle type {other}")),
        }
    }
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/**
 * A rate plan managed from the admin panel. Amounts are in COP.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct ParkingRate {
    pub id: u64,
    pub name: String,
    pub hourly_rate: Decimal,
    pub daily_rate: Decimal,
    pub vehicle_type: VehicleType,
}

/**
 * A rate plan without its identifier, as entered in the rate form.
 */
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct RateFields {
    #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
    pub name: String,
    #[validate(custom = "positive_amount")]
    pub hourly_rate: Decimal,
    #[validate(custom = "positive_amount")]
    pub daily_rate: Decimal,
    pub vehicle_type: VehicleType,
}

impl Record for ParkingRate {
    type Fields = RateFields;

    const KIND: &'static str = "rate";
    const LABEL: &'static str = "Rate";

    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn with_id(id: u64, fields: RateFields) -> Self {
        ParkingRate { id, name: fields.name, hourly_rate: fields.hourly_rate, daily_rate: fields.daily_rate, vehicle_type: fields.vehicle_type }
    }

    fn fields(&self) -> RateFields {
        RateFields { name: self.name.clone(), hourly_rate: self.hourly_rate, daily_rate: self.daily_rate, vehicle_type: self.vehicle_type }
    }

    fn form_defaults() -> RateFields {
        RateFields { name: String::new(), hourly_rate: Decimal::new(5000, 0), daily_rate: Decimal::new(25000, 0), vehicle_type: VehicleType::Car }
    }
}

/***************** Payments *********************/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    CreditCard,
    DebitCard,
    Cash,
    App,
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "credit_card" => Ok(PaymentMethod::CreditCard),
            "debit_card" => Ok(PaymentMethod::DebitCard),
            "cash" => Ok(PaymentMethod::Cash),
            "app" => Ok(PaymentMethod::App),
            other => Err(format!("Unknown payment method {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
}

/**
 * An entry of the payment history table.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentHistoryItem {
    pub id: String,
    pub date: NaiveDateTime,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub location: String,
    pub status: PaymentStatus,
    pub reference: String,
}

/**
 * Input of the payment form. Card details are optional regardless of method.
 */
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct PaymentInputType {
    #[validate(length(min = 5, max = 7, message = "Enter a valid license plate"))]
    pub license_plate: String,
    #[validate(custom = "positive_amount")]
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    pub card_number: Option<String>,
    pub card_expiry: Option<String>,
    pub card_cvc: Option<String>,
    pub card_name: Option<String>,
}

/***************** Registration *********************/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    Cedula,
    Pasaporte,
    Extranjeria,
}

impl FromStr for DocumentType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "cedula" => Ok(DocumentType::Cedula),
            "pasaporte" => Ok(DocumentType::Pasaporte),
            "extranjeria" => Ok(DocumentType::Extranjeria),
            other => Err(format!("Unknown document type {other}")),
        }
    }
}

/**
 * Frequent user registration request.
 */
#[derive(Debug, Clone, PartialEq, Validate)]
pub struct RegistrationInputType {
    #[validate(length(min = 5, message = "Full name must be at least 5 characters"))]
    pub full_name: String,
    #[validate(email(message = "Enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 10, message = "Enter a valid phone number"))]
    pub phone: String,
    pub document_type: DocumentType,
    #[validate(length(min = 5, message = "Enter a valid document number"))]
    pub document_number: String,
    pub vehicle_type: VehicleType,
    #[validate(length(min = 5, max = 7, message = "Enter a valid license plate"))]
    pub license_plate: String,
    #[validate(length(min = 2, message = "Enter the vehicle brand"))]
    pub vehicle_brand: String,
    #[validate(length(min = 2, message = "Enter the vehicle model"))]
    pub vehicle_model: String,
    #[validate(length(min = 10, message = "Enter a complete address"))]
    pub address: String,
    pub preferred_location: String,
    #[validate(custom = "accepted")]
    pub tos_accepted: bool,
}

/***************** Reports *********************/

/**
 * Period selected in the reports dashboard.
 */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportPeriod {
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VehicleFlowPoint {
    pub day: String,
    pub entries: u32,
    pub exits: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevenuePoint {
    pub day: String,
    pub revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClientShare {
    pub segment: String,
    pub percentage: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailySummaryRow {
    pub date: NaiveDate,
    pub entries: u32,
    pub exits: u32,
    pub revenue: Decimal,
    pub average_stay_minutes: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportTotals {
    pub total_entries: u32,
    pub total_exits: u32,
    pub total_revenue: Decimal,
    pub busiest_day: Option<String>,
}

/**
 * Everything the reports dashboard renders for one period.
 */
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOutputType {
    pub period: ReportPeriod,
    pub vehicle_flow: Vec<VehicleFlowPoint>,
    pub revenue: Vec<RevenuePoint>,
    pub client_types: Vec<ClientShare>,
    pub daily_summary: Vec<DailySummaryRow>,
    pub totals: ReportTotals,
}

/***************** Custom constraints *********************/

fn positive_amount(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_positive() && !value.is_zero() {
        return Ok(());
    }
    let mut error = ValidationError::new("positive");
    error.message = Some(Cow::from("Amount must be positive"));
    Err(error)
}

fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        return Ok(());
    }
    let mut error = ValidationError::new("finite");
    error.message = Some(Cow::from("Must be a number"));
    Err(error)
}

fn accepted(value: &bool) -> Result<(), ValidationError> {
    if *value {
        return Ok(());
    }
    let mut error = ValidationError::new("accepted");
    error.message = Some(Cow::from("You must accept the terms and conditions to continue"));
    Err(error)
}
