use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::Decimal;
use validator::{Validate, ValidationErrors};

use crate::model::{
    apperror::{ApplicationError, FieldErrors},
    models::{LocationFields, PaymentInputType, RateFields, RegistrationInputType},
};

/**
 * Raw form input as typed by the user, keyed by camelCase field name.
 */
pub type RawForm = HashMap<String, String>;

const REQUIRED: &str = "This field is required";

/**
 * Types that can be coerced from raw form input.
 */
pub trait FromForm: Sized {
    /**
     * Reads every field of the form. Returns `None` when a field could not be
     * coerced, in which case the reader holds the reason.
     */
    fn from_form(reader: &mut FormReader) -> Option<Self>;
}

/**
 * Reads typed values out of a raw form and collects coercion errors per field.
 */
pub struct FormReader<'a> {
    form: &'a RawForm,
    errors: FieldErrors,
}

impl<'a> FormReader<'a> {
    pub fn new(form: &'a RawForm) -> Self {
        FormReader { form, errors: FieldErrors::new() }
    }

    /**
     * Text is kept as typed, length constraints see surrounding whitespace too.
     */
    pub fn text(&mut self, key: &str) -> Option<String> {
        match self.form.get(key) {
            Some(value) => Some(value.clone()),
            None => self.reject(key, REQUIRED),
        }
    }

    /**
     * Blank values are treated as absent.
     */
    pub fn optional_text(&self, key: &str) -> Option<String> {
        self.form.get(key).map(|value| value.trim()).filter(|value| !value.is_empty()).map(str::to_string)
    }

    pub fn integer(&mut self, key: &str, message: &str) -> Option<u32> {
        let raw = self.required(key)?;
        match raw.parse::<u32>() {
            Ok(value) => Some(value),
            Err(_) => self.reject(key, message),
        }
    }

    pub fn float(&mut self, key: &str, message: &str) -> Option<f64> {
        let raw = self.required(key)?;
        match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => self.reject(key, message),
        }
    }

    pub fn decimal(&mut self, key: &str, message: &str) -> Option<Decimal> {
        let raw = self.required(key)?;
        match Decimal::from_str(&raw) {
            Ok(value) => Some(value),
            Err(_) => self.reject(key, message),
        }
    }

    pub fn choice<T: FromStr>(&mut self, key: &str) -> Option<T> {
        let raw = self.required(key)?;
        match raw.parse::<T>() {
            Ok(value) => Some(value),
            Err(_) => self.reject(key, &format!("Invalid option '{raw}'")),
        }
    }

    /**
     * Checkbox style value. Anything but a truthy string is false.
     */
    pub fn flag(&self, key: &str) -> bool {
        self.form.get(key).is_some_and(|value| matches!(value.trim(), "true" | "on" | "1"))
    }

    fn required(&mut self, key: &str) -> Option<String> {
        match self.form.get(key).map(|value| value.trim()) {
            Some(value) if !value.is_empty() => Some(value.to_string()),
            _ => self.reject(key, REQUIRED),
        }
    }

    fn reject<T>(&mut self, key: &str, message: &str) -> Option<T> {
        self.errors.entry(key.to_string()).or_default().push(message.to_string());
        None
    }
}

/**
 * Coerces raw form input into typed fields and checks the constraint set.
 *
 * # Arguments
 * `form`: Raw form input keyed by camelCase field name.
 *
 * # Returns
 * The typed fields or a validation `ApplicationError` with messages per field.
 */
pub fn coerce_and_validate<F: FromForm + Validate>(form: &RawForm) -> Result<F, ApplicationError> {
    let mut reader = FormReader::new(form);
    let fields = F::from_form(&mut reader);
    let mut field_errors = reader.errors;
    if let Some(fields) = fields {
        if let Err(errors) = fields.validate() {
            merge_validation_errors(&mut field_errors, &errors);
        }
        if field_errors.is_empty() {
            return Ok(fields);
        }
    }
    Err(ApplicationError::validation(field_errors))
}

/**
 * Checks already typed fields against the constraint set.
 */
pub fn validate_fields<F: Validate>(fields: &F) -> Result<(), ApplicationError> {
    fields.validate().map_err(|errors| {
        let mut field_errors = FieldErrors::new();
        merge_validation_errors(&mut field_errors, &errors);
        ApplicationError::validation(field_errors)
    })
}

fn merge_validation_errors(field_errors: &mut FieldErrors, errors: &ValidationErrors) {
    for (field, field_validation_errors) in errors.field_errors() {
        let messages = field_errors.entry(camel_case(field)).or_default();
        for error in field_validation_errors {
            messages.push(error.message.as_ref().map_or_else(|| format!("Invalid value ({})", error.code), ToString::to_string));
        }
    }
}

fn camel_case(field: &str) -> String {
    let mut result = String::with_capacity(field.len());
    let mut upper = false;
    for character in field.chars() {
        if character == '_' {
            upper = true;
        } else if upper {
            result.extend(character.to_uppercase());
            upper = false;
        } else {
            result.push(character);
        }
    }
    result
}

impl FromForm for LocationFields {
    fn from_form(reader: &mut FormReader) -> Option<Self> {
        let name = reader.text("name");
        let address = reader.text("address");
        let capacity = reader.integer("capacity", "Capacity must be a positive number");
        let latitude = reader.float("latitude", "Latitude must be a number");
        let longitude = reader.float("longitude", "Longitude must be a number");
        Some(LocationFields { name: name?, address: address?, capacity: capacity?, latitude: latitude?, longitude: longitude? })
    }
}

impl FromForm for RateFields {
    fn from_form(reader: &mut FormReader) -> Option<Self> {
        let name = reader.text("name");
        let hourly_rate = reader.decimal("hourlyRate", "Hourly rate must be a number");
        let daily_rate = reader.decimal("dailyRate", "Daily rate must be a number");
        let vehicle_type = reader.choice("vehicleType");
        Some(RateFields { name: name?, hourly_rate: hourly_rate?, daily_rate: daily_rate?, vehicle_type: vehicle_type? })
    }
}

impl FromForm for PaymentInputType {
    fn from_form(reader: &mut FormReader) -> Option<Self> {
        let license_plate = reader.text("licensePlate");
        let amount = reader.decimal("amount", "Amount must be a number");
        let payment_method = reader.choice("paymentMethod");
        Some(PaymentInputType {
            license_plate: license_plate?,
            amount: amount?,
            payment_method: payment_method?,
            card_number: reader.optional_text("cardNumber"),
            card_expiry: reader.optional_text("cardExpiry"),
            card_cvc: reader.optional_text("cardCvc"),
            card_name: reader.optional_text("cardName"),
        })
    }
}

impl FromForm for RegistrationInputType {
    fn from_form(reader: &mut FormReader) -> Option<Self> {
        let full_name = reader.text("fullName");
        let email = reader.text("email");
        let phone = reader.text("phone");
        let document_type = reader.choice("documentType");
        let document_number = reader.text("documentNumber");
        let vehicle_type = reader.choice("vehicleType");
        let license_plate = reader.text("licensePlate");
        let vehicle_brand = reader.text("vehicleBrand");
        let vehicle_model = reader.text("vehicleModel");
        let address = reader.text("address");
        let preferred_location = reader.optional_text("preferredLocation").unwrap_or_default();
        let tos_accepted = reader.flag("tosAccepted");
        Some(RegistrationInputType {
            full_name: full_name?,
            email: email?,
            phone: phone?,
            document_type: document_type?,
            document_number: document_number?,
            vehicle_type: vehicle_type?,
            license_plate: license_plate?,
            vehicle_brand: vehicle_brand?,
            vehicle_model: vehicle_model?,
            address: address?,
            preferred_location,
            tos_accepted,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::{apperror::ErrorType, models::VehicleType};

    fn form(entries: &[(&str, &str)]) -> RawForm {
        entries.iter().map(|(key, value)| (key.to_string(), value.to_string())).collect()
    }

    fn location_form() -> RawForm {
        form(&[("name", "Salitre Plaza"), ("address", "Carrera 68B #24-39"), ("capacity", "300"), ("latitude", "4.653"), ("longitude", "-74.109")])
    }

    #[test]
    fn test_location_form_coerced() {
        let fields: LocationFields = coerce_and_validate(&location_form()).unwrap();
        assert_eq!(fields.capacity, 300);
        assert_eq!(fields.latitude, 4.653);
        assert_eq!(fields.name, "Salitre Plaza");
    }

    #[test]
    fn test_location_short_name_rejected() {
        let mut raw = location_form();
        raw.insert("name".to_string(), "ab".to_string());
        let error = coerce_and_validate::<LocationFields>(&raw).unwrap_err();
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.field_errors["name"], vec!["Name must be at least 3 characters".to_string()]);
    }

    #[test]
    fn test_location_latitude_out_of_range_rejected() {
        let mut raw = location_form();
        raw.insert("latitude".to_string(), "91".to_string());
        let error = coerce_and_validate::<LocationFields>(&raw).unwrap_err();
        assert_eq!(error.field_errors.keys().collect::<Vec<_>>(), vec!["latitude"]);
    }

    #[test]
    fn test_unparsable_and_missing_fields_reported_together() {
        let mut raw = location_form();
        raw.insert("capacity".to_string(), "many".to_string());
        raw.insert("longitude".to_string(), "NaN".to_string());
        raw.remove("address");
        let error = coerce_and_validate::<LocationFields>(&raw).unwrap_err();
        assert_eq!(error.field_errors.keys().collect::<Vec<_>>(), vec!["address", "capacity", "longitude"]);
        assert_eq!(error.field_errors["address"], vec![REQUIRED.to_string()]);
    }

    #[test]
    fn test_rate_form_uses_camel_case_keys() {
        let raw = form(&[("name", "Tarifa Camión"), ("hourlyRate", "0"), ("dailyRate", "60000"), ("vehicleType", "truck")]);
        let error = coerce_and_validate::<RateFields>(&raw).unwrap_err();
        assert_eq!(error.field_errors.keys().collect::<Vec<_>>(), vec!["hourlyRate"]);

        let raw = form(&[("name", "Tarifa Camión"), ("hourlyRate", "12000"), ("dailyRate", "60000"), ("vehicleType", "truck")]);
        let fields: RateFields = coerce_and_validate(&raw).unwrap();
        assert_eq!(fields.vehicle_type, VehicleType::Truck);
        assert_eq!(fields.hourly_rate, Decimal::new(12000, 0));
    }

    #[test]
    fn test_unknown_vehicle_type_rejected() {
        let raw = form(&[("name", "Tarifa Barco"), ("hourlyRate", "1000"), ("dailyRate", "5000"), ("vehicleType", "boat")]);
        let error = coerce_and_validate::<RateFields>(&raw).unwrap_err();
        assert_eq!(error.field_errors["vehicleType"], vec!["Invalid option 'boat'".to_string()]);
    }

    #[test]
    fn test_registration_requires_terms() {
        let mut raw = form(&[
            ("fullName", "Ana María Pérez"),
            ("email", "ana@example.com"),
            ("phone", "3001234567"),
            ("documentType", "cedula"),
            ("documentNumber", "1020304050"),
            ("vehicleType", "car"),
            ("licensePlate", "ABC123"),
            ("vehicleBrand", "Mazda"),
            ("vehicleModel", "CX-5"),
            ("address", "Calle 100 #15-20, Bogotá"),
        ]);
        let error = coerce_and_validate::<RegistrationInputType>(&raw).unwrap_err();
        assert_eq!(error.field_errors.keys().collect::<Vec<_>>(), vec!["tosAccepted"]);

        raw.insert("tosAccepted".to_string(), "true".to_string());
        let registration: RegistrationInputType = coerce_and_validate(&raw).unwrap();
        assert_eq!(registration.preferred_location, "");
    }

    #[test]
    fn test_payment_card_fields_optional() {
        let raw = form(&[("licensePlate", "XYZ98A"), ("amount", "12000"), ("paymentMethod", "cash"), ("cardNumber", "  ")]);
        let payment: PaymentInputType = coerce_and_validate(&raw).unwrap();
        assert!(payment.card_number.is_none());
    }

    #[test]
    fn test_text_kept_as_typed() {
        let mut raw = location_form();
        raw.insert("name".to_string(), " ab ".to_string());
        let fields: LocationFields = coerce_and_validate(&raw).unwrap();
        assert_eq!(fields.name, " ab ");

        raw.insert("name".to_string(), "ab".to_string());
        assert!(coerce_and_validate::<LocationFields>(&raw).is_err());
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("hourly_rate"), "hourlyRate");
        assert_eq!(camel_case("name"), "name");
        assert_eq!(camel_case("tos_accepted"), "tosAccepted");
    }
}
