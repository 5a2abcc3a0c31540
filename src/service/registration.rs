use std::sync::Arc;

use tracing::instrument;

use crate::model::{apperror::ApplicationError, models::RegistrationInputType};
use crate::service::{
    notification::{Notification, Notifier},
    validation::validate_fields,
};

/**
 * Represents the service handling frequent user registrations.
 */
pub struct RegistrationService {
    notifier: Arc<dyn Notifier>,
}

impl RegistrationService {
    pub fn new(notifier: Arc<dyn Notifier>) -> Self {
        RegistrationService { notifier }
    }

    /**
     * Accepts a frequent user registration request. Requests are acknowledged, not stored.
     *
     * # Arguments
     * `registration_input`: The registration form.
     *
     * # Returns
     * Ok when the form passes its constraints, a validation `ApplicationError` otherwise.
     */
    #[instrument(skip(self, registration_input), fields(vehicle_type = %registration_input.vehicle_type))]
    pub fn register(&self, registration_input: &RegistrationInputType) -> Result<(), ApplicationError> {
        validate_fields(registration_input)?;
        self.notifier.notify(Notification::new("Registration successful", "Your request was sent. We will contact you soon."));
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::model::models::{DocumentType, VehicleType};
    use crate::service::notification::NotificationCenter;

    fn registration() -> RegistrationInputType {
        RegistrationInputType {
            full_name: "Carlos Rodríguez".to_string(),
            email: "carlos@example.com".to_string(),
            phone: "3109876543".to_string(),
            document_type: DocumentType::Pasaporte,
            document_number: "AB123456".to_string(),
            vehicle_type: VehicleType::Motorcycle,
            license_plate: "XYZ12A".to_string(),
            vehicle_brand: "Yamaha".to_string(),
            vehicle_model: "FZ".to_string(),
            address: "Carrera 15 #93-60, Bogotá".to_string(),
            preferred_location: "Parque de la 93".to_string(),
            tos_accepted: true,
        }
    }

    #[test]
    fn test_register_notifies() {
        let center = Arc::new(NotificationCenter::new(5));
        let service = RegistrationService::new(center.clone());
        service.register(&registration()).unwrap();
        assert_eq!(center.take_all()[0].title, "Registration successful");
    }

    #[test]
    fn test_register_rejects_bad_email_and_plate() {
        let center = Arc::new(NotificationCenter::new(5));
        let service = RegistrationService::new(center.clone());
        let input = RegistrationInputType { email: "not-an-email".to_string(), license_plate: "TOOLONG12".to_string(), ..registration() };
        let error = service.register(&input).unwrap_err();
        assert_eq!(error.field_errors.keys().collect::<Vec<_>>(), vec!["email", "licensePlate"]);
        assert!(center.take_all().is_empty());
    }
}
