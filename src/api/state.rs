use std::sync::{Arc, Mutex};

use crate::{
    model::{
        models::{ParkingLocation, ParkingRate},
        seed,
    },
    service::{editor::RecordCollectionEditor, notification::NotificationCenter, payments::PaymentService, registration::RegistrationService, reports::ReportsService},
};

/**
* Represents the application state shared across the Actix web application.
*/
pub struct AppState {
    /**
     * Editor for the parking locations collection.
     */
    pub locations: Mutex<RecordCollectionEditor<ParkingLocation>>,
    /**
     * Editor for the rate plans collection.
     */
    pub rates: Mutex<RecordCollectionEditor<ParkingRate>>,
    pub payment_service: PaymentService,
    pub registration_service: RegistrationService,
    pub reports_service: ReportsService,
    /**
     * Collects the notifications every service emits.
     */
    pub notification_center: Arc<NotificationCenter>,
}

impl AppState {
    /**
     * Creates a new instance of `AppState` with every collection at its seed data.
     *
     * # Arguments
     * `notification_center`: Receiver of all notifications.
     */
    pub fn new(notification_center: Arc<NotificationCenter>) -> Self {
        AppState {
            locations: Mutex::new(RecordCollectionEditor::new(seed::initial_locations(), notification_center.clone())),
            rates: Mutex::new(RecordCollectionEditor::new(seed::initial_rates(), notification_center.clone())),
            payment_service: PaymentService::new(seed::payment_history(), notification_center.clone()),
            registration_service: RegistrationService::new(notification_center.clone()),
            reports_service: ReportsService::new(),
            notification_center,
        }
    }
}
