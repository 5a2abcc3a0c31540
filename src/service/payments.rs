use std::sync::Arc;

use tracing::instrument;

use crate::model::{
    apperror::ApplicationError,
    models::{PaymentHistoryItem, PaymentInputType},
};
use crate::service::{
    notification::{Notification, Notifier},
    validation::validate_fields,
};

/**
 * Represents the service behind the payments page.
 */
pub struct PaymentService {
    /**
     * Static history shown to the user, newest first.
     */
    history: Vec<PaymentHistoryItem>,
    notifier: Arc<dyn Notifier>,
}

impl PaymentService {
    /**
     * Creates a new instance of `PaymentService`.
     *
     * # Arguments
     * `history`: Payment history entries, in any order.
     * `notifier`: Receives the confirmation of processed payments.
     *
     * # Returns
     * A new instance of `PaymentService`.
     */
    pub fn new(mut history: Vec<PaymentHistoryItem>, notifier: Arc<dyn Notifier>) -> Self {
        history.sort_by(|first, second| second.date.cmp(&first.date));
        PaymentService { history, notifier }
    }

    pub fn get_history(&self) -> &[PaymentHistoryItem] {
        &self.history
    }

    /**
     * Processes a payment from the payment form. Nothing is charged or stored.
     *
     * # Arguments
     * `payment_input`: The validated payment form.
     *
     * # Returns
     * Ok when the form passes its constraints, a validation `ApplicationError` otherwise.
     */
    #[instrument(skip(self, payment_input), fields(payment_method = ?payment_input.payment_method))]
    pub fn process_payment(&self, payment_input: &PaymentInputType) -> Result<(), ApplicationError> {
        validate_fields(payment_input)?;
        self.notifier.notify(Notification::new("Payment processed", "The payment was processed successfully."));
        Ok(())
    }
}
