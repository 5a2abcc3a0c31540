pub mod editor;
pub mod notification;
pub mod payments;
pub mod registration;
pub mod reports;
pub mod validation;
