pub mod confirm_payment;
pub mod hall;
pub mod not_found;
pub mod transfer;

pub use confirm_payment::ConfirmPaymentPage;
pub use hall::HallPage;
pub use not_found::NotFoundPage;
pub use transfer::TransferPage;
