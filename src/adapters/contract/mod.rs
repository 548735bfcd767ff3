//! Ticket contract test double.

mod mock;

pub use mock::MockTicketContract;
