pub mod destination;
pub mod itinerary;
pub mod tour;
pub mod user;
