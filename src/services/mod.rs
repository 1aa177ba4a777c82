pub mod itinerary_service;
pub mod quote_service;
