use serde::Serialize;

/// Predefined catalog package. The whole table is a compile-time constant;
/// nothing mutates it after startup.
#[derive(Debug, Serialize, Clone, Copy)]
pub struct Tour {
    pub key: &'static str,
    pub name: &'static str,
    pub country: &'static str,
    pub cities: &'static str,
    pub duration: &'static str,
    pub base_price: f64,
    pub included: &'static [&'static str],
    pub image: &'static str,
    pub description: &'static str,
}

pub static TOURS: &[Tour] = &[
    Tour {
        key: "japan",
        name: "Essential Japan Tour",
        country: "Japan",
        cities: "Tokyo, Kyoto, Osaka",
        duration: "10 days",
        base_price: 1500.0,
        included: &["4* hotels", "Domestic flights", "Tour guide", "Breakfasts"],
        image: "https://images.unsplash.com/photo-1493976040374-85c8e12f0c0e?w=600",
        description: "Discover the best of Japan: from modern Tokyo to the ancient temples of Kyoto.",
    },
    Tour {
        key: "thailand",
        name: "Thailand Adventure",
        country: "Thailand",
        cities: "Bangkok, Phuket, Chiang Mai",
        duration: "12 days",
        base_price: 1200.0,
        included: &["4* hotels", "Tours included", "Some meals", "Transport"],
        image: "https://images.unsplash.com/photo-1552465011-b4e21bf6e79a?w=600",
        description: "Paradise beaches, Buddhist temples and the vibrant nightlife of Bangkok.",
    },
    Tour {
        key: "vietnam",
        name: "Classic Vietnam",
        country: "Vietnam",
        cities: "Hanoi, Halong Bay, Ho Chi Minh",
        duration: "9 days",
        base_price: 900.0,
        included: &["3-4* hotels", "Halong Bay cruise", "All meals", "Local guide"],
        image: "https://images.unsplash.com/photo-1583417319070-4a69db38a482?w=600",
        description: "Explore the rich history and spectacular landscapes of Vietnam.",
    },
    Tour {
        key: "china",
        name: "Grand Tour of China",
        country: "China",
        cities: "Beijing, Shanghai, Great Wall",
        duration: "14 days",
        base_price: 1100.0,
        included: &["4* hotels", "Attraction tickets", "Bullet train", "Tour guide"],
        image: "https://images.unsplash.com/photo-1508804185872-d7badad00f7d?w=600",
        description: "Discover China's millennia-old culture and its modern marvels.",
    },
    Tour {
        key: "korea",
        name: "South Korea Complete",
        country: "South Korea",
        cities: "Seoul, Busan, Jeju Island",
        duration: "11 days",
        base_price: 1300.0,
        included: &["4* hotels", "Flight to Jeju", "K-pop tours", "Traditional meals"],
        image: "https://images.unsplash.com/photo-1534274867514-d5b47ef89ed7?w=600",
        description: "Experience Korea's unique blend of tradition and modernity.",
    },
    Tour {
        key: "indonesia",
        name: "Bali Paradise",
        country: "Indonesia",
        cities: "Bali, Ubud, Seminyak",
        duration: "8 days",
        base_price: 800.0,
        included: &["Luxury villas", "Spa and yoga", "Cultural tours", "Breakfasts"],
        image: "https://images.unsplash.com/photo-1537953773345-d172ccf13cf1?w=600",
        description: "Relax on the beaches and temples of the Indonesian paradise.",
    },
    Tour {
        key: "malaysia",
        name: "Diverse Malaysia",
        country: "Malaysia",
        cities: "Kuala Lumpur, Penang, Langkawi",
        duration: "10 days",
        base_price: 950.0,
        included: &["4* hotels", "Domestic flights", "City tours", "Breakfasts"],
        image: "https://images.unsplash.com/photo-1596422846543-75c6fc197f07?w=600",
        description: "Discover Malaysia's cultural and natural diversity.",
    },
    Tour {
        key: "singapore",
        name: "Modern Singapore",
        country: "Singapore",
        cities: "Singapore",
        duration: "5 days",
        base_price: 1400.0,
        included: &["5* hotel", "Attraction tickets", "Food tour", "Transport"],
        image: "https://images.unsplash.com/photo-1525625293386-3f8f99389edd?w=600",
        description: "Live the futuristic experience of the garden city of Singapore.",
    },
    Tour {
        key: "india",
        name: "Mystic India",
        country: "India",
        cities: "Delhi, Agra, Jaipur",
        duration: "12 days",
        base_price: 850.0,
        included: &["4* hotels", "Taj Mahal visit", "Local guide", "Breakfasts"],
        image: "https://images.unsplash.com/photo-1524492412937-b28074a5d7da?w=600",
        description: "Immerse yourself in the culture and spirituality of India.",
    },
    Tour {
        key: "philippines",
        name: "Philippine Islands",
        country: "Philippines",
        cities: "Palawan, Cebu, Boracay",
        duration: "10 days",
        base_price: 1100.0,
        included: &["Beach resorts", "Snorkel tours", "Inter-island transport", "Breakfasts"],
        image: "https://images.unsplash.com/photo-1558642084-fd07fae5282e?w=600",
        description: "Discover the most beautiful beaches in the world in the Philippines.",
    },
    Tour {
        key: "sri-lanka",
        name: "Pearl of the Indian Ocean",
        country: "Sri Lanka",
        cities: "Colombo, Kandy, Galle",
        duration: "9 days",
        base_price: 950.0,
        included: &["Boutique hotels", "Yala safari", "Mountain train", "Guide"],
        image: "https://images.unsplash.com/photo-1573804633921-5c87f5d3a1c9?w=600",
        description: "Explore the natural and cultural treasures of Sri Lanka.",
    },
    Tour {
        key: "cambodia",
        name: "Kingdom of Angkor",
        country: "Cambodia",
        cities: "Siem Reap, Phnom Penh",
        duration: "7 days",
        base_price: 750.0,
        included: &["4* hotels", "Angkor Wat entry", "History tour", "Breakfasts"],
        image: "https://images.unsplash.com/photo-1560169897-fc0cdbdfa4d5?w=600",
        description: "Marvel at the ancient temples of Angkor Wat.",
    },
];

pub fn find_tour(key: &str) -> Option<&'static Tour> {
    TOURS.iter().find(|tour| tour.key == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_tour_by_key() {
        let tour = find_tour("japan").unwrap();
        assert_eq!(tour.country, "Japan");
        assert_eq!(tour.base_price, 1500.0);

        assert!(find_tour("atlantis").is_none());
    }

    #[test]
    fn test_catalog_keys_are_unique() {
        for (i, tour) in TOURS.iter().enumerate() {
            assert!(
                TOURS.iter().skip(i + 1).all(|other| other.key != tour.key),
                "duplicate tour key: {}",
                tour.key
            );
        }
    }
}
