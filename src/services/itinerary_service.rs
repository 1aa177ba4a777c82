use chrono::{Duration, NaiveDate, Utc};

use crate::models::itinerary::{GenerateItineraryInput, Itinerary, ItineraryActivity};

const TRIP_LEAD_TIME_DAYS: i64 = 30;
const MAX_GENERATED_COUNTRIES: usize = 2;
const DEFAULT_COUNTRIES: [&str; 2] = ["Japan", "Thailand"];

pub struct ItineraryPlanner;

impl ItineraryPlanner {
    /// Trip length in days, `end - start`. None when the range is empty or
    /// inverted; callers treat that as a validation failure.
    pub fn duration_days(start: NaiveDate, end: NaiveDate) -> Option<i64> {
        let days = (end - start).num_days();
        if days > 0 {
            Some(days)
        } else {
            None
        }
    }

    /// Completed activities as a whole-number percentage, truncated. 0 when
    /// there are no activities.
    pub fn percent_complete(activities: &[ItineraryActivity]) -> u32 {
        if activities.is_empty() {
            return 0;
        }
        let completed = activities.iter().filter(|a| a.completed).count();
        (completed * 100 / activities.len()) as u32
    }

    /// Share of the budget already spent, as a percentage rounded to one
    /// decimal. 0 when there is no budget to spend against.
    pub fn percent_budget_used(total_budget: f64, remaining_budget: f64) -> f64 {
        if total_budget <= 0.0 {
            return 0.0;
        }
        let used = (total_budget - remaining_budget) / total_budget * 100.0;
        (used * 10.0).round() / 10.0
    }

    /// Days left before the trip starts; None once it has started or passed.
    pub fn days_until_trip(start: NaiveDate, today: NaiveDate) -> Option<i64> {
        let days = (start - today).num_days();
        if days >= 0 {
            Some(days)
        } else {
            None
        }
    }

    /// Remaining budget derived from activity costs. Used when the total
    /// budget is edited, so the stored value cannot drift.
    pub fn remaining_budget(total_budget: f64, activities: &[ItineraryActivity]) -> f64 {
        let spent: f64 = activities.iter().map(|a| a.cost).sum();
        total_budget - spent
    }

    /// Candidate countries for an auto-generated trip, at most two per trip
    /// type. Unknown types get the default pairing.
    pub fn countries_for_trip_type(trip_type: &str) -> Vec<String> {
        let countries: &[&str] = match trip_type {
            "cultural" => &["Japan", "China"],
            // "aventure" is the legacy spelling still sent by older clients
            "adventure" | "aventure" => &["Thailand", "Vietnam"],
            "relax" => &["Indonesia", "Philippines"],
            "gastronomy" => &["Thailand", "Japan"],
            "shopping" => &["Singapore", "South Korea"],
            _ => &DEFAULT_COUNTRIES,
        };

        countries
            .iter()
            .take(MAX_GENERATED_COUNTRIES)
            .map(|c| c.to_string())
            .collect()
    }

    /// Plan an itinerary from the generation form: countries from the trip
    /// type, start 30 days out, end after the requested duration. The owner
    /// is filled in by the caller.
    pub fn generate(input: &GenerateItineraryInput, today: NaiveDate) -> Option<Itinerary> {
        if input.duration_days <= 0 {
            return None;
        }

        let countries = Self::countries_for_trip_type(&input.trip_type);
        let start_date = today + Duration::days(TRIP_LEAD_TIME_DAYS);
        let end_date = start_date + Duration::days(input.duration_days);
        let total_budget = input.budget.unwrap_or(0.0);

        let travelers = input.adults.unwrap_or(1) + input.children.unwrap_or(0);
        let now = Utc::now();

        Some(Itinerary {
            id: None,
            user_id: None,
            trip_name: format!(
                "{} trip: {}",
                capitalize(&input.trip_type),
                countries.join(" & ")
            ),
            description: Some(format!(
                "Auto-generated {} itinerary for {} traveler(s)",
                input.trip_type, travelers
            )),
            countries,
            cities: Vec::new(),
            start_date,
            end_date,
            duration_days: input.duration_days,
            total_budget,
            remaining_budget: total_budget,
            activities: Vec::new(),
            transport: Vec::new(),
            status: "planning".to_string(),
            priority: None,
            favorite: false,
            generated_by_ai: true,
            created_at: Some(now),
            updated_at: Some(now),
        })
    }

    /// Deep copy for the duplicate operation: fresh identity, activities
    /// cleared, budget reset, "(Copia)" suffix on the name.
    pub fn duplicate(original: &Itinerary) -> Itinerary {
        let now = Utc::now();
        let mut copy = original.clone();
        copy.id = None;
        copy.trip_name = format!("{} (Copia)", original.trip_name);
        copy.activities = Vec::new();
        copy.remaining_budget = copy.total_budget;
        copy.created_at = Some(now);
        copy.updated_at = Some(now);
        copy
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::itinerary::ItineraryActivity;
    use uuid::Uuid;

    fn activity(cost: f64, completed: bool) -> ItineraryActivity {
        ItineraryActivity {
            id: Uuid::new_v4(),
            country: "Japan".to_string(),
            city: "Tokyo".to_string(),
            description: "Senso-ji temple".to_string(),
            activity_type: Some("cultural".to_string()),
            cost,
            date: None,
            completed,
            created_at: None,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_duration_days() {
        assert_eq!(
            ItineraryPlanner::duration_days(date(2025, 3, 1), date(2025, 3, 11)),
            Some(10)
        );
        // end before start and zero-length trips are both invalid
        assert_eq!(
            ItineraryPlanner::duration_days(date(2025, 3, 11), date(2025, 3, 1)),
            None
        );
        assert_eq!(
            ItineraryPlanner::duration_days(date(2025, 3, 1), date(2025, 3, 1)),
            None
        );
    }

    #[test]
    fn test_percent_complete_truncates() {
        assert_eq!(ItineraryPlanner::percent_complete(&[]), 0);

        let activities = vec![
            activity(10.0, true),
            activity(20.0, false),
            activity(30.0, false),
        ];
        assert_eq!(ItineraryPlanner::percent_complete(&activities), 33);

        let all_done = vec![activity(10.0, true), activity(20.0, true)];
        assert_eq!(ItineraryPlanner::percent_complete(&all_done), 100);
    }

    #[test]
    fn test_percent_budget_used() {
        assert_eq!(ItineraryPlanner::percent_budget_used(1000.0, 750.0), 25.0);
        assert_eq!(ItineraryPlanner::percent_budget_used(0.0, 0.0), 0.0);
        assert_eq!(ItineraryPlanner::percent_budget_used(-50.0, 0.0), 0.0);
        // rounded to one decimal
        assert_eq!(ItineraryPlanner::percent_budget_used(300.0, 200.0), 33.3);
    }

    #[test]
    fn test_days_until_trip() {
        let today = date(2025, 6, 1);
        assert_eq!(
            ItineraryPlanner::days_until_trip(date(2025, 6, 15), today),
            Some(14)
        );
        assert_eq!(ItineraryPlanner::days_until_trip(today, today), Some(0));
        assert_eq!(ItineraryPlanner::days_until_trip(date(2025, 5, 20), today), None);
    }

    #[test]
    fn test_remaining_budget_recompute() {
        let activities = vec![activity(120.0, false), activity(80.0, true)];
        assert_eq!(ItineraryPlanner::remaining_budget(500.0, &activities), 300.0);
        assert_eq!(ItineraryPlanner::remaining_budget(500.0, &[]), 500.0);
    }

    #[test]
    fn test_countries_for_trip_type() {
        assert_eq!(
            ItineraryPlanner::countries_for_trip_type("cultural"),
            vec!["Japan", "China"]
        );
        assert_eq!(
            ItineraryPlanner::countries_for_trip_type("aventure"),
            ItineraryPlanner::countries_for_trip_type("adventure")
        );
        // unknown types fall back to the default pairing
        assert_eq!(
            ItineraryPlanner::countries_for_trip_type("space-tourism"),
            vec!["Japan", "Thailand"]
        );
    }

    #[test]
    fn test_generate_plans_dates_and_flags() {
        let input = GenerateItineraryInput {
            trip_type: "relax".to_string(),
            adults: Some(2),
            children: Some(1),
            duration_days: 10,
            budget: Some(3000.0),
        };
        let today = date(2025, 6, 1);

        let itinerary = ItineraryPlanner::generate(&input, today).unwrap();
        assert_eq!(itinerary.start_date, date(2025, 7, 1));
        assert_eq!(itinerary.end_date, date(2025, 7, 11));
        assert_eq!(itinerary.duration_days, 10);
        assert_eq!(itinerary.countries, vec!["Indonesia", "Philippines"]);
        assert_eq!(itinerary.status, "planning");
        assert_eq!(itinerary.remaining_budget, 3000.0);
        assert!(itinerary.generated_by_ai);
    }

    #[test]
    fn test_generate_rejects_non_positive_duration() {
        let input = GenerateItineraryInput {
            trip_type: "cultural".to_string(),
            adults: None,
            children: None,
            duration_days: 0,
            budget: None,
        };
        assert!(ItineraryPlanner::generate(&input, date(2025, 6, 1)).is_none());
    }

    #[test]
    fn test_duplicate_resets_activities_and_budget() {
        let mut original = ItineraryPlanner::generate(
            &GenerateItineraryInput {
                trip_type: "cultural".to_string(),
                adults: Some(2),
                children: None,
                duration_days: 7,
                budget: Some(2000.0),
            },
            date(2025, 6, 1),
        )
        .unwrap();
        original.id = Some(mongodb::bson::oid::ObjectId::new());
        original.activities = vec![activity(100.0, true), activity(50.0, false)];
        original.remaining_budget = 1850.0;

        let copy = ItineraryPlanner::duplicate(&original);
        assert!(copy.id.is_none());
        assert!(copy.trip_name.ends_with("(Copia)"));
        assert!(copy.activities.is_empty());
        assert_eq!(copy.remaining_budget, copy.total_budget);
        assert_eq!(copy.total_budget, 2000.0);
    }
}
