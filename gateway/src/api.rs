use serde::{Deserialize, Serialize};
use serde_json::Value;

use outing_core::llm::ActivityRequest;

/// Treat empty strings like absent ones.
fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// Input: GET /api/places
#[derive(Debug, Default, Deserialize)]
pub struct PlacesQuery {
    pub query: Option<String>,
    pub ll: Option<String>,
}

impl PlacesQuery {
    /// Both parameters, or `None` if either is missing.
    pub fn required(self) -> Option<(String, String)> {
        Some((present(self.query)?, present(self.ll)?))
    }
}

// Input: GET /api/places/image
#[derive(Debug, Default, Deserialize)]
pub struct PhotoQuery {
    pub fsq_id: Option<String>,
}

impl PhotoQuery {
    pub fn required(self) -> Option<String> {
        present(self.fsq_id)
    }
}

// Input: POST /api/ai-activities
#[derive(Debug, Default, Deserialize)]
pub struct ActivityForm {
    pub mood: Option<String>,
    pub weather: Option<String>,
    pub city: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
}

impl ActivityForm {
    pub fn required(self) -> Option<ActivityRequest> {
        Some(ActivityRequest {
            mood: present(self.mood)?,
            weather: present(self.weather)?,
            city: present(self.city)?,
            date: present(self.date)?,
            time: present(self.time)?,
        })
    }
}

// Output: GET /api/places/image
#[derive(Debug, Serialize)]
pub struct PhotosResponse {
    pub photos: Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_strings_count_as_missing() {
        let query = PlacesQuery {
            query: Some("coffee".into()),
            ll: Some(String::new()),
        };
        assert!(query.required().is_none());
        assert!(PhotoQuery { fsq_id: Some(String::new()) }.required().is_none());
    }

    #[test]
    fn complete_form_becomes_a_request() {
        let form: ActivityForm = serde_json::from_value(serde_json::json!({
            "mood": "calm",
            "weather": "rain",
            "city": "Bergen",
            "date": "2025-10-01",
            "time": "18:00",
            "extra": "ignored"
        }))
        .unwrap();
        let request = form.required().unwrap();
        assert_eq!(request.city, "Bergen");
        assert_eq!(request.time, "18:00");
    }

    #[test]
    fn partial_form_is_rejected() {
        let form = ActivityForm {
            mood: Some("calm".into()),
            ..ActivityForm::default()
        };
        assert!(form.required().is_none());
    }

    #[test]
    fn non_string_fields_do_not_deserialize() {
        let form = serde_json::from_value::<ActivityForm>(serde_json::json!({
            "mood": 5,
            "weather": "rain",
            "city": "Bergen",
            "date": "2025-10-01",
            "time": "18:00"
        }));
        assert!(form.is_err());
    }
}
