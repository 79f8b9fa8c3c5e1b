use chrono::{NaiveDate, NaiveDateTime};

use super::*;
use crate::models::{AmenityId, DailyHours, DayOfWeek, PromotionalWindow, TimeOfDay, WeeklySchedule};

fn t(s: &str) -> TimeOfDay {
    s.parse().unwrap()
}

// 2024-01-05 is a Friday.
fn friday_at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 5)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

fn venue(id: i64, name: &str, rating: Option<u8>, coords: Option<(f64, f64)>) -> Venue {
    Venue {
        id: VenueId::new(id),
        name: name.to_string(),
        brand: None,
        address: format!("{} Main St", id),
        city: "Chicago".to_string(),
        state: "IL".to_string(),
        zip: "60601".to_string(),
        latitude: coords.map(|c| c.0),
        longitude: coords.map(|c| c.1),
        phone: None,
        website: None,
        star_rating: rating,
        has_amenity: true,
    }
}

fn bar(id: i64, venue_id: i64, category: AmenityCategory) -> Amenity {
    Amenity {
        id: AmenityId::new(id),
        venue_id: VenueId::new(venue_id),
        name: None,
        category,
        serves_food: false,
        hours: WeeklySchedule::new()
            .with_day(DayOfWeek::Friday, DailyHours::new(t("16:00"), t("02:00"))),
        happy_hour: None,
        features: vec![],
        phone_number: None,
        description: None,
    }
}

fn names(results: &[RankedResult]) -> Vec<&str> {
    results.iter().map(|r| r.venue.name.as_str()).collect()
}

const CHICAGO: Coordinates = Coordinates {
    latitude: 41.8781,
    longitude: -87.6298,
};

#[test]
fn test_empty_input_is_empty_output() {
    let filters = Filters {
        open_now: true,
        happy_hour: true,
        rooftop: true,
        ..Default::default()
    };
    let results = aggregate(vec![], vec![], &filters, Some(CHICAGO), &friday_at(17, 0)).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_join_keeps_amenity_order_and_empty_venues() {
    let venues = vec![venue(1, "Alpha", None, None), venue(2, "Beta", None, None)];
    let amenities = vec![
        bar(11, 1, AmenityCategory::Lounge),
        bar(12, 1, AmenityCategory::Rooftop),
        bar(99, 42, AmenityCategory::Bar),
    ];
    let results = aggregate(
        venues,
        amenities,
        &Filters::default(),
        None,
        &friday_at(17, 0),
    )
    .unwrap();

    assert_eq!(results.len(), 2);
    let alpha = results.iter().find(|r| r.venue.name == "Alpha").unwrap();
    let ids: Vec<i64> = alpha.amenities.iter().map(|a| a.amenity.id.value()).collect();
    assert_eq!(ids, vec![11, 12]);
    let beta = results.iter().find(|r| r.venue.name == "Beta").unwrap();
    assert!(beta.amenities.is_empty());
}

#[test]
fn test_status_is_computed_per_amenity() {
    let mut happy = bar(11, 1, AmenityCategory::Bar);
    happy.happy_hour = Some(PromotionalWindow::new([DayOfWeek::Friday], t("16:00"), t("18:00")));
    let results = aggregate(
        vec![venue(1, "Alpha", None, None)],
        vec![happy],
        &Filters::default(),
        None,
        &friday_at(17, 0),
    )
    .unwrap();

    let status = &results[0].amenities[0].status;
    assert!(status.schedule.is_open);
    assert_eq!(status.schedule.message, "Open until 2:00 AM");
    assert_eq!(
        status.happy_hour.as_ref().unwrap().description,
        "Happy Hour 4:00 PM-6:00 PM"
    );
}

#[test]
fn test_distance_only_with_reference_and_coordinates() {
    let venues = vec![
        venue(1, "Located", None, Some((41.8902, -87.6240))),
        venue(2, "Unlocated", None, None),
    ];
    let with_ref = aggregate(
        venues.clone(),
        vec![],
        &Filters::default(),
        Some(CHICAGO),
        &friday_at(17, 0),
    )
    .unwrap();
    assert!(with_ref[0].distance.is_some());
    assert!(with_ref[0].distance_label.is_some());
    assert!(with_ref[1].distance.is_none());

    let without_ref = aggregate(
        venues,
        vec![],
        &Filters::default(),
        None,
        &friday_at(17, 0),
    )
    .unwrap();
    assert!(without_ref.iter().all(|r| r.distance.is_none()));
}

#[test]
fn test_invalid_venue_coordinate_is_a_computation_error() {
    let venues = vec![venue(1, "Broken", None, Some((f64::NAN, -87.6)))];
    let err = aggregate(
        venues,
        vec![],
        &Filters::default(),
        Some(CHICAGO),
        &friday_at(17, 0),
    )
    .unwrap_err();
    assert_eq!(err.code(), "COMPUTATION_ERROR");
}

#[test]
fn test_filters_use_primary_amenity_only() {
    let venues = vec![venue(1, "Alpha", None, None)];
    let amenities = vec![
        bar(11, 1, AmenityCategory::Lounge),
        bar(12, 1, AmenityCategory::Rooftop),
    ];
    let filters = Filters {
        rooftop: true,
        ..Default::default()
    };
    let results = aggregate(venues, amenities, &filters, None, &friday_at(17, 0)).unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_venue_without_amenities_fails_amenity_filters() {
    let filters = Filters {
        serves_food: true,
        ..Default::default()
    };
    let results = aggregate(
        vec![venue(1, "Alpha", None, None)],
        vec![],
        &filters,
        None,
        &friday_at(17, 0),
    )
    .unwrap();
    assert!(results.is_empty());
}

#[test]
fn test_each_boolean_filter() {
    let venues = vec![
        venue(1, "Food", None, None),
        venue(2, "Music", None, None),
        venue(3, "Patio", None, None),
        venue(4, "Closed", None, None),
        venue(5, "Happy", None, None),
    ];
    let mut food = bar(11, 1, AmenityCategory::RestaurantBar);
    food.serves_food = true;
    let mut music = bar(12, 2, AmenityCategory::Bar);
    music.features = vec!["live-music".to_string()];
    let mut patio = bar(13, 3, AmenityCategory::Poolside);
    patio.features = vec!["outdoor_seating".to_string()];
    let mut closed = bar(14, 4, AmenityCategory::Bar);
    closed.hours = WeeklySchedule::new();
    let mut happy = bar(15, 5, AmenityCategory::Bar);
    happy.happy_hour = Some(PromotionalWindow::new([DayOfWeek::Friday], t("16:00"), t("18:00")));
    let amenities = vec![food, music, patio, closed, happy];

    let run = |filters: Filters| {
        let results = aggregate(
            venues.clone(),
            amenities.clone(),
            &filters,
            None,
            &friday_at(17, 0),
        )
        .unwrap();
        names(&results).into_iter().map(str::to_string).collect::<Vec<_>>()
    };

    assert_eq!(run(Filters { serves_food: true, ..Default::default() }), vec!["Food"]);
    assert_eq!(run(Filters { live_music: true, ..Default::default() }), vec!["Music"]);
    assert_eq!(run(Filters { outdoor_seating: true, ..Default::default() }), vec!["Patio"]);
    assert_eq!(run(Filters { happy_hour: true, ..Default::default() }), vec!["Happy"]);
    assert_eq!(
        run(Filters { open_now: true, ..Default::default() }),
        vec!["Food", "Music", "Patio", "Happy"]
    );
    assert_eq!(
        run(Filters { category: Some(AmenityCategory::Poolside), ..Default::default() }),
        vec!["Patio"]
    );
    assert!(run(Filters { serves_food: true, live_music: true, ..Default::default() }).is_empty());
}

#[test]
fn test_sort_by_distance_missing_last() {
    let venues = vec![
        venue(1, "Unknown", None, None),
        venue(2, "Far", None, Some((41.9500, -87.6500))),
        venue(3, "Near", None, Some((41.8800, -87.6300))),
    ];
    let results = aggregate(
        venues,
        vec![],
        &Filters::default(),
        Some(CHICAGO),
        &friday_at(17, 0),
    )
    .unwrap();
    assert_eq!(names(&results), vec!["Near", "Far", "Unknown"]);
}

#[test]
fn test_sort_by_rating_descending_missing_as_zero() {
    let venues = vec![
        venue(1, "Unrated", None, None),
        venue(2, "Three", Some(3), None),
        venue(3, "Five", Some(5), None),
        venue(4, "AlsoThree", Some(3), None),
    ];
    let filters = Filters {
        sort_by: SortKey::Rating,
        ..Default::default()
    };
    let results = aggregate(venues, vec![], &filters, None, &friday_at(17, 0)).unwrap();
    // Ties keep their input order.
    assert_eq!(names(&results), vec!["Five", "Three", "AlsoThree", "Unrated"]);
}

#[test]
fn test_sort_by_name_case_insensitive() {
    let venues = vec![
        venue(1, "zephyr Hotel", None, None),
        venue(2, "Aria", None, None),
        venue(3, "bellweather", None, None),
    ];
    let filters = Filters {
        sort_by: SortKey::Name,
        ..Default::default()
    };
    let results = aggregate(venues, vec![], &filters, None, &friday_at(17, 0)).unwrap();
    assert_eq!(names(&results), vec!["Aria", "bellweather", "zephyr Hotel"]);
}

#[test]
fn test_sort_by_name_folds_accents() {
    let venues = vec![
        venue(1, "Zeta", None, None),
        venue(2, "Équinox", None, None),
        venue(3, "Aria", None, None),
        venue(4, "Eden", None, None),
        venue(5, "Åsa Lounge", None, None),
    ];
    let filters = Filters {
        sort_by: SortKey::Name,
        ..Default::default()
    };
    let results = aggregate(venues, vec![], &filters, None, &friday_at(17, 0)).unwrap();
    assert_eq!(names(&results), vec!["Aria", "Åsa Lounge", "Eden", "Équinox", "Zeta"]);
}

#[test]
fn test_sort_is_idempotent() {
    let venues = vec![
        venue(1, "B", Some(4), Some((41.90, -87.62))),
        venue(2, "A", Some(4), Some((41.87, -87.63))),
        venue(3, "C", None, None),
    ];
    for key in [SortKey::Distance, SortKey::Rating, SortKey::Name] {
        let filters = Filters {
            sort_by: key,
            ..Default::default()
        };
        let mut once = aggregate(
            venues.clone(),
            vec![],
            &filters,
            Some(CHICAGO),
            &friday_at(17, 0),
        )
        .unwrap();
        let snapshot = once.clone();
        sort_results(&mut once, key);
        assert_eq!(once, snapshot, "sort by {:?} not idempotent", key);
    }
}

#[test]
fn test_matches_filters_unrestricted_accepts_everything() {
    let results = aggregate(
        vec![venue(1, "Alpha", None, None)],
        vec![],
        &Filters::default(),
        None,
        &friday_at(17, 0),
    )
    .unwrap();
    assert!(matches_filters(&results[0], &Filters::default()));
}
