//! Sample listings for local development.
//!
//! Inserted through [`SpaceService::create`] so every sample passes the same
//! validation as API input. Each sample carries a single price tier.

use chrono::{TimeZone, Utc};
use space_rental_core::query::SpaceQuery;
use space_rental_core::space::{NewSpace, DEFAULT_COUNTRY};
use space_rental_core::types::Timestamp;
use space_rental_db::repositories::SpaceRepo;
use sqlx::PgPool;

use crate::error::AppResult;
use crate::services::SpaceService;

/// What [`seed`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The table already had rows; nothing was inserted.
    Skipped { existing: i64 },
    Inserted(usize),
}

#[derive(Clone, Copy)]
enum Tier {
    Hour(f64),
    Day(f64),
    Week(f64),
    Month(f64),
}

struct Sample {
    title: &'static str,
    description: &'static str,
    space_type: &'static str,
    location: &'static str,
    address: &'static str,
    city: &'static str,
    state: &'static str,
    zip_code: &'static str,
    tier: Tier,
    area_sqft: i32,
    max_capacity: i32,
    amenities: &'static [&'static str],
    is_available: bool,
}

const SAMPLES: &[Sample] = &[
    Sample {
        title: "Spacious 2-Car Garage in Downtown",
        description: "Perfect for storage or workshop. Clean, dry, and secure garage space with easy access.",
        space_type: "garage",
        location: "Downtown District",
        address: "123 Main Street",
        city: "San Francisco",
        state: "CA",
        zip_code: "94102",
        tier: Tier::Hour(15.0),
        area_sqft: 400,
        max_capacity: 4,
        amenities: &["Security Camera", "WiFi", "Parking", "Electricity"],
        is_available: true,
    },
    Sample {
        title: "Beautiful Backyard for Events",
        description: "Large, well-maintained backyard for parties and gatherings. Includes a seating area and garden.",
        space_type: "backyard",
        location: "Residential Area",
        address: "456 Oak Avenue",
        city: "Los Angeles",
        state: "CA",
        zip_code: "90210",
        tier: Tier::Day(200.0),
        area_sqft: 800,
        max_capacity: 50,
        amenities: &["Outdoor Seating", "Garden", "Restroom Access", "Parking"],
        is_available: true,
    },
    Sample {
        title: "Secure Basement Storage",
        description: "Dry, climate controlled basement space for seasonal items or business inventory.",
        space_type: "basement",
        location: "Suburban Area",
        address: "789 Pine Street",
        city: "Seattle",
        state: "WA",
        zip_code: "98101",
        tier: Tier::Month(1800.0),
        area_sqft: 300,
        max_capacity: 2,
        amenities: &["Climate Control", "Security", "Easy Access"],
        is_available: false,
    },
    Sample {
        title: "Modern Warehouse Space",
        description: "Large warehouse with loading dock access, high ceilings and excellent lighting.",
        space_type: "warehouse",
        location: "Industrial District",
        address: "321 Industrial Blvd",
        city: "Chicago",
        state: "IL",
        zip_code: "60601",
        tier: Tier::Week(2500.0),
        area_sqft: 2000,
        max_capacity: 100,
        amenities: &["Loading Dock", "High Ceilings", "Security", "Parking", "Restrooms"],
        is_available: true,
    },
    Sample {
        title: "Cozy Attic Studio",
        description: "Charming attic space for creative work, small meetings, or quiet storage. Natural light.",
        space_type: "attic",
        location: "Historic District",
        address: "555 Heritage Lane",
        city: "Boston",
        state: "MA",
        zip_code: "02101",
        tier: Tier::Hour(20.0),
        area_sqft: 250,
        max_capacity: 8,
        amenities: &["Natural Light", "WiFi", "Heating", "Quiet"],
        is_available: true,
    },
    Sample {
        title: "Premium Parking Space",
        description: "Covered parking space in a prime downtown location for daily commuters or event parking.",
        space_type: "parking_space",
        location: "Financial District",
        address: "777 Business Plaza",
        city: "New York",
        state: "NY",
        zip_code: "10001",
        tier: Tier::Day(45.0),
        area_sqft: 200,
        max_capacity: 1,
        amenities: &["Covered", "Security", "24/7 Access", "EV Charging"],
        is_available: true,
    },
];

fn year_bound(month: u32, day: u32) -> Option<Timestamp> {
    Utc.with_ymd_and_hms(2024, month, day, 0, 0, 0).single()
}

impl Sample {
    fn to_new_space(&self) -> NewSpace {
        let (mut hour, mut day, mut week, mut month) = (None, None, None, None);
        match self.tier {
            Tier::Hour(p) => hour = Some(p),
            Tier::Day(p) => day = Some(p),
            Tier::Week(p) => week = Some(p),
            Tier::Month(p) => month = Some(p),
        }

        NewSpace {
            title: self.title.to_string(),
            description: self.description.to_string(),
            space_type: self.space_type.to_string(),
            location: self.location.to_string(),
            address: self.address.to_string(),
            city: self.city.to_string(),
            state: self.state.to_string(),
            zip_code: self.zip_code.to_string(),
            country: DEFAULT_COUNTRY.to_string(),
            price_per_hour: hour,
            price_per_day: day,
            price_per_week: week,
            price_per_month: month,
            area_sqft: Some(self.area_sqft),
            max_capacity: Some(self.max_capacity),
            amenities: Some(self.amenities.iter().map(|a| a.to_string()).collect()),
            is_available: self.is_available,
            available_from: year_bound(1, 1),
            available_until: year_bound(12, 31),
            photos: None,
        }
    }
}

/// The fixed sample listings, ready for [`SpaceService::create`].
pub fn sample_spaces() -> Vec<NewSpace> {
    SAMPLES.iter().map(Sample::to_new_space).collect()
}

/// Insert the sample listings unless the table already holds spaces.
pub async fn seed(pool: &PgPool) -> AppResult<SeedOutcome> {
    let existing = SpaceRepo::count(pool, &SpaceQuery::default()).await?;
    if existing > 0 {
        tracing::info!(existing, "Spaces already present, skipping sample data");
        return Ok(SeedOutcome::Skipped { existing });
    }

    let service = SpaceService::new(pool);
    let samples = sample_spaces();
    let inserted = samples.len();
    for sample in samples {
        service.create(sample).await?;
    }

    tracing::info!(inserted, "Sample spaces inserted");
    Ok(SeedOutcome::Inserted(inserted))
}
