// src/domain/property.rs

/// One listing section pulled out of a profile's `latest.md`.
///
/// Records are only built when the mandatory price/beds/baths/sqft/year group
/// parsed as a whole, so those fields are never optional here.
#[derive(Debug, PartialEq, Clone)]
pub struct PropertyRecord {
    /// Position from the `### #<rank>:` heading, not the display order.
    pub rank: u32,
    pub address: String,

    // Mandatory group
    pub price: u64,
    pub beds: u32,
    pub baths: f64,
    pub sqft: u64,
    pub year_built: u16,

    // Optional markers
    pub estimated_value: Option<u64>,
    /// Percentage difference between list price and estimate, may be negative.
    pub value_gap: Option<f64>,
    pub distance_miles: Option<f64>,
    pub listing_url: Option<String>,
    pub photos: Vec<String>,
}

impl PropertyRecord {
    /// Street part of the address (everything before the first comma).
    pub fn street(&self) -> &str {
        self.address
            .split(',')
            .next()
            .map(str::trim)
            .unwrap_or(&self.address)
    }

    /// Whether the record can take part in year-based ranking.
    pub fn has_year_built(&self) -> bool {
        self.year_built > 0
    }
}

#[cfg(test)]
pub(crate) fn sample_record(rank: u32, year_built: u16) -> PropertyRecord {
    PropertyRecord {
        rank,
        address: format!("{rank} Main St, Livingston, TX 77351"),
        price: 250_000,
        beds: 3,
        baths: 2.0,
        sqft: 1_500,
        year_built,
        estimated_value: None,
        value_gap: None,
        distance_miles: None,
        listing_url: None,
        photos: Vec::new(),
    }
}
