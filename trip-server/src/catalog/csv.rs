//! OPIS price file loader.
//!
//! Parses the OPIS truckstop CSV export. The file carries station
//! identity, pricing and pre-resolved coordinates:
//!
//! ```text
//! OPIS Truckstop ID,Truckstop Name,Address,City,State,Rack ID,Retail Price,Latitude,Longitude
//! ```
//!
//! Malformed rows are logged and skipped rather than failing the load;
//! a price file with a few bad rows is still useful. Duplicate station
//! ids keep their first occurrence.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::domain::{Coord, Station, StationId};

use super::error::CatalogError;

/// Column indices resolved from the header row.
struct Columns {
    station_id: usize,
    name: usize,
    address: usize,
    city: usize,
    state: usize,
    rack_id: usize,
    retail_price: usize,
    latitude: usize,
    longitude: usize,
}

impl Columns {
    fn resolve(header: &[String]) -> Result<Self, CatalogError> {
        let find = |name: &'static str| {
            header
                .iter()
                .position(|h| h.eq_ignore_ascii_case(name))
                .ok_or(CatalogError::MissingColumn(name))
        };

        Ok(Self {
            station_id: find("OPIS Truckstop ID")?,
            name: find("Truckstop Name")?,
            address: find("Address")?,
            city: find("City")?,
            state: find("State")?,
            rack_id: find("Rack ID")?,
            retail_price: find("Retail Price")?,
            latitude: find("Latitude")?,
            longitude: find("Longitude")?,
        })
    }
}

/// Load stations from an OPIS CSV file.
///
/// # Errors
///
/// Fails if the file cannot be read, the header is missing a required
/// column, or no row parses.
pub fn load_stations(path: impl AsRef<Path>) -> Result<Vec<Arc<Station>>, CatalogError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut lines = contents.lines();
    let header = lines
        .next()
        .map(split_csv_line)
        .ok_or_else(|| CatalogError::MissingHeader(path.to_path_buf()))?;
    let columns = Columns::resolve(&header)?;

    let mut seen: HashSet<StationId> = HashSet::new();
    let mut stations = Vec::new();

    for (line_no, line) in lines.enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        match parse_row(&split_csv_line(line), &columns) {
            Ok(station) => {
                // First occurrence wins on duplicate ids.
                if seen.insert(station.id) {
                    stations.push(Arc::new(station));
                }
            }
            Err(reason) => {
                tracing::warn!(line = line_no + 2, %reason, "skipping malformed station row");
            }
        }
    }

    if stations.is_empty() {
        return Err(CatalogError::Empty(path.to_path_buf()));
    }

    Ok(stations)
}

fn parse_row(fields: &[String], columns: &Columns) -> Result<Station, String> {
    let field = |idx: usize, name: &str| {
        fields
            .get(idx)
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .ok_or_else(|| format!("missing {name}"))
    };

    let id: u32 = field(columns.station_id, "OPIS Truckstop ID")?
        .parse()
        .map_err(|_| "OPIS Truckstop ID is not an integer".to_string())?;
    let rack_id: u32 = field(columns.rack_id, "Rack ID")?
        .parse()
        .map_err(|_| "Rack ID is not an integer".to_string())?;

    let price: Decimal = field(columns.retail_price, "Retail Price")?
        .parse()
        .map_err(|_| "Retail Price is not a decimal".to_string())?;
    if price <= Decimal::ZERO {
        return Err("Retail Price must be positive".to_string());
    }

    let lat: f64 = field(columns.latitude, "Latitude")?
        .parse()
        .map_err(|_| "Latitude is not a number".to_string())?;
    let lng: f64 = field(columns.longitude, "Longitude")?
        .parse()
        .map_err(|_| "Longitude is not a number".to_string())?;
    let position = Coord::new(lat, lng).map_err(|e| e.to_string())?;

    Ok(Station {
        id: StationId(id),
        name: field(columns.name, "Truckstop Name")?.to_string(),
        address: field(columns.address, "Address")?.to_string(),
        city: field(columns.city, "City")?.to_string(),
        state: field(columns.state, "State")?.to_string(),
        rack_id,
        price_per_gallon: price,
        position,
    })
}

/// Split a CSV line on commas, honouring double-quoted fields.
///
/// Truckstop names like `"BOB'S, BIG RIG STOP"` contain commas, so a
/// plain split is not enough. Doubled quotes inside a quoted field
/// unescape to a single quote.
fn split_csv_line(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    current.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}
