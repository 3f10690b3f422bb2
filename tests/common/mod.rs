//! Shared fixture: the 49 contiguous US states (plus DC) with census-style
//! attributes and rectangular footprints.

#![allow(dead_code)]

use geo_types::{coord, Geometry, MultiPolygon, Rect};
use std::collections::BTreeSet;
use vibegeo::access::MemorySource;
use vibegeo::feature::{Envelope, Field, FieldType, GeometryKind, Schema, Value};
use vibegeo::{Cursor, QueryResult};

pub const GEOMETRY: &str = "the_geom";

/// The box around Texas used throughout the scenario tests
pub fn texas_box() -> Envelope {
    Envelope::new(-106.649513, 25.845198, -93.507217, 36.493877)
}

pub fn texas_box_abbrs() -> BTreeSet<String> {
    abbr_set(&["MO", "OK", "TX", "NM", "AR", "LA"])
}

struct State {
    name: &'static str,
    fips: &'static str,
    region: &'static str,
    abbr: &'static str,
    pop: i64,
    male: f64,
    female: f64,
    bbox: [f64; 4],
}

#[rustfmt::skip]
const STATES: &[State] = &[
    State { name: "Alabama", fips: "01", region: "E S Cen", abbr: "AL", pop: 1_044_364, male: 0.481, female: 0.519, bbox: [-88.47, 30.22, -84.89, 35.01] },
    State { name: "Arizona", fips: "04", region: "Mtn", abbr: "AZ", pop: 975_212, male: 0.494, female: 0.506, bbox: [-114.82, 31.33, -109.04, 37.0] },
    State { name: "Arkansas", fips: "05", region: "W S Cen", abbr: "AR", pop: 612_106, male: 0.483, female: 0.517, bbox: [-94.62, 33.0, -89.64, 36.5] },
    State { name: "California", fips: "06", region: "Pacific", abbr: "CA", pop: 3_792_553, male: 0.501, female: 0.499, bbox: [-124.41, 32.53, -114.13, 42.01] },
    State { name: "Colorado", fips: "08", region: "Mtn", abbr: "CO", pop: 795_434, male: 0.497, female: 0.503, bbox: [-109.06, 36.99, -102.04, 41.0] },
    State { name: "Connecticut", fips: "09", region: "N Eng", abbr: "CT", pop: 802_771, male: 0.483, female: 0.517, bbox: [-73.73, 40.98, -71.79, 42.05] },
    State { name: "Delaware", fips: "10", region: "S Atl", abbr: "DE", pop: 169_407, male: 0.485, female: 0.515, bbox: [-75.79, 38.45, -75.05, 39.84] },
    State { name: "District of Columbia", fips: "11", region: "S Atl", abbr: "DC", pop: 122_087, male: 0.467, female: 0.533, bbox: [-77.12, 38.79, -76.91, 38.99] },
    State { name: "Florida", fips: "12", region: "S Atl", abbr: "FL", pop: 1_949_823, male: 0.484, female: 0.516, bbox: [-87.63, 24.96, -80.03, 31.0] },
    State { name: "Georgia", fips: "13", region: "S Atl", abbr: "GA", pop: 1_472_153, male: 0.487, female: 0.513, bbox: [-85.61, 30.36, -80.84, 35.0] },
    State { name: "Idaho", fips: "16", region: "Mtn", abbr: "ID", pop: 262_941, male: 0.496, female: 0.504, bbox: [-117.24, 41.99, -111.04, 49.0] },
    State { name: "Illinois", fips: "17", region: "E N Cen", abbr: "IL", pop: 1_867_651, male: 0.487, female: 0.513, bbox: [-91.51, 36.97, -87.5, 42.51] },
    State { name: "Indiana", fips: "18", region: "E N Cen", abbr: "IN", pop: 1_115_813, male: 0.486, female: 0.514, bbox: [-88.1, 37.77, -84.78, 41.76] },
    State { name: "Iowa", fips: "19", region: "W N Cen", abbr: "IA", pop: 617_432, male: 0.484, female: 0.516, bbox: [-96.64, 40.38, -90.14, 43.5] },
    State { name: "Kansas", fips: "20", region: "W N Cen", abbr: "KS", pop: 535_094, male: 0.491, female: 0.509, bbox: [-102.05, 36.99, -94.59, 40.0] },
    State { name: "Kentucky", fips: "21", region: "E S Cen", abbr: "KY", pop: 922_711, male: 0.484, female: 0.516, bbox: [-89.57, 36.5, -81.96, 39.15] },
    State { name: "Louisiana", fips: "22", region: "W S Cen", abbr: "LA", pop: 939_037, male: 0.482, female: 0.518, bbox: [-94.04, 28.93, -88.82, 33.02] },
    State { name: "Maine", fips: "23", region: "N Eng", abbr: "ME", pop: 300_692, male: 0.486, female: 0.514, bbox: [-71.08, 43.06, -66.96, 47.46] },
    State { name: "Maryland", fips: "24", region: "S Atl", abbr: "MD", pop: 776_575, male: 0.484, female: 0.516, bbox: [-79.49, 37.91, -75.05, 39.72] },
    State { name: "Massachusetts", fips: "25", region: "N Eng", abbr: "MA", pop: 1_002_453, male: 0.481, female: 0.519, bbox: [-73.51, 41.24, -69.93, 42.89] },
    State { name: "Michigan", fips: "26", region: "E N Cen", abbr: "MI", pop: 1_505_207, male: 0.487, female: 0.513, bbox: [-90.42, 41.7, -82.41, 48.31] },
    State { name: "Minnesota", fips: "27", region: "W N Cen", abbr: "MN", pop: 764_418, male: 0.492, female: 0.508, bbox: [-97.24, 43.5, -89.49, 49.37] },
    State { name: "Mississippi", fips: "28", region: "E S Cen", abbr: "MS", pop: 627_011, male: 0.480, female: 0.520, bbox: [-91.66, 30.17, -88.1, 35.0] },
    State { name: "Missouri", fips: "29", region: "W N Cen", abbr: "MO", pop: 1_009_016, male: 0.485, female: 0.515, bbox: [-95.77, 35.99, -89.1, 40.61] },
    State { name: "Montana", fips: "30", region: "Mtn", abbr: "MT", pop: 199_465, male: 0.496, female: 0.504, bbox: [-116.05, 44.36, -104.04, 49.0] },
    State { name: "Nebraska", fips: "31", region: "W N Cen", abbr: "NE", pop: 335_902, male: 0.490, female: 0.510, bbox: [-104.05, 40.0, -95.31, 43.0] },
    State { name: "Nevada", fips: "32", region: "Mtn", abbr: "NV", pop: 196_281, male: 0.503, female: 0.497, bbox: [-120.01, 35.0, -114.04, 42.0] },
    State { name: "New Hampshire", fips: "33", region: "N Eng", abbr: "NH", pop: 230_803, male: 0.489, female: 0.511, bbox: [-72.56, 42.7, -70.61, 45.31] },
    State { name: "New Jersey", fips: "34", region: "Mid Atl", abbr: "NJ", pop: 1_325_466, male: 0.482, female: 0.518, bbox: [-75.56, 38.93, -73.89, 41.36] },
    State { name: "New Mexico", fips: "35", region: "Mtn", abbr: "NM", pop: 312_016, male: 0.491, female: 0.509, bbox: [-109.05, 31.33, -103.0, 37.0] },
    State { name: "New York", fips: "36", region: "Mid Atl", abbr: "NY", pop: 2_836_089, male: 0.479, female: 0.521, bbox: [-79.76, 40.5, -71.86, 45.02] },
    State { name: "North Carolina", fips: "37", region: "S Atl", abbr: "NC", pop: 1_480_362, male: 0.485, female: 0.515, bbox: [-84.32, 33.84, -75.46, 36.59] },
    State { name: "North Dakota", fips: "38", region: "W N Cen", abbr: "ND", pop: 137_272, male: 0.496, female: 0.504, bbox: [-104.05, 45.94, -96.55, 49.0] },
    State { name: "Ohio", fips: "39", region: "E N Cen", abbr: "OH", pop: 1_897_796, male: 0.483, female: 0.517, bbox: [-84.82, 38.4, -80.52, 41.98] },
    State { name: "Oklahoma", fips: "40", region: "W S Cen", abbr: "OK", pop: 700_397, male: 0.487, female: 0.513, bbox: [-103.0, 33.62, -94.43, 37.0] },
    State { name: "Oregon", fips: "41", region: "Pacific", abbr: "OR", pop: 640_522, male: 0.492, female: 0.508, bbox: [-124.57, 41.99, -116.46, 46.29] },
    State { name: "Pennsylvania", fips: "42", region: "Mid Atl", abbr: "PA", pop: 2_015_478, male: 0.479, female: 0.521, bbox: [-80.52, 39.72, -74.69, 42.27] },
    State { name: "Rhode Island", fips: "44", region: "N Eng", abbr: "RI", pop: 159_335, male: 0.479, female: 0.521, bbox: [-71.86, 41.15, -71.12, 42.02] },
    State { name: "South Carolina", fips: "45", region: "S Atl", abbr: "SC", pop: 749_057, male: 0.484, female: 0.516, bbox: [-83.35, 32.03, -78.54, 35.22] },
    State { name: "South Dakota", fips: "46", region: "W N Cen", abbr: "SD", pop: 142_087, male: 0.494, female: 0.506, bbox: [-104.06, 42.48, -96.44, 45.95] },
    State { name: "Tennessee", fips: "47", region: "E S Cen", abbr: "TN", pop: 1_282_144, male: 0.483, female: 0.517, bbox: [-90.31, 34.98, -81.65, 36.68] },
    State { name: "Texas", fips: "48", region: "W S Cen", abbr: "TX", pop: 2_674_169, male: 0.491, female: 0.509, bbox: [-106.65, 25.84, -93.51, 36.5] },
    State { name: "Utah", fips: "49", region: "Mtn", abbr: "UT", pop: 303_936, male: 0.498, female: 0.502, bbox: [-114.05, 37.0, -109.04, 42.0] },
    State { name: "Vermont", fips: "50", region: "N Eng", abbr: "VT", pop: 117_847, male: 0.488, female: 0.512, bbox: [-73.44, 42.73, -71.46, 45.02] },
    State { name: "Virginia", fips: "51", region: "S Atl", abbr: "VA", pop: 1_239_411, male: 0.487, female: 0.513, bbox: [-83.68, 36.54, -75.24, 39.47] },
    State { name: "Washington", fips: "53", region: "Pacific", abbr: "WA", pop: 1_093_472, male: 0.494, female: 0.506, bbox: [-124.73, 45.54, -116.92, 49.0] },
    State { name: "West Virginia", fips: "54", region: "S Atl", abbr: "WV", pop: 461_054, male: 0.485, female: 0.515, bbox: [-82.64, 37.2, -77.72, 40.64] },
    State { name: "Wisconsin", fips: "55", region: "E N Cen", abbr: "WI", pop: 876_547, male: 0.489, female: 0.511, bbox: [-92.89, 42.49, -86.25, 47.08] },
    State { name: "Wyoming", fips: "56", region: "Mtn", abbr: "WY", pop: 101_327, male: 0.5, female: 0.5, bbox: [-111.06, 40.99, -104.05, 45.01] },
];

pub fn schema() -> Schema {
    Schema::new(vec![
        Field::new(GEOMETRY, FieldType::Geometry(GeometryKind::MultiPolygon)),
        Field::new("STATE_NAME", FieldType::Text),
        Field::new("STATE_FIPS", FieldType::Text),
        Field::new("SUB_REGION", FieldType::Text),
        Field::new("STATE_ABBR", FieldType::Text),
        Field::new("SAMP_POP", FieldType::Integer),
        Field::new("P_MALE", FieldType::Float),
        Field::new("P_FEMALE", FieldType::Float),
    ])
    .unwrap()
}

fn footprint(bbox: [f64; 4]) -> Geometry<f64> {
    let rect = Rect::new(
        coord! { x: bbox[0], y: bbox[1] },
        coord! { x: bbox[2], y: bbox[3] },
    );
    MultiPolygon::new(vec![rect.to_polygon()]).into()
}

/// The "states" dataset, ids `states.1` to `states.49` in alphabetical order
pub fn states() -> MemorySource {
    let mut source = MemorySource::new("states", schema());
    for (i, state) in STATES.iter().enumerate() {
        source
            .insert(
                format!("states.{}", i + 1),
                vec![
                    Value::Geometry(footprint(state.bbox)),
                    Value::from(state.name),
                    Value::from(state.fips),
                    Value::from(state.region),
                    Value::from(state.abbr),
                    Value::Integer(state.pop),
                    Value::Float(state.male),
                    Value::Float(state.female),
                ],
            )
            .unwrap();
    }
    source
}

pub fn abbr_set(abbrs: &[&str]) -> BTreeSet<String> {
    abbrs.iter().map(|a| a.to_string()).collect()
}

/// Drain a cursor into the list of STATE_ABBR values it yields
pub fn abbrs(mut cursor: Cursor<'_>) -> QueryResult<Vec<String>> {
    let mut out = Vec::new();
    while cursor.has_next()? {
        let feature = cursor.next()?;
        let abbr = feature
            .get("STATE_ABBR")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        out.push(abbr);
    }
    Ok(out)
}

/// Like `abbrs`, as a set
pub fn abbrs_set(cursor: Cursor<'_>) -> QueryResult<BTreeSet<String>> {
    Ok(abbrs(cursor)?.into_iter().collect())
}
