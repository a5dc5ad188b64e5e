//! State coordinate lookup for the geographic view.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Approximate geographic centers of the US states and DC.
const US_STATE_CENTERS: &[(&str, f64, f64)] = &[
    ("AL", 32.806671, -86.791130),
    ("AK", 61.370716, -152.404419),
    ("AZ", 33.729759, -111.431221),
    ("AR", 34.969704, -92.373123),
    ("CA", 36.116203, -119.681564),
    ("CO", 39.059811, -105.311104),
    ("CT", 41.597782, -72.755371),
    ("DE", 39.318523, -75.507141),
    ("DC", 38.897438, -77.026817),
    ("FL", 27.766279, -81.686783),
    ("GA", 33.040619, -83.643074),
    ("HI", 21.094318, -157.498337),
    ("ID", 44.240459, -114.478828),
    ("IL", 40.349457, -88.986137),
    ("IN", 39.849426, -86.258278),
    ("IA", 42.011539, -93.210526),
    ("KS", 38.526600, -96.726486),
    ("KY", 37.668140, -84.670067),
    ("LA", 31.169546, -91.867805),
    ("ME", 44.693947, -69.381927),
    ("MD", 39.063946, -76.802101),
    ("MA", 42.230171, -71.530106),
    ("MI", 43.326618, -84.536095),
    ("MN", 45.694454, -93.900192),
    ("MS", 32.741646, -89.678696),
    ("MO", 38.456085, -92.288368),
    ("MT", 46.921925, -110.454353),
    ("NE", 41.125370, -98.268082),
    ("NV", 38.313515, -117.055374),
    ("NH", 43.452492, -71.563896),
    ("NJ", 40.298904, -74.521011),
    ("NM", 34.840515, -106.248482),
    ("NY", 42.165726, -74.948051),
    ("NC", 35.630066, -79.806419),
    ("ND", 47.528912, -99.784012),
    ("OH", 40.388783, -82.764915),
    ("OK", 35.565342, -96.928917),
    ("OR", 44.572021, -122.070938),
    ("PA", 40.590752, -77.209755),
    ("RI", 41.680893, -71.511780),
    ("SC", 33.856892, -80.945007),
    ("SD", 44.299782, -99.438828),
    ("TN", 35.747845, -86.692345),
    ("TX", 31.054487, -97.563461),
    ("UT", 40.150032, -111.862434),
    ("VT", 44.045876, -72.710686),
    ("VA", 37.769337, -78.169968),
    ("WA", 47.400902, -121.490494),
    ("WV", 38.491226, -80.954453),
    ("WI", 44.268543, -89.616508),
    ("WY", 42.755966, -107.302490),
];

/// Static mapping from state code to coordinates.
///
/// Lookups use exact key equality. A code without an entry is not an error;
/// the geographic view simply carries no coordinates for it.
#[derive(Debug, Clone, Default)]
pub struct StateCoordinates {
    by_code: FxHashMap<String, Coordinates>,
}

impl StateCoordinates {
    /// An empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// The built-in table of US state centers.
    pub fn us_states() -> Self {
        US_STATE_CENTERS
            .iter()
            .map(|&(code, latitude, longitude)| {
                (
                    code,
                    Coordinates {
                        latitude,
                        longitude,
                    },
                )
            })
            .collect()
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, code: impl Into<String>, coordinates: Coordinates) {
        self.by_code.insert(code.into(), coordinates);
    }

    /// Coordinates for a state code.
    pub fn get(&self, code: &str) -> Option<Coordinates> {
        self.by_code.get(code).copied()
    }

    pub fn len(&self) -> usize {
        self.by_code.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_code.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, Coordinates)> for StateCoordinates {
    fn from_iter<I: IntoIterator<Item = (S, Coordinates)>>(iter: I) -> Self {
        Self {
            by_code: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
