//! Static table of major cities used for the "sanity check" nearest-city
//! readout. The lookup is a linear scan over squared distance in degree
//! space; it is deliberately not geodesic.

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct City {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

const fn city(name: &'static str, lat: f64, lon: f64) -> City {
    City { name, lat, lon }
}

/// 30 USA cities followed by 30 international ones.
pub static CITIES: &[City] = &[
    // USA
    city("New York", 40.7128, -74.0060),
    city("Los Angeles", 34.0522, -118.2437),
    city("Chicago", 41.8781, -87.6298),
    city("Houston", 29.7604, -95.3698),
    city("Phoenix", 33.4484, -112.0740),
    city("Philadelphia", 39.9526, -75.1652),
    city("San Antonio", 29.4241, -98.4936),
    city("San Diego", 32.7157, -117.1611),
    city("Dallas", 32.7767, -96.7970),
    city("San Jose", 37.3382, -121.8863),
    city("Austin", 30.2672, -97.7431),
    city("Jacksonville", 30.3322, -81.6557),
    city("Fort Worth", 32.7555, -97.3308),
    city("Columbus", 39.9612, -82.9988),
    city("Charlotte", 35.2271, -80.8431),
    city("San Francisco", 37.7749, -122.4194),
    city("Indianapolis", 39.7684, -86.1581),
    city("Seattle", 47.6062, -122.3321),
    city("Denver", 39.7392, -104.9903),
    city("Washington", 38.9072, -77.0369),
    city("Boston", 42.3601, -71.0589),
    city("El Paso", 31.7619, -106.4850),
    city("Nashville", 36.1627, -86.7816),
    city("Detroit", 42.3314, -83.0458),
    city("Oklahoma City", 35.4634, -97.5151),
    city("Portland", 45.5051, -122.6750),
    city("Las Vegas", 36.1699, -115.1398),
    city("Memphis", 35.1495, -90.0490),
    city("Louisville", 38.2527, -85.7585),
    city("Baltimore", 39.2904, -76.6122),
    // International
    city("London", 51.5074, -0.1278),
    city("Paris", 48.8566, 2.3522),
    city("Tokyo", 35.6895, 139.6917),
    city("Beijing", 39.9042, 116.4074),
    city("Moscow", 55.7558, 37.6173),
    city("Berlin", 52.5200, 13.4050),
    city("Madrid", 40.4168, -3.7038),
    city("Rome", 41.9028, 12.4964),
    city("Istanbul", 41.0082, 28.9784),
    city("Cairo", 30.0444, 31.2357),
    city("Sydney", -33.8688, 151.2093),
    city("Toronto", 43.6532, -79.3832),
    city("Mexico City", 19.4326, -99.1332),
    city("Sao Paulo", -23.5505, -46.6333),
    city("Buenos Aires", -34.6037, -58.3816),
    city("Johannesburg", -26.2041, 28.0473),
    city("Dubai", 25.2048, 55.2708),
    city("Singapore", 1.3521, 103.8198),
    city("Hong Kong", 22.3193, 114.1694),
    city("Bangkok", 13.7563, 100.5018),
    city("Seoul", 37.5665, 126.9780),
    city("Delhi", 28.6139, 77.2090),
    city("Jakarta", -6.2088, 106.8456),
    city("Lagos", 6.5244, 3.3792),
    city("Nairobi", -1.2921, 36.8219),
    city("Copenhagen", 55.6761, 12.5683),
    city("Stockholm", 59.3293, 18.0686),
    city("Helsinki", 60.1699, 24.9384),
    city("Oslo", 59.9139, 10.7522),
    city("Zurich", 47.3769, 8.5417),
];

fn nearest_in<'a>(table: &'a [City], lat: f64, lon: f64) -> &'a City {
    let mut min_dist = f64::INFINITY;
    let mut nearest = &table[0];
    for city in table {
        let dlat = city.lat - lat;
        let dlon = city.lon - lon;
        let dist = dlat * dlat + dlon * dlon;
        if dist < min_dist {
            min_dist = dist;
            nearest = city;
        }
    }
    nearest
}

/// Closest table entry to (lat, lon) by squared degree distance.
/// Strict `<` keeps the earliest entry when two are equidistant.
pub fn nearest_city(lat: f64, lon: f64) -> &'static City {
    nearest_in(CITIES, lat, lon)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_hit_returns_that_city() {
        assert_eq!(nearest_city(48.8566, 2.3522).name, "Paris");
    }

    #[test]
    fn washington_monument_resolves_to_washington() {
        assert_eq!(nearest_city(38.8895, -77.0353).name, "Washington");
    }

    #[test]
    fn southern_hemisphere_lookup() {
        assert_eq!(nearest_city(-33.9, 151.0).name, "Sydney");
    }

    #[test]
    fn ties_prefer_earlier_table_entries() {
        let table = [city("first", 1.0, 0.0), city("second", -1.0, 0.0)];
        // The origin is exactly equidistant from both entries.
        assert_eq!(nearest_in(&table, 0.0, 0.0).name, "first");
    }
}
