//! Great-circle distance and travel-time estimation.
//!
//! Distances use the Haversine formula over a spherical Earth; ETAs divide
//! by the transport speed from the rules. Both are pure functions of their
//! inputs -- no traffic, weather, or routing model.

use medevac_types::GeoPoint;

/// Mean Earth radius in kilometers.
pub const EARTH_RADIUS_KM: f64 = 6_371.0;

/// Great-circle distance between two points, in kilometers.
pub fn great_circle_km(from: GeoPoint, to: GeoPoint) -> f64 {
    let lat1 = from.latitude.to_radians();
    let lat2 = to.latitude.to_radians();
    let delta_lat = (to.latitude - from.latitude).to_radians();
    let delta_lon = (to.longitude - from.longitude).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Travel time between two points in minutes at the given speed.
pub fn eta_minutes(from: GeoPoint, to: GeoPoint, speed_kmh: f64) -> f64 {
    (great_circle_km(from, to) / speed_kmh) * 60.0
}
