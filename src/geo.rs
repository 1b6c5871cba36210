use crate::color::completion_color;
use crate::models::{GlobePoint, GroupSummary};

/// Static country centroid table for the globe projection. Countries
/// outside the table are skipped rather than plotted at (0, 0).
pub fn country_coordinates(country: &str) -> Option<(f64, f64)> {
    let coords = match country {
        "Argentina" => (-38.4, -63.6),
        "Australia" => (-25.3, 133.8),
        "Brazil" => (-14.2, -51.9),
        "Canada" => (56.1, -106.3),
        "Chile" => (-35.7, -71.5),
        "China" => (35.9, 104.2),
        "Colombia" => (4.6, -74.1),
        "Egypt" => (26.8, 30.8),
        "France" => (46.2, 2.2),
        "Germany" => (51.2, 10.4),
        "India" => (20.6, 79.0),
        "Indonesia" => (-0.8, 113.9),
        "Italy" => (41.9, 12.6),
        "Japan" => (36.2, 138.3),
        "Mexico" => (23.6, -102.5),
        "Netherlands" => (52.1, 5.3),
        "New Zealand" => (-40.9, 174.9),
        "Nigeria" => (9.1, 8.7),
        "Peru" => (-9.2, -75.0),
        "Poland" => (51.9, 19.1),
        "Singapore" => (1.35, 103.8),
        "South Africa" => (-30.6, 22.9),
        "South Korea" => (35.9, 127.8),
        "Spain" => (40.5, -3.7),
        "Sweden" => (60.1, 18.6),
        "Switzerland" => (46.8, 8.2),
        "Thailand" => (15.9, 101.0),
        "Turkey" => (39.0, 35.2),
        "United Arab Emirates" => (23.4, 53.8),
        "United Kingdom" => (55.4, -3.4),
        "United States" => (37.1, -95.7),
        "Vietnam" => (14.1, 108.3),
        _ => return None,
    };
    Some(coords)
}

/// Projects per-country summaries onto the globe. Point size scales with
/// total hours, floored so small countries stay visible.
pub fn globe_points(summaries: &[GroupSummary]) -> Vec<GlobePoint> {
    summaries
        .iter()
        .filter_map(|summary| {
            let (lat, lng) = country_coordinates(&summary.name)?;
            Some(GlobePoint {
                lat,
                lng,
                size: (summary.total_hours * 0.3).max(0.5),
                color: completion_color(summary.completion_rate),
                country: summary.name.clone(),
                region: summary.region.clone().unwrap_or_default(),
                associates: summary.associates,
                completion_rate: summary.completion_rate,
                total_hours: summary.total_hours,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color;

    fn summary(name: &str, hours: f64, rate: f64) -> GroupSummary {
        GroupSummary {
            name: name.to_string(),
            region: Some("LATAM".to_string()),
            records: 4,
            associates: 2,
            total_hours: hours,
            in_scope: 4,
            completed: 2,
            completion_rate: rate,
            avg_hours_per_associate: hours / 2.0,
        }
    }

    #[test]
    fn known_countries_resolve() {
        let (lat, lng) = country_coordinates("Brazil").unwrap();
        assert!(lat < 0.0 && lng < 0.0);
        assert!(country_coordinates("Atlantis").is_none());
    }

    #[test]
    fn unknown_countries_are_skipped() {
        let points = globe_points(&[summary("Brazil", 12.0, 70.0), summary("Atlantis", 9.0, 70.0)]);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].country, "Brazil");
    }

    #[test]
    fn point_size_is_floored() {
        let points = globe_points(&[summary("Chile", 0.4, 80.0)]);
        assert_eq!(points[0].size, 0.5);

        let points = globe_points(&[summary("Chile", 12.0, 80.0)]);
        assert!((points[0].size - 3.6).abs() < 1e-9);
    }

    #[test]
    fn point_color_follows_banding() {
        let points = globe_points(&[summary("Peru", 10.0, 55.0)]);
        assert_eq!(points[0].color, color::WARNING);
    }
}
