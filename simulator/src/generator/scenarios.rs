use quakecore::feed::{Feature, FeatureCollection};

/// Hand-picked events covering both depth buckets, the 100 km boundary,
/// a missing depth and a record without magnitude.
pub fn reference_catalog() -> FeatureCollection {
    let mut unrated = Feature::point(-150.1, 61.2, Some(12.0), None);
    unrated.id = Some("ref-unrated".into());

    FeatureCollection::new(vec![
        Feature::point(10.0, 20.0, Some(50.0), Some(5.0)),
        Feature::point(10.0, 20.0, Some(150.0), Some(2.0)),
        Feature::point(-122.8, 38.8, Some(100.0), Some(3.3)),
        Feature::point(142.4, 38.3, None, Some(4.1)),
        unrated,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_catalog_has_one_unrated_event() {
        let catalog = reference_catalog();
        assert_eq!(catalog.len(), 5);
        let unrated = catalog
            .features
            .iter()
            .filter(|f| f.magnitude().is_none())
            .count();
        assert_eq!(unrated, 1);
    }
}
