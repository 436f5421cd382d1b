use chrono::{DateTime, Utc};

use crate::util::event::{Event, PlayerId};
use crate::util::hit_location::HitLocation;
use crate::util::stat::StatType;

/// A charted hit with a display-only sequence number. The event itself is left untouched.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NumberedHit<'a> {
    pub event: &'a Event,
    pub location: &'a HitLocation,
    pub display_sequence: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HitKey {
    pub player_id: PlayerId,
    pub timestamp: DateTime<Utc>,
    pub stat_type: StatType,
}

impl<'a> NumberedHit<'a> {
    pub fn key(&self) -> HitKey {
        HitKey {
            player_id: self.event.player_id().clone(),
            timestamp: self.event.timestamp(),
            stat_type: self.event.stat_type(),
        }
    }
}

pub fn sequential_hit_numbering<'a>(events: impl IntoIterator<Item = &'a Event>) -> Vec<NumberedHit<'a>> {
    let mut hits = events
        .into_iter()
        .filter(|event| event.stat_type().is_charted_hit())
        .filter_map(|event| event.hit_location().map(|location| (event, location)))
        .collect::<Vec<_>>();
    hits.sort_by_key(|(event, _)| event.timestamp());
    hits.into_iter()
        .enumerate()
        .map(|(idx, (event, location))| NumberedHit { event, location, display_sequence: idx + 1 })
        .collect()
}

pub fn find_by_key<'a, 'b>(hits: &'b [NumberedHit<'a>], key: &HitKey) -> Option<&'b NumberedHit<'a>> {
    hits.iter().find(|hit| hit.event.player_id() == &key.player_id && hit.event.timestamp() == key.timestamp && hit.event.stat_type() == key.stat_type)
}

/// Closest marker to a normalized tap point within `radius`; ties go to the lower sequence.
pub fn nearest_hit<'a, 'b>(hits: &'b [NumberedHit<'a>], x: f64, y: f64, radius: f64) -> Option<&'b NumberedHit<'a>> {
    let mut best: Option<(&NumberedHit<'a>, f64)> = None;
    for hit in hits {
        let distance = hit.location.distance_to(x, y);
        if distance > radius {
            continue;
        }
        match best {
            Some((_, best_distance)) if best_distance <= distance => {}
            _ => best = Some((hit, distance)),
        }
    }
    best.map(|(hit, _)| hit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::event::tests::{at, event};

    fn located(id: &str, stat_type: StatType, minute: u32, x: f64, y: f64) -> Event {
        event(id, "p1", stat_type, minute)
            .hit_location(HitLocation::new(x, y, 0.5, 40).unwrap())
            .build()
            .unwrap()
    }

    fn sequence(hits: &[NumberedHit]) -> Vec<(String, usize)> {
        hits.iter().map(|hit| (hit.event.id().to_string(), hit.display_sequence)).collect()
    }

    #[test]
    fn test_numbers_only_located_hits_by_time() {
        let events = [
            located("c", StatType::Triple, 30, 0.1, 0.1),
            located("a", StatType::Single, 10, 0.2, 0.2),
            located("x", StatType::FlyOut, 15, 0.3, 0.3),
            event("y", "p1", StatType::Double, 5).build().unwrap(),
            located("b", StatType::HomeRun, 20, 0.4, 0.4),
        ];
        let hits = sequential_hit_numbering(&events);
        assert_eq!(sequence(&hits), [("a".to_owned(), 1), ("b".to_owned(), 2), ("c".to_owned(), 3)]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let events = [
            located("first", StatType::Single, 10, 0.1, 0.1),
            located("second", StatType::Double, 10, 0.2, 0.2),
            located("early", StatType::Single, 5, 0.3, 0.3),
        ];
        let hits = sequential_hit_numbering(&events);
        assert_eq!(sequence(&hits), [("early".to_owned(), 1), ("first".to_owned(), 2), ("second".to_owned(), 3)]);
    }

    #[test]
    fn test_renumbering_is_idempotent() {
        let events = [
            located("a", StatType::Single, 1, 0.1, 0.1),
            located("b", StatType::Single, 2, 0.2, 0.2),
        ];
        let once = sequential_hit_numbering(&events);
        let twice = sequential_hit_numbering(once.iter().map(|hit| hit.event));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_scoped_numbering_is_dense_and_leaves_events_untouched() {
        let events = [
            event("a", "p1", StatType::Single, 1).inning(3).at_bat_number(11).hit_location(HitLocation::new(0.5, 0.5, 0.0, 40).unwrap()).build().unwrap(),
            event("b", "p1", StatType::Double, 2).inning(3).at_bat_number(14).hit_location(HitLocation::new(0.5, 0.5, 0.0, 40).unwrap()).build().unwrap(),
        ];
        let hits = sequential_hit_numbering(&events);
        assert_eq!(hits.iter().map(|hit| hit.display_sequence).collect::<Vec<_>>(), [1, 2]);
        assert_eq!(events[1].at_bat_number().map(|n| n.get()), Some(14));
    }

    #[test]
    fn test_find_by_key() {
        let events = [
            located("a", StatType::Single, 1, 0.1, 0.1),
            located("b", StatType::Double, 2, 0.2, 0.2),
        ];
        let hits = sequential_hit_numbering(&events);
        let key = hits[1].key();
        assert_eq!(find_by_key(&hits, &key).map(|hit| hit.event.id().as_str()), Some("b"));

        let missing = HitKey { timestamp: at(59), ..key };
        assert!(find_by_key(&hits, &missing).is_none());
    }

    #[test]
    fn test_nearest_hit() {
        let events = [
            located("a", StatType::Single, 1, 0.5, 0.5),
            located("b", StatType::Double, 2, 0.6, 0.5),
            located("c", StatType::Triple, 3, 0.5, 0.5),
        ];
        let hits = sequential_hit_numbering(&events);
        assert_eq!(nearest_hit(&hits, 0.58, 0.5, 0.05).map(|hit| hit.display_sequence), Some(2));
        assert_eq!(nearest_hit(&hits, 0.5, 0.5, 0.05).map(|hit| hit.display_sequence), Some(1));
        assert!(nearest_hit(&hits, 0.0, 0.0, 0.05).is_none());
    }
}
