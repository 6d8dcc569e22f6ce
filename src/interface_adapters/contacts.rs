// Circle-overlap contact detection with collision-enter semantics.

use crate::domain::ports::{Body, BodyId, Contact, ContactSource};
use std::collections::HashSet;

/// Naive O(n^2) overlap test between every vehicle (or part) and every other body.
///
/// A pair is reported once when it starts overlapping and again only after
/// it has separated.
#[derive(Debug, Default)]
pub struct CircleContacts {
    touching: HashSet<(BodyId, BodyId)>,
}

impl CircleContacts {
    pub fn new() -> Self {
        Self::default()
    }
}

fn overlaps(a: &Body, b: &Body) -> bool {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let reach = a.radius + b.radius;
    dx * dx + dy * dy <= reach * reach
}

impl ContactSource for CircleContacts {
    fn detect(&mut self, bodies: &[Body]) -> Vec<Contact> {
        let mut now_touching = HashSet::new();
        let mut began = Vec::new();

        for (i, a) in bodies.iter().enumerate() {
            for b in &bodies[i + 1..] {
                // Scenery never collides with scenery.
                if matches!((a.id, b.id), (BodyId::Obstacle(_), BodyId::Obstacle(_))) {
                    continue;
                }
                // A vehicle's own colliders always overlap each other.
                if a.id.vehicle().is_some() && a.id.vehicle() == b.id.vehicle() {
                    continue;
                }
                if !overlaps(a, b) {
                    continue;
                }

                let pair = if a.id <= b.id { (a.id, b.id) } else { (b.id, a.id) };
                if !self.touching.contains(&pair) {
                    began.push(Contact {
                        a: pair.0,
                        b: pair.1,
                    });
                }
                now_touching.insert(pair);
            }
        }

        self.touching = now_touching;
        began
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(id: BodyId, x: f32) -> Body {
        Body {
            id,
            x,
            y: 0.0,
            radius: 1.0,
        }
    }

    #[test]
    fn reports_contact_only_on_enter() {
        let mut contacts = CircleContacts::new();
        let apart = [body(BodyId::Vehicle(0), 0.0), body(BodyId::Obstacle(0), 5.0)];
        let touching = [body(BodyId::Vehicle(0), 3.5), body(BodyId::Obstacle(0), 5.0)];

        assert!(contacts.detect(&apart).is_empty());
        assert_eq!(
            contacts.detect(&touching),
            vec![Contact {
                a: BodyId::Vehicle(0),
                b: BodyId::Obstacle(0)
            }]
        );
        assert!(contacts.detect(&touching).is_empty());

        // Separating and touching again is a new contact.
        assert!(contacts.detect(&apart).is_empty());
        assert_eq!(contacts.detect(&touching).len(), 1);
    }

    #[test]
    fn ignores_overlapping_scenery() {
        let mut contacts = CircleContacts::new();
        let bodies = [body(BodyId::Obstacle(0), 0.0), body(BodyId::Obstacle(1), 0.5)];
        assert!(contacts.detect(&bodies).is_empty());
    }

    #[test]
    fn vehicle_pairs_are_ordered() {
        let mut contacts = CircleContacts::new();
        let bodies = [body(BodyId::Vehicle(1), 0.0), body(BodyId::Vehicle(0), 1.0)];
        let found = contacts.detect(&bodies);
        assert_eq!(found[0].a, BodyId::Vehicle(0));
        assert_eq!(found[0].b, BodyId::Vehicle(1));
    }

    #[test]
    fn skips_colliders_of_the_same_vehicle() {
        let mut contacts = CircleContacts::new();
        let bodies = [
            body(BodyId::Vehicle(0), 0.0),
            body(BodyId::Part { vehicle: 0, part: 0 }, 0.5),
            body(BodyId::Part { vehicle: 0, part: 1 }, 1.0),
            body(BodyId::Part { vehicle: 1, part: 0 }, 2.8),
        ];
        assert_eq!(
            contacts.detect(&bodies),
            vec![Contact {
                a: BodyId::Part { vehicle: 0, part: 1 },
                b: BodyId::Part { vehicle: 1, part: 0 },
            }]
        );
    }
}
